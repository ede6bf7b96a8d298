//! Dispatcher configuration.

use crate::error::{MatmulError, Result};
use crate::kernels::Isa;

/// Default number of workers the output rows are split across.
pub const DEFAULT_WORKERS: usize = 4;

/// Default cache block edge (rows, columns and reduction length).
///
/// 64×64 i32 tiles of A, B and C come to 48 KiB, which sits in L2 on
/// anything recent and mostly in L1 for the A/B pair.
pub const DEFAULT_BLOCK_SIZE: usize = 64;

/// How the per-worker kernels get run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dispatch {
    /// Spawn one scoped OS thread per worker, join before returning.
    #[default]
    Scoped,
    /// Fan the same row ranges out over rayon's global pool.
    Pool,
}

/// Knobs for [`multiply_with`](crate::multiply_with).
///
/// ```
/// use imatmul::{Config, Dispatch};
///
/// let config = Config::default().workers(8).block_size(32).dispatch(Dispatch::Pool);
/// assert_eq!(config.workers, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of row ranges (and threads, for [`Dispatch::Scoped`]).
    pub workers: usize,
    /// Edge of the square cache blocks.
    pub block_size: usize,
    /// Execution strategy.
    pub dispatch: Dispatch,
    /// Force an instruction set. `None` picks the best one at runtime.
    pub isa: Option<Isa>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            block_size: DEFAULT_BLOCK_SIZE,
            dispatch: Dispatch::Scoped,
            isa: None,
        }
    }
}

impl Config {
    /// Set the number of workers.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the cache block edge.
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Pick the threading strategy.
    pub fn dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Force an instruction set instead of detecting one.
    pub fn isa(mut self, isa: Isa) -> Self {
        self.isa = Some(isa);
        self
    }

    /// Reject settings the dispatcher can't run with.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(MatmulError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        if self.block_size == 0 {
            return Err(MatmulError::InvalidConfig(
                "block_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The instruction set this config will actually run with.
    pub(crate) fn resolve_isa(&self) -> Isa {
        match self.isa {
            None => Isa::detect(),
            Some(isa) if isa.is_available() => isa,
            Some(isa) => {
                log::warn!("{:?} not available on this CPU, falling back to scalar", isa);
                Isa::Scalar
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.workers, 4);
        assert_eq!(config.block_size, 64);
        assert_eq!(config.dispatch, Dispatch::Scoped);
        assert_eq!(config.isa, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = Config::default().workers(0).validate().unwrap_err();
        assert!(matches!(err, MatmulError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let err = Config::default().block_size(0).validate().unwrap_err();
        assert!(matches!(err, MatmulError::InvalidConfig(_)));
    }

    #[test]
    fn test_forced_scalar_always_resolves() {
        assert_eq!(Config::default().isa(Isa::Scalar).resolve_isa(), Isa::Scalar);
    }

    #[test]
    fn test_resolved_isa_is_available() {
        assert!(Config::default().resolve_isa().is_available());
        assert!(Config::default().isa(Isa::Neon).resolve_isa().is_available());
        assert!(Config::default().isa(Isa::Sse41).resolve_isa().is_available());
    }
}
