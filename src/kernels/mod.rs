//! SIMD dot-product kernels for the inner reduction of the i32 GEMM.
//!
//! Each kernel computes `sum(a[k] * b[k])` over two equal-length slices
//! using 4 lanes of i32, then folds in the `len % 4` leftovers with a
//! scalar loop. All arithmetic wraps, so every kernel returns exactly the
//! same bits as the scalar reference even when the sum overflows.
//!
//! Available kernels:
//! - `dot_sse41`: x86_64 SSE4.1 (`pmulld`)
//! - `dot_neon`: aarch64 NEON (`mla`)
//! - `dot_scalar`: portable 4-lane fallback

pub mod dot_neon;
pub mod dot_scalar;
pub mod dot_sse41;

/// Number of i32 lanes in one 128-bit vector.
pub const LANES: usize = 4;

/// Signature shared by all dot-product kernels.
pub type DotFn = fn(&[i32], &[i32]) -> i32;

/// Instruction set used for the inner reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Isa {
    /// Portable code, no intrinsics
    Scalar,
    /// x86_64 SSE4.1
    Sse41,
    /// aarch64 Advanced SIMD
    Neon,
}

impl Isa {
    /// Pick the best instruction set this CPU supports.
    pub fn detect() -> Self {
        if Isa::Neon.is_available() {
            return Isa::Neon;
        }
        if Isa::Sse41.is_available() {
            return Isa::Sse41;
        }
        Isa::Scalar
    }

    pub fn is_available(self) -> bool {
        match self {
            Isa::Scalar => true,
            Isa::Sse41 => {
                #[cfg(target_arch = "x86_64")]
                {
                    is_x86_feature_detected!("sse4.1")
                }
                #[cfg(not(target_arch = "x86_64"))]
                {
                    false
                }
            }
            Isa::Neon => {
                #[cfg(target_arch = "aarch64")]
                {
                    std::arch::is_aarch64_feature_detected!("neon")
                }
                #[cfg(not(target_arch = "aarch64"))]
                {
                    false
                }
            }
        }
    }

    /// Lane width of the vector accumulator.
    ///
    /// Every backend here works on 128-bit registers, so this is 4 for all
    /// of them; a wider backend would report its own width.
    pub fn lanes(self) -> usize {
        LANES
    }

    /// The dot-product kernel for this instruction set.
    ///
    /// Falls back to the scalar kernel if the CPU lacks the feature, so the
    /// returned function is always safe to call.
    pub fn dot_fn(self) -> DotFn {
        if !self.is_available() {
            return dot_scalar::dot_scalar;
        }
        match self {
            Isa::Scalar => dot_scalar::dot_scalar,
            Isa::Sse41 => dot_sse41::dot_sse41,
            Isa::Neon => dot_neon::dot_neon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(a: &[i32], b: &[i32]) -> i32 {
        a.iter()
            .zip(b)
            .fold(0i32, |acc, (&x, &y)| acc.wrapping_add(x.wrapping_mul(y)))
    }

    fn all_isas() -> [Isa; 3] {
        [Isa::Scalar, Isa::Sse41, Isa::Neon]
    }

    #[test]
    fn test_detect_is_available() {
        assert!(Isa::detect().is_available());
        assert!(Isa::Scalar.is_available());
    }

    #[test]
    fn test_lanes_is_four() {
        for isa in all_isas() {
            assert_eq!(isa.lanes(), 4);
        }
    }

    #[test]
    fn test_dot_matches_reference_all_lengths() {
        // Covers empty, pure remainder (1..3), exact multiples and mixed
        for len in 0..=19 {
            let a: Vec<i32> = (0..len as i32).map(|i| i * 3 - 7).collect();
            let b: Vec<i32> = (0..len as i32).map(|i| 11 - i * 2).collect();
            let expected = reference(&a, &b);
            for isa in all_isas() {
                assert_eq!(
                    isa.dot_fn()(&a, &b),
                    expected,
                    "{:?}: mismatch at len {}",
                    isa,
                    len
                );
            }
        }
    }

    #[test]
    fn test_dot_wraps_on_overflow() {
        let a = vec![i32::MAX; 9];
        let b = vec![3; 9];
        let expected = reference(&a, &b);
        for isa in all_isas() {
            assert_eq!(isa.dot_fn()(&a, &b), expected, "{:?}", isa);
        }
    }

    #[test]
    fn test_dot_negative_values() {
        let a = [-1, -2, -3, -4, -5];
        let b = [5, 4, 3, 2, 1];
        for isa in all_isas() {
            assert_eq!(isa.dot_fn()(&a, &b), -35, "{:?}", isa);
        }
    }
}
