//! Multi-threaded dispatch.
//!
//! The output rows are cut into one contiguous range per worker, C is split
//! into matching disjoint `&mut` slices, and every worker runs the blocked
//! kernel over its own slice. Disjointness is what makes this lock-free;
//! the borrow checker enforces it, not a convention.
//!
//! - `partition`: row ranges per worker
//! - `dispatch`: allocation, fan-out and join

pub mod dispatch;
pub mod partition;
