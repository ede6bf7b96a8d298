//! NEON dot product (aarch64).

/// Dot product using `vmlaq_s32` with a `vaddvq_s32` horizontal reduce.
///
/// Safe to call on any CPU: without NEON (or off aarch64) it forwards to
/// the scalar kernel.
pub fn dot_neon(a: &[i32], b: &[i32]) -> i32 {
    #[cfg(target_arch = "aarch64")]
    {
        if std::arch::is_aarch64_feature_detected!("neon") {
            // SAFETY: feature checked just above
            return unsafe { dot_neon_impl(a, b) };
        }
    }
    super::dot_scalar::dot_scalar(a, b)
}

/// # Safety
///
/// Caller must ensure the CPU supports NEON.
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
#[allow(unsafe_op_in_unsafe_fn)]
unsafe fn dot_neon_impl(a: &[i32], b: &[i32]) -> i32 {
    use super::LANES;
    use std::arch::aarch64::*;

    let len = a.len().min(b.len());
    let main = len - len % LANES;
    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    let mut acc = vdupq_n_s32(0);
    let mut k = 0;
    while k < main {
        let va = vld1q_s32(a_ptr.add(k));
        let vb = vld1q_s32(b_ptr.add(k));
        acc = vmlaq_s32(acc, va, vb);
        k += LANES;
    }

    let mut sum = vaddvq_s32(acc);
    for k in main..len {
        sum = sum.wrapping_add(a[k].wrapping_mul(b[k]));
    }
    sum
}
