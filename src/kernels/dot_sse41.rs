//! SSE4.1 dot product (x86_64).

/// Dot product using `_mm_mullo_epi32` / `_mm_add_epi32`.
///
/// Safe to call on any CPU: without SSE4.1 (or off x86_64) it forwards to
/// the scalar kernel, which returns the same result.
pub fn dot_sse41(a: &[i32], b: &[i32]) -> i32 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("sse4.1") {
            // SAFETY: feature checked just above
            return unsafe { dot_sse41_impl(a, b) };
        }
    }
    super::dot_scalar::dot_scalar(a, b)
}

/// # Safety
///
/// Caller must ensure the CPU supports SSE4.1.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse4.1")]
#[allow(unsafe_op_in_unsafe_fn)]
unsafe fn dot_sse41_impl(a: &[i32], b: &[i32]) -> i32 {
    use super::LANES;
    use std::arch::x86_64::*;

    let len = a.len().min(b.len());
    let main = len - len % LANES;
    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    let mut acc = _mm_setzero_si128();
    let mut k = 0;
    while k < main {
        let va = _mm_loadu_si128(a_ptr.add(k) as *const __m128i);
        let vb = _mm_loadu_si128(b_ptr.add(k) as *const __m128i);
        acc = _mm_add_epi32(acc, _mm_mullo_epi32(va, vb));
        k += LANES;
    }

    // Horizontal reduce: spill the 4 lanes and fold them
    let mut lanes = [0i32; LANES];
    _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, acc);
    let mut sum = lanes.iter().fold(0i32, |s, &x| s.wrapping_add(x));

    for k in main..len {
        sum = sum.wrapping_add(a[k].wrapping_mul(b[k]));
    }
    sum
}
