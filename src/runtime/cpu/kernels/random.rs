//! Random fill kernels

use crate::dtype::Element;
use rand::Rng;

/// Fill output with uniform random values in [0, 1)
///
/// Draws that round up to 1 in the target precision are redrawn.
///
/// # Safety
/// - `out` must be a valid pointer to `len` elements
#[inline]
pub unsafe fn rand_uniform_kernel<T: Element>(out: *mut T, len: usize) {
    let mut rng = rand::rng();
    let out_slice = std::slice::from_raw_parts_mut(out, len);

    for elem in out_slice.iter_mut() {
        *elem = loop {
            let val: f64 = rng.random();
            let cast = T::from_f64(val);
            if cast.to_f64() < 1.0 {
                break cast;
            }
        };
    }
}
