//! Whole-tensor comparison operations.

use crate::dispatch_dtype;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::{Device, Runtime};
use crate::tensor::Tensor;

/// Whole-tensor comparisons used to check results against expectations
///
/// Both methods have host-side default implementations that work for every
/// runtime. `allclose` compares in f64, `equal` in the tensors' own dtype.
pub trait CompareOps<R: Runtime> {
    /// True if shapes match and every element satisfies
    /// `|a - b| <= atol + rtol * |b|`.
    ///
    /// Returns `Ok(false)` for mismatched shapes or NaN elements, and
    /// `Err(DeviceMismatch)` when the operands live on different devices.
    fn allclose(&self, a: &Tensor<R>, b: &Tensor<R>, atol: f64, rtol: f64) -> Result<bool> {
        ensure_same_device(a, b)?;
        if a.shape() != b.shape() {
            return Ok(false);
        }

        let lhs = a.to_f64_vec()?;
        let rhs = b.to_f64_vec()?;
        Ok(lhs
            .iter()
            .zip(&rhs)
            .all(|(x, y)| (x - y).abs() <= atol + rtol * y.abs()))
    }

    /// True if shape, dtype and every value are identical.
    fn equal(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<bool> {
        ensure_same_device(a, b)?;
        if a.shape() != b.shape() || a.dtype() != b.dtype() {
            return Ok(false);
        }
        // Booleans are 0 or 1, exact in f64
        if a.dtype() == DType::Bool {
            return Ok(a.to_f64_vec()? == b.to_f64_vec()?);
        }
        dispatch_dtype!(a.dtype(), T => {
            Ok(a.to_vec::<T>()? == b.to_vec::<T>()?)
        }, "equal")
    }
}

fn ensure_same_device<R: Runtime>(a: &Tensor<R>, b: &Tensor<R>) -> Result<()> {
    if a.device().is_same(b.device()) {
        Ok(())
    } else {
        Err(Error::DeviceMismatch)
    }
}
