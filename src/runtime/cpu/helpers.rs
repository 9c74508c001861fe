//! Helper functions for CPU tensor operations
//!
//! Op implementations work on contiguous host buffers. These helpers produce
//! such buffers and expose them as typed slices for the kernels.

use super::{CpuDevice, CpuRuntime};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::tensor::Tensor;

/// Return `tensor` itself if contiguous, otherwise a contiguous copy.
pub(crate) fn ensure_contiguous(tensor: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
    if tensor.is_contiguous() {
        Ok(tensor.clone())
    } else {
        tensor.contiguous()
    }
}

/// Borrow the elements of a contiguous tensor as a host slice.
///
/// Returns `DTypeMismatch` if `T` does not match the tensor dtype and
/// `NotContiguous` for strided views.
pub(crate) fn host_slice<T: Element>(tensor: &Tensor<CpuRuntime>) -> Result<&[T]> {
    check_host_view::<T>(tensor)?;
    let len = tensor.numel();
    if len == 0 {
        return Ok(&[]);
    }
    // SAFETY: CPU storage is a live, aligned host allocation of at least
    // `len` elements of `T`, kept alive by the borrow of `tensor`.
    Ok(unsafe { std::slice::from_raw_parts(tensor.storage().ptr() as *const T, len) })
}

/// Mutable access to the elements of a freshly allocated output tensor.
///
/// # Safety
///
/// The caller must hold the only handle to the tensor's storage, so that no
/// other slice aliases the buffer while the returned slice is alive.
pub(crate) unsafe fn host_slice_mut<T: Element>(
    tensor: &mut Tensor<CpuRuntime>,
) -> Result<&mut [T]> {
    check_host_view::<T>(tensor)?;
    let len = tensor.numel();
    if len == 0 {
        return Ok(&mut []);
    }
    // SAFETY: as in `host_slice`; exclusivity is guaranteed by the caller.
    Ok(unsafe { std::slice::from_raw_parts_mut(tensor.storage().ptr() as *mut T, len) })
}

fn check_host_view<T: Element>(tensor: &Tensor<CpuRuntime>) -> Result<()> {
    if T::DTYPE != tensor.dtype() {
        return Err(Error::DTypeMismatch {
            lhs: T::DTYPE,
            rhs: tensor.dtype(),
        });
    }
    if !tensor.is_contiguous() {
        return Err(Error::NotContiguous);
    }
    Ok(())
}

/// Copy an I64 index tensor to the host.
pub(crate) fn read_index(tensor: &Tensor<CpuRuntime>, arg: &'static str) -> Result<Vec<i64>> {
    if tensor.dtype() != DType::I64 {
        return Err(Error::invalid_argument(
            arg,
            format!("expected I64 tensor, got {}", tensor.dtype()),
        ));
    }
    tensor.to_vec::<i64>()
}

/// Wrap a host vector as a tensor on `device`.
pub(crate) fn tensor_from_vec<T: Element>(
    data: Vec<T>,
    shape: &[usize],
    device: &CpuDevice,
) -> Result<Tensor<CpuRuntime>> {
    Tensor::<CpuRuntime>::try_from_slice(&data, shape, device)
}
