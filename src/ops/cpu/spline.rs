//! CPU implementation of B-spline convolution building blocks.

use crate::dispatch_float_dtype;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::ops::SplineOps;
use crate::ops::spline_common::{
    num_basis_products, validate_basis_args, validate_kernel_sizes, validate_weighting_args,
};
use crate::runtime::cpu::helpers::{ensure_contiguous, host_slice, host_slice_mut, read_index};
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::Tensor;

impl SplineOps<CpuRuntime> for CpuClient {
    fn spline_basis(
        &self,
        pseudo: &Tensor<CpuRuntime>,
        kernel_size: &Tensor<CpuRuntime>,
        is_open_spline: &Tensor<CpuRuntime>,
        degree: usize,
    ) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        validate_basis_args(
            pseudo.shape(),
            pseudo.dtype(),
            kernel_size.shape(),
            kernel_size.dtype(),
            is_open_spline.shape(),
            is_open_spline.dtype(),
            degree,
        )?;

        let kernel_size = read_index(kernel_size, "kernel_size")?;
        validate_kernel_sizes(&kernel_size)?;
        let is_open = is_open_spline.to_vec::<u8>()?;

        let (edges, dims) = (pseudo.shape()[0], pseudo.shape()[1]);
        let products = num_basis_products(degree, dims)?;
        let dtype = pseudo.dtype();
        let pseudo = ensure_contiguous(pseudo)?;

        let mut basis = Tensor::<CpuRuntime>::try_empty(&[edges, products], dtype, &self.device)?;
        let mut weight_index =
            Tensor::<CpuRuntime>::try_empty(&[edges, products], DType::I64, &self.device)?;

        tracing::trace!(edges, dims, degree, products, "cpu spline basis");

        dispatch_float_dtype!(dtype, T => {
            // SAFETY: both outputs were allocated above and are not shared yet.
            let basis_out = unsafe { host_slice_mut::<T>(&mut basis)? };
            let index_out = unsafe { host_slice_mut::<i64>(&mut weight_index)? };
            kernels::spline_basis_kernel::<T>(
                host_slice::<T>(&pseudo)?,
                &kernel_size,
                &is_open,
                degree,
                basis_out,
                index_out,
            );
        }, "spline_basis");

        Ok((basis, weight_index))
    }

    fn spline_weighting(
        &self,
        x: &Tensor<CpuRuntime>,
        weight: &Tensor<CpuRuntime>,
        basis: &Tensor<CpuRuntime>,
        weight_index: &Tensor<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        let dims = validate_weighting_args(
            (x.shape(), x.dtype()),
            (weight.shape(), weight.dtype()),
            (basis.shape(), basis.dtype()),
            (weight_index.shape(), weight_index.dtype()),
        )?;

        let index = read_index(weight_index, "weight_index")?;
        if let Some(&bad) = index
            .iter()
            .find(|&&i| i < 0 || i as usize >= dims.kernel)
        {
            return Err(Error::IndexOutOfBounds {
                index: bad,
                size: dims.kernel,
            });
        }

        let dtype = x.dtype();
        let x = ensure_contiguous(x)?;
        let weight = ensure_contiguous(weight)?;
        let basis = ensure_contiguous(basis)?;
        let mut out =
            Tensor::<CpuRuntime>::try_empty(&[dims.edges, dims.out_channels], dtype, &self.device)?;

        dispatch_float_dtype!(dtype, T => {
            // SAFETY: `out` was allocated above and is not shared yet.
            let out_slice = unsafe { host_slice_mut::<T>(&mut out)? };
            kernels::spline_weighting_kernel::<T>(
                host_slice::<T>(&x)?,
                host_slice::<T>(&weight)?,
                host_slice::<T>(&basis)?,
                &index,
                out_slice,
                dims.in_channels,
                dims.out_channels,
                dims.products,
            );
        }, "spline_weighting");

        Ok(out)
    }
}
