//! CPU implementation of scatter operations.

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::ops::scatter_common::{
    ScatterPlan, resolve_dim_size, scatter_plan, validate_scatter_dtype, validate_scatter_index,
};
use crate::ops::{ScatterOps, ScatterReduce};
use crate::runtime::cpu::helpers::{ensure_contiguous, read_index};
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::Tensor;
use crate::{dispatch_dtype, dispatch_float_dtype};

/// Validate arguments and build the plan shared by all scatter variants.
fn plan_scatter(
    src: &Tensor<CpuRuntime>,
    index: &Tensor<CpuRuntime>,
    dim: usize,
    dim_size: Option<usize>,
) -> Result<(ScatterPlan, Vec<i64>)> {
    let broadcast = validate_scatter_index(src.shape(), index.shape(), index.dtype(), dim)?;
    let index_values = read_index(index, "index")?;
    let dim_size = resolve_dim_size(&index_values, dim_size)?;
    Ok((
        scatter_plan(src.shape(), dim, broadcast, dim_size)?,
        index_values,
    ))
}

/// Run the reduce kernel, collecting arg positions for min/max.
fn scatter_reduce(
    client: &CpuClient,
    src: &Tensor<CpuRuntime>,
    index: &Tensor<CpuRuntime>,
    dim: usize,
    dim_size: Option<usize>,
    reduce: ScatterReduce,
) -> Result<(Tensor<CpuRuntime>, Option<Tensor<CpuRuntime>>)> {
    let dtype = src.dtype();
    validate_scatter_dtype(dtype, reduce)?;
    let (plan, index_values) = plan_scatter(src, index, dim, dim_size)?;

    let src = ensure_contiguous(src)?;
    let out = Tensor::<CpuRuntime>::try_empty(&plan.out_shape, dtype, &client.device)?;
    let arg = if reduce.has_arg() {
        Some(Tensor::<CpuRuntime>::try_empty(
            &plan.out_shape,
            DType::I64,
            &client.device,
        )?)
    } else {
        None
    };

    let src_ptr = src.storage().ptr();
    let out_ptr = out.storage().ptr();
    let arg_ptr = arg.as_ref().map_or(0, |a| a.storage().ptr());

    tracing::trace!(
        reduce = reduce.name(),
        dim,
        dim_size = plan.dim_size,
        shape = ?plan.out_shape,
        "cpu scatter"
    );

    dispatch_dtype!(dtype, T => {
        unsafe {
            kernels::scatter_reduce_kernel::<T>(
                src_ptr as *const T,
                index_values.as_ptr(),
                out_ptr as *mut T,
                arg_ptr as *mut i64,
                &plan,
                reduce,
            );
        }
    }, "scatter");

    Ok((out, arg))
}

fn with_arg(
    result: (Tensor<CpuRuntime>, Option<Tensor<CpuRuntime>>),
    op: &str,
) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
    match result {
        (values, Some(arg)) => Ok((values, arg)),
        (_, None) => Err(Error::Internal(format!("{op}: arg tensor was not allocated"))),
    }
}

impl ScatterOps<CpuRuntime> for CpuClient {
    fn scatter(
        &self,
        src: &Tensor<CpuRuntime>,
        index: &Tensor<CpuRuntime>,
        dim: usize,
        dim_size: Option<usize>,
        reduce: ScatterReduce,
    ) -> Result<Tensor<CpuRuntime>> {
        let (values, _) = scatter_reduce(self, src, index, dim, dim_size, reduce)?;
        Ok(values)
    }

    fn scatter_min(
        &self,
        src: &Tensor<CpuRuntime>,
        index: &Tensor<CpuRuntime>,
        dim: usize,
        dim_size: Option<usize>,
    ) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        let result = scatter_reduce(self, src, index, dim, dim_size, ScatterReduce::Min)?;
        with_arg(result, "scatter_min")
    }

    fn scatter_max(
        &self,
        src: &Tensor<CpuRuntime>,
        index: &Tensor<CpuRuntime>,
        dim: usize,
        dim_size: Option<usize>,
    ) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        let result = scatter_reduce(self, src, index, dim, dim_size, ScatterReduce::Max)?;
        with_arg(result, "scatter_max")
    }

    fn scatter_softmax(
        &self,
        src: &Tensor<CpuRuntime>,
        index: &Tensor<CpuRuntime>,
        dim: usize,
    ) -> Result<Tensor<CpuRuntime>> {
        let dtype = src.dtype();
        let broadcast = validate_scatter_index(src.shape(), index.shape(), index.dtype(), dim)?;
        let index_values = read_index(index, "index")?;
        // Only the sign is checked; the output keeps the shape of `src`
        resolve_dim_size(&index_values, None)?;
        let plan = scatter_plan(src.shape(), dim, broadcast, src.shape()[dim])?;

        let src = ensure_contiguous(src)?;
        let out = Tensor::<CpuRuntime>::try_empty(src.shape(), dtype, &self.device)?;
        let src_ptr = src.storage().ptr();
        let out_ptr = out.storage().ptr();

        dispatch_float_dtype!(dtype, T => {
            unsafe {
                kernels::scatter_softmax_kernel::<T>(
                    src_ptr as *const T,
                    index_values.as_ptr(),
                    out_ptr as *mut T,
                    &plan,
                );
            }
        }, "scatter_softmax");

        Ok(out)
    }
}
