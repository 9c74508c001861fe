//! Shared validation and planning for scatter operations.
//!
//! Every backend validates scatter arguments the same way so that CPU and GPU
//! report identical errors for identical inputs.

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::ops::ScatterReduce;
use crate::tensor::checked_numel;

/// Geometry of a scatter along one dimension.
///
/// `src` is viewed as `[outer, src_dim, inner]` and the output as
/// `[outer, dim_size, inner]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScatterPlan {
    /// Product of the dimensions before `dim`
    pub outer: usize,
    /// Size of `src` along `dim`
    pub src_dim: usize,
    /// Product of the dimensions after `dim`
    pub inner: usize,
    /// Size of the output along `dim`
    pub dim_size: usize,
    /// Full output shape
    pub out_shape: Vec<usize>,
    /// True when a 1-D index is broadcast along the other dimensions
    pub broadcast_index: bool,
}

impl ScatterPlan {
    /// Number of output elements
    ///
    /// Cannot overflow: [`scatter_plan`] rejects output shapes that do.
    #[inline]
    pub fn out_numel(&self) -> usize {
        self.outer * self.dim_size * self.inner
    }
}

/// Validates the scatter dimension and index layout.
///
/// Returns true when `index` is a 1-D tensor to broadcast along the other
/// dimensions of `src`.
pub fn validate_scatter_index(
    src_shape: &[usize],
    index_shape: &[usize],
    index_dtype: DType,
    dim: usize,
) -> Result<bool> {
    let ndim = src_shape.len();
    if dim >= ndim {
        return Err(Error::InvalidDimension {
            dim: dim as isize,
            ndim,
        });
    }

    if index_dtype != DType::I64 {
        return Err(Error::DTypeMismatch {
            lhs: DType::I64,
            rhs: index_dtype,
        });
    }

    if index_shape == src_shape {
        return Ok(false);
    }

    if index_shape.len() == 1 && index_shape[0] == src_shape[dim] {
        return Ok(true);
    }

    Err(Error::shape_mismatch(src_shape, index_shape))
}

/// Validates that `dtype` supports the requested reduction.
///
/// Mean needs division, so only float dtypes qualify; the other reductions
/// also accept I64 and I32.
pub fn validate_scatter_dtype(dtype: DType, reduce: ScatterReduce) -> Result<()> {
    let ok = match reduce {
        ScatterReduce::Mean => dtype.is_float(),
        _ => matches!(dtype, DType::F32 | DType::F64 | DType::I64 | DType::I32),
    };
    if ok {
        Ok(())
    } else {
        Err(Error::unsupported_dtype(dtype, "scatter"))
    }
}

/// Resolves the output size along the scatter dimension and checks every
/// index value against it.
pub fn resolve_dim_size(index: &[i64], dim_size: Option<usize>) -> Result<usize> {
    if let Some(&negative) = index.iter().find(|&&i| i < 0) {
        return Err(Error::IndexOutOfBounds {
            index: negative,
            size: dim_size.unwrap_or(0),
        });
    }

    let inferred = index.iter().max().map_or(0, |&m| m as usize + 1);
    match dim_size {
        None => Ok(inferred),
        Some(size) if inferred <= size => Ok(size),
        Some(size) => Err(Error::IndexOutOfBounds {
            index: inferred as i64 - 1,
            size,
        }),
    }
}

/// Builds the full scatter plan from validated shapes and index values.
///
/// Fails with `InvalidArgument` when the output shape is too large to
/// address, which a large index value can cause when `dim_size` is inferred.
pub fn scatter_plan(
    src_shape: &[usize],
    dim: usize,
    broadcast_index: bool,
    dim_size: usize,
) -> Result<ScatterPlan> {
    let outer = src_shape[..dim].iter().product();
    let inner = src_shape[dim + 1..].iter().product();
    let mut out_shape = src_shape.to_vec();
    out_shape[dim] = dim_size;
    checked_numel(&out_shape)?;

    Ok(ScatterPlan {
        outer,
        src_dim: src_shape[dim],
        inner,
        dim_size,
        out_shape,
        broadcast_index,
    })
}
