//! Shared validation for nearest-neighbour searches.
//!
//! Used by every backend so that point-cloud arguments are checked the same
//! way before any kernel runs.

use crate::dtype::DType;
use crate::error::{Error, Result};

/// Validates that a tensor is 2-dimensional.
///
/// # Errors
/// Returns `InvalidArgument` if the tensor is not 2D.
#[inline]
pub fn validate_2d_tensor(shape: &[usize], arg_name: &'static str, op: &'static str) -> Result<()> {
    if shape.len() != 2 {
        return Err(Error::InvalidArgument {
            arg: arg_name,
            reason: format!("{} expects 2D tensor, got {}D", op, shape.len()),
        });
    }
    Ok(())
}

/// Validates that two point sets share the feature dimension (last axis).
///
/// # Errors
/// Returns `ShapeMismatch` with the shape `y` would need.
#[inline]
pub fn validate_same_dimension(x_shape: &[usize], y_shape: &[usize]) -> Result<()> {
    let d_x = x_shape[x_shape.len() - 1];
    let d_y = y_shape[y_shape.len() - 1];
    if d_x != d_y {
        let mut expected = y_shape.to_vec();
        let last = expected.len() - 1;
        expected[last] = d_x;
        return Err(Error::ShapeMismatch {
            expected,
            got: y_shape.to_vec(),
        });
    }
    Ok(())
}

/// Validates that a dtype is a floating-point type.
#[inline]
pub fn validate_float_dtype(dtype: DType, op: &'static str) -> Result<()> {
    if !dtype.is_float() {
        return Err(Error::UnsupportedDType { dtype, op });
    }
    Ok(())
}

/// Validates that two point sets have the same dtype.
#[inline]
pub fn validate_same_dtype(x_dtype: DType, y_dtype: DType, op: &'static str) -> Result<()> {
    if y_dtype != x_dtype {
        return Err(Error::InvalidArgument {
            arg: "y",
            reason: format!(
                "{} requires same dtype, got x.dtype={}, y.dtype={}",
                op, x_dtype, y_dtype
            ),
        });
    }
    Ok(())
}

/// Validates a batch assignment vector for `n` points.
///
/// The batch must be a 1-D I64 tensor of length `n`.
pub fn validate_batch(
    shape: &[usize],
    dtype: DType,
    n: usize,
    arg_name: &'static str,
    op: &'static str,
) -> Result<()> {
    if dtype != DType::I64 {
        return Err(Error::DTypeMismatch {
            lhs: DType::I64,
            rhs: dtype,
        });
    }
    if shape != [n] {
        return Err(Error::InvalidArgument {
            arg: arg_name,
            reason: format!("{} expects batch of shape [{}], got {:?}", op, n, shape),
        });
    }
    Ok(())
}

/// Validates the common arguments of `knn` and `radius`.
pub fn validate_point_sets(
    x_shape: &[usize],
    x_dtype: DType,
    y_shape: &[usize],
    y_dtype: DType,
    op: &'static str,
) -> Result<()> {
    validate_2d_tensor(x_shape, "x", op)?;
    validate_2d_tensor(y_shape, "y", op)?;
    validate_float_dtype(x_dtype, op)?;
    validate_same_dtype(x_dtype, y_dtype, op)?;
    validate_same_dimension(x_shape, y_shape)
}

/// Validates the neighbour count of a k-nearest search.
#[inline]
pub fn validate_k(k: usize, op: &'static str) -> Result<()> {
    if k == 0 {
        return Err(Error::InvalidArgument {
            arg: "k",
            reason: format!("{} requires k > 0", op),
        });
    }
    Ok(())
}

/// Validates a search radius.
#[inline]
pub fn validate_radius(r: f64, max_num_neighbors: usize, op: &'static str) -> Result<()> {
    if !r.is_finite() || r < 0.0 {
        return Err(Error::InvalidArgument {
            arg: "r",
            reason: format!("{} requires a finite, non-negative radius, got {}", op, r),
        });
    }
    if max_num_neighbors == 0 {
        return Err(Error::InvalidArgument {
            arg: "max_num_neighbors",
            reason: format!("{} requires max_num_neighbors > 0", op),
        });
    }
    Ok(())
}
