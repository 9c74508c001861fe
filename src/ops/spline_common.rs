//! Shared validation for spline basis and weighting.

use crate::dtype::DType;
use crate::error::{Error, Result};

/// Highest supported B-spline degree
pub const MAX_DEGREE: usize = 3;

/// Validates the inputs of `spline_basis`.
///
/// `pseudo` is `[E, D]` float; `kernel_size` and `is_open_spline` hold one
/// entry per pseudo dimension.
pub fn validate_basis_args(
    pseudo_shape: &[usize],
    pseudo_dtype: DType,
    kernel_size_shape: &[usize],
    kernel_size_dtype: DType,
    is_open_shape: &[usize],
    is_open_dtype: DType,
    degree: usize,
) -> Result<()> {
    if !(1..=MAX_DEGREE).contains(&degree) {
        return Err(Error::InvalidArgument {
            arg: "degree",
            reason: format!("spline degree must be in 1..={}, got {}", MAX_DEGREE, degree),
        });
    }
    if pseudo_shape.len() != 2 {
        return Err(Error::InvalidArgument {
            arg: "pseudo",
            reason: format!("spline_basis expects 2D pseudo, got {}D", pseudo_shape.len()),
        });
    }
    if !pseudo_dtype.is_float() {
        return Err(Error::UnsupportedDType {
            dtype: pseudo_dtype,
            op: "spline_basis",
        });
    }

    let dims = pseudo_shape[1];
    if kernel_size_dtype != DType::I64 {
        return Err(Error::DTypeMismatch {
            lhs: DType::I64,
            rhs: kernel_size_dtype,
        });
    }
    if kernel_size_shape != [dims] {
        return Err(Error::shape_mismatch(&[dims], kernel_size_shape));
    }
    if is_open_dtype != DType::U8 {
        return Err(Error::DTypeMismatch {
            lhs: DType::U8,
            rhs: is_open_dtype,
        });
    }
    if is_open_shape != [dims] {
        return Err(Error::shape_mismatch(&[dims], is_open_shape));
    }
    Ok(())
}

/// Validates kernel sizes and returns the total number of kernel positions.
///
/// The total must fit in `i64`, the dtype of `weight_index`.
pub fn validate_kernel_sizes(kernel_size: &[i64]) -> Result<usize> {
    let mut total = 1i64;
    for &k in kernel_size {
        if k <= 0 {
            return Err(Error::InvalidArgument {
                arg: "kernel_size",
                reason: format!("kernel sizes must be positive, got {}", k),
            });
        }
        total = total.checked_mul(k).ok_or_else(|| Error::InvalidArgument {
            arg: "kernel_size",
            reason: format!("kernel {:?} has more positions than fit in i64", kernel_size),
        })?;
    }
    Ok(total as usize)
}

/// Number of basis products per edge: `(degree + 1)^dims`
pub fn num_basis_products(degree: usize, dims: usize) -> Result<usize> {
    u32::try_from(dims)
        .ok()
        .and_then(|dims| (degree + 1).checked_pow(dims))
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or_else(|| Error::InvalidArgument {
            arg: "pseudo",
            reason: format!(
                "{} pseudo dimensions at degree {} need too many basis products",
                dims, degree
            ),
        })
}

/// Shape summary for `spline_weighting`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightingDims {
    pub edges: usize,
    pub in_channels: usize,
    pub out_channels: usize,
    pub kernel: usize,
    pub products: usize,
}

/// Validates the inputs of `spline_weighting`.
pub fn validate_weighting_args(
    x: (&[usize], DType),
    weight: (&[usize], DType),
    basis: (&[usize], DType),
    weight_index: (&[usize], DType),
) -> Result<WeightingDims> {
    let (x_shape, x_dtype) = x;
    let (w_shape, w_dtype) = weight;
    let (b_shape, b_dtype) = basis;
    let (i_shape, i_dtype) = weight_index;

    if !x_dtype.is_float() {
        return Err(Error::UnsupportedDType {
            dtype: x_dtype,
            op: "spline_weighting",
        });
    }
    for dtype in [w_dtype, b_dtype] {
        if dtype != x_dtype {
            return Err(Error::DTypeMismatch {
                lhs: x_dtype,
                rhs: dtype,
            });
        }
    }
    if i_dtype != DType::I64 {
        return Err(Error::DTypeMismatch {
            lhs: DType::I64,
            rhs: i_dtype,
        });
    }

    if x_shape.len() != 2 || w_shape.len() != 3 || b_shape.len() != 2 {
        return Err(Error::InvalidArgument {
            arg: "x",
            reason: format!(
                "spline_weighting expects x [E, Cin], weight [K, Cin, Cout], basis [E, S]; got {:?}, {:?}, {:?}",
                x_shape, w_shape, b_shape
            ),
        });
    }
    if i_shape != b_shape {
        return Err(Error::shape_mismatch(b_shape, i_shape));
    }
    if b_shape[0] != x_shape[0] {
        return Err(Error::shape_mismatch(&[x_shape[0], b_shape[1]], b_shape));
    }
    if w_shape[1] != x_shape[1] {
        return Err(Error::shape_mismatch(
            &[w_shape[0], x_shape[1], w_shape[2]],
            w_shape,
        ));
    }

    Ok(WeightingDims {
        edges: x_shape[0],
        in_channels: x_shape[1],
        out_channels: w_shape[2],
        kernel: w_shape[0],
        products: b_shape[1],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_args() {
        let ok = validate_basis_args(&[10, 2], DType::F32, &[2], DType::I64, &[2], DType::U8, 2);
        assert!(ok.is_ok());
        let bad_degree =
            validate_basis_args(&[10, 2], DType::F32, &[2], DType::I64, &[2], DType::U8, 4);
        assert!(bad_degree.is_err());
        let bad_len = validate_basis_args(&[10, 2], DType::F32, &[3], DType::I64, &[2], DType::U8, 1);
        assert!(bad_len.is_err());
        let bad_open =
            validate_basis_args(&[10, 2], DType::F32, &[2], DType::I64, &[2], DType::Bool, 1);
        assert!(bad_open.is_err());
    }

    #[test]
    fn test_kernel_sizes() {
        assert_eq!(validate_kernel_sizes(&[3, 3]).unwrap(), 9);
        assert!(validate_kernel_sizes(&[3, 0]).is_err());
        assert_eq!(num_basis_products(2, 2).unwrap(), 9);
        assert_eq!(num_basis_products(1, 3).unwrap(), 8);
        assert_eq!(num_basis_products(3, 0).unwrap(), 1);
    }

    #[test]
    fn test_size_overflow_rejected() {
        assert!(matches!(
            num_basis_products(3, 48),
            Err(Error::InvalidArgument { arg: "pseudo", .. })
        ));
        assert!(num_basis_products(1, usize::MAX).is_err());
        assert!(matches!(
            validate_kernel_sizes(&[2; 64]),
            Err(Error::InvalidArgument { arg: "kernel_size", .. })
        ));
        assert_eq!(validate_kernel_sizes(&[2; 62]).unwrap(), 1 << 62);
    }

    #[test]
    fn test_weighting_dims() {
        let dims = validate_weighting_args(
            (&[4, 2], DType::F64),
            (&[9, 2, 5], DType::F64),
            (&[4, 4], DType::F64),
            (&[4, 4], DType::I64),
        )
        .unwrap();
        assert_eq!(dims.out_channels, 5);
        assert_eq!(dims.kernel, 9);

        assert!(
            validate_weighting_args(
                (&[4, 3], DType::F64),
                (&[9, 2, 5], DType::F64),
                (&[4, 4], DType::F64),
                (&[4, 4], DType::I64),
            )
            .is_err()
        );
    }
}
