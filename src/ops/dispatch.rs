//! DType dispatch utilities
//!
//! `dispatch_dtype!` converts a runtime `DType` into a concrete Rust type so that
//! generic kernels can be instantiated from untyped tensors.
//!
//! # Usage
//!
//! ```ignore
//! fn my_operation(dtype: DType) -> Result<usize> {
//!     dispatch_dtype!(dtype, T => {
//!         Ok(std::mem::size_of::<T>())
//!     }, "my_operation")
//! }
//! ```
//!
//! Unsupported dtypes make the enclosing function return
//! `Err(Error::UnsupportedDType { .. })` with the given operation name.
//!
//! ## Supported Types
//!
//! - `dispatch_dtype!`: F64, F32, I64, I32, U8 (`Bool` is rejected)
//! - `dispatch_float_dtype!`: F64, F32 only

/// Macro for runtime dtype dispatch to typed operations.
#[macro_export]
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::I64 => {
                type $T = i64;
                $body
            }
            $crate::dtype::DType::I32 => {
                type $T = i32;
                $body
            }
            $crate::dtype::DType::U8 => {
                type $T = u8;
                $body
            }
            $crate::dtype::DType::Bool => {
                return Err($crate::error::Error::UnsupportedDType {
                    dtype: $dtype,
                    op: $error_op,
                })
            }
        }
    };
}

/// Dispatch restricted to floating point dtypes.
///
/// Used by ops that only make sense on real values (mean, softmax, distances,
/// spline bases).
#[macro_export]
macro_rules! dispatch_float_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            other => {
                return Err($crate::error::Error::UnsupportedDType {
                    dtype: other,
                    op: $error_op,
                })
            }
        }
    };
}
