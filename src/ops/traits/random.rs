//! Random number generation operations.

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Random tensor construction
pub trait RandomOps<R: Runtime> {
    /// Generate uniform random values in [0, 1)
    ///
    /// # Arguments
    ///
    /// * `shape` - Shape of the output tensor
    /// * `dtype` - Data type of the output tensor (must be floating point)
    fn rand(&self, shape: &[usize], dtype: DType) -> Result<Tensor<R>> {
        let _ = (shape, dtype);
        Err(Error::NotImplemented {
            feature: "RandomOps::rand",
        })
    }
}
