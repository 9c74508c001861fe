//! Scatter-reduction operations trait.

use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Reduction applied when several source values land in the same output slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScatterReduce {
    /// Sum all values that scatter to the same slot (unassigned slots are 0)
    Sum,
    /// Multiply all values together (unassigned slots are 1)
    Mul,
    /// Sum divided by the slot count (unassigned slots are 0)
    Mean,
    /// Smallest value (unassigned slots are 0)
    Min,
    /// Largest value (unassigned slots are 0)
    Max,
}

impl ScatterReduce {
    /// Name used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            ScatterReduce::Sum => "sum",
            ScatterReduce::Mul => "mul",
            ScatterReduce::Mean => "mean",
            ScatterReduce::Min => "min",
            ScatterReduce::Max => "max",
        }
    }

    /// True for reductions that also report the winning source position
    pub fn has_arg(&self) -> bool {
        matches!(self, ScatterReduce::Min | ScatterReduce::Max)
    }
}

/// Scatter-reduction operations
///
/// Aggregates elements of `src` into output slots selected by `index` along
/// dimension `dim`, combining values that share a slot.
///
/// # Index Layout
///
/// `index` is an I64 tensor that either has the same shape as `src`, or is 1-D
/// with length `src.shape()[dim]`, in which case it is broadcast along every
/// other dimension.
///
/// # Output Size
///
/// The output has `src`'s shape except along `dim`, where its size is
/// `dim_size` if given, otherwise `max(index) + 1` (0 for an empty index).
/// Indices that are negative or `>= dim_size` are rejected with
/// `IndexOutOfBounds`.
///
/// # Example
///
/// ```text
/// src   = [10, 20, 30, 40]
/// index = [ 2,  0,  1,  2]
/// scatter_sum(src, index, 0) = [20, 30, 50]
/// ```
pub trait ScatterOps<R: Runtime> {
    /// Generic scatter with the given reduction.
    ///
    /// For `Min`/`Max` only the values are returned; use [`Self::scatter_min`]
    /// or [`Self::scatter_max`] to also get the arg positions.
    fn scatter(
        &self,
        src: &Tensor<R>,
        index: &Tensor<R>,
        dim: usize,
        dim_size: Option<usize>,
        reduce: ScatterReduce,
    ) -> Result<Tensor<R>> {
        let _ = (src, index, dim, dim_size, reduce);
        Err(Error::NotImplemented {
            feature: "ScatterOps::scatter",
        })
    }

    /// Sum values sharing an index.
    fn scatter_sum(
        &self,
        src: &Tensor<R>,
        index: &Tensor<R>,
        dim: usize,
        dim_size: Option<usize>,
    ) -> Result<Tensor<R>> {
        self.scatter(src, index, dim, dim_size, ScatterReduce::Sum)
    }

    /// Alias of [`Self::scatter_sum`].
    fn scatter_add(
        &self,
        src: &Tensor<R>,
        index: &Tensor<R>,
        dim: usize,
        dim_size: Option<usize>,
    ) -> Result<Tensor<R>> {
        self.scatter_sum(src, index, dim, dim_size)
    }

    /// Multiply values sharing an index. Unassigned slots hold 1.
    fn scatter_mul(
        &self,
        src: &Tensor<R>,
        index: &Tensor<R>,
        dim: usize,
        dim_size: Option<usize>,
    ) -> Result<Tensor<R>> {
        self.scatter(src, index, dim, dim_size, ScatterReduce::Mul)
    }

    /// Average values sharing an index. Float dtypes only.
    fn scatter_mean(
        &self,
        src: &Tensor<R>,
        index: &Tensor<R>,
        dim: usize,
        dim_size: Option<usize>,
    ) -> Result<Tensor<R>> {
        self.scatter(src, index, dim, dim_size, ScatterReduce::Mean)
    }

    /// Minimum per slot, with the position of the winner along `dim`.
    ///
    /// Returns `(values, arg)` where `arg` is I64. Ties resolve to the first
    /// occurrence. Unassigned slots hold value 0 and arg `src.shape()[dim]`.
    fn scatter_min(
        &self,
        src: &Tensor<R>,
        index: &Tensor<R>,
        dim: usize,
        dim_size: Option<usize>,
    ) -> Result<(Tensor<R>, Tensor<R>)> {
        let _ = (src, index, dim, dim_size);
        Err(Error::NotImplemented {
            feature: "ScatterOps::scatter_min",
        })
    }

    /// Maximum per slot, with the position of the winner along `dim`.
    ///
    /// Same conventions as [`Self::scatter_min`].
    fn scatter_max(
        &self,
        src: &Tensor<R>,
        index: &Tensor<R>,
        dim: usize,
        dim_size: Option<usize>,
    ) -> Result<(Tensor<R>, Tensor<R>)> {
        let _ = (src, index, dim, dim_size);
        Err(Error::NotImplemented {
            feature: "ScatterOps::scatter_max",
        })
    }

    /// Softmax computed independently within each index group.
    ///
    /// The output has the same shape as `src`. Float dtypes only.
    fn scatter_softmax(&self, src: &Tensor<R>, index: &Tensor<R>, dim: usize) -> Result<Tensor<R>> {
        let _ = (src, index, dim);
        Err(Error::NotImplemented {
            feature: "ScatterOps::scatter_softmax",
        })
    }
}
