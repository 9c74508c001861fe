//! B-spline convolution basis operations trait.

use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Spline-based convolution building blocks
///
/// Each edge carries pseudo-coordinates in `[0, 1]^D`. The basis step maps them
/// onto `(degree + 1)^D` weighted kernel positions; the weighting step mixes
/// edge features through the selected kernel weights.
pub trait SplineOps<R: Runtime> {
    /// Evaluate the B-spline basis for each edge.
    ///
    /// # Arguments
    ///
    /// * `pseudo` - Pseudo-coordinates `[E, D]` (float)
    /// * `kernel_size` - Kernel positions per dimension `[D]` (I64, each > 0)
    /// * `is_open_spline` - Open (1) or closed (0) spline per dimension `[D]` (U8)
    /// * `degree` - Spline degree, 1 (linear), 2 (quadratic) or 3 (cubic)
    ///
    /// # Returns
    ///
    /// `(basis, weight_index)`, both `[E, (degree + 1)^D]`. `basis` has the
    /// dtype of `pseudo` and sums to 1 per edge; `weight_index` is I64 and
    /// addresses the flattened kernel of `prod(kernel_size)` positions.
    fn spline_basis(
        &self,
        pseudo: &Tensor<R>,
        kernel_size: &Tensor<R>,
        is_open_spline: &Tensor<R>,
        degree: usize,
    ) -> Result<(Tensor<R>, Tensor<R>)> {
        let _ = (pseudo, kernel_size, is_open_spline, degree);
        Err(Error::NotImplemented {
            feature: "SplineOps::spline_basis",
        })
    }

    /// Weight edge features through the basis-selected kernel weights.
    ///
    /// `out[e] = sum_s basis[e, s] * (x[e] @ weight[weight_index[e, s]])`
    ///
    /// # Arguments
    ///
    /// * `x` - Edge features `[E, Cin]`
    /// * `weight` - Kernel weights `[K, Cin, Cout]`
    /// * `basis`, `weight_index` - Output of [`Self::spline_basis`]
    fn spline_weighting(
        &self,
        x: &Tensor<R>,
        weight: &Tensor<R>,
        basis: &Tensor<R>,
        weight_index: &Tensor<R>,
    ) -> Result<Tensor<R>> {
        let _ = (x, weight, basis, weight_index);
        Err(Error::NotImplemented {
            feature: "SplineOps::spline_weighting",
        })
    }
}
