//! Nearest-neighbour clustering operations trait.

use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Point-cloud neighbourhood search
///
/// All searches use the Euclidean metric. Results are returned as an I64
/// `[2, P]` assignment tensor: row 0 indexes the query set `y`, row 1 indexes
/// the candidate set `x`. Within one query, neighbours are ordered by ascending
/// distance, ties broken by the lower `x` index.
///
/// Optional `batch_x` / `batch_y` (I64, 1-D, one entry per point) restrict the
/// search to points sharing the same batch id.
pub trait ClusterOps<R: Runtime> {
    /// For each row of `y`, find the `k` nearest rows of `x`.
    ///
    /// # Arguments
    ///
    /// * `x` - Candidate points `[N, F]` (float)
    /// * `y` - Query points `[M, F]` (same dtype as `x`)
    /// * `k` - Neighbours per query (must be > 0). Queries with fewer
    ///   candidates return all of them.
    /// * `batch_x`, `batch_y` - Optional batch assignments
    fn knn(
        &self,
        x: &Tensor<R>,
        y: &Tensor<R>,
        k: usize,
        batch_x: Option<&Tensor<R>>,
        batch_y: Option<&Tensor<R>>,
    ) -> Result<Tensor<R>> {
        let _ = (x, y, k, batch_x, batch_y);
        Err(Error::NotImplemented {
            feature: "ClusterOps::knn",
        })
    }

    /// k-nearest-neighbour graph over a single point set.
    ///
    /// Returns edges in source-to-target order: row 0 holds the neighbour,
    /// row 1 the centre point. Self-loops are dropped unless `include_self`.
    fn knn_graph(
        &self,
        x: &Tensor<R>,
        k: usize,
        batch: Option<&Tensor<R>>,
        include_self: bool,
    ) -> Result<Tensor<R>> {
        let _ = (x, k, batch, include_self);
        Err(Error::NotImplemented {
            feature: "ClusterOps::knn_graph",
        })
    }

    /// For each row of `y`, find every row of `x` within distance `r`.
    ///
    /// At most `max_num_neighbors` closest matches are kept per query.
    fn radius(
        &self,
        x: &Tensor<R>,
        y: &Tensor<R>,
        r: f64,
        batch_x: Option<&Tensor<R>>,
        batch_y: Option<&Tensor<R>>,
        max_num_neighbors: usize,
    ) -> Result<Tensor<R>> {
        let _ = (x, y, r, batch_x, batch_y, max_num_neighbors);
        Err(Error::NotImplemented {
            feature: "ClusterOps::radius",
        })
    }
}
