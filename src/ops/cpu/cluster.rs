//! CPU implementation of nearest-neighbour clustering.

use crate::dispatch_float_dtype;
use crate::error::Result;
use crate::ops::ClusterOps;
use crate::ops::cluster_common::{validate_batch, validate_k, validate_point_sets, validate_radius};
use crate::runtime::cpu::helpers::{ensure_contiguous, host_slice, read_index, tensor_from_vec};
use crate::runtime::cpu::kernels::{self, Neighbourhood, PointSet};
use crate::runtime::cpu::{CpuClient, CpuRuntime};
use crate::tensor::Tensor;

/// Which way round the `[2, P]` result is stacked
#[derive(Clone, Copy, PartialEq, Eq)]
enum Stacking {
    /// Row 0 = query (`y`), row 1 = candidate (`x`)
    QueryFirst,
    /// Row 0 = candidate, row 1 = query (source-to-target edges)
    CandidateFirst,
}

/// Validate, run the search kernel and assemble the `[2, P]` result.
#[allow(clippy::too_many_arguments)]
fn neighbour_search(
    client: &CpuClient,
    x: &Tensor<CpuRuntime>,
    y: &Tensor<CpuRuntime>,
    batch_x: Option<&Tensor<CpuRuntime>>,
    batch_y: Option<&Tensor<CpuRuntime>>,
    rule: Neighbourhood,
    skip_self: bool,
    stacking: Stacking,
    op: &'static str,
) -> Result<Tensor<CpuRuntime>> {
    validate_point_sets(x.shape(), x.dtype(), y.shape(), y.dtype(), op)?;
    let (n, m, d) = (x.shape()[0], y.shape()[0], x.shape()[1]);

    let batch_x = batch_x
        .map(|b| {
            validate_batch(b.shape(), b.dtype(), n, "batch_x", op)?;
            read_index(b, "batch_x")
        })
        .transpose()?;
    let batch_y = batch_y
        .map(|b| {
            validate_batch(b.shape(), b.dtype(), m, "batch_y", op)?;
            read_index(b, "batch_y")
        })
        .transpose()?;

    let x = ensure_contiguous(x)?;
    let y = ensure_contiguous(y)?;

    let (row, col) = dispatch_float_dtype!(x.dtype(), T => {
        let xs = PointSet {
            data: host_slice::<T>(&x)?,
            batch: batch_x.as_deref(),
            len: n,
            dim: d,
        };
        let ys = PointSet {
            data: host_slice::<T>(&y)?,
            batch: batch_y.as_deref(),
            len: m,
            dim: d,
        };
        kernels::neighbour_search_kernel(xs, ys, rule, skip_self)
    }, op);

    tracing::trace!(op, queries = m, candidates = n, pairs = row.len(), "cpu neighbour search");

    let pairs = row.len();
    let (first, second) = match stacking {
        Stacking::QueryFirst => (row, col),
        Stacking::CandidateFirst => (col, row),
    };
    let mut data = first;
    data.extend(second);
    tensor_from_vec(data, &[2, pairs], &client.device)
}

impl ClusterOps<CpuRuntime> for CpuClient {
    fn knn(
        &self,
        x: &Tensor<CpuRuntime>,
        y: &Tensor<CpuRuntime>,
        k: usize,
        batch_x: Option<&Tensor<CpuRuntime>>,
        batch_y: Option<&Tensor<CpuRuntime>>,
    ) -> Result<Tensor<CpuRuntime>> {
        validate_k(k, "knn")?;
        neighbour_search(
            self,
            x,
            y,
            batch_x,
            batch_y,
            Neighbourhood::Nearest { k },
            false,
            Stacking::QueryFirst,
            "knn",
        )
    }

    fn knn_graph(
        &self,
        x: &Tensor<CpuRuntime>,
        k: usize,
        batch: Option<&Tensor<CpuRuntime>>,
        include_self: bool,
    ) -> Result<Tensor<CpuRuntime>> {
        validate_k(k, "knn_graph")?;
        neighbour_search(
            self,
            x,
            x,
            batch,
            batch,
            Neighbourhood::Nearest { k },
            !include_self,
            Stacking::CandidateFirst,
            "knn_graph",
        )
    }

    fn radius(
        &self,
        x: &Tensor<CpuRuntime>,
        y: &Tensor<CpuRuntime>,
        r: f64,
        batch_x: Option<&Tensor<CpuRuntime>>,
        batch_y: Option<&Tensor<CpuRuntime>>,
        max_num_neighbors: usize,
    ) -> Result<Tensor<CpuRuntime>> {
        validate_radius(r, max_num_neighbors, "radius")?;
        neighbour_search(
            self,
            x,
            y,
            batch_x,
            batch_y,
            Neighbourhood::Ball {
                r2: r * r,
                max: max_num_neighbors,
            },
            false,
            Stacking::QueryFirst,
            "radius",
        )
    }
}
