//! One smoke call per extension family.

use super::extension::Extension;
use super::guard::run_check;
use super::outcome::Report;
use crate::dtype::DType;
use crate::error::Result;
use crate::ops::{ClusterOps, RandomOps, ScatterOps, SplineOps};
use crate::runtime::{Runtime, RuntimeClient};
use crate::tensor::Tensor;

/// Spline degree used by the spline probe
const SPLINE_DEGREE: usize = 2;

/// Exercise scatter, cluster and spline once each on small random inputs.
///
/// Failures are logged and recorded; the run always reaches the end.
pub fn run_module_check<R>(client: &R::Client) -> Report
where
    R: Runtime,
    R::Client: ScatterOps<R> + ClusterOps<R> + SplineOps<R> + RandomOps<R>,
{
    let _span = tracing::info_span!(
        "module_check",
        runtime = R::name(),
        accelerator = R::is_accelerator()
    )
    .entered();
    let mut report = Report::new();

    tracing::info!("Testing {}...", Extension::Scatter);
    report.record(run_check("scatter", || probe_scatter::<R>(client)));

    tracing::info!("Testing {}...", Extension::Cluster);
    report.record(run_check("cluster", || probe_cluster::<R>(client)));

    tracing::info!("Testing {}...", Extension::SplineConv);
    report.record(run_check("spline_conv", || probe_spline::<R>(client)));

    tracing::info!("All module tests complete.");
    report
}

fn probe_scatter<R>(client: &R::Client) -> Result<bool>
where
    R: Runtime,
    R::Client: ScatterOps<R> + RandomOps<R>,
{
    Extension::Scatter.require()?;
    let x = client.rand(&[5, 5], DType::F32)?;
    let index = Tensor::<R>::try_from_slice(&[0i64, 1, 2, 3, 4], &[5], client.device())?;

    let result = client.scatter_add(&x, &index, 0, None)?;
    tracing::info!(shape = ?result.shape(), "scatter probe result");
    Ok(result.shape() == [5, 5])
}

fn probe_cluster<R>(client: &R::Client) -> Result<bool>
where
    R: Runtime,
    R::Client: ClusterOps<R> + RandomOps<R>,
{
    Extension::Cluster.require()?;
    let x = client.rand(&[5, 5], DType::F32)?;

    let result = client.knn(&x, &x, 2, None, None)?;
    tracing::info!(result = %result, "cluster probe result");
    Ok(result.shape() == [2, 10])
}

fn probe_spline<R>(client: &R::Client) -> Result<bool>
where
    R: Runtime,
    R::Client: SplineOps<R> + RandomOps<R>,
{
    Extension::SplineConv.require()?;
    let device = client.device();
    let pseudo = client.rand(&[10, 2], DType::F32)?;
    let kernel_size = Tensor::<R>::try_from_slice(&[3i64, 3], &[2], device)?;
    let is_open_spline = Tensor::<R>::try_from_slice(&[1u8, 1], &[2], device)?;

    let (basis, weight_index) =
        client.spline_basis(&pseudo, &kernel_size, &is_open_spline, SPLINE_DEGREE)?;
    tracing::info!(basis = %basis, weight_index = %weight_index, "spline probe result");
    Ok(basis.shape() == [10, 9])
}
