//! Checks the five scatter reductions against hand-computed results.
//!
//! Runs on CUDA when available (unless `GEOTENSOR_FORCE_CPU` is set) and on
//! the CPU otherwise. Failed checks are reported; the exit status is always
//! success.

use geotensor::config::ProbeConfig;
use geotensor::logging::init_tracing;
use geotensor::probe::run_scatter_suite;
use geotensor::runtime::Runtime;
use geotensor::runtime::cpu::CpuRuntime;

fn main() {
    if let Err(err) = init_tracing() {
        eprintln!("tracing disabled: {err}");
    }
    let config = ProbeConfig::load();
    tracing::debug!(atol = config.atol, force_cpu = config.force_cpu, "probe configuration");

    #[cfg(feature = "cuda")]
    {
        if !config.force_cpu && geotensor::runtime::accelerator_available() {
            use geotensor::runtime::cuda::{CudaClient, CudaRuntime};

            match CudaClient::new(CudaRuntime::default_device()) {
                Ok(client) => {
                    run_scatter_suite::<CudaRuntime>(&client, &config);
                    return;
                }
                Err(err) => tracing::warn!(error = %err, "CUDA client unavailable, using CPU"),
            }
        }
    }

    let device = CpuRuntime::default_device();
    let client = CpuRuntime::default_client(&device);
    run_scatter_suite::<CpuRuntime>(&client, &config);
}
