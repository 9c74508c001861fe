//! Calls each extension family once and reports which ones work.
//!
//! Runs on CUDA when available (unless `GEOTENSOR_FORCE_CPU` is set) and on
//! the CPU otherwise. Always exits normally.

use geotensor::config::ProbeConfig;
use geotensor::logging::init_tracing;
use geotensor::probe::run_module_check;
use geotensor::runtime::Runtime;
use geotensor::runtime::cpu::CpuRuntime;

fn main() {
    if let Err(err) = init_tracing() {
        eprintln!("tracing disabled: {err}");
    }
    let config = ProbeConfig::load();

    #[cfg(feature = "cuda")]
    {
        if !config.force_cpu && geotensor::runtime::accelerator_available() {
            use geotensor::runtime::cuda::{CudaClient, CudaRuntime};

            match CudaClient::new(CudaRuntime::default_device()) {
                Ok(client) => {
                    run_module_check::<CudaRuntime>(&client);
                    return;
                }
                Err(err) => tracing::warn!(error = %err, "CUDA client unavailable, using CPU"),
            }
        }
    }

    tracing::info!(force_cpu = config.force_cpu, "running module check on CPU");
    let device = CpuRuntime::default_device();
    let client = CpuRuntime::default_client(&device);
    run_module_check::<CpuRuntime>(&client);
}
