//! CUDA clustering operations (CPU fallback).

use crate::error::Result;
use crate::ops::ClusterOps;
use crate::runtime::cuda::{CudaClient, CudaRuntime};
use crate::runtime::fallback::CpuFallbackContext;
use crate::tensor::Tensor;

impl ClusterOps<CudaRuntime> for CudaClient {
    fn knn(
        &self,
        x: &Tensor<CudaRuntime>,
        y: &Tensor<CudaRuntime>,
        k: usize,
        batch_x: Option<&Tensor<CudaRuntime>>,
        batch_y: Option<&Tensor<CudaRuntime>>,
    ) -> Result<Tensor<CudaRuntime>> {
        let cpu = CpuFallbackContext::new();
        let batch_x = cpu.to_cpu_opt(batch_x)?;
        let batch_y = cpu.to_cpu_opt(batch_y)?;
        let out = cpu.client.knn(
            &cpu.to_cpu(x)?,
            &cpu.to_cpu(y)?,
            k,
            batch_x.as_ref(),
            batch_y.as_ref(),
        )?;
        cpu.to_device(&out, &self.device)
    }

    fn knn_graph(
        &self,
        x: &Tensor<CudaRuntime>,
        k: usize,
        batch: Option<&Tensor<CudaRuntime>>,
        include_self: bool,
    ) -> Result<Tensor<CudaRuntime>> {
        let cpu = CpuFallbackContext::new();
        let batch = cpu.to_cpu_opt(batch)?;
        let out = cpu
            .client
            .knn_graph(&cpu.to_cpu(x)?, k, batch.as_ref(), include_self)?;
        cpu.to_device(&out, &self.device)
    }

    fn radius(
        &self,
        x: &Tensor<CudaRuntime>,
        y: &Tensor<CudaRuntime>,
        r: f64,
        batch_x: Option<&Tensor<CudaRuntime>>,
        batch_y: Option<&Tensor<CudaRuntime>>,
        max_num_neighbors: usize,
    ) -> Result<Tensor<CudaRuntime>> {
        let cpu = CpuFallbackContext::new();
        let batch_x = cpu.to_cpu_opt(batch_x)?;
        let batch_y = cpu.to_cpu_opt(batch_y)?;
        let out = cpu.client.radius(
            &cpu.to_cpu(x)?,
            &cpu.to_cpu(y)?,
            r,
            batch_x.as_ref(),
            batch_y.as_ref(),
            max_num_neighbors,
        )?;
        cpu.to_device(&out, &self.device)
    }
}
