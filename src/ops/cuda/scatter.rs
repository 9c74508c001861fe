//! CUDA scatter operations (CPU fallback).

use crate::error::Result;
use crate::ops::{ScatterOps, ScatterReduce};
use crate::runtime::cuda::{CudaClient, CudaRuntime};
use crate::runtime::fallback::CpuFallbackContext;
use crate::tensor::Tensor;

impl ScatterOps<CudaRuntime> for CudaClient {
    fn scatter(
        &self,
        src: &Tensor<CudaRuntime>,
        index: &Tensor<CudaRuntime>,
        dim: usize,
        dim_size: Option<usize>,
        reduce: ScatterReduce,
    ) -> Result<Tensor<CudaRuntime>> {
        let cpu = CpuFallbackContext::new();
        let out = cpu
            .client
            .scatter(&cpu.to_cpu(src)?, &cpu.to_cpu(index)?, dim, dim_size, reduce)?;
        cpu.to_device(&out, &self.device)
    }

    fn scatter_min(
        &self,
        src: &Tensor<CudaRuntime>,
        index: &Tensor<CudaRuntime>,
        dim: usize,
        dim_size: Option<usize>,
    ) -> Result<(Tensor<CudaRuntime>, Tensor<CudaRuntime>)> {
        let cpu = CpuFallbackContext::new();
        let (values, arg) =
            cpu.client
                .scatter_min(&cpu.to_cpu(src)?, &cpu.to_cpu(index)?, dim, dim_size)?;
        Ok((
            cpu.to_device(&values, &self.device)?,
            cpu.to_device(&arg, &self.device)?,
        ))
    }

    fn scatter_max(
        &self,
        src: &Tensor<CudaRuntime>,
        index: &Tensor<CudaRuntime>,
        dim: usize,
        dim_size: Option<usize>,
    ) -> Result<(Tensor<CudaRuntime>, Tensor<CudaRuntime>)> {
        let cpu = CpuFallbackContext::new();
        let (values, arg) =
            cpu.client
                .scatter_max(&cpu.to_cpu(src)?, &cpu.to_cpu(index)?, dim, dim_size)?;
        Ok((
            cpu.to_device(&values, &self.device)?,
            cpu.to_device(&arg, &self.device)?,
        ))
    }

    fn scatter_softmax(
        &self,
        src: &Tensor<CudaRuntime>,
        index: &Tensor<CudaRuntime>,
        dim: usize,
    ) -> Result<Tensor<CudaRuntime>> {
        let cpu = CpuFallbackContext::new();
        let out = cpu
            .client
            .scatter_softmax(&cpu.to_cpu(src)?, &cpu.to_cpu(index)?, dim)?;
        cpu.to_device(&out, &self.device)
    }
}
