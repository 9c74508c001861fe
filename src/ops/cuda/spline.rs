//! CUDA spline operations (CPU fallback).

use crate::error::Result;
use crate::ops::SplineOps;
use crate::runtime::cuda::{CudaClient, CudaRuntime};
use crate::runtime::fallback::CpuFallbackContext;
use crate::tensor::Tensor;

impl SplineOps<CudaRuntime> for CudaClient {
    fn spline_basis(
        &self,
        pseudo: &Tensor<CudaRuntime>,
        kernel_size: &Tensor<CudaRuntime>,
        is_open_spline: &Tensor<CudaRuntime>,
        degree: usize,
    ) -> Result<(Tensor<CudaRuntime>, Tensor<CudaRuntime>)> {
        let cpu = CpuFallbackContext::new();
        let (basis, weight_index) = cpu.client.spline_basis(
            &cpu.to_cpu(pseudo)?,
            &cpu.to_cpu(kernel_size)?,
            &cpu.to_cpu(is_open_spline)?,
            degree,
        )?;
        Ok((
            cpu.to_device(&basis, &self.device)?,
            cpu.to_device(&weight_index, &self.device)?,
        ))
    }

    fn spline_weighting(
        &self,
        x: &Tensor<CudaRuntime>,
        weight: &Tensor<CudaRuntime>,
        basis: &Tensor<CudaRuntime>,
        weight_index: &Tensor<CudaRuntime>,
    ) -> Result<Tensor<CudaRuntime>> {
        let cpu = CpuFallbackContext::new();
        let out = cpu.client.spline_weighting(
            &cpu.to_cpu(x)?,
            &cpu.to_cpu(weight)?,
            &cpu.to_cpu(basis)?,
            &cpu.to_cpu(weight_index)?,
        )?;
        cpu.to_device(&out, &self.device)
    }
}
