//! CUDA random operations (CPU fallback).

use crate::dtype::DType;
use crate::error::Result;
use crate::ops::RandomOps;
use crate::runtime::cuda::{CudaClient, CudaRuntime};
use crate::runtime::fallback::CpuFallbackContext;
use crate::tensor::Tensor;

impl RandomOps<CudaRuntime> for CudaClient {
    fn rand(&self, shape: &[usize], dtype: DType) -> Result<Tensor<CudaRuntime>> {
        let cpu = CpuFallbackContext::new();
        let out = cpu.client.rand(shape, dtype)?;
        cpu.to_device(&out, &self.device)
    }
}
