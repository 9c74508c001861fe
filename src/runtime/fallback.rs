//! Generic CPU fallback utilities for GPU backends
//!
//! Extension operations have no native GPU kernels. Accelerator backends
//! implement them by staging through the CPU runtime:
//!
//! 1. Copy tensor data from GPU to CPU
//! 2. Execute the operation using the CPU backend
//! 3. Copy the result back to GPU
//!
//! Results are therefore numerically identical to the CPU backend, and the
//! returned tensors are resident on the accelerator.
//!
//! # Usage
//!
//! ```ignore
//! use geotensor::runtime::fallback::CpuFallbackContext;
//!
//! impl ScatterOps<CudaRuntime> for CudaClient {
//!     fn scatter_softmax(&self, src: &Tensor<CudaRuntime>, index: &Tensor<CudaRuntime>, dim: usize)
//!         -> Result<Tensor<CudaRuntime>>
//!     {
//!         let cpu = CpuFallbackContext::new();
//!         let out = cpu.client.scatter_softmax(&cpu.to_cpu(src)?, &cpu.to_cpu(index)?, dim)?;
//!         cpu.to_device(&out, &self.device)
//!     }
//! }
//! ```

use crate::error::Result;
use crate::runtime::{Runtime, cpu};
use crate::tensor::{Layout, Storage, Tensor};

/// CPU fallback context for operations not implemented natively on GPU.
///
/// Holds the CPU device and client needed for fallback operations. Each call
/// creates a new context; the CPU runtime is stateless, so this is fine for
/// concurrent use.
pub struct CpuFallbackContext {
    /// CPU device (lightweight, just an ID)
    pub device: cpu::CpuDevice,
    /// CPU client used to run the operation
    pub client: cpu::CpuClient,
}

impl CpuFallbackContext {
    /// Create a new CPU fallback context.
    #[inline]
    pub fn new() -> Self {
        let device = cpu::CpuDevice::new();
        let client = cpu::CpuRuntime::default_client(&device);
        Self { device, client }
    }

    /// Copy a device tensor into host memory.
    pub fn to_cpu<R: Runtime>(&self, tensor: &Tensor<R>) -> Result<Tensor<cpu::CpuRuntime>> {
        transfer::<R, cpu::CpuRuntime>(tensor, &self.device)
    }

    /// Copy an optional device tensor into host memory.
    pub fn to_cpu_opt<R: Runtime>(
        &self,
        tensor: Option<&Tensor<R>>,
    ) -> Result<Option<Tensor<cpu::CpuRuntime>>> {
        tensor.map(|t| self.to_cpu(t)).transpose()
    }

    /// Upload a host tensor to `device`.
    pub fn to_device<R: Runtime>(
        &self,
        tensor: &Tensor<cpu::CpuRuntime>,
        device: &R::Device,
    ) -> Result<Tensor<R>> {
        transfer::<cpu::CpuRuntime, R>(tensor, device)
    }
}

impl Default for CpuFallbackContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy a tensor between runtimes as a contiguous buffer.
fn transfer<S: Runtime, D: Runtime>(tensor: &Tensor<S>, device: &D::Device) -> Result<Tensor<D>> {
    let contig = tensor.contiguous()?;
    let dtype = contig.dtype();
    let mut bytes = contig.storage().to_bytes()?;
    bytes.truncate(contig.numel() * dtype.size_in_bytes());

    let storage = Storage::<D>::from_bytes(&bytes, dtype, device)?;
    Ok(Tensor::from_parts(storage, Layout::contiguous(contig.shape())))
}
