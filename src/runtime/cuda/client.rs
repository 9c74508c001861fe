//! CUDA Client implementation
//!
//! CudaClient owns stream and context for direct cudarc access.
//!
//! # Thread Safety
//!
//! `CudaClient` is `Clone` and can be shared across threads. The underlying
//! CUDA context and stream are reference-counted via `Arc`. CUDA calls must be
//! made after `context.bind_to_thread()` on the calling thread.

use cudarc::driver::safe::{CudaContext, CudaStream};
use std::sync::Arc;

use super::CudaRuntime;
use super::cache::{is_cuda_context_valid, log_cuda_memory_error};
use super::device::CudaDevice;
use crate::error::{Error, Result};
use crate::runtime::{Allocator, RuntimeClient};

/// CUDA Runtime Client
///
/// Owns the CUDA context and the stream every transfer is ordered on.
#[derive(Clone)]
pub struct CudaClient {
    /// GPU device index
    pub(crate) device: CudaDevice,

    /// CUDA context for this device (owns GPU context)
    pub(crate) context: Arc<CudaContext>,

    /// Stream on which all copies are issued
    pub(crate) stream: Arc<CudaStream>,

    /// Allocator for memory management
    pub(crate) allocator: CudaAllocator,
}

impl std::fmt::Debug for CudaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CudaClient")
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

/// CUDA allocator that uses stream-ordered allocation.
///
/// Uses `cuMemAllocAsync` and `cuMemFreeAsync`, so memory operations are
/// ordered with the copies issued on the same stream.
#[derive(Clone)]
pub struct CudaAllocator {
    stream: Arc<CudaStream>,
}

impl Allocator for CudaAllocator {
    /// Allocate GPU memory using stream-ordered allocation.
    ///
    /// Returns `Err(OutOfMemory)` if the driver refuses the allocation.
    fn allocate(&self, size_bytes: usize) -> Result<u64> {
        if size_bytes == 0 {
            return Ok(0);
        }

        let mut ptr: u64 = 0;
        // SAFETY: ptr is a valid out-parameter and the stream belongs to a live context.
        let result = unsafe {
            cudarc::driver::sys::cuMemAllocAsync(&mut ptr, size_bytes, self.stream.cu_stream())
        };

        if result != cudarc::driver::sys::CUresult::CUDA_SUCCESS {
            return Err(Error::OutOfMemory { size: size_bytes });
        }
        Ok(ptr)
    }

    fn deallocate(&self, ptr: u64, _size_bytes: usize) {
        if ptr == 0 {
            return;
        }

        unsafe {
            // Context is gone - memory will be reclaimed by driver
            if !is_cuda_context_valid() {
                return;
            }

            let result = cudarc::driver::sys::cuMemFreeAsync(ptr, self.stream.cu_stream());
            if result != cudarc::driver::sys::CUresult::CUDA_SUCCESS
                && result != cudarc::driver::sys::CUresult::CUDA_ERROR_ILLEGAL_ADDRESS
            {
                log_cuda_memory_error("cuMemFreeAsync", ptr, result);
            }
        }
    }
}

impl CudaClient {
    /// Create a new CUDA client for a device.
    ///
    /// Initializes the CUDA context, binds it to the calling thread and
    /// creates a stream.
    ///
    /// # Errors
    ///
    /// Returns `Error::Cuda` if context creation (e.g. invalid device ID),
    /// thread binding or stream creation fails.
    pub fn new(device: CudaDevice) -> Result<Self> {
        let context = CudaContext::new(device.index)?;
        context.bind_to_thread()?;
        let stream = context.new_stream()?;

        let allocator = CudaAllocator {
            stream: stream.clone(),
        };

        tracing::debug!(device = device.index, "created CUDA client");

        Ok(Self {
            device,
            context,
            stream,
            allocator,
        })
    }

    /// Get reference to the CUDA stream.
    #[inline]
    pub fn stream(&self) -> &CudaStream {
        &self.stream
    }

    /// Get reference to the CUDA context.
    #[inline]
    pub fn context(&self) -> &Arc<CudaContext> {
        &self.context
    }
}

impl RuntimeClient<CudaRuntime> for CudaClient {
    fn device(&self) -> &CudaDevice {
        &self.device
    }

    fn synchronize(&self) {
        if let Err(e) = self.stream.synchronize() {
            tracing::error!(device = self.device.index, error = ?e, "stream synchronization failed");
        }
    }

    fn allocator(&self) -> &CudaAllocator {
        &self.allocator
    }
}
