//! CUDA runtime implementation

use super::cache::{
    get_or_create_client, is_cuda_context_valid, log_cuda_memory_error, try_get_cached_stream,
};
use super::client::{CudaAllocator, CudaClient};
use super::device::CudaDevice;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::runtime::cpu::CpuRuntime;

/// Map a driver status code to a crate error
#[inline]
fn check(result: cudarc::driver::sys::CUresult, what: &str) -> Result<()> {
    if result == cudarc::driver::sys::CUresult::CUDA_SUCCESS {
        Ok(())
    } else {
        Err(Error::Backend(format!("{what} failed: {result:?}")))
    }
}

/// CUDA Runtime adapter
///
/// Implements the generic Runtime trait for CUDA backend.
/// Uses cudarc for direct GPU control.
#[derive(Clone, Debug, Default)]
pub struct CudaRuntime;

impl Runtime for CudaRuntime {
    type Device = CudaDevice;
    type Client = CudaClient;
    type Allocator = CudaAllocator;

    fn name() -> &'static str {
        "cuda"
    }

    /// Allocate GPU memory.
    ///
    /// Returns `Err(OutOfMemory)` if CUDA memory allocation fails.
    fn allocate(size_bytes: usize, device: &Self::Device) -> Result<u64> {
        if size_bytes == 0 {
            return Ok(0);
        }

        let client = get_or_create_client(device)?;
        let mut ptr: u64 = 0;

        unsafe {
            let result =
                cudarc::driver::sys::cuMemAllocAsync(&mut ptr, size_bytes, client.stream.cu_stream());
            if result == cudarc::driver::sys::CUresult::CUDA_SUCCESS {
                return Ok(ptr);
            }

            // Flush pending stream-ordered frees and retry once
            let _ = client.stream.synchronize();
            let result =
                cudarc::driver::sys::cuMemAllocAsync(&mut ptr, size_bytes, client.stream.cu_stream());
            if result == cudarc::driver::sys::CUresult::CUDA_SUCCESS {
                return Ok(ptr);
            }
        }

        Err(Error::OutOfMemory { size: size_bytes })
    }

    fn deallocate(ptr: u64, _size_bytes: usize, device: &Self::Device) {
        if ptr == 0 {
            return;
        }

        unsafe {
            // Context is gone - memory will be reclaimed by driver on context destruction
            if !is_cuda_context_valid() {
                return;
            }

            let result = if let Some(stream) = try_get_cached_stream(device.index) {
                cudarc::driver::sys::cuMemFreeAsync(ptr, stream)
            } else {
                cudarc::driver::sys::cuMemFree_v2(ptr)
            };

            if result != cudarc::driver::sys::CUresult::CUDA_SUCCESS
                && result != cudarc::driver::sys::CUresult::CUDA_ERROR_ILLEGAL_ADDRESS
            {
                log_cuda_memory_error("cuMemFree", ptr, result);
            }
        }
    }

    fn copy_to_device(src: &[u8], dst: u64, device: &Self::Device) -> Result<()> {
        if src.is_empty() || dst == 0 {
            return Ok(());
        }

        let client = get_or_create_client(device)?;

        unsafe {
            let result = cudarc::driver::sys::cuMemcpyHtoDAsync_v2(
                dst,
                src.as_ptr() as *const std::ffi::c_void,
                src.len(),
                client.stream.cu_stream(),
            );
            check(result, "host-to-device copy")?;
        }

        // The host buffer may be dropped as soon as we return
        client.stream.synchronize()?;
        Ok(())
    }

    fn copy_from_device(src: u64, dst: &mut [u8], device: &Self::Device) -> Result<()> {
        if dst.is_empty() || src == 0 {
            return Ok(());
        }

        let client = get_or_create_client(device)?;

        unsafe {
            let result = cudarc::driver::sys::cuMemcpyDtoHAsync_v2(
                dst.as_mut_ptr() as *mut std::ffi::c_void,
                src,
                dst.len(),
                client.stream.cu_stream(),
            );
            check(result, "device-to-host copy")?;
        }

        client.stream.synchronize()?;
        Ok(())
    }

    /// Strided gather staged through host memory.
    ///
    /// Downloads the span of the source view, gathers it with the CPU runtime
    /// and uploads the contiguous result.
    fn copy_strided(
        src_handle: u64,
        src_byte_offset: usize,
        dst_handle: u64,
        shape: &[usize],
        strides: &[isize],
        elem_size: usize,
        device: &Self::Device,
    ) -> Result<()> {
        let numel: usize = shape.iter().product();
        if src_handle == 0 || dst_handle == 0 || shape.is_empty() || numel == 0 {
            return Ok(());
        }
        if strides.iter().any(|&s| s < 0) {
            return Err(Error::Backend(
                "strided copy with negative strides".to_string(),
            ));
        }

        // Last element reachable from the view, in elements
        let span_elems = 1 + shape
            .iter()
            .zip(strides)
            .map(|(&dim, &stride)| (dim - 1) * stride as usize)
            .sum::<usize>();

        let mut staged = vec![0u8; span_elems * elem_size];
        Self::copy_from_device(src_handle + src_byte_offset as u64, &mut staged, device)?;

        let mut gathered = vec![0u8; numel * elem_size];
        let host = crate::runtime::cpu::CpuDevice::new();
        CpuRuntime::copy_strided(
            staged.as_ptr() as u64,
            0,
            gathered.as_mut_ptr() as u64,
            shape,
            strides,
            elem_size,
            &host,
        )?;

        Self::copy_to_device(&gathered, dst_handle, device)
    }

    fn default_device() -> Self::Device {
        CudaDevice::new(0)
    }

    /// # Panics
    ///
    /// Panics if no CUDA client can be created for `device`. Check
    /// [`is_cuda_available`] first.
    fn default_client(device: &Self::Device) -> Self::Client {
        get_or_create_client(device).expect("Failed to create CUDA client")
    }
}

/// Returns true if a CUDA context can be created on device 0.
///
/// Driver loading failures (no libcuda) panic inside cudarc; they are caught
/// and reported as "unavailable".
pub fn is_cuda_available() -> bool {
    std::panic::catch_unwind(|| get_or_create_client(&CudaDevice::new(0)).is_ok())
        .unwrap_or(false)
}
