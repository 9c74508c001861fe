//! CPU client and allocator implementation

use super::device::CpuDevice;
use super::runtime::{CpuRuntime, host_alloc, host_dealloc};
use crate::runtime::{DefaultAllocator, RuntimeClient};

/// CPU client for operation dispatch
#[derive(Clone, Debug)]
pub struct CpuClient {
    pub(crate) device: CpuDevice,
    allocator: CpuAllocator,
}

impl CpuClient {
    /// Create a new CPU client
    pub fn new(device: CpuDevice) -> Self {
        let allocator = DefaultAllocator::new(
            device.clone(),
            |size, _dev| host_alloc(size),
            |ptr, size, _dev| host_dealloc(ptr, size),
        );
        Self { device, allocator }
    }
}

impl RuntimeClient<CpuRuntime> for CpuClient {
    fn device(&self) -> &CpuDevice {
        &self.device
    }

    fn synchronize(&self) {
        // CPU operations are synchronous, nothing to do
    }

    fn allocator(&self) -> &CpuAllocator {
        &self.allocator
    }
}

/// CPU-specific allocator type alias
pub type CpuAllocator = DefaultAllocator<CpuDevice>;
