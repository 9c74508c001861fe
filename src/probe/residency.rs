//! Accelerator residency of probe outputs.

use std::fmt;

use crate::runtime::{Device, Runtime};
use crate::tensor::Tensor;

/// Where a tensor's storage lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Residency {
    /// Accelerator memory
    Accelerator,
    /// Host memory
    Host,
}

impl Residency {
    /// Residency of `tensor`
    pub fn of<R: Runtime>(tensor: &Tensor<R>) -> Self {
        if tensor.is_on_accelerator() {
            Residency::Accelerator
        } else {
            Residency::Host
        }
    }

    /// True for [`Residency::Accelerator`]
    pub fn is_accelerator(&self) -> bool {
        matches!(self, Residency::Accelerator)
    }
}

impl fmt::Display for Residency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Residency::Accelerator => f.write_str("on accelerator"),
            Residency::Host => f.write_str("not on accelerator"),
        }
    }
}

/// Residency verdict for a set of outputs.
///
/// When `device` is an accelerator, every output must be on the accelerator,
/// on `device` itself. Host devices skip the check and always pass.
pub fn outputs_resident<R: Runtime>(device: &R::Device, outputs: &[&Tensor<R>]) -> bool {
    if !device.is_accelerator() {
        return true;
    }
    outputs
        .iter()
        .all(|t| Residency::of(*t).is_accelerator() && t.device().is_same(device))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};
    use crate::runtime::{DefaultAllocator, RuntimeClient};

    #[test]
    fn test_host_outputs_skip_check() {
        let device = CpuDevice::new();
        let t = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0], &[2], &device);
        assert_eq!(Residency::of(&t), Residency::Host);
        assert_eq!(Residency::of(&t).to_string(), "not on accelerator");
        assert!(outputs_resident::<CpuRuntime>(&device, &[&t, &t]));
    }

    /// Host-backed runtime whose devices declare their own residency
    #[derive(Clone, Debug)]
    struct MixedRuntime;

    #[derive(Clone, Debug)]
    struct MixedDevice {
        id: usize,
        accelerator: bool,
    }

    impl Device for MixedDevice {
        fn id(&self) -> usize {
            self.id
        }

        fn is_accelerator(&self) -> bool {
            self.accelerator
        }
    }

    #[derive(Clone, Debug)]
    struct MixedClient {
        device: MixedDevice,
        allocator: DefaultAllocator<MixedDevice>,
    }

    impl RuntimeClient<MixedRuntime> for MixedClient {
        fn device(&self) -> &MixedDevice {
            &self.device
        }

        fn synchronize(&self) {}

        fn allocator(&self) -> &DefaultAllocator<MixedDevice> {
            &self.allocator
        }
    }

    impl Runtime for MixedRuntime {
        type Device = MixedDevice;
        type Client = MixedClient;
        type Allocator = DefaultAllocator<MixedDevice>;

        fn name() -> &'static str {
            "mixed"
        }

        fn allocate(size_bytes: usize, _device: &MixedDevice) -> Result<u64> {
            CpuRuntime::allocate(size_bytes, &CpuDevice::new())
        }

        fn deallocate(ptr: u64, size_bytes: usize, _device: &MixedDevice) {
            CpuRuntime::deallocate(ptr, size_bytes, &CpuDevice::new())
        }

        fn copy_to_device(src: &[u8], dst: u64, _device: &MixedDevice) -> Result<()> {
            CpuRuntime::copy_to_device(src, dst, &CpuDevice::new())
        }

        fn copy_from_device(src: u64, dst: &mut [u8], _device: &MixedDevice) -> Result<()> {
            CpuRuntime::copy_from_device(src, dst, &CpuDevice::new())
        }

        fn copy_strided(
            src_handle: u64,
            src_byte_offset: usize,
            dst_handle: u64,
            shape: &[usize],
            strides: &[isize],
            elem_size: usize,
            _device: &MixedDevice,
        ) -> Result<()> {
            CpuRuntime::copy_strided(
                src_handle,
                src_byte_offset,
                dst_handle,
                shape,
                strides,
                elem_size,
                &CpuDevice::new(),
            )
        }

        fn default_device() -> MixedDevice {
            MixedDevice {
                id: 0,
                accelerator: true,
            }
        }

        fn default_client(device: &MixedDevice) -> MixedClient {
            MixedClient {
                device: device.clone(),
                allocator: DefaultAllocator::new(
                    device.clone(),
                    |size, _dev| CpuRuntime::allocate(size, &CpuDevice::new()),
                    |ptr, size, _dev| CpuRuntime::deallocate(ptr, size, &CpuDevice::new()),
                ),
            }
        }
    }

    fn mixed_tensor(device: &MixedDevice) -> Tensor<MixedRuntime> {
        Tensor::<MixedRuntime>::from_slice(&[1.0f32, 2.0], &[2], device)
    }

    #[test]
    fn test_residency_follows_storage_device() {
        let gpu0 = MixedRuntime::default_device();
        let gpu1 = MixedDevice {
            id: 1,
            accelerator: true,
        };
        let host = MixedDevice {
            id: 2,
            accelerator: false,
        };
        assert!(MixedRuntime::is_accelerator());

        let on_gpu0 = mixed_tensor(&gpu0);
        let on_gpu1 = mixed_tensor(&gpu1);
        let on_host = mixed_tensor(&host);

        assert_eq!(Residency::of(&on_gpu0), Residency::Accelerator);
        assert_eq!(Residency::of(&on_host), Residency::Host);

        assert!(outputs_resident::<MixedRuntime>(&gpu0, &[&on_gpu0]));
        assert!(!outputs_resident::<MixedRuntime>(&gpu0, &[&on_gpu0, &on_host]));
        assert!(!outputs_resident::<MixedRuntime>(&gpu0, &[&on_gpu1]));
        assert!(outputs_resident::<MixedRuntime>(&host, &[&on_host]));
    }
}
