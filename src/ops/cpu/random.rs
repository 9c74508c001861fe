//! CPU implementation of random operations.

use crate::dispatch_float_dtype;
use crate::dtype::DType;
use crate::error::Result;
use crate::ops::RandomOps;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::Tensor;

/// RandomOps implementation for CPU runtime.
impl RandomOps<CpuRuntime> for CpuClient {
    fn rand(&self, shape: &[usize], dtype: DType) -> Result<Tensor<CpuRuntime>> {
        let out = Tensor::<CpuRuntime>::try_empty(shape, dtype, &self.device)?;
        let numel = out.numel();
        let out_ptr = out.storage().ptr();

        dispatch_float_dtype!(dtype, T => {
            if numel > 0 {
                unsafe {
                    kernels::rand_uniform_kernel::<T>(out_ptr as *mut T, numel);
                }
            }
        }, "rand");

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::CpuDevice;

    #[test]
    fn test_rand_range() {
        let client = CpuClient::new(CpuDevice::new());
        let t = client.rand(&[64, 4], DType::F32).unwrap();
        assert_eq!(t.shape(), &[64, 4]);
        let data = t.to_vec::<f32>().unwrap();
        assert!(data.iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_rand_rejects_int() {
        let client = CpuClient::new(CpuDevice::new());
        assert!(client.rand(&[3], DType::I64).is_err());
    }
}
