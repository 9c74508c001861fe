//! Integration tests for CPU runtime
//!
//! These tests verify the public API of the CPU runtime implementation.

mod common;

use common::create_cpu_client;
use geotensor::dtype::DType;
use geotensor::error::Error;
use geotensor::ops::{CompareOps, RandomOps};
use geotensor::runtime::cpu::{CpuDevice, CpuRuntime};
use geotensor::runtime::{Allocator, Device, Runtime, RuntimeClient};
use geotensor::tensor::Tensor;

#[test]
fn test_allocate_deallocate() {
    let device = CpuDevice::new();
    let ptr = CpuRuntime::allocate(1024, &device).unwrap();
    assert_ne!(ptr, 0);
    assert_eq!(ptr % 64, 0);
    CpuRuntime::deallocate(ptr, 1024, &device);
}

#[test]
fn test_copy_roundtrip() {
    let device = CpuDevice::new();
    let data: Vec<u8> = vec![1, 2, 3, 4, 5, 6, 7, 8];

    let ptr = CpuRuntime::allocate(data.len(), &device).unwrap();
    CpuRuntime::copy_to_device(&data, ptr, &device).unwrap();

    let mut result = vec![0u8; data.len()];
    CpuRuntime::copy_from_device(ptr, &mut result, &device).unwrap();

    assert_eq!(data, result);

    CpuRuntime::deallocate(ptr, data.len(), &device);
}

#[test]
fn test_zero_allocation() {
    let device = CpuDevice::new();
    let ptr = CpuRuntime::allocate(0, &device).unwrap();
    assert_eq!(ptr, 0);
    CpuRuntime::deallocate(ptr, 0, &device); // Should not panic
}

#[test]
fn test_client_allocator() {
    let (client, device) = create_cpu_client();
    assert!(client.device().is_same(&device));

    let ptr = client.allocator().allocate(256).unwrap();
    assert_ne!(ptr, 0);
    client.allocator().deallocate(ptr, 256);
}

#[test]
fn test_oversized_tensors_are_rejected() {
    let device = CpuDevice::new();

    // Element count fits, byte count does not
    assert!(matches!(
        Tensor::<CpuRuntime>::try_empty(&[usize::MAX / 4], DType::F64, &device),
        Err(Error::OutOfMemory { .. })
    ));

    // Element count itself overflows
    assert!(matches!(
        Tensor::<CpuRuntime>::try_zeros(&[1 << 62, 4], DType::U8, &device),
        Err(Error::InvalidArgument { arg: "shape", .. })
    ));
    assert!(Tensor::<CpuRuntime>::try_from_slice(&[1.0f32], &[usize::MAX, 2], &device).is_err());
    assert!(
        Tensor::<CpuRuntime>::try_full_scalar(&[0, usize::MAX, 2], DType::F32, 1.0, &device)
            .is_err()
    );
}

#[test]
fn test_runtime_identity() {
    assert_eq!(CpuRuntime::name(), "cpu");
    assert!(!CpuRuntime::is_accelerator());
    assert_eq!(CpuRuntime::default_device().name(), "cpu");
}

#[test]
fn test_tensor_constructors() {
    let device = CpuDevice::new();

    let zeros = Tensor::<CpuRuntime>::try_zeros(&[2, 3], DType::F32, &device).unwrap();
    assert_eq!(zeros.to_vec::<f32>().unwrap(), vec![0.0; 6]);

    let ones = Tensor::<CpuRuntime>::try_ones(&[4], DType::I64, &device).unwrap();
    assert_eq!(ones.to_vec::<i64>().unwrap(), vec![1; 4]);

    let full = Tensor::<CpuRuntime>::try_full_scalar(&[2], DType::F64, 2.5, &device).unwrap();
    assert_eq!(full.to_vec::<f64>().unwrap(), vec![2.5, 2.5]);

    assert!(matches!(
        Tensor::<CpuRuntime>::try_from_slice(&[1.0f32, 2.0, 3.0], &[2, 2], &device),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn test_tensor_to_vec_dtype_checked() {
    let device = CpuDevice::new();
    let t = Tensor::<CpuRuntime>::from_slice(&[1i64, 2], &[2], &device);
    assert!(matches!(t.to_vec::<f32>(), Err(Error::DTypeMismatch { .. })));
    assert_eq!(t.to_f64_vec().unwrap(), vec![1.0, 2.0]);
}

#[test]
fn test_transpose_then_contiguous() {
    let device = CpuDevice::new();
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3], &device);

    let tt = t.transpose(0, 1).unwrap();
    assert_eq!(tt.shape(), &[3, 2]);
    assert!(!tt.is_contiguous());
    assert!(matches!(tt.reshape(&[6]), Err(Error::NotContiguous)));

    let c = tt.contiguous().unwrap();
    assert!(c.is_contiguous());
    assert_eq!(c.to_vec::<f32>().unwrap(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    assert_eq!(c.reshape(&[6]).unwrap().shape(), &[6]);
}

#[test]
fn test_tensor_display() {
    let device = CpuDevice::new();
    let t = Tensor::<CpuRuntime>::from_slice(&[20.0f32, 30.0], &[2], &device);
    let text = t.to_string();
    assert!(text.starts_with("tensor([20.0000, 30.0000]"), "{text}");

    let i = Tensor::<CpuRuntime>::from_slice(&[2i64, 3], &[2], &device);
    assert!(i.to_string().starts_with("tensor([2, 3]"));
}

#[test]
fn test_allclose_and_equal() {
    let (client, device) = create_cpu_client();
    let a = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0], &[2], &device);
    let b = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0000005], &[2], &device);
    let c = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.1], &[2], &device);
    let d = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0], &[3], &device);

    assert!(client.allclose(&a, &b, 1e-6, 0.0).unwrap());
    assert!(!client.allclose(&a, &c, 1e-6, 0.0).unwrap());
    assert!(client.allclose(&a, &c, 0.0, 0.05).unwrap());
    assert!(!client.allclose(&a, &d, 1.0, 1.0).unwrap());

    assert!(client.equal(&a, &a).unwrap());
    assert!(!client.equal(&a, &b).unwrap());

    let ai = Tensor::<CpuRuntime>::from_slice(&[1i64, 2], &[2], &device);
    assert!(!client.equal(&a, &ai).unwrap());
}

#[test]
fn test_equal_is_exact_for_large_integers() {
    let (client, device) = create_cpu_client();
    let big = 1i64 << 53;
    let a = Tensor::<CpuRuntime>::from_slice(&[big, -7], &[2], &device);
    let b = Tensor::<CpuRuntime>::from_slice(&[big + 1, -7], &[2], &device);

    // Both round to the same f64
    assert_eq!(a.to_f64_vec().unwrap(), b.to_f64_vec().unwrap());
    assert!(!client.equal(&a, &b).unwrap());
    assert!(client.equal(&b, &b.clone()).unwrap());

    let flags = Tensor::<CpuRuntime>::try_ones(&[3], DType::Bool, &device).unwrap();
    let other = Tensor::<CpuRuntime>::try_zeros(&[3], DType::Bool, &device).unwrap();
    assert!(client.equal(&flags, &flags).unwrap());
    assert!(!client.equal(&flags, &other).unwrap());
}

#[test]
fn test_rand_uniform() {
    let (client, _) = create_cpu_client();
    let t = client.rand(&[64, 4], DType::F32).unwrap();
    assert_eq!(t.shape(), &[64, 4]);
    assert!(t.to_vec::<f32>().unwrap().iter().all(|&v| (0.0..1.0).contains(&v)));

    assert!(client.rand(&[2], DType::I64).is_err());
}
