//! Integration tests for scatter reductions on the CPU runtime
#![cfg(feature = "scatter")]

mod common;

use common::{assert_allclose_f32, assert_allclose_f64, cpu_tensor, create_cpu_client};
use geotensor::dtype::DType;
use geotensor::error::Error;
use geotensor::ops::{ScatterOps, ScatterReduce};
use geotensor::runtime::cpu::CpuRuntime;
use geotensor::tensor::Tensor;

// ============================================================================
// Literal scenarios
// ============================================================================

#[test]
fn test_scatter_sum_literal() {
    let (client, device) = create_cpu_client();
    let src = cpu_tensor(&[10.0f32, 20.0, 30.0, 40.0], &device);
    let index = cpu_tensor(&[2i64, 0, 1, 2], &device);

    let out = client.scatter_sum(&src, &index, 0, None).unwrap();
    assert_eq!(out.shape(), &[3]);
    assert_allclose_f32(&out.to_vec::<f32>().unwrap(), &[20.0, 30.0, 50.0], 0.0, 1e-6, "sum");
}

#[test]
fn test_scatter_mul_unassigned_is_one() {
    let (client, device) = create_cpu_client();
    let src = cpu_tensor(&[2.0f32, 2.0, 3.0], &device);
    let index = cpu_tensor(&[0i64, 0, 2], &device);

    let out = client.scatter_mul(&src, &index, 0, None).unwrap();
    assert_allclose_f32(&out.to_vec::<f32>().unwrap(), &[4.0, 1.0, 3.0], 0.0, 1e-6, "mul");
}

#[test]
fn test_scatter_mean_literal() {
    let (client, device) = create_cpu_client();
    let src = cpu_tensor(&[10.0f32, 20.0, 30.0, 40.0], &device);
    let index = cpu_tensor(&[0i64, 0, 1, 1], &device);

    let out = client.scatter_mean(&src, &index, 0, None).unwrap();
    assert_allclose_f32(&out.to_vec::<f32>().unwrap(), &[15.0, 35.0], 0.0, 1e-6, "mean");
}

#[test]
fn test_scatter_min_literal() {
    let (client, device) = create_cpu_client();
    let src = cpu_tensor(&[10.0f32, 5.0, 8.0, 2.0], &device);
    let index = cpu_tensor(&[1i64, 1, 0, 1], &device);

    let (out, arg) = client.scatter_min(&src, &index, 0, None).unwrap();
    assert_allclose_f32(&out.to_vec::<f32>().unwrap(), &[8.0, 2.0], 0.0, 1e-6, "min");
    assert_eq!(arg.dtype(), DType::I64);
    assert_eq!(arg.to_vec::<i64>().unwrap(), vec![2, 3]);
}

#[test]
fn test_scatter_max_literal() {
    let (client, device) = create_cpu_client();
    let src = cpu_tensor(&[3.0f32, 10.0, 8.0, 12.0], &device);
    let index = cpu_tensor(&[0i64, 1, 1, 1], &device);

    let (out, arg) = client.scatter_max(&src, &index, 0, None).unwrap();
    assert_allclose_f32(&out.to_vec::<f32>().unwrap(), &[3.0, 12.0], 0.0, 1e-6, "max");
    assert_eq!(arg.to_vec::<i64>().unwrap(), vec![0, 3]);
}

#[test]
fn test_scatter_add_is_sum() {
    let (client, device) = create_cpu_client();
    let src = cpu_tensor(&[1.0f64, 2.0, 3.0], &device);
    let index = cpu_tensor(&[1i64, 1, 0], &device);

    let add = client.scatter_add(&src, &index, 0, None).unwrap();
    let generic = client
        .scatter(&src, &index, 0, None, ScatterReduce::Sum)
        .unwrap();
    assert_eq!(add.to_vec::<f64>().unwrap(), generic.to_vec::<f64>().unwrap());
    assert_eq!(add.to_vec::<f64>().unwrap(), vec![3.0, 3.0]);
}

// ============================================================================
// Shapes and layout
// ============================================================================

#[test]
fn test_scatter_2d_broadcast_index() {
    let (client, device) = create_cpu_client();
    let src = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], &[3, 2], &device);
    let index = cpu_tensor(&[0i64, 1, 0], &device);

    let out = client.scatter_sum(&src, &index, 0, None).unwrap();
    assert_eq!(out.shape(), &[2, 2]);
    assert_eq!(out.to_vec::<f64>().unwrap(), vec![6.0, 8.0, 3.0, 4.0]);
}

#[test]
fn test_scatter_2d_full_index_dim1() {
    let (client, device) = create_cpu_client();
    let src = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3], &device);
    let index = Tensor::<CpuRuntime>::from_slice(&[0i64, 0, 1, 1, 1, 1], &[2, 3], &device);

    let out = client.scatter_sum(&src, &index, 1, None).unwrap();
    assert_eq!(out.shape(), &[2, 2]);
    assert_eq!(out.to_vec::<f32>().unwrap(), vec![3.0, 3.0, 0.0, 15.0]);

    let (max, arg) = client.scatter_max(&src, &index, 1, None).unwrap();
    assert_eq!(max.to_vec::<f32>().unwrap(), vec![2.0, 3.0, 0.0, 6.0]);
    // Row 1 never targets slot 0, which keeps the sentinel position
    assert_eq!(arg.to_vec::<i64>().unwrap(), vec![1, 2, 3, 2]);
}

#[test]
fn test_scatter_non_contiguous_src() {
    let (client, device) = create_cpu_client();
    // [[1, 2], [3, 4]] transposed is [[1, 3], [2, 4]]
    let src = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[2, 2], &device)
        .transpose(0, 1)
        .unwrap();
    assert!(!src.is_contiguous());
    let index = cpu_tensor(&[0i64, 0], &device);

    let out = client.scatter_sum(&src, &index, 0, None).unwrap();
    assert_eq!(out.to_vec::<f64>().unwrap(), vec![3.0, 7.0]);
}

#[test]
fn test_scatter_explicit_dim_size() {
    let (client, device) = create_cpu_client();
    let src = cpu_tensor(&[1.0f32, 2.0], &device);
    let index = cpu_tensor(&[0i64, 1], &device);

    let out = client.scatter_sum(&src, &index, 0, Some(4)).unwrap();
    assert_eq!(out.to_vec::<f32>().unwrap(), vec![1.0, 2.0, 0.0, 0.0]);
}

#[test]
fn test_scatter_min_unassigned_slot() {
    let (client, device) = create_cpu_client();
    let src = cpu_tensor(&[1.0f64, 2.0], &device);
    let index = cpu_tensor(&[0i64, 2], &device);

    let (out, arg) = client.scatter_min(&src, &index, 0, None).unwrap();
    assert_eq!(out.to_vec::<f64>().unwrap(), vec![1.0, 0.0, 2.0]);
    assert_eq!(arg.to_vec::<i64>().unwrap(), vec![0, 2, 1]);
}

#[test]
fn test_scatter_ties_keep_first() {
    let (client, device) = create_cpu_client();
    let src = cpu_tensor(&[5.0f32, 5.0, 1.0, 1.0], &device);
    let index = cpu_tensor(&[0i64, 0, 1, 1], &device);

    let (_, max_arg) = client.scatter_max(&src, &index, 0, None).unwrap();
    let (_, min_arg) = client.scatter_min(&src, &index, 0, None).unwrap();
    assert_eq!(max_arg.to_vec::<i64>().unwrap(), vec![0, 2]);
    assert_eq!(min_arg.to_vec::<i64>().unwrap(), vec![0, 2]);
}

#[test]
fn test_scatter_integer_sum() {
    let (client, device) = create_cpu_client();
    let src = cpu_tensor(&[1i64, 2, 3, 4], &device);
    let index = cpu_tensor(&[1i64, 0, 1, 0], &device);

    let out = client.scatter_sum(&src, &index, 0, None).unwrap();
    assert_eq!(out.dtype(), DType::I64);
    assert_eq!(out.to_vec::<i64>().unwrap(), vec![6, 4]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_scatter_out_of_bounds() {
    let (client, device) = create_cpu_client();
    let src = cpu_tensor(&[1.0f32, 2.0], &device);

    let negative = cpu_tensor(&[0i64, -1], &device);
    assert!(matches!(
        client.scatter_sum(&src, &negative, 0, None),
        Err(Error::IndexOutOfBounds { index: -1, .. })
    ));

    let index = cpu_tensor(&[0i64, 3], &device);
    assert!(matches!(
        client.scatter_sum(&src, &index, 0, Some(2)),
        Err(Error::IndexOutOfBounds { index: 3, size: 2 })
    ));
}

#[test]
fn test_scatter_invalid_arguments() {
    let (client, device) = create_cpu_client();
    let src = cpu_tensor(&[1.0f32, 2.0], &device);
    let index = cpu_tensor(&[0i64, 1], &device);

    assert!(matches!(
        client.scatter_sum(&src, &index, 1, None),
        Err(Error::InvalidDimension { .. })
    ));

    let short = cpu_tensor(&[0i64], &device);
    assert!(matches!(
        client.scatter_sum(&src, &short, 0, None),
        Err(Error::ShapeMismatch { .. })
    ));

    let i32_index = cpu_tensor(&[0i32, 1], &device);
    assert!(matches!(
        client.scatter_sum(&src, &i32_index, 0, None),
        Err(Error::DTypeMismatch { .. })
    ));
}

#[test]
fn test_scatter_huge_index_is_an_error() {
    let (client, device) = create_cpu_client();

    // Output shape fits, but its byte size does not
    let src = cpu_tensor(&[1.0f32], &device);
    let index = cpu_tensor(&[1i64 << 62], &device);
    assert!(matches!(
        client.scatter_sum(&src, &index, 0, None),
        Err(Error::OutOfMemory { .. })
    ));
    assert!(matches!(
        client.scatter_max(&src, &index, 0, None),
        Err(Error::OutOfMemory { .. })
    ));

    // Output shape itself overflows
    let src = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0], &[1, 2], &device);
    let index = cpu_tensor(&[i64::MAX], &device);
    assert!(matches!(
        client.scatter_sum(&src, &index, 0, None),
        Err(Error::InvalidArgument { arg: "shape", .. })
    ));
    assert!(matches!(
        client.scatter_mean(&src, &index, 0, None),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn test_scatter_mean_rejects_integers() {
    let (client, device) = create_cpu_client();
    let src = cpu_tensor(&[1i64, 2], &device);
    let index = cpu_tensor(&[0i64, 0], &device);

    assert!(matches!(
        client.scatter_mean(&src, &index, 0, None),
        Err(Error::UnsupportedDType { dtype: DType::I64, .. })
    ));
}

// ============================================================================
// Softmax
// ============================================================================

#[test]
fn test_scatter_softmax_groups() {
    let (client, device) = create_cpu_client();
    let src = cpu_tensor(&[1.0f64, 2.0, 3.0, 4.0, 7.0], &device);
    let index = cpu_tensor(&[0i64, 0, 1, 1, 2], &device);

    let out = client.scatter_softmax(&src, &index, 0).unwrap();
    let values = out.to_vec::<f64>().unwrap();
    assert_eq!(out.shape(), src.shape());

    let e = std::f64::consts::E;
    let low = 1.0 / (1.0 + e);
    assert_allclose_f64(&values, &[low, 1.0 - low, low, 1.0 - low, 1.0], 0.0, 1e-12, "softmax");

    let sums = client.scatter_sum(&out, &index, 0, None).unwrap();
    assert_allclose_f64(&sums.to_vec::<f64>().unwrap(), &[1.0, 1.0, 1.0], 0.0, 1e-12, "group sums");
}

#[test]
fn test_scatter_softmax_large_values_are_stable() {
    let (client, device) = create_cpu_client();
    let src = cpu_tensor(&[1000.0f32, 1000.0], &device);
    let index = cpu_tensor(&[0i64, 0], &device);

    let out = client.scatter_softmax(&src, &index, 0).unwrap();
    assert_allclose_f32(&out.to_vec::<f32>().unwrap(), &[0.5, 0.5], 0.0, 1e-6, "stable");
}

#[test]
fn test_scatter_softmax_sparse_index() {
    let (client, device) = create_cpu_client();
    let src = cpu_tensor(&[1.0f64, 2.0, 2.0], &device);
    let index = cpu_tensor(&[7i64, i64::MAX, i64::MAX], &device);

    let out = client.scatter_softmax(&src, &index, 0).unwrap();
    assert_allclose_f64(&out.to_vec::<f64>().unwrap(), &[1.0, 0.5, 0.5], 0.0, 1e-12, "sparse");
}
