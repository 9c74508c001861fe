//! # geotensor
//!
//! **Geometric tensor extensions with smoke probes for CPU and CUDA.**
//!
//! geotensor provides a small n-dimensional tensor framework together with three
//! families of geometric-learning extension operations:
//!
//! - **Scatter reductions**: sum, mul, mean, min and max of values sharing an
//!   index, plus a grouped softmax
//! - **Clustering**: k-nearest-neighbour and radius search over point clouds
//! - **Spline convolution**: B-spline basis evaluation and kernel weighting
//!
//! On top of them sits a probe harness (`probe`) that checks whether each
//! extension is present and numerically correct, and whether results stay on
//! the accelerator. Two binaries, `module_check` and `scatter_check`, run the
//! probes and print a human-readable report.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use geotensor::prelude::*;
//!
//! let device = CpuDevice::new();
//! let client = CpuRuntime::default_client(&device);
//!
//! let src = Tensor::<CpuRuntime>::from_slice(&[10.0f64, 20.0, 30.0, 40.0], &[4], &device);
//! let index = Tensor::<CpuRuntime>::from_slice(&[2i64, 0, 1, 2], &[4], &device);
//! let out = client.scatter_sum(&src, &index, 0, None)?; // [20, 30, 50]
//! ```
//!
//! ## Feature Flags
//!
//! - `cpu` (default): CPU backend
//! - `rayon` (default): Multi-threaded CPU kernels
//! - `cuda`: NVIDIA CUDA backend (extension ops run through the CPU fallback)
//! - `scatter`, `cluster`, `spline` (default): the extension families. A
//!   disabled family reports itself unavailable at runtime.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod dtype;
pub mod error;
pub mod logging;
pub mod ops;
pub mod probe;
pub mod runtime;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::DType;
    pub use crate::error::{Error, Result};
    pub use crate::ops::{ClusterOps, CompareOps, RandomOps, ScatterOps, ScatterReduce, SplineOps};
    pub use crate::runtime::{Device, Runtime, RuntimeClient};
    pub use crate::tensor::{Layout, Tensor};

    pub use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};

    #[cfg(feature = "cuda")]
    pub use crate::runtime::cuda::{CudaClient, CudaDevice, CudaRuntime};
}

/// Default runtime: the host CPU
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
