//! CPU runtime implementation
//!
//! The CPU runtime uses aligned heap allocation and provides the reference
//! implementation of every extension operation. Accelerator backends fall
//! back to these kernels.
//!
//! # Non-contiguous Tensors
//!
//! Operations materialize contiguous copies of strided inputs before running
//! their kernels; outputs are always contiguous.

mod client;
mod device;
pub(crate) mod helpers;
pub(crate) mod kernels;
mod runtime;

pub use crate::tensor::Tensor;
pub use client::{CpuAllocator, CpuClient};
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
