//! CUDA runtime implementation
//!
//! This module provides GPU residency via NVIDIA CUDA using cudarc.
//!
//! # Features
//!
//! - `CudaDevice` - Represents a CUDA GPU device
//! - `CudaClient` - Owns the context and stream of one device
//! - `CudaRuntime` - Implements the generic Runtime trait
//!
//! Extension ops run through the CPU fallback (see `runtime::fallback`):
//! inputs are downloaded, computed on the host and results uploaded back, so
//! outputs stay device-resident.

mod cache;
mod client;
mod device;
mod runtime;

pub use client::{CudaAllocator, CudaClient};
pub use device::CudaDevice;
pub use runtime::{CudaRuntime, is_cuda_available};
