//! Runtime backends for tensor computation
//!
//! This module defines the `Runtime` trait and provides implementations
//! for the CPU and (behind the `cuda` feature) CUDA backends.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity)
//! ├── Device (identifies a specific GPU/CPU)
//! ├── Client (dispatches operations, owns stream/queue)
//! └── Allocator (memory management)
//! ```

mod allocator;
pub mod traits;

pub mod cpu;

#[cfg(feature = "cuda")]
pub mod cuda;

// CPU fallback utilities for GPU backends
#[cfg(feature = "cuda")]
pub mod fallback;

pub use allocator::{Allocator, DefaultAllocator};
pub use traits::{Device, Runtime, RuntimeClient};

/// Returns true when an accelerator runtime is compiled in and a device
/// can be initialised.
///
/// Without the `cuda` feature this is always false.
pub fn accelerator_available() -> bool {
    #[cfg(feature = "cuda")]
    {
        cuda::is_cuda_available()
    }
    #[cfg(not(feature = "cuda"))]
    {
        false
    }
}
