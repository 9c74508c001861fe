//! CUDA implementations of the extension operation traits.
//!
//! All operations stage through the CPU backend via
//! [`CpuFallbackContext`](crate::runtime::fallback::CpuFallbackContext); their
//! outputs are uploaded back to the client's device.

mod cluster;
mod compare;
mod random;
mod scatter;
mod spline;
