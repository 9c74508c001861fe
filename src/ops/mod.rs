//! Tensor operations
//!
//! This module defines the extension operation traits and their backend
//! implementations: scatter reductions, nearest-neighbour clustering and
//! B-spline convolution.
//!
//! # Design
//!
//! Operations are defined as traits that are implemented by `RuntimeClient`.
//! This gives operations access to the device for creating output tensors.
//!
//! ```text
//! RuntimeClient<R>
//!   ├── implements ScatterOps<R>   scatter_sum/mul/mean/min/max, scatter_softmax
//!   ├── implements ClusterOps<R>   knn, knn_graph, radius
//!   ├── implements SplineOps<R>    spline_basis, spline_weighting
//!   ├── implements RandomOps<R>    rand
//!   └── implements CompareOps<R>   allclose, equal
//! ```
//!
//! Every trait method has a default that returns `NotImplemented`. A backend
//! built without one of the `scatter`, `cluster` or `spline` features keeps
//! the defaults, so the corresponding extension reports itself unavailable.
//!
//! # Implementing Operations for a New Backend
//!
//! 1. Validate arguments with the shared `*_common` helpers so every backend
//!    reports the same errors.
//! 2. Allocate outputs on the client's device.
//! 3. Dispatch the typed kernel through `dispatch_dtype!`.

pub(crate) mod cluster_common;
pub(crate) mod cpu;
#[cfg(feature = "cuda")]
pub(crate) mod cuda;
mod dispatch;
pub(crate) mod scatter_common;
pub(crate) mod spline_common;
pub mod traits;

pub use traits::{ClusterOps, CompareOps, RandomOps, ScatterOps, ScatterReduce, SplineOps};
