//! Operation traits for tensor operations.
//!
//! This module contains trait definitions for the extension op families and
//! the small set of framework ops the probes rely on. Implementations are in
//! the backend-specific modules (cpu/, cuda/).

mod cluster;
mod compare;
mod random;
mod scatter;
mod spline;

pub use cluster::ClusterOps;
pub use compare::CompareOps;
pub use random::RandomOps;
pub use scatter::{ScatterOps, ScatterReduce};
pub use spline::SplineOps;
