//! CPU kernel implementations
//!
//! This module provides low-level compute kernels for CPU operations.
//! Kernels are generic over `T: Element` and are instantiated through
//! `dispatch_dtype!` by the op implementations in `ops::cpu`.

#![allow(unsafe_op_in_unsafe_fn)] // Kernels are already marked unsafe, inner unsafe is redundant

pub mod knn;
pub mod random;
pub mod scatter;
pub mod spline;

pub use knn::{Neighbourhood, PointSet, neighbour_search_kernel};
pub use random::rand_uniform_kernel;
pub use scatter::{scatter_reduce_kernel, scatter_softmax_kernel};
pub use spline::{spline_basis_kernel, spline_weighting_kernel};
