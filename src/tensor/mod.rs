//! Tensor types and operations
//!
//! This module provides the core `Tensor` type, which represents an n-dimensional
//! array stored on a compute device (CPU or GPU).

mod core;
mod layout;
mod shape;
mod storage;

pub use core::Tensor;
pub use layout::{Layout, Strides};
pub use shape::{Shape, checked_numel};
pub use storage::Storage;
