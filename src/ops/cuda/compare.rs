//! CUDA comparison operations.
//!
//! The trait defaults download both operands and compare on the host.

use crate::ops::CompareOps;
use crate::runtime::cuda::{CudaClient, CudaRuntime};

impl CompareOps<CudaRuntime> for CudaClient {}
