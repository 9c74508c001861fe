//! CPU implementation of comparison operations.
//!
//! The host-side defaults of `CompareOps` already read CPU memory directly.

use crate::ops::CompareOps;
use crate::runtime::cpu::{CpuClient, CpuRuntime};

impl CompareOps<CpuRuntime> for CpuClient {}
