//! CPU implementations of the extension operation traits.
//!
//! An extension whose feature is disabled keeps the trait defaults, which
//! report `NotImplemented`.

#[cfg(feature = "cluster")]
mod cluster;
mod compare;
mod random;
#[cfg(feature = "scatter")]
mod scatter;
#[cfg(feature = "spline")]
mod spline;

#[cfg(not(feature = "scatter"))]
impl crate::ops::ScatterOps<crate::runtime::cpu::CpuRuntime> for crate::runtime::cpu::CpuClient {}

#[cfg(not(feature = "cluster"))]
impl crate::ops::ClusterOps<crate::runtime::cpu::CpuRuntime> for crate::runtime::cpu::CpuClient {}

#[cfg(not(feature = "spline"))]
impl crate::ops::SplineOps<crate::runtime::cpu::CpuRuntime> for crate::runtime::cpu::CpuClient {}
