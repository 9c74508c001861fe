//! CUDA Device implementation

use crate::runtime::Device;

/// CUDA Device using cudarc
///
/// Represents a single GPU by ordinal. The context and stream live in the
/// cached `CudaClient` for that ordinal.
#[derive(Clone, Debug)]
pub struct CudaDevice {
    /// Index of the GPU device (0, 1, 2, ...)
    pub(crate) index: usize,
}

impl CudaDevice {
    /// Create a new CUDA device
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl Device for CudaDevice {
    fn id(&self) -> usize {
        self.index
    }

    fn is_accelerator(&self) -> bool {
        true
    }

    fn name(&self) -> String {
        format!("cuda:{}", self.index)
    }
}

impl Default for CudaDevice {
    fn default() -> Self {
        Self::new(0)
    }
}
