//! Core Tensor type

use super::{Layout, Storage, checked_numel};
use crate::dispatch_dtype;
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::{Device, Runtime};
use std::fmt;

/// Number of leading elements rendered by `Display` before eliding
const DISPLAY_LIMIT: usize = 16;

/// N-dimensional array stored on a compute device
///
/// `Tensor` consists of:
/// - **Storage**: Reference-counted device memory
/// - **Layout**: Shape, strides, and offset defining the view into storage
/// - **DType**: Element type (determined at runtime)
///
/// # Example
///
/// ```ignore
/// use geotensor::prelude::*;
///
/// let device = CpuDevice::new();
/// let src = Tensor::<CpuRuntime>::try_from_slice(&[10.0f32, 20.0, 30.0], &[3], &device)?;
/// let index = Tensor::<CpuRuntime>::try_from_slice(&[1i64, 0, 1], &[3], &device)?;
/// ```
pub struct Tensor<R: Runtime> {
    storage: Storage<R>,
    layout: Layout,
}

impl<R: Runtime> Tensor<R> {
    /// Create a tensor from storage and layout
    pub fn from_parts(storage: Storage<R>, layout: Layout) -> Self {
        Self { storage, layout }
    }

    /// Create a tensor from a slice of data
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` does not equal the product of the `shape` dimensions.
    /// For a fallible alternative, use [`Self::try_from_slice`].
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize], device: &R::Device) -> Self {
        Self::try_from_slice(data, shape, device).expect("Tensor::from_slice failed")
    }

    /// Create a tensor from a slice of data (fallible version)
    ///
    /// Returns an error if `data.len()` does not equal the product of the `shape`
    /// dimensions, or if memory allocation fails.
    pub fn try_from_slice<T: Element>(
        data: &[T],
        shape: &[usize],
        device: &R::Device,
    ) -> Result<Self> {
        let expected_len = checked_numel(shape)?;
        if data.len() != expected_len {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }

        Ok(Self {
            storage: Storage::from_slice(data, device)?,
            layout: Layout::contiguous(shape),
        })
    }

    /// Create a tensor whose contents are zero-initialised by the allocator
    pub fn empty(shape: &[usize], dtype: DType, device: &R::Device) -> Self {
        Self::try_empty(shape, dtype, device).expect("Tensor::empty failed")
    }

    /// Fallible version of [`Self::empty`]
    pub fn try_empty(shape: &[usize], dtype: DType, device: &R::Device) -> Result<Self> {
        let len = checked_numel(shape)?;
        Ok(Self {
            storage: Storage::new(len, dtype, device)?,
            layout: Layout::contiguous(shape),
        })
    }

    /// Create a tensor filled with zeros
    pub fn zeros(shape: &[usize], dtype: DType, device: &R::Device) -> Self {
        Self::try_zeros(shape, dtype, device).expect("Tensor::zeros failed")
    }

    /// Fallible version of [`Self::zeros`]
    pub fn try_zeros(shape: &[usize], dtype: DType, device: &R::Device) -> Result<Self> {
        Self::try_full_scalar(shape, dtype, 0.0, device)
    }

    /// Create a tensor filled with ones
    pub fn ones(shape: &[usize], dtype: DType, device: &R::Device) -> Self {
        Self::try_ones(shape, dtype, device).expect("Tensor::ones failed")
    }

    /// Fallible version of [`Self::ones`]
    pub fn try_ones(shape: &[usize], dtype: DType, device: &R::Device) -> Result<Self> {
        Self::try_full_scalar(shape, dtype, 1.0, device)
    }

    /// Create a tensor filled with a scalar value
    pub fn full_scalar(shape: &[usize], dtype: DType, value: f64, device: &R::Device) -> Self {
        Self::try_full_scalar(shape, dtype, value, device).expect("Tensor::full_scalar failed")
    }

    /// Fallible version of [`Self::full_scalar`]
    ///
    /// The scalar is converted to the target dtype.
    pub fn try_full_scalar(
        shape: &[usize],
        dtype: DType,
        value: f64,
        device: &R::Device,
    ) -> Result<Self> {
        #[inline]
        fn typed_to_bytes<T: bytemuck::NoUninit>(v: Vec<T>) -> Vec<u8> {
            bytemuck::cast_slice::<T, u8>(&v).to_vec()
        }

        let len = checked_numel(shape)?;
        if len == 0 {
            return Self::try_empty(shape, dtype, device);
        }

        let bytes: Vec<u8> = match dtype {
            DType::F64 => typed_to_bytes(vec![value; len]),
            DType::F32 => typed_to_bytes(vec![value as f32; len]),
            DType::I64 => typed_to_bytes(vec![value as i64; len]),
            DType::I32 => typed_to_bytes(vec![value as i32; len]),
            DType::U8 => vec![value as u8; len],
            DType::Bool => vec![u8::from(value != 0.0); len],
        };

        Ok(Self {
            storage: Storage::from_bytes(&bytes, dtype, device)?,
            layout: Layout::contiguous(shape),
        })
    }

    // ===== Accessors =====

    /// Get the storage
    #[inline]
    pub fn storage(&self) -> &Storage<R> {
        &self.storage
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Get the number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Get the total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.elem_count()
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Get the device
    #[inline]
    pub fn device(&self) -> &R::Device {
        self.storage.device()
    }

    /// Check if the tensor is contiguous in memory
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Size along a dimension (supports negative indexing)
    pub fn dim_size(&self, dim: isize) -> Result<usize> {
        self.layout.dim(dim).ok_or(Error::InvalidDimension {
            dim,
            ndim: self.ndim(),
        })
    }

    /// True when this tensor's storage lives on an accelerator device
    #[inline]
    pub fn is_on_accelerator(&self) -> bool {
        self.storage.device().is_accelerator()
    }

    // ===== View Operations =====

    /// Transpose two dimensions (zero-copy)
    pub fn transpose(&self, dim0: isize, dim1: isize) -> Result<Self> {
        let layout = self
            .layout
            .transpose(dim0, dim1)
            .ok_or(Error::InvalidDimension {
                dim: dim0,
                ndim: self.ndim(),
            })?;
        Ok(Self {
            storage: self.storage.clone(),
            layout,
        })
    }

    /// Reshape to a new shape (zero-copy, contiguous tensors only)
    pub fn reshape(&self, shape: &[usize]) -> Result<Self> {
        if !self.is_contiguous() {
            return Err(Error::NotContiguous);
        }
        let layout = self
            .layout
            .reshape(shape)
            .ok_or_else(|| Error::shape_mismatch(shape, self.shape()))?;
        Ok(Self {
            storage: self.storage.clone(),
            layout,
        })
    }

    /// Materialize a contiguous copy of this tensor
    ///
    /// Zero-copy if the tensor is already contiguous.
    pub fn contiguous(&self) -> Result<Self> {
        if self.is_contiguous() {
            return Ok(self.clone());
        }

        let dtype = self.dtype();
        let out = Self::try_empty(self.shape(), dtype, self.device())?;
        R::copy_strided(
            self.storage.ptr(),
            self.layout.offset() * dtype.size_in_bytes(),
            out.storage.ptr(),
            self.shape(),
            self.layout.strides(),
            dtype.size_in_bytes(),
            self.device(),
        )?;
        Ok(out)
    }

    /// Copy tensor contents to a host `Vec`
    ///
    /// Returns `DTypeMismatch` if `T` does not match the tensor dtype.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        if T::DTYPE != self.dtype() {
            return Err(Error::DTypeMismatch {
                lhs: T::DTYPE,
                rhs: self.dtype(),
            });
        }
        let contig = self.contiguous()?;
        let mut data = contig.storage.to_vec::<T>()?;
        data.truncate(contig.numel());
        Ok(data)
    }

    /// Copy tensor contents to host as f64, whatever the dtype
    pub fn to_f64_vec(&self) -> Result<Vec<f64>> {
        let dtype = self.dtype();
        if dtype == DType::Bool {
            return Ok(self
                .contiguous()?
                .storage
                .to_vec::<u8>()?
                .into_iter()
                .map(f64::from)
                .collect());
        }
        dispatch_dtype!(dtype, T => {
            Ok(self.to_vec::<T>()?.into_iter().map(Element::to_f64).collect())
        }, "to_f64_vec")
    }
}

impl<R: Runtime> Clone for Tensor<R> {
    /// Clone shares the storage (zero-copy)
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            layout: self.layout.clone(),
        }
    }
}

impl<R: Runtime> fmt::Debug for Tensor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .field("dtype", &self.dtype())
            .field("device", &self.device().name())
            .field("contiguous", &self.is_contiguous())
            .finish()
    }
}

impl<R: Runtime> fmt::Display for Tensor<R> {
    /// Renders `tensor([..], shape=[..], dtype=.., device=..)`
    ///
    /// Floats are printed with four decimals. Long tensors are elided after
    /// the first few elements.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.to_f64_vec().map_err(|_| fmt::Error)?;
        let is_float = self.dtype().is_float();

        write!(f, "tensor([")?;
        for (i, v) in values.iter().take(DISPLAY_LIMIT).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if is_float {
                write!(f, "{v:.4}")?;
            } else {
                write!(f, "{}", *v as i64)?;
            }
        }
        if values.len() > DISPLAY_LIMIT {
            write!(f, ", ...")?;
        }
        write!(
            f,
            "], shape={:?}, dtype={}, device={})",
            self.shape(),
            self.dtype(),
            self.device().name()
        )
    }
}
