//! Shape type: dimensions of a tensor

use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// Most extension inputs are 1-D or 2-D, so up to 4 dims stay on the stack
pub(crate) const STACK_DIMS: usize = 4;

/// Shape type: dimensions of a tensor
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Shape(SmallVec<[usize; STACK_DIMS]>);

impl Shape {
    /// Number of dimensions in this shape.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Total number of elements described by this shape.
    #[inline]
    pub fn numel(&self) -> usize {
        self.0.iter().product()
    }

    /// View shape as a slice.
    pub fn as_slice(&self) -> &[usize] {
        self.0.as_slice()
    }

}

/// Number of elements of `shape`, rejecting shapes whose contiguous strides
/// do not fit in `isize`.
///
/// Zero-sized dimensions still count as 1 for the stride check, so
/// `[0, usize::MAX, 2]` is rejected even though it holds no elements.
pub fn checked_numel(shape: &[usize]) -> Result<usize> {
    let mut span: usize = 1;
    for &dim in shape {
        span = span
            .checked_mul(dim.max(1))
            .filter(|&n| n <= isize::MAX as usize)
            .ok_or_else(|| {
                Error::invalid_argument("shape", format!("{shape:?} is too large to address"))
            })?;
    }
    Ok(if shape.contains(&0) { 0 } else { span })
}

impl Deref for Shape {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<[usize]> for Shape {
    fn as_ref(&self) -> &[usize] {
        self.0.as_slice()
    }
}

impl From<&[usize]> for Shape {
    fn from(value: &[usize]) -> Self {
        Self(value.iter().copied().collect())
    }
}

impl From<Vec<usize>> for Shape {
    fn from(value: Vec<usize>) -> Self {
        Self(value.into_iter().collect())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(value: [usize; N]) -> Self {
        Self(value.into_iter().collect())
    }
}

impl FromIterator<usize> for Shape {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_numel() {
        assert_eq!(checked_numel(&[4, 3]).unwrap(), 12);
        assert_eq!(checked_numel(&[]).unwrap(), 1);
        assert_eq!(checked_numel(&[5, 0, 7]).unwrap(), 0);
    }

    #[test]
    fn test_checked_numel_overflow() {
        assert!(matches!(
            checked_numel(&[usize::MAX, 2]),
            Err(Error::InvalidArgument { arg: "shape", .. })
        ));
        assert!(checked_numel(&[1 << 62, 4]).is_err());
        assert!(checked_numel(&[0, usize::MAX, 2]).is_err());
    }
}
