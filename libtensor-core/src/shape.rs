use std::{
    fmt,
    ops::{Deref, Index},
};

/// Extents of a rank `N` tensor, outermost axis first.
///
/// A zero extent is allowed and describes an empty axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape<const N: usize>([usize; N]);

impl<const N: usize> Shape<N> {
    pub const fn new(dims: [usize; N]) -> Self {
        Self(dims)
    }

    pub const fn ndim(&self) -> usize {
        N
    }

    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Number of scalars a tensor of this shape holds.
    pub fn numel(&self) -> usize {
        self.0.iter().product()
    }

    /// Extents with the leading axis removed.
    pub fn tail(&self) -> &[usize] {
        &self.0[1..]
    }

    pub(crate) fn copy_from_dims(&mut self, dims: &[usize]) {
        self.0.copy_from_slice(dims);
    }
}

impl<const N: usize> Default for Shape<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl<const N: usize> From<[usize; N]> for Shape<N> {
    fn from(dims: [usize; N]) -> Self {
        Self(dims)
    }
}

impl<const N: usize> Deref for Shape<N> {
    type Target = [usize; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> Index<usize> for Shape<N> {
    type Output = usize;
    fn index(&self, i: usize) -> &usize {
        &self.0[i]
    }
}

impl<const N: usize> PartialEq<[usize; N]> for Shape<N> {
    fn eq(&self, other: &[usize; N]) -> bool {
        &self.0 == other
    }
}

impl<const N: usize> fmt::Display for Shape<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, ")")
    }
}
