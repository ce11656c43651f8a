use std::{
    fmt,
    ops::{Index, IndexMut},
    slice,
};

use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};

use super::{private::Sealed, Axis, Element, Item, Rank};
use crate::{functor::Functor, DType, Error, Result, Shape};

/// A dense rank `N` tensor.
///
/// A `Tensor<T, N>` holds `shape[0]` elements of type `Tensor<T, N - 1>`, or of
/// `T` when `N == 1`. Every element shares the same sub-shape, the shape with
/// its leading extent removed. The tensor owns all of its nested storage, and
/// `clone` is a deep copy.
pub struct Tensor<T: DType, const N: usize>
where
    Rank<N>: Axis<T>,
{
    pub(crate) dims: Shape<N>,
    pub(crate) data: Vec<Item<T, N>>,
}

impl<T: DType, const N: usize> Tensor<T, N>
where
    Rank<N>: Axis<T>,
{
    /// Create a tensor of the given shape with every scalar at its default value.
    pub fn from_shape(shape: impl Into<Shape<N>>) -> Self {
        let mut tensor = Self::default();
        tensor.resize(shape);
        tensor
    }

    /// Create a tensor with the same shape as `other`, filled with default values.
    pub fn like(other: &Self) -> Self {
        Self::from_shape(other.dims)
    }

    /// Create a tensor filled with some value.
    pub fn full(shape: impl Into<Shape<N>>, v: T) -> Self {
        let mut tensor = Self::from_shape(shape);
        tensor.fill(v);
        tensor
    }

    /// Create a tensor filled with zeros.
    pub fn zeros(shape: impl Into<Shape<N>>) -> Self {
        Self::full(shape, T::ZERO)
    }

    /// Create a tensor filled with ones.
    pub fn ones(shape: impl Into<Shape<N>>) -> Self {
        Self::full(shape, T::ONE)
    }

    /// Create a tensor filled with zeros with the same shape as `self`.
    pub fn zeros_like(&self) -> Self {
        Self::zeros(self.dims)
    }

    #[inline]
    pub fn shape(&self) -> &Shape<N> {
        &self.dims
    }

    pub const fn rank(&self) -> usize {
        N
    }

    /// Extent of the outermost axis.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Change the shape of this tensor. Resizing to the current shape does
    /// nothing; otherwise the outer storage is resized and every element is
    /// resized to the new sub-shape.
    pub fn resize(&mut self, shape: impl Into<Shape<N>>) -> &mut Self {
        let shape = shape.into();
        if shape == self.dims {
            return self;
        }
        tracing::trace!(from = %self.dims, to = %shape, dtype = T::NAME, "resizing tensor");
        self.resize_recurse(shape.dims());
        self
    }

    pub(crate) fn resize_recurse(&mut self, dims: &[usize]) {
        self.dims.copy_from_dims(dims);
        self.data.resize_with(dims[0], Default::default);

        let sub = &dims[1..];
        self.data.par_iter_mut().for_each(|item| item.resize_dims(sub));
    }

    /// Bounds-checked access along the outermost axis.
    pub fn at(&self, i: usize) -> Result<&Item<T, N>> {
        let len = self.data.len();
        self.data
            .get(i)
            .ok_or_else(|| Error::OutOfRange { index: i, len }.bt())
    }

    /// Bounds-checked mutable access along the outermost axis.
    pub fn at_mut(&mut self, i: usize) -> Result<&mut Item<T, N>> {
        let len = self.data.len();
        self.data
            .get_mut(i)
            .ok_or_else(|| Error::OutOfRange { index: i, len }.bt())
    }

    /// Copy every scalar of `other` into `self`. The shapes must match.
    ///
    /// Use this rather than `*slot = other` when writing into a sub-tensor, as
    /// it keeps every element of the parent at the parent's sub-shape.
    pub fn assign(&mut self, other: &Self) -> Result<&mut Self> {
        if self.dims != other.dims {
            return Err(Error::ShapeMismatch {
                op: "assign",
                expected: self.dims.to_vec(),
                got: other.dims.to_vec(),
            }
            .bt());
        }
        for (dst, src) in self.data.iter_mut().zip(&other.data) {
            dst.assign_from(src)?;
        }
        Ok(self)
    }

    /// Unary plus: a copy of `self`.
    pub fn pos(&self) -> Self {
        self.clone()
    }

    pub fn iter(&self) -> slice::Iter<'_, Item<T, N>> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Item<T, N>> {
        self.data.iter_mut()
    }
}

impl<T: DType, const N: usize> Default for Tensor<T, N>
where
    Rank<N>: Axis<T>,
{
    fn default() -> Self {
        Self {
            dims: Shape::default(),
            data: Vec::new(),
        }
    }
}

impl<T: DType, const N: usize> Clone for Tensor<T, N>
where
    Rank<N>: Axis<T>,
{
    fn clone(&self) -> Self {
        Self {
            dims: self.dims,
            data: self.data.clone(),
        }
    }
}

impl<T: DType, const N: usize> PartialEq for Tensor<T, N>
where
    Rank<N>: Axis<T>,
{
    fn eq(&self, rhs: &Self) -> bool {
        self.dims == rhs.dims && self.data == rhs.data
    }
}

impl<T: DType, const N: usize> Index<usize> for Tensor<T, N>
where
    Rank<N>: Axis<T>,
{
    type Output = Item<T, N>;

    #[inline]
    fn index(&self, i: usize) -> &Self::Output {
        &self.data[i]
    }
}

impl<T: DType, const N: usize> IndexMut<usize> for Tensor<T, N>
where
    Rank<N>: Axis<T>,
{
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.data[i]
    }
}

impl<T: DType, const N: usize> fmt::Debug for Tensor<T, N>
where
    Rank<N>: Axis<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("dtype", &T::NAME)
            .field("shape", &self.dims)
            .field("data", &self.data)
            .finish()
    }
}

/// `{a b c}` at rank 1; higher ranks put each sub-tensor on its own line.
impl<T: DType, const N: usize> fmt::Display for Tensor<T, N>
where
    Rank<N>: Axis<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if N > 1 { "\n" } else { " " };
        write!(f, "{{")?;
        for (i, item) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, "{sep}")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "}}")
    }
}

impl<T: DType, const N: usize> Sealed for Tensor<T, N> where Rank<N>: Axis<T> {}

impl<T: DType, const N: usize> Element<T> for Tensor<T, N>
where
    Rank<N>: Axis<T>,
{
    fn resize_dims(&mut self, dims: &[usize]) {
        self.resize_recurse(dims);
    }

    fn assign_from(&mut self, other: &Self) -> Result<()> {
        self.assign(other).map(|_| ())
    }

    fn map_with<F, const K: usize>(&mut self, f: &F, others: [&Self; K])
    where
        F: Functor<T, K>,
    {
        self.map_recurse(f, others);
    }

    fn try_map_with<F, const K: usize>(&mut self, f: &F, others: [&Self; K]) -> Result<()>
    where
        F: Functor<T, K>,
    {
        self.map_recurse_safe(f, others)
    }
}
