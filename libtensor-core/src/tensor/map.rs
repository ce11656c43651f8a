use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};

use super::{Axis, Element, Rank, Tensor};
use crate::{
    functor::{Fill, Functor},
    DType, Error, Result,
};

impl<T: DType, const N: usize> Tensor<T, N>
where
    Rank<N>: Axis<T>,
{
    /// Apply `f` once per scalar position of `self`, passing the scalars found
    /// at the same position in each of `others`.
    ///
    /// The outermost axis is traversed in parallel at every level, so `f` is
    /// called in no particular order.
    ///
    /// Every tensor in `others` must have the shape of `self`. This is not
    /// checked. A secondary that is shorter than `self` along some axis panics
    /// on the first out-of-bounds index, possibly after part of `self` has been
    /// written. A longer one is silently read as its leading prefix. Use
    /// [`Tensor::map_safe`] when the shapes are not already known to agree.
    ///
    /// ```
    /// use libtensor_core::{functor::Sum, Tensor};
    ///
    /// let a = Tensor::<f64, 2>::full([2, 3], 1.0);
    /// let b = Tensor::<f64, 2>::full([2, 3], 2.0);
    /// let mut out = Tensor::like(&a);
    /// out.map(Sum, [&a, &b, &b]);
    /// assert_eq!(out, Tensor::full([2, 3], 5.0));
    /// ```
    pub fn map<F, const K: usize>(&mut self, f: F, others: [&Self; K]) -> &mut Self
    where
        F: Functor<T, K>,
    {
        self.map_recurse(&f, others);
        self
    }

    /// Checked counterpart of [`Tensor::map`].
    ///
    /// Fails before touching `self` if any of `others` has a different shape,
    /// and uses checked indexing during the traversal.
    pub fn map_safe<F, const K: usize>(&mut self, f: F, others: [&Self; K]) -> Result<&mut Self>
    where
        F: Functor<T, K>,
    {
        if let Some(other) = others.iter().find(|other| other.dims != self.dims) {
            tracing::debug!(expected = %self.dims, got = %other.dims, "map_safe rejected operand");
            return Err(Error::ShapeMismatch {
                op: "map_safe",
                expected: self.dims.to_vec(),
                got: other.dims.to_vec(),
            }
            .bt());
        }
        self.map_recurse_safe(&f, others)?;
        Ok(self)
    }

    /// Set every scalar to `v`.
    pub fn fill(&mut self, v: T) -> &mut Self {
        self.map(Fill(v), [])
    }

    pub(crate) fn map_recurse<F, const K: usize>(&mut self, f: &F, others: [&Self; K])
    where
        F: Functor<T, K>,
    {
        self.data.par_iter_mut().enumerate().for_each(|(i, item)| {
            item.map_with(f, others.map(|other| &other.data[i]));
        });
    }

    pub(crate) fn map_recurse_safe<F, const K: usize>(
        &mut self,
        f: &F,
        others: [&Self; K],
    ) -> Result<()>
    where
        F: Functor<T, K>,
    {
        self.data
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(i, item)| {
                for other in others.iter() {
                    if i >= other.data.len() {
                        return Err(Error::OutOfRange {
                            index: i,
                            len: other.data.len(),
                        }
                        .bt());
                    }
                }
                item.try_map_with(f, others.map(|other| &other.data[i]))
            })
    }
}
