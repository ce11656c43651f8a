mod dense;
mod map;
mod ops;

pub use dense::Tensor;

use crate::{functor::Functor, DType, Result};

/// Type-level rank marker.
pub struct Rank<const N: usize>;

/// Selects what a rank `N` tensor holds along its outermost axis: scalars at
/// rank 1, rank `N - 1` tensors above that.
pub trait Axis<T: DType> {
    type Item: Element<T>;
}

/// Element type of a `Tensor<T, N>`.
pub type Item<T, const N: usize> = <Rank<N> as Axis<T>>::Item;

impl<T: DType> Axis<T> for Rank<1> {
    type Item = T;
}

macro_rules! axis {
    ($n:literal => $sub:literal) => {
        impl<T: DType> Axis<T> for Rank<$n> {
            type Item = Tensor<T, $sub>;
        }
    };
}

axis!(2 => 1);
axis!(3 => 2);
axis!(4 => 3);
axis!(5 => 4);
axis!(6 => 5);

pub(crate) mod private {
    pub trait Sealed {}
}

/// Anything stored along the outermost axis of a tensor: a scalar or a tensor
/// one rank lower. The recursion of resize, assignment and map bottoms out in
/// the scalar implementations.
pub trait Element<T>:
    private::Sealed
    + Clone
    + Default
    + PartialEq
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
{
    /// Resize to `dims`, which holds exactly one extent per axis of `Self`.
    fn resize_dims(&mut self, dims: &[usize]);

    fn assign_from(&mut self, other: &Self) -> Result<()>;

    fn map_with<F, const K: usize>(&mut self, f: &F, others: [&Self; K])
    where
        F: Functor<T, K>;

    fn try_map_with<F, const K: usize>(&mut self, f: &F, others: [&Self; K]) -> Result<()>
    where
        F: Functor<T, K>;
}
