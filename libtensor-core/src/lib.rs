//! libtensor is a small dense tensor library for simulation codes.
//!
//! A [`Tensor<T, N>`] has a rank fixed at compile time and is stored recursively: a rank `N`
//! tensor owns a sequence of rank `N - 1` tensors, down to a sequence of scalars at rank 1.
//! All elementwise work goes through one traversal, [`Tensor::map`], which walks the outermost
//! axis of every level in parallel and hands matching scalars of the output and of any number of
//! input tensors to a [`Functor`](functor::Functor).
//!
//! ## A quick guide
//! - Describe extents with a [`Shape`], or simply an array like `[rows, cols]`.
//! - Create tensors with [`Tensor::from_shape`], [`Tensor::full`] or [`Tensor::like`].
//! - Combine tensors with `+ - * /`, or call [`Tensor::map`] with one of the functors in
//!   [`functor`] or with a closure. Use [`Tensor::map_safe`] when shapes are not known to agree.
//! - Run 3x3 stencils on rank 2 tensors with [`conv2d`] or [`conv2d_with`].
//! - Bound the threads used with [`Parallelism::install`].
//!
//! ## What can you do with it?
//! ```
//! use libtensor_core::{conv2d, functor::Sum, Tensor};
//!
//! let a = Tensor::<f32, 2>::full([3, 4], 1.0);
//! let b = Tensor::<f32, 2>::full([3, 4], 2.0);
//! let c = Tensor::<f32, 2>::full([3, 4], 3.0);
//! let res = &(&a * &b) + &c;
//! assert_eq!(res, Tensor::full([3, 4], 5.0));
//!
//! let mut total = Tensor::like(&a);
//! total.map(Sum, [&a, &b, &c, &res]);
//! assert_eq!(total[2][3], 11.0);
//!
//! let mut laplace = Tensor::<f32, 2>::zeros([3, 3]);
//! laplace[0][1] = 1.0;
//! laplace[1][0] = 1.0;
//! laplace[1][1] = -4.0;
//! laplace[1][2] = 1.0;
//! laplace[2][1] = 1.0;
//! let mut out = Tensor::like(&a);
//! conv2d(&a, &laplace, &mut out).unwrap();
//! assert_eq!(out, Tensor::zeros([3, 4]));
//! ```

mod config;
mod dtype;
mod error;
mod filter;
pub mod functor;
mod shape;
mod tensor;

pub use config::{Parallelism, NUM_THREADS_ENV};
pub use dtype::{DType, DTypeOps, SignedDType};
pub use error::{Context, Error, ErrorKind, Result};
pub use filter::{conv2d, conv2d_with, BorderType};
pub use shape::Shape;
pub use tensor::{Axis, Element, Item, Rank, Tensor};
