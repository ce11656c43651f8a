//! Elementwise operations consumed by [`Tensor::map`](crate::Tensor::map).
//!
//! A functor only ever sees already-indexed scalars: the output slot and one
//! reference per secondary tensor. It never sees a shape or a position, and it
//! may be invoked concurrently from several threads in any order.

use crate::{DType, SignedDType};

/// An operation over one output scalar and `K` input scalars.
///
/// Closures taking `(&mut T)` up to `(&mut T, &T, &T, &T, &T)` implement this
/// trait for the matching `K`.
pub trait Functor<T, const K: usize>: Sync {
    fn call(&self, ret: &mut T, args: [&T; K]);
}

macro_rules! closure_functor {
    (@ref $arg:ident) => { &T };
    ($k:literal; $($arg:ident),*) => {
        impl<T, F> Functor<T, $k> for F
        where
            F: Fn(&mut T $(, closure_functor!(@ref $arg))*) + Sync,
        {
            #[inline]
            fn call(&self, ret: &mut T, args: [&T; $k]) {
                let [$($arg),*] = args;
                self(ret $(, $arg)*)
            }
        }
    };
}

closure_functor!(0;);
closure_functor!(1; a);
closure_functor!(2; a, b);
closure_functor!(3; a, b, c);
closure_functor!(4; a, b, c, d);

/* Nullary */

/// `ret := v`
#[derive(Debug, Clone, Copy)]
pub struct Fill<T>(pub T);

impl<T: DType> Functor<T, 0> for Fill<T> {
    #[inline]
    fn call(&self, ret: &mut T, _: [&T; 0]) {
        *ret = self.0;
    }
}

/* Unary */

/// `ret := -ret`, in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct Negate;

impl<T: SignedDType> Functor<T, 0> for Negate {
    #[inline]
    fn call(&self, ret: &mut T, _: [&T; 0]) {
        *ret = -*ret;
    }
}

/* Binary */

/// `ret := lhs - rhs`
#[derive(Debug, Clone, Copy, Default)]
pub struct Difference;

impl<T: DType> Functor<T, 2> for Difference {
    #[inline]
    fn call(&self, ret: &mut T, [lhs, rhs]: [&T; 2]) {
        *ret = *lhs - *rhs;
    }
}

/// `ret := lhs / rhs`
///
/// Division by zero follows the scalar type: IEEE infinities and NaN for
/// floats, a panic for integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Divide;

impl<T: DType> Functor<T, 2> for Divide {
    #[inline]
    fn call(&self, ret: &mut T, [lhs, rhs]: [&T; 2]) {
        *ret = *lhs / *rhs;
    }
}

/// Fixes the left operand of a binary functor.
#[derive(Debug, Clone, Copy)]
pub struct BindLhs<F, T> {
    lhs: T,
    functor: F,
}

impl<F, T> BindLhs<F, T> {
    pub fn new(lhs: T, functor: F) -> Self {
        Self { lhs, functor }
    }
}

impl<T: DType, F: Functor<T, 2>> Functor<T, 1> for BindLhs<F, T> {
    #[inline]
    fn call(&self, ret: &mut T, [rhs]: [&T; 1]) {
        self.functor.call(ret, [&self.lhs, rhs]);
    }
}

/// Fixes the right operand of a binary functor.
#[derive(Debug, Clone, Copy)]
pub struct BindRhs<F, T> {
    rhs: T,
    functor: F,
}

impl<F, T> BindRhs<F, T> {
    pub fn new(rhs: T, functor: F) -> Self {
        Self { rhs, functor }
    }
}

impl<T: DType, F: Functor<T, 2>> Functor<T, 1> for BindRhs<F, T> {
    #[inline]
    fn call(&self, ret: &mut T, [lhs]: [&T; 1]) {
        self.functor.call(ret, [lhs, &self.rhs]);
    }
}

/* Variadic */

/// `ret := arg0 + arg1 + ... + argK-1`, folded from the left.
///
/// With no inputs the result is `T::ZERO`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

impl<T: DType, const K: usize> Functor<T, K> for Sum {
    #[inline]
    fn call(&self, ret: &mut T, args: [&T; K]) {
        let mut args = args.into_iter();
        *ret = match args.next() {
            Some(first) => args.fold(*first, |acc, x| acc + *x),
            None => T::ZERO,
        };
    }
}

/// `ret := arg0 * arg1 * ... * argK-1`, folded from the left.
///
/// With no inputs the result is `T::ONE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Product;

impl<T: DType, const K: usize> Functor<T, K> for Product {
    #[inline]
    fn call(&self, ret: &mut T, args: [&T; K]) {
        let mut args = args.into_iter();
        *ret = match args.next() {
            Some(first) => args.fold(*first, |acc, x| acc * *x),
            None => T::ONE,
        };
    }
}
