use std::ops::{Add, Div, Mul, Neg, Sub};

#[cfg(feature = "bfloat")]
use half::bf16;
#[cfg(feature = "half")]
use half::f16;

use super::{Axis, Rank, Tensor};
use crate::{
    functor::{BindLhs, BindRhs, Difference, Divide, Negate, Product, Sum},
    DType, SignedDType,
};

// Every operator allocates a result shaped like its tensor operand (the left
// one for tensor-tensor forms) and fills it with a single `map`. Tensor-tensor
// forms expect equal shapes, as `map` does.
macro_rules! tensor_binop {
    ($trait:ident, $fn_name:ident, $functor:expr) => {
        impl<T: DType, const N: usize> $trait<&Tensor<T, N>> for &Tensor<T, N>
        where
            Rank<N>: Axis<T>,
        {
            type Output = Tensor<T, N>;
            fn $fn_name(self, rhs: &Tensor<T, N>) -> Self::Output {
                let mut ret = Tensor::like(self);
                ret.map($functor, [self, rhs]);
                ret
            }
        }

        impl<T: DType, const N: usize> $trait for Tensor<T, N>
        where
            Rank<N>: Axis<T>,
        {
            type Output = Tensor<T, N>;
            fn $fn_name(self, rhs: Self) -> Self::Output {
                $trait::$fn_name(&self, &rhs)
            }
        }

        impl<T: DType, const N: usize> $trait<T> for &Tensor<T, N>
        where
            Rank<N>: Axis<T>,
        {
            type Output = Tensor<T, N>;
            fn $fn_name(self, rhs: T) -> Self::Output {
                let mut ret = Tensor::like(self);
                ret.map(BindRhs::new(rhs, $functor), [self]);
                ret
            }
        }

        impl<T: DType, const N: usize> $trait<T> for Tensor<T, N>
        where
            Rank<N>: Axis<T>,
        {
            type Output = Tensor<T, N>;
            fn $fn_name(self, rhs: T) -> Self::Output {
                $trait::$fn_name(&self, rhs)
            }
        }
    };
}

tensor_binop!(Add, add, Sum);
tensor_binop!(Sub, sub, Difference);
tensor_binop!(Mul, mul, Product);
tensor_binop!(Div, div, Divide);

/// `scalar op tensor` has to be spelled out per scalar type.
macro_rules! scalar_lhs_binop {
    ($rt:ty, $trait:ident, $fn_name:ident, $functor:expr) => {
        impl<const N: usize> $trait<&Tensor<$rt, N>> for $rt
        where
            Rank<N>: Axis<$rt>,
        {
            type Output = Tensor<$rt, N>;
            fn $fn_name(self, rhs: &Tensor<$rt, N>) -> Self::Output {
                let mut ret = Tensor::like(rhs);
                ret.map(BindLhs::new(self, $functor), [rhs]);
                ret
            }
        }

        impl<const N: usize> $trait<Tensor<$rt, N>> for $rt
        where
            Rank<N>: Axis<$rt>,
        {
            type Output = Tensor<$rt, N>;
            fn $fn_name(self, rhs: Tensor<$rt, N>) -> Self::Output {
                $trait::$fn_name(self, &rhs)
            }
        }
    };
}

macro_rules! scalar_lhs_ops {
    ($rt:ty) => {
        scalar_lhs_binop!($rt, Add, add, Sum);
        scalar_lhs_binop!($rt, Sub, sub, Difference);
        scalar_lhs_binop!($rt, Mul, mul, Product);
        scalar_lhs_binop!($rt, Div, div, Divide);
    };
}

scalar_lhs_ops!(u8);
scalar_lhs_ops!(u32);
scalar_lhs_ops!(i32);
scalar_lhs_ops!(i64);
scalar_lhs_ops!(f32);
scalar_lhs_ops!(f64);
#[cfg(feature = "half")]
scalar_lhs_ops!(f16);
#[cfg(feature = "bfloat")]
scalar_lhs_ops!(bf16);

impl<T: SignedDType, const N: usize> Neg for &Tensor<T, N>
where
    Rank<N>: Axis<T>,
{
    type Output = Tensor<T, N>;
    fn neg(self) -> Self::Output {
        let mut ret = self.clone();
        ret.map(Negate, []);
        ret
    }
}

impl<T: SignedDType, const N: usize> Neg for Tensor<T, N>
where
    Rank<N>: Axis<T>,
{
    type Output = Tensor<T, N>;
    fn neg(mut self) -> Self::Output {
        self.map(Negate, []);
        self
    }
}
