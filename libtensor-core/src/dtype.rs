use std::{
    fmt::{Debug, Display},
    ops::{Add, Div, Mul, Neg, Sub},
};

#[cfg(feature = "bfloat")]
use half::bf16;
#[cfg(feature = "half")]
use half::f16;

use crate::{
    functor::Functor,
    tensor::{private::Sealed, Element},
    Result,
};

/// Marker trait for signed datatypes.
pub trait SignedDType: DType + Neg<Output = Self> {}

impl SignedDType for i32 {}
impl SignedDType for i64 {}
impl SignedDType for f32 {}
impl SignedDType for f64 {}
#[cfg(feature = "bfloat")]
impl SignedDType for bf16 {}
#[cfg(feature = "half")]
impl SignedDType for f16 {}

pub trait DTypeOps:
    Copy
    + PartialEq
    + Add<Output = Self>
    + Div<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
{
}

/// Marker trait for tensor datatypes.
pub trait DType:
    Debug + Display + Default + DTypeOps + Send + Sync + Element<Self> + 'static
{
    const ZERO: Self;
    const ONE: Self;
    const NAME: &'static str;
}

/// Scalars are the leaves of every tensor: the functor is invoked directly on them.
macro_rules! scalar_element {
    ($rt:ident) => {
        impl Sealed for $rt {}

        impl Element<$rt> for $rt {
            fn resize_dims(&mut self, _dims: &[usize]) {}

            fn assign_from(&mut self, other: &Self) -> Result<()> {
                *self = *other;
                Ok(())
            }

            #[inline]
            fn map_with<F, const K: usize>(&mut self, f: &F, others: [&Self; K])
            where
                F: Functor<$rt, K>,
            {
                f.call(self, others);
            }

            #[inline]
            fn try_map_with<F, const K: usize>(&mut self, f: &F, others: [&Self; K]) -> Result<()>
            where
                F: Functor<$rt, K>,
            {
                f.call(self, others);
                Ok(())
            }
        }
    };
}

macro_rules! dtype {
    ($rt:ident, $zero:expr, $one:expr) => {
        impl DTypeOps for $rt {}
        impl DType for $rt {
            const ZERO: $rt = $zero;
            const ONE: $rt = $one;
            const NAME: &'static str = stringify!($rt);
        }
        scalar_element!($rt);
    };
}

dtype!(u8, 0u8, 1u8);
dtype!(u32, 0u32, 1u32);
dtype!(i32, 0i32, 1i32);
dtype!(i64, 0i64, 1i64);
dtype!(f32, 0f32, 1f32);
dtype!(f64, 0f64, 1f64);

#[cfg(feature = "half")]
dtype!(f16, f16::from_f64_const(0.0), f16::from_f64_const(1.0));
#[cfg(feature = "bfloat")]
dtype!(bf16, bf16::from_f64_const(0.0), bf16::from_f64_const(1.0));
