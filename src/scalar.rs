use half::f16;
use num_traits::{NumAssign, NumCast};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::fmt;

/// Arithmetic element types that vectors and matrices can hold.
pub trait Scalar: NumAssign + NumCast + Copy + PartialOrd + fmt::Debug + fmt::Display + 'static {
    /// Value written into freshly allocated storage in debug builds.
    fn poison() -> Self;

    /// Draws one value: uniform over `0..=100` for integers, standard normal for floats.
    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

macro_rules! impl_int_scalar {
    ($($e:ident),*) => {
        $(impl Scalar for $e {
            #[inline]
            fn poison() -> Self {
                0
            }

            fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
                rng.gen_range(0..=100)
            }
        })*
    };
}

macro_rules! impl_float_scalar {
    ($($e:ident),*) => {
        $(impl Scalar for $e {
            #[inline]
            fn poison() -> Self {
                $e::NAN
            }

            fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
                <StandardNormal as Distribution<$e>>::sample(&StandardNormal, rng)
            }
        })*
    };
}

impl_int_scalar!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
impl_float_scalar!(f32, f64);

impl Scalar for f16 {
    #[inline]
    fn poison() -> Self {
        f16::NAN
    }

    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        <StandardNormal as Distribution<f16>>::sample(&StandardNormal, rng)
    }
}
