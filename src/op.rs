use crate::error::{require, LvError, LvResult};
use crate::traits::{MatrixLike, VectorLike};
use crate::{Matrix, MatrixView, Scalar, Vector, VectorView};
use half::f16;
use num_traits::{Float, Zero};
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

#[inline]
fn check_len(op: &'static str, expected: usize, got: usize) -> LvResult<()> {
    if expected != got {
        return Err(LvError::mismatch(op, (expected, 1), (got, 1)));
    }
    Ok(())
}

#[inline]
fn check_dims(op: &'static str, expected: (usize, usize), got: (usize, usize)) -> LvResult<()> {
    if expected != got {
        return Err(LvError::mismatch(op, expected, got));
    }
    Ok(())
}

#[track_caller]
fn zip_into<V1, V2, V3, F>(op: &'static str, v1: &V1, v2: &V2, result: &mut V3, f: F)
where
    V1: VectorLike,
    V2: VectorLike<Elem = V1::Elem>,
    V3: VectorLike<Elem = V1::Elem>,
    F: Fn(V1::Elem, V1::Elem) -> V1::Elem,
{
    require(check_len(op, v1.size(), v2.size()));
    require(check_len(op, v1.size(), result.size()));
    for i in 0..v1.size() {
        result.set(i, f(v1.get(i), v2.get(i)));
    }
}

#[track_caller]
fn zip_matrix_into<M1, M2, M3, F>(op: &'static str, a: &M1, b: &M2, result: &mut M3, f: F)
where
    M1: MatrixLike,
    M2: MatrixLike<Elem = M1::Elem>,
    M3: MatrixLike<Elem = M1::Elem>,
    F: Fn(M1::Elem, M1::Elem) -> M1::Elem,
{
    require(check_dims(op, a.dims(), b.dims()));
    require(check_dims(op, a.dims(), result.dims()));
    for j in 0..a.num_columns() {
        for i in 0..a.num_rows() {
            result.set(i, j, f(a.get(i, j), b.get(i, j)));
        }
    }
}

/// `result = v1 + v2`; all three lengths must agree.
#[track_caller]
pub fn add<V1, V2, V3>(v1: &V1, v2: &V2, result: &mut V3)
where
    V1: VectorLike,
    V2: VectorLike<Elem = V1::Elem>,
    V3: VectorLike<Elem = V1::Elem>,
{
    zip_into("add", v1, v2, result, |x, y| x + y)
}

/// `result = v1 - v2`.
#[track_caller]
pub fn sub<V1, V2, V3>(v1: &V1, v2: &V2, result: &mut V3)
where
    V1: VectorLike,
    V2: VectorLike<Elem = V1::Elem>,
    V3: VectorLike<Elem = V1::Elem>,
{
    zip_into("sub", v1, v2, result, |x, y| x - y)
}

/// `result = alpha * v`.
#[track_caller]
pub fn scale<V1, V2>(v: &V1, alpha: V1::Elem, result: &mut V2)
where
    V1: VectorLike,
    V2: VectorLike<Elem = V1::Elem>,
{
    require(check_len("scale", v.size(), result.size()));
    for i in 0..v.size() {
        result.set(i, v.get(i) * alpha);
    }
}

/// Sum of `v1[i] * v2[i]`, accumulated in index order.
#[track_caller]
pub fn dot<V1, V2>(v1: &V1, v2: &V2) -> V1::Elem
where
    V1: VectorLike,
    V2: VectorLike<Elem = V1::Elem>,
{
    require(check_len("dot", v1.size(), v2.size()));
    let mut acc = V1::Elem::zero();
    for i in 0..v1.size() {
        acc += v1.get(i) * v2.get(i);
    }
    acc
}

/// Euclidean norm.
pub fn norm<V>(v: &V) -> V::Elem
where
    V: VectorLike,
    V::Elem: Float,
{
    dot(v, v).sqrt()
}

/// Frobenius norm, summed column by column.
pub fn frobenius_norm<M>(a: &M) -> M::Elem
where
    M: MatrixLike,
    M::Elem: Float,
{
    let mut acc = M::Elem::zero();
    for j in 0..a.num_columns() {
        for i in 0..a.num_rows() {
            let x = a.get(i, j);
            acc += x * x;
        }
    }
    acc.sqrt()
}

/// `result = a * v`. Each entry of `result` is recomputed from zero.
///
/// `result` must not alias `a` or `v`.
#[track_caller]
pub fn matvec<M, V1, V2>(a: &M, v: &V1, result: &mut V2)
where
    M: MatrixLike,
    V1: VectorLike<Elem = M::Elem>,
    V2: VectorLike<Elem = M::Elem>,
{
    require(check_len("matvec", a.num_columns(), v.size()));
    require(check_len("matvec", a.num_rows(), result.size()));
    for i in 0..a.num_rows() {
        let mut acc = M::Elem::zero();
        for j in 0..a.num_columns() {
            acc += a.get(i, j) * v.get(j);
        }
        result.set(i, acc);
    }
}

/// `result = a * b` by the triple loop, each entry accumulated from zero.
///
/// `result` must not alias `a` or `b`.
#[track_caller]
pub fn matmul<M1, M2, M3>(a: &M1, b: &M2, result: &mut M3)
where
    M1: MatrixLike,
    M2: MatrixLike<Elem = M1::Elem>,
    M3: MatrixLike<Elem = M1::Elem>,
{
    require(check_len("matmul", a.num_columns(), b.num_rows()));
    require(check_dims(
        "matmul",
        (a.num_rows(), b.num_columns()),
        result.dims(),
    ));
    log::debug!(
        "matmul {}x{} * {}x{}",
        a.num_rows(),
        a.num_columns(),
        b.num_rows(),
        b.num_columns()
    );
    for j in 0..b.num_columns() {
        for i in 0..a.num_rows() {
            let mut acc = M1::Elem::zero();
            for k in 0..a.num_columns() {
                acc += a.get(i, k) * b.get(k, j);
            }
            result.set(i, j, acc);
        }
    }
}

/// New matrix with rows and columns swapped.
pub fn transpose<M: MatrixLike>(a: &M) -> Matrix<M::Elem> {
    let mut result = Matrix::new(a.num_columns(), a.num_rows());
    transpose_into(a, &mut result);
    result
}

/// `result(j, i) = a(i, j)`; `result` must be `cols x rows` of `a`.
#[track_caller]
pub fn transpose_into<M1, M2>(a: &M1, result: &mut M2)
where
    M1: MatrixLike,
    M2: MatrixLike<Elem = M1::Elem>,
{
    require(check_dims(
        "transpose",
        (a.num_columns(), a.num_rows()),
        result.dims(),
    ));
    for j in 0..a.num_columns() {
        for i in 0..a.num_rows() {
            result.set(j, i, a.get(i, j));
        }
    }
}

/// `result = a + b`, elementwise.
#[track_caller]
pub fn matrix_add<M1, M2, M3>(a: &M1, b: &M2, result: &mut M3)
where
    M1: MatrixLike,
    M2: MatrixLike<Elem = M1::Elem>,
    M3: MatrixLike<Elem = M1::Elem>,
{
    zip_matrix_into("matrix_add", a, b, result, |x, y| x + y)
}

/// `result = a - b`, elementwise.
#[track_caller]
pub fn matrix_sub<M1, M2, M3>(a: &M1, b: &M2, result: &mut M3)
where
    M1: MatrixLike,
    M2: MatrixLike<Elem = M1::Elem>,
    M3: MatrixLike<Elem = M1::Elem>,
{
    zip_matrix_into("matrix_sub", a, b, result, |x, y| x - y)
}

macro_rules! impl_vector_binary_op {
    ($trt:ident, $mth:ident, $atrt:ident, $amth:ident, $f:ident) => {
        impl_vector_binary_op!(@impl $trt, $mth, $atrt, $amth, $f, Vector);
        impl_vector_binary_op!(@impl $trt, $mth, $atrt, $amth, $f, VectorView);
    };
    (@impl $trt:ident, $mth:ident, $atrt:ident, $amth:ident, $f:ident, $ty:ident) => {
        impl<T: Scalar, R: VectorLike<Elem = T>> $trt<&R> for &$ty<T> {
            type Output = Vector<T>;

            #[track_caller]
            fn $mth(self, rhs: &R) -> Vector<T> {
                let mut out = Vector::new(self.size());
                $f(self, rhs, &mut out);
                out
            }
        }

        impl<T: Scalar, R: VectorLike<Elem = T>> $trt<&R> for $ty<T> {
            type Output = Vector<T>;

            #[track_caller]
            fn $mth(self, rhs: &R) -> Vector<T> {
                (&self).$mth(rhs)
            }
        }

        impl<T: Scalar, R: VectorLike<Elem = T>> $atrt<&R> for $ty<T> {
            #[track_caller]
            fn $amth(&mut self, rhs: &R) {
                require(check_len(stringify!($amth), self.size(), rhs.size()));
                for i in 0..self.size() {
                    let mut x = self.get(i);
                    x.$amth(rhs.get(i));
                    self.set(i, x);
                }
            }
        }
    };
}

impl_vector_binary_op!(Add, add, AddAssign, add_assign, add);
impl_vector_binary_op!(Sub, sub, SubAssign, sub_assign, sub);

macro_rules! impl_vector_scale_op {
    ($($ty:ident),*) => {
        $(impl<T: Scalar> Mul<T> for &$ty<T> {
            type Output = Vector<T>;

            fn mul(self, alpha: T) -> Vector<T> {
                let mut out = Vector::new(self.size());
                scale(self, alpha, &mut out);
                out
            }
        }

        impl<T: Scalar> Mul<T> for $ty<T> {
            type Output = Vector<T>;

            fn mul(self, alpha: T) -> Vector<T> {
                &self * alpha
            }
        }

        impl<T: Scalar> MulAssign<T> for $ty<T> {
            fn mul_assign(&mut self, alpha: T) {
                for i in 0..self.size() {
                    self.set(i, self.get(i) * alpha);
                }
            }
        })*
    };
}

impl_vector_scale_op!(Vector, VectorView);

// scalar on the left: one impl per concrete element type
macro_rules! impl_scalar_lhs_mul {
    ($($s:ty),*) => {
        $(impl Mul<&Vector<$s>> for $s {
            type Output = Vector<$s>;

            fn mul(self, v: &Vector<$s>) -> Vector<$s> {
                v * self
            }
        }

        impl Mul<&VectorView<$s>> for $s {
            type Output = Vector<$s>;

            fn mul(self, v: &VectorView<$s>) -> Vector<$s> {
                v * self
            }
        })*
    };
}

impl_scalar_lhs_mul!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64, f16);

macro_rules! impl_matrix_binary_op {
    ($trt:ident, $mth:ident, $atrt:ident, $amth:ident, $f:ident) => {
        impl_matrix_binary_op!(@impl $trt, $mth, $atrt, $amth, $f, Matrix);
        impl_matrix_binary_op!(@impl $trt, $mth, $atrt, $amth, $f, MatrixView);
    };
    (@impl $trt:ident, $mth:ident, $atrt:ident, $amth:ident, $f:ident, $ty:ident) => {
        impl<T: Scalar, M: MatrixLike<Elem = T>> $trt<&M> for &$ty<T> {
            type Output = Matrix<T>;

            #[track_caller]
            fn $mth(self, rhs: &M) -> Matrix<T> {
                let mut out = Matrix::new(self.num_rows(), self.num_columns());
                $f(self, rhs, &mut out);
                out
            }
        }

        impl<T: Scalar, M: MatrixLike<Elem = T>> $atrt<&M> for $ty<T> {
            #[track_caller]
            fn $amth(&mut self, rhs: &M) {
                require(check_dims(stringify!($amth), self.dims(), rhs.dims()));
                for j in 0..self.num_columns() {
                    for i in 0..self.num_rows() {
                        let mut x = self.get(i, j);
                        x.$amth(rhs.get(i, j));
                        self.set(i, j, x);
                    }
                }
            }
        }
    };
}

impl_matrix_binary_op!(Add, add, AddAssign, add_assign, matrix_add);
impl_matrix_binary_op!(Sub, sub, SubAssign, sub_assign, matrix_sub);

macro_rules! impl_matvec_op {
    ($($lhs:ident * $rhs:ident),*) => {
        $(impl<T: Scalar> Mul<&$rhs<T>> for &$lhs<T> {
            type Output = Vector<T>;

            #[track_caller]
            fn mul(self, v: &$rhs<T>) -> Vector<T> {
                let mut out = Vector::new(self.num_rows());
                matvec(self, v, &mut out);
                out
            }
        })*
    };
}

impl_matvec_op!(
    Matrix * Vector,
    Matrix * VectorView,
    MatrixView * Vector,
    MatrixView * VectorView
);

macro_rules! impl_matmul_op {
    ($($lhs:ident * $rhs:ident),*) => {
        $(impl<T: Scalar> Mul<&$rhs<T>> for &$lhs<T> {
            type Output = Matrix<T>;

            #[track_caller]
            fn mul(self, b: &$rhs<T>) -> Matrix<T> {
                let mut out = Matrix::new(self.num_rows(), b.num_columns());
                matmul(self, b, &mut out);
                out
            }
        })*
    };
}

impl_matmul_op!(
    Matrix * Matrix,
    Matrix * MatrixView,
    MatrixView * Matrix,
    MatrixView * MatrixView
);
