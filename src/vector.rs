use crate::buffer::Buffer;
use crate::error::{require, LvError, LvResult};
use crate::shape::VecLayout;
use crate::traits::{StridedVector, VectorLike};
use crate::Scalar;
use std::cell::Cell;
use std::fmt;
use std::ops::Index;

/// Fixed-length vector owning its storage.
///
/// `clone` is a deep copy into a new allocation, while a Rust move keeps the
/// allocation. Views from [`subvector`](StridedVector::subvector) share the
/// storage and keep it alive.
pub struct Vector<T> {
    data: Buffer<T>,
}

/// Strided window into a buffer owned elsewhere.
///
/// `clone` is shallow: both handles address the same elements, so passing a view
/// by value still mutates the caller's data.
#[derive(Clone)]
pub struct VectorView<T> {
    data: Buffer<T>,
    layout: VecLayout,
}

fn check_same_len(op: &'static str, expected: usize, got: usize) -> LvResult<()> {
    if expected != got {
        return Err(LvError::mismatch(op, (expected, 1), (got, 1)));
    }
    Ok(())
}

fn copy_elements<D, S>(dst: &D, src: &S)
where
    D: VectorLike,
    S: VectorLike<Elem = D::Elem>,
{
    for i in 0..dst.size() {
        dst.set(i, src.get(i));
    }
}

impl<T: Scalar> Vector<T> {
    /// Allocates `n` elements, poisoned in debug builds. Panics if `n == 0`.
    #[track_caller]
    pub fn new(n: usize) -> Self {
        require(Self::try_new(n))
    }

    pub fn try_new(n: usize) -> LvResult<Self> {
        if n == 0 {
            return Err(LvError::Empty { kind: "vector" });
        }
        Ok(Self {
            data: Buffer::new(n),
        })
    }

    #[track_caller]
    pub fn from_elem(n: usize, value: T) -> Self {
        if n == 0 {
            require::<()>(Err(LvError::Empty { kind: "vector" }));
        }
        Self {
            data: Buffer::from_elem(n, value),
        }
    }

    #[track_caller]
    pub fn zeros(n: usize) -> Self {
        Self::from_elem(n, T::zero())
    }

    #[track_caller]
    pub fn from_vec(v: Vec<T>) -> Self {
        if v.is_empty() {
            require::<()>(Err(LvError::Empty { kind: "vector" }));
        }
        Self {
            data: Buffer::from_vec(v),
        }
    }

    #[track_caller]
    pub fn from_fn<F>(n: usize, f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self::from_vec((0..n).map(f).collect())
    }

    /// Deep copy of any vector-like value, element `i` from `v.get(i)`.
    #[track_caller]
    pub fn from_like<V>(v: &V) -> Self
    where
        V: VectorLike<Elem = T>,
    {
        Self::from_fn(v.size(), |i| v.get(i))
    }

    /// Elementwise copy of `src` into this vector's existing storage.
    #[track_caller]
    pub fn assign<V>(&mut self, src: &V)
    where
        V: VectorLike<Elem = T>,
    {
        require(self.try_assign(src))
    }

    pub fn try_assign<V>(&mut self, src: &V) -> LvResult<()>
    where
        V: VectorLike<Elem = T>,
    {
        check_same_len("assign", self.size(), src.size())?;
        copy_elements(self, src);
        Ok(())
    }

    /// Takes over the storage of `src` without copying. Lengths must match.
    #[track_caller]
    pub fn adopt(&mut self, src: Vector<T>) {
        require(check_same_len("adopt", self.size(), src.size()));
        self.data = src.data;
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.data.to_vec()
    }
}

impl<T: Scalar> VectorView<T> {
    pub(crate) fn from_parts(data: Buffer<T>, layout: VecLayout) -> Self {
        Self { data, layout }
    }

    /// View of `len` elements of `buffer`, element `i` at `offset + i * stride`.
    #[track_caller]
    pub fn new(buffer: Buffer<T>, len: usize, stride: usize, offset: usize) -> Self {
        require(Self::try_new(buffer, len, stride, offset))
    }

    pub fn try_new(buffer: Buffer<T>, len: usize, stride: usize, offset: usize) -> LvResult<Self> {
        let layout = VecLayout::new(len, stride, offset)?;
        layout.check_within(buffer.len())?;
        Ok(Self::from_parts(buffer, layout))
    }

    /// Copies `src` element by element into the storage this view addresses.
    #[track_caller]
    pub fn assign<V>(&mut self, src: &V)
    where
        V: VectorLike<Elem = T>,
    {
        require(self.try_assign(src))
    }

    pub fn try_assign<V>(&mut self, src: &V) -> LvResult<()>
    where
        V: VectorLike<Elem = T>,
    {
        check_same_len("assign", self.size(), src.size())?;
        copy_elements(self, src);
        Ok(())
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<T: Scalar> Clone for Vector<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.deep_copy(),
        }
    }
}

impl<T: Scalar> VectorLike for Vector<T> {
    type Elem = T;

    #[inline]
    fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn cell(&self, i: usize) -> &Cell<T> {
        check_index!(i, self.data.len());
        &self.data[i]
    }
}

impl<T: Scalar> StridedVector for Vector<T> {
    #[inline]
    fn buffer(&self) -> &Buffer<T> {
        &self.data
    }

    #[inline]
    fn layout(&self) -> VecLayout {
        VecLayout::contiguous(self.data.len())
    }
}

impl<T: Scalar> VectorLike for VectorView<T> {
    type Elem = T;

    #[inline]
    fn size(&self) -> usize {
        self.layout.len
    }

    #[inline]
    fn cell(&self, i: usize) -> &Cell<T> {
        check_index!(i, self.layout.len);
        &self.data[self.layout.index(i)]
    }
}

impl<T: Scalar> StridedVector for VectorView<T> {
    #[inline]
    fn buffer(&self) -> &Buffer<T> {
        &self.data
    }

    #[inline]
    fn layout(&self) -> VecLayout {
        self.layout
    }
}

macro_rules! impl_vector_common {
    ($($ty:ident),*) => {
        $(impl<T: Scalar> Index<usize> for $ty<T> {
            type Output = Cell<T>;

            #[inline]
            fn index(&self, i: usize) -> &Cell<T> {
                self.cell(i)
            }
        }

        impl<T: Scalar, R: VectorLike<Elem = T>> PartialEq<R> for $ty<T> {
            fn eq(&self, other: &R) -> bool {
                self.size() == other.size() && (0..self.size()).all(|i| self.get(i) == other.get(i))
            }
        }

        impl<T: Scalar> fmt::Debug for $ty<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.iter()).finish()
            }
        })*
    };
}

impl_vector_common!(Vector, VectorView);

impl<T: Scalar> From<Vec<T>> for Vector<T> {
    #[track_caller]
    fn from(v: Vec<T>) -> Self {
        Vector::from_vec(v)
    }
}

impl<T: Scalar> From<&VectorView<T>> for Vector<T> {
    fn from(v: &VectorView<T>) -> Self {
        Vector::from_like(v)
    }
}

impl<T: Scalar> From<VectorView<T>> for Vector<T> {
    fn from(v: VectorView<T>) -> Self {
        Vector::from_like(&v)
    }
}

impl<T: Scalar> From<&Vector<T>> for VectorView<T> {
    fn from(v: &Vector<T>) -> Self {
        v.as_view()
    }
}
