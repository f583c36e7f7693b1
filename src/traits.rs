use crate::buffer::Buffer;
use crate::error::{require, LvResult};
use crate::shape::{MatLayout, VecLayout};
use crate::{Matrix, MatrixView, Scalar, Vector, VectorView};
use std::cell::Cell;

/// Anything with a length and indexable elements.
///
/// The generic operations only ever see this contract, so owning vectors, views
/// and user types are interchangeable.
pub trait VectorLike {
    type Elem: Scalar;

    fn size(&self) -> usize;

    /// Storage slot of logical element `i`.
    fn cell(&self, i: usize) -> &Cell<Self::Elem>;

    #[inline]
    fn get(&self, i: usize) -> Self::Elem {
        self.cell(i).get()
    }

    #[inline]
    fn set(&self, i: usize, v: Self::Elem) {
        self.cell(i).set(v)
    }

    fn fill(&self, v: Self::Elem) {
        for i in 0..self.size() {
            self.set(i, v);
        }
    }

    fn iter(&self) -> Elements<'_, Self>
    where
        Self: Sized,
    {
        Elements {
            v: self,
            front: 0,
            back: self.size(),
        }
    }

    /// Deep copy into a fresh owning vector, in logical order.
    fn to_vector(&self) -> Vector<Self::Elem>
    where
        Self: Sized,
    {
        Vector::from_like(self)
    }
}

/// Anything with a row/column shape and indexable elements.
pub trait MatrixLike {
    type Elem: Scalar;

    fn num_rows(&self) -> usize;

    fn num_columns(&self) -> usize;

    fn cell(&self, i: usize, j: usize) -> &Cell<Self::Elem>;

    #[inline]
    fn size(&self) -> usize {
        self.num_rows() * self.num_columns()
    }

    #[inline]
    fn dims(&self) -> (usize, usize) {
        (self.num_rows(), self.num_columns())
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> Self::Elem {
        self.cell(i, j).get()
    }

    #[inline]
    fn set(&self, i: usize, j: usize, v: Self::Elem) {
        self.cell(i, j).set(v)
    }

    fn fill(&self, v: Self::Elem) {
        for j in 0..self.num_columns() {
            for i in 0..self.num_rows() {
                self.set(i, j, v);
            }
        }
    }

    fn to_matrix(&self) -> Matrix<Self::Elem>
    where
        Self: Sized,
    {
        Matrix::from_like(self)
    }
}

/// Vectors backed by a [`Buffer`] with a stride and offset; views derive from these.
pub trait StridedVector: VectorLike {
    fn buffer(&self) -> &Buffer<Self::Elem>;

    fn layout(&self) -> VecLayout;

    #[inline]
    fn stride(&self) -> usize {
        self.layout().stride()
    }

    #[inline]
    fn offset(&self) -> usize {
        self.layout().offset()
    }

    /// Address of logical element 0.
    fn as_ptr(&self) -> *const Self::Elem {
        self.buffer().ptr_at(self.layout().offset())
    }

    /// Shallow view over the same elements.
    fn as_view(&self) -> VectorView<Self::Elem> {
        VectorView::from_parts(self.buffer().clone(), self.layout())
    }

    fn try_subvector(
        &self,
        start: usize,
        end: usize,
        stride: usize,
    ) -> LvResult<VectorView<Self::Elem>> {
        let layout = self.layout().subrange(start, end, stride)?;
        Ok(VectorView::from_parts(self.buffer().clone(), layout))
    }

    /// Elements `start..end` as a view aliasing this vector's storage.
    #[track_caller]
    fn subvector(&self, start: usize, end: usize) -> VectorView<Self::Elem> {
        require(self.try_subvector(start, end, 1))
    }

    /// Elements `start, start + stride, ..` below `end`.
    #[track_caller]
    fn subvector_strided(&self, start: usize, end: usize, stride: usize) -> VectorView<Self::Elem> {
        require(self.try_subvector(start, end, stride))
    }
}

/// Column-major matrices backed by a [`Buffer`] with a leading dimension and offset.
pub trait StridedMatrix: MatrixLike {
    fn buffer(&self) -> &Buffer<Self::Elem>;

    fn layout(&self) -> MatLayout;

    #[inline]
    fn ldim(&self) -> usize {
        self.layout().ldim()
    }

    #[inline]
    fn offset(&self) -> usize {
        self.layout().offset()
    }

    fn as_ptr(&self) -> *const Self::Elem {
        self.buffer().ptr_at(self.layout().offset())
    }

    fn as_view(&self) -> MatrixView<Self::Elem> {
        MatrixView::from_parts(self.buffer().clone(), self.layout())
    }

    fn try_submatrix(
        &self,
        i1: usize,
        i2: usize,
        j1: usize,
        j2: usize,
    ) -> LvResult<MatrixView<Self::Elem>> {
        let layout = self.layout().submatrix(i1, i2, j1, j2)?;
        Ok(MatrixView::from_parts(self.buffer().clone(), layout))
    }

    /// Rows `i1..i2`, columns `j1..j2`.
    #[track_caller]
    fn submatrix(&self, i1: usize, i2: usize, j1: usize, j2: usize) -> MatrixView<Self::Elem> {
        require(self.try_submatrix(i1, i2, j1, j2))
    }

    fn try_row(&self, i: usize) -> LvResult<VectorView<Self::Elem>> {
        let layout = self.layout().row(i)?;
        Ok(VectorView::from_parts(self.buffer().clone(), layout))
    }

    #[track_caller]
    fn row(&self, i: usize) -> VectorView<Self::Elem> {
        require(self.try_row(i))
    }

    fn try_column(&self, j: usize) -> LvResult<VectorView<Self::Elem>> {
        let layout = self.layout().column(j)?;
        Ok(VectorView::from_parts(self.buffer().clone(), layout))
    }

    #[track_caller]
    fn column(&self, j: usize) -> VectorView<Self::Elem> {
        require(self.try_column(j))
    }
}

/// Iterator over the values of a [`VectorLike`], in index order.
pub struct Elements<'a, V> {
    v: &'a V,
    front: usize,
    back: usize,
}

impl<'a, V: VectorLike> Iterator for Elements<'a, V> {
    type Item = V::Elem;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let x = self.v.get(self.front);
        self.front += 1;
        Some(x)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<'a, V: VectorLike> DoubleEndedIterator for Elements<'a, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.v.get(self.back))
    }
}

impl<'a, V: VectorLike> ExactSizeIterator for Elements<'a, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    // A type outside the crate's own kinds that satisfies the contract.
    struct Ramp {
        cells: Vec<Cell<i64>>,
    }

    impl VectorLike for Ramp {
        type Elem = i64;

        fn size(&self) -> usize {
            self.cells.len()
        }

        fn cell(&self, i: usize) -> &Cell<i64> {
            &self.cells[i]
        }
    }

    #[test]
    fn test_foreign_vector_like() {
        let r = Ramp {
            cells: (0..4).map(Cell::new).collect(),
        };
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(r.iter().rev().collect::<Vec<_>>(), vec![3, 2, 1, 0]);
        let v = r.to_vector();
        assert_eq!(v, vector![0i64, 1, 2, 3]);
        r.set(0, 9);
        assert_eq!(v.get(0), 0);
        assert_eq!(r.iter().len(), 4);
    }

    #[test]
    fn test_fill() {
        let v = vector![1, 2, 3];
        v.subvector(1, 3).fill(0);
        assert_eq!(v, vector![1, 0, 0]);

        let a = matrix![[1, 2], [3, 4]];
        a.column(1).fill(7);
        a.submatrix(1, 2, 0, 1).fill(5);
        assert_eq!(a, matrix![[1, 7], [5, 7]]);
    }

    #[test]
    fn test_strided_accessors() {
        let a = Matrix::<f64>::zeros(4, 3);
        let s = a.submatrix(1, 3, 1, 3);
        assert_eq!(s.ldim(), 4);
        assert_eq!(s.offset(), 5);
        assert_eq!(s.as_ptr(), unsafe { a.as_ptr().add(5) });
        let r = s.row(1);
        assert_eq!(r.stride(), 4);
        assert_eq!(r.offset(), 6);
        assert!(s.try_row(2).is_err());
        assert!(s.try_column(5).is_err());
        assert!(a.try_submatrix(0, 5, 0, 1).is_err());
    }
}
