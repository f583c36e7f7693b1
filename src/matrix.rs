use crate::buffer::Buffer;
use crate::error::{require, LvError, LvResult};
use crate::shape::MatLayout;
use crate::traits::{MatrixLike, StridedMatrix};
use crate::Scalar;
use std::cell::Cell;
use std::fmt;
use std::ops::Index;

/// Column-major `rows x cols` matrix owning its storage; leading dimension is `rows`.
///
/// Same copy rules as [`Vector`](crate::Vector): `clone` is deep, moves are shallow.
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Buffer<T>,
}

/// Rectangular window into column-major storage owned elsewhere.
///
/// Element `(i, j)` lives at `offset + i + j * ldim` of the shared buffer. `clone`
/// only adds another alias.
#[derive(Clone)]
pub struct MatrixView<T> {
    data: Buffer<T>,
    layout: MatLayout,
}

fn check_same_dims(op: &'static str, expected: (usize, usize), got: (usize, usize)) -> LvResult<()> {
    if expected != got {
        return Err(LvError::mismatch(op, expected, got));
    }
    Ok(())
}

fn copy_elements<D, S>(dst: &D, src: &S)
where
    D: MatrixLike,
    S: MatrixLike<Elem = D::Elem>,
{
    for j in 0..dst.num_columns() {
        for i in 0..dst.num_rows() {
            dst.set(i, j, src.get(i, j));
        }
    }
}

fn check_nonempty(rows: usize, cols: usize) -> LvResult<()> {
    if rows == 0 || cols == 0 {
        return Err(LvError::Empty { kind: "matrix" });
    }
    Ok(())
}

impl<T: Scalar> Matrix<T> {
    /// Allocates `m * n` elements, poisoned in debug builds.
    #[track_caller]
    pub fn new(m: usize, n: usize) -> Self {
        require(Self::try_new(m, n))
    }

    pub fn try_new(m: usize, n: usize) -> LvResult<Self> {
        check_nonempty(m, n)?;
        Ok(Self {
            rows: m,
            cols: n,
            data: Buffer::new(m * n),
        })
    }

    #[track_caller]
    pub fn from_elem(m: usize, n: usize, value: T) -> Self {
        require(check_nonempty(m, n));
        Self {
            rows: m,
            cols: n,
            data: Buffer::from_elem(m * n, value),
        }
    }

    #[track_caller]
    pub fn zeros(m: usize, n: usize) -> Self {
        Self::from_elem(m, n, T::zero())
    }

    /// Takes `v` as column-major storage of an `m x n` matrix.
    pub fn try_from_col_major(m: usize, n: usize, v: Vec<T>) -> LvResult<Self> {
        check_nonempty(m, n)?;
        if v.len() != m * n {
            return Err(LvError::mismatch("from_col_major", (m * n, 1), (v.len(), 1)));
        }
        Ok(Self {
            rows: m,
            cols: n,
            data: Buffer::from_vec(v),
        })
    }

    #[track_caller]
    pub fn from_col_major(m: usize, n: usize, v: Vec<T>) -> Self {
        require(Self::try_from_col_major(m, n, v))
    }

    /// Builds from rows given in reading order.
    #[track_caller]
    pub fn from_rows<const N: usize>(rows: &[[T; N]]) -> Self {
        Self::from_fn(rows.len(), N, |i, j| rows[i][j])
    }

    /// Element `(i, j)` from `f(i, j)`, evaluated column by column.
    #[track_caller]
    pub fn from_fn<F>(m: usize, n: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut v = Vec::with_capacity(m * n);
        for j in 0..n {
            for i in 0..m {
                v.push(f(i, j));
            }
        }
        Self::from_col_major(m, n, v)
    }

    /// Deep copy of any matrix-like value.
    #[track_caller]
    pub fn from_like<M>(m: &M) -> Self
    where
        M: MatrixLike<Elem = T>,
    {
        Self::from_fn(m.num_rows(), m.num_columns(), |i, j| m.get(i, j))
    }

    #[track_caller]
    pub fn assign<M>(&mut self, src: &M)
    where
        M: MatrixLike<Elem = T>,
    {
        require(self.try_assign(src))
    }

    /// Elementwise copy of `src` into the existing storage; shapes must match.
    pub fn try_assign<M>(&mut self, src: &M) -> LvResult<()>
    where
        M: MatrixLike<Elem = T>,
    {
        check_same_dims("assign", self.dims(), src.dims())?;
        copy_elements(self, src);
        Ok(())
    }

    /// Takes over the storage of `src` without copying. Shapes must match.
    #[track_caller]
    pub fn adopt(&mut self, src: Matrix<T>) {
        require(check_same_dims("adopt", self.dims(), src.dims()));
        self.data = src.data;
    }

    /// Storage in column-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.data.to_vec()
    }
}

impl<T: Scalar> MatrixView<T> {
    pub(crate) fn from_parts(data: Buffer<T>, layout: MatLayout) -> Self {
        Self { data, layout }
    }

    /// View of an `m x n` block of `buffer` with leading dimension `ldim`,
    /// starting `offset` elements in.
    #[track_caller]
    pub fn new(buffer: Buffer<T>, m: usize, n: usize, ldim: usize, offset: usize) -> Self {
        require(Self::try_new(buffer, m, n, ldim, offset))
    }

    pub fn try_new(
        buffer: Buffer<T>,
        m: usize,
        n: usize,
        ldim: usize,
        offset: usize,
    ) -> LvResult<Self> {
        let layout = MatLayout::new(m, n, ldim, offset)?;
        layout.check_within(buffer.len())?;
        Ok(Self::from_parts(buffer, layout))
    }

    #[track_caller]
    pub fn assign<M>(&mut self, src: &M)
    where
        M: MatrixLike<Elem = T>,
    {
        require(self.try_assign(src))
    }

    /// Writes `src` through into the elements this view addresses.
    pub fn try_assign<M>(&mut self, src: &M) -> LvResult<()>
    where
        M: MatrixLike<Elem = T>,
    {
        check_same_dims("assign", self.dims(), src.dims())?;
        copy_elements(self, src);
        Ok(())
    }
}

impl<T: Scalar> Clone for Matrix<T> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.deep_copy(),
        }
    }
}

impl<T: Scalar> MatrixLike for Matrix<T> {
    type Elem = T;

    #[inline]
    fn num_rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn num_columns(&self) -> usize {
        self.cols
    }

    #[inline]
    fn cell(&self, i: usize, j: usize) -> &Cell<T> {
        check_index!(i, self.rows);
        check_index!(j, self.cols);
        &self.data[i + j * self.rows]
    }
}

impl<T: Scalar> StridedMatrix for Matrix<T> {
    #[inline]
    fn buffer(&self) -> &Buffer<T> {
        &self.data
    }

    #[inline]
    fn layout(&self) -> MatLayout {
        MatLayout::contiguous(self.rows, self.cols)
    }
}

impl<T: Scalar> MatrixLike for MatrixView<T> {
    type Elem = T;

    #[inline]
    fn num_rows(&self) -> usize {
        self.layout.rows
    }

    #[inline]
    fn num_columns(&self) -> usize {
        self.layout.cols
    }

    #[inline]
    fn cell(&self, i: usize, j: usize) -> &Cell<T> {
        check_index!(i, self.layout.rows);
        check_index!(j, self.layout.cols);
        &self.data[self.layout.index(i, j)]
    }
}

impl<T: Scalar> StridedMatrix for MatrixView<T> {
    #[inline]
    fn buffer(&self) -> &Buffer<T> {
        &self.data
    }

    #[inline]
    fn layout(&self) -> MatLayout {
        self.layout
    }
}

macro_rules! impl_matrix_common {
    ($($ty:ident),*) => {
        $(impl<T: Scalar> Index<(usize, usize)> for $ty<T> {
            type Output = Cell<T>;

            #[inline]
            fn index(&self, (i, j): (usize, usize)) -> &Cell<T> {
                self.cell(i, j)
            }
        }

        impl<T: Scalar, M: MatrixLike<Elem = T>> PartialEq<M> for $ty<T> {
            fn eq(&self, other: &M) -> bool {
                if self.dims() != other.dims() {
                    return false;
                }
                (0..self.num_columns())
                    .all(|j| (0..self.num_rows()).all(|i| self.get(i, j) == other.get(i, j)))
            }
        }

        impl<T: Scalar> fmt::Debug for $ty<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                format_matrix(self, f)
            }
        })*
    };
}

impl_matrix_common!(Matrix, MatrixView);

fn format_matrix<M: MatrixLike>(m: &M, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;
    for i in 0..m.num_rows() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.debug_list()
            .entries((0..m.num_columns()).map(|j| m.get(i, j)))
            .finish()?;
    }
    f.write_str("]")
}

impl<T: Scalar> From<&MatrixView<T>> for Matrix<T> {
    fn from(m: &MatrixView<T>) -> Self {
        Matrix::from_like(m)
    }
}

impl<T: Scalar> From<MatrixView<T>> for Matrix<T> {
    fn from(m: MatrixView<T>) -> Self {
        Matrix::from_like(&m)
    }
}

impl<T: Scalar> From<&Matrix<T>> for MatrixView<T> {
    fn from(m: &Matrix<T>) -> Self {
        m.as_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{StridedVector, VectorLike};
    use num_traits::{NumCast, One};

    fn t<T: Scalar>(x: usize) -> T {
        <T as NumCast>::from(x).unwrap()
    }

    fn add_one_ref<M: MatrixLike>(m: &mut M) {
        for j in 0..m.num_columns() {
            for i in 0..m.num_rows() {
                m.set(i, j, m.get(i, j) + M::Elem::one());
            }
        }
    }

    fn add_one_value<M: MatrixLike>(m: M) {
        for j in 0..m.num_columns() {
            for i in 0..m.num_rows() {
                m.set(i, j, m.get(i, j) + M::Elem::one());
            }
        }
    }

    fn sum_ij<T: Scalar>(m: usize, n: usize) -> Matrix<T> {
        Matrix::from_fn(m, n, |i, j| t::<T>(i + j))
    }

    const SHAPES: [usize; 4] = [1, 2, 4, 10];

    macro_rules! matrix_suite {
        ($($name:ident: $t:ty),*) => {
            $(mod $name {
                use super::*;

                fn holds_sum_ij<M: MatrixLike<Elem = $t>>(a: &M, shift: usize) -> bool {
                    (0..a.num_columns()).all(|j| {
                        (0..a.num_rows()).all(|i| a.get(i, j) == t::<$t>(i + j + shift))
                    })
                }

                #[test]
                fn test_copy_and_move() {
                    for &m in &SHAPES {
                        for &n in &SHAPES {
                            let a = sum_ij::<$t>(m, n);
                            assert_eq!(a.dims(), (m, n));
                            assert_eq!(a.ldim(), m);

                            let b = a.clone();
                            assert!(holds_sum_ij(&b, 0));
                            assert_ne!(b.as_ptr(), a.as_ptr());

                            let data = a.as_ptr();
                            let c = a;
                            assert_eq!(c.as_ptr(), data);

                            let mut d = Matrix::<$t>::new(m, n);
                            let d_data = d.as_ptr();
                            d.assign(&c);
                            assert!(holds_sum_ij(&d, 0));
                            assert_eq!(d.as_ptr(), d_data);

                            let mut e = Matrix::<$t>::new(m, n);
                            e.adopt(c);
                            assert_eq!(e.as_ptr(), data);
                            assert!(holds_sum_ij(&e, 0));
                        }
                    }
                }

                #[test]
                fn test_row_and_column() {
                    for &m in &SHAPES {
                        for &n in &SHAPES {
                            let a = sum_ij::<$t>(m, n);
                            for i in 0..m {
                                let row = a.row(i);
                                for j in 0..n {
                                    assert_eq!(row.get(j), t::<$t>(i + j));
                                    row.set(j, t::<$t>(10 * j));
                                }
                                for j in 0..n {
                                    assert_eq!(a.get(i, j), t::<$t>(10 * j));
                                }
                            }
                            let a = sum_ij::<$t>(m, n);
                            for j in 0..n {
                                let col = a.column(j);
                                for i in 0..m {
                                    assert_eq!(col[i].get(), t::<$t>(i + j));
                                    col.set(i, t::<$t>(10 * i));
                                }
                                for i in 0..m {
                                    assert_eq!(a[(i, j)].get(), t::<$t>(10 * i));
                                }
                            }
                        }
                    }
                }

                #[test]
                fn test_submatrix_write_through() {
                    for &m in &SHAPES {
                        for &n in &SHAPES {
                            if m <= 2 || n <= 2 {
                                continue;
                            }
                            let a = sum_ij::<$t>(m, n);
                            let b = a.submatrix(1, m - 1, 1, n - 1);
                            assert!(holds_sum_ij(&b, 2));
                            for j in 0..b.num_columns() {
                                for i in 0..b.num_rows() {
                                    b.set(i, j, t::<$t>(2 * i + 3 * j));
                                }
                            }
                            for j in 0..b.num_columns() {
                                for i in 0..b.num_rows() {
                                    assert_eq!(a.get(i + 1, j + 1), t::<$t>(2 * i + 3 * j));
                                }
                            }
                        }
                    }
                }

                #[test]
                fn test_pass_by_ref_and_value() {
                    for &m in &SHAPES {
                        for &n in &SHAPES {
                            let mut a = sum_ij::<$t>(m, n);
                            add_one_ref(&mut a);
                            assert!(holds_sum_ij(&a, 1));

                            let a = sum_ij::<$t>(m, n);
                            add_one_value(a.clone());
                            assert!(holds_sum_ij(&a, 0));

                            add_one_value(a.submatrix(0, m, 0, n));
                            assert!(holds_sum_ij(&a, 1));

                            add_one_value::<Matrix<$t>>(a.submatrix(0, m, 0, n).into());
                            assert!(holds_sum_ij(&a, 1));

                            add_one_value::<MatrixView<$t>>((&a).into());
                            assert!(holds_sum_ij(&a, 2));
                        }
                    }
                }

                #[test]
                fn test_view_over_buffer() {
                    for &m in &SHAPES {
                        for &n in &SHAPES {
                            for pad in 0..2 {
                                for offset in [0, 3] {
                                    let ldim = m + pad;
                                    let data = Buffer::<$t>::new(offset + ldim * n);
                                    let mut a = MatrixView::new(data.clone(), m, n, ldim, offset);
                                    assert_eq!(a.dims(), (m, n));
                                    assert_eq!(a.ldim(), ldim);
                                    assert_eq!(a.offset(), offset);
                                    a.assign(&sum_ij::<$t>(m, n));
                                    assert!(holds_sum_ij(&a, 0));

                                    let b = a.clone();
                                    assert!(b.buffer().ptr_eq(&data));
                                    assert!(holds_sum_ij(&b, 0));

                                    let owned = Matrix::from(&a);
                                    assert!(holds_sum_ij(&owned, 0));
                                    assert!(!owned.buffer().ptr_eq(&data));
                                    assert_eq!(data[offset].get(), t::<$t>(0));
                                }
                            }
                        }
                    }
                }
            })*
        };
    }

    matrix_suite!(f64_suite: f64, f32_suite: f32, i32_suite: i32);

    #[test]
    fn test_macro_layout() {
        let a = matrix![[1, 2, 3], [4, 5, 6]];
        assert_eq!(a.dims(), (2, 3));
        assert_eq!(a.to_vec(), vec![1, 4, 2, 5, 3, 6]);
        assert_eq!(a.row(1).to_vec(), vec![4, 5, 6]);
        assert_eq!(format!("{:?}", a), "[[1, 2, 3], [4, 5, 6]]");
    }

    #[test]
    fn test_nested_views() {
        let a = Matrix::from_fn(6, 5, |i, j| (10 * i + j) as i64);
        let s = a.submatrix(1, 5, 1, 4);
        let ss = s.submatrix(1, 3, 1, 3);
        assert_eq!(ss, matrix![[22i64, 23], [32, 33]]);
        assert_eq!(ss.offset(), a.layout().index(2, 2));
        assert_eq!(s.row(2).subvector(1, 3).to_vec(), vec![32, 33]);
        assert_eq!(ss.column(1).to_vec(), vec![23, 33]);
        ss.set(1, 1, -1);
        assert_eq!(a.get(3, 3), -1);
    }

    #[test]
    fn test_view_assign_keeps_layout() {
        let a = Matrix::<f64>::zeros(3, 3);
        let mut s = a.submatrix(0, 2, 1, 3);
        let layout = s.layout();
        s.assign(&matrix![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(s.layout(), layout);
        assert_eq!(a, matrix![[0.0, 1.0, 2.0], [0.0, 3.0, 4.0], [0.0, 0.0, 0.0]]);
        assert!(s.try_assign(&Matrix::<f64>::zeros(3, 2)).is_err());
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(Matrix::<f32>::try_new(0, 3), Err(LvError::Empty { .. })));
        assert!(Matrix::try_from_col_major(2, 2, vec![1, 2, 3]).is_err());
        let buf = Buffer::<f64>::new(8);
        assert!(matches!(
            MatrixView::try_new(buf.clone(), 3, 2, 2, 0),
            Err(LvError::InvalidLeadingDim { .. })
        ));
        assert!(matches!(
            MatrixView::try_new(buf, 3, 3, 3, 0),
            Err(LvError::OutOfBuffer { required: 8, len: 8 })
        ));
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn test_assign_mismatch_panics() {
        let mut a = Matrix::<i32>::zeros(2, 3);
        a.assign(&Matrix::<i32>::zeros(3, 2));
    }

    #[test]
    #[should_panic(expected = "invalid range")]
    fn test_submatrix_out_of_range_panics() {
        let a = Matrix::<i32>::zeros(2, 3);
        let _ = a.submatrix(0, 2, 1, 4);
    }

    #[test]
    fn test_view_keeps_storage_alive() {
        let col = {
            let a = matrix![[1u16, 2], [3, 4]];
            a.column(1)
        };
        assert_eq!(col.to_vec(), vec![2, 4]);
        assert_eq!(col.buffer().handle_count(), 1);
    }
}
