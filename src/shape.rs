use crate::error::{LvError, LvResult};

/// Maps logical vector index `i` to buffer position `offset + i * stride`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VecLayout {
    pub(crate) len: usize,
    pub(crate) stride: usize,
    pub(crate) offset: usize,
}

impl VecLayout {
    pub fn new(len: usize, stride: usize, offset: usize) -> LvResult<Self> {
        if len == 0 {
            return Err(LvError::Empty { kind: "vector view" });
        }
        if stride == 0 {
            return Err(LvError::InvalidRange {
                start: offset,
                end: offset + len,
                stride,
                len,
            });
        }
        Ok(Self {
            len,
            stride,
            offset,
        })
    }

    pub fn contiguous(len: usize) -> Self {
        Self {
            len,
            stride: 1,
            offset: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline(always)]
    pub fn index(&self, i: usize) -> usize {
        self.offset + i * self.stride
    }

    /// Buffer position of the last addressed element.
    #[inline]
    pub fn last(&self) -> usize {
        self.index(self.len - 1)
    }

    pub(crate) fn check_within(&self, buffer_len: usize) -> LvResult<()> {
        let last = self.last();
        if last >= buffer_len {
            return Err(LvError::OutOfBuffer {
                required: last,
                len: buffer_len,
            });
        }
        Ok(())
    }

    /// `(end - start) / stride` elements from `start` on, composed onto this layout.
    pub(crate) fn subrange(&self, start: usize, end: usize, stride: usize) -> LvResult<Self> {
        let invalid = || LvError::InvalidRange {
            start,
            end,
            stride,
            len: self.len,
        };
        if end > self.len || start >= end || stride == 0 {
            return Err(invalid());
        }
        let len = (end - start) / stride;
        if len == 0 {
            return Err(invalid());
        }
        let stride = if len == 1 {
            self.stride
        } else {
            self.stride.checked_mul(stride).ok_or_else(invalid)?
        };
        Ok(Self {
            len,
            stride,
            offset: self.index(start),
        })
    }
}

/// Column-major window: logical `(i, j)` sits at `offset + i + j * ldim`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatLayout {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) ldim: usize,
    pub(crate) offset: usize,
}

impl MatLayout {
    pub fn new(rows: usize, cols: usize, ldim: usize, offset: usize) -> LvResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(LvError::Empty { kind: "matrix view" });
        }
        if ldim < rows {
            return Err(LvError::InvalidLeadingDim { ldim, rows });
        }
        Ok(Self {
            rows,
            cols,
            ldim,
            offset,
        })
    }

    pub fn contiguous(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ldim: rows,
            offset: 0,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn ldim(&self) -> usize {
        self.ldim
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline(always)]
    pub fn index(&self, i: usize, j: usize) -> usize {
        self.offset + i + j * self.ldim
    }

    #[inline]
    pub fn last(&self) -> usize {
        self.index(self.rows - 1, self.cols - 1)
    }

    pub fn is_contiguous(&self) -> bool {
        self.ldim == self.rows || self.cols == 1
    }

    pub(crate) fn check_within(&self, buffer_len: usize) -> LvResult<()> {
        let last = self.last();
        if last >= buffer_len {
            return Err(LvError::OutOfBuffer {
                required: last,
                len: buffer_len,
            });
        }
        Ok(())
    }

    /// Rows `i1..i2` and columns `j1..j2`, composed onto this layout.
    pub(crate) fn submatrix(&self, i1: usize, i2: usize, j1: usize, j2: usize) -> LvResult<Self> {
        if i2 > self.rows || i1 >= i2 {
            return Err(LvError::InvalidRange {
                start: i1,
                end: i2,
                stride: 1,
                len: self.rows,
            });
        }
        if j2 > self.cols || j1 >= j2 {
            return Err(LvError::InvalidRange {
                start: j1,
                end: j2,
                stride: 1,
                len: self.cols,
            });
        }
        Ok(Self {
            rows: i2 - i1,
            cols: j2 - j1,
            ldim: self.ldim,
            offset: self.index(i1, j1),
        })
    }

    pub(crate) fn row(&self, i: usize) -> LvResult<VecLayout> {
        if i >= self.rows {
            return Err(LvError::IndexOutOfRange {
                index: i,
                len: self.rows,
            });
        }
        Ok(VecLayout {
            len: self.cols,
            stride: self.ldim,
            offset: self.index(i, 0),
        })
    }

    pub(crate) fn column(&self, j: usize) -> LvResult<VecLayout> {
        if j >= self.cols {
            return Err(LvError::IndexOutOfRange {
                index: j,
                len: self.cols,
            });
        }
        Ok(VecLayout {
            len: self.rows,
            stride: 1,
            offset: self.index(0, j),
        })
    }
}
