use crate::Scalar;
use std::cell::Cell;
use std::ops::Index;
use std::rc::Rc;

/// Shared handle to a contiguous allocation of elements.
///
/// Every vector, matrix and view holds one. Cloning the handle never copies
/// elements, it adds another alias; the allocation is released together with the
/// last handle. Elements sit in `Cell`s so any alias can write, and the handle is
/// neither `Send` nor `Sync`.
pub struct Buffer<T> {
    cells: Rc<[Cell<T>]>,
}

impl<T: Scalar> Buffer<T> {
    /// Allocates `len` elements. Debug builds fill them with [`Scalar::poison`],
    /// release builds with zero.
    pub fn new(len: usize) -> Self {
        let init = if cfg!(debug_assertions) {
            T::poison()
        } else {
            T::zero()
        };
        Self::from_elem(len, init)
    }

    pub fn from_elem(len: usize, elem: T) -> Self {
        log::trace!("allocating buffer of {} elements", len);
        Self {
            cells: (0..len).map(|_| Cell::new(elem)).collect(),
        }
    }

    pub fn from_vec(v: Vec<T>) -> Self {
        log::trace!("adopting vec of {} elements", v.len());
        Self {
            cells: v.into_iter().map(Cell::new).collect(),
        }
    }

    /// Fresh allocation with the same contents.
    pub fn deep_copy(&self) -> Self {
        log::trace!("deep copy of buffer with {} elements", self.len());
        Self {
            cells: self.cells.iter().map(|c| Cell::new(c.get())).collect(),
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.cells.iter().map(Cell::get).collect()
    }
}

impl<T> Buffer<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Address of the first element.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.cells.as_ptr().cast::<T>()
    }

    #[inline]
    pub(crate) fn ptr_at(&self, offset: usize) -> *const T {
        self.cells[offset].as_ptr().cast_const()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Buffer<T>) -> bool {
        Rc::ptr_eq(&self.cells, &other.cells)
    }

    /// Number of live handles (owning and view) sharing this allocation.
    #[inline]
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.cells)
    }

    #[inline]
    pub fn as_cells(&self) -> &[Cell<T>] {
        &self.cells
    }
}

impl<T> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Self {
            cells: Rc::clone(&self.cells),
        }
    }
}

impl<T> Index<usize> for Buffer<T> {
    type Output = Cell<T>;

    #[inline]
    fn index(&self, i: usize) -> &Cell<T> {
        &self.cells[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poison_on_alloc() {
        let b = Buffer::<f64>::new(4);
        assert_eq!(b.len(), 4);
        if cfg!(debug_assertions) {
            assert!(b.to_vec().iter().all(|x| x.is_nan()));
        } else {
            assert_eq!(b.to_vec(), vec![0.0; 4]);
        }
    }

    #[test]
    fn test_alias_and_release() {
        let b = Buffer::from_vec(vec![1, 2, 3]);
        let alias = b.clone();
        assert!(b.ptr_eq(&alias));
        assert_eq!(b.as_ptr(), alias.as_ptr());
        assert_eq!(b.handle_count(), 2);
        alias[1].set(20);
        assert_eq!(b[1].get(), 20);
        drop(b);
        assert_eq!(alias.handle_count(), 1);
        assert_eq!(alias.to_vec(), vec![1, 20, 3]);
    }

    #[test]
    fn test_deep_copy() {
        let b = Buffer::from_elem(3, 7u32);
        let c = b.deep_copy();
        assert!(!b.ptr_eq(&c));
        assert_ne!(b.as_ptr(), c.as_ptr());
        c[0].set(1);
        assert_eq!(b[0].get(), 7);
        assert_eq!(b.ptr_at(2), unsafe { b.as_ptr().add(2) });
    }
}
