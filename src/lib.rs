//! Dense vectors and column-major matrices with aliasing views.
//!
//! Owning kinds ([`Vector`], [`Matrix`]) and their views ([`VectorView`],
//! [`MatrixView`]) share one reference-counted [`Buffer`], so a view keeps its
//! storage alive and writes through it are seen by every alias. The operations in
//! [`op`] are written against [`VectorLike`] and [`MatrixLike`] and accept any mix
//! of kinds, including user types that implement those traits.
//!
//! ```
//! use linview::prelude::*;
//! use linview::vector;
//!
//! let v = vector![0, 1, 2, 3, 4];
//! let w = vector![5, 4, 3, 2, 1];
//! assert_eq!(&v + &w, vector![5, 5, 5, 5, 5]);
//! assert_eq!(linview::dot(&v, &w), 20);
//!
//! let mid = v.subvector(1, 4);
//! mid.set(0, 10);
//! assert_eq!(v.get(1), 10);
//! ```
#[macro_use]
mod macros;

mod buffer;
mod error;
mod matrix;
pub mod op;
mod print;
mod random;
mod scalar;
mod shape;
mod traits;
mod vector;

pub use crate::buffer::Buffer;
pub use crate::error::{LvError, LvResult};
pub use crate::matrix::{Matrix, MatrixView};
pub use crate::op::{
    add, dot, frobenius_norm, matmul, matrix_add, matrix_sub, matvec, norm, scale, sub,
    transpose, transpose_into,
};
pub use crate::print::{print_matrix, print_vector};
pub use crate::random::{default_rng, randomize_matrix, randomize_vector, DEBUG_SEED};
pub use crate::scalar::Scalar;
pub use crate::shape::{MatLayout, VecLayout};
pub use crate::traits::{Elements, MatrixLike, StridedMatrix, StridedVector, VectorLike};
pub use crate::vector::{Vector, VectorView};

pub use half::f16;

pub mod prelude {
    pub use crate::{
        Matrix, MatrixLike, MatrixView, Scalar, StridedMatrix, StridedVector, Vector,
        VectorLike, VectorView,
    };
}
