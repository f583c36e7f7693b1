use crate::traits::{MatrixLike, VectorLike};
use crate::Scalar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used by [`default_rng`] in debug builds so runs are reproducible.
pub const DEBUG_SEED: u64 = 1302;

/// Fixed-seed generator in debug builds, entropy-seeded otherwise.
pub fn default_rng() -> StdRng {
    if cfg!(debug_assertions) {
        log::debug!("seeding rng with {}", DEBUG_SEED);
        StdRng::seed_from_u64(DEBUG_SEED)
    } else {
        StdRng::from_entropy()
    }
}

/// Overwrites every element of `v`, in index order.
///
/// Integers are drawn uniformly from `0..=100`, floating point values from the
/// standard normal distribution.
pub fn randomize_vector<V, R>(v: &V, rng: &mut R)
where
    V: VectorLike,
    R: Rng + ?Sized,
{
    for i in 0..v.size() {
        v.set(i, V::Elem::sample(rng));
    }
}

/// Overwrites every element of `a`, column by column.
pub fn randomize_matrix<M, R>(a: &M, rng: &mut R)
where
    M: MatrixLike,
    R: Rng + ?Sized,
{
    for j in 0..a.num_columns() {
        for i in 0..a.num_rows() {
            a.set(i, j, M::Elem::sample(rng));
        }
    }
}
