/// Builds a [`Vector`](crate::Vector) from a list of elements.
///
/// ```
/// use linview::{vector, prelude::*};
/// let v = vector![0, 1, 2, 3, 4];
/// assert_eq!(v.size(), 5);
/// ```
#[macro_export]
macro_rules! vector {
    ($elem:expr; $n:expr) => {{
        $crate::Vector::from_elem($n, $elem)
    }};
    ($($x:expr),+ $(,)*) => {{
        $crate::Vector::from_vec(vec![$($x,)*])
    }};
}

/// Builds a [`Matrix`](crate::Matrix) from rows written in reading order.
///
/// Storage is still column-major.
///
/// ```
/// use linview::{matrix, prelude::*};
/// let a = matrix![[1, 2, 3], [4, 5, 6]];
/// assert_eq!(a.get(1, 0), 4);
/// ```
#[macro_export]
macro_rules! matrix {
    ($([$($x:expr),* $(,)*]),+ $(,)*) => {{
        $crate::Matrix::from_rows(&[$([$($x,)*],)*])
    }};
}

// per-element bounds check, on in debug builds or with the `checked` feature
macro_rules! check_index {
    ($i:expr, $len:expr) => {
        if cfg!(any(debug_assertions, feature = "checked")) && $i >= $len {
            panic!(
                "{}",
                $crate::LvError::IndexOutOfRange {
                    index: $i,
                    len: $len
                }
            );
        }
    };
}
