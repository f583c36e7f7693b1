use std::io;
use thiserror::Error;

pub type LvResult<T> = Result<T, LvError>;

#[derive(Error, Debug)]
pub enum LvError {
    #[error("{kind} must have a positive size")]
    Empty { kind: &'static str },
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid range {start}..{end} step {stride} for length {len}")]
    InvalidRange {
        start: usize,
        end: usize,
        stride: usize,
        len: usize,
    },
    #[error("{op}: dimension mismatch, expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        op: &'static str,
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("leading dimension {ldim} is smaller than the row count {rows}")]
    InvalidLeadingDim { ldim: usize, rows: usize },
    #[error("view reaches element {required} of a buffer holding {len}")]
    OutOfBuffer { required: usize, len: usize },
    #[error("Unexpected io: {0}")]
    Io(#[from] io::Error),
}

impl LvError {
    pub(crate) fn mismatch(op: &'static str, expected: (usize, usize), got: (usize, usize)) -> Self {
        LvError::DimensionMismatch { op, expected, got }
    }
}

impl From<LvError> for String {
    fn from(e: LvError) -> Self {
        format!("{}", e)
    }
}

/// Unwraps a contract check, panicking at the caller on violation.
#[track_caller]
#[inline]
pub(crate) fn require<T>(r: LvResult<T>) -> T {
    match r {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = LvError::mismatch("add", (1, 5), (1, 4));
        assert_eq!(
            e.to_string(),
            "add: dimension mismatch, expected (1, 5), got (1, 4)"
        );
        let s: String = LvError::Empty { kind: "vector" }.into();
        assert_eq!(s, "vector must have a positive size");
    }

    #[test]
    #[should_panic(expected = "index 3 out of range for length 2")]
    fn test_require_panics() {
        require::<()>(Err(LvError::IndexOutOfRange { index: 3, len: 2 }));
    }
}
