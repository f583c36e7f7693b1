use crate::error::LvResult;
use crate::traits::{MatrixLike, VectorLike};
use std::io::Write;

/// Writes `(n)[`, one element per line, then `]`.
pub fn print_vector<W, V>(out: &mut W, v: &V) -> LvResult<()>
where
    W: Write + ?Sized,
    V: VectorLike,
{
    writeln!(out, "({})[", v.size())?;
    for i in 0..v.size() {
        writeln!(out, "{}", v.get(i))?;
    }
    writeln!(out, "]")?;
    Ok(())
}

/// Writes `(m,n)[`, one bracketed row per line, then `]`.
pub fn print_matrix<W, M>(out: &mut W, a: &M) -> LvResult<()>
where
    W: Write + ?Sized,
    M: MatrixLike,
{
    writeln!(out, "({},{})[", a.num_rows(), a.num_columns())?;
    for i in 0..a.num_rows() {
        write!(out, "[")?;
        for j in 0..a.num_columns() {
            if j > 0 {
                write!(out, ",")?;
            }
            write!(out, "{}", a.get(i, j))?;
        }
        writeln!(out, "]")?;
    }
    writeln!(out, "]")?;
    Ok(())
}
