//! Reference table of `sin(x)` over one period, useful for checking the
//! plotting pipeline independently of any integrator.

use std::f64::consts::PI;
use std::io::{self, Write};

use crate::core::output::SampleWriter;

pub const COLUMNS: &[&str] = &["x", "sin(x)"];

/// Writes `x  sin(x)` for `x` in `[0, 2 pi)` with spacing `0.01 pi`.
/// Returns the number of rows written.
pub fn write_sine_table<W: Write>(writer: &mut SampleWriter<W>) -> io::Result<usize> {
    let delta = 0.01 * PI;
    writer.write_comment("Plotting sin function in [0,2pi] with delta=0.01pi.")?;
    writer.write_column_header(COLUMNS)?;

    let mut rows = 0;
    let mut x: f64 = 0.0;
    while x < 2.0 * PI {
        writer.write_row(&[x, x.sin()])?;
        x += delta;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}
