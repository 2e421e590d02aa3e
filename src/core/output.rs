use std::io::{self, Write};

use super::parameters::ParameterSet;

const FIELD_SEPARATOR: &str = "  ";

/// Format a value the way C's `%e` does, e.g. `1.000000e+00`, so that the
/// tables plot the same in gnuplot regardless of which tool produced them.
pub fn format_scientific(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }
    let formatted = format!("{:.6e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}

/// Writes a whitespace separated table:  `#` comment lines first, then one
/// row of scientific-notation fields per sample.
pub struct SampleWriter<W: Write> {
    writer: W,
    rows_written: usize,
}

impl<W: Write> SampleWriter<W> {
    pub fn new(writer: W) -> Self {
        SampleWriter {
            writer,
            rows_written: 0,
        }
    }

    pub fn write_comment(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "# {}", text)
    }

    /// Echo the resolved parameters, one `# name = value` line each.
    pub fn write_parameters(&mut self, params: &ParameterSet) -> io::Result<()> {
        for (name, value) in params.iter() {
            writeln!(self.writer, "# {} = {}", name, value)?;
        }
        Ok(())
    }

    pub fn write_column_header(&mut self, columns: &[&str]) -> io::Result<()> {
        writeln!(self.writer, "# {}", columns.join(FIELD_SEPARATOR))
    }

    pub fn write_row(&mut self, fields: &[f64]) -> io::Result<()> {
        let line = fields
            .iter()
            .map(|value| format_scientific(*value))
            .collect::<Vec<_>>()
            .join(FIELD_SEPARATOR);
        writeln!(self.writer, "{}", line)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
