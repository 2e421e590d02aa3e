//! Scalar exponential growth `y' = k y`, the test problem with a closed-form
//! solution used to check the order of the integrators.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::core::{
    output::SampleWriter,
    parameters::{ParameterError, ParameterSet},
    simulation::{RunSummary, SimulationConfig},
};

use super::common::{integrate_and_write, write_header, IntegrationMethod};

pub const DEFAULTS: &[(&str, f64)] = &[
    ("stepsize", 0.001),
    ("resolution", 1.0),
    ("t_init", 0.0),
    ("t_end", 3.0),
    ("y_init", 1.0),
    ("k_exp", 0.33),
];

/// Columns:  time, numerical solution, analytic solution.
pub const COLUMNS: &[&str] = &["Time", "y", "y_exact"];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ExponentialParams {
    pub k_exp: f64,
    pub t_init: f64,
    pub y_init: f64,
}

impl ExponentialParams {
    pub fn from_parameters(params: &ParameterSet) -> Result<Self, ParameterError> {
        Ok(ExponentialParams {
            k_exp: params.get("k_exp")?,
            t_init: params.get("t_init")?,
            y_init: params.get("y_init")?,
        })
    }

    pub fn system_dynamics(&self) -> impl Fn(f64, f64) -> f64 {
        let k = self.k_exp;
        move |_, y: f64| k * y
    }

    pub fn analytic_solution(&self, t: f64) -> f64 {
        self.y_init * (self.k_exp * (t - self.t_init)).exp()
    }
}

pub fn simulate<W: Write>(
    params: &ParameterSet,
    method: IntegrationMethod,
    writer: &mut SampleWriter<W>,
) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let problem = ExponentialParams::from_parameters(params)?;
    let config = SimulationConfig::from_parameters(params)?;

    write_header(writer, COLUMNS, params)?;
    writer.write_comment(&format!(
        "Writing data for in [{}, {}) with delta = {}",
        problem.t_init, config.t_end, config.timestep
    ))?;

    let summary = integrate_and_write(
        method,
        problem.system_dynamics(),
        problem.t_init,
        problem.y_init,
        config,
        writer,
        |t, y| vec![t, *y, problem.analytic_solution(t)],
    )?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn analytic_solution_at_start_is_initial_value() {
        let problem = ExponentialParams::from_parameters(&ParameterSet::with_defaults(DEFAULTS)).unwrap();
        assert_relative_eq!(problem.analytic_solution(problem.t_init), problem.y_init);
        assert_relative_eq!((problem.system_dynamics())(0.0, 2.0), 0.66);
    }

    #[test]
    fn table_rows_track_the_analytic_solution() {
        let mut params = ParameterSet::with_defaults(DEFAULTS);
        params.set("stepsize", 0.01);
        params.set("t_end", 1.0);
        params.set("resolution", 10.0);

        let mut writer = SampleWriter::new(Vec::new());
        let summary = simulate(&params, IntegrationMethod::Rk4, &mut writer).unwrap();
        assert_eq!(summary.samples, writer.rows_written());

        let text = String::from_utf8(writer.into_inner()).unwrap();
        let rows: Vec<Vec<f64>> = text
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(|line| line.split_whitespace().map(|x| x.parse().unwrap()).collect())
            .collect();
        assert_eq!(rows.len(), summary.samples);
        for row in rows {
            assert_eq!(row.len(), COLUMNS.len());
            assert_relative_eq!(row[1], row[2], max_relative = 1e-5);
        }
    }
}
