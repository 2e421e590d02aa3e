use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::core::{
    ode_solvers::{ExplicitEuler, Integrator, OdeState, RungeKutta4},
    output::SampleWriter,
    parameters::ParameterSet,
    simulation::{RunSummary, SimulationConfig, SimulationDriver},
};

use super::{damped_pendulum, double_pendulum, exponential, pendulum};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrationMethod {
    Euler,
    Rk4,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Problem {
    Exponential,
    Pendulum,
    DampedPendulum,
    DoublePendulum,
}

impl Problem {
    pub fn name(&self) -> &'static str {
        match self {
            Problem::Exponential => "exponential",
            Problem::Pendulum => "pendulum",
            Problem::DampedPendulum => "damped_pendulum",
            Problem::DoublePendulum => "double_pendulum",
        }
    }

    pub fn defaults(&self) -> &'static [(&'static str, f64)] {
        match self {
            Problem::Exponential => exponential::DEFAULTS,
            Problem::Pendulum => pendulum::DEFAULTS,
            Problem::DampedPendulum => damped_pendulum::DEFAULTS,
            Problem::DoublePendulum => double_pendulum::DEFAULTS,
        }
    }

    /// Parameter file read when none is given on the command line.
    pub fn default_params_path(&self) -> String {
        format!("params/{}.prm", self.name())
    }

    pub fn default_parameters(&self) -> ParameterSet {
        ParameterSet::with_defaults(self.defaults())
    }

    pub fn simulate<W: Write>(
        &self,
        params: &ParameterSet,
        method: IntegrationMethod,
        writer: &mut SampleWriter<W>,
    ) -> Result<RunSummary, Box<dyn std::error::Error>> {
        match self {
            Problem::Exponential => exponential::simulate(params, method, writer),
            Problem::Pendulum => pendulum::simulate(params, method, writer),
            Problem::DampedPendulum => damped_pendulum::simulate(params, method, writer),
            Problem::DoublePendulum => double_pendulum::simulate(params, method, writer),
        }
    }
}

/// Column header first, then the resolved parameters.
pub fn write_header<W: Write>(
    writer: &mut SampleWriter<W>,
    columns: &[&str],
    params: &ParameterSet,
) -> io::Result<()> {
    writer.write_column_header(columns)?;
    writer.write_parameters(params)
}

/// Build the requested integrator and drive it to `t_end`, writing the row
/// produced by `row` for every sample.
pub fn integrate_and_write<T, F, R, W>(
    method: IntegrationMethod,
    dynamics: F,
    t_init: f64,
    y_init: T,
    config: SimulationConfig,
    writer: &mut SampleWriter<W>,
    row: R,
) -> io::Result<RunSummary>
where
    T: OdeState,
    F: Fn(f64, T) -> T,
    R: Fn(f64, &T) -> Vec<f64>,
    W: Write,
{
    match method {
        IntegrationMethod::Euler => drive(
            SimulationDriver::new(ExplicitEuler::new(dynamics, t_init, y_init), config),
            writer,
            row,
        ),
        IntegrationMethod::Rk4 => drive(
            SimulationDriver::new(RungeKutta4::new(dynamics, t_init, y_init), config),
            writer,
            row,
        ),
    }
}

fn drive<I, R, W>(
    mut driver: SimulationDriver<I>,
    writer: &mut SampleWriter<W>,
    row: R,
) -> io::Result<RunSummary>
where
    I: Integrator,
    R: Fn(f64, &I::State) -> Vec<f64>,
    W: Write,
{
    let summary = driver.run(|t, y| writer.write_row(&row(t, y)))?;
    writer.flush()?;
    Ok(summary)
}
