use std::io::Write;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::core::{
    output::SampleWriter,
    parameters::{ParameterError, ParameterSet},
    simulation::{RunSummary, SimulationConfig},
};

use super::{
    common::{integrate_and_write, write_header, IntegrationMethod},
    pendulum::pendulum_energy,
};

/// Defaults reproduce the "canonical" driven-damped pendulum:
/// `theta'' = cos(t) - 0.1 theta' - sin(theta)`.
pub const DEFAULTS: &[(&str, f64)] = &[
    ("stepsize", 0.01),
    ("resolution", 1.0),
    ("t_init", 0.0),
    ("t_end", 50.0),
    ("theta0", 0.0),
    ("dotheta0", 0.0),
    ("omega", 1.0),
    ("damping", 0.1),
    ("drive_amplitude", 1.0),
    ("drive_frequency", 1.0),
];

pub const COLUMNS: &[&str] = &["Time", "\\theta", "\\dot\\theta", "energy"];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DrivenDampedPendulumParams {
    pub omega: f64,
    pub damping: f64, // viscous damping coefficient, per unit time
    pub drive_amplitude: f64,
    pub drive_frequency: f64,
    pub theta0: f64,
    pub dotheta0: f64,
    pub t_init: f64,
}

impl DrivenDampedPendulumParams {
    pub fn from_parameters(params: &ParameterSet) -> Result<Self, ParameterError> {
        let damping = params.get("damping")?;
        if damping < 0.0 {
            return Err(ParameterError::invalid(
                "damping",
                damping,
                "must not be negative",
            ));
        }
        Ok(DrivenDampedPendulumParams {
            omega: params.get("omega")?,
            damping,
            drive_amplitude: params.get("drive_amplitude")?,
            drive_frequency: params.get("drive_frequency")?,
            theta0: params.get("theta0")?,
            dotheta0: params.get("dotheta0")?,
            t_init: params.get("t_init")?,
        })
    }

    pub fn initial_state(&self) -> Vector2<f64> {
        Vector2::new(self.theta0, self.dotheta0)
    }

    pub fn system_dynamics(&self) -> impl Fn(f64, Vector2<f64>) -> Vector2<f64> {
        let omega_squared = self.omega * self.omega;
        let damping = self.damping;
        let amplitude = self.drive_amplitude;
        let frequency = self.drive_frequency;
        move |t: f64, x: Vector2<f64>| {
            let q = x[0]; // angle
            let v = x[1]; // rate
            let v_dot = amplitude * (frequency * t).cos() - damping * v - omega_squared * q.sin();
            Vector2::new(v, v_dot)
        }
    }

    /// Mechanical energy of the pendulum alone; the drive and damping
    /// exchange energy with it, so this is a diagnostic, not an invariant.
    pub fn energy(&self, state: &Vector2<f64>) -> f64 {
        pendulum_energy(self.omega, state)
    }
}

pub fn simulate<W: Write>(
    params: &ParameterSet,
    method: IntegrationMethod,
    writer: &mut SampleWriter<W>,
) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let problem = DrivenDampedPendulumParams::from_parameters(params)?;
    let config = SimulationConfig::from_parameters(params)?;

    write_header(writer, COLUMNS, params)?;
    let summary = integrate_and_write(
        method,
        problem.system_dynamics(),
        problem.t_init,
        problem.initial_state(),
        config,
        writer,
        |t, y| vec![t, y[0], y[1], problem.energy(y)],
    )?;
    Ok(summary)
}
