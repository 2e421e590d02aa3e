//! Planar double pendulum with equal point masses on equal massless rods.
//!
//! State is `[theta1, theta2, p1, p2]`, where the `p` are the canonical
//! momenta scaled by `m l^2`. With `d = theta1 - theta2` the Hamiltonian is
//!
//! ```text
//! H = (p1^2 + 2 p2^2 - 2 p1 p2 cos d) / (2 (1 + sin^2 d))
//!     + omega^2 (3 - 2 cos theta1 - cos theta2)
//! ```
//!
//! and the dynamics below are Hamilton's equations for it.

use std::io::Write;

use nalgebra::Vector4;
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
    ("t_end", 50.0),
    ("y1_init", 0.0),
    ("y2_init", 0.0),
    ("y3_init", 4.0),
    ("y4_init", 2.0),
    ("omega", 1.0),
];

pub const COLUMNS: &[&str] = &[
    "Time",
    "\\theta1",
    "\\theta2",
    "\\ptilde1",
    "\\ptilde2",
    "energy",
];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DoublePendulumParams {
    pub omega: f64,
    pub t_init: f64,
    pub y_init: [f64; 4],
}

impl DoublePendulumParams {
    pub fn from_parameters(params: &ParameterSet) -> Result<Self, ParameterError> {
        Ok(DoublePendulumParams {
            omega: params.get("omega")?,
            t_init: params.get("t_init")?,
            y_init: [
                params.get("y1_init")?,
                params.get("y2_init")?,
                params.get("y3_init")?,
                params.get("y4_init")?,
            ],
        })
    }

    pub fn initial_state(&self) -> Vector4<f64> {
        Vector4::from(self.y_init)
    }

    pub fn system_dynamics(&self) -> impl Fn(f64, Vector4<f64>) -> Vector4<f64> {
        let omega_squared = self.omega * self.omega;
        move |_, y: Vector4<f64>| {
            let (theta1, theta2, p1, p2) = (y[0], y[1], y[2], y[3]);
            let (sin_d, cos_d) = (theta1 - theta2).sin_cos();
            let denom = 1.0 + sin_d * sin_d;

            let a = p1 * p2 * sin_d / denom;
            let b = (p1 * p1 + 2.0 * p2 * p2 - 2.0 * p1 * p2 * cos_d) * sin_d * cos_d
                / (denom * denom);

            Vector4::new(
                (p1 - p2 * cos_d) / denom,
                (2.0 * p2 - p1 * cos_d) / denom,
                -a + b - 2.0 * omega_squared * theta1.sin(),
                a - b - omega_squared * theta2.sin(),
            )
        }
    }

    pub fn energy(&self, y: &Vector4<f64>) -> f64 {
        let (theta1, theta2, p1, p2) = (y[0], y[1], y[2], y[3]);
        let (sin_d, cos_d) = (theta1 - theta2).sin_cos();
        let kinetic = 0.5 * (p1 * p1 + 2.0 * p2 * p2 - 2.0 * p1 * p2 * cos_d) / (1.0 + sin_d * sin_d);
        let potential = self.omega * self.omega * (3.0 - 2.0 * theta1.cos() - theta2.cos());
        kinetic + potential
    }
}

pub fn simulate<W: Write>(
    params: &ParameterSet,
    method: IntegrationMethod,
    writer: &mut SampleWriter<W>,
) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let problem = DoublePendulumParams::from_parameters(params)?;
    let config = SimulationConfig::from_parameters(params)?;

    write_header(writer, COLUMNS, params)?;
    let summary = integrate_and_write(
        method,
        problem.system_dynamics(),
        problem.t_init,
        problem.initial_state(),
        config,
        writer,
        |t, y| vec![t, y[0], y[1], y[2], y[3], problem.energy(y)],
    )?;
    Ok(summary)
}
