//! Undamped single pendulum, state `[theta, theta_dot]`.

use std::io::Write;

use nalgebra::Vector2;
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
    ("theta0", 0.0),
    ("dotheta0", 2.0 * std::f64::consts::PI),
    ("omega", 1.0),
];

pub const COLUMNS: &[&str] = &["Time", "\\theta", "\\dot\\theta", "energy"];

/// Energy per unit `m l^2`:  `0.5 theta_dot^2 + omega^2 (1 - cos theta)`.
pub fn pendulum_energy(omega: f64, state: &Vector2<f64>) -> f64 {
    0.5 * state[1] * state[1] + omega * omega * (1.0 - state[0].cos())
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PendulumParams {
    pub omega: f64, // natural frequency, sqrt(g / l)
    pub theta0: f64,
    pub dotheta0: f64,
    pub t_init: f64,
}

impl PendulumParams {
    pub fn from_parameters(params: &ParameterSet) -> Result<Self, ParameterError> {
        Ok(PendulumParams {
            omega: params.get("omega")?,
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
        move |_, state: Vector2<f64>| {
            let q = state[0]; // angle
            let v = state[1]; // rate
            Vector2::new(v, -omega_squared * q.sin())
        }
    }

    pub fn energy(&self, state: &Vector2<f64>) -> f64 {
        pendulum_energy(self.omega, state)
    }
}

pub fn simulate<W: Write>(
    params: &ParameterSet,
    method: IntegrationMethod,
    writer: &mut SampleWriter<W>,
) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let problem = PendulumParams::from_parameters(params)?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ode_solvers::{ExplicitEuler, Integrator, RungeKutta4};
    use approx::assert_relative_eq;

    fn swinging_pendulum() -> PendulumParams {
        PendulumParams {
            omega: 1.0,
            theta0: 1.0,
            dotheta0: 0.0,
            t_init: 0.0,
        }
    }

    fn relative_energy_drift<I: Integrator<State = Vector2<f64>>>(
        problem: &PendulumParams,
        mut solver: I,
        dt: f64,
        n_steps: usize,
    ) -> f64 {
        let e0 = problem.energy(solver.state());
        let mut max_drift: f64 = 0.0;
        for _ in 0..n_steps {
            let e = problem.energy(solver.step(dt));
            max_drift = max_drift.max(((e - e0) / e0).abs());
        }
        max_drift
    }

    #[test]
    fn dynamics_at_rest() {
        let problem = swinging_pendulum();
        let dynamics = problem.system_dynamics();
        assert_relative_eq!(dynamics(0.0, Vector2::new(0.0, 0.0)), Vector2::new(0.0, 0.0));
        assert_relative_eq!(
            dynamics(0.0, Vector2::new(0.5 * std::f64::consts::PI, 2.0)),
            Vector2::new(2.0, -1.0)
        );
    }

    #[test]
    fn rk4_conserves_energy_and_euler_does_not() {
        let problem = swinging_pendulum();
        let dt = 0.01;
        let n_steps = 2000;

        let rk4_drift = relative_energy_drift(
            &problem,
            RungeKutta4::new(problem.system_dynamics(), 0.0, problem.initial_state()),
            dt,
            n_steps,
        );
        let euler_drift = relative_energy_drift(
            &problem,
            ExplicitEuler::new(problem.system_dynamics(), 0.0, problem.initial_state()),
            dt,
            n_steps,
        );

        more_asserts::assert_lt!(rk4_drift, 0.01);
        more_asserts::assert_gt!(euler_drift, 0.05);
        more_asserts::assert_gt!(euler_drift, 100.0 * rk4_drift);
    }

    #[test]
    fn small_angle_period() {
        // For small amplitudes the pendulum is a harmonic oscillator with period 2 pi / omega
        let problem = PendulumParams {
            omega: 2.0,
            theta0: 1e-3,
            dotheta0: 0.0,
            t_init: 0.0,
        };
        let period = 2.0 * std::f64::consts::PI / problem.omega;
        let n_steps = 1000;
        let mut solver = RungeKutta4::new(problem.system_dynamics(), 0.0, problem.initial_state());
        for _ in 0..n_steps {
            solver.step(period / (n_steps as f64));
        }
        assert_relative_eq!(solver.state()[0], problem.theta0, max_relative = 1e-5);
        assert_relative_eq!(solver.state()[1], 0.0, epsilon = 1e-6);
    }
}
