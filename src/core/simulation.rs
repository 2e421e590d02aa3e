//! Fixed-step simulation loop shared by every problem:  advance the integrator
//! from its initial time until `t_end`, sampling the state every
//! `resolution` steps.

use serde::{Deserialize, Serialize};

use super::ode_solvers::Integrator;
use super::parameters::{ParameterError, ParameterSet};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub t_end: f64,
    pub timestep: f64,
    /// Emit a sample every `resolution` steps (1 == every step).
    pub resolution: usize,
}

impl SimulationConfig {
    pub fn new(t_end: f64, timestep: f64, resolution: usize) -> Result<Self, ParameterError> {
        if !(timestep.is_finite() && timestep > 0.0) {
            return Err(ParameterError::invalid(
                "stepsize",
                timestep,
                "must be positive and finite",
            ));
        }
        if resolution == 0 {
            return Err(ParameterError::invalid(
                "resolution",
                0.0,
                "must be at least one",
            ));
        }
        Ok(SimulationConfig {
            t_end,
            timestep,
            resolution,
        })
    }

    /// Reads `t_end`, `stepsize` and `resolution`. A fractional resolution
    /// is truncated towards zero.
    pub fn from_parameters(params: &ParameterSet) -> Result<Self, ParameterError> {
        let resolution = params.get("resolution")?;
        if !(resolution >= 1.0) {
            return Err(ParameterError::invalid(
                "resolution",
                resolution,
                "must be at least one",
            ));
        }
        SimulationConfig::new(
            params.get("t_end")?,
            params.get("stepsize")?,
            resolution as usize,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    Running,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub steps: usize,
    pub samples: usize,
    pub t_final: f64,
}

/// Owns an integrator and drives it through the sample / step loop.
pub struct SimulationDriver<I> {
    integrator: I,
    config: SimulationConfig,
    step_count: usize,
    sample_count: usize,
}

impl<I: Integrator> SimulationDriver<I> {
    pub fn new(integrator: I, config: SimulationConfig) -> Self {
        SimulationDriver {
            integrator,
            config,
            step_count: 0,
            sample_count: 0,
        }
    }

    /// The final time is never sampled:  the loop runs while `t < t_end`.
    pub fn status(&self) -> SimulationStatus {
        if self.integrator.time() < self.config.t_end {
            SimulationStatus::Running
        } else {
            SimulationStatus::Done
        }
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// One loop iteration:  maybe sample, then take one step.
    pub fn advance<E, S>(&mut self, sampler: &mut S) -> Result<SimulationStatus, E>
    where
        S: FnMut(f64, &I::State) -> Result<(), E>,
    {
        if self.status() == SimulationStatus::Done {
            return Ok(SimulationStatus::Done);
        }
        if self.step_count % self.config.resolution == 0 {
            sampler(self.integrator.time(), self.integrator.state())?;
            self.sample_count += 1;
        }
        self.integrator.step(self.config.timestep);
        self.step_count += 1;
        Ok(self.status())
    }

    pub fn run<E, S>(&mut self, mut sampler: S) -> Result<RunSummary, E>
    where
        S: FnMut(f64, &I::State) -> Result<(), E>,
    {
        while self.advance(&mut sampler)? == SimulationStatus::Running {}
        Ok(self.summary())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            steps: self.step_count,
            samples: self.sample_count,
            t_final: self.integrator.time(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ode_solvers::{ExplicitEuler, RungeKutta4};
    use approx::assert_relative_eq;
    use std::convert::Infallible;

    fn constant_rate() -> impl Fn(f64, f64) -> f64 {
        |_: f64, _: f64| 1.0
    }

    #[test]
    fn loop_boundary_is_strict() {
        let config = SimulationConfig::new(1.0, 0.3, 1).unwrap();
        let mut driver = SimulationDriver::new(ExplicitEuler::new(constant_rate(), 0.0, 0.0), config);
        let mut times = Vec::new();
        let summary = driver
            .run(|t, _| {
                times.push(t);
                Ok::<(), Infallible>(())
            })
            .unwrap();

        assert_eq!(summary.steps, 4);
        assert_eq!(summary.samples, 4);
        assert_eq!(times.len(), 4);
        for (t, expected) in times.iter().zip([0.0, 0.3, 0.6, 0.9]) {
            assert_relative_eq!(*t, expected, epsilon = 1e-12);
        }
        assert_relative_eq!(summary.t_final, 1.2, epsilon = 1e-12);
        assert_eq!(driver.status(), SimulationStatus::Done);
    }

    #[test]
    fn resolution_strides_samples() {
        let config = SimulationConfig::new(1.0, 0.125, 3).unwrap();
        let mut driver = SimulationDriver::new(RungeKutta4::new(constant_rate(), 0.0, 0.0), config);
        let mut sampled_steps = Vec::new();
        let summary = driver
            .run(|t, y: &f64| {
                // y tracks t exactly for a unit rate
                assert_relative_eq!(*y, t, epsilon = 1e-12);
                sampled_steps.push((t / 0.125).round() as usize);
                Ok::<(), Infallible>(())
            })
            .unwrap();

        assert_eq!(summary.steps, 8);
        assert_eq!(sampled_steps, vec![0, 3, 6]);
        assert_eq!(summary.samples, 3);
    }

    #[test]
    fn start_past_the_end_is_done() {
        let config = SimulationConfig::new(1.0, 0.1, 1).unwrap();
        let mut driver = SimulationDriver::new(ExplicitEuler::new(constant_rate(), 1.0, 0.0), config);
        assert_eq!(driver.status(), SimulationStatus::Done);
        let summary = driver.run(|_, _| Ok::<(), Infallible>(())).unwrap();
        assert_eq!(summary.steps, 0);
        assert_eq!(summary.samples, 0);
    }

    #[test]
    fn sampler_error_stops_the_run() {
        let config = SimulationConfig::new(10.0, 0.5, 1).unwrap();
        let mut driver = SimulationDriver::new(ExplicitEuler::new(constant_rate(), 0.0, 0.0), config);
        let result = driver.run(|t, _| if t > 2.0 { Err("sink closed") } else { Ok(()) });
        assert_eq!(result, Err("sink closed"));
        // samples at 0.0, 0.5, ..., 2.0 succeed, then the step count stops
        assert_eq!(driver.step_count(), 5);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert!(SimulationConfig::new(1.0, 0.0, 1).is_err());
        assert!(SimulationConfig::new(1.0, -0.1, 1).is_err());
        assert!(SimulationConfig::new(1.0, f64::NAN, 1).is_err());
        assert!(SimulationConfig::new(1.0, 0.1, 0).is_err());
    }

    #[test]
    fn config_from_parameters() {
        let params =
            ParameterSet::with_defaults(&[("t_end", 2.0), ("stepsize", 0.01), ("resolution", 2.7)]);
        let config = SimulationConfig::from_parameters(&params).unwrap();
        assert_eq!(config, SimulationConfig::new(2.0, 0.01, 2).unwrap());

        let params = ParameterSet::with_defaults(&[("t_end", 2.0), ("stepsize", 0.01)]);
        assert_eq!(
            SimulationConfig::from_parameters(&params),
            Err(ParameterError::Missing("resolution".to_owned()))
        );
    }
}
