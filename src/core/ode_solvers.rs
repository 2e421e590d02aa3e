//! Explicit fixed-step ODE solvers

use std::ops::{Add, Mul};

/// Minimal algebra required by the integrators: element-wise addition and
/// scaling by a real number. Implemented for `f64` and the `nalgebra` vectors.
pub trait OdeState: Clone + Add<Output = Self> + Mul<f64, Output = Self> {}

impl<T> OdeState for T where T: Clone + Add<Output = T> + Mul<f64, Output = T> {}

/// Single explicit Euler step:  x + dt * f(t, x)
pub fn euler_step<T, F>(dt: f64, t: f64, x: T, dynamics: &F) -> T
where
    T: OdeState,
    F: Fn(f64, T) -> T,
{
    let x_dot = dynamics(t, x.clone());
    x + x_dot * dt
}

/// Single step of the classical fourth-order Runge-Kutta method.
pub fn rk4_method_step<T, F>(dt: f64, t: f64, x: T, dynamics: &F) -> T
where
    T: OdeState,
    F: Fn(f64, T) -> T,
{
    let t_mid = t + 0.5 * dt;
    let t_next = t + dt;
    let k1 = dynamics(t, x.clone());
    let k2 = dynamics(t_mid, x.clone() + k1.clone() * (0.5 * dt));
    let k3 = dynamics(t_mid, x.clone() + k2.clone() * (0.5 * dt));
    let k4 = dynamics(t_next, x.clone() + k3.clone() * dt);
    let one_by_six_dt = dt / 6.0;
    let x_delta = (k1 + k2 * 2.0 + k3 * 2.0 + k4) * one_by_six_dt;
    x + x_delta
}

/// Common interface of the fixed-step integrators, used by the simulation driver.
pub trait Integrator {
    type State: OdeState;

    /// Advance time by exactly `timestep` and return the new state.
    fn step(&mut self, timestep: f64) -> &Self::State;

    fn time(&self) -> f64;

    fn state(&self) -> &Self::State;
}

/// Forward (explicit) Euler integrator. First order.
///
/// Owns the current `(t, y)` pair and the dynamics. There is deliberately no
/// `Default`: an integrator only exists once it has an initial condition.
#[derive(Debug, Clone)]
pub struct ExplicitEuler<T, F> {
    t_cur: f64,
    y_cur: T,
    dynamics: F,
}

impl<T, F> ExplicitEuler<T, F>
where
    T: OdeState,
    F: Fn(f64, T) -> T,
{
    pub fn new(dynamics: F, t_init: f64, y_init: T) -> Self {
        ExplicitEuler {
            t_cur: t_init,
            y_cur: y_init,
            dynamics,
        }
    }
}

impl<T, F> Integrator for ExplicitEuler<T, F>
where
    T: OdeState,
    F: Fn(f64, T) -> T,
{
    type State = T;

    fn step(&mut self, timestep: f64) -> &T {
        self.y_cur = euler_step(timestep, self.t_cur, self.y_cur.clone(), &self.dynamics);
        self.t_cur += timestep;
        &self.y_cur
    }

    fn time(&self) -> f64 {
        self.t_cur
    }

    fn state(&self) -> &T {
        &self.y_cur
    }
}

/// Classical fourth-order Runge-Kutta integrator.
///
/// The four stage derivatives are recomputed from scratch on every step, so
/// nothing carries over between calls apart from `(t, y)`.
#[derive(Debug, Clone)]
pub struct RungeKutta4<T, F> {
    t_cur: f64,
    y_cur: T,
    dynamics: F,
}

impl<T, F> RungeKutta4<T, F>
where
    T: OdeState,
    F: Fn(f64, T) -> T,
{
    pub fn new(dynamics: F, t_init: f64, y_init: T) -> Self {
        RungeKutta4 {
            t_cur: t_init,
            y_cur: y_init,
            dynamics,
        }
    }
}

impl<T, F> Integrator for RungeKutta4<T, F>
where
    T: OdeState,
    F: Fn(f64, T) -> T,
{
    type State = T;

    fn step(&mut self, timestep: f64) -> &T {
        self.y_cur = rk4_method_step(timestep, self.t_cur, self.y_cur.clone(), &self.dynamics);
        self.t_cur += timestep;
        &self.y_cur
    }

    fn time(&self) -> f64 {
        self.t_cur
    }

    fn state(&self) -> &T {
        &self.y_cur
    }
}
