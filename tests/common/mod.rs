//! Shared fixed-step integration helpers for the model tests.

#![allow(dead_code)]

use aven_dynamics::{ControlInput, MbState, MultiBodyParameters, evaluate};
use nalgebra::SVector;

pub const DT: f64 = 1e-3; // s

/// One classic Runge-Kutta step.
pub fn rk4_step<const N: usize>(
    y: &SVector<f64, N>,
    dt: f64,
    f: impl Fn(&SVector<f64, N>) -> SVector<f64, N>,
) -> SVector<f64, N> {
    let k1 = f(y);
    let k2 = f(&(y + k1 * (dt / 2.0)));
    let k3 = f(&(y + k2 * (dt / 2.0)));
    let k4 = f(&(y + k3 * dt));
    y + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}

/// Integrates `f` from `x0` for `duration` seconds at fixed step `DT`.
pub fn integrate<const N: usize>(
    x0: SVector<f64, N>,
    duration: f64,
    f: impl Fn(&SVector<f64, N>) -> SVector<f64, N>,
) -> SVector<f64, N> {
    let steps = (duration / DT).round() as usize;
    (0..steps).fold(x0, |x, _| rk4_step(&x, DT, &f))
}

/// Multi-body integration that carries the spin-corrected state forward.
pub fn integrate_mb(x0: MbState, duration: f64, u: ControlInput, p: &MultiBodyParameters) -> MbState {
    let steps = (duration / DT).round() as usize;
    let derivative = |x: &MbState| evaluate(x, u, p).derivative;
    let x = (0..steps).fold(x0, |x, _| {
        let x = evaluate(&x, u, p).state;
        rk4_step(&x, DT, derivative)
    });
    evaluate(&x, u, p).state
}
