// ==============================================================================
// kinematic.rs — KINEMATIC SINGLE-TRACK (BICYCLE) MODEL
// ------------------------------------------------------------------------------
// State: [x, y, δ, v, ψ]. No tire forces, no singularities: valid for every
// speed including standstill.
//
// vehicle_dynamics_ks(...)     : reference point on the rear axle
//     ẋ = v cos ψ,  ẏ = v sin ψ,  ψ̇ = v tan δ / l_wb
// vehicle_dynamics_ks_cog(...) : reference point at the centre of gravity
//     β = atan(tan δ · l_r / l_wb)
//     ẋ = v cos(β+ψ),  ẏ = v sin(β+ψ),  ψ̇ = v cos β tan δ / l_wb
//
// δ̇ and v̇ are the constrained control pair in both variants.
// ==============================================================================

use crate::constraints::constrain;
use crate::params::{ActuationLimits, SingleTrackParameters};
use crate::state::{ControlInput, KsState, STEER, VX, YAW};

/// Kinematic single-track derivative.
pub fn vehicle_dynamics_ks(x: &KsState, u: ControlInput, p: &SingleTrackParameters) -> KsState {
    let u = constrain(x[STEER], x[VX], u, &p.limits);
    rear_axle_rates(x, u, p.wheelbase())
}

/// Derivative with an already constrained input.
#[inline]
pub(crate) fn rear_axle_rates(x: &KsState, u: ControlInput, wheelbase: f64) -> KsState {
    let (v, yaw, delta) = (x[VX], x[YAW], x[STEER]);
    KsState::new(
        v * yaw.cos(),
        v * yaw.sin(),
        u.steering_velocity,
        u.acceleration,
        v / wheelbase * delta.tan(),
    )
}

/// Kinematic derivative referenced at the centre of gravity, for a vehicle
/// whose CoG sits `lf` behind the front and `lr` ahead of the rear axle.
pub fn vehicle_dynamics_ks_cog(
    x: &KsState,
    u: ControlInput,
    lf: f64,
    lr: f64,
    limits: &ActuationLimits,
) -> KsState {
    let u = constrain(x[STEER], x[VX], u, limits);
    cog_rates(x, u, lf, lr)
}

#[inline]
pub(crate) fn cog_rates(x: &KsState, u: ControlInput, lf: f64, lr: f64) -> KsState {
    let l_wb = lf + lr;
    let (v, yaw, delta) = (x[VX], x[YAW], x[STEER]);
    let beta = (delta.tan() * lr / l_wb).atan();
    KsState::new(
        v * (beta + yaw).cos(),
        v * (beta + yaw).sin(),
        u.steering_velocity,
        u.acceleration,
        v * beta.cos() * delta.tan() / l_wb,
    )
}
