// ==============================================================================
// single_track.rs — DYNAMIC SINGLE-TRACK MODEL (LINEAR TIRES)
// ------------------------------------------------------------------------------
// State: [x, y, δ, v, ψ, ψ̇, β].
//
// Mode switch on |v| < 0.5 m/s:
// - low speed : kinematic model on the first five states; ψ̈ follows from
//               differentiating ψ̇ = v tan δ / l_wb, and β̇ = 0. Keeps the two
//               branches consistent at the boundary.
// - otherwise : lateral/yaw dynamics with load-transfer-dependent axle
//               cornering forces. Every division by v lives in this branch.
//
// Axle loads (per unit mass) under longitudinal acceleration a:
//     front: g·l_r − a·h        rear: g·l_f + a·h
// ==============================================================================

use tracing::trace;

use crate::GRAVITY;
use crate::constraints::constrain;
use crate::kinematic::rear_axle_rates;
use crate::params::SingleTrackParameters;
use crate::state::{ControlInput, KsState, SLIP_ANGLE, STEER, StState, VX, YAW, YAW_RATE};

/// Below this absolute speed the kinematic branch is used.
pub const KINEMATIC_SWITCH_SPEED: f64 = 0.5; // m/s

/// Dynamic single-track derivative.
pub fn vehicle_dynamics_st(x: &StState, u: ControlInput, p: &SingleTrackParameters) -> StState {
    let u = constrain(x[STEER], x[VX], u, &p.limits);

    let v = x[VX];
    let delta = x[STEER];
    let l_wb = p.wheelbase();

    if v.abs() < KINEMATIC_SWITCH_SPEED {
        trace!(v, "single-track: kinematic branch");
        let ks: KsState = x.fixed_rows::<5>(0).into_owned();
        let f = rear_axle_rates(&ks, u, l_wb);
        let yaw_accel = u.acceleration / l_wb * delta.tan()
            + v / (l_wb * delta.cos().powi(2)) * u.steering_velocity;
        return StState::from([f[0], f[1], f[2], f[3], f[4], yaw_accel, 0.0]);
    }

    let (mu, m, i_z, h) = (p.mu, p.m, p.i_z, p.h);
    let (lf, lr, c_sf, c_sr) = (p.lf, p.lr, p.c_sf, p.c_sr);
    let (yaw_rate, beta, a) = (x[YAW_RATE], x[SLIP_ANGLE], u.acceleration);

    let front_load = GRAVITY * lr - a * h;
    let rear_load = GRAVITY * lf + a * h;

    let yaw_accel = -mu * m / (v * i_z * l_wb)
        * (lf.powi(2) * c_sf * front_load + lr.powi(2) * c_sr * rear_load)
        * yaw_rate
        + mu * m / (i_z * l_wb) * (lr * c_sr * rear_load - lf * c_sf * front_load) * beta
        + mu * m / (i_z * l_wb) * lf * c_sf * front_load * delta;

    let slip_rate = (mu / (v.powi(2) * l_wb) * (c_sr * rear_load * lr - c_sf * front_load * lf) - 1.0)
        * yaw_rate
        - mu / (v * l_wb) * (c_sr * rear_load + c_sf * front_load) * beta
        + mu / (v * l_wb) * (c_sf * front_load) * delta;

    let heading = beta + x[YAW];
    StState::from([
        v * heading.cos(),
        v * heading.sin(),
        u.steering_velocity,
        u.acceleration,
        yaw_rate,
        yaw_accel,
        slip_rate,
    ])
}
