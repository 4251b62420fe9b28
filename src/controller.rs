// ==============================================================================
// controller.rs — PROPORTIONAL SPEED / STEERING CONTROLLER
// ------------------------------------------------------------------------------
// Turns a target (speed, steering angle) into the model's control pair.
//
// Steering: full-rate bang control outside a 1e-4 rad deadband,
//     δ̇ = sign(δ* − δ) · sv_max
//
// Speed: a = k_p (v* − v) with the gain picked by direction of travel and by
// whether the error asks for more or less speed:
//
//                      speeding up          slowing down
//     moving forward   10 a_max / v_max     10 a_max / −v_min
//     otherwise         2 a_max / v_max      2 a_max / −v_min
//
// The output is raw; the models clamp it through the constraint layer.
// ==============================================================================

use serde::{Deserialize, Serialize};

use crate::params::ActuationLimits;
use crate::state::ControlInput;

/// Steering errors at or below this magnitude command no steering motion.
pub const STEERING_DEADBAND: f64 = 1e-4; // rad

const FORWARD_GAIN: f64 = 10.0;
const REVERSE_GAIN: f64 = 2.0;

/// Desired operating point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlTarget {
    pub speed: f64,          // m/s
    pub steering_angle: f64, // rad
}

impl ControlTarget {
    /// Control pair driving `(current_speed, current_steering)` towards this target.
    pub fn control(&self, current_speed: f64, current_steering: f64, limits: &ActuationLimits) -> ControlInput {
        control(self.speed, self.steering_angle, current_speed, current_steering, limits)
    }
}

pub fn control(
    target_speed: f64,
    target_steering: f64,
    current_speed: f64,
    current_steering: f64,
    limits: &ActuationLimits,
) -> ControlInput {
    let steer_diff = target_steering - current_steering;
    let steering_velocity = if steer_diff.abs() > STEERING_DEADBAND {
        steer_diff.signum() * limits.steering.v_max
    } else {
        0.0
    };

    let l = &limits.longitudinal;
    let speed_diff = target_speed - current_speed;
    let gain = if current_speed > 0.0 { FORWARD_GAIN } else { REVERSE_GAIN };
    let kp = if speed_diff > 0.0 { gain * l.a_max / l.v_max } else { gain * l.a_max / -l.v_min };

    ControlInput { steering_velocity, acceleration: kp * speed_diff }
}
