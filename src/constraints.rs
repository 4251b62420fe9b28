// ==============================================================================
// constraints.rs — ACTUATOR CONSTRAINT LAYER
// ------------------------------------------------------------------------------
// Clamps a raw (steering velocity, acceleration) command to what the actuators
// can physically deliver in the current state:
//
// - Hard stops: a command that drives further into a saturated steering angle
//   or speed bound is zeroed.
// - Rate limits: steering velocity in [sv_min, sv_max].
// - Torque limit: the positive acceleration ceiling derates as
//   a_max · v_switch / v above the switching velocity.
//
// Every model applies this layer to its raw input before use.
// ==============================================================================

use crate::params::ActuationLimits;
use crate::state::ControlInput;

/// Constrained steering velocity for the current steering angle.
pub fn clamp_steering(
    angle: f64,
    desired_velocity: f64,
    s_min: f64,
    s_max: f64,
    sv_min: f64,
    sv_max: f64,
) -> f64 {
    // Hard mechanical stops
    if (angle <= s_min && desired_velocity <= 0.0) || (angle >= s_max && desired_velocity >= 0.0) {
        0.0
    } else if desired_velocity <= sv_min {
        sv_min
    } else if desired_velocity >= sv_max {
        sv_max
    } else {
        desired_velocity
    }
}

/// Constrained longitudinal acceleration for the current speed.
pub fn clamp_acceleration(
    speed: f64,
    desired_accel: f64,
    v_switch: f64,
    a_max: f64,
    v_min: f64,
    v_max: f64,
) -> f64 {
    let pos_limit = if speed > v_switch { a_max * v_switch / speed } else { a_max };

    if (speed <= v_min && desired_accel <= 0.0) || (speed >= v_max && desired_accel >= 0.0) {
        0.0
    } else if desired_accel <= -a_max {
        -a_max
    } else if desired_accel >= pos_limit {
        pos_limit
    } else {
        desired_accel
    }
}

/// Applies both clamps to a raw command.
#[inline]
pub fn constrain(steering_angle: f64, speed: f64, raw: ControlInput, limits: &ActuationLimits) -> ControlInput {
    let s = &limits.steering;
    let l = &limits.longitudinal;
    ControlInput {
        steering_velocity: clamp_steering(steering_angle, raw.steering_velocity, s.min, s.max, s.v_min, s.v_max),
        acceleration: clamp_acceleration(speed, raw.acceleration, l.v_switch, l.a_max, l.v_min, l.v_max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: (f64, f64, f64, f64) = (-0.4, 0.4, -3.2, 3.2);

    fn steer(angle: f64, sv: f64) -> f64 {
        clamp_steering(angle, sv, S.0, S.1, S.2, S.3)
    }

    fn accel(v: f64, a: f64) -> f64 {
        clamp_acceleration(v, a, 7.0, 9.0, -5.0, 20.0)
    }

    #[test]
    fn steering_stops_at_hard_limits() {
        assert_eq!(steer(0.4, 1.0), 0.0);
        assert_eq!(steer(0.5, 0.0), 0.0);
        assert_eq!(steer(-0.4, -1.0), 0.0);
        // Steering back out of a stop is allowed.
        assert_eq!(steer(0.4, -1.0), -1.0);
        assert_eq!(steer(-0.4, 2.0), 2.0);
    }

    #[test]
    fn steering_velocity_is_rate_limited() {
        assert_eq!(steer(0.0, 10.0), 3.2);
        assert_eq!(steer(0.0, -10.0), -3.2);
        assert_eq!(steer(0.1, 0.7), 0.7);
    }

    #[test]
    fn acceleration_derates_above_switching_velocity() {
        assert_eq!(accel(5.0, 20.0), 9.0);
        assert_eq!(accel(14.0, 20.0), 9.0 * 7.0 / 14.0);
        // Braking is not derated.
        assert_eq!(accel(14.0, -20.0), -9.0);
    }

    #[test]
    fn acceleration_stops_at_speed_limits() {
        assert_eq!(accel(20.0, 1.0), 0.0);
        assert_eq!(accel(-5.0, -1.0), 0.0);
        assert_eq!(accel(-5.0, 1.0), 1.0);
        assert_eq!(accel(20.0, -1.0), -1.0);
    }

    #[test]
    fn clamps_are_idempotent() {
        for &(angle, sv) in &[(0.0, 5.0), (0.4, 1.0), (-0.2, -0.3), (1.0, -9.0)] {
            let once = steer(angle, sv);
            assert_eq!(steer(angle, once), once);
        }
        for &(v, a) in &[(0.0, 50.0), (12.0, 8.0), (-5.0, -3.0), (3.0, -30.0)] {
            let once = accel(v, a);
            assert_eq!(accel(v, once), once);
        }
    }
}
