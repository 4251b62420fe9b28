// ==============================================================================
// state.rs — STATE VECTORS, CONTROL INPUT, WHEEL IDS
// ------------------------------------------------------------------------------
// State layouts (all SI units, no conversion anywhere in the crate):
//
//   KsState (5)  : [x, y, δ, v_x, ψ]
//   StState (7)  : KsState + [ψ̇, β]
//   MbState (29) : [x, y, δ, v_x, ψ, ψ̇,
//                   φ, φ̇, θ, θ̇, v_y, z, v_z,                 (sprung mass)
//                   φ_f, φ̇_f, v_y,f, z_f, v_z,f,             (unsprung front)
//                   φ_r, φ̇_r, v_y,r, z_r, v_z,r,             (unsprung rear)
//                   ω_FL, ω_FR, ω_RL, ω_RR,                  (wheel spin)
//                   Δy_f, Δy_r]                              (compliant joints)
//
// Derivative vectors share the layout of their state.
// ==============================================================================

use std::fmt;

use nalgebra::SVector;
use serde::{Deserialize, Serialize};

/// Kinematic single-track state.
pub type KsState = SVector<f64, 5>;
/// Dynamic single-track state.
pub type StState = SVector<f64, 7>;
/// Multi-body state.
pub type MbState = SVector<f64, 29>;

// Indices shared by every model.
pub const X: usize = 0;
pub const Y: usize = 1;
pub const STEER: usize = 2;
pub const VX: usize = 3;
pub const YAW: usize = 4;
pub const YAW_RATE: usize = 5;

// Single-track only.
pub const SLIP_ANGLE: usize = 6;

// Multi-body only.
pub const ROLL: usize = 6;
pub const ROLL_RATE: usize = 7;
pub const PITCH: usize = 8;
pub const PITCH_RATE: usize = 9;
pub const VY: usize = 10;
pub const Z: usize = 11;
pub const VZ: usize = 12;
pub const UNSPRUNG_FRONT: usize = 13;
pub const UNSPRUNG_REAR: usize = 18;
pub const WHEEL_SPIN: usize = 23;
pub const DELTA_Y_F: usize = 27;
pub const DELTA_Y_R: usize = 28;

/// The only actuation channel for every model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    pub steering_velocity: f64, // rad/s
    pub acceleration: f64,      // m/s²
}

impl ControlInput {
    pub const fn new(steering_velocity: f64, acceleration: f64) -> Self {
        Self { steering_velocity, acceleration }
    }
}

impl From<[f64; 2]> for ControlInput {
    fn from([steering_velocity, acceleration]: [f64; 2]) -> Self {
        Self { steering_velocity, acceleration }
    }
}

impl From<ControlInput> for [f64; 2] {
    fn from(u: ControlInput) -> Self {
        [u.steering_velocity, u.acceleration]
    }
}

// ============================================
// Wheel identification
// ============================================

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum WheelId { FL, FR, RL, RR }

impl WheelId {
    /// Storage order of the wheel-spin block in `MbState`.
    pub const ALL: [WheelId; 4] = [WheelId::FL, WheelId::FR, WheelId::RL, WheelId::RR];

    pub const fn index(self) -> usize {
        match self {
            WheelId::FL => 0,
            WheelId::FR => 1,
            WheelId::RL => 2,
            WheelId::RR => 3,
        }
    }

    /// Position of this wheel's spin in `MbState`.
    pub const fn spin_index(self) -> usize {
        WHEEL_SPIN + self.index()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            WheelId::FL => "FL",
            WheelId::FR => "FR",
            WheelId::RL => "RL",
            WheelId::RR => "RR",
        }
    }

    pub const fn is_front(self) -> bool {
        matches!(self, WheelId::FL | WheelId::FR)
    }

    pub const fn is_left(self) -> bool {
        matches!(self, WheelId::FL | WheelId::RL)
    }

    /// +1 for left wheels, -1 for right wheels (left is +y).
    pub const fn lateral_sign(self) -> f64 {
        if self.is_left() { 1.0 } else { -1.0 }
    }
}

impl fmt::Display for WheelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_spin_block_matches_storage_order() {
        let spins: Vec<usize> = WheelId::ALL.iter().map(|w| w.spin_index()).collect();
        assert_eq!(spins, vec![23, 24, 25, 26]);
        assert_eq!(WheelId::RR.spin_index() + 1, DELTA_Y_F);
    }

    #[test]
    fn corner_predicates() {
        assert!(WheelId::FL.is_front() && WheelId::FL.is_left());
        assert!(!WheelId::RR.is_front() && !WheelId::RR.is_left());
        assert_eq!(WheelId::FR.lateral_sign(), -1.0);
        assert_eq!(WheelId::RL.to_string(), "RL");
    }

    #[test]
    fn control_converts_from_pair() {
        let u = ControlInput::from([0.15, -2.0]);
        assert_eq!(u, ControlInput::new(0.15, -2.0));
        assert_eq!(<[f64; 2]>::from(u), [0.15, -2.0]);
    }
}
