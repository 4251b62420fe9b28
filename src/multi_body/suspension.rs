// ==============================================================================
// suspension.rs — SPRING/DAMPER CORNERS + COMPLIANT ROLL-AXIS JOINTS
// ------------------------------------------------------------------------------
// Corner travel (positive = compression), per wheel on an axle with lever l
// (+a front, −b rear) and track T:
//     z_S  = (h_s − R_w + z_u − z)/cos φ − h_s + R_w + l θ ± ½ (φ − φ_u) T
//     ż_S  = ż_u − ż + l θ̇ ± ½ (φ̇ − φ̇_u) T
//
// Corner force = static share of sprung weight − spring − damper ± roll-bar:
//     F_S = m_s g l'/(2(a+b)) − K_s z_S − K_sd ż_S ± (φ − φ_u) K_ts / T
// where l' is the lever of the OTHER axle.
//
// Each axle couples to the sprung mass through a compliant joint at the roll
// axis height h_ra. Its lateral deflection state δy (states 27/28) feeds:
//     δ   = Δz sin φ − δy cos φ − (h_ra − R_w) sin(Δφ)
//     δ̇   = (Δz cos φ + δy sin φ) φ̇ + Δż sin φ − Δẏ cos φ − (h_ra − R_w) cos(Δφ) Δφ̇
//     F_RA = K_ras δ + K_rad δ̇
// with Δẏ the lateral speed of the body over the axle relative to the unsprung
// mass; Δẏ is also the derivative of δy.
// ==============================================================================

use crate::GRAVITY;
use crate::multi_body::wheels::{PerWheel, axle_of};
use crate::multi_body::{Body, Unsprung};
use crate::params::MultiBodyParameters;
use crate::state::WheelId;

/// Front or rear axle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axle {
    Front,
    Rear,
}

impl Axle {
    pub const BOTH: [Axle; 2] = [Axle::Front, Axle::Rear];

    pub fn wheels(self) -> [WheelId; 2] {
        match self {
            Axle::Front => [WheelId::FL, WheelId::FR],
            Axle::Rear => [WheelId::RL, WheelId::RR],
        }
    }

    pub(crate) fn unsprung(self, s: &Body) -> &Unsprung {
        match self {
            Axle::Front => &s.front,
            Axle::Rear => &s.rear,
        }
    }

    /// Signed CoG distance: +a front, −b rear.
    pub(crate) fn lever(self, p: &MultiBodyParameters) -> f64 {
        match self {
            Axle::Front => p.geometry.a,
            Axle::Rear => -p.geometry.b,
        }
    }

    pub(crate) fn roll_axis_height(self, p: &MultiBodyParameters) -> f64 {
        match self {
            Axle::Front => p.geometry.h_raf,
            Axle::Rear => p.geometry.h_rar,
        }
    }

    /// Lateral deflection of the roll-axis joint (state 27 or 28).
    pub(crate) fn joint_deflection(self, s: &Body) -> f64 {
        match self {
            Axle::Front => s.delta_y_f,
            Axle::Rear => s.delta_y_r,
        }
    }
}

/// Suspension travel and travel rate at one corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Travel {
    pub z: f64,  // m
    pub dz: f64, // m/s
}

pub(crate) fn travel(s: &Body, p: &MultiBodyParameters) -> [Travel; 4] {
    let g = &p.geometry;
    let cos_roll = s.roll.cos();
    WheelId::ALL.map(|w| {
        let (track, u, lever) = axle_of(w, s, g);
        let side = w.lateral_sign() * 0.5 * track;
        Travel {
            z: (g.h_s - g.r_w + u.z - s.z) / cos_roll - g.h_s + g.r_w
                + lever * s.pitch
                + side * (s.roll - u.roll),
            dz: u.vz - s.vz + lever * s.pitch_rate + side * (s.roll_rate - u.roll_rate),
        }
    })
}

/// Spring, damper and roll-bar force at each corner, including the static
/// share of sprung weight.
pub(crate) fn corner_forces(s: &Body, travel: &[Travel; 4], p: &MultiBodyParameters) -> PerWheel {
    let g = &p.geometry;
    let k = &p.suspension;
    let l = g.wheelbase();
    WheelId::ALL.map(|w| {
        let (track, u, _) = axle_of(w, s, g);
        let (static_lever, spring, damper, roll_bar) = if w.is_front() {
            (g.b, k.k_sf, k.k_sdf, k.k_tsf)
        } else {
            (g.a, k.k_sr, k.k_sdr, k.k_tsr)
        };
        let t = travel[w.index()];
        p.masses.m_s * GRAVITY * static_lever / (2.0 * l) - t.z * spring - t.dz * damper
            + w.lateral_sign() * (s.roll - u.roll) * roll_bar / track
    })
}

/// Force in one roll-axis joint and the rate of its lateral deflection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JointForce {
    pub force: f64, // N
    pub deflection_rate: f64, // m/s
}

pub(crate) fn compliant_joint(axle: Axle, s: &Body, p: &MultiBodyParameters) -> JointForce {
    let g = &p.geometry;
    let u = axle.unsprung(s);
    let delta_y = axle.joint_deflection(s);
    let arm = axle.roll_axis_height(p) - g.r_w;
    let (sin_roll, cos_roll) = s.roll.sin_cos();

    let dz = g.h_s - g.r_w + u.z - s.z;
    let droll = s.roll - u.roll;
    let droll_rate = s.roll_rate - u.roll_rate;
    let dz_rate = u.vz - s.vz;
    let dy_rate = s.vy + axle.lever(p) * s.yaw_rate - u.vy;

    let delta = dz * sin_roll - delta_y * cos_roll - arm * droll.sin();
    let delta_rate = (dz * cos_roll + delta_y * sin_roll) * s.roll_rate + dz_rate * sin_roll
        - dy_rate * cos_roll
        - arm * droll.cos() * droll_rate;

    JointForce {
        force: delta * p.suspension.k_ras + delta_rate * p.suspension.k_rad,
        deflection_rate: dy_rate,
    }
}
