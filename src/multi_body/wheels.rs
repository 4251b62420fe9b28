// ==============================================================================
// wheels.rs — PER-WHEEL CONTACT KINEMATICS + TIRE FORCES
// ------------------------------------------------------------------------------
// For each corner (FL, FR, RL, RR) this module derives, in the body frame:
// - vertical tire load from unsprung height/roll and tire vertical stiffness
// - contact-patch rolling speed u_w (negative values zeroed)
// - longitudinal slip ratio κ = 1 − R_w ω / u_w
// - lateral slip angle α (front wheels relative to the steered wheel plane)
// - camber angle γ from body roll and suspension travel
// - combined-slip tire forces (F_x, F_y) in the wheel frame
//
// Left wheels sit at +T/2 in y; `WheelId::lateral_sign()` carries that sign.
// Slip quantities are zero while |v_x| is below the low-speed threshold.
// ==============================================================================

use crate::multi_body::{Body, Unsprung};
use crate::params::{Geometry, MultiBodyParameters, Suspension, TireParameters};
use crate::state::WheelId;
use crate::tire::{lateral, longitudinal};

/// Per-wheel quantity in `WheelId::ALL` order.
pub type PerWheel = [f64; 4];

/// Tire force in the wheel frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TireForce {
    pub fx: f64, // N, along the wheel heading
    pub fy: f64, // N, perpendicular, +left
}

/// Track width, unsprung body and CoG lever arm (+a front, −b rear) of the
/// axle carrying `wheel`.
#[inline]
pub(crate) fn axle_of<'a>(wheel: WheelId, s: &'a Body, g: &Geometry) -> (f64, &'a Unsprung, f64) {
    if wheel.is_front() {
        (g.t_f, &s.front, g.a)
    } else {
        (g.t_r, &s.rear, -g.b)
    }
}

pub(crate) fn vertical_loads(s: &Body, p: &MultiBodyParameters) -> PerWheel {
    let g = &p.geometry;
    WheelId::ALL.map(|w| {
        let (track, u, _) = axle_of(w, s, g);
        (u.z + g.r_w * (u.roll.cos() - 1.0) - w.lateral_sign() * 0.5 * track * u.roll.sin())
            * p.suspension.k_zt
    })
}

/// Rolling speed of each contact patch along the wheel heading, clamped at 0.
pub(crate) fn contact_speeds(s: &Body, g: &Geometry) -> PerWheel {
    WheelId::ALL.map(|w| {
        let (track, _, lever) = axle_of(w, s, g);
        let along = s.vx + w.lateral_sign() * 0.5 * track * s.yaw_rate;
        let speed = if w.is_front() {
            along * s.steer.cos() + (s.vy + lever * s.yaw_rate) * s.steer.sin()
        } else {
            along
        };
        speed.max(0.0)
    })
}

pub(crate) fn slip_ratios(s: &Body, contact_speed: &PerWheel, r_w: f64, low_speed: bool) -> PerWheel {
    if low_speed {
        return [0.0; 4];
    }
    WheelId::ALL.map(|w| {
        let u_w = contact_speed[w.index()];
        // A patch that is not rolling forward has no defined slip ratio.
        if u_w > 0.0 { 1.0 - r_w * s.spin[w.index()] / u_w } else { 0.0 }
    })
}

pub(crate) fn slip_angles(s: &Body, g: &Geometry, low_speed: bool) -> PerWheel {
    if low_speed {
        return [0.0; 4];
    }
    WheelId::ALL.map(|w| {
        let (track, u, lever) = axle_of(w, s, g);
        let lateral = s.vy + lever * s.yaw_rate - u.roll_rate * (g.r_w - u.z);
        let along = s.vx + w.lateral_sign() * 0.5 * track * s.yaw_rate;
        // Same convention as the slip ratio: no heading speed, no slip angle.
        let alpha = if along == 0.0 { 0.0 } else { (lateral / along).atan() };
        if w.is_front() { alpha - s.steer } else { alpha }
    })
}

/// Camber from body roll plus linear/quadratic gain on suspension travel.
pub(crate) fn camber_angles(s: &Body, travel: &PerWheel, susp: &Suspension) -> PerWheel {
    WheelId::ALL.map(|w| {
        let z = travel[w.index()];
        let (d, e) = if w.is_front() { (susp.d_f, susp.e_f) } else { (susp.d_r, susp.e_r) };
        s.roll + w.lateral_sign() * (d * z + e * z.powi(2))
    })
}

/// Pure slip first, then the combined-slip reduction in both directions.
pub fn tire_force(kappa: f64, alpha: f64, gamma: f64, f_z: f64, tire: &TireParameters) -> TireForce {
    let f0_x = longitudinal::pure_slip(kappa, gamma, f_z, &tire.longitudinal);
    let pure_y = lateral::pure_slip(alpha, gamma, f_z, &tire.lateral);

    TireForce {
        fx: longitudinal::combined_slip(kappa, alpha, f0_x, &tire.longitudinal),
        fy: lateral::combined_slip(kappa, alpha, gamma, pure_y.mu, f_z, pure_y.force, &tire.lateral),
    }
}
