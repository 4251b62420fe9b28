//! Multi-body vehicle model (29 states).
//!
//! A sprung body (roll, pitch, heave, lateral and yaw), two unsprung axle
//! masses, four spinning wheels and two compliant roll-axis joints. Tire forces
//! come from the combined-slip Pacejka model in [`crate::tire`].
//!
//! Below [`LOW_SPEED_THRESHOLD`] the planar states follow the CoG-referenced
//! kinematic model and every slip quantity is zero, so standstill evaluates
//! without dividing by speed.
//!
//! [`evaluate`] returns both the derivative and the state after the anti-spin
//! guard (wheel spins never go negative). Integrators that step the state
//! should carry the corrected state forward.

pub mod suspension;
pub mod wheels;

use tracing::{debug, trace, warn};

use crate::GRAVITY;
use crate::constraints::constrain;
use crate::kinematic::cog_rates;
use crate::params::MultiBodyParameters;
use crate::state::{
    ControlInput, DELTA_Y_F, DELTA_Y_R, KsState, MbState, PITCH, PITCH_RATE, ROLL, ROLL_RATE, STEER,
    StState, UNSPRUNG_FRONT, UNSPRUNG_REAR, VX, VY, VZ, WHEEL_SPIN, WheelId, YAW, YAW_RATE, Z,
};
use suspension::{Axle, JointForce};
use wheels::TireForce;

/// Below this absolute longitudinal speed the kinematic branch is used.
pub const LOW_SPEED_THRESHOLD: f64 = 0.1; // m/s

/// Below this |cos φ| the roll-moment sum is numerically unreliable.
const ROLL_COS_WARN: f64 = 1e-3;

/// Result of one multi-body evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiBodyEvaluation {
    /// Input state with negative wheel spins clamped to zero.
    pub state: MbState,
    pub derivative: MbState,
}

// ============================================
// ----- state views -----
// ============================================

/// Unsprung axle mass states.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Unsprung {
    pub roll: f64,
    pub roll_rate: f64,
    pub vy: f64,
    pub z: f64,
    pub vz: f64,
}

impl Unsprung {
    fn read(x: &MbState, base: usize) -> Self {
        Self { roll: x[base], roll_rate: x[base + 1], vy: x[base + 2], z: x[base + 3], vz: x[base + 4] }
    }
}

/// Named read-only view of a multi-body state.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Body {
    pub steer: f64,
    pub vx: f64,
    pub yaw: f64,
    pub yaw_rate: f64,
    pub roll: f64,
    pub roll_rate: f64,
    pub pitch: f64,
    pub pitch_rate: f64,
    pub vy: f64,
    pub z: f64,
    pub vz: f64,
    pub front: Unsprung,
    pub rear: Unsprung,
    pub spin: [f64; 4],
    pub delta_y_f: f64,
    pub delta_y_r: f64,
}

impl Body {
    pub(crate) fn read(x: &MbState) -> Self {
        Self {
            steer: x[STEER],
            vx: x[VX],
            yaw: x[YAW],
            yaw_rate: x[YAW_RATE],
            roll: x[ROLL],
            roll_rate: x[ROLL_RATE],
            pitch: x[PITCH],
            pitch_rate: x[PITCH_RATE],
            vy: x[VY],
            z: x[Z],
            vz: x[VZ],
            front: Unsprung::read(x, UNSPRUNG_FRONT),
            rear: Unsprung::read(x, UNSPRUNG_REAR),
            spin: WheelId::ALL.map(|w| x[w.spin_index()]),
            delta_y_f: x[DELTA_Y_F],
            delta_y_r: x[DELTA_Y_R],
        }
    }
}

// ============================================
// ----- initialization -----
// ============================================

/// Expands a single-track state `[x, y, δ, v, ψ, ψ̇, β]` into a multi-body
/// state resting on its tires: no roll, pitch or heave, unsprung masses moving
/// with the body above their axle, tires deflected by the static axle load and
/// wheels rolling freely.
pub fn initial_state(st: &StState, p: &MultiBodyParameters) -> MbState {
    let g = &p.geometry;
    let m = &p.masses;
    let l = g.wheelbase();
    let (v, yaw_rate, beta) = (st[VX], st[YAW_RATE], st[6]);

    let static_front = m.m_s * GRAVITY * g.b / l + m.m_uf * GRAVITY;
    let static_rear = m.m_s * GRAVITY * g.a / l + m.m_ur * GRAVITY;

    let vx = beta.cos() * v;
    let vy = beta.sin() * v;

    let mut x = MbState::zeros();
    x[0] = st[0];
    x[1] = st[1];
    x[STEER] = st[STEER];
    x[VX] = vx;
    x[YAW] = st[YAW];
    x[YAW_RATE] = yaw_rate;
    x[VY] = vy;
    x[UNSPRUNG_FRONT + 2] = vy + g.a * yaw_rate;
    x[UNSPRUNG_FRONT + 3] = static_front / (2.0 * p.suspension.k_zt);
    x[UNSPRUNG_REAR + 2] = vy - g.b * yaw_rate;
    x[UNSPRUNG_REAR + 3] = static_rear / (2.0 * p.suspension.k_zt);
    for w in WheelId::ALL {
        x[w.spin_index()] = vx / g.r_w;
    }
    x
}

// ============================================
// ----- dynamics -----
// ============================================

/// Multi-body derivative of the guarded state. See [`evaluate`].
pub fn vehicle_dynamics_mb(x: &MbState, u: ControlInput, p: &MultiBodyParameters) -> MbState {
    evaluate(x, u, p).derivative
}

/// Evaluates the multi-body model.
///
/// Forces are computed from `x` as given. Afterwards any negative wheel spin
/// is clamped to zero in the returned state, and its derivative is zeroed.
pub fn evaluate(x: &MbState, u: ControlInput, p: &MultiBodyParameters) -> MultiBodyEvaluation {
    let u = constrain(x[STEER], x[VX], u, &p.limits);
    let s = Body::read(x);
    let g = &p.geometry;
    let m = &p.masses;
    let i = &p.inertia;

    let low_speed = s.vx.abs() < LOW_SPEED_THRESHOLD;

    let (sin_roll, cos_roll) = s.roll.sin_cos();
    if cos_roll.abs() < ROLL_COS_WARN {
        warn!(roll = s.roll, "multi-body: sprung roll near ±π/2, roll moment ill-conditioned");
    }

    // ----- tires -----
    let f_z = wheels::vertical_loads(&s, p);
    let contact_speed = wheels::contact_speeds(&s, g);
    let kappa = wheels::slip_ratios(&s, &contact_speed, g.r_w, low_speed);
    let alpha = wheels::slip_angles(&s, g, low_speed);
    let travel = suspension::travel(&s, p);
    let gamma = wheels::camber_angles(&s, &travel.map(|t| t.z), &p.suspension);

    let tire: [TireForce; 4] = WheelId::ALL.map(|w| {
        let k = w.index();
        wheels::tire_force(kappa[k], alpha[k], gamma[k], f_z[k], &p.tire)
    });

    // Front tire forces rotated into the body frame.
    let (sin_steer, cos_steer) = s.steer.sin_cos();
    let body_force = WheelId::ALL.map(|w| {
        let t = tire[w.index()];
        if w.is_front() {
            TireForce {
                fx: t.fx * cos_steer - t.fy * sin_steer,
                fy: t.fy * cos_steer + t.fx * sin_steer,
            }
        } else {
            t
        }
    });

    // ----- suspension -----
    let spring = suspension::corner_forces(&s, &travel, p);
    let joint: [JointForce; 2] = Axle::BOTH.map(|a| suspension::compliant_joint(a, &s, p));

    trace!(?f_z, ?kappa, ?alpha, ?spring, "multi-body: corner state");

    // ----- force and moment sums -----
    let mut sum_x = 0.0; // body longitudinal
    let mut sum_n = 0.0; // yaw moment
    let mut spring_total = 0.0;
    let mut spring_roll = 0.0; // roll moment of the corner forces
    let mut spring_pitch = 0.0;
    for w in WheelId::ALL {
        let k = w.index();
        let (track, _, lever) = wheels::axle_of(w, &s, g);
        let half_track = w.lateral_sign() * 0.5 * track;
        sum_x += body_force[k].fx;
        sum_n += lever * body_force[k].fy + half_track * body_force[k].fx;
        spring_total += spring[k];
        spring_roll += half_track * spring[k];
        spring_pitch += lever * spring[k];
    }

    let joint_total = joint[0].force + joint[1].force;
    let sum_y_s = joint_total * cos_roll + spring_total * sin_roll;
    let sum_z_s = spring_total * cos_roll - joint_total * sin_roll;
    let sum_m_s = spring_pitch + sum_x * (g.h_s - s.z);

    let mut sum_l = spring_roll;
    // Per-axle unsprung roll moment, vertical and lateral force.
    let mut unsprung = [(0.0, 0.0, 0.0); 2];
    for (n, axle) in Axle::BOTH.into_iter().enumerate() {
        let u_axle = axle.unsprung(&s);
        let arm = axle.roll_axis_height(p) - g.r_w;
        let f_ra = joint[n].force;
        let (sin_u, cos_u) = u_axle.roll.sin_cos();

        sum_l -= f_ra / cos_roll * (g.h_s - s.z - g.r_w + u_axle.z - arm * cos_u);

        let mut roll_moment = -f_ra * arm;
        let mut vertical = f_ra * sin_roll;
        let mut lateral = -f_ra * cos_roll;
        for w in axle.wheels() {
            let k = w.index();
            let (track, _, _) = wheels::axle_of(w, &s, g);
            let half_track = w.lateral_sign() * 0.5 * track;
            roll_moment += -half_track * spring[k]
                + f_z[k] * (g.r_w * sin_u + half_track * cos_u - p.suspension.k_lt * tire[k].fy)
                - body_force[k].fy * (g.r_w - u_axle.z);
            vertical += f_z[k] - spring[k] * cos_roll;
            lateral += body_force[k].fy - spring[k] * sin_roll;
        }
        unsprung[n] = (roll_moment, vertical, lateral);
    }

    // ----- derivative -----
    let mut f = MbState::zeros();

    if low_speed {
        trace!(vx = s.vx, "multi-body: kinematic branch");
        let l = g.wheelbase();
        let ks = KsState::new(x[0], x[1], s.steer, s.vx, s.yaw);
        let planar = cog_rates(&ks, u, g.a, g.b);
        f.fixed_rows_mut::<5>(0).copy_from(&planar);

        let tan_steer = s.steer.tan();
        let d_beta = g.b * u.steering_velocity
            / (l * cos_steer.powi(2) * (1.0 + (tan_steer.powi(2) * g.b / l).powi(2)));
        f[YAW_RATE] = 1.0 / l
            * (u.acceleration * cos_roll * tan_steer - s.vx * sin_roll * d_beta * tan_steer
                + s.vx * cos_roll * u.steering_velocity / cos_steer.powi(2));
    } else {
        let beta = (s.vy / s.vx).atan();
        let speed = s.vx.hypot(s.vy);
        f[0] = (beta + s.yaw).cos() * speed;
        f[1] = (beta + s.yaw).sin() * speed;
        f[STEER] = u.steering_velocity;
        f[VX] = sum_x / m.m + s.yaw_rate * s.vy;
        f[YAW] = s.yaw_rate;
        f[YAW_RATE] =
            (sum_n + i.i_xz_s / i.i_phi_s * sum_l) / (i.i_z - i.i_xz_s.powi(2) / i.i_phi_s);
    }

    // sprung mass
    f[ROLL] = s.roll_rate;
    f[ROLL_RATE] = (i.i_xz_s / i.i_z * sum_n + sum_l) / (i.i_phi_s - i.i_xz_s.powi(2) / i.i_z);
    f[PITCH] = s.pitch_rate;
    f[PITCH_RATE] = sum_m_s / i.i_y_s;
    f[VY] = sum_y_s / m.m_s - s.yaw_rate * s.vx;
    f[Z] = s.vz;
    f[VZ] = GRAVITY - sum_z_s / m.m_s;

    // unsprung masses
    for (n, axle) in Axle::BOTH.into_iter().enumerate() {
        let (base, mass, inertia) = match axle {
            Axle::Front => (UNSPRUNG_FRONT, m.m_uf, i.i_uf),
            Axle::Rear => (UNSPRUNG_REAR, m.m_ur, i.i_ur),
        };
        let u_axle = axle.unsprung(&s);
        let (roll_moment, vertical, lateral) = unsprung[n];
        f[base] = u_axle.roll_rate;
        f[base + 1] = roll_moment / inertia;
        f[base + 2] = lateral / mass - s.yaw_rate * s.vx;
        f[base + 3] = u_axle.vz;
        f[base + 4] = GRAVITY - vertical / mass;
    }

    // wheels
    let (brake, engine) = if u.acceleration > 0.0 {
        (0.0, m.m * g.r_w * u.acceleration)
    } else {
        (m.m * g.r_w * u.acceleration, 0.0)
    };
    let split = &p.torque_split;
    for w in WheelId::ALL {
        let (brake_share, engine_share) =
            if w.is_front() { (split.t_sb, split.t_se) } else { (1.0 - split.t_sb, 1.0 - split.t_se) };
        f[w.spin_index()] = (-g.r_w * tire[w.index()].fx
            + 0.5 * brake_share * brake
            + 0.5 * engine_share * engine)
            / i.i_y_w;
    }

    f[DELTA_Y_F] = joint[0].deflection_rate;
    f[DELTA_Y_R] = joint[1].deflection_rate;

    // ----- anti-spin guard -----
    let mut state = *x;
    for w in WheelId::ALL {
        let k = w.spin_index();
        if state[k] < 0.0 {
            debug!(wheel = %w, spin = state[k], "multi-body: negative wheel spin clamped");
            state[k] = 0.0;
            f[k] = 0.0;
        }
    }

    MultiBodyEvaluation { state, derivative: f }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use approx::assert_relative_eq;

    fn escort() -> MultiBodyParameters {
        presets::FORD_ESCORT
    }

    #[test]
    fn initial_state_expands_single_track_state() {
        let p = escort();
        let x = initial_state(&StState::from([0.0, 0.0, 0.05, 15.0, 0.0, 0.1, 0.02]), &p);
        assert_relative_eq!(x[VX], 14.997000099998667, max_relative = 1e-12);
        assert_relative_eq!(x[VY], 0.2999800003999962, max_relative = 1e-12);
        assert_relative_eq!(x[UNSPRUNG_FRONT + 2], 0.38837200039999625, max_relative = 1e-12);
        assert_relative_eq!(x[UNSPRUNG_FRONT + 3], 0.019535195355889913, max_relative = 1e-12);
        assert_relative_eq!(x[UNSPRUNG_REAR + 2], 0.14910400039999622, max_relative = 1e-12);
        assert_relative_eq!(x[UNSPRUNG_REAR + 3], 0.012147780113258958, max_relative = 1e-12);
        for w in WheelId::ALL {
            assert_relative_eq!(x[w.spin_index()], 43.595930523251944, max_relative = 1e-12);
        }
        assert_eq!(x[ROLL], 0.0);
        assert_eq!(x[DELTA_Y_F], 0.0);
    }

    #[test]
    fn matches_reference_derivative() {
        let p = escort();
        let x = initial_state(&StState::from([0.0, 0.0, 0.05, 15.0, 0.0, 0.1, 0.02]), &p);
        let f = vehicle_dynamics_mb(&x, ControlInput::new(0.1, 1.0), &p);

        let expected: [(usize, f64); 20] = [
            (0, 14.997000099998667),
            (1, 0.2999800003999963),
            (2, 0.1),
            (3, 0.13943885467813233),
            (4, 0.1),
            (5, 2.4806021282640445),
            (9, 0.0965652816480498),
            (10, -1.4997000099998667),
            (12, 1.2698280378919922),
            (14, -40.06383722062722),
            (15, 53.25828508174407),
            (17, -13.028023924599106),
            (19, 10.77937164101961),
            (20, -16.52140817822019),
            (22, -8.135944284841377),
            (23, 178.69604644779523),
            (24, 30.978977010483526),
            (25, 35.3482708359193),
            (26, -60.47560124290295),
            (27, 0.0),
        ];
        for (k, value) in expected {
            assert_relative_eq!(f[k], value, epsilon = 1e-6, max_relative = 1e-6);
        }
        // Kinematic-only states.
        for k in [ROLL, PITCH, Z, UNSPRUNG_FRONT, UNSPRUNG_FRONT + 3, UNSPRUNG_REAR, UNSPRUNG_REAR + 3] {
            assert_eq!(f[k], 0.0, "state {k}");
        }
    }

    #[test]
    fn standstill_uses_kinematic_branch() {
        let p = escort();
        let x = initial_state(&StState::zeros(), &p);
        let f = vehicle_dynamics_mb(&x, ControlInput::default(), &p);
        for k in 0..=YAW_RATE {
            assert_eq!(f[k], 0.0, "state {k}");
        }
        assert_eq!(f[ROLL_RATE], 0.0);
        assert!(f.iter().all(|v| v.is_finite()));

        // Tire offsets brake the resting wheels; a step past zero spin is
        // pulled back by the guard.
        let stepped = x + f * 0.01;
        let out = evaluate(&stepped, ControlInput::default(), &p);
        for w in WheelId::ALL {
            assert!(stepped[w.spin_index()] < 0.0);
            assert_eq!(out.state[w.spin_index()], 0.0);
            assert_eq!(out.derivative[w.spin_index()], 0.0);
        }
    }

    #[test]
    fn negative_spin_is_clamped_in_state_and_derivative() {
        let p = escort();
        let mut x = initial_state(&StState::from([0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0]), &p);
        x[WheelId::RL.spin_index()] = -2.0;
        let out = evaluate(&x, ControlInput::new(0.0, -5.0), &p);
        assert_eq!(out.state[WheelId::RL.spin_index()], 0.0);
        assert_eq!(out.derivative[WheelId::RL.spin_index()], 0.0);
        assert_eq!(out.state[WheelId::FL.spin_index()], x[WheelId::FL.spin_index()]);
        // Input is untouched.
        assert_eq!(x[WheelId::RL.spin_index()], -2.0);
    }

    #[test]
    fn throttle_spins_driven_wheels_only() {
        // T_se = 1: all engine torque goes to the front axle.
        let p = escort();
        let x = initial_state(&StState::from([0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0]), &p);
        let coast = vehicle_dynamics_mb(&x, ControlInput::default(), &p);
        let drive = vehicle_dynamics_mb(&x, ControlInput::new(0.0, 3.0), &p);
        assert!(drive[WheelId::FL.spin_index()] > coast[WheelId::FL.spin_index()]);
        assert_eq!(drive[WheelId::RL.spin_index()], coast[WheelId::RL.spin_index()]);
    }

    #[test]
    fn brake_torque_follows_brake_split() {
        let p = escort();
        let x = initial_state(&StState::from([0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0]), &p);
        let decel = -5.0;
        let coast = vehicle_dynamics_mb(&x, ControlInput::default(), &p);
        let brake = vehicle_dynamics_mb(&x, ControlInput::new(0.0, decel), &p);

        let total = p.masses.m * p.geometry.r_w * decel;
        let t_sb = p.torque_split.t_sb;
        for w in WheelId::ALL {
            let k = w.spin_index();
            let share = if w.is_front() { t_sb } else { 1.0 - t_sb };
            let torque = (brake[k] - coast[k]) * p.inertia.i_y_w;
            assert_relative_eq!(torque, 0.5 * share * total, max_relative = 1e-9);
        }
    }

    #[test]
    fn matches_reference_derivative_with_body_roll_and_braking() {
        let p = escort();
        let mut x = initial_state(&StState::from([0.0, 0.0, 0.05, 15.0, 0.0, 0.1, 0.02]), &p);
        x[ROLL] = 0.03;
        x[ROLL_RATE] = 0.1;
        x[PITCH] = 0.01;
        x[PITCH_RATE] = -0.05;
        x[UNSPRUNG_FRONT] = 0.02;
        x[UNSPRUNG_FRONT + 1] = 0.05;
        x[UNSPRUNG_REAR] = -0.01;
        x[UNSPRUNG_REAR + 1] = 0.03;
        x[DELTA_Y_F] = 0.002;
        x[DELTA_Y_R] = -0.001;

        let f = vehicle_dynamics_mb(&x, ControlInput::new(0.1, -3.0), &p);
        let expected = MbState::from([
            14.997000099998667,
            0.2999800003999963,
            0.1,
            0.34068999739673794,
            0.1,
            2.5256175003461134,
            0.1,
            -22.24142074641681,
            -0.05,
            -0.45519152478025793,
            4.788594779529017,
            0.0,
            1.299064061955276,
            0.05,
            -115.96151518145057,
            15.606824451590793,
            0.0,
            -17.649942993849876,
            0.03,
            148.92794232058893,
            -88.26570758226686,
            0.0,
            -3.5042473352567924,
            -267.2903344482252,
            -440.8791538502181,
            -33.15331290738873,
            -114.32565135296016,
            0.0,
            0.0,
        ]);
        for k in 0..29 {
            assert_relative_eq!(f[k], expected[k], epsilon = 1e-6, max_relative = 1e-6);
        }
    }

    #[test]
    fn derivative_is_deterministic() {
        let p = escort();
        let x = initial_state(&StState::from([1.0, 2.0, 0.02, 12.0, 0.3, 0.05, 0.01]), &p);
        let u = ControlInput::new(0.05, -2.0);
        assert_eq!(vehicle_dynamics_mb(&x, u, &p), vehicle_dynamics_mb(&x, u, &p));
    }
}
