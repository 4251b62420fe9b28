// ==============================================================================
// params.rs — VEHICLE PARAMETER SETS
// ------------------------------------------------------------------------------
// Immutable, named parameter aggregates. Loaded once by the caller (any serde
// format), validated once with `validate()`, then shared read-only by every
// derivative evaluation for the lifetime of the vehicle.
//
// - ActuationLimits       : steering + longitudinal actuator bounds (all models)
// - SingleTrackParameters : kinematic + dynamic single-track models
// - MultiBodyParameters   : 29-state model, grouped per subsystem
// ==============================================================================

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ParameterError;

// ============================================
// ----- actuation limits ---------------------
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteeringLimits {
    pub min: f64,   // rad
    pub max: f64,   // rad
    pub v_min: f64, // rad/s
    pub v_max: f64, // rad/s
}

impl SteeringLimits {
    pub fn validate(&self) -> Result<(), ParameterError> {
        ParameterError::check_range("steering angle", self.min, self.max)?;
        ParameterError::check_range("steering velocity", self.v_min, self.v_max)?;
        ParameterError::check_positive("steering.v_max", self.v_max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalLimits {
    pub v_min: f64,    // m/s (negative: reverse)
    pub v_max: f64,    // m/s
    pub v_switch: f64, // m/s, above this the positive acceleration derates
    pub a_max: f64,    // m/s²
}

impl LongitudinalLimits {
    pub fn validate(&self) -> Result<(), ParameterError> {
        ParameterError::check_range("velocity", self.v_min, self.v_max)?;
        // The controller scales its gains by 1/v_max and 1/|v_min|.
        ParameterError::check_within("longitudinal.v_min", self.v_min, f64::MIN, -f64::EPSILON)?;
        ParameterError::check_positive("longitudinal.v_max", self.v_max)?;
        ParameterError::check_positive("longitudinal.v_switch", self.v_switch)?;
        ParameterError::check_positive("longitudinal.a_max", self.a_max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActuationLimits {
    pub steering: SteeringLimits,
    pub longitudinal: LongitudinalLimits,
}

impl ActuationLimits {
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.steering.validate()?;
        self.longitudinal.validate()
    }
}

// ============================================
// ----- single-track vehicle -----------------
// ============================================

/// Parameters for the kinematic and dynamic single-track models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SingleTrackParameters {
    pub mu: f64,   // road-tire friction coefficient
    pub c_sf: f64, // front cornering stiffness coefficient [1/rad]
    pub c_sr: f64, // rear cornering stiffness coefficient [1/rad]
    pub lf: f64,   // CoG to front axle [m]
    pub lr: f64,   // CoG to rear axle [m]
    pub h: f64,    // CoG height [m]
    pub m: f64,    // total mass [kg]
    pub i_z: f64,  // yaw moment of inertia [kg m²]
    pub limits: ActuationLimits,
}

impl SingleTrackParameters {
    #[inline]
    pub fn wheelbase(&self) -> f64 {
        self.lf + self.lr
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        let result = self.check();
        if let Err(err) = &result {
            warn!(%err, "rejected single-track parameter set");
        }
        result
    }

    fn check(&self) -> Result<(), ParameterError> {
        ParameterError::check_finite("mu", self.mu)?;
        ParameterError::check_finite("C_Sf", self.c_sf)?;
        ParameterError::check_finite("C_Sr", self.c_sr)?;
        ParameterError::check_finite("h", self.h)?;
        ParameterError::check_positive("lf", self.lf)?;
        ParameterError::check_positive("lr", self.lr)?;
        ParameterError::check_positive("m", self.m)?;
        ParameterError::check_positive("I_z", self.i_z)?;
        self.limits.validate()
    }
}

// ============================================
// ----- multi-body vehicle -------------------
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Masses {
    pub m: f64,    // total [kg]
    pub m_s: f64,  // sprung [kg]
    pub m_uf: f64, // unsprung front [kg]
    pub m_ur: f64, // unsprung rear [kg]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub length: f64, // body length [m]
    pub width: f64,  // body width [m]
    pub a: f64,      // sprung CoG to front axle [m]
    pub b: f64,      // sprung CoG to rear axle [m]
    pub t_f: f64,    // track width front [m]
    pub t_r: f64,    // track width rear [m]
    pub h_cg: f64,   // CoG height of total mass [m]
    pub h_s: f64,    // sprung CoG height [m]
    pub h_raf: f64,  // roll axis height front [m]
    pub h_rar: f64,  // roll axis height rear [m]
    pub r_w: f64,    // effective wheel radius [m]
}

impl Geometry {
    #[inline]
    pub fn wheelbase(&self) -> f64 {
        self.a + self.b
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inertia {
    pub i_phi_s: f64, // sprung roll [kg m²]
    pub i_y_s: f64,   // sprung pitch [kg m²]
    pub i_z: f64,     // yaw [kg m²]
    pub i_xz_s: f64,  // sprung roll/yaw cross product [kg m²]
    pub i_uf: f64,    // unsprung front roll [kg m²]
    pub i_ur: f64,    // unsprung rear roll [kg m²]
    pub i_y_w: f64,   // wheel spin [kg m²]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Suspension {
    pub k_sf: f64,  // spring rate front [N/m]
    pub k_sdf: f64, // damping rate front [N s/m]
    pub k_sr: f64,  // spring rate rear [N/m]
    pub k_sdr: f64, // damping rate rear [N s/m]
    pub k_tsf: f64, // auxiliary roll stiffness front, usually negative [N m/rad]
    pub k_tsr: f64, // auxiliary roll stiffness rear [N m/rad]
    pub k_ras: f64, // compliant joint lateral spring rate [N/m]
    pub k_rad: f64, // compliant joint damping rate [N s/m]
    pub k_zt: f64,  // tire vertical spring rate [N/m]
    pub k_lt: f64,  // lateral compliance of tire + wheel + suspension [m/N]
    pub d_f: f64,   // camber per unit travel front [rad/m]
    pub d_r: f64,   // camber per unit travel rear [rad/m]
    pub e_f: f64,   // quadratic camber front [rad/m²]
    pub e_r: f64,   // quadratic camber rear [rad/m²]
}

/// Front share of brake and engine torque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorqueSplit {
    pub t_sb: f64, // brake, 0..1
    pub t_se: f64, // engine, 0..1
}

/// Pure- and combined-slip longitudinal tire coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalTireCoefficients {
    pub p_cx1: f64, // shape factor C_fx
    pub p_dx1: f64, // friction μ_x at F_z,nom
    pub p_dx3: f64, // variation of μ_x with camber²
    pub p_ex1: f64, // curvature E_fx
    pub p_kx1: f64, // slip stiffness K_fx/F_z
    pub p_hx1: f64, // horizontal shift S_hx
    pub p_vx1: f64, // vertical shift S_vx/F_z
    pub r_bx1: f64, // combined: slope factor
    pub r_bx2: f64, // combined: slope variation with κ
    pub r_cx1: f64, // combined: shape factor
    pub r_ex1: f64, // combined: curvature factor
    pub r_hx1: f64, // combined: shift factor
}

/// Pure- and combined-slip lateral tire coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LateralTireCoefficients {
    pub p_cy1: f64, // shape factor C_fy
    pub p_dy1: f64, // friction μ_y
    pub p_dy3: f64, // variation of μ_y with camber²
    pub p_ey1: f64, // curvature E_fy
    pub p_ky1: f64, // max stiffness K_fy/F_z,nom
    pub p_hy1: f64, // horizontal shift S_hy
    pub p_hy3: f64, // variation of S_hy with camber
    pub p_vy1: f64, // vertical shift S_vy/F_z
    pub p_vy3: f64, // variation of S_vy/F_z with camber
    pub r_by1: f64, // combined: slope factor
    pub r_by2: f64, // combined: slope variation with α
    pub r_by3: f64, // combined: α shift in slope
    pub r_cy1: f64, // combined: shape factor
    pub r_ey1: f64, // combined: curvature factor
    pub r_hy1: f64, // combined: shift factor
    pub r_vy1: f64, // κ-induced side force S_vyκ/(μ_y F_z)
    pub r_vy3: f64, // variation of S_vyκ with camber
    pub r_vy4: f64, // variation of S_vyκ with α
    pub r_vy5: f64, // variation of S_vyκ with κ
    pub r_vy6: f64, // variation of S_vyκ with atan(κ)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TireParameters {
    pub longitudinal: LongitudinalTireCoefficients,
    pub lateral: LateralTireCoefficients,
}

/// Full parameter set of the multi-body model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiBodyParameters {
    pub limits: ActuationLimits,
    pub masses: Masses,
    pub geometry: Geometry,
    pub inertia: Inertia,
    pub suspension: Suspension,
    pub torque_split: TorqueSplit,
    pub tire: TireParameters,
}

impl MultiBodyParameters {
    /// Equivalent single-track vehicle: μ and cornering stiffness come from
    /// the lateral pure-slip coefficients.
    pub fn single_track(&self) -> SingleTrackParameters {
        let lat = &self.tire.lateral;
        let c_s = -lat.p_ky1 / lat.p_dy1;
        SingleTrackParameters {
            mu: lat.p_dy1,
            c_sf: c_s,
            c_sr: c_s,
            lf: self.geometry.a,
            lr: self.geometry.b,
            h: self.geometry.h_cg,
            m: self.masses.m,
            i_z: self.inertia.i_z,
            limits: self.limits,
        }
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        let result = self.check();
        if let Err(err) = &result {
            warn!(%err, "rejected multi-body parameter set");
        }
        result
    }

    fn check(&self) -> Result<(), ParameterError> {
        self.limits.validate()?;

        let m = &self.masses;
        ParameterError::check_positive("m", m.m)?;
        ParameterError::check_positive("m_s", m.m_s)?;
        ParameterError::check_positive("m_uf", m.m_uf)?;
        ParameterError::check_positive("m_ur", m.m_ur)?;

        let g = &self.geometry;
        ParameterError::check_finite("length", g.length)?;
        ParameterError::check_finite("width", g.width)?;
        ParameterError::check_positive("a", g.a)?;
        ParameterError::check_positive("b", g.b)?;
        ParameterError::check_positive("T_f", g.t_f)?;
        ParameterError::check_positive("T_r", g.t_r)?;
        ParameterError::check_finite("h_cg", g.h_cg)?;
        ParameterError::check_finite("h_s", g.h_s)?;
        ParameterError::check_finite("h_raf", g.h_raf)?;
        ParameterError::check_finite("h_rar", g.h_rar)?;
        ParameterError::check_positive("R_w", g.r_w)?;

        let i = &self.inertia;
        ParameterError::check_positive("I_Phi_s", i.i_phi_s)?;
        ParameterError::check_positive("I_y_s", i.i_y_s)?;
        ParameterError::check_positive("I_z", i.i_z)?;
        ParameterError::check_finite("I_xz_s", i.i_xz_s)?;
        ParameterError::check_positive("I_uf", i.i_uf)?;
        ParameterError::check_positive("I_ur", i.i_ur)?;
        ParameterError::check_positive("I_y_w", i.i_y_w)?;
        // Effective yaw and roll inertias after removing the cross coupling.
        ParameterError::check_positive("I_z - I_xz_s²/I_Phi_s", i.i_z - i.i_xz_s.powi(2) / i.i_phi_s)?;
        ParameterError::check_positive("I_Phi_s - I_xz_s²/I_z", i.i_phi_s - i.i_xz_s.powi(2) / i.i_z)?;

        let s = &self.suspension;
        for (name, value) in [
            ("K_sf", s.k_sf),
            ("K_sdf", s.k_sdf),
            ("K_sr", s.k_sr),
            ("K_sdr", s.k_sdr),
            ("K_tsf", s.k_tsf),
            ("K_tsr", s.k_tsr),
            ("K_ras", s.k_ras),
            ("K_rad", s.k_rad),
            ("K_lt", s.k_lt),
            ("D_f", s.d_f),
            ("D_r", s.d_r),
            ("E_f", s.e_f),
            ("E_r", s.e_r),
        ] {
            ParameterError::check_finite(name, value)?;
        }
        ParameterError::check_positive("K_zt", s.k_zt)?;

        ParameterError::check_within("T_sb", self.torque_split.t_sb, 0.0, 1.0)?;
        ParameterError::check_within("T_se", self.torque_split.t_se, 0.0, 1.0)?;

        self.tire.validate()
    }
}

impl TireParameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        let lo = &self.longitudinal;
        // Divisors of the pure-slip stiffness factor B = K/(C·D).
        ParameterError::check_positive("p_cx1", lo.p_cx1)?;
        ParameterError::check_positive("p_dx1", lo.p_dx1)?;
        for (name, value) in [
            ("p_dx3", lo.p_dx3),
            ("p_ex1", lo.p_ex1),
            ("p_kx1", lo.p_kx1),
            ("p_hx1", lo.p_hx1),
            ("p_vx1", lo.p_vx1),
            ("r_bx1", lo.r_bx1),
            ("r_bx2", lo.r_bx2),
            ("r_cx1", lo.r_cx1),
            ("r_ex1", lo.r_ex1),
            ("r_hx1", lo.r_hx1),
        ] {
            ParameterError::check_finite(name, value)?;
        }

        let la = &self.lateral;
        ParameterError::check_positive("p_cy1", la.p_cy1)?;
        ParameterError::check_positive("p_dy1", la.p_dy1)?;
        for (name, value) in [
            ("p_dy3", la.p_dy3),
            ("p_ey1", la.p_ey1),
            ("p_ky1", la.p_ky1),
            ("p_hy1", la.p_hy1),
            ("p_hy3", la.p_hy3),
            ("p_vy1", la.p_vy1),
            ("p_vy3", la.p_vy3),
            ("r_by1", la.r_by1),
            ("r_by2", la.r_by2),
            ("r_by3", la.r_by3),
            ("r_cy1", la.r_cy1),
            ("r_ey1", la.r_ey1),
            ("r_hy1", la.r_hy1),
            ("r_vy1", la.r_vy1),
            ("r_vy3", la.r_vy3),
            ("r_vy4", la.r_vy4),
            ("r_vy5", la.r_vy5),
            ("r_vy6", la.r_vy6),
        ] {
            ParameterError::check_finite(name, value)?;
        }
        Ok(())
    }
}
