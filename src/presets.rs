// ==============================================================================
// presets.rs — NAMED VEHICLE PARAMETER SETS
// ------------------------------------------------------------------------------
// F1TENTH     : 1:10 scale race car, single-track models
// BMW_320I    : full-size sedan, single-track models (values given in
//               imperial units in the source data, converted here)
// FORD_ESCORT : full-size hatchback, complete multi-body description
// ==============================================================================

use crate::params::{
    ActuationLimits, Geometry, Inertia, LateralTireCoefficients, LongitudinalLimits,
    LongitudinalTireCoefficients, Masses, MultiBodyParameters, SingleTrackParameters,
    SteeringLimits, Suspension, TireParameters, TorqueSplit,
};

const FT: f64 = 0.3048; // m
const LBF: f64 = 4.448_221_615_260_5; // N

pub const F1TENTH: SingleTrackParameters = SingleTrackParameters {
    mu: 1.0489,
    c_sf: 4.718,
    c_sr: 5.4562,
    lf: 0.15875,
    lr: 0.17145,
    h: 0.074,
    m: 3.74,
    i_z: 0.04712,
    limits: ActuationLimits {
        steering: SteeringLimits { min: -0.4189, max: 0.4189, v_min: -3.2, v_max: 3.2 },
        longitudinal: LongitudinalLimits { v_min: -5.0, v_max: 20.0, v_switch: 7.319, a_max: 9.51 },
    },
};

pub const BMW_320I: SingleTrackParameters = SingleTrackParameters {
    mu: 1.0489,
    c_sf: 21.92 / 1.0489,
    c_sr: 21.92 / 1.0489,
    lf: FT * 3.793293,
    lr: FT * 4.667707,
    h: FT * 2.01355,
    m: LBF / FT * 74.91452,
    i_z: LBF * FT * 1321.416,
    limits: ActuationLimits {
        steering: SteeringLimits { min: -1.066, max: 1.066, v_min: -0.4, v_max: 0.4 },
        longitudinal: LongitudinalLimits { v_min: -13.6, v_max: 50.8, v_switch: 7.319, a_max: 11.5 },
    },
};

pub const FORD_ESCORT: MultiBodyParameters = MultiBodyParameters {
    limits: ActuationLimits {
        steering: SteeringLimits { min: -0.910, max: 0.910, v_min: -0.4, v_max: 0.4 },
        longitudinal: LongitudinalLimits { v_min: -13.9, v_max: 45.8, v_switch: 4.755, a_max: 11.5 },
    },
    masses: Masses { m: 1225.887, m_s: 1094.542, m_uf: 65.672, m_ur: 65.672 },
    geometry: Geometry {
        length: 4.298,
        width: 1.674,
        a: 0.88392,
        b: 1.50876,
        t_f: 1.389888,
        t_r: 1.423416,
        h_cg: 0.557784,
        h_s: 0.59436,
        h_raf: 0.0,
        h_rar: 0.0,
        r_w: 0.344,
    },
    inertia: Inertia {
        i_phi_s: 244.047,
        i_y_s: 1342.259,
        i_z: 1538.853,
        i_xz_s: 0.0,
        i_uf: 32.539,
        i_ur: 32.539,
        i_y_w: 1.7,
    },
    suspension: Suspension {
        k_sf: 21898.332,
        k_sdf: 1459.390,
        k_sr: 21991.826,
        k_sdr: 1489.292,
        k_tsf: -12880.270,
        k_tsr: 0.0,
        k_ras: 175186.0,
        k_rad: 10215.732,
        k_zt: 189785.547,
        k_lt: 1.0278e-5,
        d_f: -0.623359580,
        d_r: -0.209973753,
        e_f: 0.0,
        e_r: 0.0,
    },
    torque_split: TorqueSplit { t_sb: 0.76, t_se: 1.0 },
    tire: TireParameters {
        longitudinal: LongitudinalTireCoefficients {
            p_cx1: 1.6411,
            p_dx1: 1.1739,
            p_dx3: 0.0,
            p_ex1: 0.46403,
            p_kx1: 22.303,
            p_hx1: 0.0012297,
            p_vx1: -8.8098e-6,
            r_bx1: 13.276,
            r_bx2: -13.778,
            r_cx1: 1.2568,
            r_ex1: 0.65225,
            r_hx1: 0.0050722,
        },
        lateral: LateralTireCoefficients {
            p_cy1: 1.3507,
            p_dy1: 1.0489,
            p_dy3: -2.8821,
            p_ey1: -0.0074722,
            p_ky1: -21.92,
            p_hy1: 0.0026747,
            p_hy3: 0.031415,
            p_vy1: 0.037318,
            p_vy3: -0.32931,
            r_by1: 7.1433,
            r_by2: 9.1916,
            r_by3: -0.027856,
            r_cy1: 1.0719,
            r_ey1: -0.27572,
            r_hy1: 5.7448e-6,
            r_vy1: -0.027825,
            r_vy3: -0.27568,
            r_vy4: 12.12,
            r_vy5: 1.9,
            r_vy6: -10.704,
        },
    },
};
