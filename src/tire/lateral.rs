// ==============================================================================
// lateral.rs — LATERAL TIRE FORCE (PURE + COMBINED SLIP)
// ==============================================================================
// pure_slip(α, γ, F_z):
//     S_hy = sign(γ) (p_hy1 + p_hy3 |γ|)
//     S_vy = sign(γ) F_z (p_vy1 + p_vy3 |γ|)
//     μ_y  = p_dy1 (1 − p_dy3 γ²)
//     D = μ_y F_z,  C = p_cy1,  E = p_ey1,  B = p_ky1/(C μ_y)
//     F0_y = D sin(C atan(B α_y − E (B α_y − atan(B α_y)))) + S_vy,  α_y = α + S_hy
//
// combined_slip(κ, α, γ, μ_y, F_z, F0_y):
//     B_yκ = r_by1 cos(atan(r_by2 (α − r_by3))),  C_yκ = r_cy1,  E_yκ = r_ey1
//     κ_s  = κ + r_hy1
//     D_vyκ = μ_y F_z (r_vy1 + r_vy3 γ) cos(atan(r_vy4 α))
//     S_vyκ = D_vyκ sin(r_vy5 atan(r_vy6 κ))          (κ-induced side force)
//     F_y  = F0_y · G_yκ(κ_s) / G_yκ(r_hy1) + S_vyκ
// ------------------------------------------------------------------------------
// Cardinal rule: camber shifts carry the sign of γ and vanish at γ = 0, so a
// left/right pair with mirrored camber produces mirrored forces.
// ==============================================================================

use crate::params::LateralTireCoefficients;
use crate::tire::{shape, sign};

/// Pure-slip lateral force and the friction coefficient it was built from
/// (the combined-slip stage reuses μ_y).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LateralPureSlip {
    pub force: f64, // N
    pub mu: f64,
}

pub fn pure_slip(alpha: f64, gamma: f64, f_z: f64, c: &LateralTireCoefficients) -> LateralPureSlip {
    let s_hy = sign(gamma) * (c.p_hy1 + c.p_hy3 * gamma.abs());
    let s_vy = sign(gamma) * f_z * (c.p_vy1 + c.p_vy3 * gamma.abs());

    let alpha_y = alpha + s_hy;
    let mu_y = c.p_dy1 * (1.0 - c.p_dy3 * gamma.powi(2));

    let d_y = mu_y * f_z;
    let b_y = c.p_ky1 / (c.p_cy1 * mu_y);

    LateralPureSlip {
        force: d_y * shape(b_y, c.p_cy1, c.p_ey1, alpha_y).sin() + s_vy,
        mu: mu_y,
    }
}

pub fn combined_slip(
    kappa: f64,
    alpha: f64,
    gamma: f64,
    mu_y: f64,
    f_z: f64,
    f0_y: f64,
    c: &LateralTireCoefficients,
) -> f64 {
    let s_hyk = c.r_hy1;
    let kappa_s = kappa + s_hyk;

    let b_yk = c.r_by1 * (c.r_by2 * (alpha - c.r_by3)).atan().cos();
    let (c_yk, e_yk) = (c.r_cy1, c.r_ey1);
    let d_yk = f0_y / shape(b_yk, c_yk, e_yk, s_hyk).cos();

    let d_vyk = mu_y * f_z * (c.r_vy1 + c.r_vy3 * gamma) * (c.r_vy4 * alpha).atan().cos();
    let s_vyk = d_vyk * (c.r_vy5 * (c.r_vy6 * kappa).atan()).sin();

    d_yk * shape(b_yk, c_yk, e_yk, kappa_s).cos() + s_vyk
}
