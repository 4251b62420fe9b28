// ==============================================================================
// longitudinal.rs — LONGITUDINAL TIRE FORCE (PURE + COMBINED SLIP)
// ------------------------------------------------------------------------------
// pure_slip(κ, γ, F_z):
//     κ' = −κ + S_hx                      (tire-frame sign convention)
//     μ_x = p_dx1 (1 − p_dx3 γ²)
//     D = μ_x F_z,  C = p_cx1,  E = p_ex1,  B = K/(C D) = p_kx1/(C μ_x)
//     F0_x = D sin(C atan(B κ' − E (B κ' − atan(B κ')))) + p_vx1 F_z
//
// combined_slip(κ, α, F0_x):
//     B_xα = r_bx1 cos(atan(r_bx2 κ)),  C_xα = r_cx1,  E_xα = r_ex1
//     G_xα(α) = cos(C_xα atan(B_xα α_s − E_xα (B_xα α_s − atan(B_xα α_s))))
//     α_s = α + r_hx1
//     F_x = F0_x · G_xα(α_s) / G_xα(r_hx1)
//
// Output feeds the wheel-spin and chassis force balance in multi_body.
// ==============================================================================

use crate::params::LongitudinalTireCoefficients;
use crate::tire::shape;

/// Longitudinal force for pure longitudinal slip.
pub fn pure_slip(kappa: f64, gamma: f64, f_z: f64, c: &LongitudinalTireCoefficients) -> f64 {
    let kappa_x = -kappa + c.p_hx1;
    let s_vx = f_z * c.p_vx1;

    let mu_x = c.p_dx1 * (1.0 - c.p_dx3 * gamma.powi(2));
    let d_x = mu_x * f_z;
    // K_x / (C_x D_x) with K_x = p_kx1 F_z; F_z cancels, so zero load stays finite.
    let b_x = c.p_kx1 / (c.p_cx1 * mu_x);

    // CommonRoad's tire model adds S_vx inside the sine; here it is a plain offset like S_vy.
    d_x * shape(b_x, c.p_cx1, c.p_ex1, kappa_x).sin() + s_vx
}

/// Longitudinal force under combined slip, reduced from `f0_x` by the slip angle.
pub fn combined_slip(kappa: f64, alpha: f64, f0_x: f64, c: &LongitudinalTireCoefficients) -> f64 {
    let s_hxa = c.r_hx1;
    let alpha_s = alpha + s_hxa;

    let b_xa = c.r_bx1 * (c.r_bx2 * kappa).atan().cos();
    let (c_xa, e_xa) = (c.r_cx1, c.r_ex1);
    let d_xa = f0_x / shape(b_xa, c_xa, e_xa, s_hxa).cos();

    d_xa * shape(b_xa, c_xa, e_xa, alpha_s).cos()
}
