//! tire - combined-slip tire force model (magic formula, pure numbers)
//!
//! Two stages per wheel:
//! 1. pure slip: force from slip ratio κ *or* slip angle α alone, shaped by
//!    camber γ and vertical load F_z;
//! 2. combined slip: the pure-slip force is weighted down by the other slip
//!    quantity (κ reduces F_y, α reduces F_x).
//!
//! Turn slip is neglected and every scaling factor is 1.

pub mod lateral;
pub mod longitudinal;

pub use lateral::LateralPureSlip;

/// Magic-formula argument `C·atan(B·x − E·(B·x − atan(B·x)))`.
#[inline]
pub(crate) fn shape(b: f64, c: f64, e: f64, x: f64) -> f64 {
    let bx = b * x;
    c * (bx - e * (bx - bx.atan())).atan()
}

/// Sign with `sign(0) = 0`, unlike `f64::signum`.
#[inline]
pub(crate) fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
