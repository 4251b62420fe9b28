//! aven_dynamics - vehicle dynamics derivatives for external integrators
//!
//! Three models of increasing fidelity, each a pure function
//! `(state, control, params) -> dx/dt`:
//! - [`kinematic`]    : 5-state bicycle model, valid down to standstill
//! - [`single_track`] : 7-state dynamic model with linear tires
//! - [`multi_body`]   : 29-state model with sprung/unsprung masses,
//!                      suspension and combined-slip tires
//!
//! Every model clamps its raw control through [`constraints`]. A proportional
//! [`controller`] produces that control from a speed/steering target.
//! No integrator is provided; step the returned derivative with any scheme.

pub mod constraints;
pub mod controller;
pub mod error;
pub mod kinematic;
pub mod multi_body;
pub mod params;
pub mod presets;
pub mod single_track;
pub mod state;
pub mod tire;

/// Gravitational acceleration, m/s².
pub const GRAVITY: f64 = 9.81;

pub use constraints::{clamp_acceleration, clamp_steering, constrain};
pub use controller::{ControlTarget, control};
pub use error::ParameterError;
pub use kinematic::{vehicle_dynamics_ks, vehicle_dynamics_ks_cog};
pub use multi_body::{MultiBodyEvaluation, evaluate, initial_state, vehicle_dynamics_mb};
pub use params::{ActuationLimits, MultiBodyParameters, SingleTrackParameters};
pub use single_track::vehicle_dynamics_st;
pub use state::{ControlInput, KsState, MbState, StState, WheelId};
