//! rupture-core - Elastodynamic cohesive-crack engine
//!
//! Closed-form stress-field and source-time-function kernels for laboratory
//! earthquake experiments:
//!
//! - Near-fault stress perturbations of a steadily propagating sub-shear
//!   rupture with a finite cohesive zone (generalized Freund/Broberg mode-II
//!   solution, complex-variable evaluation).
//! - Hertzian ball-drop contact pulses with seismic-moment-rate calibration
//!   (McLaskey-Glaser type).
//! - A material parameter database parser and isotropic wave-speed
//!   derivation feeding both.
//!
//! # Architecture
//!
//! Every operation is a stateless, side-effect-free transform of immutable
//! inputs, built around these types:
//!
//! - [`MaterialDatabase`]: named material records from the text database
//! - [`IsotropicElastic`]: elastic constants and body-wave speeds
//! - [`RuptureConfig`]: rupture kinematics + cohesive-zone stress evaluation
//! - [`ImpactConfig`]: ball-drop contact pulse generation
//!
//! Field-point and time-grid evaluation are parallel over samples (rayon)
//! with bit-for-bit deterministic output. Non-fatal numerical diagnostics
//! ([`NumericalWarning`]) are returned alongside results, never swallowed.

pub mod elasticity;
pub mod error;
pub mod impact;
pub mod material;
pub mod rupture;
pub mod types;

pub use elasticity::{dilatational_wave_speed, shear_wave_speed, IsotropicElastic};
pub use error::{Error, NumericalWarning, Result};
pub use impact::{ContactBody, ImpactConfig, SourceTimeFunction, STANDARD_GRAVITY};
pub use material::{MaterialDatabase, MaterialRecord};
pub use rupture::{RuptureConfig, StressPerturbation, StressProfile, DEFAULT_RAYLEIGH_TOLERANCE};
pub use types::{field_points, FieldPoint};
