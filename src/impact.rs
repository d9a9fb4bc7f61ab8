//! Hertzian impact source-time-function generator.
//!
//! Models the contact force of a spherical impactor dropped on an elastic
//! half-space as a half-sine pulse calibrated to Hertzian contact mechanics
//! (McLaskey & Glaser type ball-drop calibration):
//!
//! ```text
//! t_c   = 4.53 * (4*rho*pi*(d1 + d2)/3)^(2/5) * R * v^(-1/5)
//! f_max = 1.917 * rho^(3/5) * (d1 + d2)^(-2/5) * R^2 * v^(6/5)
//! f(t)  = f_max * sin(pi*t/t_c)^(3/2)    for 0 < t < t_c, else 0
//! ```
//!
//! with the compliances d_i = (1 - nu_i²)/(pi*E_i) of ball and target. The
//! seismic-moment scaling `M0 = 1.748 * f_max * t_c / pi` equals the pulse
//! impulse: 1.748... is the integral of sin^(3/2) over a half period.

use crate::error::{Error, Result};
use rayon::prelude::*;
use std::f64::consts::PI;

/// Standard gravity (m/s²), used to turn drop height into impact speed.
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Elastic properties of one body in the Hertzian contact pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactBody {
    /// Young's modulus (Pa).
    pub youngs_modulus: f64,
    /// Poisson's ratio.
    pub poissons_ratio: f64,
}

impl ContactBody {
    /// Create a contact body, validating the elastic parameters.
    pub fn new(youngs_modulus: f64, poissons_ratio: f64) -> Result<Self> {
        if youngs_modulus <= 0.0 {
            return Err(Error::Domain(format!(
                "Young's modulus must be positive, got {}",
                youngs_modulus
            )));
        }
        if poissons_ratio <= -1.0 || poissons_ratio >= 0.5 {
            return Err(Error::Domain(format!(
                "Poisson's ratio must be in (-1, 0.5), got {}",
                poissons_ratio
            )));
        }
        Ok(Self {
            youngs_modulus,
            poissons_ratio,
        })
    }

    /// The calibration steel ball (E = 208.197 GPa, nu = 0.286).
    pub fn steel() -> Self {
        Self {
            youngs_modulus: 208.197e9,
            poissons_ratio: 0.286,
        }
    }

    /// Hertzian compliance delta = (1 - nu²) / (pi * E).
    pub fn compliance(&self) -> f64 {
        (1.0 - self.poissons_ratio * self.poissons_ratio) / (PI * self.youngs_modulus)
    }
}

/// Parameters of a ball-drop impact on an elastic half-space.
///
/// Immutable after construction; the source-time function is a pure function
/// of this configuration and the time samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactConfig {
    /// Impactor radius R (m).
    pub radius: f64,
    /// Impact speed v at contact (m/s).
    pub impact_speed: f64,
    /// Elastic properties of the impactor.
    pub impactor: ContactBody,
    /// Elastic properties of the target half-space.
    pub target: ContactBody,
    /// Target density (kg/m³).
    pub target_density: f64,
}

impl ImpactConfig {
    /// Create a validated impact configuration from the impact speed.
    pub fn new(
        radius: f64,
        impact_speed: f64,
        impactor: ContactBody,
        target: ContactBody,
        target_density: f64,
    ) -> Result<Self> {
        if radius <= 0.0 {
            return Err(Error::Domain(format!(
                "impactor radius must be positive, got {}",
                radius
            )));
        }
        if impact_speed <= 0.0 {
            return Err(Error::Domain(format!(
                "impact speed must be positive, got {}",
                impact_speed
            )));
        }
        if target_density <= 0.0 {
            return Err(Error::Domain(format!(
                "target density must be positive, got {}",
                target_density
            )));
        }
        Ok(Self {
            radius,
            impact_speed,
            impactor,
            target,
            target_density,
        })
    }

    /// Create a configuration from a free-fall drop height, v = sqrt(2*g*h).
    pub fn from_drop_height(
        height: f64,
        radius: f64,
        impactor: ContactBody,
        target: ContactBody,
        target_density: f64,
    ) -> Result<Self> {
        if height <= 0.0 {
            return Err(Error::Domain(format!(
                "drop height must be positive, got {}",
                height
            )));
        }
        let impact_speed = (2.0 * STANDARD_GRAVITY * height).sqrt();
        Self::new(radius, impact_speed, impactor, target, target_density)
    }

    fn total_compliance(&self) -> f64 {
        self.impactor.compliance() + self.target.compliance()
    }

    /// Contact duration t_c (s).
    pub fn contact_duration(&self) -> f64 {
        let delta = self.total_compliance();
        4.53 * (4.0 * self.target_density * PI * delta / 3.0).powf(0.4)
            * self.radius
            * self.impact_speed.powf(-0.2)
    }

    /// Peak contact force f_max (N).
    pub fn peak_force(&self) -> f64 {
        let delta = self.total_compliance();
        1.917
            * self.target_density.powf(0.6)
            * delta.powf(-0.4)
            * self.radius
            * self.radius
            * self.impact_speed.powf(1.2)
    }

    /// Seismic-moment-rate scaling M0 = 1.748 * f_max * t_c / pi.
    ///
    /// Calibrates the pulse amplitude against an equivalent impulsive point
    /// source; equals the time integral of the contact force.
    pub fn moment_rate_scaling(&self) -> f64 {
        1.748 * self.peak_force() * self.contact_duration() / PI
    }

    /// Contact force at time t (half-sine-power pulse, zero outside contact).
    pub fn force_at(&self, t: f64) -> f64 {
        let t_c = self.contact_duration();
        if t > 0.0 && t < t_c {
            self.peak_force() * (PI * t / t_c).sin().powf(1.5)
        } else {
            0.0
        }
    }

    /// Evaluate the source-time function on a strictly increasing time grid.
    ///
    /// Repeated time samples are rejected along with decreasing ones: a
    /// duplicated sample carries no information (its quadrature panel has
    /// zero width) and almost always indicates a grid-construction error.
    ///
    /// # Errors
    ///
    /// Domain error if the grid is not strictly increasing.
    pub fn generate(&self, times: &[f64]) -> Result<SourceTimeFunction> {
        if times.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(Error::Domain(
                "time grid must be strictly increasing".into(),
            ));
        }

        let t_c = self.contact_duration();
        let f_max = self.peak_force();
        let forces: Vec<f64> = times
            .par_iter()
            .map(|&t| {
                if t > 0.0 && t < t_c {
                    f_max * (PI * t / t_c).sin().powf(1.5)
                } else {
                    0.0
                }
            })
            .collect();

        Ok(SourceTimeFunction {
            times: times.to_vec(),
            forces,
            f_max,
            t_c,
            m0_scaling: self.moment_rate_scaling(),
        })
    }
}

/// Sampled impact source-time function with its calibration scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTimeFunction {
    /// Time samples (s), strictly increasing.
    pub times: Vec<f64>,
    /// Contact force at each time sample (N).
    pub forces: Vec<f64>,
    /// Peak contact force (N).
    pub f_max: f64,
    /// Contact duration (s).
    pub t_c: f64,
    /// Seismic-moment-rate scaling amplitude.
    pub m0_scaling: f64,
}

impl SourceTimeFunction {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Force history scaled to the equivalent seismic moment rate.
    pub fn moment_rate(&self) -> Vec<f64> {
        self.forces.iter().map(|f| f * self.m0_scaling).collect()
    }

    /// Trapezoidal impulse of the sampled pulse (N·s).
    ///
    /// Converges to `m0_scaling` as the grid refines over `[0, t_c]`.
    pub fn impulse(&self) -> f64 {
        self.times
            .windows(2)
            .zip(self.forces.windows(2))
            .map(|(t, f)| 0.5 * (f[0] + f[1]) * (t[1] - t[0]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Steel ball on the PMMA-like laboratory target.
    fn reference_config() -> ImpactConfig {
        ImpactConfig::from_drop_height(
            0.300,
            1e-3,
            ContactBody::steel(),
            ContactBody::new(51e9, 0.25).unwrap(),
            1190.0,
        )
        .unwrap()
    }

    #[test]
    fn test_drop_height_to_impact_speed() {
        let config = reference_config();
        assert_relative_eq!(config.impact_speed, 2.4256, max_relative = 1e-3);
    }

    #[test]
    fn test_contact_duration_is_microseconds() {
        let t_c = reference_config().contact_duration();
        assert!(t_c > 1e-6 && t_c < 1e-5, "t_c = {} s", t_c);
    }

    #[test]
    fn test_peak_force_positive_and_plausible() {
        let f_max = reference_config().peak_force();
        assert!(f_max > 1.0 && f_max < 100.0, "f_max = {} N", f_max);
    }

    #[test]
    fn test_compliance() {
        let body = ContactBody::new(51e9, 0.25).unwrap();
        assert_relative_eq!(
            body.compliance(),
            (1.0 - 0.0625) / (PI * 51e9),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_force_zero_outside_contact() {
        let config = reference_config();
        let t_c = config.contact_duration();
        assert_eq!(config.force_at(0.0), 0.0);
        assert_eq!(config.force_at(t_c), 0.0);
        assert_eq!(config.force_at(-1e-6), 0.0);
        assert_eq!(config.force_at(t_c + 1e-6), 0.0);
        assert!(config.force_at(0.5 * t_c) > 0.0);
    }

    #[test]
    fn test_pulse_peaks_at_half_contact() {
        let config = reference_config();
        let t_c = config.contact_duration();
        assert_relative_eq!(
            config.force_at(0.5 * t_c),
            config.peak_force(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_generated_pulse_nonnegative_single_peak() {
        let config = reference_config();
        let dt = 1e-7;
        let times: Vec<f64> = (0..200).map(|i| i as f64 * dt).collect();
        let stf = config.generate(&times).unwrap();

        assert_eq!(stf.len(), times.len());
        assert!(stf.forces.iter().all(|&f| f >= 0.0));

        // Exactly one sign change in the discrete derivative over the pulse.
        let diffs: Vec<f64> = stf
            .forces
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .filter(|d| *d != 0.0)
            .collect();
        let sign_changes = diffs
            .windows(2)
            .filter(|pair| pair[0].signum() != pair[1].signum())
            .count();
        assert_eq!(sign_changes, 1);
    }

    #[test]
    fn test_impulse_matches_moment_scaling() {
        // The 1.748 constant is the integral of sin^(3/2) over a half period,
        // so the pulse impulse equals the moment scaling by construction.
        let config = reference_config();
        let t_c = config.contact_duration();
        let n = 20_000;
        let times: Vec<f64> = (0..=n).map(|i| t_c * i as f64 / n as f64).collect();
        let stf = config.generate(&times).unwrap();
        assert_relative_eq!(stf.impulse(), stf.m0_scaling, max_relative = 1e-3);
    }

    #[test]
    fn test_moment_rate_scaling_identity() {
        let config = reference_config();
        assert_relative_eq!(
            config.moment_rate_scaling(),
            1.748 * config.peak_force() * config.contact_duration() / PI,
            max_relative = 1e-12
        );
        let times = [0.0, 1e-6, 2e-6];
        let stf = config.generate(&times).unwrap();
        let scaled = stf.moment_rate();
        assert_relative_eq!(scaled[1], stf.forces[1] * stf.m0_scaling, max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_configurations_rejected() {
        let steel = ContactBody::steel();
        let pmma = ContactBody::new(51e9, 0.25).unwrap();
        assert!(ImpactConfig::new(0.0, 2.4, steel, pmma, 1190.0).is_err());
        assert!(ImpactConfig::new(1e-3, 0.0, steel, pmma, 1190.0).is_err());
        assert!(ImpactConfig::new(1e-3, 2.4, steel, pmma, -1.0).is_err());
        assert!(ImpactConfig::from_drop_height(0.0, 1e-3, steel, pmma, 1190.0).is_err());
        assert!(ContactBody::new(-1.0, 0.3).is_err());
        assert!(ContactBody::new(1e9, 0.5).is_err());
    }

    #[test]
    fn test_non_monotonic_grid_rejected() {
        let config = reference_config();
        let err = config.generate(&[0.0, 1e-6, 1e-6]).unwrap_err();
        assert!(matches!(err, Error::Domain(_)));
        assert!(config.generate(&[0.0, 2e-6, 1e-6]).is_err());
        assert!(config.generate(&[0.0, 1e-6, 2e-6]).is_ok());
    }
}
