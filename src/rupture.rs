//! Cohesive-zone rupture stress-field evaluator.
//!
//! Closed-form elastodynamic stress perturbations around a shear rupture
//! propagating steadily at sub-shear speed with a finite cohesive zone
//! (generalized Freund/Broberg mode-II solution). The field is expressed
//! through a complex cohesive-traction potential
//!
//! ```text
//! M(z) = (2/pi) * tau_p * ((1 + z/X_c) * atan(1/sqrt(z/X_c)) - sqrt(z/X_c))
//! ```
//!
//! evaluated at the two stretched coordinates z_d = x + i*alpha_d*y and
//! z_s = x + i*alpha_s*y. M has a branch point at z = 0; every complex
//! square root and arctangent below uses the principal branch with the cut
//! along the negative real axis of z/X_c (on-fault, behind the tip), so the
//! field stays single-valued across the whole evaluation array.

use crate::error::{Error, NumericalWarning, Result};
use crate::types::FieldPoint;
use num_complex::Complex64;
use rayon::prelude::*;
use std::f64::consts::PI;

/// Default lower bound on the Rayleigh-function denominator |D|.
///
/// D is dimensionless and ~0.16 at the reference rupture speed of 0.87 C_s;
/// values below this bound mean the rupture speed is effectively at the
/// Rayleigh speed and the closed form amplifies roundoff.
pub const DEFAULT_RAYLEIGH_TOLERANCE: f64 = 1e-3;

/// Kinematics and material parameters of a steadily propagating rupture.
///
/// Immutable after construction; all derived quantities are pure functions
/// of these fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuptureConfig {
    /// Rupture propagation speed C_f (m/s).
    pub rupture_speed: f64,
    /// Shear wave speed C_s (m/s).
    pub shear_wave_speed: f64,
    /// Dilatational wave speed C_d (m/s).
    pub dilatational_wave_speed: f64,
    /// Poisson's ratio.
    pub poissons_ratio: f64,
    /// Fracture energy Gamma (J/m²).
    pub fracture_energy: f64,
    /// Young's modulus (Pa).
    pub youngs_modulus: f64,
    /// Cohesive-zone half-length X_c (m).
    pub cohesive_half_length: f64,
    rayleigh_tolerance: f64,
}

impl RuptureConfig {
    /// Create a validated rupture configuration.
    ///
    /// # Errors
    ///
    /// Domain error unless `0 < C_f < C_s < C_d` (sub-shear rupture),
    /// `0 < nu < 0.5`, `X_c > 0`, `Gamma > 0` and `E > 0`. A super-shear
    /// rupture speed is rejected here: the alpha radicals would turn
    /// imaginary and the closed form does not apply.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rupture_speed: f64,
        shear_wave_speed: f64,
        dilatational_wave_speed: f64,
        poissons_ratio: f64,
        fracture_energy: f64,
        youngs_modulus: f64,
        cohesive_half_length: f64,
    ) -> Result<Self> {
        if rupture_speed <= 0.0 {
            return Err(Error::Domain(format!(
                "rupture speed must be positive, got {}",
                rupture_speed
            )));
        }
        if rupture_speed >= shear_wave_speed {
            return Err(Error::Domain(format!(
                "rupture speed {} must stay below the shear wave speed {} \
                 (super-shear rupture is unsupported by this closed form)",
                rupture_speed, shear_wave_speed
            )));
        }
        if shear_wave_speed >= dilatational_wave_speed {
            return Err(Error::Domain(format!(
                "shear wave speed {} must stay below the dilatational wave speed {}",
                shear_wave_speed, dilatational_wave_speed
            )));
        }
        if poissons_ratio <= 0.0 || poissons_ratio >= 0.5 {
            return Err(Error::Domain(format!(
                "Poisson's ratio must be in (0, 0.5), got {}",
                poissons_ratio
            )));
        }
        if fracture_energy <= 0.0 {
            return Err(Error::Domain(format!(
                "fracture energy must be positive, got {}",
                fracture_energy
            )));
        }
        if youngs_modulus <= 0.0 {
            return Err(Error::Domain(format!(
                "Young's modulus must be positive, got {}",
                youngs_modulus
            )));
        }
        if cohesive_half_length <= 0.0 {
            return Err(Error::Domain(format!(
                "cohesive zone half-length must be positive, got {}",
                cohesive_half_length
            )));
        }
        Ok(Self {
            rupture_speed,
            shear_wave_speed,
            dilatational_wave_speed,
            poissons_ratio,
            fracture_energy,
            youngs_modulus,
            cohesive_half_length,
            rayleigh_tolerance: DEFAULT_RAYLEIGH_TOLERANCE,
        })
    }

    /// Override the near-Rayleigh reporting tolerance on |D|.
    pub fn with_rayleigh_tolerance(mut self, tolerance: f64) -> Self {
        self.rayleigh_tolerance = tolerance;
        self
    }

    /// Dimensionless shear radical alpha_s = sqrt(1 - (C_f/C_s)²), in [0, 1).
    pub fn alpha_s(&self) -> f64 {
        let ratio = self.rupture_speed / self.shear_wave_speed;
        (1.0 - ratio * ratio).sqrt()
    }

    /// Dimensionless dilatational radical alpha_d = sqrt(1 - (C_f/C_d)²).
    pub fn alpha_d(&self) -> f64 {
        let ratio = self.rupture_speed / self.dilatational_wave_speed;
        (1.0 - ratio * ratio).sqrt()
    }

    /// Rayleigh-function denominator D = 4*alpha_s*alpha_d - (1 + alpha_s²)².
    ///
    /// Vanishes at the Rayleigh speed (and in the C_f -> 0 limit).
    pub fn rayleigh_denominator(&self) -> f64 {
        let a_s = self.alpha_s();
        let a_d = self.alpha_d();
        let term = 1.0 + a_s * a_s;
        4.0 * a_s * a_d - term * term
    }

    /// Geometric/material coupling factor A2 of the energy-release relation.
    pub fn amplitude_factor(&self) -> f64 {
        let a_s = self.alpha_s();
        let psfactor = 1.0 / (1.0 - self.poissons_ratio);
        (self.rupture_speed * self.rupture_speed * a_s * psfactor)
            / (self.shear_wave_speed * self.shear_wave_speed * self.rayleigh_denominator())
    }

    /// Effective mode-II stress-intensity factor K2 from the fracture energy.
    pub fn stress_intensity(&self) -> f64 {
        let nu = self.poissons_ratio;
        ((self.fracture_energy * self.youngs_modulus)
            / ((1.0 - nu * nu) * self.amplitude_factor()))
        .sqrt()
    }

    /// Peak cohesive traction tau_p = K2 * sqrt(9*pi / (32*X_c)).
    pub fn peak_traction(&self) -> f64 {
        self.stress_intensity() * (9.0 * PI / (32.0 * self.cohesive_half_length)).sqrt()
    }

    /// Evaluate all in-plane stress perturbation components at the given
    /// field points (tip-centered coordinates).
    ///
    /// Evaluation is parallel over points and bit-for-bit deterministic for
    /// identical inputs. Warnings (near-Rayleigh denominator, points on the
    /// branch cut) are returned with the result, never dropped.
    ///
    /// # Errors
    ///
    /// `Singularity` if any point coincides with the rupture tip (0, 0),
    /// where the closed form is undefined.
    pub fn evaluate(&self, points: &[FieldPoint]) -> Result<StressPerturbation> {
        let kernel = Kernel::new(self);

        let mut warnings = Vec::new();
        if kernel.d.abs() < self.rayleigh_tolerance {
            warnings.push(NumericalWarning::NearRayleigh {
                denominator: kernel.d,
                tolerance: self.rayleigh_tolerance,
            });
        }
        for (i, p) in points.iter().enumerate() {
            if p.x == 0.0 && p.y == 0.0 {
                return Err(Error::Singularity(format!(
                    "field point #{} coincides with the rupture tip (0, 0)",
                    i
                )));
            }
            if p.y == 0.0 && p.x < 0.0 {
                warnings.push(NumericalWarning::OnBranchCut { x: p.x, y: p.y });
            }
        }

        let components: Vec<(f64, f64, f64)> =
            points.par_iter().map(|p| kernel.stresses(p.x, p.y)).collect();

        let mut sigma_xx = Vec::with_capacity(components.len());
        let mut sigma_yy = Vec::with_capacity(components.len());
        let mut sigma_xy = Vec::with_capacity(components.len());
        for (xx, yy, xy) in components {
            sigma_xx.push(xx);
            sigma_yy.push(yy);
            sigma_xy.push(xy);
        }

        Ok(StressPerturbation {
            sigma_xx,
            sigma_yy,
            sigma_xy,
            warnings,
        })
    }

    /// Fault-parallel normal component delta_sigma_xx at the given points.
    pub fn evaluate_normal(&self, points: &[FieldPoint]) -> Result<StressProfile> {
        let field = self.evaluate(points)?;
        Ok(StressProfile {
            values: field.sigma_xx,
            warnings: field.warnings,
        })
    }

    /// Shear component delta_sigma_xy at the given points.
    pub fn evaluate_shear(&self, points: &[FieldPoint]) -> Result<StressProfile> {
        let field = self.evaluate(points)?;
        Ok(StressProfile {
            values: field.sigma_xy,
            warnings: field.warnings,
        })
    }

    /// Evaluate along an x sweep at fixed off-fault distance y.
    pub fn evaluate_along(&self, xs: &[f64], y: f64) -> Result<StressPerturbation> {
        self.evaluate(&crate::types::field_points(xs, y))
    }
}

/// Stress perturbation components at a set of field points, in input order.
///
/// Units follow the input modulus units (Pa in, Pa out).
#[derive(Debug, Clone, PartialEq)]
pub struct StressPerturbation {
    /// Fault-parallel normal perturbation delta_sigma_xx.
    pub sigma_xx: Vec<f64>,
    /// Fault-normal perturbation delta_sigma_yy.
    pub sigma_yy: Vec<f64>,
    /// Shear perturbation delta_sigma_xy.
    pub sigma_xy: Vec<f64>,
    /// Diagnostics collected during evaluation.
    pub warnings: Vec<NumericalWarning>,
}

/// A single stress component profile with its diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct StressProfile {
    /// Component values in input point order.
    pub values: Vec<f64>,
    /// Diagnostics collected during evaluation.
    pub warnings: Vec<NumericalWarning>,
}

/// Precomputed per-configuration factors shared by all field points.
struct Kernel {
    alpha_s: f64,
    alpha_d: f64,
    d: f64,
    tau_p: f64,
    x_c: f64,
    // Stress combination coefficients.
    c_xx_d: f64,
    c_xx_s: f64,
    c_xy_d: f64,
    c_xy_s: f64,
    pre_xx: f64,
    pre_yy: f64,
}

impl Kernel {
    fn new(config: &RuptureConfig) -> Self {
        let alpha_s = config.alpha_s();
        let alpha_d = config.alpha_d();
        let d = config.rayleigh_denominator();
        let as_sq = alpha_s * alpha_s;
        let ad_sq = alpha_d * alpha_d;
        let one_plus_as_sq = 1.0 + as_sq;
        Self {
            alpha_s,
            alpha_d,
            d,
            tau_p: config.peak_traction(),
            x_c: config.cohesive_half_length,
            c_xx_d: 1.0 + 2.0 * ad_sq - as_sq,
            c_xx_s: one_plus_as_sq,
            c_xy_d: 4.0 * alpha_s * alpha_d,
            c_xy_s: one_plus_as_sq * one_plus_as_sq,
            pre_xx: 2.0 * alpha_s / d,
            pre_yy: -2.0 * alpha_s * one_plus_as_sq / d,
        }
    }

    /// (sigma_xx, sigma_yy, sigma_xy) at a single field point.
    fn stresses(&self, x: f64, y: f64) -> (f64, f64, f64) {
        let z_d = Complex64::new(x, self.alpha_d * y);
        let z_s = Complex64::new(x, self.alpha_s * y);
        let m_d = cohesive_potential(self.tau_p, self.x_c, z_d);
        let m_s = cohesive_potential(self.tau_p, self.x_c, z_s);

        let sigma_xx = self.pre_xx * (self.c_xx_d * m_d - self.c_xx_s * m_s).im;
        let sigma_yy = self.pre_yy * (m_d - m_s).im;
        let sigma_xy = (self.c_xy_d * m_d - self.c_xy_s * m_s).re / self.d;
        (sigma_xx, sigma_yy, sigma_xy)
    }
}

/// Cohesive-traction potential M(z), principal branch.
fn cohesive_potential(tau_p: f64, x_c: f64, z: Complex64) -> Complex64 {
    let w = z / x_c;
    let root = principal_sqrt(w);
    (2.0 / PI) * tau_p * ((1.0 + w) * principal_atan(1.0 / root) - root)
}

/// Complex square root on the principal branch: for z = r*exp(i*theta) with
/// theta in (-pi, pi], returns sqrt(r)*exp(i*theta/2). The cut lies along the
/// negative real axis; on the cut the value is the limit from above.
fn principal_sqrt(z: Complex64) -> Complex64 {
    let (r, theta) = z.to_polar();
    Complex64::from_polar(r.sqrt(), 0.5 * theta)
}

/// Complex arctangent on the principal branch,
/// atan(w) = -i/2 * [ln(1 + i*w) - ln(1 - i*w)],
/// with both logarithms on their principal branches. Cuts lie on the
/// imaginary axis outside (-i, i), which the stretched coordinates never
/// cross for y != 0.
fn principal_atan(w: Complex64) -> Complex64 {
    let i = Complex64::i();
    let one = Complex64::new(1.0, 0.0);
    Complex64::new(0.0, -0.5) * ((one + i * w).ln() - (one - i * w).ln())
}
