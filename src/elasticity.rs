//! Isotropic elastic constants and body-wave speeds.
//!
//! Converts (E, nu, rho) into the shear and dilatational wave speeds that
//! parameterize the rupture kernel. Standard isotropic relations:
//! G = E / (2(1+nu)), C_s = sqrt(G/rho), C_d = C_s * sqrt((2-2nu)/(1-2nu)).

use crate::error::{Error, Result};
use crate::material::MaterialRecord;

/// Validated isotropic elastic bulk parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsotropicElastic {
    /// Young's modulus (Pa).
    pub youngs_modulus: f64,
    /// Poisson's ratio (dimensionless).
    pub poissons_ratio: f64,
    /// Mass density (kg/m³).
    pub density: f64,
}

impl IsotropicElastic {
    /// Create validated elastic parameters.
    ///
    /// # Errors
    ///
    /// Returns a domain error unless `E > 0`, `rho > 0` and `0 <= nu < 0.5`.
    /// The upper Poisson bound is strict: the dilatational speed has a
    /// `1 - 2nu` denominator that must stay positive.
    pub fn new(youngs_modulus: f64, poissons_ratio: f64, density: f64) -> Result<Self> {
        if youngs_modulus <= 0.0 {
            return Err(Error::Domain(format!(
                "Young's modulus must be positive, got {}",
                youngs_modulus
            )));
        }
        if !(0.0..0.5).contains(&poissons_ratio) {
            return Err(Error::Domain(format!(
                "Poisson's ratio must be in [0, 0.5), got {}",
                poissons_ratio
            )));
        }
        if density <= 0.0 {
            return Err(Error::Domain(format!(
                "density must be positive, got {}",
                density
            )));
        }
        Ok(Self {
            youngs_modulus,
            poissons_ratio,
            density,
        })
    }

    /// Build from a parsed material record holding `E`, `nu` and `rho`.
    pub fn from_record(record: &MaterialRecord) -> Result<Self> {
        let get = |key: &str| {
            record.parameter(key).ok_or_else(|| {
                Error::Domain(format!(
                    "material record (type '{}') has no parameter '{}'",
                    record.kind, key
                ))
            })
        };
        Self::new(get("E")?, get("nu")?, get("rho")?)
    }

    /// Shear modulus G = E / (2(1 + nu)).
    pub fn shear_modulus(&self) -> f64 {
        self.youngs_modulus / (2.0 * (1.0 + self.poissons_ratio))
    }

    /// Shear wave speed C_s = sqrt(G / rho).
    pub fn shear_wave_speed(&self) -> f64 {
        (self.shear_modulus() / self.density).sqrt()
    }

    /// Dilatational wave speed C_d = C_s * sqrt((2 - 2nu) / (1 - 2nu)).
    pub fn dilatational_wave_speed(&self) -> f64 {
        let nu = self.poissons_ratio;
        self.shear_wave_speed() * ((2.0 - 2.0 * nu) / (1.0 - 2.0 * nu)).sqrt()
    }
}

/// Shear wave speed from raw elastic parameters.
pub fn shear_wave_speed(youngs_modulus: f64, poissons_ratio: f64, density: f64) -> Result<f64> {
    Ok(IsotropicElastic::new(youngs_modulus, poissons_ratio, density)?.shear_wave_speed())
}

/// Dilatational wave speed from raw elastic parameters.
pub fn dilatational_wave_speed(
    youngs_modulus: f64,
    poissons_ratio: f64,
    density: f64,
) -> Result<f64> {
    Ok(IsotropicElastic::new(youngs_modulus, poissons_ratio, density)?.dilatational_wave_speed())
}
