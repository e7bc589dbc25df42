//! FTJ model parameters.
//!
//! The defaults describe a BaTiO3-like barrier between asymmetric
//! electrodes, four unit cells (1.6 nm) thick, 50 nm in radius. The
//! Fowler-Nordheim fitting table in [`super::fitting`] is calibrated against
//! these barrier heights and masses.

use ftj_core::units::parse_value;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// FTJ model parameters.
///
/// "HRS" is the high-resistance polarization state, "LRS" the
/// low-resistance one. Barrier heights are in volts (eV per electron).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FtjParams {
    // ========================================
    // Barrier profile
    // ========================================
    /// HRS barrier height at the first (near) interface (V). Default: 1.0
    pub phi1_hrs: f64,
    /// HRS barrier height at the second (far) interface (V). Default: 0.7
    pub phi2_hrs: f64,
    /// LRS barrier height at the first (near) interface (V). Default: 0.7
    pub phi1_lrs: f64,
    /// LRS barrier height at the second (far) interface (V). Default: 0.5
    pub phi2_lrs: f64,
    /// HRS tunneling effective mass, in units of m0. Default: 0.8
    pub mass_hrs: f64,
    /// LRS tunneling effective mass, in units of m0. Default: 0.6
    pub mass_lrs: f64,

    // ========================================
    // Geometry
    // ========================================
    /// Junction radius (m). Default: 50e-9
    pub radius: f64,
    /// Barrier thickness (m). Must be 3..=6 unit cells of 0.4 nm. Default: 1.6e-9
    pub tb: f64,

    // ========================================
    // Switching kinetics
    // ========================================
    /// Nucleation attempt time (s). Default: 1e-9
    pub tau_n0: f64,
    /// Domain-wall propagation attempt time (s). Default: 5e-10
    pub tau_p0: f64,
    /// Nucleation creep energy (eV). Default: 0.1
    pub u_n: f64,
    /// Propagation creep energy (eV). Default: 0.05
    pub u_p: f64,
    /// Characteristic creep field (V/m). Default: 1e9
    pub e0: f64,
    /// Initial LRS volume fraction (order parameter). Default: 0.5
    pub s0: f64,
    /// Device temperature (K). Default: 300.0
    pub temp: f64,

    // ========================================
    // Simulation
    // ========================================
    /// Maximum time step requested from the host (s). Default: 1e-10
    pub tstep: f64,
}

impl Default for FtjParams {
    fn default() -> Self {
        Self {
            phi1_hrs: 1.0,
            phi2_hrs: 0.7,
            phi1_lrs: 0.7,
            phi2_lrs: 0.5,
            mass_hrs: 0.8,
            mass_lrs: 0.6,
            radius: 50e-9,
            tb: 1.6e-9,
            tau_n0: 1e-9,
            tau_p0: 5e-10,
            u_n: 0.1,
            u_p: 0.05,
            e0: 1e9,
            s0: 0.5,
            temp: 300.0,
            tstep: 1e-10,
        }
    }
}

impl FtjParams {
    /// Elementary charge (C).
    pub const Q: f64 = 1.602176634e-19;
    /// Free electron mass (kg).
    pub const M0: f64 = 9.1093837015e-31;
    /// Reduced Planck constant (J*s).
    pub const HBAR: f64 = 1.054571817e-34;
    /// Boltzmann constant (J/K).
    pub const K_BOLTZMANN: f64 = 1.380649e-23;
    /// Perovskite unit-cell thickness (m).
    pub const UNIT_CELL: f64 = 0.4e-9;

    /// Load parameters from a JSON object. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: FtjParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Build parameters from `(name, value)` pairs as they appear on a
    /// `.MODEL` card, e.g. `("tb", "2n")`.
    pub fn from_model_card<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut params = FtjParams::default();
        for (name, value) in entries {
            params.set_param(name, value)?;
        }
        params.validate()?;
        Ok(params)
    }

    /// Set a single parameter by (case-insensitive) name from an SI-suffixed
    /// string.
    pub fn set_param(&mut self, name: &str, value: &str) -> Result<()> {
        let parsed = parse_value(value).ok_or_else(|| {
            Error::InvalidParameter(format!("cannot parse value '{value}' for '{name}'"))
        })?;

        let slot = match name.to_ascii_lowercase().as_str() {
            "phi1_hrs" => &mut self.phi1_hrs,
            "phi2_hrs" => &mut self.phi2_hrs,
            "phi1_lrs" => &mut self.phi1_lrs,
            "phi2_lrs" => &mut self.phi2_lrs,
            "mass_hrs" => &mut self.mass_hrs,
            "mass_lrs" => &mut self.mass_lrs,
            "radius" | "r" => &mut self.radius,
            "tb" => &mut self.tb,
            "tau_n0" => &mut self.tau_n0,
            "tau_p0" => &mut self.tau_p0,
            "u_n" => &mut self.u_n,
            "u_p" => &mut self.u_p,
            "e0" => &mut self.e0,
            "s0" => &mut self.s0,
            "temp" | "t" => &mut self.temp,
            "tstep" => &mut self.tstep,
            _ => return Err(Error::InvalidParameter(format!("unknown FTJ parameter '{name}'"))),
        };
        *slot = parsed;
        Ok(())
    }

    /// Check every parameter against its allowed range.
    ///
    /// The barrier thickness is only checked for positivity here; whether it
    /// maps to a calibrated unit-cell count is decided by
    /// [`UnitCells::resolve`](super::UnitCells::resolve).
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("phi1_hrs", self.phi1_hrs),
            ("phi2_hrs", self.phi2_hrs),
            ("phi1_lrs", self.phi1_lrs),
            ("phi2_lrs", self.phi2_lrs),
            ("mass_hrs", self.mass_hrs),
            ("mass_lrs", self.mass_lrs),
            ("radius", self.radius),
            ("tb", self.tb),
            ("tau_n0", self.tau_n0),
            ("tau_p0", self.tau_p0),
            ("e0", self.e0),
            ("temp", self.temp),
            ("tstep", self.tstep),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(Error::InvalidValue {
                    name: name.to_string(),
                    value,
                });
            }
        }

        for (name, value) in [("u_n", self.u_n), ("u_p", self.u_p)] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(Error::InvalidValue {
                    name: name.to_string(),
                    value,
                });
            }
        }

        if !(0.0..=1.0).contains(&self.s0) {
            return Err(Error::InvalidValue {
                name: "s0".to_string(),
                value: self.s0,
            });
        }

        Ok(())
    }

    /// Thermal energy kB*T expressed in volts.
    pub fn thermal_voltage(&self) -> f64 {
        Self::K_BOLTZMANN * self.temp / Self::Q
    }

    /// Junction area (m^2).
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(FtjParams::default().validate().is_ok());
    }

    #[test]
    fn test_thermal_voltage_room_temperature() {
        let vt = FtjParams::default().thermal_voltage();
        assert!((vt - 0.025852).abs() < 1e-5, "kT/q = {}", vt);
    }

    #[test]
    fn test_set_param_with_suffix() {
        let mut p = FtjParams::default();
        p.set_param("TB", "2n").unwrap();
        p.set_param("radius", "100n").unwrap();
        p.set_param("tau_p0", "1p").unwrap();

        assert!((p.tb - 2e-9).abs() < 1e-21);
        assert!((p.radius - 100e-9).abs() < 1e-20);
        assert!((p.tau_p0 - 1e-12).abs() < 1e-24);
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let mut p = FtjParams::default();
        let err = p.set_param("vth0", "0.4").unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)), "{err}");
    }

    #[test]
    fn test_unparsable_value_rejected() {
        let mut p = FtjParams::default();
        assert!(matches!(
            p.set_param("tb", "thick"),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_negative_mass_rejected() {
        let p = FtjParams {
            mass_lrs: -0.1,
            ..Default::default()
        };
        match p.validate() {
            Err(Error::InvalidValue { name, value }) => {
                assert_eq!(name, "mass_lrs");
                assert_eq!(value, -0.1);
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_initial_fraction_range() {
        let p = FtjParams {
            s0: 1.5,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(Error::InvalidValue { .. })));

        let p = FtjParams {
            s0: 1.0,
            ..Default::default()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_zero_creep_energy_allowed() {
        let p = FtjParams {
            u_n: 0.0,
            u_p: 0.0,
            ..Default::default()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_from_json_overrides_subset() {
        let p = FtjParams::from_json(r#"{ "tb": 2.0e-9, "s0": 0.9 }"#).unwrap();
        assert_eq!(p.tb, 2.0e-9);
        assert_eq!(p.s0, 0.9);
        assert_eq!(p.phi1_hrs, FtjParams::default().phi1_hrs);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            FtjParams::from_json("{ tb: }"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_from_model_card() {
        let p = FtjParams::from_model_card([("tb", "2.4n"), ("temp", "350")]).unwrap();
        assert!((p.tb - 2.4e-9).abs() < 1e-21);
        assert_eq!(p.temp, 350.0);
    }
}
