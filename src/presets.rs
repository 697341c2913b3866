// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Named small bodies and their physical constants.

use crate::config::G;
use crate::errors::GravityError;
use serde::Deserialize;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Converts a density in g/cm³ to kg/km³.
pub fn density_from_grams_per_cm3(density: f64) -> f64 {
    density / 1000.0 * 100f64.powi(3) * 1000f64.powi(3)
}

/// Spin rate in rad/s for a rotation period given in hours.
pub fn spin_rate_from_period_hours(hours: f64) -> f64 {
    2.0 * PI / hours / 3600.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPreset {
    /// 4769 Castalia, from the radar shape model.
    Castalia,
    /// 25143 Itokawa.
    Itokawa,
    /// 433 Eros.
    Eros,
    /// A unit test body with unit spin rate and mass.
    Cube,
}

impl BodyPreset {
    pub const ALL: [BodyPreset; 4] = [
        BodyPreset::Castalia,
        BodyPreset::Itokawa,
        BodyPreset::Eros,
        BodyPreset::Cube,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            BodyPreset::Castalia => "castalia",
            BodyPreset::Itokawa => "itokawa",
            BodyPreset::Eros => "eros",
            BodyPreset::Cube => "cube",
        }
    }

    pub fn properties(self) -> BodyProperties {
        let (density, axes, spin_rate, mass) = match self {
            BodyPreset::Castalia => (
                2.1,
                [1.6130 / 2.0, 0.9810 / 2.0, 0.8260 / 2.0],
                spin_rate_from_period_hours(4.07),
                1.4091e12,
            ),
            BodyPreset::Itokawa => (
                1.9,
                [0.535 / 2.0, 0.294 / 2.0, 0.209 / 2.0],
                spin_rate_from_period_hours(12.132),
                3.51e10,
            ),
            // Eros axes are tabulated as semi-axes already.
            BodyPreset::Eros => (
                2.67,
                [34.4, 11.7, 11.7],
                spin_rate_from_period_hours(5.27),
                4.463e-4 / G,
            ),
            BodyPreset::Cube => (1.0, [1.0, 1.0, 1.0], 1.0, 1.0),
        };
        BodyProperties {
            name: self.name().to_owned(),
            density: density_from_grams_per_cm3(density),
            semi_axes: axes,
            spin_rate,
            mass,
        }
    }
}

impl FromStr for BodyPreset {
    type Err = GravityError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == name)
            .ok_or_else(|| GravityError::UnknownBodyPreset(name.to_owned()))
    }
}

impl fmt::Display for BodyPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Physical constants of a body, in kilometre-kilogram-second units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BodyProperties {
    pub name: String,
    /// Bulk density in kg/km³.
    pub density: f64,
    /// Semi-axes of the reference ellipsoid in km.
    pub semi_axes: [f64; 3],
    /// Rotation rate about the body z axis in rad/s.
    pub spin_rate: f64,
    /// Total mass in kg.
    pub mass: f64,
}

impl BodyProperties {
    pub fn from_preset_name(name: &str) -> Result<Self, GravityError> {
        Ok(name.parse::<BodyPreset>()?.properties())
    }

    /// Reads a custom body from a TOML document with the same field names.
    pub fn from_toml_str(content: &str) -> Result<Self, GravityError> {
        Ok(toml::from_str(content)?)
    }

    /// Rotation period in seconds.
    pub fn period(&self) -> f64 {
        2.0 * PI / self.spin_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for preset in BodyPreset::ALL {
            assert_eq!(preset.name().parse::<BodyPreset>().unwrap(), preset);
            assert_eq!(preset.properties().name, preset.to_string());
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "vesta".parse::<BodyPreset>().unwrap_err();
        assert!(matches!(err, GravityError::UnknownBodyPreset(ref name) if name == "vesta"));
        // Names are matched exactly.
        assert!("Castalia".parse::<BodyPreset>().is_err());
    }

    #[test]
    fn castalia_constants() {
        let castalia = BodyPreset::Castalia.properties();
        assert!((castalia.density - 2.1e12).abs() < 1.0);
        assert!((castalia.semi_axes[0] - 0.8065).abs() < 1e-12);
        assert!((castalia.period() - 4.07 * 3600.0).abs() < 1e-6);
        assert_eq!(castalia.mass, 1.4091e12);
    }

    #[test]
    fn eros_mass_from_gravitational_parameter() {
        let eros = BodyPreset::Eros.properties();
        assert!((eros.mass * G - 4.463e-4).abs() < 1e-16);
        assert_eq!(eros.semi_axes, [34.4, 11.7, 11.7]);
    }

    #[test]
    fn cube_density_is_converted() {
        let cube = BodyPreset::Cube.properties();
        assert!((cube.density - 1e12).abs() < 1.0);
        assert_eq!(cube.spin_rate, 1.0);
    }

    #[test]
    fn custom_body_from_toml() {
        let body = BodyProperties::from_toml_str(
            r#"
            name = "bennu"
            density = 1.19e12
            semi_axes = [0.28, 0.27, 0.25]
            spin_rate = 4.06e-4
            mass = 7.329e10
            "#,
        )
        .unwrap();
        assert_eq!(body.name, "bennu");
        assert_eq!(body.semi_axes[2], 0.25);

        let err = BodyProperties::from_toml_str("name = \"x\"").unwrap_err();
        assert!(matches!(err, GravityError::Config(_)));
    }
}

// End of File
