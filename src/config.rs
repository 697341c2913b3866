// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use crate::errors::GravityError;
use serde::Deserialize;

/// Universal gravitational constant in km³/(kg·s²).
pub const G: f64 = 6.673e-20;

/// Numerical settings for potential evaluation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GravityConfig {
    /// Gravitational constant in the length unit of the mesh (km by default).
    pub gravitational_constant: f64,
    /// Sum of face solid angles above which a query point is treated as inside or on the
    /// surface, and evaluation returns zero.
    pub surface_tolerance: f64,
    /// Sum the face and edge terms of an evaluation on the rayon thread pool.  Results match the
    /// sequential path up to summation order.
    pub parallel: bool,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            surface_tolerance: 1e-10,
            parallel: true,
        }
    }
}

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    gravity: GravityConfig,
}

impl GravityConfig {
    /// Reads the `[gravity]` table of a TOML document.  Missing keys, or a missing table, take
    /// the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, GravityError> {
        let document: Document = toml::from_str(content)?;
        Ok(document.gravity)
    }
}


// End of File
