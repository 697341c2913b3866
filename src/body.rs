// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use crate::config::GravityConfig;
use crate::errors::GravityError;
use crate::params::MeshParameters;
use crate::potential::{self, PotentialEvaluation};
use crate::presets::BodyProperties;
use mesh::{shapes, Mesh};
use nalgebra::{Matrix3, Point3, Rotation3, Vector3};
use static_assertions::assert_impl_all;

/// A rigid, uniformly dense small body spinning about its z axis.
///
/// The mesh and its parameter cache are only ever replaced together, so evaluation never sees a
/// cache built from other geometry.  Evaluation borrows the body immutably and the mutating calls
/// borrow it mutably; share a body between threads behind a `RwLock`.
#[derive(Debug, Clone)]
pub struct Body {
    properties: BodyProperties,
    mesh: Mesh,
    params: MeshParameters,
    config: GravityConfig,
}

assert_impl_all!(Body: Send, Sync);

impl Body {
    pub fn new(
        properties: BodyProperties,
        mesh: Mesh,
        config: GravityConfig,
    ) -> Result<Self, GravityError> {
        let params = MeshParameters::new(&mesh)?;
        log::info!(
            "body `{}`: {} vertices, {} faces, spin rate {:.6e} rad/s",
            properties.name,
            mesh.num_vertices(),
            mesh.num_faces(),
            properties.spin_rate
        );
        Ok(Self {
            properties,
            mesh,
            params,
            config,
        })
    }

    /// A named preset with an externally supplied shape.
    pub fn from_preset(name: &str, mesh: Mesh) -> Result<Self, GravityError> {
        Self::from_preset_with_config(name, mesh, GravityConfig::default())
    }

    pub fn from_preset_with_config(
        name: &str,
        mesh: Mesh,
        config: GravityConfig,
    ) -> Result<Self, GravityError> {
        Self::new(BodyProperties::from_preset_name(name)?, mesh, config)
    }

    /// A named preset shaped as its reference ellipsoid.
    pub fn from_preset_ellipsoid(name: &str, subdivisions: u32) -> Result<Self, GravityError> {
        let properties = BodyProperties::from_preset_name(name)?;
        let mesh = shapes::ellipsoid(properties.semi_axes, subdivisions)?;
        Self::new(properties, mesh, GravityConfig::default())
    }

    pub fn properties(&self) -> &BodyProperties {
        &self.properties
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn params(&self) -> &MeshParameters {
        &self.params
    }

    pub fn config(&self) -> &GravityConfig {
        &self.config
    }

    /// Density times enclosed volume.  Differs from the tabulated mass when the shape or density
    /// are approximate.
    pub fn polyhedron_mass(&self) -> f64 {
        self.properties.density * self.mesh.volume()
    }

    /// Field at `point`, given in the body-fixed frame.
    pub fn potential_at(&self, point: &Point3<f64>) -> PotentialEvaluation {
        potential::evaluate(
            &self.mesh,
            &self.params,
            self.properties.density,
            &self.config,
            point,
        )
    }

    /// Rotation from the body-fixed frame to the inertial frame after `time` seconds.
    pub fn rotation_to_inertial(&self, time: f64) -> Matrix3<f64> {
        self.rotation(time).into_inner()
    }

    fn rotation(&self, time: f64) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::z_axis(), self.properties.spin_rate * time)
    }

    /// The current vertices rotated by `time` seconds of spin.  Does not change the body.
    pub fn rotate_vertices(&self, time: f64) -> Vec<Point3<f64>> {
        let rotation = self.rotation(time);
        self.mesh.vertices().iter().map(|p| rotation * p).collect()
    }

    /// Rotates the stored mesh by `time` seconds of spin and rebuilds the parameter cache.  On
    /// error the body is left as it was.
    pub fn advance_rotation(&mut self, time: f64) -> Result<(), GravityError> {
        let mut mesh = self.mesh.clone();
        mesh.set_vertices(self.rotate_vertices(time))?;
        self.install(mesh)?;
        log::info!(
            "body `{}` advanced by {} s",
            self.properties.name,
            time
        );
        Ok(())
    }

    /// Swaps in a new shape and rebuilds the parameter cache.  On error the body is left as it
    /// was.
    pub fn replace_mesh(
        &mut self,
        vertices: Vec<Point3<f64>>,
        faces: Vec<[usize; 3]>,
    ) -> Result<(), GravityError> {
        let mesh = Mesh::new(vertices, faces)?;
        self.install(mesh)?;
        log::info!(
            "body `{}` shape replaced: {} vertices, {} faces",
            self.properties.name,
            self.mesh.num_vertices(),
            self.mesh.num_faces()
        );
        Ok(())
    }

    fn install(&mut self, mesh: Mesh) -> Result<(), GravityError> {
        let params = MeshParameters::new(&mesh)?;
        self.mesh = mesh;
        self.params = params;
        Ok(())
    }
}


// End of File
