// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # Polyhedral gravity for small bodies
//!
//! The pipeline runs in four stages, each rebuilt in full whenever the shape changes:
//!
//! 1. [`mesh::Mesh`] validates the vertex/face arrays and derives the halfedge topology and the
//!    face and edge normals.
//! 2. [`adjacency`] matches every directed face edge with the reversed edge of its neighbor.
//! 3. [`MeshParameters`] turns normals and adjacency into the face and edge dyads.
//! 4. [`Body`] combines the cache with density and spin to evaluate the field and rotate the
//!    shape.
//!
//! ```no_run
//! use asteroid::Body;
//! use nalgebra::Point3;
//!
//! let body = Body::from_preset_ellipsoid("castalia", 3)?;
//! let field = body.potential_at(&Point3::new(2.0, 0.0, 0.0));
//! println!("U = {} km²/s²", field.potential);
//! # Ok::<(), asteroid::GravityError>(())
//! ```

#![forbid(unsafe_code)]

pub mod adjacency;
pub mod body;
pub mod config;
pub mod errors;
pub mod params;
pub mod potential;
pub mod presets;

pub use adjacency::{AdjacencyTable, EdgeSlot, EdgeVertexMaps};
pub use body::Body;
pub use config::{GravityConfig, G};
pub use errors::GravityError;
pub use params::{MeshParameters, UniqueEdge};
pub use potential::PotentialEvaluation;
pub use presets::{BodyPreset, BodyProperties};

pub use mesh;

// End of File
