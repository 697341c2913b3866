// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # Triangular mesh store
//!
//! Holds the vertex and face arrays of a small-body shape model together with two derived views
//! that are always rebuilt as a unit:
//!
//! - a validated halfedge [`Topology`] (rejects inconsistent winding, non-manifold edges and
//!   vertices, unreferenced vertices and impossible Euler characteristics), and
//! - [`SurfaceAttributes`]: per-face unit normals and centroids and per-halfedge in-plane
//!   normals, stored as named [`PropertyMap`]s.
//!
//! The [`shapes`] module generates closed reference shapes (cube, octahedron, icosahedron,
//! icosphere, ellipsoid).

#![forbid(unsafe_code)]

pub mod attributes;
pub mod errors;
mod mesh;
pub mod shapes;
pub mod topology;

pub use attributes::{PropertyMap, SurfaceAttributes};
pub use errors::TopologyError;
pub use mesh::{Mesh, MeshStats};
pub use topology::{Halfedge, Topology};

// End of File
