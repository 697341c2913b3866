// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use thiserror::Error;

/// Reasons a vertex/face pair cannot be turned into an oriented polyhedral surface.
///
/// Every variant is fatal to construction; the caller must supply different
/// geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError {
    /// The mesh has no vertices or no faces.
    #[error("mesh has {vertices} vertices and {faces} faces")]
    Empty { vertices: usize, faces: usize },

    /// A face refers to a vertex index past the end of the vertex array.
    #[error("face {face} refers to vertex {vertex}, but the mesh only has {num_vertices} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        vertex: usize,
        num_vertices: usize,
    },

    /// A face repeats one of its vertex indices.
    #[error("face {face} repeats a vertex index: {indices:?}")]
    DegenerateFace { face: usize, indices: [usize; 3] },

    /// A face has collinear vertices, so it has no unit normal.
    #[error("face {face} has zero area")]
    ZeroAreaFace { face: usize },

    /// A vertex coordinate is NaN or infinite.
    #[error("vertex {vertex} has a non-finite coordinate")]
    NonFiniteVertex { vertex: usize },

    /// The same directed edge appears in two faces. Either a neighbor has the
    /// opposite winding, or more than two faces share the edge.
    #[error("directed edge {from} -> {to} appears in faces {first_face} and {second_face}")]
    DuplicateDirectedEdge {
        from: usize,
        to: usize,
        first_face: usize,
        second_face: usize,
    },

    /// The faces around a vertex do not form a single fan.
    #[error("vertex {vertex} is not manifold")]
    NonManifoldVertex { vertex: usize },

    /// A vertex is not used by any face.
    #[error("vertex {vertex} is not referenced by any face")]
    UnreferencedVertex { vertex: usize },

    /// V - E + F does not describe an orientable surface with the observed
    /// number of components and boundary loops.
    #[error(
        "euler characteristic {characteristic} is inconsistent with {components} component(s) and {boundaries} boundary loop(s)"
    )]
    EulerCharacteristic {
        characteristic: i64,
        components: usize,
        boundaries: usize,
    },
}

// End of File
