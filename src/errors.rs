// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use crate::adjacency::EdgeSlot;
use mesh::TopologyError;
use thiserror::Error;

/// Failures of mesh parameterization and body construction.
///
/// All of them are deterministic functions of the input geometry or name; retrying with the same
/// input gives the same error.
#[derive(Debug, Error)]
pub enum GravityError {
    /// The vertex/face arrays do not form a valid oriented surface.
    #[error("invalid topology: {0}")]
    InvalidTopology(#[from] TopologyError),

    /// A directed edge has no oppositely oriented partner.  Only expected on open meshes.
    #[error("{slot} of face {face} ({tail} -> {head}) has no oppositely oriented neighbor")]
    UnmatchedEdge {
        face: usize,
        slot: EdgeSlot,
        head: usize,
        tail: usize,
    },

    /// An adjacency table handed to the parameter cache has an edge with no confirmed neighbor.
    #[error("{slot} of face {face} has no confirmed neighbor in the adjacency table")]
    DegenerateAdjacency { face: usize, slot: EdgeSlot },

    /// The name is not in the preset table.
    #[error("unknown body preset `{0}`")]
    UnknownBodyPreset(String),

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

// End of File
