// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use crate::adjacency::{self, join_slots, AdjacencyTable, EdgeSlot, EdgeVertexMaps};
use crate::errors::GravityError;
use mesh::Mesh;
use nalgebra::Matrix3;
use rayon::prelude::*;
use std::time::Instant;

/// An undirected edge, represented by the lexicographically smaller of its two (face, slot)
/// pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueEdge {
    pub face: usize,
    pub slot: EdgeSlot,
    /// `(head, tail)` as stored in the representative's edge map.
    pub vertices: [usize; 2],
}

/// Dyad tensors of a mesh, derived from its normals and edge adjacency.
///
/// A cache is tied to the mesh generation it was built from and is never patched: any change to
/// the mesh requires building a new one.
#[derive(Debug, Clone)]
pub struct MeshParameters {
    edge_maps: EdgeVertexMaps,
    adjacency: AdjacencyTable,
    face_dyads: Vec<Matrix3<f64>>,
    edge_dyads: [Vec<Matrix3<f64>>; 3],
    unique_edges: Vec<UniqueEdge>,
    generation: u64,
}

impl MeshParameters {
    /// Resolves the adjacency of `mesh` and computes every dyad.  Fails with
    /// [`GravityError::UnmatchedEdge`] if the mesh is open.
    pub fn new(mesh: &Mesh) -> Result<Self, GravityError> {
        let edge_maps = EdgeVertexMaps::from_faces(mesh.faces());
        let adjacency = adjacency::resolve(&edge_maps)?;
        Self::build(mesh, edge_maps, adjacency)
    }

    /// Computes the dyads from an adjacency table resolved elsewhere.  Every (face, slot) must have
    /// a neighbor, otherwise this fails with [`GravityError::DegenerateAdjacency`].
    pub fn from_adjacency(mesh: &Mesh, adjacency: AdjacencyTable) -> Result<Self, GravityError> {
        let edge_maps = EdgeVertexMaps::from_faces(mesh.faces());
        Self::build(mesh, edge_maps, adjacency)
    }

    fn build(
        mesh: &Mesh,
        edge_maps: EdgeVertexMaps,
        adjacency: AdjacencyTable,
    ) -> Result<Self, GravityError> {
        let start = Instant::now();
        let num_faces = mesh.num_faces();
        for slot in EdgeSlot::ALL {
            let rows = adjacency.rows(slot).len();
            if rows != num_faces {
                return Err(GravityError::DegenerateAdjacency {
                    face: rows.min(num_faces),
                    slot,
                });
            }
        }

        let face_dyads: Vec<Matrix3<f64>> = (0..num_faces)
            .into_par_iter()
            .map(|f| {
                let n = mesh.face_normal(f);
                n * n.transpose()
            })
            .collect();

        let [one, two, three] = join_slots(|slot| edge_dyads_for_slot(mesh, &adjacency, slot));
        let edge_dyads = [one?, two?, three?];

        let mut unique_edges = Vec::with_capacity(3 * num_faces / 2);
        for slot in EdgeSlot::ALL {
            for face in 0..num_faces {
                if let Some(neighbor) = adjacency.neighbor(face, slot) {
                    if (face, slot) < neighbor {
                        unique_edges.push(UniqueEdge {
                            face,
                            slot,
                            vertices: edge_maps.slot(slot)[face],
                        });
                    }
                }
            }
        }

        log::debug!(
            "computed dyads for {} faces and {} unique edges in {:?}",
            num_faces,
            unique_edges.len(),
            start.elapsed()
        );

        Ok(Self {
            edge_maps,
            adjacency,
            face_dyads,
            edge_dyads,
            unique_edges,
            generation: mesh.generation(),
        })
    }

    pub fn edge_maps(&self) -> &EdgeVertexMaps {
        &self.edge_maps
    }

    pub fn adjacency(&self) -> &AdjacencyTable {
        &self.adjacency
    }

    /// `n nᵀ` for every face normal `n`.
    pub fn face_dyads(&self) -> &[Matrix3<f64>] {
        &self.face_dyads
    }

    pub fn face_dyad(&self, face: usize) -> &Matrix3<f64> {
        &self.face_dyads[face]
    }

    /// `n_A n_A,kᵀ + n_B n_B,jᵀ` for the given slot of every face, where `B` is the matched
    /// neighbor and `j` its slot.
    pub fn edge_dyads(&self, slot: EdgeSlot) -> &[Matrix3<f64>] {
        &self.edge_dyads[slot.index()]
    }

    pub fn edge_dyad(&self, face: usize, slot: EdgeSlot) -> &Matrix3<f64> {
        &self.edge_dyads[slot.index()][face]
    }

    pub fn unique_edges(&self) -> &[UniqueEdge] {
        &self.unique_edges
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// True when this cache was built from the geometry `mesh` currently holds.
    pub fn is_current(&self, mesh: &Mesh) -> bool {
        self.generation == mesh.generation()
    }
}

fn edge_dyads_for_slot(
    mesh: &Mesh,
    adjacency: &AdjacencyTable,
    slot: EdgeSlot,
) -> Result<Vec<Matrix3<f64>>, GravityError> {
    let num_faces = mesh.num_faces();
    let dyads: Vec<Option<Matrix3<f64>>> = (0..num_faces)
        .into_par_iter()
        .map(|face| {
            let (neighbor, neighbor_slot) = adjacency
                .neighbor(face, slot)
                .filter(|&(n, _)| n < num_faces)?;
            let own_edge = mesh.halfedge_normal(3 * face + slot.index());
            let other_edge = mesh.halfedge_normal(3 * neighbor + neighbor_slot.index());
            Some(
                mesh.face_normal(face) * own_edge.transpose()
                    + mesh.face_normal(neighbor) * other_edge.transpose(),
            )
        })
        .collect();

    // Reported in face order so the error does not depend on scheduling.
    dyads
        .into_iter()
        .enumerate()
        .map(|(face, dyad)| dyad.ok_or(GravityError::DegenerateAdjacency { face, slot }))
        .collect()
}


// End of File
