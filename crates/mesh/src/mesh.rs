// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use crate::attributes::SurfaceAttributes;
use crate::errors::TopologyError;
use crate::topology::Topology;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// A closed (or open) triangulated surface.
///
/// The mesh owns its vertex and face arrays.  The halfedge [`Topology`] and the
/// [`SurfaceAttributes`] are derived from them and rebuilt together whenever the geometry changes,
/// so the arrays and the graph view never disagree.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Point3<f64>>,
    faces: Vec<[usize; 3]>,
    topology: Topology,
    attributes: SurfaceAttributes,
    generation: u64,
}

impl Mesh {
    /// Validates the faces against the vertices and builds the topology and attributes.
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<[usize; 3]>) -> Result<Self, TopologyError> {
        if let Some(vertex) = vertices
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(TopologyError::NonFiniteVertex { vertex });
        }

        let topology = Topology::build(vertices.len(), &faces)?;
        let attributes = SurfaceAttributes::compute(&vertices, &faces, &topology)?;

        log::debug!(
            "built mesh: {} vertices, {} faces, {} edges, closed: {}",
            vertices.len(),
            faces.len(),
            topology.num_edges(),
            topology.is_closed()
        );

        Ok(Self {
            vertices,
            faces,
            topology,
            attributes,
            generation: next_generation(),
        })
    }

    /// Builds a mesh from plain coordinate rows and index triples.
    pub fn from_arrays(vertices: &[[f64; 3]], faces: &[[usize; 3]]) -> Result<Self, TopologyError> {
        Self::new(
            vertices.iter().map(|&[x, y, z]| Point3::new(x, y, z)).collect(),
            faces.to_vec(),
        )
    }

    /// Replaces the geometry.  On error the mesh is left untouched.
    pub fn replace(
        &mut self,
        vertices: Vec<Point3<f64>>,
        faces: Vec<[usize; 3]>,
    ) -> Result<(), TopologyError> {
        *self = Self::new(vertices, faces)?;
        Ok(())
    }

    /// Replaces the vertex positions, keeping the faces.  On error the mesh is left untouched.
    pub fn set_vertices(&mut self, vertices: Vec<Point3<f64>>) -> Result<(), TopologyError> {
        let faces = self.faces.clone();
        self.replace(vertices, faces)
    }

    pub fn vertex(&self, index: usize) -> Option<&Point3<f64>> {
        self.vertices.get(index)
    }

    pub fn face(&self, index: usize) -> Option<[usize; 3]> {
        self.faces.get(index).copied()
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn num_edges(&self) -> usize {
        self.topology.num_edges()
    }

    pub fn is_closed(&self) -> bool {
        self.topology.is_closed()
    }

    pub const fn topology(&self) -> &Topology {
        &self.topology
    }

    pub const fn attributes(&self) -> &SurfaceAttributes {
        &self.attributes
    }

    /// Identifies the geometry this mesh currently holds.  Every construction or replacement
    /// yields a new value; clones share it.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Outward unit normal of `face`.
    ///
    /// # Panics
    ///
    /// Panics if `face >= self.num_faces()`.  Use `self.attributes().face_normal.get(face)` for
    /// a checked lookup.
    pub fn face_normal(&self, face: usize) -> &Vector3<f64> {
        &self.attributes.face_normal[face]
    }

    /// # Panics
    ///
    /// Panics if `face >= self.num_faces()`.  Use `self.attributes().face_centroid.get(face)`
    /// for a checked lookup.
    pub fn face_centroid(&self, face: usize) -> &Point3<f64> {
        &self.attributes.face_centroid[face]
    }

    /// In-plane normal of halfedge `3 * face + k`.
    ///
    /// # Panics
    ///
    /// Panics if `halfedge` is not a halfedge of this mesh.  Use
    /// `self.attributes().halfedge_normal.get(halfedge)` for a checked lookup.
    pub fn halfedge_normal(&self, halfedge: usize) -> &Vector3<f64> {
        &self.attributes.halfedge_normal[halfedge]
    }

    /// Position of the origin vertex of a halfedge, read through the graph view.
    ///
    /// # Panics
    ///
    /// Panics if `halfedge` is not a halfedge of this mesh.
    pub fn halfedge_origin(&self, halfedge: usize) -> &Point3<f64> {
        &self.vertices[self.topology.halfedge(halfedge).origin]
    }

    /// Faces incident to each vertex, in face order.
    pub fn vertex_faces(&self) -> Vec<Vec<usize>> {
        let mut incident = vec![Vec::new(); self.vertices.len()];
        for (f, face) in self.faces.iter().enumerate() {
            for &v in face {
                incident[v].push(f);
            }
        }
        incident
    }

    /// Enclosed volume by the divergence theorem.  Only meaningful for closed meshes; positive for
    /// outward winding.
    pub fn volume(&self) -> f64 {
        self.faces
            .par_iter()
            .map(|&[a, b, c]| {
                let (pa, pb, pc) = (
                    self.vertices[a].coords,
                    self.vertices[b].coords,
                    self.vertices[c].coords,
                );
                pa.dot(&pb.cross(&pc))
            })
            .sum::<f64>()
            / 6.0
    }

    pub fn surface_area(&self) -> f64 {
        self.faces
            .par_iter()
            .map(|&[a, b, c]| {
                let (pa, pb, pc) = (self.vertices[a], self.vertices[b], self.vertices[c]);
                0.5 * (pb - pa).cross(&(pc - pa)).norm()
            })
            .sum()
    }

    pub fn stats(&self) -> MeshStats {
        MeshStats {
            vertices: self.num_vertices(),
            faces: self.num_faces(),
            edges: self.num_edges(),
            border_halfedges: self.topology.num_border_halfedges(),
            components: self.topology.components(),
            genus: self.topology.genus(),
            closed: self.is_closed(),
            volume: self.volume(),
            surface_area: self.surface_area(),
        }
    }
}

/// Summary counts for a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    pub vertices: usize,
    pub faces: usize,
    pub edges: usize,
    pub border_halfedges: usize,
    pub components: usize,
    pub genus: usize,
    pub closed: bool,
    pub volume: f64,
    pub surface_area: f64,
}

impl fmt::Display for MeshStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vertices: {}", self.vertices)?;
        writeln!(f, "Faces: {}", self.faces)?;
        writeln!(f, "Edges: {}", self.edges)?;
        writeln!(f, "Border halfedges: {}", self.border_halfedges)?;
        writeln!(f, "Components: {}", self.components)?;
        writeln!(f, "Genus: {}", self.genus)?;
        writeln!(f, "Closed: {}", self.closed)?;
        writeln!(f, "Volume: {}", self.volume)?;
        write!(f, "Surface area: {}", self.surface_area)
    }
}

// End of File
