// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use crate::errors::TopologyError;
use crate::topology::Topology;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use std::ops::Index;

/// A named array of values, one per face or per halfedge.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMap<T> {
    name: &'static str,
    values: Vec<T>,
}

impl<T> PropertyMap<T> {
    pub fn new(name: &'static str, values: Vec<T>) -> Self {
        Self { name, values }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }
}

impl<T> Index<usize> for PropertyMap<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

/// Geometric attributes attached to the faces and halfedges of a mesh.
///
/// Computed eagerly whenever the mesh geometry changes, never on first access.
#[derive(Debug, Clone)]
pub struct SurfaceAttributes {
    /// Outward unit normal per face: `normalize((b - a) x (c - b))`.
    pub face_normal: PropertyMap<Vector3<f64>>,
    /// Centroid per face.
    pub face_centroid: PropertyMap<Point3<f64>>,
    /// In-plane unit normal per halfedge, pointing away from its face.  Border halfedges carry a
    /// zero vector.
    pub halfedge_normal: PropertyMap<Vector3<f64>>,
}

impl SurfaceAttributes {
    pub(crate) fn compute(
        vertices: &[Point3<f64>],
        faces: &[[usize; 3]],
        topology: &Topology,
    ) -> Result<Self, TopologyError> {
        let per_face: Vec<(Vector3<f64>, Point3<f64>, [Vector3<f64>; 3])> = faces
            .par_iter()
            .enumerate()
            .map(|(f, &[a, b, c])| {
                let (pa, pb, pc) = (vertices[a], vertices[b], vertices[c]);
                let edges = [pb - pa, pc - pb, pa - pc];
                let normal = edges[0]
                    .cross(&edges[1])
                    .try_normalize(f64::EPSILON)
                    .ok_or(TopologyError::ZeroAreaFace { face: f })?;
                let centroid = Point3::from((pa.coords + pb.coords + pc.coords) / 3.0);
                let edge_normals = edges.map(|e| e.cross(&normal).normalize());
                Ok((normal, centroid, edge_normals))
            })
            .collect::<Result<_, TopologyError>>()?;

        let mut face_normal = Vec::with_capacity(faces.len());
        let mut face_centroid = Vec::with_capacity(faces.len());
        let mut halfedge_normal = vec![Vector3::zeros(); topology.num_halfedges()];
        for (f, (normal, centroid, edge_normals)) in per_face.into_iter().enumerate() {
            face_normal.push(normal);
            face_centroid.push(centroid);
            for (h, n) in topology.face_halfedges(f).into_iter().zip(edge_normals) {
                halfedge_normal[h] = n;
            }
        }

        Ok(Self {
            face_normal: PropertyMap::new("f:normal", face_normal),
            face_centroid: PropertyMap::new("f:centroid", face_centroid),
            halfedge_normal: PropertyMap::new("h:normal", halfedge_normal),
        })
    }
}


// End of File
