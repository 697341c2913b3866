// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Oriented halfedge connectivity for a triangle soup.
//!
//! Halfedges are stored in an arena.  The three halfedges of face `f` occupy indices `3f`, `3f + 1`
//! and `3f + 2`, running `a -> b`, `b -> c` and `c -> a` for the face triple `(a, b, c)`.  Edges on
//! an open boundary get a border halfedge (no face) appended after the face halfedges, so every
//! halfedge has a twin and the `next`/`prev` links always form closed loops.
//!
//! Vertex `i` of the topology is vertex `i` of the mesh: no re-enumeration ever happens.

use crate::errors::TopologyError;
use rustc_hash::FxHashMap;

const UNSET: usize = usize::MAX;

/// One directed side of a mesh edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halfedge {
    /// Vertex this halfedge leaves.
    pub origin: usize,
    /// Face on the left of the halfedge, `None` on a border.
    pub face: Option<usize>,
    /// Next halfedge around the same face (or border loop).
    pub next: usize,
    /// Previous halfedge around the same face (or border loop).
    pub prev: usize,
    /// Oppositely oriented halfedge of the same edge.
    pub twin: usize,
}

/// Validated halfedge graph of a triangle mesh.
#[derive(Debug, Clone)]
pub struct Topology {
    halfedges: Vec<Halfedge>,
    vertex_halfedge: Vec<usize>,
    num_faces: usize,
    components: usize,
    boundaries: usize,
    genus: usize,
}

impl Topology {
    /// Builds and validates the halfedge graph for `faces` over `num_vertices` vertices.
    ///
    /// Rejects out-of-range indices, repeated indices within a face, directed edges used twice
    /// (inconsistent winding or more than two faces on an edge), non-manifold vertices,
    /// unreferenced vertices and an Euler characteristic that does not describe an orientable
    /// surface.  Open boundaries are accepted; see [`Topology::is_closed`].
    pub fn build(num_vertices: usize, faces: &[[usize; 3]]) -> Result<Self, TopologyError> {
        if num_vertices == 0 || faces.is_empty() {
            return Err(TopologyError::Empty {
                vertices: num_vertices,
                faces: faces.len(),
            });
        }

        for (f, face) in faces.iter().enumerate() {
            if let Some(&vertex) = face.iter().find(|&&v| v >= num_vertices) {
                return Err(TopologyError::FaceIndexOutOfRange {
                    face: f,
                    vertex,
                    num_vertices,
                });
            }
            if face[0] == face[1] || face[1] == face[2] || face[2] == face[0] {
                return Err(TopologyError::DegenerateFace {
                    face: f,
                    indices: *face,
                });
            }
        }

        let num_faces = faces.len();
        let mut halfedges = Vec::with_capacity(3 * num_faces);
        let mut directed: FxHashMap<(usize, usize), usize> = FxHashMap::default();
        directed.reserve(3 * num_faces);

        for (f, face) in faces.iter().enumerate() {
            let base = 3 * f;
            for k in 0..3 {
                let from = face[k];
                let to = face[(k + 1) % 3];
                if let Some(&existing) = directed.get(&(from, to)) {
                    return Err(TopologyError::DuplicateDirectedEdge {
                        from,
                        to,
                        first_face: existing / 3,
                        second_face: f,
                    });
                }
                directed.insert((from, to), base + k);
                halfedges.push(Halfedge {
                    origin: from,
                    face: Some(f),
                    next: base + (k + 1) % 3,
                    prev: base + (k + 2) % 3,
                    twin: UNSET,
                });
            }
        }

        // Pair interior halfedges; an edge without a reversed partner gets a border halfedge.
        let interior = halfedges.len();
        let mut border_from: FxHashMap<usize, usize> = FxHashMap::default();
        for h in 0..interior {
            if halfedges[h].twin != UNSET {
                continue;
            }
            let from = halfedges[h].origin;
            let to = halfedges[halfedges[h].next].origin;
            match directed.get(&(to, from)) {
                Some(&t) => {
                    halfedges[h].twin = t;
                    halfedges[t].twin = h;
                }
                None => {
                    let b = halfedges.len();
                    halfedges.push(Halfedge {
                        origin: to,
                        face: None,
                        next: UNSET,
                        prev: UNSET,
                        twin: h,
                    });
                    halfedges[h].twin = b;
                    if border_from.insert(to, b).is_some() {
                        return Err(TopologyError::NonManifoldVertex { vertex: to });
                    }
                }
            }
        }

        for b in interior..halfedges.len() {
            let dest = halfedges[halfedges[b].twin].origin;
            let Some(&n) = border_from.get(&dest) else {
                return Err(TopologyError::NonManifoldVertex { vertex: dest });
            };
            halfedges[b].next = n;
            halfedges[n].prev = b;
        }

        // Border halfedges win so that walking a boundary vertex starts on the boundary.
        let mut vertex_halfedge = vec![UNSET; num_vertices];
        let mut out_degree = vec![0usize; num_vertices];
        for (h, he) in halfedges.iter().enumerate() {
            out_degree[he.origin] += 1;
            let slot = &mut vertex_halfedge[he.origin];
            if *slot == UNSET || he.face.is_none() {
                *slot = h;
            }
        }
        if let Some(vertex) = vertex_halfedge.iter().position(|&h| h == UNSET) {
            return Err(TopologyError::UnreferencedVertex { vertex });
        }

        let mut topology = Self {
            halfedges,
            vertex_halfedge,
            num_faces,
            components: 0,
            boundaries: 0,
            genus: 0,
        };

        for (vertex, &degree) in out_degree.iter().enumerate() {
            if topology.outgoing(vertex).take(degree + 1).count() != degree {
                return Err(TopologyError::NonManifoldVertex { vertex });
            }
        }

        topology.components = topology.count_components();
        topology.boundaries = topology.count_boundaries();

        let characteristic = topology.euler_characteristic();
        let twice_genus =
            2 * topology.components as i64 - topology.boundaries as i64 - characteristic;
        if twice_genus < 0 || twice_genus % 2 != 0 {
            return Err(TopologyError::EulerCharacteristic {
                characteristic,
                components: topology.components,
                boundaries: topology.boundaries,
            });
        }
        topology.genus = (twice_genus / 2) as usize;

        Ok(topology)
    }

    fn count_components(&self) -> usize {
        // Union-find over faces, joined across interior edges.
        let mut parent: Vec<usize> = (0..self.num_faces).collect();
        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        for he in &self.halfedges {
            let (Some(a), Some(b)) = (he.face, self.halfedges[he.twin].face) else {
                continue;
            };
            let ra = find(&mut parent, a);
            let rb = find(&mut parent, b);
            if ra != rb {
                parent[ra] = rb;
            }
        }

        (0..self.num_faces)
            .filter(|&f| find(&mut parent, f) == f)
            .count()
    }

    fn count_boundaries(&self) -> usize {
        let first_border = 3 * self.num_faces;
        let mut seen = vec![false; self.halfedges.len() - first_border];
        let mut loops = 0;
        for start in first_border..self.halfedges.len() {
            if seen[start - first_border] {
                continue;
            }
            loops += 1;
            let mut h = start;
            while !seen[h - first_border] {
                seen[h - first_border] = true;
                h = self.halfedges[h].next;
            }
        }
        loops
    }

    /// All halfedges, face halfedges first, border halfedges after.
    pub fn halfedges(&self) -> &[Halfedge] {
        &self.halfedges
    }

    pub fn halfedge(&self, h: usize) -> &Halfedge {
        &self.halfedges[h]
    }

    /// The three halfedges of face `f`, in the order `a -> b`, `b -> c`, `c -> a`.
    pub const fn face_halfedges(&self, f: usize) -> [usize; 3] {
        [3 * f, 3 * f + 1, 3 * f + 2]
    }

    /// Vertex the halfedge points to.
    pub fn destination(&self, h: usize) -> usize {
        self.halfedges[self.halfedges[h].next].origin
    }

    /// An outgoing halfedge of `vertex`; a border halfedge if the vertex lies on a boundary.
    pub fn vertex_halfedge(&self, vertex: usize) -> usize {
        self.vertex_halfedge[vertex]
    }

    /// Outgoing halfedges of `vertex`, rotating around it once.
    pub fn outgoing(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        let start = self.vertex_halfedge[vertex];
        std::iter::successors(Some(start), move |&h| {
            let n = self.halfedges[self.halfedges[h].prev].twin;
            (n != start).then_some(n)
        })
    }

    /// The halfedge running `from -> to`, if the mesh has that edge in that direction.
    pub fn find_halfedge(&self, from: usize, to: usize) -> Option<usize> {
        self.outgoing(from).find(|&h| self.destination(h) == to)
    }

    pub fn is_border(&self, h: usize) -> bool {
        self.halfedges[h].face.is_none()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertex_halfedge.len()
    }

    pub const fn num_faces(&self) -> usize {
        self.num_faces
    }

    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.halfedges.len() / 2
    }

    pub fn num_border_halfedges(&self) -> usize {
        self.halfedges.len() - 3 * self.num_faces
    }

    /// True when every edge is shared by exactly two faces.
    pub fn is_closed(&self) -> bool {
        self.num_border_halfedges() == 0
    }

    /// V - E + F.
    pub fn euler_characteristic(&self) -> i64 {
        self.num_vertices() as i64 - self.num_edges() as i64 + self.num_faces as i64
    }

    pub const fn components(&self) -> usize {
        self.components
    }

    pub const fn boundaries(&self) -> usize {
        self.boundaries
    }

    /// Total genus over all components.
    pub const fn genus(&self) -> usize {
        self.genus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two triangles sharing the edge 1-2, forming a square.
    const SQUARE: [[usize; 3]; 2] = [[0, 1, 2], [2, 1, 3]];

    const TETRAHEDRON: [[usize; 3]; 4] = [[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];

    #[test]
    fn tetrahedron_is_closed_sphere() {
        let topology = Topology::build(4, &TETRAHEDRON).unwrap();
        assert!(topology.is_closed());
        assert_eq!(topology.num_edges(), 6);
        assert_eq!(topology.euler_characteristic(), 2);
        assert_eq!(topology.components(), 1);
        assert_eq!(topology.genus(), 0);
    }

    #[test]
    fn twins_are_reversed() {
        let topology = Topology::build(4, &TETRAHEDRON).unwrap();
        for (h, he) in topology.halfedges().iter().enumerate() {
            let twin = topology.halfedge(he.twin);
            assert_eq!(twin.twin, h);
            assert_eq!(twin.origin, topology.destination(h));
            assert_eq!(topology.destination(he.twin), he.origin);
        }
    }

    #[test]
    fn open_square_has_one_boundary_loop() {
        let topology = Topology::build(4, &SQUARE).unwrap();
        assert!(!topology.is_closed());
        assert_eq!(topology.num_border_halfedges(), 4);
        assert_eq!(topology.boundaries(), 1);
        assert_eq!(topology.genus(), 0);
        for v in 0..4 {
            assert!(topology.is_border(topology.vertex_halfedge(v)));
        }
    }

    #[test]
    fn outgoing_visits_every_neighbor() {
        let topology = Topology::build(4, &TETRAHEDRON).unwrap();
        let mut neighbors: Vec<usize> = topology
            .outgoing(0)
            .map(|h| topology.destination(h))
            .collect();
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec![1, 2, 3]);
        assert_eq!(topology.find_halfedge(0, 2), Some(0));
        assert_eq!(topology.find_halfedge(2, 0), Some(9));
    }

    #[test]
    fn flipped_neighbor_is_duplicate_directed_edge() {
        let faces = [[0, 1, 2], [1, 2, 3]];
        let err = Topology::build(4, &faces).unwrap_err();
        assert_eq!(
            err,
            TopologyError::DuplicateDirectedEdge {
                from: 1,
                to: 2,
                first_face: 0,
                second_face: 1,
            }
        );
    }

    #[test]
    fn rejects_index_out_of_range() {
        let err = Topology::build(3, &[[0, 1, 3]]).unwrap_err();
        assert!(matches!(
            err,
            TopologyError::FaceIndexOutOfRange { face: 0, vertex: 3, .. }
        ));
    }

    #[test]
    fn rejects_repeated_index() {
        let err = Topology::build(3, &[[0, 1, 1]]).unwrap_err();
        assert!(matches!(err, TopologyError::DegenerateFace { face: 0, .. }));
    }

    #[test]
    fn rejects_unreferenced_vertex() {
        let err = Topology::build(5, &TETRAHEDRON).unwrap_err();
        assert_eq!(err, TopologyError::UnreferencedVertex { vertex: 4 });
    }

    #[test]
    fn rejects_bowtie_vertex() {
        // Two triangles touching only at vertex 0.
        let faces = [[0, 1, 2], [0, 3, 4]];
        let err = Topology::build(5, &faces).unwrap_err();
        assert!(matches!(err, TopologyError::NonManifoldVertex { .. }));
    }

    #[test]
    fn rejects_empty() {
        let err = Topology::build(0, &[]).unwrap_err();
        assert_eq!(err, TopologyError::Empty { vertices: 0, faces: 0 });
    }
}

// End of File
