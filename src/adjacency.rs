// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Edge/face adjacency resolution.
//!
//! Every face `(a, b, c)` has three directed edges, each stored as a `(head, tail)` pair:
//!
//! - edge 1: `b <- a`, stored as `(b, a)`
//! - edge 2: `c <- b`, stored as `(c, b)`
//! - edge 3: `a <- c`, stored as `(a, c)`
//!
//! On a closed, consistently wound surface each directed edge is matched by exactly one edge of a
//! neighboring face running the other way.  The resolver finds that neighbor for every
//! (face, slot) pair and records it in the column of the neighbor's slot, giving a fixed-width
//! table with exactly one filled column per row.
//!
//! [`resolve`] keys every directed edge by its undirected vertex pair in a hash map and confirms
//! reversal within each bucket, which is linear in the number of faces.  [`resolve_exhaustive`]
//! does the dense all-pairs comparison, O(F²), and is kept as a reference.

use crate::errors::GravityError;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;

/// Sentinel used by [`AdjacencyTable::face_map`] for "no neighbor through this slot".
pub const NO_MATCH: i64 = -1;

/// One of the three edge slots of a triangular face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeSlot {
    /// `a -> b`
    One,
    /// `b -> c`
    Two,
    /// `c -> a`
    Three,
}

impl EdgeSlot {
    pub const ALL: [EdgeSlot; 3] = [EdgeSlot::One, EdgeSlot::Two, EdgeSlot::Three];

    /// Zero-based position, also the index of the face's halfedge for this slot.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(EdgeSlot::One),
            1 => Some(EdgeSlot::Two),
            2 => Some(EdgeSlot::Three),
            _ => None,
        }
    }

    /// One-based edge number, as used in the edge names.
    pub const fn number(self) -> usize {
        self.index() + 1
    }

    /// `(head, tail)` of this slot's edge on face `(a, b, c)`.
    pub const fn head_tail(self, face: [usize; 3]) -> [usize; 2] {
        let [a, b, c] = face;
        match self {
            EdgeSlot::One => [b, a],
            EdgeSlot::Two => [c, b],
            EdgeSlot::Three => [a, c],
        }
    }
}

impl fmt::Display for EdgeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge {}", self.number())
    }
}

/// The three `(head, tail)` tables of a mesh, one row per face in each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeVertexMaps {
    maps: [Vec<[usize; 2]>; 3],
}

impl EdgeVertexMaps {
    pub fn from_faces(faces: &[[usize; 3]]) -> Self {
        Self {
            maps: EdgeSlot::ALL.map(|slot| faces.iter().map(|&f| slot.head_tail(f)).collect()),
        }
    }

    /// Wraps externally built tables.  Returns `None` unless all three have the same length.
    pub fn from_maps(
        edge1: Vec<[usize; 2]>,
        edge2: Vec<[usize; 2]>,
        edge3: Vec<[usize; 2]>,
    ) -> Option<Self> {
        (edge1.len() == edge2.len() && edge2.len() == edge3.len()).then(|| Self {
            maps: [edge1, edge2, edge3],
        })
    }

    pub fn slot(&self, slot: EdgeSlot) -> &[[usize; 2]] {
        &self.maps[slot.index()]
    }

    pub fn num_faces(&self) -> usize {
        self.maps[0].len()
    }
}

/// Neighbor faces for every (face, slot) pair.
///
/// `row(slot, face)[k]` is the face whose edge slot `k` carries the reversal of `slot` on `face`,
/// or `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyTable {
    rows: [Vec<[Option<usize>; 3]>; 3],
}

impl AdjacencyTable {
    /// Builds a table from explicit rows, indexed by own slot, then face.
    pub fn from_rows(rows: [Vec<[Option<usize>; 3]>; 3]) -> Self {
        Self { rows }
    }

    pub fn num_faces(&self) -> usize {
        self.rows[0].len()
    }

    pub fn rows(&self, slot: EdgeSlot) -> &[[Option<usize>; 3]] {
        &self.rows[slot.index()]
    }

    pub fn row(&self, slot: EdgeSlot, face: usize) -> [Option<usize>; 3] {
        self.rows[slot.index()][face]
    }

    /// The matched neighbor of `slot` on `face`: the first filled column in slot order.
    pub fn neighbor(&self, face: usize, slot: EdgeSlot) -> Option<(usize, EdgeSlot)> {
        self.row(slot, face)
            .into_iter()
            .zip(EdgeSlot::ALL)
            .find_map(|(neighbor, neighbor_slot)| neighbor.map(|n| (n, neighbor_slot)))
    }

    /// (face, slot) pairs without any neighbor, in slot-major order.
    pub fn unmatched(&self) -> impl Iterator<Item = (usize, EdgeSlot)> + '_ {
        EdgeSlot::ALL.into_iter().flat_map(move |slot| {
            self.rows(slot)
                .iter()
                .enumerate()
                .filter(|(_, row)| row.iter().all(Option::is_none))
                .map(move |(face, _)| (face, slot))
        })
    }

    /// True when every (face, slot) pair has a neighbor.
    pub fn is_complete(&self) -> bool {
        self.unmatched().next().is_none()
    }

    /// Rows of `[face, n1, n2, n3]` with [`NO_MATCH`] for empty columns.
    pub fn face_map(&self, slot: EdgeSlot) -> Vec<[i64; 4]> {
        let column = |n: Option<usize>| n.map_or(NO_MATCH, |n| n as i64);
        self.rows(slot)
            .iter()
            .enumerate()
            .map(|(face, &[n1, n2, n3])| [face as i64, column(n1), column(n2), column(n3)])
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct DirectedEdge {
    face: usize,
    slot: EdgeSlot,
    head: usize,
    tail: usize,
}

type EdgeIndex = FxHashMap<(usize, usize), SmallVec<[DirectedEdge; 2]>>;

const fn undirected_key(head: usize, tail: usize) -> (usize, usize) {
    if head < tail {
        (head, tail)
    } else {
        (tail, head)
    }
}

fn build_edge_index(maps: &EdgeVertexMaps) -> EdgeIndex {
    let mut index = EdgeIndex::default();
    index.reserve(3 * maps.num_faces() / 2);
    for slot in EdgeSlot::ALL {
        for (face, &[head, tail]) in maps.slot(slot).iter().enumerate() {
            index
                .entry(undirected_key(head, tail))
                .or_default()
                .push(DirectedEdge {
                    face,
                    slot,
                    head,
                    tail,
                });
        }
    }
    index
}

fn match_slot(maps: &EdgeVertexMaps, index: &EdgeIndex, slot: EdgeSlot) -> Vec<[Option<usize>; 3]> {
    maps.slot(slot)
        .par_iter()
        .map(|&[head, tail]| {
            let mut row = [None; 3];
            if head == tail {
                return row;
            }
            let Some(candidates) = index.get(&undirected_key(head, tail)) else {
                return row;
            };
            // A shared vertex pair is not enough: the candidate must run exactly the other way.
            for candidate in candidates {
                let column = &mut row[candidate.slot.index()];
                if column.is_none() && candidate.tail == head && candidate.head == tail {
                    *column = Some(candidate.face);
                }
            }
            row
        })
        .collect()
}

/// Runs `f` once per edge slot on the rayon pool and joins before returning.
pub(crate) fn join_slots<T, F>(f: F) -> [T; 3]
where
    T: Send,
    F: Fn(EdgeSlot) -> T + Sync,
{
    let (one, (two, three)) = rayon::join(
        || f(EdgeSlot::One),
        || rayon::join(|| f(EdgeSlot::Two), || f(EdgeSlot::Three)),
    );
    [one, two, three]
}

/// Resolves adjacency without requiring every edge to match.  Unmatched (face, slot) pairs keep
/// an all-`None` row; see [`AdjacencyTable::unmatched`].
pub fn resolve_open(maps: &EdgeVertexMaps) -> AdjacencyTable {
    let index = build_edge_index(maps);
    AdjacencyTable::from_rows(join_slots(|slot| match_slot(maps, &index, slot)))
}

/// Resolves adjacency for a closed mesh.
///
/// Fails with [`GravityError::UnmatchedEdge`] for the first (face, slot), in slot-major order,
/// that has no oppositely oriented partner.
pub fn resolve(maps: &EdgeVertexMaps) -> Result<AdjacencyTable, GravityError> {
    let table = resolve_open(maps);
    if let Some((face, slot)) = table.unmatched().next() {
        let [head, tail] = maps.slot(slot)[face];
        return Err(GravityError::UnmatchedEdge {
            face,
            slot,
            head,
            tail,
        });
    }
    log::debug!("resolved adjacency for {} faces", maps.num_faces());
    Ok(table)
}

/// For each row of `a`, the first row of `b` whose edge is the exact reversal, found by comparing
/// every pair of rows.  O(len(a) * len(b)).
pub fn search_reversed(a: &[[usize; 2]], b: &[[usize; 2]]) -> Vec<Option<usize>> {
    a.par_iter()
        .map(|&[head, tail]| {
            if head == tail {
                return None;
            }
            b.iter()
                .position(|&[other_head, other_tail]| head == other_tail && tail == other_head)
        })
        .collect()
}

/// Builds the adjacency table from the nine pairwise [`search_reversed`] calls.  O(F²); agrees
/// with [`resolve_open`] on every input.
pub fn resolve_exhaustive(maps: &EdgeVertexMaps) -> AdjacencyTable {
    let rows = EdgeSlot::ALL.map(|own| {
        let columns = EdgeSlot::ALL.map(|other| search_reversed(maps.slot(own), maps.slot(other)));
        (0..maps.num_faces())
            .map(|face| [columns[0][face], columns[1][face], columns[2][face]])
            .collect()
    });
    AdjacencyTable::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two triangles sharing the edge 1-2.
    const SQUARE: [[usize; 3]; 2] = [[0, 1, 2], [2, 1, 3]];

    #[test]
    fn head_tail_per_slot() {
        let face = [4, 5, 6];
        assert_eq!(EdgeSlot::One.head_tail(face), [5, 4]);
        assert_eq!(EdgeSlot::Two.head_tail(face), [6, 5]);
        assert_eq!(EdgeSlot::Three.head_tail(face), [4, 6]);
    }

    #[test]
    fn slot_numbering() {
        for (i, slot) in EdgeSlot::ALL.into_iter().enumerate() {
            assert_eq!(slot.index(), i);
            assert_eq!(EdgeSlot::from_index(i), Some(slot));
        }
        assert_eq!(EdgeSlot::from_index(3), None);
        assert_eq!(EdgeSlot::Three.to_string(), "edge 3");
    }

    #[test]
    fn shared_edge_of_two_triangles() {
        let maps = EdgeVertexMaps::from_faces(&SQUARE);
        let table = resolve_open(&maps);

        // Face 0 edge 2 is (2, 1); face 1 edge 1 is (1, 2).
        assert_eq!(table.row(EdgeSlot::Two, 0), [Some(1), None, None]);
        assert_eq!(table.row(EdgeSlot::One, 1), [None, Some(0), None]);
        assert_eq!(table.neighbor(0, EdgeSlot::Two), Some((1, EdgeSlot::One)));
        assert_eq!(table.neighbor(1, EdgeSlot::One), Some((0, EdgeSlot::Two)));
        assert_eq!(table.unmatched().count(), 4);
    }

    #[test]
    fn open_mesh_fails_strict_resolution() {
        let maps = EdgeVertexMaps::from_faces(&SQUARE);
        let err = resolve(&maps).unwrap_err();
        assert!(matches!(
            err,
            GravityError::UnmatchedEdge {
                face: 0,
                slot: EdgeSlot::One,
                head: 1,
                tail: 0,
            }
        ));
    }

    #[test]
    fn same_direction_is_not_a_match() {
        // Both faces run 1 -> 2.
        let maps = EdgeVertexMaps::from_faces(&[[0, 1, 2], [1, 2, 3]]);
        let table = resolve_open(&maps);
        assert_eq!(table.row(EdgeSlot::Two, 0), [None, None, None]);
        assert_eq!(table.row(EdgeSlot::One, 1), [None, None, None]);
    }

    #[test]
    fn face_map_uses_sentinels() {
        let maps = EdgeVertexMaps::from_faces(&SQUARE);
        let table = resolve_open(&maps);
        assert_eq!(
            table.face_map(EdgeSlot::Two),
            vec![[0, 1, NO_MATCH, NO_MATCH], [1, NO_MATCH, NO_MATCH, NO_MATCH]]
        );
    }

    #[test]
    fn search_reversed_finds_reversal_only() {
        let a = [[1, 0], [2, 1], [0, 2]];
        let b = [[0, 1], [1, 2], [3, 3]];
        assert_eq!(search_reversed(&a, &b), vec![Some(0), Some(1), None]);
    }

    #[test]
    fn mismatched_map_lengths_are_rejected() {
        assert!(EdgeVertexMaps::from_maps(vec![[1, 0]], vec![], vec![[0, 1]]).is_none());
        let maps = EdgeVertexMaps::from_maps(vec![[1, 0]], vec![[2, 1]], vec![[0, 2]]).unwrap();
        assert_eq!(maps.num_faces(), 1);
    }
}

// End of File
