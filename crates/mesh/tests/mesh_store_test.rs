// Tests for the triangular mesh store.
//
// Covers construction, the vertex-order identity between the arrays and the
// halfedge view, atomic replacement and rejection of malformed input.

use asteroid_mesh::{Mesh, TopologyError, shapes};
use nalgebra::Point3;

#[rustfmt::skip]
const CUBE_VERTICES: [[f64; 3]; 8] = [
    [-0.5, -0.5, -0.5],
    [-0.5, -0.5,  0.5],
    [-0.5,  0.5, -0.5],
    [-0.5,  0.5,  0.5],
    [ 0.5, -0.5, -0.5],
    [ 0.5, -0.5,  0.5],
    [ 0.5,  0.5, -0.5],
    [ 0.5,  0.5,  0.5],
];

const CUBE_FACES: [[usize; 3]; 12] = [
    [0, 6, 4],
    [0, 2, 6],
    [0, 3, 2],
    [0, 1, 3],
    [2, 7, 6],
    [2, 3, 7],
    [4, 6, 7],
    [4, 7, 5],
    [0, 4, 5],
    [0, 5, 1],
    [1, 5, 7],
    [1, 7, 3],
];

// ============================================================================
// Construction
// ============================================================================

#[test]
fn cube_from_arrays() {
    let mesh = Mesh::from_arrays(&CUBE_VERTICES, &CUBE_FACES).unwrap();
    assert_eq!(mesh.num_vertices(), 8);
    assert_eq!(mesh.num_faces(), 12);
    assert_eq!(mesh.num_edges(), 18);
    assert!(mesh.is_closed());

    for (i, row) in CUBE_VERTICES.iter().enumerate() {
        assert_eq!(mesh.vertex(i), Some(&Point3::new(row[0], row[1], row[2])));
    }
    for (i, face) in CUBE_FACES.iter().enumerate() {
        assert_eq!(mesh.face(i), Some(*face));
    }
    assert_eq!(mesh.vertex(8), None);
    assert_eq!(mesh.face(12), None);
}

#[test]
fn cube_generator_matches_reference_arrays() {
    let generated = shapes::cube(1.0).unwrap();
    let reference = Mesh::from_arrays(&CUBE_VERTICES, &CUBE_FACES).unwrap();
    assert_eq!(generated.vertices(), reference.vertices());
    assert_eq!(generated.faces(), reference.faces());
}

#[test]
fn vertices_round_trip_through_halfedge_view() {
    let mesh = shapes::icosphere(1.0, 2).unwrap();
    let topology = mesh.topology();
    assert_eq!(topology.num_vertices(), mesh.num_vertices());

    for i in 0..mesh.num_vertices() {
        let h = topology.vertex_halfedge(i);
        assert_eq!(topology.halfedge(h).origin, i);
        assert_eq!(mesh.halfedge_origin(h), mesh.vertex(i).unwrap());
        for out in topology.outgoing(i) {
            assert_eq!(mesh.halfedge_origin(out), &mesh.vertices()[i]);
        }
    }
}

#[test]
fn face_halfedges_follow_face_order() {
    let mesh = shapes::cube(1.0).unwrap();
    let topology = mesh.topology();
    for (f, &[a, b, c]) in mesh.faces().iter().enumerate() {
        let [h0, h1, h2] = topology.face_halfedges(f);
        assert_eq!((topology.halfedge(h0).origin, topology.destination(h0)), (a, b));
        assert_eq!((topology.halfedge(h1).origin, topology.destination(h1)), (b, c));
        assert_eq!((topology.halfedge(h2).origin, topology.destination(h2)), (c, a));
        assert_eq!(topology.halfedge(h0).face, Some(f));
    }
}

#[test]
fn attributes_are_computed_eagerly() {
    let mesh = shapes::cube(1.0).unwrap();
    let attributes = mesh.attributes();
    assert_eq!(attributes.face_normal.len(), 12);
    assert_eq!(attributes.face_centroid.len(), 12);
    assert_eq!(attributes.halfedge_normal.len(), 36);
    for f in 0..12 {
        let n = mesh.face_normal(f);
        assert!((n.norm() - 1.0).abs() < 1e-12);
        // Cube faces are axis aligned and the centroid lies on the face plane.
        assert!((n.dot(&mesh.face_centroid(f).coords) - 0.5).abs() < 1e-12);
    }
    for h in 0..36 {
        let n = mesh.halfedge_normal(h);
        let face = mesh.topology().halfedge(h).face.unwrap();
        assert!(n.dot(mesh.face_normal(face)).abs() < 1e-12);
    }
}

#[test]
fn vertex_faces_lists_incident_faces() {
    let mesh = shapes::cube(1.0).unwrap();
    let incident = mesh.vertex_faces();
    assert_eq!(incident[0], vec![0, 1, 2, 3, 8, 9]);
    let total: usize = incident.iter().map(Vec::len).sum();
    assert_eq!(total, 36);
}

#[test]
fn cube_volume_and_area() {
    let mesh = shapes::cube(2.0).unwrap();
    assert!((mesh.volume() - 8.0).abs() < 1e-12);
    assert!((mesh.surface_area() - 24.0).abs() < 1e-12);

    let stats = mesh.stats();
    assert_eq!(stats.edges, 18);
    assert_eq!(stats.genus, 0);
    assert!(stats.closed);
    assert!(stats.to_string().contains("Faces: 12"));
}

// ============================================================================
// Replacement
// ============================================================================

#[test]
fn replace_swaps_everything() {
    let mut mesh = shapes::cube(1.0).unwrap();
    let before = mesh.generation();
    let octahedron = shapes::octahedron(1.0).unwrap();

    mesh.replace(octahedron.vertices().to_vec(), octahedron.faces().to_vec())
        .unwrap();

    assert_ne!(mesh.generation(), before);
    assert_eq!(mesh.num_vertices(), 6);
    assert_eq!(mesh.num_faces(), 8);
    assert_eq!(mesh.topology().num_faces(), 8);
    assert_eq!(mesh.attributes().face_normal.len(), 8);
}

#[test]
fn failed_replace_leaves_mesh_untouched() {
    let mut mesh = shapes::cube(1.0).unwrap();
    let before = mesh.generation();
    let mut faces = CUBE_FACES.to_vec();
    faces[0] = [0, 4, 6];

    let err = mesh.replace(mesh.vertices().to_vec(), faces).unwrap_err();
    assert!(matches!(err, TopologyError::DuplicateDirectedEdge { .. }));
    assert_eq!(mesh.generation(), before);
    assert_eq!(mesh.faces(), &CUBE_FACES);
}

#[test]
fn set_vertices_keeps_faces() {
    let mut mesh = shapes::cube(1.0).unwrap();
    let scaled: Vec<_> = mesh.vertices().iter().map(|p| Point3::from(p.coords * 3.0)).collect();
    mesh.set_vertices(scaled).unwrap();
    assert_eq!(mesh.faces(), &CUBE_FACES);
    assert!((mesh.volume() - 27.0).abs() < 1e-9);
}

// ============================================================================
// Rejection
// ============================================================================

#[test]
fn reversed_face_is_invalid_topology() {
    let mut faces = CUBE_FACES;
    faces[5] = [2, 7, 3];
    let err = Mesh::from_arrays(&CUBE_VERTICES, &faces).unwrap_err();
    assert!(matches!(err, TopologyError::DuplicateDirectedEdge { .. }));
}

#[test]
fn non_finite_vertex_is_rejected() {
    let mut vertices = CUBE_VERTICES;
    vertices[3][1] = f64::NAN;
    let err = Mesh::from_arrays(&vertices, &CUBE_FACES).unwrap_err();
    assert_eq!(err, TopologyError::NonFiniteVertex { vertex: 3 });
}

#[test]
fn two_disjoint_tetrahedra_form_two_components() {
    let tet = [[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
    let mut faces = tet.to_vec();
    faces.extend(tet.iter().map(|f| f.map(|v| v + 4)));
    #[rustfmt::skip]
    let vertices = [
        [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0],
        [5.0, 0.0, 0.0], [6.0, 0.0, 0.0], [5.0, 1.0, 0.0], [5.0, 0.0, 1.0],
    ];
    let mesh = Mesh::from_arrays(&vertices, &faces).unwrap();
    assert_eq!(mesh.topology().components(), 2);
    assert_eq!(mesh.topology().euler_characteristic(), 4);
    assert_eq!(mesh.topology().genus(), 0);
}

#[test]
fn open_mesh_is_accepted_but_not_closed() {
    // The cube without its top two triangles.
    let faces: Vec<_> = CUBE_FACES[..10].to_vec();
    let mesh = Mesh::from_arrays(&CUBE_VERTICES, &faces).unwrap();
    assert!(!mesh.is_closed());
    assert_eq!(mesh.topology().boundaries(), 1);
    assert_eq!(mesh.topology().num_border_halfedges(), 4);
}

// ============================================================================
// Indexed access
// ============================================================================

#[test]
fn checked_lookups_return_none_past_the_end() {
    let mesh = shapes::cube(1.0).unwrap();
    let attributes = mesh.attributes();
    assert!(mesh.vertex(8).is_none());
    assert!(mesh.face(12).is_none());
    assert!(attributes.face_normal.get(12).is_none());
    assert!(attributes.face_centroid.get(12).is_none());
    assert!(attributes.halfedge_normal.get(36).is_none());
    assert_eq!(attributes.face_normal.get(11), Some(mesh.face_normal(11)));
    assert_eq!(attributes.halfedge_normal.get(35), Some(mesh.halfedge_normal(35)));
}

#[test]
#[should_panic]
fn face_normal_past_the_end_panics() {
    let mesh = shapes::cube(1.0).unwrap();
    let _ = mesh.face_normal(12);
}

#[test]
#[should_panic]
fn halfedge_origin_past_the_end_panics() {
    let mesh = shapes::cube(1.0).unwrap();
    let _ = mesh.halfedge_origin(36);
}
