// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Closed, outward-wound reference shapes.

use crate::errors::TopologyError;
use crate::mesh::Mesh;
use nalgebra::Point3;
use rustc_hash::FxHashMap;

/// Axis-aligned cube centered on the origin with edge length `size`, split into 12 triangles by
/// fanning each square face from one corner.
pub fn cube(size: f64) -> Result<Mesh, TopologyError> {
    let h = 0.5 * size;
    #[rustfmt::skip]
    let vertices = vec![
        Point3::new(-h, -h, -h),
        Point3::new(-h, -h,  h),
        Point3::new(-h,  h, -h),
        Point3::new(-h,  h,  h),
        Point3::new( h, -h, -h),
        Point3::new( h, -h,  h),
        Point3::new( h,  h, -h),
        Point3::new( h,  h,  h),
    ];
    let faces = vec![
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
    Mesh::new(vertices, faces)
}

/// Regular octahedron with its vertices on the axes at distance `radius`.
pub fn octahedron(radius: f64) -> Result<Mesh, TopologyError> {
    let r = radius;
    let vertices = vec![
        Point3::new(r, 0.0, 0.0),
        Point3::new(-r, 0.0, 0.0),
        Point3::new(0.0, r, 0.0),
        Point3::new(0.0, -r, 0.0),
        Point3::new(0.0, 0.0, r),
        Point3::new(0.0, 0.0, -r),
    ];
    let faces = vec![
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];
    Mesh::new(vertices, faces)
}

fn unit_icosahedron() -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
    let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let vertices = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
    .iter()
    .map(|&[x, y, z]| Point3::from(Point3::new(x, y, z).coords.normalize()))
    .collect();

    let faces = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    (vertices, faces)
}

/// Regular icosahedron inscribed in a sphere of `radius`.
pub fn icosahedron(radius: f64) -> Result<Mesh, TopologyError> {
    let (vertices, faces) = unit_icosahedron();
    Mesh::new(vertices.into_iter().map(|p| p * radius).collect(), faces)
}

fn unit_icosphere(subdivisions: u32) -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
    let (mut vertices, mut faces) = unit_icosahedron();

    for _ in 0..subdivisions {
        let mut midpoints: FxHashMap<(usize, usize), usize> = FxHashMap::default();
        let mut midpoint = |a: usize, b: usize, vertices: &mut Vec<Point3<f64>>| -> usize {
            let key = (a.min(b), a.max(b));
            *midpoints.entry(key).or_insert_with(|| {
                let mid = (vertices[a].coords + vertices[b].coords).normalize();
                vertices.push(Point3::from(mid));
                vertices.len() - 1
            })
        };

        let mut refined = Vec::with_capacity(faces.len() * 4);
        for &[a, b, c] in &faces {
            let ab = midpoint(a, b, &mut vertices);
            let bc = midpoint(b, c, &mut vertices);
            let ca = midpoint(c, a, &mut vertices);
            refined.push([a, ab, ca]);
            refined.push([b, bc, ab]);
            refined.push([c, ca, bc]);
            refined.push([ab, bc, ca]);
        }
        faces = refined;
    }

    (vertices, faces)
}

/// Sphere of `radius` approximated by an icosahedron subdivided `subdivisions` times.
///
/// Has `20 * 4^n` faces and `10 * 4^n + 2` vertices.
pub fn icosphere(radius: f64, subdivisions: u32) -> Result<Mesh, TopologyError> {
    let (vertices, faces) = unit_icosphere(subdivisions);
    Mesh::new(vertices.into_iter().map(|p| p * radius).collect(), faces)
}

/// Triaxial ellipsoid with the given semi-axes, built by scaling an icosphere.
pub fn ellipsoid(semi_axes: [f64; 3], subdivisions: u32) -> Result<Mesh, TopologyError> {
    let (vertices, faces) = unit_icosphere(subdivisions);
    let [a, b, c] = semi_axes;
    Mesh::new(
        vertices
            .into_iter()
            .map(|p| Point3::new(a * p.x, b * p.y, c * p.z))
            .collect(),
        faces,
    )
}


// End of File
