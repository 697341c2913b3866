// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Constant-density polyhedron gravity (Werner & Scheeres, 1997).
//!
//! With `r` the vector from the field point to any point of a face or edge:
//!
//! ```text
//! U    =  Gσ/2 (Σ_e rᵀ E_e r L_e - Σ_f rᵀ F_f r ω_f)
//! ∇U   =  Gσ   (-Σ_e E_e r L_e  + Σ_f F_f r ω_f)
//! ∇∇U  =  Gσ   ( Σ_e E_e L_e    - Σ_f F_f ω_f)
//! ∇²U  = -Gσ    Σ_f ω_f
//! ```
//!
//! `ω_f` is the signed solid angle a face subtends and `L_e` the edge potential factor.  The solid
//! angles sum to 0 outside the body and 4π inside.

use crate::config::GravityConfig;
use crate::params::MeshParameters;
use mesh::Mesh;
use nalgebra::{Matrix3, Point3, Vector3};
use rayon::prelude::*;
use std::ops::Add;

/// Potential, acceleration, gradient tensor and Laplacian at one point of the body-fixed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialEvaluation {
    /// km²/s²
    pub potential: f64,
    /// Acceleration in km/s².
    pub gradient: Vector3<f64>,
    pub hessian: Matrix3<f64>,
    pub laplacian: f64,
}

impl PotentialEvaluation {
    pub fn zero() -> Self {
        Self {
            potential: 0.0,
            gradient: Vector3::zeros(),
            hessian: Matrix3::zeros(),
            laplacian: 0.0,
        }
    }
}

/// Signed solid angle subtended by the triangle `(r1, r2, r3)` seen from the origin.
pub fn face_solid_angle(r1: &Vector3<f64>, r2: &Vector3<f64>, r3: &Vector3<f64>) -> f64 {
    let (n1, n2, n3) = (r1.norm(), r2.norm(), r3.norm());
    let numerator = r1.dot(&r2.cross(r3));
    let denominator = n1 * n2 * n3 + n1 * r2.dot(r3) + n2 * r3.dot(r1) + n3 * r1.dot(r2);
    2.0 * numerator.atan2(denominator)
}

/// `ln((|r1| + |r2| + e) / (|r1| + |r2| - e))` for the segment from `r1` to `r2` of length `e`.
///
/// Zero when the origin lies on the segment, where the logarithm diverges.
pub fn edge_factor(r1: &Vector3<f64>, r2: &Vector3<f64>) -> f64 {
    let e = (r2 - r1).norm();
    let sum = r1.norm() + r2.norm();
    let denominator = sum - e;
    if denominator <= 0.0 {
        return 0.0;
    }
    let factor = ((sum + e) / denominator).ln();
    if factor.is_finite() {
        factor
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Sums {
    solid_angle: f64,
    potential: f64,
    gradient: Vector3<f64>,
    hessian: Matrix3<f64>,
}

impl Sums {
    fn zero() -> Self {
        Self {
            solid_angle: 0.0,
            potential: 0.0,
            gradient: Vector3::zeros(),
            hessian: Matrix3::zeros(),
        }
    }

    fn term(dyad: &Matrix3<f64>, r: &Vector3<f64>, factor: f64) -> Self {
        let dr = dyad * r;
        Self {
            solid_angle: 0.0,
            potential: r.dot(&dr) * factor,
            gradient: dr * factor,
            hessian: dyad * factor,
        }
    }
}

impl Add for Sums {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            solid_angle: self.solid_angle + rhs.solid_angle,
            potential: self.potential + rhs.potential,
            gradient: self.gradient + rhs.gradient,
            hessian: self.hessian + rhs.hessian,
        }
    }
}

fn sum_terms<F>(count: usize, parallel: bool, term: F) -> Sums
where
    F: Fn(usize) -> Sums + Sync + Send,
{
    if parallel {
        (0..count).into_par_iter().map(term).reduce(Sums::zero, Sums::add)
    } else {
        (0..count).map(term).fold(Sums::zero(), Sums::add)
    }
}

/// Evaluates the field of `mesh` with uniform `density` at `point`.
///
/// Points whose solid-angle sum reaches `config.surface_tolerance` (inside the body or on its
/// surface) return [`PotentialEvaluation::zero`].  This is an approximation, not a physical
/// answer.
pub(crate) fn evaluate(
    mesh: &Mesh,
    params: &MeshParameters,
    density: f64,
    config: &GravityConfig,
    point: &Point3<f64>,
) -> PotentialEvaluation {
    debug_assert!(params.is_current(mesh), "stale mesh parameters");

    let vertices = mesh.vertices();
    let faces = sum_terms(mesh.num_faces(), config.parallel, |f| {
        let [a, b, c] = mesh.faces()[f];
        let (r1, r2, r3) = (vertices[a] - point, vertices[b] - point, vertices[c] - point);
        let omega = face_solid_angle(&r1, &r2, &r3);
        Sums {
            solid_angle: omega,
            ..Sums::term(params.face_dyad(f), &r1, omega)
        }
    });

    if faces.solid_angle >= config.surface_tolerance {
        log::warn!(
            "point {:?} is inside or on the surface (solid angle {:.3e}), returning zero potential",
            point.coords.as_slice(),
            faces.solid_angle
        );
        return PotentialEvaluation::zero();
    }

    let unique_edges = params.unique_edges();
    let edges = sum_terms(unique_edges.len(), config.parallel, |e| {
        let edge = &unique_edges[e];
        let [head, tail] = edge.vertices;
        let (r1, r2) = (vertices[head] - point, vertices[tail] - point);
        Sums::term(
            params.edge_dyad(edge.face, edge.slot),
            &r1,
            edge_factor(&r1, &r2),
        )
    });

    let g_sigma = config.gravitational_constant * density;
    PotentialEvaluation {
        potential: 0.5 * g_sigma * (edges.potential - faces.potential),
        gradient: g_sigma * (faces.gradient - edges.gradient),
        hessian: g_sigma * (edges.hessian - faces.hessian),
        laplacian: -g_sigma * faces.solid_angle,
    }
}


// End of File
