//! Triangle tessellation of atom spheres and bond cylinders.
//!
//! Hosts that can only consume raw geometry use these meshes instead of native
//! primitives. Spheres are UV spheres with shared pole vertices; cylinders are
//! open tubes without end caps, since both ends are hidden inside atom spheres.

use super::config::MeshResolution;
use super::primitives::{CylinderDescriptor, SphereDescriptor};
use nalgebra::{Isometry3, Point3, Vector3};
use std::f64::consts::{PI, TAU};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<Point3<f64>>,
    pub normals: Vec<Vector3<f64>>,
    /// Counter-clockwise when seen from outside.
    pub triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn transformed(mut self, transform: &Isometry3<f64>) -> Self {
        for p in &mut self.positions {
            *p = transform * *p;
        }
        for n in &mut self.normals {
            *n = transform.rotation * *n;
        }
        self
    }

    fn push_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) -> u32 {
        self.positions.push(position);
        self.normals.push(normal);
        (self.positions.len() - 1) as u32
    }
}

/// A UV sphere centered at the origin with its poles on the Z axis.
///
/// Produces `2 + (rings - 1) * segments` vertices and `2 * segments * (rings - 1)` triangles.
pub fn uv_sphere(diameter: f64, segments: u32, rings: u32) -> TriangleMesh {
    let radius = diameter / 2.0;
    let mut mesh = TriangleMesh::default();

    let top = mesh.push_vertex(Point3::new(0.0, 0.0, radius), Vector3::z());
    for ring in 1..rings {
        let theta = PI * ring as f64 / rings as f64;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for seg in 0..segments {
            let phi = TAU * seg as f64 / segments as f64;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let normal = Vector3::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta);
            mesh.push_vertex(Point3::from(normal * radius), normal);
        }
    }
    let bottom = mesh.push_vertex(Point3::new(0.0, 0.0, -radius), -Vector3::z());

    let ring_start = |ring: u32| 1 + (ring - 1) * segments;
    for seg in 0..segments {
        let next = (seg + 1) % segments;
        mesh.triangles
            .push([top, ring_start(1) + seg, ring_start(1) + next]);
    }
    for ring in 1..rings.saturating_sub(1) {
        let upper = ring_start(ring);
        let lower = ring_start(ring + 1);
        for seg in 0..segments {
            let next = (seg + 1) % segments;
            mesh.triangles
                .push([upper + seg, lower + seg, lower + next]);
            mesh.triangles
                .push([upper + seg, lower + next, upper + next]);
        }
    }
    let last = ring_start(rings - 1);
    for seg in 0..segments {
        let next = (seg + 1) % segments;
        mesh.triangles.push([last + seg, bottom, last + next]);
    }
    mesh
}

/// An uncapped tube along Z, centered at the origin.
///
/// Produces `2 * segments` vertices and `2 * segments` triangles.
pub fn open_cylinder(diameter: f64, length: f64, segments: u32) -> TriangleMesh {
    let radius = diameter / 2.0;
    let half = length / 2.0;
    let mut mesh = TriangleMesh::default();

    for z in [-half, half] {
        for seg in 0..segments {
            let phi = TAU * seg as f64 / segments as f64;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let normal = Vector3::new(cos_phi, sin_phi, 0.0);
            mesh.push_vertex(Point3::new(radius * cos_phi, radius * sin_phi, z), normal);
        }
    }

    for seg in 0..segments {
        let next = (seg + 1) % segments;
        let (b0, b1) = (seg, next);
        let (t0, t1) = (segments + seg, segments + next);
        mesh.triangles.push([b0, b1, t1]);
        mesh.triangles.push([b0, t1, t0]);
    }
    mesh
}

impl SphereDescriptor {
    /// World-space mesh of this sphere.
    pub fn mesh(&self, resolution: &MeshResolution) -> TriangleMesh {
        uv_sphere(
            self.diameter,
            resolution.sphere_segments,
            resolution.sphere_rings,
        )
        .transformed(&self.transform())
    }
}

impl CylinderDescriptor {
    /// World-space mesh of this cylinder, spanning the two atom centers.
    pub fn mesh(&self, resolution: &MeshResolution) -> TriangleMesh {
        open_cylinder(self.diameter, self.length, resolution.cylinder_segments)
            .transformed(&self.transform())
    }
}
