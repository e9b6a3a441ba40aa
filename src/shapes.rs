//! Closed primitive meshes.
//!
//! All shapes are watertight with outward (counter-clockwise) winding. They
//! back the tests and benchmarks and are handy for trying the transform
//! without an input file.

use std::f64::consts::PI;

use glam::DVec3;

use crate::types::IndexedMesh;

/// Axis-aligned cube with one corner at the origin.
pub fn cube(side: f64) -> IndexedMesh {
    cuboid([side; 3], [0.0; 3])
}

/// Axis-aligned box of the given `size` whose minimum corner is `min`.
pub fn cuboid(size: [f64; 3], min: [f64; 3]) -> IndexedMesh {
    let min = DVec3::from_array(min);
    let size = DVec3::from_array(size);

    // Corner i has x = bit 0, y = bit 1, z = bit 2
    let vertices = (0..8)
        .map(|i| {
            let unit = DVec3::new(
                (i & 1) as f64,
                ((i >> 1) & 1) as f64,
                ((i >> 2) & 1) as f64,
            );
            min + unit * size
        })
        .collect();

    let faces = vec![
        [0, 2, 3],
        [0, 3, 1], // -z
        [4, 5, 7],
        [4, 7, 6], // +z
        [0, 1, 5],
        [0, 5, 4], // -y
        [2, 6, 7],
        [2, 7, 3], // +y
        [0, 4, 6],
        [0, 6, 2], // -x
        [1, 3, 7],
        [1, 7, 5], // +x
    ];

    IndexedMesh { vertices, faces }
}

/// Right-corner tetrahedron spanning the unit axes.
pub fn tetrahedron() -> IndexedMesh {
    IndexedMesh {
        vertices: vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z],
        faces: vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
    }
}

/// Latitude/longitude sphere.
///
/// `segments` is the number of longitude divisions (>= 3), `rings` the
/// number of latitude bands (>= 2).
pub fn uv_sphere(center: DVec3, radius: f64, segments: u32, rings: u32) -> IndexedMesh {
    let segments = segments.max(3);
    let rings = rings.max(2);

    let ring_vertices = (rings - 1) * segments;
    let mut mesh = IndexedMesh::with_capacity(
        ring_vertices as usize + 2,
        (2 * segments * (rings - 1)) as usize,
    );

    mesh.vertices.push(center + DVec3::Z * radius);
    for ring in 1..rings {
        let phi = PI * ring as f64 / rings as f64;
        for seg in 0..segments {
            let theta = 2.0 * PI * seg as f64 / segments as f64;
            let dir = DVec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos());
            mesh.vertices.push(center + dir * radius);
        }
    }
    mesh.vertices.push(center - DVec3::Z * radius);

    let north = 0;
    let south = ring_vertices + 1;
    let at = |ring: u32, seg: u32| 1 + ring * segments + seg % segments;

    for seg in 0..segments {
        mesh.faces.push([north, at(0, seg), at(0, seg + 1)]);
    }
    for ring in 0..rings - 2 {
        for seg in 0..segments {
            let (u0, u1) = (at(ring, seg), at(ring, seg + 1));
            let (l0, l1) = (at(ring + 1, seg), at(ring + 1, seg + 1));
            mesh.faces.push([u0, l0, l1]);
            mesh.faces.push([u0, l1, u1]);
        }
    }
    let last = rings - 2;
    for seg in 0..segments {
        mesh.faces.push([south, at(last, seg + 1), at(last, seg)]);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::EdgeTopology;
    use approx::assert_relative_eq;

    #[test]
    fn cube_is_closed_and_outward() {
        let mesh = cube(2.0);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 12);
        assert!(EdgeTopology::build(&mesh.faces).is_watertight());
        assert_relative_eq!(mesh.signed_volume(), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn tetrahedron_is_closed_and_outward() {
        let mesh = tetrahedron();
        assert!(EdgeTopology::build(&mesh.faces).is_watertight());
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn sphere_counts_and_volume() {
        let mesh = uv_sphere(DVec3::new(5.0, -2.0, 1.0), 3.0, 32, 16);
        assert_eq!(mesh.vertex_count(), 15 * 32 + 2);
        assert_eq!(mesh.face_count(), 2 * 32 * 15);
        assert!(EdgeTopology::build(&mesh.faces).is_watertight());

        // Inscribed polyhedron: slightly under the analytic volume
        let analytic = 4.0 / 3.0 * PI * 27.0;
        let v = mesh.signed_volume();
        assert!(v > 0.0 && v < analytic);
        assert!(v > 0.95 * analytic);

        let c = mesh.centroid();
        assert_relative_eq!(c.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(c.y, -2.0, epsilon = 1e-9);
        assert_relative_eq!(c.z, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn sphere_minimum_resolution_is_closed() {
        let mesh = uv_sphere(DVec3::ZERO, 1.0, 1, 1);
        assert_eq!(mesh.vertex_count(), 3 + 2);
        assert!(EdgeTopology::build(&mesh.faces).is_watertight());
    }
}
