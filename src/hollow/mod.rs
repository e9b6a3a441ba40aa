//! Shell a solid mesh by adding a scaled, inward-facing copy of itself.
//!
//! The inner surface is the original mesh scaled uniformly about its
//! centroid, not a true offset along surface normals, so the resulting wall
//! thickness is only approximately the requested one and varies with the
//! local shape.

pub mod scale;

use glam::DVec3;
use tracing::{debug, info};

use crate::config::ScaleLimits;
use crate::error::{HollowError, Result};
use crate::types::{BoundingBox, IndexedMesh};

pub use scale::{ScaleFactor, scale_factor};

/// Parameters for the hollowing transform.
#[derive(Debug, Clone, Copy)]
pub struct HollowParams {
    /// Target wall thickness in mesh units.
    pub wall_thickness: f64,
    pub limits: ScaleLimits,
}

impl Default for HollowParams {
    fn default() -> Self {
        Self {
            wall_thickness: 2.0,
            limits: ScaleLimits::default(),
        }
    }
}

impl HollowParams {
    /// Require a finite, positive wall thickness and valid limits.
    pub fn validate(&self) -> Result<()> {
        if !self.wall_thickness.is_finite() || self.wall_thickness <= 0.0 {
            return Err(HollowError::Config(format!(
                "wall thickness must be a positive number (got {})",
                self.wall_thickness
            )));
        }
        self.limits.validate()
    }
}

/// Output of [`hollow_mesh`].
#[derive(Debug, Clone)]
pub struct HollowResult {
    /// Outer shell followed by the inner shell.
    pub mesh: IndexedMesh,
    pub scale: ScaleFactor,
    /// Fixed point of the inner-shell scaling.
    pub centroid: DVec3,
    /// Bounds of the original mesh.
    pub bounds: BoundingBox,
    pub outer_vertex_count: usize,
    pub outer_face_count: usize,
}

impl HollowResult {
    /// Estimated material saved, in percent: `(1 - scale^3) * 100`.
    pub fn material_savings_percent(&self) -> f64 {
        material_savings_percent(self.scale.clamped)
    }

    /// Copy of the inner shell with its indices rebased to zero.
    pub fn inner_shell(&self) -> IndexedMesh {
        let offset = self.outer_vertex_count as u32;
        IndexedMesh {
            vertices: self.mesh.vertices[self.outer_vertex_count..].to_vec(),
            faces: self.mesh.faces[self.outer_face_count..]
                .iter()
                .map(|&[a, b, c]| [a - offset, b - offset, c - offset])
                .collect(),
        }
    }
}

/// Volume removed by a uniform scale, in percent of the original.
pub fn material_savings_percent(scale: f64) -> f64 {
    (1.0 - scale.powi(3)) * 100.0
}

/// Build the hollow version of `mesh`.
///
/// The input is never modified. The result holds `mesh` unchanged followed
/// by an inner copy scaled about the centroid with every face reversed, so
/// vertex and face counts are exactly doubled.
pub fn hollow_mesh(mesh: &IndexedMesh, params: &HollowParams) -> Result<HollowResult> {
    params.validate()?;
    if mesh.is_empty() {
        return Err(HollowError::Geometry(format!(
            "mesh is empty ({} vertices, {} faces)",
            mesh.vertex_count(),
            mesh.face_count()
        )));
    }
    if let Some(i) = mesh.vertices.iter().position(|v| !v.is_finite()) {
        return Err(HollowError::Geometry(format!(
            "vertex {i} has a non-finite coordinate"
        )));
    }
    if let Some(face) = mesh.first_invalid_face() {
        return Err(HollowError::Geometry(format!(
            "face {face} references a vertex out of range"
        )));
    }

    let bounds = mesh
        .bounds()
        .ok_or_else(|| HollowError::Geometry("mesh has no vertices".into()))?;
    let scale = scale_factor(&bounds, params.wall_thickness, &params.limits)?;
    if scale.was_clamped() {
        debug!(raw = scale.raw, clamped = scale.clamped, "Clamped scale factor");
    }

    let centroid = mesh.centroid();
    info!(
        scale = scale.clamped,
        cx = centroid.x,
        cy = centroid.y,
        cz = centroid.z,
        "Scaling inner shell about centroid"
    );

    let mut inner = mesh.clone();
    inner.scale_about(centroid, scale.clamped);
    inner.flip_winding();

    let hollow = IndexedMesh::concatenate(&[mesh, &inner])?;
    debug!(
        vertices = hollow.vertex_count(),
        faces = hollow.face_count(),
        "Combined outer and inner shells"
    );

    Ok(HollowResult {
        mesh: hollow,
        scale,
        centroid,
        bounds,
        outer_vertex_count: mesh.vertex_count(),
        outer_face_count: mesh.face_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::EdgeTopology;
    use crate::shapes;
    use approx::assert_relative_eq;

    fn params(wall_thickness: f64) -> HollowParams {
        HollowParams {
            wall_thickness,
            ..Default::default()
        }
    }

    #[test]
    fn unit_cube_scale() {
        let result = hollow_mesh(&shapes::cube(1.0), &params(0.1)).unwrap();
        assert_relative_eq!(result.scale.clamped, 0.8, epsilon = 1e-12);

        let result = hollow_mesh(&shapes::cube(1.0), &params(0.3)).unwrap();
        assert_eq!(result.scale.clamped, 0.7);

        let result = hollow_mesh(&shapes::cube(1.0), &params(0.001)).unwrap();
        assert_eq!(result.scale.clamped, 0.95);
    }

    #[test]
    fn counts_are_doubled() {
        for mesh in [
            shapes::cube(10.0),
            shapes::tetrahedron(),
            shapes::uv_sphere(DVec3::ZERO, 5.0, 12, 6),
        ] {
            let result = hollow_mesh(&mesh, &params(0.5)).unwrap();
            assert_eq!(result.mesh.vertex_count(), 2 * mesh.vertex_count());
            assert_eq!(result.mesh.face_count(), 2 * mesh.face_count());
        }
    }

    #[test]
    fn outer_shell_is_untouched() {
        let mesh = shapes::cuboid([4.0, 6.0, 8.0], [-1.0, 2.0, 3.0]);
        let result = hollow_mesh(&mesh, &params(1.0)).unwrap();
        assert_eq!(result.mesh.vertices[..8], mesh.vertices[..]);
        assert_eq!(result.mesh.faces[..12], mesh.faces[..]);
    }

    #[test]
    fn inner_vertices_invert_to_original() {
        let mesh = shapes::uv_sphere(DVec3::new(10.0, 20.0, -5.0), 7.5, 16, 8);
        let result = hollow_mesh(&mesh, &params(1.0)).unwrap();
        let c = result.centroid;
        let s = result.scale.clamped;

        for (orig, inner) in mesh.vertices.iter().zip(&result.inner_shell().vertices) {
            let back = (*inner - c) / s + c;
            assert_relative_eq!(back.x, orig.x, epsilon = 1e-9);
            assert_relative_eq!(back.y, orig.y, epsilon = 1e-9);
            assert_relative_eq!(back.z, orig.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn inner_faces_are_reversed_and_offset() {
        let mesh = shapes::cube(3.0);
        let result = hollow_mesh(&mesh, &params(0.2)).unwrap();
        let offset = mesh.vertex_count() as u32;

        for (outer, inner) in mesh.faces.iter().zip(&result.mesh.faces[mesh.face_count()..]) {
            assert_eq!(
                *inner,
                [outer[2] + offset, outer[1] + offset, outer[0] + offset]
            );
        }
    }

    #[test]
    fn savings_match_volume_ratio() {
        let mesh = shapes::uv_sphere(DVec3::new(1.0, 2.0, 3.0), 10.0, 24, 12);
        let result = hollow_mesh(&mesh, &params(1.0)).unwrap();

        let outer = mesh.signed_volume();
        let inner = result.inner_shell().volume();
        let ratio_savings = (1.0 - inner / outer) * 100.0;
        assert_relative_eq!(
            result.material_savings_percent(),
            ratio_savings,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            result.material_savings_percent(),
            (1.0 - result.scale.clamped.powi(3)) * 100.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn hollow_cube_is_watertight_with_shell_volume() {
        let mesh = shapes::cube(10.0);
        let result = hollow_mesh(&mesh, &params(1.0)).unwrap();
        let s = result.scale.clamped;
        assert_relative_eq!(s, 0.8, epsilon = 1e-12);

        assert!(EdgeTopology::build(&result.mesh.faces).is_watertight());
        // Inner shell faces inward, so it subtracts from the enclosed volume
        assert_relative_eq!(
            result.mesh.signed_volume(),
            1000.0 * (1.0 - s * s * s),
            epsilon = 1e-6
        );
    }

    #[test]
    fn inner_shell_stays_inside_outer_bounds() {
        let mesh = shapes::cuboid([20.0, 5.0, 12.0], [0.0, 0.0, 0.0]);
        let result = hollow_mesh(&mesh, &params(0.5)).unwrap();
        for v in &result.inner_shell().vertices {
            assert!(result.bounds.contains_point(v.to_array()));
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let mesh = shapes::tetrahedron();
        let copy = mesh.clone();
        let _ = hollow_mesh(&mesh, &params(0.05)).unwrap();
        assert_eq!(mesh, copy);
    }

    #[test]
    fn flat_mesh_is_rejected() {
        let flat = IndexedMesh {
            vertices: vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::new(1.0, 1.0, 0.0)],
            faces: vec![[0, 1, 3], [0, 3, 2]],
        };
        let err = hollow_mesh(&flat, &params(0.1)).unwrap_err();
        assert!(matches!(err, HollowError::Geometry(_)));
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let err = hollow_mesh(&IndexedMesh::default(), &params(0.1)).unwrap_err();
        assert!(matches!(err, HollowError::Geometry(_)));
    }

    #[test]
    fn non_finite_vertex_is_rejected() {
        let mut mesh = shapes::cube(1.0);
        mesh.vertices[3].y = f64::NAN;
        let err = hollow_mesh(&mesh, &params(0.1)).unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn invalid_params_are_config_errors() {
        let mesh = shapes::cube(1.0);
        for thickness in [0.0, -1.0, f64::INFINITY] {
            let err = hollow_mesh(&mesh, &params(thickness)).unwrap_err();
            assert!(matches!(err, HollowError::Config(_)), "thickness {thickness}");
        }

        let inverted = HollowParams {
            wall_thickness: 0.1,
            limits: ScaleLimits { min: 0.9, max: 0.8 },
        };
        assert!(matches!(
            hollow_mesh(&mesh, &inverted),
            Err(HollowError::Config(_))
        ));
    }

    #[test]
    fn open_mesh_is_still_hollowed() {
        let mut mesh = shapes::cube(1.0);
        mesh.faces.truncate(10);
        let result = hollow_mesh(&mesh, &params(0.1)).unwrap();
        assert_eq!(result.mesh.face_count(), 20);
    }

    #[test]
    fn savings_formula() {
        assert_relative_eq!(material_savings_percent(0.8), 48.8, epsilon = 1e-9);
        assert_relative_eq!(material_savings_percent(0.7), 65.7, epsilon = 1e-9);
        assert_relative_eq!(material_savings_percent(0.95), 14.2625, epsilon = 1e-9);
    }
}
