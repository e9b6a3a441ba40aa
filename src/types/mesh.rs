use glam::DVec3;

use super::BoundingBox;
use crate::error::{HollowError, Result};

/// The fundamental geometry container.
///
/// Positions are kept in f64 so that transforms applied to a copy of a mesh
/// can be inverted to floating-point precision. Faces index into `vertices`
/// and follow the right-hand rule: counter-clockwise when seen from outside
/// means the face normal points outward.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    /// Vertex positions.
    pub vertices: Vec<DVec3>,
    /// Triangles as indices into `vertices`.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether the mesh contains no geometry.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Corner positions of face `i`.
    pub fn triangle(&self, i: usize) -> [DVec3; 3] {
        let [a, b, c] = self.faces[i];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Iterate over all triangles as corner positions.
    pub fn triangles(&self) -> impl Iterator<Item = [DVec3; 3]> + '_ {
        (0..self.faces.len()).map(|i| self.triangle(i))
    }

    /// Index of the first face referencing a vertex out of range, if any.
    pub fn first_invalid_face(&self) -> Option<usize> {
        let n = self.vertices.len();
        self.faces
            .iter()
            .position(|f| f.iter().any(|&i| i as usize >= n))
    }

    /// Axis-aligned bounding box of all vertices.
    ///
    /// Returns `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let first = *self.vertices.first()?;
        let (min, max) = self
            .vertices
            .iter()
            .fold((first, first), |(min, max), &v| (min.min(v), max.max(v)));
        Some(BoundingBox {
            min: min.to_array(),
            max: max.to_array(),
        })
    }

    /// Signed enclosed volume (divergence theorem).
    ///
    /// Positive for a closed mesh with outward winding, negative when the
    /// mesh is inside out. Not meaningful for open meshes.
    pub fn signed_volume(&self) -> f64 {
        self.mass_properties().0
    }

    /// Absolute enclosed volume.
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Volumetric centroid (centre of mass at uniform density).
    ///
    /// Falls back to the mean vertex position when the enclosed volume is
    /// numerically zero, which happens for open or flat input.
    pub fn centroid(&self) -> DVec3 {
        self.mass_properties().1
    }

    /// Reverse the winding of every face (`[a, b, c]` becomes `[c, b, a]`).
    pub fn flip_winding(&mut self) {
        for face in &mut self.faces {
            face.reverse();
        }
    }

    /// Scale every vertex uniformly about `center`.
    pub fn scale_about(&mut self, center: DVec3, factor: f64) {
        for v in &mut self.vertices {
            *v = (*v - center) * factor + center;
        }
    }

    /// Append `other`, offsetting its indices by the current vertex count.
    ///
    /// Vertices are never shared between the two parts. Fails without
    /// modifying `self` if `other` has a face index outside its own vertex
    /// range or the combined vertex count no longer fits a `u32` index.
    pub fn append(&mut self, other: &IndexedMesh) -> Result<()> {
        if let Some(face) = other.first_invalid_face() {
            return Err(HollowError::Geometry(format!(
                "face {face} references a vertex beyond the {} in its part",
                other.vertex_count()
            )));
        }
        let total = self.vertices.len() + other.vertices.len();
        if total > u32::MAX as usize {
            return Err(HollowError::Geometry(format!(
                "{total} vertices exceed the u32 index range"
            )));
        }

        // Both checks above keep `index + offset < total <= u32::MAX`
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|&[a, b, c]| [a + offset, b + offset, c + offset]),
        );
        Ok(())
    }

    /// Concatenate meshes into one, in order.
    pub fn concatenate(meshes: &[&IndexedMesh]) -> Result<IndexedMesh> {
        let vertex_count = meshes.iter().map(|m| m.vertex_count()).sum();
        let face_count = meshes.iter().map(|m| m.face_count()).sum();
        let mut out = IndexedMesh::with_capacity(vertex_count, face_count);
        for mesh in meshes {
            out.append(mesh)?;
        }
        Ok(out)
    }

    /// Number of faces that reference the same vertex more than once.
    pub fn degenerate_face_count(&self) -> usize {
        self.faces
            .iter()
            .filter(|&&[a, b, c]| a == b || b == c || a == c)
            .count()
    }

    /// Signed volume and centroid from one tetrahedral decomposition.
    ///
    /// Tetrahedra are formed against the bounding-box centre rather than the
    /// origin to keep precision for meshes far from the origin.
    fn mass_properties(&self) -> (f64, DVec3) {
        let Some(bounds) = self.bounds() else {
            return (0.0, DVec3::ZERO);
        };
        let reference = DVec3::from_array(bounds.center());

        let mut six_volume = 0.0;
        let mut weighted = DVec3::ZERO;
        for [a, b, c] in self.triangles() {
            let (a, b, c) = (a - reference, b - reference, c - reference);
            let det = a.dot(b.cross(c));
            six_volume += det;
            // centroid of the tetrahedron (reference, a, b, c) relative to reference
            weighted += det * (a + b + c);
        }

        let volume = six_volume / 6.0;
        let scale = bounds.diagonal().max(f64::MIN_POSITIVE);
        if volume.abs() <= 1e-12 * scale * scale * scale {
            return (volume, self.vertex_mean());
        }

        (volume, reference + weighted / (4.0 * six_volume))
    }

    fn vertex_mean(&self) -> DVec3 {
        if self.vertices.is_empty() {
            return DVec3::ZERO;
        }
        let sum: DVec3 = self.vertices.iter().copied().sum();
        sum / self.vertices.len() as f64
    }
}
