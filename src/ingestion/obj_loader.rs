use std::path::Path;

use glam::DVec3;
use tracing::debug;

use crate::error::{HollowError, Result};
use crate::types::IndexedMesh;

/// Load an OBJ file, merging all of its objects into one mesh.
///
/// Materials are ignored; polygons are triangulated by `tobj`.
pub fn load_obj(path: &Path) -> Result<IndexedMesh> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|e| HollowError::Load(format!("Failed to load OBJ: {e}")))?;

    debug!(model_count = models.len(), "Loaded OBJ models");

    let mut merged = IndexedMesh::default();
    for model in models {
        let name = model.name;
        let part = convert_mesh(model.mesh);
        if let Some(face) = part.first_invalid_face() {
            return Err(HollowError::Load(format!(
                "object '{name}': face {face} references a vertex beyond the {} in the object",
                part.vertex_count()
            )));
        }
        merged
            .append(&part)
            .map_err(|e| HollowError::Load(format!("Failed to merge OBJ object '{name}': {e}")))?;
    }

    Ok(merged)
}

/// Convert a `tobj::Mesh` into our `IndexedMesh`.
fn convert_mesh(mesh: tobj::Mesh) -> IndexedMesh {
    let vertices = mesh
        .positions
        .chunks_exact(3)
        .map(|p| DVec3::new(p[0] as f64, p[1] as f64, p[2] as f64))
        .collect();

    let faces = mesh
        .indices
        .chunks_exact(3)
        .map(|t| [t[0], t[1], t[2]])
        .collect();

    IndexedMesh { vertices, faces }
}
