use std::path::Path;

use glam::DVec3;
use gltf::mesh::Mode;
use tracing::{debug, warn};

use crate::error::{HollowError, Result};
use crate::types::IndexedMesh;

/// Load a glTF or GLB file, merging every triangle primitive into one mesh.
///
/// Node transforms are not applied; primitives are taken in mesh space.
pub fn load_gltf(path: &Path) -> Result<IndexedMesh> {
    let (document, buffers, _images) = gltf::import(path)
        .map_err(|e| HollowError::Load(format!("Failed to load glTF: {e}")))?;

    debug!(meshes = document.meshes().len(), "Loaded glTF document");

    let mut merged = IndexedMesh::default();

    for mesh in document.meshes() {
        for primitive in mesh.primitives() {
            if primitive.mode() != Mode::Triangles {
                warn!(mesh = ?mesh.name(), mode = ?primitive.mode(), "Skipping non-triangle primitive");
                continue;
            }
            let part = extract_primitive(&primitive, &buffers)?;
            if let Some(face) = part.first_invalid_face() {
                return Err(HollowError::Load(format!(
                    "mesh {} primitive {}: face {face} references a vertex beyond the {} in the primitive",
                    mesh.index(),
                    primitive.index(),
                    part.vertex_count()
                )));
            }
            merged
                .append(&part)
                .map_err(|e| HollowError::Load(format!("Failed to merge glTF primitive: {e}")))?;
        }
    }

    Ok(merged)
}

/// Extract positions and triangles from a single glTF primitive.
fn extract_primitive(
    primitive: &gltf::Primitive<'_>,
    buffers: &[gltf::buffer::Data],
) -> Result<IndexedMesh> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let vertices: Vec<DVec3> = reader
        .read_positions()
        .ok_or_else(|| HollowError::Load("Primitive missing positions".into()))?
        .map(|p| DVec3::new(p[0] as f64, p[1] as f64, p[2] as f64))
        .collect();

    // Non-indexed primitives list their corners in order
    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..vertices.len() as u32).collect(),
    };

    Ok(IndexedMesh {
        vertices,
        faces: triangles_from_indices(&indices),
    })
}

fn triangles_from_indices(indices: &[u32]) -> Vec<[u32; 3]> {
    indices
        .chunks_exact(3)
        .map(|t| [t[0], t[1], t[2]])
        .collect()
}
