use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use glam::DVec3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};
use tracing::debug;

use crate::error::{HollowError, Result};
use crate::types::IndexedMesh;

/// Load a PLY file into an `IndexedMesh`.
pub fn load_ply(path: &Path) -> Result<IndexedMesh> {
    let file =
        File::open(path).map_err(|e| HollowError::Load(format!("Failed to open PLY: {e}")))?;
    let mut reader = BufReader::new(file);

    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(&mut reader)
        .map_err(|e| HollowError::Load(format!("Failed to parse PLY: {e}")))?;

    let vertices = ply
        .payload
        .get("vertex")
        .ok_or_else(|| HollowError::Load("PLY file missing 'vertex' element".into()))?;

    debug!(vertex_count = vertices.len(), "Parsing PLY vertices");

    let mut mesh = IndexedMesh::with_capacity(vertices.len(), 0);
    for vertex in vertices {
        mesh.vertices.push(DVec3::new(
            get_float_property(vertex, "x")?,
            get_float_property(vertex, "y")?,
            get_float_property(vertex, "z")?,
        ));
    }

    if let Some(faces) = ply.payload.get("face") {
        debug!(face_count = faces.len(), "Parsing PLY faces");
        for face in faces {
            let face_indices = get_index_list(face)?;
            // Fan-triangulate polygons with >3 vertices
            for i in 1..face_indices.len().saturating_sub(1) {
                mesh.faces
                    .push([face_indices[0], face_indices[i], face_indices[i + 1]]);
            }
        }
    }

    Ok(mesh)
}

/// Extract a numeric property as f64.
fn get_float_property(element: &DefaultElement, key: &str) -> Result<f64> {
    let prop = element
        .get(key)
        .ok_or_else(|| HollowError::Load(format!("PLY vertex missing property '{key}'")))?;

    match prop {
        Property::Float(v) => Ok(*v as f64),
        Property::Double(v) => Ok(*v),
        Property::Int(v) => Ok(*v as f64),
        Property::UInt(v) => Ok(*v as f64),
        Property::Short(v) => Ok(*v as f64),
        Property::UShort(v) => Ok(*v as f64),
        Property::Char(v) => Ok(*v as f64),
        Property::UChar(v) => Ok(*v as f64),
        _ => Err(HollowError::Load(format!(
            "PLY property '{key}' has unsupported type"
        ))),
    }
}

/// Extract the index list from a face element.
fn get_index_list(face: &DefaultElement) -> Result<Vec<u32>> {
    // Try "vertex_indices" first, then "vertex_index"
    let key = if face.contains_key("vertex_indices") {
        "vertex_indices"
    } else {
        "vertex_index"
    };

    let prop = face
        .get(key)
        .ok_or_else(|| HollowError::Load("PLY face missing vertex_indices property".into()))?;

    let negative = || HollowError::Load("PLY face has a negative vertex index".into());
    match prop {
        Property::ListInt(v) => v
            .iter()
            .map(|&i| u32::try_from(i).map_err(|_| negative()))
            .collect(),
        Property::ListShort(v) => v
            .iter()
            .map(|&i| u32::try_from(i).map_err(|_| negative()))
            .collect(),
        Property::ListUInt(v) => Ok(v.clone()),
        Property::ListUChar(v) => Ok(v.iter().map(|&i| i as u32).collect()),
        Property::ListUShort(v) => Ok(v.iter().map(|&i| i as u32).collect()),
        _ => Err(HollowError::Load(
            "PLY face vertex_indices has unsupported type".into(),
        )),
    }
}
