pub mod glb_writer;
pub mod obj_writer;
pub mod ply_writer;
pub mod stl_writer;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{ExportOptions, StlEncoding};
use crate::error::{HollowError, Result};
use crate::ingestion::MeshFormat;
use crate::types::IndexedMesh;

const DEFAULT_NAME: &str = "mesh";

/// Serialize `mesh` in `format` entirely in memory.
///
/// `name` labels the solid (STL) or mesh (GLB) where the format has a slot
/// for it.
pub fn encode_mesh(
    mesh: &IndexedMesh,
    format: MeshFormat,
    options: &ExportOptions,
    name: &str,
) -> Result<Vec<u8>> {
    match format {
        MeshFormat::Stl => match options.stl_encoding {
            StlEncoding::Binary => stl_writer::encode_stl_binary(mesh),
            StlEncoding::Ascii => Ok(stl_writer::encode_stl_ascii(mesh, name).into_bytes()),
        },
        MeshFormat::Obj => Ok(obj_writer::encode_obj(mesh).into_bytes()),
        MeshFormat::Ply => ply_writer::encode_ply(mesh),
        MeshFormat::Glb => glb_writer::encode_glb(mesh, name),
        MeshFormat::Gltf => Err(HollowError::Export(
            "writing .gltf with external buffers is not supported; use .glb".into(),
        )),
    }
}

/// Write `mesh` to `path`, choosing the encoding from its extension.
///
/// The file is encoded completely before anything touches the disk, then
/// written beside the destination and renamed over it. Returns the number of
/// bytes written.
pub fn export_mesh(mesh: &IndexedMesh, path: &Path, options: &ExportOptions) -> Result<usize> {
    let format = MeshFormat::from_path(path).ok_or_else(|| {
        HollowError::Export(format!("Unsupported output format: {}", path.display()))
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_NAME);
    let bytes = encode_mesh(mesh, format, options, name)?;
    debug!(format = %format, bytes = bytes.len(), "Encoded output mesh");

    let staging = staging_path(path);
    if let Err(e) = std::fs::write(&staging, &bytes) {
        let _ = std::fs::remove_file(&staging);
        return Err(HollowError::Export(format!(
            "Failed to write {}: {e}",
            staging.display()
        )));
    }
    if let Err(e) = std::fs::rename(&staging, path) {
        let _ = std::fs::remove_file(&staging);
        return Err(HollowError::Export(format!(
            "Failed to replace {}: {e}",
            path.display()
        )));
    }

    info!(
        path = %path.display(),
        format = %format,
        bytes = bytes.len(),
        "Wrote output mesh"
    );
    Ok(bytes.len())
}

/// Hidden sibling of `path` used as the write target before the rename.
fn staging_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_NAME.to_string());
    path.with_file_name(format!(".{file_name}.partial"))
}
