pub mod gltf_loader;
pub mod obj_loader;
pub mod ply_loader;
pub mod stl_loader;

use std::path::Path;

use tracing::{debug, info};

use crate::error::{HollowError, Result};
use crate::types::IndexedMesh;

/// Result of the ingestion stage.
#[derive(Debug)]
pub struct IngestionResult {
    pub mesh: IndexedMesh,
    pub format: MeshFormat,
}

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Stl,
    Obj,
    Ply,
    Gltf,
    Glb,
}

impl MeshFormat {
    /// Detect format from file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "stl" => Some(MeshFormat::Stl),
            "obj" => Some(MeshFormat::Obj),
            "ply" => Some(MeshFormat::Ply),
            "gltf" => Some(MeshFormat::Gltf),
            "glb" => Some(MeshFormat::Glb),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MeshFormat::Stl => "STL",
            MeshFormat::Obj => "OBJ",
            MeshFormat::Ply => "PLY",
            MeshFormat::Gltf => "glTF",
            MeshFormat::Glb => "GLB",
        }
    }
}

impl std::fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load the mesh at `path`.
///
/// Fails with [`HollowError::Load`] if the file is missing, has an unknown
/// extension, cannot be parsed, is empty, or has out-of-range face indices.
pub fn ingest(path: &Path) -> Result<IngestionResult> {
    // 1. Validate input exists
    if !path.exists() {
        return Err(HollowError::Load(format!(
            "Input file not found: {}",
            path.display()
        )));
    }

    // 2. Detect format
    let format = MeshFormat::from_path(path).ok_or_else(|| {
        HollowError::Load(format!(
            "Unsupported file format: {}",
            path.display()
        ))
    })?;
    info!(format = %format, path = %path.display(), "Detected input format");

    // 3. Dispatch to loader
    let mesh = match format {
        MeshFormat::Stl => stl_loader::load_stl(path)?,
        MeshFormat::Obj => obj_loader::load_obj(path)?,
        MeshFormat::Ply => ply_loader::load_ply(path)?,
        MeshFormat::Gltf | MeshFormat::Glb => gltf_loader::load_gltf(path)?,
    };

    // 4. Sanity checks shared by all formats
    if mesh.is_empty() {
        return Err(HollowError::Load(format!(
            "{} contains no triangles ({} vertices, {} faces)",
            path.display(),
            mesh.vertex_count(),
            mesh.face_count()
        )));
    }
    if let Some(face) = mesh.first_invalid_face() {
        return Err(HollowError::Load(format!(
            "face {face} references a vertex beyond the {} loaded",
            mesh.vertex_count()
        )));
    }

    debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Ingested mesh"
    );

    Ok(IngestionResult { mesh, format })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn format_detection() {
        let cases = [
            ("part.stl", MeshFormat::Stl),
            ("model.obj", MeshFormat::Obj),
            ("scan.ply", MeshFormat::Ply),
            ("scene.gltf", MeshFormat::Gltf),
            ("scene.glb", MeshFormat::Glb),
        ];
        for (name, expected) in cases {
            assert_eq!(MeshFormat::from_path(Path::new(name)), Some(expected));
        }
    }

    #[test]
    fn format_detection_case_insensitive() {
        assert_eq!(
            MeshFormat::from_path(Path::new("Top.STL")),
            Some(MeshFormat::Stl)
        );
        assert_eq!(
            MeshFormat::from_path(Path::new("Model.Obj")),
            Some(MeshFormat::Obj)
        );
    }

    #[test]
    fn format_detection_unsupported() {
        assert_eq!(MeshFormat::from_path(Path::new("file.fbx")), None);
        assert_eq!(MeshFormat::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn format_display() {
        assert_eq!(MeshFormat::Stl.to_string(), "STL");
        assert_eq!(MeshFormat::Gltf.to_string(), "glTF");
    }

    #[test]
    fn ingest_missing_file() {
        let err = ingest(Path::new("/nonexistent/file.stl")).unwrap_err();
        assert!(matches!(err, HollowError::Load(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn ingest_unsupported_extension() {
        let file = NamedTempFile::with_suffix(".fbx").unwrap();
        let err = ingest(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }

    #[test]
    fn ingest_rejects_out_of_range_faces() {
        let mut file = NamedTempFile::with_suffix(".ply").unwrap();
        file.write_all(
            b"ply
format ascii 1.0
element vertex 3
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
0 1 0
3 0 1 7
",
        )
        .unwrap();
        file.flush().unwrap();

        let err = ingest(file.path()).unwrap_err();
        assert!(matches!(err, HollowError::Load(_)));
        assert!(err.to_string().contains("face 0"));
    }

    #[test]
    fn ingest_rejects_vertex_only_file() {
        let mut file = NamedTempFile::with_suffix(".obj").unwrap();
        file.write_all(b"v 0 0 0\nv 1 0 0\nv 0 1 0\n").unwrap();
        file.flush().unwrap();

        let err = ingest(file.path()).unwrap_err();
        assert!(matches!(err, HollowError::Load(_)));
    }
}
