use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use glam::DVec3;
use tracing::debug;

use crate::error::{HollowError, Result};
use crate::types::IndexedMesh;

/// Load a binary or ASCII STL file into an `IndexedMesh`.
///
/// `stl_io` merges coincident corners into shared vertices. Triangles that
/// collapse onto a repeated vertex are kept as they are.
pub fn load_stl(path: &Path) -> Result<IndexedMesh> {
    let file = File::open(path)
        .map_err(|e| HollowError::Load(format!("Failed to open STL: {e}")))?;
    let mut reader = BufReader::new(file);

    let stl = stl_io::read_stl(&mut reader)
        .map_err(|e| HollowError::Load(format!("Failed to parse STL: {e}")))?;

    debug!(
        vertex_count = stl.vertices.len(),
        triangle_count = stl.faces.len(),
        "Parsed STL"
    );

    Ok(convert_stl(stl))
}

fn convert_stl(stl: stl_io::IndexedMesh) -> IndexedMesh {
    let mut mesh = IndexedMesh::with_capacity(stl.vertices.len(), stl.faces.len());

    mesh.vertices.extend(
        stl.vertices
            .iter()
            .map(|v| DVec3::new(v.0[0] as f64, v.0[1] as f64, v.0[2] as f64)),
    );
    mesh.faces.extend(stl.faces.iter().map(|face| {
        let [a, b, c] = face.vertices;
        [a as u32, b as u32, c as u32]
    }));

    let degenerate = mesh.degenerate_face_count();
    if degenerate > 0 {
        debug!(degenerate, "STL contains triangles with repeated vertices");
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_stl(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".stl").unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn load_ascii_stl_merges_vertices() {
        let file = write_stl(
            "\
solid quad
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 1 1 0
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 1 0
      vertex 0 1 0
    endloop
  endfacet
endsolid quad
",
        );
        let mesh = load_stl(file.path()).unwrap();

        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.vertex_count(), 4);
        assert!(mesh.first_invalid_face().is_none());
    }

    #[test]
    fn degenerate_triangle_is_kept() {
        let file = write_stl(
            "\
solid sliver
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 0 0 0
      vertex 1 1 0
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 1 1 0
    endloop
  endfacet
endsolid sliver
",
        );
        let mesh = load_stl(file.path()).unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.degenerate_face_count(), 1);
        assert!(mesh.first_invalid_face().is_none());
    }

    #[test]
    fn binary_stl_keeps_every_triangle() {
        let tri = |v: [[f32; 3]; 3]| stl_io::Triangle {
            normal: stl_io::Normal::new([0.0, 0.0, 1.0]),
            vertices: v.map(stl_io::Vertex::new),
        };
        let triangles = [
            tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]),
            tri([[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [1.0, 1.0, 0.0]]),
        ];
        let mut file = NamedTempFile::with_suffix(".stl").unwrap();
        stl_io::write_stl(&mut file, triangles.iter()).unwrap();
        file.flush().unwrap();

        let mesh = load_stl(file.path()).unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.degenerate_face_count(), 1);
    }

    #[test]
    fn garbage_is_a_load_error() {
        let file = write_stl("solid nope\n  facet banana\n");
        let err = load_stl(file.path()).unwrap_err();
        assert!(matches!(err, HollowError::Load(_)));
    }
}
