use std::fmt::Write;

use crate::types::IndexedMesh;

/// Serialize to Wavefront OBJ (positions and triangles only).
///
/// Unlike STL, OBJ keeps the indexed structure, so the outer and inner
/// shells stay separate vertex ranges on reload. Coordinates use the
/// shortest representation that round-trips through f64.
pub fn encode_obj(mesh: &IndexedMesh) -> String {
    let mut out = String::with_capacity(32 * (mesh.vertex_count() + mesh.face_count()));

    out.push_str("# OBJ file exported by mesh-hollow\n");
    let _ = writeln!(out, "# Vertices: {}", mesh.vertex_count());
    let _ = writeln!(out, "# Faces: {}", mesh.face_count());
    out.push('\n');

    for v in &mesh.vertices {
        let _ = writeln!(out, "v {} {} {}", v.x, v.y, v.z);
    }
    out.push('\n');

    // OBJ uses 1-based indexing
    for [a, b, c] in &mesh.faces {
        let _ = writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1);
    }

    out
}
