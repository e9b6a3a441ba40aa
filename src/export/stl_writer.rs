use glam::DVec3;

use crate::error::{HollowError, Result};
use crate::types::IndexedMesh;

/// Unit facet normal from the winding; zero for degenerate triangles.
fn facet_normal([a, b, c]: [DVec3; 3]) -> DVec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Serialize to binary STL.
pub fn encode_stl_binary(mesh: &IndexedMesh) -> Result<Vec<u8>> {
    let triangles: Vec<stl_io::Triangle> = mesh
        .triangles()
        .map(|tri| {
            let n = facet_normal(tri).as_vec3();
            stl_io::Triangle {
                normal: stl_io::Normal::new(n.to_array()),
                vertices: tri.map(|v| stl_io::Vertex::new(v.as_vec3().to_array())),
            }
        })
        .collect();

    let mut out = Vec::with_capacity(84 + 50 * triangles.len());
    stl_io::write_stl(&mut out, triangles.iter())
        .map_err(|e| HollowError::Export(format!("Failed to encode STL: {e}")))?;
    Ok(out)
}

/// Serialize to ASCII STL with the given solid `name`.
///
/// Coordinates are written in exponent notation at f32 precision, matching
/// what a binary STL would carry.
pub fn encode_stl_ascii(mesh: &IndexedMesh, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));
    for tri in mesh.triangles() {
        let n = facet_normal(tri).as_vec3();
        out.push_str(&format!("  facet normal {:e} {:e} {:e}\n", n.x, n.y, n.z));
        out.push_str("    outer loop\n");
        for v in tri.map(|v| v.as_vec3()) {
            out.push_str(&format!("      vertex {:e} {:e} {:e}\n", v.x, v.y, v.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    out.push_str(&format!("endsolid {name}\n"));
    out
}
