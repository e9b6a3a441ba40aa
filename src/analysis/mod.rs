pub mod topology;

use serde::Serialize;
use tracing::{debug, warn};

use crate::types::{BoundingBox, IndexedMesh};

pub use topology::EdgeTopology;

/// Diagnostic metrics for a mesh. Informational only.
#[derive(Debug, Clone, Serialize)]
pub struct MeshReport {
    pub vertex_count: usize,
    pub face_count: usize,
    pub bounds: Option<BoundingBox>,
    pub dimensions: Option<[f64; 3]>,
    pub signed_volume: f64,
    pub volume: f64,
    pub boundary_edge_count: usize,
    pub non_manifold_edge_count: usize,
    pub inconsistent_edge_count: usize,
    /// Faces that reference one vertex more than once.
    pub degenerate_face_count: usize,
    pub is_watertight: bool,
    pub is_winding_consistent: bool,
}

/// Compute diagnostics for `mesh`, logging a warning for open or
/// inconsistently wound input.
pub fn analyze(mesh: &IndexedMesh) -> MeshReport {
    let topology = EdgeTopology::build(&mesh.faces);
    let bounds = mesh.bounds();
    let signed_volume = mesh.signed_volume();

    let report = MeshReport {
        vertex_count: mesh.vertex_count(),
        face_count: mesh.face_count(),
        bounds,
        dimensions: bounds.map(|b| b.dimensions()),
        signed_volume,
        volume: signed_volume.abs(),
        boundary_edge_count: topology.boundary_edge_count(),
        non_manifold_edge_count: topology.non_manifold_edge_count(),
        inconsistent_edge_count: topology.inconsistent_edge_count(),
        degenerate_face_count: mesh.degenerate_face_count(),
        is_watertight: topology.is_watertight(),
        is_winding_consistent: topology.is_winding_consistent(),
    };

    if !report.is_watertight {
        warn!(
            boundary_edges = report.boundary_edge_count,
            non_manifold_edges = report.non_manifold_edge_count,
            inconsistent_edges = report.inconsistent_edge_count,
            "Mesh is not watertight"
        );
    }
    if report.degenerate_face_count > 0 {
        warn!(
            degenerate_faces = report.degenerate_face_count,
            "Mesh has faces with repeated vertices"
        );
    }
    if signed_volume < 0.0 {
        warn!(signed_volume, "Mesh appears inside out");
    }
    debug!(
        vertices = report.vertex_count,
        faces = report.face_count,
        edges = topology.edge_count(),
        volume = report.volume,
        "Analyzed mesh"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes;
    use approx::assert_relative_eq;

    #[test]
    fn report_for_closed_cube() {
        let report = analyze(&shapes::cube(2.0));
        assert_eq!(report.vertex_count, 8);
        assert_eq!(report.face_count, 12);
        assert!(report.is_watertight);
        assert!(report.is_winding_consistent);
        assert_relative_eq!(report.volume, 8.0, epsilon = 1e-9);
        assert_eq!(report.dimensions, Some([2.0, 2.0, 2.0]));
    }

    #[test]
    fn report_for_open_mesh() {
        let mut mesh = shapes::cube(1.0);
        mesh.faces.pop();
        let report = analyze(&mesh);
        assert!(!report.is_watertight);
        assert_eq!(report.boundary_edge_count, 3);
    }

    #[test]
    fn report_counts_degenerate_faces() {
        let mut mesh = shapes::cube(1.0);
        mesh.faces.push([0, 0, 1]);
        let report = analyze(&mesh);
        assert_eq!(report.face_count, 13);
        assert_eq!(report.degenerate_face_count, 1);
        // The collapsed face uses edge 0-1 once each way
        assert!(!report.is_watertight);
        assert_eq!(report.non_manifold_edge_count, 1);
    }

    #[test]
    fn report_serializes_to_json() {
        let report = analyze(&shapes::cube(1.0));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["vertex_count"], 8);
        assert_eq!(json["is_watertight"], true);
        assert!(json["bounds"]["max"].is_array());
    }
}
