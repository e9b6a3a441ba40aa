use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::{self, MeshReport};
use crate::config::{HollowConfig, Units};
use crate::error::{HollowError, Result};
use crate::export;
use crate::hollow::{self, HollowResult};
use crate::ingestion;

/// Summary of a completed run. Serialized as the `--report` JSON.
#[derive(Debug, Clone, Serialize)]
pub struct HollowSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub input_format: String,
    pub wall_thickness: f64,
    pub raw_scale: f64,
    pub scale: f64,
    pub centroid: [f64; 3],
    pub material_savings_percent: f64,
    pub original: MeshReport,
    pub hollow: MeshReport,
    /// Whether the output mesh was written (false for dry runs).
    pub written: bool,
    pub bytes_written: usize,
    pub elapsed_ms: u64,
}

/// Pipeline orchestrator: load, analyze, hollow, export.
pub struct Pipeline;

impl Pipeline {
    /// Run the full hollowing pipeline.
    pub fn run(config: &HollowConfig) -> Result<HollowSummary> {
        let start = Instant::now();
        config.validate()?;

        info!(input = %config.input.display(), "Starting pipeline");

        info!("Stage 1/4: Ingestion");
        let ingestion_result = ingestion::ingest(&config.input)?;
        let original = analysis::analyze(&ingestion_result.mesh);
        print_mesh_report("Original mesh", &original, config.units);

        info!("Stage 2/4: Hollowing");
        let result = hollow::hollow_mesh(&ingestion_result.mesh, &config.hollow_params())?;
        print_hollow_summary(&result, config);

        info!("Stage 3/4: Analysis");
        let hollow_report = analysis::analyze(&result.mesh);
        print_mesh_report("Hollow mesh", &hollow_report, config.units);

        // Report path must be writable before the output is replaced
        let report_file = config.report.as_deref().map(create_report).transpose()?;

        let bytes_written = if config.dry_run {
            info!("--dry-run: skipping export");
            0
        } else {
            info!("Stage 4/4: Export");
            if config.overwrites_input() {
                warn!(path = %config.output.display(), "Overwriting input file");
            }
            export::export_mesh(&result.mesh, &config.output, &config.export)?
        };

        let summary = HollowSummary {
            input: config.input.clone(),
            output: config.output.clone(),
            input_format: ingestion_result.format.to_string(),
            wall_thickness: config.wall_thickness,
            raw_scale: result.scale.raw,
            scale: result.scale.clamped,
            centroid: result.centroid.to_array(),
            material_savings_percent: result.material_savings_percent(),
            original,
            hollow: hollow_report,
            written: !config.dry_run,
            bytes_written,
            elapsed_ms: start.elapsed().as_millis() as u64,
        };

        if let (Some(file), Some(path)) = (report_file, &config.report) {
            write_report(&summary, file, path)?;
        }

        info!(elapsed_ms = summary.elapsed_ms, "Pipeline complete");
        Ok(summary)
    }
}

/// Hollow `input` and write the result to `output` with default settings.
pub fn hollow_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    wall_thickness: f64,
) -> Result<HollowSummary> {
    let config = HollowConfig {
        input: input.as_ref().to_path_buf(),
        output: output.as_ref().to_path_buf(),
        wall_thickness,
        ..Default::default()
    };
    Pipeline::run(&config)
}

/// Create (or truncate) the report file.
fn create_report(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| {
        HollowError::Export(format!("Failed to create report {}: {e}", path.display()))
    })
}

/// Write `summary` as pretty-printed JSON.
fn write_report(summary: &HollowSummary, file: File, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)
        .map_err(|e| HollowError::Export(format!("Failed to write report: {e}")))?;
    writer.flush().map_err(|e| {
        HollowError::Export(format!("Failed to write report {}: {e}", path.display()))
    })?;
    info!(path = %path.display(), "Wrote run report");
    Ok(())
}

/// Print mesh counts, bounds, volume and topology.
fn print_mesh_report(title: &str, report: &MeshReport, units: Units) {
    println!("=== {title} ===");
    println!("  Vertices:   {}", report.vertex_count);
    println!("  Faces:      {}", report.face_count);
    if let Some(bb) = &report.bounds {
        let [dx, dy, dz] = bb.dimensions();
        println!(
            "  Bounds:     ({:.3}, {:.3}, {:.3}) → ({:.3}, {:.3}, {:.3})",
            bb.min[0], bb.min[1], bb.min[2], bb.max[0], bb.max[1], bb.max[2]
        );
        println!("  Size:       {dx:.3} x {dy:.3} x {dz:.3} {units}");
    }
    println!("  Volume:     {:.3} cubic {units}", report.volume);
    println!(
        "  Watertight: {}",
        if report.is_watertight { "yes" } else { "no" }
    );
    if report.degenerate_face_count > 0 {
        println!("  Degenerate: {} faces", report.degenerate_face_count);
    }
    if !report.is_watertight {
        println!(
            "  Open edges: {} boundary, {} non-manifold, {} inconsistent",
            report.boundary_edge_count,
            report.non_manifold_edge_count,
            report.inconsistent_edge_count
        );
    }
}

/// Print the scale factor and estimated savings.
fn print_hollow_summary(result: &HollowResult, config: &HollowConfig) {
    let c = result.centroid;
    println!("=== Hollowing ===");
    println!(
        "  Wall thickness:  {:.3} {}",
        config.wall_thickness, config.units
    );
    if result.scale.was_clamped() {
        println!(
            "  Scale factor:    {:.4} (clamped from {:.4})",
            result.scale.clamped, result.scale.raw
        );
    } else {
        println!("  Scale factor:    {:.4}", result.scale.clamped);
    }
    println!("  Centroid:        ({:.3}, {:.3}, {:.3})", c.x, c.y, c.z);
    println!(
        "  Material saved:  {:.1}%",
        result.material_savings_percent()
    );
}
