use std::path::PathBuf;

use clap::Parser;

use crate::error::{HollowError, Result};
use crate::hollow::HollowParams;

/// Linear unit of the mesh coordinates. Used only to label diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Units {
    #[default]
    #[value(name = "mm")]
    Millimeters,
    #[value(name = "cm")]
    Centimeters,
    #[value(name = "m")]
    Meters,
    #[value(name = "in")]
    Inches,
    #[value(name = "ft")]
    Feet,
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Units::Millimeters => write!(f, "mm"),
            Units::Centimeters => write!(f, "cm"),
            Units::Meters => write!(f, "m"),
            Units::Inches => write!(f, "in"),
            Units::Feet => write!(f, "ft"),
        }
    }
}

/// STL output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StlEncoding {
    #[default]
    Binary,
    Ascii,
}

impl std::fmt::Display for StlEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StlEncoding::Binary => write!(f, "binary"),
            StlEncoding::Ascii => write!(f, "ascii"),
        }
    }
}

/// Clamp range for the inner-shell scale factor.
///
/// Below `min` the inner shell removes too much of the smallest extent and
/// thin parts self-intersect; above `max` the walls become too thin to print.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self {
            min: 0.7,
            max: 0.95,
        }
    }
}

impl ScaleLimits {
    /// Require `0 < min <= max < 1`.
    pub fn validate(&self) -> Result<()> {
        let ok = self.min.is_finite()
            && self.max.is_finite()
            && self.min > 0.0
            && self.min <= self.max
            && self.max < 1.0;
        if ok {
            Ok(())
        } else {
            Err(HollowError::Config(format!(
                "scale limits must satisfy 0 < min <= max < 1 (got min={}, max={})",
                self.min, self.max
            )))
        }
    }
}

/// Mesh export parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    pub stl_encoding: StlEncoding,
}

/// Fully resolved configuration (constructed from CLI args).
#[derive(Debug, Clone)]
pub struct HollowConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub wall_thickness: f64,
    pub limits: ScaleLimits,
    pub units: Units,
    pub export: ExportOptions,
    pub report: Option<PathBuf>,
    pub dry_run: bool,
    pub verbose: bool,
}

impl Default for HollowConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::new(),
            wall_thickness: 2.0,
            limits: ScaleLimits::default(),
            units: Units::default(),
            export: ExportOptions::default(),
            report: None,
            dry_run: false,
            verbose: false,
        }
    }
}

impl HollowConfig {
    /// Reject parameters the transform cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.hollow_params().validate()
    }

    /// Transform parameters carried by this configuration.
    pub fn hollow_params(&self) -> HollowParams {
        HollowParams {
            wall_thickness: self.wall_thickness,
            limits: self.limits,
        }
    }

    /// Whether the run overwrites its own input.
    pub fn overwrites_input(&self) -> bool {
        self.input == self.output
    }
}

/// CLI argument definition (clap derive).
#[derive(Parser, Debug)]
#[command(
    name = "mesh-hollow",
    about = "Hollow out a solid triangle mesh for 3D printing",
    version
)]
pub struct CliArgs {
    /// Input mesh (STL, OBJ, PLY, glTF, GLB)
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Output mesh (STL, OBJ, PLY, GLB); defaults to overwriting the input
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Target wall thickness in mesh units
    #[arg(short = 't', long, default_value_t = 2.0)]
    pub wall_thickness: f64,

    /// Lower clamp for the inner-shell scale factor
    #[arg(long, default_value_t = 0.7)]
    pub min_scale: f64,

    /// Upper clamp for the inner-shell scale factor
    #[arg(long, default_value_t = 0.95)]
    pub max_scale: f64,

    /// Unit of the mesh coordinates (for diagnostics)
    #[arg(long, value_enum, default_value = "mm")]
    pub units: Units,

    /// Write ASCII instead of binary STL
    #[arg(long)]
    pub ascii: bool,

    /// Compute and report only; do not write the mesh
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl From<CliArgs> for HollowConfig {
    fn from(args: CliArgs) -> Self {
        let output = args.output.unwrap_or_else(|| args.input.clone());

        HollowConfig {
            input: args.input,
            output,
            wall_thickness: args.wall_thickness,
            limits: ScaleLimits {
                min: args.min_scale,
                max: args.max_scale,
            },
            units: args.units,
            export: ExportOptions {
                stl_encoding: if args.ascii {
                    StlEncoding::Ascii
                } else {
                    StlEncoding::Binary
                },
            },
            report: args.report,
            dry_run: args.dry_run,
            verbose: args.verbose,
        }
    }
}
