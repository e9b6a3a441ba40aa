pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod hollow;
pub mod ingestion;
pub mod pipeline;
pub mod shapes;
pub mod types;

pub use config::{HollowConfig, ScaleLimits, Units};
pub use error::{HollowError, Result};
pub use hollow::{HollowParams, HollowResult, hollow_mesh};
pub use pipeline::{HollowSummary, Pipeline, hollow_file};
pub use types::IndexedMesh;
