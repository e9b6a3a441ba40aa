use crate::config::ScaleLimits;
use crate::error::{HollowError, Result};
use crate::types::BoundingBox;

/// Inner-shell scale factor before and after clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor {
    /// `(min_dim - 2 * wall_thickness) / min_dim`
    pub raw: f64,
    /// `raw` clamped into the configured limits.
    pub clamped: f64,
}

impl ScaleFactor {
    /// Whether clamping changed the raw value.
    pub fn was_clamped(&self) -> bool {
        self.raw != self.clamped
    }
}

/// Derive the uniform scale for the inner shell from the smallest extent of
/// `bounds`.
///
/// A flat box (`min_dim <= 0`) has no interior to shell and is rejected.
pub fn scale_factor(
    bounds: &BoundingBox,
    wall_thickness: f64,
    limits: &ScaleLimits,
) -> Result<ScaleFactor> {
    let min_dim = bounds.min_dimension();
    if !min_dim.is_finite() || min_dim <= 0.0 {
        return Err(HollowError::Geometry(format!(
            "degenerate bounding box: smallest dimension is {min_dim}"
        )));
    }

    let raw = (min_dim - 2.0 * wall_thickness) / min_dim;
    Ok(ScaleFactor {
        raw,
        clamped: raw.clamp(limits.min, limits.max),
    })
}
