//! Constants and tunables for the hover warp.
//!
//! The page always runs with [`WarpConfig::default`]; the host helper can
//! override any field from a TOML file.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{WarpError, WarpResult};

/// Logical canvas size, matching the `width`/`height` attributes of `#dp-canvas`.
pub const CANVAS_SIZE: u32 = 500;
/// Cells per side of the mesh.
pub const GRID_SIZE: u32 = 20;
/// Length of one enter/leave transition (matches the CSS scale transition).
pub const DURATION_MS: f64 = 600.0;
/// Nominal display frame length the fixed step is derived from.
pub const FRAME_MS: f64 = 16.6;
/// Peak radial push in pixels.
pub const MAX_DISPLACEMENT: f64 = 100.0;
/// Multiplier applied to the distortion factor before displacement.
pub const MAX_STRENGTH: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WarpConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub grid_size: u32,
    pub duration_ms: f64,
    pub frame_ms: f64,
    pub max_displacement: f64,
    pub max_strength: f64,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_SIZE,
            canvas_height: CANVAS_SIZE,
            grid_size: GRID_SIZE,
            duration_ms: DURATION_MS,
            frame_ms: FRAME_MS,
            max_displacement: MAX_DISPLACEMENT,
            max_strength: MAX_STRENGTH,
        }
    }
}

impl WarpConfig {
    /// Progress increment applied by one fixed step.
    pub fn speed(&self) -> f64 {
        1.0 / (self.duration_ms / self.frame_ms)
    }

    pub fn from_toml_str(text: &str) -> WarpResult<Self> {
        let cfg: WarpConfig = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> WarpResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> WarpResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(WarpError::config("canvas size must be non-zero"));
        }
        if self.grid_size == 0 {
            return Err(WarpError::config("grid_size must be at least 1"));
        }
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return Err(WarpError::config(format!(
                "duration_ms must be positive, got {}",
                self.duration_ms
            )));
        }
        if !(self.frame_ms.is_finite() && self.frame_ms > 0.0) {
            return Err(WarpError::config(format!(
                "frame_ms must be positive, got {}",
                self.frame_ms
            )));
        }
        if !(self.max_displacement.is_finite() && self.max_displacement >= 0.0) {
            return Err(WarpError::config("max_displacement must be >= 0"));
        }
        if !(self.max_strength.is_finite() && self.max_strength >= 0.0) {
            return Err(WarpError::config("max_strength must be >= 0"));
        }
        Ok(())
    }
}
