// ── View configuration ────────────────────────────────────────────────────────
//
// Optional JSON file read by the binary.  Every field has a default so that
// older or partial files keep parsing.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{EditorError, Result},
    gesture::ScaleBounds,
    theme::FontMetrics,
};

/// Input class of the device the view runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Phones and tablets: smaller base text, pinch enabled.
    #[default]
    Touch,
    Desktop,
}

impl Device {
    /// Unzoomed font metrics for this device.
    pub fn base_metrics(self) -> FontMetrics {
        match self {
            Device::Touch => FontMetrics {
                font_size: 12,
                line_height: 18,
            },
            Device::Desktop => FontMetrics {
                font_size: 14,
                line_height: 21,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub device: Device,
    pub min_scale: f64,
    pub max_scale: f64,
    pub dark_mode: bool,
    pub line_wrapping: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            device: Device::default(),
            min_scale: ScaleBounds::DEFAULT.min,
            max_scale: ScaleBounds::DEFAULT.max,
            dark_mode: false,
            line_wrapping: true,
        }
    }
}

impl EditorConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        let config: EditorConfig = serde_json::from_slice(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Scale bounds must be finite with `0 < min <= max`.
    pub fn validate(&self) -> Result<()> {
        let (min, max) = (self.min_scale, self.max_scale);
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(EditorError::Config(format!(
                "scale bounds [{min}, {max}] must satisfy 0 < min <= max"
            )));
        }
        Ok(())
    }

    pub fn bounds(&self) -> ScaleBounds {
        ScaleBounds {
            min: self.min_scale,
            max: self.max_scale,
        }
    }

    pub fn base_metrics(&self) -> FontMetrics {
        self.device.base_metrics()
    }
}
