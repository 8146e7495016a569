use crate::Error;
use crate::bounds::Bounds;
use crate::camera::ZoomRange;
use crate::fallback::{DEFAULT_GRACE_MS, FallbackPolicy};

/// Tunables shared by the camera fit, the grid layout and the fallback watchdog.
///
/// `padding_ratio` is the share of the available space the content may occupy: the grid
/// scales each item by it and the stage camera widens its view by `1 / padding_ratio`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default, rename_all = "camelCase"))]
pub struct FitConfig {
    pub padding_ratio: f32,
    pub zoom_range: ZoomRange,
    pub grace_ms: f64,
    pub default_bounds: Bounds,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            padding_ratio: 0.9,
            zoom_range: ZoomRange::default(),
            grace_ms: DEFAULT_GRACE_MS,
            default_bounds: Bounds::DEFAULT,
        }
    }
}

impl FitConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.padding_ratio.is_finite() && self.padding_ratio > 0.0) {
            return Err(Error::InvalidPaddingRatio {
                value: self.padding_ratio,
            });
        }
        self.zoom_range.validate()?;
        self.fallback_policy().validate()?;
        let b = self.default_bounds;
        if !b.is_well_formed() {
            return Err(Error::InvalidDefaultBounds {
                min_x: b.min_x,
                min_y: b.min_y,
                max_x: b.max_x,
                max_y: b.max_y,
            });
        }
        Ok(())
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        FallbackPolicy {
            grace_ms: self.grace_ms,
        }
    }

    pub fn with_padding_ratio(mut self, padding_ratio: f32) -> Result<Self, Error> {
        self.padding_ratio = padding_ratio;
        self.validate()?;
        Ok(self)
    }

    pub fn with_grace_ms(mut self, grace_ms: f64) -> Result<Self, Error> {
        self.grace_ms = grace_ms;
        self.validate()?;
        Ok(self)
    }

    /// Parses a JSON object; omitted fields keep their defaults.
    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        let config: FitConfig = serde_json::from_str(s).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
}
