use serde::{Deserialize, Serialize};

use crate::core::{DragConfig, Granularity, GranularityLimits, LayoutConfig};
use crate::error::{TimelineError, TimelineResult};

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can persist and reload a timeline view
/// setup instead of reading values from ambient storage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_granularity")]
    pub granularity: Granularity,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub drag: DragConfig,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self::new(default_granularity())
    }
}

impl TimelineConfig {
    #[must_use]
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            layout: LayoutConfig::default(),
            drag: DragConfig::default(),
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_drag(mut self, drag: DragConfig) -> Self {
        self.drag = drag;
        self
    }

    /// Sets the pointer sensitivity shared by move and resize gestures.
    #[must_use]
    pub fn with_pixels_per_day(mut self, pixels_per_day: f64) -> Self {
        self.drag.pixels_per_day = pixels_per_day;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, granularity: Granularity, limits: GranularityLimits) -> Self {
        self.layout = self.layout.with_limits(granularity, limits);
        self
    }

    #[must_use]
    pub fn with_min_width_percent(mut self, granularity: Granularity, percent: f64) -> Self {
        let limits = GranularityLimits {
            min_width_percent: percent,
            ..self.layout.limits(granularity)
        };
        self.layout = self.layout.with_limits(granularity, limits);
        self
    }

    pub fn validate(self) -> TimelineResult<Self> {
        self.layout.validate()?;
        self.drag.validate()?;
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| TimelineError::InvalidData(format!("failed to parse config json: {e}")))?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TimelineError::InvalidData(format!("failed to serialize config json: {e}")))
    }
}

fn default_granularity() -> Granularity {
    Granularity::Month
}
