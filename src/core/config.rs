use serde::{Deserialize, Serialize};

use crate::core::Granularity;
use crate::error::{TimelineError, TimelineResult};

/// Length and width limits applied to one granularity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GranularityLimits {
    /// Narrowest bar, in percent of the axis width.
    pub min_width_percent: f64,
    /// Hard cap on generated periods.
    pub max_periods: usize,
    /// Periods are generated past the data range until this many exist.
    /// `0` disables the floor.
    pub min_periods: usize,
    /// Length of the synthetic axis used when there are no items.
    pub empty_periods: usize,
}

impl GranularityLimits {
    fn validate(self, granularity: Granularity) -> TimelineResult<Self> {
        if !self.min_width_percent.is_finite()
            || self.min_width_percent <= 0.0
            || self.min_width_percent > 100.0
        {
            return Err(TimelineError::InvalidConfig(format!(
                "{granularity} min width must be finite and in (0, 100]"
            )));
        }
        if self.max_periods == 0 {
            return Err(TimelineError::InvalidConfig(format!(
                "{granularity} max periods must be > 0"
            )));
        }
        if self.min_periods > self.max_periods {
            return Err(TimelineError::InvalidConfig(format!(
                "{granularity} min periods ({}) exceeds max periods ({})",
                self.min_periods, self.max_periods
            )));
        }
        if self.empty_periods == 0 || self.empty_periods > self.max_periods {
            return Err(TimelineError::InvalidConfig(format!(
                "{granularity} empty-axis periods must be in 1..={}",
                self.max_periods
            )));
        }
        Ok(self)
    }
}

/// Explicit layout configuration passed into every layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_quarter_limits")]
    pub quarter: GranularityLimits,
    #[serde(default = "default_month_limits")]
    pub month: GranularityLimits,
    #[serde(default = "default_week_limits")]
    pub week: GranularityLimits,
    /// Ceiling for the today marker so it never sits flush with the right edge.
    #[serde(default = "default_today_max_offset_percent")]
    pub today_max_offset_percent: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            quarter: default_quarter_limits(),
            month: default_month_limits(),
            week: default_week_limits(),
            today_max_offset_percent: default_today_max_offset_percent(),
        }
    }
}

impl LayoutConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        for granularity in Granularity::ALL {
            self.limits(granularity).validate(granularity)?;
        }
        if !self.today_max_offset_percent.is_finite()
            || self.today_max_offset_percent <= 0.0
            || self.today_max_offset_percent > 100.0
        {
            return Err(TimelineError::InvalidConfig(
                "today max offset must be finite and in (0, 100]".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn limits(&self, granularity: Granularity) -> GranularityLimits {
        match granularity {
            Granularity::Quarter => self.quarter,
            Granularity::Month => self.month,
            Granularity::Week => self.week,
        }
    }

    #[must_use]
    pub fn min_width_percent(&self, granularity: Granularity) -> f64 {
        self.limits(granularity).min_width_percent
    }

    #[must_use]
    pub fn with_limits(mut self, granularity: Granularity, limits: GranularityLimits) -> Self {
        match granularity {
            Granularity::Quarter => self.quarter = limits,
            Granularity::Month => self.month = limits,
            Granularity::Week => self.week = limits,
        }
        self
    }
}

/// Pointer-to-date sensitivity for drag and resize gestures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    #[serde(default = "default_pixels_per_day")]
    pub pixels_per_day: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            pixels_per_day: default_pixels_per_day(),
        }
    }
}

impl DragConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.pixels_per_day.is_finite() || self.pixels_per_day <= 0.0 {
            return Err(TimelineError::InvalidConfig(
                "pixels per day must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

fn default_quarter_limits() -> GranularityLimits {
    GranularityLimits {
        min_width_percent: 8.0,
        max_periods: 16,
        min_periods: 0,
        empty_periods: 4,
    }
}

fn default_month_limits() -> GranularityLimits {
    GranularityLimits {
        min_width_percent: 6.0,
        max_periods: 24,
        min_periods: 0,
        empty_periods: 6,
    }
}

fn default_week_limits() -> GranularityLimits {
    GranularityLimits {
        min_width_percent: 4.0,
        max_periods: 52,
        min_periods: 8,
        empty_periods: 6,
    }
}

fn default_today_max_offset_percent() -> f64 {
    98.0
}

fn default_pixels_per_day() -> f64 {
    30.0
}
