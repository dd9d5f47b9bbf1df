use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::primitives::parse_instant;
use crate::error::{TimelineError, TimelineResult};

/// Temporal resolution of the visible axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    Quarter,
    Month,
    Week,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Granularity::Quarter, Granularity::Month, Granularity::Week];

    /// View-mode spelling used by host controls.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quarter => "Quarters",
            Self::Month => "Months",
            Self::Week => "Weeks",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = TimelineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "quarter" | "quarters" => Ok(Self::Quarter),
            "month" | "months" => Ok(Self::Month),
            "week" | "weeks" => Ok(Self::Week),
            _ => Err(TimelineError::InvalidGranularity(value.to_owned())),
        }
    }
}

/// A dated work item ("release") owned by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledItem {
    pub id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl ScheduledItem {
    #[must_use]
    pub fn new(id: impl Into<String>, start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            start_date,
            end_date,
        }
    }

    /// `true` when `start_date <= end_date`.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.start_date <= self.end_date
    }

    #[must_use]
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Item as delivered over the wire, with ISO-8601 date strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScheduledItem {
    pub id: String,
    pub start_date: String,
    pub end_date: String,
}

impl RawScheduledItem {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// Returns `None` when either date is unparseable or the pair is inverted.
    #[must_use]
    pub fn parse(&self) -> Option<ScheduledItem> {
        let start_date = parse_instant(&self.start_date)?;
        let end_date = parse_instant(&self.end_date)?;
        let item = ScheduledItem::new(self.id.clone(), start_date, end_date);
        item.is_well_formed().then_some(item)
    }
}

/// Converts a wire batch into typed items, dropping malformed entries.
#[must_use]
pub fn parse_items(raw: &[RawScheduledItem]) -> Vec<ScheduledItem> {
    raw.iter()
        .filter_map(|entry| {
            let parsed = entry.parse();
            if parsed.is_none() {
                warn!(
                    id = %entry.id,
                    start = %entry.start_date,
                    end = %entry.end_date,
                    "excluding item with malformed dates"
                );
            }
            parsed
        })
        .collect()
}

/// Parses a JSON array of wire items.
pub fn parse_items_json(input: &str) -> TimelineResult<Vec<ScheduledItem>> {
    let raw: Vec<RawScheduledItem> = serde_json::from_str(input)
        .map_err(|e| TimelineError::InvalidData(format!("failed to parse items json: {e}")))?;
    Ok(parse_items(&raw))
}

/// Inclusive `[min, max]` bound of a set of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub min: DateTime<Utc>,
    pub max: DateTime<Utc>,
}

impl DateRange {
    #[must_use]
    pub fn contains(self, instant: DateTime<Utc>) -> bool {
        self.min <= instant && instant <= self.max
    }

    /// Relative position of `instant` in `[0, 1]`, or `None` when outside.
    ///
    /// A zero-width range maps its single instant to `0.0`.
    #[must_use]
    pub fn fraction_of(self, instant: DateTime<Utc>) -> Option<f64> {
        if !self.contains(instant) {
            return None;
        }
        let span = (self.max - self.min).num_milliseconds();
        if span == 0 {
            return Some(0.0);
        }
        let elapsed = (instant - self.min).num_milliseconds();
        Some(elapsed as f64 / span as f64)
    }
}

/// Normalized horizontal placement of one bar, in percent of the axis width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub offset_percent: f64,
    pub width_percent: f64,
}

impl Position {
    #[must_use]
    pub fn new(offset_percent: f64, width_percent: f64) -> Self {
        Self {
            offset_percent,
            width_percent,
        }
    }

    #[must_use]
    pub fn end_percent(self) -> f64 {
        self.offset_percent + self.width_percent
    }
}

/// Position of one item, keyed by its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBar {
    pub id: String,
    pub position: Position,
}
