use std::borrow::Borrow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::position::offset_for_date;
use crate::core::range::analyze_range;
use crate::core::{Axis, LayoutConfig, ScheduledItem};

/// Sentinel offset handed to hosts when the marker must be omitted.
pub const TODAY_HIDDEN_SENTINEL: f64 = -1.0;

/// Current-day marker placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TodayMarker {
    Visible { offset_percent: f64 },
    Hidden,
}

impl TodayMarker {
    #[must_use]
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible { .. })
    }

    /// Offset in percent, or [`TODAY_HIDDEN_SENTINEL`] when hidden.
    #[must_use]
    pub fn as_offset_percent(self) -> f64 {
        match self {
            Self::Visible { offset_percent } => offset_percent,
            Self::Hidden => TODAY_HIDDEN_SENTINEL,
        }
    }
}

/// Places "now" on the axis.
///
/// Matching follows the bar-start rule. When `now` falls outside every
/// period, a position proportional to the items' overall date range is used
/// instead, provided `now` lies inside that range. Visible offsets are
/// clamped to `[0, config.today_max_offset_percent]`; an unvalidated ceiling
/// that is negative or NaN leaves the offset at 0.
#[must_use]
pub fn locate_today<T: Borrow<ScheduledItem>>(
    now: DateTime<Utc>,
    axis: &Axis,
    items: &[T],
    config: &LayoutConfig,
) -> TodayMarker {
    let ceiling = config.today_max_offset_percent;

    if let Some(offset) = offset_for_date(axis, now.date_naive()) {
        return TodayMarker::Visible {
            offset_percent: clamp_to_ceiling(offset, ceiling),
        };
    }

    match analyze_range(items).and_then(|range| range.fraction_of(now)) {
        Some(fraction) => TodayMarker::Visible {
            offset_percent: clamp_to_ceiling(fraction * 100.0, ceiling),
        },
        None => TodayMarker::Hidden,
    }
}

// `f64::clamp` panics on a NaN or negative bound.
fn clamp_to_ceiling(offset: f64, ceiling: f64) -> f64 {
    let ceiling = if ceiling > 0.0 { ceiling } else { 0.0 };
    offset.max(0.0).min(ceiling)
}
