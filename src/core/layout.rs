use std::borrow::Borrow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::axis::generate_axis;
use crate::core::position::map_items;
use crate::core::range::analyze_range;
use crate::core::today::locate_today;
use crate::core::{Axis, AxisLabel, Granularity, ItemBar, LayoutConfig, ScheduledItem, TodayMarker};
use crate::error::TimelineResult;

/// Result of one layout pass.
///
/// Fully derived from `(items, granularity, now, config)`; nothing here is
/// cached between passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub axis: Axis,
    pub bars: Vec<ItemBar>,
    pub today: TodayMarker,
}

impl TimelineLayout {
    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.axis.granularity()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<AxisLabel> {
        self.axis.labels()
    }

    #[must_use]
    pub fn bar(&self, id: &str) -> Option<&ItemBar> {
        self.bars.iter().find(|bar| bar.id == id)
    }
}

/// Runs range analysis, axis generation, bar mapping and today placement.
///
/// Items with inverted dates are left out of every stage. `config` is
/// validated first, so a bad ceiling or floor surfaces as
/// [`crate::TimelineError::InvalidConfig`].
pub fn compute_layout<T>(
    items: &[T],
    granularity: Granularity,
    now: DateTime<Utc>,
    config: &LayoutConfig,
) -> TimelineResult<TimelineLayout>
where
    T: Borrow<ScheduledItem> + Sync,
{
    let config = &config.validate()?;
    let range = analyze_range(items);
    let axis = generate_axis(granularity, range, now.date_naive(), config)?;
    let bars = map_items(items, &axis, config);
    let today = locate_today(now, &axis, items, config);

    Ok(TimelineLayout { axis, bars, today })
}
