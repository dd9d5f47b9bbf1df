use std::borrow::Borrow;

use tracing::debug;

use crate::core::{DateRange, ScheduledItem};

/// Scans every start/end date and returns the overall bound.
///
/// Returns `None` for an empty collection; callers substitute a synthetic
/// range anchored at the current year. Items whose start lies after their end
/// are skipped rather than failing the pass.
#[must_use]
pub fn analyze_range<T: Borrow<ScheduledItem>>(items: &[T]) -> Option<DateRange> {
    let mut range: Option<DateRange> = None;

    for item in items.iter().map(Borrow::<ScheduledItem>::borrow) {
        if !item.is_well_formed() {
            debug!(id = %item.id, "range analysis skipped inverted item");
            continue;
        }
        range = Some(match range {
            None => DateRange {
                min: item.start_date,
                max: item.end_date,
            },
            Some(current) => DateRange {
                min: current.min.min(item.start_date),
                max: current.max.max(item.end_date),
            },
        });
    }

    range
}
