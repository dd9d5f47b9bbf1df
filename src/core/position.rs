use std::borrow::Borrow;

use chrono::{DateTime, Datelike, NaiveDate, Utc};

#[cfg(feature = "parallel-layout")]
use rayon::prelude::*;

use crate::core::primitives::month_in_quarter;
use crate::core::{Axis, Granularity, ItemBar, LayoutConfig, PeriodMatch, Position, ScheduledItem};

/// Fraction (`0.0..1.0`) of a period already elapsed at `date`.
///
/// Week columns resolve to whole weeks only.
#[must_use]
pub fn intra_period_fraction(granularity: Granularity, date: NaiveDate) -> f64 {
    match granularity {
        Granularity::Quarter => f64::from(month_in_quarter(date)) / 3.0,
        Granularity::Month => f64::from(date.day0()) / 31.0,
        Granularity::Week => 0.0,
    }
}

/// Offset of `date` on `axis` in percent, when it falls inside a period.
#[must_use]
pub fn offset_for_date(axis: &Axis, date: NaiveDate) -> Option<f64> {
    match axis.locate(date) {
        PeriodMatch::Within(index) => Some(offset_in_period(axis, index, date)),
        PeriodMatch::BeforeStart | PeriodMatch::AfterEnd => None,
    }
}

fn offset_in_period(axis: &Axis, index: usize, date: NaiveDate) -> f64 {
    let fraction = intra_period_fraction(axis.granularity(), date);
    (index as f64 + fraction) * axis.period_width_percent()
}

/// Maps an item's date pair onto the axis.
///
/// This is the single bar-placement routine shared by full layouts and
/// single-bar call sites. Items starting outside the axis degrade to a
/// one-period bar pinned at the nearest edge, kept inside `[0, 100]`.
#[must_use]
pub fn map_position(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    axis: &Axis,
    config: &LayoutConfig,
) -> Position {
    let floor = config.min_width_percent(axis.granularity());
    let period_width = axis.period_width_percent();
    let fallback_width = period_width.max(floor);

    let start = start_date.date_naive();
    let end = end_date.max(start_date).date_naive();

    let offset = match axis.locate(start) {
        PeriodMatch::Within(index) => offset_in_period(axis, index, start),
        PeriodMatch::BeforeStart => return Position::new(0.0, fallback_width),
        PeriodMatch::AfterEnd => {
            return Position::new((100.0 - fallback_width).max(0.0), fallback_width);
        }
    };

    let end_offset = match axis.locate(end) {
        // The bar covers its last period entirely.
        PeriodMatch::Within(index) => (index + 1) as f64 * period_width,
        PeriodMatch::AfterEnd => 100.0,
        PeriodMatch::BeforeStart => offset + period_width,
    };

    Position::new(offset, (end_offset - offset).max(floor))
}

#[must_use]
pub fn map_item(item: &ScheduledItem, axis: &Axis, config: &LayoutConfig) -> ItemBar {
    ItemBar {
        id: item.id.clone(),
        position: map_position(item.start_date, item.end_date, axis, config),
    }
}

/// Maps every well-formed item, preserving input order.
#[must_use]
pub fn map_items<T>(items: &[T], axis: &Axis, config: &LayoutConfig) -> Vec<ItemBar>
where
    T: Borrow<ScheduledItem> + Sync,
{
    #[cfg(feature = "parallel-layout")]
    {
        items
            .par_iter()
            .map(Borrow::<ScheduledItem>::borrow)
            .filter(|item| item.is_well_formed())
            .map(|item| map_item(item, axis, config))
            .collect()
    }

    #[cfg(not(feature = "parallel-layout"))]
    {
        items
            .iter()
            .map(Borrow::<ScheduledItem>::borrow)
            .filter(|item| item.is_well_formed())
            .map(|item| map_item(item, axis, config))
            .collect()
    }
}
