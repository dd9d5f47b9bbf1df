use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{
    add_days, add_months, first_day_of_month, first_day_of_quarter, first_day_of_year,
    monday_on_or_before, month_abbreviation, previous_day, quarter_index, quarter_span_label,
};
use crate::core::{DateRange, Granularity, LayoutConfig};
use crate::error::TimelineResult;

/// Sub-label shared by every month column.
pub const MONTH_SUBLABEL: &str = "Week 1-4";
/// Sub-label of week columns on the synthetic (empty-data) axis.
pub const SYNTHETIC_WEEK_SUBLABEL: &str = "Mon-Sun";

/// Column header text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub label: String,
    pub sublabel: String,
}

/// One axis column with its inclusive calendar bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisPeriod {
    #[serde(flatten)]
    pub label: AxisLabel,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AxisPeriod {
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Where a date falls relative to the generated periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodMatch {
    Within(usize),
    BeforeStart,
    AfterEnd,
}

/// Ordered, contiguous sequence of labeled periods.
///
/// Order is significant: the index of a period defines its horizontal slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    granularity: Granularity,
    periods: Vec<AxisPeriod>,
    synthetic: bool,
}

impl Axis {
    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    #[must_use]
    pub fn periods(&self) -> &[AxisPeriod] {
        &self.periods
    }

    #[must_use]
    pub fn labels(&self) -> Vec<AxisLabel> {
        self.periods.iter().map(|period| period.label.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// `true` when built without data, anchored at the current year.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    /// Width of one column in percent of the axis.
    #[must_use]
    pub fn period_width_percent(&self) -> f64 {
        if self.periods.is_empty() {
            return 100.0;
        }
        100.0 / self.periods.len() as f64
    }

    /// Inclusive date span covered by the whole axis.
    #[must_use]
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.periods.first()?.start, self.periods.last()?.end))
    }

    /// Locates the period containing `date`.
    ///
    /// Week columns are matched by axis-relative position (the running
    /// counter), never by ISO week-of-year.
    #[must_use]
    pub fn locate(&self, date: NaiveDate) -> PeriodMatch {
        let index = self.periods.partition_point(|period| period.end < date);
        match self.periods.get(index) {
            None => PeriodMatch::AfterEnd,
            Some(period) if period.start > date => PeriodMatch::BeforeStart,
            Some(_) => PeriodMatch::Within(index),
        }
    }

    #[must_use]
    pub fn period_containing(&self, date: NaiveDate) -> Option<&AxisPeriod> {
        match self.locate(date) {
            PeriodMatch::Within(index) => self.periods.get(index),
            PeriodMatch::BeforeStart | PeriodMatch::AfterEnd => None,
        }
    }
}

/// Builds the axis for `granularity`.
///
/// With `range == None` a synthetic axis anchored at `today`'s year is
/// produced. Otherwise periods run from the one containing `range.min`
/// through the one containing `range.max` (for weeks, one extra week), then
/// extend to the configured floor and stop at the configured cap.
pub fn generate_axis(
    granularity: Granularity,
    range: Option<DateRange>,
    today: NaiveDate,
    config: &LayoutConfig,
) -> TimelineResult<Axis> {
    let limits = config.limits(granularity);

    let Some(range) = range else {
        let anchor = first_day_of_year(today.year())?;
        let first = period_start(granularity, anchor)?;
        let count = limits.empty_periods.min(limits.max_periods);
        let periods = build_periods(granularity, first, count, |_| false, true)?;
        return Ok(Axis {
            granularity,
            periods,
            synthetic: true,
        });
    };

    let min_date = range.min.date_naive();
    let max_date = range.max.date_naive();
    let first = period_start(granularity, min_date)?;
    let last_start = match granularity {
        // Carry one full week past the data so the end date is always captured.
        Granularity::Week => add_days(monday_on_or_before(max_date)?, 7)?,
        Granularity::Quarter | Granularity::Month => period_start(granularity, max_date)?,
    };

    let min_periods = limits.min_periods;
    let periods = build_periods(
        granularity,
        first,
        limits.max_periods,
        |(start, generated)| start <= last_start || generated < min_periods,
        false,
    )?;

    Ok(Axis {
        granularity,
        periods,
        synthetic: false,
    })
}

fn period_start(granularity: Granularity, date: NaiveDate) -> TimelineResult<NaiveDate> {
    match granularity {
        Granularity::Quarter => first_day_of_quarter(date),
        Granularity::Month => first_day_of_month(date),
        Granularity::Week => monday_on_or_before(date),
    }
}

fn next_period_start(granularity: Granularity, start: NaiveDate) -> TimelineResult<NaiveDate> {
    match granularity {
        Granularity::Quarter => add_months(start, 3),
        Granularity::Month => add_months(start, 1),
        Granularity::Week => add_days(start, 7),
    }
}

/// Emits up to `cap` periods from `first`.
///
/// `keep_going` sees `(period_start, generated_so_far)`; returning `false`
/// stops generation early. Synthetic mode ignores it and emits exactly `cap`.
fn build_periods(
    granularity: Granularity,
    first: NaiveDate,
    cap: usize,
    keep_going: impl Fn((NaiveDate, usize)) -> bool,
    synthetic: bool,
) -> TimelineResult<Vec<AxisPeriod>> {
    let mut periods = Vec::with_capacity(cap);
    let mut start = first;

    while periods.len() < cap {
        if !synthetic && !keep_going((start, periods.len())) {
            break;
        }
        let next = next_period_start(granularity, start)?;
        let end = previous_day(next)?;
        let label = period_label(granularity, periods.len(), start, end, synthetic);
        periods.push(AxisPeriod { label, start, end });
        start = next;
    }

    Ok(periods)
}

fn period_label(
    granularity: Granularity,
    index: usize,
    start: NaiveDate,
    end: NaiveDate,
    synthetic: bool,
) -> AxisLabel {
    match granularity {
        Granularity::Quarter => {
            let quarter = quarter_index(start);
            AxisLabel {
                label: format!("Q{} {}", quarter + 1, start.year()),
                sublabel: quarter_span_label(quarter).to_owned(),
            }
        }
        Granularity::Month => AxisLabel {
            label: format!("{} {}", month_abbreviation(start), start.year()),
            sublabel: MONTH_SUBLABEL.to_owned(),
        },
        Granularity::Week => AxisLabel {
            label: format!("Week {}", index + 1),
            sublabel: if synthetic {
                SYNTHETIC_WEEK_SUBLABEL.to_owned()
            } else {
                format!("{}-{}", start.format("%m/%d"), end.format("%m/%d"))
            },
        },
    }
}
