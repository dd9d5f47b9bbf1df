pub mod axis;
pub mod config;
pub mod layout;
pub mod position;
pub mod primitives;
pub mod range;
pub mod today;
pub mod types;

pub use axis::{Axis, AxisLabel, AxisPeriod, PeriodMatch, generate_axis};
pub use config::{DragConfig, GranularityLimits, LayoutConfig};
pub use layout::{TimelineLayout, compute_layout};
pub use position::{intra_period_fraction, map_item, map_items, map_position, offset_for_date};
pub use range::analyze_range;
pub use today::{TODAY_HIDDEN_SENTINEL, TodayMarker, locate_today};
pub use types::{
    DateRange, Granularity, ItemBar, Position, RawScheduledItem, ScheduledItem, parse_items,
    parse_items_json,
};
