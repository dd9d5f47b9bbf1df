use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::{
    Axis, Granularity, Position, RawScheduledItem, ScheduledItem, TimelineLayout, compute_layout,
    map_position, parse_items,
};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::{
    DragInterpreter, DragMode, DragPreview, GestureReport, InteractionMode, ScheduleUpdateSink,
};

use super::TimelineConfig;

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` holds the current item set, the selected granularity and
/// the drag interpreter. Layouts are recomputed from scratch on every call.
/// Committed gestures are reported to a sink and never applied to the local
/// item set; the host refreshes items from persistence via
/// [`TimelineEngine::upsert_item`] or [`TimelineEngine::set_items`].
#[derive(Debug, Clone)]
pub struct TimelineEngine {
    config: TimelineConfig,
    granularity: Granularity,
    /// `IndexMap` keeps insertion order so layouts list bars deterministically.
    items: IndexMap<String, ScheduledItem>,
    drag: DragInterpreter,
}

impl TimelineEngine {
    pub fn new(config: TimelineConfig) -> TimelineResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            granularity: config.granularity,
            drag: DragInterpreter::new(config.drag)?,
            items: IndexMap::new(),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> TimelineConfig {
        self.config
    }

    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        debug!(%granularity, "granularity changed");
        self.granularity = granularity;
    }

    /// Applies a view-mode string such as `"Weeks"`.
    pub fn set_granularity_str(&mut self, value: &str) -> TimelineResult<()> {
        let granularity = value.parse()?;
        self.set_granularity(granularity);
        Ok(())
    }

    /// Replaces the whole item set. Later duplicates of an id win.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = ScheduledItem>) {
        self.items = items
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();
        debug!(count = self.items.len(), "items replaced");
    }

    /// Replaces the item set from wire data, skipping malformed entries.
    pub fn set_raw_items(&mut self, raw: &[RawScheduledItem]) {
        self.set_items(parse_items(raw));
    }

    pub fn upsert_item(&mut self, item: ScheduledItem) {
        trace!(id = %item.id, "upsert item");
        self.items.insert(item.id.clone(), item);
    }

    pub fn remove_item(&mut self, id: &str) -> Option<ScheduledItem> {
        self.items.shift_remove(id)
    }

    #[must_use]
    pub fn item(&self, id: &str) -> Option<&ScheduledItem> {
        self.items.get(id)
    }

    pub fn items(&self) -> impl Iterator<Item = &ScheduledItem> {
        self.items.values()
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Full layout pass against an explicit clock reading.
    pub fn layout(&self, now: DateTime<Utc>) -> TimelineResult<TimelineLayout> {
        let items: Vec<&ScheduledItem> = self.items.values().collect();
        let layout = compute_layout(&items, self.granularity, now, &self.config.layout)?;
        trace!(
            granularity = %self.granularity,
            periods = layout.axis.len(),
            bars = layout.bars.len(),
            today_visible = layout.today.is_visible(),
            "layout pass"
        );
        Ok(layout)
    }

    /// Full layout pass using the wall clock.
    pub fn layout_now(&self) -> TimelineResult<TimelineLayout> {
        self.layout(Utc::now())
    }

    /// Single-bar placement against an already generated axis.
    #[must_use]
    pub fn bar_position(&self, axis: &Axis, id: &str) -> Option<Position> {
        self.items
            .get(id)
            .map(|item| map_position(item.start_date, item.end_date, axis, &self.config.layout))
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.drag.mode()
    }

    /// Pointer-down on item `id`.
    pub fn begin_drag(&mut self, id: &str, mode: DragMode, pointer_x: f64) -> TimelineResult<()> {
        let item = self
            .items
            .get(id)
            .ok_or_else(|| TimelineError::UnknownItem(id.to_owned()))?;
        self.drag.begin(item, mode, pointer_x)
    }

    pub fn drag_preview(&self, pointer_x: f64) -> TimelineResult<Option<DragPreview>> {
        self.drag.preview(pointer_x)
    }

    /// Pointer-up: resolves the gesture and hands a commit to `sink`.
    pub fn end_drag<S>(&mut self, pointer_x: f64, sink: &mut S) -> TimelineResult<GestureReport>
    where
        S: ScheduleUpdateSink + ?Sized,
    {
        let outcome = self.drag.end(pointer_x)?;
        Ok(GestureReport::deliver(outcome, sink))
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel()
    }
}
