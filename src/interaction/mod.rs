use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::primitives::shift_by_days;
use crate::core::{DragConfig, ScheduledItem};
use crate::error::{TimelineError, TimelineResult};

mod controller;

pub use controller::{DragController, GestureTarget, PointerSession};

/// Which part of a bar the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMode {
    /// Bar body: both dates shift together.
    Move,
    /// Trailing edge handle: only the end date shifts.
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Moving,
    Resizing,
}

/// Origin state captured on pointer-down. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub item_id: String,
    pub origin_pointer_x: f64,
    pub origin_start_date: DateTime<Utc>,
    pub origin_end_date: DateTime<Utc>,
    pub mode: DragMode,
}

/// Live feedback for an in-progress gesture; nothing is committed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragPreview {
    pub day_delta: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Whether releasing here would commit.
    pub valid: bool,
}

/// Partial update handed to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleUpdate {
    pub id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DragOutcome {
    Committed(ScheduleUpdate),
    /// Released without a valid change; the original dates stand.
    Discarded {
        id: String,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        day_delta: i64,
    },
    /// Pointer-up without an active session.
    NoSession,
}

impl DragOutcome {
    #[must_use]
    pub fn update(&self) -> Option<&ScheduleUpdate> {
        match self {
            Self::Committed(update) => Some(update),
            Self::Discarded { .. } | Self::NoSession => None,
        }
    }

    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// Success/failure signal reported by the persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitStatus {
    Accepted,
    Rejected,
}

/// Receiver of committed date changes.
///
/// Delivery is fire-and-forget from the interpreter's point of view; retry
/// policy belongs to the implementor.
pub trait ScheduleUpdateSink {
    fn submit(&mut self, update: &ScheduleUpdate) -> CommitStatus;
}

impl<F> ScheduleUpdateSink for F
where
    F: FnMut(&ScheduleUpdate) -> CommitStatus,
{
    fn submit(&mut self, update: &ScheduleUpdate) -> CommitStatus {
        self(update)
    }
}

/// Accepts and keeps every update, for hosts that flush in batches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    updates: Vec<ScheduleUpdate>,
}

impl RecordingSink {
    #[must_use]
    pub fn updates(&self) -> &[ScheduleUpdate] {
        &self.updates
    }

    pub fn drain(&mut self) -> Vec<ScheduleUpdate> {
        std::mem::take(&mut self.updates)
    }
}

impl ScheduleUpdateSink for RecordingSink {
    fn submit(&mut self, update: &ScheduleUpdate) -> CommitStatus {
        self.updates.push(update.clone());
        CommitStatus::Accepted
    }
}

/// Outcome of a finished gesture plus the sink's answer, if one was asked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureReport {
    pub outcome: DragOutcome,
    pub commit_status: Option<CommitStatus>,
}

impl GestureReport {
    pub(crate) fn deliver<S>(outcome: DragOutcome, sink: &mut S) -> Self
    where
        S: ScheduleUpdateSink + ?Sized,
    {
        let commit_status = outcome.update().map(|update| {
            let status = sink.submit(update);
            debug!(id = %update.id, ?status, "schedule update delivered");
            status
        });
        Self {
            outcome,
            commit_status,
        }
    }
}

/// Converts pointer deltas into day deltas for one gesture at a time.
///
/// Starting a new session replaces any stale one; ending or cancelling
/// always returns the interpreter to idle.
#[derive(Debug, Clone, PartialEq)]
pub struct DragInterpreter {
    config: DragConfig,
    session: Option<DragSession>,
}

impl Default for DragInterpreter {
    fn default() -> Self {
        Self {
            config: DragConfig::default(),
            session: None,
        }
    }
}

impl DragInterpreter {
    pub fn new(config: DragConfig) -> TimelineResult<Self> {
        Ok(Self {
            config: config.validate()?,
            session: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> DragConfig {
        self.config
    }

    pub fn set_config(&mut self, config: DragConfig) -> TimelineResult<()> {
        self.config = config.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        match self.session.as_ref().map(|session| session.mode) {
            None => InteractionMode::Idle,
            Some(DragMode::Move) => InteractionMode::Moving,
            Some(DragMode::Resize) => InteractionMode::Resizing,
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Pointer-down over `item`.
    pub fn begin(
        &mut self,
        item: &ScheduledItem,
        mode: DragMode,
        pointer_x: f64,
    ) -> TimelineResult<()> {
        ensure_finite_pointer(pointer_x)?;
        if let Some(stale) = self.session.take() {
            debug!(id = %stale.item_id, "replacing stale drag session");
        }
        debug!(id = %item.id, ?mode, pointer_x, "drag session started");
        self.session = Some(DragSession {
            item_id: item.id.clone(),
            origin_pointer_x: pointer_x,
            origin_start_date: item.start_date,
            origin_end_date: item.end_date,
            mode,
        });
        Ok(())
    }

    /// Rounded whole-day delta for a pointer travel of `delta_px`.
    pub fn day_delta_for(&self, delta_px: f64) -> TimelineResult<i64> {
        ensure_finite_pointer(delta_px)?;
        let days = (delta_px / self.config.pixels_per_day).round();
        if !days.is_finite() || days.abs() >= i64::MAX as f64 {
            return Err(TimelineError::overflow(format!(
                "converting {delta_px}px into days"
            )));
        }
        Ok(days as i64)
    }

    /// Pointer-move: proposed dates for live feedback, `None` when idle.
    pub fn preview(&self, pointer_x: f64) -> TimelineResult<Option<DragPreview>> {
        let Some(session) = self.session.as_ref() else {
            return Ok(None);
        };
        ensure_finite_pointer(pointer_x)?;
        let day_delta = self.day_delta_for(pointer_x - session.origin_pointer_x)?;
        let preview = resolve(session, day_delta)?;
        trace!(id = %session.item_id, day_delta, valid = preview.valid, "drag preview");
        Ok(Some(preview))
    }

    /// Pointer-up: commits the gesture or discards it.
    ///
    /// The session is consumed before any computation, so errors still leave
    /// the interpreter idle.
    pub fn end(&mut self, pointer_x: f64) -> TimelineResult<DragOutcome> {
        let Some(session) = self.session.take() else {
            return Ok(DragOutcome::NoSession);
        };
        ensure_finite_pointer(pointer_x)?;
        let day_delta = self.day_delta_for(pointer_x - session.origin_pointer_x)?;
        let preview = resolve(&session, day_delta)?;

        if !preview.valid {
            debug!(id = %session.item_id, day_delta, "drag discarded");
            return Ok(DragOutcome::Discarded {
                id: session.item_id,
                start_date: session.origin_start_date,
                end_date: session.origin_end_date,
                day_delta,
            });
        }

        debug!(id = %session.item_id, day_delta, mode = ?session.mode, "drag committed");
        Ok(DragOutcome::Committed(ScheduleUpdate {
            id: session.item_id,
            start_date: preview.start_date,
            end_date: preview.end_date,
        }))
    }

    /// Gesture ended without a pointer-up. Returns `true` if a session was dropped.
    pub fn cancel(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                debug!(id = %session.item_id, "drag cancelled");
                true
            }
            None => false,
        }
    }
}

fn resolve(session: &DragSession, day_delta: i64) -> TimelineResult<DragPreview> {
    match session.mode {
        DragMode::Move => Ok(DragPreview {
            day_delta,
            start_date: shift_by_days(session.origin_start_date, day_delta)?,
            end_date: shift_by_days(session.origin_end_date, day_delta)?,
            valid: day_delta != 0,
        }),
        DragMode::Resize => {
            let end_date = shift_by_days(session.origin_end_date, day_delta)?;
            Ok(DragPreview {
                day_delta,
                start_date: session.origin_start_date,
                end_date,
                valid: day_delta != 0 && end_date > session.origin_start_date,
            })
        }
    }
}

fn ensure_finite_pointer(value: f64) -> TimelineResult<()> {
    if !value.is_finite() {
        return Err(TimelineError::InvalidInput(
            "pointer coordinates must be finite".to_owned(),
        ));
    }
    Ok(())
}
