use crate::core::{DragConfig, ScheduledItem};
use crate::error::{TimelineError, TimelineResult};

use super::{DragInterpreter, DragMode, DragPreview, GestureReport, ScheduleUpdateSink};

/// Pointer lifecycle as seen by a UI shell, free of any event-system types.
pub trait PointerSession {
    fn on_session_start(&mut self, pointer_x: f64) -> TimelineResult<()>;
    fn on_session_move(&mut self, pointer_x: f64) -> TimelineResult<Option<DragPreview>>;
    fn on_session_end(&mut self, pointer_x: f64) -> TimelineResult<GestureReport>;
    fn on_session_cancel(&mut self);
}

/// Item and handle resolved by the host's hit-testing before pointer-down.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureTarget {
    pub item: ScheduledItem,
    pub mode: DragMode,
}

/// Binds a [`DragInterpreter`] to a persistence sink.
///
/// The host arms a target, then forwards pointer events. The target is
/// cleared when the session ends or is cancelled.
#[derive(Debug)]
pub struct DragController<S> {
    interpreter: DragInterpreter,
    target: Option<GestureTarget>,
    sink: S,
}

impl<S: ScheduleUpdateSink> DragController<S> {
    pub fn new(config: DragConfig, sink: S) -> TimelineResult<Self> {
        Ok(Self {
            interpreter: DragInterpreter::new(config)?,
            target: None,
            sink,
        })
    }

    pub fn arm(&mut self, item: ScheduledItem, mode: DragMode) {
        self.target = Some(GestureTarget { item, mode });
    }

    #[must_use]
    pub fn target(&self) -> Option<&GestureTarget> {
        self.target.as_ref()
    }

    #[must_use]
    pub fn interpreter(&self) -> &DragInterpreter {
        &self.interpreter
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: ScheduleUpdateSink> PointerSession for DragController<S> {
    fn on_session_start(&mut self, pointer_x: f64) -> TimelineResult<()> {
        let target = self.target.as_ref().ok_or_else(|| {
            TimelineError::InvalidInput("pointer-down without an armed target".to_owned())
        })?;
        self.interpreter.begin(&target.item, target.mode, pointer_x)
    }

    fn on_session_move(&mut self, pointer_x: f64) -> TimelineResult<Option<DragPreview>> {
        self.interpreter.preview(pointer_x)
    }

    fn on_session_end(&mut self, pointer_x: f64) -> TimelineResult<GestureReport> {
        self.target = None;
        let outcome = self.interpreter.end(pointer_x)?;
        Ok(GestureReport::deliver(outcome, &mut self.sink))
    }

    fn on_session_cancel(&mut self) {
        self.target = None;
        self.interpreter.cancel();
    }
}
