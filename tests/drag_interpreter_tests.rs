use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use timeline_rs::TimelineError;
use timeline_rs::core::{DragConfig, ScheduledItem};
use timeline_rs::interaction::{
    CommitStatus, DragController, DragInterpreter, DragMode, DragOutcome, InteractionMode,
    PointerSession, RecordingSink, ScheduleUpdate,
};

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .expect("valid instant")
}

fn interpreter() -> DragInterpreter {
    DragInterpreter::new(DragConfig {
        pixels_per_day: 30.0,
    })
    .expect("interpreter")
}

fn release() -> ScheduledItem {
    ScheduledItem::new("rel-1", at(2025, 1, 10), at(2025, 1, 15))
}

#[test]
fn move_commit_shifts_both_dates() {
    let mut drag = interpreter();
    drag.begin(&release(), DragMode::Move, 100.0).expect("begin");
    assert_eq!(drag.mode(), InteractionMode::Moving);

    let outcome = drag.end(190.0).expect("end");

    assert_eq!(
        outcome,
        DragOutcome::Committed(ScheduleUpdate {
            id: "rel-1".to_owned(),
            start_date: at(2025, 1, 13),
            end_date: at(2025, 1, 18),
        })
    );
    assert_eq!(drag.mode(), InteractionMode::Idle);
}

#[test]
fn move_below_half_a_day_is_discarded() {
    let mut drag = interpreter();
    drag.begin(&release(), DragMode::Move, 100.0).expect("begin");

    let outcome = drag.end(110.0).expect("end");

    assert!(matches!(outcome, DragOutcome::Discarded { day_delta: 0, .. }));
}

#[test]
fn day_delta_rounds_half_away_from_zero() {
    let drag = interpreter();

    assert_eq!(drag.day_delta_for(45.0).expect("forward"), 2);
    assert_eq!(drag.day_delta_for(-45.0).expect("backward"), -2);
    assert_eq!(drag.day_delta_for(44.0).expect("just under"), 1);
}

#[test]
fn resize_only_moves_end_date() {
    let mut drag = interpreter();
    drag.begin(&release(), DragMode::Resize, 0.0).expect("begin");
    assert_eq!(drag.mode(), InteractionMode::Resizing);

    let outcome = drag.end(60.0).expect("end");

    let update = outcome.update().expect("committed");
    assert_eq!(update.start_date, at(2025, 1, 10));
    assert_eq!(update.end_date, at(2025, 1, 17));
}

#[test]
fn resize_past_start_is_rejected_with_original_dates() {
    let mut drag = interpreter();
    let item = release();
    assert_eq!(item.duration_days(), 5);
    drag.begin(&item, DragMode::Resize, 500.0).expect("begin");

    let outcome = drag.end(500.0 - 100.0 * 30.0).expect("end");

    assert_eq!(
        outcome,
        DragOutcome::Discarded {
            id: "rel-1".to_owned(),
            start_date: item.start_date,
            end_date: item.end_date,
            day_delta: -100,
        }
    );
}

#[test]
fn resize_onto_start_date_is_rejected() {
    let mut drag = interpreter();
    drag.begin(&release(), DragMode::Resize, 0.0).expect("begin");

    let outcome = drag.end(-150.0).expect("end");

    assert!(!outcome.is_committed());
}

#[test]
fn preview_reports_without_committing() {
    let mut drag = interpreter();
    drag.begin(&release(), DragMode::Resize, 0.0).expect("begin");

    let valid = drag.preview(30.0).expect("preview").expect("active");
    assert!(valid.valid);
    assert_eq!(valid.end_date, at(2025, 1, 16));

    let invalid = drag.preview(-300.0).expect("preview").expect("active");
    assert!(!invalid.valid);
    assert_eq!(invalid.day_delta, -10);

    assert_eq!(drag.mode(), InteractionMode::Resizing);
    assert_eq!(drag.session().map(|s| s.origin_pointer_x), Some(0.0));
}

#[test]
fn preview_while_idle_is_none() {
    let drag = interpreter();
    assert_eq!(drag.preview(10.0).expect("preview"), None);
}

#[test]
fn cancel_drops_session_without_commit() {
    let mut drag = interpreter();
    drag.begin(&release(), DragMode::Move, 0.0).expect("begin");
    drag.preview(300.0).expect("preview");

    assert!(drag.cancel());
    assert!(!drag.cancel());
    assert_eq!(drag.mode(), InteractionMode::Idle);
    assert_eq!(drag.end(300.0).expect("end"), DragOutcome::NoSession);
}

#[test]
fn new_session_replaces_stale_one() {
    let mut drag = interpreter();
    let other = ScheduledItem::new("rel-2", at(2025, 2, 1), at(2025, 2, 3));
    drag.begin(&release(), DragMode::Move, 0.0).expect("begin first");
    drag.begin(&other, DragMode::Resize, 40.0).expect("begin second");

    let session = drag.session().expect("session");
    assert_eq!(session.item_id, "rel-2");
    assert_eq!(session.mode, DragMode::Resize);
    assert_eq!(session.origin_pointer_x, 40.0);
}

#[test]
fn non_finite_pointer_is_rejected_and_leaves_idle_state() {
    let mut drag = interpreter();
    assert!(matches!(
        drag.begin(&release(), DragMode::Move, f64::NAN),
        Err(TimelineError::InvalidInput(_))
    ));

    drag.begin(&release(), DragMode::Move, 0.0).expect("begin");
    assert!(matches!(
        drag.end(f64::INFINITY),
        Err(TimelineError::InvalidInput(_))
    ));
    assert_eq!(drag.mode(), InteractionMode::Idle);
}

#[test]
fn move_past_calendar_limit_reports_overflow() {
    let mut drag = interpreter();
    let end = DateTime::<Utc>::MAX_UTC;
    let item = ScheduledItem::new("edge", end - TimeDelta::days(10), end);
    drag.begin(&item, DragMode::Move, 0.0).expect("begin");

    assert!(matches!(
        drag.end(30.0),
        Err(TimelineError::DateOverflow { .. })
    ));
    assert_eq!(drag.mode(), InteractionMode::Idle);
}

#[test]
fn invalid_sensitivity_is_rejected() {
    for pixels_per_day in [0.0, -3.0, f64::NAN] {
        assert!(matches!(
            DragInterpreter::new(DragConfig { pixels_per_day }),
            Err(TimelineError::InvalidConfig(_))
        ));
    }
}

#[test]
fn move_round_trip_restores_dates() {
    let mut drag = interpreter();
    let original = release();

    drag.begin(&original, DragMode::Move, 0.0).expect("begin");
    let forward = drag.end(7.0 * 30.0).expect("forward");
    let update = forward.update().expect("committed").clone();
    let moved = ScheduledItem::new(update.id, update.start_date, update.end_date);

    drag.begin(&moved, DragMode::Move, 500.0).expect("begin back");
    let back = drag.end(500.0 - 7.0 * 30.0).expect("back");
    let restored = back.update().expect("committed");

    assert_eq!(restored.start_date, original.start_date);
    assert_eq!(restored.end_date, original.end_date);
}

#[test]
fn controller_delivers_commits_to_sink() {
    let mut controller =
        DragController::new(DragConfig::default(), RecordingSink::default()).expect("controller");
    controller.arm(release(), DragMode::Move);

    controller.on_session_start(10.0).expect("start");
    let preview = controller.on_session_move(70.0).expect("move").expect("preview");
    assert_eq!(preview.day_delta, 2);
    let report = controller.on_session_end(70.0).expect("end");

    assert_eq!(report.commit_status, Some(CommitStatus::Accepted));
    assert_eq!(controller.sink().updates().len(), 1);
    assert_eq!(controller.sink().updates()[0].start_date, at(2025, 1, 12));
    assert!(controller.target().is_none());
}

#[test]
fn controller_surfaces_sink_rejection() {
    let mut calls = 0;
    let sink = |_: &ScheduleUpdate| {
        calls += 1;
        CommitStatus::Rejected
    };
    let mut controller = DragController::new(DragConfig::default(), sink).expect("controller");
    controller.arm(release(), DragMode::Resize);

    controller.on_session_start(0.0).expect("start");
    let report = controller.on_session_end(90.0).expect("end");

    assert_eq!(report.commit_status, Some(CommitStatus::Rejected));
    assert!(report.outcome.is_committed());
    drop(controller);
    assert_eq!(calls, 1);
}

#[test]
fn controller_skips_sink_for_discarded_gestures() {
    let mut controller =
        DragController::new(DragConfig::default(), RecordingSink::default()).expect("controller");
    controller.arm(release(), DragMode::Resize);

    controller.on_session_start(0.0).expect("start");
    let report = controller.on_session_end(-3_000.0).expect("end");

    assert_eq!(report.commit_status, None);
    assert!(controller.into_sink().updates().is_empty());
}

#[test]
fn controller_requires_armed_target() {
    let mut controller =
        DragController::new(DragConfig::default(), RecordingSink::default()).expect("controller");

    assert!(matches!(
        controller.on_session_start(0.0),
        Err(TimelineError::InvalidInput(_))
    ));
}

#[test]
fn controller_cancel_resets_state() {
    let mut controller =
        DragController::new(DragConfig::default(), RecordingSink::default()).expect("controller");
    controller.arm(release(), DragMode::Move);
    controller.on_session_start(0.0).expect("start");

    controller.on_session_cancel();

    assert_eq!(controller.interpreter().mode(), InteractionMode::Idle);
    assert!(controller.target().is_none());
    let report = controller.on_session_end(300.0).expect("end");
    assert_eq!(report.outcome, DragOutcome::NoSession);
}
