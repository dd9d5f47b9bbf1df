use chrono::{TimeZone, Utc};
use timeline_rs::core::{
    DragConfig, Granularity, GranularityLimits, LayoutConfig, ScheduledItem, compute_layout,
};
use timeline_rs::{TimelineConfig, TimelineError};

#[test]
fn defaults_carry_documented_limits() {
    let layout = LayoutConfig::default();

    assert_eq!(layout.min_width_percent(Granularity::Quarter), 8.0);
    assert_eq!(layout.min_width_percent(Granularity::Month), 6.0);
    assert_eq!(layout.min_width_percent(Granularity::Week), 4.0);
    assert_eq!(layout.limits(Granularity::Quarter).max_periods, 16);
    assert_eq!(layout.limits(Granularity::Month).max_periods, 24);
    assert_eq!(layout.limits(Granularity::Week).max_periods, 52);
    assert_eq!(layout.limits(Granularity::Week).min_periods, 8);
    assert_eq!(layout.today_max_offset_percent, 98.0);
    assert_eq!(DragConfig::default().pixels_per_day, 30.0);
    assert!(layout.validate().is_ok());
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let config = TimelineConfig::from_json_str(r#"{ "granularity": "Week" }"#).expect("config");

    assert_eq!(config.granularity, Granularity::Week);
    assert_eq!(config.layout, LayoutConfig::default());
    assert_eq!(config.drag, DragConfig::default());
}

#[test]
fn json_round_trip_preserves_overrides() {
    let config = TimelineConfig::new(Granularity::Quarter)
        .with_pixels_per_day(3.0)
        .with_min_width_percent(Granularity::Quarter, 10.0);

    let json = config.to_json_pretty().expect("serialize");
    let restored = TimelineConfig::from_json_str(&json).expect("parse");

    assert_eq!(restored, config);
    assert_eq!(restored.layout.min_width_percent(Granularity::Quarter), 10.0);
}

#[test]
fn malformed_json_is_invalid_data() {
    assert!(matches!(
        TimelineConfig::from_json_str("{ not json"),
        Err(TimelineError::InvalidData(_))
    ));
    assert!(matches!(
        TimelineConfig::from_json_str(r#"{ "granularity": "Day" }"#),
        Err(TimelineError::InvalidData(_))
    ));
}

#[test]
fn contradictory_limits_are_rejected() {
    let floor_above_cap = GranularityLimits {
        min_width_percent: 4.0,
        max_periods: 4,
        min_periods: 8,
        empty_periods: 2,
    };
    let config = TimelineConfig::default().with_limits(Granularity::Week, floor_above_cap);
    assert!(matches!(config.validate(), Err(TimelineError::InvalidConfig(_))));

    let zero_cap = GranularityLimits {
        max_periods: 0,
        min_periods: 0,
        ..LayoutConfig::default().month
    };
    let config = TimelineConfig::default().with_limits(Granularity::Month, zero_cap);
    assert!(matches!(config.validate(), Err(TimelineError::InvalidConfig(_))));
}

#[test]
fn non_positive_widths_and_ceilings_are_rejected() {
    let config = TimelineConfig::default().with_min_width_percent(Granularity::Month, 0.0);
    assert!(config.validate().is_err());

    let config = TimelineConfig::default().with_min_width_percent(Granularity::Week, f64::NAN);
    assert!(config.validate().is_err());

    let layout = LayoutConfig {
        today_max_offset_percent: 120.0,
        ..LayoutConfig::default()
    };
    assert!(matches!(layout.validate(), Err(TimelineError::InvalidConfig(_))));
}

#[test]
fn granularity_parses_view_mode_spellings() {
    assert_eq!("Quarters".parse::<Granularity>().expect("q"), Granularity::Quarter);
    assert_eq!("month".parse::<Granularity>().expect("m"), Granularity::Month);
    assert_eq!(" WEEKS ".parse::<Granularity>().expect("w"), Granularity::Week);
    assert!(matches!(
        "Years".parse::<Granularity>(),
        Err(TimelineError::InvalidGranularity(_))
    ));
    assert_eq!(Granularity::Week.to_string(), "Weeks");
}

#[test]
fn layout_pass_rejects_unvalidated_today_ceiling() {
    let start = Utc
        .with_ymd_and_hms(2025, 1, 15, 0, 0, 0)
        .single()
        .expect("valid instant");
    let end = Utc
        .with_ymd_and_hms(2025, 3, 20, 0, 0, 0)
        .single()
        .expect("valid instant");
    let items = vec![ScheduledItem::new("r-1", start, end)];

    for ceiling in [f64::NAN, -5.0] {
        let config = LayoutConfig {
            today_max_offset_percent: ceiling,
            ..LayoutConfig::default()
        };

        let result = compute_layout(&items, Granularity::Month, start, &config);

        assert!(matches!(result, Err(TimelineError::InvalidConfig(_))));
    }
}

#[test]
fn layout_pass_rejects_unvalidated_width_floor() {
    let now = Utc
        .with_ymd_and_hms(2025, 2, 1, 0, 0, 0)
        .single()
        .expect("valid instant");
    let config = LayoutConfig::default().with_limits(
        Granularity::Week,
        GranularityLimits {
            min_width_percent: f64::NAN,
            ..LayoutConfig::default().limits(Granularity::Week)
        },
    );

    let result = compute_layout::<ScheduledItem>(&[], Granularity::Week, now, &config);

    assert!(matches!(result, Err(TimelineError::InvalidConfig(_))));
}
