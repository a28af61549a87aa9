use meteor_flux_viewer::encoding::{
    binned_eca, binned_meteors, default_count_position, default_duration_position,
    duration_hours, duration_param, eca_label, format_duration,
};

#[test]
fn count_slider_defaults_to_twenty() {
    assert_eq!(binned_meteors(default_count_position()), 20);
}

#[test]
fn count_slider_endpoints() {
    assert_eq!(binned_meteors(0.0), 1);
    assert_eq!(binned_meteors(3.0), 1000);
}

#[test]
fn eca_label_scales_by_thousand() {
    assert_eq!(binned_eca(0.0), 1);
    assert_eq!(eca_label(0.0), "1000 km²·h");
    assert_eq!(eca_label(2.0), "100000 km²·h");
}

#[test]
fn minute_tier_rounds_to_whole_minutes() {
    // 10^0 = 1시간 → 분 계층.
    assert_eq!(format_duration(0.0), "60 mins");
    assert_eq!(duration_param(0.0), "1");
    assert!((duration_hours(0.0) - 1.0).abs() < 1e-12);
}

#[test]
fn tenth_hour_tier() {
    let pos = 2.5f64.log10();
    assert_eq!(duration_param(pos), "2.5");
    assert_eq!(format_duration(pos), "2.5 hours");
    assert!((duration_hours(pos) - 2.5).abs() < 1e-9);
}

#[test]
fn whole_hour_tier() {
    let pos = 13.4f64.log10();
    assert_eq!(duration_param(pos), "13");
    assert_eq!(format_duration(pos), "13 hours");
    assert_eq!(duration_hours(pos), 13.0);
}

#[test]
fn default_duration_lands_in_hour_tier() {
    // 10^log10(24)는 부동소수점상 24보다 약간 작아 시간 계층에 떨어진다.
    let pos = default_duration_position();
    assert_eq!(duration_param(pos), "24");
    assert_eq!(format_duration(pos), "24 hours");
}

#[test]
fn day_tier_rounds_to_day_multiples() {
    let pos = 49.0f64.log10();
    assert_eq!(duration_param(pos), "48");
    assert_eq!(format_duration(pos), "2 days");
    assert_eq!(duration_hours(pos), 48.0);
}

#[test]
fn param_and_label_agree_with_rounded_hours() {
    for pos in [-1.5, -0.5, 0.3, 0.8, 1.2, 1.5, 2.0, 3.0] {
        let hours = duration_hours(pos);
        let param: f64 = duration_param(pos).parse().expect("numeric param");
        assert!(
            (hours - param).abs() < 0.05,
            "pos={pos} hours={hours} param={param}"
        );
    }
}
