use chrono::NaiveDate;
use std::collections::HashSet;

use meteor_flux_viewer::catalog::{
    self, active_window, find_shower, peak_date, shower_defaults, MonthDay,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn codes_are_unique() {
    let mut seen = HashSet::new();
    for record in catalog::showers() {
        assert!(seen.insert(record.code), "duplicate code {}", record.code);
    }
}

#[test]
fn lookup_is_case_insensitive() {
    let rec = find_shower("per").expect("PER in catalog");
    assert_eq!(rec.code, "PER");
    assert_eq!(rec.name, "Perseids");
    assert!(find_shower("XXX").is_none());
}

#[test]
fn perseid_window_and_peak() {
    let rec = find_shower("PER").expect("PER in catalog");
    let (begin, end) = active_window(rec, 2026).expect("window");
    assert_eq!(begin, date(2026, 7, 17));
    assert_eq!(end, date(2026, 8, 24));
    assert_eq!(peak_date(rec, 2026), Some(date(2026, 8, 12)));
    assert_eq!(rec.pop_index, 2.2);
}

#[test]
fn month_day_wraps_into_next_year() {
    let end = MonthDay::new(1, 5);
    let begin = MonthDay::new(12, 28);
    assert_eq!(end.resolve_after(begin, 2026), Some(date(2027, 1, 5)));
    // 같은 연도 안에 있으면 그대로 올해.
    let end = MonthDay::new(12, 9);
    let begin = MonthDay::new(11, 28);
    assert_eq!(end.resolve_after(begin, 2026), Some(date(2026, 12, 9)));
}

#[test]
fn sentinel_defaults_cover_current_and_next_month() {
    let d = shower_defaults("SPO", date(2026, 8, 24)).expect("sentinel defaults");
    assert_eq!(d.begin, date(2026, 8, 1));
    assert_eq!(d.end, date(2026, 10, 1));
    assert_eq!(d.pop_index, 3.0);

    let d = shower_defaults("ant", date(2026, 8, 24)).expect("case-insensitive sentinel");
    assert_eq!(d.pop_index, 3.0);
}

#[test]
fn sentinel_defaults_normalize_across_year_end() {
    // 12월에 선택하면 종료일이 다음 해 2월 1일로 정규화된다.
    let d = shower_defaults("SPO", date(2026, 12, 15)).expect("sentinel defaults");
    assert_eq!(d.begin, date(2026, 12, 1));
    assert_eq!(d.end, date(2027, 2, 1));
}

#[test]
fn catalog_defaults_use_table_values() {
    let d = shower_defaults("GEM", date(2026, 8, 24)).expect("GEM defaults");
    assert_eq!(d.begin, date(2026, 12, 7));
    assert_eq!(d.end, date(2026, 12, 17));
    assert_eq!(d.pop_index, 2.6);
}

#[test]
fn unknown_code_gives_no_defaults() {
    assert!(shower_defaults("ZZZ", date(2026, 8, 24)).is_none());
}
