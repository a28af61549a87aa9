use chrono::NaiveDate;

use meteor_flux_viewer::query::{format_number, FluxQuery, OutputMode, QueryError};

fn ts(y: i32, m: u32, d: u32, h: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, 0, 0))
        .expect("valid timestamp")
}

fn sample_query() -> FluxQuery {
    FluxQuery {
        shower: "LYR".into(),
        begin: ts(2011, 4, 21, 18),
        end: ts(2011, 4, 23, 12),
        min_eca: 2,
        min_meteors: 20,
        min_interval: "1".into(),
        max_interval: "24".into(),
        pop_index: 2.1,
        gamma: 1.5,
        stations: String::new(),
        output: OutputMode::Graph,
        ymax: None,
    }
}

#[test]
fn params_follow_service_order() {
    let q = sample_query();
    let keys: Vec<&str> = q.params().iter().map(|(k, _)| *k).collect();
    assert_eq!(
        keys,
        [
            "shower",
            "begin_iso",
            "end_iso",
            "min_eca",
            "min_meteors",
            "min_interval",
            "max_interval",
            "popindex",
            "gamma",
            "stations",
            "output",
        ]
    );
}

#[test]
fn params_carry_formatted_values() {
    let q = sample_query();
    let params = q.params();
    let get = |k: &str| {
        params
            .iter()
            .find(|(key, _)| *key == k)
            .map(|(_, v)| v.clone())
            .expect("param present")
    };
    assert_eq!(get("shower"), "LYR");
    assert_eq!(get("begin_iso"), "2011-04-21 18:00:00");
    assert_eq!(get("end_iso"), "2011-04-23 12:00:00");
    assert_eq!(get("popindex"), "2.1");
    assert_eq!(get("gamma"), "1.5");
    assert_eq!(get("output"), "graph");
}

#[test]
fn ymax_is_optional() {
    let mut q = sample_query();
    assert!(!q.params().iter().any(|(k, _)| *k == "ymax"));
    q.ymax = Some(50.0);
    let last = q.params().pop().expect("non-empty");
    assert_eq!(last, ("ymax", "50".to_string()));
}

#[test]
fn url_is_percent_encoded() {
    let mut q = sample_query();
    q.stations = "ORION1, ORION2".into();
    let url = q
        .to_url("http://vmo.imo.net/flx/getfluxpage.php")
        .expect("valid url");
    let s = url.as_str();
    assert!(s.starts_with("http://vmo.imo.net/flx/getfluxpage.php?shower=LYR"));
    assert!(s.contains("begin_iso=2011-04-21+18%3A00%3A00"), "{s}");
    assert!(s.contains("stations=ORION1%2C+ORION2"), "{s}");
}

#[test]
fn empty_interval_is_rejected() {
    let mut q = sample_query();
    q.end = q.begin;
    assert!(matches!(q.validate(), Err(QueryError::EmptyInterval)));
}

#[test]
fn span_limit_is_forty_days() {
    let mut q = sample_query();
    q.begin = ts(2011, 4, 1, 0);
    q.end = ts(2011, 5, 11, 0); // 40일: 허용
    assert!(q.validate().is_ok());
    q.end = ts(2011, 5, 12, 0); // 41일: 거부
    assert!(matches!(q.validate(), Err(QueryError::SpanTooLong(_))));
}

#[test]
fn bad_endpoint_is_reported() {
    let q = sample_query();
    assert!(matches!(
        q.to_url("not a url"),
        Err(QueryError::Endpoint(_))
    ));
}

#[test]
fn numbers_drop_trailing_zero() {
    assert_eq!(format_number(2.0), "2");
    assert_eq!(format_number(1.5), "1.5");
    assert_eq!(format_number(0.0), "0");
}

#[test]
fn output_mode_round_trip() {
    assert_eq!(OutputMode::parse("graph"), Some(OutputMode::Graph));
    assert_eq!(OutputMode::parse(" FULL "), Some(OutputMode::Full));
    assert_eq!(OutputMode::parse("table"), None);
    assert_eq!(OutputMode::Full.as_str(), "full");
}
