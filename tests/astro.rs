use chrono::{NaiveDate, NaiveDateTime};

use meteor_flux_viewer::astro::{julian_day, parse_timestamp, solar_longitude, zhr_from_flux};

fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, s))
        .expect("valid timestamp")
}

#[test]
fn julian_day_epoch_j2000() {
    assert_eq!(julian_day(ts(2000, 1, 1, 12, 0, 0)), 2451545.0);
}

#[test]
fn julian_day_handles_january() {
    // 1월/2월은 전년도 13월/14월로 취급하는 분기를 지난다.
    assert_eq!(julian_day(ts(1999, 1, 1, 0, 0, 0)), 2451179.5);
}

#[test]
fn julian_day_fractional_time() {
    let jd = julian_day(ts(1987, 6, 19, 12, 0, 0));
    assert!((jd - 2446966.0).abs() < 1e-9, "jd={jd}");
}

#[test]
fn solar_longitude_near_zero_at_march_equinox() {
    let l = solar_longitude(ts(2000, 3, 20, 7, 35, 0));
    assert!(l < 0.1 || l > 359.9, "sollon={l}");
}

#[test]
fn solar_longitude_near_peak_of_perseids() {
    // 페르세우스 극대는 태양황경 약 140도.
    let l = solar_longitude(ts(2011, 8, 13, 6, 0, 0));
    assert!((l - 140.0).abs() < 1.0, "sollon={l}");
}

#[test]
fn zhr_conversion_matches_reference_formula() {
    // r=2.0: ZHR = (flux/1000 * 37200) / ((13.1*2-16.45) * 0.7^0.748)
    let zhr = zhr_from_flux(10.0, 2.0);
    assert!((zhr - 49.8).abs() < 0.5, "zhr={zhr}");
    // 플럭스에 선형.
    assert!((zhr_from_flux(20.0, 2.0) - 2.0 * zhr).abs() < 1e-9);
}

#[test]
fn timestamp_formats_accepted() {
    let expected = ts(2011, 4, 21, 18, 0, 0);
    assert_eq!(parse_timestamp("2011-04-21 18:00:00"), Some(expected));
    assert_eq!(parse_timestamp("2011-04-21T18:00:00"), Some(expected));
    assert_eq!(parse_timestamp(" 2011-04-21 18:00 "), Some(expected));
    assert_eq!(parse_timestamp("2011-04-21 18"), Some(expected));
    assert_eq!(parse_timestamp("2011-04-21"), Some(ts(2011, 4, 21, 0, 0, 0)));
    assert_eq!(parse_timestamp("20110421"), Some(ts(2011, 4, 21, 0, 0, 0)));
    assert_eq!(parse_timestamp("21/04/2011"), None);
    assert_eq!(parse_timestamp(""), None);
}
