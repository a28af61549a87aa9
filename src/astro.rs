//! 유성 과학 관련 공통 계산: 율리우스일, 태양황경, ZHR 추정, 타임스탬프 파싱.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// 그레고리력 UT 시각을 율리우스일로 변환한다.
/// Jean Meeus, "Astronomical Algorithms" p.61의 알고리즘.
///
/// jd(2000-01-01 12:00:00 UT) = 2451545.0
pub fn julian_day(t: NaiveDateTime) -> f64 {
    let mut year = t.year() as f64;
    let mut month = t.month() as f64;
    let seconds = t.second() as f64 + t.nanosecond() as f64 / 1e9;
    let day = t.day() as f64
        + t.hour() as f64 / 24.0
        + t.minute() as f64 / 1440.0
        + seconds / 86400.0;

    // 이 알고리즘에서 1월/2월은 전년도의 13월/14월로 취급한다.
    if month <= 2.0 {
        month += 12.0;
        year -= 1.0;
    }

    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + b - 1524.5
}

// Meeus pp.205의 주기항 계수. 정확도 약 0.003도.
const A0: [f64; 28] = [
    334166.0, 3489.0, 350.0, 342.0, 314.0, 268.0, 234.0, 132.0, 127.0, 120.0, 99.0, 90.0, 86.0,
    78.0, 75.0, 51.0, 49.0, 36.0, 32.0, 28.0, 27.0, 24.0, 21.0, 21.0, 20.0, 16.0, 13.0, 13.0,
];
const B0: [f64; 28] = [
    4.669257, 4.6261, 2.744, 2.829, 3.628, 4.418, 6.135, 0.742, 2.037, 1.11, 5.233, 2.045, 3.508,
    1.179, 2.533, 4.58, 4.21, 2.92, 5.85, 1.90, 0.31, 0.34, 4.81, 1.87, 2.46, 0.83, 3.41, 1.08,
];
const C0: [f64; 28] = [
    6283.07585, 12566.1517, 5753.385, 3.523, 77713.771, 7860.419, 3930.210, 11506.77, 529.691,
    1577.344, 5884.927, 26.298, 398.149, 5223.694, 5507.553, 18849.23, 775.52, 0.07, 11790.63,
    796.30, 10977.08, 5486.78, 2544.31, 5573.14, 6069.78, 213.30, 2942.46, 20.78,
];
const A1: [f64; 3] = [20606.0, 430.0, 43.0];
const B1: [f64; 3] = [2.67823, 2.635, 1.59];

/// 태양황경을 도 단위로 계산한다. Meeus와 C. Steyaert(WGN)의 방법.
pub fn solar_longitude(t: NaiveDateTime) -> f64 {
    let julian = julian_day(t);
    let tm = (julian - 2451545.0) / 365250.0;
    let mut result = 4.8950627 + tm * (6283.0758500 - tm * 0.0000099);

    let mut s0 = 0.0;
    for n in 0..A0.len() {
        s0 += A0[n] * (B0[n] + C0[n] * tm).cos();
    }

    let mut s1 = 0.0;
    for n in 0..A1.len() {
        s1 += A1[n] * (B1[n] + C0[n] * tm).cos();
    }

    let s2 = 872.0 * (1.073 + C0[0] * tm).cos() + 29.0 * (0.44 + C0[1] * tm).cos();
    let s3 = 29.0 * (5.84 + C0[0] * tm).cos();

    result += (s0 + tm * (s1 + tm * (s2 + tm * s3))) * 1.0e-7;

    result = result.rem_euclid(2.0 * std::f64::consts::PI);
    result.to_degrees()
}

/// 플럭스(유성체 / 1000 km²·h)를 ZHR로 환산한다.
/// Koschack & Rendtel 1990b, Eqn. 41.
pub fn zhr_from_flux(flux: f64, pop_index: f64) -> f64 {
    let r = pop_index;
    let flux = flux / 1000.0;
    (flux * 37200.0) / ((13.1 * r - 16.45) * (r - 1.3).powf(0.748))
}

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// 사용자가 입력한 타임스탬프를 해석한다. 여러 포맷을 차례로 시도하고
/// 모두 실패하면 None.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(t);
        }
    }
    // "2011-04-21 18"처럼 시(時)까지만 있는 입력은 분을 붙여서 해석한다.
    if let Ok(t) = NaiveDateTime::parse_from_str(&format!("{s}:00"), "%Y-%m-%d %H:%M") {
        return Some(t);
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}
