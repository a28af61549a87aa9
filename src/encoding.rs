//! 로그 스케일 슬라이더 위치를 서비스 질의 파라미터와 표시 라벨로 변환한다.
//! 질의에 보내는 값과 사용자에게 보여주는 값이 항상 같도록
//! 반올림 규칙을 이 모듈 한 곳에만 둔다.

/// 유성 수/ECA 슬라이더 범위 (10^x, 약 0.45 ~ 1000).
pub const COUNT_SLIDER_MIN: f64 = -0.35;
pub const COUNT_SLIDER_MAX: f64 = 3.0;

/// 구간 길이 슬라이더 범위 (10^x 시간, 약 1.2분 ~ 100일).
pub const DURATION_SLIDER_MIN: f64 = -1.7;
pub const DURATION_SLIDER_MAX: f64 = 3.38;

/// 유성 수/ECA 슬라이더 초기 위치 (= 20).
pub fn default_count_position() -> f64 {
    20f64.log10()
}

/// 구간 길이 슬라이더 초기 위치 (= 24시간).
pub fn default_duration_position() -> f64 {
    24f64.log10()
}

/// 구간당 최소 유성 수: round(10^pos).
pub fn binned_meteors(position: f64) -> u64 {
    10f64.powf(position).round() as u64
}

/// 구간당 최소 ECA: round(10^pos). 질의에는 이 값을 그대로 보낸다.
pub fn binned_eca(position: f64) -> u64 {
    10f64.powf(position).round() as u64
}

/// ECA 라벨. 서비스 단위는 1000 km²·h이므로 표시할 때만 1000을 곱한다.
pub fn eca_label(position: f64) -> String {
    format!("{} km²·h", binned_eca(position) * 1000)
}

/// 구간 길이 반올림 계층. 경계 비교는 모두 반올림 전의 시간 값으로 한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DurationTier {
    /// < 1.01 h: 분 단위(1/60시간)로 반올림
    Minutes,
    /// < 12 h: 소수 첫째 자리로 반올림
    TenthHours,
    /// < 24 h: 정수 시간으로 반올림 (24시간 자체는 엄격한 `<`라 여기 속하지 않음에 유의,
    /// 단 10^log10(24)는 부동소수점상 24보다 약간 작아 이 계층에 떨어진다)
    WholeHours,
    /// 그 외: 24시간 배수로 반올림, 일 단위 표시
    Days,
}

fn tier(hours: f64) -> DurationTier {
    if hours < 1.01 {
        DurationTier::Minutes
    } else if hours < 12.0 {
        DurationTier::TenthHours
    } else if hours < 24.0 {
        DurationTier::WholeHours
    } else {
        DurationTier::Days
    }
}

/// 슬라이더 위치를 계층 반올림된 시간 값으로 변환한다.
/// 질의 파라미터와 라벨 모두 이 값에서 나온다.
pub fn duration_hours(position: f64) -> f64 {
    let hours = 10f64.powf(position);
    match tier(hours) {
        DurationTier::Minutes => (hours * 60.0).round() / 60.0,
        DurationTier::TenthHours => (hours * 10.0).round() / 10.0,
        DurationTier::WholeHours => hours.round(),
        DurationTier::Days => (hours / 24.0).round() * 24.0,
    }
}

/// 질의 URL에 넣을 구간 길이 문자열.
pub fn duration_param(position: f64) -> String {
    let hours = 10f64.powf(position);
    match tier(hours) {
        DurationTier::Minutes => format!("{}", (hours * 60.0).round() / 60.0),
        DurationTier::TenthHours => format!("{:.1}", hours),
        DurationTier::WholeHours => format!("{:.0}", hours),
        DurationTier::Days => format!("{}", (hours / 24.0).round() * 24.0),
    }
}

/// 사용자에게 보여줄 구간 길이 라벨.
pub fn format_duration(position: f64) -> String {
    let hours = 10f64.powf(position);
    match tier(hours) {
        DurationTier::Minutes => format!("{} mins", (hours * 60.0).round() as i64),
        DurationTier::TenthHours => format!("{:.1} hours", hours),
        DurationTier::WholeHours => format!("{:.0} hours", hours),
        DurationTier::Days => format!("{} days", (hours / 24.0).round() as i64),
    }
}
