/// IMO 작업 목록 기반 유성우 달력 테이블과 기본값 조회를 제공한다.
/// 활동 기간은 연도 없는 월-일로 저장하며 매년 재사용된다.
use chrono::{Datelike, Months, NaiveDate};

/// 연도 없는 달력 날짜(월-일). 활동 기간이 연말을 넘을 수 있으므로
/// 실제 날짜로 바꿀 때는 기준 날짜와의 순서를 보고 연도를 정한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    /// 주어진 연도의 실제 날짜로 변환한다.
    pub fn resolve(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }

    /// `start` 이후(또는 같은 날)의 가장 가까운 발생일로 변환한다.
    /// 연말을 넘는 활동 기간을 해석할 때 사용한다.
    pub fn resolve_after(&self, start: MonthDay, year: i32) -> Option<NaiveDate> {
        if *self < start {
            self.resolve(year + 1)
        } else {
            self.resolve(year)
        }
    }
}

/// 유성우 달력 항목. 시작 시 한 번 로드되고 런타임에 변경되지 않는다.
#[derive(Debug)]
pub struct ShowerRecord {
    /// IMO 3문자 코드 (카탈로그 내 유일)
    pub code: &'static str,
    /// 모집단 지수 r (폼의 popindex 기본값)
    pub pop_index: f64,
    pub begin: MonthDay,
    pub end: MonthDay,
    pub peak: MonthDay,
    pub name: &'static str,
}

/// 카탈로그에 없는 두 센티널 코드. 고정된 연간 활동 기간이 없어
/// 선택 시점의 달을 기준으로 기간을 만든다.
pub const SENTINEL_CODES: [&str; 2] = ["SPO", "ANT"];

/// 센티널 선택 시 적용되는 popindex 기본값.
pub const SENTINEL_POP_INDEX: f64 = 3.0;

pub fn is_sentinel(code: &str) -> bool {
    SENTINEL_CODES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(code))
}

pub fn showers() -> &'static [ShowerRecord] {
    SHOWERS
}

pub fn find_shower(code: &str) -> Option<&'static ShowerRecord> {
    SHOWERS.iter().find(|s| s.code.eq_ignore_ascii_case(code))
}

/// 유성우 선택 시 폼에 채울 기본값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowerDefaults {
    pub begin: NaiveDate,
    pub end: NaiveDate,
    pub pop_index: f64,
}

/// 코드와 오늘 날짜로 폼 기본값을 계산한다.
///
/// - 센티널(SPO/ANT): 이번 달 1일부터 다다음 달 1일까지, popindex 3.0.
///   12월에 선택하면 종료일은 다음 해로 정규화된다
///   ("이번 달 나머지 + 다음 달 전체"라는 의도는 그대로다).
/// - 카탈로그 코드: 올해 기준 활동 기간(연말을 넘으면 종료일은 다음 해)과
///   테이블의 popindex.
/// - 모르는 코드: None. 호출자는 기존 필드 값을 그대로 둔다.
pub fn shower_defaults(code: &str, today: NaiveDate) -> Option<ShowerDefaults> {
    if is_sentinel(code) {
        let begin = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)?;
        let end = begin.checked_add_months(Months::new(2))?;
        return Some(ShowerDefaults {
            begin,
            end,
            pop_index: SENTINEL_POP_INDEX,
        });
    }
    let record = find_shower(code)?;
    let (begin, end) = active_window(record, today.year())?;
    Some(ShowerDefaults {
        begin,
        end,
        pop_index: record.pop_index,
    })
}

/// 주어진 연도에 시작하는 활동 기간을 실제 날짜 구간으로 변환한다.
pub fn active_window(record: &ShowerRecord, year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let begin = record.begin.resolve(year)?;
    let end = record.end.resolve_after(record.begin, year)?;
    Some((begin, end))
}

/// 주어진 연도에 시작하는 활동 기간 내의 극대일.
pub fn peak_date(record: &ShowerRecord, year: i32) -> Option<NaiveDate> {
    record.peak.resolve_after(record.begin, year)
}

const SHOWERS: &[ShowerRecord] = &[
    sh("QUA", 2.1, md(1, 1), md(1, 5), md(1, 3), "Quadrantids"),
    sh("ACE", 2.0, md(1, 28), md(2, 21), md(2, 7), "alpha-Centaurids"),
    sh("DLE", 3.0, md(2, 15), md(3, 10), md(2, 24), "delta-Leonids"),
    sh("GNO", 2.4, md(2, 25), md(3, 22), md(3, 13), "gamma-Normids"),
    sh("LYR", 2.1, md(4, 16), md(4, 25), md(4, 22), "Lyrids"),
    sh("PPU", 2.0, md(4, 15), md(4, 28), md(4, 24), "pi-Puppids"),
    sh("ETA", 2.4, md(4, 19), md(5, 28), md(5, 5), "eta-Aquarids"),
    sh("ELY", 3.0, md(5, 3), md(5, 12), md(5, 9), "eta-Lyrids"),
    sh("JBO", 2.2, md(6, 22), md(7, 2), md(6, 27), "June-Bootids"),
    sh("PAU", 3.2, md(7, 15), md(8, 10), md(7, 28), "Piscis-Austrinids"),
    sh("SDA", 3.2, md(7, 12), md(8, 19), md(7, 28), "S-delta-Aquarids"),
    sh("CAP", 2.5, md(7, 3), md(8, 15), md(7, 30), "alpha-Capricornids"),
    sh("PER", 2.2, md(7, 17), md(8, 24), md(8, 12), "Perseids"),
    sh("KCG", 3.0, md(8, 3), md(8, 25), md(8, 17), "kappa-Cygnids"),
    sh("AUR", 2.5, md(8, 25), md(9, 8), md(9, 1), "alpha-Aurigids"),
    sh("SPE", 3.0, md(9, 5), md(9, 17), md(9, 9), "September-Perseids"),
    sh("DAU", 3.0, md(9, 18), md(10, 10), md(10, 4), "delta-Aurigids"),
    sh("OCA", 3.0, md(10, 5), md(10, 7), md(10, 6), "Oct-Camelopardalids"),
    sh("GIA", 2.6, md(10, 6), md(10, 10), md(10, 8), "Draconids"),
    sh("TUM", 3.0, md(10, 12), md(10, 18), md(10, 16), "tau-Ursa-Majorids"),
    sh("EGE", 3.0, md(10, 13), md(10, 27), md(10, 18), "epsilon-Geminids"),
    sh("ORI", 2.5, md(10, 2), md(11, 7), md(10, 21), "Orionids"),
    sh("LMI", 3.0, md(10, 19), md(10, 27), md(10, 24), "Leo-Minorids"),
    sh("STA", 2.3, md(9, 25), md(11, 25), md(10, 10), "S-Taurids"),
    sh("NTA", 2.3, md(9, 25), md(11, 25), md(11, 12), "N-Taurids"),
    sh("LEO", 2.5, md(11, 10), md(11, 23), md(11, 17), "Leonids"),
    sh("AMO", 2.4, md(11, 15), md(11, 25), md(11, 21), "alpha-Monocerotids"),
    sh("PHO", 2.8, md(11, 28), md(12, 9), md(12, 6), "December-Phoenicids"),
    sh("PUP", 2.9, md(12, 1), md(12, 15), md(12, 7), "Puppid-Velids"),
    sh("MON", 3.0, md(11, 27), md(12, 17), md(12, 9), "Monocerotids"),
    sh("HYD", 3.0, md(12, 3), md(12, 15), md(12, 12), "sigma-Hydrids"),
    sh("GEM", 2.6, md(12, 7), md(12, 17), md(12, 14), "Geminids"),
    sh("COM", 3.0, md(12, 12), md(12, 31), md(12, 19), "Coma-Berenicids"),
    sh("URS", 3.0, md(12, 17), md(12, 26), md(12, 22), "Ursids"),
];

const fn md(month: u32, day: u32) -> MonthDay {
    MonthDay::new(month, day)
}

const fn sh(
    code: &'static str,
    pop_index: f64,
    begin: MonthDay,
    end: MonthDay,
    peak: MonthDay,
    name: &'static str,
) -> ShowerRecord {
    ShowerRecord {
        code,
        pop_index,
        begin,
        end,
        peak,
        name,
    }
}

// NOTE:
// - Codes, dates and r values follow the MetRec FluxViewer working list.
// - Activity windows are nominal; the remote service accepts any interval,
//   so these only pre-fill the form.
