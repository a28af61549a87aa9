//! 폼 상태를 원격 플럭스 서비스 질의 URL로 조립한다.

use chrono::NaiveDateTime;
use url::Url;

/// 기본 서비스 엔드포인트. config.toml로 바꿀 수 있다.
pub const DEFAULT_ENDPOINT: &str = "http://vmo.imo.net/flx/getfluxpage.php";

/// 서비스가 허용하는 최대 질의 구간(일). 서버 측 제한과 같은 값이다.
pub const MAX_SPAN_DAYS: f64 = 40.0;

/// 서비스 출력 모드.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// 그래프만
    Graph,
    /// 그래프 + 플럭스 표 + 관측소 표
    Full,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Graph => "graph",
            OutputMode::Full => "full",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "graph" => Some(OutputMode::Graph),
            "full" => Some(OutputMode::Full),
            _ => None,
        }
    }
}

/// 질의 조립 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum QueryError {
    /// 종료 시각이 시작 시각보다 빠르거나 같음
    EmptyInterval,
    /// 요청 구간이 너무 긺 (일 단위 길이)
    SpanTooLong(f64),
    /// 엔드포인트 URL이 올바르지 않음
    Endpoint(url::ParseError),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::EmptyInterval => write!(f, "종료 시각이 시작 시각 이후여야 합니다"),
            QueryError::SpanTooLong(days) => write!(
                f,
                "요청 구간이 너무 깁니다: {days:.1}일 (최대 {MAX_SPAN_DAYS:.0}일)"
            ),
            QueryError::Endpoint(e) => write!(f, "엔드포인트 URL 오류: {e}"),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<url::ParseError> for QueryError {
    fn from(value: url::ParseError) -> Self {
        QueryError::Endpoint(value)
    }
}

/// 한 번의 프래그먼트 요청에 들어가는 파라미터 묶음.
#[derive(Debug, Clone)]
pub struct FluxQuery {
    pub shower: String,
    pub begin: NaiveDateTime,
    pub end: NaiveDateTime,
    /// 구간당 최소 ECA [1000 km²·h]
    pub min_eca: u64,
    /// 구간당 최소 유성 수
    pub min_meteors: u64,
    /// 최소 구간 길이 [h] (계층 반올림 후 값)
    pub min_interval: String,
    /// 최대 구간 길이 [h] (계층 반올림 후 값)
    pub max_interval: String,
    pub pop_index: f64,
    pub gamma: f64,
    /// 관측소 필터 (빈 문자열이면 전체)
    pub stations: String,
    pub output: OutputMode,
    /// Y축 상한. None이면 파라미터 자체를 생략한다.
    pub ymax: Option<f64>,
}

impl FluxQuery {
    /// 시간 구간을 검증한다. 구간 제한은 서버와 동일하게 40일.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.end <= self.begin {
            return Err(QueryError::EmptyInterval);
        }
        let days = (self.end - self.begin).num_seconds() as f64 / 86400.0;
        if days > MAX_SPAN_DAYS {
            return Err(QueryError::SpanTooLong(days));
        }
        Ok(())
    }

    /// 질의 키-값 쌍을 서비스가 기대하는 순서대로 만든다.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("shower", self.shower.clone()),
            ("begin_iso", format_timestamp(self.begin)),
            ("end_iso", format_timestamp(self.end)),
            ("min_eca", self.min_eca.to_string()),
            ("min_meteors", self.min_meteors.to_string()),
            ("min_interval", self.min_interval.clone()),
            ("max_interval", self.max_interval.clone()),
            ("popindex", format_number(self.pop_index)),
            ("gamma", format_number(self.gamma)),
            ("stations", self.stations.clone()),
            ("output", self.output.as_str().to_string()),
        ];
        if let Some(ymax) = self.ymax {
            pairs.push(("ymax", format_number(ymax)));
        }
        pairs
    }

    /// 퍼센트 인코딩된 요청 URL을 만든다.
    pub fn to_url(&self, endpoint: &str) -> Result<Url, QueryError> {
        self.validate()?;
        let mut url = Url::parse(endpoint)?;
        url.query_pairs_mut().extend_pairs(self.params());
        Ok(url)
    }
}

impl Default for FluxQuery {
    /// 기본 비닝 파라미터 (1시간~24시간 구간, 20개 이상).
    fn default() -> Self {
        Self {
            shower: "SPO".into(),
            begin: NaiveDateTime::default(),
            end: NaiveDateTime::default(),
            min_eca: 0,
            min_meteors: 20,
            min_interval: "1".into(),
            max_interval: "24".into(),
            pop_index: 2.0,
            gamma: 1.5,
            stations: String::new(),
            output: OutputMode::Full,
            ymax: None,
        }
    }
}

/// 서비스가 받는 타임스탬프 형식.
pub fn format_timestamp(t: NaiveDateTime) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// 정수 값이면 소수점 없이, 아니면 최단 표기로 만든다.
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}
