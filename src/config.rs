use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::query::{self, OutputMode};

/// 새 질의 폼에 채울 기본 파라미터.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDefaults {
    /// 관측소 필터 (빈 문자열이면 전체)
    pub stations: String,
    /// 천정 보정 계수 gamma
    pub gamma: f64,
    /// 출력 모드 ("graph" 또는 "full")
    pub output: String,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            stations: String::new(),
            gamma: 1.5,
            output: OutputMode::Full.as_str().into(),
        }
    }
}

/// 애플리케이션 설정을 표현한다. 폼 상태는 저장하지 않는다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 플럭스 서비스 엔드포인트
    pub endpoint: String,
    /// UI 언어 코드 (auto/ko/en 등)
    pub language: String,
    /// TOML 언어팩 디렉터리 (없으면 내장 문자열)
    pub language_pack_dir: Option<String>,
    /// GUI 창 불투명도 (0.3~1.0)
    pub window_alpha: f32,
    pub query: QueryDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: query::DEFAULT_ENDPOINT.into(),
            language: "auto".into(),
            language_pack_dir: None,
            window_alpha: 1.0,
            query: QueryDefaults::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    let path = Path::new("config.toml");
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg)?;
        Ok(cfg)
    }
}

fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write("config.toml", content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_config(self)
    }

    /// 설정된 출력 모드. 값이 잘못돼 있으면 full로 폴백한다.
    pub fn output_mode(&self) -> OutputMode {
        OutputMode::parse(&self.query.output).unwrap_or(OutputMode::Full)
    }
}
