use crate::config::{Config, ConfigError};
use crate::fetch::FetchError;
use crate::i18n::{self, Translator};
use crate::query::QueryError;
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 질의 조립/검증 오류
    Query(QueryError),
    /// 프래그먼트 요청 오류
    Fetch(FetchError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Query(e) => write!(f, "질의 오류: {e}"),
            AppError::Fetch(e) => write!(f, "요청 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<QueryError> for AppError {
    fn from(value: QueryError) -> Self {
        AppError::Query(value)
    }
}

impl From<FetchError> for AppError {
    fn from(value: FetchError) -> Self {
        AppError::Fetch(value)
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::FluxQuery => ui_cli::handle_flux_query(tr, config)?,
            MenuChoice::Catalog => ui_cli::handle_catalog(tr)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
            }
            MenuChoice::Exit => {
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
