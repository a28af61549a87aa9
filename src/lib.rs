//! 질의 조립/카탈로그 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 쓴다.

pub mod app;
pub mod astro;
pub mod catalog;
pub mod config;
pub mod encoding;
pub mod fetch;
pub mod i18n;
pub mod query;
pub mod ui_cli;
