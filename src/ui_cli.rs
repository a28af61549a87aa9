use std::io::{self, Write};

use chrono::{Datelike, Local, NaiveDateTime};

use crate::app::AppError;
use crate::astro;
use crate::catalog;
use crate::config::Config;
use crate::fetch;
use crate::i18n::{keys, Translator};
use crate::query::{format_number, format_timestamp, FluxQuery, OutputMode};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    FluxQuery,
    Catalog,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_FLUX_QUERY));
    println!("{}", tr.t(keys::MAIN_MENU_CATALOG));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::FluxQuery),
            "2" => return Ok(MenuChoice::Catalog),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 플럭스 질의 메뉴를 처리한다. 유성우를 고르면 카탈로그 기본값을
/// 프롬프트 기본값으로 제시하고, 완성된 질의 URL을 출력한 뒤
/// 원하면 프래그먼트를 바로 가져온다.
pub fn handle_flux_query(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::FLUX_HEADING));

    let shower = read_line(tr.t(keys::PROMPT_SHOWER))?.trim().to_uppercase();
    let today = Local::now().date_naive();
    let defaults = catalog::shower_defaults(&shower, today);
    if defaults.is_none() {
        println!("{}", tr.t(keys::UNKNOWN_SHOWER));
    }

    let (begin_default, end_default, popindex_default) = match defaults {
        Some(d) => (
            d.begin.and_hms_opt(0, 0, 0),
            d.end.and_hms_opt(0, 0, 0),
            d.pop_index,
        ),
        None => (None, None, 2.0),
    };

    let begin = read_timestamp(tr, tr.t(keys::PROMPT_BEGIN), begin_default)?;
    let end = read_timestamp(tr, tr.t(keys::PROMPT_END), end_default)?;
    let min_meteors = read_u64(tr, tr.t(keys::PROMPT_MIN_METEORS), 20)?;
    let min_eca = read_u64(tr, tr.t(keys::PROMPT_MIN_ECA), 0)?;
    let min_interval = read_f64(tr, tr.t(keys::PROMPT_MIN_INTERVAL), 1.0)?;
    let max_interval = read_f64(tr, tr.t(keys::PROMPT_MAX_INTERVAL), 24.0)?;
    let pop_index = read_f64(tr, tr.t(keys::PROMPT_POPINDEX), popindex_default)?;
    let gamma = read_f64(tr, tr.t(keys::PROMPT_GAMMA), cfg.query.gamma)?;
    let stations = read_default(tr.t(keys::PROMPT_STATIONS), &cfg.query.stations)?;
    let output = read_output(tr, cfg.output_mode())?;
    let ymax = read_optional_f64(tr, tr.t(keys::PROMPT_YMAX))?;

    let query = FluxQuery {
        shower,
        begin,
        end,
        min_eca,
        min_meteors,
        min_interval: format_number(min_interval),
        max_interval: format_number(max_interval),
        pop_index,
        gamma,
        stations,
        output,
        ymax,
    };
    let url = query.to_url(&cfg.endpoint)?;
    println!("{} {url}", tr.t(keys::RESULT_URL));

    let fetch_now = read_line(tr.t(keys::PROMPT_FETCH_NOW))?;
    if fetch_now.trim().eq_ignore_ascii_case("y") {
        println!("{}", tr.t(keys::FETCHING));
        let body = fetch::fetch_fragment(url.as_str())?;
        println!("{}", tr.t(keys::FRAGMENT_HEADING));
        println!("{body}");
    }
    Ok(())
}

/// 카탈로그를 표로 출력한다. 활동 기간은 올해 기준으로 풀고
/// 극대일의 태양황경(0시 UT)을 함께 보여준다.
pub fn handle_catalog(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::CATALOG_HEADING));
    println!("{}", tr.t(keys::CATALOG_COLUMNS));
    let year = Local::now().date_naive().year();
    for record in catalog::showers() {
        let window = catalog::active_window(record, year);
        let peak = catalog::peak_date(record, year);
        let (window_str, peak_str, sollon_str) = match (window, peak) {
            (Some((begin, end)), Some(peak)) => {
                let sollon = peak
                    .and_hms_opt(0, 0, 0)
                    .map(astro::solar_longitude)
                    .map(|l| format!("{l:8.1}°"))
                    .unwrap_or_default();
                (format!("{begin} ~ {end}"), peak.to_string(), sollon)
            }
            _ => ("-".into(), "-".into(), String::new()),
        };
        println!(
            "{:<5} {:<4} {:<27} {:<11} {:<11} {}",
            record.code, record.pop_index, window_str, peak_str, sollon_str, record.name
        );
    }
    println!("{}", tr.t(keys::CATALOG_SENTINEL_NOTE));
    Ok(())
}

/// 설정 메뉴를 처리한다. 엔터만 치면 기존 값을 유지한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_ENDPOINT), cfg.endpoint);

    let endpoint = read_line(tr.t(keys::SETTINGS_PROMPT_ENDPOINT))?;
    if !endpoint.trim().is_empty() {
        cfg.endpoint = endpoint.trim().to_string();
    }
    let stations = read_line(tr.t(keys::SETTINGS_PROMPT_STATIONS))?;
    if !stations.trim().is_empty() {
        cfg.query.stations = stations.trim().to_string();
    }
    let gamma = read_line(tr.t(keys::SETTINGS_PROMPT_GAMMA))?;
    if let Ok(g) = gamma.trim().parse::<f64>() {
        cfg.query.gamma = g;
    }
    let output = read_line(tr.t(keys::SETTINGS_PROMPT_OUTPUT))?;
    if let Some(mode) = OutputMode::parse(&output) {
        cfg.query.output = mode.as_str().into();
    }
    let language = read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
    if !language.trim().is_empty() {
        cfg.language = language.trim().to_lowercase();
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

/// 기본값이 있는 문자열 프롬프트. 엔터만 치면 기본값을 쓴다.
fn read_default(prompt: &str, default: &str) -> Result<String, AppError> {
    let shown = if default.is_empty() { "-" } else { default };
    let line = read_line(&format!("{prompt} [{shown}]: "))?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

fn read_u64(tr: &Translator, prompt: &str, default: u64) -> Result<u64, AppError> {
    loop {
        let line = read_line(&format!("{prompt} [{default}]: "))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(default);
        }
        match trimmed.parse::<u64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_f64(tr: &Translator, prompt: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let line = read_line(&format!("{prompt} [{default}]: "))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(default);
        }
        match trimmed.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_optional_f64(tr: &Translator, prompt: &str) -> Result<Option<f64>, AppError> {
    loop {
        let line = read_line(&format!("{prompt}: "))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_timestamp(
    tr: &Translator,
    prompt: &str,
    default: Option<NaiveDateTime>,
) -> Result<NaiveDateTime, AppError> {
    loop {
        let shown = default.map(format_timestamp).unwrap_or_else(|| "-".into());
        let line = read_line(&format!("{prompt} [{shown}]: "))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if let Some(d) = default {
                return Ok(d);
            }
        } else if let Some(t) = astro::parse_timestamp(trimmed) {
            return Ok(t);
        }
        println!("{}", tr.t(keys::ERROR_INVALID_TIMESTAMP));
    }
}

fn read_output(tr: &Translator, default: OutputMode) -> Result<OutputMode, AppError> {
    loop {
        let line = read_line(&format!(
            "{} [{}]: ",
            tr.t(keys::PROMPT_OUTPUT),
            default.as_str()
        ))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(default);
        }
        match OutputMode::parse(trimmed) {
            Some(mode) => return Ok(mode),
            None => println!("{}", tr.t(keys::ERROR_INVALID_OUTPUT)),
        }
    }
}
