use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_FLUX_QUERY: &str = "main_menu.flux_query";
    pub const MAIN_MENU_CATALOG: &str = "main_menu.catalog";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const FLUX_HEADING: &str = "flux.heading";
    pub const PROMPT_SHOWER: &str = "flux.prompt_shower";
    pub const UNKNOWN_SHOWER: &str = "flux.unknown_shower";
    pub const PROMPT_BEGIN: &str = "flux.prompt_begin";
    pub const PROMPT_END: &str = "flux.prompt_end";
    pub const PROMPT_MIN_METEORS: &str = "flux.prompt_min_meteors";
    pub const PROMPT_MIN_ECA: &str = "flux.prompt_min_eca";
    pub const PROMPT_MIN_INTERVAL: &str = "flux.prompt_min_interval";
    pub const PROMPT_MAX_INTERVAL: &str = "flux.prompt_max_interval";
    pub const PROMPT_POPINDEX: &str = "flux.prompt_popindex";
    pub const PROMPT_GAMMA: &str = "flux.prompt_gamma";
    pub const PROMPT_STATIONS: &str = "flux.prompt_stations";
    pub const PROMPT_OUTPUT: &str = "flux.prompt_output";
    pub const PROMPT_YMAX: &str = "flux.prompt_ymax";
    pub const RESULT_URL: &str = "flux.result_url";
    pub const PROMPT_FETCH_NOW: &str = "flux.prompt_fetch_now";
    pub const FETCHING: &str = "flux.fetching";
    pub const FRAGMENT_HEADING: &str = "flux.fragment_heading";

    pub const CATALOG_HEADING: &str = "catalog.heading";
    pub const CATALOG_COLUMNS: &str = "catalog.columns";
    pub const CATALOG_SENTINEL_NOTE: &str = "catalog.sentinel_note";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_ENDPOINT: &str = "settings.current_endpoint";
    pub const SETTINGS_PROMPT_ENDPOINT: &str = "settings.prompt_endpoint";
    pub const SETTINGS_PROMPT_STATIONS: &str = "settings.prompt_stations";
    pub const SETTINGS_PROMPT_GAMMA: &str = "settings.prompt_gamma";
    pub const SETTINGS_PROMPT_OUTPUT: &str = "settings.prompt_output";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_INVALID_TIMESTAMP: &str = "error.invalid_timestamp";
    pub const ERROR_INVALID_OUTPUT: &str = "error.invalid_output";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" | "en-uk" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en-us" | "en" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Meteor Flux Viewer ===",
        MAIN_MENU_FLUX_QUERY => "1) 플럭스 질의 작성",
        MAIN_MENU_CATALOG => "2) 유성우 카탈로그",
        MAIN_MENU_SETTINGS => "3) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        FLUX_HEADING => "\n-- 플럭스 질의 --",
        PROMPT_SHOWER => "유성우 코드 (예: PER, SPO, ANT): ",
        UNKNOWN_SHOWER => "카탈로그에 없는 코드입니다. 기간/popindex를 직접 입력하세요.",
        PROMPT_BEGIN => "시작 시각",
        PROMPT_END => "종료 시각",
        PROMPT_MIN_METEORS => "구간당 최소 유성 수",
        PROMPT_MIN_ECA => "구간당 최소 ECA [1000 km²·h]",
        PROMPT_MIN_INTERVAL => "최소 구간 길이 [h]",
        PROMPT_MAX_INTERVAL => "최대 구간 길이 [h]",
        PROMPT_POPINDEX => "모집단 지수 r",
        PROMPT_GAMMA => "gamma 계수",
        PROMPT_STATIONS => "관측소 필터 (쉼표 구분, 빈 값=전체)",
        PROMPT_OUTPUT => "출력 모드 (graph/full)",
        PROMPT_YMAX => "Y축 상한 (빈 값=자동)",
        RESULT_URL => "요청 URL:",
        PROMPT_FETCH_NOW => "지금 가져올까요? (y/N): ",
        FETCHING => "프래그먼트를 가져오는 중...",
        FRAGMENT_HEADING => "--- HTML 프래그먼트 ---",
        CATALOG_HEADING => "\n-- 유성우 카탈로그 --",
        CATALOG_COLUMNS => "코드  r    활동 기간(올해 기준)        극대일      태양황경    이름",
        CATALOG_SENTINEL_NOTE => "SPO/ANT는 고정 달력이 없어 선택한 달 기준으로 기간을 만듭니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_ENDPOINT => "현재 엔드포인트:",
        SETTINGS_PROMPT_ENDPOINT => "엔드포인트 URL (엔터=유지): ",
        SETTINGS_PROMPT_STATIONS => "기본 관측소 필터 (엔터=유지): ",
        SETTINGS_PROMPT_GAMMA => "기본 gamma (엔터=유지): ",
        SETTINGS_PROMPT_OUTPUT => "기본 출력 모드 graph/full (엔터=유지): ",
        SETTINGS_PROMPT_LANGUAGE => "언어 auto/ko/en (엔터=유지): ",
        SETTINGS_SAVED => "설정이 저장되었습니다.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_INVALID_TIMESTAMP => "타임스탬프를 해석할 수 없습니다 (예: 2011-04-21 18:00:00).",
        ERROR_INVALID_OUTPUT => "출력 모드는 graph 또는 full이어야 합니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Meteor Flux Viewer ===",
        MAIN_MENU_FLUX_QUERY => "1) Build flux query",
        MAIN_MENU_CATALOG => "2) Shower catalog",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        FLUX_HEADING => "\n-- Flux Query --",
        PROMPT_SHOWER => "Shower code (e.g. PER, SPO, ANT): ",
        UNKNOWN_SHOWER => "Code not in catalog; enter window/popindex manually.",
        PROMPT_BEGIN => "Begin timestamp",
        PROMPT_END => "End timestamp",
        PROMPT_MIN_METEORS => "Min meteors per bin",
        PROMPT_MIN_ECA => "Min ECA per bin [1000 km²·h]",
        PROMPT_MIN_INTERVAL => "Min bin length [h]",
        PROMPT_MAX_INTERVAL => "Max bin length [h]",
        PROMPT_POPINDEX => "Population index r",
        PROMPT_GAMMA => "Gamma coefficient",
        PROMPT_STATIONS => "Station filter (comma separated, empty=all)",
        PROMPT_OUTPUT => "Output mode (graph/full)",
        PROMPT_YMAX => "Y-axis maximum (empty=auto)",
        RESULT_URL => "Request URL:",
        PROMPT_FETCH_NOW => "Fetch now? (y/N): ",
        FETCHING => "Fetching fragment...",
        FRAGMENT_HEADING => "--- HTML fragment ---",
        CATALOG_HEADING => "\n-- Shower Catalog --",
        CATALOG_COLUMNS => "Code  r    Active window (this year)   Peak        Sol.lon     Name",
        CATALOG_SENTINEL_NOTE => "SPO/ANT have no fixed calendar; their window is derived from the selected month.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_ENDPOINT => "Current endpoint:",
        SETTINGS_PROMPT_ENDPOINT => "Endpoint URL (enter=keep): ",
        SETTINGS_PROMPT_STATIONS => "Default station filter (enter=keep): ",
        SETTINGS_PROMPT_GAMMA => "Default gamma (enter=keep): ",
        SETTINGS_PROMPT_OUTPUT => "Default output mode graph/full (enter=keep): ",
        SETTINGS_PROMPT_LANGUAGE => "Language auto/ko/en (enter=keep): ",
        SETTINGS_SAVED => "Settings saved.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_INVALID_TIMESTAMP => "Cannot parse timestamp (e.g. 2011-04-21 18:00:00).",
        ERROR_INVALID_OUTPUT => "Output mode must be graph or full.",
        _ => return None,
    })
}
