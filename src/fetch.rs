//! 원격 서비스에서 HTML 프래그먼트를 가져온다.
//!
//! 요청은 타임아웃/취소 없이 한 번만 나간다. GUI는 블로킹 요청을
//! 백그라운드 스레드에서 돌리고 공유 슬롯을 덮어쓰는 방식이라
//! 여러 요청이 겹치면 마지막으로 도착한 응답이 남는다.

use std::sync::{Arc, Mutex};

/// 프래그먼트 요청 결과 슬롯의 상태.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    /// 요청이 나갔고 아직 응답이 슬롯에 쓰이지 않았다.
    /// 요청이 실패해도 이 상태가 유지된다 (대기 표시가 그대로 남는다).
    Loading,
    Done {
        url: String,
        body: String,
    },
}

pub type SharedFetch = Arc<Mutex<FetchState>>;

pub fn new_shared() -> SharedFetch {
    Arc::new(Mutex::new(FetchState::Idle))
}

/// 프래그먼트 요청 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum FetchError {
    /// 전송 계층 오류
    Http(reqwest::Error),
    /// 2xx가 아닌 응답
    Status(reqwest::StatusCode),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http(e) => write!(f, "HTTP 요청 오류: {e}"),
            FetchError::Status(code) => write!(f, "서비스 응답 오류: HTTP {code}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        FetchError::Http(value)
    }
}

/// 프래그먼트를 동기적으로 가져온다. CLI가 직접 호출한다.
pub fn fetch_fragment(url: &str) -> Result<String, FetchError> {
    let response = reqwest::blocking::get(url)?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }
    Ok(response.text()?)
}

/// 백그라운드 스레드에서 프래그먼트를 가져와 성공 시 슬롯을 덮어쓴다.
/// 실패는 stderr에만 남기고 슬롯은 건드리지 않는다.
pub fn spawn_fetch<F>(slot: SharedFetch, url: String, on_update: F)
where
    F: Fn() + Send + 'static,
{
    if let Ok(mut state) = slot.lock() {
        *state = FetchState::Loading;
    }
    std::thread::spawn(move || {
        match fetch_fragment(&url) {
            Ok(body) => {
                if let Ok(mut state) = slot.lock() {
                    *state = FetchState::Done { url, body };
                }
                on_update();
            }
            Err(e) => eprintln!("프래그먼트 요청 실패 ({url}): {e}"),
        }
    });
}
