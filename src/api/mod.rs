//! 플랫폼 REST API 클라이언트
//!
//! 각 메서드는 정해진 엔드포인트로 HTTP 요청을 정확히 1회 보내고,
//! 파싱된 JSON 본문을 반환하거나 HTTP 상태 코드를 담은 에러를 던집니다.
//! 재시도/캐싱/배칭은 하지 않으며, 실패 처리는 호출자 몫입니다.

pub mod auth;
pub mod languages;
pub mod types;

use std::sync::Arc;

use keyring::Entry;
use once_cell::sync::Lazy;
use thiserror::Error;
use tokio::sync::RwLock;

use self::types::ApiErrorBody;

const DEFAULT_API_BASE: &str = "http://localhost:3000";
const KEYCHAIN_SERVICE: &str = "com.glossbridge.app";
const KEYCHAIN_SESSION_TOKEN: &str = "api:session_token";

/// 전역 API 클라이언트
pub static API_CLIENT: Lazy<ApiClient> = Lazy::new(ApiClient::new);

/// API 호출 에러
///
/// `Status`는 2xx가 아닌 모든 응답에 해당하며, 호출자가 상태 코드로
/// 분기할 수 있도록 `status()`를 노출합니다 (예: 로그인 401).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API error: {status} {message}")]
    Status { status: u16, message: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    /// HTTP 상태 코드 (네트워크/파싱 에러는 None)
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// 플랫폼 API 클라이언트
pub struct ApiClient {
    /// API 베이스 URL (BTE_API_BASE로 재정의 가능)
    base_url: String,
    /// 세션 토큰 (캐시)
    token: Arc<RwLock<Option<String>>>,
    /// HTTP 클라이언트
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: resolve_base_url(),
            token: Arc::new(RwLock::new(None)),
            http: reqwest::Client::new(),
        }
    }

    /// 세션 토큰 저장 (메모리 + 키체인)
    ///
    /// 키체인 저장 실패는 경고만 남깁니다. 토큰이 메모리에 있는 동안은
    /// 정상 동작하고, 재시작 후에만 다시 로그인이 필요해집니다.
    pub async fn set_token(&self, token: String) {
        match Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_SESSION_TOKEN) {
            Ok(entry) => {
                if let Err(e) = entry.set_password(&token) {
                    eprintln!("[Api] Failed to save session token to keychain: {}", e);
                }
            }
            Err(e) => eprintln!("[Api] Failed to create keychain entry: {}", e),
        }

        *self.token.write().await = Some(token);
        println!("[Api] Session token saved");
    }

    /// 세션 토큰 로드 (키체인에서)
    pub(crate) async fn load_token(&self) -> Option<String> {
        // 먼저 캐시 확인
        if let Some(token) = self.token.read().await.clone() {
            return Some(token);
        }

        // 키체인에서 로드
        let entry = Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_SESSION_TOKEN).ok()?;
        match entry.get_password() {
            Ok(token) => {
                *self.token.write().await = Some(token.clone());
                Some(token)
            }
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                eprintln!("[Api] Failed to load session token from keychain: {}", e);
                None
            }
        }
    }

    /// 저장된 세션 토큰 존재 여부
    pub async fn has_token(&self) -> bool {
        self.load_token().await.is_some()
    }

    /// 세션 토큰 삭제 (로그아웃)
    pub async fn clear_token(&self) {
        *self.token.write().await = None;

        if let Ok(entry) = Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_SESSION_TOKEN) {
            let _ = entry.delete_password();
        }

        println!("[Api] Session token cleared");
    }

    /// 엔드포인트 절대 URL 조립
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 공통 요청 빌더 (저장된 토큰이 있으면 Bearer로 첨부)
    pub(crate) async fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, self.endpoint(path))
            .header("Accept", "application/json");

        if let Some(token) = self.load_token().await {
            builder = builder.bearer_auth(token);
        }

        builder
    }

    /// 응답 상태 검사 후 JSON 본문 파싱
    pub(crate) async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Parse(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(status_error(status, body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Parse(format!("{} - {}", e, body)))
    }

    /// 본문 없는 2xx 응답 처리
    pub(crate) async fn expect_ok(response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, body))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// 비 2xx 응답을 `ApiError::Status`로 변환
///
/// 본문이 `{ "error": ... }` / `{ "message": ... }` 형태면 그 메시지를,
/// 아니면 본문 원문을, 본문이 비어 있으면 상태 문구를 사용합니다.
fn status_error(status: reqwest::StatusCode, body: String) -> ApiError {
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|parsed| parsed.error.or(parsed.message))
        .unwrap_or(body);

    let message = if message.trim().is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        message
    };

    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

/// 베이스 URL 결정: BTE_API_BASE → VITE_API_BASE_URL → 기본값
fn resolve_base_url() -> String {
    for key in ["BTE_API_BASE", "VITE_API_BASE_URL"] {
        if let Ok(value) = std::env::var(key) {
            if !value.trim().is_empty() {
                return normalize_base_url(value.trim());
            }
        }
    }
    DEFAULT_API_BASE.to_string()
}

/// 끝의 '/'를 제거해 endpoint() 조립 시 중복 슬래시를 방지
fn normalize_base_url(raw: &str) -> String {
    raw.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_prefers_error_field() {
        let err = status_error(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{ "error": "Invalid session" }"#.to_string(),
        );

        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid session");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_status_error_falls_back_to_raw_body() {
        let err = status_error(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "database exploded".to_string(),
        );

        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "API error: 500 database exploded");
    }

    #[test]
    fn test_status_error_empty_body_uses_reason() {
        let err = status_error(reqwest::StatusCode::NOT_FOUND, String::new());

        assert_eq!(err.to_string(), "API error: 404 Not Found");
    }

    #[test]
    fn test_normalize_base_url_strips_trailing_slash() {
        assert_eq!(normalize_base_url("https://bible.example.org/"), "https://bible.example.org");
        assert_eq!(normalize_base_url("http://localhost:3000"), "http://localhost:3000");
    }
}
