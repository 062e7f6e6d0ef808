//! Auth Commands
//!
//! 로그인 폼 플로우와 세션 관리. 프론트엔드 LoginView가 그대로 호출하는
//! 레이어라서, 폼 검증과 401 → "잘못된 로그인 정보" 문구 변환까지 여기서
//! 처리합니다.

use serde::Deserialize;
use tauri::State;

use crate::api::{ApiError, API_CLIENT};
use crate::api::types::InviteResponse;
use crate::commands::lock_db;
use crate::db::DbState;
use crate::error::{CommandError, CommandResult};
use crate::i18n::{self, t};
use crate::models::SessionInfo;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginArgs {
    pub email: String,
    pub password: String,
    /// 프론트엔드의 활성 UI 로케일 (예: "ko", "en-US")
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchInviteArgs {
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInviteArgs {
    pub token: String,
    pub name: String,
    pub password: String,
    pub locale: Option<String>,
}

/// 폼 검증 실패 (로케일에 맞는 메시지)
fn validation_error(locale: &str, key: &str) -> CommandError {
    CommandError {
        code: "VALIDATION_ERROR".to_string(),
        message: t(locale, key),
        details: None,
    }
}

/// 로그인 실패 매핑
///
/// 401은 로케일에 맞는 invalid-credentials 문구로, 그 외에는 에러의
/// 문자열 표현을 그대로 노출합니다.
fn map_login_error(error: ApiError, locale: &str) -> CommandError {
    if error.status() == Some(401) {
        return CommandError {
            code: "INVALID_CREDENTIALS".to_string(),
            message: t(locale, "login.invalid_credentials"),
            details: Some("401".to_string()),
        };
    }
    CommandError::from(error)
}

/// 로그인 폼 제출 처리
///
/// 두 필드 모두 필수. 검증을 통과하면 POST /api/auth/login 1회 호출,
/// 성공 시 세션을 다시 조회해 로컬 저장소에 기록한 뒤 반환합니다.
/// 프론트는 반환된 세션을 받아 인증 상태를 갱신하고 화면을 전환합니다.
#[tauri::command]
pub async fn login(args: LoginArgs, db_state: State<'_, DbState>) -> CommandResult<SessionInfo> {
    let locale = args.locale.as_deref().unwrap_or(i18n::DEFAULT_LOCALE);

    let email = args.email.trim();
    if email.is_empty() {
        return Err(validation_error(locale, "login.email_required"));
    }
    if args.password.is_empty() {
        return Err(validation_error(locale, "login.password_required"));
    }

    if let Err(e) = API_CLIENT.login(email, &args.password).await {
        return Err(map_login_error(e, locale));
    }

    let session = API_CLIENT.session().await.map_err(CommandError::from)?;

    let db = lock_db(&db_state)?;
    db.record_session(&session).map_err(CommandError::from)?;

    Ok(session)
}

/// 로그아웃: 서버 세션 종료 후 로컬 세션 기록 제거
#[tauri::command]
pub async fn logout(db_state: State<'_, DbState>) -> CommandResult<()> {
    API_CLIENT.logout().await.map_err(CommandError::from)?;

    let db = lock_db(&db_state)?;
    db.clear_sessions().map_err(CommandError::from)?;
    Ok(())
}

/// 저장된 세션 토큰 존재 여부
///
/// 네트워크 없이 첫 화면(로그인 vs 에디터)을 결정할 때 사용합니다.
#[tauri::command]
pub async fn has_session_token() -> Result<bool, CommandError> {
    Ok(API_CLIENT.has_token().await)
}

/// 현재 세션 조회 (앱 시작 시 인증 상태 복원용)
#[tauri::command]
pub async fn current_session(db_state: State<'_, DbState>) -> CommandResult<SessionInfo> {
    let session = API_CLIENT.session().await.map_err(CommandError::from)?;

    let db = lock_db(&db_state)?;
    db.record_session(&session).map_err(CommandError::from)?;

    Ok(session)
}

/// 초대 토큰으로 초대 정보 조회 (가입 폼 프리필)
#[tauri::command]
pub async fn fetch_invite(args: FetchInviteArgs) -> CommandResult<InviteResponse> {
    API_CLIENT
        .get_invite(args.token.trim())
        .await
        .map_err(CommandError::from)
}

/// 초대 수락 (계정 생성)
///
/// 성공 후 로그인은 프론트엔드가 이어서 수행합니다.
#[tauri::command]
pub async fn accept_invite(args: AcceptInviteArgs) -> CommandResult<()> {
    let locale = args.locale.as_deref().unwrap_or(i18n::DEFAULT_LOCALE);

    let name = args.name.trim();
    if name.is_empty() {
        return Err(validation_error(locale, "invite.name_required"));
    }
    if args.password.is_empty() {
        return Err(validation_error(locale, "invite.password_required"));
    }

    API_CLIENT
        .accept_invite(args.token.trim(), name, &args.password)
        .await
        .map_err(CommandError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_maps_to_localized_invalid_credentials() {
        let error = ApiError::Status {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        let mapped = map_login_error(error, "en");
        assert_eq!(mapped.code, "INVALID_CREDENTIALS");
        assert_eq!(mapped.message, "The email or password you entered is incorrect.");

        let error = ApiError::Status {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        let mapped = map_login_error(error, "ko");
        assert_eq!(mapped.message, "이메일 또는 비밀번호가 올바르지 않습니다.");
    }

    #[test]
    fn test_non_401_keeps_raw_error_text() {
        let error = ApiError::Status {
            status: 500,
            message: "database exploded".to_string(),
        };
        let mapped = map_login_error(error, "ko");

        assert_eq!(mapped.code, "API_ERROR");
        assert_eq!(mapped.message, "API error: 500 database exploded");
        assert_eq!(mapped.details.as_deref(), Some("500"));
    }

    #[test]
    fn test_parse_error_keeps_raw_error_text() {
        let error = ApiError::Parse("expected value at line 1".to_string());
        let mapped = map_login_error(error, "en");

        assert_eq!(mapped.code, "API_ERROR");
        assert!(mapped.message.contains("expected value"));
        assert!(mapped.details.is_none());
    }

    #[test]
    fn test_validation_messages_follow_locale() {
        assert_eq!(
            validation_error("ko", "login.email_required").message,
            "이메일을 입력해 주세요."
        );
        assert_eq!(
            validation_error("en", "login.password_required").message,
            "Please enter your password."
        );
        assert_eq!(validation_error("en", "login.email_required").code, "VALIDATION_ERROR");
    }
}
