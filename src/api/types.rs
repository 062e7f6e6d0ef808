//! 플랫폼 API 요청/응답 타입 정의

use serde::{Deserialize, Serialize};

use crate::models::{Language, Member, Role, SessionMeta, TextDirection};

/// 로그인 요청 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 로그인 응답 (토큰은 클라이언트가 키체인에 보관)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub session: SessionMeta,
}

/// 초대 조회 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteResponse {
    pub email: String,
}

/// 초대 수락 요청 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptInviteRequest {
    pub token: String,
    pub name: String,
    pub password: String,
}

/// 언어 목록 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesResponse {
    pub data: Vec<Language>,
}

/// 단일 언어 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageResponse {
    pub data: Language,
}

/// 언어 생성 요청 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLanguageRequest {
    pub code: String,
    pub name: String,
}

/// 언어 수정 요청 본문 (없는 필드는 전송 생략)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLanguageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_direction: Option<TextDirection>,
}

/// 임포트 시작 요청 본문 (원본 언어 코드)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartImportRequest {
    pub import: String,
}

/// 임포트 작업 상태 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportJobResponse {
    pub start_date: i64,
    #[serde(default)]
    pub end_date: Option<i64>,
    #[serde(default)]
    pub succeeded: Option<bool>,
}

/// 멤버 목록 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembersResponse {
    pub data: Vec<Member>,
}

/// 멤버 초대 요청 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteMemberRequest {
    pub email: String,
    pub roles: Vec<Role>,
}

/// 멤버 역할 수정 요청 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMemberRequest {
    pub roles: Vec<Role>,
}

/// 서버 에러 응답 본문 (형태가 일정하지 않으므로 관대하게 파싱)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_request_sends_exactly_email_and_password() {
        let body = serde_json::to_value(LoginRequest {
            email: "translator@example.com".to_string(),
            password: "secret".to_string(),
        })
        .unwrap();

        assert_eq!(
            body,
            json!({ "email": "translator@example.com", "password": "secret" })
        );
    }

    #[test]
    fn test_accept_invite_sends_exactly_required_fields() {
        let body = serde_json::to_value(AcceptInviteRequest {
            token: "tok-123".to_string(),
            name: "New Translator".to_string(),
            password: "secret".to_string(),
        })
        .unwrap();

        assert_eq!(
            body,
            json!({ "token": "tok-123", "name": "New Translator", "password": "secret" })
        );
    }

    #[test]
    fn test_invite_member_sends_exactly_email_and_roles() {
        let body = serde_json::to_value(InviteMemberRequest {
            email: "viewer@example.com".to_string(),
            roles: vec![Role::Translator, Role::Viewer],
        })
        .unwrap();

        assert_eq!(
            body,
            json!({ "email": "viewer@example.com", "roles": ["TRANSLATOR", "VIEWER"] })
        );
    }

    #[test]
    fn test_update_language_omits_absent_fields() {
        let body = serde_json::to_value(UpdateLanguageRequest {
            name: Some("Español".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(body, json!({ "name": "Español" }));
    }

    #[test]
    fn test_parse_language_response() {
        let parsed: LanguageResponse = serde_json::from_str(
            r#"{ "data": { "id": "l1", "code": "spa", "name": "Spanish",
                 "font": "Noto Sans", "textDirection": "ltr" } }"#,
        )
        .unwrap();

        assert_eq!(parsed.data.code, "spa");
        assert_eq!(parsed.data.text_direction, TextDirection::Ltr);
    }

    #[test]
    fn test_parse_import_job_in_flight() {
        // 진행 중인 작업은 endDate/succeeded가 아직 없음
        let parsed: ImportJobResponse =
            serde_json::from_str(r#"{ "startDate": 1722470400000 }"#).unwrap();

        assert_eq!(parsed.start_date, 1722470400000);
        assert!(parsed.end_date.is_none());
        assert!(parsed.succeeded.is_none());
    }
}
