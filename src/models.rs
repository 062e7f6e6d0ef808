//! BTE Data Models
//!
//! 플랫폼 API(TypeScript)와 매핑되는 Rust 데이터 모델.
//! 와이어 포맷은 camelCase 필드 + SCREAMING_SNAKE enum 값을 사용합니다.

use serde::{Deserialize, Serialize};

/// 언어 멤버 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Translator,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Translator => "TRANSLATOR",
            Role::Viewer => "VIEWER",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "ADMIN" => Some(Role::Admin),
            "TRANSLATOR" => Some(Role::Translator),
            "VIEWER" => Some(Role::Viewer),
            _ => None,
        }
    }
}

/// 글로스 승인 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GlossState {
    Approved,
    Unapproved,
}

impl GlossState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GlossState::Approved => "APPROVED",
            GlossState::Unapproved => "UNAPPROVED",
        }
    }

    pub fn parse(s: &str) -> Option<GlossState> {
        match s {
            "APPROVED" => Some(GlossState::Approved),
            "UNAPPROVED" => Some(GlossState::Unapproved),
            _ => None,
        }
    }
}

/// 글로스 변경 출처 (직접 편집 vs 일괄 임포트)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GlossSource {
    User,
    Import,
}

impl GlossSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            GlossSource::User => "USER",
            GlossSource::Import => "IMPORT",
        }
    }

    pub fn parse(s: &str) -> Option<GlossSource> {
        match s {
            "USER" => Some(GlossSource::User),
            "IMPORT" => Some(GlossSource::Import),
            _ => None,
        }
    }
}

/// 텍스트 쓰기 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }

    pub fn parse(s: &str) -> Option<TextDirection> {
        match s {
            "ltr" => Some(TextDirection::Ltr),
            "rtl" => Some(TextDirection::Rtl),
            _ => None,
        }
    }
}

/// 로그인한 사용자 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

/// 서버 세션 메타데이터 (만료는 앱 레이어에서만 검사)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMeta {
    pub id: String,
    pub active_expires_at: i64,
    pub idle_expires_at: i64,
}

/// 현재 세션 (세션 + 사용자)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub session: SessionMeta,
    pub user: UserInfo,
}

/// 번역 대상 언어
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: String,
    pub code: String,
    pub name: String,
    pub font: String,
    pub text_direction: TextDirection,
}

/// 언어 멤버 (한 사용자가 여러 역할을 동시에 가질 수 있음)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
    pub roles: Vec<Role>,
}

/// 언어 임포트 작업 (언어당 최대 1행, 상태 기록만)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportJob {
    pub start_date: i64,
    pub end_date: Option<i64>,
    pub succeeded: Option<bool>,
}

/// 원문 캐시 페이로드: 프론트엔드가 내려주는 절 단위 데이터
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersePayload {
    pub verse_id: String,
    pub book_id: i64,
    pub book_name: String,
    pub chapter: i64,
    pub number: i64,
    pub words: Vec<WordPayload>,
}

/// 원문 캐시 페이로드의 단어 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordPayload {
    pub id: String,
    pub text: String,
    pub lemma_id: Option<String>,
    pub form_id: Option<String>,
    pub grammar: Option<String>,
}

/// 에디터 행: 원문 단어 + 해당 언어의 글로스/노트/각주
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseWord {
    pub word_id: String,
    pub text: String,
    pub grammar: Option<String>,
    pub lemma_id: Option<String>,
    pub gloss: Option<String>,
    pub state: Option<GlossState>,
    pub machine_gloss: Option<String>,
    pub translator_note: Option<String>,
    pub footnote: Option<String>,
}

/// 글로스 변경 이력 항목 (append-only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossChange {
    pub word_id: String,
    pub timestamp: i64,
    pub gloss: Option<String>,
    pub state: GlossState,
    pub source: GlossSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(
            serde_json::to_string(&GlossState::Unapproved).unwrap(),
            "\"UNAPPROVED\""
        );
        assert_eq!(serde_json::to_string(&GlossSource::Import).unwrap(), "\"IMPORT\"");
        assert_eq!(serde_json::to_string(&TextDirection::Rtl).unwrap(), "\"rtl\"");

        let role: Role = serde_json::from_str("\"TRANSLATOR\"").unwrap();
        assert_eq!(role, Role::Translator);
    }

    #[test]
    fn test_enum_db_format_matches_wire() {
        // DB의 CHECK 제약과 serde 표현은 같은 문자열을 써야 함
        for role in [Role::Admin, Role::Translator, Role::Viewer] {
            let wire = serde_json::to_string(&role).unwrap();
            assert_eq!(wire.trim_matches('"'), role.as_str());
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        for state in [GlossState::Approved, GlossState::Unapproved] {
            assert_eq!(GlossState::parse(state.as_str()), Some(state));
        }
        for source in [GlossSource::User, GlossSource::Import] {
            assert_eq!(GlossSource::parse(source.as_str()), Some(source));
        }
    }
}
