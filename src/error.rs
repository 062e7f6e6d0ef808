//! BTE Error Types
//!
//! 애플리케이션 전역 에러 타입 정의

use serde::Serialize;
use thiserror::Error;

use crate::api::ApiError;

/// BTE 애플리케이션 에러
#[derive(Error, Debug)]
pub enum BteError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ApiError가 이미 상태 코드를 포함한 문구를 만들므로 그대로 노출
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Language not found: {0}")]
    LanguageNotFound(String),

    #[error("Verse not found: {0}")]
    VerseNotFound(String),

    #[error("Word not found: {0}")]
    WordNotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Tauri 명령 응답용 직렬화 가능한 에러
#[derive(Debug, Serialize)]
pub struct CommandError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl From<BteError> for CommandError {
    fn from(error: BteError) -> Self {
        let code = match &error {
            BteError::Database(_) => "DB_ERROR",
            BteError::Io(_) => "IO_ERROR",
            BteError::Serialization(_) => "SERIALIZATION_ERROR",
            BteError::Api(_) => "API_ERROR",
            BteError::LanguageNotFound(_) => "LANGUAGE_NOT_FOUND",
            BteError::VerseNotFound(_) => "VERSE_NOT_FOUND",
            BteError::WordNotFound(_) => "WORD_NOT_FOUND",
            BteError::InvalidOperation(_) => "INVALID_OPERATION",
        };

        // API 에러는 HTTP 상태 코드를 details로 전달 (프론트에서 상태 분기 가능)
        let details = match &error {
            BteError::Api(api) => api.status().map(|s| s.to_string()),
            _ => None,
        };

        CommandError {
            code: code.to_string(),
            message: error.to_string(),
            details,
        }
    }
}

impl From<ApiError> for CommandError {
    fn from(error: ApiError) -> Self {
        CommandError::from(BteError::Api(error))
    }
}

/// Tauri 명령 결과 타입
pub type CommandResult<T> = Result<T, CommandError>;
