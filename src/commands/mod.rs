//! Tauri Commands Module
//!
//! 프론트엔드에서 호출 가능한 Tauri 명령어 정의

pub mod auth;
pub mod glosses;
pub mod languages;
pub mod members;
pub mod storage;

use std::sync::MutexGuard;

use tauri::State;

use crate::db::{Database, DbState};
use crate::error::{CommandError, CommandResult};

/// 데이터베이스 락 획득 (poisoned lock은 명령 에러로 변환)
pub(crate) fn lock_db<'a>(
    db_state: &'a State<'_, DbState>,
) -> CommandResult<MutexGuard<'a, Database>> {
    db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })
}
