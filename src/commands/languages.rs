//! Language Commands
//!
//! 언어 목록/설정과 임포트 작업. 원격 API를 호출하고 결과를 로컬
//! 작업 저장소에 미러링합니다.

use serde::Deserialize;
use tauri::State;

use crate::api::types::{CreateLanguageRequest, UpdateLanguageRequest};
use crate::api::API_CLIENT;
use crate::commands::lock_db;
use crate::db::DbState;
use crate::error::{CommandError, CommandResult};
use crate::models::{ImportJob, Language, TextDirection};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindLanguageArgs {
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLanguageArgs {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLanguageArgs {
    pub code: String,
    pub name: Option<String>,
    pub font: Option<String>,
    pub text_direction: Option<TextDirection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartImportArgs {
    pub code: String,
    /// 글로스를 가져올 원본 언어 코드 (예: "eng")
    pub import_from: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetImportArgs {
    pub code: String,
}

/// 언어 목록 조회 (로컬 캐시 갱신 포함)
#[tauri::command]
pub async fn list_languages(db_state: State<'_, DbState>) -> CommandResult<Vec<Language>> {
    let languages = API_CLIENT.list_languages().await.map_err(CommandError::from)?;

    let db = lock_db(&db_state)?;
    db.upsert_languages(&languages).map_err(CommandError::from)?;

    Ok(languages)
}

/// 코드로 언어 조회 (로컬 캐시 갱신 포함)
#[tauri::command]
pub async fn find_language(
    args: FindLanguageArgs,
    db_state: State<'_, DbState>,
) -> CommandResult<Language> {
    let language = API_CLIENT
        .find_language(args.code.trim())
        .await
        .map_err(CommandError::from)?;

    let db = lock_db(&db_state)?;
    db.upsert_language(&language).map_err(CommandError::from)?;

    Ok(language)
}

/// 언어 생성
#[tauri::command]
pub async fn create_language(args: CreateLanguageArgs) -> CommandResult<()> {
    let code = args.code.trim();
    let name = args.name.trim();
    if code.is_empty() || name.is_empty() {
        return Err(CommandError {
            code: "VALIDATION_ERROR".to_string(),
            message: "Language code and name are required".to_string(),
            details: None,
        });
    }

    let body = CreateLanguageRequest {
        code: code.to_string(),
        name: name.to_string(),
    };
    API_CLIENT.create_language(&body).await.map_err(CommandError::from)
}

/// 언어 설정 수정 (이름/폰트/쓰기 방향 중 전달된 것만)
#[tauri::command]
pub async fn update_language(args: UpdateLanguageArgs) -> CommandResult<()> {
    let body = UpdateLanguageRequest {
        name: args.name,
        font: args.font,
        text_direction: args.text_direction,
    };

    API_CLIENT
        .update_language(args.code.trim(), &body)
        .await
        .map_err(CommandError::from)
}

/// 글로스 일괄 임포트 작업 시작
///
/// 시작 직후 상태를 조회해 로컬 작업 행을 갱신하고 반환합니다.
/// 언어당 작업 행은 1개뿐이라 재시작은 기존 행을 대체합니다.
#[tauri::command]
pub async fn start_language_import(
    args: StartImportArgs,
    db_state: State<'_, DbState>,
) -> CommandResult<ImportJob> {
    let source = args.import_from.trim();
    if source.is_empty() {
        return Err(CommandError {
            code: "VALIDATION_ERROR".to_string(),
            message: "Import source language is required".to_string(),
            details: None,
        });
    }

    let code = args.code.trim();
    API_CLIENT.start_import(code, source).await.map_err(CommandError::from)?;

    let status = API_CLIENT.get_import(code).await.map_err(CommandError::from)?;
    let job = ImportJob {
        start_date: status.start_date,
        end_date: status.end_date,
        succeeded: status.succeeded,
    };

    let db = lock_db(&db_state)?;
    db.upsert_import_job(code, &job, None).map_err(CommandError::from)?;

    Ok(job)
}

/// 임포트 작업 상태 조회 (로컬 작업 행 갱신 포함)
#[tauri::command]
pub async fn get_language_import(
    args: GetImportArgs,
    db_state: State<'_, DbState>,
) -> CommandResult<ImportJob> {
    let code = args.code.trim();
    let status = API_CLIENT.get_import(code).await.map_err(CommandError::from)?;

    let job = ImportJob {
        start_date: status.start_date,
        end_date: status.end_date,
        succeeded: status.succeeded,
    };

    let db = lock_db(&db_state)?;
    db.upsert_import_job(code, &job, None).map_err(CommandError::from)?;

    Ok(job)
}
