//! Storage Commands (.bte Import/Export)
//!
//! .bte 파일은 SQLite DB 자체를 패키징한 오프라인 스냅샷으로 취급합니다.
//! 네트워크가 없는 현장 팀과 작업 저장소를 주고받는 용도입니다.

use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Manager, State};

use crate::commands::lock_db;
use crate::db::DbState;
use crate::error::{CommandError, CommandResult};
use crate::models::Language;
use crate::utils::validate_path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshotArgs {
    pub path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSnapshotArgs {
    pub path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearLanguageCacheArgs {
    pub code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSnapshotResult {
    pub languages: Vec<Language>,
    pub backup_path: String,
}

/// 현재 작업 저장소를 .bte 파일로 내보내기
#[tauri::command]
pub fn export_snapshot(args: ExportSnapshotArgs, db_state: State<DbState>) -> CommandResult<()> {
    let out_path = validate_path(&args.path)?;

    let db = lock_db(&db_state)?;
    db.export_db_to_file(&out_path).map_err(CommandError::from)?;
    Ok(())
}

/// .bte 파일을 현재 작업 저장소로 가져오기 (현재 내용을 덮어씀)
///
/// 가져온 뒤 캐시된 언어 목록을 반환합니다.
#[tauri::command]
pub fn import_snapshot(
    args: ImportSnapshotArgs,
    db_state: State<DbState>,
) -> CommandResult<Vec<Language>> {
    let in_path = validate_path(&args.path)?;

    let mut db = lock_db(&db_state)?;
    db.import_db_from_file(&in_path).map_err(CommandError::from)?;
    db.initialize().map_err(CommandError::from)?;
    db.list_languages().map_err(CommandError::from)
}

/// .bte 가져오기 (안전 버전)
///
/// import 전 현재 저장소를 app_data_dir/bte_backups 아래에 자동 백업한 뒤
/// 가져오기를 수행합니다.
#[tauri::command]
pub fn import_snapshot_safe(
    app: AppHandle,
    args: ImportSnapshotArgs,
    db_state: State<DbState>,
) -> CommandResult<ImportSnapshotResult> {
    let in_path = validate_path(&args.path)?;

    let backup_dir = app
        .path()
        .app_data_dir()
        .map_err(|e| CommandError {
            code: "PATH_ERROR".to_string(),
            message: format!("Failed to get app data dir: {}", e),
            details: None,
        })?
        .join("bte_backups");

    let ts = chrono::Utc::now().timestamp_millis();
    let backup_path = backup_dir.join(format!("backup-before-import-{}.bte", ts));

    let mut db = lock_db(&db_state)?;

    // 현재 저장소 백업
    db.export_db_to_file(&backup_path).map_err(CommandError::from)?;

    // 선택한 .bte 가져오기
    db.import_db_from_file(&in_path).map_err(CommandError::from)?;
    db.initialize().map_err(CommandError::from)?;

    let languages = db.list_languages().map_err(CommandError::from)?;
    Ok(ImportSnapshotResult {
        languages,
        backup_path: backup_path.to_string_lossy().to_string(),
    })
}

/// 한 언어의 로컬 캐시 삭제 (글로스/이력/노트/각주/멤버/작업 포함)
#[tauri::command]
pub fn clear_language_cache(
    args: ClearLanguageCacheArgs,
    db_state: State<DbState>,
) -> CommandResult<()> {
    let db = lock_db(&db_state)?;
    db.delete_language(args.code.trim()).map_err(CommandError::from)
}
