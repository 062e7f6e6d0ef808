//! BTE (Bible Translation Editor) - Tauri Backend Library
//!
//! Rust 백엔드 라이브러리로, 플랫폼 REST API 호출, SQLite 작업 저장소 관리,
//! 파일 I/O를 담당합니다.

pub mod api;
pub mod commands;
pub mod db;
pub mod error;
pub mod i18n;
pub mod models;
pub mod utils;

use std::path::PathBuf;

use tauri::Manager;

fn find_upwards(start: PathBuf, filename: &str, max_hops: usize) -> Option<PathBuf> {
    let mut cur = start;
    for _ in 0..=max_hops {
        let candidate = cur.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }
        if !cur.pop() {
            break;
        }
    }
    None
}

fn load_env_for_tauri_dev() {
    // 1) 가장 단순한 케이스: CWD 기준 (.env.local)
    if dotenvy::from_filename(".env.local").is_ok() {
        return;
    }

    // 2) CWD가 프로젝트 루트가 아닐 수 있으니, 상위로 올라가며 탐색
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(path) = find_upwards(cwd, ".env.local", 6) {
            if dotenvy::from_path(&path).is_ok() {
                return;
            }
        }
    }

    // 3) 실행 파일 위치 기준으로도 탐색 (cargo run / tauri dev 환경 대응)
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            if let Some(path) = find_upwards(dir.to_path_buf(), ".env.local", 8) {
                let _ = dotenvy::from_path(&path);
            }
        }
    }
}

/// Tauri 앱 실행
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_shell::init())
        .setup(|app| {
            // Dev 환경에서 .env.local 로드 (BTE_API_BASE 등을 프론트에 노출하지
            // 않고 백엔드에서 사용). production에서는 파일이 없을 수 있으므로
            // 실패해도 무시합니다.
            load_env_for_tauri_dev();
            let _ = dotenvy::dotenv();

            // 데이터베이스 초기화
            let app_handle = app.handle();
            let db_path = app_handle
                .path()
                .app_data_dir()
                .expect("Failed to get app data dir")
                .join("bte.db");

            // DB 디렉토리 생성
            if let Some(parent) = db_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            // 데이터베이스 연결 및 초기화
            let db = db::Database::new(&db_path)?;
            db.initialize()?;

            // 앱 상태로 데이터베이스 관리
            app.manage(db::DbState(std::sync::Mutex::new(db)));

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::auth::login,
            commands::auth::logout,
            commands::auth::has_session_token,
            commands::auth::current_session,
            commands::auth::fetch_invite,
            commands::auth::accept_invite,
            commands::languages::list_languages,
            commands::languages::find_language,
            commands::languages::create_language,
            commands::languages::update_language,
            commands::languages::start_language_import,
            commands::languages::get_language_import,
            commands::members::list_members,
            commands::members::invite_member,
            commands::members::update_member_roles,
            commands::members::remove_member,
            commands::glosses::cache_verse,
            commands::glosses::get_verse_words,
            commands::glosses::update_gloss,
            commands::glosses::approve_glosses,
            commands::glosses::get_gloss_history,
            commands::glosses::save_machine_gloss,
            commands::glosses::save_translator_note,
            commands::glosses::save_footnote,
            commands::storage::export_snapshot,
            commands::storage::import_snapshot,
            commands::storage::import_snapshot_safe,
            commands::storage::clear_language_cache,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
