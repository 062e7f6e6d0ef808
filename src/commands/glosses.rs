//! Gloss Commands
//!
//! 에디터의 로컬 작업 저장소 조작: 원문 캐시, 글로스 편집/승인,
//! 기계 제안, 번역자 노트, 각주, 변경 이력.

use serde::Deserialize;
use tauri::State;

use crate::commands::lock_db;
use crate::db::DbState;
use crate::error::{CommandError, CommandResult};
use crate::models::{GlossChange, GlossSource, GlossState, VersePayload, VerseWord};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheVerseArgs {
    pub verse: VersePayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetVerseWordsArgs {
    pub verse_id: String,
    pub language_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGlossArgs {
    pub word_id: String,
    pub language_code: String,
    pub gloss: Option<String>,
    /// 생략하면 UNAPPROVED (새로 입력한 번역은 승인 전 상태)
    pub state: Option<GlossState>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveGlossesArgs {
    pub word_ids: Vec<String>,
    pub language_code: String,
    pub approved: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossHistoryArgs {
    pub word_id: String,
    pub language_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMachineGlossArgs {
    pub word_id: String,
    pub language_code: String,
    pub gloss: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveNoteArgs {
    pub word_id: String,
    pub language_code: String,
    pub author_id: String,
    pub content: String,
}

/// 절 단위 원문 캐시 (멱등)
#[tauri::command]
pub fn cache_verse(args: CacheVerseArgs, db_state: State<DbState>) -> CommandResult<()> {
    let db = lock_db(&db_state)?;
    db.cache_verse(&args.verse).map_err(CommandError::from)
}

/// 에디터 행 조회: 절의 단어들 + 해당 언어의 글로스/제안/노트/각주
#[tauri::command]
pub fn get_verse_words(
    args: GetVerseWordsArgs,
    db_state: State<DbState>,
) -> CommandResult<Vec<VerseWord>> {
    let db = lock_db(&db_state)?;
    db.get_verse_words(&args.verse_id, &args.language_code)
        .map_err(CommandError::from)
}

/// 글로스 편집 (변경 이력에 USER 출처로 1건 기록)
#[tauri::command]
pub fn update_gloss(args: UpdateGlossArgs, db_state: State<DbState>) -> CommandResult<GlossChange> {
    let state = args.state.unwrap_or(GlossState::Unapproved);

    let db = lock_db(&db_state)?;
    db.upsert_gloss(
        &args.word_id,
        &args.language_code,
        args.gloss.as_deref(),
        state,
        GlossSource::User,
    )
    .map_err(CommandError::from)
}

/// 글로스 일괄 승인/승인 해제. 변경된 개수를 반환합니다.
#[tauri::command]
pub fn approve_glosses(args: ApproveGlossesArgs, db_state: State<DbState>) -> CommandResult<u32> {
    let state = if args.approved {
        GlossState::Approved
    } else {
        GlossState::Unapproved
    };

    let db = lock_db(&db_state)?;
    db.set_gloss_states(&args.word_ids, &args.language_code, state)
        .map_err(CommandError::from)
}

/// 글로스 변경 이력 조회 (최신순)
#[tauri::command]
pub fn get_gloss_history(
    args: GlossHistoryArgs,
    db_state: State<DbState>,
) -> CommandResult<Vec<GlossChange>> {
    let db = lock_db(&db_state)?;
    db.get_gloss_history(&args.word_id, &args.language_code)
        .map_err(CommandError::from)
}

/// 기계 번역 제안 캐시
#[tauri::command]
pub fn save_machine_gloss(args: SaveMachineGlossArgs, db_state: State<DbState>) -> CommandResult<()> {
    let db = lock_db(&db_state)?;
    db.upsert_machine_gloss(&args.word_id, &args.language_code, &args.gloss)
        .map_err(CommandError::from)
}

/// 번역자 노트 저장 ((단어, 언어)당 1개)
#[tauri::command]
pub fn save_translator_note(args: SaveNoteArgs, db_state: State<DbState>) -> CommandResult<()> {
    let db = lock_db(&db_state)?;
    db.save_translator_note(
        &args.word_id,
        &args.language_code,
        &args.author_id,
        &args.content,
    )
    .map_err(CommandError::from)
}

/// 각주 저장 ((단어, 언어)당 1개)
#[tauri::command]
pub fn save_footnote(args: SaveNoteArgs, db_state: State<DbState>) -> CommandResult<()> {
    let db = lock_db(&db_state)?;
    db.save_footnote(
        &args.word_id,
        &args.language_code,
        &args.author_id,
        &args.content,
    )
    .map_err(CommandError::from)
}
