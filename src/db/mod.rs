//! Database Module
//!
//! SQLite 로컬 작업 저장소 관리. 서버가 기록의 원본(system of record)이고,
//! 이 저장소는 에디터가 쓰는 로컬 미러 + 오프라인 스냅샷 대상입니다.

mod schema;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::backup::Backup;
use rusqlite::{Connection, OptionalExtension};

use crate::error::BteError;
use crate::models::{
    GlossChange, GlossSource, GlossState, ImportJob, Language, Member, Role, SessionInfo,
    TextDirection, VersePayload, VerseWord,
};

/// 데이터베이스 상태 (Tauri 앱 상태로 관리)
pub struct DbState(pub Mutex<Database>);

/// 데이터베이스 래퍼
pub struct Database {
    conn: Connection,
}

impl Database {
    /// 새 데이터베이스 연결 생성
    pub fn new(path: &Path) -> Result<Self, BteError> {
        let conn = Connection::open(path)?;
        // 캐스케이드 삭제가 스키마 계약의 일부이므로 항상 켠다
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self, BteError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// 데이터베이스 스키마 초기화
    pub fn initialize(&self) -> Result<(), BteError> {
        self.conn.execute_batch(schema::CREATE_SCHEMA)?;
        Ok(())
    }

    /// 현재 DB를 스냅샷 파일(.bte: SQLite DB 파일)로 내보내기
    pub fn export_db_to_file(&self, out_path: &Path) -> Result<(), BteError> {
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut out_conn = Connection::open(out_path)?;
        out_conn.execute_batch(schema::CREATE_SCHEMA)?;

        let backup = Backup::new(&self.conn, &mut out_conn)?;
        backup.run_to_completion(5, std::time::Duration::from_millis(10), None)?;
        Ok(())
    }

    /// 스냅샷 파일(.bte)을 현재 DB로 가져오기 (현재 내용을 덮어씀)
    pub fn import_db_from_file(&mut self, in_path: &Path) -> Result<(), BteError> {
        let in_conn = Connection::open(in_path)?;

        let backup = Backup::new(&in_conn, &mut self.conn)?;
        backup.run_to_completion(5, std::time::Duration::from_millis(10), None)?;
        Ok(())
    }

    // ---- 사용자/세션 ----

    /// 로그인 직후 세션 + 사용자 기록
    pub fn record_session(&self, info: &SessionInfo) -> Result<(), BteError> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO users (id, email, name) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET email = excluded.email, name = excluded.name",
            (&info.user.id, &info.user.email, &info.user.name),
        )?;

        tx.execute(
            "INSERT OR REPLACE INTO auth_sessions (id, user_id, active_expires_at, idle_expires_at)
             VALUES (?1, ?2, ?3, ?4)",
            (
                &info.session.id,
                &info.user.id,
                info.session.active_expires_at,
                info.session.idle_expires_at,
            ),
        )?;

        tx.commit()?;
        Ok(())
    }

    /// 로컬에 기록된 세션 전부 제거 (로그아웃)
    pub fn clear_sessions(&self) -> Result<(), BteError> {
        self.conn.execute("DELETE FROM auth_sessions", [])?;
        Ok(())
    }

    // ---- 언어 ----

    /// 언어 캐시 upsert
    ///
    /// OR REPLACE는 기존 행을 지우면서 글로스까지 캐스케이드로 날리므로
    /// 반드시 ON CONFLICT DO UPDATE를 사용합니다.
    pub fn upsert_language(&self, language: &Language) -> Result<(), BteError> {
        self.conn.execute(
            "INSERT INTO languages (id, code, name, font, text_direction)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(code) DO UPDATE SET
                 name = excluded.name,
                 font = excluded.font,
                 text_direction = excluded.text_direction",
            (
                &language.id,
                &language.code,
                &language.name,
                &language.font,
                language.text_direction.as_str(),
            ),
        )?;
        Ok(())
    }

    /// 언어 목록 캐시 갱신
    pub fn upsert_languages(&self, languages: &[Language]) -> Result<(), BteError> {
        let tx = self.conn.unchecked_transaction()?;
        for language in languages {
            tx.execute(
                "INSERT INTO languages (id, code, name, font, text_direction)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(code) DO UPDATE SET
                     name = excluded.name,
                     font = excluded.font,
                     text_direction = excluded.text_direction",
                (
                    &language.id,
                    &language.code,
                    &language.name,
                    &language.font,
                    language.text_direction.as_str(),
                ),
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// 캐시된 언어 목록 조회
    pub fn list_languages(&self) -> Result<Vec<Language>, BteError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, code, name, font, text_direction FROM languages ORDER BY code",
        )?;

        let iter = stmt.query_map([], |row| {
            let direction: String = row.get(4)?;
            Ok(Language {
                id: row.get(0)?,
                code: row.get(1)?,
                name: row.get(2)?,
                font: row.get(3)?,
                text_direction: TextDirection::parse(&direction).unwrap_or(TextDirection::Ltr),
            })
        })?;

        let mut out = Vec::new();
        for language in iter {
            out.push(language?);
        }
        Ok(out)
    }

    /// 코드로 캐시된 언어 조회
    pub fn find_language(&self, code: &str) -> Result<Language, BteError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, code, name, font, text_direction FROM languages WHERE code = ?1",
        )?;

        stmt.query_row([code], |row| {
            let direction: String = row.get(4)?;
            Ok(Language {
                id: row.get(0)?,
                code: row.get(1)?,
                name: row.get(2)?,
                font: row.get(3)?,
                text_direction: TextDirection::parse(&direction).unwrap_or(TextDirection::Ltr),
            })
        })
        .optional()?
        .ok_or_else(|| BteError::LanguageNotFound(code.to_string()))
    }

    /// 언어 코드 → 내부 ID
    fn language_id(&self, code: &str) -> Result<String, BteError> {
        self.conn
            .query_row("SELECT id FROM languages WHERE code = ?1", [code], |row| {
                row.get::<_, String>(0)
            })
            .optional()?
            .ok_or_else(|| BteError::LanguageNotFound(code.to_string()))
    }

    /// 언어 캐시 삭제 (글로스/이력/노트/각주/멤버/작업이 캐스케이드로 제거됨)
    pub fn delete_language(&self, code: &str) -> Result<(), BteError> {
        let language_id = self.language_id(code)?;
        self.conn
            .execute("DELETE FROM languages WHERE id = ?1", [&language_id])?;
        Ok(())
    }

    // ---- 원문 캐시 ----

    /// 절 단위 원문 캐시 (멱등)
    pub fn cache_verse(&self, verse: &VersePayload) -> Result<(), BteError> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO books (id, name) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            (verse.book_id, &verse.book_name),
        )?;

        tx.execute(
            "INSERT OR IGNORE INTO verses (id, book_id, chapter, number) VALUES (?1, ?2, ?3, ?4)",
            (&verse.verse_id, verse.book_id, verse.chapter, verse.number),
        )?;

        for word in &verse.words {
            if word.form_id.is_some() && word.lemma_id.is_none() {
                return Err(BteError::InvalidOperation(format!(
                    "Word {} has a form without a lemma",
                    word.id
                )));
            }

            if let Some(lemma_id) = &word.lemma_id {
                tx.execute("INSERT OR IGNORE INTO lemmas (id) VALUES (?1)", [lemma_id])?;
            }
            if let (Some(form_id), Some(lemma_id)) = (&word.form_id, &word.lemma_id) {
                tx.execute(
                    "INSERT OR IGNORE INTO lemma_forms (id, lemma_id, grammar) VALUES (?1, ?2, ?3)",
                    (form_id, lemma_id, word.grammar.as_deref().unwrap_or("")),
                )?;
            }

            tx.execute(
                "INSERT INTO words (id, verse_id, text, form_id) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET text = excluded.text, form_id = excluded.form_id",
                (&word.id, &verse.verse_id, &word.text, &word.form_id),
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// 에디터 행 조회: 절의 단어들 + 해당 언어의 글로스/기계 제안/노트/각주
    pub fn get_verse_words(
        &self,
        verse_id: &str,
        language_code: &str,
    ) -> Result<Vec<VerseWord>, BteError> {
        let language_id = self.language_id(language_code)?;

        let verse_exists: bool = self
            .conn
            .prepare("SELECT 1 FROM verses WHERE id = ?1")?
            .exists([verse_id])?;
        if !verse_exists {
            return Err(BteError::VerseNotFound(verse_id.to_string()));
        }

        let mut stmt = self.conn.prepare(
            "SELECT w.id, w.text, f.grammar, f.lemma_id,
                    g.gloss, g.state, m.gloss, n.content, fo.content
             FROM words w
             LEFT JOIN lemma_forms f ON f.id = w.form_id
             LEFT JOIN glosses g ON g.word_id = w.id AND g.language_id = ?2
             LEFT JOIN machine_glosses m ON m.word_id = w.id AND m.language_id = ?2
             LEFT JOIN translator_notes n ON n.word_id = w.id AND n.language_id = ?2
             LEFT JOIN footnotes fo ON fo.word_id = w.id AND fo.language_id = ?2
             WHERE w.verse_id = ?1
             ORDER BY w.id",
        )?;

        let iter = stmt.query_map((verse_id, &language_id), |row| {
            let state: Option<String> = row.get(5)?;
            Ok(VerseWord {
                word_id: row.get(0)?,
                text: row.get(1)?,
                grammar: row.get(2)?,
                lemma_id: row.get(3)?,
                gloss: row.get(4)?,
                state: state.as_deref().and_then(GlossState::parse),
                machine_gloss: row.get(6)?,
                translator_note: row.get(7)?,
                footnote: row.get(8)?,
            })
        })?;

        let mut out = Vec::new();
        for word in iter {
            out.push(word?);
        }
        Ok(out)
    }

    // ---- 글로스 ----

    /// 이력 PK (word, language, timestamp)가 같은 밀리초의 연속 편집으로
    /// 충돌하지 않도록 타임스탬프를 보정
    fn next_history_timestamp(
        tx: &rusqlite::Transaction,
        word_id: &str,
        language_id: &str,
    ) -> Result<i64, rusqlite::Error> {
        let now = chrono::Utc::now().timestamp_millis();
        let last: Option<i64> = tx.query_row(
            "SELECT MAX(timestamp) FROM gloss_history WHERE word_id = ?1 AND language_id = ?2",
            (word_id, language_id),
            |row| row.get(0),
        )?;
        Ok(last.map_or(now, |t| now.max(t + 1)))
    }

    /// 글로스 upsert + 이력 추가 (한 트랜잭션)
    ///
    /// 현재 행은 (단어, 언어)당 1개로 유지되고, 변경마다 이력이 정확히
    /// 1건 쌓입니다.
    pub fn upsert_gloss(
        &self,
        word_id: &str,
        language_code: &str,
        gloss: Option<&str>,
        state: GlossState,
        source: GlossSource,
    ) -> Result<GlossChange, BteError> {
        let language_id = self.language_id(language_code)?;

        let word_exists: bool = self
            .conn
            .prepare("SELECT 1 FROM words WHERE id = ?1")?
            .exists([word_id])?;
        if !word_exists {
            return Err(BteError::WordNotFound(word_id.to_string()));
        }

        let tx = self.conn.unchecked_transaction()?;
        let timestamp = Self::next_history_timestamp(&tx, word_id, &language_id)?;

        tx.execute(
            "INSERT INTO glosses (word_id, language_id, gloss, state, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(word_id, language_id) DO UPDATE SET
                 gloss = excluded.gloss,
                 state = excluded.state,
                 updated_at = excluded.updated_at",
            (word_id, &language_id, gloss, state.as_str(), timestamp),
        )?;

        tx.execute(
            "INSERT INTO gloss_history (word_id, language_id, timestamp, gloss, state, source)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                word_id,
                &language_id,
                timestamp,
                gloss,
                state.as_str(),
                source.as_str(),
            ),
        )?;

        tx.commit()?;

        Ok(GlossChange {
            word_id: word_id.to_string(),
            timestamp,
            gloss: gloss.map(|s| s.to_string()),
            state,
            source,
        })
    }

    /// 글로스 상태 일괄 변경 (승인/승인 해제)
    ///
    /// 글로스 행이 있는 단어만 대상이며, 변경된 개수를 반환합니다.
    pub fn set_gloss_states(
        &self,
        word_ids: &[String],
        language_code: &str,
        state: GlossState,
    ) -> Result<u32, BteError> {
        let language_id = self.language_id(language_code)?;

        let tx = self.conn.unchecked_transaction()?;
        let mut updated = 0u32;

        for word_id in word_ids {
            let existing: Option<Option<String>> = tx
                .query_row(
                    "SELECT gloss FROM glosses WHERE word_id = ?1 AND language_id = ?2",
                    (word_id, &language_id),
                    |row| row.get(0),
                )
                .optional()?;

            let Some(gloss) = existing else {
                continue;
            };

            let timestamp = Self::next_history_timestamp(&tx, word_id, &language_id)?;

            tx.execute(
                "UPDATE glosses SET state = ?1, updated_at = ?2
                 WHERE word_id = ?3 AND language_id = ?4",
                (state.as_str(), timestamp, word_id, &language_id),
            )?;

            tx.execute(
                "INSERT INTO gloss_history (word_id, language_id, timestamp, gloss, state, source)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                (
                    word_id,
                    &language_id,
                    timestamp,
                    &gloss,
                    state.as_str(),
                    GlossSource::User.as_str(),
                ),
            )?;

            updated += 1;
        }

        tx.commit()?;
        Ok(updated)
    }

    /// 글로스 변경 이력 조회 (최신순)
    pub fn get_gloss_history(
        &self,
        word_id: &str,
        language_code: &str,
    ) -> Result<Vec<GlossChange>, BteError> {
        let language_id = self.language_id(language_code)?;

        let mut stmt = self.conn.prepare(
            "SELECT word_id, timestamp, gloss, state, source
             FROM gloss_history
             WHERE word_id = ?1 AND language_id = ?2
             ORDER BY timestamp DESC",
        )?;

        let iter = stmt.query_map((word_id, &language_id), |row| {
            let state: String = row.get(3)?;
            let source: String = row.get(4)?;
            Ok(GlossChange {
                word_id: row.get(0)?,
                timestamp: row.get(1)?,
                gloss: row.get(2)?,
                state: GlossState::parse(&state).unwrap_or(GlossState::Unapproved),
                source: GlossSource::parse(&source).unwrap_or(GlossSource::User),
            })
        })?;

        let mut out = Vec::new();
        for change in iter {
            out.push(change?);
        }
        Ok(out)
    }

    /// 기계 번역 제안 upsert
    pub fn upsert_machine_gloss(
        &self,
        word_id: &str,
        language_code: &str,
        gloss: &str,
    ) -> Result<(), BteError> {
        let language_id = self.language_id(language_code)?;
        let now = chrono::Utc::now().timestamp_millis();

        self.conn.execute(
            "INSERT INTO machine_glosses (word_id, language_id, gloss, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(word_id, language_id) DO UPDATE SET
                 gloss = excluded.gloss,
                 updated_at = excluded.updated_at",
            (word_id, &language_id, gloss, now),
        )?;
        Ok(())
    }

    /// 번역자 노트 upsert
    pub fn save_translator_note(
        &self,
        word_id: &str,
        language_code: &str,
        author_id: &str,
        content: &str,
    ) -> Result<(), BteError> {
        let language_id = self.language_id(language_code)?;
        let now = chrono::Utc::now().timestamp_millis();

        self.conn.execute(
            "INSERT INTO translator_notes (word_id, language_id, author_id, timestamp, content)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(word_id, language_id) DO UPDATE SET
                 author_id = excluded.author_id,
                 timestamp = excluded.timestamp,
                 content = excluded.content",
            (word_id, &language_id, author_id, now, content),
        )?;
        Ok(())
    }

    /// 각주 upsert
    pub fn save_footnote(
        &self,
        word_id: &str,
        language_code: &str,
        author_id: &str,
        content: &str,
    ) -> Result<(), BteError> {
        let language_id = self.language_id(language_code)?;
        let now = chrono::Utc::now().timestamp_millis();

        self.conn.execute(
            "INSERT INTO footnotes (word_id, language_id, author_id, timestamp, content)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(word_id, language_id) DO UPDATE SET
                 author_id = excluded.author_id,
                 timestamp = excluded.timestamp,
                 content = excluded.content",
            (word_id, &language_id, author_id, now, content),
        )?;
        Ok(())
    }

    // ---- 멤버/역할 ----

    /// 서버에서 받은 멤버 목록으로 로컬 역할 캐시 교체
    pub fn replace_members(&self, language_code: &str, members: &[Member]) -> Result<(), BteError> {
        let language_id = self.language_id(language_code)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM language_member_roles WHERE language_id = ?1",
            [&language_id],
        )?;

        for member in members {
            tx.execute(
                "INSERT INTO users (id, email, name) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET email = excluded.email, name = excluded.name",
                (&member.user_id, &member.email, &member.name),
            )?;

            for role in &member.roles {
                tx.execute(
                    "INSERT OR IGNORE INTO language_member_roles (language_id, user_id, role)
                     VALUES (?1, ?2, ?3)",
                    (&language_id, &member.user_id, role.as_str()),
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// 한 멤버의 역할 집합 교체
    pub fn set_member_roles(
        &self,
        language_code: &str,
        user_id: &str,
        roles: &[Role],
    ) -> Result<(), BteError> {
        let language_id = self.language_id(language_code)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM language_member_roles WHERE language_id = ?1 AND user_id = ?2",
            (&language_id, user_id),
        )?;
        for role in roles {
            tx.execute(
                "INSERT INTO language_member_roles (language_id, user_id, role) VALUES (?1, ?2, ?3)",
                (&language_id, user_id, role.as_str()),
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// 멤버 제거 (해당 언어의 역할 전부 삭제)
    pub fn remove_member(&self, language_code: &str, user_id: &str) -> Result<(), BteError> {
        let language_id = self.language_id(language_code)?;
        self.conn.execute(
            "DELETE FROM language_member_roles WHERE language_id = ?1 AND user_id = ?2",
            (&language_id, user_id),
        )?;
        Ok(())
    }

    /// 한 멤버가 가진 역할 조회
    pub fn get_member_roles(
        &self,
        language_code: &str,
        user_id: &str,
    ) -> Result<Vec<Role>, BteError> {
        let language_id = self.language_id(language_code)?;

        let mut stmt = self.conn.prepare(
            "SELECT role FROM language_member_roles
             WHERE language_id = ?1 AND user_id = ?2 ORDER BY role",
        )?;

        let iter = stmt.query_map((&language_id, user_id), |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for role in iter {
            if let Some(parsed) = Role::parse(&role?) {
                out.push(parsed);
            }
        }
        Ok(out)
    }

    // ---- 임포트 작업 ----

    /// 임포트 작업 상태 upsert (언어당 1행 유지)
    pub fn upsert_import_job(
        &self,
        language_code: &str,
        job: &ImportJob,
        user_id: Option<&str>,
    ) -> Result<(), BteError> {
        let language_id = self.language_id(language_code)?;

        self.conn.execute(
            "INSERT INTO language_import_jobs (language_id, user_id, start_date, end_date, succeeded)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(language_id) DO UPDATE SET
                 user_id = excluded.user_id,
                 start_date = excluded.start_date,
                 end_date = excluded.end_date,
                 succeeded = excluded.succeeded",
            (&language_id, user_id, job.start_date, job.end_date, job.succeeded),
        )?;
        Ok(())
    }

    /// 임포트 작업 상태 조회
    pub fn get_import_job(&self, language_code: &str) -> Result<Option<ImportJob>, BteError> {
        let language_id = self.language_id(language_code)?;

        let job = self
            .conn
            .query_row(
                "SELECT start_date, end_date, succeeded FROM language_import_jobs
                 WHERE language_id = ?1",
                [&language_id],
                |row| {
                    Ok(ImportJob {
                        start_date: row.get(0)?,
                        end_date: row.get(1)?,
                        succeeded: row.get(2)?,
                    })
                },
            )
            .optional()?;

        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SessionMeta, UserInfo, WordPayload};

    fn count(db: &Database, sql: &str) -> i64 {
        db.conn.query_row(sql, [], |row| row.get(0)).unwrap()
    }

    fn seeded_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();

        db.upsert_language(&Language {
            id: "lang-1".to_string(),
            code: "spa".to_string(),
            name: "Spanish".to_string(),
            font: "Noto Sans".to_string(),
            text_direction: TextDirection::Ltr,
        })
        .unwrap();

        db.cache_verse(&VersePayload {
            verse_id: "01001001".to_string(),
            book_id: 1,
            book_name: "Genesis".to_string(),
            chapter: 1,
            number: 1,
            words: vec![
                WordPayload {
                    id: "0100100101".to_string(),
                    text: "בְּרֵאשִׁית".to_string(),
                    lemma_id: Some("H7225".to_string()),
                    form_id: Some("H7225-1".to_string()),
                    grammar: Some("Noun".to_string()),
                },
                WordPayload {
                    id: "0100100102".to_string(),
                    text: "בָּרָא".to_string(),
                    lemma_id: None,
                    form_id: None,
                    grammar: None,
                },
            ],
        })
        .unwrap();

        db.record_session(&SessionInfo {
            session: SessionMeta {
                id: "sess-1".to_string(),
                active_expires_at: 4102444800000,
                idle_expires_at: 4102444800000,
            },
            user: UserInfo {
                id: "user-1".to_string(),
                email: "translator@example.com".to_string(),
                name: Some("Translator".to_string()),
            },
        })
        .unwrap();

        db
    }

    #[test]
    fn test_gloss_unique_per_word_and_language() {
        let db = seeded_db();

        let insert = "INSERT INTO glosses (word_id, language_id, gloss, state, updated_at)
                      VALUES ('0100100101', 'lang-1', 'beginning', 'UNAPPROVED', 1)";
        db.conn.execute(insert, []).unwrap();
        assert!(db.conn.execute(insert, []).is_err());
    }

    #[test]
    fn test_per_word_content_unique_per_word_and_language() {
        let db = seeded_db();

        let inserts = [
            "INSERT INTO machine_glosses (word_id, language_id, gloss, updated_at)
             VALUES ('0100100101', 'lang-1', 'beginning', 1)",
            "INSERT INTO translator_notes (word_id, language_id, author_id, timestamp, content)
             VALUES ('0100100101', 'lang-1', 'user-1', 1, 'note')",
            "INSERT INTO footnotes (word_id, language_id, author_id, timestamp, content)
             VALUES ('0100100101', 'lang-1', 'user-1', 1, 'footnote')",
        ];

        for insert in inserts {
            db.conn.execute(insert, []).unwrap();
            assert!(db.conn.execute(insert, []).is_err(), "duplicate accepted: {}", insert);
        }
    }

    #[test]
    fn test_import_job_unique_per_language() {
        let db = seeded_db();

        let insert = "INSERT INTO language_import_jobs (language_id, user_id, start_date)
                      VALUES ('lang-1', 'user-1', 1)";
        db.conn.execute(insert, []).unwrap();
        assert!(db.conn.execute(insert, []).is_err());

        // upsert 경로는 기존 행을 대체하므로 여전히 1행
        db.upsert_import_job(
            "spa",
            &ImportJob {
                start_date: 2,
                end_date: Some(3),
                succeeded: Some(true),
            },
            Some("user-1"),
        )
        .unwrap();

        assert_eq!(count(&db, "SELECT COUNT(*) FROM language_import_jobs"), 1);
        let job = db.get_import_job("spa").unwrap().unwrap();
        assert_eq!(job.start_date, 2);
        assert_eq!(job.succeeded, Some(true));
    }

    #[test]
    fn test_deleting_user_cascades() {
        let db = seeded_db();

        db.conn
            .execute(
                "INSERT INTO auth_keys (id, user_id, hashed_password)
                 VALUES ('email:translator@example.com', 'user-1', 'x')",
                [],
            )
            .unwrap();
        db.set_member_roles("spa", "user-1", &[Role::Admin, Role::Translator])
            .unwrap();
        db.save_translator_note("0100100101", "spa", "user-1", "note").unwrap();

        db.conn.execute("DELETE FROM users WHERE id = 'user-1'", []).unwrap();

        assert_eq!(count(&db, "SELECT COUNT(*) FROM auth_sessions"), 0);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM auth_keys"), 0);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM language_member_roles"), 0);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM translator_notes"), 0);
    }

    #[test]
    fn test_roles_are_additive_but_not_duplicated() {
        let db = seeded_db();

        db.set_member_roles("spa", "user-1", &[Role::Admin, Role::Translator])
            .unwrap();
        assert_eq!(
            db.get_member_roles("spa", "user-1").unwrap(),
            vec![Role::Admin, Role::Translator]
        );

        // 같은 (언어, 사용자, 역할) 조합은 PK 위반
        assert!(db
            .conn
            .execute(
                "INSERT INTO language_member_roles (language_id, user_id, role)
                 VALUES ('lang-1', 'user-1', 'ADMIN')",
                [],
            )
            .is_err());
    }

    #[test]
    fn test_gloss_upsert_appends_history() {
        let db = seeded_db();

        db.upsert_gloss(
            "0100100101",
            "spa",
            Some("principio"),
            GlossState::Unapproved,
            GlossSource::Import,
        )
        .unwrap();
        db.upsert_gloss(
            "0100100101",
            "spa",
            Some("en el principio"),
            GlossState::Approved,
            GlossSource::User,
        )
        .unwrap();

        // 현재 행은 1개, 이력은 변경마다 1건
        assert_eq!(count(&db, "SELECT COUNT(*) FROM glosses"), 1);

        let history = db.get_gloss_history("0100100101", "spa").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].gloss.as_deref(), Some("en el principio"));
        assert_eq!(history[0].source, GlossSource::User);
        assert_eq!(history[1].source, GlossSource::Import);
        assert!(history[0].timestamp > history[1].timestamp);
    }

    #[test]
    fn test_set_gloss_states_only_touches_existing_glosses() {
        let db = seeded_db();

        db.upsert_gloss(
            "0100100101",
            "spa",
            Some("principio"),
            GlossState::Unapproved,
            GlossSource::User,
        )
        .unwrap();

        // 0100100102에는 글로스가 없으므로 건너뛰어야 함
        let updated = db
            .set_gloss_states(
                &["0100100101".to_string(), "0100100102".to_string()],
                "spa",
                GlossState::Approved,
            )
            .unwrap();
        assert_eq!(updated, 1);

        let words = db.get_verse_words("01001001", "spa").unwrap();
        assert_eq!(words[0].state, Some(GlossState::Approved));
        assert_eq!(words[1].state, None);
    }

    #[test]
    fn test_get_verse_words_joins_language_content() {
        let db = seeded_db();

        db.upsert_gloss(
            "0100100101",
            "spa",
            Some("principio"),
            GlossState::Unapproved,
            GlossSource::User,
        )
        .unwrap();
        db.upsert_machine_gloss("0100100101", "spa", "comienzo").unwrap();
        db.save_footnote("0100100101", "spa", "user-1", "Cf. Juan 1:1").unwrap();

        let words = db.get_verse_words("01001001", "spa").unwrap();
        assert_eq!(words.len(), 2);

        let first = &words[0];
        assert_eq!(first.text, "בְּרֵאשִׁית");
        assert_eq!(first.grammar.as_deref(), Some("Noun"));
        assert_eq!(first.lemma_id.as_deref(), Some("H7225"));
        assert_eq!(first.gloss.as_deref(), Some("principio"));
        assert_eq!(first.machine_gloss.as_deref(), Some("comienzo"));
        assert_eq!(first.footnote.as_deref(), Some("Cf. Juan 1:1"));
        assert!(first.translator_note.is_none());

        let second = &words[1];
        assert!(second.gloss.is_none());
        assert!(second.grammar.is_none());
    }

    #[test]
    fn test_cache_verse_is_idempotent() {
        let db = seeded_db();

        let verse = VersePayload {
            verse_id: "01001001".to_string(),
            book_id: 1,
            book_name: "Genesis".to_string(),
            chapter: 1,
            number: 1,
            words: vec![WordPayload {
                id: "0100100101".to_string(),
                text: "בְּרֵאשִׁית".to_string(),
                lemma_id: Some("H7225".to_string()),
                form_id: Some("H7225-1".to_string()),
                grammar: Some("Noun".to_string()),
            }],
        };

        db.cache_verse(&verse).unwrap();
        db.cache_verse(&verse).unwrap();

        assert_eq!(count(&db, "SELECT COUNT(*) FROM verses"), 1);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM books"), 1);
        assert_eq!(
            count(&db, "SELECT COUNT(*) FROM words WHERE id = '0100100101'"),
            1
        );
    }

    #[test]
    fn test_unknown_language_is_reported() {
        let db = seeded_db();

        match db.find_language("xyz") {
            Err(BteError::LanguageNotFound(code)) => assert_eq!(code, "xyz"),
            other => panic!("unexpected result: {:?}", other.map(|l| l.code)),
        }
    }

    #[test]
    fn test_snapshot_export_and_import() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot_path = dir.path().join("team.bte");

        let db = seeded_db();
        db.upsert_gloss(
            "0100100101",
            "spa",
            Some("principio"),
            GlossState::Approved,
            GlossSource::User,
        )
        .unwrap();
        db.export_db_to_file(&snapshot_path).unwrap();

        let mut restored = Database::open_in_memory().unwrap();
        restored.initialize().unwrap();
        restored.import_db_from_file(&snapshot_path).unwrap();

        let language = restored.find_language("spa").unwrap();
        assert_eq!(language.name, "Spanish");

        let words = restored.get_verse_words("01001001", "spa").unwrap();
        assert_eq!(words[0].gloss.as_deref(), Some("principio"));
        assert_eq!(words[0].state, Some(GlossState::Approved));
    }

    #[test]
    fn test_delete_language_clears_language_content() {
        let db = seeded_db();

        db.upsert_gloss(
            "0100100101",
            "spa",
            Some("principio"),
            GlossState::Unapproved,
            GlossSource::User,
        )
        .unwrap();
        db.set_member_roles("spa", "user-1", &[Role::Viewer]).unwrap();

        db.delete_language("spa").unwrap();

        assert_eq!(count(&db, "SELECT COUNT(*) FROM glosses"), 0);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM gloss_history"), 0);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM language_member_roles"), 0);
        // 원문 캐시는 언어와 독립적으로 유지됨
        assert_eq!(count(&db, "SELECT COUNT(*) FROM words"), 2);
    }
}
