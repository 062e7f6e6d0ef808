//! Database Schema
//!
//! SQLite 테이블 스키마 정의 (플랫폼 데이터 모델의 로컬 작업 저장소)

/// 데이터베이스 스키마 생성 SQL
pub const CREATE_SCHEMA: &str = r#"
-- 사용자 테이블
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    name TEXT
);

-- 인증 세션 테이블 (만료는 앱 레이어에서만 검사)
CREATE TABLE IF NOT EXISTS auth_sessions (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    active_expires_at INTEGER NOT NULL,
    idle_expires_at INTEGER NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_auth_sessions_user ON auth_sessions(user_id);

-- 인증 키 테이블 (id는 'email:<주소>' 형식의 불투명 문자열)
CREATE TABLE IF NOT EXISTS auth_keys (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    hashed_password TEXT,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_auth_keys_user ON auth_keys(user_id);

-- 번역 대상 언어 테이블
CREATE TABLE IF NOT EXISTS languages (
    id TEXT PRIMARY KEY,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    font TEXT NOT NULL DEFAULT 'Noto Sans',
    text_direction TEXT NOT NULL DEFAULT 'ltr' CHECK (text_direction IN ('ltr', 'rtl'))
);

-- 원문 텍스트 계층: 책 / 절 / 단어 (불변 데이터)
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS verses (
    id TEXT PRIMARY KEY,
    book_id INTEGER NOT NULL,
    chapter INTEGER NOT NULL,
    number INTEGER NOT NULL,
    FOREIGN KEY (book_id) REFERENCES books(id)
);

CREATE INDEX IF NOT EXISTS idx_verses_book ON verses(book_id);

-- 표제어(lemma)와 굴절형(form)
CREATE TABLE IF NOT EXISTS lemmas (
    id TEXT PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS lemma_forms (
    id TEXT PRIMARY KEY,
    lemma_id TEXT NOT NULL,
    grammar TEXT NOT NULL,
    FOREIGN KEY (lemma_id) REFERENCES lemmas(id)
);

CREATE INDEX IF NOT EXISTS idx_lemma_forms_lemma ON lemma_forms(lemma_id);

-- 글로스 단위가 되는 단어
CREATE TABLE IF NOT EXISTS words (
    id TEXT PRIMARY KEY,
    verse_id TEXT NOT NULL,
    text TEXT NOT NULL,
    form_id TEXT,
    FOREIGN KEY (verse_id) REFERENCES verses(id),
    FOREIGN KEY (form_id) REFERENCES lemma_forms(id)
);

CREATE INDEX IF NOT EXISTS idx_words_verse ON words(verse_id);
CREATE INDEX IF NOT EXISTS idx_words_form ON words(form_id);

-- 글로스: (단어, 언어)당 현재 번역 1행
CREATE TABLE IF NOT EXISTS glosses (
    word_id TEXT NOT NULL,
    language_id TEXT NOT NULL,
    gloss TEXT,
    state TEXT NOT NULL DEFAULT 'UNAPPROVED' CHECK (state IN ('APPROVED', 'UNAPPROVED')),
    updated_at INTEGER NOT NULL,
    PRIMARY KEY (word_id, language_id),
    FOREIGN KEY (word_id) REFERENCES words(id),
    FOREIGN KEY (language_id) REFERENCES languages(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_glosses_language ON glosses(language_id);

-- 글로스 변경 이력 (append-only)
CREATE TABLE IF NOT EXISTS gloss_history (
    word_id TEXT NOT NULL,
    language_id TEXT NOT NULL,
    timestamp INTEGER NOT NULL,
    gloss TEXT,
    state TEXT NOT NULL CHECK (state IN ('APPROVED', 'UNAPPROVED')),
    source TEXT NOT NULL CHECK (source IN ('USER', 'IMPORT')),
    PRIMARY KEY (word_id, language_id, timestamp),
    FOREIGN KEY (word_id) REFERENCES words(id),
    FOREIGN KEY (language_id) REFERENCES languages(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_gloss_history_language ON gloss_history(language_id);

-- 기계 번역 제안: (단어, 언어)당 1행
CREATE TABLE IF NOT EXISTS machine_glosses (
    word_id TEXT NOT NULL,
    language_id TEXT NOT NULL,
    gloss TEXT NOT NULL,
    updated_at INTEGER NOT NULL,
    PRIMARY KEY (word_id, language_id),
    FOREIGN KEY (word_id) REFERENCES words(id),
    FOREIGN KEY (language_id) REFERENCES languages(id) ON DELETE CASCADE
);

-- 번역자 노트: (단어, 언어)당 1행
CREATE TABLE IF NOT EXISTS translator_notes (
    word_id TEXT NOT NULL,
    language_id TEXT NOT NULL,
    author_id TEXT NOT NULL,
    timestamp INTEGER NOT NULL,
    content TEXT NOT NULL,
    PRIMARY KEY (word_id, language_id),
    FOREIGN KEY (word_id) REFERENCES words(id),
    FOREIGN KEY (language_id) REFERENCES languages(id) ON DELETE CASCADE,
    FOREIGN KEY (author_id) REFERENCES users(id) ON DELETE CASCADE
);

-- 각주: (단어, 언어)당 1행
CREATE TABLE IF NOT EXISTS footnotes (
    word_id TEXT NOT NULL,
    language_id TEXT NOT NULL,
    author_id TEXT NOT NULL,
    timestamp INTEGER NOT NULL,
    content TEXT NOT NULL,
    PRIMARY KEY (word_id, language_id),
    FOREIGN KEY (word_id) REFERENCES words(id),
    FOREIGN KEY (language_id) REFERENCES languages(id) ON DELETE CASCADE,
    FOREIGN KEY (author_id) REFERENCES users(id) ON DELETE CASCADE
);

-- 언어 멤버 역할 (복합 PK라 한 사용자가 역할을 여러 개 가질 수 있음)
CREATE TABLE IF NOT EXISTS language_member_roles (
    language_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    role TEXT NOT NULL CHECK (role IN ('ADMIN', 'TRANSLATOR', 'VIEWER')),
    PRIMARY KEY (language_id, user_id, role),
    FOREIGN KEY (language_id) REFERENCES languages(id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_member_roles_user ON language_member_roles(user_id);

-- 언어 임포트 작업: 언어당 최대 1행 (PK로 강제), 실행 로직 없음
CREATE TABLE IF NOT EXISTS language_import_jobs (
    language_id TEXT PRIMARY KEY,
    user_id TEXT,
    start_date INTEGER NOT NULL,
    end_date INTEGER,
    succeeded INTEGER,
    FOREIGN KEY (language_id) REFERENCES languages(id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);
"#;
