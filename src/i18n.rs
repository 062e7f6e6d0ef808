//! UI 문구 로컬라이제이션
//!
//! 프론트엔드가 활성 로케일을 명령 인자로 넘기고, 백엔드에서 생성되는
//! 사용자 노출 메시지(폼 검증, 로그인 실패 등)를 해당 언어로 반환합니다.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// 기본 로케일 (폴백 대상)
pub const DEFAULT_LOCALE: &str = "en";

static LOCALES: Lazy<HashMap<&'static str, HashMap<String, String>>> = Lazy::new(|| {
    let sources = [
        ("en", include_str!("../locales/en.json")),
        ("ko", include_str!("../locales/ko.json")),
    ];

    let mut map = HashMap::new();
    for (code, raw) in sources {
        match serde_json::from_str::<HashMap<String, String>>(raw) {
            Ok(table) => {
                map.insert(code, table);
            }
            Err(e) => eprintln!("[I18n] Failed to parse locale {}: {}", code, e),
        }
    }
    map
});

/// "ko-KR", "en_US" 같은 태그에서 언어 코드만 추출
fn base_language(locale: &str) -> &str {
    locale
        .split(['-', '_'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_LOCALE)
}

/// 키에 해당하는 문구 조회
///
/// 요청 로케일 → 기본 로케일(en) → 키 문자열 자체 순으로 폴백합니다.
pub fn t(locale: &str, key: &str) -> String {
    let base = base_language(locale);

    if let Some(text) = LOCALES.get(base).and_then(|table| table.get(key)) {
        return text.clone();
    }
    if let Some(text) = LOCALES.get(DEFAULT_LOCALE).and_then(|table| table.get(key)) {
        return text.clone();
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_per_locale() {
        assert_eq!(
            t("en", "login.invalid_credentials"),
            "The email or password you entered is incorrect."
        );
        assert_eq!(
            t("ko", "login.invalid_credentials"),
            "이메일 또는 비밀번호가 올바르지 않습니다."
        );
    }

    #[test]
    fn test_region_tag_uses_base_language() {
        assert_eq!(t("ko-KR", "login.email_required"), t("ko", "login.email_required"));
        assert_eq!(t("en_US", "login.email_required"), t("en", "login.email_required"));
    }

    #[test]
    fn test_unknown_locale_falls_back_to_english() {
        assert_eq!(
            t("fr", "login.password_required"),
            "Please enter your password."
        );
    }

    #[test]
    fn test_unknown_key_returns_key() {
        assert_eq!(t("en", "login.no_such_key"), "login.no_such_key");
    }
}
