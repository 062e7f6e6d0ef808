use std::path::{Path, PathBuf};

use crate::error::{CommandError, CommandResult};

fn path_error(message: impl Into<String>) -> CommandError {
    CommandError {
        code: "PATH_ERROR".to_string(),
        message: message.into(),
        details: None,
    }
}

/// 사용자 입력 경로 검증 (스냅샷 내보내기/가져오기용)
///
/// canonicalize()로 정규화한 뒤 시스템 디렉토리 차단 목록과 비교합니다.
/// 내보내기는 대상 파일이 아직 없을 수 있으므로, 파일이 없으면 부모
/// 디렉토리를 정규화해서 조합합니다.
pub fn validate_path(path_str: &str) -> CommandResult<PathBuf> {
    let path = Path::new(path_str);

    let canonical_path = if path.exists() {
        path.canonicalize()
            .map_err(|e| path_error(format!("Invalid path: {}", e)))?
    } else {
        match path.parent() {
            Some(parent) if parent.exists() => {
                let canonical_parent = parent
                    .canonicalize()
                    .map_err(|e| path_error(format!("Invalid parent path: {}", e)))?;
                canonical_parent.join(path.file_name().unwrap_or_default())
            }
            Some(_) => return Err(path_error("Parent directory does not exist")),
            // 부모가 없는 경로 (루트 등)
            None => PathBuf::from(path_str),
        }
    };

    if is_blocked_path(&canonical_path) {
        return Err(CommandError {
            code: "SECURITY_ERROR".to_string(),
            message: "Access to system directory is blocked.".to_string(),
            details: None,
        });
    }

    Ok(canonical_path)
}

fn is_blocked_path(path: &Path) -> bool {
    let path_str = path.to_string_lossy();

    #[cfg(target_os = "windows")]
    {
        let lower = path_str.to_lowercase();
        if lower.contains(r"c:\windows")
            || lower.contains(r"c:\program files")
            || lower.contains(r"c:\program files (x86)")
        {
            return true;
        }
    }

    #[cfg(not(target_os = "windows"))]
    {
        // /Users (macOS), /home (Linux) 는 허용. 시스템 영역만 차단.
        const BLOCKED_PREFIXES: &[&str] = &[
            "/etc", "/var", "/proc", "/sys", "/bin", "/sbin", "/usr/bin", "/usr/sbin",
        ];
        if BLOCKED_PREFIXES.iter().any(|p| path_str.starts_with(p)) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn test_system_directories_are_blocked() {
        assert!(is_blocked_path(Path::new("/etc/passwd")));
        assert!(is_blocked_path(Path::new("/usr/bin/env")));
        assert!(!is_blocked_path(Path::new("/home/user/team.bte")));
    }

    #[test]
    fn test_export_path_in_existing_directory_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("team.bte");

        let validated = validate_path(&target.to_string_lossy()).unwrap();
        assert_eq!(validated.file_name().unwrap(), "team.bte");
    }

    #[test]
    fn test_missing_parent_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("no-such-dir").join("team.bte");

        let err = validate_path(&target.to_string_lossy()).unwrap_err();
        assert_eq!(err.code, "PATH_ERROR");
    }
}
