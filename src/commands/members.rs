//! Member Commands
//!
//! 언어 멤버 관리 (조회/초대/역할 변경/제거). 역할 부여는 누적이라
//! 한 사용자가 같은 언어에서 역할을 여러 개 가질 수 있습니다.

use serde::Deserialize;
use tauri::State;

use crate::api::API_CLIENT;
use crate::commands::lock_db;
use crate::db::DbState;
use crate::error::{CommandError, CommandResult};
use crate::i18n::{self, t};
use crate::models::{Member, Role};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMembersArgs {
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteMemberArgs {
    pub code: String,
    pub email: String,
    pub roles: Vec<Role>,
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRolesArgs {
    pub code: String,
    pub user_id: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveMemberArgs {
    pub code: String,
    pub user_id: String,
}

/// 초대 폼 검증: 이메일과 역할 1개 이상 필수
fn validate_invite(email: &str, roles: &[Role], locale: &str) -> Result<(), CommandError> {
    if email.trim().is_empty() {
        return Err(CommandError {
            code: "VALIDATION_ERROR".to_string(),
            message: t(locale, "members.email_required"),
            details: None,
        });
    }
    if roles.is_empty() {
        return Err(CommandError {
            code: "VALIDATION_ERROR".to_string(),
            message: t(locale, "members.roles_required"),
            details: None,
        });
    }
    Ok(())
}

/// 멤버 목록 조회 (로컬 역할 캐시 교체 포함)
#[tauri::command]
pub async fn list_members(
    args: ListMembersArgs,
    db_state: State<'_, DbState>,
) -> CommandResult<Vec<Member>> {
    let code = args.code.trim();
    let members = API_CLIENT.list_members(code).await.map_err(CommandError::from)?;

    let db = lock_db(&db_state)?;
    db.replace_members(code, &members).map_err(CommandError::from)?;

    Ok(members)
}

/// 멤버 초대. 본문은 email/roles만 전송됩니다.
#[tauri::command]
pub async fn invite_member(args: InviteMemberArgs) -> CommandResult<()> {
    let locale = args.locale.as_deref().unwrap_or(i18n::DEFAULT_LOCALE);
    validate_invite(&args.email, &args.roles, locale)?;

    API_CLIENT
        .invite_member(args.code.trim(), args.email.trim(), &args.roles)
        .await
        .map_err(CommandError::from)
}

/// 멤버 역할 집합 변경 (원격 반영 후 로컬 미러 갱신)
#[tauri::command]
pub async fn update_member_roles(
    args: UpdateMemberRolesArgs,
    db_state: State<'_, DbState>,
) -> CommandResult<()> {
    let code = args.code.trim();
    API_CLIENT
        .update_member(code, &args.user_id, &args.roles)
        .await
        .map_err(CommandError::from)?;

    let db = lock_db(&db_state)?;
    db.set_member_roles(code, &args.user_id, &args.roles)
        .map_err(CommandError::from)?;

    Ok(())
}

/// 멤버 제거 (원격 반영 후 로컬 미러 갱신)
#[tauri::command]
pub async fn remove_member(
    args: RemoveMemberArgs,
    db_state: State<'_, DbState>,
) -> CommandResult<()> {
    let code = args.code.trim();
    API_CLIENT
        .remove_member(code, &args.user_id)
        .await
        .map_err(CommandError::from)?;

    let db = lock_db(&db_state)?;
    db.remove_member(code, &args.user_id).map_err(CommandError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_requires_email() {
        let err = validate_invite("  ", &[Role::Viewer], "en").unwrap_err();
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.message, "Please enter an email address.");

        let err = validate_invite("", &[Role::Viewer], "ko").unwrap_err();
        assert_eq!(err.message, "이메일 주소를 입력해 주세요.");
    }

    #[test]
    fn test_invite_requires_at_least_one_role() {
        let err = validate_invite("viewer@example.com", &[], "en").unwrap_err();
        assert_eq!(err.message, "Select at least one role.");
    }

    #[test]
    fn test_valid_invite_passes() {
        assert!(validate_invite("viewer@example.com", &[Role::Translator], "en").is_ok());
    }
}
