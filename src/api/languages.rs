//! 언어 API
//!
//! /api/languages/* 엔드포인트 래퍼. 메서드당 HTTP 호출 1회,
//! 엔드포인트/HTTP 메서드와 1:1 대응. 페이지네이션이나 로컬 상태 없음.

use reqwest::Method;

use crate::api::types::{
    CreateLanguageRequest, ImportJobResponse, InviteMemberRequest, LanguageResponse,
    LanguagesResponse, MembersResponse, StartImportRequest, UpdateLanguageRequest,
    UpdateMemberRequest,
};
use crate::api::{ApiClient, ApiError};
use crate::models::{Language, Member, Role};

impl ApiClient {
    /// 언어 목록 조회
    pub async fn list_languages(&self) -> Result<Vec<Language>, ApiError> {
        let response = self.request(Method::GET, "/api/languages").await.send().await?;
        let parsed: LanguagesResponse = Self::parse_json(response).await?;
        Ok(parsed.data)
    }

    /// 코드로 언어 조회
    pub async fn find_language(&self, code: &str) -> Result<Language, ApiError> {
        let path = format!("/api/languages/{}", code);
        let response = self.request(Method::GET, &path).await.send().await?;
        let parsed: LanguageResponse = Self::parse_json(response).await?;
        Ok(parsed.data)
    }

    /// 언어 생성
    pub async fn create_language(&self, body: &CreateLanguageRequest) -> Result<(), ApiError> {
        println!("[Languages] Creating language: {}", body.code);

        let response = self
            .request(Method::POST, "/api/languages")
            .await
            .json(body)
            .send()
            .await?;

        Self::expect_ok(response).await
    }

    /// 언어 설정 수정 (이름/폰트/쓰기 방향)
    pub async fn update_language(
        &self,
        code: &str,
        body: &UpdateLanguageRequest,
    ) -> Result<(), ApiError> {
        let path = format!("/api/languages/{}", code);
        let response = self.request(Method::PATCH, &path).await.json(body).send().await?;
        Self::expect_ok(response).await
    }

    /// 글로스 일괄 임포트 작업 시작
    pub async fn start_import(&self, code: &str, source: &str) -> Result<(), ApiError> {
        let body = StartImportRequest {
            import: source.to_string(),
        };

        println!("[Languages] Starting import for {}: {}", code, source);

        let path = format!("/api/languages/{}/import", code);
        let response = self.request(Method::POST, &path).await.json(&body).send().await?;
        Self::expect_ok(response).await
    }

    /// 임포트 작업 상태 조회
    pub async fn get_import(&self, code: &str) -> Result<ImportJobResponse, ApiError> {
        let path = format!("/api/languages/{}/import", code);
        let response = self.request(Method::GET, &path).await.send().await?;
        Self::parse_json(response).await
    }

    /// 언어 멤버 목록 조회
    pub async fn list_members(&self, code: &str) -> Result<Vec<Member>, ApiError> {
        let path = format!("/api/languages/{}/members", code);
        let response = self.request(Method::GET, &path).await.send().await?;
        let parsed: MembersResponse = Self::parse_json(response).await?;
        Ok(parsed.data)
    }

    /// 멤버 초대. 본문은 email/roles 두 필드만 보냅니다.
    pub async fn invite_member(
        &self,
        code: &str,
        email: &str,
        roles: &[Role],
    ) -> Result<(), ApiError> {
        let body = InviteMemberRequest {
            email: email.to_string(),
            roles: roles.to_vec(),
        };

        println!("[Languages] Inviting member to {}: {}", code, email);

        let path = format!("/api/languages/{}/members", code);
        let response = self.request(Method::POST, &path).await.json(&body).send().await?;
        Self::expect_ok(response).await
    }

    /// 멤버 역할 변경
    pub async fn update_member(
        &self,
        code: &str,
        user_id: &str,
        roles: &[Role],
    ) -> Result<(), ApiError> {
        let body = UpdateMemberRequest {
            roles: roles.to_vec(),
        };

        let path = format!("/api/languages/{}/members/{}", code, user_id);
        let response = self.request(Method::PATCH, &path).await.json(&body).send().await?;
        Self::expect_ok(response).await
    }

    /// 멤버 제거
    pub async fn remove_member(&self, code: &str, user_id: &str) -> Result<(), ApiError> {
        println!("[Languages] Removing member from {}: {}", code, user_id);

        let path = format!("/api/languages/{}/members/{}", code, user_id);
        let response = self.request(Method::DELETE, &path).await.send().await?;
        Self::expect_ok(response).await
    }
}
