//! 인증 API
//!
//! /api/auth/* 엔드포인트 래퍼. 메서드당 HTTP 호출 1회.

use reqwest::Method;

use crate::api::types::{AcceptInviteRequest, InviteResponse, LoginRequest, LoginResponse};
use crate::api::{ApiClient, ApiError};
use crate::models::SessionInfo;

impl ApiClient {
    /// 현재 세션 조회. 로그인 상태가 아니면 401 에러.
    pub async fn session(&self) -> Result<SessionInfo, ApiError> {
        let response = self.request(Method::GET, "/api/auth/session").await.send().await?;
        Self::parse_json(response).await
    }

    /// 로그인. 성공하면 발급된 세션 토큰을 메모리 + 키체인에 저장합니다.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        println!("[Auth] Logging in: {}", email);

        let response = self
            .request(Method::POST, "/api/auth/login")
            .await
            .json(&body)
            .send()
            .await?;

        let parsed: LoginResponse = Self::parse_json(response).await?;
        self.set_token(parsed.token.clone()).await;
        Ok(parsed)
    }

    /// 로그아웃. 서버 세션을 종료한 뒤 저장된 토큰을 지웁니다.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self.request(Method::POST, "/api/auth/logout").await.send().await?;
        Self::expect_ok(response).await?;

        self.clear_token().await;
        Ok(())
    }

    /// 초대 토큰으로 초대 정보(이메일) 조회
    pub async fn get_invite(&self, token: &str) -> Result<InviteResponse, ApiError> {
        let response = self
            .request(Method::GET, "/api/auth/invite")
            .await
            .query(&[("token", token)])
            .send()
            .await?;

        Self::parse_json(response).await
    }

    /// 초대 수락 (계정 생성). 본문은 token/name/password 세 필드만 보냅니다.
    pub async fn accept_invite(
        &self,
        token: &str,
        name: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let body = AcceptInviteRequest {
            token: token.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        };

        println!("[Auth] Accepting invite: {}", name);

        let response = self
            .request(Method::POST, "/api/auth/invite")
            .await
            .json(&body)
            .send()
            .await?;

        Self::expect_ok(response).await
    }
}
