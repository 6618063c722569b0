//! Google OAuth 응답 DTO 모듈
//!
//! Authorization Code 를 토큰으로 교환할 때 Google 이 반환하는 데이터를 표현합니다.

use serde::Deserialize;

/// Google OAuth 2.0 토큰 교환 응답
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderTokens {
    /// Google OAuth 액세스 토큰
    pub access_token: String,

    /// OpenID Connect ID 토큰. `profile email` 스코프에서도 누락될 수 있어 선택값으로 둡니다.
    #[serde(default)]
    pub id_token: Option<String>,

    /// 리프레시 토큰 (`access_type=offline` 첫 동의 시에만 전달)
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// 토큰 만료 시간 (초 단위)
    #[serde(default)]
    pub expires_in: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_token_response() {
        let tokens: ProviderTokens = serde_json::from_value(serde_json::json!({
            "access_token": "ya29.x",
            "token_type": "Bearer",
            "scope": "profile email"
        }))
        .unwrap();

        assert_eq!(tokens.access_token, "ya29.x");
        assert!(tokens.id_token.is_none());
        assert!(tokens.expires_in.is_none());
    }
}
