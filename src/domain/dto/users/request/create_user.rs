//! # 회원가입 요청 DTO
//!
//! `POST /api/v1/sign-up` (별칭 `/api/v1/usuarios`) 요청 본문을 매핑합니다.
//!
//! ## 검증 규칙
//!
//! - `name`: 비어 있으면 안 됨
//! - `email`: 이메일 형식 (중복 여부는 서비스 계층에서 확인)
//! - `secret`: 비어 있으면 안 됨 (`password` 키도 허용)
//!
//! 누락된 필드는 빈 문자열로 채워진 뒤 필드 단위 검증 에러로 보고됩니다.
//!
//! ```json
//! { "name": "Ana", "email": "ana@x.com", "secret": "p1" }
//! ```

use serde::Deserialize;
use validator::Validate;

/// 새로운 로컬 계정 생성을 위한 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,

    #[serde(default, alias = "password")]
    #[validate(length(min = 1, message = "secret is required"))]
    pub secret: String,
}

impl SignUpRequest {
    /// 앞뒤 공백을 제거하고 이메일을 소문자로 맞춥니다.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self
    }
}
