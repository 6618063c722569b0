//! 베어러 토큰 값 객체
//!
//! 발급된 토큰 원문은 응답으로 한 번만 전달되고, 저장소에는 SHA-256 해시만 남습니다.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// 토큰 원문 접두사 (opaque access token)
pub const TOKEN_PREFIX: &str = "oat_";

const TOKEN_BYTES: usize = 32;

/// 로그인 성공 시 클라이언트에게 전달되는 토큰
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: u64,
}

/// 추측 불가능한 새 토큰 원문을 생성합니다.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);

    format!("{}{}", TOKEN_PREFIX, URL_SAFE_NO_PAD.encode(bytes))
}

/// 저장 및 조회에 사용하는 토큰 해시 (소문자 hex)
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_unique() {
        let first = generate_token();
        let second = generate_token();

        assert!(first.starts_with(TOKEN_PREFIX));
        assert_ne!(first, second);
        // 32 bytes → 43 base64url 문자
        assert_eq!(first.len(), TOKEN_PREFIX.len() + 43);
    }

    #[test]
    fn test_hash_is_stable_hex() {
        let token = generate_token();
        let hash = hash_token(&token);

        assert_eq!(hash, hash_token(&token));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash, hash_token("oat_other"));
    }
}
