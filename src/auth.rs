//! Password hashing and session tokens for storefront accounts.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::{Role, User};
use crate::utils::StoreError;

const TOKEN_TTL_DAYS: i64 = 7;
const DEFAULT_SECRET: &str = "delicious-dry-fruits-secret-key-change-in-production";

fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string())
}

/// Session token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Expiration, seconds since the epoch.
    pub exp: i64,
}

/// Hash a password with Argon2id, returning a PHC string.
pub fn hash_password(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::Auth(format!("failed to hash password: {}", e)))
}

/// Verify a password against a stored PHC hash. Malformed hashes verify as
/// false rather than erroring, so a corrupted record reads as a failed login.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Issue a signed session token for the user, valid for 7 days.
pub fn generate_token(user: &User) -> Result<String, StoreError> {
    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        role: user.role,
        exp: (Utc::now() + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_bytes()),
    )
    .map_err(|e| StoreError::Auth(format!("failed to sign token: {}", e)))
}

/// Decode and validate a session token. Returns `None` for anything invalid:
/// bad signature, expired, malformed.
pub fn verify_token(token: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

/// Pick the session token out of a request: cookie first, then a `Bearer`
/// Authorization header.
pub fn extract_token(auth_header: Option<&str>, cookie_token: Option<&str>) -> Option<String> {
    if let Some(cookie) = cookie_token {
        return Some(cookie.to_string());
    }
    auth_header
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// Minimal email shape check: one `@`, non-empty local part, a dot in the
/// domain, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = match parts.next() {
        Some(d) => d,
        None => return false,
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let mut dot_parts = domain.split('.');
    match (dot_parts.next(), dot_parts.next()) {
        (Some(a), Some(b)) => !a.is_empty() && !b.is_empty(),
        _ => false,
    }
}

/// Enforce the minimum password length.
pub fn validate_password(password: &str) -> Result<(), StoreError> {
    if password.len() < 6 {
        return Err(StoreError::Auth(
            "Password must be at least 6 characters long".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::now_iso;

    fn sample_user() -> User {
        User {
            id: "u1".to_string(),
            email: "jane@example.com".to_string(),
            password: "hash".to_string(),
            name: "Jane".to_string(),
            role: Role::Admin,
            phone: None,
            created_at: now_iso(),
        }
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn test_token_round_trip() {
        let user = sample_user();
        let token = generate_token(&user).unwrap();
        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.email, "jane@example.com");
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = generate_token(&sample_user()).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(verify_token(&tampered).is_none());
        assert!(verify_token("not.a.token").is_none());
    }

    #[test]
    fn test_extract_token_prefers_cookie() {
        assert_eq!(
            extract_token(Some("Bearer abc"), Some("cookie-token")),
            Some("cookie-token".to_string())
        );
        assert_eq!(extract_token(Some("Bearer abc"), None), Some("abc".to_string()));
        assert_eq!(extract_token(Some("Basic abc"), None), None);
        assert_eq!(extract_token(None, None), None);
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane example@x.com"));
        assert!(!is_valid_email("jane"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password("secret").is_ok());
        let err = validate_password("short").unwrap_err();
        assert!(err.to_string().contains("at least 6 characters"));
    }
}
