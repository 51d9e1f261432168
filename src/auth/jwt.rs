use crate::types::{AppError, Claims, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Role claim carried by every issued token.
const ROLE_USER: &str = "User";

/// Authentication service for JWT token management and password hashing.
///
/// Provides secure password hashing using Argon2id and JWT token
/// generation/verification using HS256. The signing secret, issuer,
/// audience, and expiry are injected from configuration.
pub struct AuthService {
    jwt_secret: String,
    issuer: String,
    audience: String,
    token_expiry: i64,
}

impl AuthService {
    /// Creates a new AuthService with the given configuration.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for signing JWTs (should be at least 32 chars)
    /// * `issuer` - `iss` claim stamped into and required of every token
    /// * `audience` - `aud` claim stamped into and required of every token
    /// * `token_expiry` - Token validity in seconds
    pub fn new(jwt_secret: String, issuer: String, audience: String, token_expiry: i64) -> Self {
        Self {
            jwt_secret,
            issuer,
            audience,
            token_expiry,
        }
    }

    /// Hashes a password using Argon2id.
    ///
    /// Returns a PHC-formatted hash string.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Auth(format!("Failed to hash password: {}", e)))
    }

    /// Verifies a password against an Argon2 hash.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Auth(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generates a bearer token for a user.
    ///
    /// The token carries the username as `sub`, the fixed role claim
    /// `"User"`, and expires `token_expiry` seconds from now. There is no
    /// refresh mechanism; callers re-login after expiry.
    pub fn generate_token(&self, username: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            role: ROLE_USER.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: (now + Duration::seconds(self.token_expiry)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Auth(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a JWT token and returns the claims.
    ///
    /// Signature, expiry, issuer, and audience are all validated.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| AppError::Auth(format!("Invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> AuthService {
        AuthService::new(
            "test-secret-key-that-is-at-least-32-chars".to_string(),
            "basket".to_string(),
            "basket-clients".to_string(),
            3600, // 1 hour
        )
    }

    #[test]
    fn test_password_hashing() {
        let service = create_test_service();
        let password = "test_password_123";

        let hash = service
            .hash_password(password)
            .expect("should hash password");

        // Hash should not equal the original password
        assert_ne!(hash, password);

        // Hash should be in PHC format (starts with $argon2)
        assert!(hash.starts_with("$argon2"), "hash should be in PHC format");
    }

    #[test]
    fn test_password_verification_success() {
        let service = create_test_service();
        let password = "secure_password_456";

        let hash = service
            .hash_password(password)
            .expect("should hash password");
        let is_valid = service
            .verify_password(password, &hash)
            .expect("should verify");

        assert!(is_valid, "correct password should verify successfully");
    }

    #[test]
    fn test_password_verification_failure() {
        let service = create_test_service();
        let password = "correct_password";
        let wrong_password = "wrong_password";

        let hash = service
            .hash_password(password)
            .expect("should hash password");
        let is_valid = service
            .verify_password(wrong_password, &hash)
            .expect("should verify");

        assert!(!is_valid, "wrong password should fail verification");
    }

    #[test]
    fn test_token_roundtrip() {
        let service = create_test_service();

        let token = service.generate_token("alice").expect("should generate");
        assert!(!token.is_empty(), "token should not be empty");

        let claims = service.verify_token(&token).expect("should verify token");

        assert_eq!(claims.sub, "alice", "subject should be the username");
        assert_eq!(claims.role, "User", "role claim should be fixed");
        assert_eq!(claims.iss, "basket");
        assert_eq!(claims.aud, "basket-clients");
    }

    #[test]
    fn test_token_verification_invalid_token() {
        let service = create_test_service();

        let result = service.verify_token("invalid.token.here");

        assert!(result.is_err(), "invalid token should fail verification");
    }

    #[test]
    fn test_token_verification_wrong_secret() {
        let service1 = AuthService::new(
            "secret-one-that-is-32-chars-long".to_string(),
            "basket".to_string(),
            "basket-clients".to_string(),
            3600,
        );
        let service2 = AuthService::new(
            "secret-two-that-is-32-chars-long".to_string(),
            "basket".to_string(),
            "basket-clients".to_string(),
            3600,
        );

        let token = service1.generate_token("bob").expect("should generate");
        let result = service2.verify_token(&token);

        assert!(result.is_err(), "token from different secret should fail");
    }

    #[test]
    fn test_token_verification_wrong_audience() {
        let service = create_test_service();
        let other = AuthService::new(
            "test-secret-key-that-is-at-least-32-chars".to_string(),
            "basket".to_string(),
            "someone-else".to_string(),
            3600,
        );

        let token = service.generate_token("carol").expect("should generate");
        let result = other.verify_token(&token);

        assert!(result.is_err(), "token for another audience should fail");
    }

    #[test]
    fn test_claims_expiration() {
        let service = create_test_service();
        let token = service.generate_token("dave").expect("should generate");
        let claims = service.verify_token(&token).expect("should verify");

        let now = chrono::Utc::now().timestamp() as usize;

        // iat should be around now
        assert!(
            claims.iat <= now && claims.iat >= now - 5,
            "iat should be current timestamp"
        );

        // exp should be iat + 3600 seconds
        let expected_exp = claims.iat + 3600;
        assert!(
            claims.exp >= expected_exp - 5 && claims.exp <= expected_exp + 5,
            "exp should be one hour out"
        );
    }
}
