use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Claims;
use crate::token::TokenError;
use crate::token::TokenService;

/// Authentication coordinator combining password verification and token issuance.
///
/// One instance is shared process-wide; all operations are stateless, so no
/// identity ever survives a request through this type.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `token_secret` - Secret key for token signing
    pub fn new(token_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(token_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// # Returns
    /// True if the password matches
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is malformed
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a session token for an authenticated identity.
    ///
    /// # Errors
    /// * `TokenError` - Token encoding failed
    pub fn issue_token(&self, claims: &Claims) -> Result<String, TokenError> {
        self.token_service.issue(claims)
    }

    /// Validate a session token and return its claims.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, tampered with, or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_service.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_authentication_flow() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        assert!(authenticator
            .verify_password(password, &hash)
            .expect("Failed to verify password"));

        let claims = Claims::for_user("user123", "alice@example.com".to_string(), None);
        let token = authenticator
            .issue_token(&claims)
            .expect("Failed to issue token");

        let decoded = authenticator
            .validate_token(&token)
            .expect("Token validation failed");
        assert_eq!(decoded.sub, "user123");
        assert_eq!(decoded.email, "alice@example.com");
    }

    #[test]
    fn test_wrong_password_verifies_false() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let is_valid = authenticator
            .verify_password("wrong_password", &hash)
            .expect("Verification should not error on a wrong password");
        assert!(!is_valid);
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
