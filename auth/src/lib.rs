//! Authentication utilities library
//!
//! Provides the credential and session primitives for the vault service:
//! - Password hashing (Argon2id)
//! - Session token issuance and verification (JWT)
//! - Authentication coordination
//!
//! The service defines its own ports and adapts these implementations, so the
//! domain layer never depends on a concrete hashing or token library.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{TokenService, Claims};
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_user("user123", "alice@example.com".to_string(), None);
//! let token = tokens.issue(&claims).unwrap();
//! let decoded = tokens.verify(&token).unwrap();
//! assert_eq!(decoded.email, "alice@example.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify, then issue a token
//! assert!(auth.verify_password("password123", &hash).unwrap());
//! let claims = Claims::for_user("user123", "alice@example.com".to_string(), Some(24));
//! let token = auth.issue_token(&claims).unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&token).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenService;
