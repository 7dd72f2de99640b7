use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginResult;
use crate::domain::user::models::LoginUserCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;

/// Port for account and session operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account: hash the password, persist the record, and
    /// provision the user's upload directory.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email and password
    ///
    /// # Returns
    /// Created user entity (never includes the plaintext password)
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - User store operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Start a session: verify credentials, issue a token, and return the
    /// current upload directory listing.
    ///
    /// # Arguments
    /// * `command` - Raw email and plaintext password
    ///
    /// # Returns
    /// LoginResult with the user, a signed session token, and file listing
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `Token` - Token issuance failed
    /// * `Storage` - Upload directory could not be ensured or listed
    /// * `DatabaseError` - User store operation failed
    async fn login(&self, command: LoginUserCommand) -> Result<LoginResult, UserError>;
}

/// Persistence operations for the user record store.
///
/// The store is an opaque append-only record collection; implementations must
/// make the duplicate check and the append one atomic step so that two
/// concurrent registrations with the same email cannot both succeed.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user record.
    ///
    /// # Arguments
    /// * `user` - User entity to append
    ///
    /// # Returns
    /// The persisted user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - A record with this email is already stored
    /// * `DatabaseError` - The store could not be persisted
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve a user record by email address (case-sensitive exact match).
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - The store could not be read
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
}
