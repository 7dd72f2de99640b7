use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::ports::FileStore;
use crate::domain::storage::service::StorageService;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginResult;
use crate::domain::user::models::LoginUserCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;

/// Domain service implementing account registration and session login.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// Password hashing and verification run on the blocking pool: both are
/// CPU-bound and must not stall unrelated request processing.
pub struct AuthService<UR, FS>
where
    UR: UserRepository,
    FS: FileStore,
{
    repository: Arc<UR>,
    storage: Arc<StorageService<FS>>,
    authenticator: Arc<auth::Authenticator>,
    token_expiration_hours: Option<i64>,
}

impl<UR, FS> AuthService<UR, FS>
where
    UR: UserRepository,
    FS: FileStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User record persistence implementation
    /// * `storage` - Per-user storage directory service
    /// * `authenticator` - Password and token primitives
    /// * `token_expiration_hours` - Token lifetime, or None for non-expiring tokens
    pub fn new(
        repository: Arc<UR>,
        storage: Arc<StorageService<FS>>,
        authenticator: Arc<auth::Authenticator>,
        token_expiration_hours: Option<i64>,
    ) -> Self {
        Self {
            repository,
            storage,
            authenticator,
            token_expiration_hours,
        }
    }
}

#[async_trait]
impl<UR, FS> AuthServicePort for AuthService<UR, FS>
where
    UR: UserRepository,
    FS: FileStore,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(|e| UserError::Unknown(format!("Hashing task failed: {}", e)))??;

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
        };

        // The record must be durable before the directory is provisioned.
        let created_user = self.repository.create(user).await?;

        // A provisioning failure leaves the account usable: every
        // authenticated access re-ensures the directory.
        let upload_dir = self.storage.resolve(&created_user.id);
        if let Err(e) = self.storage.ensure(&upload_dir).await {
            tracing::error!(
                user_id = %created_user.id,
                error = %e,
                "Failed to provision upload directory at registration"
            );
        }

        Ok(created_user)
    }

    async fn login(&self, command: LoginUserCommand) -> Result<LoginResult, UserError> {
        let user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or(UserError::NotFound(command.email))?;

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let stored_hash = user.password_hash.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || authenticator.verify_password(&password, &stored_hash))
                .await
                .map_err(|e| UserError::Unknown(format!("Verification task failed: {}", e)))??;

        if !is_valid {
            return Err(UserError::InvalidCredentials);
        }

        let claims = auth::Claims::for_user(
            user.id,
            user.email.as_str().to_string(),
            self.token_expiration_hours,
        );
        let token = self.authenticator.issue_token(&claims)?;

        let upload_dir = self.storage.resolve(&user.id);
        self.storage.ensure(&upload_dir).await?;
        let files = self.storage.list_files(&upload_dir).await?;

        Ok(LoginResult { user, token, files })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use mockall::mock;

    use super::*;
    use crate::domain::storage::errors::StorageError;
    use crate::domain::user::models::EmailAddress;

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
        }
    }

    mock! {
        pub TestFileStore {}

        #[async_trait]
        impl FileStore for TestFileStore {
            async fn path_exists(&self, path: &Path) -> Result<bool, StorageError>;
            async fn make_dir_all(&self, path: &Path) -> Result<(), StorageError>;
            async fn list_dir(&self, path: &Path) -> Result<Vec<String>, StorageError>;
            async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), StorageError>;
        }
    }

    const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes!";

    fn service(
        repository: MockTestUserRepository,
        file_store: MockTestFileStore,
    ) -> AuthService<MockTestUserRepository, MockTestFileStore> {
        let storage = Arc::new(StorageService::new(
            Arc::new(file_store),
            "/srv/vault",
            "uploads",
        ));
        AuthService::new(
            Arc::new(repository),
            storage,
            Arc::new(auth::Authenticator::new(TEST_SECRET)),
            None,
        )
    }

    fn existing_user(email: &str, password: &str) -> User {
        let authenticator = auth::Authenticator::new(TEST_SECRET);
        User {
            id: UserId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();
        let mut file_store = MockTestFileStore::new();

        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "test@example.com"
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(Ok);

        file_store
            .expect_path_exists()
            .times(1)
            .returning(|_| Ok(false));
        file_store
            .expect_make_dir_all()
            .times(1)
            .returning(|_| Ok(()));

        let service = service(repository, file_store);

        let command = RegisterUserCommand::new(
            EmailAddress::new("test@example.com".to_string()).unwrap(),
            "password123".to_string(),
        );

        let user = service.register(command).await.expect("Register failed");
        assert_eq!(user.email.as_str(), "test@example.com");
        // Password is hashed with real Argon2, never stored in plaintext
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();
        let file_store = MockTestFileStore::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ))
        });

        let service = service(repository, file_store);

        let command = RegisterUserCommand::new(
            EmailAddress::new("test@example.com".to_string()).unwrap(),
            "password123".to_string(),
        );

        let result = service.register(command).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_register_survives_provisioning_failure() {
        let mut repository = MockTestUserRepository::new();
        let mut file_store = MockTestFileStore::new();

        repository.expect_create().times(1).returning(Ok);

        file_store
            .expect_path_exists()
            .times(1)
            .returning(|_| Err(StorageError::Unavailable("disk gone".to_string())));

        let service = service(repository, file_store);

        let command = RegisterUserCommand::new(
            EmailAddress::new("test@example.com".to_string()).unwrap(),
            "password123".to_string(),
        );

        // The record is already persisted; the directory is re-ensured lazily
        // on the next authenticated access.
        let result = service.register(command).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_login_success_returns_token_and_listing() {
        let mut repository = MockTestUserRepository::new();
        let mut file_store = MockTestFileStore::new();

        let user = existing_user("test@example.com", "password123");
        let user_id = user.id;

        let returned_user = user.clone();
        repository
            .expect_find_by_email()
            .withf(|email| email == "test@example.com")
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        file_store
            .expect_path_exists()
            .times(1)
            .returning(|_| Ok(true));
        file_store
            .expect_list_dir()
            .times(1)
            .returning(|_| Ok(vec!["2024-06-03-notes.txt".to_string()]));

        let service = service(repository, file_store);

        let result = service
            .login(LoginUserCommand {
                email: "test@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .expect("Login failed");

        assert_eq!(result.user.id, user_id);
        assert_eq!(result.files, vec!["2024-06-03-notes.txt".to_string()]);

        // The token embeds exactly the identity it was issued for
        let authenticator = auth::Authenticator::new(TEST_SECRET);
        let claims = authenticator
            .validate_token(&result.token)
            .expect("Token should validate");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "test@example.com");
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repository = MockTestUserRepository::new();
        let file_store = MockTestFileStore::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository, file_store);

        let result = service
            .login(LoginUserCommand {
                email: "nobody@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_issues_no_token() {
        let mut repository = MockTestUserRepository::new();
        let mut file_store = MockTestFileStore::new();

        let user = existing_user("test@example.com", "password123");
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        // No storage access happens on a failed login
        file_store.expect_path_exists().times(0);
        file_store.expect_list_dir().times(0);

        let service = service(repository, file_store);

        let result = service
            .login(LoginUserCommand {
                email: "test@example.com".to_string(),
                password: "wrong_password".to_string(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_storage_failure_is_fatal() {
        let mut repository = MockTestUserRepository::new();
        let mut file_store = MockTestFileStore::new();

        let user = existing_user("test@example.com", "password123");
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        file_store
            .expect_path_exists()
            .times(1)
            .returning(|_| Err(StorageError::Unavailable("permission denied".to_string())));

        let service = service(repository, file_store);

        let result = service
            .login(LoginUserCommand {
                email: "test@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), UserError::Storage(_)));
    }
}
