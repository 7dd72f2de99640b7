use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// On-disk representation of one user record.
///
/// Field names match the persisted JSON document layout; the collection is
/// keyed by unique email.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredUser {
    email: String,
    #[serde(rename = "passwordHash")]
    password_hash: String,
    #[serde(rename = "userID")]
    user_id: String,
}

impl From<&User> for StoredUser {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.as_str().to_string(),
            password_hash: user.password_hash.clone(),
            user_id: user.id.to_string(),
        }
    }
}

impl StoredUser {
    fn try_into_user(&self) -> Result<User, UserError> {
        Ok(User {
            id: UserId::from_string(&self.user_id)?,
            email: EmailAddress::new(self.email.clone())?,
            password_hash: self.password_hash.clone(),
        })
    }
}

/// User record store backed by a single JSON document.
///
/// The whole collection lives in memory behind a mutex and is rewritten on
/// every append. The mutex makes check-duplicate, append, and persist one
/// critical section, so two concurrent registrations with the same email can
/// never both succeed.
pub struct JsonFileUserRepository {
    path: PathBuf,
    users: Mutex<Vec<StoredUser>>,
}

impl JsonFileUserRepository {
    /// Load the repository from disk, starting empty when the file is absent.
    ///
    /// # Arguments
    /// * `path` - Location of the JSON document
    ///
    /// # Errors
    /// * `DatabaseError` - The file exists but could not be read or parsed
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, UserError> {
        let path = path.into();

        let users = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| UserError::DatabaseError(format!("Corrupt user store: {}", e)))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(UserError::DatabaseError(format!(
                    "Failed to read user store: {}",
                    e
                )))
            }
        };

        Ok(Self {
            path,
            users: Mutex::new(users),
        })
    }

    /// Replace the document atomically: write a sibling temp file, then
    /// rename it over the original so an interrupted write never leaves a
    /// truncated store behind.
    async fn persist(&self, users: &[StoredUser]) -> Result<(), UserError> {
        let contents = serde_json::to_string_pretty(users).map_err(|e| {
            UserError::DatabaseError(format!("Failed to serialize user store: {}", e))
        })?;

        let tmp_path = self.path.with_extension("tmp");
        tokio::fs::write(&tmp_path, contents)
            .await
            .map_err(|e| UserError::DatabaseError(format!("Failed to write user store: {}", e)))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| UserError::DatabaseError(format!("Failed to replace user store: {}", e)))
    }
}

#[async_trait]
impl UserRepository for JsonFileUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().await;

        if users.iter().any(|u| u.email == user.email.as_str()) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.push(StoredUser::from(&user));

        // Keep memory and disk consistent: drop the appended record when the
        // write does not land.
        if let Err(e) = self.persist(&users).await {
            users.pop();
            return Err(e);
        }

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().await;

        users
            .iter()
            .find(|u| u.email == email)
            .map(StoredUser::try_into_user)
            .transpose()
    }
}
