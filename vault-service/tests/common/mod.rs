use std::path::PathBuf;
use std::sync::Arc;

use auth::Authenticator;
use vault_service::domain::storage::service::StorageService;
use vault_service::domain::user::service::AuthService;
use vault_service::inbound::http::router::create_router;
use vault_service::outbound::repositories::JsonFileUserRepository;
use vault_service::outbound::storage::TokioFileStore;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over a temporary data directory
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    storage_root: PathBuf,
    // Held so the temporary directory outlives the test
    _data_dir: tempfile::TempDir,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp data dir");
        let store_path = data_dir.path().join("users.json");
        let storage_root = data_dir.path().to_path_buf();

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(
            JsonFileUserRepository::load(&store_path)
                .await
                .expect("Failed to load user store"),
        );
        let authenticator = Arc::new(Authenticator::new(TEST_JWT_SECRET));
        let storage = Arc::new(StorageService::new(
            Arc::new(TokioFileStore::new()),
            storage_root.clone(),
            "uploads",
        ));
        let auth_service = Arc::new(AuthService::new(
            user_repository,
            Arc::clone(&storage),
            Arc::clone(&authenticator),
            None,
        ));

        let application = create_router(auth_service, authenticator, storage);
        tokio::spawn(async move {
            axum::serve(listener, application)
                .await
                .expect("Server failed");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            storage_root,
            _data_dir: data_dir,
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Path of a user's upload directory on disk
    pub fn upload_dir(&self, user_id: &str) -> PathBuf {
        self.storage_root.join("uploads").join(user_id)
    }

    /// Register an account and return the response body
    pub async fn register(&self, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/accounts")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute register request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the session token
    pub async fn login_token(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute login request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"].as_str().expect("Missing token").to_string()
    }
}
