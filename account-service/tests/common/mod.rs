use std::sync::Arc;

use account_service::domain::user::ports::AuthServicePort;
use account_service::domain::user::service::AuthService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use credentials::JwtHandler;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over the in-memory store.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::new());
        let auth_service: Arc<dyn AuthServicePort> = Arc::new(AuthService::new(
            repository,
            JwtHandler::new(TEST_JWT_SECRET),
        ));

        let router = create_router(auth_service, Arc::new(JwtHandler::new(TEST_JWT_SECRET)));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return the response body's data object.
    pub async fn register_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> serde_json::Value {
        let response = self
            .post("/api/auth/register")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
                "email": email
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log a user in and return the issued token.
    pub async fn login_user(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&serde_json::json!({
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token in login response")
            .to_string()
    }
}
