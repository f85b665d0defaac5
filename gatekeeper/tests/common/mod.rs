use std::sync::Arc;

use auth::HashingCost;
use auth::JwtHandler;
use auth::PasswordHasher;
use gatekeeper::domain::user::service::UserService;
use gatekeeper::inbound::http::router::create_router;
use gatekeeper::outbound::repositories::InMemoryUserRepository;
use gatekeeper::outbound::tokens::JwtTokenService;
use serde_json::json;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
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
        let address = format!("http://{}", listener.local_addr().unwrap());

        let user_repo = Arc::new(InMemoryUserRepository::new());

        // Cheap work factor so the suite stays fast
        let password_hasher = PasswordHasher::with_cost(HashingCost::new(4096, 1, 1))
            .expect("Failed to build password hasher");

        let user_service = Arc::new(UserService::new(user_repo, password_hasher));
        let token_service = Arc::new(JwtTokenService::new(TEST_SECRET, None));

        let router = create_router(user_service, token_service.clone(), token_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with the raw token as the Authorization header
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).header(reqwest::header::AUTHORIZATION, token)
    }

    /// Register a user, panicking unless the server accepts it
    pub async fn register(&self, username: &str, password: &str, department: &str) {
        let response = self
            .post("/register")
            .json(&json!({
                "username": username,
                "password": password,
                "department": department
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
    }

    /// Log in and return the issued token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Login response carries no token")
            .to_string()
    }
}
