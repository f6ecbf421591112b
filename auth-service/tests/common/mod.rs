use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenCodec;
use auth_service::domain::identity::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryCredentialStore;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Hasher with low costs so tests stay fast.
pub fn fast_hasher() -> PasswordHasher {
    PasswordHasher::from_costs(1024, 1, 1).expect("Failed to build test hasher")
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryCredentialStore>,
    pub api_client: reqwest::Client,
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

        let store = Arc::new(InMemoryCredentialStore::new());

        let token_codec =
            TokenCodec::from_hours(TEST_SECRET, 24).expect("Failed to create token codec");
        let authenticator = Arc::new(
            Authenticator::with_hasher(fast_hasher(), token_codec)
                .expect("Failed to create authenticator"),
        );

        let auth_service = Arc::new(AuthService::new(Arc::clone(&store), authenticator));

        let router = create_router(auth_service, &[]);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            api_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create reqwest client"),
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

    /// Register an identity and return its id
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/register")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the raw response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
