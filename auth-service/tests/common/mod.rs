use std::sync::Arc;

use auth_core::Claims;
use auth_core::TokenCodec;
use auth_core::TokenIssuer;
use auth_service::auth::models::CreatePrincipal;
use auth_service::auth::models::EmailAddress;
use auth_service::auth::models::Role;
use auth_service::auth::models::Username;
use auth_service::auth::ports::PrincipalRepository;
use auth_service::domain::auth::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryPrincipalRepository;
use chrono::Duration;
use chrono::Utc;

pub const TEST_SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

/// Test application that spawns a real server on a random port backed by
/// the in-memory principal store.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub repository: Arc<InMemoryPrincipalRepository>,
}

impl TestApp {
    /// Spawn with production-like token lifetimes.
    pub async fn spawn() -> Self {
        Self::spawn_with_ttls(Duration::minutes(15), Duration::days(7)).await
    }

    /// Spawn with explicit token lifetimes, for expiry-sensitive tests.
    pub async fn spawn_with_ttls(access_ttl: Duration, refresh_ttl: Duration) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let codec = Arc::new(TokenCodec::new(TEST_SECRET));
        let issuer = TokenIssuer::new(Arc::clone(&codec), access_ttl, refresh_ttl);

        let repository = Arc::new(InMemoryPrincipalRepository::new());
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&repository),
            codec,
            issuer,
        ));

        let application = create_router(auth_service);
        tokio::spawn(async move {
            axum::serve(listener, application)
                .await
                .expect("Server failed");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            repository,
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Seed a principal directly in the store, bypassing the register flow.
    pub async fn seed_principal(&self, email: &str, password: &str, role: Role) {
        let password_hash = auth_core::PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash password");

        self.repository
            .create(CreatePrincipal {
                email: EmailAddress::new(email.to_string()).unwrap(),
                username: Username::new("seeded_user".to_string()).unwrap(),
                password_hash,
                role,
            })
            .await
            .expect("Failed to seed principal");
    }

    /// Mint an access token signed with the app's secret whose expiry is
    /// already in the past.
    pub fn expired_access_token(&self, subject: &str) -> String {
        let codec = TokenCodec::new(TEST_SECRET);
        let issued = Utc::now() - Duration::hours(2);
        let claims = Claims::access(
            subject,
            1,
            vec!["ROLE_USER".to_string()],
            issued,
            Duration::hours(1),
        )
        .unwrap();
        codec.encode(&claims).expect("Failed to encode token")
    }
}
