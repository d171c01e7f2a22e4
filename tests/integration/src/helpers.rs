//! Test helpers for integration tests
//!
//! Provides the test server, session tokens and HTTP request shortcuts.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use huddle_api::{create_app, AppState};
use huddle_common::{AppConfig, SessionService};
use huddle_core::Snowflake;
use huddle_db::{create_lazy_pool, PoolConfig};
use huddle_service::memory::{
    MemoryConversationKeyRepository, MemoryDeviceRepository, MemoryMembershipRepository,
};
use huddle_service::{ServiceContext, TypingStore};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Shared secret the test server validates sessions with
pub const TEST_SESSION_SECRET: &str = "integration-test-secret-that-is-long-enough";

/// Nothing listens here, so readiness reports the database as down
const UNREACHABLE_DATABASE_URL: &str = "postgres://huddle@127.0.0.1:1/huddle_test";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub memberships: Arc<MemoryMembershipRepository>,
    pub keys: Arc<MemoryConversationKeyRepository>,
    pub typing: Arc<TypingStore>,
    sessions: SessionService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with default settings
    pub async fn start() -> Result<Self> {
        Self::start_with(&[]).await
    }

    /// Start a test server, overriding configuration variables
    pub async fn start_with(overrides: &[(&str, &str)]) -> Result<Self> {
        let config = test_config(overrides)?;

        let mut pool_config = PoolConfig::from(&config.database);
        pool_config.min_connections = 0;
        pool_config.acquire_timeout = Duration::from_millis(500);
        let pool = create_lazy_pool(&pool_config)?;

        let memberships = Arc::new(MemoryMembershipRepository::new());
        let keys = Arc::new(MemoryConversationKeyRepository::new());
        let typing = Arc::new(TypingStore::new(config.typing.ttl()));

        let ctx = ServiceContext::new(
            pool,
            Arc::new(MemoryDeviceRepository::new()),
            keys.clone(),
            memberships.clone(),
            typing.clone(),
        );

        let sessions = SessionService::new(&config.session.secret, config.session.token_expiry);
        let app = create_app(AppState::new(ctx, config));

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            memberships,
            keys,
            typing,
            sessions,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Full URL of a path on the server
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Issue a session token the server accepts
    pub fn token(&self, user_id: Snowflake, name: Option<&str>) -> String {
        self.sessions
            .issue(user_id, name.map(str::to_string))
            .expect("Failed to issue session token")
    }

    /// Add a user to a channel's member list
    pub async fn join_channel(&self, channel_id: Snowflake, user_id: Snowflake) {
        self.memberships.add_channel_member(channel_id, user_id).await;
    }

    /// Add a user to a group chat
    pub async fn join_group(&self, group_id: Snowflake, user_id: Snowflake) {
        self.memberships.add_group_member(group_id, user_id).await;
    }

    fn bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {token}"))
    }

    /// Make an unauthenticated GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with a session token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::bearer(self.client.get(self.url(path)), token).send().await?)
    }

    /// Make a POST request with a session token and JSON body
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::bearer(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with a session token and JSON body
    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::bearer(self.client.put(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with a session token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::bearer(self.client.delete(self.url(path)), token)
            .send()
            .await?)
    }

    /// Client whose cookie jar carries a session cookie for this server
    pub fn cookie_client(&self, cookie_name: &str, token: &str) -> Result<Client> {
        let jar = Arc::new(reqwest::cookie::Jar::default());
        let url: reqwest::Url = self.base_url().parse()?;
        jar.add_cookie_str(&format!("{cookie_name}={token}; Path=/"), &url);

        Ok(Client::builder()
            .cookie_provider(jar)
            .timeout(Duration::from_secs(10))
            .build()?)
    }
}

/// Configuration for a test server: random port, generous rate limit
pub fn test_config(overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let mut vars: HashMap<&str, &str> = HashMap::from([
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "0"),
        ("DATABASE_URL", UNREACHABLE_DATABASE_URL),
        ("SESSION_SECRET", TEST_SESSION_SECRET),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "1000"),
    ]);
    vars.extend(overrides.iter().copied());

    AppConfig::from_lookup(|name| vars.get(name).map(|v| (*v).to_string()))
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error status and return the machine-readable error code
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: crate::fixtures::ErrorBody = assert_json(response, expected_status).await?;
    Ok(body.error.code)
}
