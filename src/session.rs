//! # Session
//!
//! Identity is an explicit [`Session`] object passed by reference to
//! whatever needs it. It is created only from a successful auth response
//! and torn down by consuming it. No ambient globals, no static lookups.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ApiConfig;

/// Auth endpoints of the analysis service.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    async fn signup(&self, username: &str, password: &str) -> Result<AuthResponse>;
    async fn login(&self, username: &str, password: &str) -> Result<AuthResponse>;
}

/// Wire shape of `/api/signup` and `/api/login` responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// An authenticated session. Created on login, destroyed on logout.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user_id: String,
    username: String,
    created_at: DateTime<Utc>,
}

impl Session {
    /// Open a session from a successful auth response.
    pub fn open(resp: &AuthResponse) -> Self {
        let username = resp.username.clone().unwrap_or_default();
        info!(target: "session", user_id = %resp.user_id, "session opened");
        Self {
            user_id: resp.user_id.clone(),
            username,
            created_at: Utc::now(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Tear the session down. Consumes self so a closed session cannot be
    /// used again.
    pub fn close(self) {
        info!(target: "session", user_id = %self.user_id, "session closed");
    }
}

/// Log in against the given auth backend and open a session.
pub async fn login(auth: &dyn AuthApi, username: &str, password: &str) -> Result<Session> {
    let resp = auth.login(username, password).await?;
    Ok(Session::open(&resp))
}

/// `reqwest`-backed [`AuthApi`] implementation.
pub struct HttpAuthClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

impl HttpAuthClient {
    pub fn from_config(cfg: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("political-bias-analyzer/0.1 (+github.com/lumlich/political-bias-analyzer)")
            .connect_timeout(std::time::Duration::from_secs(cfg.connect_timeout_secs))
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("build auth http client")?;
        Ok(Self {
            http,
            base_url: cfg.base_url.clone(),
        })
    }

    async fn post_credentials(
        &self,
        endpoint: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthResponse> {
        let url = format!("{}{endpoint}", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&Credentials { username, password })
            .send()
            .await
            .with_context(|| format!("POST {endpoint}"))?;

        if !resp.status().is_success() {
            return Err(crate::council::response_error(resp).await);
        }
        resp.json::<AuthResponse>()
            .await
            .with_context(|| format!("decode {endpoint} response"))
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthClient {
    async fn signup(&self, username: &str, password: &str) -> Result<AuthResponse> {
        self.post_credentials("/api/signup", username, password).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        self.post_credentials("/api/login", username, password).await
    }
}
