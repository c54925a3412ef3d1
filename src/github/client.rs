//! GitHub API client implementation

use crate::core::{ModfeedError, ModfeedResult};
use crate::di::traits::GitHubProvider;
use crate::github::types::GitHubRelease;
use async_trait::async_trait;
use reqwest::{header, Client as HttpClient};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::Mutex;
use tracing::debug;

/// Environment variables checked for an API token, in order
pub const TOKEN_ENV_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// GitHub API client
pub struct GitHubClient {
    http_client: HttpClient,
    api_url: String,
    token: Option<String>,
    rate_limiter: Arc<RateLimiter>,
}

/// Rate limiter for GitHub API
struct RateLimiter {
    remaining: Mutex<u64>,
    reset_time: Mutex<SystemTime>,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(api_url: &str, token: Option<String>) -> ModfeedResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("modfeed/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        if let Some(ref token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("token {}", token))
                    .map_err(|e| ModfeedError::Config(format!("Invalid GitHub token: {}", e)))?,
            );
        }

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ModfeedError::Release(format!("Failed to create HTTP client: {}", e)))?;

        let has_token = token.is_some();
        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            rate_limiter: Arc::new(RateLimiter {
                remaining: Mutex::new(if has_token { 5000 } else { 60 }),
                reset_time: Mutex::new(SystemTime::now() + Duration::from_secs(3600)),
            }),
        })
    }

    /// Create a client using the token from `GH_TOKEN` or `GITHUB_TOKEN`
    pub fn from_env(api_url: &str) -> ModfeedResult<Self> {
        Self::new(api_url, token_from_env())
    }

    /// Whether requests carry an API token
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Get the latest release for a repository
    pub async fn get_latest_release(
        &self,
        owner: &str,
        repo: &str,
    ) -> ModfeedResult<GitHubRelease> {
        let url = format!("{}/repos/{}/{}/releases/latest", self.api_url, owner, repo);
        self.api_get(&url).await
    }

    /// Download a release asset into memory
    pub async fn download_asset(&self, url: &str) -> ModfeedResult<Vec<u8>> {
        debug!(url, "downloading release asset");

        let response = self
            .http_client
            .get(url)
            .header(header::ACCEPT, "application/octet-stream")
            .send()
            .await
            .map_err(|e| ModfeedError::Release(format!("Failed to download {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(ModfeedError::Release(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ModfeedError::Release(format!("Failed to read {}: {}", url, e)))?;

        Ok(bytes.to_vec())
    }

    /// Make an API request and handle rate limiting
    async fn api_request(&self, url: &str) -> ModfeedResult<reqwest::Response> {
        self.check_rate_limit().await?;

        debug!(url, "GitHub API request");
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ModfeedError::Release(format!("GitHub API request failed: {}", e)))?;

        self.update_rate_limit(&response).await;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ModfeedError::NotFound(format!("{} (HTTP 404)", url)));
        }

        if !response.status().is_success() {
            return Err(ModfeedError::Release(format!(
                "GitHub API error: HTTP {}",
                response.status()
            )));
        }

        Ok(response)
    }

    /// Make an API GET request and parse JSON response
    async fn api_get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ModfeedResult<T> {
        let response = self.api_request(url).await?;

        response.json().await.map_err(|e| {
            ModfeedError::Release(format!("Failed to parse GitHub API response: {}", e))
        })
    }

    /// Check if we're within rate limits
    async fn check_rate_limit(&self) -> ModfeedResult<()> {
        let remaining = *self.rate_limiter.remaining.lock().await;
        let reset_time = *self.rate_limiter.reset_time.lock().await;

        if remaining == 0 {
            let now = SystemTime::now();
            if now < reset_time {
                let wait_duration = reset_time.duration_since(now).unwrap_or(Duration::ZERO);
                return Err(ModfeedError::Release(format!(
                    "GitHub API rate limit exceeded. Reset in {} seconds. {}",
                    wait_duration.as_secs(),
                    if self.token.is_none() {
                        "Consider setting GH_TOKEN to increase rate limit to 5000/hour."
                    } else {
                        ""
                    }
                )));
            }
        }

        Ok(())
    }

    /// Update rate limit from response headers
    async fn update_rate_limit(&self, response: &reqwest::Response) {
        if let Some(remaining) = header_u64(response, "x-ratelimit-remaining") {
            *self.rate_limiter.remaining.lock().await = remaining;
        }

        if let Some(reset) = header_u64(response, "x-ratelimit-reset") {
            *self.rate_limiter.reset_time.lock().await =
                SystemTime::UNIX_EPOCH + Duration::from_secs(reset);
        }
    }
}

fn header_u64(response: &reqwest::Response, name: &str) -> Option<u64> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
}

/// Read the API token from the environment, ignoring empty values
pub fn token_from_env() -> Option<String> {
    TOKEN_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

#[async_trait]
impl GitHubProvider for GitHubClient {
    async fn get_latest_release(&self, owner: &str, repo: &str) -> ModfeedResult<GitHubRelease> {
        Self::get_latest_release(self, owner, repo).await
    }

    async fn download_asset(&self, url: &str) -> ModfeedResult<Vec<u8>> {
        Self::download_asset(self, url).await
    }
}
