/**
 * GitHub Repository Proxy
 *
 * Fetches a user's five oldest-first public repositories from the GitHub
 * API so the client can show them on a profile page without holding the
 * OAuth credentials itself.
 */

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;

use crate::shared::AppConfig;

const USER_AGENT: &str = "devconnector";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the GitHub REST API
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

impl GithubClient {
    /// Build a client from the application configuration
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let credentials = match (&config.github_client_id, &config.github_secret) {
            (Some(id), Some(secret)) => Some((id.clone(), secret.clone())),
            _ => None,
        };

        Ok(Self {
            http,
            base_url: config.github_api_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Fetch a user's repositories
    ///
    /// # Returns
    /// The upstream JSON on 200, `None` for any other upstream status or
    /// for a username GitHub would never accept.
    pub async fn user_repos(&self, username: &str) -> Result<Option<serde_json::Value>, reqwest::Error> {
        if !is_valid_username(username) {
            tracing::warn!("Rejected GitHub username: {}", username);
            return Ok(None);
        }

        let url = format!("{}/users/{}/repos", self.base_url, username);
        let mut query: Vec<(&str, &str)> = vec![("per_page", "5"), ("sort", "created:asc")];
        if let Some((id, secret)) = &self.credentials {
            query.push(("client_id", id));
            query.push(("client_secret", secret));
        }

        let response = self.http.get(&url).query(&query).send().await?;

        if response.status() != StatusCode::OK {
            tracing::warn!("GitHub returned {} for {}", response.status(), username);
            return Ok(None);
        }

        Ok(Some(response.json().await?))
    }
}

/// GitHub logins: 1-39 ASCII alphanumerics or single hyphens, not at
/// either end
fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= 39
        && !username.starts_with('-')
        && !username.ends_with('-')
        && !username.contains("--")
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
