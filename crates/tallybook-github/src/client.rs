use base64::Engine;

use tallybook::{RemoteFile, RemoteStore, StoreError};

use crate::content::{ContentResponse, ErrorResponse, PutRequest};

const API_VERSION: &str = "2022-11-28";

/// Construction failures. Raised before any network traffic.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("a GitHub token is required")]
    MissingToken,

    #[error("a repository is required")]
    MissingRepo,

    #[error("invalid repository format: {0:?} (use \"owner/name\")")]
    InvalidRepo(String),
}

/// GitHub Contents API client backing the remote file store.
///
/// Stateless between calls: each `fetch` is a single GET, each `upsert` is
/// a GET for the current revision followed by a conditional PUT.
pub struct GithubStore {
    client: reqwest::Client,
    token: String,
    owner: String,
    repo: String,
    api_base_url: Option<String>,
}

impl GithubStore {
    pub fn new(token: impl Into<String>, repo: &str) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if repo.is_empty() {
            return Err(ConfigError::MissingRepo);
        }

        let mut segments = repo.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                client: reqwest::Client::new(),
                token,
                owner: owner.to_owned(),
                repo: name.to_owned(),
                api_base_url: None,
            }),
            _ => Err(ConfigError::InvalidRepo(repo.to_owned())),
        }
    }

    /// Point the client at a different API base (tests).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    fn api_base(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or("https://api.github.com")
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base(),
            self.owner,
            self.repo,
            path,
        )
    }

    fn build_request(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("User-Agent", "tallybook")
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    async fn remote_error(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or(body);

        StoreError::Remote { status, message }
    }

    fn decode_content(response: &ContentResponse) -> Result<String, StoreError> {
        let encoded = response
            .content
            .as_deref()
            .ok_or_else(|| StoreError::Transport("no content in response".into()))?;

        // GitHub returns base64 with newlines embedded
        let cleaned: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&cleaned)
            .map_err(|e| StoreError::Transport(format!("base64 decode failed: {e}")))?;

        String::from_utf8(bytes).map_err(|e| StoreError::Transport(format!("invalid UTF-8: {e}")))
    }
}

#[async_trait::async_trait]
impl RemoteStore for GithubStore {
    async fn fetch(&self, path: &str) -> Result<Option<RemoteFile>, StoreError> {
        let url = self.contents_url(path);

        let response = self
            .build_request(self.client.get(&url))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if response.status().as_u16() == 404 {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        let content: ContentResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let text = Self::decode_content(&content)?;

        Ok(Some(RemoteFile {
            path: path.to_owned(),
            content: text,
            revision: content.sha,
        }))
    }

    async fn upsert(&self, path: &str, content: &str, message: &str) -> Result<(), StoreError> {
        // Re-read for the current revision; the server rejects the PUT below
        // if another writer moved the path in between.
        let existing = self.fetch(path).await?;

        let body = PutRequest {
            message: message.to_owned(),
            content: base64::engine::general_purpose::STANDARD.encode(content),
            sha: existing.map(|file| file.revision),
        };

        let url = self.contents_url(path);
        let response = self
            .build_request(self.client.put(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        Ok(())
    }
}
