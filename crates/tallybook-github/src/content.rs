use serde::{Deserialize, Serialize};

/// Response from GitHub's Contents API.
/// `GET /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Deserialize)]
pub struct ContentResponse {
    pub content: Option<String>,
    pub sha: String,
}

/// Body for `PUT /repos/{owner}/{repo}/contents/{path}`. `sha` is omitted
/// entirely when the path is being created.
#[derive(Debug, Serialize)]
pub struct PutRequest {
    pub message: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

/// Error payload GitHub attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub message: Option<String>,
}
