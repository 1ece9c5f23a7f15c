//! HTTP plumbing shared by the release and asset services.

use crate::error::{CliError, ReleaseError, RemoteOperationError, Result};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

/// User agent sent with every request (the GitHub API rejects requests without one)
pub const USER_AGENT: &str = concat!("kodegen_release_action/", env!("CARGO_PKG_VERSION"));

/// Media type for GitHub REST responses
pub const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Build the HTTP client used for all GitHub calls.
///
/// Timeouts are left to the transport defaults; nothing is retried.
pub fn build_client() -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));

    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
        .map_err(|e| {
            ReleaseError::Cli(CliError::ExecutionFailed {
                command: "github_client_init".to_string(),
                reason: e.to_string(),
            })
        })
}

/// Send `request` and translate any failure into a [`RemoteOperationError`].
///
/// Non-success responses carry their body; transport failures name `url`.
pub(crate) async fn send(
    url: &str,
    request: reqwest::RequestBuilder,
) -> std::result::Result<reqwest::Response, RemoteOperationError> {
    let response = request
        .send()
        .await
        .map_err(|e| RemoteOperationError::from_transport(url, e))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(RemoteOperationError::from_body(url, status.as_u16(), &body))
}
