//! GitHub release resource: create and delete

use super::base_url::BaseUrlResolver;
use super::http;
use super::release_data::GitHubReleaseData;
use crate::error::{RemoteOperationError, Result};
use crate::options::OptionsSharer;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// Result of a successful release creation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedRelease {
    /// Release ID
    pub id: u64,
    /// Upload URL template returned by the API (`.../assets{?name,label}`)
    #[serde(default)]
    pub upload_url: Option<String>,
}

/// Manages the remote release resource
#[async_trait]
pub trait ReleaseService: Send + Sync {
    /// Create a release and return its identifier
    async fn create_release(&self, data: &GitHubReleaseData) -> Result<CreatedRelease>;

    /// Delete the release with `release_id`
    async fn remove_release(&self, release_id: u64) -> Result<()>;
}

/// [`ReleaseService`] backed by the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubReleaseService {
    client: reqwest::Client,
    sharer: Arc<OptionsSharer>,
    urls: BaseUrlResolver,
}

impl GitHubReleaseService {
    /// Create a release service using the shared options
    pub fn new(client: reqwest::Client, sharer: Arc<OptionsSharer>) -> Self {
        let urls = BaseUrlResolver::new(sharer.clone());
        Self {
            client,
            sharer,
            urls,
        }
    }
}

#[async_trait]
impl ReleaseService for GitHubReleaseService {
    async fn create_release(&self, data: &GitHubReleaseData) -> Result<CreatedRelease> {
        let options = self.sharer.options()?;
        let url = self.urls.api_base_url()?;

        log::debug!("POST {}", url);
        let request = self
            .client
            .post(&url)
            .bearer_auth(options.token.expose())
            .json(data);

        let response = http::send(&url, request).await?;
        let created = response
            .json::<CreatedRelease>()
            .await
            .map_err(|e| RemoteOperationError::from_transport(&url, e))?;

        Ok(created)
    }

    async fn remove_release(&self, release_id: u64) -> Result<()> {
        let options = self.sharer.options()?;
        let url = format!("{}/{}", self.urls.api_base_url()?, release_id);

        log::debug!("DELETE {}", url);
        let request = self
            .client
            .delete(&url)
            .bearer_auth(options.token.expose());

        http::send(&url, request).await?;
        Ok(())
    }
}
