//! Release asset uploads.
//!
//! All declared paths are resolved before anything is sent. Uploads then run
//! concurrently; every upload is allowed to finish before the batch reports.
//! A failed batch may leave some assets attached to the release; removing the
//! release is left to the caller's rollback.

use super::base_url::BaseUrlResolver;
use super::http;
use crate::error::{AssetResolutionError, ConfigurationError, ReleaseError, Result};
use crate::options::{AssetPaths, OptionsSharer, SecretToken};
use async_trait::async_trait;
use futures::future::join_all;
use path_absolutize::Absolutize;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use url::Url;

/// Content type sent with every asset upload
pub const ASSET_CONTENT_TYPE: &str = "multipart/form-data";

/// Uploads local files into a release
#[async_trait]
pub trait AssetsService: Send + Sync {
    /// Upload every path in `assets` into `release_id`; returns uploaded asset names
    async fn upload_assets_into_release(
        &self,
        assets: &AssetPaths,
        release_id: u64,
    ) -> Result<Vec<String>>;
}

/// Resolve declared paths to absolute paths of existing files.
///
/// Fails listing every path that does not exist.
pub fn normalize_asset_paths(assets: &AssetPaths) -> Result<Vec<PathBuf>> {
    let mut resolved = Vec::new();
    let mut missing = Vec::new();

    for asset in assets.as_slice() {
        let path = Path::new(asset).absolutize()?.into_owned();
        if path.is_file() {
            resolved.push(path);
        } else {
            missing.push(path);
        }
    }

    if !missing.is_empty() {
        return Err(AssetResolutionError { missing }.into());
    }

    Ok(resolved)
}

/// `{upload_base}/{release_id}/assets?name={name}`
pub fn asset_upload_url(upload_base_url: &str, release_id: u64, name: &str) -> Result<Url> {
    let mut url = Url::parse(&format!("{}/{}/assets", upload_base_url, release_id)).map_err(|e| {
        ConfigurationError::InvalidOption {
            key: "upload-host".to_string(),
            reason: e.to_string(),
        }
    })?;
    url.query_pairs_mut().append_pair("name", name);
    Ok(url)
}

fn asset_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            ReleaseError::Configuration(ConfigurationError::InvalidOption {
                key: "asset".to_string(),
                reason: format!("Invalid asset filename: {}", path.display()),
            })
        })
}

/// [`AssetsService`] backed by the GitHub uploads host
#[derive(Debug, Clone)]
pub struct GitHubAssetsService {
    client: reqwest::Client,
    sharer: Arc<OptionsSharer>,
    urls: BaseUrlResolver,
}

impl GitHubAssetsService {
    /// Create an asset service using the shared options
    pub fn new(client: reqwest::Client, sharer: Arc<OptionsSharer>) -> Self {
        let urls = BaseUrlResolver::new(sharer.clone());
        Self {
            client,
            sharer,
            urls,
        }
    }

    async fn upload_asset(
        &self,
        upload_base_url: &str,
        release_id: u64,
        path: &Path,
        token: &SecretToken,
    ) -> Result<String> {
        let name = asset_name(path)?;
        let url = asset_upload_url(upload_base_url, release_id, &name)?;

        let file = tokio::fs::File::open(path).await?;
        let size = file.metadata().await?.len();

        log::debug!("POST {} ({} bytes)", url, size);
        let request = self
            .client
            .post(url.as_str())
            .bearer_auth(token.expose())
            .header(CONTENT_TYPE, ASSET_CONTENT_TYPE)
            .header(CONTENT_LENGTH, size)
            .body(reqwest::Body::wrap_stream(ReaderStream::new(file)));

        http::send(url.as_str(), request).await?;
        log::info!("Uploaded asset {} ({} bytes)", name, size);
        Ok(name)
    }
}

#[async_trait]
impl AssetsService for GitHubAssetsService {
    async fn upload_assets_into_release(
        &self,
        assets: &AssetPaths,
        release_id: u64,
    ) -> Result<Vec<String>> {
        let files = normalize_asset_paths(assets)?;
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let token = self.sharer.options()?.token.clone();
        let upload_base_url = self.urls.upload_base_url()?;

        let results = join_all(
            files
                .iter()
                .map(|file| self.upload_asset(&upload_base_url, release_id, file, &token)),
        )
        .await;

        let mut uploaded = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (file, result) in files.iter().zip(results) {
            match result {
                Ok(name) => uploaded.push(name),
                Err(e) => failures.push((file, e)),
            }
        }

        let mut failures = failures.into_iter();
        match failures.next() {
            None => Ok(uploaded),
            Some((file, first)) => {
                for (other, e) in failures {
                    log::warn!("Upload of {} also failed: {}", other.display(), e);
                }
                log::warn!(
                    "Upload of {} failed; {} of {} assets were attached before the batch failed",
                    file.display(),
                    uploaded.len(),
                    files.len()
                );
                Err(first)
            }
        }
    }
}
