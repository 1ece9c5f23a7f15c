//! GitHub release action: create a release, attach assets, remove it on rollback.
//!
//! Lifecycle of one run:
//!
//! ```text
//! Idle --execute--> Created --assets uploaded--> Completed
//!                      |                              |
//!                      +----------restore-------------+--> RolledBack
//! ```
//!
//! A failed upload leaves the run in `Created`: the release stays on GitHub so
//! the host runtime's `restore` call can remove it. Nothing is rolled back
//! automatically.

use super::context::{ReleaseContext, ReleasePhase};
use super::Action;
use crate::error::{ConfigurationError, ReleaseError, Result, StateError};
use crate::github::{
    self, AssetsService, CreatedRelease, GitHubAssetsService, GitHubReleaseData,
    GitHubReleaseService, ReleaseService,
};
use crate::options::{ActionOption, OptionsSharer, ReleaseOptions, schema};
use crate::template::TextTemplateService;
use async_trait::async_trait;
use std::sync::Arc;

/// Action identifier used by pipeline definitions
pub const IDENTIFIER: &str = "github-release";

/// Summary of a successful `execute`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Created release ID
    pub release_id: u64,
    /// Names of the uploaded assets
    pub uploaded_assets: Vec<String>,
}

/// What `restore` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// No release to remove (never created, or already rolled back)
    NothingToRestore,
    /// The release was deleted
    ReleaseRemoved {
        /// Deleted release ID
        release_id: u64,
    },
}

/// Creates well defined releases on GitHub
pub struct ReleaseAction {
    templates: Arc<dyn TextTemplateService>,
    releases: Arc<dyn ReleaseService>,
    assets: Arc<dyn AssetsService>,
    sharer: Arc<OptionsSharer>,
}

impl ReleaseAction {
    /// Create an action from its collaborators
    pub fn new(
        templates: Arc<dyn TextTemplateService>,
        releases: Arc<dyn ReleaseService>,
        assets: Arc<dyn AssetsService>,
        sharer: Arc<OptionsSharer>,
    ) -> Self {
        Self {
            templates,
            releases,
            assets,
            sharer,
        }
    }

    /// Wire the action against the GitHub REST API
    pub fn github(templates: Arc<dyn TextTemplateService>) -> Result<Self> {
        let client = github::http::build_client()?;
        let sharer = Arc::new(OptionsSharer::new());
        let releases = Arc::new(GitHubReleaseService::new(client.clone(), sharer.clone()));
        let assets = Arc::new(GitHubAssetsService::new(client, sharer.clone()));
        Ok(Self::new(templates, releases, assets, sharer))
    }

    /// Build the creation payload, rendering templated options
    pub fn release_data(&self, options: &ReleaseOptions) -> Result<GitHubReleaseData> {
        let name = options
            .name
            .as_deref()
            .ok_or_else(|| ConfigurationError::MissingOption {
                key: "name".to_string(),
            })?;

        Ok(GitHubReleaseData {
            tag_name: self.render(options.tag.as_deref())?,
            target_commitish: self.render(options.target.as_deref())?,
            name: self.templates.parse(name)?,
            body: self.render(options.description.as_deref())?,
            draft: options.draft,
            prerelease: options.pre,
        })
    }

    fn render(&self, template: Option<&str>) -> Result<Option<String>> {
        template.map(|t| self.templates.parse(t)).transpose()
    }

    async fn create_phase(
        &self,
        options: &ReleaseOptions,
        context: &mut ReleaseContext,
    ) -> Result<CreatedRelease> {
        let data = self.release_data(options)?;

        log::info!(
            "Creating GitHub release '{}' in {}",
            data.name,
            options.slug()
        );
        let created = self.releases.create_release(&data).await?;

        context.release_id = Some(created.id);
        context.release_upload_url = created.upload_url.clone();
        context.phase = ReleasePhase::Created;
        log::info!("Created GitHub release {}", created.id);

        Ok(created)
    }

    async fn upload_phase(
        &self,
        options: &ReleaseOptions,
        context: &mut ReleaseContext,
        release_id: u64,
    ) -> Result<Vec<String>> {
        match self
            .assets
            .upload_assets_into_release(&options.asset, release_id)
            .await
        {
            Ok(uploaded) => {
                context.assets_uploaded = !uploaded.is_empty();
                context.phase = ReleasePhase::Completed;
                Ok(uploaded)
            }
            Err(e) => {
                context.assets_uploaded = !options.asset.is_empty()
                    && !matches!(
                        e,
                        ReleaseError::AssetResolution(_) | ReleaseError::Configuration(_)
                    );
                log::error!(
                    "Asset upload into release {} failed; the release is kept until rollback",
                    release_id
                );
                Err(e)
            }
        }
    }
}

#[async_trait]
impl Action for ReleaseAction {
    type Options = ReleaseOptions;
    type Context = ReleaseContext;
    type Report = ExecutionReport;

    fn identifier(&self) -> &'static str {
        IDENTIFIER
    }

    fn name(&self) -> &'static str {
        "Git Hub Release"
    }

    fn description(&self) -> &'static str {
        "Represents a git hub release action that can create well defined releases on Git Hub."
    }

    fn options(&self) -> Vec<ActionOption> {
        schema::release_options()
    }

    fn creates_restoration_point(
        &self,
        _options: &ReleaseOptions,
        _context: &mut ReleaseContext,
    ) -> Result<()> {
        // Nothing local is acquired before the release exists.
        Ok(())
    }

    async fn execute(
        &self,
        options: &ReleaseOptions,
        context: &mut ReleaseContext,
    ) -> Result<ExecutionReport> {
        if !context.is_fresh() {
            return Err(StateError::ContextReused {
                release_id: context.release_id,
                phase: context.phase.to_string(),
            }
            .into());
        }

        self.sharer.store(options.clone());
        options.validate()?;
        // Fail on missing assets before anything exists remotely.
        github::normalize_asset_paths(&options.asset)?;

        let created = self.create_phase(options, context).await?;
        let uploaded_assets = self.upload_phase(options, context, created.id).await?;

        Ok(ExecutionReport {
            release_id: created.id,
            uploaded_assets,
        })
    }

    async fn restore(
        &self,
        options: &ReleaseOptions,
        context: &mut ReleaseContext,
    ) -> Result<RestoreOutcome> {
        let Some(release_id) = context.release_id else {
            log::debug!("No release was created; nothing to restore");
            return Ok(RestoreOutcome::NothingToRestore);
        };

        if context.phase == ReleasePhase::RolledBack {
            log::warn!("Release {} was already rolled back", release_id);
            return Ok(RestoreOutcome::NothingToRestore);
        }

        self.sharer.store(options.clone());
        log::info!("Removing GitHub release {} from {}", release_id, options.slug());
        self.releases.remove_release(release_id).await?;
        context.phase = ReleasePhase::RolledBack;

        Ok(RestoreOutcome::ReleaseRemoved { release_id })
    }

    fn creates_context_from_options_map(&self, _options: &ReleaseOptions) -> ReleaseContext {
        ReleaseContext::new()
    }
}
