//! GitHub integration for release operations

mod assets_service;
mod base_url;
pub mod http;
mod release_data;
mod release_service;

pub use assets_service::{
    ASSET_CONTENT_TYPE, AssetsService, GitHubAssetsService, asset_upload_url,
    normalize_asset_paths,
};
pub use base_url::{BaseUrlResolver, release_base_url};
pub use release_data::GitHubReleaseData;
pub use release_service::{CreatedRelease, GitHubReleaseService, ReleaseService};
