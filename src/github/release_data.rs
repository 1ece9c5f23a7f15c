//! Release creation payload

use serde::Serialize;

/// Body of `POST /repos/{owner}/{repo}/releases`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitHubReleaseData {
    /// Tag name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    /// Commit or branch the tag is created from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
    /// Release title
    pub name: String,
    /// Release notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Draft release
    pub draft: bool,
    /// Pre-release
    pub prerelease: bool,
}
