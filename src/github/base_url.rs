//! Base URL resolution for the GitHub releases API and uploads host.
//!
//! Both URLs are derived only from the shared options; nothing else in the crate
//! builds a releases URL on its own.

use crate::error::ConfigurationError;
use crate::options::{OptionsSharer, ReleaseOptions};
use std::sync::Arc;

/// Build `{scheme}://{host}/repos/{owner}/{repository}/releases`.
///
/// Checks host, owner and repository in that order; `host_key` names the host
/// option in the error.
pub fn release_base_url(
    options: &ReleaseOptions,
    host_key: &str,
    host: &str,
) -> Result<String, ConfigurationError> {
    if host.trim().is_empty() {
        return Err(ConfigurationError::MissingHost {
            key: host_key.to_string(),
        });
    }
    if options.owner.trim().is_empty() {
        return Err(ConfigurationError::MissingOwner);
    }
    if options.repository.trim().is_empty() {
        return Err(ConfigurationError::MissingRepository);
    }

    let scheme = if options.secure { "https" } else { "http" };
    Ok(format!(
        "{}://{}/repos/{}/{}/releases",
        scheme, host, options.owner, options.repository
    ))
}

/// Resolves base URLs from the currently shared options (recomputed on every call)
#[derive(Debug, Clone)]
pub struct BaseUrlResolver {
    sharer: Arc<OptionsSharer>,
}

impl BaseUrlResolver {
    /// Create a resolver reading from `sharer`
    pub fn new(sharer: Arc<OptionsSharer>) -> Self {
        Self { sharer }
    }

    /// Base URL of the releases API
    pub fn api_base_url(&self) -> Result<String, ConfigurationError> {
        let options = self.sharer.options()?;
        release_base_url(&options, "api-host", &options.api_host)
    }

    /// Base URL for release asset uploads
    pub fn upload_base_url(&self) -> Result<String, ConfigurationError> {
        let options = self.sharer.options()?;
        release_base_url(&options, "upload-host", &options.upload_host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ReleaseOptions {
        ReleaseOptions {
            owner: "acme".to_string(),
            repository: "app".to_string(),
            ..ReleaseOptions::default()
        }
    }

    fn resolver(options: ReleaseOptions) -> BaseUrlResolver {
        BaseUrlResolver::new(Arc::new(OptionsSharer::with_options(options)))
    }

    #[test]
    fn test_default_hosts() {
        let resolver = resolver(options());
        assert_eq!(
            resolver.api_base_url().unwrap(),
            "https://api.github.com/repos/acme/app/releases"
        );
        assert_eq!(
            resolver.upload_base_url().unwrap(),
            "https://uploads.github.com/repos/acme/app/releases"
        );
    }

    #[test]
    fn test_urls_differ_only_in_host() {
        let resolver = resolver(ReleaseOptions {
            api_host: "ghe.example.com/api/v3".to_string(),
            upload_host: "ghe.example.com/api/uploads".to_string(),
            ..options()
        });
        let api = resolver.api_base_url().unwrap();
        let upload = resolver.upload_base_url().unwrap();
        assert_eq!(
            api.replace("ghe.example.com/api/v3", "HOST"),
            upload.replace("ghe.example.com/api/uploads", "HOST")
        );
        assert!(api.ends_with("/repos/acme/app/releases"));
        assert!(upload.ends_with("/repos/acme/app/releases"));
    }

    #[test]
    fn test_insecure_uses_http() {
        let resolver = resolver(ReleaseOptions {
            secure: false,
            api_host: "127.0.0.1:8080".to_string(),
            ..options()
        });
        assert_eq!(
            resolver.api_base_url().unwrap(),
            "http://127.0.0.1:8080/repos/acme/app/releases"
        );
    }

    #[test]
    fn test_missing_fields_checked_host_owner_repository() {
        let empty = ReleaseOptions {
            api_host: String::new(),
            owner: String::new(),
            repository: String::new(),
            ..ReleaseOptions::default()
        };
        assert_eq!(
            release_base_url(&empty, "api-host", &empty.api_host),
            Err(ConfigurationError::MissingHost {
                key: "api-host".to_string()
            })
        );
        assert_eq!(
            release_base_url(&empty, "api-host", "api.github.com"),
            Err(ConfigurationError::MissingOwner)
        );

        let no_repo = ReleaseOptions {
            repository: String::new(),
            ..options()
        };
        assert_eq!(
            release_base_url(&no_repo, "api-host", "api.github.com"),
            Err(ConfigurationError::MissingRepository)
        );
    }

    #[test]
    fn test_upload_host_checked_independently() {
        let resolver = resolver(ReleaseOptions {
            upload_host: " ".to_string(),
            ..options()
        });
        assert!(resolver.api_base_url().is_ok());
        let err = resolver.upload_base_url().unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingHost {
                key: "upload-host".to_string()
            }
        );
        assert_eq!(err.to_string(), "Must provide a valid host for 'upload-host'");
    }

    #[test]
    fn test_observes_updated_options() {
        let sharer = Arc::new(OptionsSharer::with_options(options()));
        let resolver = BaseUrlResolver::new(sharer.clone());
        sharer.store(ReleaseOptions {
            repository: "other".to_string(),
            ..options()
        });
        assert_eq!(
            resolver.api_base_url().unwrap(),
            "https://api.github.com/repos/acme/other/releases"
        );
    }

    #[test]
    fn test_unset_sharer_is_configuration_error() {
        let resolver = BaseUrlResolver::new(Arc::new(OptionsSharer::new()));
        assert_eq!(resolver.api_base_url(), Err(ConfigurationError::NoSharedOptions));
    }
}
