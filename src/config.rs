//! Upload configuration read from the GitHub Actions environment.
//!
//! See <https://docs.github.com/en/actions/learn-github-actions/environment-variables#default-environment-variables>

use crate::error::ConfigError;
use url::Url;

/// Set to `true` by the Actions runner
pub const ENV_ACTIONS: &str = "GITHUB_ACTIONS";
/// REST API base URL, e.g. `https://api.github.com`
pub const ENV_API_URL: &str = "GITHUB_API_URL";
/// Short ref name; the tag for tag-push workflows
pub const ENV_REF: &str = "GITHUB_REF_NAME";
/// `owner/name`
pub const ENV_REPO: &str = "GITHUB_REPOSITORY";
/// Job token; must be exported to the step explicitly
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";

const ACTIONS_TRUE: &str = "true";

/// Variables that must be non-empty, in the order they are checked
const REQUIRED: [&str; 4] = [ENV_API_URL, ENV_REF, ENV_REPO, ENV_TOKEN];

/// Client configuration for one upload run
#[derive(Clone)]
pub struct UploadConfig {
    /// API base URL
    pub base_url: Url,
    /// Repository identifier (`owner/name`)
    pub repo: String,
    /// Release tag name
    pub reference: String,
    /// Authentication token
    pub token: String,
}

impl std::fmt::Debug for UploadConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadConfig")
            .field("base_url", &self.base_url.as_str())
            .field("repo", &self.repo)
            .field("reference", &self.reference)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl UploadConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// All-or-nothing: `GITHUB_ACTIONS` must be exactly `true`, then the
    /// remaining variables are checked in a fixed order and the first empty one
    /// is reported.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();

        if get(ENV_ACTIONS) != ACTIONS_TRUE {
            return Err(ConfigError::NotInActions);
        }

        for name in REQUIRED {
            if get(name).is_empty() {
                return Err(ConfigError::MissingVariable { name });
            }
        }

        let raw_url = get(ENV_API_URL);
        let base_url = Url::parse(&raw_url).map_err(|source| ConfigError::InvalidBaseUrl {
            value: raw_url.clone(),
            source,
        })?;

        Ok(Self {
            base_url,
            repo: get(ENV_REPO),
            reference: get(ENV_REF),
            token: get(ENV_TOKEN),
        })
    }
}
