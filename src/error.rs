//! Error types for release asset uploads.
//!
//! Every error is terminal: the run stops at the first one and the operator sees
//! the message together with recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for upload operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all upload operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Environment configuration errors
    #[error("creating client: {0}")]
    Config(#[from] ConfigError),

    /// Release lookup failed
    #[error("creating upload url: {0}")]
    Lookup(#[source] GitHubError),

    /// Artifact directory could not be listed
    #[error("reading dir {}: {source}", path.display())]
    Scan {
        /// Directory being scanned
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A single asset failed to upload
    #[error("upload file {name}: {source}")]
    Upload {
        /// File name of the asset
        name: String,
        /// Underlying GitHub error
        #[source]
        source: GitHubError,
    },
}

/// Configuration errors raised while reading the Actions environment
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `GITHUB_ACTIONS` is not set to `true`
    #[error("not running under GitHub Actions")]
    NotInActions,

    /// A required variable is unset or empty
    #[error("expected environment variable not present: {name}")]
    MissingVariable {
        /// Variable name
        name: &'static str,
    },

    /// `GITHUB_API_URL` is not a valid URL
    #[error("parsing base URL '{value}': {source}")]
    InvalidBaseUrl {
        /// Raw variable value
        value: String,
        /// Parse error
        #[source]
        source: url::ParseError,
    },
}

/// Errors from the GitHub release API
#[derive(Error, Debug)]
pub enum GitHubError {
    /// A request URL could not be built
    #[error("parse url '{url}': {source}")]
    InvalidUrl {
        /// URL or path being parsed
        url: String,
        /// Parse error
        #[source]
        source: url::ParseError,
    },

    /// Transport failure
    #[error("do request: {0}")]
    Request(#[from] reqwest::Error),

    /// Release lookup did not return 200
    #[error("unexpected status code: {status}")]
    LookupStatus {
        /// Response status
        status: reqwest::StatusCode,
    },

    /// Release document could not be decoded
    #[error("decoding response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Asset file could not be stat'd
    #[error("stat asset {}: {source}", path.display())]
    Stat {
        /// Asset path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Asset file could not be opened for the request body
    #[error("open asset {}: {source}", path.display())]
    Open {
        /// Asset path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Asset upload did not return 201
    #[error("unexpected status code {url}: {status}: {body}")]
    UploadStatus {
        /// Upload URL including the `name` query
        url: String,
        /// Response status
        status: reqwest::StatusCode,
        /// Response body, for diagnostics
        body: String,
    },

    /// Upload redirected more times than allowed
    #[error("stopped after {hops} redirects")]
    TooManyRedirects {
        /// Number of redirects followed
        hops: usize,
    },

    /// Redirect response without a usable `Location`
    #[error("redirect {status} without a valid Location header")]
    BadRedirect {
        /// Response status
        status: reqwest::StatusCode,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Config(ConfigError::NotInActions) => vec![
                "Run this tool as a step of a GitHub Actions job".to_string(),
                "For local testing, export GITHUB_ACTIONS=true and the other GITHUB_* variables"
                    .to_string(),
            ],
            ReleaseError::Config(ConfigError::MissingVariable { name }) => vec![
                format!("Ensure {name} is set and non-empty in the job environment"),
                "GITHUB_TOKEN must be passed explicitly: env: GITHUB_TOKEN: ${{ secrets.GITHUB_TOKEN }}"
                    .to_string(),
            ],
            ReleaseError::Lookup(GitHubError::LookupStatus { status })
                if *status == reqwest::StatusCode::NOT_FOUND =>
            {
                vec![
                    "Create the release for this tag before uploading assets".to_string(),
                    "Check that the job runs on a tag push (GITHUB_REF_NAME is the tag)".to_string(),
                ]
            }
            ReleaseError::Lookup(GitHubError::LookupStatus { status })
                if *status == reqwest::StatusCode::UNAUTHORIZED
                    || *status == reqwest::StatusCode::FORBIDDEN =>
            {
                vec!["Grant the job token `contents: write` permission".to_string()]
            }
            ReleaseError::Upload {
                source: GitHubError::UploadStatus { status, .. },
                ..
            } if *status == reqwest::StatusCode::UNPROCESSABLE_ENTITY => vec![
                "An asset with this name may already exist on the release".to_string(),
                "Delete the existing asset or rename the artifact".to_string(),
            ],
            ReleaseError::Scan { path, .. } => vec![format!(
                "Build artifacts into {} before running the upload step",
                path.display()
            )],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
