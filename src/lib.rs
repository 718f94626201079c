//! # Release asset uploader
//!
//! Uploads build archives to the GitHub release of the tag being built, as a
//! step of a GitHub Actions workflow.
//!
//! The run is strictly linear and stops at the first error:
//!
//! 1. [`UploadConfig::from_env`] reads `GITHUB_ACTIONS`, `GITHUB_API_URL`,
//!    `GITHUB_REF_NAME`, `GITHUB_REPOSITORY` and `GITHUB_TOKEN`.
//! 2. [`ReleaseClient::upload_url`] looks up the release by tag and returns its
//!    asset upload endpoint.
//! 3. [`artifact::scan_dir`] lists the `.zip` and `.tar.gz` files in `./bin`.
//! 4. Each file is POSTed to the endpoint, one at a time.
//!
//! ## Usage
//!
//! ```bash
//! release_asset_uploader              # uploads ./bin/*.zip and ./bin/*.tar.gz
//! release_asset_uploader --dir dist   # different artifact directory
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod artifact;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;

pub use artifact::{ArchiveKind, UploadTarget};
pub use cli::Args;
pub use config::UploadConfig;
pub use error::{ConfigError, GitHubError, ReleaseError, Result};
pub use github::{AssetSink, ReleaseClient};
