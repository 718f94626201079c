//! Command line argument parsing.
//!
//! Everything about the release comes from the Actions environment; the only
//! knob is where the archives live.

use crate::artifact::DEFAULT_ARTIFACT_DIR;
use clap::Parser;
use std::path::PathBuf;

/// Upload build archives to the GitHub release of the current tag
#[derive(Parser, Debug)]
#[command(
    name = "release_asset_uploader",
    version,
    about = "Upload build archives to the GitHub release of the current tag",
    long_about = "Upload .zip and .tar.gz archives to the GitHub release of the current tag.

Must run inside a GitHub Actions job. Reads GITHUB_ACTIONS, GITHUB_API_URL,
GITHUB_REF_NAME, GITHUB_REPOSITORY and GITHUB_TOKEN from the environment."
)]
pub struct Args {
    /// Directory holding the archives to upload
    #[arg(long, env = "RELEASE_ASSETS_DIR", default_value = DEFAULT_ARTIFACT_DIR, value_name = "PATH")]
    pub dir: PathBuf,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
