//! Command line interface for release_asset_uploader.

mod args;
pub mod commands;
mod output;

pub use args::Args;
pub use commands::execute_upload;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point. Returns the number of uploaded assets.
pub async fn run() -> Result<usize> {
    let args = Args::parse_args();
    let output = OutputManager::new();
    execute_upload(&args, &output).await
}
