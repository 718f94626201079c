//! Release asset uploader.
//!
//! Runs as a GitHub Actions step after the build: uploads every archive in the
//! artifact directory to the release of the current tag.

use release_asset_uploader::cli;
use release_asset_uploader::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let output = OutputManager::new();
    match cli::run().await {
        Ok(count) => {
            output.success(&format!("Uploaded {count} asset(s)"));
        }
        Err(e) => {
            output.error(&format!("Fatal error: {e}"));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                output.error_indent("Recovery suggestions:");
                for suggestion in suggestions {
                    output.error_indent(&format!("  • {suggestion}"));
                }
            }

            process::exit(1);
        }
    }
}
