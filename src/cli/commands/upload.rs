//! Upload run: configure, look up the release, push every archive.

use crate::artifact::{UploadTarget, scan_dir};
use crate::cli::{Args, OutputManager};
use crate::config::UploadConfig;
use crate::error::{ReleaseError, Result};
use crate::github::{AssetSink, ReleaseClient};
use url::Url;

/// Execute a full upload run. Returns the number of uploaded assets.
pub async fn execute_upload(args: &Args, output: &OutputManager) -> Result<usize> {
    let config = UploadConfig::from_env()?;
    log::info!(
        "Uploading assets for {}@{} via {}",
        config.repo,
        config.reference,
        config.base_url
    );

    let client = ReleaseClient::new(config).map_err(ReleaseError::Lookup)?;

    output.progress(&format!(
        "Looking up release {}",
        client.config().reference
    ));
    let upload_url = client.upload_url().await.map_err(ReleaseError::Lookup)?;
    log::debug!("Upload endpoint: {}", upload_url);

    let targets = scan_dir(&args.dir)?;
    if targets.is_empty() {
        output.warn(&format!("No .zip or .tar.gz files in {}", args.dir.display()));
    }

    upload_all(&client, &upload_url, &targets, output).await
}

/// Upload `targets` in order, stopping at the first failure
pub async fn upload_all<S: AssetSink>(
    sink: &S,
    upload_url: &Url,
    targets: &[UploadTarget],
    output: &OutputManager,
) -> Result<usize> {
    for target in targets {
        log::info!("Uploading {} ({})", target.name, target.content_type());

        sink.upload(upload_url, target)
            .await
            .map_err(|source| ReleaseError::Upload {
                name: target.name.clone(),
                source,
            })?;

        output.indent(&format!("✓ Uploaded: {}", target.name));
    }

    Ok(targets.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ArchiveKind;
    use crate::error::GitHubError;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Records uploads; rejects names listed in `reject`
    #[derive(Default)]
    struct RecordingSink {
        calls: Mutex<Vec<(String, String, &'static str)>>,
        reject: Vec<&'static str>,
    }

    impl AssetSink for RecordingSink {
        async fn upload(&self, upload_url: &Url, target: &UploadTarget) -> std::result::Result<(), GitHubError> {
            self.calls.lock().unwrap().push((
                upload_url.to_string(),
                target.name.clone(),
                target.content_type(),
            ));

            if self.reject.contains(&target.name.as_str()) {
                return Err(GitHubError::UploadStatus {
                    url: upload_url.to_string(),
                    status: reqwest::StatusCode::UNPROCESSABLE_ENTITY,
                    body: r#"{"message":"Validation Failed"}"#.to_string(),
                });
            }
            Ok(())
        }
    }

    fn target(name: &str) -> UploadTarget {
        UploadTarget {
            path: PathBuf::from("bin").join(name),
            name: name.to_string(),
            kind: ArchiveKind::from_file_name(name).expect("archive name"),
        }
    }

    fn upload_url() -> Url {
        Url::parse("https://uploads.github.com/repos/octo/widgets/releases/7/assets").unwrap()
    }

    #[tokio::test]
    async fn test_uploads_every_target_in_order() {
        let sink = RecordingSink::default();
        let targets = vec![target("a.zip"), target("b.tar.gz")];

        let count = upload_all(&sink, &upload_url(), &targets, &OutputManager::new())
            .await
            .expect("uploads succeed");

        assert_eq!(count, 2);
        let calls = sink.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                (upload_url().to_string(), "a.zip".to_string(), "application/zip"),
                (upload_url().to_string(), "b.tar.gz".to_string(), "application/gzip"),
            ]
        );
    }

    #[tokio::test]
    async fn test_first_failure_aborts_run() {
        let sink = RecordingSink {
            reject: vec!["b.zip"],
            ..Default::default()
        };
        let targets = vec![target("a.zip"), target("b.zip"), target("c.tar.gz")];

        let result = upload_all(&sink, &upload_url(), &targets, &OutputManager::new()).await;

        match result {
            Err(ReleaseError::Upload { name, source }) => {
                assert_eq!(name, "b.zip");
                assert!(source.to_string().contains("Validation Failed"));
            }
            other => panic!("expected Upload error, got {other:?}"),
        }
        let names: Vec<String> = sink.calls.lock().unwrap().iter().map(|c| c.1.clone()).collect();
        assert_eq!(names, vec!["a.zip", "b.zip"]);
    }

    #[tokio::test]
    async fn test_scanned_directory_drives_uploads() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        std::fs::write(temp_dir.path().join("a.zip"), b"zip").unwrap();
        std::fs::write(temp_dir.path().join("b.tar.gz"), b"tgz").unwrap();
        std::fs::write(temp_dir.path().join("c.txt"), b"txt").unwrap();
        std::fs::create_dir(temp_dir.path().join("d")).unwrap();

        let targets = scan_dir(temp_dir.path()).unwrap();
        let sink = RecordingSink::default();
        upload_all(&sink, &upload_url(), &targets, &OutputManager::new())
            .await
            .unwrap();

        let calls = sink.calls.lock().unwrap();
        let uploaded: Vec<(&str, &str)> = calls.iter().map(|c| (c.1.as_str(), c.2)).collect();
        assert_eq!(
            uploaded,
            vec![("a.zip", "application/zip"), ("b.tar.gz", "application/gzip")]
        );
    }

    #[tokio::test]
    async fn test_empty_target_list() {
        let sink = RecordingSink::default();

        let count = upload_all(&sink, &upload_url(), &[], &OutputManager::new())
            .await
            .unwrap();

        assert_eq!(count, 0);
        assert!(sink.calls.lock().unwrap().is_empty());
    }
}
