//! Release lookup and asset upload against the GitHub REST API

use super::AssetSink;
use crate::artifact::UploadTarget;
use crate::config::UploadConfig;
use crate::error::GitHubError;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use reqwest::{Body, Client, StatusCode};
use serde::Deserialize;
use std::path::Path;
use tokio_util::io::ReaderStream;
use url::Url;

const USER_AGENT: &str = concat!("release_asset_uploader/", env!("CARGO_PKG_VERSION"));

const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// Maximum number of 307/308 hops followed for one upload
const MAX_REDIRECTS: usize = 10;

type Result<T> = std::result::Result<T, GitHubError>;

/// Subset of the release document we read
#[derive(Deserialize, Debug)]
struct Release {
    upload_url: String,
}

/// Client for one release, authenticated with the job token
pub struct ReleaseClient {
    http: Client,
    config: UploadConfig,
}

impl ReleaseClient {
    /// Create a client for the configured repository and tag
    pub fn new(config: UploadConfig) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, config })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    fn authorization(&self) -> String {
        // Keeps the "token:" form used by earlier releases of this tool.
        format!("token: {}", self.config.token)
    }

    /// Resolve the asset upload endpoint of the release for the configured tag.
    ///
    /// See <https://docs.github.com/en/rest/releases/releases#get-a-release-by-tag-name>
    pub async fn upload_url(&self) -> Result<Url> {
        let url = release_lookup_url(&self.config.base_url, &self.config.repo, &self.config.reference)?;
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.authorization())
            .header(ACCEPT, ACCEPT_V3)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(GitHubError::LookupStatus { status });
        }

        let body = response.bytes().await?;
        let release: Release = serde_json::from_slice(&body)?;

        let upload_url = strip_url_template(&release.upload_url);
        Url::parse(upload_url).map_err(|source| GitHubError::InvalidUrl {
            url: upload_url.to_string(),
            source,
        })
    }

    /// Upload one file as a release asset.
    ///
    /// The body is streamed from the file, which is reopened for every attempt
    /// so a 307/308 redirect can be replayed. The token only follows redirects
    /// that stay on the upload host or one of its subdomains.
    ///
    /// See <https://docs.github.com/en/rest/releases/assets#upload-a-release-asset>
    pub async fn upload_asset(&self, upload_url: &Url, path: &Path, content_type: &str) -> Result<()> {
        let size = tokio::fs::metadata(path)
            .await
            .map_err(|source| GitHubError::Stat {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let origin = with_name_query(upload_url, &name);
        let mut url = origin.clone();

        for _ in 0..=MAX_REDIRECTS {
            log::debug!("POST {} ({} bytes, {})", url, size, content_type);

            let mut request = self
                .http
                .post(url.clone())
                .header(ACCEPT, ACCEPT_V3)
                .header(CONTENT_TYPE, content_type)
                .header(CONTENT_LENGTH, size);
            if forwards_credentials(&origin, &url) {
                request = request.header(AUTHORIZATION, self.authorization());
            } else {
                log::debug!("Not sending credentials to {}", url.host_str().unwrap_or_default());
            }

            let response = request.body(open_body(path).await?).send().await?;

            let status = response.status();
            if matches!(
                status,
                StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT
            ) {
                url = redirect_target(&url, status, response.headers().get(LOCATION))?;
                log::debug!("Upload redirected ({}) to {}", status, url);
                continue;
            }

            if status != StatusCode::CREATED {
                let body = response.text().await.unwrap_or_default();
                return Err(GitHubError::UploadStatus {
                    url: url.to_string(),
                    status,
                    body,
                });
            }

            return Ok(());
        }

        Err(GitHubError::TooManyRedirects { hops: MAX_REDIRECTS })
    }
}

impl AssetSink for ReleaseClient {
    async fn upload(&self, upload_url: &Url, target: &UploadTarget) -> Result<()> {
        self.upload_asset(upload_url, &target.path, target.content_type())
            .await
    }
}

async fn open_body(path: &Path) -> Result<Body> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|source| GitHubError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Body::wrap_stream(ReaderStream::new(file)))
}

fn redirect_target(
    current: &Url,
    status: StatusCode,
    location: Option<&reqwest::header::HeaderValue>,
) -> Result<Url> {
    location
        .and_then(|value| value.to_str().ok())
        .and_then(|value| current.join(value).ok())
        .ok_or(GitHubError::BadRedirect { status })
}

/// Whether the token may be sent to `target` after redirects from `origin`.
///
/// Only the origin host and its subdomains qualify; the port is not compared.
fn forwards_credentials(origin: &Url, target: &Url) -> bool {
    let (Some(origin_host), Some(target_host)) = (origin.host_str(), target.host_str()) else {
        return false;
    };
    if target_host.eq_ignore_ascii_case(origin_host) {
        return true;
    }
    // IP literals never have subdomains
    if target.host().is_some_and(|host| !matches!(host, url::Host::Domain(_))) {
        return false;
    }
    target_host
        .to_ascii_lowercase()
        .ends_with(&format!(".{}", origin_host.to_ascii_lowercase()))
}

/// Build `{base}/repos/{repo}/releases/tags/{reference}`.
///
/// The path is absolute, so it replaces any path already on `base`.
pub fn release_lookup_url(base: &Url, repo: &str, reference: &str) -> Result<Url> {
    let path = format!("/repos/{repo}/releases/tags/{reference}");
    base.join(&path).map_err(|source| GitHubError::InvalidUrl { url: path, source })
}

/// Drop the hypermedia template suffix, e.g. `{?name,label}`, from `upload_url`.
///
/// See <https://docs.github.com/en/rest/overview/resources-in-the-rest-api#hypermedia>
pub fn strip_url_template(upload_url: &str) -> &str {
    match upload_url.find('{') {
        Some(i) => &upload_url[..i],
        None => upload_url,
    }
}

/// Set the `name` query parameter, replacing any existing one
pub fn with_name_query(upload_url: &Url, name: &str) -> Url {
    let mut url = upload_url.clone();
    let kept: Vec<(String, String)> = upload_url
        .query_pairs()
        .filter(|(key, _)| key != "name")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("name", name);
    url
}
