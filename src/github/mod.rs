//! GitHub integration for release asset uploads

mod client;

pub use client::{ReleaseClient, release_lookup_url, strip_url_template, with_name_query};

use crate::artifact::UploadTarget;
use crate::error::GitHubError;
use std::future::Future;
use url::Url;

/// Destination for release assets.
///
/// Implemented by [`ReleaseClient`]; the upload loop only depends on this trait.
pub trait AssetSink {
    /// Upload one target to `upload_url`
    fn upload(
        &self,
        upload_url: &Url,
        target: &UploadTarget,
    ) -> impl Future<Output = Result<(), GitHubError>> + Send;
}
