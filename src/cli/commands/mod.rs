//! Command execution for the upload run.

mod upload;

pub use upload::{execute_upload, upload_all};
