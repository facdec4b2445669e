//! Error types for upload operations

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, UploadError>;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("url needs to be set")]
    MissingUrl,

    #[error("either username/password, api key or access token needs to be set")]
    MissingCredentials,

    #[error("source file needs to be set")]
    MissingSource,

    #[error("target path needs to be set")]
    MissingTarget,

    #[error("error creating pem folder {path}: {source}")]
    CertDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error writing pem file {path}: {source}")]
    CertWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to start {shell}: {source}")]
    Spawn {
        shell: String,
        source: std::io::Error,
    },

    #[error("{0}")]
    Exit(ExitStatus),
}

impl UploadError {
    /// Process exit code to report for this error
    ///
    /// A failed upload passes the tool's own code through; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            UploadError::Exit(status) => status.code().unwrap_or(1),
            _ => 1,
        }
    }
}
