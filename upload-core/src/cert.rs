//! Trust certificate provisioning

use crate::error::{Result, UploadError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// A PEM certificate that must exist before the CLI runs
#[derive(Clone, PartialEq, Eq)]
pub struct CertificateRequest {
    /// Destination file
    pub path: PathBuf,

    /// PEM-encoded certificate
    pub contents: String,
}

impl std::fmt::Debug for CertificateRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateRequest")
            .field("path", &self.path)
            .field("contents_len", &self.contents.len())
            .finish()
    }
}

/// Outcome of [`CertificateRequest::provision`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    /// The file was written by this call
    Created,

    /// A file was already present and left untouched
    AlreadyPresent,

    /// The path could not be checked, so nothing was written
    Unchecked,
}

impl CertificateRequest {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Write the certificate only when nothing exists at the path
    ///
    /// Missing parent directories are created owner-only and the file is
    /// written owner read/write. A stat failure other than "not found"
    /// leaves the path alone.
    pub fn provision(&self) -> Result<Provisioned> {
        tracing::info!("Creating pem file at {:?}", self.path);

        match fs::metadata(&self.path) {
            Ok(_) => {
                tracing::debug!("pem file already present, leaving it alone");
                return Ok(Provisioned::AlreadyPresent);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!("Cannot check pem file at {:?}, not writing it: {}", self.path, e);
                return Ok(Provisioned::Unchecked);
            }
        }

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            create_private_dir(dir).map_err(|source| UploadError::CertDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        write_private_file(&self.path, self.contents.as_bytes()).map_err(|source| {
            UploadError::CertWrite {
                path: self.path.clone(),
                source,
            }
        })?;

        tracing::info!("Successfully created pem file at {:?}", self.path);
        Ok(Provisioned::Created)
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(unix)]
fn write_private_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEM: &str = "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n";

    #[test]
    fn test_creates_missing_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".jfrog/security/certs/cert.pem");

        let req = CertificateRequest::new(&path, PEM);
        assert_eq!(req.provision().unwrap(), Provisioned::Created);
        assert_eq!(fs::read_to_string(&path).unwrap(), PEM);
    }

    #[test]
    fn test_second_provision_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("certs/cert.pem");

        let req = CertificateRequest::new(&path, PEM);
        assert_eq!(req.provision().unwrap(), Provisioned::Created);
        assert_eq!(req.provision().unwrap(), Provisioned::AlreadyPresent);
        assert_eq!(fs::read_to_string(&path).unwrap(), PEM);
    }

    #[test]
    fn test_existing_file_not_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cert.pem");
        fs::write(&path, "original").unwrap();

        let req = CertificateRequest::new(&path, PEM);
        assert_eq!(req.provision().unwrap(), Provisioned::AlreadyPresent);
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }

    #[cfg(unix)]
    #[test]
    fn test_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("certs");
        let path = dir.join("cert.pem");

        CertificateRequest::new(&path, PEM).provision().unwrap();

        let file_mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        let dir_mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        assert_eq!(file_mode & 0o077, 0);
        assert_eq!(dir_mode & 0o077, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_dir_failure_is_cert_dir_error() {
        let tmp = tempfile::tempdir().unwrap();
        let dangling = tmp.path().join("certs");
        std::os::unix::fs::symlink(tmp.path().join("missing/deeper"), &dangling).unwrap();

        let req = CertificateRequest::new(dangling.join("cert.pem"), PEM);
        assert!(matches!(req.provision(), Err(UploadError::CertDir { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_failure_is_cert_write_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cert.pem");
        std::os::unix::fs::symlink(tmp.path().join("missing/cert.pem"), &path).unwrap();

        let req = CertificateRequest::new(&path, PEM);
        assert!(matches!(req.provision(), Err(UploadError::CertWrite { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_uncheckable_path_left_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let req = CertificateRequest::new(blocker.join("cert.pem"), PEM);
        assert_eq!(req.provision().unwrap(), Provisioned::Unchecked);
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "");
    }

    #[test]
    fn test_debug_omits_contents() {
        let req = CertificateRequest::new("/tmp/cert.pem", PEM);
        assert!(!format!("{:?}", req).contains("MIIB"));
    }
}
