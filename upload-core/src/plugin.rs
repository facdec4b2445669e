//! Step entry point: delay, build, provision, run

use crate::command::UploadCommandBuilder;
use crate::config::UploadConfig;
use crate::error::Result;
use crate::platform::Platform;
use crate::runner::ShellRunner;

/// Run the upload step
///
/// The optional delay runs first, before any validation. Then the command
/// is built, the trust certificate is written if one was requested, and the
/// jfrog CLI is run to completion.
pub async fn exec(config: &UploadConfig, platform: Platform) -> Result<()> {
    let runner = ShellRunner::new(platform);

    if !config.pre_upload_delay.is_zero() {
        tracing::info!("Waiting {:?} before upload", config.pre_upload_delay);
        runner.sleep(config.pre_upload_delay).await;
    }

    let invocation = UploadCommandBuilder::new(config, platform).build()?;

    if let Some(ref cert) = invocation.certificate {
        cert.provision()?;
    }

    runner.run(&invocation.command, &invocation.env).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UploadError;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_missing_url_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let pem_path = tmp.path().join("certs/cert.pem");

        let config = UploadConfig {
            username: "u".to_string(),
            password: "p".to_string(),
            source: "build/app.zip".to_string(),
            target: "libs/app.zip".to_string(),
            pem_file_contents: "PEM".to_string(),
            pem_file_path: pem_path.display().to_string(),
            ..Default::default()
        };

        let err = exec(&config, Platform::current()).await.unwrap_err();
        assert!(matches!(err, UploadError::MissingUrl));
        assert!(!pem_path.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_delay_runs_before_validation() {
        let config = UploadConfig {
            pre_upload_delay: Duration::from_secs(1),
            ..Default::default()
        };

        let start = Instant::now();
        let err = exec(&config, Platform::Unix).await.unwrap_err();

        assert!(matches!(err, UploadError::MissingUrl));
        assert!(start.elapsed() >= Duration::from_millis(900));
    }

    #[tokio::test]
    async fn test_invalid_selection_writes_no_certificate() {
        let tmp = tempfile::tempdir().unwrap();
        let pem_path = tmp.path().join("cert.pem");

        let config = UploadConfig {
            url: "https://example.com".to_string(),
            api_key: "k".to_string(),
            target: "libs/app.zip".to_string(),
            pem_file_contents: "PEM".to_string(),
            pem_file_path: pem_path.display().to_string(),
            ..Default::default()
        };

        let err = exec(&config, Platform::current()).await.unwrap_err();
        assert!(matches!(err, UploadError::MissingSource));
        assert!(!pem_path.exists());
    }
}
