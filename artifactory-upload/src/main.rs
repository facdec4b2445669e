//! Pipeline step uploading build artifacts to Artifactory with the jfrog CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::EnvFilter;
use upload_core::{Platform, PluginArgs, UploadConfig, UploadError};

#[derive(Parser)]
#[command(
    name = "artifactory-upload",
    about = "Upload artifacts to Artifactory using the jfrog CLI",
    version
)]
struct Args {
    #[command(flatten)]
    plugin: PluginArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = UploadConfig::from(args.plugin);

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.log_level))
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Configuration: {:?}", config);

    match upload_core::exec(&config, Platform::current()).await {
        Ok(()) => Ok(()),
        Err(e @ UploadError::Exit(_)) => {
            // The CLI has already explained itself on stderr
            tracing::error!("jfrog {}", e);
            std::process::exit(e.exit_code())
        }
        Err(e) => Err(report(e)),
    }
}

/// Validation and certificate errors get step context; a failed spawn is passed on as is
fn report(e: UploadError) -> anyhow::Error {
    match e {
        e @ UploadError::Spawn { .. } => e.into(),
        e => anyhow::Error::new(e).context("Upload step failed"),
    }
}

/// Build the log filter from the configured level, falling back to RUST_LOG and then info
fn env_filter(level: &str) -> EnvFilter {
    if !level.is_empty() {
        match EnvFilter::try_new(level) {
            Ok(filter) => return filter,
            Err(e) => eprintln!("Ignoring invalid log level {:?}: {}", level, e),
        }
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_failure_not_wrapped() {
        let err = UploadError::Spawn {
            shell: "sh".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let expected = err.to_string();

        let reported = report(err);
        assert_eq!(reported.to_string(), expected);
        assert_eq!(reported.chain().count(), 2);
    }

    #[test]
    fn test_validation_failure_gets_context() {
        let reported = report(UploadError::MissingUrl);
        assert_eq!(reported.to_string(), "Upload step failed");
        assert_eq!(reported.root_cause().to_string(), "url needs to be set");
    }
}
