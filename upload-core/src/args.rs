//! Pipeline settings, read from `PLUGIN_*` environment variables

use crate::config::UploadConfig;
use clap::Parser;
use std::time::Duration;

/// Upload step settings
///
/// Every option can also be passed as a flag, which is handy when running
/// the step by hand. Secrets are best left in the environment.
#[derive(Parser, Debug, Default)]
pub struct PluginArgs {
    /// Log filter (e.g. info, debug, upload_core=trace)
    #[arg(long = "log-level", env = "PLUGIN_LOG_LEVEL", default_value = "")]
    pub level: String,

    /// Artifactory username
    #[arg(long, env = "PLUGIN_USERNAME", default_value = "")]
    pub username: String,

    /// Artifactory password
    #[arg(long, env = "PLUGIN_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Artifactory API key
    #[arg(long, env = "PLUGIN_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Artifactory access token
    #[arg(long, env = "PLUGIN_ACCESS_TOKEN", default_value = "", hide_env_values = true)]
    pub access_token: String,

    /// Artifactory URL
    #[arg(long, env = "PLUGIN_URL", default_value = "")]
    pub url: String,

    /// Local file or glob to upload
    #[arg(long, env = "PLUGIN_SOURCE", default_value = "")]
    pub source: String,

    /// Repository path to upload to
    #[arg(long, env = "PLUGIN_TARGET", default_value = "")]
    pub target: String,

    /// Number of upload retries
    #[arg(long, env = "PLUGIN_RETRIES", default_value_t = 0, allow_negative_numbers = true)]
    pub retries: i64,

    /// Flatten the source directory structure (true/false)
    #[arg(long, env = "PLUGIN_FLAT", default_value = "")]
    pub flat: String,

    /// File spec describing what to upload
    #[arg(long, env = "PLUGIN_SPEC", default_value = "")]
    pub spec: String,

    /// Number of upload threads
    #[arg(long, env = "PLUGIN_THREADS", default_value_t = 0, allow_negative_numbers = true)]
    pub threads: i64,

    /// File spec substitutions, key1=value1;key2=value2
    #[arg(long, env = "PLUGIN_SPEC_VARS", default_value = "")]
    pub spec_vars: String,

    /// Skip TLS certificate verification (true/false)
    #[arg(long, env = "PLUGIN_INSECURE", default_value = "")]
    pub insecure: String,

    /// PEM certificate to trust
    #[arg(long, env = "PLUGIN_PEM_FILE_CONTENTS", default_value = "", hide_env_values = true)]
    pub pem_file_contents: String,

    /// Where to write the PEM certificate
    #[arg(long, env = "PLUGIN_PEM_FILE_PATH", default_value = "")]
    pub pem_file_path: String,

    /// Seconds to wait before doing anything
    #[arg(long, env = "PLUGIN_PRE_UPLOAD_DELAY", default_value_t = 0, value_name = "SECS")]
    pub pre_upload_delay: u64,
}

impl From<PluginArgs> for UploadConfig {
    fn from(args: PluginArgs) -> Self {
        UploadConfig {
            url: args.url,
            username: args.username,
            password: args.password,
            api_key: args.api_key,
            access_token: args.access_token,
            retries: args.retries,
            threads: args.threads,
            flat: args.flat,
            spec: args.spec,
            spec_vars: args.spec_vars,
            source: args.source,
            target: args.target,
            insecure: args.insecure,
            pem_file_contents: args.pem_file_contents,
            pem_file_path: args.pem_file_path,
            log_level: args.level,
            pre_upload_delay: Duration::from_secs(args.pre_upload_delay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches};

    /// Parse flags only, ignoring any `PLUGIN_*` variables in the test environment
    fn parse_flags<const N: usize>(argv: [&str; N]) -> clap::error::Result<PluginArgs> {
        let matches = PluginArgs::command()
            .mut_args(|arg| arg.env(None::<&str>))
            .try_get_matches_from(argv)?;
        PluginArgs::from_arg_matches(&matches)
    }

    #[test]
    fn test_flags_map_to_config() {
        let args = parse_flags([
            "artifactory-upload",
            "--url",
            "https://example.com",
            "--access-token",
            "t",
            "--source",
            "build/app.zip",
            "--target",
            "libs/app.zip",
            "--retries",
            "2",
            "--flat",
            "true",
            "--pre-upload-delay",
            "5",
        ])
        .unwrap();

        let config = UploadConfig::from(args);
        assert_eq!(config.url, "https://example.com");
        assert_eq!(config.access_token, "t");
        assert_eq!(config.source, "build/app.zip");
        assert_eq!(config.target, "libs/app.zip");
        assert_eq!(config.retries, 2);
        assert!(config.flat());
        assert_eq!(config.pre_upload_delay, Duration::from_secs(5));
    }

    #[test]
    fn test_negative_counts_accepted() {
        let args = parse_flags([
            "artifactory-upload",
            "--retries",
            "-1",
            "--threads",
            "-4",
        ])
        .unwrap();

        let config = UploadConfig::from(args);
        assert_eq!(config.retries, -1);
        assert_eq!(config.threads, -4);
    }

    #[test]
    fn test_unset_flags_are_empty() {
        let config = UploadConfig::from(parse_flags(["artifactory-upload"]).unwrap());
        assert!(config.url.is_empty());
        assert_eq!(config.threads, 0);
        assert!(config.pre_upload_delay.is_zero());
    }

    #[test]
    fn test_cli_definition() {
        PluginArgs::command().debug_assert();
    }
}
