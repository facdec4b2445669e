//! Configuration types and constants for the upload step

use crate::error::{Result, UploadError};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the username
pub const USERNAME_VAR: &str = "PLUGIN_USERNAME";

/// Environment variable holding the password
pub const PASSWORD_VAR: &str = "PLUGIN_PASSWORD";

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "PLUGIN_API_KEY";

/// Environment variable holding the access token
pub const ACCESS_TOKEN_VAR: &str = "PLUGIN_ACCESS_TOKEN";

/// Disables the jfrog CLI's interactive configuration prompt
pub const OFFER_CONFIG_VAR: &str = "JFROG_CLI_OFFER_CONFIG";

/// Complete upload step configuration
///
/// Mirrors the flat set of `PLUGIN_*` settings a pipeline provides. Empty
/// strings and zero counts mean "not set"; validation happens when the
/// command is built, not here.
#[derive(Clone, Default)]
pub struct UploadConfig {
    /// Artifactory base URL
    pub url: String,

    pub username: String,
    pub password: String,
    pub api_key: String,
    pub access_token: String,

    /// Upload retries passed to the CLI (0 = CLI default)
    pub retries: i64,

    /// Upload threads passed to the CLI (0 or negative = CLI default)
    pub threads: i64,

    /// Raw flatten setting, parsed leniently
    pub flat: String,

    /// File spec path
    pub spec: String,

    /// Substitutions for the file spec, `key1=value1;key2=value2`
    pub spec_vars: String,

    /// Local path or glob to upload
    pub source: String,

    /// Repository path to upload to
    pub target: String,

    /// Raw insecure-TLS setting, parsed leniently
    pub insecure: String,

    /// PEM certificate to trust
    pub pem_file_contents: String,

    /// Where to write the certificate (platform default when empty)
    pub pem_file_path: String,

    /// Log filter directive
    pub log_level: String,

    /// Pause before anything else runs
    pub pre_upload_delay: Duration,
}

impl fmt::Debug for UploadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("api_key", &redacted(&self.api_key))
            .field("access_token", &redacted(&self.access_token))
            .field("retries", &self.retries)
            .field("threads", &self.threads)
            .field("flat", &self.flat)
            .field("spec", &self.spec)
            .field("spec_vars", &self.spec_vars)
            .field("source", &self.source)
            .field("target", &self.target)
            .field("insecure", &self.insecure)
            .field("pem_file_contents", &redacted(&self.pem_file_contents))
            .field("pem_file_path", &self.pem_file_path)
            .field("log_level", &self.log_level)
            .field("pre_upload_delay", &self.pre_upload_delay)
            .finish()
    }
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

impl UploadConfig {
    /// Resolve which authentication mode to use
    ///
    /// Username and password win over an API key, which wins over an access
    /// token.
    pub fn credentials(&self) -> Result<Credentials> {
        if !self.username.is_empty() && !self.password.is_empty() {
            Ok(Credentials::Basic {
                username: self.username.clone(),
                password: self.password.clone(),
            })
        } else if !self.api_key.is_empty() {
            Ok(Credentials::ApiKey(self.api_key.clone()))
        } else if !self.access_token.is_empty() {
            Ok(Credentials::AccessToken(self.access_token.clone()))
        } else {
            Err(UploadError::MissingCredentials)
        }
    }

    /// Resolve what to upload: a file spec, or a single source/target pair
    pub fn selection(&self) -> Result<UploadSelection> {
        if !self.spec.is_empty() {
            return Ok(UploadSelection::Spec {
                path: self.spec.clone(),
                vars: (!self.spec_vars.is_empty()).then(|| self.spec_vars.clone()),
            });
        }

        if self.source.is_empty() {
            return Err(UploadError::MissingSource);
        }
        if self.target.is_empty() {
            return Err(UploadError::MissingTarget);
        }

        Ok(UploadSelection::Paths {
            source: self.source.clone(),
            target: self.target.clone(),
        })
    }

    /// Whether the CLI should flatten the source directory structure
    pub fn flat(&self) -> bool {
        parse_bool_or_default(false, &self.flat)
    }

    /// Whether TLS verification is disabled
    pub fn insecure(&self) -> bool {
        parse_bool_or_default(false, &self.insecure)
    }

    /// Explicit certificate destination, if one was configured
    pub fn pem_file_path(&self) -> Option<PathBuf> {
        (!self.pem_file_path.is_empty()).then(|| PathBuf::from(&self.pem_file_path))
    }
}

/// Authentication mode for the upload
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Username and password
    Basic { username: String, password: String },

    /// Artifactory API key
    ApiKey(String),

    /// Access token
    AccessToken(String),
}

impl Credentials {
    /// CLI flags paired with the environment variable each one references
    pub fn flags(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Credentials::Basic { .. } => &[("--user", USERNAME_VAR), ("--password", PASSWORD_VAR)],
            Credentials::ApiKey(_) => &[("--apikey", API_KEY_VAR)],
            Credentials::AccessToken(_) => &[("--access-token", ACCESS_TOKEN_VAR)],
        }
    }

    /// Secret values keyed by the variable names used in [`Credentials::flags`]
    pub fn env_vars(&self) -> Vec<(&'static str, String)> {
        match self {
            Credentials::Basic { username, password } => vec![
                (USERNAME_VAR, username.clone()),
                (PASSWORD_VAR, password.clone()),
            ],
            Credentials::ApiKey(key) => vec![(API_KEY_VAR, key.clone())],
            Credentials::AccessToken(token) => vec![(ACCESS_TOKEN_VAR, token.clone())],
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Credentials::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Credentials::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
        }
    }
}

/// What gets uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSelection {
    /// A file spec describing many source/target mappings
    Spec { path: String, vars: Option<String> },

    /// A single source path or glob and its destination
    Paths { source: String, target: String },
}

/// Parse a boolean the way pipeline settings are usually written
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`; anything
/// else (including empty) yields `default`.
pub fn parse_bool_or_default(default: bool, s: &str) -> bool {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
        "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
        _ => default,
    }
}
