//! Upload command construction

use crate::cert::CertificateRequest;
use crate::config::{Credentials, UploadConfig, UploadSelection, OFFER_CONFIG_VAR};
use crate::env::EnvironmentBuilder;
use crate::error::{Result, UploadError};
use crate::platform::Platform;
use std::fmt;

/// Ordered command-line tokens, joined with spaces for the shell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token
    pub fn push<S: Into<String>>(&mut self, token: S) -> &mut Self {
        self.tokens.push(token.into());
        self
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The single string handed to the shell
    pub fn to_shell_string(&self) -> String {
        self.tokens.join(" ")
    }
}

impl<S: Into<String>> FromIterator<S> for CommandLine {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell_string())
    }
}

/// Everything needed to run one upload
#[derive(Debug)]
pub struct Invocation {
    /// The jfrog command line
    pub command: CommandLine,

    /// Certificate to write before running, if any
    pub certificate: Option<CertificateRequest>,

    /// Overrides layered over the inherited environment
    pub env: EnvironmentBuilder,
}

/// Builder turning an [`UploadConfig`] into an [`Invocation`]
pub struct UploadCommandBuilder<'a> {
    config: &'a UploadConfig,
    platform: Platform,
}

impl<'a> UploadCommandBuilder<'a> {
    pub fn new(config: &'a UploadConfig, platform: Platform) -> Self {
        Self { config, platform }
    }

    /// Validate the configuration and build the invocation
    ///
    /// Tokens are emitted subcommand first, then flags, then the optional
    /// source/target positionals; the CLI relies on that grouping.
    pub fn build(self) -> Result<Invocation> {
        let config = self.config;

        if config.url.is_empty() {
            return Err(UploadError::MissingUrl);
        }

        let mut cmd = CommandLine::new();
        cmd.push(self.platform.jfrog_bin())
            .push("rt")
            .push("u")
            .push(format!("--url {}", config.url));

        if config.retries != 0 {
            cmd.push(format!("--retries={}", config.retries));
        }

        // Secrets are referenced by variable name and expanded by the shell
        let credentials = config.credentials()?;
        self.push_credentials(&mut cmd, &credentials);

        cmd.push(format!("--flat={}", config.flat()));

        if config.threads > 0 {
            cmd.push(format!("--threads={}", config.threads));
        }

        let insecure = config.insecure();
        if insecure {
            cmd.push("--insecure-tls");
        }

        let certificate = if !config.pem_file_contents.is_empty() && !insecure {
            let path = config
                .pem_file_path()
                .unwrap_or_else(|| self.platform.default_cert_path());
            Some(CertificateRequest::new(path, config.pem_file_contents.clone()))
        } else {
            None
        };

        match config.selection()? {
            UploadSelection::Spec { path, vars } => {
                cmd.push(format!("--spec={}", path));
                if let Some(vars) = vars {
                    cmd.push(format!("--spec-vars='{}'", vars));
                }
            }
            UploadSelection::Paths { source, target } => {
                cmd.push(format!("\"{}\"", source)).push(target);
            }
        }

        let mut env = EnvironmentBuilder::new();
        env.set(OFFER_CONFIG_VAR, "false")
            .set_many(credentials.env_vars());

        tracing::debug!("Built upload command: {}", cmd);

        Ok(Invocation {
            command: cmd,
            certificate,
            env,
        })
    }

    fn push_credentials(&self, cmd: &mut CommandLine, credentials: &Credentials) {
        for (flag, var) in credentials.flags() {
            cmd.push(format!("{} {}", flag, self.platform.env_ref(var)));
        }
    }
}
