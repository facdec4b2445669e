//! Core library for the Artifactory upload pipeline step
//!
//! Turns `PLUGIN_*` settings into a single `jfrog rt u` invocation and runs
//! it through the platform shell.

pub mod args;
pub mod cert;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod platform;
pub mod plugin;
pub mod runner;

pub use args::PluginArgs;
pub use cert::{CertificateRequest, Provisioned};
pub use command::{CommandLine, Invocation, UploadCommandBuilder};
pub use config::{Credentials, UploadConfig, UploadSelection};
pub use error::{Result, UploadError};
pub use platform::Platform;
pub use plugin::exec;
pub use runner::ShellRunner;
