//! Host platform strategy
//!
//! Everything that differs between Windows runners and the rest (shell,
//! binary location, default certificate path, variable syntax) resolves
//! through [`Platform`], so both variants can be exercised on any host.

use std::path::PathBuf;

/// Operating system family the step runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows containers (PowerShell)
    Windows,

    /// Linux, macOS and other POSIX hosts (sh)
    Unix,
}

impl Platform {
    /// The platform this binary was built for
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    /// Shell program and the flag that makes it run a command string
    pub fn shell(self) -> (&'static str, &'static str) {
        match self {
            Platform::Windows => ("powershell", "-Command"),
            Platform::Unix => ("sh", "-c"),
        }
    }

    /// Location of the jfrog CLI
    pub fn jfrog_bin(self) -> &'static str {
        match self {
            Platform::Windows => "C:/bin/jfrog.exe",
            Platform::Unix => "jfrog",
        }
    }

    /// Where the CLI looks for extra trusted certificates
    pub fn default_cert_path(self) -> PathBuf {
        match self {
            Platform::Windows => {
                PathBuf::from("C:/users/ContainerAdministrator/.jfrog/security/certs/cert.pem")
            }
            Platform::Unix => PathBuf::from("/root/.jfrog/security/certs/cert.pem"),
        }
    }

    /// Prefix that makes the shell expand an environment variable name
    pub fn env_prefix(self) -> &'static str {
        match self {
            Platform::Windows => "$Env:",
            Platform::Unix => "$",
        }
    }

    /// Shell expression referencing the environment variable `name`
    pub fn env_ref(self, name: &str) -> String {
        format!("{}{}", self.env_prefix(), name)
    }

    /// Shell command that sleeps for `secs` seconds
    pub fn sleep_command(self, secs: u64) -> String {
        match self {
            Platform::Windows => format!("Start-Sleep {}", secs),
            Platform::Unix => format!("sleep {}", secs),
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}
