//! Environment overrides for the upload child process

use std::collections::HashMap;
use std::fmt;
use tokio::process::Command;

/// Variables added on top of the inherited parent environment
///
/// Values may be secrets, so `Debug` prints names only.
#[derive(Default, Clone)]
pub struct EnvironmentBuilder {
    vars: HashMap<String, String>,
}

impl EnvironmentBuilder {
    /// Create a new environment builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an environment variable
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Set multiple environment variables
    pub fn set_many<I, K, V>(&mut self, vars: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in vars {
            self.set(key, value);
        }
        self
    }

    /// Apply the overrides to a command; the parent environment stays inherited
    pub fn apply(&self, cmd: &mut Command) {
        cmd.envs(&self.vars);
    }

    /// Get the environment variables as a HashMap
    pub fn vars(&self) -> &HashMap<String, String> {
        &self.vars
    }
}

impl fmt::Debug for EnvironmentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.vars.keys().collect();
        names.sort();
        f.debug_struct("EnvironmentBuilder")
            .field("vars", &names)
            .finish()
    }
}
