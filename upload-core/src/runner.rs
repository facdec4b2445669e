//! Shell execution of the upload command

use crate::command::CommandLine;
use crate::env::EnvironmentBuilder;
use crate::error::{Result, UploadError};
use crate::platform::Platform;
use std::time::Duration;
use tokio::process::Command;

/// Format a Command for display
fn format_command(cmd: &std::process::Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<String> = cmd
        .get_args()
        .map(|arg| arg.to_string_lossy().to_string())
        .collect();
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Print the shell invocation so pipeline logs show what ran
fn trace(cmd: &Command) {
    println!("+ {}", format_command(cmd.as_std()));
}

/// Runs command lines through the platform shell
///
/// Children inherit this process's environment and standard streams, so
/// their output appears live and variable references in the command line
/// are expanded by the shell.
#[derive(Debug, Clone, Copy)]
pub struct ShellRunner {
    platform: Platform,
}

impl ShellRunner {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    fn shell_command(&self, command_line: &str) -> Command {
        let (shell, flag) = self.platform.shell();
        let mut cmd = Command::new(shell);
        cmd.arg(flag).arg(command_line);
        cmd
    }

    /// Run `command` and wait for it to finish
    ///
    /// A non-zero exit is returned as [`UploadError::Exit`] carrying the
    /// child's status; the child has already reported the details itself.
    pub async fn run(&self, command: &CommandLine, env: &EnvironmentBuilder) -> Result<()> {
        let mut cmd = self.shell_command(&command.to_shell_string());
        env.apply(&mut cmd);

        trace(&cmd);
        tracing::debug!("Environment overrides: {:?}", env);

        let status = cmd.status().await.map_err(|source| UploadError::Spawn {
            shell: self.platform.shell().0.to_string(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(UploadError::Exit(status))
        }
    }

    /// Sleep in a separate shell invocation
    ///
    /// Failures are logged and otherwise ignored.
    pub async fn sleep(&self, delay: Duration) {
        let mut cmd = self.shell_command(&self.platform.sleep_command(delay.as_secs()));

        trace(&cmd);
        match cmd.status().await {
            Ok(status) if !status.success() => {
                tracing::warn!("Pre-upload delay exited with {}", status)
            }
            Err(e) => tracing::warn!("Pre-upload delay failed to start: {}", e),
            Ok(_) => {}
        }
    }
}
