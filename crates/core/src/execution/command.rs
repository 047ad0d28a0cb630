//! Process execution utilities
//!
//! A thin wrapper around `std::process::Command` with consistent working
//! directory handling and error reporting for the java invocations the debug
//! pipeline makes.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::types::{SpigletError, SpigletResult};

/// Executes external commands inside a fixed working directory
pub struct CommandExecutor {
    working_dir: PathBuf,
}

impl CommandExecutor {
    pub fn new(working_dir: &Path) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
        }
    }

    /// Run `java [jvm_args] -jar <jar> [program_args]`
    pub fn run_jar(
        &self,
        jvm_args: &[String],
        jar: &Path,
        program_args: &[String],
    ) -> SpigletResult<()> {
        let mut command = Command::new("java");
        command.args(jvm_args).arg("-jar").arg(jar).args(program_args);
        self.execute_command(
            &mut command,
            &format!("Failed to launch java for {}", jar.display()),
            &format!("java exited with failure for {}", jar.display()),
        )
    }

    /// Execute a command with common setup and error handling
    pub fn execute_command(
        &self,
        command: &mut Command,
        execution_error_message: &str,
        failure_error_message: &str,
    ) -> SpigletResult<()> {
        command.current_dir(&self.working_dir);

        let status = command
            .status()
            .map_err(|e| SpigletError::Task(format!("{}: {}", execution_error_message, e)))?;

        if !status.success() {
            return Err(SpigletError::Task(format!(
                "{}: exit code {}",
                failure_error_message,
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }
}
