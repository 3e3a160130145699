//! `multiflexi-cli` process adapter

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{CoreError, CoreResult, RemoteFailure};
use crate::traits::{DataSource, SourceRequest};

/// Default program name
pub const DEFAULT_PROGRAM: &str = "multiflexi-cli";

/// Runs every request as a child process of the CLI tool.
///
/// The child is killed when the invocation future is dropped, so a caller
/// timing out does not leave stray processes behind.
#[derive(Debug, Clone)]
pub struct CliDataSource {
    program: String,
    base_args: Vec<String>,
}

impl CliDataSource {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
        }
    }

    /// Arguments inserted before every request (e.g. a config file switch)
    #[must_use]
    pub fn with_base_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CliDataSource {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

#[async_trait]
impl DataSource for CliDataSource {
    async fn invoke(&self, request: &SourceRequest) -> CoreResult<String> {
        let args = request.to_args();
        log::debug!("[cli] {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&self.base_args)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| CoreError::RemoteExecution {
                command: request.to_string(),
                failure: RemoteFailure::Unavailable(format!("{}: {e}", self.program)),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(CoreError::RemoteExecution {
                command: request.to_string(),
                failure: RemoteFailure::Exited {
                    code: output.status.code(),
                    stderr,
                },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
