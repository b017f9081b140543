//! Interpreter process management.

use std::{path::Path, time::Duration};

use tokio::{process::Command, time::timeout};
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    execution::ExecutionResult,
};

pub const DEFAULT_INTERPRETER: &str = "python";

/// An external program that runs a script file given as its last argument.
#[derive(Debug, Clone)]
pub struct Interpreter {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPRETER)
    }
}

impl Interpreter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }

    /// Run `script` and wait for the interpreter to exit. Output goes straight
    /// to the parent's stdout/stderr.
    pub async fn run(&self, script: &Path) -> Result<ExecutionResult> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(script).kill_on_drop(true);
        debug!(program = %self.program, script = %script.display(), "starting interpreter");

        let mut child = cmd.spawn().map_err(|e| Error::spawn(&self.program, e))?;
        let status = match self.timeout {
            Some(limit) => match timeout(limit, child.wait()).await {
                Ok(status) => status,
                Err(_) => {
                    warn!(program = %self.program, ?limit, "interpreter timed out, killing it");
                    if let Err(e) = child.kill().await {
                        warn!(program = %self.program, error = %e, "failed to kill interpreter");
                    }
                    return Ok(ExecutionResult::timed_out());
                }
            },
            None => child.wait().await,
        }
        .map_err(|e| Error::spawn(&self.program, e))?;

        Ok(ExecutionResult::from_status(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn shell_script(body: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "{}", body).unwrap();
        f
    }

    #[tokio::test]
    async fn test_exit_code_is_reported() {
        let script = shell_script("exit 7");
        let res = Interpreter::new("sh").run(script.path()).await.unwrap();
        assert_eq!(res.code, Some(7));
        assert!(!res.success());
    }

    #[tokio::test]
    async fn test_zero_exit_is_success() {
        let script = shell_script("true");
        let res = Interpreter::new("sh").run(script.path()).await.unwrap();
        assert!(res.success());
    }

    #[tokio::test]
    async fn test_extra_args_come_before_script() {
        // `sh -e` aborts on the failing `false`.
        let script = shell_script("false\nexit 0");
        let res = Interpreter::new("sh")
            .with_args(["-e"])
            .run(script.path())
            .await
            .unwrap();
        assert!(!res.success());
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let script = shell_script("true");
        let err = Interpreter::new("nbcheck-no-such-interpreter")
            .run(script.path())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_timeout_kills_long_runs() {
        let script = shell_script("sleep 10");
        let res = Interpreter::new("sh")
            .with_timeout(Some(Duration::from_millis(200)))
            .run(script.path())
            .await
            .unwrap();
        assert!(res.timed_out);
        assert!(!res.success());
    }
}
