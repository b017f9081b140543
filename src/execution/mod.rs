//! Execution results and the per-directory test suite.

use std::process::ExitStatus;

use clap::ValueEnum;

pub mod suite;

/// Outcome of one interpreter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutionResult {
    /// Exit code, `None` when the process was killed by a signal or timed out.
    pub code: Option<i32>,
    pub timed_out: bool,
}

impl ExecutionResult {
    pub fn from_status(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
            timed_out: false,
        }
    }

    pub fn from_code(code: i32) -> Self {
        Self {
            code: Some(code),
            timed_out: false,
        }
    }

    pub fn timed_out() -> Self {
        Self {
            code: None,
            timed_out: true,
        }
    }

    pub fn success(&self) -> bool {
        !self.timed_out && self.code == Some(0)
    }

    pub fn describe(&self) -> String {
        match (self.timed_out, self.code) {
            (true, _) => "timed out".to_string(),
            (false, Some(code)) => format!("exit status {}", code),
            (false, None) => "terminated by signal".to_string(),
        }
    }
}

/// What to do after a notebook fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FailurePolicy {
    /// Stop at the first failing notebook; the rest are skipped.
    #[default]
    FailFast,
    /// Run every notebook and report all failures at the end.
    CollectAll,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_requires_zero_exit() {
        assert!(ExecutionResult::from_code(0).success());
        assert!(!ExecutionResult::from_code(1).success());
        assert!(!ExecutionResult::timed_out().success());
        assert!(!ExecutionResult::default().success());
    }

    #[test]
    fn test_describe() {
        assert_eq!(ExecutionResult::from_code(2).describe(), "exit status 2");
        assert_eq!(ExecutionResult::timed_out().describe(), "timed out");
        assert_eq!(ExecutionResult::default().describe(), "terminated by signal");
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(FailurePolicy::from_str("fail-fast", true), Ok(FailurePolicy::FailFast));
        assert_eq!(FailurePolicy::from_str("Collect-All", true), Ok(FailurePolicy::CollectAll));
        assert!(FailurePolicy::from_str("sometimes", true).is_err());
    }
}
