//! Runs every notebook of a directory and aggregates the results.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::{ExecutionResult, FailurePolicy};
use crate::{
    error::Result,
    extract::Extractor,
    process::Interpreter,
    script::kept_script_path,
};

#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub path: PathBuf,
    /// Number of lines in the reconstructed script.
    pub lines: usize,
    pub result: ExecutionResult,
    pub kept_script: Option<PathBuf>,
}

impl DocumentReport {
    pub fn passed(&self) -> bool {
        self.result.success()
    }

    pub fn name(&self) -> String {
        display_name(&self.path)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub documents: Vec<DocumentReport>,
    /// Notebooks never attempted because an earlier one failed.
    pub skipped: Vec<PathBuf>,
}

impl RunReport {
    pub fn passed(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents.iter().filter(|d| d.passed())
    }

    pub fn failed(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents.iter().filter(|d| !d.passed())
    }

    pub fn success(&self) -> bool {
        self.failed().next().is_none()
    }
}

pub struct Suite {
    extractor: Extractor,
    interpreter: Interpreter,
    policy: FailurePolicy,
    keep_scripts: bool,
}

impl Suite {
    pub fn new(extractor: Extractor, interpreter: Interpreter) -> Self {
        Self {
            extractor,
            interpreter,
            policy: FailurePolicy::default(),
            keep_scripts: false,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn keep_scripts(mut self, keep: bool) -> Self {
        self.keep_scripts = keep;
        self
    }

    /// Check `notebooks` one after another, in the given order.
    pub async fn run(&self, notebooks: &[PathBuf]) -> Result<RunReport> {
        let mut report = RunReport::default();
        for (i, notebook) in notebooks.iter().enumerate() {
            let doc = self.check(notebook).await?;
            let failed = !doc.passed();
            report.documents.push(doc);
            if failed && self.policy == FailurePolicy::FailFast {
                let rest = &notebooks[i + 1..];
                if !rest.is_empty() {
                    warn!(skipped = rest.len(), "stopping after first failure");
                }
                report.skipped.extend(rest.iter().cloned());
                break;
            }
        }
        Ok(report)
    }

    /// Extract, write and run the script of a single notebook. The temporary
    /// script is released when this returns, whatever the outcome.
    pub async fn check(&self, notebook: &Path) -> Result<DocumentReport> {
        info!("Testing {}", display_name(notebook));
        let script = self.extractor.extract(notebook)?;
        let file = script.materialize()?;
        let result = self.interpreter.run(file.path()).await?;

        let kept_script = if self.keep_scripts {
            Some(file.keep_as(&kept_script_path(notebook))?)
        } else {
            None
        };

        if result.success() {
            info!(notebook = %notebook.display(), lines = script.len(), "notebook passed");
        } else {
            warn!(notebook = %notebook.display(), outcome = %result.describe(), "notebook failed");
        }

        Ok(DocumentReport {
            path: notebook.to_path_buf(),
            lines: script.len(),
            result,
            kept_script,
        })
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, code: i32) -> DocumentReport {
        DocumentReport {
            path: PathBuf::from(name),
            lines: 1,
            result: ExecutionResult::from_code(code),
            kept_script: None,
        }
    }

    #[test]
    fn test_report_counts() {
        let report = RunReport {
            documents: vec![doc("a.ipynb", 0), doc("b.ipynb", 1), doc("c.ipynb", 0)],
            skipped: vec![],
        };
        assert_eq!(report.passed().count(), 2);
        assert_eq!(report.failed().count(), 1);
        assert!(!report.success());
    }

    #[test]
    fn test_empty_report_is_success() {
        assert!(RunReport::default().success());
    }

    #[test]
    fn test_display_name_is_file_name() {
        assert_eq!(doc("/x/y/intro.ipynb", 0).name(), "intro.ipynb");
    }
}
