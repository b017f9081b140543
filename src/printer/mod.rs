//! Printers: run report and extracted scripts.

use std::path::Path;

use owo_colors::OwoColorize;

use crate::{
    execution::suite::{display_name, RunReport},
    script::TestScript,
};

pub struct ReportPrinter {
    pub color: bool,
}

impl ReportPrinter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn report_text(&self, report: &RunReport) -> String {
        let mut out = String::new();
        for doc in &report.documents {
            let line = if doc.passed() {
                format!("{} {}", self.paint_pass("PASS"), doc.name())
            } else {
                format!(
                    "{} {} ({})",
                    self.paint_fail("FAIL"),
                    doc.name(),
                    doc.result.describe()
                )
            };
            out.push_str(&line);
            out.push('\n');
            if let Some(kept) = &doc.kept_script {
                out.push_str(&format!("     script kept at {}\n", kept.display()));
            }
        }
        for path in &report.skipped {
            out.push_str(&format!("{} {}\n", self.paint_skip("SKIP"), display_name(path)));
        }
        out.push_str(&format!(
            "{} passed, {} failed, {} skipped\n",
            report.passed().count(),
            report.failed().count(),
            report.skipped.len()
        ));
        out
    }

    pub fn print_report(&self, report: &RunReport) {
        print!("{}", self.report_text(report));
    }

    pub fn print_script(&self, notebook: &Path, script: &TestScript) {
        let header = format!("# {}", notebook.display());
        if self.color {
            println!("{}", header.cyan());
        } else {
            println!("{}", header);
        }
        print!("{}", script.render());
    }

    fn paint_pass(&self, s: &str) -> String {
        if self.color { s.green().to_string() } else { s.to_string() }
    }

    fn paint_fail(&self, s: &str) -> String {
        if self.color { s.red().to_string() } else { s.to_string() }
    }

    fn paint_skip(&self, s: &str) -> String {
        if self.color { s.yellow().to_string() } else { s.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::{suite::DocumentReport, ExecutionResult};
    use std::path::PathBuf;

    #[test]
    fn test_plain_report() {
        let report = RunReport {
            documents: vec![
                DocumentReport {
                    path: PathBuf::from("nb/a.ipynb"),
                    lines: 3,
                    result: ExecutionResult::from_code(0),
                    kept_script: None,
                },
                DocumentReport {
                    path: PathBuf::from("nb/b.ipynb"),
                    lines: 1,
                    result: ExecutionResult::from_code(2),
                    kept_script: None,
                },
            ],
            skipped: vec![PathBuf::from("nb/c.ipynb")],
        };
        let text = ReportPrinter::new(false).report_text(&report);
        assert_eq!(
            text,
            "PASS a.ipynb\nFAIL b.ipynb (exit status 2)\nSKIP c.ipynb\n1 passed, 1 failed, 1 skipped\n"
        );
    }

    #[test]
    fn test_colored_report_contains_escape_codes() {
        let report = RunReport {
            documents: vec![DocumentReport {
                path: PathBuf::from("a.ipynb"),
                lines: 0,
                result: ExecutionResult::from_code(0),
                kept_script: None,
            }],
            skipped: vec![],
        };
        let text = ReportPrinter::new(true).report_text(&report);
        assert!(text.contains("\u{1b}["));
        assert!(text.contains("a.ipynb"));
    }
}
