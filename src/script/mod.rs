//! Reconstructed scripts and the temporary files they run from.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

const SCRIPT_PREFIX: &str = "nbtest-";
const SCRIPT_SUFFIX: &str = ".py";

/// The program text extracted from one notebook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestScript {
    lines: Vec<String>,
}

impl TestScript {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Every line followed by `\n`.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        for line in &self.lines {
            writeln!(w, "{}", line)?;
        }
        w.flush()
    }

    /// Write the script to a fresh temporary file. The file is removed when the
    /// returned handle is dropped.
    pub fn materialize(&self) -> Result<ScriptFile> {
        let dir = std::env::temp_dir();
        let mut file = tempfile::Builder::new()
            .prefix(SCRIPT_PREFIX)
            .suffix(SCRIPT_SUFFIX)
            .tempfile()
            .map_err(|e| Error::io(&dir, e))?;
        let path = file.path().to_path_buf();
        self.write_to(file.as_file_mut())
            .map_err(|e| Error::io(&path, e))?;
        Ok(ScriptFile { file })
    }
}

/// A script written to disk for one interpreter run.
#[derive(Debug)]
pub struct ScriptFile {
    file: NamedTempFile,
}

impl ScriptFile {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Copy the script to `dest` before the temporary file goes away.
    pub fn keep_as(&self, dest: &Path) -> Result<PathBuf> {
        fs::copy(self.path(), dest).map_err(|e| Error::io(dest, e))?;
        Ok(dest.to_path_buf())
    }
}

/// Where `--keep-scripts` puts the script of `notebook`: next to it, as
/// `<stem>.nbcheck.py`.
pub fn kept_script_path(notebook: &Path) -> PathBuf {
    let stem = notebook
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "notebook".to_string());
    notebook.with_file_name(format!("{}.nbcheck{}", stem, SCRIPT_SUFFIX))
}
