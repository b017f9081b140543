//! nbcheck: keep example notebooks executable.
//!
//! Each notebook found in a directory is turned into a plain script (its code
//! cells, minus magics, interactive login calls and triple-quoted blocks), the
//! script is run by an external interpreter, and the run fails when any script
//! exits non-zero.

pub mod config;
pub mod error;
pub mod execution;
pub mod extract;
pub mod locator;
pub mod printer;
pub mod process;
pub mod script;

pub use error::{Error, Result};
pub use execution::{
    suite::{DocumentReport, RunReport, Suite},
    ExecutionResult, FailurePolicy,
};
pub use extract::{Exclusions, ExtractMode, Extractor};
pub use locator::find_notebooks;
pub use process::Interpreter;
pub use script::{ScriptFile, TestScript};
