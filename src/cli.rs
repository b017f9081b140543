use std::path::PathBuf;

use clap::Parser;
use nbcheck::{ExtractMode, FailurePolicy};

#[derive(Parser, Debug, Clone)]
#[command(name = "nbcheck", about = "Run notebook code cells as scripts and fail when they break", version)]
pub struct Cli {
    /// Directory containing the notebooks.
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Interpreter used to run the extracted scripts.
    #[arg(long)]
    pub interpreter: Option<String>,

    /// Extra argument passed to the interpreter before the script path.
    /// Can be used multiple times: --arg -W --arg error
    #[arg(long = "arg", action = clap::ArgAction::Append, allow_hyphen_values = true)]
    pub interpreter_args: Vec<String>,

    /// Notebook file extension.
    #[arg(long)]
    pub extension: Option<String>,

    /// How code is recovered from the notebook.
    #[arg(long, value_enum)]
    pub mode: Option<ExtractMode>,

    /// What to do after a notebook fails.
    #[arg(long, value_enum)]
    pub policy: Option<FailurePolicy>,

    /// Kill a script after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Drop source lines containing this text (replaces the configured list).
    /// Can be used multiple times.
    #[arg(long = "skip", action = clap::ArgAction::Append)]
    pub skip: Vec<String>,

    /// Print the extracted scripts instead of running them.
    #[arg(long = "print-script")]
    pub print_script: bool,

    /// Save each script next to its notebook as <name>.nbcheck.py.
    #[arg(long = "keep-scripts")]
    pub keep_scripts: bool,

    /// Debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
