mod cli;

use std::time::Duration;

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use nbcheck::{
    config::Config, find_notebooks, printer::ReportPrinter, Exclusions, Extractor, Interpreter,
    Suite,
};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    init_logging(args.verbose);

    // CLI overrides config
    let cfg = Config::load();
    let interpreter = args.interpreter.clone().unwrap_or_else(|| cfg.interpreter());
    let extension = args.extension.clone().unwrap_or_else(|| cfg.extension());
    let mode = match args.mode {
        Some(m) => m,
        None => cfg.extract_mode()?,
    };
    let policy = match args.policy {
        Some(p) => p,
        None => cfg.policy()?,
    };
    let timeout = match args.timeout {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => cfg.timeout()?,
    };
    let skip = if args.skip.is_empty() { cfg.skip_substrings() } else { args.skip.clone() };
    let keep_scripts = args.keep_scripts || cfg.keep_scripts();

    let notebooks = find_notebooks(&args.dir, &extension)
        .with_context(|| format!("listing notebooks in {}", args.dir.display()))?;
    if notebooks.is_empty() {
        warn!(dir = %args.dir.display(), extension = %extension, "no notebooks found");
    }

    let printer = ReportPrinter::new(std::io::stdout().is_terminal());
    let extractor = Extractor::new(mode, Exclusions::with_skip_substrings(skip));

    if args.print_script {
        for nb in &notebooks {
            let script = extractor
                .extract(nb)
                .with_context(|| format!("extracting {}", nb.display()))?;
            printer.print_script(nb, &script);
        }
        return Ok(());
    }

    let interpreter = Interpreter::new(interpreter)
        .with_args(args.interpreter_args.clone())
        .with_timeout(timeout);
    let suite = Suite::new(extractor, interpreter)
        .with_policy(policy)
        .keep_scripts(keep_scripts);

    let report = suite.run(&notebooks).await?;
    printer.print_report(&report);

    let failed = report.failed().count();
    if failed > 0 {
        bail!("{} notebook(s) failed", failed);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "nbcheck=debug" } else { "nbcheck=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
