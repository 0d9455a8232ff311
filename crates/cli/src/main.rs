use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use speclens_analysis::Analyzer;
use speclens_scanner::{apply_answer, Lexicon, Scanner};
use std::path::PathBuf;
use std::process::Command;

mod report;
mod store;

#[derive(Parser)]
#[command(name = "speclens")]
#[command(about = "Consistency and ambiguity analysis for specification corpora", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for reports)
    #[arg(long, global = true)]
    quiet: bool,

    /// Emit JSON instead of a text report
    #[arg(long, global = true)]
    json: bool,

    /// TOML file overriding the built-in word lists
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a specification document for ambiguities
    Scan {
        /// Path to the specification document
        file: PathBuf,
    },
    /// Resolve one clarification marker with an answer
    Answer {
        /// Path to the specification document
        file: PathBuf,

        /// Zero-based marker occurrence index
        #[arg(long)]
        index: usize,

        /// Answer text to inline or append
        #[arg(long)]
        answer: String,

        /// Rewrite the file instead of printing the new content
        #[arg(long)]
        in_place: bool,
    },
    /// Run all consistency passes over a feature directory
    Analyze {
        /// Feature directory holding spec.md, plan.md, tasks.md, …
        dir: PathBuf,

        /// Constitution document (default: <dir>/memory/constitution.md)
        #[arg(long)]
        constitution: Option<PathBuf>,

        /// Optional prerequisite check command, run best-effort
        #[arg(long)]
        prereq_cmd: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let lexicon = load_lexicon(cli.lexicon.as_deref())?;
    match cli.command {
        Commands::Scan { file } => run_scan(&file, lexicon, cli.json),
        Commands::Answer {
            file,
            index,
            answer,
            in_place,
        } => run_answer(&file, index, &answer, in_place, cli.json),
        Commands::Analyze {
            dir,
            constitution,
            prereq_cmd,
        } => run_analyze(&dir, constitution.as_deref(), prereq_cmd.as_deref(), lexicon, cli.json),
    }
}

fn run_scan(file: &std::path::Path, lexicon: Lexicon, json: bool) -> Result<()> {
    let text = store::read_required(file)?;
    let outcome = Scanner::new(lexicon).scan(&text);
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", report::render_scan(&outcome));
    }
    Ok(())
}

fn run_answer(
    file: &std::path::Path,
    index: usize,
    answer: &str,
    in_place: bool,
    json: bool,
) -> Result<()> {
    let text = store::read_required(file)?;
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let outcome = apply_answer(&text, index, answer, &today)
        .with_context(|| format!("cannot apply answer to {}", file.display()))?;

    if in_place {
        store::write_document(file, &outcome.document)?;
        log::info!("{} updated ({})", file.display(), outcome.applied_at.as_str());
    } else if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    } else {
        print!("{}", outcome.document);
    }
    eprint!("{}", report::render_answer(&outcome));
    Ok(())
}

fn run_analyze(
    dir: &std::path::Path,
    constitution: Option<&std::path::Path>,
    prereq_cmd: Option<&str>,
    lexicon: Lexicon,
    json: bool,
) -> Result<()> {
    if let Some(cmd) = prereq_cmd {
        run_prereq_best_effort(cmd);
    }

    let corpus = store::DocumentStore::new(dir).load(constitution)?;
    let analysis_report = Analyzer::new(lexicon).analyze(&corpus);
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis_report)?);
    } else {
        print!("{}", report::render_analysis(&analysis_report));
    }
    Ok(())
}

/// Prerequisite checks never block analysis; failures are logged and
/// swallowed.
fn run_prereq_best_effort(cmd: &str) {
    let mut parts = cmd.split_whitespace();
    let Some(program) = parts.next() else {
        return;
    };
    match Command::new(program).args(parts).status() {
        Ok(status) if status.success() => log::debug!("prerequisite check passed"),
        Ok(status) => log::warn!("prerequisite check exited with {status}, continuing"),
        Err(err) => log::warn!("prerequisite check could not run: {err}, continuing"),
    }
}

fn load_lexicon(path: Option<&std::path::Path>) -> Result<Lexicon> {
    match path {
        None => Ok(Lexicon::default()),
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read lexicon {}", path.display()))?;
            Lexicon::from_toml(&raw)
                .with_context(|| format!("invalid lexicon {}", path.display()))
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default));
    builder.target(env_logger::Target::Stderr).init();
}
