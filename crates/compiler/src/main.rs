use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use bantam_compiler::{check_program, load_program, SemanticCheckWorker};
use clap::Parser;
use tracing::{info, Level};

/// Bantam Java semantic checker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Program tree to check, as emitted by the parser
    #[arg(value_name = "PROGRAM_JSON")]
    input: PathBuf,

    /// Source file the tree was parsed from, used to show diagnostics in context
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Run the check on a background thread
    #[arg(short, long)]
    background: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Color diagnostics shown against the source
    #[arg(long)]
    color: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose { Level::INFO } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let program = load_program(&args.input)?;
    let file_name = args
        .source
        .as_ref()
        .unwrap_or(&args.input)
        .display()
        .to_string();
    info!("Checking {} classes from {file_name}", program.classes().len());

    let report = if args.background {
        SemanticCheckWorker::spawn(program, file_name)?.wait()?
    } else {
        check_program(program, &file_name)
    };

    if let Some(path) = &args.source {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read source file {}", path.display()))?;
        for message in report.render_with_source(&source, args.color) {
            println!("{message}");
        }
    }
    print!("{}", report.render());

    if !report.succeeded() {
        std::process::exit(1);
    }
    Ok(())
}
