//! `mugo` command-line entry point.
//!
//! Reads a Go source file (or stdin), writes the Arduino sketch to a file
//! (or stdout). Diagnostics and logs go to stderr.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mugo::{Error, ParsedFile};

/// Translate a small subset of Go into an Arduino sketch
#[derive(Parser, Debug)]
#[command(name = "mugo", version, about, long_about = None)]
struct Cli {
    /// Go source file; `-` or nothing reads stdin
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file; stdout when absent
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Log translation progress to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print the parsed syntax tree to stderr
    #[arg(long)]
    dump_ast: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path),
        _ => {
            let mut src = String::new();
            io::stdin().read_to_string(&mut src)?;
            Ok(src)
        }
    }
}

fn dump(file: &ParsedFile) {
    eprintln!("{:#?}", file.file);
    eprintln!("{:#?}", file.arena);
}

fn run(cli: &Cli) -> Result<(), Error> {
    let src = read_input(cli.input.as_deref())?;
    let file = mugo::parse_source(&src).map_err(|failure| Error::parse(failure, &src))?;

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let result = mugo::translate(&mut out, &file);
    if cli.dump_ast {
        dump(&file);
    }
    result?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mugo: {err}");
            ExitCode::FAILURE
        }
    }
}
