//! Command-line front end for running DBN drawing programs.

use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use dbn::config::Config;
use dbn::exec::Variables;
use dbn::{Canvas, Interpreter, RecordingSurface, SurfaceCall};

type BoxError = Box<dyn std::error::Error>;

#[derive(Debug, Parser)]
#[command(name = "dbn", version, about = "Interpreter for a small DBN-style drawing language")]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Draw a program onto a fresh canvas
    Run {
        /// Source file, or `-` for stdin
        file: PathBuf,
        /// Write the canvas as a PGM image
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long)]
        width: Option<usize>,
        #[arg(long)]
        height: Option<usize>,
        /// Print a text preview of the canvas
        #[arg(long)]
        preview: bool,
    },
    /// Parse only and report the number of commands
    Check { file: PathBuf },
    /// Print the token sequence as YAML
    Tokens { file: PathBuf },
    /// Print the parsed program as YAML
    Ast { file: PathBuf },
    /// Print the drawing calls a program makes, as YAML
    Trace { file: PathBuf },
}

#[derive(Serialize)]
struct TraceReport {
    calls: Vec<SurfaceCall>,
    variables: Variables,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

fn dispatch(command: Command) -> Result<(), BoxError> {
    match command {
        Command::Run {
            file,
            out,
            width,
            height,
            preview,
        } => {
            let config = Config::load().unwrap_or_default();
            let width = width.unwrap_or(config.width);
            let height = height.unwrap_or(config.height);

            let source = read_source(&file)?;
            let program = Interpreter::parse(&source)?;
            info!(commands = program.len(), width, height, "drawing");

            let mut canvas = Canvas::new(width, height);
            let executor = dbn::execute(&program, &mut canvas);
            debug!(variables = ?executor.variables(), "run finished");

            if let Some(path) = out {
                let writer = BufWriter::new(File::create(&path)?);
                canvas.write_pgm(writer)?;
                info!(?path, "wrote image");
            }
            if preview {
                print!("{}", canvas.preview(config.preview_columns));
            }
        }
        Command::Check { file } => {
            let source = read_source(&file)?;
            let program = Interpreter::parse(&source)?;
            println!("ok: {} top-level commands", program.len());
        }
        Command::Tokens { file } => {
            let source = read_source(&file)?;
            let tokens = Interpreter::tokenize(&source);
            print!("{}", serde_yaml::to_string(&tokens)?);
        }
        Command::Ast { file } => {
            let source = read_source(&file)?;
            let program = Interpreter::parse(&source)?;
            print!("{}", serde_yaml::to_string(&program)?);
        }
        Command::Trace { file } => {
            let config = Config::load().unwrap_or_default();
            let source = read_source(&file)?;
            let mut surface = RecordingSurface::new(config.width as f64, config.height as f64);
            let executor = Interpreter::run(&source, &mut surface)?;
            let report = TraceReport {
                calls: surface.into_calls(),
                variables: executor.variables().clone(),
            };
            print!("{}", serde_yaml::to_string(&report)?);
        }
    }
    Ok(())
}

fn read_source(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        std::fs::read_to_string(path)
    }
}
