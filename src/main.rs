use clap::{Parser, ValueEnum};
use color_eyre::eyre::Result;
use noema::diagnostic::{Diagnostic, DiagnosticFormatter, PlainFormatter, PrettyFormatter, Stage};
use noema::interpreter::StdioContext;
use noema::runner::{run_program, RunOptions};
use std::path::PathBuf;
use std::{fs, process::ExitCode};

const EXIT_DATA_ERROR: u8 = 65;
const EXIT_NO_INPUT: u8 = 66;
const EXIT_SOFTWARE: u8 = 70;

#[derive(Debug, Parser)]
#[clap(name = "noema", version, about = "Run a Noema program")]
pub struct CLArgs {
    /// Source file to run.
    pub path: PathBuf,
    /// Tokenize only and print the token stream.
    #[clap(long)]
    pub tokens: bool,
    /// Parse only and print the statement outline.
    #[clap(long)]
    pub ast: bool,
    /// Trace execution (reserved).
    #[clap(long)]
    pub trace: bool,
    #[clap(long = "format", value_enum, default_value = "plain")]
    pub format: DiagnosticFormat,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum DiagnosticFormat {
    Plain,
    Pretty,
}

fn main() -> ExitCode {
    noema_main().expect("Encountered an error!")
}

fn noema_main() -> Result<ExitCode> {
    color_eyre::install()?;
    env_logger::init();
    let args = CLArgs::parse();

    let display_path = args.path.to_string_lossy().into_owned();
    let src = match fs::read(&args.path) {
        Ok(src) => src,
        Err(error) => {
            eprintln!("noema: cannot read {display_path}: {error}");
            return Ok(ExitCode::from(EXIT_NO_INPUT));
        }
    };
    log::info!("running {display_path}");

    let options = RunOptions {
        dump_tokens: args.tokens,
        dump_ast: args.ast,
        trace_exec: args.trace,
    };
    let mut context = StdioContext;
    match run_program(src.as_slice(), Some(&display_path), &options, &mut context) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(diagnostic) => {
            report(&diagnostic, &String::from_utf8_lossy(&src), &args.format);
            Ok(ExitCode::from(exit_code(&diagnostic)))
        }
    }
}

fn report(diagnostic: &Diagnostic, src: &str, format: &DiagnosticFormat) {
    let formatter: Box<dyn DiagnosticFormatter + '_> = match format {
        DiagnosticFormat::Plain => Box::new(PlainFormatter),
        DiagnosticFormat::Pretty => Box::new(PrettyFormatter::new(src)),
    };
    eprintln!("{}", formatter.format(diagnostic));
}

fn exit_code(diagnostic: &Diagnostic) -> u8 {
    match diagnostic.stage {
        Stage::Lexer | Stage::Parser => EXIT_DATA_ERROR,
        Stage::Runtime => EXIT_SOFTWARE,
    }
}
