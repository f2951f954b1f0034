//! jsonmin CLI: minify a JSON file (or stdin) using one of the three back
//! ends and write the result to a file (or stdout).

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use jsonmin::{Error, Mode, TurboConfig};

#[derive(Debug, Parser)]
#[command(name = "jsonmin")]
#[command(about = "Minify JSON text", long_about = None)]
#[command(version)]
struct Cli {
    /// Input file path. `-` or absent reads standard input.
    input_path: Option<PathBuf>,

    /// Output file path. Absent writes to standard output.
    output_path: Option<PathBuf>,

    /// Which back end performs the minification.
    #[arg(long, value_enum, default_value = "eco")]
    mode: ModeArg,

    /// Validate the input's JSON structure before minifying.
    #[arg(long)]
    validate: bool,

    /// Worker thread count for `--mode turbo` (0 = auto-detect).
    #[arg(long, default_value = "0")]
    threads: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Eco,
    Sport,
    Turbo,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Eco => Mode::Eco,
            ModeArg::Sport => Mode::Sport,
            ModeArg::Turbo => Mode::Turbo,
        }
    }
}

/// Exit codes per the CLI contract: 0 success, 1 validation error, 2 I/O
/// error, 3 invalid arguments.
const EXIT_OK: u8 = 0;
const EXIT_VALIDATION: u8 = 1;
const EXIT_IO: u8 = 2;
const EXIT_ARGS: u8 = 3;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(EXIT_ARGS);
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_OK),
        Err(CliError::Json(err)) => {
            eprintln!("jsonmin: {err}");
            ExitCode::from(EXIT_VALIDATION)
        }
        Err(CliError::Io(err)) => {
            eprintln!("jsonmin: {err}");
            ExitCode::from(EXIT_IO)
        }
    }
}

enum CliError {
    Json(Error),
    Io(io::Error),
}

impl From<Error> for CliError {
    fn from(err: Error) -> Self {
        match err {
            Error::IoError(io_err) => CliError::Io(io_err),
            other => CliError::Json(other),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io(err)
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let input = read_input(cli.input_path.as_deref())?;

    if cli.validate {
        jsonmin::validate::validate(&input)?;
    }

    let mode = Mode::from(cli.mode);
    let config = TurboConfig {
        thread_count: cli.threads,
        ..TurboConfig::default()
    };
    let output = jsonmin::minify_with_config(&input, mode, &config)?;

    write_output(cli.output_path.as_deref(), &output)?;
    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> Result<Vec<u8>, CliError> {
    let mut buf = Vec::new();
    match path {
        None => {
            io::stdin().read_to_end(&mut buf)?;
        }
        Some(p) if p.as_os_str() == "-" => {
            io::stdin().read_to_end(&mut buf)?;
        }
        Some(p) => {
            File::open(p)?.read_to_end(&mut buf)?;
        }
    }
    Ok(buf)
}

fn write_output(path: Option<&std::path::Path>, bytes: &[u8]) -> Result<(), CliError> {
    match path {
        None => io::stdout().write_all(bytes)?,
        Some(p) => File::create(p)?.write_all(bytes)?,
    }
    Ok(())
}
