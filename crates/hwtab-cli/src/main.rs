use clap::{ArgAction, Parser, ValueEnum, builder::BoolishValueParser};
use hwtab_core::{DuplicatePolicy, Format, GoOptions, Options};
use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};
use thiserror::Error as ThisError;

///
/// Cli
///

#[derive(Debug, Parser)]
#[command(
    name = "hwtab",
    version,
    about = "Generate CPU implementer/part lookup tables from lscpu-arm.c"
)]
struct Cli {
    /// Path to the lscpu-arm.c source.
    input: PathBuf,

    /// Write the tables here instead of stdout.
    #[arg(short, long, env = "HWTAB_OUTPUT")]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Go, env = "HWTAB_FORMAT")]
    format: OutputFormat,

    /// Name of the generated Go variable.
    #[arg(long, default_value = GoOptions::DEFAULT_VAR_NAME, env = "HWTAB_VAR_NAME")]
    var_name: String,

    /// Name of the Go record type for each implementer.
    #[arg(long, default_value = GoOptions::DEFAULT_IMPL_TYPE, env = "HWTAB_IMPL_TYPE")]
    impl_type: String,

    /// What to do when an array is declared twice.
    #[arg(long, value_enum, default_value_t = OnDuplicate::Overwrite, env = "HWTAB_ON_DUPLICATE")]
    on_duplicate: OnDuplicate,

    /// Print scanner decisions to stderr.
    #[arg(
        long,
        env = "HWTAB_DEBUG",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    debug: bool,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            format: match self.format {
                OutputFormat::Go => Format::Go,
                OutputFormat::Json => Format::Json,
            },
            go: GoOptions {
                var_name: self.var_name.clone(),
                impl_type: self.impl_type.clone(),
            },
            duplicates: match self.on_duplicate {
                OnDuplicate::Overwrite => DuplicatePolicy::Overwrite,
                OnDuplicate::Reject => DuplicatePolicy::Reject,
            },
            debug: self.debug,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Go,
    Json,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum OnDuplicate {
    Overwrite,
    Reject,
}

///
/// CliError
///

#[derive(Debug, ThisError)]
enum CliError {
    #[error("cannot read `{}`: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write `{}`: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("cannot write to stdout: {0}")]
    Stdout(io::Error),

    #[error(transparent)]
    Generate(#[from] hwtab_core::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

// run
// the whole table is rendered before anything is written
fn run(cli: &Cli) -> Result<(), CliError> {
    let source = fs::read_to_string(&cli.input).map_err(|source| CliError::Read {
        path: cli.input.clone(),
        source,
    })?;
    let tables = hwtab_core::generate(&source, &cli.options())?;

    match &cli.output {
        Some(path) => fs::write(path, tables).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(tables.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(CliError::Stdout)
        }
    }
}
