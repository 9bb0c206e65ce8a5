//! linesweep binary entry point.

use std::error::Error;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use linesweep::cli::{self, ArgsError, Command};
use linesweep::config::Config;
use linesweep::{flatten_json, logging, with_reader};
use tracing::{debug, error};

fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => return usage_error(&e),
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let command = match args.command() {
        Ok(command) => command,
        Err(e) => return usage_error(&e),
    };

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::try_init_with_filter(config.log_filter()).ok();
    debug!("linesweep v{}", env!("CARGO_PKG_VERSION"));

    match run(command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn usage_error(e: &ArgsError) -> ExitCode {
    eprintln!("error: {}", e);
    eprintln!("Try 'linesweep --help' for more information.");
    ExitCode::from(2)
}

fn run(command: Command, config: &Config) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Strip(path) => strip(&path, config),
        Command::Flatten(json) => flatten(&json, config),
    }
}

fn strip(path: &Path, config: &Config) -> Result<(), Box<dyn Error>> {
    let options = config.to_reader_options()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    with_reader(path, &options, |reader| {
        for line in reader {
            writeln!(out, "{}", line?)?;
        }
        Ok::<_, Box<dyn Error>>(())
    })?;

    out.flush()?;
    Ok(())
}

fn flatten(json: &str, config: &Config) -> Result<(), Box<dyn Error>> {
    let text = if json == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        json.to_string()
    };

    let flat = flatten_json(&text, &config.to_flattener())?;
    println!("{}", serde_json::to_string(&flat)?);
    Ok(())
}
