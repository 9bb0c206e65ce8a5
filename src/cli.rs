//! Command-line interface for linesweep.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// File to read lines from.
    pub name: Option<PathBuf>,
    /// Mode string for opening the file.
    pub mode: Option<String>,
    /// Buffering hint.
    pub buffering: Option<i64>,
    /// Junk characters to remove.
    pub junk: Option<String>,
    /// JSON document to flatten (`-` reads stdin).
    pub flatten: Option<String>,
    /// Maximum nesting depth for flattening.
    pub max_depth: Option<usize>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// What the binary should do once arguments are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the cleaned lines of a file.
    Strip(PathBuf),
    /// Flatten a JSON document.
    Flatten(String),
}

impl Args {
    /// Resolve the requested command.
    pub fn command(&self) -> Result<Command, ArgsError> {
        match (&self.name, &self.flatten) {
            (Some(name), None) => Ok(Command::Strip(name.clone())),
            (None, Some(json)) => Ok(Command::Flatten(json.clone())),
            (Some(_), Some(_)) => Err(ArgsError::Conflict),
            (None, None) => Err(ArgsError::MissingInput),
        }
    }
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
///
/// Positional arguments follow the reader constructor:
/// `NAME [MODE] [BUFFERING] [JUNK]`.
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);
    let mut position = 0;

    loop {
        let arg = match negative_positional(&mut parser, position) {
            Some(val) => Value(val),
            None => match parser.next()? {
                Some(arg) => arg,
                None => break,
            },
        };
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('m') | Long("mode") => {
                result.mode = Some(parser.value()?.parse()?);
            }
            Short('b') | Long("buffering") => {
                let value: String = parser.value()?.parse()?;
                result.buffering = Some(parse_buffering(value)?);
            }
            Short('j') | Long("junk") => {
                result.junk = Some(parser.value()?.parse()?);
            }
            Short('f') | Long("flatten") => {
                result.flatten = Some(parser.value()?.parse()?);
            }
            Long("max-depth") => {
                let value: String = parser.value()?.parse()?;
                result.max_depth = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("max-depth", value))?,
                );
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                match position {
                    0 => result.name = Some(PathBuf::from(val)),
                    1 => result.mode = Some(val.string()?),
                    2 => result.buffering = Some(parse_buffering(val.string()?)?),
                    3 => result.junk = Some(val.string()?),
                    _ => {
                        return Err(ArgsError::UnexpectedArgument(
                            val.to_string_lossy().into(),
                        ))
                    }
                }
                position += 1;
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Take the next argument as a positional if it is a negative number.
///
/// lexopt would read `-1` as a short option, so after `NAME` such values
/// are pulled off the raw argument list first.
fn negative_positional(parser: &mut lexopt::Parser, position: usize) -> Option<OsString> {
    if !(1..=3).contains(&position) {
        return None;
    }
    parser
        .try_raw_args()?
        .next_if(|arg| arg.to_str().is_some_and(|s| s.parse::<i64>().is_ok_and(|n| n < 0)))
}

fn parse_buffering(value: String) -> Result<i64, ArgsError> {
    value
        .parse()
        .map_err(|_| ArgsError::InvalidValue("buffering", value))
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"linesweep {version}
Read junk-free, trimmed, non-blank lines from a file, or flatten nested JSON arrays

USAGE:
    linesweep [OPTIONS] <NAME> [MODE] [BUFFERING] [JUNK]
    linesweep [OPTIONS] --flatten <JSON>

ARGS:
    <NAME>                  File to read
    [MODE]                  Mode string, e.g. r, rb, r+ [default: r]
    [BUFFERING]             Buffering hint (<0 default, 0 none, 1 line, n bytes)
    [JUNK]                  Characters removed from every line

OPTIONS:
    -m, --mode <MODE>       Mode string
    -b, --buffering <N>     Buffering hint
    -j, --junk <CHARS>      Characters removed from every line
    -f, --flatten <JSON>    Flatten a JSON document ('-' reads stdin)
        --max-depth <N>     Maximum nesting depth when flattening [default: 1000]
    -c, --config <FILE>     Path to configuration file (JSON)
    -l, --log-level <LVL>   Log level (error, warn, info, debug, trace)
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT VARIABLES:
    LINESWEEP_MODE          Mode string (overrides config)
    LINESWEEP_BUFFERING     Buffering hint (overrides config)
    LINESWEEP_JUNK          Junk characters (overrides config)
    LINESWEEP_MAX_DEPTH     Flatten depth limit (overrides config)
    LINESWEEP_LOG_LEVEL     Log level (overrides config)
    RUST_LOG                Alternative log level setting

EXAMPLES:
    # Print the non-blank lines of a file
    linesweep hosts.txt

    # Drop pipes and hashes before trimming
    linesweep dump.txt r -1 '|#'

    # Flatten nested arrays
    linesweep --flatten '[1, [2, [3, [4]], 5]]'
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("linesweep {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
    /// Neither a file nor a JSON document was given.
    MissingInput,
    /// Both a file and a JSON document were given.
    Conflict,
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
            Self::MissingInput => write!(f, "expected a file name or --flatten <JSON>"),
            Self::Conflict => write!(f, "a file name and --flatten cannot be combined"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(args: &[&str]) -> Vec<OsString> {
        std::iter::once("linesweep")
            .chain(args.iter().copied())
            .map(OsString::from)
            .collect()
    }

    #[test]
    fn test_default_args() {
        let result = parse_args_from(args(&[])).unwrap();
        assert!(result.name.is_none());
        assert!(result.mode.is_none());
        assert!(result.junk.is_none());
        assert!(!result.help);
    }

    #[test]
    fn test_positional_order() {
        let result = parse_args_from(args(&["list.txt", "rb", "4096", "|#"])).unwrap();
        assert_eq!(result.name, Some(PathBuf::from("list.txt")));
        assert_eq!(result.mode, Some("rb".to_string()));
        assert_eq!(result.buffering, Some(4096));
        assert_eq!(result.junk, Some("|#".to_string()));
    }

    #[test]
    fn test_too_many_positionals() {
        let result = parse_args_from(args(&["a", "r", "0", "|", "extra"]));
        assert!(matches!(result, Err(ArgsError::UnexpectedArgument(ref a)) if a == "extra"));
    }

    #[test]
    fn test_long_options() {
        let result = parse_args_from(args(&[
            "--mode",
            "r+",
            "--buffering=-1",
            "--junk",
            ";",
            "data.txt",
        ]))
        .unwrap();
        assert_eq!(result.mode, Some("r+".to_string()));
        assert_eq!(result.buffering, Some(-1));
        assert_eq!(result.junk, Some(";".to_string()));
        assert_eq!(result.name, Some(PathBuf::from("data.txt")));
    }

    #[test]
    fn test_short_buffering_takes_negative_value() {
        let result = parse_args_from(args(&["-b", "-1", "x"])).unwrap();
        assert_eq!(result.buffering, Some(-1));
    }

    #[test]
    fn test_negative_positional_buffering() {
        let result = parse_args_from(args(&["dump.txt", "r", "-1", "|#"])).unwrap();
        assert_eq!(result.name, Some(PathBuf::from("dump.txt")));
        assert_eq!(result.mode, Some("r".to_string()));
        assert_eq!(result.buffering, Some(-1));
        assert_eq!(result.junk, Some("|#".to_string()));
    }

    #[test]
    fn test_options_still_parse_between_positionals() {
        let result = parse_args_from(args(&["dump.txt", "-l", "debug", "rb", "-20"])).unwrap();
        assert_eq!(result.log_level, Some("debug".to_string()));
        assert_eq!(result.mode, Some("rb".to_string()));
        assert_eq!(result.buffering, Some(-20));
    }

    #[test]
    fn test_leading_negative_is_still_an_option() {
        let result = parse_args_from(args(&["-1", "dump.txt"]));
        assert!(matches!(result, Err(ArgsError::Lexopt(_))));
    }

    #[test]
    fn test_flatten_option() {
        let result = parse_args_from(args(&["-f", "[1,[2]]", "--max-depth", "4"])).unwrap();
        assert_eq!(result.flatten, Some("[1,[2]]".to_string()));
        assert_eq!(result.max_depth, Some(4));
        assert_eq!(result.command().unwrap(), Command::Flatten("[1,[2]]".into()));
    }

    #[test]
    fn test_config_file() {
        let result = parse_args_from(args(&["-c", "/etc/linesweep.json"])).unwrap();
        assert_eq!(result.config, Some(PathBuf::from("/etc/linesweep.json")));
    }

    #[test]
    fn test_help_flag() {
        let result = parse_args_from(args(&["-h"])).unwrap();
        assert!(result.help);

        let result = parse_args_from(args(&["--help"])).unwrap();
        assert!(result.help);
    }

    #[test]
    fn test_version_flag() {
        let result = parse_args_from(args(&["-V"])).unwrap();
        assert!(result.version);

        let result = parse_args_from(args(&["--version"])).unwrap();
        assert!(result.version);
    }

    #[test]
    fn test_log_level() {
        let result = parse_args_from(args(&["-l", "debug"])).unwrap();
        assert_eq!(result.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_invalid_buffering() {
        assert!(parse_args_from(args(&["-b", "big"])).is_err());
        assert!(parse_args_from(args(&["file", "r", "big"])).is_err());
    }

    #[test]
    fn test_invalid_max_depth() {
        let result = parse_args_from(args(&["--max-depth", "-3"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_option() {
        let result = parse_args_from(args(&["--frobnicate"]));
        assert!(matches!(result, Err(ArgsError::Lexopt(_))));
    }

    #[test]
    fn test_command_resolution() {
        let strip = parse_args_from(args(&["x.txt"])).unwrap();
        assert_eq!(strip.command().unwrap(), Command::Strip(PathBuf::from("x.txt")));

        let none = parse_args_from(args(&[])).unwrap();
        assert!(matches!(none.command(), Err(ArgsError::MissingInput)));

        let both = parse_args_from(args(&["x.txt", "-f", "[]"])).unwrap();
        assert!(matches!(both.command(), Err(ArgsError::Conflict)));
    }
}
