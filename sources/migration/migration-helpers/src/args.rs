//! Helpers for parsing arguments common to migrations.

use simplelog::LevelFilter;
use std::env;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

/// Stores user-supplied arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub file: PathBuf,
    pub log_level: LevelFilter,
}

/// Informs the user about proper usage of the program and exits.
fn usage() -> ! {
    let program_name = env::args().next().unwrap_or_else(|| "program".to_string());
    eprintln!(
        r"Usage: {}
            [ --file PATH ]
            [ --log-level trace|debug|info|warn|error ]",
        program_name
    );
    process::exit(2);
}

/// Prints a more specific message before exiting through usage().
fn usage_msg<S: AsRef<str>>(msg: S) -> ! {
    eprintln!("{}\n", msg.as_ref());
    usage();
}

impl Args {
    /// Parses user arguments into an Args structure.  The first item is taken to be the program
    /// name and skipped.  `default_file` is the migration's built-in target, used unless
    /// `--file` is given.
    pub fn parse<I, P>(args: I, default_file: P) -> Self
    where
        I: IntoIterator<Item = String>,
        P: Into<PathBuf>,
    {
        let mut file = None;
        let mut log_level = None;

        let mut iter = args.into_iter().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_ref() {
                "--file" => {
                    let path_str = iter
                        .next()
                        .unwrap_or_else(|| usage_msg("Did not give argument to --file"));
                    file = Some(PathBuf::from(path_str));
                }

                "--log-level" => {
                    let log_level_str = iter
                        .next()
                        .unwrap_or_else(|| usage_msg("Did not give argument to --log-level"));
                    log_level = Some(LevelFilter::from_str(&log_level_str).unwrap_or_else(|_| {
                        usage_msg(format!("Invalid log level '{}'", log_level_str))
                    }));
                }

                _ => usage_msg(format!("Unable to parse input '{}'", arg)),
            }
        }

        Self {
            file: file.unwrap_or_else(|| default_file.into()),
            log_level: log_level.unwrap_or(LevelFilter::Info),
        }
    }

    /// Parses the arguments of the running process.
    pub fn from_env<P: Into<PathBuf>>(default_file: P) -> Self {
        Self::parse(env::args(), default_file)
    }
}
