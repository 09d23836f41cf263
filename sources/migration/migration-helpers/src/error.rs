//! Contains the Error and Result types used by the migration helper functions and migrations.

use snafu::Snafu;
use std::io;
use std::path::PathBuf;

/// Error contains the errors that can happen in the migration helper functions and in migrations.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("File '{}' does not exist", path.display()))]
    MissingFile { path: PathBuf },

    #[snafu(display("Unable to read '{}': {}", path.display(), source))]
    ReadFile { path: PathBuf, source: io::Error },

    #[snafu(display("Unable to write '{}': {}", path.display(), source))]
    WriteFile { path: PathBuf, source: io::Error },

    #[snafu(display("Unable to set up logger: {}", source))]
    Logger { source: log::SetLoggerError },

    // Generic error variant for migration authors
    #[snafu(display("Migration returned error: {}", msg))]
    Migration { msg: String },
}

/// Result alias containing our Error type.
pub type Result<T> = std::result::Result<T, Error>;
