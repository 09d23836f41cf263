//! This module aims to make it as easy as possible to write a one-shot textual migration of a
//! source file.  Migration authors just implement one trait, or reuse one from
//! `common_migrations`, and can then use `migrate` in their main function to take care of
//! argument parsing, logging, and reading and writing the file.
//!
//! Migrations only move forward; there's no rollback, dry run, or backup of the original content.
//! The file is read fully into memory and, if the migration changed anything, fully overwritten in
//! place.

#![deny(rust_2018_idioms)]

#[macro_use]
extern crate log;

mod args;
pub mod common_migrations;
pub mod error;

use simplelog::{ColorChoice, Config as LogConfig, TermLogger, TerminalMode};
use snafu::{ensure, ResultExt};
use std::fs;
use std::path::PathBuf;

pub use args::Args;
pub use error::Result;

/// Migrations must implement this trait, and can then use the migrate method to let this module
/// do the rest of the work.
///
/// Implementations only transform text; they must not touch the filesystem themselves.
pub trait Migration {
    /// Rewrites the full content of the target file, returning the new content and how many
    /// records were changed.
    fn rewrite(&mut self, input: &str) -> Result<Rewrite>;
}

/// Rewrite holds the output of a migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The full content to write back to the file.
    pub content: String,
    /// Number of records the migration rewrote.
    pub records: usize,
}

/// Outcome describes what a run did to the target file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing matched, or nothing changed; the file wasn't written.
    Unchanged,
    /// The file was overwritten with migrated content.
    Migrated { records: usize },
}

/// If you need a little more control over a migration than with migrate, or you're using this
/// module as a library, you can call run_migration directly with the arguments that would
/// normally be parsed from the migration binary's command line.  Doesn't set up logging.
pub fn run_migration(mut migration: impl Migration, args: &Args) -> Result<Outcome> {
    let path = &args.file;
    info!("Opening file: {}", path.display());

    // A missing target is an error; we never create it.
    ensure!(path.exists(), error::MissingFileSnafu { path });

    let content = fs::read_to_string(path).context(error::ReadFileSnafu { path })?;
    debug!("Read {} bytes from {}", content.len(), path.display());

    let migrated = migration.rewrite(&content)?;

    if migrated.content == content {
        info!("No matches found. Already migrated?");
        return Ok(Outcome::Unchanged);
    }

    fs::write(path, &migrated.content).context(error::WriteFileSnafu { path })?;
    debug!(
        "Wrote {} bytes to {}",
        migrated.content.len(),
        path.display()
    );
    info!(
        "Migration finished successfully! Rewrote {} record(s)",
        migrated.records
    );

    Ok(Outcome::Migrated {
        records: migrated.records,
    })
}

/// This is the primary entry point for migration authors.  When you've implemented the Migration
/// trait, you should just be able to pass it to this function from your main function, along with
/// the file it targets by default, and let it take care of the rest.
pub fn migrate<P>(migration: impl Migration, default_file: P) -> Result<Outcome>
where
    P: Into<PathBuf>,
{
    let args = Args::from_env(default_file);
    // TerminalMode::Mixed will send errors to stderr and anything less to stdout.
    TermLogger::init(
        args.log_level,
        LogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context(error::LoggerSnafu)?;

    run_migration(migration, &args)
}
