// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the changeset-html command
//!
//! This module provides the command-line configuration, including the
//! input source, output destination, escaping, and logging options.

use std::path::{Path, PathBuf};

use changeset_html::RenderOptions;
use clap::{Parser, Subcommand};

/// Number of commits rendered by `log` when no count is given
pub const DEFAULT_LOG_COUNT: usize = 10;

/// Changeset HTML - render commit changesets as highlighted HTML
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "changeset-html")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (defaults to rendering stdin)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Write the HTML document to this file instead of stdout
    #[arg(short, long, global = true, env = "CHANGESET_HTML_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Emit input text without escaping `&`, `<` and `>`
    ///
    /// Input containing markup will then be interpreted by the browser.
    #[arg(long, global = true, default_value = "false")]
    pub raw: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so stdout carries only HTML.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render a changeset text file
    ///
    /// Example:
    ///   git log -p -1 | changeset-html render > commit.html
    Render {
        /// Changeset file to read; stdin when absent or `-`
        input: Option<PathBuf>,
    },

    /// Render a single commit of a git repository
    Commit {
        /// Commit SHA or reference
        #[arg(default_value = "HEAD")]
        reference: String,

        /// Repository path (defaults to the current directory)
        #[arg(long)]
        repo: Option<PathBuf>,
    },

    /// Render recent commits into one HTML file each
    Log {
        /// Number of commits to render
        #[arg(short = 'n', long, default_value_t = DEFAULT_LOG_COUNT)]
        count: usize,

        /// Start from this reference instead of HEAD
        #[arg(long)]
        from: Option<String>,

        /// Repository path (defaults to the current directory)
        #[arg(long)]
        repo: Option<PathBuf>,

        /// Directory receiving `<short sha>.html` files
        #[arg(long)]
        out_dir: PathBuf,
    },
}

impl Config {
    /// Rendering options implied by the flags
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            escape_html: !self.raw,
        }
    }

    /// Get the repository path, using the current directory as default
    ///
    /// Returns `None` if no repository is specified and the current
    /// directory cannot be determined.
    #[must_use]
    pub fn repo_path(&self) -> Option<PathBuf> {
        let explicit = match &self.command {
            Some(Command::Commit { repo, .. } | Command::Log { repo, .. }) => repo.clone(),
            _ => None,
        };
        explicit.or_else(|| std::env::current_dir().ok())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository path is specified but doesn't exist or isn't a directory
    /// - `--output` is combined with `log`
    /// - The `log` output directory is a file or cannot be created
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(
            Command::Commit {
                repo: Some(repo), ..
            }
            | Command::Log {
                repo: Some(repo), ..
            },
        ) = &self.command
        {
            check_directory(repo)?;
        }

        if let Some(Command::Log { out_dir, .. }) = &self.command {
            if self.output.is_some() {
                return Err(ConfigError::OutputWithLog);
            }
            if out_dir.exists() {
                if !out_dir.is_dir() {
                    return Err(ConfigError::OutputDirectoryNotDirectory(out_dir.clone()));
                }
            } else {
                std::fs::create_dir_all(out_dir).map_err(|e| {
                    ConfigError::OutputDirectoryCreateFailed(out_dir.clone(), e)
                })?;
            }
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

fn check_directory(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::RepositoryNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ConfigError::RepositoryNotDirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepositoryNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepositoryNotDirectory(PathBuf),

    /// Output directory path exists but is a file
    #[error("Output directory is not a directory: {0}")]
    OutputDirectoryNotDirectory(PathBuf),

    /// Failed to create the output directory
    #[error("Failed to create output directory {0}: {1}")]
    OutputDirectoryCreateFailed(PathBuf, std::io::Error),

    /// `--output` names a single file but `log` writes many
    #[error("--output cannot be used with log; use --out-dir")]
    OutputWithLog,
}
