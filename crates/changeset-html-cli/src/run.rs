// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command execution
//!
//! Reads changeset text from a file, stdin, or a git repository, renders
//! it, and writes the HTML document out.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use changeset_git::{GitRepo, WalkOptions};
use changeset_html::{RenderOptions, render_with};
use tracing::{debug, info, warn};

use crate::config::{Command, Config};

/// Execute the configured command
///
/// # Errors
///
/// Returns an error if input cannot be read, the repository cannot be
/// opened or walked, or output cannot be written.
pub fn run(config: &Config) -> Result<()> {
    let options = config.render_options();
    let output = config.output.as_deref();

    match &config.command {
        None => render_file(None, output, &options),
        Some(Command::Render { input }) => render_file(input.as_deref(), output, &options),
        Some(Command::Commit { reference, .. }) => {
            let repo = open_repo(config)?;
            let changeset = repo
                .changeset(reference)
                .with_context(|| format!("Failed to build changeset for {reference}"))?;
            write_output(output, &changeset.render(&options))
        }
        Some(Command::Log {
            count,
            from,
            out_dir,
            ..
        }) => {
            let repo = open_repo(config)?;
            let mut walk = WalkOptions::latest(*count);
            if let Some(from) = from {
                walk = walk.from(from);
            }
            render_log(&repo, &walk, out_dir, &options).map(|_| ())
        }
    }
}

/// Render a changeset file (or stdin) to a file (or stdout)
///
/// # Errors
///
/// Returns an error if reading the input or writing the output fails.
pub fn render_file(
    input: Option<&Path>,
    output: Option<&Path>,
    options: &RenderOptions,
) -> Result<()> {
    let text = read_input(input)?;
    debug!(bytes = text.len(), "read changeset");
    write_output(output, &render_with(&text, options))
}

/// Render each walked commit into `<short sha>.html` under `out_dir`
///
/// A commit whose short sha was already used by an earlier commit in the
/// walk is written under its full sha instead. Returns the number of files written.
///
/// # Errors
///
/// Returns an error if walking the repository or writing a file fails.
pub fn render_log(
    repo: &GitRepo,
    walk: &WalkOptions,
    out_dir: &Path,
    options: &RenderOptions,
) -> Result<usize> {
    let changesets = repo
        .walk_changesets(walk)
        .context("Failed to walk commits")?;

    let names = file_names(
        changesets
            .iter()
            .map(|(commit, _)| (commit.sha.as_str(), commit.short_sha())),
    );

    for ((commit, changeset), name) in changesets.iter().zip(names) {
        let path = out_dir.join(name);
        fs::write(&path, changeset.render(options))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(sha = commit.short_sha(), path = %path.display(), "wrote commit");
    }

    info!(
        commits = changesets.len(),
        out_dir = %out_dir.display(),
        "rendered commits"
    );
    Ok(changesets.len())
}

/// Read changeset text from a file, or stdin when `input` is `None` or `-`
///
/// # Errors
///
/// Returns an error if the input cannot be read.
pub fn read_input(input: Option<&Path>) -> Result<String> {
    let bytes = match input {
        Some(path) if path != Path::new("-") => {
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
        }
        _ => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    Ok(decode(bytes))
}

/// Write an HTML document to a file, or stdout when `output` is `None`
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_output(output: Option<&Path>, html: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = html.len(), "wrote HTML");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{html}").context("Failed to write stdout")?;
        }
    }
    Ok(())
}

/// Output file names for `(sha, short sha)` pairs, unique within the walk
fn file_names<'a>(shas: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<String> {
    let mut taken = HashSet::new();
    shas.into_iter()
        .map(|(sha, short)| {
            let name = if taken.insert(short) {
                short
            } else {
                warn!(sha, short, "short sha is ambiguous in this walk, using the full sha");
                sha
            };
            format!("{name}.html")
        })
        .collect()
}

fn open_repo(config: &Config) -> Result<GitRepo> {
    let path = config
        .repo_path()
        .context("Cannot determine the repository path")?;
    GitRepo::discover(&path).with_context(|| format!("Failed to open {}", path.display()))
}

/// Decode input bytes, replacing invalid UTF-8 sequences
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!("input is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}
