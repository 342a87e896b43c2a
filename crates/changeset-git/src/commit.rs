// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git commit metadata and its changeset text

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Indentation applied to message lines in the metadata block
const MESSAGE_INDENT: &str = "    ";

/// Metadata of a single git commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The commit SHA (40 hex characters)
    pub sha: String,
    /// Commit message
    pub message: String,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Parent commit SHAs
    pub parents: Vec<String>,
}

impl Commit {
    /// Validate that a SHA is a valid 40-character hex string
    #[must_use]
    pub fn is_valid_sha(sha: &str) -> bool {
        sha.len() == 40 && sha.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        short(&self.sha)
    }

    /// Check if this is a merge commit (has multiple parents)
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Check if this is a root commit (has no parents)
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Get the first line of the commit message (subject)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Caption part of the changeset: `<short sha>: <subject>`
    #[must_use]
    pub fn caption(&self) -> String {
        format!("{}: {}\n", self.short_sha(), self.subject())
    }

    /// Metadata part of the changeset, laid out like `git log`
    ///
    /// Message lines are indented by four spaces; blank message lines stay
    /// blank.
    #[must_use]
    pub fn info_block(&self) -> String {
        let mut block = format!("commit {}\n", self.sha);

        if self.is_merge() {
            let parents: Vec<&str> = self.parents.iter().map(|p| short(p)).collect();
            block.push_str(&format!("Merge: {}\n", parents.join(" ")));
        }

        block.push_str(&format!("Author: {} <{}>\n", self.author, self.author_email));
        block.push_str(&format!("Date:   {}\n", self.timestamp.to_rfc2822()));
        block.push('\n');

        for line in self.message.lines() {
            if !line.is_empty() {
                block.push_str(MESSAGE_INDENT);
                block.push_str(line);
            }
            block.push('\n');
        }

        block
    }
}

fn short(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
