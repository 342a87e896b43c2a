// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Changeset text and its block structure
//!
//! A changeset is laid out as three parts separated by [`DELIMITER`]:
//! a caption, the commit metadata, and the diff body. Text that does not
//! split into exactly three parts is treated as a single block.

use serde::{Deserialize, Serialize};

use crate::render::{RenderOptions, render_with};

/// Separator line between the parts of a changeset: `>` followed by 63 dashes
pub const DELIMITER: &str = ">---------------------------------------------------------------\n";

/// A changeset split into its three parts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    /// Short title, usually one line
    pub caption: String,
    /// Commit metadata (sha, author, date, message)
    pub commit_info: String,
    /// Diff body
    pub changes: String,
}

impl Changeset {
    /// Create a changeset from its three parts
    #[must_use]
    pub fn new(
        caption: impl Into<String>,
        commit_info: impl Into<String>,
        changes: impl Into<String>,
    ) -> Self {
        Self {
            caption: caption.into(),
            commit_info: commit_info.into(),
            changes: changes.into(),
        }
    }

    /// Split text into a changeset
    ///
    /// Returns `None` unless the delimiter occurs exactly twice.
    #[must_use]
    pub fn split(text: &str) -> Option<Self> {
        let [caption, commit_info, changes] = split_parts(text)?;
        Some(Self::new(caption, commit_info, changes))
    }

    /// Join the parts back into changeset text
    ///
    /// Each part should end with a newline so the delimiter starts its own
    /// line. If any part itself contains the delimiter, the joined text no
    /// longer splits into three parts.
    #[must_use]
    pub fn to_text(&self) -> String {
        format!(
            "{}{DELIMITER}{}{DELIMITER}{}",
            self.caption, self.commit_info, self.changes
        )
    }

    /// Check that the joined text splits back into these same three parts
    ///
    /// Fails when a part contains the delimiter; such a changeset renders as
    /// a single block without `<hr>` markers.
    #[must_use]
    pub fn splits_cleanly(&self) -> bool {
        Self::split(&self.to_text()).as_ref() == Some(self)
    }

    /// Render this changeset as an HTML document
    #[must_use]
    pub fn render(&self, options: &RenderOptions) -> String {
        render_with(&self.to_text(), options)
    }
}

/// Split text into the blocks that are rendered between `<hr>` markers
///
/// Yields three blocks when the delimiter occurs exactly twice and the
/// whole text as one block otherwise.
#[must_use]
pub fn blocks(text: &str) -> Vec<&str> {
    match split_parts(text) {
        Some(parts) => parts.to_vec(),
        None => vec![text],
    }
}

fn split_parts(text: &str) -> Option<[&str; 3]> {
    let mut parts = text.split(DELIMITER);
    let caption = parts.next()?;
    let commit_info = parts.next()?;
    let changes = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some([caption, commit_info, changes])
}
