// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Diff line classification

use serde::{Deserialize, Serialize};

/// Text color for removed lines
pub const REMOVED_COLOR: &str = "#800";

/// Text color for added lines
pub const ADDED_COLOR: &str = "#080";

/// The kind of a single changeset line, decided by its first character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Line starts with `-`
    Removed,
    /// Line starts with `+`
    Added,
    /// Anything else, including the empty line
    Plain,
}

impl LineKind {
    /// Classify a line by its first character
    #[must_use]
    pub fn classify(line: &str) -> Self {
        match line.as_bytes().first() {
            Some(b'-') => Self::Removed,
            Some(b'+') => Self::Added,
            _ => Self::Plain,
        }
    }

    /// Highlight color for this kind, if it is highlighted at all
    #[must_use]
    pub fn color(self) -> Option<&'static str> {
        match self {
            Self::Removed => Some(REMOVED_COLOR),
            Self::Added => Some(ADDED_COLOR),
            Self::Plain => None,
        }
    }
}

/// Characters that end a line, besides the `\r\n` pair
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split text into lines on every line boundary
///
/// Besides `\n` and `\r\n` this breaks on a bare `\r`, vertical tab, form
/// feed, the file/group/record separators, NEL and the Unicode line and
/// paragraph separators. A trailing line break does not produce an empty
/// last line, and empty text has no lines at all.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if !LINE_BREAKS.contains(&c) {
            continue;
        }
        lines.push(&text[start..index]);
        start = index + c.len_utf8();
        if c == '\r' && chars.next_if(|&(_, next)| next == '\n').is_some() {
            start += 1;
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
