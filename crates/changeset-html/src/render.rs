// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! HTML rendering of changeset text
//!
//! Every input maps to a document; there is no error path. Each line is
//! mangled on its own: runs of two or more spaces become `&nbsp;` runs of
//! the same length, then removed and added lines are wrapped in a colored
//! `<tt>` element.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::changeset::blocks;
use crate::line::{LineKind, split_lines};

/// Opening of every rendered document
pub const DOCUMENT_OPEN: &str = "<html><body><tt>";

/// Closing of every rendered document
pub const DOCUMENT_CLOSE: &str = "</tt></body></html>";

/// Separator between rendered lines
pub const LINE_BREAK: &str = "<br>";

/// Marker emitted between changeset blocks
pub const BLOCK_RULE: &str = "<hr>";

const NBSP: &str = "&nbsp;";

static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(" {2,}").expect("space run pattern is valid"));

/// Options controlling how lines are mangled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Escape `&`, `<` and `>` before emitting a line
    pub escape_html: bool,
}

impl RenderOptions {
    /// Options with HTML escaping enabled
    #[must_use]
    pub fn escaped() -> Self {
        Self { escape_html: true }
    }
}

/// Render changeset text as an HTML document without escaping
///
/// # Example
///
/// ```
/// use changeset_html::render;
///
/// assert_eq!(
///     render("a  b"),
///     "<html><body><tt>a&nbsp;&nbsp;b</tt></body></html>"
/// );
/// ```
#[must_use]
pub fn render(text: &str) -> String {
    render_with(text, &RenderOptions::default())
}

/// Render changeset text as an HTML document
#[must_use]
pub fn render_with(text: &str, options: &RenderOptions) -> String {
    let blocks = blocks(text);
    trace!(
        blocks = blocks.len(),
        escape_html = options.escape_html,
        "rendering changeset"
    );

    let mut lines: Vec<String> = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        if index > 0 {
            lines.push(BLOCK_RULE.to_string());
        }
        lines.extend(
            split_lines(block)
                .into_iter()
                .map(|line| mangle_line(line, options)),
        );
    }

    format!("{DOCUMENT_OPEN}{}{DOCUMENT_CLOSE}", lines.join(LINE_BREAK))
}

/// Mangle a single line: escape (optionally), preserve spaces, highlight
#[must_use]
pub fn mangle_line(line: &str, options: &RenderOptions) -> String {
    let escaped = if options.escape_html {
        escape_html(line)
    } else {
        Cow::Borrowed(line)
    };
    let spaced = substitute_spaces(&escaped);

    match LineKind::classify(&spaced).color() {
        Some(color) => format!("<tt style=\"color:{color}\">{spaced}</tt>"),
        None => spaced.into_owned(),
    }
}

/// Replace each run of two or more spaces with as many `&nbsp;` entities
///
/// Single spaces are left alone.
#[must_use]
pub fn substitute_spaces(line: &str) -> Cow<'_, str> {
    SPACE_RUN.replace_all(line, |caps: &Captures<'_>| NBSP.repeat(caps[0].len()))
}

/// Escape the characters that would otherwise be read as markup
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
