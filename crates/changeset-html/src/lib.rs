// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! changeset-html: render plaintext changesets as HTML
//!
//! A changeset is a caption, a block of commit metadata and a diff body,
//! separated by the [`DELIMITER`] line. Rendering produces a minimal HTML
//! document in which removed lines are dark red, added lines dark green,
//! and runs of spaces survive browser whitespace collapsing.

#![warn(missing_docs)]

//! # Example
//!
//! ```
//! use changeset_html::{Changeset, render};
//!
//! let changeset = Changeset::new(
//!     "abc1234: fix parser\n",
//!     "Author: Jane <jane@example.com>\n",
//!     "-old line\n+new line\n",
//! );
//! let html = render(&changeset.to_text());
//!
//! assert!(html.starts_with("<html><body><tt>"));
//! assert!(html.contains(r#"<tt style="color:#080">+new line</tt>"#));
//! ```

pub mod changeset;
pub mod line;
pub mod render;

pub use changeset::{Changeset, DELIMITER, blocks};
pub use line::{LineKind, split_lines};
pub use render::{RenderOptions, mangle_line, render, render_with};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::changeset::{Changeset, DELIMITER};
    pub use crate::line::LineKind;
    pub use crate::render::{RenderOptions, render, render_with};
}
