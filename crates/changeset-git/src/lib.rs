// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! changeset-git: changeset text from git commits
//!
//! This library crate turns commits of a git repository into
//! [`Changeset`](changeset_html::Changeset) values ready for rendering.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use changeset_git::GitRepo;
//! use changeset_html::RenderOptions;
//!
//! let repo = GitRepo::discover(".").expect("open repo");
//! let changeset = repo.changeset("HEAD").expect("build changeset");
//!
//! println!("{}", changeset.render(&RenderOptions::escaped()));
//! ```

pub mod commit;
pub mod error;
pub mod repo;

pub use commit::Commit;
pub use error::GitError;
pub use repo::{GitRepo, WalkOptions};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::Commit;
    pub use crate::error::GitError;
    pub use crate::repo::{GitRepo, WalkOptions};
}
