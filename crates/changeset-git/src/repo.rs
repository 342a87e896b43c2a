// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Reading changesets from a git repository
//!
//! This module walks commits with the `git2` crate and assembles each one
//! into a [`Changeset`]: caption, `git log` style metadata, and the unified
//! patch against its first parent.

use crate::commit::Commit;
use crate::error::GitError;
use changeset_html::Changeset;
use chrono::{DateTime, TimeZone, Utc};
use git2::{DiffFormat, DiffOptions, Repository, Sort};
use std::path::Path;
use tracing::{debug, warn};

/// Configuration for walking commits
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Maximum number of commits to retrieve
    pub limit: Option<usize>,
    /// Start from this commit (defaults to HEAD)
    pub from_ref: Option<String>,
    /// Only include commits after this date
    pub since: Option<DateTime<Utc>>,
    /// Only include commits before this date
    pub until: Option<DateTime<Utc>>,
}

impl WalkOptions {
    /// Create options for walking the N most recent commits
    #[must_use]
    pub fn latest(n: usize) -> Self {
        Self {
            limit: Some(n),
            ..Default::default()
        }
    }

    /// Set the starting reference
    #[must_use]
    pub fn from(mut self, reference: &str) -> Self {
        self.from_ref = Some(reference.to_string());
        self
    }

    /// Filter commits since a date
    #[must_use]
    pub fn since(mut self, date: DateTime<Utc>) -> Self {
        self.since = Some(date);
        self
    }

    /// Filter commits until a date
    #[must_use]
    pub fn until(mut self, date: DateTime<Utc>) -> Self {
        self.until = Some(date);
        self
    }

    fn admits(&self, timestamp: DateTime<Utc>) -> bool {
        self.since.is_none_or(|since| timestamp >= since)
            && self.until.is_none_or(|until| timestamp <= until)
    }
}

/// A git repository wrapper for building changesets
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Discover and open a git repository containing the given path
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Check if the repository is bare
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    /// Get the repository path
    #[must_use]
    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Get the HEAD commit SHA
    ///
    /// # Errors
    ///
    /// Returns `GitError` if HEAD cannot be resolved.
    pub fn head_sha(&self) -> Result<String, GitError> {
        let head = self.repo.head()?;
        let oid = head.target().ok_or_else(|| GitError::InvalidReference {
            reference: "HEAD".to_string(),
        })?;
        Ok(oid.to_string())
    }

    /// Count commits reachable from HEAD
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the repository cannot be walked.
    pub fn commit_count(&self) -> Result<usize, GitError> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;
        Ok(revwalk.count())
    }

    /// Get the metadata of a single commit by SHA or reference
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidReference` if the reference cannot be resolved.
    pub fn get_commit(&self, reference: &str) -> Result<Commit, GitError> {
        let git_commit = self.resolve(reference)?;
        Ok(extract_commit(&git_commit))
    }

    /// Build the changeset of a single commit by SHA or reference
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidReference` if the reference cannot be resolved,
    /// or `GitError::Git2` if the diff cannot be produced.
    pub fn changeset(&self, reference: &str) -> Result<Changeset, GitError> {
        let git_commit = self.resolve(reference)?;
        let commit = extract_commit(&git_commit);
        self.assemble(&git_commit, &commit)
    }

    /// Walk commit metadata according to the given options
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the repository cannot be walked.
    pub fn walk_commits(&self, options: &WalkOptions) -> Result<Vec<Commit>, GitError> {
        let mut commits = Vec::new();
        self.walk(options, |_, commit| {
            commits.push(commit);
            Ok(())
        })?;
        Ok(commits)
    }

    /// Walk commits and build the changeset of each one
    ///
    /// Commits are returned newest first, paired with their changesets.
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the repository cannot be walked or a diff fails.
    pub fn walk_changesets(
        &self,
        options: &WalkOptions,
    ) -> Result<Vec<(Commit, Changeset)>, GitError> {
        let mut changesets = Vec::new();
        self.walk(options, |git_commit, commit| {
            let changeset = self.assemble(git_commit, &commit)?;
            changesets.push((commit, changeset));
            Ok(())
        })?;
        Ok(changesets)
    }

    fn walk<F>(&self, options: &WalkOptions, mut visit: F) -> Result<(), GitError>
    where
        F: FnMut(&git2::Commit<'_>, Commit) -> Result<(), GitError>,
    {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME | Sort::TOPOLOGICAL)?;

        // Start from specified ref or HEAD
        if let Some(ref from_ref) = options.from_ref {
            let oid = self.resolve(from_ref)?.id();
            revwalk.push(oid)?;
        } else {
            revwalk.push_head()?;
        }

        let limit = options.limit.unwrap_or(usize::MAX);
        let mut visited = 0;

        for oid_result in revwalk {
            if visited >= limit {
                break;
            }

            let git_commit = self.repo.find_commit(oid_result?)?;
            let commit = extract_commit(&git_commit);
            if !options.admits(commit.timestamp) {
                continue;
            }

            visit(&git_commit, commit)?;
            visited += 1;
        }

        debug!(commits = visited, "walked commits");
        Ok(())
    }

    fn resolve(&self, reference: &str) -> Result<git2::Commit<'_>, GitError> {
        let invalid = || GitError::InvalidReference {
            reference: reference.to_string(),
        };
        let obj = self.repo.revparse_single(reference).map_err(|_| invalid())?;
        obj.peel_to_commit().map_err(|_| invalid())
    }

    fn assemble(
        &self,
        git_commit: &git2::Commit<'_>,
        commit: &Commit,
    ) -> Result<Changeset, GitError> {
        let changes = self.patch_text(git_commit)?;
        debug!(
            sha = commit.short_sha(),
            patch_bytes = changes.len(),
            "assembled changeset"
        );

        let changeset = Changeset::new(commit.caption(), commit.info_block(), changes);
        if !changeset.splits_cleanly() {
            warn!(
                sha = commit.short_sha(),
                "changeset text contains the delimiter, it will render as a single block"
            );
        }
        Ok(changeset)
    }

    /// Unified patch of a commit against its first parent
    fn patch_text(&self, git_commit: &git2::Commit<'_>) -> Result<String, GitError> {
        let tree = git_commit.tree()?;

        // Get parent tree (or empty for root commits)
        let parent_tree = if git_commit.parent_count() > 0 {
            Some(git_commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut opts = DiffOptions::new();
        opts.ignore_whitespace(false);

        let diff =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;

        let mut patch = String::new();
        let mut lossy = false;
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            // Content lines carry their origin separately; headers already include it
            let origin = line.origin();
            if matches!(origin, '+' | '-' | ' ') {
                patch.push(origin);
            }
            match std::str::from_utf8(line.content()) {
                Ok(content) => patch.push_str(content),
                Err(_) => {
                    lossy = true;
                    patch.push_str(&String::from_utf8_lossy(line.content()));
                }
            }
            true
        })?;

        if lossy {
            warn!(
                sha = %git_commit.id(),
                "patch contains non-UTF-8 bytes, decoded lossily"
            );
        }

        Ok(patch)
    }
}

/// Extract commit metadata from a git2 commit
fn extract_commit(git_commit: &git2::Commit<'_>) -> Commit {
    let timestamp = Utc
        .timestamp_opt(git_commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    Commit {
        sha: git_commit.id().to_string(),
        message: git_commit.message().unwrap_or("").to_string(),
        author: git_commit.author().name().unwrap_or("Unknown").to_string(),
        author_email: git_commit.author().email().unwrap_or("").to_string(),
        timestamp,
        parents: git_commit.parent_ids().map(|id| id.to_string()).collect(),
    }
}
