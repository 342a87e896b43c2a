//! Integration tests for changeset-git
//!
//! These tests build a throwaway repository with `git2` and read
//! changesets back out of it.

use changeset_git::{Commit, GitError, GitRepo, WalkOptions};
use changeset_html::{Changeset, DELIMITER, RenderOptions};
use chrono::{TimeZone, Utc};
use git2::{Oid, Repository, Signature, Time};
use similar_asserts::assert_eq;
use std::path::Path;
use tempfile::TempDir;

/// 2026-01-17T02:33:06Z
const BASE_TIME: i64 = 1_768_617_186;

/// A scratch repository with a linear history
struct Fixture {
    repo: Repository,
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("create tempdir");
        let repo = Repository::init(dir.path()).expect("init repository");
        Self { repo, dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `file` and commit it `offset` minutes after BASE_TIME
    fn commit(&self, file: &str, contents: &str, message: &str, offset: i64) -> Oid {
        std::fs::write(self.path().join(file), contents).expect("write file");

        let mut index = self.repo.index().expect("open index");
        index.add_path(Path::new(file)).expect("stage file");
        index.write().expect("write index");
        let tree_id = index.write_tree().expect("write tree");
        let tree = self.repo.find_tree(tree_id).expect("find tree");

        let time = Time::new(BASE_TIME + offset * 60, 0);
        let signature =
            Signature::new("Test Author", "test@example.com", &time).expect("signature");

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        self.repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                message,
                &tree,
                &parents,
            )
            .expect("create commit")
    }

    /// Three commits touching `src.rs`
    fn with_history() -> Self {
        let fixture = Self::new();
        fixture.commit("src.rs", "fn main() {\n    old();\n}\n", "Initial commit\n", 0);
        fixture.commit(
            "src.rs",
            "fn main() {\n    new();\n}\n",
            "Replace old call\n\nThe old call is gone.\n",
            1,
        );
        fixture.commit(
            "src.rs",
            "fn main() {\n    new();\n    done();\n}\n",
            "Add done call\n",
            2,
        );
        fixture
    }
}

#[test]
fn test_open_and_head() {
    let fixture = Fixture::with_history();
    let repo = GitRepo::open(fixture.path()).expect("open repo");

    assert!(!repo.is_bare());
    assert!(repo.workdir().is_some());

    let head = repo.head_sha().expect("HEAD sha");
    assert!(Commit::is_valid_sha(&head));
    assert_eq!(repo.commit_count().expect("count"), 3);
}

#[test]
fn test_discover_from_subdirectory() {
    let fixture = Fixture::with_history();
    let nested = fixture.path().join("nested");
    std::fs::create_dir(&nested).expect("create subdirectory");

    let repo = GitRepo::discover(&nested).expect("discover repo");
    assert_eq!(repo.commit_count().expect("count"), 3);
}

#[test]
fn test_get_commit_metadata() {
    let fixture = Fixture::with_history();
    let repo = GitRepo::open(fixture.path()).expect("open repo");

    let commit = repo.get_commit("HEAD~1").expect("get commit");
    assert_eq!(commit.subject(), "Replace old call");
    assert_eq!(commit.author, "Test Author");
    assert_eq!(commit.author_email, "test@example.com");
    assert_eq!(
        commit.timestamp,
        Utc.with_ymd_and_hms(2026, 1, 17, 2, 34, 6).unwrap()
    );
    assert_eq!(commit.parents.len(), 1);
}

#[test]
fn test_changeset_parts() {
    let fixture = Fixture::with_history();
    let repo = GitRepo::open(fixture.path()).expect("open repo");

    let commit = repo.get_commit("HEAD~1").expect("get commit");
    let changeset = repo.changeset("HEAD~1").expect("build changeset");

    assert_eq!(
        changeset.caption,
        format!("{}: Replace old call\n", commit.short_sha())
    );
    assert_eq!(changeset.commit_info, commit.info_block());
    assert!(changeset.commit_info.contains("\n    The old call is gone.\n"));

    assert!(changeset.changes.starts_with("diff --git a/src.rs b/src.rs\n"));
    assert!(changeset.changes.contains("\n--- a/src.rs\n+++ b/src.rs\n"));
    assert!(changeset.changes.contains("\n fn main() {\n"));
    assert!(changeset.changes.contains("\n-    old();\n+    new();\n"));
}

#[test]
fn test_root_commit_diffs_against_empty_tree() {
    let fixture = Fixture::with_history();
    let repo = GitRepo::open(fixture.path()).expect("open repo");

    let changeset = repo.changeset("HEAD~2").expect("build changeset");
    assert!(changeset.changes.contains("\n--- /dev/null\n"));
    assert!(changeset.changes.contains("\n+fn main() {\n+    old();\n+}\n"));
}

#[test]
fn test_changeset_text_splits_back() {
    let fixture = Fixture::with_history();
    let repo = GitRepo::open(fixture.path()).expect("open repo");

    let changeset = repo.changeset("HEAD").expect("build changeset");
    assert_eq!(Changeset::split(&changeset.to_text()), Some(changeset));
}

#[test]
fn test_delimiter_in_diff_renders_as_one_block() {
    let fixture = Fixture::new();
    let oid = fixture.commit("notes.txt", &format!("title\n{DELIMITER}body\n"), "Add notes\n", 0);
    let repo = GitRepo::open(fixture.path()).expect("open repo");

    let changeset = repo.changeset(&oid.to_string()).expect("build changeset");
    assert!(changeset.changes.contains(&format!("\n+{DELIMITER}")));
    assert!(!changeset.splits_cleanly());

    let html = changeset.render(&RenderOptions::escaped());
    assert_eq!(html.matches("<hr>").count(), 0);
    assert!(html.contains(r#"<tt style="color:#080">+title</tt>"#));
}

#[test]
fn test_rendered_changeset_highlights_diff() {
    let fixture = Fixture::with_history();
    let repo = GitRepo::open(fixture.path()).expect("open repo");

    let html = repo
        .changeset("HEAD")
        .expect("build changeset")
        .render(&RenderOptions::escaped());

    assert_eq!(html.matches("<hr>").count(), 2);
    assert!(html.contains(r#"<tt style="color:#080">+&nbsp;&nbsp;&nbsp;&nbsp;done();</tt>"#));
    assert!(html.contains("Author: Test Author &lt;test@example.com&gt;"));
}

#[test]
fn test_invalid_reference() {
    let fixture = Fixture::with_history();
    let repo = GitRepo::open(fixture.path()).expect("open repo");

    match repo.changeset("nonexistent-ref-12345") {
        Err(GitError::InvalidReference { reference }) => {
            assert_eq!(reference, "nonexistent-ref-12345");
        }
        other => panic!("Expected InvalidReference, got {other:?}"),
    }
}

#[test]
fn test_walk_commits_newest_first() {
    let fixture = Fixture::with_history();
    let repo = GitRepo::open(fixture.path()).expect("open repo");

    let commits = repo
        .walk_commits(&WalkOptions::default())
        .expect("walk commits");
    let subjects: Vec<&str> = commits.iter().map(Commit::subject).collect();
    assert_eq!(
        subjects,
        vec!["Add done call", "Replace old call", "Initial commit"]
    );
}

#[test]
fn test_walk_changesets_limit_and_from() {
    let fixture = Fixture::with_history();
    let repo = GitRepo::open(fixture.path()).expect("open repo");

    let changesets = repo
        .walk_changesets(&WalkOptions::latest(2).from("HEAD~1"))
        .expect("walk changesets");

    assert_eq!(changesets.len(), 2);
    assert_eq!(changesets[0].0.subject(), "Replace old call");
    assert_eq!(changesets[1].0.subject(), "Initial commit");
    for (commit, changeset) in &changesets {
        assert_eq!(changeset.commit_info, commit.info_block());
    }
}

#[test]
fn test_walk_date_filters() {
    let fixture = Fixture::with_history();
    let repo = GitRepo::open(fixture.path()).expect("open repo");

    let since = Utc.timestamp_opt(BASE_TIME + 60, 0).unwrap();
    let until = Utc.timestamp_opt(BASE_TIME + 60, 0).unwrap();
    let commits = repo
        .walk_commits(&WalkOptions::default().since(since).until(until))
        .expect("walk commits");

    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].subject(), "Replace old call");
}

#[test]
fn test_walk_commits_error_variant_is_displayable() {
    let fixture = Fixture::new();
    let repo = GitRepo::open(fixture.path()).expect("open repo");

    // An empty repository has no HEAD to walk from
    let err = repo
        .walk_commits(&WalkOptions::default())
        .expect_err("walk should fail without HEAD");
    assert!(err.to_string().starts_with("Git error:"));
}
