//! Git repository operations.

mod diff;
mod history;
mod refs;

pub use diff::{Diff, DiffDelta, DiffLine, DiffStats, Hunk, diff_lines};
pub use history::History;
pub use refs::{RefInfo, RefKind, list_refs};

use anyhow::{Context, Result, anyhow};
use gix::bstr::ByteSlice;
use std::path::Path;

/// Opens the repository at `path` without searching parent directories.
///
/// # Errors
///
/// Returns error if the path is not a git repository.
pub fn open_repository(path: impl AsRef<Path>) -> Result<gix::Repository> {
    gix::open(path.as_ref())
        .with_context(|| format!("Failed to open repository at {}", path.as_ref().display()))
}

/// Resolves HEAD to a commit id.
///
/// # Errors
///
/// Returns error if HEAD is unborn or points at a missing object.
pub fn head_id(repo: &gix::Repository) -> Result<gix::ObjectId> {
    let id = repo.head_id().context("Failed to resolve HEAD")?;
    Ok(id.detach())
}

/// Point in time with the author's UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    seconds: i64,
    offset_minutes: i32,
}

impl Time {
    /// Creates a time from Unix seconds and an offset in minutes.
    pub fn new(seconds: i64, offset_minutes: i32) -> Self {
        Self {
            seconds,
            offset_minutes,
        }
    }

    /// Unix timestamp in seconds.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Offset from UTC in minutes.
    pub fn offset_minutes(&self) -> i32 {
        self.offset_minutes
    }
}

/// Commit author identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    name: String,
    email: String,
    time: Time,
}

impl Signature {
    /// Creates a signature.
    pub fn new(name: impl Into<String>, email: impl Into<String>, time: Time) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            time,
        }
    }

    /// Author name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Author email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Author timestamp.
    pub fn time(&self) -> Time {
        self.time
    }
}

/// Self-contained view of one commit and its diff against the first parent.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    id: gix::ObjectId,
    parent_id: Option<gix::ObjectId>,
    author: Signature,
    summary: Option<String>,
    message: Option<String>,
    diff: Diff,
    stats: DiffStats,
}

impl CommitInfo {
    /// Commit id.
    pub fn id(&self) -> gix::ObjectId {
        self.id
    }

    /// Commit id as lowercase hexadecimal.
    pub fn oid_hex(&self) -> String {
        self.id.to_hex().to_string()
    }

    /// First parent id, absent for root commits.
    pub fn parent_id(&self) -> Option<gix::ObjectId> {
        self.parent_id
    }

    /// First parent id as hexadecimal.
    pub fn parent_hex(&self) -> Option<String> {
        self.parent_id.map(|id| id.to_hex().to_string())
    }

    /// Commit author.
    pub fn author(&self) -> &Signature {
        &self.author
    }

    /// First paragraph of the message on a single line.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Full commit message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Diff against the first parent.
    pub fn diff(&self) -> &Diff {
        &self.diff
    }

    /// Aggregate statistics of [`Self::diff`].
    pub fn stats(&self) -> DiffStats {
        self.stats
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(
        id: gix::ObjectId,
        parent_id: Option<gix::ObjectId>,
        author: Signature,
        message: &str,
        diff: Diff,
    ) -> Self {
        let stats = diff.stats();
        Self {
            id,
            parent_id,
            author,
            summary: summarize(message),
            message: (!message.is_empty()).then(|| message.to_string()),
            diff,
            stats,
        }
    }
}

/// Materializes a commit, its first-parent linkage and the diff between them.
///
/// A first parent that cannot be found is treated like a root commit: the
/// diff is taken against the empty tree and no parent id is recorded.
///
/// # Errors
///
/// Returns error if the commit does not exist, is not a commit, or its
/// trees and blobs cannot be read.
pub fn extract_commit(repo: &gix::Repository, id: gix::ObjectId) -> Result<CommitInfo> {
    let commit = repo
        .find_object(id)
        .with_context(|| format!("Commit not found: {}", id))?
        .try_into_commit()
        .map_err(|_| anyhow!("Object is not a commit: {}", id))?;

    let tree_id = commit
        .tree_id()
        .with_context(|| format!("Failed to read tree of commit {}", id))?
        .detach();

    let (parent_id, parent_tree) = match commit.parent_ids().next() {
        Some(parent) => match parent_tree_id(repo, parent.detach()) {
            Ok(tree) => (Some(parent.detach()), Some(tree)),
            Err(e) => {
                tracing::debug!("Parent of {} unavailable, diffing as root: {:#}", id, e);
                (None, None)
            }
        },
        None => (None, None),
    };

    let author = commit
        .author()
        .with_context(|| format!("Failed to read author of commit {}", id))?;
    let author = Signature::new(
        author.name.to_str_lossy(),
        author.email.to_str_lossy(),
        Time::new(author.time.seconds, author.time.offset / 60),
    );

    let message = commit
        .message_raw()
        .with_context(|| format!("Failed to read message of commit {}", id))?
        .to_str_lossy()
        .into_owned();

    let diff = Diff::between_trees(repo, parent_tree, tree_id)
        .with_context(|| format!("Failed to diff commit {}", id))?;
    let stats = diff.stats();

    Ok(CommitInfo {
        id,
        parent_id,
        author,
        summary: summarize(&message),
        message: (!message.is_empty()).then_some(message),
        diff,
        stats,
    })
}

fn parent_tree_id(repo: &gix::Repository, parent: gix::ObjectId) -> Result<gix::ObjectId> {
    let commit = repo
        .find_object(parent)
        .with_context(|| format!("Parent commit not found: {}", parent))?
        .try_into_commit()
        .map_err(|_| anyhow!("Parent is not a commit: {}", parent))?;
    Ok(commit.tree_id()?.detach())
}

/// First paragraph of a message with its lines joined by spaces.
fn summarize(message: &str) -> Option<String> {
    let summary = message
        .trim_start()
        .lines()
        .map(str::trim)
        .take_while(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    (!summary.is_empty()).then_some(summary)
}

/// Reads blob content by id.
///
/// # Errors
///
/// Returns error if the object is missing or is not a blob.
pub fn read_blob(repo: &gix::Repository, id: gix::ObjectId) -> Result<Vec<u8>> {
    let blob = repo
        .find_object(id)
        .with_context(|| format!("Blob not found: {}", id))?
        .try_into_blob()
        .map_err(|_| anyhow!("Object is not a blob: {}", id))?;
    Ok(blob.data.to_vec())
}

/// Kind of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular or executable file
    Blob,
    /// Symbolic link, stored as a blob holding the target
    Link,
    /// Nested tree
    Tree,
    /// Submodule commit
    Submodule,
}

/// Entry of a decoded tree.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    name: String,
    mode: u32,
    kind: EntryKind,
    id: gix::ObjectId,
}

impl TreeEntry {
    /// Entry name within its parent tree.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Git file mode bits, e.g. `0o100644`.
    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Entry kind.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Object id the entry points at.
    pub fn id(&self) -> gix::ObjectId {
        self.id
    }
}

/// Reads the tree at `id` into owned entries, in stored order.
///
/// # Errors
///
/// Returns error if the object is missing, is not a tree, or cannot be
/// decoded.
pub fn read_tree(repo: &gix::Repository, id: gix::ObjectId) -> Result<Vec<TreeEntry>> {
    use gix::objs::tree::EntryKind as Kind;

    let tree = repo
        .find_object(id)
        .with_context(|| format!("Tree not found: {}", id))?
        .try_into_tree()
        .map_err(|_| anyhow!("Object is not a tree: {}", id))?;
    let decoded = tree
        .decode()
        .with_context(|| format!("Failed to decode tree {}", id))?;

    let entries = decoded
        .entries
        .iter()
        .map(|entry| {
            let raw = entry.mode.kind();
            let kind = match raw {
                Kind::Tree => EntryKind::Tree,
                Kind::Blob | Kind::BlobExecutable => EntryKind::Blob,
                Kind::Link => EntryKind::Link,
                Kind::Commit => EntryKind::Submodule,
            };
            TreeEntry {
                name: entry.filename.to_str_lossy().into_owned(),
                mode: raw as u32,
                kind,
                id: entry.oid.to_owned(),
            }
        })
        .collect();

    Ok(entries)
}

/// Resolves the tree id of a commit.
///
/// # Errors
///
/// Returns error if the commit cannot be found.
pub fn commit_tree_id(repo: &gix::Repository, id: gix::ObjectId) -> Result<gix::ObjectId> {
    let commit = repo
        .find_object(id)
        .with_context(|| format!("Commit not found: {}", id))?
        .try_into_commit()
        .map_err(|_| anyhow!("Object is not a commit: {}", id))?;
    Ok(commit
        .tree_id()
        .with_context(|| format!("Failed to read tree of commit {}", id))?
        .detach())
}
