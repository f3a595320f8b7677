//! First-parent commit history iteration.

use anyhow::Result;
use std::collections::HashSet;
use std::iter::FusedIterator;

use super::{CommitInfo, extract_commit};

/// Lazy walk over a commit and its first-parent ancestors, newest first.
///
/// Each step extracts a full [`CommitInfo`], so callers can render a commit
/// and drop it before the next one is read. No id is yielded twice. After an
/// extraction error the iterator yields that error once and then ends.
///
/// # Examples
///
/// ```no_run
/// use gitscroll::{History, head_id, open_repository};
///
/// let repo = open_repository(".")?;
/// for commit in History::new(&repo, head_id(&repo)?).take(10) {
///     let commit = commit?;
///     println!("{} {}", commit.oid_hex(), commit.summary().unwrap_or(""));
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct History<'repo> {
    repo: &'repo gix::Repository,
    next: Option<gix::ObjectId>,
    seen: HashSet<gix::ObjectId>,
}

impl<'repo> History<'repo> {
    /// Starts a walk at `start`.
    pub fn new(repo: &'repo gix::Repository, start: gix::ObjectId) -> Self {
        Self {
            repo,
            next: Some(start),
            seen: HashSet::new(),
        }
    }
}

impl Iterator for History<'_> {
    type Item = Result<CommitInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        if !self.seen.insert(id) {
            return None;
        }

        match extract_commit(self.repo, id) {
            Ok(info) => {
                self.next = info.parent_id();
                Some(Ok(info))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

impl FusedIterator for History<'_> {}
