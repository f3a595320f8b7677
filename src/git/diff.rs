//! Tree-to-tree diffs with line-level hunks.

use anyhow::Result;
use gix::diff::blob::intern::{InternedInput, Token};
use gix::diff::blob::sources::lines_with_terminator;
use gix::diff::blob::{Algorithm, diff};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use super::{EntryKind, read_blob, read_tree};
use crate::filetype::is_binary;

/// Unchanged lines shown around each change.
const CONTEXT_LINES: u32 = 3;

/// One line of a hunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    content: String,
    old_lineno: Option<u32>,
    new_lineno: Option<u32>,
}

impl DiffLine {
    /// Raw line content, including its newline if it had one.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Line number in the old file, absent for additions.
    pub fn old_lineno(&self) -> Option<u32> {
        self.old_lineno
    }

    /// Line number in the new file, absent for deletions.
    pub fn new_lineno(&self) -> Option<u32> {
        self.new_lineno
    }

    /// Line exists only in the new file.
    pub fn is_addition(&self) -> bool {
        self.old_lineno.is_none()
    }

    /// Line exists only in the old file.
    pub fn is_deletion(&self) -> bool {
        self.new_lineno.is_none()
    }
}

/// Contiguous region of changes with surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    header: String,
    lines: Vec<DiffLine>,
}

impl Hunk {
    /// Unified diff header such as `@@ -1,3 +1,4 @@`.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }
}

/// Changes to one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffDelta {
    old_path: String,
    new_path: String,
    binary: bool,
    hunks: Vec<Hunk>,
}

impl DiffDelta {
    /// Creates a delta from its parts.
    pub fn new(old_path: String, new_path: String, binary: bool, hunks: Vec<Hunk>) -> Self {
        Self {
            old_path,
            new_path,
            binary,
            hunks,
        }
    }

    /// Path before the change.
    pub fn old_path(&self) -> &str {
        &self.old_path
    }

    /// Path after the change.
    pub fn new_path(&self) -> &str {
        &self.new_path
    }

    /// Either side is binary; no hunks are computed.
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// Hunks in file order.
    pub fn hunks(&self) -> &[Hunk] {
        &self.hunks
    }

    /// Number of added lines.
    pub fn insertions(&self) -> usize {
        self.lines().filter(|l| l.is_addition()).count()
    }

    /// Number of deleted lines.
    pub fn deletions(&self) -> usize {
        self.lines().filter(|l| l.is_deletion()).count()
    }

    fn lines(&self) -> impl Iterator<Item = &DiffLine> {
        self.hunks.iter().flat_map(|h| h.lines.iter())
    }
}

/// Summary counts of a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Number of changed paths, binary ones included
    pub files_changed: usize,
    /// Added lines across all paths
    pub insertions: usize,
    /// Deleted lines across all paths
    pub deletions: usize,
}

/// Ordered per-path changes between two trees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    deltas: Vec<DiffDelta>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FlatEntry {
    mode: u32,
    id: gix::ObjectId,
}

impl Diff {
    /// Creates a diff from deltas.
    pub fn new(deltas: Vec<DiffDelta>) -> Self {
        Self { deltas }
    }

    /// Diffs `old` against `new`; a missing `old` stands for the empty tree.
    ///
    /// Both trees are flattened to full paths, so deltas come out in byte
    /// order of their paths. Submodules are not descended into or compared.
    ///
    /// # Errors
    ///
    /// Returns error if any tree or blob cannot be read.
    pub fn between_trees(
        repo: &gix::Repository,
        old: Option<gix::ObjectId>,
        new: gix::ObjectId,
    ) -> Result<Self> {
        let mut old_map = BTreeMap::new();
        if let Some(old) = old {
            flatten_tree(repo, old, "", &mut old_map)?;
        }
        let mut new_map = BTreeMap::new();
        flatten_tree(repo, new, "", &mut new_map)?;

        let paths: BTreeSet<&String> = old_map.keys().chain(new_map.keys()).collect();

        let mut deltas = Vec::new();
        for path in paths {
            let before = old_map.get(path);
            let after = new_map.get(path);
            if before == after {
                continue;
            }

            let old_data = match before {
                Some(entry) => read_blob(repo, entry.id)?,
                None => Vec::new(),
            };
            let new_data = match after {
                Some(entry) => read_blob(repo, entry.id)?,
                None => Vec::new(),
            };

            let binary = is_binary(&old_data) || is_binary(&new_data);
            let hunks = if binary {
                Vec::new()
            } else {
                diff_lines(
                    &String::from_utf8_lossy(&old_data),
                    &String::from_utf8_lossy(&new_data),
                )
            };

            deltas.push(DiffDelta::new(path.clone(), path.clone(), binary, hunks));
        }

        Ok(Self { deltas })
    }

    /// Deltas in path order.
    pub fn deltas(&self) -> &[DiffDelta] {
        &self.deltas
    }

    /// Counts changed files and added/deleted lines.
    pub fn stats(&self) -> DiffStats {
        self.deltas
            .iter()
            .fold(DiffStats::default(), |mut stats, delta| {
                stats.files_changed += 1;
                stats.insertions += delta.insertions();
                stats.deletions += delta.deletions();
                stats
            })
    }
}

fn flatten_tree(
    repo: &gix::Repository,
    tree: gix::ObjectId,
    prefix: &str,
    out: &mut BTreeMap<String, FlatEntry>,
) -> Result<()> {
    for entry in read_tree(repo, tree)? {
        let path = crate::path::join_path(prefix, entry.name());
        match entry.kind() {
            EntryKind::Tree => flatten_tree(repo, entry.id(), &path, out)?,
            EntryKind::Blob | EntryKind::Link => {
                out.insert(
                    path,
                    FlatEntry {
                        mode: entry.mode(),
                        id: entry.id(),
                    },
                );
            }
            EntryKind::Submodule => {}
        }
    }
    Ok(())
}

/// Computes unified-diff hunks between two texts.
///
/// Uses histogram diff with three lines of context; changes whose context
/// would overlap share a hunk.
///
/// # Examples
///
/// ```
/// use gitscroll::diff_lines;
///
/// let hunks = diff_lines("a\nb\nc\n", "a\nB\nc\n");
/// assert_eq!(hunks.len(), 1);
/// assert_eq!(hunks[0].header(), "@@ -1,3 +1,3 @@");
/// ```
pub fn diff_lines(before: &str, after: &str) -> Vec<Hunk> {
    // Terminators stay part of each token so `a\n`, `a\r\n` and `a` differ
    let input = InternedInput::new(
        lines_with_terminator(before),
        lines_with_terminator(after),
    );

    let mut changes: Vec<(Range<u32>, Range<u32>)> = Vec::new();
    diff(
        Algorithm::Histogram,
        &input,
        |old: Range<u32>, new: Range<u32>| changes.push((old, new)),
    );

    let old_len = input.before.len() as u32;
    let line = |token: Token| input.interner[token].to_string();

    let mut hunks = Vec::new();
    let mut start = 0;
    while start < changes.len() {
        let mut end = start + 1;
        while end < changes.len()
            && changes[end].0.start - changes[end - 1].0.end <= 2 * CONTEXT_LINES
        {
            end += 1;
        }
        let group = &changes[start..end];
        let (first, last) = (&group[0], &group[group.len() - 1]);

        let old_start = first.0.start.saturating_sub(CONTEXT_LINES);
        let new_start = first.1.start - (first.0.start - old_start);
        let old_end = (last.0.end + CONTEXT_LINES).min(old_len);

        let mut lines = Vec::new();
        let (mut old_pos, mut new_pos) = (old_start, new_start);
        for (old, new) in group {
            while old_pos < old.start {
                lines.push(DiffLine {
                    content: line(input.before[old_pos as usize]),
                    old_lineno: Some(old_pos + 1),
                    new_lineno: Some(new_pos + 1),
                });
                old_pos += 1;
                new_pos += 1;
            }
            for i in old.clone() {
                lines.push(DiffLine {
                    content: line(input.before[i as usize]),
                    old_lineno: Some(i + 1),
                    new_lineno: None,
                });
            }
            for i in new.clone() {
                lines.push(DiffLine {
                    content: line(input.after[i as usize]),
                    old_lineno: None,
                    new_lineno: Some(i + 1),
                });
            }
            old_pos = old.end;
            new_pos = new.end;
        }
        while old_pos < old_end {
            lines.push(DiffLine {
                content: line(input.before[old_pos as usize]),
                old_lineno: Some(old_pos + 1),
                new_lineno: Some(new_pos + 1),
            });
            old_pos += 1;
            new_pos += 1;
        }

        let old_count = old_end - old_start;
        let new_count = new_pos - new_start;
        hunks.push(Hunk {
            header: format!(
                "@@ -{} +{} @@",
                hunk_range(old_start, old_count),
                hunk_range(new_start, new_count)
            ),
            lines,
        });

        start = end;
    }

    hunks
}

/// Formats one side of a hunk header the way git does.
fn hunk_range(start: u32, count: u32) -> String {
    match count {
        0 => format!("{},0", start),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, count),
    }
}
