//! Commit detail page generation

use maud::{Markup, html};
use std::collections::HashSet;

use crate::components::commit::{commit_header, diffstat};
use crate::components::diff::diff_body;
use crate::components::layout::page_wrapper;
use crate::git::CommitInfo;
use crate::metadata::RepoMeta;

/// Generates the detail page for a commit
///
/// The page lives at `commit/<id>.html`, one level below the output root.
/// It shows the commit header and message, the diffstat and the full diff
/// against the first parent.
///
/// # Arguments
///
/// * `meta`: Repository metadata for the page chrome
/// * `commit`: Commit to render
/// * `known_files`: Paths rendered by the files pass, used for diff links
pub fn generate(meta: &RepoMeta, commit: &CommitInfo, known_files: &HashSet<String>) -> Markup {
    let relpath = "../";

    page_wrapper(
        meta,
        relpath,
        html! {
            pre {
                (commit_header(commit, relpath))
                (diffstat(commit))
                hr;
                (diff_body(commit.diff(), relpath, known_files))
            }
        },
    )
}
