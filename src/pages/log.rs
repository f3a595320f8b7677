//! Log page generation for commit history viewing

use maud::{Markup, html};

use crate::components::layout::page_wrapper;
use crate::git::CommitInfo;
use crate::metadata::RepoMeta;
use crate::path::commit_page;
use crate::util::{Escaped, format_short, truncate_summary};

/// Renders one log table row for a commit
///
/// Columns are age, linked summary (cut to `summary_len` characters),
/// author, files changed, insertions and deletions. Commits without a
/// summary get an empty message cell.
///
/// # Arguments
///
/// * `commit`: Commit to describe
/// * `relpath`: Prefix leading back to the output root
/// * `summary_len`: Maximum summary length before truncation
pub fn row(commit: &CommitInfo, relpath: &str, summary_len: usize) -> Markup {
    let stats = commit.stats();
    let author = commit.author();

    html! {
        tr {
            td { (format_short(author.time())) }
            td {
                @if let Some(summary) = commit.summary() {
                    a href={ (relpath) (commit_page(&commit.oid_hex())) } {
                        (Escaped(&truncate_summary(summary, summary_len)))
                    }
                }
            }
            td { (Escaped(author.name())) }
            td class="num" { (stats.files_changed) }
            td class="num" { "+" (stats.insertions) }
            td class="num" { "-" (stats.deletions) }
        }
    }
}

/// Generates the log page from pre-rendered rows
///
/// Rows are accumulated while the history is walked so that each commit can
/// be dropped as soon as its row and detail page are produced.
pub fn generate(meta: &RepoMeta, rows: Markup) -> Markup {
    page_wrapper(
        meta,
        "",
        html! {
            table id="log" {
                thead {
                    tr {
                        td { "Age" }
                        td { "Commit message" }
                        td { "Author" }
                        td { "Files" }
                        td class="num" { "+" }
                        td class="num" { "-" }
                    }
                }
                tbody {
                    (rows)
                }
            }
        },
    )
}
