//! Commit header and diffstat components

use maud::{Markup, html};

use crate::git::CommitInfo;
use crate::util::{Escaped, format_long};

/// Total width of a diffstat line.
const DIFFSTAT_WIDTH: usize = 80;

/// Renders the `commit` / `parent` / `Author` / `Date` block and the message.
///
/// Intended for use inside a `pre` element; every line ends with a newline.
pub fn commit_header(commit: &CommitInfo, relpath: &str) -> Markup {
    let oid = commit.oid_hex();
    let author = commit.author();

    html! {
        b { "commit" } " "
        a href={ (relpath) "commit/" (oid) ".html" } { (oid) }
        "\n"
        @if let Some(parent) = commit.parent_hex() {
            b { "parent" } " "
            a href={ (relpath) "commit/" (parent) ".html" } { (parent) }
            "\n"
        }
        b { "Author:" } " " (Escaped(author.name())) " <"
        a href={ "mailto:" (Escaped(author.email())) } { (Escaped(author.email())) }
        ">\n"
        b { "Date:" } "   " (format_long(author.time())) "\n"
        @if let Some(message) = commit.message() {
            "\n" (Escaped(message)) "\n"
        }
    }
}

/// Renders the per-file change bars and the summary line.
///
/// Produces nothing for commits without changed files.
pub fn diffstat(commit: &CommitInfo) -> Markup {
    let stats = commit.stats();
    if stats.files_changed == 0 {
        return html! {};
    }

    html! {
        b { "Diffstat:" } "\n"
        (Escaped(&diffstat_text(commit)))
    }
}

/// Builds git-style `--stat` text scaled to [`DIFFSTAT_WIDTH`] columns.
pub fn diffstat_text(commit: &CommitInfo) -> String {
    let deltas = commit.diff().deltas();
    let stats = commit.stats();

    let name_width = deltas
        .iter()
        .map(|d| d.new_path().chars().count())
        .max()
        .unwrap_or(0);
    let max_change = deltas
        .iter()
        .map(|d| d.insertions() + d.deletions())
        .max()
        .unwrap_or(0);
    let count_width = max_change.to_string().len();

    // " name | count " prefix
    let graph_width = DIFFSTAT_WIDTH
        .saturating_sub(name_width + count_width + 5)
        .max(10);

    let mut out = String::new();
    for delta in deltas {
        if delta.is_binary() {
            out.push_str(&format!(
                " {:<name_width$} | Bin\n",
                delta.new_path(),
                name_width = name_width
            ));
            continue;
        }

        let (adds, dels) = (delta.insertions(), delta.deletions());
        let (plus, minus) = scale(adds, dels, max_change, graph_width);
        out.push_str(&format!(
            " {:<name_width$} | {:>count_width$} {}{}\n",
            delta.new_path(),
            adds + dels,
            "+".repeat(plus),
            "-".repeat(minus),
            name_width = name_width,
            count_width = count_width
        ));
    }

    out.push_str(&summary_line(
        stats.files_changed,
        stats.insertions,
        stats.deletions,
    ));
    out.push('\n');
    out
}

fn scale(adds: usize, dels: usize, max_change: usize, width: usize) -> (usize, usize) {
    if max_change <= width {
        return (adds, dels);
    }

    // Bars never exceed `width`; a file with both kinds gets at least two columns
    let mut total = scale_linear(adds + dels, width, max_change);
    if total < 2 && adds > 0 && dels > 0 {
        total = 2;
    }
    if adds < dels {
        let plus = scale_linear(adds, width, max_change);
        (plus, total - plus)
    } else {
        let minus = scale_linear(dels, width, max_change);
        (total - minus, minus)
    }
}

fn scale_linear(count: usize, width: usize, max_change: usize) -> usize {
    if count == 0 {
        0
    } else {
        1 + count * (width - 1) / max_change
    }
}

/// Formats ` N files changed, X insertions(+), Y deletions(-)`.
///
/// Insertions are omitted when only deletions occurred and vice versa; a
/// diff without line changes lists both as zero.
pub fn summary_line(files: usize, insertions: usize, deletions: usize) -> String {
    let mut line = format!(
        " {} file{} changed",
        files,
        if files == 1 { "" } else { "s" }
    );
    if insertions > 0 || deletions == 0 {
        line.push_str(&format!(
            ", {} insertion{}(+)",
            insertions,
            if insertions == 1 { "" } else { "s" }
        ));
    }
    if deletions > 0 || insertions == 0 {
        line.push_str(&format!(
            ", {} deletion{}(-)",
            deletions,
            if deletions == 1 { "" } else { "s" }
        ));
    }
    line
}
