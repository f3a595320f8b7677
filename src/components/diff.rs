//! Diff rendering component

use maud::{Markup, html};
use std::collections::HashSet;

use crate::git::{Diff, DiffDelta, DiffLine};
use crate::path::file_page;
use crate::util::Escaped;

/// Renders every delta of a diff for display inside a `pre` element
///
/// Hunk headers get an `h<N>` anchor and changed lines an `h<N>-<K>` anchor,
/// where `N` counts hunks across the whole page and `K` is the line index
/// within its hunk, so every anchor on the page is unique and stable
/// between runs. Added lines carry class `i`, deleted lines class `d`.
///
/// # Arguments
///
/// * `diff`: Diff to render
/// * `relpath`: Prefix leading back to the output root
/// * `known_files`: Paths that have a rendered file page; other paths are
///   shown without a link
pub fn diff_body(diff: &Diff, relpath: &str, known_files: &HashSet<String>) -> Markup {
    let mut offset = 0;
    let mut sections = Vec::with_capacity(diff.deltas().len());
    for delta in diff.deltas() {
        sections.push(delta_section(delta, offset, relpath, known_files));
        offset += delta.hunks().len();
    }

    html! {
        @for section in sections {
            (section)
        }
    }
}

fn delta_section(
    delta: &DiffDelta,
    first_hunk: usize,
    relpath: &str,
    known_files: &HashSet<String>,
) -> Markup {
    html! {
        b {
            "diff --git a/" (path_link(delta.old_path(), relpath, known_files))
            " b/" (path_link(delta.new_path(), relpath, known_files))
        }
        "\n"
        @if delta.is_binary() {
            "Binary files differ\n"
        } @else {
            @for (i, hunk) in delta.hunks().iter().enumerate() {
                @let n = first_hunk + i;
                a href={ "#h" (n) } id={ "h" (n) } class="h" { (Escaped(hunk.header())) "\n" }
                @for (k, line) in hunk.lines().iter().enumerate() {
                    (diff_line(line, n, k))
                }
            }
        }
    }
}

fn path_link(path: &str, relpath: &str, known_files: &HashSet<String>) -> Markup {
    html! {
        @if known_files.contains(path) {
            a href={ (relpath) (file_page(path)) } { (Escaped(path)) }
        } @else {
            (Escaped(path))
        }
    }
}

fn diff_line(line: &DiffLine, hunk: usize, index: usize) -> Markup {
    let content = line.content();
    let newline = if content.ends_with('\n') { "" } else { "\n" };
    let anchor = format!("h{}-{}", hunk, index);

    html! {
        @if line.is_addition() {
            a href={ "#" (anchor) } id=(anchor) class="i" { "+" (Escaped(content)) (newline) }
        } @else if line.is_deletion() {
            a href={ "#" (anchor) } id=(anchor) class="d" { "-" (Escaped(content)) (newline) }
        } @else {
            " " (Escaped(content)) (newline)
        }
    }
}
