//! Atom feed generation for recent commits

use maud::{Markup, PreEscaped, html};

use crate::git::CommitInfo;
use crate::metadata::RepoMeta;
use crate::util::{Escaped, format_long, format_rfc3339_utc};

/// Most commits listed in the feed.
pub const FEED_LIMIT: usize = 100;

/// Renders one feed entry for a commit
///
/// The content repeats the commit header and the message as plain text.
pub fn entry(commit: &CommitInfo) -> Markup {
    let oid = commit.oid_hex();
    let author = commit.author();

    html! {
        entry {
            id { (oid) }
            updated { (format_rfc3339_utc(author.time())) }
            @if let Some(summary) = commit.summary() {
                title type="text" { (Escaped(summary)) }
            }
            content type="text" {
                "commit " (oid) "\n"
                @if let Some(parent) = commit.parent_hex() {
                    "parent " (parent) "\n"
                }
                "Author: " (Escaped(author.name())) " <" (Escaped(author.email())) ">\n"
                "Date:   " (format_long(author.time())) "\n"
                @if let Some(message) = commit.message() {
                    "\n" (Escaped(message))
                }
                "\n"
            }
            author {
                name { (Escaped(author.name())) }
                email { (Escaped(author.email())) }
            }
        }
        "\n"
    }
}

/// Generates the Atom feed document from pre-rendered entries
pub fn generate(meta: &RepoMeta, entries: Markup) -> Markup {
    html! {
        (PreEscaped("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"))
        feed xmlns="http://www.w3.org/2005/Atom" {
            "\n"
            title { (Escaped(meta.name())) ", branch HEAD" }
            "\n"
            subtitle { (Escaped(meta.description())) }
            "\n"
            (entries)
        }
    }
}
