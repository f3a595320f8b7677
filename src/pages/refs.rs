//! Refs page generation for branches and tags

use maud::{Markup, html};

use crate::components::layout::page_wrapper;
use crate::git::{RefKind, Time};
use crate::metadata::RepoMeta;
use crate::util::{Escaped, format_short};

/// One row of the refs tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefRow {
    /// Short reference name
    pub name: String,
    /// Branch or tag
    pub kind: RefKind,
    /// Author time of the target commit
    pub time: Time,
    /// Author name of the target commit
    pub author: String,
}

/// Generates the refs page
///
/// Rows must already be sorted by kind then name. A `Branches` table and a
/// `Tags` table are emitted, each only when it has at least one row.
pub fn generate(meta: &RepoMeta, rows: &[RefRow]) -> Markup {
    let branches: Vec<&RefRow> = rows.iter().filter(|r| r.kind == RefKind::Branch).collect();
    let tags: Vec<&RefRow> = rows.iter().filter(|r| r.kind == RefKind::Tag).collect();

    page_wrapper(
        meta,
        "",
        html! {
            (ref_table("Branches", "branches", "Branch", &branches))
            (ref_table("Tags", "tags", "Tag", &tags))
        },
    )
}

fn ref_table(title: &str, id: &str, column: &str, rows: &[&RefRow]) -> Markup {
    if rows.is_empty() {
        return html! {};
    }

    html! {
        h2 { (title) }
        table id=(id) {
            thead {
                tr {
                    td { (column) }
                    td { "Age" }
                    td { "Author" }
                }
            }
            tbody {
                @for row in rows {
                    tr {
                        td { (Escaped(&row.name)) }
                        td { (format_short(row.time)) }
                        td { (Escaped(&row.author)) }
                    }
                }
            }
        }
        br;
    }
}
