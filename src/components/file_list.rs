//! File listing table components

use maud::{Markup, html};

use crate::filetype::format_mode;
use crate::util::Escaped;

/// Wraps file rows in the files table
///
/// # Arguments
///
/// * `rows`: Markup containing individual `file_row` elements
///
/// # Returns
///
/// Table with Mode, Name and Size columns
pub fn file_table(rows: Markup) -> Markup {
    html! {
        table id="files" {
            thead {
                tr {
                    td { "Mode" }
                    td { "Name" }
                    td class="num" { "Size" }
                }
            }
            tbody {
                (rows)
            }
        }
    }
}

/// Size column text for a file.
///
/// Shows the line count as `<n>L` when enabled and positive, otherwise the
/// byte size as `<n>B`.
pub fn size_label(bytes: usize, lines: usize, show_line_count: bool) -> String {
    if show_line_count && lines > 0 {
        format!("{}L", lines)
    } else {
        format!("{}B", bytes)
    }
}

/// Renders single file row in table
///
/// # Arguments
///
/// * `mode`: Git file mode bits of the entry
/// * `href`: Link to the file page, already prefixed
/// * `path`: Full path shown as link text
/// * `size`: Pre-formatted size column
pub fn file_row(mode: u32, href: &str, path: &str, size: &str) -> Markup {
    html! {
        tr {
            td { (format_mode(mode)) }
            td { a href=(href) { (Escaped(path)) } }
            td class="num" { (size) }
        }
    }
}
