//! Blob page generation for file content viewing

use maud::{Markup, html};

use crate::components::layout::page_wrapper;
use crate::filetype::{count_lines, is_binary};
use crate::metadata::RepoMeta;
use crate::util::Escaped;

/// Rendered blob page together with its line count.
pub struct BlobPage {
    /// Complete page markup
    pub markup: Markup,
    /// Number of lines shown, zero for binary content
    pub lines: usize,
}

/// Generates the page for one file of the tree
///
/// Shows `<name> (<size>B)` followed by the content with numbered line
/// anchors `l1`, `l2`, ... Binary content is never emitted; the page shows
/// a `Binary file` notice instead.
///
/// # Arguments
///
/// * `meta`: Repository metadata for the page chrome
/// * `relpath`: Prefix leading back to the output root
/// * `name`: Entry name shown in the header line
/// * `content`: Raw blob bytes
///
/// # Examples
///
/// ```
/// use gitscroll::RepoMeta;
/// use gitscroll::pages::blob::generate;
///
/// let page = generate(&RepoMeta::new("demo", ""), "../", "README", b"hello\nworld");
/// assert_eq!(page.lines, 2);
/// ```
pub fn generate(meta: &RepoMeta, relpath: &str, name: &str, content: &[u8]) -> BlobPage {
    let binary = is_binary(content);
    let lines = if binary { 0 } else { count_lines(content) };
    let text = if binary {
        String::new()
    } else {
        String::from_utf8_lossy(content).into_owned()
    };

    let markup = page_wrapper(
        meta,
        relpath,
        html! {
            p { " " (Escaped(name)) " (" (content.len()) "B)" }
            hr;
            @if binary {
                p { "Binary file" }
            } @else {
                table id="blob" {
                    tr {
                        td class="num" {
                            pre {
                                "\n"
                                @for n in 1..=lines {
                                    a href={ "#l" (n) } id={ "l" (n) } { (n) }
                                    "\n"
                                }
                            }
                        }
                        td {
                            pre { "\n" (Escaped(&text)) }
                        }
                    }
                }
            }
        },
    );

    BlobPage { markup, lines }
}
