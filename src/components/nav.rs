//! Top navigation links component

use maud::{Markup, html};

use crate::metadata::RepoMeta;

/// Renders the `Log | Files | Refs` navigation
///
/// README and LICENSE links are appended when those files exist at the top
/// level of HEAD.
pub fn nav_links(meta: &RepoMeta, relpath: &str) -> Markup {
    html! {
        a href={ (relpath) "log.html" } { "Log" }
        " | "
        a href={ (relpath) "files.html" } { "Files" }
        " | "
        a href={ (relpath) "refs.html" } { "Refs" }
        @if meta.has_readme() {
            " | "
            a href={ (relpath) "file/README.html" } { "README" }
        }
        @if meta.has_license() {
            " | "
            a href={ (relpath) "file/LICENSE.html" } { "LICENSE" }
        }
    }
}
