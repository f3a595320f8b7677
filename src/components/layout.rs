//! Page layout wrapper component

use maud::{DOCTYPE, Markup, html};

use super::nav::nav_links;
use crate::metadata::RepoMeta;
use crate::util::Escaped;

/// Wraps page content with the standard document shell
///
/// Emits the head (title, icon, feed and stylesheet links), the repository
/// header table with logo, description, clone URL and navigation, and the
/// content container. All links are prefixed with `relpath` so the page
/// works from any depth of the output tree.
///
/// # Arguments
///
/// * `meta`: Repository metadata shown in the header
/// * `relpath`: Prefix leading back to the output root
/// * `body`: Page-specific content
///
/// # Returns
///
/// Complete HTML document
pub fn page_wrapper(meta: &RepoMeta, relpath: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html dir="ltr" lang="en" {
            head {
                meta http-equiv="Content-Type" content="text/html; charset=UTF-8";
                meta http-equiv="Content-Language" content="en";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title {
                    (Escaped(meta.name()))
                    @if !meta.description().is_empty() {
                        " - " (Escaped(meta.description()))
                    }
                }
                link rel="icon" type="image/png" href={ (relpath) "favicon.png" };
                link rel="alternate" type="application/atom+xml"
                    title={ (Escaped(meta.name())) " Atom Feed" } href={ (relpath) "atom.xml" };
                link rel="stylesheet" type="text/css" href={ (relpath) "style.css" };
            }
            body {
                table {
                    tr {
                        td {
                            a href={ "../" (relpath) } {
                                img src={ (relpath) "logo.png" } alt="" width="32" height="32";
                            }
                        }
                        td {
                            h1 { (Escaped(meta.name())) }
                            span class="desc" { (Escaped(meta.description())) }
                        }
                    }
                    @if !meta.clone_url().is_empty() {
                        tr class="url" {
                            td {}
                            td {
                                "git clone "
                                a href=(Escaped(meta.clone_url())) { (Escaped(meta.clone_url())) }
                            }
                        }
                    }
                    tr {
                        td {}
                        td { (nav_links(meta, relpath)) }
                    }
                }
                hr;
                div id="content" {
                    (body)
                }
            }
        }
    }
}
