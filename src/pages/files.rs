//! Files page generation for the tree at HEAD

use maud::Markup;

use crate::components::file_list::file_table;
use crate::components::layout::page_wrapper;
use crate::metadata::RepoMeta;

/// Generates the files page from rows produced by the tree walk
pub fn generate(meta: &RepoMeta, rows: Markup) -> Markup {
    page_wrapper(meta, "", file_table(rows))
}
