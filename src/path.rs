//! Path utilities for HTML generation

/// Calculates the relative link prefix for a generated page.
///
/// Each `/` in the page's output-relative path adds one `../`, so links
/// built as `relpath + "style.css"` resolve to the output root from
/// wherever the page lives.
///
/// # Arguments
///
/// * `page_path`: Page path relative to the output directory
///
/// # Returns
///
/// Prefix string such as `""`, `"../"` or `"../../"`
pub fn relpath(page_path: &str) -> String {
    "../".repeat(page_path.matches('/').count())
}

/// Joins a parent tree path and an entry name with `/`.
///
/// The root tree has the empty string as its path.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Whether a tree entry name can be used as one output path component.
///
/// Rejects empty names, `.`, `..` and names containing `/` or NUL, any of
/// which could place a page outside `file/`.
pub fn is_safe_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\0'])
}

/// Output page path for a file in the tree.
pub fn file_page(path: &str) -> String {
    format!("file/{}.html", path)
}

/// Output page path for a commit.
pub fn commit_page(oid: &str) -> String {
    format!("commit/{}.html", oid)
}
