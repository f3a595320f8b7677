//! Static history site generator for Git repositories.

mod assets;
pub mod components;
mod config;
mod filetype;
mod generators;
mod git;
mod metadata;
mod output;
pub mod pages;
mod path;
mod util;

pub use assets::write_style;
pub use config::{Config, DEFAULT_SUMMARY_LEN};
pub use filetype::{FileType, count_lines, detect_file_type, format_mode, is_binary};
pub use generators::{SiteReport, generate_site};
pub use git::{
    CommitInfo, Diff, DiffDelta, DiffLine, DiffStats, EntryKind, History, Hunk, RefInfo, RefKind,
    Signature, Time, TreeEntry, commit_tree_id, diff_lines, extract_commit, head_id, list_refs,
    open_repository, read_blob, read_tree,
};
pub use metadata::{RepoMeta, repository_name};
pub use output::{write_page, write_page_if_absent};
pub use path::{commit_page, file_page, is_safe_component, join_path, relpath};
pub use util::{Escaped, escape, truncate_summary};
