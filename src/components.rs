//! Reusable HTML components for page generation
//!
//! Maud component functions shared across page types. The layout and nav
//! components produce the chrome every page carries, while the commit, diff
//! and file list components render the pieces the log, commit and files
//! pages are assembled from.

pub mod commit;
pub mod diff;
pub mod file_list;
pub mod layout;
pub mod nav;
