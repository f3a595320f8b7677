//! Page generation modules for different view types
//!
//! Each module renders one kind of output document (log, commit, files,
//! blob, refs, feed) from already-extracted repository data, using the
//! shared components for page chrome.

pub mod atom;
pub mod blob;
pub mod commit;
pub mod files;
pub mod log;
pub mod refs;
