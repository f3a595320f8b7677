//! Repository presentation metadata.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::git::{TreeEntry, commit_tree_id, read_tree};

/// Name, description and links shown in every page header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoMeta {
    name: String,
    description: String,
    clone_url: String,
    has_readme: bool,
    has_license: bool,
}

impl RepoMeta {
    /// Creates metadata from its parts.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Sets the clone URL.
    pub fn with_clone_url(mut self, url: impl Into<String>) -> Self {
        self.clone_url = url.into();
        self
    }

    /// Marks README and LICENSE presence.
    pub fn with_documents(mut self, has_readme: bool, has_license: bool) -> Self {
        self.has_readme = has_readme;
        self.has_license = has_license;
        self
    }

    /// Reads metadata for the repository at `repo_path`.
    ///
    /// The name comes from `name_override` or the directory name with any
    /// `.git` suffix removed. Description and clone URL are the first lines
    /// of `description` and `url`, looked up in the repository directory and
    /// then in its `.git` directory. README and LICENSE presence is checked
    /// at the top level of the tree at `head`.
    ///
    /// # Errors
    ///
    /// Returns error if no name can be derived or the HEAD tree cannot be read.
    pub fn load(
        repo: &gix::Repository,
        repo_path: &Path,
        head: gix::ObjectId,
        name_override: Option<&str>,
    ) -> Result<Self> {
        let name = match name_override {
            Some(name) => name.to_string(),
            None => repository_name(repo_path)?,
        };

        let entries = read_tree(repo, commit_tree_id(repo, head)?)?;

        Ok(Self {
            name,
            description: read_first_line(repo_path, "description"),
            clone_url: read_first_line(repo_path, "url"),
            has_readme: has_top_level_file(&entries, "README"),
            has_license: has_top_level_file(&entries, "LICENSE"),
        })
    }

    /// Repository display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description, possibly empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Clone URL, possibly empty.
    pub fn clone_url(&self) -> &str {
        &self.clone_url
    }

    /// A top-level `README` exists at HEAD.
    pub fn has_readme(&self) -> bool {
        self.has_readme
    }

    /// A top-level `LICENSE` exists at HEAD.
    pub fn has_license(&self) -> bool {
        self.has_license
    }
}

/// Derives the display name from a repository path.
///
/// # Errors
///
/// Returns error if the path has no name component or contains invalid UTF8.
pub fn repository_name(repo_path: &Path) -> Result<String> {
    let path = repo_path
        .canonicalize()
        .unwrap_or_else(|_| repo_path.to_path_buf());

    let base = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Cannot extract project name from path: {}", path.display()))?;

    Ok(base.strip_suffix(".git").unwrap_or(base).to_string())
}

fn read_first_line(repo_path: &Path, file: &str) -> String {
    [repo_path.join(file), repo_path.join(".git").join(file)]
        .iter()
        .find_map(|path| fs::read_to_string(path).ok())
        .and_then(|content| content.lines().next().map(|l| l.trim().to_string()))
        .unwrap_or_default()
}

fn has_top_level_file(entries: &[TreeEntry], name: &str) -> bool {
    entries.iter().any(|e| {
        e.name() == name
            && matches!(
                e.kind(),
                crate::git::EntryKind::Blob | crate::git::EntryKind::Link
            )
    })
}
