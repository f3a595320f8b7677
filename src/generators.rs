//! Site generation pipeline.
//!
//! Renders the files pages for HEAD, walks the first-parent history to
//! build the log and the per-commit pages, then writes the refs page and
//! the Atom feed. Commit pages are immutable: a page that already exists is
//! never rewritten, which makes repeated runs incremental.

use anyhow::{Context, Result};
use maud::{Markup, html};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::assets::write_style;
use crate::components::file_list::{file_row, size_label};
use crate::config::Config;
use crate::git::{
    EntryKind, History, commit_tree_id, extract_commit, head_id, list_refs, open_repository,
    read_blob, read_tree,
};
use crate::metadata::RepoMeta;
use crate::output::{write_page, write_page_if_absent};
use crate::pages;
use crate::path::{commit_page, file_page, is_safe_component, join_path, relpath};

/// Counts of what a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteReport {
    /// Output directory
    pub output: PathBuf,
    /// Files rendered from the HEAD tree
    pub files: usize,
    /// Commits listed in the log
    pub commits: usize,
    /// Commit pages newly written during this run
    pub commit_pages_written: usize,
    /// Branches and tags listed on the refs page
    pub refs: usize,
    /// Entries in the Atom feed
    pub feed_entries: usize,
}

/// Shared state of one generation run.
struct Site<'a> {
    repo: &'a gix::Repository,
    meta: &'a RepoMeta,
    output: &'a Path,
}

impl Site<'_> {
    fn page_path(&self, page: &str) -> PathBuf {
        self.output.join(page)
    }
}

/// Generates the complete static site for the configured repository.
///
/// # Errors
///
/// Returns error if the repository cannot be opened, HEAD cannot be
/// resolved, the HEAD tree or refs cannot be read, or any page cannot be
/// written. A commit that fails to load during the log walk ends the log
/// early with a warning instead.
pub fn generate_site(config: &Config) -> Result<SiteReport> {
    let repo = open_repository(&config.repo)?;
    let head = head_id(&repo)?;
    let meta = RepoMeta::load(&repo, &config.repo, head, config.name.as_deref())
        .context("Failed to read repository metadata")?;

    fs::create_dir_all(&config.output).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output.display()
        )
    })?;

    let site = Site {
        repo: &repo,
        meta: &meta,
        output: &config.output,
    };

    if write_style(site.output)? {
        tracing::debug!("Wrote default stylesheet");
    }

    tracing::info!("Rendering files for HEAD {}", head);
    let known_files = render_files(&site, head, config.show_line_count())?;

    tracing::info!("Rendering log");
    let (commits, commit_pages_written) =
        render_log(&site, head, &known_files, config.summary_len)?;

    tracing::info!("Rendering refs");
    let refs = render_refs(&site)?;

    tracing::info!("Rendering feed");
    let feed_entries = render_feed(&site, head)?;

    Ok(SiteReport {
        output: config.output.clone(),
        files: known_files.len(),
        commits,
        commit_pages_written,
        refs,
        feed_entries,
    })
}

/// Renders `files.html` and one page per file; returns the rendered paths.
fn render_files(
    site: &Site<'_>,
    head: gix::ObjectId,
    show_line_count: bool,
) -> Result<HashSet<String>> {
    let tree = commit_tree_id(site.repo, head)?;

    let mut rows = Vec::new();
    let mut known = HashSet::new();
    render_tree(site, tree, "", show_line_count, &mut rows, &mut known)?;

    let markup = pages::files::generate(site.meta, html! { @for row in &rows { (row) } });
    write_page(&site.page_path("files.html"), &markup.into_string())?;

    Ok(known)
}

/// Walks a tree depth-first in stored order, writing a page per file.
///
/// Subtree failures abort the whole walk. Submodules and entries whose
/// names cannot form a safe output path are skipped.
fn render_tree(
    site: &Site<'_>,
    tree: gix::ObjectId,
    path: &str,
    show_line_count: bool,
    rows: &mut Vec<Markup>,
    known: &mut HashSet<String>,
) -> Result<()> {
    let entries = read_tree(site.repo, tree)
        .with_context(|| format!("Failed to read tree at '{}'", path))?;

    for entry in entries {
        if !is_safe_component(entry.name()) {
            tracing::warn!("Skipping unsafe entry name {:?} in '{}'", entry.name(), path);
            continue;
        }
        let entry_path = join_path(path, entry.name());
        match entry.kind() {
            EntryKind::Tree => {
                render_tree(site, entry.id(), &entry_path, show_line_count, rows, known)?;
            }
            EntryKind::Blob | EntryKind::Link => {
                let content = read_blob(site.repo, entry.id())
                    .with_context(|| format!("Failed to read file '{}'", entry_path))?;

                let page = file_page(&entry_path);
                let blob = pages::blob::generate(site.meta, &relpath(&page), entry.name(), &content);
                write_page(&site.page_path(&page), &blob.markup.into_string())?;
                tracing::debug!("Wrote {}", page);

                let size = size_label(content.len(), blob.lines, show_line_count);
                rows.push(file_row(entry.mode(), &page, &entry_path, &size));
                known.insert(entry_path);
            }
            EntryKind::Submodule => {
                tracing::debug!("Skipping submodule {}", entry_path);
            }
        }
    }

    Ok(())
}

/// Writes `log.html` and any missing commit pages.
///
/// Returns the number of commits listed and commit pages written.
fn render_log(
    site: &Site<'_>,
    head: gix::ObjectId,
    known_files: &HashSet<String>,
    summary_len: usize,
) -> Result<(usize, usize)> {
    let mut rows = Vec::new();
    let mut written = 0;

    for commit in History::new(site.repo, head) {
        let commit = match commit {
            Ok(commit) => commit,
            Err(e) => {
                tracing::warn!("Stopping log walk: {:#}", e);
                break;
            }
        };

        rows.push(pages::log::row(&commit, "", summary_len));

        let page = commit_page(&commit.oid_hex());
        let path = site.page_path(&page);
        if path.exists() {
            tracing::debug!("Cached {}", page);
            continue;
        }

        let markup = pages::commit::generate(site.meta, &commit, known_files);
        if write_page_if_absent(&path, &markup.into_string())? {
            tracing::debug!("Wrote {}", page);
            written += 1;
        }
    }

    let count = rows.len();
    let markup = pages::log::generate(site.meta, html! { @for row in &rows { (row) } });
    write_page(&site.page_path("log.html"), &markup.into_string())?;

    Ok((count, written))
}

/// Writes `refs.html`; any unresolvable reference aborts without writing.
fn render_refs(site: &Site<'_>) -> Result<usize> {
    let mut rows = Vec::new();
    for reference in list_refs(site.repo)? {
        let commit = extract_commit(site.repo, reference.target())
            .with_context(|| format!("Failed to load target of '{}'", reference.name()))?;

        rows.push(pages::refs::RefRow {
            name: reference.name().to_string(),
            kind: reference.kind(),
            time: commit.author().time(),
            author: commit.author().name().to_string(),
        });
    }

    let markup = pages::refs::generate(site.meta, &rows);
    write_page(&site.page_path("refs.html"), &markup.into_string())?;

    Ok(rows.len())
}

/// Writes `atom.xml` with the most recent first-parent commits.
fn render_feed(site: &Site<'_>, head: gix::ObjectId) -> Result<usize> {
    let mut entries = Vec::new();
    for commit in History::new(site.repo, head).take(pages::atom::FEED_LIMIT) {
        match commit {
            Ok(commit) => entries.push(pages::atom::entry(&commit)),
            Err(e) => {
                tracing::warn!("Stopping feed walk: {:#}", e);
                break;
            }
        }
    }

    let count = entries.len();
    let markup = pages::atom::generate(site.meta, html! { @for entry in &entries { (entry) } });
    write_page(&site.page_path("atom.xml"), &markup.into_string())?;

    Ok(count)
}
