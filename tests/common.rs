//! Shared test utilities for integration tests.
//!
//! Provides helper functions for creating temporary git repositories and
//! performing common git operations used across multiple test files.

#![allow(dead_code)]

use anyhow::Result;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Base timestamp for deterministic commit dates (2009-02-13 23:31:30 UTC).
pub const BASE_TIME: i64 = 1_234_567_890;

/// Runs a git command in the repository and returns its trimmed stdout.
///
/// # Errors
///
/// Returns error if git cannot be spawned or exits unsuccessfully
pub fn git(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Creates temporary git repository with test configuration.
///
/// Sets up a clean git repository on branch `main` with user name and
/// email configured and commit signing disabled.
///
/// # Returns
///
/// Temporary directory containing initialized git repository
///
/// # Errors
///
/// Returns error if git commands fail or directory creation fails
pub fn create_test_repo() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let path = dir.path();

    git(path, &["init", "-q"])?;
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;
    git(path, &["config", "commit.gpgsign", "false"])?;
    git(path, &["config", "tag.gpgsign", "false"])?;

    Ok(dir)
}

/// Commits staged changes and returns commit hash.
///
/// # Arguments
///
/// * `repo_path`: Path to git repository
/// * `message`: Commit message
///
/// # Returns
///
/// Full commit hash as string
///
/// # Errors
///
/// Returns error if commit fails or hash cannot be retrieved
pub fn git_commit(repo_path: &Path, message: &str) -> Result<String> {
    git_commit_at(repo_path, message, BASE_TIME)
}

/// Commits staged changes with fixed author and committer dates.
///
/// # Errors
///
/// Returns error if commit fails or hash cannot be retrieved
pub fn git_commit_at(repo_path: &Path, message: &str, timestamp: i64) -> Result<String> {
    let date = format!("{} +0000", timestamp);
    let output = Command::new("git")
        .args(["commit", "-q", "--allow-empty", "-m", message])
        .env("GIT_AUTHOR_DATE", &date)
        .env("GIT_COMMITTER_DATE", &date)
        .current_dir(repo_path)
        .output()?;

    if !output.status.success() {
        anyhow::bail!(
            "Git commit failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    git(repo_path, &["rev-parse", "HEAD"])
}

/// Stages files in repository.
///
/// # Arguments
///
/// * `repo_path`: Path to git repository
/// * `files`: File paths to stage
///
/// # Errors
///
/// Returns error if git add fails
///
/// # Examples
///
/// ```no_run
/// # use anyhow::Result;
/// # use std::path::Path;
/// # fn example(repo_path: &Path) -> Result<()> {
/// // Stage all changes
/// common::git_add(repo_path, &["."])?;
///
/// // Stage specific files
/// common::git_add(repo_path, &["file1.txt", "file2.rs"])?;
/// # Ok(())
/// # }
/// ```
pub fn git_add(repo_path: &Path, files: &[&str]) -> Result<()> {
    let mut args = vec!["add"];
    args.extend_from_slice(files);
    git(repo_path, &args)?;
    Ok(())
}

/// Writes file to repository, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(repo_path: &Path, path: &str, content: &str) -> Result<()> {
    write_bytes(repo_path, path, content.as_bytes())
}

/// Writes raw bytes to repository, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_bytes(repo_path: &Path, path: &str, content: &[u8]) -> Result<()> {
    let file_path = repo_path.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// Writes, stages and commits one file at the given timestamp.
///
/// # Errors
///
/// Returns error if any git step fails
pub fn commit_file(
    repo_path: &Path,
    path: &str,
    content: &str,
    message: &str,
    timestamp: i64,
) -> Result<String> {
    write_file(repo_path, path, content)?;
    git_add(repo_path, &[path])?;
    git_commit_at(repo_path, message, timestamp)
}

/// Deletes a loose object from the repository's object store.
///
/// # Errors
///
/// Returns error if the object file cannot be removed
pub fn remove_loose_object(repo_path: &Path, oid: &str) -> Result<()> {
    let path = repo_path
        .join(".git/objects")
        .join(&oid[..2])
        .join(&oid[2..]);
    std::fs::remove_file(path)?;
    Ok(())
}

/// Stages a submodule (gitlink) entry pointing at `commit`.
///
/// # Errors
///
/// Returns error if git update-index fails
pub fn add_gitlink(repo_path: &Path, path: &str, commit: &str) -> Result<()> {
    let cacheinfo = format!("160000,{},{}", commit, path);
    git(repo_path, &["update-index", "--add", "--cacheinfo", &cacheinfo])?;
    Ok(())
}
