//! Integration tests for Gitscroll.
//!
//! Tests commit extraction, history walking, ref listing and metadata
//! against real repositories built with the git CLI.

mod common;

use anyhow::Result;
use common::{
    BASE_TIME, add_gitlink, commit_file, create_test_repo, git, git_add, git_commit_at,
    remove_loose_object, write_bytes,
};
use gitscroll::{History, RefKind, RepoMeta, extract_commit, head_id, list_refs, open_repository};
use std::collections::HashSet;

fn object_id(hex_str: &str) -> gix::ObjectId {
    let bytes = hex::decode(hex_str).expect("Commit id should be hex");
    assert_eq!(bytes.len(), 20, "Commit id should be 20 bytes");
    gix::ObjectId::from_bytes_or_panic(&bytes)
}

#[test]
fn test_extract_root_commit_adds_every_file() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    common::write_file(path, "README", "hello\n")?;
    common::write_file(path, "src/main.rs", "fn main() {}\n")?;
    git_add(path, &["."])?;
    let oid = git_commit_at(path, "Initial commit", BASE_TIME)?;
    let repo = open_repository(path)?;

    // Act
    let info = extract_commit(&repo, object_id(&oid))?;

    // Assert
    assert_eq!(info.oid_hex(), oid);
    assert!(info.parent_id().is_none(), "Root commit has no parent");
    let paths: Vec<&str> = info.diff().deltas().iter().map(|d| d.new_path()).collect();
    assert_eq!(paths, vec!["README", "src/main.rs"]);
    assert!(
        info.diff()
            .deltas()
            .iter()
            .all(|d| d.deletions() == 0 && d.insertions() == 1)
    );
    let stats = info.stats();
    assert_eq!(stats.files_changed, 2);
    assert_eq!(stats.insertions, 2);
    assert_eq!(stats.deletions, 0);

    Ok(())
}

#[test]
fn test_extract_commit_metadata() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    let oid = commit_file(
        path,
        "a.txt",
        "a\n",
        "Add a\nacross lines\n\nBody paragraph",
        BASE_TIME,
    )?;
    let repo = open_repository(path)?;

    // Act
    let info = extract_commit(&repo, object_id(&oid))?;

    // Assert
    assert_eq!(info.author().name(), "Test User");
    assert_eq!(info.author().email(), "test@example.com");
    assert_eq!(info.author().time().seconds(), BASE_TIME);
    assert_eq!(info.author().time().offset_minutes(), 0);
    assert_eq!(info.summary(), Some("Add a across lines"));
    assert!(info.message().is_some_and(|m| m.contains("Body paragraph")));

    Ok(())
}

#[test]
fn test_stats_match_line_changes() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    let first = commit_file(path, "f.txt", "1\n2\n3\n", "First", BASE_TIME)?;
    common::write_file(path, "f.txt", "1\ntwo\n3\n4\n")?;
    common::write_file(path, "g.txt", "new\n")?;
    git_add(path, &["."])?;
    let second = git_commit_at(path, "Second", BASE_TIME + 60)?;
    let repo = open_repository(path)?;

    // Act
    let info = extract_commit(&repo, object_id(&second))?;

    // Assert
    assert_eq!(info.parent_hex().as_deref(), Some(first.as_str()));
    let stats = info.stats();
    assert_eq!(stats.files_changed, info.diff().deltas().len());
    assert_eq!(stats.files_changed, 2);
    assert_eq!(stats.insertions, 3);
    assert_eq!(stats.deletions, 1);

    Ok(())
}

#[test]
fn test_deleted_file_delta() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    commit_file(path, "gone.txt", "bye\nbye\n", "Add", BASE_TIME)?;
    git(path, &["rm", "-q", "gone.txt"])?;
    let oid = git_commit_at(path, "Remove", BASE_TIME + 60)?;
    let repo = open_repository(path)?;

    // Act
    let info = extract_commit(&repo, object_id(&oid))?;

    // Assert
    let delta = &info.diff().deltas()[0];
    assert_eq!(delta.old_path(), "gone.txt");
    assert_eq!(delta.deletions(), 2);
    assert_eq!(delta.insertions(), 0);

    Ok(())
}

#[test]
fn test_binary_change_has_no_hunks() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    write_bytes(path, "image.bin", b"\x00\x01\x02\x03")?;
    git_add(path, &["image.bin"])?;
    let oid = git_commit_at(path, "Add binary", BASE_TIME)?;
    let repo = open_repository(path)?;

    // Act
    let info = extract_commit(&repo, object_id(&oid))?;

    // Assert
    let delta = &info.diff().deltas()[0];
    assert!(delta.is_binary());
    assert!(delta.hunks().is_empty());
    assert_eq!(info.stats().files_changed, 1);
    assert_eq!(info.stats().insertions, 0);

    Ok(())
}

#[test]
fn test_newline_only_changes_count_as_lines() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    commit_file(path, "eol.txt", "a\nb\n", "With newline", BASE_TIME)?;
    let dropped = commit_file(path, "eol.txt", "a\nb", "Drop newline", BASE_TIME + 60)?;
    commit_file(path, "crlf.txt", "x\r\n", "CRLF", BASE_TIME + 120)?;
    let converted = commit_file(path, "crlf.txt", "x\n", "To LF", BASE_TIME + 180)?;
    let repo = open_repository(path)?;

    // Act
    let dropped = extract_commit(&repo, object_id(&dropped))?;
    let converted = extract_commit(&repo, object_id(&converted))?;

    // Assert
    assert_eq!(dropped.diff().deltas()[0].hunks().len(), 1);
    assert_eq!(dropped.stats().insertions, 1);
    assert_eq!(dropped.stats().deletions, 1);
    assert_eq!(converted.stats().insertions, 1);
    assert_eq!(converted.stats().deletions, 1);

    Ok(())
}

#[test]
fn test_submodule_entries_are_not_diffed() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    let base = commit_file(path, "a.txt", "a\n", "Base", BASE_TIME)?;
    add_gitlink(path, "sub", &base)?;
    common::write_file(path, "b.txt", "b\n")?;
    git_add(path, &["b.txt"])?;
    let oid = git_commit_at(path, "Add submodule", BASE_TIME + 60)?;
    let repo = open_repository(path)?;

    // Act
    let info = extract_commit(&repo, object_id(&oid))?;

    // Assert
    let paths: Vec<&str> = info.diff().deltas().iter().map(|d| d.new_path()).collect();
    assert_eq!(paths, vec!["b.txt"]);
    assert_eq!(info.stats().files_changed, 1);

    Ok(())
}

#[test]
fn test_history_ends_after_unreadable_commit() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    let first = commit_file(path, "a.txt", "1\n", "First", BASE_TIME)?;
    commit_file(path, "a.txt", "2\n", "Second", BASE_TIME + 60)?;
    let third = commit_file(path, "a.txt", "3\n", "Third", BASE_TIME + 120)?;
    let first_tree = git(path, &["rev-parse", &format!("{}^{{tree}}", first)])?;
    remove_loose_object(path, &first_tree)?;
    let repo = open_repository(path)?;

    // Act
    let items: Vec<_> = History::new(&repo, head_id(&repo)?).collect();

    // Assert
    assert_eq!(items.len(), 2, "Third, then the failing second commit");
    assert_eq!(items[0].as_ref().map(|c| c.oid_hex()).ok(), Some(third));
    assert!(items[1].is_err());

    Ok(())
}

#[test]
fn test_extract_missing_commit_fails() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    commit_file(path, "a.txt", "a\n", "Only", BASE_TIME)?;
    let repo = open_repository(path)?;
    let missing = object_id(&"ab".repeat(20));

    // Act
    let result = extract_commit(&repo, missing);

    // Assert
    assert!(result.is_err(), "Unknown commit should not resolve");

    Ok(())
}

#[test]
fn test_history_newest_first_without_repeats() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    let mut expected = Vec::new();
    for i in 0..5 {
        expected.push(commit_file(
            path,
            "log.txt",
            &format!("line {}\n", i),
            &format!("Commit {}", i),
            BASE_TIME + i * 60,
        )?);
    }
    expected.reverse();
    let repo = open_repository(path)?;

    // Act
    let commits: Vec<_> = History::new(&repo, head_id(&repo)?).collect::<Result<_>>()?;

    // Assert
    let ids: Vec<String> = commits.iter().map(|c| c.oid_hex()).collect();
    assert_eq!(ids, expected);
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len(), "No commit should repeat");
    assert!(
        commits
            .windows(2)
            .all(|w| w[0].author().time().seconds() >= w[1].author().time().seconds())
    );

    Ok(())
}

#[test]
fn test_history_follows_first_parent_of_merge() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    let base = commit_file(path, "a.txt", "a\n", "Base", BASE_TIME)?;
    git(path, &["checkout", "-q", "-b", "topic"])?;
    let topic = commit_file(path, "b.txt", "b\n", "Topic work", BASE_TIME + 60)?;
    git(path, &["checkout", "-q", "main"])?;
    let mainline = commit_file(path, "c.txt", "c\n", "Main work", BASE_TIME + 120)?;
    git(path, &["merge", "-q", "--no-ff", "--no-edit", "topic"])?;
    let repo = open_repository(path)?;

    // Act
    let ids: Vec<String> = History::new(&repo, head_id(&repo)?)
        .map(|c| c.map(|c| c.oid_hex()))
        .collect::<Result<_>>()?;

    // Assert
    assert_eq!(ids.len(), 3, "Merge, main work and base");
    assert_eq!(ids[1], mainline);
    assert_eq!(ids[2], base);
    assert!(!ids.contains(&topic), "Second parent is not walked");

    Ok(())
}

#[test]
fn test_merge_stats_against_first_parent() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    commit_file(path, "a.txt", "a\n", "Base", BASE_TIME)?;
    git(path, &["checkout", "-q", "-b", "topic"])?;
    commit_file(path, "b.txt", "b\nb\n", "Topic work", BASE_TIME + 60)?;
    git(path, &["checkout", "-q", "main"])?;
    commit_file(path, "c.txt", "c\n", "Main work", BASE_TIME + 120)?;
    git(path, &["merge", "-q", "--no-ff", "--no-edit", "topic"])?;
    let repo = open_repository(path)?;

    // Act
    let merge = extract_commit(&repo, head_id(&repo)?)?;

    // Assert
    assert_eq!(merge.stats().files_changed, 1);
    assert_eq!(merge.diff().deltas()[0].new_path(), "b.txt");
    assert_eq!(merge.stats().insertions, 2);

    Ok(())
}

#[test]
fn test_list_refs_branches_before_tags() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    let oid = commit_file(path, "a.txt", "a\n", "Base", BASE_TIME)?;
    git(path, &["branch", "zeta"])?;
    git(path, &["branch", "alpha"])?;
    git(path, &["tag", "v0.1"])?;
    git(path, &["tag", "-a", "-m", "Annotated", "a-tag"])?;
    let repo = open_repository(path)?;

    // Act
    let refs = list_refs(&repo)?;

    // Assert
    let listed: Vec<(&str, RefKind)> = refs.iter().map(|r| (r.name(), r.kind())).collect();
    assert_eq!(
        listed,
        vec![
            ("alpha", RefKind::Branch),
            ("main", RefKind::Branch),
            ("zeta", RefKind::Branch),
            ("a-tag", RefKind::Tag),
            ("v0.1", RefKind::Tag),
        ]
    );
    assert!(
        refs.iter().all(|r| r.target().to_hex().to_string() == oid),
        "Annotated tags are peeled to the commit"
    );

    Ok(())
}

#[test]
fn test_symbolic_branch_listed_under_its_target() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    let oid = commit_file(path, "a.txt", "a\n", "Base", BASE_TIME)?;
    git(path, &["symbolic-ref", "refs/heads/alias", "refs/heads/main"])?;
    let repo = open_repository(path)?;

    // Act
    let refs = list_refs(&repo)?;

    // Assert
    let names: Vec<&str> = refs.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["main", "main"]);
    assert!(refs.iter().all(|r| r.kind() == RefKind::Branch));
    assert!(refs.iter().all(|r| r.target().to_hex().to_string() == oid));

    Ok(())
}

#[test]
fn test_list_refs_skips_tags_on_trees_and_blobs() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    commit_file(path, "a.txt", "a\n", "Base", BASE_TIME)?;
    let blob = git(path, &["rev-parse", "HEAD:a.txt"])?;
    let tree = git(path, &["rev-parse", "HEAD^{tree}"])?;
    git(path, &["tag", "blob-tag", &blob])?;
    git(path, &["tag", "tree-tag", &tree])?;
    git(path, &["tag", "-a", "-m", "Annotated blob", "blob-note", &blob])?;
    git(path, &["tag", "v1.0"])?;
    let repo = open_repository(path)?;

    // Act
    let refs = list_refs(&repo)?;

    // Assert
    let names: Vec<&str> = refs.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["main", "v1.0"]);

    Ok(())
}

#[test]
fn test_list_refs_fails_on_dangling_reference() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    commit_file(path, "a.txt", "a\n", "Base", BASE_TIME)?;
    std::fs::write(path.join(".git/refs/tags/broken"), format!("{}\n", "ab".repeat(20)))?;
    let repo = open_repository(path)?;

    // Act
    let result = list_refs(&repo);

    // Assert
    assert!(result.is_err(), "Dangling reference cannot be resolved");

    Ok(())
}

#[test]
fn test_repo_meta_reads_description_and_documents() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let path = repo_dir.path();
    common::write_file(path, "README", "readme\n")?;
    git_add(path, &["."])?;
    git_commit_at(path, "Docs", BASE_TIME)?;
    std::fs::write(path.join(".git/description"), "Tiny test repo\n")?;
    std::fs::write(path.join(".git/url"), "https://example.org/tiny.git\n")?;
    let repo = open_repository(path)?;

    // Act
    let meta = RepoMeta::load(&repo, path, head_id(&repo)?, Some("tiny"))?;

    // Assert
    assert_eq!(meta.name(), "tiny");
    assert_eq!(meta.description(), "Tiny test repo");
    assert_eq!(meta.clone_url(), "https://example.org/tiny.git");
    assert!(meta.has_readme());
    assert!(!meta.has_license());

    Ok(())
}

#[test]
fn test_open_repository_nonexistent() {
    // Arrange
    let path = std::path::Path::new("/definitely/not/a/real/path/anywhere");

    // Act
    let result = open_repository(path);

    // Assert
    assert!(result.is_err(), "Should fail for invalid repository path");
}

#[test]
fn test_head_of_empty_repository_fails() -> Result<()> {
    // Arrange
    let repo_dir = create_test_repo()?;
    let repo = open_repository(repo_dir.path())?;

    // Act
    let result = head_id(&repo);

    // Assert
    assert!(result.is_err(), "Unborn HEAD cannot be resolved");

    Ok(())
}
