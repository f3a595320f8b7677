//! Branch and tag enumeration.

use anyhow::{Context, Result, anyhow, bail};
use gix::bstr::ByteSlice;
use gix::refs::Category;

/// Most symbolic hops followed before a reference counts as a loop.
const MAX_SYMBOLIC_DEPTH: usize = 5;

/// Reference kind; branches order before tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RefKind {
    /// Local branch under `refs/heads/`
    Branch,
    /// Tag under `refs/tags/`
    Tag,
}

/// Reference resolved to the commit it finally points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefInfo {
    name: String,
    kind: RefKind,
    target: gix::ObjectId,
}

impl RefInfo {
    /// Creates a reference record.
    pub fn new(name: impl Into<String>, kind: RefKind, target: gix::ObjectId) -> Self {
        Self {
            name: name.into(),
            kind,
            target,
        }
    }

    /// Short name, e.g. `main` or `v1.0`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Branch or tag.
    pub fn kind(&self) -> RefKind {
        self.kind
    }

    /// Peeled target id.
    pub fn target(&self) -> gix::ObjectId {
        self.target
    }
}

/// Lists branches and tags sorted by kind, then by name.
///
/// Symbolic references are resolved and listed under the name of the
/// reference they point at. Annotated tags are peeled. References whose
/// final object is not a commit (a tag on a tree or blob), remote branches,
/// notes and other namespaces are ignored.
///
/// # Errors
///
/// Returns error if references cannot be iterated or any of them fails to
/// resolve.
pub fn list_refs(repo: &gix::Repository) -> Result<Vec<RefInfo>> {
    let platform = repo.references().context("Failed to read references")?;
    let iter = platform.all().context("Failed to iterate references")?;

    let mut refs = Vec::new();
    for reference in iter {
        let reference = reference.map_err(|e| anyhow!("Failed to read reference: {}", e))?;

        let kind = match reference.name().category() {
            Some(Category::LocalBranch) => RefKind::Branch,
            Some(Category::Tag) => RefKind::Tag,
            _ => continue,
        };
        let listed = reference.name().as_bstr().to_str_lossy().into_owned();

        let resolved = resolve_symbolic(reference, &listed)?;
        let name = resolved.name().shorten().to_str_lossy().into_owned();

        let target = resolved
            .into_fully_peeled_id()
            .with_context(|| format!("Failed to resolve reference '{}'", listed))?
            .detach();

        let object = repo
            .find_object(target)
            .with_context(|| format!("Target of '{}' not found: {}", listed, target))?;
        if object.kind != gix::object::Kind::Commit {
            tracing::debug!("Skipping {}: points at a {}", listed, object.kind);
            continue;
        }

        refs.push(RefInfo::new(name, kind, target));
    }

    sort_refs(&mut refs);
    Ok(refs)
}

/// Follows symbolic references until a direct one is reached.
fn resolve_symbolic<'repo>(
    reference: gix::Reference<'repo>,
    listed: &str,
) -> Result<gix::Reference<'repo>> {
    let mut resolved = reference;
    for _ in 0..MAX_SYMBOLIC_DEPTH {
        match resolved.follow() {
            Some(next) => {
                resolved =
                    next.with_context(|| format!("Failed to resolve reference '{}'", listed))?;
            }
            None => return Ok(resolved),
        }
    }
    bail!("Symbolic reference '{}' nests too deeply", listed)
}

fn sort_refs(refs: &mut [RefInfo]) {
    refs.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
}
