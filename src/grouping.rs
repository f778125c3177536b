//! Revision grouping and latest-version selection
//!
//! Partitions recognized revisions by document identity, preserving
//! first-seen order so that tie-breaks stay reproducible for a given
//! traversal order.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::version::{DocumentKey, VersionedFile};

/// All recognized revisions of one document within the scope of a run,
/// ordered descending by `(major, minor)`.
///
/// The sort is stable: members with equal versions keep their relative
/// input order, so the head of a tied group is the first-encountered
/// revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionGroup {
    /// Shared document identity
    pub key: DocumentKey,
    /// Members, newest first; never empty
    pub members: Vec<VersionedFile>,
}

impl VersionGroup {
    /// The canonical latest revision.
    #[must_use]
    pub fn head(&self) -> &VersionedFile {
        &self.members[0]
    }

    /// Every member other than the head, still newest first.
    #[must_use]
    pub fn stale(&self) -> &[VersionedFile] {
        &self.members[1..]
    }

    /// A single-revision group has nothing superseded and takes no
    /// policy action.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    /// Whether a member carries the exact same version as the head.
    /// True ties cannot be declared superseded.
    #[must_use]
    pub fn ties_with_head(&self, member: &VersionedFile) -> bool {
        member.version() == self.head().version()
    }
}

/// Partition revisions into groups by document key.
///
/// Groups appear in the order their first member was encountered, and
/// each group is sorted descending by version with a stable sort.
#[must_use]
pub fn group_by_document(files: Vec<VersionedFile>) -> Vec<VersionGroup> {
    let mut index: HashMap<DocumentKey, usize> = HashMap::new();
    let mut groups: Vec<VersionGroup> = Vec::new();

    for file in files {
        let key = file.key();
        if let Some(&slot) = index.get(&key) {
            groups[slot].members.push(file);
        } else {
            index.insert(key.clone(), groups.len());
            groups.push(VersionGroup {
                key,
                members: vec![file],
            });
        }
    }

    for group in &mut groups {
        group.members.sort_by_key(|f| Reverse(f.version()));
    }

    groups
}
