//! Flattening of resolved dependency graphs.
//!
//! The resolver hands over a tree of [`DependencyGraphNode`]s rooted at the
//! project itself. [`flatten`] walks it in pre-order (a node, then its
//! children in list order, root included, nothing pruned) and collects every
//! coordinate into [`FlattenedArtifacts`], an ordered map keyed by canonical
//! name.
//!
//! Two properties of the result matter downstream:
//!
//! - **First insert wins.** When two nodes share a canonical name, the one
//!   visited first is kept. Later duplicates are counted and dropped.
//! - **Iteration is sorted by canonical name**, never by visit order. Only the
//!   choice of instance for a colliding key depends on traversal order, so
//!   reordering siblings in the input leaves the output bytes unchanged.

pub mod source;

pub use source::{DependencyGraphBuilder, JsonGraphFile};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::{self, Entry};

use crate::coordinate::ArtifactCoordinate;

/// A node of the resolved dependency tree: one artifact and the artifacts it pulls in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraphNode {
    /// The artifact this node resolved to
    #[serde(flatten)]
    pub artifact: ArtifactCoordinate,
    /// Dependencies of this artifact, in resolver order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DependencyGraphNode>,
}

impl DependencyGraphNode {
    /// Create a leaf node.
    pub fn new(artifact: ArtifactCoordinate) -> Self {
        Self {
            artifact,
            children: Vec::new(),
        }
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: DependencyGraphNode) -> Self {
        self.children.push(child);
        self
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(DependencyGraphNode::node_count).sum::<usize>()
    }
}

/// Deduplicated artifacts keyed by canonical name, with first-insert-wins semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedArtifacts {
    artifacts: BTreeMap<String, ArtifactCoordinate>,
    root: Option<String>,
    duplicates: usize,
}

impl FlattenedArtifacts {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `artifact` unless its canonical name is already present.
    ///
    /// Returns `true` if the artifact was stored. An existing entry is never
    /// overwritten.
    pub fn insert_first(&mut self, artifact: ArtifactCoordinate) -> bool {
        match self.artifacts.entry(artifact.canonical_name()) {
            Entry::Vacant(slot) => {
                slot.insert(artifact);
                true
            }
            Entry::Occupied(_) => {
                self.duplicates += 1;
                false
            }
        }
    }

    /// The artifact the graph was rooted at, i.e. the project itself.
    pub fn root(&self) -> Option<&ArtifactCoordinate> {
        self.root.as_deref().and_then(|name| self.artifacts.get(name))
    }

    /// Look up an artifact by canonical name.
    pub fn get(&self, canonical_name: &str) -> Option<&ArtifactCoordinate> {
        self.artifacts.get(canonical_name)
    }

    /// Number of distinct artifacts.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether no artifact was collected.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// How many inserts were rejected because the canonical name was taken.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Canonical names in iteration order.
    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.artifacts.keys().map(String::as_str)
    }

    /// Artifacts in canonical-name order.
    pub fn iter(&self) -> btree_map::Values<'_, String, ArtifactCoordinate> {
        self.artifacts.values()
    }
}

impl<'a> IntoIterator for &'a FlattenedArtifacts {
    type Item = &'a ArtifactCoordinate;
    type IntoIter = btree_map::Values<'a, String, ArtifactCoordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Flatten a dependency tree into a deduplicated, canonically ordered set.
///
/// The walk uses an explicit stack so deep graphs cannot overflow the call
/// stack. Children are pushed in reverse so they pop in list order, which
/// keeps the traversal pre-order.
pub fn flatten(root: &DependencyGraphNode) -> FlattenedArtifacts {
    let mut flattened = FlattenedArtifacts {
        root: Some(root.artifact.canonical_name()),
        ..FlattenedArtifacts::default()
    };
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if !flattened.insert_first(node.artifact.clone()) {
            tracing::trace!("Skipping duplicate artifact {}", node.artifact);
        }
        stack.extend(node.children.iter().rev());
    }

    tracing::debug!(
        "Flattened {} artifacts ({} duplicates collapsed)",
        flattened.len(),
        flattened.duplicates()
    );

    flattened
}
