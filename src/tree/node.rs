use super::types::{NodeId, Token};
use roaring::RoaringBitmap;
use rustc_hash::FxHashMap;

/// A node of the suffix tree, leaf or internal.
///
/// The path label of a node is `word[start..start + depth]`; the label of the
/// edge entering it is the part below the parent's depth. Children are owned
/// through `transitions`, keyed by the first token of their edge. `parent`
/// is a plain back-reference.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) start: usize,
    pub(crate) depth: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) transitions: FxHashMap<Token<T>, NodeId>,

    // Filled by the labeling pass once construction is done.
    pub(crate) generalized_ids: RoaringBitmap,
    pub(crate) leaf_count: usize,
    pub(crate) first: usize,
}

impl<T: Copy + Eq + std::hash::Hash> Node<T> {
    pub(crate) fn new(start: usize, depth: usize, parent: Option<NodeId>) -> Self {
        Self {
            start,
            depth,
            parent,
            transitions: FxHashMap::default(),
            generalized_ids: RoaringBitmap::new(),
            leaf_count: 0,
            first: start,
        }
    }

    /// Offset in the concatenated word where this node's path label begins
    pub fn start(&self) -> usize {
        self.start
    }

    /// String depth: length of the path label from the root
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_leaf(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Number of leaves in this subtree, i.e. occurrences of the path label
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Smallest leaf start in this subtree: the first occurrence of the label
    pub fn first_occurrence(&self) -> usize {
        self.first
    }

    /// Indices of the input sequences with a suffix passing through this node
    pub fn generalized_ids(&self) -> &RoaringBitmap {
        &self.generalized_ids
    }

    #[inline]
    pub fn child(&self, token: &Token<T>) -> Option<NodeId> {
        self.transitions.get(token).copied()
    }

    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.transitions.values().copied()
    }
}
