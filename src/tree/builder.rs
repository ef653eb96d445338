//! McCreight suffix tree construction
//!
//! Builds the tree over a sentinel-terminated word in linear time:
//! 1. Match suffix `i` from the current node, skipping whole edges while the
//!    matched depth equals the node depth, comparing symbols only inside an edge
//! 2. Split the edge when the match stops inside it
//! 3. Attach the leaf for suffix `i`
//! 4. Follow (computing if needed) the suffix link and drop one matched symbol
//!
//! Suffix links live in a side table owned by the builder and are gone once
//! [`McCreight::run`] returns.

use super::node::Node;
use super::types::{NodeId, ROOT, Symbol, Token};
use crate::error::{Error, Result};
use roaring::RoaringBitmap;

pub(crate) struct McCreight<'w, T> {
    word: &'w [Token<T>],
    nodes: Vec<Node<T>>,
    links: Vec<Option<NodeId>>,
}

impl<'w, T: Symbol> McCreight<'w, T> {
    pub(crate) fn new(word: &'w [Token<T>]) -> Self {
        let mut nodes = Vec::with_capacity(word.len() * 2);
        nodes.push(Node::new(0, 0, None));
        let mut links = Vec::with_capacity(word.len() * 2);
        links.push(Some(ROOT));
        Self { word, nodes, links }
    }

    /// Run the construction and hand back the node arena
    pub(crate) fn run(mut self) -> Result<Vec<Node<T>>> {
        let n = self.word.len();
        let mut u = ROOT;
        let mut d = 0usize;

        for i in 0..n {
            while self.nodes[u].depth == d && i + d < n {
                let Some(next) = self.nodes[u].child(&self.word[i + d]) else {
                    break;
                };
                u = next;
                d += 1;
                let start = self.nodes[u].start;
                while d < self.nodes[u].depth
                    && i + d < n
                    && self.word[start + d] == self.word[i + d]
                {
                    d += 1;
                }
            }
            if d < self.nodes[u].depth {
                u = self.split(u, d)?;
            }
            self.attach_leaf(i, u, d)?;
            u = self.suffix_link(u)?;
            d = d.saturating_sub(1);
        }

        Ok(self.nodes)
    }

    fn push(&mut self, node: Node<T>) -> NodeId {
        self.nodes.push(node);
        self.links.push(None);
        self.nodes.len() - 1
    }

    /// Insert an internal node at depth `d` on the edge entering `u`
    fn split(&mut self, u: NodeId, d: usize) -> Result<NodeId> {
        let start = self.nodes[u].start;
        let parent = self.nodes[u]
            .parent
            .ok_or_else(|| Error::invariant("cannot split above the root"))?;
        let parent_depth = self.nodes[parent].depth;

        let v = self.push(Node::new(start, d, Some(parent)));
        self.nodes[v].transitions.insert(self.word[start + d], u);
        self.nodes[u].parent = Some(v);
        self.nodes[parent]
            .transitions
            .insert(self.word[start + parent_depth], v);
        Ok(v)
    }

    fn attach_leaf(&mut self, i: usize, u: NodeId, d: usize) -> Result<()> {
        let key = *self
            .word
            .get(i + d)
            .ok_or_else(|| Error::invariant(format!("suffix {i} matched past the end of the word")))?;
        let leaf = self.push(Node::new(i, self.word.len() - i, Some(u)));
        self.nodes[u].transitions.insert(key, leaf);
        Ok(())
    }

    /// Suffix link of `u`, computing it (and any missing ancestor links) first
    fn suffix_link(&mut self, u: NodeId) -> Result<NodeId> {
        let mut pending = Vec::new();
        let mut cur = u;
        while self.links[cur].is_none() {
            pending.push(cur);
            cur = self.nodes[cur]
                .parent
                .ok_or_else(|| Error::invariant("root lost its suffix link"))?;
        }
        while let Some(node) = pending.pop() {
            self.compute_suffix_link(node)?;
        }
        self.links[u].ok_or_else(|| Error::invariant("suffix link was not computed"))
    }

    /// Walk from the parent's suffix link down to depth `depth - 1` using
    /// skip/count, splitting an edge if that depth falls inside it.
    fn compute_suffix_link(&mut self, u: NodeId) -> Result<()> {
        let depth = self.nodes[u].depth;
        let start = self.nodes[u].start;
        let parent = self.nodes[u]
            .parent
            .ok_or_else(|| Error::invariant("root lost its suffix link"))?;
        let mut v = self.links[parent]
            .ok_or_else(|| Error::invariant("parent suffix link missing"))?;
        let target = depth - 1;

        while self.nodes[v].depth < target {
            let token = self.word[start + self.nodes[v].depth + 1];
            v = self.nodes[v].child(&token).ok_or_else(|| {
                Error::invariant(format!(
                    "no transition on suffix link descent from node {v} at depth {}",
                    self.nodes[v].depth
                ))
            })?;
        }
        if self.nodes[v].depth > target {
            v = self.split(v, target)?;
        }
        self.links[u] = Some(v);
        Ok(())
    }
}

/// Index of the sequence owning word offset `offset`
#[inline]
pub(crate) fn sequence_of(starts: &[usize], offset: usize) -> usize {
    starts.partition_point(|&s| s <= offset).saturating_sub(1)
}

/// Post-order pass filling `leaf_count`, `first` and, for generalized trees,
/// `generalized_ids` of every node.
///
/// Uses an explicit stack: trees over runs like `aaaa…` are as deep as the
/// input is long.
pub(crate) fn label_nodes<T: Symbol>(nodes: &mut [Node<T>], starts: &[usize], generalized: bool) {
    let mut order = Vec::with_capacity(nodes.len());
    let mut stack = vec![ROOT];
    while let Some(id) = stack.pop() {
        order.push(id);
        stack.extend(nodes[id].children());
    }

    for &id in order.iter().rev() {
        if nodes[id].is_leaf() {
            let node = &mut nodes[id];
            node.leaf_count = 1;
            node.first = node.start;
            if generalized {
                node.generalized_ids
                    .insert(sequence_of(starts, node.start) as u32);
            }
            continue;
        }

        let mut ids = RoaringBitmap::new();
        let mut leaf_count = 0;
        let mut first = usize::MAX;
        for child in nodes[id].children() {
            let child = &nodes[child];
            leaf_count += child.leaf_count;
            first = first.min(child.first);
            if generalized {
                ids |= &child.generalized_ids;
            }
        }

        let node = &mut nodes[id];
        node.leaf_count = leaf_count;
        node.first = first;
        node.generalized_ids = ids;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &[u8]) -> Vec<Token<u8>> {
        let mut w: Vec<Token<u8>> = s.iter().copied().map(Token::Sym).collect();
        w.push(Token::Sentinel(0));
        w
    }

    fn label<'a>(word: &'a [Token<u8>], node: &Node<u8>) -> &'a [Token<u8>] {
        &word[node.start..node.start + node.depth]
    }

    #[test]
    fn test_leaf_per_suffix() {
        let w = word(b"mississippi");
        let nodes = McCreight::new(&w).run().unwrap();

        let mut leaf_starts: Vec<usize> = nodes
            .iter()
            .filter(|n| n.is_leaf())
            .map(|n| n.start)
            .collect();
        leaf_starts.sort_unstable();
        assert_eq!(leaf_starts, (0..w.len()).collect::<Vec<_>>());

        for node in nodes.iter().filter(|n| n.is_leaf()) {
            assert_eq!(node.depth, w.len() - node.start);
        }
    }

    #[test]
    fn test_structural_invariants() {
        let w = word(b"abracadabra abracadabra cadabra");
        let nodes = McCreight::new(&w).run().unwrap();

        for (id, node) in nodes.iter().enumerate() {
            if id == ROOT {
                assert!(node.parent.is_none());
                assert_eq!(node.depth, 0);
                continue;
            }
            let parent = &nodes[node.parent.unwrap()];
            assert!(parent.depth < node.depth, "depth must grow along edges");
            assert_eq!(parent.child(&w[node.start + parent.depth]), Some(id));
            // The parent's label is a prefix of the child's label
            assert_eq!(label(&w, parent), &label(&w, node)[..parent.depth]);
            if !node.is_leaf() {
                assert!(node.transitions.len() >= 2, "internal nodes branch");
            }
        }
    }

    #[test]
    fn test_internal_nodes_of_banana() {
        let w = word(b"banana");
        let nodes = McCreight::new(&w).run().unwrap();

        let mut labels: Vec<Vec<Token<u8>>> = nodes
            .iter()
            .skip(1)
            .filter(|n| !n.is_leaf())
            .map(|n| label(&w, n).to_vec())
            .collect();
        labels.sort();

        let expected: Vec<Vec<Token<u8>>> = ["a", "ana", "na"]
            .iter()
            .map(|s| s.bytes().map(Token::Sym).collect())
            .collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn test_labeling() {
        let w = word(b"banana");
        let mut nodes = McCreight::new(&w).run().unwrap();
        label_nodes(&mut nodes, &[0], false);

        assert_eq!(nodes[ROOT].leaf_count, w.len());
        assert_eq!(nodes[ROOT].first, 0);

        let ana = nodes
            .iter()
            .find(|n| !n.is_leaf() && n.depth == 3)
            .unwrap();
        assert_eq!(ana.leaf_count, 2);
        assert_eq!(ana.first, 1);
    }

    #[test]
    fn test_deep_run_does_not_overflow() {
        let input = vec![b'a'; 200_000];
        let w = word(&input);
        let mut nodes = McCreight::new(&w).run().unwrap();
        label_nodes(&mut nodes, &[0], false);
        assert_eq!(nodes[ROOT].leaf_count, w.len());
    }

    #[test]
    fn test_sequence_of() {
        let starts = [0, 4, 9];
        assert_eq!(sequence_of(&starts, 0), 0);
        assert_eq!(sequence_of(&starts, 3), 0);
        assert_eq!(sequence_of(&starts, 4), 1);
        assert_eq!(sequence_of(&starts, 8), 1);
        assert_eq!(sequence_of(&starts, 20), 2);
    }
}
