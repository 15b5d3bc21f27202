//! Huffman tree nodes and the tree builder.
//!
//! Leaves are created from the non-zero slots of a frequency table; the builder then repeatedly
//! pops the two lightest nodes off a MinHeap and merges them under a new internal node until a
//! single root remains.

use std::cmp::Ordering;

use log::debug;

use super::min_heap::MinHeap;
use crate::ALPHABET_SIZE;

#[derive(Debug, Clone)]
pub enum NodeData {
    /// Left child (bit 0) and right child (bit 1).
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

#[derive(Debug, Clone)]
pub struct Node {
    /// Leaf: occurrence count. Internal: sum of both children. Zero for decoded trees.
    pub weight: u32,
    /// Tie-breaker for equal weights: the symbol value for leaves, 256 plus the merge index for
    /// internal nodes. Keeps the tree identical from run to run.
    pub rank: u32,
    pub node_data: NodeData,
}

impl Node {
    /// Create a leaf for `sym`.
    pub fn leaf(sym: u8, weight: u32) -> Node {
        Node {
            weight,
            rank: sym as u32,
            node_data: NodeData::Leaf(sym),
        }
    }

    /// Create an internal node owning both children. Its weight is the sum of theirs.
    pub fn kids(left: Node, right: Node, rank: u32) -> Node {
        Node {
            weight: left.weight + right.weight,
            rank,
            node_data: NodeData::Kids(Box::new(left), Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => left.leaf_count() + right.leaf_count(),
            NodeData::Leaf(_) => 1,
        }
    }

    /// Longest root-to-leaf path in edges.
    pub fn depth(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => 1 + left.depth().max(right.depth()),
            NodeData::Leaf(_) => 0,
        }
    }

    /// True if the two trees have the same shape and the same symbols in the same leaves.
    /// Weights are ignored.
    pub fn same_shape(&self, other: &Node) -> bool {
        match (&self.node_data, &other.node_data) {
            (NodeData::Leaf(a), NodeData::Leaf(b)) => a == b,
            (NodeData::Kids(al, ar), NodeData::Kids(bl, br)) => {
                al.same_shape(bl) && ar.same_shape(br)
            }
            _ => false,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    /// Sort Nodes by increasing weight, then increasing rank
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.rank.cmp(&other.rank))
    }
}

/// A complete Huffman tree. Every internal node has exactly two children; a tree built from a
/// single distinct symbol is just one leaf.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    pub root: Node,
}

impl HuffmanTree {
    /// Build the tree from a frequency table. Returns None when every weight is zero, in which
    /// case there is nothing to encode.
    pub fn from_weights(weights: &[u32; ALPHABET_SIZE]) -> Option<HuffmanTree> {
        let leaves: Vec<Node> = weights
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w > 0)
            .map(|(sym, &w)| Node::leaf(sym as u8, w))
            .collect();
        if leaves.is_empty() {
            return None;
        }
        debug!("Building tree from {} distinct symbols", leaves.len());

        let mut heap = MinHeap::build(leaves);
        let mut next_rank = ALPHABET_SIZE as u32;
        while heap.len() > 1 {
            // First pop goes left, second pop goes right
            let (left, right) = match (heap.pop_min(), heap.pop_min()) {
                (Some(left), Some(right)) => (left, right),
                _ => unreachable!("heap held at least two nodes"),
            };
            heap.insert(Node::kids(left, right, next_rank));
            next_rank += 1;
        }
        heap.pop_min().map(|root| HuffmanTree { root })
    }

    /// Wrap an existing root, e.g. one read back from a bitstream.
    pub fn from_root(root: Node) -> HuffmanTree {
        HuffmanTree { root }
    }

    /// Total weight of the tree, which is the number of symbols it was built from.
    pub fn weight(&self) -> u32 {
        self.root.weight
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Dump the tree at debug level.
    pub fn print_structure(&self) {
        debug!("Huffman Tree Structure:");
        print_node(&self.root, 0, "root");
    }
}

fn print_node(node: &Node, depth: usize, label: &str) {
    let indent = "  ".repeat(depth);
    match &node.node_data {
        NodeData::Leaf(sym) => {
            debug!("{}{}-> Leaf: {:#04x} [weight: {}]", indent, label, sym, node.weight);
        }
        NodeData::Kids(left, right) => {
            debug!("{}{}-> Internal [weight: {}]", indent, label, node.weight);
            print_node(left, depth + 1, "L");
            print_node(right, depth + 1, "R");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn weights_of(data: &[u8]) -> [u32; ALPHABET_SIZE] {
        let mut w = [0_u32; ALPHABET_SIZE];
        data.iter().for_each(|&b| w[b as usize] += 1);
        w
    }

    fn check_sums(node: &Node) {
        if let NodeData::Kids(left, right) = &node.node_data {
            assert_eq!(node.weight, left.weight + right.weight);
            check_sums(left);
            check_sums(right);
        }
    }

    #[test]
    fn empty_weights_test() {
        assert!(HuffmanTree::from_weights(&[0; ALPHABET_SIZE]).is_none());
    }

    #[test]
    fn single_symbol_test() {
        let tree = HuffmanTree::from_weights(&weights_of(&[0x41; 1000])).unwrap();
        assert!(tree.root.is_leaf());
        assert_eq!(tree.weight(), 1000);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn two_symbol_test() {
        let tree = HuffmanTree::from_weights(&weights_of(b"AAAB")).unwrap();
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.weight(), 4);
        match &tree.root.node_data {
            // Lighter 'B' is popped first and goes left
            NodeData::Kids(left, right) => {
                assert!(matches!(left.node_data, NodeData::Leaf(b'B')));
                assert!(matches!(right.node_data, NodeData::Leaf(b'A')));
            }
            NodeData::Leaf(_) => panic!("expected an internal root"),
        }
    }

    #[test]
    fn weight_invariant_test() {
        let data = b"this is an example of a huffman tree";
        let tree = HuffmanTree::from_weights(&weights_of(data)).unwrap();
        check_sums(&tree.root);
        assert_eq!(tree.weight() as usize, data.len());
        assert_eq!(tree.leaf_count(), 16);
    }

    #[test]
    fn deterministic_ties_test() {
        // All weights equal: any rebuild must give the same tree
        let data: Vec<u8> = (0..=255).collect();
        let a = HuffmanTree::from_weights(&weights_of(&data)).unwrap();
        let b = HuffmanTree::from_weights(&weights_of(&data)).unwrap();
        assert!(a.root.same_shape(&b.root));
        assert_eq!(a.depth(), 8);
    }

    #[test]
    fn node_order_test() {
        let a = Node::leaf(b'a', 3);
        let b = Node::leaf(b'b', 3);
        let c = Node::leaf(b'c', 1);
        assert!(c < a);
        assert!(a < b);
        let k = Node::kids(Node::leaf(0, 1), Node::leaf(1, 2), 256);
        assert!(a < k);
        assert_eq!(k.weight, 3);
    }
}
