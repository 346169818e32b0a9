use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap};

use crate::counter::FrequencyTable;
use crate::error::{HuffmanError, Result};


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<T> {

    Internal { frequency: usize, left: Box<Node<T>>, right: Box<Node<T>> },
    Leaf { frequency: usize, token: T },

}

impl<T> Node<T> {

    /// Leaf: observed count. Internal: sum of the leaves below
    pub const fn frequency(&self) -> usize {
        match self {
            Node::Internal { frequency, .. } |
            Node::Leaf { frequency, .. }
                => *frequency
        }
    }


    pub const fn token(&self) -> Option<&T> {
        match self {
            Node::Leaf { token, .. } => Some(token),
            Node::Internal { .. } => None,
        }
    }


    pub const fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }


    pub fn children(&self) -> Option<(&Node<T>, &Node<T>)> {
        match self {
            Node::Internal { left, right, .. } => Some((left.as_ref(), right.as_ref())),
            Node::Leaf { .. } => None,
        }
    }


    fn merge(left: Node<T>, right: Node<T>) -> Self {
        Node::Internal {
            frequency: left.frequency() + right.frequency(),
            left: Box::new(left),
            right: Box::new(right)
        }
    }


    fn depth(&self) -> usize {
        match self {
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
            Node::Leaf { .. } => 0,
        }
    }


    fn leaf_count(&self) -> usize {
        match self {
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
            Node::Leaf { .. } => 1,
        }
    }

}


/// A node waiting to be merged.
/// Orders by frequency, then by rank so equal frequencies merge deterministically:
/// leaves are ranked by token order, merged nodes after every leaf in creation order.
struct Candidate<T> {

    rank: usize,
    node: Node<T>,

}

impl<T> Candidate<T> {

    fn key(&self) -> (usize, usize) {
        (self.node.frequency(), self.rank)
    }

}

impl<T> PartialEq for Candidate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for Candidate<T> {}

impl<T> PartialOrd for Candidate<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Candidate<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}


/// A static Huffman tree built from one full pass over the token frequencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<T> {

    root: Node<T>,

}

impl<T> HuffmanTree<T>
where
    T: Ord
{

    /// Builds the tree by repeatedly merging the two least frequent candidates.
    ///
    /// Repeated tokens have their frequencies summed and zero frequencies are ignored.
    /// A single distinct token yields a tree whose root is that token's leaf.
    pub fn build<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, usize)>
    {
        let mut frequencies: BTreeMap<T, usize> = BTreeMap::new();

        for (token, frequency) in pairs {
            if frequency > 0 {
                *frequencies.entry(token).or_insert(0) += frequency;
            }
        }

        let mut candidates = BinaryHeap::with_capacity(frequencies.len());

        for (rank, (token, frequency)) in frequencies.into_iter().enumerate() {
            candidates.push(Reverse(Candidate { rank, node: Node::Leaf { frequency, token } }));
        }

        let mut next_rank = candidates.len();

        loop {
            let Reverse(first) = candidates.pop()
                .ok_or(HuffmanError::EmptyInput)?;

            let Some(Reverse(second)) = candidates.pop() else {
                let tree = Self { root: first.node };
                log::debug!("built tree with {} leaves, depth {}", tree.leaf_count(), tree.depth());
                return Ok(tree);
            };

            candidates.push(Reverse(Candidate {
                rank: next_rank,
                node: Node::merge(first.node, second.node)
            }));
            next_rank += 1;
        }
    }

}

impl<T> HuffmanTree<T>
where
    T: Ord + Clone
{

    pub fn from_table(table: &FrequencyTable<T>) -> Result<Self> {
        Self::build(table.items().map(|(token, count)| (token.clone(), count)))
    }

}

impl<T> HuffmanTree<T> {

    pub const fn root(&self) -> &Node<T> {
        &self.root
    }


    /// Total number of tokens the tree was built from
    pub const fn frequency(&self) -> usize {
        self.root.frequency()
    }


    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }


    /// Length of the longest code
    pub fn depth(&self) -> usize {
        self.root.depth()
    }


    /// True when only one distinct token was seen, the root is then a leaf with an empty code
    pub const fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }


    /// `(token, frequency)` of every leaf, left to right
    pub fn leaves(&self) -> Vec<(&T, usize)> {

        let mut leaves = Vec::new();
        let mut stack = vec![&self.root];

        while let Some(node) = stack.pop() {
            match node {
                Node::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                },
                Node::Leaf { frequency, token } => leaves.push((token, *frequency)),
            }
        }

        leaves
    }

}
