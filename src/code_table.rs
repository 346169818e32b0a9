use std::borrow::Borrow;

use crate::counter::FrequencyTable;
use crate::tree::{HuffmanTree, Node};


/// A token and the path from the root to its leaf, '0' for left and '1' for right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry<T> {

    pub token: T,
    pub code: String,

}


/// Token to code lookup, one entry per leaf, sorted by token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<T> {

    entries: Vec<CodeEntry<T>>,

}

impl<T> CodeTable<T>
where
    T: Ord + Clone
{

    pub fn from_tree(tree: &HuffmanTree<T>) -> Self {

        let mut entries = Vec::with_capacity(tree.leaf_count());
        let mut stack = vec![(tree.root(), String::new())];

        while let Some((node, path)) = stack.pop() {
            match node {

                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push('1');

                    let mut left_path = path;
                    left_path.push('0');

                    stack.push((right.as_ref(), right_path));
                    stack.push((left.as_ref(), left_path));
                },

                // A root leaf keeps the empty path
                Node::Leaf { token, .. } => {
                    entries.push(CodeEntry { token: token.clone(), code: path });
                },
            }
        }

        entries.sort_by(|a, b| a.token.cmp(&b.token));

        let table = Self { entries };
        log::debug!("generated {} codes, longest is {} bits", table.len(), table.max_code_len());

        table
    }

}

impl<T> CodeTable<T>
where
    T: Ord
{

    /// Binary search for the exact token
    pub fn code<Q>(&self, token: &Q) -> Option<&str>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized
    {
        self.entries.binary_search_by(|entry| Borrow::<Q>::borrow(&entry.token).cmp(token))
            .ok()
            .map(|i| self.entries[i].code.as_str())
    }


    /// Bits needed to encode every token counted in `table`, ignoring tokens without a code
    pub fn encoded_bits(&self, table: &FrequencyTable<T>) -> usize {
        table.items()
            .filter_map(|(token, count)| self.code(token).map(|code| code.len() * count))
            .sum()
    }

}

impl<T> CodeTable<T> {

    pub fn len(&self) -> usize {
        self.entries.len()
    }


    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }


    pub fn entries(&self) -> &[CodeEntry<T>] {
        &self.entries
    }


    pub fn iter(&self) -> impl Iterator<Item = (&T, &str)> + '_ {
        self.entries.iter().map(|entry| (&entry.token, entry.code.as_str()))
    }


    /// A single token whose code is empty. Encoding has to special-case it
    pub fn is_degenerate(&self) -> bool {
        matches!(self.entries.as_slice(), [entry] if entry.code.is_empty())
    }


    pub fn max_code_len(&self) -> usize {
        self.entries.iter()
            .map(|entry| entry.code.len())
            .max()
            .unwrap_or(0)
    }


    /// No code is a prefix of another one
    pub fn is_prefix_free(&self) -> bool {

        let mut codes: Vec<&str> = self.entries.iter().map(|entry| entry.code.as_str()).collect();
        codes.sort_unstable();

        // In sorted order a prefix sits right before one of the codes it prefixes
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

}
