use std::io::Write;
use std::ptr;

use crate::error::{HuffmanError, Result};
use crate::tree::{HuffmanTree, Node};


/// Walks the tree once per token: '0' goes left, '1' goes right, and reaching a leaf
/// yields its token and starts over from the root.
///
/// Stops for good at the first byte that is not '0' or '1'. A code left unfinished at the
/// end of the input is dropped, see `is_incomplete`.
pub struct Decoder<'a, T> {

    tree: &'a HuffmanTree<T>,
    encoding: &'a [u8],
    position: usize,
    current: &'a Node<T>,
    failed: bool,

}

impl<'a, T> Decoder<'a, T> {

    pub fn new(tree: &'a HuffmanTree<T>, encoding: &'a str) -> Self {
        Self {
            tree,
            encoding: encoding.as_bytes(),
            position: 0,
            current: tree.root(),
            failed: false,
        }
    }


    /// Bytes of the encoding consumed so far
    pub const fn position(&self) -> usize {
        self.position
    }


    /// True once the input ran out in the middle of a code
    pub fn is_incomplete(&self) -> bool {
        self.position >= self.encoding.len() && !ptr::eq(self.current, self.tree.root())
    }


    fn fail(&mut self, err: HuffmanError) -> Option<Result<&'a T>> {
        self.failed = true;
        Some(Err(err))
    }

}

impl<'a, T> Iterator for Decoder<'a, T> {
    type Item = Result<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {

        if self.failed {
            return None;
        }

        let root = self.tree.root();

        while let Some(&byte) = self.encoding.get(self.position) {

            let position = self.position;
            self.position += 1;

            let next = match (byte, self.current) {

                (b'0', Node::Internal { left, .. }) => left.as_ref(),
                (b'1', Node::Internal { right, .. }) => right.as_ref(),

                // Only a single-leaf root is ever current, each '0' stands for its token
                (b'0', Node::Leaf { token, .. }) => return Some(Ok(token)),
                (b'1', Node::Leaf { .. }) => return self.fail(HuffmanError::InvalidCode { position }),

                _ => return self.fail(HuffmanError::InvalidCharacter { byte, position }),
            };

            if let Node::Leaf { token, .. } = next {
                self.current = root;
                return Some(Ok(token));
            }

            self.current = next;
        }

        None
    }
}


/// Writes every decoded token to `sink` as soon as it is reached, without separators.
///
/// Returns how many tokens were written. On error the tokens already written stay written.
pub fn decode<T, W>(tree: &HuffmanTree<T>, encoding: &str, sink: &mut W) -> Result<usize>
where
    T: AsRef<[u8]>,
    W: Write + ?Sized
{
    let mut decoder = Decoder::new(tree, encoding);
    let mut written = 0;

    for token in decoder.by_ref() {
        sink.write_all(AsRef::<[u8]>::as_ref(token?))?;
        written += 1;
    }

    sink.flush()?;

    if decoder.is_incomplete() {
        log::warn!("encoding ends in the middle of a code, trailing bits dropped");
    }
    log::debug!("decoded {} tokens from {} bits", written, encoding.len());

    Ok(written)
}


pub fn decode_to_vec<T>(tree: &HuffmanTree<T>, encoding: &str) -> Result<Vec<T>>
where
    T: Clone
{
    Decoder::new(tree, encoding)
        .map(|token| token.cloned())
        .collect()
}
