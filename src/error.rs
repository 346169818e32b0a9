use std::io;

use thiserror::Error;


/// Everything that can go wrong while building, encoding or decoding.
#[derive(Error, Debug)]
pub enum HuffmanError {

    /// There were no tokens to build a tree from
    #[error("cannot build a Huffman tree from an empty token set")]
    EmptyInput,

    /// The encoded output buffer could not grow
    #[error("could not allocate {requested} more bytes for the encoded output")]
    AllocationFailure { requested: usize },

    /// The encoded string contains a byte other than '0' or '1'
    #[error("invalid character {:?} at position {} of the encoding", as_char(.byte), .position)]
    InvalidCharacter { byte: u8, position: usize },

    /// A bit leads nowhere in the tree.
    /// Only possible on single-leaf trees, where '1' has no meaning
    #[error("bit at position {position} does not lead to any token")]
    InvalidCode { position: usize },

    /// Packed bytes whose padding header is missing or larger than a byte
    #[error("packed encoding has no valid padding header")]
    InvalidPacking,

    /// Strict encoding met a token the tree was not built from
    #[error("token {token:?} is not part of the code table")]
    TokenNotFound { token: String },

    /// The token source or output sink failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

}


pub type Result<T> = std::result::Result<T, HuffmanError>;


fn as_char(byte: &u8) -> char {
    char::from(*byte)
}
