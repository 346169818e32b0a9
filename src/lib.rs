//! # token_huffman
//!
//! Static Huffman coding of token streams.
//!
//! One pass over the input counts every distinct token, the counts seed a Huffman tree, and
//! the tree yields a prefix-free code per token. Encoding concatenates the codes as a string
//! of '0' and '1'; decoding walks the same tree back to the tokens.
//!
//! ```rust
//! use token_huffman::{CodeTable, Encoder, FrequencyTable, HuffmanTree, decode_to_vec};
//!
//! let tokens = ["a", "dog", "cat", "a", "bird", "dog", "a", "a", "cat", "dog"];
//!
//! let counts: FrequencyTable<&str> = tokens.into_iter().collect();
//! let tree = HuffmanTree::from_table(&counts)?;
//! let table = CodeTable::from_tree(&tree);
//!
//! let encoded = Encoder::new(&table).encode(tokens)?;
//! assert_eq!(decode_to_vec(&tree, encoded.as_str())?, tokens);
//! # Ok::<(), token_huffman::HuffmanError>(())
//! ```

pub mod bitvec;
pub mod code_table;
pub mod config;
pub mod counter;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod token;
pub mod tree;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub use code_table::{CodeEntry, CodeTable};
pub use config::{Config, EncodePolicy, Segmentation, MAX_TOKEN_LEN};
pub use counter::FrequencyTable;
pub use decoder::{decode, decode_to_vec, Decoder};
pub use encoder::{EncodeStats, EncodedOutput, Encoder};
pub use error::{HuffmanError, Result};
pub use token::{Token, TokenReader};
pub use tree::{HuffmanTree, Node};


/// Counts the tokens of a file and builds their tree
pub fn create_tree_from_file<P>(path: P, config: &Config) -> Result<HuffmanTree<Token>>
where
    P: AsRef<Path>
{
    let reader = TokenReader::open(path, config)?;
    let counts = FrequencyTable::from_reader(reader)?;

    HuffmanTree::from_table(&counts)
}


/// Reads the file again and encodes it with the codes of `tree`
pub fn encode_file<P>(tree: &HuffmanTree<Token>, path: P, config: &Config) -> Result<(EncodedOutput, EncodeStats)>
where
    P: AsRef<Path>
{
    let table = CodeTable::from_tree(tree);
    let reader = TokenReader::open(path, config)?;

    Encoder::new(&table)
        .with_policy(config.encode_policy)
        .encode_with_stats(reader)
}


/// Decodes `encoding` into a newly created file, returns how many tokens were written
pub fn decode_to_file<P>(tree: &HuffmanTree<Token>, encoding: &str, path: P) -> Result<usize>
where
    P: AsRef<Path>
{
    let mut out = BufWriter::new(File::create(path)?);

    decode(tree, encoding, &mut out)
}
