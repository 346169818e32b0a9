use std::borrow::Borrow;
use std::fmt;
use std::io;

use crate::bitvec::BitVec;
use crate::code_table::CodeTable;
use crate::config::EncodePolicy;
use crate::error::{HuffmanError, Result};
use crate::token::Token;


const INITIAL_CAPACITY: usize = 512;

/// Stands in for the empty code of a single-token table, so every token still takes one bit
pub const DEGENERATE_CODE: &str = "0";


/// The concatenated codes of the encoded tokens, as '0' and '1' characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedOutput {

    bits: String,

}

impl EncodedOutput {

    pub fn as_str(&self) -> &str {
        &self.bits
    }


    pub fn len(&self) -> usize {
        self.bits.len()
    }


    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }


    pub fn into_string(self) -> String {
        self.bits
    }


    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.bytes().map(|byte| byte == b'1')
    }


    /// Eight bits per byte, see `BitVec::serialize` for the byte layout
    pub fn to_packed(&self) -> BitVec {

        let mut packed = BitVec::with_capacity(self.len());

        for bit in self.bits() {
            packed.append_bit(bit);
        }

        packed
    }


    /// Reads back the bytes of `BitVec::serialize`
    pub fn from_packed(bytes: &[u8]) -> Result<Self> {

        let packed = BitVec::deserialize(bytes)
            .ok_or(HuffmanError::InvalidPacking)?;

        Ok(Self {
            bits: packed.to_bit_string()
        })
    }


    /// Appends `code`, doubling the buffer when it is full
    fn push_code(&mut self, code: &str) -> Result<()> {

        let needed = self.bits.len() + code.len();

        if needed > self.bits.capacity() {

            let mut capacity = self.bits.capacity().max(INITIAL_CAPACITY);
            while capacity < needed {
                // Past usize::MAX / 2 only the exact length is asked for
                capacity = capacity.checked_mul(2).unwrap_or(needed);
            }

            let additional = capacity - self.bits.len();
            self.bits.try_reserve_exact(additional)
                .map_err(|_| HuffmanError::AllocationFailure { requested: additional })?;
        }

        self.bits.push_str(code);

        Ok(())
    }

}

impl fmt::Display for EncodedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bits)
    }
}

impl AsRef<str> for EncodedOutput {
    fn as_ref(&self) -> &str {
        &self.bits
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeStats {

    /// Tokens that had a code
    pub encoded: usize,
    /// Tokens dropped because they had no code
    pub skipped: usize,
    /// Length of the output
    pub bits: usize,

}


/// Turns a token stream into the concatenation of the tokens' codes.
///
/// Tokens missing from the code table are skipped by default, so the output only
/// describes the part of the stream drawn from the table's vocabulary.
/// `EncodePolicy::Strict` rejects them instead.
pub struct Encoder<'a, T> {

    table: &'a CodeTable<T>,
    policy: EncodePolicy,

}

impl<'a, T> Encoder<'a, T>
where
    T: Ord
{

    pub fn new(table: &'a CodeTable<T>) -> Self {
        Self {
            table,
            policy: EncodePolicy::default()
        }
    }


    pub fn with_policy(mut self, policy: EncodePolicy) -> Self {
        self.policy = policy;
        self
    }


    pub fn encode<I, S>(&self, tokens: I) -> Result<EncodedOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]> + Ord,
        T: Borrow<S>
    {
        self.encode_results(tokens.into_iter().map(Ok))
    }


    /// Encodes tokens straight from a fallible source such as a `TokenReader`
    pub fn encode_results<I, S>(&self, tokens: I) -> Result<EncodedOutput>
    where
        I: IntoIterator<Item = io::Result<S>>,
        S: AsRef<[u8]> + Ord,
        T: Borrow<S>
    {
        self.encode_with_stats(tokens).map(|(output, _)| output)
    }


    pub fn encode_with_stats<I, S>(&self, tokens: I) -> Result<(EncodedOutput, EncodeStats)>
    where
        I: IntoIterator<Item = io::Result<S>>,
        S: AsRef<[u8]> + Ord,
        T: Borrow<S>
    {
        let table = self.table;
        self.encode_by(tokens, |token: &S| table.code(token))
    }


    /// Looks every token up with `lookup`, appending its code or applying the policy when it has none
    fn encode_by<I, S, F>(&self, tokens: I, lookup: F) -> Result<(EncodedOutput, EncodeStats)>
    where
        I: IntoIterator<Item = io::Result<S>>,
        S: AsRef<[u8]>,
        F: Fn(&S) -> Option<&'a str>
    {
        let degenerate = self.table.is_degenerate();

        let mut output = EncodedOutput::default();
        let mut stats = EncodeStats::default();

        for token in tokens {
            let token = token?;

            match lookup(&token) {

                Some(code) => {
                    output.push_code(if degenerate { DEGENERATE_CODE } else { code })?;
                    stats.encoded += 1;
                },

                None if self.policy == EncodePolicy::Strict => {
                    return Err(HuffmanError::TokenNotFound {
                        token: String::from_utf8_lossy(token.as_ref()).into_owned()
                    });
                },

                None => {
                    log::trace!("skipping unknown token {:?}", String::from_utf8_lossy(token.as_ref()));
                    stats.skipped += 1;
                },
            }
        }

        stats.bits = output.len();

        if stats.skipped > 0 {
            log::warn!("skipped {} tokens missing from the code table", stats.skipped);
        }
        log::debug!("encoded {} tokens into {} bits", stats.encoded, stats.bits);

        Ok((output, stats))
    }

}

impl<'a> Encoder<'a, Token> {

    /// Encodes byte tokens in any form, e.g. slices borrowed from a buffer, against a table of owned tokens
    pub fn encode_bytes<I, B>(&self, tokens: I) -> Result<(EncodedOutput, EncodeStats)>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>
    {
        let table = self.table;
        self.encode_by(tokens.into_iter().map(Ok), |token: &B| table.code(token.as_ref()))
    }

}


#[cfg(test)]
mod tests {

    use crate::counter::FrequencyTable;
    use crate::tree::HuffmanTree;

    use super::*;


    const ANIMALS: [&str; 10] = ["a", "dog", "cat", "a", "bird", "dog", "a", "a", "cat", "dog"];


    fn table_for(tokens: &[&'static str]) -> CodeTable<&'static str> {
        let counts: FrequencyTable<&str> = tokens.iter().copied().collect();
        CodeTable::from_tree(&HuffmanTree::from_table(&counts).unwrap())
    }


    #[test]
    fn encodes_animals() {

        let table = table_for(&ANIMALS);

        let encoded = Encoder::new(&table).encode(ANIMALS).unwrap();

        let expected = ["0", "10", "111", "0", "110", "10", "0", "0", "111", "10"].concat();

        assert_eq!(encoded.as_str(), expected);
        assert_eq!(encoded.len(), 19);
    }


    #[test]
    fn unknown_tokens_are_skipped() {

        let table = table_for(&ANIMALS);

        let (encoded, stats) = Encoder::new(&table)
            .encode_with_stats(["a", "emu", "dog"].into_iter().map(Ok))
            .unwrap();

        assert_eq!(encoded.as_str(), "010");
        assert_eq!(stats, EncodeStats { encoded: 2, skipped: 1, bits: 3 });
    }


    #[test]
    fn strict_policy_rejects_unknown_tokens() {

        let table = table_for(&ANIMALS);

        let err = Encoder::new(&table)
            .with_policy(EncodePolicy::Strict)
            .encode(["a", "emu"])
            .unwrap_err();

        assert!(matches!(err, HuffmanError::TokenNotFound { ref token } if token == "emu"));
    }


    #[test]
    fn empty_stream_encodes_to_nothing() {

        let table = table_for(&ANIMALS);

        let encoded = Encoder::new(&table).encode(Vec::<&str>::new()).unwrap();

        assert!(encoded.is_empty());
    }


    #[test]
    fn single_token_uses_one_bit() {

        let table = table_for(&["x", "x", "x"]);

        let encoded = Encoder::new(&table).encode(["x", "x", "x"]).unwrap();

        assert_eq!(encoded.as_str(), "000");
    }


    #[test]
    fn output_doubles_past_initial_capacity() {

        let mut output = EncodedOutput::default();
        let mut capacities = Vec::new();

        for _ in 0..1000 {
            output.push_code("110").unwrap();

            if capacities.last() != Some(&output.bits.capacity()) {
                capacities.push(output.bits.capacity());
            }
        }

        assert_eq!(output.len(), 3000);
        assert_eq!(capacities, [512, 1024, 2048, 4096]);
    }


    #[test]
    fn long_streams_encode_fully() {

        let table = table_for(&ANIMALS);

        let tokens = std::iter::repeat("bird").take(1000);

        let encoded = Encoder::new(&table).encode(tokens).unwrap();

        assert_eq!(encoded.len(), 3000);
        assert!(encoded.as_str().chars().all(|c| c == '1' || c == '0'));
    }


    #[test]
    fn byte_slices_encode_against_owned_tokens() {

        let counts: FrequencyTable<Token> = ANIMALS.iter().map(|animal| animal.as_bytes().to_vec()).collect();
        let table = CodeTable::from_tree(&HuffmanTree::from_table(&counts).unwrap());

        let text = b"a dog emu bird";
        let tokens = text.split(|&byte| byte == b' ');

        let (encoded, stats) = Encoder::new(&table).encode_bytes(tokens).unwrap();

        assert_eq!(encoded.as_str(), "010110");
        assert_eq!(stats, EncodeStats { encoded: 3, skipped: 1, bits: 6 });
    }


    #[test]
    fn source_errors_propagate() {

        let table = table_for(&ANIMALS);

        let tokens = vec![Ok("a"), Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated"))];

        let err = Encoder::new(&table).encode_results(tokens).unwrap_err();

        assert!(matches!(err, HuffmanError::Io(_)));
    }


    #[test]
    fn packs_into_bytes() {

        let table = table_for(&ANIMALS);

        let encoded = Encoder::new(&table).encode(ANIMALS).unwrap();
        let packed = encoded.to_packed();

        assert_eq!(packed.len_bits(), 19);
        assert_eq!(packed.least_len_bytes(), 3);
        assert_eq!(packed.to_bit_string(), encoded.to_string());
    }


    #[test]
    fn unpacks_serialized_bytes() {

        let table = table_for(&ANIMALS);

        let encoded = Encoder::new(&table).encode(ANIMALS).unwrap();
        let bytes = encoded.to_packed().serialize();

        assert_eq!(EncodedOutput::from_packed(&bytes).unwrap(), encoded);

        assert!(matches!(EncodedOutput::from_packed(&[]), Err(HuffmanError::InvalidPacking)));
        assert!(matches!(EncodedOutput::from_packed(&[8, 0]), Err(HuffmanError::InvalidPacking)));
    }

}
