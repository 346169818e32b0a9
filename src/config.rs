
/// Longest token, in bytes, the reference token source produces
pub const MAX_TOKEN_LEN: usize = 4;


/// How a byte stream is cut into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Segmentation {

    /// Whitespace separates tokens and is dropped
    Words,
    /// Whitespace runs are tokens too, so the tokens concatenate back to the input
    #[default]
    Lossless,

}


/// What the encoder does with a token that has no code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodePolicy {

    /// Drop the token and keep going
    #[default]
    SkipUnknown,
    /// Fail with `TokenNotFound`
    Strict,

}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {

    pub max_token_len: usize,
    pub segmentation: Segmentation,
    pub encode_policy: EncodePolicy,

}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_token_len: MAX_TOKEN_LEN,
            segmentation: Segmentation::default(),
            encode_policy: EncodePolicy::default(),
        }
    }
}

impl Config {

    /// Zero is clamped to one, a token must hold at least one byte
    pub fn with_max_token_len(mut self, max_token_len: usize) -> Self {
        self.max_token_len = max_token_len.max(1);
        self
    }


    pub const fn with_segmentation(mut self, segmentation: Segmentation) -> Self {
        self.segmentation = segmentation;
        self
    }


    pub const fn with_encode_policy(mut self, encode_policy: EncodePolicy) -> Self {
        self.encode_policy = encode_policy;
        self
    }

}


#[cfg(test)]
mod tests {

    use super::*;


    #[test]
    fn defaults_match_reference_use() {

        let config = Config::default();

        assert_eq!(config.max_token_len, 4);
        assert_eq!(config.segmentation, Segmentation::Lossless);
        assert_eq!(config.encode_policy, EncodePolicy::SkipUnknown);
    }


    #[test]
    fn zero_token_len_is_clamped() {
        assert_eq!(Config::default().with_max_token_len(0).max_token_len, 1);
    }

}
