use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::config::{Config, Segmentation};


/// A token as read from a byte stream
pub type Token = Vec<u8>;


/// Cuts a byte stream into tokens of at most `max_token_len` bytes.
///
/// The reader is consumed as tokens are requested and cannot be rewound;
/// open the source again to read it twice.
pub struct TokenReader<R> {

    reader: R,
    max_token_len: usize,
    segmentation: Segmentation,
    /// Set after an I/O error so iteration ends
    failed: bool,

}

impl TokenReader<BufReader<File>> {

    pub fn open<P>(path: P, config: &Config) -> io::Result<Self>
    where
        P: AsRef<Path>
    {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), config))
    }

}

impl<R> TokenReader<R>
where
    R: BufRead
{

    pub fn new(reader: R, config: &Config) -> Self {
        Self {
            reader,
            max_token_len: config.max_token_len.max(1),
            segmentation: config.segmentation,
            failed: false,
        }
    }


    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.reader.fill_buf()?.first().copied())
    }


    /// Reads bytes of the same whitespace class as `first` until the token is full.
    fn take_run(&mut self, first: u8) -> io::Result<Token> {

        let whitespace = first.is_ascii_whitespace();

        let mut token = Vec::with_capacity(self.max_token_len);
        token.push(first);
        self.reader.consume(1);

        while token.len() < self.max_token_len {
            match self.peek_byte()? {
                Some(byte) if byte.is_ascii_whitespace() == whitespace => {
                    token.push(byte);
                    self.reader.consume(1);
                },
                _ => break
            }
        }

        Ok(token)
    }


    pub fn read_next_token(&mut self) -> io::Result<Option<Token>> {

        loop {
            let Some(byte) = self.peek_byte()? else {
                return Ok(None);
            };

            if self.segmentation == Segmentation::Words && byte.is_ascii_whitespace() {
                self.reader.consume(1);
                continue;
            }

            return self.take_run(byte).map(Some);
        }
    }

}

impl<R> Iterator for TokenReader<R>
where
    R: BufRead
{
    type Item = io::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {

        if self.failed {
            return None;
        }

        match self.read_next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}


#[cfg(test)]
mod tests {

    use std::io::Cursor;

    use crate::config::MAX_TOKEN_LEN;

    use super::*;


    fn tokens(text: &str, config: &Config) -> Vec<String> {
        TokenReader::new(Cursor::new(text.as_bytes()), config)
            .map(|token| String::from_utf8(token.unwrap()).unwrap())
            .collect()
    }


    #[test]
    fn words_drop_whitespace() {

        let config = Config::default().with_segmentation(Segmentation::Words);

        assert_eq!(tokens("a dog\n cat", &config), ["a", "dog", "cat"]);
    }


    #[test]
    fn long_words_are_chunked() {

        let config = Config::default().with_segmentation(Segmentation::Words);

        assert_eq!(tokens("elephant bird", &config), ["elep", "hant", "bird"]);
    }


    #[test]
    fn lossless_keeps_every_byte() {

        let text = "the   quick\tbrown  \n\n fox";

        let toks = tokens(text, &Config::default());

        assert!(toks.iter().all(|t| !t.is_empty() && t.len() <= MAX_TOKEN_LEN));
        assert_eq!(toks.concat(), text);
        assert_eq!(&toks[..4], ["the", "   ", "quic", "k"]);
    }


    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokens("", &Config::default()).is_empty());
        assert!(tokens(" \n\t", &Config::default().with_segmentation(Segmentation::Words)).is_empty());
    }


    #[test]
    fn custom_token_length() {

        let config = Config::default().with_max_token_len(1);

        assert_eq!(tokens("ab c", &config), ["a", "b", " ", "c"]);
    }


    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }


    #[test]
    fn read_errors_end_iteration() {

        let mut reader = TokenReader::new(BufReader::new(FailingReader), &Config::default());

        assert!(matches!(reader.next(), Some(Err(_))));
        assert!(reader.next().is_none());
    }

}
