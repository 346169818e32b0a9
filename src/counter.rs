use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::io::{self, BufRead};

use crate::token::{Token, TokenReader};


/// Tallies how often each distinct token occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<T> {

    counts: BTreeMap<T, usize>,

}

impl<T> Default for FrequencyTable<T> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new()
        }
    }
}

impl<T> FrequencyTable<T>
where
    T: Ord
{

    pub fn new() -> Self {
        Self::default()
    }


    pub fn add(&mut self, token: T) {
        self.counts.entry(token)
            .and_modify(|counter| *counter += 1)
            .or_insert(1);
    }


    /// Occurrences of `token`, zero when it was never added
    pub fn get<Q>(&self, token: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized
    {
        self.counts.get(token).copied().unwrap_or(0)
    }


    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }


    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }


    /// Number of tokens added, duplicates included
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }


    /// `(token, count)` pairs in ascending token order
    pub fn items(&self) -> impl Iterator<Item = (&T, usize)> + '_ {
        self.counts.iter().map(|(token, &count)| (token, count))
    }

}

impl FrequencyTable<Token> {

    pub fn from_reader<R>(reader: TokenReader<R>) -> io::Result<Self>
    where
        R: BufRead
    {
        let mut table = Self::new();

        for token in reader {
            table.add(token?);
        }

        log::debug!("counted {} tokens, {} distinct", table.total(), table.len());

        Ok(table)
    }

}

impl<T> Extend<T> for FrequencyTable<T>
where
    T: Ord
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for token in iter {
            self.add(token);
        }
    }
}

impl<T> FromIterator<T> for FrequencyTable<T>
where
    T: Ord
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}


#[cfg(test)]
mod tests {

    use std::io::Cursor;

    use crate::config::{Config, Segmentation};

    use super::*;


    const ANIMALS: [&str; 10] = ["a", "dog", "cat", "a", "bird", "dog", "a", "a", "cat", "dog"];


    #[test]
    fn counts_distinct_tokens() {

        let table: FrequencyTable<&str> = ANIMALS.into_iter().collect();

        assert_eq!(table.len(), 4);
        assert_eq!(table.total(), 10);
        assert_eq!(table.get(&"a"), 4);
        assert_eq!(table.get(&"bird"), 1);
        assert_eq!(table.get(&"cat"), 2);
        assert_eq!(table.get(&"dog"), 3);
        assert_eq!(table.get(&"emu"), 0);
    }


    #[test]
    fn items_are_sorted_by_token() {

        let table: FrequencyTable<&str> = ANIMALS.into_iter().collect();

        let items: Vec<(&str, usize)> = table.items().map(|(t, c)| (*t, c)).collect();

        assert_eq!(items, [("a", 4), ("bird", 1), ("cat", 2), ("dog", 3)]);
    }


    #[test]
    fn empty_table() {

        let table = FrequencyTable::<&str>::new();

        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.get(&"a"), 0);
    }


    #[test]
    fn empty_token_is_a_key() {

        let mut table = FrequencyTable::new();
        table.add("");

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&""), 1);
    }


    #[test]
    fn case_sensitive_keys() {

        let table: FrequencyTable<&str> = ["Dog", "dog", "dog"].into_iter().collect();

        assert_eq!(table.get(&"Dog"), 1);
        assert_eq!(table.get(&"dog"), 2);
    }


    #[test]
    fn repeated_token() {

        let table: FrequencyTable<&str> = std::iter::repeat("repeated").take(100).collect();

        assert_eq!(table.get(&"repeated"), 100);
    }


    #[test]
    fn counts_from_reader() {

        let config = Config::default().with_segmentation(Segmentation::Words);
        let reader = TokenReader::new(Cursor::new(&b"a dog cat a\nbird dog a a cat dog"[..]), &config);

        let table = FrequencyTable::from_reader(reader).unwrap();

        assert_eq!(table.get(&b"a"[..]), 4);
        assert_eq!(table.get(&b"dog"[..]), 3);
        assert_eq!(table.total(), 10);
    }

}
