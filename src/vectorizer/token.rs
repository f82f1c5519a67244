use std::iter::FusedIterator;

use indexmap::IndexMap;

use crate::vectorizer::stopwords::is_stop_word;

/// Lazy word tokenizer.
///
/// Yields maximal runs of ASCII letters, lowercased. Digits, punctuation,
/// whitespace and non-ASCII characters separate tokens and never appear in
/// the output. A clone continues independently from the same position, and
/// calling [`words`] again starts over.
///
/// # Examples
/// ```
/// use tf_idf_dedup::vectorizer::token::words;
/// let tokens: Vec<String> = words("iPhone 13 Pro-Max!").collect();
/// assert_eq!(tokens, vec!["iphone", "pro", "max"]);
/// ```
#[derive(Debug, Clone)]
pub struct Words<'a> {
    rest: &'a str,
}

/// Tokenize `text` into lowercase alphabetic words.
#[inline]
pub fn words(text: &str) -> Words<'_> {
    Words { rest: text }
}

/// Tokenize and drop English stopwords. This is what the vectorizer sees.
#[inline]
pub fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
    words(text).filter(|w| !is_stop_word(w))
}

impl<'a> Iterator for Words<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.rest.as_bytes();
        let start = bytes.iter().position(|b| b.is_ascii_alphabetic())?;
        let len = bytes[start..]
            .iter()
            .position(|b| !b.is_ascii_alphabetic())
            .unwrap_or(bytes.len() - start);
        // ASCII boundaries are always char boundaries
        let word = &self.rest[start..start + len];
        self.rest = &self.rest[start + len..];
        Some(word.to_ascii_lowercase())
    }
}

impl FusedIterator for Words<'_> {}

/// TokenFrequency
/// Counts how often each token occurs in one text.
/// Tokens keep first-seen order, so listings are stable.
///
/// # Examples
/// ```
/// use tf_idf_dedup::TokenFrequency;
/// let mut freq = TokenFrequency::new();
/// freq.add_token("apple").add_token("pie").add_token("apple");
/// assert_eq!(freq.token_count("apple"), 2);
/// assert_eq!(freq.token_sum(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenFrequency {
    token_count: IndexMap<String, u32>,
    total_token_count: u64,
}

impl TokenFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw word counts, stopwords kept.
    pub fn from_words(text: &str) -> Self {
        words(text).collect()
    }

    /// Term counts with stopwords removed.
    pub fn from_terms(text: &str) -> Self {
        terms(text).collect()
    }

    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        match self.token_count.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.token_count.insert(token.to_string(), 1);
            }
        }
        self.total_token_count += 1;
        self
    }

    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// Occurrences of `token`, 0 when absent.
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    #[inline]
    pub fn contains_token(&self, token: &str) -> bool {
        self.token_count.contains_key(token)
    }

    /// Total number of tokens counted (with repetition)
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    /// Number of distinct tokens
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.token_count.is_empty()
    }

    /// `(token, count)` in first-seen order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.token_count.iter().map(|(t, &c)| (t.as_str(), c))
    }
}

impl FromIterator<String> for TokenFrequency {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut freq = TokenFrequency::new();
        for token in iter {
            match freq.token_count.get_mut(&token) {
                Some(count) => *count += 1,
                None => {
                    freq.token_count.insert(token, 1);
                }
            }
            freq.total_token_count += 1;
        }
        freq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_non_letters_and_lowercases() {
        let tokens: Vec<String> = words("Hello, WORLD! abc123def  x_y").collect();
        assert_eq!(tokens, vec!["hello", "world", "abc", "def", "x", "y"]);
    }

    #[test]
    fn numbers_and_symbols_never_appear() {
        let tokens: Vec<String> = words("42 3.14 $%& --").collect();
        assert!(tokens.is_empty());
    }

    #[test]
    fn non_ascii_letters_are_separators() {
        let tokens: Vec<String> = words("café naïve").collect();
        assert_eq!(tokens, vec!["caf", "na", "ve"]);
    }

    #[test]
    fn empty_input_is_empty_sequence() {
        assert_eq!(words("").count(), 0);
        assert_eq!(words("   ").count(), 0);
    }

    #[test]
    fn sequence_is_restartable() {
        let it = words("one two");
        let first: Vec<String> = it.clone().collect();
        let second: Vec<String> = it.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn terms_drop_stopwords() {
        let tokens: Vec<String> = terms("The red apple and the green one").collect();
        assert_eq!(tokens, vec!["red", "apple", "green"]);
    }

    #[test]
    fn frequency_keeps_first_seen_order() {
        let freq = TokenFrequency::from_words("b a b c a b");
        let listed: Vec<(&str, u32)> = freq.iter().collect();
        assert_eq!(listed, vec![("b", 3), ("a", 2), ("c", 1)]);
        assert_eq!(freq.token_sum(), 6);
        assert_eq!(freq.token_num(), 3);
        assert_eq!(freq.token_count("z"), 0);
    }

    #[test]
    fn add_tokens_counts_repeats() {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(&["x", "y", "x"]);
        assert_eq!(freq.token_count("x"), 2);
        assert!(freq.contains_token("y"));
        assert_eq!(freq.iter().map(|(t, _)| t).collect::<Vec<_>>(), vec!["x", "y"]);
    }
}
