//! Words excluded from word-frequency counts

use std::collections::HashSet;

/// Common English function words
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Words that carry no topic in paper titles and abstracts
pub const DOMAIN_STOPWORDS: &[&str] = &["via", "propose", "proposed", "paper", "also"];

/// A stopword set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwords(HashSet<String>);

impl Stopwords {
    /// No stopwords; every word is counted
    pub fn empty() -> Self {
        Self::default()
    }

    /// The English list plus the domain list
    pub fn english() -> Self {
        ENGLISH_STOPWORDS
            .iter()
            .chain(DOMAIN_STOPWORDS)
            .map(|w| w.to_string())
            .collect()
    }

    pub fn with_extra<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(words.into_iter().map(|w| w.into().to_lowercase()));
        self
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for Stopwords {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_includes_domain_words() {
        let s = Stopwords::english();
        assert!(s.contains("the"));
        assert!(s.contains("proposed"));
        assert!(!s.contains("attention"));
    }

    #[test]
    fn extra_words_are_lowercased() {
        let s = Stopwords::empty().with_extra(["Transformer"]);
        assert!(s.contains("transformer"));
        assert_eq!(s.len(), 1);
    }
}
