use std::collections::{BTreeMap, HashMap};

use rand::Rng;
use rand::prelude::IteratorRandom;
use rs_markov_core::{ngram_key, DictionaryStore};

/// Splits text into sentences after `.`, `?` or `!` followed by whitespace.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if matches!(c, '.' | '?' | '!') {
            if let Some((next, n)) = chars.peek() {
                if n.is_whitespace() {
                    sentences.push(text[start..*next].trim());
                    start = *next;
                }
            }
        }
    }
    sentences.push(text[start..].trim());
    sentences.retain(|s| !s.is_empty());
    sentences
}

/// Splits a sentence on whitespace, keeping terminal punctuation as its own token.
pub fn tokenize(sentence: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for word in sentence.split_whitespace() {
        match word.char_indices().last() {
            Some((i, c)) if i > 0 && matches!(c, '.' | '?' | '!') => {
                tokens.push(word[..i].to_owned());
                tokens.push(c.to_string());
            }
            _ => tokens.push(word.to_owned()),
        }
    }
    tokens
}

/// Feeds a text into the store's dictionary.
///
/// - Words capitalized anywhere but at the start of a sentence are recorded once
/// - Tokens are lowercased before being counted
/// - Each window of `depth` tokens counts one transition to the following token
pub fn add_text(store: &mut DictionaryStore, text: &str) {
    let depth = store.depth();

    for sentence in split_sentences(text) {
        let tokens = tokenize(sentence);

        for token in tokens.iter().skip(1) {
            let capitalized = token.chars().next().is_some_and(char::is_uppercase);
            if capitalized && !store.capitalized_words().contains(token) {
                store.capitalized_words_mut().push(token.clone());
            }
        }

        let tokens: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        for window in tokens.windows(depth + 1) {
            let key = ngram_key(&window[..depth]);
            *store
                .dictionary_mut()
                .entry(key)
                .or_default()
                .entry(window[depth].clone())
                .or_insert(0) += 1;
        }
    }
}

/// Picks the next token proportionally to its count.
///
/// Counts are summed as `u128` so that any `u64` counts fit.
fn weighted_next<R: Rng>(transitions: &BTreeMap<String, u64>, rng: &mut R) -> Option<String> {
    let total: u128 = transitions.values().map(|&count| u128::from(count)).sum();
    if total == 0 {
        return None;
    }

    let mut r = rng.random_range(0..total);
    for (token, &count) in transitions {
        let count = u128::from(count);
        if r < count {
            return Some(token.clone());
        }
        r -= count;
    }
    None
}

/// Generates one sentence of at most `max_words` tokens.
///
/// Starts from a random key and follows weighted transitions until a
/// terminal punctuation token, an unknown key, or the word limit.
pub fn generate<R: Rng>(store: &DictionaryStore, max_words: usize, rng: &mut R) -> Option<String> {
    let depth = store.depth();
    let dictionary = store.dictionary();

    let seed = dictionary.keys().choose(rng)?;
    let mut tokens: Vec<String> = seed.split(' ').map(str::to_owned).collect();

    while tokens.len() < max_words {
        let key = ngram_key(&tokens[tokens.len().saturating_sub(depth)..]);
        let Some(next) = dictionary.get(&key).and_then(|t| weighted_next(t, rng)) else {
            break;
        };
        let done = matches!(next.as_str(), "." | "?" | "!");
        tokens.push(next);
        if done {
            break;
        }
    }

    Some(restore_capitalization(&tokens, store.capitalized_words()))
}

/// Rebuilds a sentence from lowercase tokens.
fn restore_capitalization(tokens: &[String], capitalized_words: &[String]) -> String {
    let lookup: HashMap<String, &str> = capitalized_words
        .iter()
        .map(|w| (w.to_lowercase(), w.as_str()))
        .collect();

    let mut sentence = String::new();
    for (i, token) in tokens.iter().enumerate() {
        let word = match lookup.get(token) {
            Some(w) => (*w).to_owned(),
            None if i == 0 => {
                let mut chars = token.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
            None => token.clone(),
        };
        if i > 0 && !matches!(word.as_str(), "." | "?" | "!") {
            sentence.push(' ');
        }
        sentence.push_str(&word);
    }
    sentence
}
