//! Forward-only token stream over raw script text.
//!
//! Tokens are whitespace-separated words, except that each of `{ } ( ) , ;` is
//! always a token of its own, even when it touches a neighbouring word. The
//! tokenizer never rejects input; classification happens at the point of use
//! by matching the next token against a [`TokenPattern`].

use regex::Regex;
use std::sync::LazyLock;

/// Characters that always form single-character tokens.
pub const PUNCTUATION: [char; 6] = ['{', '}', '(', ')', ',', ';'];

/// Optionally signed decimal integer literal.
pub static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("number pattern"));

/// Sigil-prefixed variable name.
pub static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$[A-Za-z][A-Za-z0-9]*$").expect("variable pattern"));

/// Something a single token can be tested against.
pub trait TokenPattern {
    fn matches(&self, token: &str) -> bool;
}

impl TokenPattern for str {
    fn matches(&self, token: &str) -> bool {
        self == token
    }
}

impl TokenPattern for [&str] {
    fn matches(&self, token: &str) -> bool {
        self.iter().any(|kw| *kw == token)
    }
}

impl TokenPattern for Regex {
    fn matches(&self, token: &str) -> bool {
        self.find(token).is_some_and(|m| m.start() == 0 && m.end() == token.len())
    }
}

#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    tokens: Vec<&'a str>,
    cursor: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            tokens: split_tokens(text),
            cursor: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.cursor < self.tokens.len()
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.cursor).copied()
    }

    /// True if there is a next token and it matches `pattern`. Consumes nothing.
    pub fn has_next_matching<P: TokenPattern + ?Sized>(&self, pattern: &P) -> bool {
        self.peek().is_some_and(|tok| pattern.matches(tok))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a str> {
        let tok = self.peek()?;
        self.cursor += 1;
        Some(tok)
    }

    /// Consume the next token if it matches `pattern`.
    pub fn gobble<P: TokenPattern + ?Sized>(&mut self, pattern: &P) -> bool {
        if self.has_next_matching(pattern) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Up to `n` unconsumed tokens, without consuming them.
    pub fn upcoming(&self, n: usize) -> Vec<String> {
        self.tokens[self.cursor..]
            .iter()
            .take(n)
            .map(|tok| (*tok).to_string())
            .collect()
    }

    /// Index of the next token.
    pub fn position(&self) -> usize {
        self.cursor
    }
}

fn split_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() || PUNCTUATION.contains(&ch) {
            if let Some(s) = start.take() {
                tokens.push(&text[s..i]);
            }
            if !ch.is_whitespace() {
                tokens.push(&text[i..i + ch.len_utf8()]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&text[s..]);
    }
    tokens
}
