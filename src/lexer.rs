//! Pattern-table driven tokenizer.
//!
//! A [`Lexer`] owns an ordered list of regular expressions, each with an
//! optional tag. At every position the patterns are tried in declared order
//! and the first one that matches wins; a pattern without a tag (whitespace)
//! consumes its match without producing a token.
//!
//! [`lex`] tokenizes propositional formulas with the built-in table:
//!
//! ```
//! use boolcalc_rs::lexer::{lex, Tag, Token};
//!
//! let tokens = lex("a & b").unwrap();
//! assert_eq!(
//!     tokens,
//!     vec![
//!         Token::new("a", Tag::Variable),
//!         Token::new("&", Tag::Operator),
//!         Token::new("b", Tag::Variable),
//!     ]
//! );
//! ```

use std::fmt;
use std::sync::OnceLock;

use log::trace;
use regex::Regex;

use crate::error::LexError;

/// Token category of the propositional language.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Tag {
    Operator,
    Constant,
    Variable,
}

/// A lexeme together with its tag.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Token<K = Tag> {
    pub lexeme: String,
    pub tag: K,
}

impl<K> Token<K> {
    pub fn new(lexeme: impl Into<String>, tag: K) -> Self {
        Self {
            lexeme: lexeme.into(),
            tag,
        }
    }
}

impl<K: fmt::Debug> fmt::Display for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.lexeme, self.tag)
    }
}

#[derive(Debug)]
pub struct Lexer<K> {
    patterns: Vec<(Regex, Option<K>)>,
}

impl<K: Copy + fmt::Debug> Lexer<K> {
    /// Compiles the pattern table.
    ///
    /// Each pattern is anchored at the current position, so `"->"` only
    /// matches when the remaining input starts with it.
    pub fn new<'p, I>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = (&'p str, Option<K>)>,
    {
        let patterns = patterns
            .into_iter()
            .map(|(pattern, tag)| Ok((Regex::new(&format!(r"\A(?:{})", pattern))?, tag)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { patterns })
    }

    /// Returns the number of patterns in the table.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Splits `text` into tokens, left to right.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token<K>>, LexError> {
        let mut tokens = Vec::new();
        let mut offset = 0;

        while offset < text.len() {
            let rest = &text[offset..];
            let matched = self.patterns.iter().find_map(|(regex, tag)| {
                regex
                    .find(rest)
                    .filter(|m| !m.is_empty())
                    .map(|m| (m.end(), *tag))
            });

            let Some((end, tag)) = matched else {
                let character = rest.chars().next().expect("offset is inside the input");
                let position = text[..offset].chars().count();
                return Err(LexError { character, position });
            };

            if let Some(tag) = tag {
                let token = Token::new(&rest[..end], tag);
                trace!("lex: {} at byte {}", token, offset);
                tokens.push(token);
            }
            offset += end;
        }

        Ok(tokens)
    }
}

/// Token patterns of the propositional language, in match order.
///
/// Longer operators come before their prefixes (`<->`, `->` before `-`), and
/// the OR symbol `V` comes before the variable class, so `V` never names a
/// variable.
pub const PATTERNS: &[(&str, Option<Tag>)] = &[
    (r"[ \t\r\n]+", None),
    (r"<->", Some(Tag::Operator)),
    (r"->", Some(Tag::Operator)),
    (r"-", Some(Tag::Operator)),
    (r"[&*]", Some(Tag::Operator)),
    (r"/", Some(Tag::Operator)),
    (r"[V+]", Some(Tag::Operator)),
    (r"!", Some(Tag::Operator)),
    (r"\^", Some(Tag::Operator)),
    (r"[()]", Some(Tag::Operator)),
    (r"[01]", Some(Tag::Constant)),
    (r"[A-Za-z]", Some(Tag::Variable)),
];

fn boolean_lexer() -> &'static Lexer<Tag> {
    static LEXER: OnceLock<Lexer<Tag>> = OnceLock::new();
    LEXER.get_or_init(|| {
        Lexer::new(PATTERNS.iter().copied()).expect("built-in token patterns are valid regular expressions")
    })
}

/// Tokenizes a propositional formula.
pub fn lex(text: &str) -> Result<Vec<Token>, LexError> {
    boolean_lexer().tokenize(text)
}
