//! Type-safe wrappers for variables and truth values.
//!
//! This module provides newtypes that keep single-letter variable names apart
//! from arbitrary characters, and the three-valued [`Bit`] used by implicants
//! during minimization.
use std::collections::BTreeMap;
use std::fmt;

/// A propositional variable, named by a single ASCII letter.
///
/// Variables are ordered by their name; this ordering defines the column order
/// of truth tables and the literal order inside synthesized terms.
///
/// # Invariants
///
/// - The name is an ASCII alphabetic character.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(char);

impl Var {
    /// Creates a new variable with the given name.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not an ASCII letter.
    pub fn new(name: char) -> Self {
        assert!(name.is_ascii_alphabetic(), "Variable names must be ASCII letters, got {:?}", name);
        Var(name)
    }

    /// Creates a variable from the first character of a lexeme, if it is a letter.
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        let mut chars = lexeme.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Some(Var(c)),
            _ => None,
        }
    }

    /// Returns the variable name.
    pub fn name(self) -> char {
        self.0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Var> for char {
    fn from(var: Var) -> Self {
        var.0
    }
}

/// A mapping from variables to their values for one evaluation.
pub type Assignment = BTreeMap<Var, bool>;

/// Builds an [`Assignment`] from `(name, value)` pairs.
///
/// # Panics
///
/// Panics if any name is not an ASCII letter.
pub fn assignment<I>(pairs: I) -> Assignment
where
    I: IntoIterator<Item = (char, bool)>,
{
    pairs.into_iter().map(|(name, value)| (Var::new(name), value)).collect()
}

/// One position of an implicant: a fixed value or "don't care".
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Bit {
    Zero,
    One,
    DontCare,
}

impl Bit {
    /// Returns `true` for [`Bit::One`].
    pub fn is_one(self) -> bool {
        self == Bit::One
    }

    /// Returns `true` for [`Bit::DontCare`].
    pub fn is_dont_care(self) -> bool {
        self == Bit::DontCare
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Bit::Zero => '0',
            Bit::One => '1',
            Bit::DontCare => '-',
        };
        write!(f, "{}", c)
    }
}
