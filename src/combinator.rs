//! Parser combinators over token streams.
//!
//! A [`Parser`] looks at a slice of [`Token`]s starting at some position and
//! either produces a value together with the position just past what it
//! consumed, or `None`. Combinators never fail loudly: a missing match is just
//! `None`, and only the caller of the outermost parser (usually wrapped in a
//! [`Phrase`]) decides whether that is an error.
//!
//! The engine knows nothing about any particular language; grammars are built
//! by composing the pieces below:
//!
//! | combinator                | succeeds when                                  | yields                 |
//! |---------------------------|------------------------------------------------|------------------------|
//! | [`Tagged`]                | next token has the tag                         | lexeme                 |
//! | [`Reserved`]              | next token has the tag and the exact lexeme    | lexeme                 |
//! | [`Concatenate`]           | both parsers succeed in sequence               | pair of results        |
//! | [`Alternative`]           | first succeeds, or else the second             | either result          |
//! | [`Map`]                   | inner succeeds                                 | `f(result)`            |
//! | [`FilterMap`]             | inner succeeds and `f` returns `Some`          | `f(result)` unwrapped  |
//! | [`Lazy`]                  | the parser built on first use succeeds         | its result             |
//! | [`Phrase`]                | inner succeeds and consumes every token        | its result             |
//! | [`LeftAssociativeFold`]   | one value parses                               | values folded by ops   |
//! | [`Optional`]              | always                                         | `Option` of result     |
//! | [`Repeat`]                | always                                         | `Vec` of results       |

use std::cell::OnceCell;
use std::rc::Rc;

use crate::lexer::Token;

/// A successful parse: the value and the position after it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub position: usize,
}

impl<T> Parsed<T> {
    pub fn new(value: T, position: usize) -> Self {
        Self { value, position }
    }
}

pub trait Parser<K> {
    type Output;

    fn parse(&self, tokens: &[Token<K>], position: usize) -> Option<Parsed<Self::Output>>;

    /// Sequence: `self` then `next`.
    fn then<P>(self, next: P) -> Concatenate<Self, P>
    where
        Self: Sized,
        P: Parser<K>,
    {
        Concatenate { left: self, right: next }
    }

    /// Ordered choice: `self`, or `other` if `self` fails.
    fn or<P>(self, other: P) -> Alternative<Self, P>
    where
        Self: Sized,
        P: Parser<K, Output = Self::Output>,
    {
        Alternative { left: self, right: other }
    }

    /// Transform the result.
    fn map<F, B>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> B,
    {
        Map { parser: self, f }
    }

    /// Transform the result, failing when `f` returns `None`.
    fn filter_map<F, B>(self, f: F) -> FilterMap<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> Option<B>,
    {
        FilterMap { parser: self, f }
    }

    /// Left-associative infix chain of `self` separated by `operator`.
    fn fold_left<P>(self, operator: P) -> LeftAssociativeFold<Self, P>
    where
        Self: Sized,
        P: Parser<K>,
        P::Output: FnOnce(Self::Output, Self::Output) -> Self::Output,
    {
        LeftAssociativeFold { value: self, operator }
    }

    /// Erase the concrete combinator type.
    fn boxed<'a>(self) -> BoxedParser<'a, K, Self::Output>
    where
        Self: Sized + 'a,
    {
        BoxedParser(Rc::new(self))
    }
}

impl<K, P> Parser<K> for &P
where
    P: Parser<K> + ?Sized,
{
    type Output = P::Output;

    fn parse(&self, tokens: &[Token<K>], position: usize) -> Option<Parsed<Self::Output>> {
        (**self).parse(tokens, position)
    }
}

/// A type-erased, cheaply clonable parser.
pub struct BoxedParser<'a, K, O>(Rc<dyn Parser<K, Output = O> + 'a>);

impl<K, O> Clone for BoxedParser<'_, K, O> {
    fn clone(&self) -> Self {
        BoxedParser(Rc::clone(&self.0))
    }
}

impl<K, O> BoxedParser<'_, K, O> {
    /// Returns `true` if both handles share the same parser.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<K, O> Parser<K> for BoxedParser<'_, K, O> {
    type Output = O;

    fn parse(&self, tokens: &[Token<K>], position: usize) -> Option<Parsed<O>> {
        self.0.parse(tokens, position)
    }
}

/// Consumes one token with the given tag.
#[derive(Debug, Clone)]
pub struct Tagged<K> {
    tag: K,
}

pub fn tagged<K>(tag: K) -> Tagged<K> {
    Tagged { tag }
}

impl<K: PartialEq> Parser<K> for Tagged<K> {
    type Output = String;

    fn parse(&self, tokens: &[Token<K>], position: usize) -> Option<Parsed<String>> {
        let token = tokens.get(position)?;
        (token.tag == self.tag).then(|| Parsed::new(token.lexeme.clone(), position + 1))
    }
}

/// Consumes one token with the given tag and lexeme.
#[derive(Debug, Clone)]
pub struct Reserved<K> {
    lexeme: String,
    tag: K,
}

pub fn reserved<K>(lexeme: impl Into<String>, tag: K) -> Reserved<K> {
    Reserved {
        lexeme: lexeme.into(),
        tag,
    }
}

impl<K: PartialEq> Parser<K> for Reserved<K> {
    type Output = String;

    fn parse(&self, tokens: &[Token<K>], position: usize) -> Option<Parsed<String>> {
        let token = tokens.get(position)?;
        (token.tag == self.tag && token.lexeme == self.lexeme).then(|| Parsed::new(token.lexeme.clone(), position + 1))
    }
}

#[derive(Debug, Clone)]
pub struct Concatenate<A, B> {
    left: A,
    right: B,
}

impl<K, A, B> Parser<K> for Concatenate<A, B>
where
    A: Parser<K>,
    B: Parser<K>,
{
    type Output = (A::Output, B::Output);

    fn parse(&self, tokens: &[Token<K>], position: usize) -> Option<Parsed<Self::Output>> {
        let left = self.left.parse(tokens, position)?;
        let right = self.right.parse(tokens, left.position)?;
        Some(Parsed::new((left.value, right.value), right.position))
    }
}

#[derive(Debug, Clone)]
pub struct Alternative<A, B> {
    left: A,
    right: B,
}

impl<K, A, B> Parser<K> for Alternative<A, B>
where
    A: Parser<K>,
    B: Parser<K, Output = A::Output>,
{
    type Output = A::Output;

    fn parse(&self, tokens: &[Token<K>], position: usize) -> Option<Parsed<Self::Output>> {
        self.left
            .parse(tokens, position)
            .or_else(|| self.right.parse(tokens, position))
    }
}

#[derive(Clone)]
pub struct Map<P, F> {
    parser: P,
    f: F,
}

impl<K, P, F, B> Parser<K> for Map<P, F>
where
    P: Parser<K>,
    F: Fn(P::Output) -> B,
{
    type Output = B;

    fn parse(&self, tokens: &[Token<K>], position: usize) -> Option<Parsed<B>> {
        let Parsed { value, position } = self.parser.parse(tokens, position)?;
        Some(Parsed::new((self.f)(value), position))
    }
}

#[derive(Clone)]
pub struct FilterMap<P, F> {
    parser: P,
    f: F,
}

impl<K, P, F, B> Parser<K> for FilterMap<P, F>
where
    P: Parser<K>,
    F: Fn(P::Output) -> Option<B>,
{
    type Output = B;

    fn parse(&self, tokens: &[Token<K>], position: usize) -> Option<Parsed<B>> {
        let Parsed { value, position } = self.parser.parse(tokens, position)?;
        (self.f)(value).map(|value| Parsed::new(value, position))
    }
}

/// Defers building a parser until it is first used.
///
/// A rule that refers to itself (directly or through other rules) wraps the
/// recursive reference in `Lazy`, so constructing the grammar terminates.
pub struct Lazy<F, P> {
    thunk: F,
    parser: OnceCell<P>,
}

pub fn lazy<F, P>(thunk: F) -> Lazy<F, P>
where
    F: Fn() -> P,
{
    Lazy {
        thunk,
        parser: OnceCell::new(),
    }
}

impl<F, P> Lazy<F, P> {
    /// Returns `true` once the inner parser has been built.
    pub fn is_forced(&self) -> bool {
        self.parser.get().is_some()
    }
}

impl<K, F, P> Parser<K> for Lazy<F, P>
where
    F: Fn() -> P,
    P: Parser<K>,
{
    type Output = P::Output;

    fn parse(&self, tokens: &[Token<K>], position: usize) -> Option<Parsed<Self::Output>> {
        self.parser.get_or_init(&self.thunk).parse(tokens, position)
    }
}

/// Succeeds only when the inner parser consumes the whole token stream.
#[derive(Debug, Clone)]
pub struct Phrase<P> {
    parser: P,
}

pub fn phrase<P>(parser: P) -> Phrase<P> {
    Phrase { parser }
}

impl<K, P> Parser<K> for Phrase<P>
where
    P: Parser<K>,
{
    type Output = P::Output;

    fn parse(&self, tokens: &[Token<K>], position: usize) -> Option<Parsed<Self::Output>> {
        self.parser
            .parse(tokens, position)
            .filter(|parsed| parsed.position == tokens.len())
    }
}

/// Parses `value (operator value)*` and folds left to right.
///
/// The operator parser yields the combining function applied to the
/// accumulated result and the next value. Parsing stops, without failing, at
/// the first position where no further operator-value pair parses.
#[derive(Debug, Clone)]
pub struct LeftAssociativeFold<V, P> {
    value: V,
    operator: P,
}

impl<K, V, P> Parser<K> for LeftAssociativeFold<V, P>
where
    V: Parser<K>,
    P: Parser<K>,
    P::Output: FnOnce(V::Output, V::Output) -> V::Output,
{
    type Output = V::Output;

    fn parse(&self, tokens: &[Token<K>], position: usize) -> Option<Parsed<Self::Output>> {
        let Parsed { mut value, mut position } = self.value.parse(tokens, position)?;
        while let Some(operator) = self.operator.parse(tokens, position) {
            let Some(rhs) = self.value.parse(tokens, operator.position) else {
                break;
            };
            value = (operator.value)(value, rhs.value);
            position = rhs.position;
        }
        Some(Parsed::new(value, position))
    }
}

/// Always succeeds; yields `None` without consuming when the inner parser fails.
#[derive(Debug, Clone)]
pub struct Optional<P> {
    parser: P,
}

pub fn optional<P>(parser: P) -> Optional<P> {
    Optional { parser }
}

impl<K, P> Parser<K> for Optional<P>
where
    P: Parser<K>,
{
    type Output = Option<P::Output>;

    fn parse(&self, tokens: &[Token<K>], position: usize) -> Option<Parsed<Self::Output>> {
        Some(match self.parser.parse(tokens, position) {
            Some(parsed) => Parsed::new(Some(parsed.value), parsed.position),
            None => Parsed::new(None, position),
        })
    }
}

/// Applies the inner parser as many times as it succeeds.
#[derive(Debug, Clone)]
pub struct Repeat<P> {
    parser: P,
}

pub fn repeat<P>(parser: P) -> Repeat<P> {
    Repeat { parser }
}

impl<K, P> Parser<K> for Repeat<P>
where
    P: Parser<K>,
{
    type Output = Vec<P::Output>;

    fn parse(&self, tokens: &[Token<K>], mut position: usize) -> Option<Parsed<Self::Output>> {
        let mut values = Vec::new();
        while let Some(parsed) = self.parser.parse(tokens, position) {
            values.push(parsed.value);
            // A parser that consumes nothing would repeat forever.
            if parsed.position == position {
                break;
            }
            position = parsed.position;
        }
        Some(Parsed::new(values, position))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[derive(Debug, Copy, Clone, Eq, PartialEq)]
    enum Kind {
        Num,
        Op,
    }

    fn tokens(text: &str) -> Vec<Token<Kind>> {
        text.split_whitespace()
            .map(|s| {
                if s.chars().all(|c| c.is_ascii_digit()) {
                    Token::new(s, Kind::Num)
                } else {
                    Token::new(s, Kind::Op)
                }
            })
            .collect()
    }

    fn number() -> impl Parser<Kind, Output = i64> {
        tagged(Kind::Num).map(|s: String| s.parse::<i64>().unwrap())
    }

    fn arithmetic() -> BoxedParser<'static, Kind, i64> {
        let minus = reserved("-", Kind::Op).map(|_| |a: i64, b: i64| a - b);
        let atom = number()
            .or(reserved("(", Kind::Op)
                .then(lazy(arithmetic))
                .then(reserved(")", Kind::Op))
                .map(|((_, inner), _)| inner))
            .boxed();
        atom.fold_left(minus).boxed()
    }

    #[test]
    fn test_tagged() {
        let ts = tokens("42 +");
        assert_eq!(tagged(Kind::Num).parse(&ts, 0), Some(Parsed::new("42".to_string(), 1)));
        assert_eq!(tagged(Kind::Num).parse(&ts, 1), None);
        assert_eq!(tagged(Kind::Num).parse(&ts, 2), None);
    }

    #[test]
    fn test_reserved() {
        let ts = tokens("+ -");
        assert_eq!(reserved("+", Kind::Op).parse(&ts, 0), Some(Parsed::new("+".to_string(), 1)));
        assert_eq!(reserved("+", Kind::Op).parse(&ts, 1), None);
        assert_eq!(reserved("+", Kind::Num).parse(&ts, 0), None);
    }

    #[test]
    fn test_concatenate_and_alternative() {
        let ts = tokens("1 + 2");
        let pair = number().then(reserved("+", Kind::Op));
        let parsed = pair.parse(&ts, 0).unwrap();
        assert_eq!(parsed.value, (1, "+".to_string()));
        assert_eq!(parsed.position, 2);
        assert_eq!(pair.parse(&ts, 1), None);

        let either = reserved("*", Kind::Op).or(reserved("+", Kind::Op));
        assert_eq!(either.parse(&ts, 1).map(|p| p.value), Some("+".to_string()));
    }

    #[test]
    fn test_alternative_is_ordered() {
        let ts = tokens("7");
        let first = number().map(|n| n * 10).or(number());
        assert_eq!(first.parse(&ts, 0).map(|p| p.value), Some(70));
    }

    #[test]
    fn test_fold_is_left_associative() {
        let ts = tokens("8 - 3 - 2");
        let parsed = arithmetic().parse(&ts, 0).unwrap();
        assert_eq!(parsed.value, 3);
        assert_eq!(parsed.position, 5);
    }

    #[test]
    fn test_fold_stops_before_dangling_operator() {
        let ts = tokens("8 - 3 -");
        let parsed = arithmetic().parse(&ts, 0).unwrap();
        assert_eq!(parsed.value, 5);
        assert_eq!(parsed.position, 3);
    }

    #[test]
    fn test_lazy_recursion() {
        let ts = tokens("8 - ( 3 - 2 )");
        assert_eq!(arithmetic().parse(&ts, 0).map(|p| p.value), Some(7));
    }

    #[test]
    fn test_lazy_builds_once_on_demand() {
        let parser = lazy(number);
        assert!(!parser.is_forced());
        let ts = tokens("5");
        assert_eq!(parser.parse(&ts, 0).map(|p| p.value), Some(5));
        assert!(parser.is_forced());
    }

    #[test]
    fn test_phrase_rejects_trailing_tokens() {
        let ts = tokens("8 - 3 )");
        assert!(arithmetic().parse(&ts, 0).is_some());
        assert_eq!(phrase(arithmetic()).parse(&ts, 0), None);

        let ts = tokens("8 - 3");
        assert_eq!(phrase(arithmetic()).parse(&ts, 0).map(|p| p.value), Some(5));
    }

    #[test]
    fn test_filter_map() {
        let ts = tokens("3 12");
        let small = tagged(Kind::Num).filter_map(|s: String| s.parse::<i64>().ok().filter(|n| *n < 10));
        assert_eq!(small.parse(&ts, 0), Some(Parsed::new(3, 1)));
        assert_eq!(small.parse(&ts, 1), None);
    }

    #[test]
    fn test_optional() {
        let ts = tokens("- 4");
        let signed = optional(reserved("-", Kind::Op))
            .then(number())
            .map(|(sign, n)| if sign.is_some() { -n } else { n });
        assert_eq!(signed.parse(&ts, 0).map(|p| p.value), Some(-4));
        assert_eq!(signed.parse(&ts, 1).map(|p| p.value), Some(4));
    }

    #[test]
    fn test_repeat() {
        let ts = tokens("1 2 3 +");
        let parsed = repeat(number()).parse(&ts, 0).unwrap();
        assert_eq!(parsed.value, vec![1, 2, 3]);
        assert_eq!(parsed.position, 3);

        let parsed = repeat(number()).parse(&ts, 3).unwrap();
        assert!(parsed.value.is_empty());
        assert_eq!(parsed.position, 3);
    }

    #[test]
    fn test_repeat_stops_on_empty_match() {
        let ts = tokens("+");
        let parsed = repeat(optional(number())).parse(&ts, 0).unwrap();
        assert_eq!(parsed.value, vec![None]);
        assert_eq!(parsed.position, 0);
    }

    #[test]
    fn test_boxed_clone_shares_parser() {
        let parser = arithmetic();
        assert!(parser.ptr_eq(&parser.clone()));
        assert!(!parser.ptr_eq(&arithmetic()));
    }
}
