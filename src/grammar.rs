//! Grammar of propositional formulas.
//!
//! ```text
//! expression := level3
//! level3     := level2 (("^" | "->" | "<->") level2)*
//! level2     := level1 (("V" | "+" | "!") level1)*
//! level1     := term (("&" | "*" | "/") term)*
//! term       := "-" term | constant | variable | "(" expression ")"
//! ```
//!
//! Every binary level folds to the left, so `a -> b -> c` reads as
//! `(a -> b) -> c`. Negation applies to a single term: `-a & b` is
//! `(-a) & b`.

use std::str::FromStr;

use log::debug;

use crate::ast::{BinOp, ExprBoxed, Expression, NOT_SYMBOL};
use crate::combinator::{lazy, phrase, reserved, tagged, BoxedParser, Parser, Reserved};
use crate::error::{Error, ParseError};
use crate::lexer::{lex, Tag, Token};
use crate::types::Var;

/// Binary operators grouped by binding strength, tightest first.
pub const PRECEDENCE_LEVELS: [&[BinOp]; 3] = [
    &[BinOp::And, BinOp::Nand],
    &[BinOp::Or, BinOp::Nor],
    &[BinOp::Xor, BinOp::Imply, BinOp::Eq],
];

type Rule = BoxedParser<'static, Tag, ExprBoxed>;

fn operator(symbol: &str) -> Reserved<Tag> {
    reserved(symbol, Tag::Operator)
}

/// Any spelling of any operator in `ops`.
fn any_operator(ops: &[BinOp]) -> BoxedParser<'static, Tag, BinOp> {
    ops.iter()
        .flat_map(|&op| op.symbols().iter().map(move |&symbol| operator(symbol).map(move |_| op).boxed()))
        .reduce(|left, right| left.or(right).boxed())
        .expect("precedence level is not empty")
}

fn constant() -> Rule {
    tagged(Tag::Constant)
        .filter_map(|lexeme: String| match lexeme.as_str() {
            "0" => Some(ExprBoxed::constant(false)),
            "1" => Some(ExprBoxed::constant(true)),
            _ => None,
        })
        .boxed()
}

fn variable() -> Rule {
    tagged(Tag::Variable)
        .filter_map(|lexeme: String| Var::from_lexeme(&lexeme).map(ExprBoxed::variable))
        .boxed()
}

fn negation() -> Rule {
    operator(NOT_SYMBOL)
        .then(lazy(term))
        .map(|(_, operand)| ExprBoxed::not(operand))
        .boxed()
}

fn group() -> Rule {
    operator("(")
        .then(lazy(expression))
        .then(operator(")"))
        .map(|((_, inner), _)| inner)
        .boxed()
}

fn build_term() -> Rule {
    negation().or(constant()).or(variable()).or(group()).boxed()
}

fn build_expression() -> Rule {
    PRECEDENCE_LEVELS.iter().fold(term(), |operand, level| {
        let combine = any_operator(level)
            .map(|op| move |lhs: ExprBoxed, rhs: ExprBoxed| ExprBoxed::binary(op, lhs, rhs));
        operand.fold_left(combine).boxed()
    })
}

// Rules are `Rc`-based, so each thread builds its own copy once. The `lazy`
// references inside are only forced while parsing, after both are initialized.
thread_local! {
    static TERM: Rule = build_term();
    static EXPRESSION: Rule = build_expression();
}

/// A negation, a constant, a variable or a parenthesized expression.
pub fn term() -> Rule {
    TERM.with(Rule::clone)
}

/// Full expression parser; the loosest level is outermost.
pub fn expression() -> Rule {
    EXPRESSION.with(Rule::clone)
}

/// Parses a token sequence that must form exactly one expression.
pub fn parse(tokens: &[Token]) -> Result<Expression, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let grammar = expression();
    if let Some(parsed) = phrase(&grammar).parse(tokens, 0) {
        debug!("parsed {} tokens", tokens.len());
        return Ok(Expression::from_boxed(&parsed.value));
    }

    let err = match grammar.parse(tokens, 0) {
        Some(prefix) => ParseError::UnexpectedToken {
            position: prefix.position,
            lexeme: tokens
                .get(prefix.position)
                .map(|token| token.lexeme.clone())
                .unwrap_or_default(),
        },
        None => ParseError::Incomplete { tokens: tokens.len() },
    };
    debug!("parse failed: {}", err);
    Err(err)
}

impl Expression {
    /// Lexes and parses `text`.
    ///
    /// ```
    /// use boolcalc_rs::ast::Expression;
    /// use boolcalc_rs::types::assignment;
    ///
    /// let expr = Expression::parse("a & b").unwrap();
    /// assert_eq!(expr.evaluate(&assignment([('a', true), ('b', false)])), Ok(false));
    /// ```
    pub fn parse(text: &str) -> Result<Self, Error> {
        let tokens = lex(text)?;
        Ok(parse(&tokens)?)
    }
}

impl FromStr for Expression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::parse(s)
    }
}
