//! Error types for lexing, parsing, evaluation and analysis.
//!
//! Each stage of the pipeline has its own error so callers can match on
//! exactly what went wrong. [`Error`] aggregates all of them for code that
//! drives the whole pipeline with `?`.

use thiserror::Error;

use crate::types::Var;

/// No token pattern matches the input at `position`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal character {character:?} at position {position}")]
pub struct LexError {
    /// The offending character.
    pub character: char,
    /// Character offset of the offending character in the input.
    pub position: usize,
}

/// The token stream does not form a complete expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// There were no tokens at all.
    #[error("empty expression")]
    Empty,

    /// A prefix of the tokens forms an expression, but the token at
    /// `position` cannot continue it.
    #[error("unexpected token {lexeme:?} at token position {position}")]
    UnexpectedToken { position: usize, lexeme: String },

    /// No prefix of the tokens forms an expression.
    #[error("cannot parse expression from {tokens} tokens")]
    Incomplete { tokens: usize },
}

/// Evaluation referenced a variable that has no value in the assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no value for variable {name}")]
pub struct UnboundVariableError {
    pub name: Var,
}

/// A variable-dependent artifact was requested from a function that always
/// takes the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("function always takes one value: {}", bit(.value))]
pub struct ConstantFunctionError {
    /// The single value the function takes.
    pub value: bool,
}

fn bit(value: &bool) -> u8 {
    u8::from(*value)
}

/// Any error produced by the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    UnboundVariable(#[from] UnboundVariableError),

    #[error(transparent)]
    ConstantFunction(#[from] ConstantFunctionError),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_message() {
        let err = LexError {
            character: '#',
            position: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("'#'"));
        assert!(msg.contains("position 4"));
    }

    #[test]
    fn test_parse_error_message() {
        let err = ParseError::UnexpectedToken {
            position: 3,
            lexeme: ")".to_string(),
        };
        assert_eq!(err.to_string(), "unexpected token \")\" at token position 3");
        assert_eq!(ParseError::Empty.to_string(), "empty expression");
    }

    #[test]
    fn test_constant_function_message() {
        let err = ConstantFunctionError { value: true };
        assert_eq!(err.to_string(), "function always takes one value: 1");
        let err = ConstantFunctionError { value: false };
        assert_eq!(err.to_string(), "function always takes one value: 0");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = UnboundVariableError { name: Var::new('q') }.into();
        assert!(matches!(err, Error::UnboundVariable(_)));
        assert_eq!(err.to_string(), "no value for variable q");
    }
}
