//! # boolcalc-rs: a propositional logic calculator
//!
//! **`boolcalc-rs`** reads propositional formulas written in a small infix
//! language and analyzes the boolean functions they denote.
//!
//! ## Pipeline
//!
//! Data flows strictly forward:
//!
//! ```text
//! text --lex--> tokens --parse--> Expression --Calculator--> truth table, normal forms, ...
//! ```
//!
//! - **[`lexer`]**: a regex pattern-table tokenizer. The first pattern in declared order wins.
//! - **[`combinator`]**: a grammar-agnostic parser-combinator engine over token streams.
//! - **[`grammar`]**: the formula grammar, built from combinators with one left-associative
//!   fold per precedence level.
//! - **[`ast`]**: the expression tree, stored as an arena with a separate parent table.
//! - **[`calculator`]**: truth tables, FCNF/FDNF, Zhegalkin polynomials and
//!   Quine-McCluskey minimization.
//!
//! ## Syntax
//!
//! | operator | symbols      | precedence |
//! |----------|--------------|------------|
//! | NOT      | `-`          | 4          |
//! | AND      | `&`, `*`     | 3          |
//! | NAND     | `/`          | 3          |
//! | OR       | `V`, `+`     | 2          |
//! | NOR      | `!`          | 2          |
//! | XOR      | `^`          | 1          |
//! | IMPLY    | `->`         | 1          |
//! | EQ       | `<->`        | 1          |
//!
//! Variables are single ASCII letters (except `V`), constants are `0` and `1`.
//! All binary operators associate to the left.
//!
//! ## Basic Usage
//!
//! ```rust
//! use boolcalc_rs::ast::Expression;
//! use boolcalc_rs::calculator::Calculator;
//! use boolcalc_rs::error::ConstantFunctionError;
//!
//! let expr = Expression::parse("(-x & z) V (x & -z) V (x & z)").unwrap();
//! let calc = Calculator::new(expr);
//!
//! let table = calc.build_truth_table().unwrap();
//! assert_eq!(table.len(), 4);
//!
//! assert_eq!(calc.cast_to_fdnf().unwrap().to_string(), "-x & z V x & -z V x & z");
//! assert_eq!(calc.cast_to_zhegalkin().unwrap().to_string(), "z ^ x ^ x & z");
//! assert_eq!(calc.minimize().to_string(), "x V z");
//!
//! // Constant functions have no table.
//! let constant = Calculator::parse("1 & (0 -> 1)").unwrap();
//! assert_eq!(constant.build_truth_table().unwrap_err(), ConstantFunctionError { value: true });
//! ```

pub mod ast;
pub mod calculator;
pub mod combinator;
pub mod display;
pub mod dot;
pub mod error;
pub mod eval;
pub mod forms;
pub mod grammar;
pub mod lexer;
pub mod minimize;
pub mod table;
pub mod types;
pub mod zhegalkin;
