//! Truth tables.
//!
//! Columns are the free variables in sorted order. Rows enumerate all `2^n`
//! assignments in ascending binary order, with the first variable as the most
//! significant bit, so row `i` assigns to variable `j` the bit
//! `(i >> (n - 1 - j)) & 1`.

use std::fmt;

use log::debug;

use crate::ast::Expression;
use crate::error::ConstantFunctionError;
use crate::types::{Assignment, Var};

/// Largest number of variables [`TruthTable::build`] accepts: `2^24` rows.
pub const MAX_VARIABLES: usize = 24;

/// One assignment of the table's variables together with the function value.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Row {
    /// Values of the variables, in the table's column order.
    pub values: Vec<bool>,
    /// Value of the function under this assignment.
    pub result: bool,
}

impl Row {
    /// Row index in the table: the values read as a binary number.
    pub fn index(&self) -> usize {
        self.values.iter().fold(0, |acc, &bit| (acc << 1) | usize::from(bit))
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TruthTable {
    variables: Vec<Var>,
    rows: Vec<Row>,
}

impl TruthTable {
    /// Evaluates `expr` on every assignment of its free variables.
    ///
    /// An expression without variables has no meaningful table; the error
    /// carries its single value.
    ///
    /// # Panics
    ///
    /// Panics if the expression has more than [`MAX_VARIABLES`] variables.
    /// The table is materialized row by row, so larger functions do not fit
    /// in memory. Callers taking arbitrary input should check
    /// `expr.variables().len()` first.
    pub fn build(expr: &Expression) -> Result<Self, ConstantFunctionError> {
        let variables: Vec<Var> = expr.variables().into_iter().collect();
        let n = variables.len();

        if n == 0 {
            let value = expr
                .evaluate(&Assignment::new())
                .expect("an expression without variables evaluates under the empty assignment");
            debug!("truth table: constant function {}", u8::from(value));
            return Err(ConstantFunctionError { value });
        }

        assert!(
            n <= MAX_VARIABLES,
            "truth table over {} variables exceeds the limit of {}",
            n,
            MAX_VARIABLES
        );

        let mut rows = Vec::with_capacity(1 << n);
        for i in 0..(1usize << n) {
            let values: Vec<bool> = (0..n).map(|j| (i >> (n - 1 - j)) & 1 == 1).collect();
            let assignment: Assignment = variables.iter().copied().zip(values.iter().copied()).collect();
            let result = expr
                .evaluate(&assignment)
                .expect("assignment covers every free variable");
            rows.push(Row { values, result });
        }

        debug!("truth table: {} variables, {} rows", n, rows.len());
        Ok(Self { variables, rows })
    }

    /// Column variables, sorted.
    pub fn variables(&self) -> &[Var] {
        &self.variables
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows, `2^n`.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Rows where the function is 1.
    pub fn satisfying(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| row.result)
    }

    /// Rows where the function is 0.
    pub fn falsifying(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| !row.result)
    }

    /// The value the function takes on every row, if there is only one.
    pub fn constant_value(&self) -> Option<bool> {
        let first = self.rows.first()?.result;
        self.rows.iter().all(|row| row.result == first).then_some(first)
    }

    /// Returns `true` if the function takes the same value on every row,
    /// even though it syntactically depends on variables (e.g. `a V -a`).
    pub fn is_constant(&self) -> bool {
        self.constant_value().is_some()
    }

    /// The assignment described by `row`.
    pub fn assignment(&self, row: &Row) -> Assignment {
        self.variables.iter().copied().zip(row.values.iter().copied()).collect()
    }

    /// The output column, in row order.
    pub fn results(&self) -> impl Iterator<Item = bool> + '_ {
        self.rows.iter().map(|row| row.result)
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for var in &self.variables {
            write!(f, "{} ", var)?;
        }
        writeln!(f, "F")?;
        for row in &self.rows {
            for &value in &row.values {
                write!(f, "{} ", u8::from(value))?;
            }
            writeln!(f, "{}", u8::from(row.result))?;
        }
        Ok(())
    }
}
