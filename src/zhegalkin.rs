//! Zhegalkin polynomial (algebraic normal form).
//!
//! The coefficients come from the triangle of finite differences over the
//! output column: the first entry of every difference row is the coefficient
//! of the monomial belonging to that row index. Monomial `i` is the
//! conjunction of the variables whose bit is 1 in row `i` of the truth table;
//! monomial 0 is the constant 1.

use log::debug;

use crate::ast::{BinOp, ExprBoxed, Expression};
use crate::calculator::Calculator;
use crate::error::ConstantFunctionError;
use crate::table::TruthTable;

/// Coefficients of the polynomial, indexed like the table rows.
pub fn coefficients(table: &TruthTable) -> Vec<bool> {
    let mut row: Vec<bool> = table.results().collect();
    let mut coefficients = Vec::with_capacity(row.len());
    while let Some(&first) = row.first() {
        coefficients.push(first);
        row = row.windows(2).map(|pair| pair[0] ^ pair[1]).collect();
    }
    coefficients
}

fn monomial(table: &TruthTable, index: usize) -> ExprBoxed {
    let n = table.variables().len();
    let factors = table
        .variables()
        .iter()
        .enumerate()
        .filter(|&(j, _)| (index >> (n - 1 - j)) & 1 == 1)
        .map(|(_, &var)| ExprBoxed::variable(var));
    ExprBoxed::chain(BinOp::And, factors).unwrap_or(ExprBoxed::constant(true))
}

impl Calculator {
    /// Zhegalkin polynomial: XOR of the monomials with coefficient 1, in row order.
    pub fn cast_to_zhegalkin(&self) -> Result<Expression, ConstantFunctionError> {
        let table = self.non_constant_table()?;
        let coefficients = coefficients(&table);
        let terms = coefficients
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(|(i, _)| monomial(&table, i));
        let polynomial = ExprBoxed::chain(BinOp::Xor, terms).ok_or(ConstantFunctionError { value: false })?;
        debug!(
            "zhegalkin: {} of {} monomials",
            coefficients.iter().filter(|&&c| c).count(),
            coefficients.len()
        );
        Ok(Expression::from_boxed(&polynomial))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn zhegalkin(text: &str) -> String {
        Calculator::parse(text).unwrap().cast_to_zhegalkin().unwrap().to_string()
    }

    #[test]
    fn test_basic_polynomials() {
        assert_eq!(zhegalkin("a & b"), "a & b");
        assert_eq!(zhegalkin("a ^ b"), "b ^ a");
        assert_eq!(zhegalkin("a V b"), "b ^ a ^ a & b");
        assert_eq!(zhegalkin("-a"), "1 ^ a");
        assert_eq!(zhegalkin("a -> b"), "1 ^ a ^ a & b");
    }

    #[test]
    fn test_coefficients_of_or() {
        let calc = Calculator::parse("x V y").unwrap();
        let table = calc.build_truth_table().unwrap();
        assert_eq!(coefficients(&table), vec![false, true, true, true]);
    }

    #[test]
    fn test_agrees_with_function() {
        let calc = Calculator::parse("(a / b) ! (c <-> a)").unwrap();
        let polynomial = calc.cast_to_zhegalkin().unwrap();
        let table = calc.build_truth_table().unwrap();
        for row in table.rows() {
            assert_eq!(polynomial.evaluate(&table.assignment(row)), Ok(row.result));
        }
    }

    #[test]
    fn test_self_xor_is_zero() {
        let calc = Calculator::parse("a & (b V -c)").unwrap();
        let polynomial = calc.cast_to_zhegalkin().unwrap();
        let doubled = ExprBoxed::xor(polynomial.to_boxed(), polynomial.to_boxed());
        let table = Calculator::new(Expression::from(doubled)).build_truth_table().unwrap();
        assert_eq!(table.constant_value(), Some(false));
    }

    #[test]
    fn test_constant_rejected() {
        for (text, value) in [("1", true), ("a V -a", true), ("a ^ a", false)] {
            let calc = Calculator::parse(text).unwrap();
            assert_eq!(calc.cast_to_zhegalkin(), Err(ConstantFunctionError { value }), "{}", text);
        }
    }
}
