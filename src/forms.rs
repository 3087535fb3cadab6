//! Full conjunctive and disjunctive normal forms.

use log::debug;

use crate::ast::{BinOp, ExprBoxed, Expression};
use crate::calculator::Calculator;
use crate::error::ConstantFunctionError;
use crate::table::{Row, TruthTable};

/// Clause of `row`: every variable as a literal joined by `op`, negated
/// according to `negate`.
fn clause(table: &TruthTable, row: &Row, op: BinOp, negate: impl Fn(bool) -> bool) -> ExprBoxed {
    let literals = table
        .variables()
        .iter()
        .zip(&row.values)
        .map(|(&var, &value)| ExprBoxed::literal(var, !negate(value)));
    ExprBoxed::chain(op, literals).expect("a non-constant table has at least one variable")
}

impl Calculator {
    /// Full conjunctive normal form: one maxterm per falsifying row.
    ///
    /// A variable is negated in a maxterm iff it is 1 in that row.
    pub fn cast_to_fcnf(&self) -> Result<Expression, ConstantFunctionError> {
        let table = self.non_constant_table()?;
        let maxterms = table.falsifying().map(|row| clause(&table, row, BinOp::Or, |value| value));
        let fcnf = ExprBoxed::chain(BinOp::And, maxterms).ok_or(ConstantFunctionError { value: true })?;
        let fcnf = Expression::from_boxed(&fcnf);
        debug!("fcnf: {} nodes", fcnf.len());
        Ok(fcnf)
    }

    /// Full disjunctive normal form: one minterm per satisfying row.
    ///
    /// A variable is negated in a minterm iff it is 0 in that row.
    pub fn cast_to_fdnf(&self) -> Result<Expression, ConstantFunctionError> {
        let table = self.non_constant_table()?;
        let minterms = table.satisfying().map(|row| clause(&table, row, BinOp::And, |value| !value));
        let fdnf = ExprBoxed::chain(BinOp::Or, minterms).ok_or(ConstantFunctionError { value: false })?;
        let fdnf = Expression::from_boxed(&fdnf);
        debug!("fdnf: {} nodes", fdnf.len());
        Ok(fdnf)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn fcnf(text: &str) -> String {
        Calculator::parse(text).unwrap().cast_to_fcnf().unwrap().to_string()
    }

    fn fdnf(text: &str) -> String {
        Calculator::parse(text).unwrap().cast_to_fdnf().unwrap().to_string()
    }

    #[test]
    fn test_fdnf_of_and() {
        assert_eq!(fdnf("a & b"), "a & b");
    }

    #[test]
    fn test_fcnf_of_or() {
        assert_eq!(fcnf("a V b"), "a V b");
    }

    #[test]
    fn test_fcnf_of_and() {
        assert_eq!(fcnf("a & b"), "(a V b) & (a V -b) & (-a V b)");
    }

    #[test]
    fn test_fdnf_of_xor() {
        assert_eq!(fdnf("x ^ y"), "-x & y V x & -y");
    }

    #[test]
    fn test_forms_agree_with_function() {
        let calc = Calculator::parse("(p -> q) <-> -r").unwrap();
        let table = calc.build_truth_table().unwrap();
        for form in [calc.cast_to_fcnf().unwrap(), calc.cast_to_fdnf().unwrap()] {
            assert_eq!(form.variables(), calc.function().variables());
            for row in table.rows() {
                assert_eq!(form.evaluate(&table.assignment(row)), Ok(row.result), "{}", form);
            }
        }
    }

    #[test]
    fn test_constant_rejected() {
        let calc = Calculator::parse("0").unwrap();
        assert_eq!(calc.cast_to_fcnf(), Err(ConstantFunctionError { value: false }));
        assert_eq!(calc.cast_to_fdnf(), Err(ConstantFunctionError { value: false }));

        let tautology = Calculator::parse("a V -a").unwrap();
        assert_eq!(tautology.cast_to_fcnf(), Err(ConstantFunctionError { value: true }));
        assert_eq!(tautology.cast_to_fdnf(), Err(ConstantFunctionError { value: true }));

        let contradiction = Calculator::parse("a & -a").unwrap();
        assert_eq!(contradiction.cast_to_fdnf(), Err(ConstantFunctionError { value: false }));
    }
}
