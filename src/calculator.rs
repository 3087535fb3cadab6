//! Analysis of a single boolean function.
//!
//! A [`Calculator`] owns an [`Expression`] and derives artifacts from it: the
//! truth table, the full normal forms, the Zhegalkin polynomial and a
//! Quine-McCluskey sum of prime implicants. Derived formulas are new
//! expressions; the analyzed one is never modified.
//!
//! ```
//! use boolcalc_rs::calculator::Calculator;
//!
//! let calc = Calculator::parse("(-x & z) V (x & -z) V (x & z)").unwrap();
//! assert_eq!(calc.minimize().to_string(), "x V z");
//! assert_eq!(calc.build_truth_table().unwrap().len(), 4);
//! ```

use std::cell::OnceCell;
use std::rc::Rc;

use log::trace;

use crate::ast::Expression;
use crate::error::{ConstantFunctionError, Error};
use crate::table::TruthTable;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CalculatorConfig {
    /// Keep the truth table after the first query.
    pub memoize: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self { memoize: true }
    }
}

impl CalculatorConfig {
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }
}

pub struct Calculator {
    function: Expression,
    config: CalculatorConfig,
    table: OnceCell<Rc<TruthTable>>,
}

impl Calculator {
    pub fn new(function: Expression) -> Self {
        Self::with_config(function, CalculatorConfig::default())
    }

    pub fn with_config(function: Expression, config: CalculatorConfig) -> Self {
        Self {
            function,
            config,
            table: OnceCell::new(),
        }
    }

    /// Lexes and parses `text` into a new calculator.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Ok(Self::new(Expression::parse(text)?))
    }

    /// The analyzed function.
    pub fn function(&self) -> &Expression {
        &self.function
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Truth table of the function.
    ///
    /// Fails for an expression without variables; the error carries its value.
    pub fn build_truth_table(&self) -> Result<Rc<TruthTable>, ConstantFunctionError> {
        if !self.config.memoize {
            return TruthTable::build(&self.function).map(Rc::new);
        }
        if let Some(table) = self.table.get() {
            trace!("truth table: cached");
            return Ok(Rc::clone(table));
        }
        let table = Rc::new(TruthTable::build(&self.function)?);
        Ok(Rc::clone(self.table.get_or_init(|| table)))
    }

    /// Returns `true` if the truth table has already been computed.
    pub fn is_table_cached(&self) -> bool {
        self.table.get().is_some()
    }

    /// Drop memoized results.
    pub fn clear_cache(&mut self) {
        self.table.take();
    }

    /// The truth table, or the constant the function always takes.
    ///
    /// Both syntactic constants (`1 & 0`) and semantic ones (`a V -a`) are
    /// reported as `Err`.
    pub(crate) fn non_constant_table(&self) -> Result<Rc<TruthTable>, ConstantFunctionError> {
        let table = self.build_truth_table()?;
        match table.constant_value() {
            Some(value) => Err(ConstantFunctionError { value }),
            None => Ok(table),
        }
    }
}

impl From<Expression> for Calculator {
    fn from(function: Expression) -> Self {
        Calculator::new(function)
    }
}
