//! Quine-McCluskey minimization.
//!
//! Minterms are grouped by their number of ones. In every round each pair of
//! implicants from neighbouring groups that differ in exactly one fixed
//! position is glued into an implicant with a don't-care there. Implicants
//! that take part in no gluing are prime. Rounds repeat on the glued
//! implicants until none are produced.
//!
//! The result is the disjunction of *all* prime implicants. No essential
//! implicant selection is performed, so the cover is valid but not always
//! of minimum size.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::debug;

use crate::ast::{BinOp, ExprBoxed, Expression};
use crate::calculator::Calculator;
use crate::error::ConstantFunctionError;
use crate::types::{Bit, Var};

/// A conjunction of literals over the table variables, one [`Bit`] per variable.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Implicant(Vec<Bit>);

impl Implicant {
    pub fn new(bits: Vec<Bit>) -> Self {
        Implicant(bits)
    }

    pub fn bits(&self) -> &[Bit] {
        &self.0
    }

    /// Number of positions fixed to 1.
    pub fn ones(&self) -> usize {
        self.0.iter().filter(|bit| bit.is_one()).count()
    }

    /// Merges two implicants that differ in exactly one fixed position.
    ///
    /// Don't-care positions must coincide.
    pub fn glue(&self, other: &Self) -> Option<Self> {
        if self.0.len() != other.0.len() {
            return None;
        }
        let mut diff = None;
        for (i, (a, b)) in self.0.iter().zip(&other.0).enumerate() {
            if a == b {
                continue;
            }
            if a.is_dont_care() || b.is_dont_care() || diff.is_some() {
                return None;
            }
            diff = Some(i);
        }
        let i = diff?;
        let mut bits = self.0.clone();
        bits[i] = Bit::DontCare;
        Some(Implicant(bits))
    }

    /// Returns `true` if the implicant holds under `values`.
    pub fn covers(&self, values: &[bool]) -> bool {
        self.0.len() == values.len()
            && self.0.iter().zip(values).all(|(bit, &value)| match bit {
                Bit::DontCare => true,
                Bit::One => value,
                Bit::Zero => !value,
            })
    }

    /// The conjunction of the fixed literals; `1` if every position is don't-care.
    pub fn to_term(&self, variables: &[Var]) -> ExprBoxed {
        let literals = variables
            .iter()
            .zip(&self.0)
            .filter(|(_, bit)| !bit.is_dont_care())
            .map(|(&var, bit)| ExprBoxed::literal(var, bit.is_one()));
        ExprBoxed::chain(BinOp::And, literals).unwrap_or(ExprBoxed::constant(true))
    }
}

impl From<&[bool]> for Implicant {
    fn from(values: &[bool]) -> Self {
        Implicant(values.iter().map(|&value| Bit::from(value)).collect())
    }
}

impl fmt::Display for Implicant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

/// One gluing round: returns the glued implicants and those that were not glued.
fn glue_round(current: &BTreeSet<Implicant>) -> (BTreeSet<Implicant>, Vec<Implicant>) {
    let mut groups: BTreeMap<usize, Vec<&Implicant>> = BTreeMap::new();
    for implicant in current {
        groups.entry(implicant.ones()).or_default().push(implicant);
    }

    let mut glued = BTreeSet::new();
    let mut consumed: BTreeSet<&Implicant> = BTreeSet::new();
    for (ones, lower) in &groups {
        let Some(upper) = groups.get(&(ones + 1)) else {
            continue;
        };
        for &a in lower {
            for &b in upper {
                if let Some(merged) = a.glue(b) {
                    consumed.insert(a);
                    consumed.insert(b);
                    glued.insert(merged);
                }
            }
        }
    }

    let survivors = current
        .iter()
        .filter(|implicant| !consumed.contains(implicant))
        .cloned()
        .collect();
    (glued, survivors)
}

/// Prime implicants of the function given by its satisfying assignments.
pub fn prime_implicants<'a, I>(minterms: I) -> BTreeSet<Implicant>
where
    I: IntoIterator<Item = &'a [bool]>,
{
    let mut current: BTreeSet<Implicant> = minterms.into_iter().map(Implicant::from).collect();
    let mut primes = BTreeSet::new();
    let mut round = 0;

    while !current.is_empty() {
        round += 1;
        let (glued, survivors) = glue_round(&current);
        debug!(
            "qm round {}: {} implicants, {} glued, {} prime",
            round,
            current.len(),
            glued.len(),
            survivors.len()
        );
        primes.extend(survivors);
        current = glued;
    }

    primes
}

impl Calculator {
    /// Prime implicants of a non-constant function, ordered by their bits.
    pub fn prime_implicants(&self) -> Result<BTreeSet<Implicant>, ConstantFunctionError> {
        let table = self.non_constant_table()?;
        Ok(prime_implicants(table.satisfying().map(|row| row.values.as_slice())))
    }

    /// Disjunction of all prime implicants.
    ///
    /// A constant function minimizes to its constant.
    pub fn minimize(&self) -> Expression {
        let table = match self.non_constant_table() {
            Ok(table) => table,
            Err(ConstantFunctionError { value }) => return Expression::constant(value),
        };
        let primes = prime_implicants(table.satisfying().map(|row| row.values.as_slice()));
        let terms = primes.iter().map(|implicant| implicant.to_term(table.variables()));
        match ExprBoxed::chain(BinOp::Or, terms) {
            Some(sum) => Expression::from_boxed(&sum),
            None => Expression::constant(false),
        }
    }
}
