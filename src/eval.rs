use std::collections::BTreeSet;
use std::rc::Rc;

use log::trace;

use crate::ast::{BinOp, Expr, Expression, Idx};
use crate::error::UnboundVariableError;
use crate::types::{Assignment, Var};

impl BinOp {
    /// Truth function of the connective.
    pub fn apply(self, lhs: bool, rhs: bool) -> bool {
        match self {
            BinOp::And => lhs && rhs,
            BinOp::Or => lhs || rhs,
            BinOp::Xor => lhs != rhs,
            BinOp::Nand => !(lhs && rhs),
            BinOp::Nor => !(lhs || rhs),
            BinOp::Imply => !lhs || rhs,
            BinOp::Eq => lhs == rhs,
        }
    }
}

impl Expression {
    /// Evaluates the expression under `assignment`.
    ///
    /// Every variable occurring in the expression must have a value; missing
    /// variables are reported, never defaulted.
    pub fn evaluate(&self, assignment: &Assignment) -> Result<bool, UnboundVariableError> {
        self.try_collapse(|expr| match expr {
            Expr::Constant(value) => Ok(value),
            Expr::Variable(var) => assignment
                .get(&var)
                .copied()
                .ok_or(UnboundVariableError { name: var }),
            Expr::Not(a) => Ok(!a),
            Expr::Binary(op, a, b) => Ok(op.apply(a, b)),
        })
    }

    /// Free variables of the whole expression, in sorted order.
    pub fn variables(&self) -> BTreeSet<Var> {
        self.variables_of(self.root()).as_ref().clone()
    }

    /// Free variables of the subtree rooted at `idx`.
    pub fn variables_of(&self, idx: Idx) -> Rc<BTreeSet<Var>> {
        if let Some(vars) = self.variables_slot(idx).get() {
            trace!("variables_of({:?}): cached", idx);
            self.record_memo_hit();
            return Rc::clone(vars);
        }

        let vars = match self.get(idx) {
            Expr::Constant(_) => BTreeSet::new(),
            Expr::Variable(var) => BTreeSet::from([*var]),
            Expr::Not(a) => self.variables_of(*a).as_ref().clone(),
            Expr::Binary(_, a, b) => {
                let mut vars = self.variables_of(*a).as_ref().clone();
                vars.extend(self.variables_of(*b).iter().copied());
                vars
            }
        };

        Rc::clone(self.variables_slot(idx).get_or_init(|| Rc::new(vars)))
    }

    /// Returns `true` if no variable occurs in the expression.
    pub fn is_constant(&self) -> bool {
        self.variables_of(self.root()).is_empty()
    }
}
