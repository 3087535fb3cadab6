//! Textual rendering of expressions.
//!
//! `Display` produces infix text that the lexer and grammar read back into the
//! same tree. A subexpression is parenthesized when it binds looser than its
//! parent, or when it is the right operand of a binary operator of the same
//! strength (all binary levels associate to the left).
//!
//! `Debug` produces the fully parenthesized prefix form, e.g. `AND(a, NOT(b))`.

use std::fmt;

use crate::ast::{Expr, Expression, Idx, NOT_SYMBOL};

impl Expression {
    /// Returns `true` if the node at `idx` must be wrapped in parentheses when
    /// rendered inside its parent.
    pub fn needs_parens(&self, idx: Idx) -> bool {
        let Some(parent) = self.parent(idx) else {
            return false;
        };
        let own = self.precedence(idx);
        let outer = self.precedence(parent);
        match self.get(parent) {
            Expr::Binary(_, _, rhs) if *rhs == idx => own <= outer,
            _ => own < outer,
        }
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, idx: Idx) -> fmt::Result {
        let parens = self.needs_parens(idx);
        if parens {
            write!(f, "(")?;
        }
        match self.get(idx) {
            Expr::Constant(value) => write!(f, "{}", u8::from(*value))?,
            Expr::Variable(var) => write!(f, "{}", var)?,
            Expr::Not(a) => {
                write!(f, "{}", NOT_SYMBOL)?;
                self.write_node(f, *a)?;
            }
            Expr::Binary(op, a, b) => {
                self.write_node(f, *a)?;
                write!(f, " {} ", op.symbol())?;
                self.write_node(f, *b)?;
            }
        }
        if parens {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root())
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.collapse(|expr| match expr {
            Expr::Constant(value) => u8::from(value).to_string(),
            Expr::Variable(var) => var.to_string(),
            Expr::Not(a) => format!("NOT({})", a),
            Expr::Binary(op, a, b) => format!("{}({}, {})", op.name(), a, b),
        });
        write!(f, "{}", text)
    }
}
