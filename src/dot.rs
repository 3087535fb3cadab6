//! Expression tree to DOT (Graphviz) conversion.
//!
//! The generated graph follows these conventions:
//! - **Operator nodes** (negation and binary connectives) are labeled with the
//!   operator name
//! - **Leaf nodes** (constants and variables) sit together at the bottom (sink rank)
//! - **Edges** go from an operator to its operands; the root is at the top
//!
//! # Examples
//!
//! ```
//! use boolcalc_rs::ast::Expression;
//!
//! let expr = Expression::parse("a & -b").unwrap();
//! let dot = expr.to_dot().unwrap();
//! assert!(dot.starts_with("digraph {"));
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::fmt::Write as _;

use crate::ast::{Expr, Expression};

/// Configuration options for DOT output generation.
///
/// ```
/// use boolcalc_rs::ast::Expression;
/// use boolcalc_rs::dot::DotConfig;
///
/// let expr = Expression::parse("x -> y").unwrap();
/// let config = DotConfig {
///     operator_shape: "ellipse",
///     ..DotConfig::default()
/// };
/// let dot = expr.to_dot_with_config(&config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for operator nodes (default: "circle")
    pub operator_shape: &'static str,
    /// Shape for constants and variables (default: "square")
    pub leaf_shape: &'static str,
    /// Style for operand edges (default: "solid")
    pub edge_style: &'static str,
    /// Whether to label binary operand edges with `L`/`R` (default: true)
    pub label_sides: bool,
    /// Whether operators are labeled with their symbol instead of their name (default: false)
    pub use_symbols: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            operator_shape: "circle",
            leaf_shape: "square",
            edge_style: "solid",
            label_sides: true,
            use_symbols: false,
        }
    }
}

impl Expression {
    /// Converts the expression tree to DOT format with default settings.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the expression tree to DOT format.
    ///
    /// Node names are the arena indices, so `n0` is always the root.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "node [shape={}];", config.operator_shape)?;

        let operator_label = |name: &str, symbol: &str| {
            let label = if config.use_symbols { symbol } else { name };
            escape(label)
        };

        for (idx, node) in self.iter() {
            let id = idx.index();
            match node {
                Expr::Constant(_) | Expr::Variable(_) => {}
                Expr::Not(_) => writeln!(dot, "n{} [label=\"{}\"];", id, operator_label("NOT", "-"))?,
                Expr::Binary(op, _, _) => {
                    writeln!(dot, "n{} [label=\"{}\"];", id, operator_label(op.name(), op.symbol()))?
                }
            }
        }

        // Leaves
        writeln!(dot, "{{ rank=sink")?;
        for (idx, node) in self.iter() {
            match node {
                Expr::Constant(value) => {
                    writeln!(dot, "n{} [shape={}, label=\"{}\"];", idx.index(), config.leaf_shape, u8::from(*value))?
                }
                Expr::Variable(var) => {
                    writeln!(dot, "n{} [shape={}, label=\"{}\"];", idx.index(), config.leaf_shape, var)?
                }
                _ => {}
            }
        }
        writeln!(dot, "}}")?;

        for (idx, node) in self.iter() {
            match node {
                Expr::Constant(_) | Expr::Variable(_) => {}
                Expr::Not(a) => writeln!(dot, "n{} -> n{} [style={}];", idx.index(), a.index(), config.edge_style)?,
                Expr::Binary(_, a, b) => {
                    for (side, child) in [("L", a), ("R", b)] {
                        if config.label_sides {
                            writeln!(
                                dot,
                                "n{} -> n{} [style={}, label=\"{}\"];",
                                idx.index(),
                                child.index(),
                                config.edge_style,
                                side
                            )?;
                        } else {
                            writeln!(dot, "n{} -> n{} [style={}];", idx.index(), child.index(), config.edge_style)?;
                        }
                    }
                }
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
