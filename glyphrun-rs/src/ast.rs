//! Node shapes for a sketched expression language.
//!
//! Only the data shapes exist: there is no parser producing these nodes
//! and no evaluator walking them. [`Evaluate`] is declared as the seam
//! where evaluation would go, but nothing implements it yet.

/// Placeholder for the evaluation environment.
///
/// What an environment holds (bindings? drawing state?) is undecided, so
/// this carries nothing for now.
#[derive(Debug, Default)]
pub struct Environment;

/// Evaluation of an expression against an environment.
///
/// No implementations exist yet; the trait records the intended shape of
/// the operation.
pub trait Evaluate {
    fn evaluate(&self, env: &Environment);
}

/// An expression node. Composite variants own their children.
#[derive(Debug, PartialEq)]
pub enum Expr {
    /// A string literal, stored as written (quotes and escapes intact).
    StringLit(String),
    /// A numeric literal, stored as written.
    NumLit(String),
    /// A color literal, stored as written.
    ColorLit(String),
    /// A dotted identifier path such as `frame.title`.
    Idents(Vec<String>),
    /// A call of the function named by `idents` with ordered arguments.
    FnCall { idents: Vec<String>, args: Vec<Expr> },
    /// A function definition with ordered parameter names.
    // TODO: Decide how to store the body. What *is* the body?
    FnDef { params: Vec<String> },
    /// A coordinate pair.
    Coord(Box<Expr>, Box<Expr>),
    /// A binary operation on two sub-expressions.
    BinOp {
        op: char,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Shorthand to construct an `Expr::Coord`.
    pub fn coord(x: Expr, y: Expr) -> Expr {
        Expr::Coord(Box::new(x), Box::new(y))
    }

    /// Shorthand to construct an `Expr::BinOp`.
    pub fn bin_op(op: char, lhs: Expr, rhs: Expr) -> Expr {
        Expr::BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_nodes_own_their_children() {
        // (32, 32 + 6) as an expression tree.
        let expr = Expr::coord(
            Expr::NumLit("32".to_string()),
            Expr::bin_op(
                '+',
                Expr::NumLit("32".to_string()),
                Expr::NumLit("6".to_string()),
            ),
        );

        let Expr::Coord(x, y) = expr else {
            panic!("expected a coordinate pair");
        };
        assert_eq!(*x, Expr::NumLit("32".to_string()));
        assert!(matches!(*y, Expr::BinOp { op: '+', .. }));
    }

    #[test]
    fn call_arguments_keep_their_order() {
        let call = Expr::FnCall {
            idents: vec!["line".to_string()],
            args: vec![
                Expr::NumLit("960".to_string()),
                Expr::NumLit("520".to_string()),
            ],
        };
        let Expr::FnCall { idents, args } = call else {
            panic!("expected a call");
        };
        assert_eq!(idents, vec!["line"]);
        assert_eq!(args[0], Expr::NumLit("960".to_string()));
        assert_eq!(args[1], Expr::NumLit("520".to_string()));
    }
}
