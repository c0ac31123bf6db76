use crate::token::Token;
use crate::value::object::Object;
use std::fmt::Display;

/// Stable identity of an expression node, assigned by the parser. The
/// resolver's side table is keyed by it: two structurally equal nodes in
/// different scopes carry different ids and resolve independently.
pub type ExprId = usize;

/// Expr is one of the two node types in the Abstract Syntax Tree. Only the
/// variants that name a binding — Variable, Assign, This, Super — carry an
/// id, because only they appear in the resolver's side table.
#[derive(Clone, Debug)]
pub enum Expr {
    Literal {
        value: Object,
    },
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
    Binary {
        operator: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Grouping {
        expression: Box<Expr>,
    },
    Variable {
        id: ExprId,
        name: Token,
    },
    Assign {
        id: ExprId,
        name: Token,
        value: Box<Expr>,
    },
    Logical {
        operator: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        /// The closing parenthesis, kept for error reporting.
        paren: Token,
        arguments: Vec<Expr>,
    },
    Get {
        object: Box<Expr>,
        name: Token,
    },
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },
    This {
        id: ExprId,
        keyword: Token,
    },
    Super {
        id: ExprId,
        keyword: Token,
        method: Token,
    },
}

/// Parenthesized form used by the `parse` command.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Literal { value } => match value {
                // AST dumps always show the decimal point.
                Object::Number(n) => f.write_fmt(format_args!("{n:?}")),
                _ => f.write_fmt(format_args!("{value}")),
            },
            Expr::Unary { operator, right } => {
                f.write_fmt(format_args!("({} {right})", operator.lexeme))
            }
            Expr::Binary {
                operator,
                left,
                right,
            } => f.write_fmt(format_args!("({} {left} {right})", operator.lexeme)),
            Expr::Grouping { expression } => f.write_fmt(format_args!("(group {expression})")),
            Expr::Variable { name, .. } => f.write_str(&name.lexeme),
            Expr::Assign { name, value, .. } => {
                f.write_fmt(format_args!("(= {} {value})", name.lexeme))
            }
            Expr::Logical {
                operator,
                left,
                right,
            } => f.write_fmt(format_args!("({} {left} {right})", operator.lexeme)),
            Expr::Call {
                callee, arguments, ..
            } => {
                f.write_fmt(format_args!("(call {callee}"))?;
                for argument in arguments {
                    f.write_fmt(format_args!(" {argument}"))?;
                }
                f.write_str(")")
            }
            Expr::Get { object, name } => f.write_fmt(format_args!("(. {object} {})", name.lexeme)),
            Expr::Set {
                object,
                name,
                value,
            } => f.write_fmt(format_args!("(= (. {object} {}) {value})", name.lexeme)),
            Expr::This { .. } => f.write_str("this"),
            Expr::Super { method, .. } => f.write_fmt(format_args!("(super {})", method.lexeme)),
        }
    }
}
