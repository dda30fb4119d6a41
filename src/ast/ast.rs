use std::fmt::Display;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

/// Stable handle for an expression node, assigned once by the parser.
///
/// Analysis results (resolved types, resolved bindings) live in side tables
/// keyed by this id, so the tree itself stays immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(pub u32);

/// A whole program: module-level fields followed by methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
}

/// `LET name (: Type)? (= value)? ;` at module level.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub type_name: Option<String>,
    pub value: Option<Expr>,
}

/// `DEF name(params) (: Type)? DO statements END`.
///
/// A missing parameter or return annotation means `Any`.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type_name: Option<String>,
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// An expression evaluated for its effects: `expr ;`
    Expression(Expr),
    /// `LET name (: Type)? (= value)? ;`
    Declaration {
        name: String,
        type_name: Option<String>,
        value: Option<Expr>,
    },
    /// `target = value ;` where `target` must be an access expression.
    Assignment { target: Expr, value: Expr },
    /// `IF condition DO ... (ELSE ...)? END`
    If {
        condition: Expr,
        then_statements: Vec<Stmt>,
        else_statements: Vec<Stmt>,
    },
    /// `FOR name IN value DO ... END`
    For {
        name: String,
        value: Expr,
        statements: Vec<Stmt>,
    },
    /// `WHILE condition DO ... END`
    While {
        condition: Expr,
        statements: Vec<Stmt>,
    },
    /// `RETURN value ;`
    Return(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub id: ExprId,
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(id: ExprId, kind: ExprKind) -> Self {
        Expr { id, kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    /// `( expr )`
    Group(Box<Expr>),
    Binary {
        operator: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// A variable reference, or a field access when a receiver is present.
    Access {
        receiver: Option<Box<Expr>>,
        name: String,
    },
    /// A free function call, or a method call when a receiver is present.
    Function {
        receiver: Option<Box<Expr>>,
        name: String,
        arguments: Vec<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Nil,
    Boolean(bool),
    Character(char),
    String(String),
    Integer(BigInt),
    Decimal(BigDecimal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    And,
    Or,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Equals,
    NotEquals,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Less
                | BinaryOp::LessEquals
                | BinaryOp::Greater
                | BinaryOp::GreaterEquals
                | BinaryOp::Equals
                | BinaryOp::NotEquals
        )
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Less => "<",
            BinaryOp::LessEquals => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEquals => ">=",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
        };
        write!(f, "{}", symbol)
    }
}
