use std::fmt::Display;
use std::rc::Rc;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::ast::ast::Literal;

/// A runtime value. Numerics are arbitrary precision; the 32-bit range
/// restriction on integers is a static property only.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Boolean(bool),
    Character(char),
    String(String),
    Integer(BigInt),
    Decimal(BigDecimal),
    /// A finite, restartable sequence of integers.
    IntegerIterable(Rc<Vec<BigInt>>),
}

/// The queryable kind tag of a runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Nil,
    Boolean,
    Character,
    String,
    Integer,
    Decimal,
    IntegerIterable,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Nil => "Nil",
            ValueKind::Boolean => "Boolean",
            ValueKind::Character => "Character",
            ValueKind::String => "String",
            ValueKind::Integer => "Integer",
            ValueKind::Decimal => "Decimal",
            ValueKind::IntegerIterable => "IntegerIterable",
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Character(_) => ValueKind::Character,
            Value::String(_) => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::IntegerIterable(_) => ValueKind::IntegerIterable,
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Nil => Value::Nil,
            Literal::Boolean(value) => Value::Boolean(*value),
            Literal::Character(value) => Value::Character(*value),
            Literal::String(value) => Value::String(value.clone()),
            Literal::Integer(value) => Value::Integer(value.clone()),
            Literal::Decimal(value) => Value::Decimal(value.clone()),
        }
    }
}

/// Values print with the language's own literal spelling where one exists.
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Nil => write!(f, "NIL"),
            Value::Boolean(true) => write!(f, "TRUE"),
            Value::Boolean(false) => write!(f, "FALSE"),
            Value::Character(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Decimal(value) => write!(f, "{}", value),
            Value::IntegerIterable(values) => {
                write!(f, "[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
        }
    }
}
