use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A lexical or parse failure, carrying the source index it occurred at.
#[derive(Debug, Clone)]
pub struct SyntaxError {
    kind: SyntaxErrorKind,
    position: Position,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, position: Position) -> Self {
        SyntaxError { kind, position }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }

    pub fn get_error_name(&self) -> &str {
        match &self.kind {
            SyntaxErrorKind::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            SyntaxErrorKind::UnterminatedString => "UnterminatedString",
            SyntaxErrorKind::UnterminatedCharacter => "UnterminatedCharacter",
            SyntaxErrorKind::InvalidEscape { .. } => "InvalidEscape",
            SyntaxErrorKind::NumberParseError { .. } => "NumberParseError",
            SyntaxErrorKind::UnexpectedToken { .. } => "UnexpectedToken",
            SyntaxErrorKind::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            SyntaxErrorKind::UnexpectedEof { .. } => "UnexpectedEof",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.kind {
            SyntaxErrorKind::UnrecognisedCharacter { .. } => ErrorTip::None,
            SyntaxErrorKind::UnterminatedString => {
                ErrorTip::Suggestion(String::from("String literal is missing a closing `\"`"))
            }
            SyntaxErrorKind::UnterminatedCharacter => {
                ErrorTip::Suggestion(String::from("Character literal is missing a closing `'`"))
            }
            SyntaxErrorKind::InvalidEscape { escape } => ErrorTip::Suggestion(format!(
                "Unknown escape `\\{}`, expected one of b, n, r, t, ', \" or \\",
                escape
            )),
            SyntaxErrorKind::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number literal: `{}`", token))
            }
            SyntaxErrorKind::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            SyntaxErrorKind::UnexpectedTokenDetailed { token, expected } => ErrorTip::Suggestion(
                format!("Unexpected token: `{}`, expected {}", token, expected),
            ),
            SyntaxErrorKind::UnexpectedEof { expected } => {
                ErrorTip::Suggestion(format!("Reached end of input, expected {}", expected))
            }
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at index {}", self.kind, self.position.0)
    }
}

#[derive(Error, Debug, Clone)]
pub enum SyntaxErrorKind {
    #[error("unrecognised character: {found:?}")]
    UnrecognisedCharacter { found: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated character literal")]
    UnterminatedCharacter,
    #[error("invalid escape sequence: \\{escape}")]
    InvalidEscape { escape: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token: {token:?}, expected {expected}")]
    UnexpectedTokenDetailed { token: String, expected: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// A violation found by the static analyzer. The pass is fail-fast: the
/// first violation aborts the entire analysis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMismatch { expected: String, received: String },
    #[error("unknown type {name:?}")]
    UnknownType { name: String },
    #[error("type {type_name} has no field {field:?}")]
    UnknownField { type_name: String, field: String },
    #[error("type {type_name} has no method {method:?} taking {arity} arguments")]
    UnknownMethod {
        type_name: String,
        method: String,
        arity: usize,
    },
    #[error("variable {name:?} is not defined")]
    UndefinedVariable { name: String },
    #[error("function {name:?} taking {arity} arguments is not defined")]
    UndefinedFunction { name: String, arity: usize },
    #[error("declaration of {name:?} needs a type or a value to infer one from")]
    MissingTypeInfo { name: String },
    #[error("left-hand side of an assignment must be a variable or field access")]
    InvalidAssignmentTarget,
    #[error("{construct} body must not be empty")]
    EmptyBody { construct: &'static str },
    #[error("literal {literal} does not fit the {type_name} value range")]
    Overflow { literal: String, type_name: String },
    #[error("program has no zero-argument `main` method returning Integer")]
    MissingEntryPoint,
}

/// A failure during execution. Runtime errors abort the entire run; there is
/// no local recovery.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("variable {name:?} is not defined")]
    UndefinedVariable { name: String },
    #[error("function {name:?} taking {arity} arguments is not defined")]
    UndefinedFunction { name: String, arity: usize },
    #[error("expected a {expected} value, received {received}")]
    TypeAssertionFailure { expected: String, received: String },
    #[error("arithmetic error: {reason}")]
    ArithmeticError { reason: String },
}

impl RuntimeError {
    pub fn division_by_zero() -> Self {
        RuntimeError::ArithmeticError {
            reason: String::from("division by zero"),
        }
    }
}
