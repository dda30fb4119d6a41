use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("LET", TokenKind::Let);
        map.insert("DEF", TokenKind::Def);
        map.insert("DO", TokenKind::Do);
        map.insert("END", TokenKind::End);
        map.insert("IF", TokenKind::If);
        map.insert("ELSE", TokenKind::Else);
        map.insert("FOR", TokenKind::For);
        map.insert("IN", TokenKind::In);
        map.insert("WHILE", TokenKind::While);
        map.insert("RETURN", TokenKind::Return);
        map.insert("NIL", TokenKind::Nil);
        map.insert("TRUE", TokenKind::True);
        map.insert("FALSE", TokenKind::False);
        map.insert("AND", TokenKind::And);
        map.insert("OR", TokenKind::Or);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Integer,
    Decimal,
    Character,
    String,
    Identifier,

    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Plus,
    Dash,
    Star,
    Slash,

    Dot,
    Comma,
    Colon,
    Semicolon,

    // Reserved
    Let,
    Def,
    Do,
    End,
    If,
    Else,
    For,
    In,
    While,
    Return,
    Nil,
    True,
    False,
    And,
    Or,
}

impl TokenKind {
    /// Whether a token of this kind can end an operand, which decides if a
    /// following `+`/`-` is an operator rather than a literal sign.
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Integer
                | TokenKind::Decimal
                | TokenKind::Character
                | TokenKind::String
                | TokenKind::Identifier
                | TokenKind::CloseParen
                | TokenKind::Nil
                | TokenKind::True
                | TokenKind::False
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}
