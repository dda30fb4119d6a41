use std::rc::Rc;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{
    ast::ast::{BinaryOp, Expr, ExprId, ExprKind, Field, Literal, Method, Parameter, Source, Stmt},
    errors::errors::{SyntaxError, SyntaxErrorKind},
    lexer::tokens::{Token, TokenKind},
    Position,
};

/// Parsing state: the token stream, a cursor and the expression id counter.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    current_id: u32,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            pos: 0,
            current_id: 0,
        }
    }

    fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    fn current_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Consumes the current token if it has the given kind.
    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.current_token_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, SyntaxError> {
        if self.current_token_kind() == TokenKind::EOF && kind != TokenKind::EOF {
            return Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedEof {
                    expected: String::from(expected),
                },
                self.current_position(),
            ));
        }
        if self.current_token_kind() != kind {
            return Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedTokenDetailed {
                    token: self.current_token().value.clone(),
                    expected: String::from(expected),
                },
                self.current_position(),
            ));
        }
        Ok(self.advance())
    }

    fn advance_id(&mut self) -> ExprId {
        let id = self.current_id;
        self.current_id += 1;
        ExprId(id)
    }

    fn expr(&mut self, kind: ExprKind) -> Expr {
        Expr::new(self.advance_id(), kind)
    }

    // source ::= field* method*

    pub fn parse_source(&mut self) -> Result<Source, SyntaxError> {
        let mut fields = vec![];
        let mut methods = vec![];

        while self.current_token_kind() == TokenKind::Let {
            fields.push(self.parse_field()?);
        }
        while self.current_token_kind() == TokenKind::Def {
            methods.push(self.parse_method()?);
        }

        if self.current_token_kind() != TokenKind::EOF {
            return Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedTokenDetailed {
                    token: self.current_token().value.clone(),
                    expected: String::from("`LET`, `DEF` or end of input"),
                },
                self.current_position(),
            ));
        }

        Ok(Source { fields, methods })
    }

    fn parse_field(&mut self) -> Result<Field, SyntaxError> {
        self.expect(TokenKind::Let, "`LET`")?;
        let name = self.expect(TokenKind::Identifier, "a field name")?.value;

        let type_name = if self.matches(TokenKind::Colon) {
            Some(self.expect(TokenKind::Identifier, "a type name")?.value)
        } else {
            None
        };

        let value = if self.matches(TokenKind::Assignment) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect(TokenKind::Semicolon, "`;`")?;
        Ok(Field {
            name,
            type_name,
            value,
        })
    }

    fn parse_method(&mut self) -> Result<Method, SyntaxError> {
        self.expect(TokenKind::Def, "`DEF`")?;
        let name = self.expect(TokenKind::Identifier, "a method name")?.value;

        self.expect(TokenKind::OpenParen, "`(`")?;
        let mut parameters = vec![];
        if self.current_token_kind() != TokenKind::CloseParen {
            loop {
                let name = self.expect(TokenKind::Identifier, "a parameter name")?.value;
                let type_name = if self.matches(TokenKind::Colon) {
                    Some(self.expect(TokenKind::Identifier, "a type name")?.value)
                } else {
                    None
                };
                parameters.push(Parameter { name, type_name });
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::CloseParen, "`)`")?;

        let return_type_name = if self.matches(TokenKind::Colon) {
            Some(self.expect(TokenKind::Identifier, "a type name")?.value)
        } else {
            None
        };

        self.expect(TokenKind::Do, "`DO`")?;
        let statements = self.parse_statement_list(&[TokenKind::End])?;
        self.expect(TokenKind::End, "`END`")?;

        Ok(Method {
            name,
            parameters,
            return_type_name,
            statements,
        })
    }

    /// Parses statements until one of the terminator tokens, which is left
    /// in the stream for the caller to consume.
    fn parse_statement_list(
        &mut self,
        terminators: &[TokenKind],
    ) -> Result<Vec<Stmt>, SyntaxError> {
        let mut statements = vec![];
        while !terminators.contains(&self.current_token_kind()) {
            if self.current_token_kind() == TokenKind::EOF {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::UnexpectedEof {
                        expected: String::from("`END`"),
                    },
                    self.current_position(),
                ));
            }
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Stmt, SyntaxError> {
        match self.current_token_kind() {
            TokenKind::Let => self.parse_declaration(),
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::While => self.parse_while(),
            TokenKind::Return => self.parse_return(),
            _ => {
                let expression = self.parse_expression()?;
                if self.matches(TokenKind::Assignment) {
                    let value = self.parse_expression()?;
                    self.expect(TokenKind::Semicolon, "`;`")?;
                    Ok(Stmt::Assignment {
                        target: expression,
                        value,
                    })
                } else {
                    self.expect(TokenKind::Semicolon, "`;`")?;
                    Ok(Stmt::Expression(expression))
                }
            }
        }
    }

    fn parse_declaration(&mut self) -> Result<Stmt, SyntaxError> {
        self.expect(TokenKind::Let, "`LET`")?;
        let name = self.expect(TokenKind::Identifier, "a variable name")?.value;

        let type_name = if self.matches(TokenKind::Colon) {
            Some(self.expect(TokenKind::Identifier, "a type name")?.value)
        } else {
            None
        };

        let value = if self.matches(TokenKind::Assignment) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect(TokenKind::Semicolon, "`;`")?;
        Ok(Stmt::Declaration {
            name,
            type_name,
            value,
        })
    }

    fn parse_if(&mut self) -> Result<Stmt, SyntaxError> {
        self.expect(TokenKind::If, "`IF`")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::Do, "`DO`")?;
        let then_statements = self.parse_statement_list(&[TokenKind::Else, TokenKind::End])?;
        let else_statements = if self.matches(TokenKind::Else) {
            self.parse_statement_list(&[TokenKind::End])?
        } else {
            vec![]
        };
        self.expect(TokenKind::End, "`END`")?;
        Ok(Stmt::If {
            condition,
            then_statements,
            else_statements,
        })
    }

    fn parse_for(&mut self) -> Result<Stmt, SyntaxError> {
        self.expect(TokenKind::For, "`FOR`")?;
        let name = self.expect(TokenKind::Identifier, "a loop variable name")?.value;
        self.expect(TokenKind::In, "`IN`")?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Do, "`DO`")?;
        let statements = self.parse_statement_list(&[TokenKind::End])?;
        self.expect(TokenKind::End, "`END`")?;
        Ok(Stmt::For {
            name,
            value,
            statements,
        })
    }

    fn parse_while(&mut self) -> Result<Stmt, SyntaxError> {
        self.expect(TokenKind::While, "`WHILE`")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::Do, "`DO`")?;
        let statements = self.parse_statement_list(&[TokenKind::End])?;
        self.expect(TokenKind::End, "`END`")?;
        Ok(Stmt::While {
            condition,
            statements,
        })
    }

    fn parse_return(&mut self) -> Result<Stmt, SyntaxError> {
        self.expect(TokenKind::Return, "`RETURN`")?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "`;`")?;
        Ok(Stmt::Return(value))
    }

    // expr ::= logical

    pub fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_logical()
    }

    fn parse_logical(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_equality()?;
        loop {
            let operator = match self.current_token_kind() {
                TokenKind::And => BinaryOp::And,
                TokenKind::Or => BinaryOp::Or,
                _ => break,
            };
            self.advance();
            let right = self.parse_equality()?;
            left = self.expr(ExprKind::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_additive()?;
        loop {
            let operator = match self.current_token_kind() {
                TokenKind::Less => BinaryOp::Less,
                TokenKind::LessEquals => BinaryOp::LessEquals,
                TokenKind::Greater => BinaryOp::Greater,
                TokenKind::GreaterEquals => BinaryOp::GreaterEquals,
                TokenKind::Equals => BinaryOp::Equals,
                TokenKind::NotEquals => BinaryOp::NotEquals,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive()?;
            left = self.expr(ExprKind::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let operator = match self.current_token_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Dash => BinaryOp::Subtract,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = self.expr(ExprKind::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_secondary()?;
        loop {
            let operator = match self.current_token_kind() {
                TokenKind::Star => BinaryOp::Multiply,
                TokenKind::Slash => BinaryOp::Divide,
                _ => break,
            };
            self.advance();
            let right = self.parse_secondary()?;
            left = self.expr(ExprKind::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    // secondary ::= primary ('.' identifier ('(' arguments ')')?)*

    fn parse_secondary(&mut self) -> Result<Expr, SyntaxError> {
        let mut receiver = self.parse_primary()?;
        while self.matches(TokenKind::Dot) {
            let name = self.expect(TokenKind::Identifier, "a member name")?.value;
            if self.matches(TokenKind::OpenParen) {
                let arguments = self.parse_arguments()?;
                receiver = self.expr(ExprKind::Function {
                    receiver: Some(Box::new(receiver)),
                    name,
                    arguments,
                });
            } else {
                receiver = self.expr(ExprKind::Access {
                    receiver: Some(Box::new(receiver)),
                    name,
                });
            }
        }
        Ok(receiver)
    }

    /// Parses a comma-separated argument list; the opening parenthesis has
    /// already been consumed.
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        let mut arguments = vec![];
        if self.current_token_kind() != TokenKind::CloseParen {
            loop {
                arguments.push(self.parse_expression()?);
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::CloseParen, "`)`")?;
        Ok(arguments)
    }

    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        match self.current_token_kind() {
            TokenKind::Nil => {
                self.advance();
                Ok(self.expr(ExprKind::Literal(Literal::Nil)))
            }
            TokenKind::True => {
                self.advance();
                Ok(self.expr(ExprKind::Literal(Literal::Boolean(true))))
            }
            TokenKind::False => {
                self.advance();
                Ok(self.expr(ExprKind::Literal(Literal::Boolean(false))))
            }
            TokenKind::Integer => {
                let token = self.advance();
                let value = BigInt::from_str(&token.value).map_err(|_| {
                    SyntaxError::new(
                        SyntaxErrorKind::NumberParseError {
                            token: token.value.clone(),
                        },
                        token.span.start.clone(),
                    )
                })?;
                Ok(self.expr(ExprKind::Literal(Literal::Integer(value))))
            }
            TokenKind::Decimal => {
                let token = self.advance();
                let value = BigDecimal::from_str(&token.value).map_err(|_| {
                    SyntaxError::new(
                        SyntaxErrorKind::NumberParseError {
                            token: token.value.clone(),
                        },
                        token.span.start.clone(),
                    )
                })?;
                Ok(self.expr(ExprKind::Literal(Literal::Decimal(value))))
            }
            TokenKind::Character => {
                let token = self.advance();
                let value = token.value.chars().next().unwrap_or('\0');
                Ok(self.expr(ExprKind::Literal(Literal::Character(value))))
            }
            TokenKind::String => {
                let token = self.advance();
                Ok(self.expr(ExprKind::Literal(Literal::String(token.value))))
            }
            TokenKind::Identifier => {
                let name = self.advance().value;
                if self.matches(TokenKind::OpenParen) {
                    let arguments = self.parse_arguments()?;
                    Ok(self.expr(ExprKind::Function {
                        receiver: None,
                        name,
                        arguments,
                    }))
                } else {
                    Ok(self.expr(ExprKind::Access {
                        receiver: None,
                        name,
                    }))
                }
            }
            TokenKind::OpenParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(TokenKind::CloseParen, "`)`")?;
                Ok(self.expr(ExprKind::Group(Box::new(inner))))
            }
            TokenKind::EOF => Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedEof {
                    expected: String::from("an expression"),
                },
                self.current_position(),
            )),
            _ => Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedToken {
                    token: self.current_token().value.clone(),
                },
                self.current_position(),
            )),
        }
    }
}

/// Parses a complete token stream into a `Source` tree.
pub fn parse(tokens: Vec<Token>) -> Result<Source, SyntaxError> {
    Parser::new(tokens).parse_source()
}
