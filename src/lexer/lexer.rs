use std::rc::Rc;

use regex::Regex;

use crate::{
    errors::errors::{SyntaxError, SyntaxErrorKind},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), SyntaxError>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.source[self.pos..].chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    fn last_token_ends_operand(&self) -> bool {
        self.tokens
            .last()
            .map(|token| token.kind.ends_operand())
            .unwrap_or(false)
    }
}

/// Decodes one escape character from the set the language supports.
fn decode_escape(escape: char) -> Option<char> {
    match escape {
        'b' => Some('\u{0008}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        '\'' => Some('\''),
        '"' => Some('"'),
        '\\' => Some('\\'),
        _ => None,
    }
}

/// All token patterns, in match-priority order. Each regex is anchored so a
/// pattern only ever matches at the current lexer position.
fn build_patterns() -> Vec<RegexPattern> {
    vec![
        RegexPattern {
            regex: Regex::new("^[A-Za-z_][A-Za-z0-9_]*").unwrap(),
            handler: symbol_handler,
        },
        RegexPattern {
            regex: Regex::new("^[+-]?[0-9]+(\\.[0-9]+)?").unwrap(),
            handler: number_handler,
        },
        RegexPattern {
            regex: Regex::new("^\\s+").unwrap(),
            handler: skip_handler,
        },
        RegexPattern {
            regex: Regex::new("^//.*").unwrap(),
            handler: skip_handler,
        },
        RegexPattern {
            regex: Regex::new("^'(\\\\.|[^'\\r\\n])'").unwrap(),
            handler: character_handler,
        },
        RegexPattern {
            regex: Regex::new("^\"(\\\\.|[^\"\\\\\\r\\n])*\"").unwrap(),
            handler: string_handler,
        },
        // A lone quote means the literal above failed to close.
        RegexPattern {
            regex: Regex::new("^'").unwrap(),
            handler: |lexer, _| {
                Err(SyntaxError::new(
                    SyntaxErrorKind::UnterminatedCharacter,
                    lexer.position(),
                ))
            },
        },
        RegexPattern {
            regex: Regex::new("^\"").unwrap(),
            handler: |lexer, _| {
                Err(SyntaxError::new(
                    SyntaxErrorKind::UnterminatedString,
                    lexer.position(),
                ))
            },
        },
        RegexPattern {
            regex: Regex::new("^\\(").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "("),
        },
        RegexPattern {
            regex: Regex::new("^\\)").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")"),
        },
        RegexPattern {
            regex: Regex::new("^==").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "=="),
        },
        RegexPattern {
            regex: Regex::new("^!=").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!="),
        },
        RegexPattern {
            regex: Regex::new("^=").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "="),
        },
        RegexPattern {
            regex: Regex::new("^<=").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<="),
        },
        RegexPattern {
            regex: Regex::new("^<").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<"),
        },
        RegexPattern {
            regex: Regex::new("^>=").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">="),
        },
        RegexPattern {
            regex: Regex::new("^>").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">"),
        },
        RegexPattern {
            regex: Regex::new("^\\.").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, "."),
        },
        RegexPattern {
            regex: Regex::new("^;").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";"),
        },
        RegexPattern {
            regex: Regex::new("^:").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":"),
        },
        RegexPattern {
            regex: Regex::new("^,").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ","),
        },
        RegexPattern {
            regex: Regex::new("^\\+").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
        },
        RegexPattern {
            regex: Regex::new("^-").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-"),
        },
        RegexPattern {
            regex: Regex::new("^\\*").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*"),
        },
        RegexPattern {
            regex: Regex::new("^/").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/"),
        },
    ]
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), SyntaxError> {
    let matched = match regex.find(lexer.remainder()) {
        Some(matched) => matched.as_str().to_string(),
        None => unreachable!("number pattern matched during dispatch"),
    };

    // A sign is only part of the literal when the previous token cannot end
    // an operand: `x - 1` subtracts, `RETURN -1;` is a negative literal.
    if (matched.starts_with('+') || matched.starts_with('-')) && lexer.last_token_ends_operand() {
        let kind = if matched.starts_with('+') {
            TokenKind::Plus
        } else {
            TokenKind::Dash
        };
        lexer.push(MK_TOKEN!(
            kind,
            matched[..1].to_string(),
            Span {
                start: lexer.position(),
                end: Position(lexer.pos as u32 + 1, Rc::clone(&lexer.file)),
            }
        ));
        lexer.advance_n(1);
        return Ok(());
    }

    let kind = if matched.contains('.') {
        TokenKind::Decimal
    } else {
        TokenKind::Integer
    };

    lexer.push(MK_TOKEN!(
        kind,
        matched.clone(),
        Span {
            start: lexer.position(),
            end: Position(
                (lexer.pos + matched.len()) as u32,
                Rc::clone(&lexer.file)
            ),
        }
    ));
    lexer.advance_n(matched.len());
    Ok(())
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), SyntaxError> {
    let matched = match regex.find(lexer.remainder()) {
        Some(matched) => matched.end(),
        None => unreachable!("skip pattern matched during dispatch"),
    };
    lexer.advance_n(matched);
    Ok(())
}

fn character_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), SyntaxError> {
    let matched = match regex.find(lexer.remainder()) {
        Some(matched) => matched.as_str().to_string(),
        None => unreachable!("character pattern matched during dispatch"),
    };

    let inner = &matched[1..matched.len() - 1];
    let value = if let Some(escape) = inner.strip_prefix('\\') {
        let escape_char = escape.chars().next().unwrap_or('\0');
        decode_escape(escape_char).ok_or_else(|| {
            SyntaxError::new(
                SyntaxErrorKind::InvalidEscape {
                    escape: escape_char.to_string(),
                },
                Position(lexer.pos as u32 + 1, Rc::clone(&lexer.file)),
            )
        })?
    } else {
        match inner.chars().next() {
            Some(value) => value,
            None => {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::UnterminatedCharacter,
                    lexer.position(),
                ))
            }
        }
    };

    lexer.push(MK_TOKEN!(
        TokenKind::Character,
        value.to_string(),
        Span {
            start: lexer.position(),
            end: Position(
                (lexer.pos + matched.len()) as u32,
                Rc::clone(&lexer.file)
            ),
        }
    ));
    lexer.advance_n(matched.len());
    Ok(())
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), SyntaxError> {
    let matched = match regex.find(lexer.remainder()) {
        Some(matched) => matched.as_str().to_string(),
        None => unreachable!("string pattern matched during dispatch"),
    };

    let mut result = String::new();
    let mut chars = matched[1..matched.len() - 1].char_indices();

    while let Some((offset, ch)) = chars.next() {
        if ch == '\\' {
            let (_, escape) = chars.next().unwrap_or((0, '\0'));
            match decode_escape(escape) {
                Some(decoded) => result.push(decoded),
                None => {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::InvalidEscape {
                            escape: escape.to_string(),
                        },
                        Position(
                            (lexer.pos + offset + 1) as u32,
                            Rc::clone(&lexer.file),
                        ),
                    ))
                }
            }
        } else {
            result.push(ch);
        }
    }

    lexer.push(MK_TOKEN!(
        TokenKind::String,
        result,
        Span {
            start: lexer.position(),
            end: Position(
                (lexer.pos + matched.len()) as u32,
                Rc::clone(&lexer.file)
            ),
        }
    ));
    lexer.advance_n(matched.len());
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), SyntaxError> {
    let matched = match regex.find(lexer.remainder()) {
        Some(matched) => matched.as_str().to_string(),
        None => unreachable!("symbol pattern matched during dispatch"),
    };

    let kind = RESERVED_LOOKUP
        .get(matched.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.push(MK_TOKEN!(
        kind,
        matched.clone(),
        Span {
            start: lexer.position(),
            end: Position(
                (lexer.pos + matched.len()) as u32,
                Rc::clone(&lexer.file)
            ),
        }
    ));
    lexer.advance_n(matched.len());
    Ok(())
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, SyntaxError> {
    let patterns = build_patterns();
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in patterns.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex)?;
                matched = true;
                break;
            }
        }

        if !matched {
            return Err(SyntaxError::new(
                SyntaxErrorKind::UnrecognisedCharacter {
                    found: lex.at().to_string(),
                },
                lex.position(),
            ));
        }
    }

    let eof_span = Span {
        start: lex.position(),
        end: lex.position(),
    };
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), eof_span));
    Ok(lex.tokens)
}
