use crate::errors::errors::SyntaxErrorKind;
use crate::lexer::lexer::tokenize;
use crate::lexer::tokens::TokenKind;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(String::from(source), None)
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

fn values(source: &str) -> Vec<String> {
    tokenize(String::from(source), None)
        .unwrap()
        .iter()
        .map(|token| token.value.clone())
        .collect()
}

#[test]
fn test_keywords_and_identifiers() {
    assert_eq!(
        kinds("LET x = NIL;"),
        vec![
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Nil,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );

    // Keywords are case-sensitive; lowercase forms are plain identifiers.
    assert_eq!(
        kinds("let while"),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_operators() {
    assert_eq!(
        kinds("== != <= >= < > = . , : ;"),
        vec![
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Assignment,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_integer_and_decimal_literals() {
    assert_eq!(
        kinds("1 2.5 007"),
        vec![
            TokenKind::Integer,
            TokenKind::Decimal,
            TokenKind::Integer,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_signed_literal_versus_subtraction() {
    // After an operand, `-` is an operator.
    assert_eq!(
        kinds("x - 1"),
        vec![
            TokenKind::Identifier,
            TokenKind::Dash,
            TokenKind::Integer,
            TokenKind::EOF,
        ]
    );
    assert_eq!(
        kinds("x -1"),
        vec![
            TokenKind::Identifier,
            TokenKind::Dash,
            TokenKind::Integer,
            TokenKind::EOF,
        ]
    );

    // After a keyword or operator, the sign belongs to the literal.
    let tokens = tokenize(String::from("RETURN -2147483648;"), None).unwrap();
    assert_eq!(tokens[1].kind, TokenKind::Integer);
    assert_eq!(tokens[1].value, "-2147483648");

    let tokens = tokenize(String::from("1 + +5"), None).unwrap();
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::Integer,
            TokenKind::Plus,
            TokenKind::Integer,
            TokenKind::EOF,
        ]
    );
    assert_eq!(tokens[2].value, "+5");
}

#[test]
fn test_string_literal_escapes() {
    assert_eq!(
        values("\"Hello, World!\""),
        vec![String::from("Hello, World!"), String::from("EOF")]
    );
    assert_eq!(
        values("\"a\\nb\\t\\\"c\\\"\""),
        vec![String::from("a\nb\t\"c\""), String::from("EOF")]
    );
}

#[test]
fn test_character_literals() {
    let tokens = tokenize(String::from("'a' '\\n' '\\''"), None).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Character);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].value, "\n");
    assert_eq!(tokens[2].value, "'");
}

#[test]
fn test_comments_and_whitespace_are_skipped() {
    assert_eq!(
        kinds("LET x; // trailing comment\nx"),
        vec![
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_unrecognised_character_reports_index() {
    let error = tokenize(String::from("LET a = #;"), None).unwrap_err();
    assert!(matches!(
        error.kind(),
        SyntaxErrorKind::UnrecognisedCharacter { found } if found == "#"
    ));
    assert_eq!(error.get_position().0, 8);
}

#[test]
fn test_unterminated_string() {
    let error = tokenize(String::from("\"abc"), None).unwrap_err();
    assert!(matches!(error.kind(), SyntaxErrorKind::UnterminatedString));
    assert_eq!(error.get_position().0, 0);
}

#[test]
fn test_invalid_escape() {
    let error = tokenize(String::from("\"a\\qb\""), None).unwrap_err();
    assert!(matches!(
        error.kind(),
        SyntaxErrorKind::InvalidEscape { escape } if escape == "q"
    ));
}
