use crate::errors::errors::{
    AnalysisError, ErrorTip, RuntimeError, SyntaxError, SyntaxErrorKind,
};
use crate::Position;

#[test]
fn test_syntax_error_name_and_position() {
    let error = SyntaxError::new(
        SyntaxErrorKind::UnrecognisedCharacter {
            found: String::from("#"),
        },
        Position(7, std::rc::Rc::new(String::from("test.lang"))),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedCharacter");
    assert_eq!(error.get_position().0, 7);
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_unexpected_token_tip() {
    let error = SyntaxError::new(
        SyntaxErrorKind::UnexpectedToken {
            token: String::from("END"),
        },
        Position::null(),
    );

    let tip = match error.get_tip() {
        ErrorTip::Suggestion(tip) => tip,
        ErrorTip::None => panic!("expected a suggestion"),
    };
    assert_eq!(tip, "Unexpected token: `END`, did you miss a semicolon?");
}

#[test]
fn test_syntax_error_display_includes_index() {
    let error = SyntaxError::new(
        SyntaxErrorKind::UnexpectedEof {
            expected: String::from("`END`"),
        },
        Position(42, std::rc::Rc::new(String::from("test.lang"))),
    );

    assert_eq!(
        error.to_string(),
        "unexpected end of input, expected `END` at index 42"
    );
}

#[test]
fn test_analysis_error_display() {
    let error = AnalysisError::TypeMismatch {
        expected: String::from("Boolean"),
        received: String::from("Integer"),
    };
    assert_eq!(
        error.to_string(),
        "types do not match: expected Boolean, received Integer"
    );

    let error = AnalysisError::MissingEntryPoint;
    assert_eq!(
        error.to_string(),
        "program has no zero-argument `main` method returning Integer"
    );

    let error = AnalysisError::EmptyBody { construct: "IF" };
    assert_eq!(error.to_string(), "IF body must not be empty");
}

#[test]
fn test_runtime_error_display() {
    let error = RuntimeError::division_by_zero();
    assert_eq!(error.to_string(), "arithmetic error: division by zero");

    let error = RuntimeError::TypeAssertionFailure {
        expected: String::from("Boolean"),
        received: String::from("String"),
    };
    assert_eq!(
        error.to_string(),
        "expected a Boolean value, received String"
    );

    let error = RuntimeError::UndefinedFunction {
        name: String::from("main"),
        arity: 0,
    };
    assert_eq!(
        error.to_string(),
        "function \"main\" taking 0 arguments is not defined"
    );
}
