use num_bigint::BigInt;

use crate::ast::ast::{BinaryOp, Expr, ExprKind, Literal, Source, Stmt};
use crate::errors::errors::SyntaxErrorKind;
use crate::lexer::lexer::tokenize;
use crate::parser::parser::parse;

fn parse_source(source: &str) -> Source {
    parse(tokenize(String::from(source), None).unwrap()).unwrap()
}

fn parse_error(source: &str) -> SyntaxErrorKind {
    parse(tokenize(String::from(source), None).unwrap())
        .unwrap_err()
        .kind()
        .clone()
}

/// Strips grouping and ids so tests can compare structure directly.
fn shape(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Literal(Literal::Integer(value)) => value.to_string(),
        ExprKind::Literal(literal) => format!("{:?}", literal),
        ExprKind::Group(inner) => format!("({})", shape(inner)),
        ExprKind::Binary {
            operator,
            left,
            right,
        } => format!("[{} {} {}]", shape(left), operator, shape(right)),
        ExprKind::Access { receiver, name } => match receiver {
            Some(receiver) => format!("{}.{}", shape(receiver), name),
            None => name.clone(),
        },
        ExprKind::Function {
            receiver,
            name,
            arguments,
        } => {
            let arguments = arguments.iter().map(shape).collect::<Vec<_>>().join(", ");
            match receiver {
                Some(receiver) => format!("{}.{}({})", shape(receiver), name, arguments),
                None => format!("{}({})", name, arguments),
            }
        }
    }
}

fn parse_expression(source: &str) -> String {
    let program = parse_source(&format!("DEF main() DO RETURN {}; END", source));
    match &program.methods[0].statements[0] {
        Stmt::Return(value) => shape(value),
        other => panic!("expected a return statement, got {:?}", other),
    }
}

#[test]
fn test_fields_then_methods() {
    let program = parse_source("LET a = 1; LET b: Decimal; DEF main() DO RETURN a; END");
    assert_eq!(program.fields.len(), 2);
    assert_eq!(program.fields[0].name, "a");
    assert_eq!(program.fields[0].type_name, None);
    assert_eq!(
        program.fields[0].value,
        Some(Expr::new(
            program.fields[0].value.as_ref().unwrap().id,
            ExprKind::Literal(Literal::Integer(BigInt::from(1))),
        ))
    );
    assert_eq!(program.fields[1].type_name, Some(String::from("Decimal")));
    assert_eq!(program.fields[1].value, None);
    assert_eq!(program.methods.len(), 1);
}

#[test]
fn test_method_parameters_and_return_annotation() {
    let program = parse_source("DEF area(w: Integer, h): Integer DO RETURN w * h; END");
    let method = &program.methods[0];
    assert_eq!(method.name, "area");
    assert_eq!(method.parameters.len(), 2);
    assert_eq!(method.parameters[0].name, "w");
    assert_eq!(method.parameters[0].type_name, Some(String::from("Integer")));
    assert_eq!(method.parameters[1].type_name, None);
    assert_eq!(method.return_type_name, Some(String::from("Integer")));
}

#[test]
fn test_precedence() {
    assert_eq!(parse_expression("1 + 2 * 3"), "[1 + [2 * 3]]");
    assert_eq!(parse_expression("(1 + 2) * 3"), "[([1 + 2]) * 3]");
    assert_eq!(parse_expression("1 < 2 AND 3 < 4"), "[[1 < 2] AND [3 < 4]]");
    assert_eq!(
        parse_expression("TRUE OR FALSE AND TRUE"),
        "[[Boolean(true) OR Boolean(false)] AND Boolean(true)]"
    );
}

#[test]
fn test_left_associativity() {
    assert_eq!(parse_expression("1 - 2 - 3"), "[[1 - 2] - 3]");
    assert_eq!(parse_expression("8 / 4 / 2"), "[[8 / 4] / 2]");
}

#[test]
fn test_member_chains() {
    assert_eq!(parse_expression("obj.field"), "obj.field");
    assert_eq!(parse_expression("obj.method(x, 1)"), "obj.method(x, 1)");
    assert_eq!(parse_expression("a.b.c(d).e"), "a.b.c(d).e");
    assert_eq!(parse_expression("print(1 + 2)"), "print([1 + 2])");
}

#[test]
fn test_statements() {
    let program = parse_source(
        "DEF main() DO \
            LET x = 0; \
            WHILE x < 3 DO x = x + 1; END \
            IF x == 3 DO print(x); ELSE RETURN x; END \
            FOR n IN list DO print(n); END \
            RETURN x; \
        END",
    );
    let statements = &program.methods[0].statements;
    assert_eq!(statements.len(), 5);
    assert!(matches!(statements[0], Stmt::Declaration { .. }));
    assert!(matches!(statements[1], Stmt::While { .. }));
    assert!(matches!(
        statements[2],
        Stmt::If {
            ref else_statements,
            ..
        } if else_statements.len() == 1
    ));
    assert!(matches!(statements[3], Stmt::For { .. }));
    assert!(matches!(statements[4], Stmt::Return(_)));
}

#[test]
fn test_assignment_statement() {
    let program = parse_source("DEF main() DO x = 1; obj.field = 2; END");
    let statements = &program.methods[0].statements;
    assert!(matches!(
        &statements[0],
        Stmt::Assignment { target, .. }
            if matches!(&target.kind, ExprKind::Access { receiver: None, name } if name == "x")
    ));
    assert!(matches!(
        &statements[1],
        Stmt::Assignment { target, .. }
            if matches!(&target.kind, ExprKind::Access { receiver: Some(_), .. })
    ));
}

#[test]
fn test_comparison_operators() {
    assert_eq!(parse_expression("a <= b"), format!("[a {} b]", BinaryOp::LessEquals));
    assert_eq!(parse_expression("a != b"), "[a != b]");
}

#[test]
fn test_missing_semicolon() {
    let error = parse_error("DEF main() DO RETURN 1 END");
    assert!(matches!(
        error,
        SyntaxErrorKind::UnexpectedTokenDetailed { ref token, ref expected }
            if token == "END" && expected == "`;`"
    ));
}

#[test]
fn test_unterminated_method() {
    let error = parse_error("DEF main() DO RETURN 1;");
    assert!(matches!(error, SyntaxErrorKind::UnexpectedEof { .. }));
}

#[test]
fn test_trailing_garbage() {
    let error = parse_error("LET a = 1; 5");
    assert!(matches!(
        error,
        SyntaxErrorKind::UnexpectedTokenDetailed { .. }
    ));
}

#[test]
fn test_expression_ids_are_unique() {
    let program = parse_source("DEF main() DO RETURN 1 + 2 + 3; END");
    let mut ids = vec![];
    fn collect(expr: &Expr, ids: &mut Vec<u32>) {
        ids.push(expr.id.0);
        match &expr.kind {
            ExprKind::Group(inner) => collect(inner, ids),
            ExprKind::Binary { left, right, .. } => {
                collect(left, ids);
                collect(right, ids);
            }
            ExprKind::Access { receiver, .. } => {
                if let Some(receiver) = receiver {
                    collect(receiver, ids);
                }
            }
            ExprKind::Function {
                receiver,
                arguments,
                ..
            } => {
                if let Some(receiver) = receiver {
                    collect(receiver, ids);
                }
                for argument in arguments {
                    collect(argument, ids);
                }
            }
            ExprKind::Literal(_) => {}
        }
    }
    if let Stmt::Return(value) = &program.methods[0].statements[0] {
        collect(value, &mut ids);
    }
    let count = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), count);
}
