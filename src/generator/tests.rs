use crate::analyzer::analyzer::analyze;
use crate::ast::ast::Source;
use crate::generator::generator::generate;
use crate::lexer::lexer::tokenize;
use crate::parser::parser::parse;

fn source(text: &str) -> Source {
    parse(tokenize(String::from(text), None).unwrap()).unwrap()
}

fn render(text: &str) -> String {
    let program = source(text);
    let analysis = analyze(&program).unwrap();
    generate(&program, &analysis).unwrap()
}

#[test]
fn test_hello_world() {
    let rendered = render(
        "LET x = 1; \
         DEF main(): Integer DO \
            print(\"Hello!\"); \
            RETURN x + 1; \
         END",
    );
    let expected = "\
public class Main {

    int x = 1;

    public static void main(String[] args) {
        System.exit(new Main().main());
    }

    int main() {
        System.out.println(\"Hello!\");
        return x + 1;
    }

}";
    assert_eq!(rendered, expected);
}

#[test]
fn test_entry_point_without_fields() {
    let rendered = render("DEF main(): Integer DO RETURN 0; END");
    let expected = "\
public class Main {

    public static void main(String[] args) {
        System.exit(new Main().main());
    }

    int main() {
        return 0;
    }

}";
    assert_eq!(rendered, expected);
}

#[test]
fn test_control_flow_rendering() {
    let rendered = render(
        "DEF main(): Integer DO \
            LET x = 10; \
            WHILE x > 0 DO x = x - 1; END \
            IF x == 0 DO print(x); ELSE print(0 - x); END \
            RETURN x; \
         END",
    );
    assert!(rendered.contains(
        "\
        while (x > 0) {
            x = x - 1;
        }"
    ));
    assert!(rendered.contains(
        "\
        if (x == 0) {
            System.out.println(x);
        } else {
            System.out.println(0 - x);
        }"
    ));
}

#[test]
fn test_logical_operators_are_respelled() {
    let rendered = render(
        "DEF main(): Integer DO \
            LET a = TRUE AND FALSE OR TRUE; \
            RETURN 1; \
         END",
    );
    assert!(rendered.contains("boolean a = true && false || true;"));
}

#[test]
fn test_for_loop_rendering() {
    let rendered = render(
        "LET xs: IntegerIterable; \
         DEF main(): Integer DO \
            FOR n IN xs DO print(n); END \
            RETURN 0; \
         END",
    );
    assert!(rendered.contains("Iterable<Integer> xs;"));
    assert!(rendered.contains(
        "\
        for (int n : xs) {
            System.out.println(n);
        }"
    ));
}

#[test]
fn test_literals_and_annotations() {
    let rendered = render(
        "LET c = 'a'; \
         LET s = \"line\\n\"; \
         LET d: Decimal = 1.5; \
         LET n: Any = NIL; \
         DEF main(): Integer DO RETURN 0; END",
    );
    assert!(rendered.contains("char c = 'a';"));
    assert!(rendered.contains("String s = \"line\\n\";"));
    assert!(rendered.contains("double d = 1.5;"));
    assert!(rendered.contains("Object n = null;"));
}

#[test]
fn test_declared_types_come_from_inference() {
    let rendered = render(
        "DEF area(w: Integer, h: Integer): Integer DO RETURN w * h; END \
         DEF main(): Integer DO \
            LET a = area(3, 4); \
            RETURN a; \
         END",
    );
    assert!(rendered.contains("int area(int w, int h) {"));
    // `a` has no annotation; its type comes from the call's return type.
    assert!(rendered.contains("int a = area(3, 4);"));
}

#[test]
fn test_grouping_is_preserved() {
    let rendered = render("DEF main(): Integer DO RETURN (1 + 2) * 3; END");
    assert!(rendered.contains("return (1 + 2) * 3;"));
}
