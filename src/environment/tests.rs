use crate::environment::environment::{require_assignable, Environment, FunctionSig, TypeId};
use crate::environment::scope::Scope;
use crate::errors::errors::AnalysisError;

const ALL_TYPES: [TypeId; 9] = [
    TypeId::Any,
    TypeId::Nil,
    TypeId::Boolean,
    TypeId::Character,
    TypeId::String,
    TypeId::Integer,
    TypeId::Decimal,
    TypeId::Comparable,
    TypeId::IntegerIterable,
];

#[test]
fn test_every_type_assignable_to_itself() {
    for type_id in ALL_TYPES {
        assert_eq!(require_assignable(type_id, type_id), Ok(()));
    }
}

#[test]
fn test_any_accepts_everything() {
    for type_id in ALL_TYPES {
        assert_eq!(require_assignable(TypeId::Any, type_id), Ok(()));
    }
}

#[test]
fn test_comparable_accepts_exactly_four_types() {
    for type_id in ALL_TYPES {
        let expected = matches!(
            type_id,
            TypeId::Integer
                | TypeId::Character
                | TypeId::String
                | TypeId::Decimal
                | TypeId::Comparable
        );
        assert_eq!(
            require_assignable(TypeId::Comparable, type_id).is_ok(),
            expected,
            "Comparable <- {}",
            type_id
        );
    }
}

#[test]
fn test_mismatch_carries_both_names() {
    assert_eq!(
        require_assignable(TypeId::Integer, TypeId::Decimal),
        Err(AnalysisError::TypeMismatch {
            expected: String::from("Integer"),
            received: String::from("Decimal"),
        })
    );
    // Any as a source is not special.
    assert!(require_assignable(TypeId::Integer, TypeId::Any).is_err());
}

#[test]
fn test_type_lookup() {
    assert_eq!(TypeId::lookup("Integer"), Ok(TypeId::Integer));
    assert_eq!(TypeId::lookup("IntegerIterable"), Ok(TypeId::IntegerIterable));
    assert_eq!(
        TypeId::lookup("Widget"),
        Err(AnalysisError::UnknownType {
            name: String::from("Widget"),
        })
    );
}

#[test]
fn test_member_lookup_on_empty_catalog() {
    let environment = Environment::new();
    assert_eq!(
        environment.get_field(TypeId::String, "length"),
        Err(AnalysisError::UnknownField {
            type_name: String::from("String"),
            field: String::from("length"),
        })
    );
    assert_eq!(
        environment.get_method(TypeId::String, "slice", 2).unwrap_err(),
        AnalysisError::UnknownMethod {
            type_name: String::from("String"),
            method: String::from("slice"),
            arity: 2,
        }
    );
}

#[test]
fn test_scope_shadowing_and_discard() {
    let mut scope: Scope<TypeId, FunctionSig> = Scope::new();
    scope.define_variable("x", TypeId::Integer);

    scope.enter();
    scope.define_variable("x", TypeId::String);
    scope.define_variable("inner", TypeId::Boolean);
    assert_eq!(scope.lookup_variable("x"), Some(&TypeId::String));
    assert_eq!(scope.lookup_variable("inner"), Some(&TypeId::Boolean));
    scope.exit();

    // The nested frame is gone, along with its shadow.
    assert_eq!(scope.lookup_variable("x"), Some(&TypeId::Integer));
    assert_eq!(scope.lookup_variable("inner"), None);
}

#[test]
fn test_scope_overload_by_arity() {
    let mut scope: Scope<TypeId, FunctionSig> = Scope::new();
    scope.define_function("f", 1, FunctionSig::new("f", vec![TypeId::Any], TypeId::Nil));
    scope.define_function(
        "f",
        2,
        FunctionSig::new("f", vec![TypeId::Any, TypeId::Any], TypeId::Nil),
    );

    assert_eq!(scope.lookup_function("f", 1).unwrap().arity(), 1);
    assert_eq!(scope.lookup_function("f", 2).unwrap().arity(), 2);
    assert!(scope.lookup_function("f", 3).is_none());
}

#[test]
fn test_scope_mutation_reaches_outer_frame() {
    let mut scope: Scope<i32, ()> = Scope::new();
    scope.define_variable("x", 1);

    scope.enter();
    *scope.lookup_variable_mut("x").unwrap() = 2;
    scope.exit();

    assert_eq!(scope.lookup_variable("x"), Some(&2));
}

#[test]
fn test_enter_at_resumes_captured_chain() {
    let mut scope: Scope<i32, ()> = Scope::new();
    scope.define_variable("global", 10);
    let root = scope.current_index();

    // A block frame with its own binding.
    scope.enter();
    scope.define_variable("local", 20);

    // A call frame chained to the root skips the block frame.
    scope.enter_at(root);
    assert_eq!(scope.lookup_variable("global"), Some(&10));
    assert_eq!(scope.lookup_variable("local"), None);
    scope.exit();

    assert_eq!(scope.lookup_variable("local"), Some(&20));
    scope.exit();
}
