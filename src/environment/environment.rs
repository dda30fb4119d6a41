use std::collections::HashMap;
use std::fmt::Display;

use crate::errors::errors::AnalysisError;

/// One entry in the built-in type catalog.
///
/// There are no user-defined types, so identity comparison is plain enum
/// equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeId {
    Any,
    Nil,
    Boolean,
    Character,
    String,
    Integer,
    Decimal,
    Comparable,
    IntegerIterable,
}

impl TypeId {
    pub fn lookup(name: &str) -> Result<TypeId, AnalysisError> {
        match name {
            "Any" => Ok(TypeId::Any),
            "Nil" => Ok(TypeId::Nil),
            "Boolean" => Ok(TypeId::Boolean),
            "Character" => Ok(TypeId::Character),
            "String" => Ok(TypeId::String),
            "Integer" => Ok(TypeId::Integer),
            "Decimal" => Ok(TypeId::Decimal),
            "Comparable" => Ok(TypeId::Comparable),
            "IntegerIterable" => Ok(TypeId::IntegerIterable),
            _ => Err(AnalysisError::UnknownType {
                name: String::from(name),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TypeId::Any => "Any",
            TypeId::Nil => "Nil",
            TypeId::Boolean => "Boolean",
            TypeId::Character => "Character",
            TypeId::String => "String",
            TypeId::Integer => "Integer",
            TypeId::Decimal => "Decimal",
            TypeId::Comparable => "Comparable",
            TypeId::IntegerIterable => "IntegerIterable",
        }
    }

    /// The spelling of this type in generated Java source.
    pub fn jvm_name(&self) -> &'static str {
        match self {
            TypeId::Any => "Object",
            TypeId::Nil => "Void",
            TypeId::Boolean => "boolean",
            TypeId::Character => "char",
            TypeId::String => "String",
            TypeId::Integer => "int",
            TypeId::Decimal => "double",
            TypeId::Comparable => "Comparable",
            TypeId::IntegerIterable => "Iterable<Integer>",
        }
    }

    /// Whether values of this type admit `<`/`<=`/`>`/`>=`/`==`/`!=`.
    pub fn is_comparable(&self) -> bool {
        matches!(
            self,
            TypeId::Integer
                | TypeId::Character
                | TypeId::String
                | TypeId::Decimal
                | TypeId::Comparable
        )
    }
}

impl Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A declared callable: name, parameter types and return type. For methods,
/// parameter slot 0 holds the receiver type.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSig {
    pub name: String,
    /// The spelling used when rendering a call in generated source.
    pub jvm_name: String,
    pub parameter_types: Vec<TypeId>,
    pub return_type: TypeId,
}

impl FunctionSig {
    pub fn new(name: &str, parameter_types: Vec<TypeId>, return_type: TypeId) -> Self {
        FunctionSig {
            name: String::from(name),
            jvm_name: String::from(name),
            parameter_types,
            return_type,
        }
    }

    pub fn with_jvm_name(mut self, jvm_name: &str) -> Self {
        self.jvm_name = String::from(jvm_name);
        self
    }

    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}

/// Member tables for the built-in types. The catalog ships no members of its
/// own; the tables exist so field and method resolution has one authority.
pub struct Environment {
    fields: HashMap<(TypeId, String), TypeId>,
    methods: HashMap<(TypeId, String, usize), FunctionSig>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            fields: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    pub fn get_field(&self, receiver: TypeId, name: &str) -> Result<TypeId, AnalysisError> {
        self.fields
            .get(&(receiver, String::from(name)))
            .copied()
            .ok_or_else(|| AnalysisError::UnknownField {
                type_name: String::from(receiver.name()),
                field: String::from(name),
            })
    }

    pub fn get_method(
        &self,
        receiver: TypeId,
        name: &str,
        arity: usize,
    ) -> Result<&FunctionSig, AnalysisError> {
        self.methods
            .get(&(receiver, String::from(name), arity))
            .ok_or_else(|| AnalysisError::UnknownMethod {
                type_name: String::from(receiver.name()),
                method: String::from(name),
                arity,
            })
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

/// Directional assignability: a `source` value may be stored where `target`
/// is expected iff the types match, the target is `Any`, or the target is
/// `Comparable` and the source is one of its four members.
pub fn require_assignable(target: TypeId, source: TypeId) -> Result<(), AnalysisError> {
    let assignable = target == source
        || target == TypeId::Any
        || (target == TypeId::Comparable
            && matches!(
                source,
                TypeId::Integer | TypeId::Character | TypeId::String | TypeId::Decimal
            ));

    if assignable {
        Ok(())
    } else {
        Err(AnalysisError::TypeMismatch {
            expected: String::from(target.name()),
            received: String::from(source.name()),
        })
    }
}
