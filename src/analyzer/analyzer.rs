use std::collections::HashMap;

use num_traits::ToPrimitive;

use crate::{
    ast::ast::{BinaryOp, Expr, ExprId, ExprKind, Literal, Method, Source, Stmt},
    environment::environment::{require_assignable, Environment, FunctionSig, TypeId},
    environment::scope::Scope,
    errors::errors::AnalysisError,
};

/// Scope entry carrying the declared return type of the method being
/// checked. The `$` prefix keeps it out of the identifier namespace.
const RETURN_SENTINEL: &str = "$return";

/// Everything the pass learned about the tree, keyed by expression id.
///
/// `types` has an entry for every expression after a successful pass;
/// `bindings` has one for every access and call.
#[derive(Debug, Default, PartialEq)]
pub struct Analysis {
    pub types: HashMap<ExprId, TypeId>,
    pub bindings: HashMap<ExprId, Binding>,
}

/// What an access or call expression resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Variable {
        name: String,
        type_id: TypeId,
    },
    Function {
        name: String,
        /// The rendered spelling of a call to this function.
        jvm_name: String,
        arity: usize,
    },
}

pub struct Analyzer {
    environment: Environment,
    scope: Scope<TypeId, FunctionSig>,
    analysis: Analysis,
}

/// Runs the full pass over a program, producing its side tables or the
/// first rule violation encountered.
pub fn analyze(source: &Source) -> Result<Analysis, AnalysisError> {
    let mut analyzer = Analyzer::new();
    analyzer.check_source(source)?;
    Ok(analyzer.analysis)
}

impl Analyzer {
    pub fn new() -> Self {
        let mut scope = Scope::new();
        scope.define_function(
            "print",
            1,
            FunctionSig::new("print", vec![TypeId::Any], TypeId::Nil)
                .with_jvm_name("System.out.println"),
        );

        Analyzer {
            environment: Environment::new(),
            scope,
            analysis: Analysis::default(),
        }
    }

    fn check_source(&mut self, source: &Source) -> Result<(), AnalysisError> {
        for field in &source.fields {
            self.declare_variable(&field.name, &field.type_name, &field.value)?;
        }

        // Signatures first, so bodies can call methods defined later.
        let mut signatures = vec![];
        for method in &source.methods {
            signatures.push(self.declare_method(method)?);
        }
        for (method, signature) in source.methods.iter().zip(&signatures) {
            self.check_method(method, signature)?;
        }

        match self.scope.lookup_function("main", 0) {
            Some(main) if require_assignable(main.return_type, TypeId::Integer).is_ok() => Ok(()),
            _ => Err(AnalysisError::MissingEntryPoint),
        }
    }

    /// Resolves a `LET` declaration's type, either from its annotation or by
    /// inference from its initializer, and binds it in the current frame.
    fn declare_variable(
        &mut self,
        name: &str,
        type_name: &Option<String>,
        value: &Option<Expr>,
    ) -> Result<(), AnalysisError> {
        let declared = match type_name {
            Some(type_name) => Some(TypeId::lookup(type_name)?),
            None => None,
        };
        let inferred = match value {
            Some(value) => Some(self.check_expression(value)?),
            None => None,
        };

        let type_id = match (declared, inferred) {
            (Some(declared), Some(inferred)) => {
                require_assignable(declared, inferred)?;
                declared
            }
            (Some(declared), None) => declared,
            (None, Some(inferred)) => inferred,
            (None, None) => {
                return Err(AnalysisError::MissingTypeInfo {
                    name: String::from(name),
                })
            }
        };

        self.scope.define_variable(name, type_id);
        Ok(())
    }

    fn declare_method(&mut self, method: &Method) -> Result<FunctionSig, AnalysisError> {
        let mut parameter_types = vec![];
        for parameter in &method.parameters {
            parameter_types.push(match &parameter.type_name {
                Some(type_name) => TypeId::lookup(type_name)?,
                None => TypeId::Any,
            });
        }
        let return_type = match &method.return_type_name {
            Some(type_name) => TypeId::lookup(type_name)?,
            None => TypeId::Any,
        };

        let signature = FunctionSig::new(&method.name, parameter_types, return_type);
        self.scope
            .define_function(&method.name, signature.arity(), signature.clone());
        Ok(signature)
    }

    fn check_method(&mut self, method: &Method, signature: &FunctionSig) -> Result<(), AnalysisError> {
        self.scope.enter();
        for (parameter, type_id) in method.parameters.iter().zip(&signature.parameter_types) {
            self.scope.define_variable(&parameter.name, *type_id);
        }
        self.scope
            .define_variable(RETURN_SENTINEL, signature.return_type);

        let result = self.check_statements(&method.statements);
        self.scope.exit();
        result
    }

    fn check_statements(&mut self, statements: &[Stmt]) -> Result<(), AnalysisError> {
        for statement in statements {
            self.check_statement(statement)?;
        }
        Ok(())
    }

    /// Checks one statement block inside a fresh frame that is discarded
    /// afterwards, so its declarations never leak.
    fn check_block(&mut self, statements: &[Stmt]) -> Result<(), AnalysisError> {
        self.scope.enter();
        let result = self.check_statements(statements);
        self.scope.exit();
        result
    }

    fn check_statement(&mut self, statement: &Stmt) -> Result<(), AnalysisError> {
        match statement {
            Stmt::Expression(expression) => {
                self.check_expression(expression)?;
                Ok(())
            }
            Stmt::Declaration {
                name,
                type_name,
                value,
            } => self.declare_variable(name, type_name, value),
            Stmt::Assignment { target, value } => {
                if !matches!(target.kind, ExprKind::Access { .. }) {
                    return Err(AnalysisError::InvalidAssignmentTarget);
                }
                let target_type = self.check_expression(target)?;
                let value_type = self.check_expression(value)?;
                require_assignable(target_type, value_type)
            }
            Stmt::If {
                condition,
                then_statements,
                else_statements,
            } => {
                let condition_type = self.check_expression(condition)?;
                require_assignable(TypeId::Boolean, condition_type)?;
                if then_statements.is_empty() {
                    return Err(AnalysisError::EmptyBody { construct: "IF" });
                }
                self.check_block(then_statements)?;
                self.check_block(else_statements)
            }
            Stmt::For {
                name,
                value,
                statements,
            } => {
                let value_type = self.check_expression(value)?;
                require_assignable(TypeId::IntegerIterable, value_type)?;
                if statements.is_empty() {
                    return Err(AnalysisError::EmptyBody { construct: "FOR" });
                }
                self.scope.enter();
                self.scope.define_variable(name, TypeId::Integer);
                let result = self.check_statements(statements);
                self.scope.exit();
                result
            }
            Stmt::While {
                condition,
                statements,
            } => {
                let condition_type = self.check_expression(condition)?;
                require_assignable(TypeId::Boolean, condition_type)?;
                self.check_block(statements)
            }
            Stmt::Return(value) => {
                let value_type = self.check_expression(value)?;
                let return_type = match self.scope.lookup_variable(RETURN_SENTINEL) {
                    Some(return_type) => *return_type,
                    None => unreachable!("return statements only occur inside method bodies"),
                };
                require_assignable(return_type, value_type)
            }
        }
    }

    /// Resolves an expression's type, recording it in the side table.
    fn check_expression(&mut self, expression: &Expr) -> Result<TypeId, AnalysisError> {
        let type_id = match &expression.kind {
            ExprKind::Literal(literal) => self.check_literal(literal)?,
            ExprKind::Group(inner) => self.check_expression(inner)?,
            ExprKind::Binary {
                operator,
                left,
                right,
            } => {
                let left = self.check_expression(left)?;
                let right = self.check_expression(right)?;
                self.check_binary(*operator, left, right)?
            }
            ExprKind::Access { receiver, name } => match receiver {
                Some(receiver) => {
                    let receiver_type = self.check_expression(receiver)?;
                    let field_type = self.environment.get_field(receiver_type, name)?;
                    self.analysis.bindings.insert(
                        expression.id,
                        Binding::Variable {
                            name: name.clone(),
                            type_id: field_type,
                        },
                    );
                    field_type
                }
                None => {
                    let type_id = match self.scope.lookup_variable(name) {
                        Some(type_id) => *type_id,
                        None => {
                            return Err(AnalysisError::UndefinedVariable { name: name.clone() })
                        }
                    };
                    self.analysis.bindings.insert(
                        expression.id,
                        Binding::Variable {
                            name: name.clone(),
                            type_id,
                        },
                    );
                    type_id
                }
            },
            ExprKind::Function {
                receiver,
                name,
                arguments,
            } => {
                let receiver_type = match receiver {
                    Some(receiver) => Some(self.check_expression(receiver)?),
                    None => None,
                };
                let mut argument_types = vec![];
                for argument in arguments {
                    argument_types.push(self.check_expression(argument)?);
                }

                let signature = match receiver_type {
                    Some(receiver_type) => self
                        .environment
                        .get_method(receiver_type, name, arguments.len())?
                        .clone(),
                    None => match self.scope.lookup_function(name, arguments.len()) {
                        Some(signature) => signature.clone(),
                        None => {
                            return Err(AnalysisError::UndefinedFunction {
                                name: name.clone(),
                                arity: arguments.len(),
                            })
                        }
                    },
                };

                // Slot 0 of a method signature is the receiver.
                let parameters = match receiver_type {
                    Some(_) => &signature.parameter_types[1..],
                    None => &signature.parameter_types[..],
                };
                for (parameter, argument) in parameters.iter().zip(&argument_types) {
                    require_assignable(*parameter, *argument)?;
                }

                self.analysis.bindings.insert(
                    expression.id,
                    Binding::Function {
                        name: name.clone(),
                        jvm_name: signature.jvm_name.clone(),
                        arity: arguments.len(),
                    },
                );
                signature.return_type
            }
        };

        self.analysis.types.insert(expression.id, type_id);
        Ok(type_id)
    }

    fn check_literal(&self, literal: &Literal) -> Result<TypeId, AnalysisError> {
        match literal {
            Literal::Nil => Ok(TypeId::Nil),
            Literal::Boolean(_) => Ok(TypeId::Boolean),
            Literal::Character(_) => Ok(TypeId::Character),
            Literal::String(_) => Ok(TypeId::String),
            Literal::Integer(value) => match value.to_i32() {
                Some(_) => Ok(TypeId::Integer),
                None => Err(AnalysisError::Overflow {
                    literal: value.to_string(),
                    type_name: String::from("Integer"),
                }),
            },
            Literal::Decimal(value) => match value.to_f64() {
                Some(nearest) if nearest.is_finite() => Ok(TypeId::Decimal),
                _ => Err(AnalysisError::Overflow {
                    literal: value.to_string(),
                    type_name: String::from("Decimal"),
                }),
            },
        }
    }

    fn check_binary(
        &self,
        operator: BinaryOp,
        left: TypeId,
        right: TypeId,
    ) -> Result<TypeId, AnalysisError> {
        match operator {
            BinaryOp::And | BinaryOp::Or => {
                require_assignable(TypeId::Boolean, left)?;
                require_assignable(TypeId::Boolean, right)?;
                Ok(TypeId::Boolean)
            }
            operator if operator.is_comparison() => {
                if left != right {
                    return Err(AnalysisError::TypeMismatch {
                        expected: String::from(left.name()),
                        received: String::from(right.name()),
                    });
                }
                if !left.is_comparable() {
                    return Err(AnalysisError::TypeMismatch {
                        expected: String::from("Comparable"),
                        received: String::from(left.name()),
                    });
                }
                Ok(TypeId::Boolean)
            }
            BinaryOp::Add => {
                if left == TypeId::String || right == TypeId::String {
                    return Ok(TypeId::String);
                }
                if left == right && matches!(left, TypeId::Integer | TypeId::Decimal) {
                    return Ok(left);
                }
                Err(AnalysisError::TypeMismatch {
                    expected: String::from(left.name()),
                    received: String::from(right.name()),
                })
            }
            _ => {
                // Subtract, Multiply, Divide.
                if left != right {
                    return Err(AnalysisError::TypeMismatch {
                        expected: String::from(left.name()),
                        received: String::from(right.name()),
                    });
                }
                if !matches!(left, TypeId::Integer | TypeId::Decimal) {
                    return Err(AnalysisError::TypeMismatch {
                        expected: String::from("Integer or Decimal"),
                        received: String::from(left.name()),
                    });
                }
                Ok(left)
            }
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::new()
    }
}
