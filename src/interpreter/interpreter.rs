use num_traits::Zero;

use bigdecimal::RoundingMode;

use crate::{
    ast::ast::{BinaryOp, Expr, ExprKind, Method, Source, Stmt},
    environment::scope::Scope,
    errors::errors::RuntimeError,
    interpreter::value::Value,
};

/// Decimal division rounds the quotient to this scale, half to even.
const DIVISION_SCALE: i64 = 1;

/// Where `print` output goes. The buffer form exists so callers (and tests)
/// can capture effects instead of writing to stdout.
pub enum PrintHandler {
    Stdout,
    Buffer(String),
}

impl PrintHandler {
    fn print(&mut self, value: &Value) {
        match self {
            PrintHandler::Stdout => println!("{}", value),
            PrintHandler::Buffer(buffer) => {
                buffer.push_str(&value.to_string());
                buffer.push('\n');
            }
        }
    }

    pub fn output(&self) -> &str {
        match self {
            PrintHandler::Stdout => "",
            PrintHandler::Buffer(buffer) => buffer,
        }
    }
}

/// A callable bound in the runtime scope. User methods carry the index of
/// the frame their definition captured, so calls resume that chain rather
/// than the caller's.
#[derive(Clone, Copy)]
pub enum Function<'src> {
    Print,
    User { method: &'src Method, captured: usize },
}

/// How a statement finished: fell through, or is unwinding a `RETURN` to
/// the nearest call boundary.
enum Flow {
    Normal,
    Return(Value),
}

pub struct Interpreter<'src> {
    scope: Scope<Value, Function<'src>>,
    print: PrintHandler,
}

/// Runs a program and returns the value of `main` along with whatever the
/// print handler captured.
pub fn evaluate(source: &Source, print: PrintHandler) -> (Result<Value, RuntimeError>, PrintHandler) {
    let mut interpreter = Interpreter::new(print);
    let result = interpreter.evaluate_source(source);
    (result, interpreter.print)
}

impl<'src> Interpreter<'src> {
    pub fn new(print: PrintHandler) -> Self {
        let mut scope = Scope::new();
        scope.define_function("print", 1, Function::Print);
        Interpreter { scope, print }
    }

    /// Binds a value into the root frame ahead of execution. Embedders use
    /// this to hand a program external values such as iterables.
    pub fn seed_variable(&mut self, name: &str, value: Value) {
        self.scope.define_variable(name, value);
    }

    /// Binds every field and method into the root frame, then invokes
    /// `main()`.
    pub fn evaluate_source(&mut self, source: &'src Source) -> Result<Value, RuntimeError> {
        for field in &source.fields {
            let value = match &field.value {
                Some(value) => self.evaluate(value)?,
                None => Value::Nil,
            };
            self.scope.define_variable(&field.name, value);
        }

        let captured = self.scope.current_index();
        for method in &source.methods {
            self.scope.define_function(
                &method.name,
                method.parameters.len(),
                Function::User { method, captured },
            );
        }

        self.call("main", vec![])
    }

    fn call(&mut self, name: &str, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        let function = match self.scope.lookup_function(name, arguments.len()).copied() {
            Some(function) => function,
            None => {
                return Err(RuntimeError::UndefinedFunction {
                    name: String::from(name),
                    arity: arguments.len(),
                })
            }
        };

        match function {
            Function::Print => {
                self.print.print(&arguments[0]);
                Ok(Value::Nil)
            }
            Function::User { method, captured } => {
                self.scope.enter_at(captured);
                for (parameter, value) in method.parameters.iter().zip(arguments) {
                    self.scope.define_variable(&parameter.name, value);
                }
                let flow = self.execute_statements(&method.statements);
                self.scope.exit();

                // Falling off the end of a body yields NIL.
                match flow? {
                    Flow::Return(value) => Ok(value),
                    Flow::Normal => Ok(Value::Nil),
                }
            }
        }
    }

    fn execute_statements(&mut self, statements: &[Stmt]) -> Result<Flow, RuntimeError> {
        for statement in statements {
            if let Flow::Return(value) = self.execute_statement(statement)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes one statement block in a fresh frame, discarded afterwards.
    fn execute_block(&mut self, statements: &[Stmt]) -> Result<Flow, RuntimeError> {
        self.scope.enter();
        let flow = self.execute_statements(statements);
        self.scope.exit();
        flow
    }

    fn execute_statement(&mut self, statement: &Stmt) -> Result<Flow, RuntimeError> {
        match statement {
            Stmt::Expression(expression) => {
                self.evaluate(expression)?;
                Ok(Flow::Normal)
            }
            Stmt::Declaration { name, value, .. } => {
                let value = match value {
                    Some(value) => self.evaluate(value)?,
                    None => Value::Nil,
                };
                self.scope.define_variable(name, value);
                Ok(Flow::Normal)
            }
            Stmt::Assignment { target, value } => {
                let value = self.evaluate(value)?;
                match &target.kind {
                    ExprKind::Access {
                        receiver: None,
                        name,
                    } => match self.scope.lookup_variable_mut(name) {
                        Some(slot) => {
                            *slot = value;
                            Ok(Flow::Normal)
                        }
                        None => Err(RuntimeError::UndefinedVariable { name: name.clone() }),
                    },
                    ExprKind::Access {
                        receiver: Some(receiver),
                        ..
                    } => {
                        // Built-in values carry no settable fields.
                        let receiver = self.evaluate(receiver)?;
                        Err(RuntimeError::TypeAssertionFailure {
                            expected: String::from("structured"),
                            received: String::from(receiver.kind().name()),
                        })
                    }
                    _ => Err(RuntimeError::TypeAssertionFailure {
                        expected: String::from("mutable"),
                        received: String::from(self.evaluate(target)?.kind().name()),
                    }),
                }
            }
            Stmt::If {
                condition,
                then_statements,
                else_statements,
            } => {
                if self.evaluate_condition(condition)? {
                    self.execute_block(then_statements)
                } else {
                    self.execute_block(else_statements)
                }
            }
            Stmt::For {
                name,
                value,
                statements,
            } => {
                let values = match self.evaluate(value)? {
                    Value::IntegerIterable(values) => values,
                    other => {
                        return Err(RuntimeError::TypeAssertionFailure {
                            expected: String::from("IntegerIterable"),
                            received: String::from(other.kind().name()),
                        })
                    }
                };
                for element in values.iter() {
                    self.scope.enter();
                    self.scope
                        .define_variable(name, Value::Integer(element.clone()));
                    let flow = self.execute_statements(statements);
                    self.scope.exit();
                    if let Flow::Return(value) = flow? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::While {
                condition,
                statements,
            } => {
                while self.evaluate_condition(condition)? {
                    if let Flow::Return(value) = self.execute_block(statements)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::Return(value) => Ok(Flow::Return(self.evaluate(value)?)),
        }
    }

    fn evaluate_condition(&mut self, condition: &Expr) -> Result<bool, RuntimeError> {
        match self.evaluate(condition)? {
            Value::Boolean(value) => Ok(value),
            other => Err(RuntimeError::TypeAssertionFailure {
                expected: String::from("Boolean"),
                received: String::from(other.kind().name()),
            }),
        }
    }

    fn evaluate(&mut self, expression: &Expr) -> Result<Value, RuntimeError> {
        match &expression.kind {
            ExprKind::Literal(literal) => Ok(Value::from(literal)),
            ExprKind::Group(inner) => self.evaluate(inner),
            ExprKind::Binary {
                operator,
                left,
                right,
            } => self.evaluate_binary(*operator, left, right),
            ExprKind::Access { receiver, name } => match receiver {
                Some(receiver) => {
                    let receiver = self.evaluate(receiver)?;
                    Err(RuntimeError::TypeAssertionFailure {
                        expected: String::from("structured"),
                        received: String::from(receiver.kind().name()),
                    })
                }
                None => match self.scope.lookup_variable(name) {
                    Some(value) => Ok(value.clone()),
                    None => Err(RuntimeError::UndefinedVariable { name: name.clone() }),
                },
            },
            ExprKind::Function {
                receiver,
                name,
                arguments,
            } => {
                let receiver = match receiver {
                    Some(receiver) => Some(self.evaluate(receiver)?),
                    None => None,
                };
                let mut values = vec![];
                for argument in arguments {
                    values.push(self.evaluate(argument)?);
                }

                match receiver {
                    // Built-in values carry no methods.
                    Some(_) => Err(RuntimeError::UndefinedFunction {
                        name: name.clone(),
                        arity: arguments.len(),
                    }),
                    None => self.call(name, values),
                }
            }
        }
    }

    fn evaluate_binary(
        &mut self,
        operator: BinaryOp,
        left: &Expr,
        right: &Expr,
    ) -> Result<Value, RuntimeError> {
        // AND and OR short-circuit: the right operand is only evaluated
        // when the left one has not already decided the result.
        match operator {
            BinaryOp::And => {
                if !self.evaluate_condition(left)? {
                    return Ok(Value::Boolean(false));
                }
                return Ok(Value::Boolean(self.evaluate_condition(right)?));
            }
            BinaryOp::Or => {
                if self.evaluate_condition(left)? {
                    return Ok(Value::Boolean(true));
                }
                return Ok(Value::Boolean(self.evaluate_condition(right)?));
            }
            _ => {}
        }

        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        match operator {
            BinaryOp::Equals => Ok(Value::Boolean(left == right)),
            BinaryOp::NotEquals => Ok(Value::Boolean(left != right)),
            operator if operator.is_comparison() => {
                let ordering = match (&left, &right) {
                    (Value::Integer(left), Value::Integer(right)) => left.cmp(right),
                    (Value::Decimal(left), Value::Decimal(right)) => left.cmp(right),
                    (Value::Character(left), Value::Character(right)) => left.cmp(right),
                    (Value::String(left), Value::String(right)) => left.cmp(right),
                    _ => {
                        return Err(RuntimeError::TypeAssertionFailure {
                            expected: String::from(left.kind().name()),
                            received: String::from(right.kind().name()),
                        })
                    }
                };
                let result = match operator {
                    BinaryOp::Less => ordering.is_lt(),
                    BinaryOp::LessEquals => ordering.is_le(),
                    BinaryOp::Greater => ordering.is_gt(),
                    _ => ordering.is_ge(),
                };
                Ok(Value::Boolean(result))
            }
            BinaryOp::Add => match (&left, &right) {
                (Value::String(_), _) | (_, Value::String(_)) => {
                    Ok(Value::String(format!("{}{}", left, right)))
                }
                (Value::Integer(left), Value::Integer(right)) => {
                    Ok(Value::Integer(left + right))
                }
                (Value::Decimal(left), Value::Decimal(right)) => {
                    Ok(Value::Decimal(left + right))
                }
                _ => Err(Self::kind_mismatch(&left, &right)),
            },
            BinaryOp::Subtract => match (&left, &right) {
                (Value::Integer(left), Value::Integer(right)) => {
                    Ok(Value::Integer(left - right))
                }
                (Value::Decimal(left), Value::Decimal(right)) => {
                    Ok(Value::Decimal(left - right))
                }
                _ => Err(Self::kind_mismatch(&left, &right)),
            },
            BinaryOp::Multiply => match (&left, &right) {
                (Value::Integer(left), Value::Integer(right)) => {
                    Ok(Value::Integer(left * right))
                }
                (Value::Decimal(left), Value::Decimal(right)) => {
                    Ok(Value::Decimal(left * right))
                }
                _ => Err(Self::kind_mismatch(&left, &right)),
            },
            _ => match (&left, &right) {
                // Division truncates for integers; decimal quotients are
                // rounded to a fixed scale, half to even.
                (Value::Integer(left), Value::Integer(right)) => {
                    if right.is_zero() {
                        return Err(RuntimeError::division_by_zero());
                    }
                    Ok(Value::Integer(left / right))
                }
                (Value::Decimal(left), Value::Decimal(right)) => {
                    if right.is_zero() {
                        return Err(RuntimeError::division_by_zero());
                    }
                    Ok(Value::Decimal(
                        (left / right).with_scale_round(DIVISION_SCALE, RoundingMode::HalfEven),
                    ))
                }
                _ => Err(Self::kind_mismatch(&left, &right)),
            },
        }
    }

    fn kind_mismatch(left: &Value, right: &Value) -> RuntimeError {
        RuntimeError::TypeAssertionFailure {
            expected: String::from(left.kind().name()),
            received: String::from(right.kind().name()),
        }
    }
}
