use crate::{
    analyzer::analyzer::{Analysis, Binding},
    ast::ast::{BinaryOp, Expr, ExprKind, Field, Literal, Method, Source, Stmt},
    environment::environment::TypeId,
    errors::errors::AnalysisError,
};

const INDENT: &str = "    ";

pub struct Generator<'a> {
    analysis: &'a Analysis,
    output: String,
    indent: usize,
}

/// Renders an analyzed program as Java source.
pub fn generate(source: &Source, analysis: &Analysis) -> Result<String, AnalysisError> {
    let mut generator = Generator {
        analysis,
        output: String::new(),
        indent: 0,
    };
    generator.write_source(source)?;
    Ok(generator.output)
}

impl Generator<'_> {
    fn print(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn newline(&mut self) {
        self.output.push('\n');
        for _ in 0..self.indent {
            self.output.push_str(INDENT);
        }
    }

    /// A blank line, ignoring the current indent.
    fn blank(&mut self) {
        self.output.push('\n');
    }

    /// The declared type of a `LET`, from its annotation or inferred from
    /// its initializer's resolved type.
    fn declared_type(
        &self,
        name: &str,
        type_name: &Option<String>,
        value: &Option<Expr>,
    ) -> Result<TypeId, AnalysisError> {
        if let Some(type_name) = type_name {
            return TypeId::lookup(type_name);
        }
        match value {
            Some(value) => match self.analysis.types.get(&value.id) {
                Some(type_id) => Ok(*type_id),
                None => Err(AnalysisError::MissingTypeInfo {
                    name: String::from(name),
                }),
            },
            None => Err(AnalysisError::MissingTypeInfo {
                name: String::from(name),
            }),
        }
    }

    fn write_source(&mut self, source: &Source) -> Result<(), AnalysisError> {
        self.print("public class Main {");
        self.blank();

        if !source.fields.is_empty() {
            self.indent += 1;
            for field in &source.fields {
                self.newline();
                self.write_field(field)?;
            }
            self.blank();
            self.indent -= 1;
        }

        self.indent += 1;
        self.newline();
        self.print("public static void main(String[] args) {");
        self.indent += 1;
        self.newline();
        self.print("System.exit(new Main().main());");
        self.indent -= 1;
        self.newline();
        self.print("}");
        self.blank();

        for method in &source.methods {
            self.newline();
            self.write_method(method)?;
            self.blank();
        }

        self.indent -= 1;
        self.newline();
        self.print("}");
        Ok(())
    }

    fn write_field(&mut self, field: &Field) -> Result<(), AnalysisError> {
        let type_id = self.declared_type(&field.name, &field.type_name, &field.value)?;
        self.print(type_id.jvm_name());
        self.print(" ");
        self.print(&field.name);
        if let Some(value) = &field.value {
            self.print(" = ");
            self.write_expression(value)?;
        }
        self.print(";");
        Ok(())
    }

    fn write_method(&mut self, method: &Method) -> Result<(), AnalysisError> {
        let return_type = match &method.return_type_name {
            Some(type_name) => TypeId::lookup(type_name)?,
            None => TypeId::Any,
        };
        self.print(return_type.jvm_name());
        self.print(" ");
        self.print(&method.name);
        self.print("(");
        for (index, parameter) in method.parameters.iter().enumerate() {
            if index > 0 {
                self.print(", ");
            }
            let type_id = match &parameter.type_name {
                Some(type_name) => TypeId::lookup(type_name)?,
                None => TypeId::Any,
            };
            self.print(type_id.jvm_name());
            self.print(" ");
            self.print(&parameter.name);
        }
        self.print(") {");
        self.write_block(&method.statements)?;
        self.print("}");
        Ok(())
    }

    /// The statements of a braced block, each on its own line. An empty
    /// block renders as `{}` with nothing in between.
    fn write_block(&mut self, statements: &[Stmt]) -> Result<(), AnalysisError> {
        if statements.is_empty() {
            return Ok(());
        }
        self.indent += 1;
        for statement in statements {
            self.newline();
            self.write_statement(statement)?;
        }
        self.indent -= 1;
        self.newline();
        Ok(())
    }

    fn write_statement(&mut self, statement: &Stmt) -> Result<(), AnalysisError> {
        match statement {
            Stmt::Expression(expression) => {
                self.write_expression(expression)?;
                self.print(";");
            }
            Stmt::Declaration {
                name,
                type_name,
                value,
            } => {
                let type_id = self.declared_type(name, type_name, value)?;
                self.print(type_id.jvm_name());
                self.print(" ");
                self.print(name);
                if let Some(value) = value {
                    self.print(" = ");
                    self.write_expression(value)?;
                }
                self.print(";");
            }
            Stmt::Assignment { target, value } => {
                self.write_expression(target)?;
                self.print(" = ");
                self.write_expression(value)?;
                self.print(";");
            }
            Stmt::If {
                condition,
                then_statements,
                else_statements,
            } => {
                self.print("if (");
                self.write_expression(condition)?;
                self.print(") {");
                self.write_block(then_statements)?;
                self.print("}");
                if !else_statements.is_empty() {
                    self.print(" else {");
                    self.write_block(else_statements)?;
                    self.print("}");
                }
            }
            Stmt::For {
                name,
                value,
                statements,
            } => {
                self.print("for (int ");
                self.print(name);
                self.print(" : ");
                self.write_expression(value)?;
                self.print(") {");
                self.write_block(statements)?;
                self.print("}");
            }
            Stmt::While {
                condition,
                statements,
            } => {
                self.print("while (");
                self.write_expression(condition)?;
                self.print(") {");
                self.write_block(statements)?;
                self.print("}");
            }
            Stmt::Return(value) => {
                self.print("return ");
                self.write_expression(value)?;
                self.print(";");
            }
        }
        Ok(())
    }

    fn write_expression(&mut self, expression: &Expr) -> Result<(), AnalysisError> {
        match &expression.kind {
            ExprKind::Literal(literal) => self.write_literal(literal),
            ExprKind::Group(inner) => {
                self.print("(");
                self.write_expression(inner)?;
                self.print(")");
            }
            ExprKind::Binary {
                operator,
                left,
                right,
            } => {
                self.write_expression(left)?;
                let rendered = match operator {
                    BinaryOp::And => String::from("&&"),
                    BinaryOp::Or => String::from("||"),
                    other => other.to_string(),
                };
                self.print(&format!(" {} ", rendered));
                self.write_expression(right)?;
            }
            ExprKind::Access { receiver, name } => {
                if let Some(receiver) = receiver {
                    self.write_expression(receiver)?;
                    self.print(".");
                }
                self.print(name);
            }
            ExprKind::Function {
                receiver,
                name,
                arguments,
            } => {
                if let Some(receiver) = receiver {
                    self.write_expression(receiver)?;
                    self.print(".");
                }
                // Calls render through their resolved spelling, which maps
                // the print built-in onto System.out.println.
                let rendered = match self.analysis.bindings.get(&expression.id) {
                    Some(Binding::Function { jvm_name, .. }) => jvm_name.clone(),
                    _ => name.clone(),
                };
                self.print(&rendered);
                self.print("(");
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        self.print(", ");
                    }
                    self.write_expression(argument)?;
                }
                self.print(")");
            }
        }
        Ok(())
    }

    fn write_literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Nil => self.print("null"),
            Literal::Boolean(true) => self.print("true"),
            Literal::Boolean(false) => self.print("false"),
            Literal::Character(value) => {
                self.print("'");
                let escaped = escape(*value);
                self.print(&escaped);
                self.print("'");
            }
            Literal::String(value) => {
                self.print("\"");
                let escaped: String = value.chars().map(escape).collect();
                self.print(&escaped);
                self.print("\"");
            }
            Literal::Integer(value) => self.print(&value.to_string()),
            Literal::Decimal(value) => self.print(&value.to_string()),
        }
    }
}

/// Re-escapes a decoded character for a Java literal.
fn escape(character: char) -> String {
    match character {
        '\\' => String::from("\\\\"),
        '"' => String::from("\\\""),
        '\'' => String::from("\\'"),
        '\n' => String::from("\\n"),
        '\r' => String::from("\\r"),
        '\t' => String::from("\\t"),
        '\u{0008}' => String::from("\\b"),
        other => other.to_string(),
    }
}
