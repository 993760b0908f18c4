//! Tree-walking evaluator for Ember programs
//!
//! The evaluator walks parser AST nodes directly, dispatching on node kind and
//! threading the active [`Environment`] through every call. It never mutates
//! the tree. Errors raised by the value and environment layers are tagged with
//! the span of the node being evaluated.

use crate::console::Console;
use crate::environment::Environment;
use crate::error::{Result, RuntimeError};
use crate::stack::ensure_sufficient_stack;
use crate::value::{FunctionValue, Value};
use ember_parser::ast::*;
use indexmap::IndexMap;
use std::rc::Rc;

/// Default bound on nested user function calls
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Expression and statement evaluator
///
/// Holds the console the native functions write to and tracks call depth so
/// runaway recursion fails with a [`RuntimeError::StackOverflow`] instead of
/// exhausting the host stack.
#[derive(Debug, Clone)]
pub struct Evaluator {
    console: Console,
    max_call_depth: usize,
    call_depth: usize,
}

impl Evaluator {
    pub fn with_max_call_depth(console: Console, max_call_depth: usize) -> Self {
        Self {
            console,
            max_call_depth,
            call_depth: 0,
        }
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Evaluate every statement in order, yielding the last statement's value
    pub fn evaluate_program(&mut self, program: &Program, env: &Environment) -> Result<Value> {
        // A previous run may have stopped part way through a call.
        self.call_depth = 0;
        self.evaluate_body(&program.statements, env)
    }

    /// Run a statement sequence in `env`; an empty body yields Null
    fn evaluate_body(&mut self, body: &[Statement], env: &Environment) -> Result<Value> {
        let mut last = Value::Null;
        for statement in body {
            last = self.evaluate_statement(statement, env)?;
        }
        Ok(last)
    }

    /// Run a statement sequence in a fresh child scope of `env`
    fn evaluate_block_scoped(&mut self, body: &[Statement], env: &Environment) -> Result<Value> {
        let scope = Environment::new_enclosed(env);
        tracing::debug!(depth = scope.depth(), "entering block scope");
        self.evaluate_body(body, &scope)
    }

    pub fn evaluate_statement(
        &mut self,
        statement: &Statement,
        env: &Environment,
    ) -> Result<Value> {
        ensure_sufficient_stack(|| self.evaluate_statement_inner(statement, env))
    }

    fn evaluate_statement_inner(
        &mut self,
        statement: &Statement,
        env: &Environment,
    ) -> Result<Value> {
        match &statement.kind {
            StatementKind::VarDeclaration(declaration) => {
                self.evaluate_var_declaration(declaration, env, statement.span)
            }
            StatementKind::FunctionDeclaration(declaration) => {
                self.evaluate_function_declaration(declaration, env)
            }
            StatementKind::If(if_statement) => self.evaluate_if_statement(if_statement, env),
            StatementKind::While(while_statement) => {
                self.evaluate_while_statement(while_statement, env)
            }
            StatementKind::Expression(expression) => self.evaluate_expression(expression, env),
        }
    }

    fn evaluate_var_declaration(
        &mut self,
        declaration: &VarDeclaration,
        env: &Environment,
        span: Span,
    ) -> Result<Value> {
        let value = match &declaration.value {
            Some(initializer) => self.evaluate_expression(initializer, env)?,
            None => Value::Null,
        };

        env.declare(&declaration.name.name, value.clone(), declaration.constant)
            .map_err(|error| error.with_span(span))?;
        Ok(value)
    }

    fn evaluate_function_declaration(
        &mut self,
        declaration: &FunctionDeclaration,
        env: &Environment,
    ) -> Result<Value> {
        let function = Value::Function(Rc::new(FunctionValue {
            name: declaration.name.name.clone(),
            parameters: declaration
                .parameters
                .iter()
                .map(|parameter| parameter.name.clone())
                .collect(),
            body: declaration.body.clone(),
            closure: env.clone(),
        }));

        env.declare(&declaration.name.name, function.clone(), true)
            .map_err(|error| error.with_span(declaration.name.span))?;
        Ok(function)
    }

    /// Run the chosen branch in its own scope, yielding that branch's value
    fn evaluate_if_statement(
        &mut self,
        if_statement: &IfStatement,
        env: &Environment,
    ) -> Result<Value> {
        let body = if self.evaluate_condition(&if_statement.condition, env)? {
            &if_statement.then_body
        } else {
            &if_statement.else_body
        };
        self.evaluate_block_scoped(body, env)
    }

    fn evaluate_while_statement(
        &mut self,
        while_statement: &WhileStatement,
        env: &Environment,
    ) -> Result<Value> {
        while self.evaluate_condition(&while_statement.condition, env)? {
            self.evaluate_block_scoped(&while_statement.body, env)?;
        }
        Ok(Value::Null)
    }

    fn evaluate_condition(&mut self, condition: &Expression, env: &Environment) -> Result<bool> {
        match self.evaluate_expression(condition, env)? {
            Value::Boolean(value) => Ok(value),
            other => Err(RuntimeError::type_error_with_span(
                "boolean condition",
                other.type_name(),
                condition.span,
            )),
        }
    }

    pub fn evaluate_expression(
        &mut self,
        expression: &Expression,
        env: &Environment,
    ) -> Result<Value> {
        ensure_sufficient_stack(|| self.evaluate_expression_inner(expression, env))
    }

    fn evaluate_expression_inner(
        &mut self,
        expression: &Expression,
        env: &Environment,
    ) -> Result<Value> {
        match &expression.kind {
            // Literals
            ExpressionKind::Integer(literal) => Ok(Value::Number(literal.value)),
            ExpressionKind::String(literal) => Ok(Value::String(literal.value.clone())),
            ExpressionKind::Array(array) => {
                let elements = array
                    .elements
                    .iter()
                    .map(|element| self.evaluate_expression(element, env))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::Array(elements))
            }
            ExpressionKind::Object(object) => self.evaluate_object_literal(object, env),

            ExpressionKind::Identifier(identifier) => env
                .lookup(&identifier.name)
                .map_err(|error| error.with_span(identifier.span)),

            ExpressionKind::Assignment(assignment) => {
                self.evaluate_assignment(assignment, env, expression.span)
            }

            // Operators
            ExpressionKind::BinaryOp(operation) => {
                let left = self.evaluate_expression(&operation.left, env)?;
                let right = self.evaluate_expression(&operation.right, env)?;
                left.binary_operation(operation.operator, &right)
                    .map_err(|error| error.with_span(expression.span))
            }
            ExpressionKind::Comparison(operation) => {
                let left = self.evaluate_expression(&operation.left, env)?;
                let right = self.evaluate_expression(&operation.right, env)?;
                left.comparison(operation.operator, &right)
                    .map_err(|error| error.with_span(expression.span))
            }
            ExpressionKind::UnaryOp(operation) => {
                match self.evaluate_expression(&operation.operand, env)? {
                    Value::Boolean(value) => Ok(Value::Boolean(!value)),
                    other => Err(RuntimeError::type_error_with_span(
                        "boolean operand for '!'",
                        other.type_name(),
                        operation.operand.span,
                    )),
                }
            }

            ExpressionKind::Call(call) => self.evaluate_call(call, env, expression.span),
            ExpressionKind::Member(member) => {
                self.evaluate_member_access(member, env, expression.span)
            }
        }
    }

    fn evaluate_object_literal(
        &mut self,
        object: &ObjectLiteral,
        env: &Environment,
    ) -> Result<Value> {
        let mut entries = IndexMap::new();

        for property in &object.properties {
            let value = match &property.value {
                Some(value) => self.evaluate_expression(value, env)?,
                None => env
                    .lookup(&property.key.name)
                    .map_err(|error| error.with_span(property.key.span))?,
            };
            entries.insert(property.key.name.clone(), value);
        }

        Ok(Value::Object(entries))
    }

    fn evaluate_assignment(
        &mut self,
        assignment: &Assignment,
        env: &Environment,
        span: Span,
    ) -> Result<Value> {
        let Some(target) = assignment.target.as_identifier() else {
            return Err(RuntimeError::invalid_assignment_target_with_span(
                assignment.target.span,
            ));
        };

        let value = self.evaluate_expression(&assignment.value, env)?;
        env.assign(&target.name, value.clone())
            .map_err(|error| error.with_span(span))?;
        Ok(value)
    }

    /// Evaluate the callee, then the arguments left to right, then call
    fn evaluate_call(
        &mut self,
        call: &FunctionCall,
        env: &Environment,
        span: Span,
    ) -> Result<Value> {
        let callee = self.evaluate_expression(&call.callee, env)?;
        let arguments = call
            .arguments
            .iter()
            .map(|argument| self.evaluate_expression(argument, env))
            .collect::<Result<Vec<_>>>()?;

        match callee {
            Value::NativeFunction(native) => (native.call)(&arguments, env, &self.console)
                .map_err(|error| error.with_span(span)),
            Value::Function(function) => self
                .call_function(&function, arguments)
                .map_err(|error| error.with_span(span)),
            other => Err(RuntimeError::not_callable_with_span(
                other.type_name(),
                call.callee.span,
            )),
        }
    }

    /// Bind parameters in a scope enclosed by the closure and run the body
    ///
    /// Missing arguments are an error; surplus arguments are ignored.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(function = %function.name, depth = self.call_depth)
    )]
    fn call_function(&mut self, function: &FunctionValue, arguments: Vec<Value>) -> Result<Value> {
        if arguments.len() < function.parameters.len() {
            return Err(RuntimeError::arity_too_few(
                &function.name,
                function.parameters.len(),
                arguments.len(),
            ));
        }

        if self.call_depth >= self.max_call_depth {
            return Err(RuntimeError::stack_overflow(self.max_call_depth));
        }

        let scope = Environment::new_enclosed(&function.closure);
        for (parameter, argument) in function.parameters.iter().zip(arguments) {
            scope.declare(parameter, argument, false)?;
        }

        self.call_depth += 1;
        let result = self.evaluate_body(&function.body, &scope);
        self.call_depth -= 1;
        result
    }

    fn evaluate_member_access(
        &mut self,
        member: &MemberAccess,
        env: &Environment,
        span: Span,
    ) -> Result<Value> {
        let object = self.evaluate_expression(&member.object, env)?;

        match object {
            Value::Object(entries) => {
                let key = self.property_key(member, env)?;
                entries.get(&key).cloned().ok_or_else(|| {
                    RuntimeError::property_not_found_with_span(&key, member.property.span)
                })
            }
            Value::Array(items) => {
                if !member.computed {
                    return Err(RuntimeError::invalid_property_with_span(
                        "array",
                        "arrays only support [index] access",
                        member.property.span,
                    ));
                }

                let index = match self.evaluate_expression(&member.property, env)? {
                    Value::Number(index) => index,
                    other => {
                        return Err(RuntimeError::type_error_with_span(
                            "number index",
                            other.type_name(),
                            member.property.span,
                        ));
                    }
                };

                usize::try_from(index)
                    .ok()
                    .and_then(|position| items.get(position))
                    .cloned()
                    .ok_or_else(|| {
                        RuntimeError::index_out_of_bounds_with_span(index, items.len(), span)
                    })
            }
            other => Err(RuntimeError::not_indexable_with_span(
                other.type_name(),
                member.object.span,
            )),
        }
    }

    /// The key named by an object member access
    ///
    /// `.name` must be a bare identifier; `[expr]` must evaluate to a string.
    fn property_key(&mut self, member: &MemberAccess, env: &Environment) -> Result<String> {
        if !member.computed {
            return member
                .property
                .as_identifier()
                .map(|identifier| identifier.name.clone())
                .ok_or_else(|| {
                    RuntimeError::invalid_property_with_span(
                        "object",
                        "property after '.' must be an identifier",
                        member.property.span,
                    )
                });
        }

        match self.evaluate_expression(&member.property, env)? {
            Value::String(key) => Ok(key),
            other => Err(RuntimeError::type_error_with_span(
                "string key",
                other.type_name(),
                member.property.span,
            )),
        }
    }
}
