//! Runtime error types for the Ember interpreter.
//!
//! Every failure during evaluation is a [`RuntimeError`]; errors raised deep in
//! the value or environment layers carry no span and get one attached by the
//! evaluator at the expression that triggered them.

use ember_parser::{LexError, ParseError, Span, SyntaxError};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Runtime errors that can occur during interpretation
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Unresolved name: {name}")]
    #[diagnostic(code(ember::runtime::unresolved_name))]
    UnresolvedName {
        name: String,
        #[help]
        suggestion: Option<String>,
        #[label("not declared in any enclosing scope")]
        span: Option<SourceSpan>,
    },

    #[error("Duplicate binding: '{name}' is already declared in this scope")]
    #[diagnostic(
        code(ember::runtime::duplicate_binding),
        help("Assign to the existing variable instead, or declare it in a nested block")
    )]
    DuplicateBinding {
        name: String,
        #[label("declared again here")]
        span: Option<SourceSpan>,
    },

    #[error("Cannot assign to constant '{name}'")]
    #[diagnostic(
        code(ember::runtime::const_violation),
        help("Declare the variable with 'let' if it needs to change")
    )]
    ConstViolation {
        name: String,
        #[label("constant reassigned here")]
        span: Option<SourceSpan>,
    },

    #[error("Type mismatch: '{operator}' cannot combine {left} and {right}")]
    #[diagnostic(
        code(ember::runtime::type_mismatch),
        help("Both operands of a binary operator must have the same type")
    )]
    TypeMismatch {
        operator: String,
        left: String,
        right: String,
        #[label("operands have different types")]
        span: Option<SourceSpan>,
    },

    #[error("Type error: expected {expected}, found {found}")]
    #[diagnostic(
        code(ember::runtime::type_error),
        help("Check that the value has the expected type")
    )]
    TypeError {
        expected: String,
        found: String,
        #[label("type mismatch here")]
        span: Option<SourceSpan>,
    },

    #[error("Unsupported operator: '{operator}' is not defined for {operand_type}")]
    #[diagnostic(
        code(ember::runtime::unsupported_operator),
        help("Arithmetic and ordering are defined for numbers; '+' also joins strings")
    )]
    UnsupportedOperator {
        operator: String,
        operand_type: String,
        #[label("unsupported operation")]
        span: Option<SourceSpan>,
    },

    #[error("Invalid assignment target")]
    #[diagnostic(
        code(ember::runtime::invalid_assignment_target),
        help("Only plain variable names can be assigned to")
    )]
    InvalidAssignmentTarget {
        #[label("cannot assign to this")]
        span: Option<SourceSpan>,
    },

    #[error("Value of type {found} is not callable")]
    #[diagnostic(
        code(ember::runtime::not_callable),
        help("Only functions can be called")
    )]
    NotCallable {
        found: String,
        #[label("called here")]
        span: Option<SourceSpan>,
    },

    #[error("Function {function} expects {expected} arguments, got {found}")]
    #[diagnostic(
        code(ember::runtime::arity_too_few),
        help("Pass a value for every parameter; extra arguments are ignored")
    )]
    ArityTooFew {
        function: String,
        expected: usize,
        found: usize,
        #[label("too few arguments")]
        span: Option<SourceSpan>,
    },

    #[error("Invalid property access on {target}: {reason}")]
    #[diagnostic(code(ember::runtime::invalid_property))]
    InvalidProperty {
        target: String,
        reason: String,
        #[label("invalid property")]
        span: Option<SourceSpan>,
    },

    #[error("Property '{property}' not found")]
    #[diagnostic(
        code(ember::runtime::property_not_found),
        help("Objects only contain the keys they were created with")
    )]
    PropertyNotFound {
        property: String,
        #[label("no such property")]
        span: Option<SourceSpan>,
    },

    #[error("Index out of bounds: index {index} is not valid for array of length {length}")]
    #[diagnostic(
        code(ember::runtime::index_out_of_bounds),
        help("Ensure the index is within the valid range [0, {length})")
    )]
    IndexOutOfBounds {
        index: i64,
        length: usize,
        #[label("invalid index")]
        span: Option<SourceSpan>,
    },

    #[error("Division by zero")]
    #[diagnostic(
        code(ember::runtime::division_by_zero),
        help("Ensure the divisor is not zero before '/' or '%'")
    )]
    DivisionByZero {
        #[label("division by zero here")]
        span: Option<SourceSpan>,
    },

    #[error("Value of type {found} cannot be indexed")]
    #[diagnostic(
        code(ember::runtime::not_indexable),
        help("Only objects and arrays support member access")
    )]
    NotIndexable {
        found: String,
        #[label("member access here")]
        span: Option<SourceSpan>,
    },

    #[error("Stack overflow: call depth exceeded {limit}")]
    #[diagnostic(
        code(ember::runtime::stack_overflow),
        help("Rewrite deep recursion as a while loop")
    )]
    StackOverflow {
        limit: usize,
        #[label("call nested too deeply")]
        span: Option<SourceSpan>,
    },

    #[error("Failed to write output: {message}")]
    #[diagnostic(code(ember::runtime::output))]
    Output {
        message: String,
        #[label("while printing here")]
        span: Option<SourceSpan>,
    },
}

impl RuntimeError {
    /// Create an unresolved name error, optionally suggesting a close match
    pub fn unresolved_name(name: &str, closest: Option<String>) -> Self {
        Self::UnresolvedName {
            name: name.to_string(),
            suggestion: closest.map(|candidate| format!("did you mean '{candidate}'?")),
            span: None,
        }
    }

    pub fn duplicate_binding(name: &str) -> Self {
        Self::DuplicateBinding {
            name: name.to_string(),
            span: None,
        }
    }

    pub fn const_violation(name: &str) -> Self {
        Self::ConstViolation {
            name: name.to_string(),
            span: None,
        }
    }

    pub fn type_mismatch(operator: &str, left: &str, right: &str) -> Self {
        Self::TypeMismatch {
            operator: operator.to_string(),
            left: left.to_string(),
            right: right.to_string(),
            span: None,
        }
    }

    /// Create a type error with span
    pub fn type_error_with_span(expected: &str, found: &str, span: Span) -> Self {
        Self::TypeError {
            expected: expected.to_string(),
            found: found.to_string(),
            span: Some(span.into()),
        }
    }

    pub fn unsupported_operator(operator: &str, operand_type: &str) -> Self {
        Self::UnsupportedOperator {
            operator: operator.to_string(),
            operand_type: operand_type.to_string(),
            span: None,
        }
    }

    pub fn invalid_assignment_target_with_span(span: Span) -> Self {
        Self::InvalidAssignmentTarget {
            span: Some(span.into()),
        }
    }

    pub fn not_callable_with_span(found: &str, span: Span) -> Self {
        Self::NotCallable {
            found: found.to_string(),
            span: Some(span.into()),
        }
    }

    pub fn arity_too_few(function: &str, expected: usize, found: usize) -> Self {
        Self::ArityTooFew {
            function: function.to_string(),
            expected,
            found,
            span: None,
        }
    }

    pub fn invalid_property_with_span(target: &str, reason: &str, span: Span) -> Self {
        Self::InvalidProperty {
            target: target.to_string(),
            reason: reason.to_string(),
            span: Some(span.into()),
        }
    }

    pub fn property_not_found_with_span(property: &str, span: Span) -> Self {
        Self::PropertyNotFound {
            property: property.to_string(),
            span: Some(span.into()),
        }
    }

    pub fn index_out_of_bounds_with_span(index: i64, length: usize, span: Span) -> Self {
        Self::IndexOutOfBounds {
            index,
            length,
            span: Some(span.into()),
        }
    }

    pub fn division_by_zero() -> Self {
        Self::DivisionByZero { span: None }
    }

    pub fn not_indexable_with_span(found: &str, span: Span) -> Self {
        Self::NotIndexable {
            found: found.to_string(),
            span: Some(span.into()),
        }
    }

    pub fn stack_overflow(limit: usize) -> Self {
        Self::StackOverflow { limit, span: None }
    }

    pub fn output(error: std::io::Error) -> Self {
        Self::Output {
            message: error.to_string(),
            span: None,
        }
    }

    /// Attach `span` unless the error already points somewhere more precise
    pub fn with_span(mut self, span: Span) -> Self {
        let slot = self.span_slot();
        if slot.is_none() {
            *slot = Some(span.into());
        }
        self
    }

    pub fn span(&self) -> Option<SourceSpan> {
        match self {
            Self::UnresolvedName { span, .. }
            | Self::DuplicateBinding { span, .. }
            | Self::ConstViolation { span, .. }
            | Self::TypeMismatch { span, .. }
            | Self::TypeError { span, .. }
            | Self::UnsupportedOperator { span, .. }
            | Self::InvalidAssignmentTarget { span }
            | Self::NotCallable { span, .. }
            | Self::ArityTooFew { span, .. }
            | Self::InvalidProperty { span, .. }
            | Self::PropertyNotFound { span, .. }
            | Self::IndexOutOfBounds { span, .. }
            | Self::DivisionByZero { span }
            | Self::NotIndexable { span, .. }
            | Self::StackOverflow { span, .. }
            | Self::Output { span, .. } => *span,
        }
    }

    fn span_slot(&mut self) -> &mut Option<SourceSpan> {
        match self {
            Self::UnresolvedName { span, .. }
            | Self::DuplicateBinding { span, .. }
            | Self::ConstViolation { span, .. }
            | Self::TypeMismatch { span, .. }
            | Self::TypeError { span, .. }
            | Self::UnsupportedOperator { span, .. }
            | Self::InvalidAssignmentTarget { span }
            | Self::NotCallable { span, .. }
            | Self::ArityTooFew { span, .. }
            | Self::InvalidProperty { span, .. }
            | Self::PropertyNotFound { span, .. }
            | Self::IndexOutOfBounds { span, .. }
            | Self::DivisionByZero { span }
            | Self::NotIndexable { span, .. }
            | Self::StackOverflow { span, .. }
            | Self::Output { span, .. } => span,
        }
    }
}

/// Any failure while running source text: lexing, parsing or evaluation
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum InterpreterError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Runtime(#[from] RuntimeError),
}

impl From<SyntaxError> for InterpreterError {
    fn from(error: SyntaxError) -> Self {
        match error {
            SyntaxError::Lex(error) => InterpreterError::Lex(error),
            SyntaxError::Parse(error) => InterpreterError::Parse(error),
        }
    }
}

impl InterpreterError {
    /// The runtime error, if evaluation was reached
    pub fn as_runtime(&self) -> Option<&RuntimeError> {
        match self {
            InterpreterError::Runtime(error) => Some(error),
            _ => None,
        }
    }
}

/// Type alias for interpreter results
pub type Result<T> = std::result::Result<T, RuntimeError>;
