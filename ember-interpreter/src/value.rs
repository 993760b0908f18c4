//! Runtime value representation for the Ember interpreter.
//!
//! This module defines the closed [`Value`] enum, the text rendering used by
//! the print built-ins, and the arithmetic and comparison operations. All
//! binary operations require both operands to have the same runtime type.

use crate::console::Console;
use crate::environment::Environment;
use crate::error::{Result, RuntimeError};
use ember_parser::{BinaryOperator, ComparisonOperator, Statement};
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

/// Host callback backing a native function
pub type NativeFn = fn(&[Value], &Environment, &Console) -> Result<Value>;

/// Runtime values in the Ember interpreter
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    /// 64-bit signed integer; the only numeric type
    Number(i64),
    String(String),
    Boolean(bool),
    /// String-keyed record iterated in insertion order
    Object(IndexMap<String, Value>),
    Array(Vec<Value>),
    /// User function closing over its declaring environment
    Function(Rc<FunctionValue>),
    NativeFunction(NativeFunction),
}

/// A declared function together with the scope it was declared in
pub struct FunctionValue {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Vec<Statement>,
    pub closure: Environment,
}

// The closure usually contains the function itself, so it is left out.
impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub call: NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::NativeFunction(a), Value::NativeFunction(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl Value {
    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::Function(_) | Value::NativeFunction(_) => "function",
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::NativeFunction(_))
    }

    /// Render the value as the print built-ins show it
    ///
    /// Strings are quoted, objects render as `{ k: v }` and functions as
    /// `[Function]`.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => format!("\"{}\"", s),
            Value::Boolean(b) => b.to_string(),
            Value::Object(entries) if entries.is_empty() => "{ }".to_string(),
            Value::Object(entries) => {
                let rendered: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value.to_display_string()))
                    .collect();
                format!("{{ {} }}", rendered.join(", "))
            }
            Value::Array(items) => {
                let rendered: Vec<String> = items.iter().map(|v| v.to_display_string()).collect();
                format!("[{}]", rendered.join(", "))
            }
            Value::Function(_) | Value::NativeFunction(_) => "[Function]".to_string(),
        }
    }

    fn same_type(&self, other: &Value) -> bool {
        self.type_name() == other.type_name()
    }

    fn expect_same_type(&self, operator: &str, other: &Value) -> Result<()> {
        if self.same_type(other) {
            Ok(())
        } else {
            Err(RuntimeError::type_mismatch(
                operator,
                self.type_name(),
                other.type_name(),
            ))
        }
    }

    /// Apply an arithmetic operator
    pub fn binary_operation(&self, operator: BinaryOperator, other: &Value) -> Result<Value> {
        match operator {
            BinaryOperator::Add => self.add(other),
            BinaryOperator::Subtract => self.subtract(other),
            BinaryOperator::Multiply => self.multiply(other),
            BinaryOperator::Divide => self.divide(other),
            BinaryOperator::Modulo => self.modulo(other),
        }
    }

    /// Add two values, concatenating strings
    pub fn add(&self, other: &Value) -> Result<Value> {
        self.expect_same_type("+", other)?;
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.wrapping_add(*b))),
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
            _ => Err(RuntimeError::unsupported_operator("+", self.type_name())),
        }
    }

    pub fn subtract(&self, other: &Value) -> Result<Value> {
        let (a, b) = self.numeric_operands("-", other)?;
        Ok(Value::Number(a.wrapping_sub(b)))
    }

    pub fn multiply(&self, other: &Value) -> Result<Value> {
        let (a, b) = self.numeric_operands("*", other)?;
        Ok(Value::Number(a.wrapping_mul(b)))
    }

    /// Integer division truncating toward zero
    pub fn divide(&self, other: &Value) -> Result<Value> {
        let (a, b) = self.numeric_operands("/", other)?;
        if b == 0 {
            return Err(RuntimeError::division_by_zero());
        }
        Ok(Value::Number(a.wrapping_div(b)))
    }

    pub fn modulo(&self, other: &Value) -> Result<Value> {
        let (a, b) = self.numeric_operands("%", other)?;
        if b == 0 {
            return Err(RuntimeError::division_by_zero());
        }
        Ok(Value::Number(a.wrapping_rem(b)))
    }

    fn numeric_operands(&self, operator: &str, other: &Value) -> Result<(i64, i64)> {
        self.expect_same_type(operator, other)?;
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
            _ => Err(RuntimeError::unsupported_operator(operator, self.type_name())),
        }
    }

    /// Apply a comparison operator, yielding a Boolean
    pub fn comparison(&self, operator: ComparisonOperator, other: &Value) -> Result<Value> {
        let symbol = operator.as_str();
        self.expect_same_type(symbol, other)?;

        let result = match operator {
            ComparisonOperator::Equal => self.equals(symbol, other)?,
            // Both `==` and `!=` hold between two nulls.
            ComparisonOperator::NotEqual => {
                matches!(self, Value::Null) || !self.equals(symbol, other)?
            }
            ComparisonOperator::Less => self.ordering(symbol, other)?.is_lt(),
            ComparisonOperator::Greater => self.ordering(symbol, other)?.is_gt(),
            ComparisonOperator::LessEqual => self.ordering(symbol, other)?.is_le(),
            ComparisonOperator::GreaterEqual => self.ordering(symbol, other)?.is_ge(),
        };

        Ok(Value::Boolean(result))
    }

    fn equals(&self, operator: &str, other: &Value) -> Result<bool> {
        match (self, other) {
            (Value::Null, Value::Null) => Ok(true),
            (Value::Number(a), Value::Number(b)) => Ok(a == b),
            (Value::String(a), Value::String(b)) => Ok(a == b),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(a == b),
            _ => Err(RuntimeError::unsupported_operator(operator, self.type_name())),
        }
    }

    fn ordering(&self, operator: &str, other: &Value) -> Result<std::cmp::Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(a.cmp(b)),
            _ => Err(RuntimeError::unsupported_operator(operator, self.type_name())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Number(1).type_name(), "number");
        assert_eq!(Value::string("a").type_name(), "string");
        assert_eq!(Value::Boolean(true).type_name(), "boolean");
        assert_eq!(Value::Object(IndexMap::new()).type_name(), "object");
        assert_eq!(Value::Array(vec![]).type_name(), "array");
    }

    #[test]
    fn test_display_strings() {
        let mut entries = IndexMap::new();
        entries.insert("b".to_string(), Value::Number(2));
        entries.insert("a".to_string(), Value::string("x"));

        assert_eq!(Value::Null.to_display_string(), "null");
        assert_eq!(Value::Number(-7).to_display_string(), "-7");
        assert_eq!(Value::string("hi").to_display_string(), "\"hi\"");
        assert_eq!(Value::Boolean(false).to_display_string(), "false");
        assert_eq!(Value::Object(entries).to_display_string(), "{ b: 2, a: \"x\" }");
        assert_eq!(Value::Object(IndexMap::new()).to_display_string(), "{ }");
        assert_eq!(
            Value::Array(vec![Value::Number(1), Value::Array(vec![])]).to_display_string(),
            "[1, []]"
        );
    }

    #[test]
    fn test_arithmetic() {
        let a = Value::Number(17);
        let b = Value::Number(5);
        assert_eq!(a.add(&b).unwrap(), Value::Number(22));
        assert_eq!(a.subtract(&b).unwrap(), Value::Number(12));
        assert_eq!(a.multiply(&b).unwrap(), Value::Number(85));
        assert_eq!(a.divide(&b).unwrap(), Value::Number(3));
        assert_eq!(a.modulo(&b).unwrap(), Value::Number(2));
        assert_eq!(
            Value::Number(-7).divide(&Value::Number(2)).unwrap(),
            Value::Number(-3)
        );
    }

    #[test]
    fn test_arithmetic_wraps_on_overflow() {
        assert_eq!(
            Value::Number(i64::MAX).add(&Value::Number(1)).unwrap(),
            Value::Number(i64::MIN)
        );
        assert_eq!(
            Value::Number(i64::MIN).divide(&Value::Number(-1)).unwrap(),
            Value::Number(i64::MIN)
        );
    }

    #[test]
    fn test_string_concatenation() {
        let result = Value::string("foo").add(&Value::string("bar")).unwrap();
        assert_eq!(result, Value::string("foobar"));
    }

    #[test]
    fn test_string_subtraction_is_unsupported() {
        let error = Value::string("a").subtract(&Value::string("b")).unwrap_err();
        assert!(matches!(error, RuntimeError::UnsupportedOperator { .. }));
    }

    #[test]
    fn test_mixed_types_mismatch() {
        let error = Value::Number(1).add(&Value::string("a")).unwrap_err();
        assert!(matches!(error, RuntimeError::TypeMismatch { .. }));

        let error = Value::Boolean(true)
            .comparison(ComparisonOperator::Equal, &Value::Number(1))
            .unwrap_err();
        assert!(matches!(error, RuntimeError::TypeMismatch { .. }));
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(
            Value::Number(1).divide(&Value::Number(0)),
            Err(RuntimeError::DivisionByZero { .. })
        ));
        assert!(matches!(
            Value::Number(1).modulo(&Value::Number(0)),
            Err(RuntimeError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_null_equality() {
        assert_eq!(
            Value::Null
                .comparison(ComparisonOperator::Equal, &Value::Null)
                .unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            Value::Null
                .comparison(ComparisonOperator::NotEqual, &Value::Null)
                .unwrap(),
            Value::Boolean(true)
        );
    }

    #[test]
    fn test_ordering_only_for_numbers() {
        assert_eq!(
            Value::Number(2)
                .comparison(ComparisonOperator::LessEqual, &Value::Number(2))
                .unwrap(),
            Value::Boolean(true)
        );
        assert!(matches!(
            Value::string("a").comparison(ComparisonOperator::Less, &Value::string("b")),
            Err(RuntimeError::UnsupportedOperator { .. })
        ));
    }

    #[test]
    fn test_arrays_cannot_be_compared() {
        let error = Value::Array(vec![])
            .comparison(ComparisonOperator::Equal, &Value::Array(vec![]))
            .unwrap_err();
        assert!(matches!(error, RuntimeError::UnsupportedOperator { .. }));
    }
}
