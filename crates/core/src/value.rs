//! Dynamic element model used by the type identity helpers.
//!
//! Primitive scalars exist in two explicit forms: [`Value::Primitive`] is the
//! unwrapped scalar and [`Value::Boxed`] is the same scalar carried as a
//! reference value. `is_of_type`/`cast_to` distinguish the two by pattern
//! matching rather than by probing at runtime.

use core::fmt;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::types::known;
use crate::types::{Constructor, TypeDescriptor};

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Primitive {
    /// Constructor of the boxed counterpart (`Boolean`, `Number` or `String`).
    pub fn constructor(&self) -> &Arc<Constructor> {
        match self {
            Primitive::Boolean(_) => known::boolean_ctor(),
            Primitive::Number(_) => known::number_ctor(),
            Primitive::String(_) => known::string_ctor(),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Boolean(b) => write!(f, "{b}"),
            Primitive::Number(n) => write_number(f, *n),
            Primitive::String(s) => write!(f, "{s:?}"),
        }
    }
}

// Integral numbers print without a fractional part.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{n:.0}")
    } else {
        write!(f, "{n}")
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Primitive::Boolean(value)
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Primitive::Number(value)
    }
}

impl From<i32> for Primitive {
    fn from(value: i32) -> Self {
        Primitive::Number(f64::from(value))
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::String(value.to_owned())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Primitive::String(value)
    }
}

type FunctionBody = dyn Fn(&[Value]) -> Value;

/// Named callable value. Two functions are equal only if they share a body.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    body: Rc<FunctionBody>,
}

impl Function {
    pub fn new(name: impl Into<Arc<str>>, body: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self { name: name.into(), body: Rc::new(body) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.body)(args)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Instance of a registered (or the generic `Object`) type.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    ctor: Arc<Constructor>,
    fields: IndexMap<String, Value>,
}

impl Object {
    /// Plain object whose constructor is `Object`.
    pub fn plain() -> Self {
        Self { ctor: Arc::clone(known::object_ctor()), fields: IndexMap::new() }
    }

    pub fn of(descriptor: &TypeDescriptor) -> Self {
        Self { ctor: Arc::clone(descriptor.constructor()), fields: IndexMap::new() }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn constructor(&self) -> &Arc<Constructor> {
        &self.ctor
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Primitive(Primitive),
    Boxed(Primitive),
    Array(Vec<Value>),
    Function(Function),
    Object(Object),
}

impl Value {
    pub fn boxed(value: impl Into<Primitive>) -> Self {
        Value::Boxed(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for every value that is not a null or an unwrapped primitive.
    pub fn is_reference(&self) -> bool {
        matches!(self, Value::Boxed(_) | Value::Array(_) | Value::Function(_) | Value::Object(_))
    }

    /// Constructor identity of the value; `None` for null.
    pub fn constructor(&self) -> Option<&Arc<Constructor>> {
        match self {
            Value::Null => None,
            Value::Primitive(p) | Value::Boxed(p) => Some(p.constructor()),
            Value::Array(_) => Some(known::array_ctor()),
            Value::Function(_) => Some(known::function_ctor()),
            Value::Object(o) => Some(o.constructor()),
        }
    }

    /// Scalar payload regardless of primitive/boxed form.
    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Value::Primitive(p) | Value::Boxed(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.as_primitive() {
            Some(Primitive::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.as_primitive() {
            Some(Primitive::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.as_primitive() {
            Some(Primitive::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Primitive(p) => write!(f, "{p}"),
            Value::Boxed(p) => write!(f, "{}({p})", p.constructor().name()),
            Value::Array(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Function(func) => write!(f, "function {}()", func.name()),
            Value::Object(o) => {
                write!(f, "{} {{", o.constructor().name())?;
                for (idx, (name, value)) in o.fields().enumerate() {
                    let sep = if idx > 0 { ", " } else { " " };
                    write!(f, "{sep}{name}: {value}")?;
                }
                if o.is_empty() { write!(f, "}}") } else { write!(f, " }}") }
            }
        }
    }
}

impl From<Primitive> for Value {
    fn from(value: Primitive) -> Self {
        Value::Primitive(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Primitive(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Primitive(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Primitive(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Primitive(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Primitive(value.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Null, "null")]
    #[case(Value::from(3.0), "3")]
    #[case(Value::from(2.5), "2.5")]
    #[case(Value::from("hi"), "\"hi\"")]
    #[case(Value::boxed("hi"), "String(\"hi\")")]
    #[case(Value::from(vec![Value::from(1), Value::from(true)]), "[1, true]")]
    #[case(Value::from(Object::plain().with_field("a", 1)), "Object { a: 1 }")]
    #[case(Value::from(Object::plain()), "Object {}")]
    fn display_renders_values(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    fn boxed_and_primitive_share_a_constructor() {
        let primitive = Value::from("x");
        let boxed = Value::boxed("x");
        assert_eq!(primitive.constructor(), boxed.constructor());
        assert!(!primitive.is_reference());
        assert!(boxed.is_reference());
        assert_ne!(primitive, boxed);
    }

    #[rstest]
    fn null_has_no_constructor() {
        assert!(Value::Null.constructor().is_none());
        assert_eq!(Value::from(None::<i32>), Value::Null);
    }

    #[rstest]
    fn functions_compare_by_identity() {
        let f = Function::new("twice", |args| {
            Value::from(args.first().and_then(Value::as_number).unwrap_or_default() * 2.0)
        });
        let g = Function::new("twice", |_| Value::Null);
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
        assert_eq!(f.call(&[Value::from(4)]), Value::from(8));
    }
}
