//! Conversions between JSON documents and seqlinq values.

use serde_json::{Map, Number};
use seqlinq::{Enumerable, Object, Primitive, Record, Value};

type Json = serde_json::Value;

/// JSON numbers become `f64`; objects become plain `Object` values.
pub fn from_json(json: Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::from(b),
        Json::Number(n) => Value::from(n.as_f64().unwrap_or(f64::NAN)),
        Json::String(s) => Value::from(s),
        Json::Array(items) => Value::Array(items.into_iter().map(from_json).collect()),
        Json::Object(fields) => {
            let mut object = Object::plain();
            for (name, value) in fields {
                object.insert(name, from_json(value));
            }
            Value::Object(object)
        }
    }
}

/// Boxed primitives serialize like their unwrapped form. Functions have no
/// JSON form and render as their display text.
pub fn to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Primitive(p) | Value::Boxed(p) => primitive_to_json(p),
        Value::Array(items) => Json::Array(items.iter().map(to_json).collect()),
        Value::Function(_) => Json::String(value.to_string()),
        Value::Object(object) => {
            let fields: Map<String, Json> =
                object.fields().map(|(name, value)| (name.to_owned(), to_json(value))).collect();
            Json::Object(fields)
        }
    }
}

pub(crate) fn number_to_json(n: f64) -> Json {
    // Integral values print without a trailing `.0`.
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE {
        return Json::from(n as i64);
    }
    Number::from_f64(n).map_or(Json::Null, Json::Number)
}

fn primitive_to_json(p: &Primitive) -> Json {
    match p {
        Primitive::Boolean(b) => Json::Bool(*b),
        Primitive::Number(n) => number_to_json(*n),
        Primitive::String(s) => Json::String(s.clone()),
    }
}

/// Builds the pipeline source for a document. Arrays yield their items,
/// objects yield `{key, value}` entries in document order, and any other
/// document is a single element.
pub fn source(document: Json) -> Enumerable<Value> {
    match document {
        Json::Array(items) => Enumerable::from_vec(items.into_iter().map(from_json).collect()),
        Json::Object(fields) => {
            let record = Record::new();
            for (key, value) in fields {
                record.insert(key, from_json(value));
            }
            Enumerable::from_record(&record).select(Value::from)
        }
        other => Enumerable::from_vec(vec![from_json(other)]),
    }
}
