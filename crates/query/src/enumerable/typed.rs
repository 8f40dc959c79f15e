//! Type narrowing over dynamic [`Value`] sequences.

use seqlinq_core::{CastMode, Object, TypeDescriptor, TypeMode, Value, cast_to, is_of_type, is_of_type_strict};

use super::Enumerable;
use crate::decorator::Decorator;
use crate::source::KeyValuePair;

impl Enumerable<Value> {
    /// Elements that belong to `ty` under `mode`. Nulls never pass.
    pub fn of_type(&self, ty: &TypeDescriptor, mode: TypeMode) -> Self {
        let ty = ty.clone();
        self.filter(move |value| is_of_type(value, &ty, mode))
    }

    /// [`Enumerable::of_type`] in the descriptor's own form.
    pub fn of_type_strict(&self, ty: &TypeDescriptor) -> Self {
        let ty = ty.clone();
        self.filter(move |value| is_of_type_strict(value, &ty))
    }

    /// Coerces every element into `ty`. The first element that is not of the
    /// type fails the read with `InvalidCast`.
    pub fn cast(&self, ty: &TypeDescriptor, mode: CastMode) -> Self {
        let ty = ty.clone();
        self.decorate(|inner| {
            Decorator::new(inner, ()).with_current(move |inner, _| cast_to(inner.current()?, &ty, mode)).build()
        })
    }

    pub fn not_null(&self) -> Self {
        self.filter(|value| !value.is_null())
    }
}

impl From<KeyValuePair<Value>> for Value {
    /// Plain object with `key` and `value` fields.
    fn from(pair: KeyValuePair<Value>) -> Self {
        Value::Object(Object::plain().with_field("key", pair.key).with_field("value", pair.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use seqlinq_core::{Error, ErrorKind, type_of};

    fn mixed() -> Enumerable<Value> {
        Enumerable::from_vec(vec![Value::from("Hello"), Value::boxed("Hello"), Value::from(1), Value::Null])
    }

    #[rstest]
    fn of_type_respects_mode() {
        let either = mixed().of_type(&type_of::STRING, TypeMode::Either).to_vec().expect("either");
        assert_eq!(either, [Value::from("Hello"), Value::boxed("Hello")]);
        let primitive = mixed().of_type(&type_of::STRING, TypeMode::PrimitiveOnly).to_vec().expect("primitive");
        assert_eq!(primitive, [Value::from("Hello")]);
        let boxed = mixed().of_type_strict(&type_of::STRING_OBJECT).to_vec().expect("boxed");
        assert_eq!(boxed, [Value::boxed("Hello")]);
    }

    #[rstest]
    fn cast_fails_on_first_foreign_element() {
        let cast = mixed().cast(&type_of::STRING_OBJECT, CastMode::ToBoxed);
        assert_eq!(cast.first(), Ok(Value::boxed("Hello")));
        let err = cast.to_vec().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCast);
    }

    #[rstest]
    fn cast_after_of_type_is_total() {
        let unboxed = mixed()
            .of_type(&type_of::STRING, TypeMode::Either)
            .cast(&type_of::STRING, CastMode::ToPrimitive)
            .to_vec()
            .expect("cast");
        assert_eq!(unboxed, [Value::from("Hello"), Value::from("Hello")]);
    }

    #[rstest]
    fn not_null_drops_nulls() {
        assert_eq!(mixed().not_null().count(), Ok(3));
    }

    #[rstest]
    fn pairs_become_plain_objects() {
        let value = Value::from(KeyValuePair::new("a", Value::from(1)));
        let object = value.as_object().expect("object");
        assert_eq!(object.get("key"), Some(&Value::from("a")));
        assert_eq!(object.get("value"), Some(&Value::from(1)));
    }

    fn one_then_text() -> Enumerable<Value> {
        Enumerable::from_vec(vec![Value::from(1), Value::from("a")]).cast(&type_of::STRING, CastMode::Inherit)
    }

    #[rstest]
    fn element_at_reads_only_the_requested_element() {
        let cast = one_then_text();
        assert_eq!(cast.element_at(1), Ok(Value::from("a")));
        assert_eq!(cast.element_at(0).unwrap_err().kind(), ErrorKind::InvalidCast);
        assert_eq!(cast.element_at(5), Err(Error::IndexOutOfRange { index: 5 }));
        assert_eq!(cast.element_at_or_default(5, Value::Null), Ok(Value::Null));
        assert_eq!(cast.element_at_or_default(0, Value::Null).unwrap_err().kind(), ErrorKind::InvalidCast);
    }

    #[rstest]
    fn element_at_or_default_keeps_failures_before_the_index() {
        let filtered = one_then_text().filter(|value| !value.is_null());
        assert_eq!(filtered.element_at(1).unwrap_err().kind(), ErrorKind::InvalidCast);
        assert_eq!(filtered.element_at_or_default(5, Value::Null).unwrap_err().kind(), ErrorKind::InvalidCast);
    }

    #[rstest]
    fn count_does_not_read_elements() {
        assert_eq!(one_then_text().count(), Ok(2));
        assert_eq!(one_then_text().any(), Ok(true));
        let filtered = one_then_text().filter(|_| true);
        assert_eq!(filtered.count().unwrap_err().kind(), ErrorKind::InvalidCast);
    }
}
