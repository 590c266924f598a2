//! Converter boundary.
//!
//! Converters are injected by the caller and invoked only for properties
//! whose declared types are not directly assignable. The copier never wraps
//! a converter's error.

mod standard;

pub use standard::StandardConverter;

use crate::{error::ConversionError, model::FieldKind, value::Value};

///
/// Converter
///
/// Coerce `value` into something assignable to a property of kind `target`.
/// Called exactly once per mismatched property per copy.
///

pub trait Converter {
    fn convert(
        &self,
        value: Value,
        target: &FieldKind,
        property: &str,
    ) -> Result<Value, ConversionError>;
}

impl<F> Converter for F
where
    F: Fn(Value, &FieldKind, &str) -> Result<Value, ConversionError>,
{
    fn convert(
        &self,
        value: Value,
        target: &FieldKind,
        property: &str,
    ) -> Result<Value, ConversionError> {
        self(value, target, property)
    }
}
