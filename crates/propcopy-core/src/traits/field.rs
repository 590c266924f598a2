use crate::{model::FieldKind, value::Value};
use std::collections::{BTreeMap, HashMap};

///
/// FieldValue
///
/// Conversion boundary between typed property storage and `Value`.
///
/// `from_value` accepts exactly what `kind().accepts` allows: the widening
/// table, plus any number that converts exactly into a numeric `kind()`.
/// A `Null` value yields the zero value for non-optional primitives,
/// strings and collections.
///

pub trait FieldValue {
    fn kind() -> FieldKind
    where
        Self: Sized;

    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

/// Write `value` into a typed slot, handing it back when it does not fit.
pub fn assign<T: FieldValue>(slot: &mut T, value: Value) -> Result<(), Value> {
    match T::from_value(&value) {
        Some(v) => {
            *slot = v;
            Ok(())
        }
        None => Err(value),
    }
}

// impl_field_value
// Each entry lists the variant it stores, the variants it widens from, and
// the fallback tried for any other non-null value.
macro_rules! impl_field_value {
    ( $( $type:ty => $variant:ident [ $( $wide:ident ),* ] else $fallback:path ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn kind() -> FieldKind {
                    FieldKind::$variant
                }

                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(*v),
                        $( Value::$wide(v) => Some(Self::from(*v)), )*
                        Value::Null => Some(Self::default()),
                        other => $fallback(other),
                    }
                }
            }
        )*
    };
}

const fn no_fallback<T>(_: &Value) -> Option<T> {
    None
}

impl_field_value!(
    bool => Bool [] else no_fallback,
    char => Char [] else no_fallback,
    i8 => Int8 [] else Value::to_exact,
    i16 => Int16 [Int8, Uint8] else Value::to_exact,
    i32 => Int32 [Int8, Int16, Uint8, Uint16] else Value::to_exact,
    i64 => Int64 [Int8, Int16, Int32, Uint8, Uint16, Uint32] else Value::to_exact,
    u8 => Uint8 [] else Value::to_exact,
    u16 => Uint16 [Uint8] else Value::to_exact,
    u32 => Uint32 [Uint8, Uint16] else Value::to_exact,
    u64 => Uint64 [Uint8, Uint16, Uint32] else Value::to_exact,
    f32 => Float32 [Int8, Int16, Uint8, Uint16] else Value::to_exact,
    f64 => Float64 [Float32, Int8, Int16, Int32, Uint8, Uint16, Uint32] else Value::to_exact,
);

impl FieldValue for String {
    fn kind() -> FieldKind {
        FieldKind::Text
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            Value::Null => Some(Self::new()),
            _ => None,
        }
    }
}

impl FieldValue for Value {
    fn kind() -> FieldKind {
        FieldKind::Any
    }

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn kind() -> FieldKind {
        FieldKind::Optional(Box::new(T::kind()))
    }

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }

        T::from_value(value).map(Some)
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    fn kind() -> FieldKind {
        T::kind()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: &Value) -> Option<Self> {
        T::from_value(value).map(Self::new)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::List(Box::new(T::kind()))
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            Value::Null => Some(Self::new()),
            _ => None,
        }
    }
}

impl<T: FieldValue> FieldValue for BTreeMap<String, T> {
    fn kind() -> FieldKind {
        FieldKind::Map(Box::new(T::kind()))
    }

    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Map(entries) => entries
                .iter()
                .map(|(k, v)| T::from_value(v).map(|v| (k.clone(), v)))
                .collect(),
            Value::Null => Some(Self::new()),
            _ => None,
        }
    }
}

impl<T: FieldValue> FieldValue for HashMap<String, T> {
    fn kind() -> FieldKind {
        FieldKind::Map(Box::new(T::kind()))
    }

    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Map(entries) => entries
                .iter()
                .map(|(k, v)| T::from_value(v).map(|v| (k.clone(), v)))
                .collect(),
            Value::Null => Some(Self::new()),
            _ => None,
        }
    }
}

///
/// TESTS
///
