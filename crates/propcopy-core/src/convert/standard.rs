use crate::{
    convert::Converter,
    error::ConversionError,
    model::FieldKind,
    value::{Value, ValueTag},
};
use num_traits::{Float, NumCast, ToPrimitive};

///
/// StandardConverter
///
/// General-purpose converter covering the common scalar coercions:
/// - numeric to numeric, range checked (fractional floats never truncate)
/// - text to numeric, bool or char by parsing
/// - any scalar to text
/// - lists and maps element-wise
///
/// `Null` passes through untouched; the property writer decides what a
/// null means for its type.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct StandardConverter;

impl Converter for StandardConverter {
    fn convert(
        &self,
        value: Value,
        target: &FieldKind,
        property: &str,
    ) -> Result<Value, ConversionError> {
        convert_value(value, target, property)
    }
}

fn convert_value(value: Value, target: &FieldKind, property: &str) -> Result<Value, ConversionError> {
    if value.is_null() || target.accepts_by_tag(&value) {
        return Ok(value);
    }

    match target {
        FieldKind::Optional(inner) => convert_value(value, inner, property),
        FieldKind::Text => scalar_to_text(&value)
            .map(Value::Text)
            .ok_or_else(|| unsupported(&value, target, property)),
        FieldKind::Bool => match &value {
            Value::Text(s) => parse_bool(s).map(Value::Bool).ok_or_else(|| parse(s, target, property)),
            _ => Err(unsupported(&value, target, property)),
        },
        FieldKind::Char => match &value {
            Value::Text(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Char(c)),
                    _ => Err(parse(s, target, property)),
                }
            }
            _ => Err(unsupported(&value, target, property)),
        },
        FieldKind::List(inner) => match value {
            Value::List(items) => items
                .into_iter()
                .map(|item| convert_value(item, inner, property))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            other => Err(unsupported(&other, target, property)),
        },
        FieldKind::Map(inner) => match value {
            Value::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| convert_value(v, inner, property).map(|v| (k, v)))
                .collect::<Result<_, _>>()
                .map(Value::Map),
            other => Err(unsupported(&other, target, property)),
        },
        FieldKind::Any | FieldKind::Named(_) => Err(unsupported(&value, target, property)),
        numeric => {
            let Some(tag) = numeric.scalar_tag().filter(|tag| tag.is_numeric()) else {
                return Err(unsupported(&value, target, property));
            };

            match &value {
                Value::Text(s) => {
                    parse_numeric(s.trim(), tag).ok_or_else(|| parse(s, target, property))
                }
                v if v.is_numeric() => {
                    cast_numeric(v, tag).ok_or_else(|| ConversionError::OutOfRange {
                        property: property.to_string(),
                        target: target.clone(),
                    })
                }
                v => Err(unsupported(v, target, property)),
            }
        }
    }
}

fn unsupported(value: &Value, target: &FieldKind, property: &str) -> ConversionError {
    ConversionError::Unsupported {
        property: property.to_string(),
        target: target.clone(),
        found: value.tag(),
    }
}

fn parse(input: &str, target: &FieldKind, property: &str) -> ConversionError {
    ConversionError::Parse {
        property: property.to_string(),
        target: target.clone(),
        input: input.to_string(),
    }
}

fn scalar_to_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Bool(v) => v.to_string(),
        Value::Char(v) => v.to_string(),
        Value::Float32(v) => v.to_string(),
        Value::Float64(v) => v.to_string(),
        Value::Int8(v) => v.to_string(),
        Value::Int16(v) => v.to_string(),
        Value::Int32(v) => v.to_string(),
        Value::Int64(v) => v.to_string(),
        Value::Text(v) => v.clone(),
        Value::Uint8(v) => v.to_string(),
        Value::Uint16(v) => v.to_string(),
        Value::Uint32(v) => v.to_string(),
        Value::Uint64(v) => v.to_string(),
        Value::List(_) | Value::Map(_) | Value::Null => return None,
    };

    Some(text)
}

fn parse_bool(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_numeric(input: &str, tag: ValueTag) -> Option<Value> {
    let value = match tag {
        ValueTag::Float32 => Value::Float32(input.parse().ok()?),
        ValueTag::Float64 => Value::Float64(input.parse().ok()?),
        ValueTag::Int8 => Value::Int8(input.parse().ok()?),
        ValueTag::Int16 => Value::Int16(input.parse().ok()?),
        ValueTag::Int32 => Value::Int32(input.parse().ok()?),
        ValueTag::Int64 => Value::Int64(input.parse().ok()?),
        ValueTag::Uint8 => Value::Uint8(input.parse().ok()?),
        ValueTag::Uint16 => Value::Uint16(input.parse().ok()?),
        ValueTag::Uint32 => Value::Uint32(input.parse().ok()?),
        ValueTag::Uint64 => Value::Uint64(input.parse().ok()?),
        _ => return None,
    };

    Some(value)
}

fn cast_numeric(value: &Value, tag: ValueTag) -> Option<Value> {
    match value {
        Value::Float32(v) => cast_float(*v, tag),
        Value::Float64(v) => cast_float(*v, tag),
        Value::Int8(v) => cast_to(*v, tag),
        Value::Int16(v) => cast_to(*v, tag),
        Value::Int32(v) => cast_to(*v, tag),
        Value::Int64(v) => cast_to(*v, tag),
        Value::Uint8(v) => cast_to(*v, tag),
        Value::Uint16(v) => cast_to(*v, tag),
        Value::Uint32(v) => cast_to(*v, tag),
        Value::Uint64(v) => cast_to(*v, tag),
        _ => None,
    }
}

// Integer targets never receive a fractional or non-finite float.
fn cast_float<F: Float + ToPrimitive>(n: F, tag: ValueTag) -> Option<Value> {
    let integral_target = !matches!(tag, ValueTag::Float32 | ValueTag::Float64);
    if integral_target && (!n.is_finite() || n.fract() != F::zero()) {
        return None;
    }

    cast_to(n, tag)
}

fn cast_to<N: ToPrimitive + Copy>(n: N, tag: ValueTag) -> Option<Value> {
    let value = match tag {
        ValueTag::Float32 => Value::Float32(<f32 as NumCast>::from(n)?),
        ValueTag::Float64 => Value::Float64(<f64 as NumCast>::from(n)?),
        ValueTag::Int8 => Value::Int8(<i8 as NumCast>::from(n)?),
        ValueTag::Int16 => Value::Int16(<i16 as NumCast>::from(n)?),
        ValueTag::Int32 => Value::Int32(<i32 as NumCast>::from(n)?),
        ValueTag::Int64 => Value::Int64(<i64 as NumCast>::from(n)?),
        ValueTag::Uint8 => Value::Uint8(<u8 as NumCast>::from(n)?),
        ValueTag::Uint16 => Value::Uint16(<u16 as NumCast>::from(n)?),
        ValueTag::Uint32 => Value::Uint32(<u32 as NumCast>::from(n)?),
        ValueTag::Uint64 => Value::Uint64(<u64 as NumCast>::from(n)?),
        _ => return None,
    };

    Some(value)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(value: Value, target: &FieldKind) -> Result<Value, ConversionError> {
        StandardConverter.convert(value, target, "prop")
    }

    #[test]
    fn text_parses_into_numbers() {
        assert_eq!(
            convert(Value::from("42"), &FieldKind::Int32),
            Ok(Value::Int32(42))
        );
        assert_eq!(
            convert(Value::from(" 7 "), &FieldKind::Uint8),
            Ok(Value::Uint8(7))
        );
        assert!(matches!(
            convert(Value::from("abc"), &FieldKind::Int32),
            Err(ConversionError::Parse { .. })
        ));
    }

    #[test]
    fn narrowing_is_range_checked() {
        assert_eq!(
            convert(Value::Int64(120), &FieldKind::Int8),
            Ok(Value::Int8(120))
        );
        assert!(matches!(
            convert(Value::Int64(300), &FieldKind::Int8),
            Err(ConversionError::OutOfRange { .. })
        ));
        assert!(matches!(
            convert(Value::Int32(-1), &FieldKind::Uint32),
            Err(ConversionError::OutOfRange { .. })
        ));
    }

    #[test]
    fn fractional_floats_do_not_truncate() {
        assert_eq!(
            convert(Value::Float64(3.0), &FieldKind::Int16),
            Ok(Value::Int16(3))
        );
        assert!(matches!(
            convert(Value::Float64(3.5), &FieldKind::Int16),
            Err(ConversionError::OutOfRange { .. })
        ));
    }

    #[test]
    fn scalars_render_as_text() {
        assert_eq!(
            convert(Value::Int32(5), &FieldKind::Text),
            Ok(Value::from("5"))
        );
        assert_eq!(
            convert(Value::Bool(true), &FieldKind::Text),
            Ok(Value::from("true"))
        );
    }

    #[test]
    fn bool_and_char_parse_from_text() {
        assert_eq!(
            convert(Value::from("Yes"), &FieldKind::Bool),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            convert(Value::from("x"), &FieldKind::Char),
            Ok(Value::Char('x'))
        );
        assert!(convert(Value::from("xy"), &FieldKind::Char).is_err());
    }

    #[test]
    fn collections_convert_element_wise() {
        let target = FieldKind::List(Box::new(FieldKind::Int64));
        let value = Value::List(vec![Value::from("1"), Value::Uint64(2)]);

        assert_eq!(
            convert(value, &target),
            Ok(Value::List(vec![Value::Int64(1), Value::Int64(2)]))
        );
    }

    #[test]
    fn null_and_assignable_values_pass_through() {
        assert_eq!(convert(Value::Null, &FieldKind::Int32), Ok(Value::Null));
        assert_eq!(
            convert(Value::Int8(1), &FieldKind::Int64),
            Ok(Value::Int8(1))
        );
        assert_eq!(
            convert(Value::from("9"), &FieldKind::Optional(Box::new(FieldKind::Uint16))),
            Ok(Value::Uint16(9))
        );
    }

    #[test]
    fn unsupported_pairs_report_found_tag() {
        let err = convert(Value::List(vec![]), &FieldKind::Int32).unwrap_err();

        assert_eq!(
            err,
            ConversionError::Unsupported {
                property: "prop".to_string(),
                target: FieldKind::Int32,
                found: ValueTag::List,
            }
        );
    }
}
