use crate::value::{Value, ValueTag};
use std::fmt;

///
/// FieldKind
///
/// Declared type of a bean property.
/// Scalar variants line up with `Value` variants; the rest describe shape.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum FieldKind {
    /// Target typed as a raw `Value`; accepts anything.
    Any,
    Bool,
    Char,
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    List(Box<Self>),
    /// String-keyed map with homogeneous values.
    Map(Box<Self>),
    /// User type identified by its path; assignable only to itself.
    Named(&'static str),
    Optional(Box<Self>),
    Text,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
}

///
/// WideningRule
///
/// Declarative lossless numeric widening, following the primitive `From`
/// impls of the standard library. Absence of a rule means the pair is not
/// directly assignable.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WideningRule {
    pub from: ValueTag,
    pub to: &'static [ValueTag],
}

pub const WIDENING_TABLE: &[WideningRule] = &[
    WideningRule {
        from: ValueTag::Int8,
        to: &[
            ValueTag::Int16,
            ValueTag::Int32,
            ValueTag::Int64,
            ValueTag::Float32,
            ValueTag::Float64,
        ],
    },
    WideningRule {
        from: ValueTag::Int16,
        to: &[
            ValueTag::Int32,
            ValueTag::Int64,
            ValueTag::Float32,
            ValueTag::Float64,
        ],
    },
    WideningRule {
        from: ValueTag::Int32,
        to: &[ValueTag::Int64, ValueTag::Float64],
    },
    WideningRule {
        from: ValueTag::Uint8,
        to: &[
            ValueTag::Int16,
            ValueTag::Int32,
            ValueTag::Int64,
            ValueTag::Uint16,
            ValueTag::Uint32,
            ValueTag::Uint64,
            ValueTag::Float32,
            ValueTag::Float64,
        ],
    },
    WideningRule {
        from: ValueTag::Uint16,
        to: &[
            ValueTag::Int32,
            ValueTag::Int64,
            ValueTag::Uint32,
            ValueTag::Uint64,
            ValueTag::Float32,
            ValueTag::Float64,
        ],
    },
    WideningRule {
        from: ValueTag::Uint32,
        to: &[ValueTag::Int64, ValueTag::Uint64, ValueTag::Float64],
    },
    WideningRule {
        from: ValueTag::Float32,
        to: &[ValueTag::Float64],
    },
];

/// Return true when a scalar of tag `from` widens losslessly into `to`.
#[must_use]
pub fn widens(from: ValueTag, to: ValueTag) -> bool {
    from == to
        || WIDENING_TABLE
            .iter()
            .find(|rule| rule.from == from)
            .is_some_and(|rule| rule.to.contains(&to))
}

impl FieldKind {
    /// Scalar tag for kinds that line up with a single `Value` variant.
    #[must_use]
    pub const fn scalar_tag(&self) -> Option<ValueTag> {
        let tag = match self {
            Self::Bool => ValueTag::Bool,
            Self::Char => ValueTag::Char,
            Self::Float32 => ValueTag::Float32,
            Self::Float64 => ValueTag::Float64,
            Self::Int8 => ValueTag::Int8,
            Self::Int16 => ValueTag::Int16,
            Self::Int32 => ValueTag::Int32,
            Self::Int64 => ValueTag::Int64,
            Self::Text => ValueTag::Text,
            Self::Uint8 => ValueTag::Uint8,
            Self::Uint16 => ValueTag::Uint16,
            Self::Uint32 => ValueTag::Uint32,
            Self::Uint64 => ValueTag::Uint64,
            Self::Any | Self::List(_) | Self::Map(_) | Self::Named(_) | Self::Optional(_) => {
                return None;
            }
        };

        Some(tag)
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_) | Self::Any)
    }

    /// Strip one level of optionality.
    #[must_use]
    pub fn non_optional(&self) -> &Self {
        match self {
            Self::Optional(inner) => inner.non_optional(),
            other => other,
        }
    }

    /// Return true when a property declared as `source` can be written into
    /// a property declared as `self` without a converter.
    ///
    /// Optionality of the source is a runtime concern: a null read from an
    /// optional source writes the target's zero value unless null-skipping
    /// is enabled.
    #[must_use]
    pub fn is_assignable_from(&self, source: &Self) -> bool {
        let target = self.non_optional();
        let source = source.non_optional();

        match (target, source) {
            (Self::Any, _) => true,
            (_, Self::Any) => false,
            (Self::List(t), Self::List(s)) | (Self::Map(t), Self::Map(s)) => {
                t.is_assignable_from(s)
            }
            (Self::Named(t), Self::Named(s)) => t == s,
            _ => match (target.scalar_tag(), source.scalar_tag()) {
                (Some(t), Some(s)) => widens(s, t),
                _ => false,
            },
        }
    }

    /// Return true when an untyped runtime value can be written into a
    /// property declared as `self` without a converter.
    ///
    /// Numbers are checked by value: any numeric variant is accepted when it
    /// converts exactly into the declared scalar, so `Int64(42)` from a JSON
    /// document fits an `i32` or `f64` property. `Named` kinds cannot be
    /// checked structurally and are left to the property writer.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        self.admits(value, true)
    }

    /// Like `accepts`, but numbers are only admitted by the widening table.
    /// A value passing this check needs no numeric rewriting at all.
    #[must_use]
    pub fn accepts_by_tag(&self, value: &Value) -> bool {
        self.admits(value, false)
    }

    fn admits(&self, value: &Value, by_value: bool) -> bool {
        match (self, value) {
            (Self::Any, _) => true,
            (Self::Optional(_), Value::Null) => true,
            (_, Value::Null) => false,
            (Self::Optional(inner), value) => inner.admits(value, by_value),
            (Self::Named(_), _) => true,
            (Self::List(inner), Value::List(items)) => {
                items.iter().all(|v| inner.admits(v, by_value))
            }
            (Self::Map(inner), Value::Map(entries)) => {
                entries.values().all(|v| inner.admits(v, by_value))
            }
            (kind, value) => kind.scalar_tag().is_some_and(|tag| {
                widens(value.tag(), tag) || (by_value && value.fits(tag))
            }),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::List(inner) => write!(f, "List<{inner}>"),
            Self::Map(inner) => write!(f, "Map<Text, {inner}>"),
            Self::Named(path) => f.write_str(path),
            Self::Optional(inner) => write!(f, "Optional<{inner}>"),
            scalar => match scalar.scalar_tag() {
                Some(tag) => f.write_str(tag.label()),
                None => f.write_str("?"),
            },
        }
    }
}

///
/// TESTS
///
