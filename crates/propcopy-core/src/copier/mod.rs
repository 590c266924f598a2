//! Compiled copiers.
//!
//! A `Copier<S, T>` is the executable result of matching a source layout
//! against a target bean: an ordered list of assignment steps with every
//! matching decision already taken.

mod generate;
pub mod plan;


pub use generate::{explain, generate};
pub use plan::{CopyPlan, PlanEntry, PlanMode, PlanReport, PlanSummary, SkipReason};

use crate::{
    convert::Converter,
    error::{ConversionError, CopyError, GenerationError},
    model::{BeanModel, FieldKind, ReadFn, WriteFn},
    registry::CopierKey,
    traits::{Bean, MapReadFn},
    value::Value,
};
use std::{collections::BTreeMap, fmt};

///
/// CopyFlags
///
/// Generation-time switches. Part of the cache key.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct CopyFlags {
    pub use_converter: bool,
    pub skip_null: bool,
}

impl CopyFlags {
    #[must_use]
    pub const fn new(use_converter: bool, skip_null: bool) -> Self {
        Self {
            use_converter,
            skip_null,
        }
    }
}

///
/// Step
///
/// One compiled assignment. `property` is the target property name and
/// `alias` the effective source-side name handed to converters.
///

pub(crate) enum Step<S, T> {
    Direct {
        property: &'static str,
        kind: FieldKind,
        read: ReadFn<S>,
        write: WriteFn<T>,
    },
    Converted {
        property: &'static str,
        alias: &'static str,
        kind: FieldKind,
        read: ReadFn<S>,
        write: WriteFn<T>,
    },
    Keyed {
        property: &'static str,
        alias: &'static str,
        kind: FieldKind,
        lookup: MapReadFn<S>,
        write: WriteFn<T>,
    },
}

impl<S, T> Step<S, T> {
    const fn property(&self) -> &'static str {
        match self {
            Self::Direct { property, .. }
            | Self::Converted { property, .. }
            | Self::Keyed { property, .. } => *property,
        }
    }

    fn apply(
        &self,
        source: &S,
        target: &mut T,
        converter: Option<&dyn Converter>,
        flags: CopyFlags,
    ) -> Result<(), CopyError> {
        match self {
            Self::Direct {
                property,
                kind,
                read,
                write,
            } => {
                let value = read(source);
                if flags.skip_null && value.is_null() {
                    return Ok(());
                }

                write(target, value).map_err(|rejected| CopyError::NotAssignable {
                    property: *property,
                    target: kind.clone(),
                    found: rejected.tag(),
                })
            }

            Self::Converted {
                property,
                alias,
                kind,
                read,
                write,
            } => {
                let value = read(source);
                if flags.skip_null && value.is_null() {
                    return Ok(());
                }

                convert_into(converter, *property, *alias, kind, value, *write, target)
            }

            // map entries: absent keys and nulls never reach the target
            Self::Keyed {
                property,
                alias,
                kind,
                lookup,
                write,
            } => {
                let Some(value) = lookup(source, alias).filter(|v| !v.is_null()) else {
                    return Ok(());
                };

                if flags.use_converter {
                    return convert_into(converter, *property, *alias, kind, value, *write, target);
                }

                if kind.accepts(&value) && write(target, value).is_err() {
                    tracing::trace!(property = *property, "map value rejected by property writer");
                }

                Ok(())
            }
        }
    }
}

fn convert_into<T>(
    converter: Option<&dyn Converter>,
    property: &'static str,
    alias: &'static str,
    kind: &FieldKind,
    value: Value,
    write: WriteFn<T>,
    target: &mut T,
) -> Result<(), CopyError> {
    let converter = converter.ok_or(CopyError::MissingConverter { property })?;
    let converted = converter.convert(value, kind, alias)?;

    write(target, converted).map_err(|rejected| {
        CopyError::from(ConversionError::NotAssignable {
            property: property.to_string(),
            target: kind.clone(),
            found: rejected.tag(),
        })
    })
}

///
/// Copier
///
/// Immutable, thread-safe copy routine for one (source, target, flags)
/// combination. Shared through `Arc` by the registry.
///

pub struct Copier<S, T> {
    key: CopierKey,
    source_path: &'static str,
    target_path: &'static str,
    steps: Vec<Step<S, T>>,
    skipped: usize,
}

impl<S, T> Copier<S, T> {
    pub(crate) const fn new(
        key: CopierKey,
        source_path: &'static str,
        target_path: &'static str,
        steps: Vec<Step<S, T>>,
        skipped: usize,
    ) -> Self {
        Self {
            key,
            source_path,
            target_path,
            steps,
            skipped,
        }
    }

    /// Copy every matched property from `source` into `target`.
    ///
    /// Steps run in target declaration order. On error, properties assigned
    /// before the failing one keep their new values.
    pub fn copy(
        &self,
        source: &S,
        target: &mut T,
        converter: Option<&dyn Converter>,
    ) -> Result<(), CopyError> {
        let flags = self.key.flags();

        for step in &self.steps {
            step.apply(source, target, converter, flags)?;
        }

        Ok(())
    }

    #[must_use]
    pub const fn key(&self) -> CopierKey {
        self.key
    }

    #[must_use]
    pub const fn source_path(&self) -> &'static str {
        self.source_path
    }

    #[must_use]
    pub const fn target_path(&self) -> &'static str {
        self.target_path
    }

    /// Number of compiled assignment steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of writable target properties left out of the copy.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Target property names in assignment order.
    pub fn properties(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps.iter().map(Step::property)
    }
}

impl<S, T> fmt::Debug for Copier<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Copier")
            .field("source", &self.source_path)
            .field("target", &self.target_path)
            .field("flags", &self.key.flags())
            .field("steps", &self.properties().collect::<Vec<_>>())
            .field("skipped", &self.skipped)
            .finish()
    }
}

/// Snapshot every readable property of `bean` into a name-keyed map.
pub fn bean_to_map<B: Bean>(bean: &B) -> Result<BTreeMap<String, Value>, GenerationError> {
    let model = BeanModel::<B>::resolve()?;

    Ok(model
        .readable()
        .filter_map(|property| {
            property
                .reader()
                .map(|read| (property.name().to_string(), read(bean)))
        })
        .collect())
}
