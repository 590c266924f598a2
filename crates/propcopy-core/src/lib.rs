//! Core runtime for propcopy: bean introspection, copier generation, the
//! copier registry, converters, and the ergonomics exported via the
//! `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod convert;
pub mod copier;
pub mod error;
pub mod model;
pub mod obs;
pub mod registry;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Domain vocabulary needed to declare beans and run copies.
///

pub mod prelude {
    pub use crate::{
        convert::{Converter, StandardConverter},
        copier::Copier,
        model::{CopyProperty, FieldKind, PropertyDescriptor},
        registry::CopierRegistry,
        traits::{Bean, CopySource, FieldValue},
        value::Value,
    };
}
