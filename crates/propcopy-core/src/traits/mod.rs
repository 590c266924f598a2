mod field;
mod source;

pub use field::{FieldValue, assign};
pub use source::{MapReadFn, SourceLayout};

use crate::{error::GenerationError, model::PropertyDescriptor, value::Value};

// ============================================================================
// BEANS
// ============================================================================
//
// A bean is any structured type that can describe its own properties.
// The derive macro is the usual producer; manual impls are allowed.
//

///
/// Bean
///
/// Property introspection capability for a structured type.
///
/// `properties()` is called once per copier generation and must return the
/// properties in declaration order. An `Err` means the type cannot be
/// introspected; nothing is cached for keys involving it.
///

pub trait Bean: Sized + 'static {
    /// Fully-qualified type path used in diagnostics.
    const PATH: &'static str;

    fn properties() -> Result<Vec<PropertyDescriptor<Self>>, GenerationError>;
}

// ============================================================================
// SOURCES
// ============================================================================

///
/// MapSource
///
/// String-keyed source resolved at copy time instead of generation time.
///

pub trait MapSource: 'static {
    const PATH: &'static str;

    /// Fetch the value stored under `key`, if any.
    fn get_value(&self, key: &str) -> Option<Value>;
}

///
/// CopySource
///
/// Anything a copier can read from: every `Bean` is a structured source,
/// and the map types listed in `source` are keyed sources.
///

pub trait CopySource: Sized + 'static {
    const PATH: &'static str;

    fn source_layout() -> Result<SourceLayout<Self>, GenerationError>;
}
