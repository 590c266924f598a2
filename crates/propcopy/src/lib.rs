//! ## Crate layout
//! - `config`: TOML-backed registry configuration.
//! - `convert`: the converter boundary and the standard converter.
//! - `copier`: matching plans and compiled copiers.
//! - `error`: generation, copy, conversion and config errors.
//! - `model`: declared kinds, property descriptors and resolved beans.
//! - `obs`: metrics events, sinks and counter snapshots.
//! - `registry`: the compute-once copier cache.
//! - `traits`: `Bean`, `FieldValue` and the copy source traits.
//! - `value`: the dynamic `Value` exchanged by readers and writers.
//!
//! `#[derive(Bean)]` generates property descriptors for plain structs; the
//! `prelude` carries everything needed to declare beans and run copies.

pub use propcopy_core::{config, convert, copier, error, model, obs, registry, traits, value};

pub use propcopy_core::error::Error;
pub use propcopy_derive::Bean;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// The derive and trait share the `Bean` name in separate namespaces.
///

pub mod prelude {
    pub use crate::Bean;
    pub use propcopy_core::prelude::*;
}
