//! Runtime property model.
//!
//! Types in `model` describe *what a bean exposes*: declared kinds, typed
//! accessors and per-property copy overrides. They are produced by the
//! `Bean` derive (or a manual impl) and consumed by the copier generator.
pub mod bean;
pub mod kind;
pub mod property;

pub use bean::BeanModel;
pub use kind::FieldKind;
pub use property::{CopyProperty, PropertyDescriptor, ReadFn, WriteFn};
