use crate::{model::kind::FieldKind, value::Value};
use std::fmt;

/// Typed property reader.
pub type ReadFn<B> = fn(&B) -> Value;

/// Typed property writer.
/// Hands the value back when it cannot be represented by the property.
pub type WriteFn<B> = fn(&mut B, Value) -> Result<(), Value>;

///
/// CopyProperty
///
/// Copy override attached to a target property.
/// `ignore` wins over `alias`; an empty alias means no alias.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CopyProperty {
    pub ignore: bool,
    pub alias: &'static str,
}

impl CopyProperty {
    #[must_use]
    pub const fn ignored() -> Self {
        Self {
            ignore: true,
            alias: "",
        }
    }

    #[must_use]
    pub const fn alias(alias: &'static str) -> Self {
        Self {
            ignore: false,
            alias,
        }
    }

    /// Alias to use when searching the source side, if any.
    #[must_use]
    pub fn effective_alias(&self) -> Option<&'static str> {
        let alias = self.alias.trim();

        (!alias.is_empty()).then_some(alias)
    }
}

///
/// PropertyDescriptor
///
/// Runtime accessor metadata for one property of bean `B`.
/// Produced by the bean's `properties()` and immutable afterwards.
///

pub struct PropertyDescriptor<B> {
    name: &'static str,
    kind: FieldKind,
    read: Option<ReadFn<B>>,
    write: Option<WriteFn<B>>,
    returns_self: bool,
    copy: Option<CopyProperty>,
}

impl<B> PropertyDescriptor<B> {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            read: None,
            write: None,
            returns_self: false,
            copy: None,
        }
    }

    #[must_use]
    pub const fn with_reader(mut self, read: ReadFn<B>) -> Self {
        self.read = Some(read);
        self
    }

    #[must_use]
    pub const fn with_writer(mut self, write: WriteFn<B>) -> Self {
        self.write = Some(write);
        self
    }

    /// Mark the writer as a chained setter returning the bean itself.
    #[must_use]
    pub const fn chained(mut self) -> Self {
        self.returns_self = true;
        self
    }

    #[must_use]
    pub const fn with_copy(mut self, copy: CopyProperty) -> Self {
        self.copy = Some(copy);
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    #[must_use]
    pub const fn reader(&self) -> Option<ReadFn<B>> {
        self.read
    }

    #[must_use]
    pub const fn writer(&self) -> Option<WriteFn<B>> {
        self.write
    }

    #[must_use]
    pub const fn is_readable(&self) -> bool {
        self.read.is_some()
    }

    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.write.is_some()
    }

    #[must_use]
    pub const fn returns_self(&self) -> bool {
        self.returns_self
    }

    #[must_use]
    pub const fn copy_override(&self) -> Option<&CopyProperty> {
        self.copy.as_ref()
    }
}

// fn pointers are Clone for any B, so no bound is needed here
impl<B> Clone for PropertyDescriptor<B> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            kind: self.kind.clone(),
            read: self.read,
            write: self.write,
            returns_self: self.returns_self,
            copy: self.copy,
        }
    }
}

impl<B> fmt::Debug for PropertyDescriptor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .field("returns_self", &self.returns_self)
            .field("copy", &self.copy)
            .finish()
    }
}
