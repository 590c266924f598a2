use crate::{error::GenerationError, model::property::PropertyDescriptor, traits::Bean};
use std::collections::{BTreeMap, BTreeSet};

///
/// BeanModel
///
/// Resolved, validated property set for one bean type.
/// Declaration order is authoritative for emitted assignments.
///

#[derive(Debug)]
pub struct BeanModel<B> {
    path: &'static str,
    properties: Vec<PropertyDescriptor<B>>,
}

impl<B: Bean> BeanModel<B> {
    /// Introspect `B` and validate its property set.
    pub fn resolve() -> Result<Self, GenerationError> {
        let properties = B::properties()?;

        Self::from_properties(<B as Bean>::PATH, properties)
    }
}

impl<B> BeanModel<B> {
    pub fn from_properties(
        path: &'static str,
        properties: Vec<PropertyDescriptor<B>>,
    ) -> Result<Self, GenerationError> {
        let mut seen = BTreeSet::new();

        for property in &properties {
            let name = property.name();

            if name.trim().is_empty() {
                return Err(GenerationError::EmptyPropertyName { path });
            }
            if !seen.insert(name) {
                return Err(GenerationError::DuplicateProperty { path, name });
            }
        }

        Ok(Self { path, properties })
    }

    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertyDescriptor<B>] {
        &self.properties
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor<B>> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Properties with a usable reader, in declaration order.
    pub fn readable(&self) -> impl Iterator<Item = &PropertyDescriptor<B>> {
        self.properties.iter().filter(|p| p.is_readable())
    }

    /// Properties with a usable writer, in declaration order.
    pub fn writable(&self) -> impl Iterator<Item = &PropertyDescriptor<B>> {
        self.properties.iter().filter(|p| p.is_writable())
    }

    /// Readable properties indexed by name.
    #[must_use]
    pub fn readable_by_name(&self) -> BTreeMap<&'static str, &PropertyDescriptor<B>> {
        self.readable().map(|p| (p.name(), p)).collect()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::kind::FieldKind,
        test_support::{Account, AccountDto},
    };

    #[test]
    fn readable_and_writable_preserve_declaration_order() {
        let model = BeanModel::<AccountDto>::resolve().unwrap();

        let writable: Vec<_> = model.writable().map(PropertyDescriptor::name).collect();
        assert_eq!(
            writable,
            ["id", "name", "email", "age", "score", "tags", "nickname", "created"]
        );

        let readable: Vec<_> = model.readable().map(PropertyDescriptor::name).collect();
        assert!(!readable.contains(&"created"));
    }

    #[test]
    fn readable_index_skips_write_only_properties() {
        let model = BeanModel::<Account>::resolve().unwrap();
        let index = model.readable_by_name();

        assert!(index.contains_key("id"));
        assert!(!index.contains_key("password"));
    }

    #[test]
    fn duplicate_property_names_are_rejected() {
        let err = BeanModel::<Account>::from_properties(
            "test::Dup",
            vec![
                PropertyDescriptor::new("id", FieldKind::Int64),
                PropertyDescriptor::new("id", FieldKind::Int32),
            ],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            GenerationError::DuplicateProperty { name: "id", .. }
        ));
    }

    #[test]
    fn empty_property_names_are_rejected() {
        let err = BeanModel::<Account>::from_properties(
            "test::Empty",
            vec![PropertyDescriptor::new(" ", FieldKind::Text)],
        )
        .unwrap_err();

        assert!(matches!(err, GenerationError::EmptyPropertyName { .. }));
    }
}
