//! Hand-written beans shared by unit tests.

use crate::{
    error::GenerationError,
    model::{CopyProperty, FieldKind, PropertyDescriptor},
    traits::{Bean, FieldValue, assign},
};
use std::sync::atomic::{AtomicBool, Ordering};

// field
// Plain read-write property backed by a struct field.
macro_rules! field {
    ($bean:ty, $field:ident : $ty:ty) => {
        PropertyDescriptor::<$bean>::new(stringify!($field), <$ty as FieldValue>::kind())
            .with_reader(|bean| bean.$field.to_value())
            .with_writer(|bean, value| assign(&mut bean.$field, value))
    };
}

///
/// Account
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: String,
    pub score: f32,
    pub tags: Vec<String>,
    pub handle: String,
    pub password: String,
}

impl Bean for Account {
    const PATH: &'static str = "test_support::Account";

    fn properties() -> Result<Vec<PropertyDescriptor<Self>>, GenerationError> {
        Ok(vec![
            field!(Self, id: i64),
            field!(Self, name: String),
            field!(Self, email: String),
            field!(Self, age: String),
            field!(Self, score: f32),
            field!(Self, tags: Vec<String>),
            field!(Self, handle: String),
            PropertyDescriptor::new("password", FieldKind::Text)
                .with_writer(|bean: &mut Self, value| assign(&mut bean.password, value)),
        ])
    }
}

///
/// AccountDto
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub score: f64,
    pub tags: Vec<String>,
    pub nickname: Option<String>,
    pub created: u64,
}

impl Bean for AccountDto {
    const PATH: &'static str = "test_support::AccountDto";

    fn properties() -> Result<Vec<PropertyDescriptor<Self>>, GenerationError> {
        Ok(vec![
            field!(Self, id: i64),
            field!(Self, name: String),
            field!(Self, email: String).with_copy(CopyProperty::ignored()),
            field!(Self, age: u32),
            field!(Self, score: f64),
            field!(Self, tags: Vec<String>),
            field!(Self, nickname: Option<String>).with_copy(CopyProperty::alias("handle")),
            PropertyDescriptor::new("created", FieldKind::Uint64)
                .with_writer(|bean: &mut Self, value| assign(&mut bean.created, value)),
        ])
    }
}

///
/// Profile
/// Optional-heavy source for null handling.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Profile {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub age: Option<u32>,
}

impl Bean for Profile {
    const PATH: &'static str = "test_support::Profile";

    fn properties() -> Result<Vec<PropertyDescriptor<Self>>, GenerationError> {
        Ok(vec![
            field!(Self, id: Option<i64>),
            field!(Self, name: Option<String>),
            field!(Self, age: Option<u32>),
        ])
    }
}

///
/// Counter
/// Exposes its label through a chained setter.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Counter {
    label: String,
    pub count: u32,
}

impl Counter {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: String) -> &mut Self {
        self.label = label;
        self
    }
}

impl Bean for Counter {
    const PATH: &'static str = "test_support::Counter";

    fn properties() -> Result<Vec<PropertyDescriptor<Self>>, GenerationError> {
        Ok(vec![
            PropertyDescriptor::new("label", FieldKind::Text)
                .with_reader(|bean: &Self| bean.label.to_value())
                .with_writer(|bean: &mut Self, value| {
                    let label = String::from_value(&value).ok_or(value)?;
                    bean.set_label(label);
                    Ok(())
                })
                .chained(),
            field!(Self, count: u32),
        ])
    }
}

///
/// Flaky
/// Fails introspection while `FLAKY_FAILS` is set.
///

pub static FLAKY_FAILS: AtomicBool = AtomicBool::new(true);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Flaky {
    pub id: i64,
}

impl Bean for Flaky {
    const PATH: &'static str = "test_support::Flaky";

    fn properties() -> Result<Vec<PropertyDescriptor<Self>>, GenerationError> {
        if FLAKY_FAILS.load(Ordering::SeqCst) {
            return Err(GenerationError::introspection(
                <Self as Bean>::PATH,
                "accessors not available yet",
            ));
        }

        Ok(vec![field!(Self, id: i64)])
    }
}
