use crate::{
    error::GenerationError,
    model::BeanModel,
    traits::{Bean, CopySource, MapSource},
    value::Value,
};
use std::collections::{BTreeMap, HashMap};

/// Keyed lookup used by map-sourced copiers.
pub type MapReadFn<S> = fn(&S, &str) -> Option<Value>;

///
/// SourceLayout
///
/// How a source type exposes its data to the matching engine.
///

#[derive(Debug)]
pub enum SourceLayout<S> {
    /// Named properties resolved at generation time.
    Bean(BeanModel<S>),
    /// Keys resolved at copy time.
    Map(MapReadFn<S>),
}

impl<B: Bean> CopySource for B {
    const PATH: &'static str = <B as Bean>::PATH;

    fn source_layout() -> Result<SourceLayout<Self>, GenerationError> {
        BeanModel::resolve().map(SourceLayout::Bean)
    }
}

// impl_map_source
// Concrete map types only; a blanket impl would overlap with beans.
macro_rules! impl_map_source {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl CopySource for $type {
                const PATH: &'static str = <Self as MapSource>::PATH;

                fn source_layout() -> Result<SourceLayout<Self>, GenerationError> {
                    Ok(SourceLayout::Map(<Self as MapSource>::get_value))
                }
            }
        )*
    };
}

impl MapSource for HashMap<String, Value> {
    const PATH: &'static str = "HashMap<String, Value>";

    fn get_value(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl MapSource for BTreeMap<String, Value> {
    const PATH: &'static str = "BTreeMap<String, Value>";

    fn get_value(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl MapSource for serde_json::Map<String, serde_json::Value> {
    const PATH: &'static str = "serde_json::Map";

    fn get_value(&self, key: &str) -> Option<Value> {
        self.get(key).map(Value::from)
    }
}

impl_map_source!(
    HashMap<String, Value>,
    BTreeMap<String, Value>,
    serde_json::Map<String, serde_json::Value>,
);
