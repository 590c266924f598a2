//! Matching and override engine.
//!
//! Pairs every writable target property with its source counterpart and
//! classifies the pairing. Plans are built once per generation and dropped
//! after compilation; `PlanReport` is the owned projection kept for
//! diagnostics.

use crate::{
    copier::CopyFlags,
    model::{BeanModel, FieldKind, PropertyDescriptor},
    traits::{MapReadFn, SourceLayout},
};
use derive_more::{Deref, IntoIterator};
use std::fmt;

///
/// SkipReason
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SkipReason {
    /// The target property carries `ignore = true`.
    Ignored,
    /// No readable source property under the effective name.
    Unmatched,
    /// Types differ and no converter was requested.
    Incompatible,
}

///
/// PlanMode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlanMode {
    Direct,
    Converted,
    /// Map source: resolved by key at copy time.
    Dynamic,
    Skipped(SkipReason),
}

impl PlanMode {
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Skipped(_))
    }
}

impl fmt::Display for PlanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::Converted => f.write_str("converted"),
            Self::Dynamic => f.write_str("dynamic"),
            Self::Skipped(SkipReason::Ignored) => f.write_str("skipped (ignored)"),
            Self::Skipped(SkipReason::Unmatched) => f.write_str("skipped (unmatched)"),
            Self::Skipped(SkipReason::Incompatible) => f.write_str("skipped (incompatible)"),
        }
    }
}

///
/// PlanEntry
///

#[derive(Debug)]
pub struct PlanEntry<'a, S, T> {
    pub target: &'a PropertyDescriptor<T>,
    pub source: Option<&'a PropertyDescriptor<S>>,
    pub effective_name: &'static str,
    pub mode: PlanMode,
}

///
/// CopyPlan
///
/// Ordered pairing plan; entry order is target declaration order.
///

#[derive(Debug)]
pub struct CopyPlan<'a, S, T> {
    entries: Vec<PlanEntry<'a, S, T>>,
    lookup: Option<MapReadFn<S>>,
}

impl<'a, S, T> CopyPlan<'a, S, T> {
    pub fn build(source: &'a SourceLayout<S>, target: &'a BeanModel<T>, flags: CopyFlags) -> Self {
        match source {
            SourceLayout::Bean(model) => Self::build_for_bean(model, target, flags),
            SourceLayout::Map(lookup) => Self::build_for_map(*lookup, target),
        }
    }

    fn build_for_bean(source: &'a BeanModel<S>, target: &'a BeanModel<T>, flags: CopyFlags) -> Self {
        let readable = source.readable_by_name();

        let entries = target
            .writable()
            .map(|property| {
                let Some(effective_name) = effective_name(property) else {
                    return PlanEntry {
                        target: property,
                        source: None,
                        effective_name: property.name(),
                        mode: PlanMode::Skipped(SkipReason::Ignored),
                    };
                };

                let source = readable.get(effective_name).copied();
                let mode = source.map_or(PlanMode::Skipped(SkipReason::Unmatched), |source| {
                    classify(source.kind(), property.kind(), flags)
                });

                PlanEntry {
                    target: property,
                    source,
                    effective_name,
                    mode,
                }
            })
            .collect();

        Self {
            entries,
            lookup: None,
        }
    }

    fn build_for_map(lookup: MapReadFn<S>, target: &'a BeanModel<T>) -> Self {
        let entries = target
            .writable()
            .map(|property| match effective_name(property) {
                Some(effective_name) => PlanEntry {
                    target: property,
                    source: None,
                    effective_name,
                    mode: PlanMode::Dynamic,
                },
                None => PlanEntry {
                    target: property,
                    source: None,
                    effective_name: property.name(),
                    mode: PlanMode::Skipped(SkipReason::Ignored),
                },
            })
            .collect();

        Self {
            entries,
            lookup: Some(lookup),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[PlanEntry<'a, S, T>] {
        &self.entries
    }

    /// Keyed lookup for map sources; `None` for structured sources.
    #[must_use]
    pub const fn lookup(&self) -> Option<MapReadFn<S>> {
        self.lookup
    }

    pub fn active(&self) -> impl Iterator<Item = &PlanEntry<'a, S, T>> {
        self.entries.iter().filter(|entry| entry.mode.is_active())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &PlanEntry<'a, S, T>> {
        self.entries.iter().filter(|entry| !entry.mode.is_active())
    }

    #[must_use]
    pub fn report(&self) -> PlanReport {
        PlanReport(
            self.entries
                .iter()
                .map(|entry| PlanSummary {
                    target: entry.target.name(),
                    target_kind: entry.target.kind().clone(),
                    source: entry.source.map(PropertyDescriptor::name),
                    source_kind: entry.source.map(|s| s.kind().clone()),
                    effective_name: entry.effective_name,
                    mode: entry.mode,
                })
                .collect(),
        )
    }
}

/// Effective source-side name, or `None` when the property is ignored.
fn effective_name<T>(property: &PropertyDescriptor<T>) -> Option<&'static str> {
    match property.copy_override() {
        Some(copy) if copy.ignore => None,
        Some(copy) => Some(copy.effective_alias().unwrap_or(property.name())),
        None => Some(property.name()),
    }
}

fn classify(source: &FieldKind, target: &FieldKind, flags: CopyFlags) -> PlanMode {
    if target.is_assignable_from(source) {
        PlanMode::Direct
    } else if flags.use_converter {
        PlanMode::Converted
    } else {
        PlanMode::Skipped(SkipReason::Incompatible)
    }
}

///
/// PlanSummary
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlanSummary {
    pub target: &'static str,
    pub target_kind: FieldKind,
    pub source: Option<&'static str>,
    pub source_kind: Option<FieldKind>,
    pub effective_name: &'static str,
    pub mode: PlanMode,
}

///
/// PlanReport
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct PlanReport(Vec<PlanSummary>);

impl PlanReport {
    #[must_use]
    pub fn entry(&self, target: &str) -> Option<&PlanSummary> {
        self.0.iter().find(|entry| entry.target == target)
    }
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.0 {
            writeln!(
                f,
                "{} <- {}: {}",
                entry.target, entry.effective_name, entry.mode
            )?;
        }

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_support::{Account, AccountDto},
        traits::CopySource,
    };
    use std::collections::HashMap;

    fn report<S: CopySource>(target: &BeanModel<AccountDto>, flags: CopyFlags) -> PlanReport {
        let layout = S::source_layout().unwrap();
        CopyPlan::build(&layout, target, flags).report()
    }

    #[test]
    fn bean_plan_classifies_every_writable_property() {
        let target = BeanModel::<AccountDto>::resolve().unwrap();
        let report = report::<Account>(&target, CopyFlags::default());

        assert_eq!(report.entry("id").unwrap().mode, PlanMode::Direct);
        assert_eq!(report.entry("name").unwrap().mode, PlanMode::Direct);
        assert_eq!(
            report.entry("email").unwrap().mode,
            PlanMode::Skipped(SkipReason::Ignored)
        );
        assert_eq!(
            report.entry("age").unwrap().mode,
            PlanMode::Skipped(SkipReason::Incompatible)
        );
        assert_eq!(
            report.entry("created").unwrap().mode,
            PlanMode::Skipped(SkipReason::Unmatched)
        );
    }

    #[test]
    fn alias_redirects_source_lookup() {
        let target = BeanModel::<AccountDto>::resolve().unwrap();
        let report = report::<Account>(&target, CopyFlags::default());
        let nickname = report.entry("nickname").unwrap();

        assert_eq!(nickname.effective_name, "handle");
        assert_eq!(nickname.source, Some("handle"));
        assert_eq!(nickname.mode, PlanMode::Direct);
    }

    #[test]
    fn converter_flag_turns_incompatible_into_converted() {
        let target = BeanModel::<AccountDto>::resolve().unwrap();
        let flags = CopyFlags {
            use_converter: true,
            skip_null: false,
        };
        let report = report::<Account>(&target, flags);

        assert_eq!(report.entry("age").unwrap().mode, PlanMode::Converted);
        assert_eq!(
            report.entry("email").unwrap().mode,
            PlanMode::Skipped(SkipReason::Ignored)
        );
    }

    #[test]
    fn map_plan_defers_everything_but_ignored() {
        let target = BeanModel::<AccountDto>::resolve().unwrap();
        let layout = <HashMap<String, crate::value::Value>>::source_layout().unwrap();
        let plan = CopyPlan::build(&layout, &target, CopyFlags::default());

        assert!(plan.lookup().is_some());
        assert_eq!(plan.skipped().count(), 1);
        assert!(plan.active().all(|entry| entry.mode == PlanMode::Dynamic));
        assert_eq!(
            plan.report().entry("nickname").unwrap().effective_name,
            "handle"
        );
    }

    #[test]
    fn report_renders_one_line_per_entry() {
        let target = BeanModel::<AccountDto>::resolve().unwrap();
        let report = report::<Account>(&target, CopyFlags::default());
        let rendered = report.to_string();

        assert_eq!(rendered.lines().count(), report.len());
        assert!(rendered.contains("email <- email: skipped (ignored)"));
    }
}
