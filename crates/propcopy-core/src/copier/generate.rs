use crate::{
    config::DiagnosticsConfig,
    copier::{
        Copier, CopyFlags, Step,
        plan::{CopyPlan, PlanEntry, PlanMode, PlanReport},
    },
    error::GenerationError,
    model::BeanModel,
    registry::CopierKey,
    traits::{Bean, CopySource, MapReadFn},
};
use tracing::debug;

///
/// Generator
///
/// Lowers a `CopyPlan` into executable steps. Skipped entries never become
/// steps; with `log_skipped` they are reported through tracing.
///

struct Generator {
    diagnostics: DiagnosticsConfig,
}

impl Generator {
    const fn new(diagnostics: DiagnosticsConfig) -> Self {
        Self { diagnostics }
    }

    fn compile<S, T>(
        &self,
        key: CopierKey,
        source_path: &'static str,
        target_path: &'static str,
        plan: &CopyPlan<'_, S, T>,
    ) -> Copier<S, T> {
        let mut skipped = 0;
        let mut steps = Vec::with_capacity(plan.entries().len());

        for entry in plan.entries() {
            match Self::lower(entry, plan.lookup()) {
                Some(step) => steps.push(step),
                None => {
                    skipped += 1;
                    if self.diagnostics.log_skipped {
                        debug!(
                            source = source_path,
                            target = target_path,
                            property = entry.target.name(),
                            reason = %entry.mode,
                            "property not copied"
                        );
                    }
                }
            }
        }

        Copier::new(key, source_path, target_path, steps, skipped)
    }

    fn lower<S, T>(entry: &PlanEntry<'_, S, T>, lookup: Option<MapReadFn<S>>) -> Option<Step<S, T>> {
        let property = entry.target.name();
        let kind = entry.target.kind().clone();
        let write = entry.target.writer()?;

        match entry.mode {
            PlanMode::Direct => Some(Step::Direct {
                property,
                kind,
                read: entry.source?.reader()?,
                write,
            }),
            PlanMode::Converted => Some(Step::Converted {
                property,
                alias: entry.effective_name,
                kind,
                read: entry.source?.reader()?,
                write,
            }),
            PlanMode::Dynamic => Some(Step::Keyed {
                property,
                alias: entry.effective_name,
                kind,
                lookup: lookup?,
                write,
            }),
            PlanMode::Skipped(_) => None,
        }
    }
}

/// Introspect both sides and compile a copier for `key`.
pub fn generate<S, T>(
    key: CopierKey,
    diagnostics: DiagnosticsConfig,
) -> Result<Copier<S, T>, GenerationError>
where
    S: CopySource,
    T: Bean,
{
    let layout = S::source_layout()?;
    let target = BeanModel::<T>::resolve()?;
    let plan = CopyPlan::build(&layout, &target, key.flags());

    Ok(Generator::new(diagnostics).compile(
        key,
        <S as CopySource>::PATH,
        <T as Bean>::PATH,
        &plan,
    ))
}

/// Build the plan for `S -> T` without compiling or caching it.
pub fn explain<S, T>(flags: CopyFlags) -> Result<PlanReport, GenerationError>
where
    S: CopySource,
    T: Bean,
{
    let layout = S::source_layout()?;
    let target = BeanModel::<T>::resolve()?;

    Ok(CopyPlan::build(&layout, &target, flags).report())
}
