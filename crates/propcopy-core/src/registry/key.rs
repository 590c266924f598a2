use crate::copier::CopyFlags;
use std::any::TypeId;

///
/// CopierKey
///
/// Cache identity of a copier: both type identities plus the flags.
/// Equal keys always yield the same copier instance.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CopierKey {
    source: TypeId,
    target: TypeId,
    flags: CopyFlags,
}

impl CopierKey {
    #[must_use]
    pub fn of<S: 'static, T: 'static>(use_converter: bool, skip_null: bool) -> Self {
        Self::with_flags::<S, T>(CopyFlags::new(use_converter, skip_null))
    }

    #[must_use]
    pub fn with_flags<S: 'static, T: 'static>(flags: CopyFlags) -> Self {
        Self {
            source: TypeId::of::<S>(),
            target: TypeId::of::<T>(),
            flags,
        }
    }

    #[must_use]
    pub const fn source(&self) -> TypeId {
        self.source
    }

    #[must_use]
    pub const fn target(&self) -> TypeId {
        self.target
    }

    #[must_use]
    pub const fn flags(&self) -> CopyFlags {
        self.flags
    }

    #[must_use]
    pub const fn use_converter(&self) -> bool {
        self.flags.use_converter
    }

    #[must_use]
    pub const fn skip_null(&self) -> bool {
        self.flags.skip_null
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Left;
    struct Right;

    #[test]
    fn every_component_participates_in_identity() {
        let keys: HashSet<_> = [
            CopierKey::of::<Left, Right>(false, false),
            CopierKey::of::<Left, Right>(true, false),
            CopierKey::of::<Left, Right>(false, true),
            CopierKey::of::<Left, Right>(true, true),
            CopierKey::of::<Right, Left>(false, false),
            CopierKey::of::<Left, Left>(false, false),
        ]
        .into_iter()
        .collect();

        assert_eq!(keys.len(), 6);
    }

    #[test]
    fn equal_inputs_give_equal_keys() {
        assert_eq!(
            CopierKey::of::<Left, Right>(true, false),
            CopierKey::with_flags::<Left, Right>(CopyFlags::new(true, false))
        );
    }
}
