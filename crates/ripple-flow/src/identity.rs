//! Stable identities for declared children.

use std::borrow::Cow;

/// Identity of a declared child within one reconciliation pass.
///
/// Children are matched against previously materialized views by this value,
/// never by position, so reordering an unchanged child must not recreate its
/// view. Identities are required to be unique within a single pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Id {
    Name(Cow<'static, str>),
    Index(u64),
}

impl Id {
    pub fn name(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Name(name.into())
    }

    pub const fn index(index: u64) -> Self {
        Self::Index(index)
    }
}

impl From<&'static str> for Id {
    fn from(name: &'static str) -> Self {
        Self::Name(Cow::Borrowed(name))
    }
}

impl From<String> for Id {
    fn from(name: String) -> Self {
        Self::Name(Cow::Owned(name))
    }
}

impl From<u64> for Id {
    fn from(index: u64) -> Self {
        Self::Index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_ids_compare_by_content() {
        assert_eq!(Id::name("limits"), Id::from("limits".to_string()));
        assert_ne!(Id::name("limits"), Id::name("upload"));
        assert_ne!(Id::name("1"), Id::index(1));
    }
}
