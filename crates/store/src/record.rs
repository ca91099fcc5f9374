use chrono::NaiveDate;

use artisanhome_core::{Entity, Stamp};

/// A record kept in a [`Collection`](crate::Collection).
///
/// `Draft` is what callers supply to `add` (no identifier, no derived fields);
/// `Patch` is a set of optional field replacements for `update`. Neither can
/// change the identifier.
pub trait Record: Entity + Clone + Send + Sync + 'static {
    type Draft;
    type Patch;

    /// Build a new record under a freshly minted stamp.
    fn create(draft: Self::Draft, stamp: Stamp, today: NaiveDate) -> Self;

    /// Overwrite the fields present in `patch`, leaving the rest untouched.
    fn apply(&mut self, patch: Self::Patch);
}

/// Replace `slot` when the patch carries a value.
pub(crate) fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
