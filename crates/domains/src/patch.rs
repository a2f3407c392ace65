//! # Partial-Update Merger
//!
//! A patch carries one `Option` per mutable field. `Some` overwrites the
//! stored value, `None` (field omitted or sent as `null`) keeps it.
//! Patch types have no identifier field, so the id of a record can only be
//! chosen by the caller and never by the request body.

use std::fmt::Debug;

use crate::errors::{DomainError, DomainResult};

/// A persisted record with a server-assigned identifier.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// Human readable name used in error messages and logs.
    const KIND: &'static str;

    /// Payload accepted on create; everything except the identifier.
    type Draft: Debug + Send + Sync + 'static;

    /// Payload accepted on update; every field optional.
    type Patch: Debug + Send + Sync + 'static;

    fn id(&self) -> i64;

    /// Builds the record once the store has assigned `id`.
    fn from_draft(id: i64, draft: Self::Draft) -> Self;

    /// Folds every present patch field into `self`. Must not touch the id.
    fn apply(&mut self, patch: Self::Patch);
}

/// `merge(existing, patch)`: pure, never fails.
pub fn merge<E: Entity>(existing: E, patch: E::Patch) -> E {
    let mut merged = existing;
    merged.apply(patch);
    merged
}

/// Resolves the lookup result for `id` and merges `patch` into it.
///
/// An unresolved target is a `NotFound`; no blank record is ever produced.
pub fn merge_update<E: Entity>(id: i64, existing: Option<E>, patch: E::Patch) -> DomainResult<E> {
    let existing = existing.ok_or_else(|| DomainError::not_found(E::KIND, id))?;
    Ok(merge(existing, patch))
}

/// Overwrites a required field when the patch carries a value.
pub(crate) fn overwrite<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

/// Overwrites an optional field when the patch carries a value.
pub(crate) fn overwrite_opt<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pet, PetPatch};

    fn fido() -> Pet {
        Pet {
            id: 7,
            name: "Fido".into(),
            kind: Some("dog".into()),
            breed: Some("beagle".into()),
            age: Some(3),
            bio: None,
            documents: None,
            image_url: Some("/api/images/uploads/a.png".into()),
        }
    }

    #[test]
    fn merge_update_on_absent_record_is_not_found() {
        let err = merge_update::<Pet>(99, None, PetPatch::default()).unwrap_err();
        assert_eq!(err, DomainError::not_found("Pet", 99));
    }

    #[test]
    fn merge_update_keeps_the_stored_identifier() {
        let patch = PetPatch { name: Some("Rex".into()), ..Default::default() };
        let merged = merge_update(7, Some(fido()), patch).unwrap();
        assert_eq!(merged.id, 7);
        assert_eq!(merged.name, "Rex");
    }

    #[test]
    fn empty_patch_is_identity() {
        assert_eq!(merge(fido(), PetPatch::default()), fido());
    }

    #[test]
    fn overwrite_helpers_only_act_on_some() {
        let mut required = 1;
        overwrite(&mut required, None);
        assert_eq!(required, 1);
        overwrite(&mut required, Some(2));
        assert_eq!(required, 2);

        let mut optional = Some("a");
        overwrite_opt(&mut optional, None);
        assert_eq!(optional, Some("a"));
        overwrite_opt(&mut optional, Some("b"));
        assert_eq!(optional, Some("b"));
    }
}
