//! The tag accessor.

use crate::error::Failure;
use crate::field::Field;
use crate::session::{StructAssert, TagId};

/// Accessor for one tag key on a field.
///
/// Produced by [`Field::expect_tag`]; never cached, each call re-resolves.
/// A tag whose resolution failed has no owning field and an empty value;
/// its comparison operations are guarded silent no-ops, so a chain like
/// `expect_tag(..).equal(..)` stays panic-free after a reported failure.
#[derive(Clone, Copy)]
pub struct Tag<'s, 'a> {
    session: &'s StructAssert<'a>,
    id: TagId,
}

impl<'s, 'a> Tag<'s, 'a> {
    pub(crate) fn new(session: &'s StructAssert<'a>, id: TagId) -> Self {
        Tag { session, id }
    }

    /// The tag key as requested.
    pub fn name(&self) -> String {
        self.session.tag_record(self.id).name.clone()
    }

    /// The resolved tag text; empty when the tag was absent or the field
    /// never resolved.
    pub fn value(&self) -> &'a str {
        self.session.tag_record(self.id).value
    }

    /// Whether this tag has an owning field, i.e. resolution succeeded.
    pub fn resolved(&self) -> bool {
        self.session.tag_record(self.id).owner.is_some()
    }

    fn owner(&self) -> Option<Field<'s, 'a>> {
        self.session
            .tag_record(self.id)
            .owner
            .map(|id| Field::new(self.session, id))
    }

    /// Pure comparison: `true` iff the tag resolved and its value equals
    /// `value`. Never reports.
    pub fn has_value(&self, value: &str) -> bool {
        if !self.resolved() {
            return false;
        }
        self.session.reporter().helper();
        self.value() == value
    }

    /// Asserts the tag's value equals `value`; returns the tag so equality
    /// checks can be chained against a kept reference.
    pub fn equal(&self, value: &str) -> Self {
        let Some(owner) = self.owner() else {
            return *self;
        };
        self.session.reporter().helper();
        if self.value() != value {
            self.session.report(&Failure::TagMismatch {
                field: owner.full_name(),
                tag: self.name(),
                expected: value.to_owned(),
                actual: self.value().to_owned(),
            });
        }
        *self
    }

    /// Asserts the tag's value is not the empty string.
    pub fn not_empty(&self) -> Self {
        let Some(owner) = self.owner() else {
            return *self;
        };
        self.session.reporter().helper();
        if self.value().is_empty() {
            self.session.report(&Failure::TagEmpty {
                field: owner.full_name(),
                tag: self.name(),
            });
        }
        *self
    }
}

impl std::fmt::Debug for Tag<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tag")
            .field("name", &self.session.tag_record(self.id).name)
            .field("value", &self.value())
            .field("resolved", &self.resolved())
            .finish()
    }
}
