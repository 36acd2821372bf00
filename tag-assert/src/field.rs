//! The field accessor.

use crate::error::Failure;
use crate::schema::FieldSchema;
use crate::session::{FieldId, StructAssert};
use crate::tag::Tag;

/// Accessor for one named field of a session's subject.
///
/// Handles are `Copy`: they hold the owning session and an arena index. A
/// field whose resolution failed is a placeholder; its operations report
/// their own failures and never panic.
#[derive(Clone, Copy)]
pub struct Field<'s, 'a> {
    session: &'s StructAssert<'a>,
    id: FieldId,
}

impl<'s, 'a> Field<'s, 'a> {
    pub(crate) fn new(session: &'s StructAssert<'a>, id: FieldId) -> Self {
        Field { session, id }
    }

    /// The field name as requested by the caller, preserved even when
    /// resolution failed.
    pub fn name(&self) -> String {
        self.session.field_record(self.id).name.clone()
    }

    /// Whether the field resolved to a descriptor.
    pub fn resolved(&self) -> bool {
        self.descriptor().is_some()
    }

    /// `<TypeName>.<FieldName>`, degrading to the bare field name when the
    /// session failed structurally and to `<Unnamed>.<FieldName>` when the
    /// subject's table is anonymous.
    pub fn full_name(&self) -> String {
        let record = self.session.field_record(self.id);
        if self.session.failed() {
            return record.name.clone();
        }
        format!("{}.{}", self.session.type_name(), record.name)
    }

    fn descriptor(&self) -> Option<&'a FieldSchema> {
        self.session.field_record(self.id).descriptor
    }

    /// Returns an accessor for the named tag.
    ///
    /// An unresolved field and an absent tag key report the same "not
    /// found" failure; both return an ownerless, empty-valued tag so the
    /// chain stays panic-free.
    pub fn expect_tag(&self, name: &str) -> Tag<'s, 'a> {
        self.session.reporter().helper();
        match self.descriptor().and_then(|d| d.tag_value(name)) {
            Some(value) => {
                let id = self.session.push_tag(Some(self.id), name, value);
                Tag::new(self.session, id)
            }
            None => {
                self.session.report(&Failure::TagNotFound {
                    field: self.full_name(),
                    tag: name.to_owned(),
                });
                let id = self.session.push_tag(None, name, "");
                Tag::new(self.session, id)
            }
        }
    }

    /// Asserts that the named tag exists; returns the field for chaining.
    pub fn has_tag(&self, name: &str) -> Self {
        self.session.reporter().helper();
        let present = self
            .descriptor()
            .is_some_and(|d| d.tag_value(name).is_some());
        if !present {
            self.session.report(&Failure::TagNotFound {
                field: self.full_name(),
                tag: name.to_owned(),
            });
        }
        *self
    }

    /// Applies [`has_tag`](Self::has_tag) to every name in order. Does not
    /// short-circuit: every missing tag is reported.
    pub fn has_tags(&self, names: &[&str]) -> Self {
        for name in names {
            self.has_tag(name);
        }
        *self
    }

    /// Asserts that the named tag exists and carries exactly `value`.
    ///
    /// A failed tag resolution was already reported by the lookup, so no
    /// second error is emitted for it.
    pub fn assert(&self, name: &str, value: &str) -> Self {
        self.session.reporter().helper();
        let tag = self.expect_tag(name);
        if !tag.resolved() {
            return *self;
        }
        if !tag.has_value(value) {
            self.session.report(&Failure::TagMismatch {
                field: self.full_name(),
                tag: name.to_owned(),
                expected: value.to_owned(),
                actual: tag.value().to_owned(),
            });
        }
        *self
    }

    /// Asserts that the field carries no tags at all. A no-op on a
    /// placeholder field, whose resolution failure was already reported.
    pub fn empty(&self) -> Self {
        let Some(descriptor) = self.descriptor() else {
            return *self;
        };
        if descriptor.is_tagged() {
            self.session.report(&Failure::NotEmpty {
                field: self.full_name(),
            });
        }
        *self
    }
}

// Identity: two handles are equal when they index the same record of the
// same session, which is what the per-session memoization hands back.
impl PartialEq for Field<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.session, other.session) && self.id == other.id
    }
}

impl std::fmt::Debug for Field<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.session.field_record(self.id).name)
            .field("resolved", &self.resolved())
            .finish()
    }
}
