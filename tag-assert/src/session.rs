//! The inspection session.
//!
//! A [`StructAssert`] anchors one subject's tag table and owns the arenas
//! behind every [`Field`] and [`Tag`](crate::Tag) handle created from it.
//! Handles are plain `Copy` structs holding a session reference plus an
//! index, so "owner" lookups are index dereferences and the chain carries
//! no ownership cycles.

use std::cell::{Ref, RefCell};
use std::collections::HashMap;

use crate::error::Failure;
use crate::field::Field;
use crate::reporter::Reporter;
use crate::schema::{FieldLookup, FieldSchema, Schema, StructSchema, Tagged};

/// Index of a field record in its session's arena.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct FieldId(usize);

/// Index of a tag record in its session's arena.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct TagId(usize);

/// One requested field: the name as the caller gave it, and the resolved
/// descriptor when resolution succeeded. A record without a descriptor is a
/// placeholder; operations on it degrade instead of panicking.
pub(crate) struct FieldRecord<'a> {
    pub(crate) name: String,
    pub(crate) descriptor: Option<&'a FieldSchema>,
}

/// One tag lookup. `owner` is absent when the lookup failed; such records
/// carry the requested name and an empty value.
pub(crate) struct TagRecord<'a> {
    pub(crate) owner: Option<FieldId>,
    pub(crate) name: String,
    pub(crate) value: &'a str,
}

enum Subject<'a> {
    Struct(&'a StructSchema),
    Other(&'static str),
}

/// An assertion session anchored to one subject.
///
/// Created by [`expect`]; lives for the scope of one test assertion
/// sequence. Successful field resolutions are memoized per session, so
/// resolving the same name twice yields the identical accessor.
pub struct StructAssert<'a> {
    reporter: &'a dyn Reporter,
    subject: Subject<'a>,
    failed: bool,
    fields: RefCell<Vec<FieldRecord<'a>>>,
    by_name: RefCell<HashMap<String, FieldId>>,
    tags: RefCell<Vec<TagRecord<'a>>>,
}

/// Starts an assertion session for `subject`.
///
/// The subject's value is only type evidence; the tag table is attached to
/// the type. A subject whose type is not record-shaped (after resolving one
/// level of `&`/`Box`/`Option` indirection) is reported through the
/// reporter's fatal path; the session is still returned, marked failed, and
/// every later operation on it degrades gracefully.
pub fn expect<'a, T>(reporter: &'a dyn Reporter, _subject: &T) -> StructAssert<'a>
where
    T: Tagged + ?Sized,
{
    reporter.helper();
    match T::schema() {
        Schema::Struct(schema) => StructAssert::new(reporter, Subject::Struct(schema), false),
        Schema::Scalar(name) => {
            reporter.fatal(&Failure::NotStruct.to_string());
            StructAssert::new(reporter, Subject::Other(name), true)
        }
    }
}

impl<'a> StructAssert<'a> {
    fn new(reporter: &'a dyn Reporter, subject: Subject<'a>, failed: bool) -> Self {
        StructAssert {
            reporter,
            subject,
            failed,
            fields: RefCell::new(Vec::new()),
            by_name: RefCell::new(HashMap::new()),
            tags: RefCell::new(Vec::new()),
        }
    }

    /// Starts a session directly from a hand-built table. Never fatal.
    pub fn with_schema(reporter: &'a dyn Reporter, schema: &'a StructSchema) -> Self {
        reporter.helper();
        StructAssert::new(reporter, Subject::Struct(schema), false)
    }

    /// Starts a new independent session for another subject, sharing this
    /// session's reporter.
    pub fn expect<T>(&self, subject: &T) -> StructAssert<'a>
    where
        T: Tagged + ?Sized,
    {
        self.reporter.helper();
        expect(self.reporter, subject)
    }

    /// Whether structural validation failed at construction.
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Asserts that an exported field with this name exists. Failures are
    /// reported and the session is returned for further checks.
    pub fn has_field(&self, name: &str) -> &Self {
        self.resolve(name);
        self
    }

    /// Returns an accessor for the named field. If resolution fails the
    /// error is reported here and the returned accessor is a placeholder:
    /// usable, non-panicking, reporting its own failures when used.
    pub fn expect_field<'s>(&'s self, name: &str) -> Field<'s, 'a> {
        let id = match self.resolve(name) {
            Some(id) => id,
            None => self.push_field(name, None),
        };
        Field::new(self, id)
    }

    /// Memoized field resolution. Cache hits return the existing record;
    /// failures are reported with their own message and never cached.
    fn resolve(&self, name: &str) -> Option<FieldId> {
        self.reporter.helper();
        if let Some(&id) = self.by_name.borrow().get(name) {
            return Some(id);
        }

        let lookup = match self.subject {
            Subject::Struct(schema) if !self.failed => schema.lookup(name),
            _ => FieldLookup::NotFound,
        };
        match lookup {
            FieldLookup::Found(descriptor) => {
                let id = self.push_field(name, Some(descriptor));
                self.by_name.borrow_mut().insert(name.to_owned(), id);
                Some(id)
            }
            FieldLookup::NotFound => {
                self.report(&Failure::FieldNotFound {
                    type_name: self.type_name().to_owned(),
                    field: name.to_owned(),
                });
                None
            }
            FieldLookup::Private => {
                self.report(&Failure::FieldPrivate {
                    type_name: self.type_name().to_owned(),
                    field: name.to_owned(),
                });
                None
            }
        }
    }

    pub(crate) fn reporter(&self) -> &'a dyn Reporter {
        self.reporter
    }

    pub(crate) fn report(&self, failure: &Failure) {
        self.reporter.error(&failure.to_string());
    }

    pub(crate) fn type_name(&self) -> &str {
        match self.subject {
            Subject::Struct(schema) => schema.name().unwrap_or("<Unnamed>"),
            Subject::Other(name) => name,
        }
    }

    pub(crate) fn push_field(&self, name: &str, descriptor: Option<&'a FieldSchema>) -> FieldId {
        let mut fields = self.fields.borrow_mut();
        let id = FieldId(fields.len());
        fields.push(FieldRecord {
            name: name.to_owned(),
            descriptor,
        });
        id
    }

    pub(crate) fn push_tag(&self, owner: Option<FieldId>, name: &str, value: &'a str) -> TagId {
        let mut tags = self.tags.borrow_mut();
        let id = TagId(tags.len());
        tags.push(TagRecord {
            owner,
            name: name.to_owned(),
            value,
        });
        id
    }

    pub(crate) fn field_record(&self, id: FieldId) -> Ref<'_, FieldRecord<'a>> {
        Ref::map(self.fields.borrow(), |fields| &fields[id.index()])
    }

    pub(crate) fn tag_record(&self, id: TagId) -> Ref<'_, TagRecord<'a>> {
        Ref::map(self.tags.borrow(), |tags| &tags[id.index()])
    }
}

impl FieldId {
    fn index(self) -> usize {
        self.0
    }
}

impl TagId {
    fn index(self) -> usize {
        self.0
    }
}
