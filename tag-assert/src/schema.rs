//! Declarative field/tag tables.
//!
//! Rust has no runtime reflection, so the assertion engine operates on a
//! table describing a subject type: its name, its fields, and the tag pairs
//! attached to each field. Tables are normally generated by
//! `#[derive(Tagged)]`, but the builder API is public so they can also be
//! written by hand (e.g. for types outside the caller's control).

/// Access to a type's field/tag table.
///
/// Implemented by `#[derive(Tagged)]` for structs with named fields, and
/// manually for scalar types so that passing a non-record subject to
/// [`expect`](crate::expect) is a reportable failure instead of a compile
/// error. Forwarding impls for `&T`, `Box<T>` and `Option<T>` resolve one
/// level of indirection: a `None::<T>` still carries `T`'s table.
pub trait Tagged {
    /// The field/tag table for this type.
    fn schema() -> Schema;
}

/// What a subject type exposes to the assertion engine.
#[derive(Clone, Copy, Debug)]
pub enum Schema {
    /// A record type with named fields and a tag table.
    Struct(&'static StructSchema),
    /// Anything else; the name is used in diagnostics.
    Scalar(&'static str),
}

/// The field/tag table of one record type.
#[derive(Debug)]
pub struct StructSchema {
    name: Option<&'static str>,
    fields: Vec<FieldSchema>,
}

/// One field of a [`StructSchema`]: name, visibility, tag pairs, and an
/// optional embed hook promoting the fields of another schema.
#[derive(Debug)]
pub struct FieldSchema {
    name: &'static str,
    public: bool,
    tags: Vec<(&'static str, &'static str)>,
    embed: Option<fn() -> Schema>,
}

/// Builder for a [`StructSchema`], also the expansion target of
/// `#[derive(Tagged)]`.
#[derive(Debug)]
pub struct StructSchemaBuilder {
    name: Option<&'static str>,
    fields: Vec<FieldSchema>,
}

/// Outcome of a field-name lookup. Resolution failures are explicit states,
/// never nullable pointers.
#[derive(Clone, Copy, Debug)]
pub(crate) enum FieldLookup<'s> {
    Found(&'s FieldSchema),
    Private,
    NotFound,
}

impl StructSchema {
    /// Starts a table for a named record type.
    pub fn builder(name: &'static str) -> StructSchemaBuilder {
        StructSchemaBuilder {
            name: Some(name),
            fields: Vec::new(),
        }
    }

    /// Starts a table with no type name; diagnostics render it as
    /// `<Unnamed>`.
    pub fn anonymous() -> StructSchemaBuilder {
        StructSchemaBuilder {
            name: None,
            fields: Vec::new(),
        }
    }

    /// The record type's name, if it has one.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// The fields of this table, in declaration order. Promoted fields of
    /// embedded schemas are not included.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Resolves a field by exact, case-sensitive name.
    ///
    /// Own fields are searched first; on a miss the search continues
    /// breadth-first through embed hooks, so the shallowest match wins. Two
    /// matches at the same depth are ambiguous and resolve as not found,
    /// mirroring the promotion rules the tag tables model.
    pub(crate) fn lookup<'s>(&'s self, name: &str) -> FieldLookup<'s> {
        let mut level: Vec<&'s StructSchema> = vec![self];
        let mut visited: Vec<*const StructSchema> = vec![self as *const StructSchema];

        while !level.is_empty() {
            let matches: Vec<&'s FieldSchema> = level
                .iter()
                .flat_map(|schema| schema.fields.iter().filter(|field| field.name == name))
                .collect();
            match matches[..] {
                [field] if field.public => return FieldLookup::Found(field),
                [_] => return FieldLookup::Private,
                [] => {}
                // Ambiguous promotion at this depth.
                _ => return FieldLookup::NotFound,
            }

            // `visited` guards against cycles across depths only; a schema
            // embedded twice at one depth stays duplicated in the level so
            // its fields count twice and trip the ambiguity arm.
            let mut next: Vec<&'s StructSchema> = Vec::new();
            for schema in level {
                for field in &schema.fields {
                    let Some(embed) = field.embed else { continue };
                    if let Schema::Struct(inner) = embed() {
                        let ptr: *const StructSchema = inner;
                        if !visited.contains(&ptr) {
                            next.push(inner);
                        }
                    }
                }
            }
            for schema in &next {
                visited.push(*schema as *const StructSchema);
            }
            level = next;
        }
        FieldLookup::NotFound
    }
}

impl StructSchemaBuilder {
    /// Appends a field to the table.
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> StructSchema {
        StructSchema {
            name: self.name,
            fields: self.fields,
        }
    }
}

impl FieldSchema {
    /// A new public field with no tags.
    pub fn new(name: &'static str) -> Self {
        FieldSchema {
            name,
            public: true,
            tags: Vec::new(),
            embed: None,
        }
    }

    /// Marks the field as private. Private fields are visible to lookup but
    /// resolve as a failure: their tag metadata is not introspectable.
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    /// Appends a tag pair. Order is preserved.
    pub fn tag(mut self, key: &'static str, value: &'static str) -> Self {
        self.tags.push((key, value));
        self
    }

    /// Marks the field as embedded: on a lookup miss, the fields of the
    /// schema returned by `schema` are promoted into the enclosing table's
    /// namespace.
    pub fn embed(mut self, schema: fn() -> Schema) -> Self {
        self.embed = Some(schema);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    /// The tag pairs attached to this field, in declaration order.
    pub fn tags(&self) -> &[(&'static str, &'static str)] {
        &self.tags
    }

    /// Looks up a tag value by key. `Some("")` means the tag is present but
    /// empty, which is distinct from an absent tag.
    pub fn tag_value(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(tag_key, _)| *tag_key == key)
            .map(|(_, value)| *value)
    }

    /// Whether any tag pairs are attached at all.
    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }
}

macro_rules! impl_scalar {
    ($($ty:ty => $name:literal,)*) => {
        $(
            impl Tagged for $ty {
                fn schema() -> Schema {
                    Schema::Scalar($name)
                }
            }
        )*
    };
}

impl_scalar! {
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
    bool => "bool",
    char => "char",
    str => "str",
    String => "String",
    () => "()",
}

impl<T: Tagged + ?Sized> Tagged for &T {
    fn schema() -> Schema {
        T::schema()
    }
}

impl<T: Tagged + ?Sized> Tagged for Box<T> {
    fn schema() -> Schema {
        T::schema()
    }
}

// The type-level table survives even when the value is absent; this is how
// "nil pointer to a record type" still counts as record-shaped.
impl<T: Tagged> Tagged for Option<T> {
    fn schema() -> Schema {
        T::schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inner_schema() -> Schema {
        static SCHEMA: std::sync::LazyLock<StructSchema> = std::sync::LazyLock::new(|| {
            StructSchema::builder("Inner")
                .field(FieldSchema::new("promoted").tag("json", "promoted"))
                .field(FieldSchema::new("shared"))
                .build()
        });
        Schema::Struct(&SCHEMA)
    }

    fn sibling_schema() -> Schema {
        static SCHEMA: std::sync::LazyLock<StructSchema> = std::sync::LazyLock::new(|| {
            StructSchema::builder("Sibling")
                .field(FieldSchema::new("shared"))
                .build()
        });
        Schema::Struct(&SCHEMA)
    }

    fn outer() -> StructSchema {
        StructSchema::builder("Outer")
            .field(FieldSchema::new("own").tag("xml", "Own"))
            .field(FieldSchema::new("hidden").private())
            .field(FieldSchema::new("inner").embed(inner_schema))
            .field(FieldSchema::new("sibling").embed(sibling_schema))
            .build()
    }

    #[test]
    fn finds_own_field() {
        let schema = outer();
        match schema.lookup("own") {
            FieldLookup::Found(field) => assert_eq!(field.tag_value("xml"), Some("Own")),
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn private_field_is_not_a_match() {
        let schema = outer();
        assert!(matches!(schema.lookup("hidden"), FieldLookup::Private));
    }

    #[test]
    fn missing_field_is_not_found() {
        let schema = outer();
        assert!(matches!(schema.lookup("nope"), FieldLookup::NotFound));
    }

    #[test]
    fn promoted_field_is_found_through_embed() {
        let schema = outer();
        match schema.lookup("promoted") {
            FieldLookup::Found(field) => assert_eq!(field.tag_value("json"), Some("promoted")),
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn own_field_shadows_promoted_field() {
        let schema = StructSchema::builder("Shadowing")
            .field(FieldSchema::new("promoted").tag("json", "shallow"))
            .field(FieldSchema::new("inner").embed(inner_schema))
            .build();
        match schema.lookup("promoted") {
            FieldLookup::Found(field) => assert_eq!(field.tag_value("json"), Some("shallow")),
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn ambiguous_promotion_is_not_found() {
        // "shared" exists in both embedded schemas at the same depth.
        let schema = outer();
        assert!(matches!(schema.lookup("shared"), FieldLookup::NotFound));
    }

    #[test]
    fn same_schema_embedded_twice_at_one_depth_is_ambiguous() {
        let schema = StructSchema::builder("Doubled")
            .field(FieldSchema::new("first").embed(inner_schema))
            .field(FieldSchema::new("second").embed(inner_schema))
            .build();
        assert!(matches!(schema.lookup("promoted"), FieldLookup::NotFound));
    }

    #[test]
    fn tag_present_but_empty_is_distinct_from_absent() {
        let field = FieldSchema::new("field").tag("json", "");
        assert_eq!(field.tag_value("json"), Some(""));
        assert_eq!(field.tag_value("xml"), None);
    }
}
