#![allow(dead_code)]

use tag_assert::Tagged;

#[derive(Default, Tagged)]
pub struct SubRecord {
    #[tag(json = "sub_name")]
    pub name: String,
}

/// The shared fixture: one private field, one tagged field, one untagged
/// field, one embedded field.
#[derive(Default, Tagged)]
pub struct Record {
    secret: String,
    #[tag(tag1 = "pub", tag2 = "public,options")]
    pub public: String,
    pub without_tags: String,
    #[tag(embed)]
    pub sub: SubRecord,
}
