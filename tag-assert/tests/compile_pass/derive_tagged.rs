// The derive accepts tag pairs, embedding, private fields, and generics.

use tag_assert::{Tagged, TestReporter, expect};

#[derive(Default, Tagged)]
struct Inner {
    #[tag(json = "inner_id")]
    pub id: u64,
}

#[derive(Default, Tagged)]
struct Outer {
    #[allow(dead_code)]
    hidden: String,
    #[tag(xml = "Name", json = "name,omitempty")]
    pub name: String,
    #[tag(embed)]
    pub inner: Inner,
}

#[derive(Tagged)]
struct Generic<T> {
    #[tag(json = "value")]
    pub value: T,
}

fn main() {
    let t = TestReporter::new();
    expect(&t, &Outer::default())
        .has_field("name")
        .has_field("id")
        .expect_field("name")
        .assert("xml", "Name");
    expect(&t, &Generic { value: 1u8 })
        .expect_field("value")
        .assert("json", "value");
}
