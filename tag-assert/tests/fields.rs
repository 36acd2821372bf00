mod util;

use tag_assert::{RecordingReporter, Tagged, expect};
use util::Record;

#[derive(Default, Tagged)]
struct Subject {
    #[tag(xml = "ID", json = "id")]
    pub id: i32,
}

#[derive(Default, Tagged)]
struct Untagged {
    pub name: String,
}

#[test]
fn expect_tag_resolves_value() {
    let t = RecordingReporter::new();
    let session = expect(&t, &Record::default());

    let tag = session.expect_field("public").expect_tag("tag1");
    assert!(tag.resolved());
    assert_eq!(tag.name(), "tag1");
    assert_eq!(tag.value(), "pub");
    assert!(t.errors().is_empty());
}

#[test]
fn expect_tag_reports_missing_key() {
    let t = RecordingReporter::new();
    let session = expect(&t, &Record::default());

    let tag = session.expect_field("public").expect_tag("bson");
    assert!(!tag.resolved());
    assert_eq!(tag.value(), "");
    assert_eq!(t.errors(), ["Record.public: Tag <bson> not found"]);
}

#[test]
fn expect_tag_on_placeholder_reports_again() {
    let t = RecordingReporter::new();
    let session = expect(&t, &Record::default());

    let tag = session.expect_field("unknown").expect_tag("json");
    assert!(!tag.resolved());
    assert_eq!(
        t.errors(),
        [
            "Record: Field <unknown> not found",
            "Record.unknown: Tag <json> not found",
        ]
    );
}

#[test]
fn has_tag_chains_without_errors() {
    let t = RecordingReporter::new();
    let session = expect(&t, &Record::default());

    session.expect_field("public").has_tag("tag1").has_tag("tag2");
    assert!(t.errors().is_empty());
}

#[test]
fn has_tag_reports_missing_key() {
    let t = RecordingReporter::new();
    let session = expect(&t, &Record::default());

    session.expect_field("without_tags").has_tag("json");
    assert_eq!(t.errors(), ["Record.without_tags: Tag <json> not found"]);
}

#[test]
fn has_tags_checks_every_name() {
    let t = RecordingReporter::new();
    let session = expect(&t, &Record::default());

    session
        .expect_field("public")
        .has_tags(&["tag1", "missing1", "tag2", "missing2"]);
    assert_eq!(
        t.errors(),
        [
            "Record.public: Tag <missing1> not found",
            "Record.public: Tag <missing2> not found",
        ]
    );
}

#[test]
fn assert_passes_on_matching_value() {
    let t = RecordingReporter::new();
    expect(&t, &Subject::default())
        .expect_field("id")
        .assert("xml", "ID")
        .assert("json", "id");

    assert!(t.errors().is_empty());
}

#[test]
fn assert_reports_value_mismatch() {
    let t = RecordingReporter::new();
    expect(&t, &Subject::default())
        .expect_field("id")
        .assert("xml", "ID")
        .assert("json", "identifier");

    assert_eq!(
        t.errors(),
        ["Subject.id: Tag <json> does not have a value of <identifier>,but actual <id>"]
    );
}

#[test]
fn assert_on_missing_tag_reports_only_not_found() {
    let t = RecordingReporter::new();
    expect(&t, &Subject::default())
        .expect_field("id")
        .assert("bson", "whatever");

    assert_eq!(t.errors(), ["Subject.id: Tag <bson> not found"]);
}

#[test]
fn untagged_field_has_no_tags_at_all() {
    let t = RecordingReporter::new();
    let session = expect(&t, &Untagged::default());

    let tag = session.expect_field("name").expect_tag("json");
    assert_eq!(t.errors(), ["Untagged.name: Tag <json> not found"]);
    assert!(!tag.has_value("anything"));
    assert!(!tag.has_value(""));
}

#[test]
fn empty_passes_on_untagged_field() {
    let t = RecordingReporter::new();
    let session = expect(&t, &Record::default());

    session.expect_field("without_tags").empty();
    assert!(t.errors().is_empty());
}

#[test]
fn empty_reports_on_tagged_field() {
    let t = RecordingReporter::new();
    let session = expect(&t, &Record::default());

    session.expect_field("public").empty();
    assert_eq!(t.errors(), ["Record.public: Not empty"]);
}

#[test]
fn empty_on_placeholder_is_a_guarded_noop() {
    let t = RecordingReporter::new();
    let session = expect(&t, &Record::default());

    session.expect_field("unknown").empty();
    assert_eq!(t.errors(), ["Record: Field <unknown> not found"]);
}

#[test]
fn full_name_degrades_when_the_session_failed() {
    let t = RecordingReporter::new();
    let session = expect(&t, &5u8);

    let field = session.expect_field("x");
    assert_eq!(field.full_name(), "x");
    assert_eq!(t.errors(), ["u8: Field <x> not found"]);
}
