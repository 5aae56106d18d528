use proptest::{prop_assert, prop_assert_eq, proptest};

use crate::{tag::contains_whitespace, Prototype, Registry, TypeTag};

trait Speak {
    fn speak(&self) -> &'static str;
}

#[derive(Debug, Default)]
struct Loud;

impl Speak for Loud {
    fn speak(&self) -> &'static str { "LOUD" }
}

#[derive(Debug, Default)]
struct Quiet;

impl Speak for Quiet {
    fn speak(&self) -> &'static str { "quiet" }
}

fn loud() -> Box<dyn Speak> { Box::new(Loud) }

fn quiet() -> Box<dyn Speak> { Box::new(Quiet) }

const LOUD: TypeTag = TypeTag::from_static("Loud");
const QUIET: TypeTag = TypeTag::from_static("Quiet");

#[test]
fn lookup_finds_registered_prototype() {
    let mut registry = Registry::<dyn Speak>::new();

    assert!(registry.register(LOUD, loud).is_none());
    assert!(registry.register(QUIET, quiet).is_none());

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.lookup("Loud").unwrap().instantiate().speak(), "LOUD");
    assert_eq!(
        registry.lookup("Quiet").unwrap().instantiate().speak(),
        "quiet"
    );
}

#[test]
fn lookup_reports_missing_tag() {
    let registry = Registry::<dyn Speak>::from_prototypes([Prototype::new(
        LOUD, loud,
    )]);

    let error = registry.lookup("Fish").unwrap_err();

    assert_eq!(error.tag, "Fish");
    assert_eq!(
        error.to_string(),
        "no prototype is registered under type tag `Fish`"
    );
}

#[test]
fn lookup_is_case_sensitive() {
    let registry =
        Registry::<dyn Speak>::from_prototypes([Prototype::new(LOUD, loud)]);

    assert!(registry.contains("Loud"));
    assert!(!registry.contains("loud"));
}

#[test]
fn last_registration_wins() {
    let mut registry = Registry::<dyn Speak>::new();

    registry.register(LOUD, loud);
    let replaced = registry.register(LOUD, quiet).unwrap();

    assert_eq!(replaced.tag(), &LOUD);
    assert_eq!(replaced.instantiate().speak(), "LOUD");

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.lookup("Loud").unwrap().instantiate().speak(), "quiet");
}

#[test]
fn table_order_decides_duplicates() {
    let registry = Registry::<dyn Speak>::from_prototypes([
        Prototype::new(LOUD, loud),
        Prototype::new(QUIET, quiet),
        Prototype::new(LOUD, quiet),
    ]);

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.lookup("Loud").unwrap().instantiate().speak(), "quiet");
}

#[test]
fn try_register_rejects_duplicates() {
    let mut registry = Registry::<dyn Speak>::new();

    registry.try_register(LOUD, loud).unwrap();

    let error = registry.try_register(LOUD, quiet).unwrap_err();

    assert_eq!(error.tag, LOUD);
    assert_eq!(registry.lookup("Loud").unwrap().instantiate().speak(), "LOUD");
}

#[test]
fn instantiate_allocates_fresh_instances() {
    let mut registry = Registry::<Vec<u8>>::new();
    registry.register(TypeTag::from_static("Bytes"), || Box::new(vec![0; 4]));

    let prototype = registry.lookup("Bytes").unwrap();
    let mut first = prototype.instantiate();
    let second = prototype.instantiate();

    first[0] = 1;

    assert!(!std::ptr::eq::<Vec<u8>>(&*first, &*second));
    assert_eq!(first[0], 1);
    assert_eq!(second[0], 0);
}

#[test]
fn tags_are_sorted() {
    let registry = Registry::<dyn Speak>::from_prototypes([
        Prototype::new(QUIET, quiet),
        Prototype::new(LOUD, loud),
    ]);

    let tags =
        registry.tags().into_iter().map(TypeTag::as_str).collect::<Vec<_>>();

    assert_eq!(tags, ["Loud", "Quiet"]);
}

#[test]
fn invalid_tags_are_rejected() {
    assert!(TypeTag::new("").is_err());
    assert!(TypeTag::new("Big Dog").is_err());
    assert!(TypeTag::new("Dog\n").is_err());

    let error = TypeTag::new("Big Dog").unwrap_err();
    assert_eq!(error.tag, "Big Dog");
    assert_eq!(
        error.to_string(),
        "type tag `Big Dog` must be non-empty and must not contain whitespace"
    );
}

const KAEFER: TypeTag = TypeTag::from_static("Käfer");

#[test]
fn static_tags_follow_the_runtime_rule() {
    assert_eq!(KAEFER, TypeTag::new("Käfer").unwrap());
    assert_eq!(TypeTag::from_static("🐕"), TypeTag::new("🐕").unwrap());
    assert_eq!(TypeTag::from_static("ä-b_c.d"), TypeTag::new("ä-b_c.d").unwrap());
}

#[test]
#[should_panic(expected = "type tag must not be empty")]
fn empty_static_tag_panics() { let _ = TypeTag::from_static(""); }

#[test]
#[should_panic(expected = "type tag must not contain whitespace")]
fn static_tag_with_space_panics() { let _ = TypeTag::from_static("Big Dog"); }

#[test]
#[should_panic(expected = "type tag must not contain whitespace")]
fn static_tag_with_unicode_whitespace_panics() {
    let _ = TypeTag::from_static("Big\u{3000}Dog");
}

proptest! {
    #[test]
    fn whitespace_detection_matches_char_is_whitespace(tag in "(?s).{0,16}") {
        prop_assert_eq!(
            contains_whitespace(&tag),
            tag.chars().any(char::is_whitespace)
        );
    }

    #[test]
    fn runtime_tags_without_whitespace_are_accepted(tag in "[^\\s]{1,16}") {
        let type_tag = TypeTag::new(tag.clone()).unwrap();

        prop_assert_eq!(type_tag.as_str(), tag.as_str());
        prop_assert_eq!(type_tag.to_string(), tag);
    }

    #[test]
    fn runtime_tags_with_whitespace_are_rejected(
        prefix in "[a-z]{0,4}",
        whitespace in "\\s",
        suffix in "[a-z]{0,4}",
    ) {
        let tag = format!("{prefix}{whitespace}{suffix}");

        prop_assert!(TypeTag::new(tag).is_err());
    }
}
