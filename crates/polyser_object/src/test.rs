use std::fmt;

use proptest::{prop_assert, prop_assert_eq, proptest};

use crate::{
    create_from_stream, prototype, Error, Registry, Serializable, TokenSink,
    TokenSource, Variant,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Point {
    x: i32,
    y: i32,
}

impl Serializable for Point {
    fn type_tag(&self) -> &'static str { Self::TYPE_TAG }

    fn serialize_fields(&self, sink: &mut TokenSink<'_>) -> fmt::Result {
        sink.write_token(self.x)?;
        sink.write_token(self.y)
    }

    fn construct_from_stream(
        &mut self,
        source: &mut TokenSource<'_>,
    ) -> Result<(), polyser_stream::Error> {
        self.x = source.parse("the x coordinate")?;
        self.y = source.parse("the y coordinate")?;

        Ok(())
    }
}

impl Variant for Point {
    const TYPE_TAG: &'static str = "Point";
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Label {
    text: String,
}

impl Default for Label {
    fn default() -> Self { Self { text: "label".to_owned() } }
}

impl Serializable for Label {
    fn type_tag(&self) -> &'static str { Self::TYPE_TAG }

    fn serialize_fields(&self, sink: &mut TokenSink<'_>) -> fmt::Result {
        sink.write_token(&self.text)
    }

    fn construct_from_stream(
        &mut self,
        source: &mut TokenSource<'_>,
    ) -> Result<(), polyser_stream::Error> {
        source.expect_token("the label text")?.clone_into(&mut self.text);

        Ok(())
    }
}

impl Variant for Label {
    const TYPE_TAG: &'static str = "Label";
}

fn registry() -> Registry<dyn Serializable> {
    Registry::from_prototypes([prototype::<Point>(), prototype::<Label>()])
}

#[test]
fn serialize_writes_tag_then_fields() {
    let point: Box<dyn Serializable> = Box::new(Point { x: 3, y: -4 });

    assert_eq!(point.to_record().unwrap(), "Point 3 -4");
}

#[test]
fn create_from_stream_reads_one_record_at_a_time() {
    let registry = registry();
    let mut source = TokenSource::new("Label hello Point 1 2 ");

    let label = create_from_stream(&registry, &mut source).unwrap();
    let point = create_from_stream(&registry, &mut source).unwrap();

    assert_eq!(
        label.downcast_ref::<Label>(),
        Some(&Label { text: "hello".to_owned() })
    );
    assert_eq!(point.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));
    assert!(!label.is::<Point>());
    assert!(source.is_exhausted());
}

#[test]
fn unknown_variant_consumes_only_the_tag() {
    let registry = registry();
    let mut source = TokenSource::new("Point 0 0 Fish nemo");

    create_from_stream(&registry, &mut source).unwrap();

    let error = create_from_stream(&registry, &mut source).unwrap_err();
    let error = error.into_unknown_variant().unwrap();

    assert_eq!(error.tag, "Fish");
    assert_eq!(error.position, 10);
    assert_eq!(source.next_token(), Some("nemo"));
}

#[test]
fn empty_stream_is_malformed() {
    let registry = registry();
    let mut source = TokenSource::new("   ");

    let error = create_from_stream(&registry, &mut source).unwrap_err();

    assert!(error.as_malformed_field().unwrap().is_unexpected_end_of_stream());
}

#[test]
fn truncated_record_is_malformed() {
    let registry = registry();
    let mut source = TokenSource::new("Point 7");

    let error = create_from_stream(&registry, &mut source).unwrap_err();

    assert!(matches!(error, Error::MalformedField(_)));
}

#[test]
fn non_numeric_field_is_malformed() {
    let registry = registry();
    let mut source = TokenSource::new("Point seven 8");

    let error = create_from_stream(&registry, &mut source).unwrap_err();
    let invalid = error.into_malformed_field().unwrap();
    let invalid = invalid.into_invalid_token().unwrap();

    assert_eq!(invalid.found, "seven");
    assert_eq!(invalid.position, 6);
}

#[test]
fn instances_of_the_same_tag_are_distinct() {
    let registry = registry();
    let mut source = TokenSource::new("Label first Label second");

    let mut first = create_from_stream(&registry, &mut source).unwrap();
    let second = create_from_stream(&registry, &mut source).unwrap();

    assert!(!std::ptr::addr_eq::<dyn Serializable, dyn Serializable>(
        &*first, &*second
    ));

    "changed".clone_into(&mut first.downcast_mut::<Label>().unwrap().text);

    assert_eq!(first.downcast_ref::<Label>().unwrap().text, "changed");
    assert_eq!(second.downcast_ref::<Label>().unwrap().text, "second");

    // the prototype stays a template
    let fresh = registry.lookup("Label").unwrap().instantiate();
    assert_eq!(fresh.downcast_ref::<Label>().unwrap().text, "label");
}

proptest! {
    #[test]
    fn point_survives_round_trip(x in proptest::num::i32::ANY, y in proptest::num::i32::ANY) {
        let registry = registry();
        let original: Box<dyn Serializable> = Box::new(Point { x, y });

        let record = original.to_record().unwrap();
        let mut source = TokenSource::new(&record);
        let reconstructed = create_from_stream(&registry, &mut source).unwrap();

        prop_assert_eq!(reconstructed.downcast_ref::<Point>(), Some(&Point { x, y }));
        prop_assert!(source.is_exhausted());
    }

    #[test]
    fn label_survives_round_trip(text in "[a-zA-Z0-9_.-]{1,16}") {
        let registry = registry();
        let original: Box<dyn Serializable> =
            Box::new(Label { text: text.clone() });

        let record = original.to_record().unwrap();
        let mut source = TokenSource::new(&record);
        let reconstructed = create_from_stream(&registry, &mut source).unwrap();

        prop_assert_eq!(
            reconstructed.downcast_ref::<Label>().map(|x| x.text.as_str()),
            Some(text.as_str())
        );
    }
}
