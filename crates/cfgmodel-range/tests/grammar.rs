//! Range grammar matrix: parsing, canonical encoding, and membership.

use cfgmodel_range::{FloatRangeCodec, IntRangeCodec, Range};

use cfgmodel_core::serializer::InlineCodec;

fn decode(token: &str) -> Range<i64> {
    IntRangeCodec::new()
        .decode(token)
        .unwrap_or_else(|err| panic!("{token:?} should parse: {err}"))
}

fn encode(range: &Range<i64>) -> String {
    IntRangeCodec::new().encode(range)
}

#[test]
fn token_forms_decode_to_their_variants() {
    assert_eq!(decode("7"), Range::Exact(7));
    assert_eq!(decode("-3"), Range::Exact(-3));
    assert_eq!(decode("all"), Range::All);
    assert_eq!(decode("{1,2,5}"), Range::in_set(vec![1, 2, 5]));
    assert_eq!(decode(">4"), Range::greater_than(4));
    assert_eq!(decode(">=4"), Range::at_least(4));
    assert_eq!(decode("<4"), Range::less_than(4));
    assert_eq!(decode("<=4"), Range::at_most(4));
    assert_eq!(decode("(0,9)"), Range::open_interval(0, 9));
    assert_eq!(decode("[0,9]"), Range::closed_interval(0, 9));
    assert_eq!(decode("(0,9]"), Range::open_closed_interval(0, 9));
    assert_eq!(decode("[0,9)"), Range::closed_open_interval(0, 9));
}

#[test]
fn malformed_tokens_are_rejected() {
    let codec = IntRangeCodec::new();
    for token in ["", "everything", "{}", "{1,,2}", "(1,2", "(1,2}", "[1;2]", ">=", "(1,2,3)"] {
        assert!(codec.decode(token).is_err(), "{token:?} should not parse");
        assert!(!codec.can_decode(token));
    }
}

#[test]
fn encode_emits_the_canonical_token() {
    assert_eq!(encode(&Range::All), "all");
    assert_eq!(encode(&Range::Exact(7)), "7");
    assert_eq!(encode(&Range::in_set(vec![1, 2, 5])), "{1,2,5}");
    assert_eq!(encode(&Range::at_least(4)), ">=4");
    assert_eq!(encode(&Range::less_than(4)), "<4");
    assert_eq!(encode(&Range::open_closed_interval(0, 9)), "(0,9]");
}

#[test]
fn every_variant_roundtrips_through_its_token() {
    let ranges = [
        Range::All,
        Range::Exact(0),
        Range::in_set(vec![-1, 0, 1]),
        Range::greater_than(10),
        Range::at_most(-2),
        Range::closed_interval(1, 100),
        Range::open_interval(-5, 5),
    ];
    let codec = IntRangeCodec::new();
    for range in ranges {
        let token = codec.encode(&range);
        assert_eq!(codec.decode(&token).expect("roundtrip"), range);
    }
}

#[test]
fn float_bounds_parse_with_fractions() {
    let codec = FloatRangeCodec::new();
    assert_eq!(codec.decode("1.5").expect("exact"), Range::Exact(1.5));
    assert_eq!(
        codec.decode("[0.25,0.75)").expect("interval"),
        Range::closed_open_interval(0.25, 0.75)
    );
}

#[test]
fn membership_respects_bound_openness() {
    assert!(Range::<i64>::All.is_within(42));

    let roster = Range::in_set(vec![1, 3, 5]);
    assert!(roster.is_within(3));
    assert!(!roster.is_within(2));

    let at_least = Range::at_least(4);
    assert!(at_least.is_within(4));
    assert!(!at_least.is_within(3));

    let strict = Range::greater_than(4);
    assert!(!strict.is_within(4));
    assert!(strict.is_within(5));

    let half_open = Range::closed_open_interval(0, 9);
    assert!(half_open.is_within(0));
    assert!(!half_open.is_within(9));

    let open = Range::open_interval(0, 9);
    assert!(!open.is_within(0));
    assert!(open.is_within(8));
}
