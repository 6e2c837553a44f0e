mod common;

use common::unescape_field;
use loadtsv::{EncoderOptions, Value, escape_field, escape_value};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn every_byte_value_round_trips() {
    let all: Vec<u8> = (0..=255u8).collect();
    let escaped = escape_field(Some(&all));
    assert_eq!(unescape_field(&escaped), Some(all));
}

#[test]
fn each_byte_alone_round_trips() {
    for b in 0..=255u8 {
        let escaped = escape_field(Some(&[b]));
        assert_eq!(unescape_field(&escaped), Some(vec![b]), "byte {b:#04x}");
    }
}

#[test]
fn random_blobs_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let len = rng.random_range(0..2048);
        let mut blob = vec![0u8; len];
        rng.fill(&mut blob[..]);
        let escaped = escape_field(Some(&blob));
        assert_eq!(unescape_field(&escaped), Some(blob));
    }
}

#[test]
fn escaped_fields_contain_no_raw_terminators() {
    let escaped = escape_field(Some(b"a\tb\nc\rd"));
    assert!(!escaped.contains(&b'\t'));
    assert!(!escaped.contains(&b'\n'));
    assert_eq!(escaped, b"\"a\\tb\\nc\\rd\"");
}

#[test]
fn null_is_distinct_from_empty() {
    assert_eq!(escape_field(None), b"\\N");
    assert_eq!(escape_field(Some(b"")), b"\"\"");
    // A literal backslash-N is still a quoted string.
    assert_eq!(escape_field(Some(b"\\N")), b"\"\\\\N\"");
}

#[test]
fn non_ascii_passes_through() {
    let escaped = escape_field(Some("zoë ✓".as_bytes()));
    assert_eq!(escaped, "\"zoë ✓\"".as_bytes());
    assert_eq!(escape_field(Some(&[0xDE, 0xAD])), b"\"\xDE\xAD\"");
}

#[test]
fn one_shot_value_escaping() -> anyhow::Result<()> {
    let opts = EncoderOptions::default();
    assert_eq!(escape_value(&-42i64, &opts)?, b"\"-42\"");
    assert_eq!(escape_value(&true, &opts)?, b"\"1\"");
    assert_eq!(escape_value(&Value::Null, &opts)?, b"\\N");
    assert_eq!(escape_value("say \"hi\"", &opts)?, b"\"say \\\"hi\\\"\"");
    assert_eq!(escape_value(&Vec::<u8>::new(), &opts)?, b"\"\"");
    Ok(())
}
