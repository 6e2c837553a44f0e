mod common;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use common::{count, parse_rows};
use loadtsv::testing::{FailingWriter, SharedBuffer};
use loadtsv::{ConvertError, EncodeError, Encoder, EncoderOptions, ToLoadValue, Value};

#[test]
fn two_column_stream_matches_expected_bytes() -> Result<()> {
    let mut enc = Encoder::new(Vec::new(), 2, None)?;
    enc.append_value(&0);
    enc.append_bytes(Some(&[0xDE, 0xAD]));
    enc.append_value(&1);
    enc.append_bytes(Some(b"hi\tthere"));
    let out = enc.finish()?;
    assert_eq!(out, b"\"0\"\t\"\xDE\xAD\"\n\"1\"\t\"hi\\tthere\"\n");
    Ok(())
}

#[test]
fn row_framing_counts_terminators() -> Result<()> {
    let columns = 3;
    let rows = 5;
    let mut enc = Encoder::new(Vec::new(), columns, None)?;
    for r in 0..rows {
        for c in 0..columns {
            enc.append_str(&format!("r{r}c{c}"));
        }
    }
    assert_eq!(enc.rows_written(), rows as u64);
    let out = enc.finish()?;
    assert_eq!(count(&out, b'\n'), rows);
    assert_eq!(count(&out, b'\t'), columns * rows - rows);
    assert!(!out.windows(2).any(|w| w == b"\t\n"));
    assert!(out.starts_with(b"\"r0c0\"\t"));
    assert!(out.ends_with(b"\"r4c2\"\n"));
    Ok(())
}

#[test]
fn single_column_rows() -> Result<()> {
    let mut enc = Encoder::new(Vec::new(), 1, None)?;
    enc.append_value(&1u8);
    enc.append_null();
    let out = enc.finish()?;
    assert_eq!(out, b"\"1\"\n\\N\n");
    Ok(())
}

#[test]
fn empty_stream_is_empty() -> Result<()> {
    let enc = Encoder::new(Vec::new(), 4, None)?;
    assert!(enc.finish()?.is_empty());
    Ok(())
}

#[test]
fn null_and_empty_fields() -> Result<()> {
    let mut enc = Encoder::new(Vec::new(), 4, None)?;
    enc.append_bytes(None);
    enc.append_bytes(Some(b""));
    enc.append_value(&None::<String>);
    enc.append_str("");
    let out = enc.finish()?;
    assert_eq!(out, b"\\N\t\"\"\t\\N\t\"\"\n");
    assert_eq!(
        parse_rows(&out),
        vec![vec![None, Some(vec![]), None, Some(vec![])]]
    );
    Ok(())
}

#[test]
fn binary_rows_round_trip() -> Result<()> {
    let blobs: Vec<Vec<u8>> = (0..64u8)
        .map(|i| (0..=255u8).map(|b| b.wrapping_mul(i)).collect())
        .collect();
    let mut enc = Encoder::new(Vec::new(), 2, None)?;
    for (i, blob) in blobs.iter().enumerate() {
        enc.append_value(&i);
        enc.append_bytes(Some(blob));
    }
    let out = enc.finish()?;
    let rows = parse_rows(&out);
    assert_eq!(rows.len(), blobs.len());
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row[0].as_deref(), Some(i.to_string().as_bytes()));
        assert_eq!(row[1].as_ref(), Some(&blobs[i]));
    }
    Ok(())
}

#[test]
fn counters_track_position() -> Result<()> {
    let mut enc = Encoder::new(Vec::new(), 3, None)?;
    assert_eq!(enc.columns(), 3);
    assert!(enc.is_row_boundary());
    enc.append_value(&true);
    assert_eq!(enc.columns_remaining(), 2);
    assert!(!enc.is_row_boundary());
    enc.append_value(&false);
    enc.append_value(&true);
    assert_eq!(enc.columns_remaining(), 3);
    assert!(enc.is_row_boundary());
    assert_eq!(enc.rows_written(), 1);
    Ok(())
}

#[test]
fn partial_row_is_written_on_finish() -> Result<()> {
    let mut enc = Encoder::new(Vec::new(), 3, None)?;
    enc.append_str("a");
    let out = enc.finish()?;
    assert_eq!(out, b"\"a\"\t");
    Ok(())
}

#[test]
fn zero_columns_is_rejected() {
    let err = Encoder::new(Vec::new(), 0, None).unwrap_err();
    assert!(matches!(err, EncodeError::InvalidColumnCount(0)));
}

#[test]
fn unsupported_value_latches_and_writes_nothing() {
    let sink = SharedBuffer::new();
    let mut enc = Encoder::new(sink.clone(), 2, None).unwrap();
    enc.append_str("before");
    enc.append_any(&0.25f32);
    assert!(matches!(
        enc.last_error(),
        Some(EncodeError::Convert(ConvertError::Unsupported { .. }))
    ));
    assert_eq!(enc.columns_remaining(), 1);

    enc.append_str("after");
    enc.append_value(&1);
    assert_eq!(enc.columns_remaining(), 1);

    let err = enc.finish().unwrap_err();
    assert!(err.is_conversion());
    assert!(sink.is_empty(), "nothing may reach the sink after a failure");
}

#[test]
fn dropping_a_failed_encoder_writes_nothing() {
    let sink = SharedBuffer::new();
    let mut enc = Encoder::new(sink.clone(), 2, None).unwrap();
    enc.append_str("before");
    enc.append_any(&0.25f32);
    assert!(enc.last_error().is_some());
    drop(enc);
    assert!(sink.is_empty(), "buffered fields leaked on drop: {:?}", sink.contents());
}

#[test]
fn dropping_a_healthy_encoder_flushes() {
    let sink = SharedBuffer::new();
    let mut enc = Encoder::new(sink.clone(), 1, None).unwrap();
    enc.append_str("kept");
    drop(enc);
    assert_eq!(sink.contents(), b"\"kept\"\n");
}

#[test]
fn borrowed_sink_survives_a_failed_stream() -> Result<()> {
    let mut out = Vec::new();
    let mut enc = Encoder::new(&mut out, 2, None)?;
    enc.append_str("partial");
    enc.append_any(&1.5f64);
    assert!(enc.finish().is_err());
    assert!(out.is_empty());

    let mut enc = Encoder::new(&mut out, 1, None)?;
    enc.append_value(&7u8);
    enc.finish()?;
    assert_eq!(out, b"\"7\"\n");
    Ok(())
}

struct Broken;

impl ToLoadValue for Broken {
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
        Err(ConvertError::producer::<Self>("backing store unavailable"))
    }
}

#[test]
fn first_error_wins() {
    let mut enc = Encoder::new(Vec::new(), 1, None).unwrap();
    enc.append_value(&Broken);
    enc.append_any(&'c');
    let err = enc.finish().unwrap_err();
    match err {
        EncodeError::Convert(ConvertError::Producer { source, .. }) => {
            assert_eq!(source.to_string(), "backing store unavailable");
        }
        other => panic!("expected the producer error, got {other:?}"),
    }
}

#[test]
fn sink_write_error_latches() {
    let sink = FailingWriter::new(100);
    let received = sink.received();
    let mut enc = Encoder::new(sink, 2, None).unwrap();

    // Larger than the internal buffer, so it goes straight to the sink.
    let big = vec![b'x'; 64 * 1024];
    enc.append_bytes(Some(&big));
    assert!(matches!(enc.last_error(), Some(EncodeError::Io(_))));
    assert_eq!(received.len(), 100);

    enc.append_bytes(Some(&big));
    enc.append_str("more");
    assert_eq!(received.len(), 100);

    let err = enc.finish().unwrap_err();
    assert!(matches!(err, EncodeError::Io(_)));
    assert!(!err.is_conversion());
    assert_eq!(received.len(), 100);
}

#[test]
fn flush_error_is_reported_by_finish() {
    let sink = FailingWriter::new(usize::MAX).fail_on_flush();
    let mut enc = Encoder::new(sink, 1, None).unwrap();
    enc.append_str("ok");
    assert!(enc.last_error().is_none());
    assert!(matches!(enc.finish(), Err(EncodeError::Io(_))));
}

#[test]
fn rows_from_tuples_and_values() -> Result<()> {
    let mut enc = Encoder::new(Vec::new(), 3, None)?;
    enc.append_row(&(1u32, "one", Some(true)));
    enc.append_row(&vec![Value::from(2), Value::from("two"), Value::Null]);
    let out = enc.finish()?;
    assert_eq!(out, b"\"1\"\t\"one\"\t\"1\"\n\"2\"\t\"two\"\t\\N\n");
    Ok(())
}

#[test]
fn time_zone_option_applies_to_fields() -> Result<()> {
    let opts = EncoderOptions::new().with_time_zone(Tz::Asia__Tokyo);
    let mut enc = Encoder::new(Vec::new(), 1, Some(opts))?;
    assert_eq!(enc.options().time_zone, Some(Tz::Asia__Tokyo));
    enc.append_value(&Utc.with_ymd_and_hms(2024, 1, 1, 15, 0, 0).unwrap());
    enc.append_value(&Utc.with_ymd_and_hms(2024, 1, 1, 15, 30, 0).unwrap());
    let out = enc.finish()?;
    assert_eq!(out, b"\"2024-01-02\"\n\"2024-01-02 00:30:00\"\n");
    Ok(())
}
