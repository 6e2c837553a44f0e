//! A reference reader for the load format, following the server's documented
//! field and line handling for the dialect in `loadtsv::ESCAPING`.
#![allow(dead_code)]

/// Undo the quoting and escaping of one field. `None` is NULL.
pub fn unescape_field(field: &[u8]) -> Option<Vec<u8>> {
    if field == b"\\N" {
        return None;
    }
    assert!(
        field.len() >= 2 && field[0] == b'"' && field[field.len() - 1] == b'"',
        "field is not enclosed: {field:?}"
    );
    let inner = &field[1..field.len() - 1];
    let mut out = Vec::with_capacity(inner.len());
    let mut it = inner.iter();
    while let Some(&c) = it.next() {
        if c != b'\\' {
            assert_ne!(c, b'"', "unescaped quote inside field");
            out.push(c);
            continue;
        }
        let e = *it.next().expect("dangling escape");
        out.push(match e {
            b'0' => 0,
            b'b' => 0x08,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'Z' => 0x1A,
            other => other,
        });
    }
    Some(out)
}

/// Split a stream into rows of decoded fields.
pub fn parse_rows(data: &[u8]) -> Vec<Vec<Option<Vec<u8>>>> {
    if data.is_empty() {
        return Vec::new();
    }
    assert_eq!(data.last(), Some(&b'\n'), "stream must end with a line terminator");
    data[..data.len() - 1]
        .split(|&b| b == b'\n')
        .map(|line| line.split(|&b| b == b'\t').map(unescape_field).collect())
        .collect()
}

pub fn count(data: &[u8], byte: u8) -> usize {
    data.iter().filter(|&&b| b == byte).count()
}
