//! Tests for line splitting and incremental decoding

use crate::reader::line_source::LineSource;
use std::io::{Cursor, Read};

fn lines_of(bytes: &[u8], encoding: &'static encoding_rs::Encoding) -> Vec<String> {
    let mut source = LineSource::new(Box::new(Cursor::new(bytes.to_vec())), encoding);
    let mut lines = Vec::new();
    while let Some(line) = source.next_line().unwrap() {
        lines.push(line);
    }
    lines
}

/// Reader handing out one byte per call, to split every sequence across reads
struct ByteAtATime(Vec<u8>, usize);

impl Read for ByteAtATime {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.1 >= self.0.len() || buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.0[self.1];
        self.1 += 1;
        Ok(1)
    }
}

#[test]
fn test_all_line_endings() {
    let lines = lines_of(b"a\nb\r\nc\rd", encoding_rs::UTF_8);
    assert_eq!(lines, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_trailing_terminator_adds_no_line() {
    assert_eq!(lines_of(b"a\n", encoding_rs::UTF_8), vec!["a"]);
    assert_eq!(lines_of(b"a\r\n", encoding_rs::UTF_8), vec!["a"]);
    assert!(lines_of(b"", encoding_rs::UTF_8).is_empty());
}

#[test]
fn test_empty_lines_are_returned() {
    let lines = lines_of(b"a\n\n\r\nb", encoding_rs::UTF_8);
    assert_eq!(lines, vec!["a", "", "", "b"]);
}

#[test]
fn test_crlf_split_across_reads() {
    let stream = ByteAtATime(b"x\r\ny\rz\n".to_vec(), 0);
    let mut source = LineSource::new(Box::new(stream), encoding_rs::UTF_8);

    assert_eq!(source.next_line().unwrap().as_deref(), Some("x"));
    assert_eq!(source.next_line().unwrap().as_deref(), Some("y"));
    assert_eq!(source.next_line().unwrap().as_deref(), Some("z"));
    assert_eq!(source.next_line().unwrap(), None);
    assert_eq!(source.line_number(), 3);
}

#[test]
fn test_multibyte_split_across_reads() {
    let stream = ByteAtATime("héllo;wörld\n".as_bytes().to_vec(), 0);
    let mut source = LineSource::new(Box::new(stream), encoding_rs::UTF_8);

    assert_eq!(source.next_line().unwrap().as_deref(), Some("héllo;wörld"));
}

#[test]
fn test_utf16_with_bom() {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in "A;B\n1;2".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }

    // The BOM wins over the configured encoding
    let lines = lines_of(&bytes, encoding_rs::UTF_8);
    assert_eq!(lines, vec!["A;B", "1;2"]);
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let lines = lines_of(b"ok\n\xFF\n", encoding_rs::UTF_8);
    assert_eq!(lines, vec!["ok".to_string(), "\u{FFFD}".to_string()]);
}

#[test]
fn test_long_line_spans_chunks() {
    let long = "x".repeat(crate::constants::READ_CHUNK_SIZE * 3 + 7);
    let content = format!("{}\nshort\n", long);
    let lines = lines_of(content.as_bytes(), encoding_rs::UTF_8);

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].len(), long.len());
    assert_eq!(lines[1], "short");
}
