#![expect(missing_docs)]

use core::fmt::Write;

use luatexts::{DecodeOptions, ErrorKind, decode, decode_with_options};

fn render_errors(cases: &[(&str, &[u8])]) -> String {
    let mut out = String::new();
    for (name, input) in cases {
        let err = decode(input).expect_err(name);
        writeln!(out, "{name}: {err}").unwrap();
    }
    out
}

#[test]
fn snapshot_error_messages() {
    let cases: [(&str, &[u8]); 10] = [
        ("bad_type", b"1\nX\n"),
        ("bad_size", b"1\nS\n10\nabc\n"),
        ("clipped", b"1\n"),
        ("too_huge", b"1\nU\n4294967296\n"),
        ("string_garbage", b"1\nS\n1\nab\n"),
        ("number_garbage", b"1\nN\n1.5x\n"),
        ("count_garbage", b"1x\n0\n"),
        ("bad_utf8", b"1\n8\n1\n\xED\xA0\x80\n"),
        ("nil_key", b"1\nT\n0\n1\n-\nU\n1\n"),
        ("table_too_huge", b"1\nT\n67108865\n0\n"),
    ];
    insta::assert_snapshot!(render_errors(&cases), @r"
    bad_type: load failed: unknown data type at byte 2
    bad_size: load failed: corrupt data, bad size at byte 7
    clipped: load failed: corrupt data, truncated at byte 2
    too_huge: load failed: value too huge at byte 13
    string_garbage: load failed: garbage before newline at byte 7
    number_garbage: load failed: garbage before newline at byte 4
    count_garbage: load failed: garbage before newline at byte 2
    bad_utf8: load failed: invalid utf-8 data at byte 6
    nil_key: load failed: corrupt data at byte 8
    table_too_huge: load failed: value too huge at byte 15
    ");
}

#[test]
fn depth_limit_is_reported_at_the_table() {
    let err = decode_with_options(b"1\nt\nU\n1\nt\n-\n-\n", DecodeOptions { max_depth: 1 })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TooDeep);
    assert_eq!(err.offset(), 8);
    insta::assert_snapshot!(err, @"load failed: tables nested too deeply at byte 8");
}

#[test]
fn error_kind_messages_match_the_reference_loader() {
    assert_eq!(ErrorKind::BadType.to_string(), "load failed: unknown data type");
    assert_eq!(ErrorKind::Clipped.to_string(), "load failed: corrupt data, truncated");
}
