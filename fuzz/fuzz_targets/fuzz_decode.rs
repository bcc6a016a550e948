#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use luatexts::{DecodeOptions, decode_with_options, encode};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    max_depth: u8,
    data: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    let options = DecodeOptions {
        max_depth: usize::from(input.max_depth),
    };

    let first = decode_with_options(input.data, options);
    // Decoding is a pure function of the input.
    assert_eq!(first, decode_with_options(input.data, options));

    let values = match first {
        Ok(values) => values,
        Err(err) => {
            assert!(err.offset() <= input.data.len());
            return;
        }
    };

    // Whatever decodes must survive the canonical encoding.
    let bytes = encode(&values);
    let again = decode_with_options(&bytes, options).expect("re-encoded tuple must decode");
    assert_eq!(again, values);
});
