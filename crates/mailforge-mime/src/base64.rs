//! Base64 encoding and decoding.
//!
//! Implements the standard and URL-safe alphabets of RFC 4648 over a single
//! shared block transform: three source bytes map to four alphabet characters,
//! and a short final block is completed with `=` padding. Encoding is total;
//! decoding validates length, alphabet membership, and padding placement, but
//! does not insist that the unused low bits of a short final block are zero
//! (`"YR=="` decodes to the same byte as `"YQ=="`). [`url_decode`] also
//! accepts input whose trailing padding has been stripped.

use crate::error::{Error, Result};

/// Padding character marking a final block that encoded fewer than three
/// source bytes.
pub const PAD: char = '=';

/// A base64 alphabet: 64 characters mapping bijectively to the 6-bit values
/// `0..=63`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    table: &'static [u8; 64],
}

/// Standard alphabet (RFC 4648 section 4): `+` and `/` for values 62 and 63.
pub const STANDARD: Alphabet = Alphabet {
    table: b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/",
};

/// URL-safe alphabet (RFC 4648 section 5): `-` and `_` for values 62 and 63.
pub const URL_SAFE: Alphabet = Alphabet {
    table: b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_",
};

impl Alphabet {
    /// Returns the character for a 6-bit value. High bits are masked off.
    const fn char(self, value: u8) -> char {
        self.table[(value & 0x3f) as usize] as char
    }

    /// Returns the 6-bit value for a character of this alphabet.
    fn value(self, byte: u8) -> Result<u8> {
        match byte {
            b'A'..=b'Z' => Ok(byte - b'A'),
            b'a'..=b'z' => Ok(byte - b'a' + 26),
            b'0'..=b'9' => Ok(byte - b'0' + 52),
            _ if byte == self.table[62] => Ok(62),
            _ if byte == self.table[63] => Ok(63),
            _ => Err(Error::MalformedInput(format!(
                "invalid character {:?}",
                byte as char
            ))),
        }
    }
}

/// Encodes data with the standard alphabet, padded.
#[must_use]
pub fn encode(data: &[u8]) -> String {
    encode_with(data, STANDARD)
}

/// Encodes data with the given alphabet, padded.
///
/// The output length is always a multiple of four; empty input encodes to the
/// empty string.
#[must_use]
pub fn encode_with(data: &[u8], alphabet: Alphabet) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(3) * 4);
    for block in data.chunks(3) {
        encode_block(block, alphabet, &mut out);
    }
    out
}

/// Encodes data with the URL-safe alphabet.
///
/// With `keep_padding` set to `false`, trailing `=` characters are stripped
/// from the output; [`url_decode`] accepts either form.
#[must_use]
pub fn url_encode(data: &[u8], keep_padding: bool) -> String {
    let mut out = encode_with(data, URL_SAFE);
    if !keep_padding {
        out.truncate(out.trim_end_matches(PAD).len());
    }
    out
}

/// Decodes padded standard-alphabet input.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] if the input length is not a positive
/// multiple of four (the empty string is accepted), if more than two padding
/// characters are present, or if any character is outside the alphabet.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    decode_with(text, STANDARD)
}

/// Decodes padded input drawn from the given alphabet.
///
/// # Errors
///
/// Same conditions as [`decode`].
pub fn decode_with(text: &str, alphabet: Alphabet) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    if !text.len().is_multiple_of(4) {
        return Err(Error::MalformedInput(format!(
            "length {} is not a multiple of 4",
            text.len()
        )));
    }
    decode_unpadded(strip_padding(text)?, alphabet)
}

/// Decodes URL-safe input, with or without trailing padding.
///
/// When padding is absent, the byte count of the final block is inferred from
/// its character count: two characters yield one byte, three yield two.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] if a character is outside the alphabet or
/// the unpadded length leaves a single trailing character (no final block can
/// encode to one character).
pub fn url_decode(text: &str) -> Result<Vec<u8>> {
    decode_unpadded(strip_padding(text)?, URL_SAFE)
}

/// Encodes one block of up to three bytes into four characters.
///
/// Missing bytes in a short block contribute zero bits to the shifts but only
/// ever produce padding characters, never data characters.
fn encode_block(block: &[u8], alphabet: Alphabet, out: &mut String) {
    let b0 = block[0];
    let b1 = block.get(1).copied().unwrap_or(0);
    let b2 = block.get(2).copied().unwrap_or(0);

    out.push(alphabet.char(b0 >> 2));
    out.push(alphabet.char((b0 << 4) | (b1 >> 4)));
    out.push(if block.len() > 1 {
        alphabet.char((b1 << 2) | (b2 >> 6))
    } else {
        PAD
    });
    out.push(if block.len() > 2 {
        alphabet.char(b2)
    } else {
        PAD
    });
}

/// Strips trailing padding, rejecting more than two `=` characters.
///
/// Padding anywhere else survives the strip and is caught by the per-character
/// alphabet lookup during block decoding.
fn strip_padding(text: &str) -> Result<&str> {
    let stripped = text.trim_end_matches(PAD);
    if text.len() - stripped.len() > 2 {
        return Err(Error::MalformedInput(
            "more than two padding characters".into(),
        ));
    }
    Ok(stripped)
}

/// Decodes unpadded input; the final block may hold two or three characters.
fn decode_unpadded(text: &str, alphabet: Alphabet) -> Result<Vec<u8>> {
    let data = text.as_bytes();
    let mut out = Vec::with_capacity(data.len() / 4 * 3 + 2);
    for block in data.chunks(4) {
        decode_block(block, alphabet, &mut out)?;
    }
    Ok(out)
}

/// Decodes one block of two to four characters into up to three bytes.
fn decode_block(block: &[u8], alphabet: Alphabet, out: &mut Vec<u8>) -> Result<()> {
    if block.len() == 1 {
        return Err(Error::MalformedInput(
            "a final block of one character is impossible".into(),
        ));
    }

    let mut values = [0u8; 4];
    for (slot, &byte) in values.iter_mut().zip(block) {
        *slot = alphabet.value(byte)?;
    }

    out.push((values[0] << 2) | (values[1] >> 4));
    if block.len() > 2 {
        out.push((values[1] << 4) | (values[2] >> 2));
    }
    if block.len() > 3 {
        out.push((values[2] << 6) | values[3]);
    }
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_three_bytes() {
        assert_eq!(encode(&[0x61, 0x61, 0x61]), "YWFh");
    }

    #[test]
    fn test_encode_four_bytes() {
        assert_eq!(encode(&[0x61, 0x61, 0x61, 0x61]), "YWFhYQ==");
    }

    #[test]
    fn test_decode_sentence() {
        let decoded = decode("QXJlIHdlIHJlYWxseSBmcmVlPw==").unwrap();
        assert_eq!(decoded, b"Are we really free?");
    }

    #[test]
    fn test_empty_round_trip() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
        assert_eq!(url_encode(&[], false), "");
        assert_eq!(url_decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_padding_counts() {
        // 3n bytes: no padding
        assert!(!encode(b"abc").contains('='));
        assert!(!encode(b"abcdef").contains('='));
        // 3n + 1 bytes: exactly two
        assert!(encode(b"abcd").ends_with("=="));
        assert!(!encode(b"abcd").ends_with("==="));
        // 3n + 2 bytes: exactly one
        assert!(encode(b"abcde").ends_with('='));
        assert!(!encode(b"abcde").ends_with("=="));
    }

    #[test]
    fn test_output_length_multiple_of_four() {
        for len in 0..32 {
            let data = vec![0xa5; len];
            assert_eq!(encode(&data).len() % 4, 0);
        }
    }

    #[test]
    fn test_decode_rejects_bad_length() {
        assert!(decode("YWF").is_err());
        assert!(decode("Y").is_err());
        assert!(decode("YWFhY").is_err());
    }

    #[test]
    fn test_decode_rejects_bad_character() {
        assert!(decode("YW!h").is_err());
        // URL-safe characters are not in the standard alphabet
        assert!(decode("YW-h").is_err());
        assert!(url_decode("YW+h").is_err());
    }

    #[test]
    fn test_decode_rejects_misplaced_padding() {
        // padding in the middle of a block
        assert!(decode("Y=Fh").is_err());
        assert!(decode("=WFh").is_err());
        // padding terminating a non-final block
        assert!(decode("YQ==YWFh").is_err());
        // three or four padding characters
        assert!(decode("Y===").is_err());
        assert!(decode("====").is_err());
    }

    #[test]
    fn test_decode_ignores_trailing_nondata_bits() {
        // The bits a short final block leaves unused are dropped, not
        // checked for zero, so non-canonical encodings alias canonical ones.
        assert_eq!(decode("YQ==").unwrap(), b"a");
        assert_eq!(decode("YR==").unwrap(), b"a");
        assert_eq!(decode("YWI=").unwrap(), b"ab");
        assert_eq!(decode("YWJ=").unwrap(), b"ab");
    }

    #[test]
    fn test_url_encode_strips_padding() {
        assert_eq!(url_encode(b"a", true), "YQ==");
        assert_eq!(url_encode(b"a", false), "YQ");
        assert_eq!(url_encode(b"ab", false), "YWI");
        assert_eq!(url_encode(b"abc", false), "YWJj");
    }

    #[test]
    fn test_url_decode_infers_final_block() {
        assert_eq!(url_decode("YQ").unwrap(), b"a");
        assert_eq!(url_decode("YWI").unwrap(), b"ab");
        assert_eq!(url_decode("YWJj").unwrap(), b"abc");
        // padded form still accepted
        assert_eq!(url_decode("YQ==").unwrap(), b"a");
    }

    #[test]
    fn test_url_alphabet_substitutions() {
        // 0xfb 0xff encodes to characters 62 and 63 in both alphabets
        let encoded = encode(&[0xfb, 0xef, 0xff]);
        assert_eq!(encoded, "++//");
        let url = url_encode(&[0xfb, 0xef, 0xff], true);
        assert_eq!(url, "--__");
        assert_eq!(url_decode(&url).unwrap(), vec![0xfb, 0xef, 0xff]);
    }

    #[test]
    fn test_all_byte_values_round_trip() {
        let data: Vec<u8> = (0..=255).collect();
        assert_eq!(decode(&encode(&data)).unwrap(), data);
        assert_eq!(url_decode(&url_encode(&data, false)).unwrap(), data);
    }

    proptest! {
        #[test]
        fn prop_standard_round_trip(data: Vec<u8>) {
            prop_assert_eq!(decode(&encode(&data)).unwrap(), data);
        }

        #[test]
        fn prop_url_round_trip_padded(data: Vec<u8>) {
            prop_assert_eq!(url_decode(&url_encode(&data, true)).unwrap(), data);
        }

        #[test]
        fn prop_url_round_trip_unpadded(data: Vec<u8>) {
            prop_assert_eq!(url_decode(&url_encode(&data, false)).unwrap(), data);
        }

        #[test]
        fn prop_padded_length(data: Vec<u8>) {
            prop_assert_eq!(encode(&data).len(), data.len().div_ceil(3) * 4);
        }
    }
}
