//! Lossless byte <-> code point mapping.
//!
//! Byte `N` maps to code point `U+00NN` and back, so any byte string can
//! travel through text-only machinery (the percent formatter) and come out
//! unchanged. No codec-specific decoding takes place on either side.

use crate::OctetsError;

/// Maps every byte to the code point of the same value.
///
/// # Example
///
/// ```
/// use octets::charmap;
///
/// assert_eq!(charmap::decode(&[b'a', 0xe9]), "a\u{e9}");
/// ```
pub fn decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Inverse of [`decode`]. Fails on the first code point above `U+00FF`.
///
/// # Example
///
/// ```
/// use octets::charmap;
///
/// assert_eq!(charmap::encode("a\u{e9}").unwrap(), vec![b'a', 0xe9]);
/// assert!(charmap::encode("\u{20ac}").is_err());
/// ```
pub fn encode(text: &str) -> Result<Vec<u8>, OctetsError> {
    text.chars()
        .enumerate()
        .map(|(position, c)| {
            u8::try_from(c).map_err(|_| OctetsError::Encode {
                encoding: "charmap",
                character: c,
                position,
                reason: "character maps to <undefined>",
            })
        })
        .collect()
}
