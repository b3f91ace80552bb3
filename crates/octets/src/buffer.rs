//! Read-only operations forwarded to the underlying byte buffer.
//!
//! The set is enumerated. Nothing here mutates, and every
//! method that produces bytes returns fresh [`Octets`].

use std::fmt::Write;
use std::ops::Add;

use crate::encoding::{Encoding, ErrorPolicy};
use crate::repr::hex;
use crate::{Octets, OctetsError};

impl Octets {
    /// Concatenation of `self` and `other`.
    ///
    /// # Example
    ///
    /// ```
    /// use octets::Octets;
    ///
    /// assert_eq!(Octets::from(b"ab").concat(b"cd"), b"abcd");
    /// ```
    pub fn concat(&self, other: impl AsRef<[u8]>) -> Octets {
        let other = other.as_ref();
        let mut data = Vec::with_capacity(self.len() + other.len());
        data.extend_from_slice(self.raw_bytes());
        data.extend_from_slice(other);
        Octets::from(data)
    }

    /// `self` repeated `n` times.
    pub fn repeat(&self, n: usize) -> Octets {
        Octets::from(self.raw_bytes().repeat(n))
    }

    /// Whether `needle` occurs as a contiguous subsequence.
    pub fn contains(&self, needle: impl AsRef<[u8]>) -> bool {
        self.find(needle).is_some()
    }

    pub fn contains_byte(&self, byte: u8) -> bool {
        self.raw_bytes().contains(&byte)
    }

    /// Offset of the first occurrence of `needle`.
    pub fn find(&self, needle: impl AsRef<[u8]>) -> Option<usize> {
        let needle = needle.as_ref();
        if needle.is_empty() {
            return Some(0);
        }
        self.raw_bytes()
            .windows(needle.len())
            .position(|window| window == needle)
    }

    /// Offset of the last occurrence of `needle`.
    pub fn rfind(&self, needle: impl AsRef<[u8]>) -> Option<usize> {
        let needle = needle.as_ref();
        if needle.is_empty() {
            return Some(self.len());
        }
        self.raw_bytes()
            .windows(needle.len())
            .rposition(|window| window == needle)
    }

    /// Number of non-overlapping occurrences of `needle`. An empty needle
    /// matches between every byte and at both ends.
    pub fn count(&self, needle: impl AsRef<[u8]>) -> usize {
        let needle = needle.as_ref();
        if needle.is_empty() {
            return self.len() + 1;
        }
        let data = self.raw_bytes();
        let mut count = 0;
        let mut i = 0;
        while i + needle.len() <= data.len() {
            if &data[i..i + needle.len()] == needle {
                count += 1;
                i += needle.len();
            } else {
                i += 1;
            }
        }
        count
    }

    pub fn starts_with(&self, prefix: impl AsRef<[u8]>) -> bool {
        self.raw_bytes().starts_with(prefix.as_ref())
    }

    pub fn ends_with(&self, suffix: impl AsRef<[u8]>) -> bool {
        self.raw_bytes().ends_with(suffix.as_ref())
    }

    /// Splits on every non-overlapping occurrence of `sep`.
    ///
    /// # Example
    ///
    /// ```
    /// use octets::Octets;
    ///
    /// let parts = Octets::from(b"a,,b").split(b",").unwrap();
    /// assert_eq!(parts, vec![Octets::from(b"a"), Octets::empty(), Octets::from(b"b")]);
    /// ```
    pub fn split(&self, sep: impl AsRef<[u8]>) -> Result<Vec<Octets>, OctetsError> {
        let sep = sep.as_ref();
        if sep.is_empty() {
            return Err(OctetsError::EmptySeparator);
        }
        let data = self.raw_bytes();
        let mut parts = Vec::new();
        let mut start = 0;
        let mut i = 0;
        while i + sep.len() <= data.len() {
            if &data[i..i + sep.len()] == sep {
                parts.push(Octets::from(&data[start..i]));
                i += sep.len();
                start = i;
            } else {
                i += 1;
            }
        }
        parts.push(Octets::from(&data[start..]));
        Ok(parts)
    }

    /// Copy without leading and trailing ASCII whitespace.
    pub fn strip(&self) -> Octets {
        Octets::from(self.raw_bytes().trim_ascii())
    }

    pub fn to_ascii_uppercase(&self) -> Octets {
        Octets::from(self.raw_bytes().to_ascii_uppercase())
    }

    pub fn to_ascii_lowercase(&self) -> Octets {
        Octets::from(self.raw_bytes().to_ascii_lowercase())
    }

    pub fn is_ascii(&self) -> bool {
        self.raw_bytes().is_ascii()
    }

    /// Contiguous lowercase hex of the content.
    pub fn hex(&self) -> String {
        hex(self.raw_bytes())
    }

    /// Space separated hex of the first `max` bytes, for debugging. A
    /// `(+N bytes)` marker counts what was left out.
    ///
    /// # Example
    ///
    /// ```
    /// use octets::Octets;
    ///
    /// assert_eq!(Octets::from(b"\x01\xab\x10").hex_dump(2), "01 ab (+1 bytes)");
    /// ```
    pub fn hex_dump(&self, max: usize) -> String {
        let shown = &self.raw_bytes()[..self.len().min(max)];
        let mut dump = shown.chunks(1).map(hex).collect::<Vec<_>>().join(" ");
        let hidden = self.len() - shown.len();
        if hidden > 0 {
            if !dump.is_empty() {
                dump.push(' ');
            }
            let _ = write!(dump, "(+{hidden} bytes)");
        }
        dump
    }

    /// Explicitly decodes the content as text.
    ///
    /// This is the only way from octets to text; `errors` names the error
    /// policy (`strict` when absent).
    ///
    /// # Example
    ///
    /// ```
    /// use octets::Octets;
    ///
    /// let o = Octets::from(b"\x00a");
    /// assert_eq!(o.decode("utf-16be", None).unwrap(), "a");
    /// assert!(Octets::from(b"\xff").decode("utf-8", None).is_err());
    /// ```
    pub fn decode(&self, encoding: &str, errors: Option<&str>) -> Result<String, OctetsError> {
        let encoding = Encoding::lookup(encoding)?;
        let policy = ErrorPolicy::lookup_optional(errors)?;
        encoding.decode(self.raw_bytes(), policy)
    }
}

impl Add<&Octets> for &Octets {
    type Output = Octets;

    fn add(self, rhs: &Octets) -> Octets {
        self.concat(rhs)
    }
}

impl Add for Octets {
    type Output = Octets;

    fn add(self, rhs: Octets) -> Octets {
        self.concat(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_concat_and_add() {
        let a = Octets::from(b"ab");
        let b = Octets::from(b"c");
        assert_eq!(&a + &b, b"abc");
        assert_eq!(a.clone() + b.clone(), b"abc");
        assert_eq!(a.concat(b""), b"ab");
        assert_eq!(a, b"ab");
    }

    #[test]
    fn test_repeat() {
        assert_eq!(Octets::from(b"ab").repeat(3), b"ababab");
        assert_eq!(Octets::from(b"ab").repeat(0), b"");
    }

    #[test]
    fn test_search() {
        let o = Octets::from(b"abcabc");
        assert!(o.contains(b"ca"));
        assert!(!o.contains(b"cc"));
        assert!(o.contains_byte(b'b'));
        assert_eq!(o.find(b"bc"), Some(1));
        assert_eq!(o.rfind(b"bc"), Some(4));
        assert_eq!(o.find(b"x"), None);
        assert_eq!(o.find(b""), Some(0));
        assert_eq!(o.rfind(b""), Some(6));
        assert_eq!(o.find(b"abcabcabc"), None);
    }

    #[test]
    fn test_count() {
        assert_eq!(Octets::from(b"aaaa").count(b"aa"), 2);
        assert_eq!(Octets::from(b"abc").count(b""), 4);
        assert_eq!(Octets::empty().count(b"a"), 0);
    }

    #[test]
    fn test_prefix_suffix() {
        let o = Octets::from(b"hello");
        assert!(o.starts_with(b"he"));
        assert!(o.ends_with(b"llo"));
        assert!(!o.ends_with(b"he"));
    }

    #[test]
    fn test_split() {
        assert_eq!(
            Octets::from(b"a::b::").split(b"::").unwrap(),
            vec![Octets::from(b"a"), Octets::from(b"b"), Octets::empty()]
        );
        assert_eq!(Octets::empty().split(b",").unwrap(), vec![Octets::empty()]);
        assert_eq!(
            Octets::from(b"a").split(b"").unwrap_err().kind(),
            ErrorKind::Value
        );
    }

    #[test]
    fn test_case_and_strip() {
        assert_eq!(Octets::from(b" \tAbc\n").strip(), b"Abc");
        assert_eq!(Octets::from(b"Ab\xff").to_ascii_uppercase(), b"AB\xff");
        assert_eq!(Octets::from(b"Ab").to_ascii_lowercase(), b"ab");
        assert!(Octets::from(b"ab").is_ascii());
        assert!(!Octets::from(b"\x80").is_ascii());
    }

    #[test]
    fn test_hex() {
        let o = Octets::from(&[0x01, 0xab]);
        assert_eq!(o.hex(), "01ab");
        assert_eq!(o.hex_dump(16), "01 ab");
        assert_eq!(o.hex_dump(1), "01 (+1 bytes)");
        assert_eq!(o.hex_dump(0), "(+2 bytes)");
        assert_eq!(Octets::empty().hex_dump(4), "");
    }

    #[test]
    fn test_decode() {
        assert_eq!(Octets::from(b"abc").decode("ascii", None).unwrap(), "abc");
        assert_eq!(
            Octets::from(b"a\xff").decode("utf-8", Some("replace")).unwrap(),
            "a\u{fffd}"
        );
        assert_eq!(
            Octets::from(b"a").decode("nope", None).unwrap_err().kind(),
            ErrorKind::Lookup
        );
    }
}
