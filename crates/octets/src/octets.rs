//! The [`Octets`] value type and its single coercion point.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use crate::encoding::{Encoding, ErrorPolicy};
use crate::repr::bytes_repr;
use crate::{OctetsError, Value};

/// An immutable, owned byte string.
///
/// Octets are built once, through [`Octets::from_value`] (or one of its
/// shorthands), and never change afterwards. There is no
/// `Display` implementation: turning octets into text must go through the
/// explicit [`Octets::decode`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Octets {
    data: Vec<u8>,
}

impl Octets {
    /// Builds octets from a number, text or bytes.
    ///
    /// - Numbers (`Int`, `Float`, `Decimal`) become their standard base-10
    ///   text, encoded as ASCII. `encoding` and `errors` are ignored.
    /// - Text requires `encoding` and is encoded with it; `errors` names
    ///   the error policy (`strict` when absent).
    /// - Bytes are taken as is. `encoding` and `errors` are ignored.
    /// - Any other value is a type error.
    ///
    /// # Example
    ///
    /// ```
    /// use octets::Octets;
    ///
    /// assert_eq!(Octets::from_value(10, None, None).unwrap(), b"10");
    /// assert_eq!(Octets::from_value("a", Some("utf-16be"), None).unwrap(), b"\x00a");
    /// assert_eq!(Octets::from_value(b"a", None, None).unwrap(), b"a");
    /// assert!(Octets::from_value("a", None, None).is_err());
    /// ```
    pub fn from_value(
        source: impl Into<Value>,
        encoding: Option<&str>,
        errors: Option<&str>,
    ) -> Result<Self, OctetsError> {
        let data = match source.into() {
            Value::Int(n) => Self::ascii_number(&n.to_string())?,
            Value::Float(n) => Self::ascii_number(&n.to_string())?,
            Value::Decimal(d) => Self::ascii_number(&d.to_string())?,
            Value::Text(text) => {
                let name = encoding.ok_or(OctetsError::MissingEncoding)?;
                let encoding = Encoding::lookup(name)?;
                let policy = ErrorPolicy::lookup_optional(errors)?;
                encoding.encode(&text, policy)?
            }
            Value::Bytes(bytes) => bytes,
            other => {
                return Err(OctetsError::UnsupportedSource {
                    type_name: other.type_name(),
                })
            }
        };
        Ok(Self { data })
    }

    fn ascii_number(text: &str) -> Result<Vec<u8>, OctetsError> {
        Encoding::Ascii.encode(text, ErrorPolicy::Strict)
    }

    /// Builds octets from a number or bytes; text fails for lack of an
    /// encoding.
    pub fn new(source: impl Into<Value>) -> Result<Self, OctetsError> {
        Self::from_value(source, None, None)
    }

    /// Encodes `text` with the named encoding and optional error policy.
    pub fn encode(text: &str, encoding: &str, errors: Option<&str>) -> Result<Self, OctetsError> {
        Self::from_value(text, Some(encoding), errors)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The underlying bytes.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Implicit conversion to text is refused, whatever the content.
    ///
    /// Use [`Octets::decode`] to name an encoding explicitly.
    pub fn to_text(&self) -> Result<String, OctetsError> {
        Err(OctetsError::ImplicitDecode)
    }
}

impl TryFrom<Value> for Octets {
    type Error = OctetsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Octets::new(value)
    }
}

impl TryFrom<&Octets> for String {
    type Error = OctetsError;

    fn try_from(octets: &Octets) -> Result<Self, Self::Error> {
        octets.to_text()
    }
}

impl From<Vec<u8>> for Octets {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl From<&[u8]> for Octets {
    fn from(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

impl<const N: usize> From<&[u8; N]> for Octets {
    fn from(data: &[u8; N]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

impl<const N: usize> From<[u8; N]> for Octets {
    fn from(data: [u8; N]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

impl From<Octets> for Vec<u8> {
    fn from(octets: Octets) -> Self {
        octets.data
    }
}

impl AsRef<[u8]> for Octets {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Borrow<[u8]> for Octets {
    fn borrow(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for Octets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Octets({})", bytes_repr(&self.data))
    }
}

// Comparisons against plain byte containers, in both directions.

impl PartialEq<[u8]> for Octets {
    fn eq(&self, other: &[u8]) -> bool {
        self.data == other
    }
}

impl PartialEq<&[u8]> for Octets {
    fn eq(&self, other: &&[u8]) -> bool {
        self.data == *other
    }
}

impl PartialEq<Vec<u8>> for Octets {
    fn eq(&self, other: &Vec<u8>) -> bool {
        &self.data == other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Octets {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.data == other
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for Octets {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.data == *other
    }
}

impl PartialEq<Octets> for [u8] {
    fn eq(&self, other: &Octets) -> bool {
        self == other.data.as_slice()
    }
}

impl PartialEq<Octets> for &[u8] {
    fn eq(&self, other: &Octets) -> bool {
        *self == other.data.as_slice()
    }
}

impl PartialEq<Octets> for Vec<u8> {
    fn eq(&self, other: &Octets) -> bool {
        self == &other.data
    }
}

impl<const N: usize> PartialEq<Octets> for [u8; N] {
    fn eq(&self, other: &Octets) -> bool {
        self.as_slice() == other.data.as_slice()
    }
}

impl PartialOrd<[u8]> for Octets {
    fn partial_cmp(&self, other: &[u8]) -> Option<Ordering> {
        Some(self.data.as_slice().cmp(other))
    }
}

impl PartialOrd<&[u8]> for Octets {
    fn partial_cmp(&self, other: &&[u8]) -> Option<Ordering> {
        Some(self.data.as_slice().cmp(*other))
    }
}

impl PartialOrd<Vec<u8>> for Octets {
    fn partial_cmp(&self, other: &Vec<u8>) -> Option<Ordering> {
        Some(self.data.cmp(other))
    }
}

impl<const N: usize> PartialOrd<&[u8; N]> for Octets {
    fn partial_cmp(&self, other: &&[u8; N]) -> Option<Ordering> {
        Some(self.data.as_slice().cmp(other.as_slice()))
    }
}

impl PartialOrd<Octets> for [u8] {
    fn partial_cmp(&self, other: &Octets) -> Option<Ordering> {
        Some(self.cmp(other.data.as_slice()))
    }
}

impl PartialOrd<Octets> for Vec<u8> {
    fn partial_cmp(&self, other: &Octets) -> Option<Ordering> {
        Some(self.cmp(&other.data))
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;

    use serde::de::{self, SeqAccess, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Octets;

    impl Serialize for Octets {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_bytes(&self.data)
        }
    }

    struct OctetsVisitor;

    impl<'de> Visitor<'de> for OctetsVisitor {
        type Value = Octets;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a byte string")
        }

        fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Octets, E> {
            Ok(Octets::from(v))
        }

        fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Octets, E> {
            Ok(Octets::from(v))
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Octets, A::Error> {
            let mut data = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(byte) = seq.next_element::<u8>()? {
                data.push(byte);
            }
            Ok(Octets::from(data))
        }
    }

    impl<'de> Deserialize<'de> for Octets {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Octets, D::Error> {
            deserializer.deserialize_byte_buf(OctetsVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use rust_decimal::Decimal;

    #[test]
    fn numbers_become_ascii_digits() {
        assert_eq!(Octets::new(10).unwrap(), b"10");
        assert_eq!(Octets::new(-7i64).unwrap(), b"-7");
        assert_eq!(Octets::new(0.5).unwrap(), b"0.5");
        assert_eq!(Octets::new(f64::NAN).unwrap(), b"NaN");
        assert_eq!(Octets::new(f64::NEG_INFINITY).unwrap(), b"-inf");
        assert_eq!(Octets::new(Decimal::new(-1250, 3)).unwrap(), b"-1.250");
        assert_eq!(Octets::new(i128::MIN).unwrap(), i128::MIN.to_string().as_bytes());
    }

    #[test]
    fn numbers_ignore_encoding() {
        assert_eq!(
            Octets::from_value(10, Some("utf-16be"), Some("bogus")).unwrap(),
            b"10"
        );
    }

    #[test]
    fn text_needs_an_encoding() {
        assert_eq!(Octets::new("a").unwrap_err(), OctetsError::MissingEncoding);
        assert_eq!(Octets::encode("a", "utf-16be", None).unwrap(), b"\x00a");
        assert_eq!(Octets::encode("", "ascii", None).unwrap(), b"");
        assert_eq!(
            Octets::encode("a", "klingon", None).unwrap_err().kind(),
            ErrorKind::Lookup
        );
        assert_eq!(
            Octets::encode("\u{e9}", "ascii", None).unwrap_err().kind(),
            ErrorKind::Encoding
        );
        assert_eq!(
            Octets::encode("\u{e9}", "ascii", Some("replace")).unwrap(),
            b"?"
        );
        assert_eq!(
            Octets::encode("\u{e9}", "ascii", Some("")).unwrap_err().kind(),
            ErrorKind::Encoding
        );
    }

    #[test]
    fn bytes_pass_through() {
        assert_eq!(Octets::new(b"a").unwrap(), b"a");
        assert_eq!(Octets::new(vec![0u8, 255]).unwrap(), vec![0u8, 255]);
        assert_eq!(
            Octets::from_value(b"\xff", Some("ascii"), Some("strict")).unwrap(),
            b"\xff"
        );
    }

    #[test]
    fn other_sources_are_rejected() {
        for value in [
            Value::None,
            Value::Bool(true),
            Value::List(vec![Value::Bytes(b"bytes".to_vec())]),
            Value::Map(vec![(Value::Bytes(b"byte".to_vec()), Value::Int(1))]),
            Value::Map(vec![]),
            Value::Tuple(vec![]),
        ] {
            let type_name = value.type_name();
            assert_eq!(
                Octets::new(value).unwrap_err(),
                OctetsError::UnsupportedSource { type_name }
            );
        }
    }

    #[test]
    fn text_conversion_is_refused() {
        assert_eq!(Octets::from(b"bytes").to_text(), Err(OctetsError::ImplicitDecode));
        assert_eq!(
            String::try_from(&Octets::empty()).unwrap_err().kind(),
            ErrorKind::Type
        );
    }

    #[test]
    fn debug_shows_escaped_literal() {
        assert_eq!(format!("{:?}", Octets::from(b"abc")), "Octets(b'abc')");
        assert_eq!(format!("{:?}", Octets::from(b"\x00'")), "Octets(b\"\\x00'\")");
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = Octets::from(b"ab");
        let b = Octets::from(b"abc");
        let c = Octets::from(b"b");
        assert!(a < b && b < c);
        assert!(a <= a.clone() && a >= a.clone());
        assert!(a != b);
        assert!(a < b"abc".as_slice());
        assert!(Octets::from(&[0xff]) > vec![0x00, 0xff]);
        assert!(b"ab".to_vec() == a);
        assert!(b"ab"[..] == a);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip_through_json() {
        let o = Octets::from(b"hi");
        let json = serde_json::to_string(&o).unwrap();
        assert_eq!(json, "[104,105]");
        let back: Octets = serde_json::from_str(&json).unwrap();
        assert_eq!(back, o);
    }
}
