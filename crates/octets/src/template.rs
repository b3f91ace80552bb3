//! Percent-style interpolation into octets templates.
//!
//! The template bytes are mapped 1:1 onto code points, `%b` placeholders
//! are rewritten to `%s`, the text formatter runs, and the result is mapped
//! back. Byte arguments take the same 1:1 route, so no codec ever decodes
//! or encodes anything along the way. Text arguments are refused outright.

use std::borrow::Cow;
use std::ops::Rem;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::charmap;
use crate::printf::{self, Arg, Args};
use crate::{Octets, OctetsError, Value};

/// `%%` escapes, or a byte placeholder with its optional key, flags, width,
/// precision and length modifier.
const BYTES_PLACEHOLDER: &str =
    r"%%|%(\([^)]*\))?([-+ #0]*(?:\*|\d+)?(?:\.(?:\*|\d*))?[hlL]?)b";

fn bytes_placeholder() -> Result<&'static Regex, OctetsError> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(BYTES_PLACEHOLDER).ok())
        .as_ref()
        .ok_or(OctetsError::InvalidPattern)
}

/// Rewrites `%b` and `%(name)b` placeholders (with any flags) to their
/// `%s` equivalents, leaving `%%` escapes alone.
///
/// # Example
///
/// ```
/// use octets::rewrite_bytes_placeholders;
///
/// assert_eq!(rewrite_bytes_placeholders("%b|%(k)-4b|%%b").unwrap(), "%s|%(k)-4s|%%b");
/// ```
pub fn rewrite_bytes_placeholders(template: &str) -> Result<Cow<'_, str>, OctetsError> {
    let mut rewritten = 0usize;
    let out = bytes_placeholder()?.replace_all(template, |caps: &Captures<'_>| {
        if &caps[0] == "%%" {
            return "%%".to_owned();
        }
        rewritten += 1;
        let key = caps.get(1).map_or("", |m| m.as_str());
        format!("%{key}{}s", &caps[2])
    });
    if rewritten > 0 {
        tracing::trace!(rewritten, "rewrote byte placeholders");
    }
    Ok(out)
}

fn to_arg(value: Value) -> Result<Arg, OctetsError> {
    match value {
        Value::Text(_) => Err(OctetsError::ImplicitEncode),
        Value::Bytes(bytes) => Ok(Arg::Bytes(bytes)),
        other => Ok(Arg::Other(other)),
    }
}

/// Shapes the argument value: a tuple is positional, a map is keyed (and
/// also usable whole), anything else is one positional argument.
fn collect_args(args: Value) -> Result<Args, OctetsError> {
    match args {
        Value::Tuple(items) => Ok(Args {
            positional: items.into_iter().map(to_arg).collect::<Result<_, _>>()?,
            mapping: None,
        }),
        Value::Map(entries) => {
            let mut mapping = Vec::with_capacity(entries.len());
            for (key, value) in &entries {
                let key = match key {
                    Value::Bytes(raw) => Some(charmap::decode(raw)),
                    Value::Text(_) => return Err(OctetsError::ImplicitEncode),
                    // Never matched by a `%(name)` directive.
                    _ => None,
                };
                let value = to_arg(value.clone())?;
                if let Some(key) = key {
                    mapping.push((key, value));
                }
            }
            Ok(Args {
                positional: vec![Arg::Other(Value::Map(entries))],
                mapping: Some(mapping),
            })
        }
        single => Ok(Args {
            positional: vec![to_arg(single)?],
            mapping: None,
        }),
    }
}

impl Octets {
    /// Interpolates `args` into `self`, used as a percent-style template.
    ///
    /// `args` is a tuple for positional directives, a map with byte keys
    /// for `%(name)` directives, or a single value. Bytes go in verbatim
    /// (`%s` or `%b`); numbers format as usual (`%d`, `%x`, `%f`, ...).
    /// Text arguments fail: they would need an implicit encoding.
    ///
    /// # Example
    ///
    /// ```
    /// use octets::Octets;
    ///
    /// let t = Octets::from(b"%b=%03d");
    /// assert_eq!(t.format((b"x", 7)).unwrap(), b"x=007");
    /// assert!(t.format(("x", 7)).is_err());
    /// ```
    pub fn format(&self, args: impl Into<Value>) -> Result<Octets, OctetsError> {
        let args = collect_args(args.into())?;
        let template = charmap::decode(self.raw_bytes());
        let template = rewrite_bytes_placeholders(&template)?;
        let formatted = printf::format(&template, &args)?;
        Ok(Octets::from(charmap::encode(&formatted)?))
    }
}

impl<T: Into<Value>> Rem<T> for &Octets {
    type Output = Result<Octets, OctetsError>;

    fn rem(self, args: T) -> Self::Output {
        self.format(args)
    }
}

impl<T: Into<Value>> Rem<T> for Octets {
    type Output = Result<Octets, OctetsError>;

    fn rem(self, args: T) -> Self::Output {
        self.format(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use std::collections::BTreeMap;

    fn rewrite(template: &str) -> Cow<'_, str> {
        rewrite_bytes_placeholders(template).unwrap()
    }

    #[test]
    fn placeholder_pattern_compiles() {
        assert!(bytes_placeholder().is_ok());
    }

    #[test]
    fn rewrite_matrix() {
        assert_eq!(rewrite("plain"), "plain");
        assert_eq!(rewrite("%b"), "%s");
        assert_eq!(rewrite("%(name)b"), "%(name)s");
        assert_eq!(rewrite("%-10.3b"), "%-10.3s");
        assert_eq!(rewrite("%*b"), "%*s");
        assert_eq!(rewrite("%%b"), "%%b");
        assert_eq!(rewrite("%%%b"), "%%%s");
        assert_eq!(rewrite("%d b"), "%d b");
        assert!(matches!(rewrite("no placeholders"), Cow::Borrowed(_)));
    }

    #[test]
    fn empty_tuple_leaves_template_unchanged() {
        assert_eq!(Octets::from(b"abc").format(()).unwrap(), b"abc");
        assert_eq!((&Octets::from(b"abc") % ()).unwrap(), b"abc");
    }

    #[test]
    fn bytes_survive_untouched() {
        let all: Vec<u8> = (0..=255).collect();
        let t = Octets::from(b"<%b>");
        let mut expected = b"<".to_vec();
        expected.extend_from_slice(&all);
        expected.push(b'>');
        assert_eq!(t.format(all.clone()).unwrap(), expected);

        let binary_template = Octets::from(vec![0xff, b'%', b's', 0x00]);
        assert_eq!(
            binary_template.format(b"\x80").unwrap(),
            vec![0xff, 0x80, 0x00]
        );
    }

    #[test]
    fn text_arguments_are_refused() {
        let t = Octets::from(b"%s");
        assert_eq!(t.format("x").unwrap_err(), OctetsError::ImplicitEncode);
        assert_eq!(t.format(("x",)).unwrap_err(), OctetsError::ImplicitEncode);
        let mut m = BTreeMap::new();
        m.insert("k", 1);
        assert_eq!(
            Octets::from(b"%(k)d").format(m).unwrap_err(),
            OctetsError::ImplicitEncode
        );
        let mut m = BTreeMap::new();
        m.insert(b"k".to_vec(), "v");
        assert_eq!(
            Octets::from(b"%(k)s").format(m).unwrap_err().kind(),
            ErrorKind::Type
        );
    }

    #[test]
    fn numbers_pass_through() {
        let t = Octets::from(b"%d %x %.2f %s");
        assert_eq!(t.format((10, 255, 0.5, 3)).unwrap(), b"10 ff 0.50 3");
        assert_eq!((Octets::from(b"%d") % 42).unwrap(), b"42");
    }

    #[test]
    fn named_placeholders() {
        let mut m = BTreeMap::new();
        m.insert(b"name".to_vec(), Value::Bytes(b"world".to_vec()));
        m.insert(b"n".to_vec(), Value::Int(3));
        let t = Octets::from(b"hello %(name)b x%(n)d");
        assert_eq!(t.format(m).unwrap(), b"hello world x3");
    }

    #[test]
    fn single_mapping_renders_whole() {
        let mut m = BTreeMap::new();
        m.insert(b"a".to_vec(), 1);
        assert_eq!(Octets::from(b"%s").format(m).unwrap(), b"{b'a': 1}");
    }

    #[test]
    fn unencodable_rendering_fails_cleanly() {
        let nested = Value::List(vec![Value::Text("\u{20ac}".into())]);
        assert_eq!(
            Octets::from(b"%s").format((nested,)).unwrap_err().kind(),
            ErrorKind::Encoding
        );
    }
}
