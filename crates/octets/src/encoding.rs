//! Named text encodings and their error policies.

use std::fmt::Write;
use std::str::FromStr;

use crate::OctetsError;

/// A named mapping between text and bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Ascii,
    Latin1,
    Utf8,
    /// Byte order mark followed by little-endian units.
    Utf16,
    Utf16Le,
    Utf16Be,
    /// Byte order mark followed by little-endian units.
    Utf32,
    Utf32Le,
    Utf32Be,
}

/// What an encoder does when it meets a character it cannot represent
/// (or a decoder meets bytes it cannot read).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorPolicy {
    #[default]
    Strict,
    Ignore,
    Replace,
    BackslashReplace,
    XmlCharRefReplace,
}

/// Case-folds an encoding name and unifies the separators.
fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

impl Encoding {
    /// Resolves an encoding name or one of its aliases.
    ///
    /// # Example
    ///
    /// ```
    /// use octets::Encoding;
    ///
    /// assert_eq!(Encoding::lookup("UTF_16BE").unwrap(), Encoding::Utf16Be);
    /// assert_eq!(Encoding::lookup("latin1").unwrap(), Encoding::Latin1);
    /// assert!(Encoding::lookup("klingon").is_err());
    /// ```
    pub fn lookup(name: &str) -> Result<Self, OctetsError> {
        let encoding = match normalize(name).as_str() {
            "ascii" | "us-ascii" | "646" => Encoding::Ascii,
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" | "l1" => Encoding::Latin1,
            "utf-8" | "utf8" | "u8" => Encoding::Utf8,
            "utf-16" | "utf16" | "u16" => Encoding::Utf16,
            "utf-16le" | "utf-16-le" => Encoding::Utf16Le,
            "utf-16be" | "utf-16-be" => Encoding::Utf16Be,
            "utf-32" | "utf32" | "u32" => Encoding::Utf32,
            "utf-32le" | "utf-32-le" => Encoding::Utf32Le,
            "utf-32be" | "utf-32-be" => Encoding::Utf32Be,
            _ => return Err(OctetsError::UnknownEncoding(name.to_owned())),
        };
        Ok(encoding)
    }

    /// Canonical name, as used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin-1",
            Encoding::Utf8 => "utf-8",
            Encoding::Utf16 => "utf-16",
            Encoding::Utf16Le => "utf-16-le",
            Encoding::Utf16Be => "utf-16-be",
            Encoding::Utf32 => "utf-32",
            Encoding::Utf32Le => "utf-32-le",
            Encoding::Utf32Be => "utf-32-be",
        }
    }

    /// Highest code point a single-byte charset can hold.
    fn charset_limit(self) -> Option<(u32, &'static str)> {
        match self {
            Encoding::Ascii => Some((0x7f, "ordinal not in range(128)")),
            Encoding::Latin1 => Some((0xff, "ordinal not in range(256)")),
            _ => None,
        }
    }

    /// Encodes `text`, applying `policy` to unencodable characters.
    ///
    /// # Example
    ///
    /// ```
    /// use octets::{Encoding, ErrorPolicy};
    ///
    /// let bytes = Encoding::Ascii.encode("caf\u{e9}", ErrorPolicy::Replace).unwrap();
    /// assert_eq!(bytes, b"caf?");
    /// ```
    pub fn encode(self, text: &str, policy: ErrorPolicy) -> Result<Vec<u8>, OctetsError> {
        let out = match self {
            Encoding::Ascii | Encoding::Latin1 => return self.encode_charset(text, policy),
            Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Utf16 => {
                let mut out = vec![0xff, 0xfe];
                out.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
                out
            }
            Encoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Encoding::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Encoding::Utf32 => {
                let mut out = vec![0xff, 0xfe, 0x00, 0x00];
                out.extend(text.chars().flat_map(|c| u32::from(c).to_le_bytes()));
                out
            }
            Encoding::Utf32Le => text
                .chars()
                .flat_map(|c| u32::from(c).to_le_bytes())
                .collect(),
            Encoding::Utf32Be => text
                .chars()
                .flat_map(|c| u32::from(c).to_be_bytes())
                .collect(),
        };
        Ok(out)
    }

    fn encode_charset(self, text: &str, policy: ErrorPolicy) -> Result<Vec<u8>, OctetsError> {
        let Some((limit, reason)) = self.charset_limit() else {
            return self.encode(text, policy);
        };
        let mut out = Vec::with_capacity(text.len());
        let mut substituted = 0usize;
        for (position, c) in text.chars().enumerate() {
            let code = u32::from(c);
            if code <= limit {
                out.push(code as u8);
                continue;
            }
            substituted += 1;
            match policy {
                ErrorPolicy::Strict => {
                    return Err(OctetsError::Encode {
                        encoding: self.name(),
                        character: c,
                        position,
                        reason,
                    });
                }
                ErrorPolicy::Ignore => {}
                ErrorPolicy::Replace => out.push(b'?'),
                ErrorPolicy::BackslashReplace => {
                    out.extend_from_slice(escape_code_point(code).as_bytes());
                }
                ErrorPolicy::XmlCharRefReplace => {
                    out.extend_from_slice(format!("&#{code};").as_bytes());
                }
            }
        }
        if substituted > 0 {
            tracing::trace!(
                encoding = self.name(),
                policy = policy.name(),
                substituted,
                "replaced unencodable characters"
            );
        }
        Ok(out)
    }

    /// Decodes `bytes`, applying `policy` to undecodable input.
    ///
    /// `XmlCharRefReplace` only applies to encoding and is refused here.
    pub fn decode(self, bytes: &[u8], policy: ErrorPolicy) -> Result<String, OctetsError> {
        if policy == ErrorPolicy::XmlCharRefReplace {
            return Err(OctetsError::UnknownErrorPolicy(policy.name().to_owned()));
        }
        let mut decoder = Decoder {
            encoding: self,
            policy,
            out: String::with_capacity(bytes.len()),
            substituted: 0,
        };
        match self {
            Encoding::Ascii => {
                for (position, &b) in bytes.iter().enumerate() {
                    if b.is_ascii() {
                        decoder.out.push(char::from(b));
                    } else {
                        decoder.fail(&[b], position, "ordinal not in range(128)")?;
                    }
                }
            }
            Encoding::Latin1 => decoder.out.extend(bytes.iter().map(|&b| char::from(b))),
            Encoding::Utf8 => decoder.utf8(bytes)?,
            Encoding::Utf16 => match bytes {
                [0xff, 0xfe, rest @ ..] => decoder.utf16(rest, 2, false)?,
                [0xfe, 0xff, rest @ ..] => decoder.utf16(rest, 2, true)?,
                _ => decoder.utf16(bytes, 0, false)?,
            },
            Encoding::Utf16Le => decoder.utf16(bytes, 0, false)?,
            Encoding::Utf16Be => decoder.utf16(bytes, 0, true)?,
            Encoding::Utf32 => match bytes {
                [0xff, 0xfe, 0x00, 0x00, rest @ ..] => decoder.utf32(rest, 4, false)?,
                [0x00, 0x00, 0xfe, 0xff, rest @ ..] => decoder.utf32(rest, 4, true)?,
                _ => decoder.utf32(bytes, 0, false)?,
            },
            Encoding::Utf32Le => decoder.utf32(bytes, 0, false)?,
            Encoding::Utf32Be => decoder.utf32(bytes, 0, true)?,
        }
        if decoder.substituted > 0 {
            tracing::trace!(
                encoding = self.name(),
                policy = policy.name(),
                substituted = decoder.substituted,
                "replaced undecodable bytes"
            );
        }
        Ok(decoder.out)
    }
}

impl FromStr for Encoding {
    type Err = OctetsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::lookup(s)
    }
}

impl ErrorPolicy {
    /// Resolves an error-policy name.
    pub fn lookup(name: &str) -> Result<Self, OctetsError> {
        let policy = match name {
            "strict" => ErrorPolicy::Strict,
            "ignore" => ErrorPolicy::Ignore,
            "replace" => ErrorPolicy::Replace,
            "backslashreplace" => ErrorPolicy::BackslashReplace,
            "xmlcharrefreplace" => ErrorPolicy::XmlCharRefReplace,
            _ => return Err(OctetsError::UnknownErrorPolicy(name.to_owned())),
        };
        Ok(policy)
    }

    /// Resolves an optional policy name; absent or empty means `Strict`.
    pub fn lookup_optional(name: Option<&str>) -> Result<Self, OctetsError> {
        match name {
            None | Some("") => Ok(ErrorPolicy::Strict),
            Some(name) => ErrorPolicy::lookup(name),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorPolicy::Strict => "strict",
            ErrorPolicy::Ignore => "ignore",
            ErrorPolicy::Replace => "replace",
            ErrorPolicy::BackslashReplace => "backslashreplace",
            ErrorPolicy::XmlCharRefReplace => "xmlcharrefreplace",
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = OctetsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorPolicy::lookup(s)
    }
}

fn escape_code_point(code: u32) -> String {
    if code <= 0xff {
        format!("\\x{code:02x}")
    } else if code <= 0xffff {
        format!("\\u{code:04x}")
    } else {
        format!("\\U{code:08x}")
    }
}

struct Decoder {
    encoding: Encoding,
    policy: ErrorPolicy,
    out: String,
    substituted: usize,
}

impl Decoder {
    /// Applies the policy to one undecodable run of bytes.
    fn fail(&mut self, bad: &[u8], position: usize, reason: &'static str) -> Result<(), OctetsError> {
        self.substituted += 1;
        match self.policy {
            ErrorPolicy::Strict | ErrorPolicy::XmlCharRefReplace => Err(OctetsError::Decode {
                encoding: self.encoding.name(),
                byte: bad.first().copied().unwrap_or_default(),
                position,
                reason,
            }),
            ErrorPolicy::Ignore => Ok(()),
            ErrorPolicy::Replace => {
                self.out.push(char::REPLACEMENT_CHARACTER);
                Ok(())
            }
            ErrorPolicy::BackslashReplace => {
                for &b in bad {
                    let _ = write!(self.out, "\\x{b:02x}");
                }
                Ok(())
            }
        }
    }

    fn utf8(&mut self, mut bytes: &[u8]) -> Result<(), OctetsError> {
        let mut offset = 0;
        loop {
            match std::str::from_utf8(bytes) {
                Ok(valid) => {
                    self.out.push_str(valid);
                    return Ok(());
                }
                Err(e) => {
                    let (valid, rest) = bytes.split_at(e.valid_up_to());
                    // `valid` was just checked by `from_utf8`.
                    self.out.push_str(&String::from_utf8_lossy(valid));
                    let (bad_len, reason) = match e.error_len() {
                        Some(len) if is_utf8_lead(rest[0]) => (len, "invalid continuation byte"),
                        Some(len) => (len, "invalid start byte"),
                        None => (rest.len(), "unexpected end of data"),
                    };
                    self.fail(&rest[..bad_len], offset + valid.len(), reason)?;
                    offset += valid.len() + bad_len;
                    bytes = &rest[bad_len..];
                }
            }
        }
    }

    fn utf16(&mut self, bytes: &[u8], base: usize, big_endian: bool) -> Result<(), OctetsError> {
        let chunks = bytes.chunks_exact(2);
        let tail = chunks.remainder();
        let units: Vec<u16> = chunks
            .map(|pair| {
                let pair = [pair[0], pair[1]];
                if big_endian {
                    u16::from_be_bytes(pair)
                } else {
                    u16::from_le_bytes(pair)
                }
            })
            .collect();
        let mut unit_index = 0;
        for decoded in char::decode_utf16(units.iter().copied()) {
            match decoded {
                Ok(c) => {
                    self.out.push(c);
                    unit_index += c.len_utf16();
                }
                Err(_) => {
                    let position = base + unit_index * 2;
                    self.fail(&bytes[unit_index * 2..unit_index * 2 + 2], position, "illegal encoding")?;
                    unit_index += 1;
                }
            }
        }
        if !tail.is_empty() {
            self.fail(tail, base + bytes.len() - tail.len(), "truncated data")?;
        }
        Ok(())
    }

    fn utf32(&mut self, bytes: &[u8], base: usize, big_endian: bool) -> Result<(), OctetsError> {
        let chunks = bytes.chunks_exact(4);
        let tail = chunks.remainder();
        for (index, quad) in chunks.enumerate() {
            let quad = [quad[0], quad[1], quad[2], quad[3]];
            let code = if big_endian {
                u32::from_be_bytes(quad)
            } else {
                u32::from_le_bytes(quad)
            };
            match char::from_u32(code) {
                Some(c) => self.out.push(c),
                None => self.fail(&quad, base + index * 4, "code point not in range(0x110000)")?,
            }
        }
        if !tail.is_empty() {
            self.fail(tail, base + bytes.len() - tail.len(), "truncated data")?;
        }
        Ok(())
    }
}

fn is_utf8_lead(b: u8) -> bool {
    matches!(b, 0xc2..=0xf4)
}
