//! Painless, predictable byte strings.
//!
//! [`Octets`] is an immutable byte string with exactly one way in: numbers
//! become their ASCII digits, text is encoded with an encoding you must
//! name, and bytes are taken as they are. Everything else is refused.
//!
//! # Overview
//!
//! - Indexing and iteration always yield one-byte [`Octets`], never bare
//!   integers ([`Octets::get`], [`Octets::item`], [`Octets::iter`]).
//! - Slicing follows dynamic-language slice rules ([`SliceSpec`]).
//! - `%`-templates interpolate bytes and numbers without any implicit text
//!   round-trip ([`Octets::format`], or the `%` operator).
//! - There is no implicit way back to text: [`Octets::to_text`] always
//!   fails, [`Octets::decode`] names the encoding.
//!
//! # Example
//!
//! ```
//! use octets::Octets;
//!
//! let name = Octets::encode("caf\u{e9}", "utf-8", None).unwrap();
//! let line = (&Octets::from(b"%b: %d") % (&name, 3)).unwrap();
//! assert_eq!(line, b"caf\xc3\xa9: 3");
//!
//! assert_eq!(line.get(0).unwrap(), b"c");
//! assert_eq!(line.iter().count(), line.len());
//! assert!(line.to_text().is_err());
//! ```

mod buffer;
pub mod charmap;
mod encoding;
mod error;
mod index;
mod octets;
mod printf;
mod repr;
mod template;
mod value;

pub use encoding::{Encoding, ErrorPolicy};
pub use error::{ErrorKind, OctetsError};
pub use index::{Iter, Key, SliceSpec};
pub use octets::Octets;
pub use repr::{bytes_repr, hex};
pub use template::rewrite_bytes_placeholders;
pub use value::Value;
