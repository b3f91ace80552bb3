//! Error type shared by every fallible octets operation.

use thiserror::Error;

/// Coarse classification of an [`OctetsError`].
///
/// Callers that only care about the family of a failure (wrong type,
/// unencodable text, bad index, ...) match on this instead of on the
/// individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value of the wrong type reached an operation.
    Type,
    /// Text could not be encoded, or bytes could not be decoded.
    Encoding,
    /// An integer index fell outside the sequence.
    Index,
    /// A value had the right type but an unusable content.
    Value,
    /// A named template placeholder had no matching argument.
    Key,
    /// An encoding or error-policy name is not known.
    Lookup,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OctetsError {
    #[error("cannot convert object of type {type_name} to octets")]
    UnsupportedSource { type_name: &'static str },
    #[error("string argument without an encoding")]
    MissingEncoding,
    #[error("cannot implicitly decode octets")]
    ImplicitDecode,
    #[error("cannot implicitly encode text")]
    ImplicitEncode,
    #[error("octets indices must be integers, not {type_name}")]
    IndexType { type_name: &'static str },
    #[error("index {index} out of range for octets of length {len}")]
    IndexOutOfRange { index: isize, len: usize },
    #[error("slice step cannot be zero")]
    ZeroStep,
    #[error("empty separator")]
    EmptySeparator,
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),
    #[error("unknown error handler name '{0}'")]
    UnknownErrorPolicy(String),
    #[error("'{encoding}' codec can't encode character {character:?} in position {position}: {reason}")]
    Encode {
        encoding: &'static str,
        character: char,
        position: usize,
        reason: &'static str,
    },
    #[error("'{encoding}' codec can't decode byte 0x{byte:02x} in position {position}: {reason}")]
    Decode {
        encoding: &'static str,
        byte: u8,
        position: usize,
        reason: &'static str,
    },
    #[error("incomplete format")]
    IncompleteFormat,
    #[error("unsupported format character {character:?} (0x{code:x}) at index {index}")]
    UnsupportedFormatChar {
        character: char,
        code: u32,
        index: usize,
    },
    #[error("not enough arguments for format string")]
    NotEnoughArguments,
    #[error("not all arguments converted during octets formatting")]
    UnconvertedArguments,
    #[error("format requires a mapping")]
    MappingRequired,
    #[error("format key {0} not found")]
    MissingKey(String),
    #[error("%{conversion} format: {expected} is required, not {type_name}")]
    ArgumentType {
        conversion: char,
        expected: &'static str,
        type_name: &'static str,
    },
    #[error("* wants int, not {type_name}")]
    StarArgument { type_name: &'static str },
    #[error("%c requires an integer in range(256) or a single byte")]
    CharRange,
    #[error("cannot convert float {0} to integer")]
    NonFiniteInteger(String),
    #[error("cannot convert decimal {0} to float")]
    DecimalToFloat(String),
    #[error("{field} too big")]
    FieldTooBig { field: &'static str },
    #[error("byte placeholder pattern failed to compile")]
    InvalidPattern,
}

impl OctetsError {
    /// Returns the family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OctetsError::UnsupportedSource { .. }
            | OctetsError::MissingEncoding
            | OctetsError::ImplicitDecode
            | OctetsError::ImplicitEncode
            | OctetsError::IndexType { .. }
            | OctetsError::NotEnoughArguments
            | OctetsError::UnconvertedArguments
            | OctetsError::MappingRequired
            | OctetsError::ArgumentType { .. }
            | OctetsError::StarArgument { .. } => ErrorKind::Type,
            OctetsError::Encode { .. } | OctetsError::Decode { .. } => ErrorKind::Encoding,
            OctetsError::IndexOutOfRange { .. } => ErrorKind::Index,
            OctetsError::ZeroStep
            | OctetsError::EmptySeparator
            | OctetsError::IncompleteFormat
            | OctetsError::UnsupportedFormatChar { .. }
            | OctetsError::CharRange
            | OctetsError::NonFiniteInteger(_)
            | OctetsError::DecimalToFloat(_)
            | OctetsError::FieldTooBig { .. }
            | OctetsError::InvalidPattern => ErrorKind::Value,
            OctetsError::MissingKey(_) => ErrorKind::Key,
            OctetsError::UnknownEncoding(_) | OctetsError::UnknownErrorPolicy(_) => {
                ErrorKind::Lookup
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(OctetsError::MissingEncoding.kind(), ErrorKind::Type);
        assert_eq!(OctetsError::ImplicitDecode.kind(), ErrorKind::Type);
        assert_eq!(
            OctetsError::IndexOutOfRange { index: 5, len: 3 }.kind(),
            ErrorKind::Index
        );
        assert_eq!(OctetsError::ZeroStep.kind(), ErrorKind::Value);
        assert_eq!(
            OctetsError::FieldTooBig { field: "width" }.to_string(),
            "width too big"
        );
        assert_eq!(OctetsError::MissingKey("b'a'".into()).kind(), ErrorKind::Key);
        assert_eq!(
            OctetsError::UnknownEncoding("klingon".into()).kind(),
            ErrorKind::Lookup
        );
    }

    #[test]
    fn encode_message_names_codec_and_position() {
        let err = OctetsError::Encode {
            encoding: "ascii",
            character: '\u{e9}',
            position: 3,
            reason: "ordinal not in range(128)",
        };
        assert_eq!(err.kind(), ErrorKind::Encoding);
        assert_eq!(
            err.to_string(),
            "'ascii' codec can't encode character '\u{e9}' in position 3: ordinal not in range(128)"
        );
    }
}
