/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for the fixline FIX protocol engine.
//!
//! This module provides a unified error hierarchy using `thiserror` for typed,
//! domain-specific errors across all fixline operations.
//!
//! Sequence mismatches are deliberately absent here: they are advisory and
//! reported through the session layer's check result, not raised as errors on
//! the decode path.

use thiserror::Error;

/// Result type alias using [`FixError`] as the error type.
pub type Result<T> = std::result::Result<T, FixError>;

/// Top-level error type for all fixline operations.
#[derive(Debug, Error)]
pub enum FixError {
    /// Error while assembling or querying a message.
    #[error("message error: {0}")]
    Message(#[from] MessageError),

    /// Error during message decoding.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error during message encoding.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Error in session layer operations.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// I/O error from underlying transport.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the message model itself, independent of the wire.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// The tag number is not a valid field tag (tags must be positive).
    #[error("invalid tag number: {tag}")]
    InvalidTag {
        /// The offending tag number.
        tag: u32,
    },

    /// A lookup expected a plain field but the first fragment with that tag
    /// is a repeating group.
    #[error("tag {tag} is not a field")]
    NotAField {
        /// The tag number that was queried.
        tag: u32,
    },

    /// A field value cannot be parsed as its declared type.
    #[error("invalid value for tag {tag}: {reason}")]
    InvalidFieldValue {
        /// The tag number of the field.
        tag: u32,
        /// Description of why the value is invalid.
        reason: String,
    },
}

/// Errors that occur during FIX message decoding.
///
/// All variants except [`DecodeError::ChecksumMismatch`] describe a
/// structurally broken frame; a checksum mismatch means the frame was intact
/// but the bytes are corrupt, and callers must treat the two differently.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Message buffer is incomplete, need more data.
    #[error("incomplete message, need more data")]
    Incomplete,

    /// The message does not start with a BeginString field (tag 8).
    #[error("invalid begin string: message must start with 8=")]
    InvalidBeginString,

    /// BeginString is not followed by a BodyLength field (tag 9).
    #[error("missing body length field (tag 9)")]
    MissingBodyLength,

    /// Invalid BodyLength value.
    #[error("invalid body length value")]
    InvalidBodyLength,

    /// The declared body length does not land on the CheckSum field.
    #[error("body length does not end at checksum field (tag 10)")]
    BodyLengthMismatch,

    /// Checksum mismatch between calculated and declared values.
    #[error("checksum mismatch: calculated {calculated}, declared {declared}")]
    ChecksumMismatch {
        /// Calculated checksum value.
        calculated: u8,
        /// Declared checksum value in message.
        declared: u8,
    },

    /// Invalid tag format (not a valid integer).
    #[error("invalid tag format: {0}")]
    InvalidTag(String),

    /// Repeating group holds fewer instances than its count field declares.
    #[error("group count mismatch for tag {count_tag}: expected {expected}, found {actual}")]
    GroupCountMismatch {
        /// The tag containing the group count.
        count_tag: u32,
        /// Expected number of group entries.
        expected: usize,
        /// Actual number of group entries found.
        actual: usize,
    },

    /// Invalid UTF-8 in string field.
    #[error("invalid utf-8 in field: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// A parsed field could not be placed into the message model.
    #[error(transparent)]
    Message(#[from] MessageError),
}

/// Errors that occur during FIX message encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A required header field is missing at encode time.
    #[error("missing required field: {name} (tag {tag})")]
    MissingRequiredField {
        /// The tag number of the missing field.
        tag: u32,
        /// The field name.
        name: &'static str,
    },
}

/// Errors in FIX session layer operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No established session exists for the connection.
    #[error("session not established")]
    NotEstablished,

    /// Operation attempted on a closed session.
    #[error("session is closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::ChecksumMismatch {
            calculated: 100,
            declared: 200,
        };
        assert_eq!(
            err.to_string(),
            "checksum mismatch: calculated 100, declared 200"
        );
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::MissingRequiredField {
            tag: 49,
            name: "SenderCompID",
        };
        assert_eq!(
            err.to_string(),
            "missing required field: SenderCompID (tag 49)"
        );
    }

    #[test]
    fn test_fix_error_from_decode() {
        let decode_err = DecodeError::Incomplete;
        let fix_err: FixError = decode_err.into();
        assert!(matches!(fix_err, FixError::Decode(DecodeError::Incomplete)));
    }

    #[test]
    fn test_message_error_into_decode() {
        let err = MessageError::InvalidFieldValue {
            tag: 34,
            reason: "not a number".to_string(),
        };
        let decode_err: DecodeError = err.into();
        assert!(matches!(decode_err, DecodeError::Message(_)));
    }

    #[test]
    fn test_session_error_display() {
        assert_eq!(SessionError::Closed.to_string(), "session is closed");
        assert_eq!(
            SessionError::NotEstablished.to_string(),
            "session not established"
        );
    }
}
