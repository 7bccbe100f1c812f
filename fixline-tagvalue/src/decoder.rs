/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX message decoder.
//!
//! Structural inverse of the encoder: validates the 8/9/.../10 framing,
//! recomputes the checksum over the framed bytes, and rebuilds a
//! [`FixMessage`] by dispatching each parsed tag through the message model's
//! classification. Repeating groups are reconstructed from the field
//! registry's membership sets, never by guessing delimiters.

use crate::frame::{EQUALS, SOH, checksum, parse_checksum};
use fixline_core::error::{DecodeError, MessageError};
use fixline_core::field::{Field, Group, GroupField};
use fixline_core::message::FixMessage;
use fixline_core::registry::{self, tags};
use memchr::memchr;

/// FIX message decoder over a byte buffer.
#[derive(Debug)]
pub struct Decoder<'a> {
    /// Input buffer.
    input: &'a [u8],
    /// Current position in the buffer.
    offset: usize,
    /// Whether to validate checksums.
    validate_checksum: bool,
}

/// A parsed tag=value pair borrowed from the input buffer.
#[derive(Debug, Clone, Copy)]
struct TagValue<'a> {
    tag: u32,
    value: &'a [u8],
}

impl<'a> TagValue<'a> {
    fn as_str(&self) -> Result<&'a str, DecodeError> {
        std::str::from_utf8(self.value).map_err(DecodeError::from)
    }
}

impl<'a> Decoder<'a> {
    /// Creates a new decoder for the given input buffer.
    ///
    /// # Arguments
    /// * `input` - The FIX message bytes to decode
    #[inline]
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            offset: 0,
            validate_checksum: true,
        }
    }

    /// Sets whether to validate checksums during decoding.
    ///
    /// # Arguments
    /// * `validate` - Whether to validate checksums
    #[inline]
    #[must_use]
    pub const fn with_checksum_validation(mut self, validate: bool) -> Self {
        self.validate_checksum = validate;
        self
    }

    /// Decodes one complete FIX message from the buffer.
    ///
    /// The first two fields must be BeginString (8) and BodyLength (9); the
    /// declared body length must land exactly on the CheckSum (10) field.
    ///
    /// # Errors
    /// - Framing violations surface as the structural [`DecodeError`]
    ///   variants ([`DecodeError::InvalidBeginString`],
    ///   [`DecodeError::MissingBodyLength`],
    ///   [`DecodeError::BodyLengthMismatch`], ...)
    /// - A checksum that recomputes differently is
    ///   [`DecodeError::ChecksumMismatch`], distinct from every structural
    ///   fault
    pub fn decode(&mut self) -> Result<FixMessage, DecodeError> {
        let start = self.offset;

        let begin_string = self.next_field()?.ok_or(DecodeError::Incomplete)?;
        if begin_string.tag != tags::BEGIN_STRING {
            return Err(DecodeError::InvalidBeginString);
        }

        let body_length_field = self.next_field()?.ok_or(DecodeError::MissingBodyLength)?;
        if body_length_field.tag != tags::BODY_LENGTH {
            return Err(DecodeError::MissingBodyLength);
        }
        let body_length: usize = body_length_field
            .as_str()?
            .parse()
            .map_err(|_| DecodeError::InvalidBodyLength)?;

        let body_start = self.offset;
        let body_end = body_start
            .checked_add(body_length)
            .ok_or(DecodeError::InvalidBodyLength)?;
        if body_end > self.input.len() {
            return Err(DecodeError::Incomplete);
        }

        // The checksum field must begin exactly where the body ends.
        let tail = &self.input[body_end..];
        if tail.len() < 7 {
            return Err(DecodeError::Incomplete);
        }
        if &tail[..3] != b"10=" {
            return Err(DecodeError::BodyLengthMismatch);
        }
        let declared =
            parse_checksum(&tail[3..6]).ok_or_else(|| invalid_value(10, "malformed checksum"))?;
        if tail[6] != SOH {
            return Err(DecodeError::BodyLengthMismatch);
        }

        if self.validate_checksum {
            let calculated = checksum(&self.input[start..body_end]);
            if calculated != declared {
                return Err(DecodeError::ChecksumMismatch {
                    calculated,
                    declared,
                });
            }
        }

        let fields = collect_fields(&self.input[body_start..body_end])?;
        self.offset = body_end + 7;

        let mut msg = FixMessage::new();
        msg.add(tags::BEGIN_STRING, begin_string.as_str()?)
            .map_err(DecodeError::from)?;
        build_body(&mut msg, &fields)?;
        msg.add(tags::CHECK_SUM, std::str::from_utf8(&tail[3..6])?)
            .map_err(DecodeError::from)?;

        Ok(msg)
    }

    /// Parses the next tag=value field at the current offset.
    fn next_field(&mut self) -> Result<Option<TagValue<'a>>, DecodeError> {
        if self.offset >= self.input.len() {
            return Ok(None);
        }

        let remaining = &self.input[self.offset..];
        let Some(eq_pos) = memchr(EQUALS, remaining) else {
            return Ok(None);
        };
        let tag = parse_tag(&remaining[..eq_pos])
            .ok_or_else(|| DecodeError::InvalidTag(lossy(&remaining[..eq_pos])))?;

        let value_start = eq_pos + 1;
        let Some(soh_pos) = memchr(SOH, &remaining[value_start..]) else {
            return Ok(None);
        };
        let value = &remaining[value_start..value_start + soh_pos];

        self.offset += value_start + soh_pos + 1;
        Ok(Some(TagValue { tag, value }))
    }

    /// Returns the current offset in the buffer.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns true if the buffer has been fully consumed.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.offset >= self.input.len()
    }
}

/// Splits the body region into tag=value pairs.
///
/// The region boundary came from BodyLength, so any field truncated at the
/// end means the declared length cut a field in half.
fn collect_fields(body: &[u8]) -> Result<Vec<TagValue<'_>>, DecodeError> {
    let mut fields = Vec::new();
    let mut offset = 0;

    while offset < body.len() {
        let eq_pos =
            memchr(EQUALS, &body[offset..]).ok_or(DecodeError::BodyLengthMismatch)? + offset;
        let tag = parse_tag(&body[offset..eq_pos])
            .ok_or_else(|| DecodeError::InvalidTag(lossy(&body[offset..eq_pos])))?;
        let value_start = eq_pos + 1;
        let soh_pos =
            memchr(SOH, &body[value_start..]).ok_or(DecodeError::BodyLengthMismatch)?;

        fields.push(TagValue {
            tag,
            value: &body[value_start..value_start + soh_pos],
        });
        offset = value_start + soh_pos + 1;
    }

    Ok(fields)
}

/// Rebuilds header, trailer, and body fragments from the parsed fields.
fn build_body(msg: &mut FixMessage, fields: &[TagValue<'_>]) -> Result<(), DecodeError> {
    let mut index = 0;
    while index < fields.len() {
        let field = fields[index];
        let def = registry::for_tag(field.tag);

        if let Some(members) = def.group_members {
            let expected: usize = field
                .as_str()?
                .parse()
                .map_err(|_| invalid_value(field.tag, "group count is not numeric"))?;
            index += 1;
            let instances = read_instances(fields, &mut index, members, expected, field.tag)?;
            msg.push_fragment(GroupField::new(field.tag, instances).into());
        } else {
            msg.add(field.tag, field.as_str()?)
                .map_err(DecodeError::from)?;
            index += 1;
        }
    }
    Ok(())
}

/// Reads exactly `expected` group instances starting at `index`.
///
/// An instance ends when a tag outside the member set appears, or when a
/// member tag repeats within the instance (which starts the next one).
fn read_instances(
    fields: &[TagValue<'_>],
    index: &mut usize,
    members: &[u32],
    expected: usize,
    count_tag: u32,
) -> Result<Vec<Group>, DecodeError> {
    let mut instances = Vec::with_capacity(expected);

    for _ in 0..expected {
        let mut instance = Group::new();
        let mut seen: Vec<u32> = Vec::new();

        while *index < fields.len() {
            let field = fields[*index];
            if !members.contains(&field.tag) || seen.contains(&field.tag) {
                break;
            }
            seen.push(field.tag);

            let def = registry::for_tag(field.tag);
            if let Some(nested_members) = def.group_members {
                let nested_count: usize = field
                    .as_str()?
                    .parse()
                    .map_err(|_| invalid_value(field.tag, "group count is not numeric"))?;
                *index += 1;
                let nested =
                    read_instances(fields, index, nested_members, nested_count, field.tag)?;
                instance.push(GroupField::new(field.tag, nested).into());
            } else {
                instance.push(Field::new(field.tag, field.as_str()?).into());
                *index += 1;
            }
        }

        if instance.is_empty() {
            return Err(DecodeError::GroupCountMismatch {
                count_tag,
                expected,
                actual: instances.len(),
            });
        }
        instances.push(instance);
    }

    Ok(instances)
}

/// Parses a tag number from ASCII bytes.
#[inline]
fn parse_tag(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() || bytes.len() > 10 {
        return None;
    }

    let mut result: u32 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        result = result.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
    }

    Some(result)
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn invalid_value(tag: u32, reason: &str) -> DecodeError {
    DecodeError::Message(MessageError::InvalidFieldValue {
        tag,
        reason: reason.to_string(),
    })
}
