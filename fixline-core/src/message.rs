/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! The FIX message model.
//!
//! This module provides:
//! - [`Header`]: Standard header record (begin string, type, identity, seq num)
//! - [`Trailer`]: Standard trailer record (checksum)
//! - [`FixMessage`]: One message: header + ordered body fragments + trailer
//!
//! Assembly goes through [`FixMessage::add`], which classifies each tag via
//! the field registry and routes it to the header, the trailer, or the body.
//! Body retrieval is first-match by tag in insertion order.

use crate::error::MessageError;
use crate::field::{Field, Group, MessageFragment};
use crate::registry::{self, FieldLocation, tags};
use crate::types::{CompId, MsgType, SeqNum};
use smallvec::SmallVec;
use std::fmt;

/// Standard message header.
///
/// All fields are optional at construction time; the encoder requires
/// everything but the sequence number, which the session stamps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    /// BeginString (tag 8), e.g. "FIX.4.4".
    pub begin_string: Option<String>,
    /// MsgType (tag 35).
    pub msg_type: Option<MsgType>,
    /// SenderCompID (tag 49).
    pub sender_comp_id: Option<CompId>,
    /// TargetCompID (tag 56).
    pub target_comp_id: Option<CompId>,
    /// MsgSeqNum (tag 34).
    pub msg_seq_num: Option<SeqNum>,
}

/// Standard message trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Trailer {
    /// CheckSum (tag 10), 0-255.
    pub check_sum: Option<u8>,
}

/// A single FIX message: one header, an ordered body, one trailer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FixMessage {
    header: Header,
    trailer: Trailer,
    body: SmallVec<[MessageFragment; 8]>,
}

impl FixMessage {
    /// Creates an empty message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty message with the given message type.
    ///
    /// # Arguments
    /// * `msg_type` - The message type (tag 35)
    #[must_use]
    pub fn with_msg_type(msg_type: impl Into<MsgType>) -> Self {
        Self {
            header: Header {
                msg_type: Some(msg_type.into()),
                ..Header::default()
            },
            ..Self::default()
        }
    }

    /// Adds a field, dispatching it by structural slot.
    ///
    /// Header tags populate the header record (numeric ones are parsed),
    /// the CheckSum tag populates the trailer, and every other tag appends
    /// a body field in call order.
    ///
    /// # Arguments
    /// * `tag` - The field tag number (must be positive)
    /// * `value` - The field value
    ///
    /// # Errors
    /// - [`MessageError::InvalidTag`] if `tag` is zero
    /// - [`MessageError::InvalidFieldValue`] if a typed field fails to parse
    pub fn add(&mut self, tag: u32, value: &str) -> Result<&mut Self, MessageError> {
        if tag == 0 {
            return Err(MessageError::InvalidTag { tag });
        }

        match registry::for_tag(tag).location {
            FieldLocation::Header => self.add_header_field(tag, value)?,
            FieldLocation::Trailer => {
                self.trailer.check_sum = Some(parse_numeric(tag, value)?);
            }
            FieldLocation::Body => {
                self.body.push(Field::new(tag, value).into());
            }
        }
        Ok(self)
    }

    /// Adds an integer field, stringifying before the usual dispatch.
    ///
    /// # Arguments
    /// * `tag` - The field tag number (must be positive)
    /// * `value` - The field value
    ///
    /// # Errors
    /// Same contract as [`FixMessage::add`].
    pub fn add_int(&mut self, tag: u32, value: i64) -> Result<&mut Self, MessageError> {
        self.add(tag, &value.to_string())
    }

    fn add_header_field(&mut self, tag: u32, value: &str) -> Result<(), MessageError> {
        match tag {
            tags::BEGIN_STRING => self.header.begin_string = Some(value.to_string()),
            tags::MSG_TYPE => self.header.msg_type = Some(MsgType::from(value)),
            tags::SENDER_COMP_ID => self.header.sender_comp_id = Some(parse_comp_id(tag, value)?),
            tags::TARGET_COMP_ID => self.header.target_comp_id = Some(parse_comp_id(tag, value)?),
            tags::MSG_SEQ_NUM => {
                let seq: u64 = parse_numeric(tag, value)?;
                self.header.msg_seq_num = Some(SeqNum::new(seq));
            }
            // The registry only maps the five tags above to the header.
            _ => self.body.push(Field::new(tag, value).into()),
        }
        Ok(())
    }

    /// Appends an already-built fragment to the body.
    ///
    /// Used by the decoder when reconstructing repeating groups.
    pub fn push_fragment(&mut self, fragment: MessageFragment) {
        self.body.push(fragment);
    }

    /// Returns the value of the first body field with the given tag.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    ///
    /// # Errors
    /// [`MessageError::NotAField`] if the first fragment with that tag is a
    /// repeating group.
    pub fn get_str(&self, tag: u32) -> Result<Option<&str>, MessageError> {
        match self.first(tag) {
            None => Ok(None),
            Some(MessageFragment::Field(field)) => Ok(Some(field.value())),
            Some(MessageFragment::Group(_)) => Err(MessageError::NotAField { tag }),
        }
    }

    /// Returns the first body field with the given tag parsed as an integer.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    ///
    /// # Errors
    /// - [`MessageError::NotAField`] if the first fragment is a group
    /// - [`MessageError::InvalidFieldValue`] if the value is non-numeric
    pub fn get_int(&self, tag: u32) -> Result<Option<i64>, MessageError> {
        match self.get_str(tag)? {
            None => Ok(None),
            Some(value) => parse_numeric(tag, value).map(Some),
        }
    }

    /// Returns the instances of the repeating group governed by `tag`.
    ///
    /// Returns `None` when the tag is absent or its first fragment is a
    /// plain field; absence of a group is not an error.
    ///
    /// # Arguments
    /// * `tag` - The NumInGroup tag
    #[must_use]
    pub fn get_groups(&self, tag: u32) -> Option<&[Group]> {
        match self.first(tag) {
            Some(MessageFragment::Group(group)) => Some(group.groups()),
            _ => None,
        }
    }

    fn first(&self, tag: u32) -> Option<&MessageFragment> {
        self.body.iter().find(|f| f.tag() == tag)
    }

    /// Returns the message header.
    #[inline]
    #[must_use]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// Returns a mutable reference to the message header.
    #[inline]
    pub const fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the message trailer.
    #[inline]
    #[must_use]
    pub const fn trailer(&self) -> &Trailer {
        &self.trailer
    }

    /// Returns the message type, if set.
    #[inline]
    #[must_use]
    pub fn msg_type(&self) -> Option<&MsgType> {
        self.header.msg_type.as_ref()
    }

    /// Returns the message sequence number, if stamped.
    #[inline]
    #[must_use]
    pub const fn msg_seq_num(&self) -> Option<SeqNum> {
        self.header.msg_seq_num
    }

    /// Returns the body fragments in insertion order.
    #[inline]
    #[must_use]
    pub fn body(&self) -> &[MessageFragment] {
        &self.body
    }

    /// Returns the number of body fragments.
    #[inline]
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

impl fmt::Display for FixMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FixMessage{{header={:?}, body={} fragments, trailer={:?}}}",
            self.header,
            self.body.len(),
            self.trailer
        )
    }
}

fn parse_comp_id(tag: u32, value: &str) -> Result<CompId, MessageError> {
    CompId::new(value).ok_or_else(|| MessageError::InvalidFieldValue {
        tag,
        reason: format!("comp id exceeds {} bytes", crate::types::COMP_ID_MAX_LEN),
    })
}

fn parse_numeric<T: std::str::FromStr>(tag: u32, value: &str) -> Result<T, MessageError> {
    value
        .parse()
        .map_err(|_| MessageError::InvalidFieldValue {
            tag,
            reason: format!("'{value}' is not numeric"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::GroupField;

    #[test]
    fn test_add_header_dispatch() {
        let mut msg = FixMessage::new();
        msg.add(49, "BROKER1").unwrap();

        assert_eq!(
            msg.header().sender_comp_id.as_ref().map(CompId::as_str),
            Some("BROKER1")
        );
        assert_eq!(msg.body_len(), 0);
    }

    #[test]
    fn test_add_body_dispatch() {
        let mut msg = FixMessage::new();
        msg.add(58, "free text").unwrap();

        assert_eq!(msg.body_len(), 1);
        assert_eq!(msg.get_str(58).unwrap(), Some("free text"));
        assert_eq!(msg.header(), &Header::default());
    }

    #[test]
    fn test_add_zero_tag() {
        let mut msg = FixMessage::new();
        let err = msg.add(0, "x").unwrap_err();
        assert_eq!(err, MessageError::InvalidTag { tag: 0 });
    }

    #[test]
    fn test_add_seq_num_parses() {
        let mut msg = FixMessage::new();
        msg.add(34, "42").unwrap();
        assert_eq!(msg.msg_seq_num(), Some(SeqNum::new(42)));

        let err = msg.add(34, "abc").unwrap_err();
        assert!(matches!(
            err,
            MessageError::InvalidFieldValue { tag: 34, .. }
        ));
    }

    #[test]
    fn test_add_checksum_to_trailer() {
        let mut msg = FixMessage::new();
        msg.add(10, "042").unwrap();
        assert_eq!(msg.trailer().check_sum, Some(42));

        assert!(msg.add(10, "999").is_err());
        assert!(msg.add(10, "xx").is_err());
    }

    #[test]
    fn test_add_int_convenience() {
        let mut msg = FixMessage::new();
        msg.add_int(45, 7).unwrap();
        assert_eq!(msg.get_int(45).unwrap(), Some(7));
    }

    #[test]
    fn test_get_str_first_match() {
        let mut msg = FixMessage::new();
        msg.add(58, "first").unwrap();
        msg.add(58, "second").unwrap();

        assert_eq!(msg.get_str(58).unwrap(), Some("first"));
        assert_eq!(msg.body_len(), 2);
    }

    #[test]
    fn test_get_str_on_group_fails() {
        let mut msg = FixMessage::new();
        msg.push_fragment(GroupField::new(453, vec![Group::new()]).into());

        assert_eq!(
            msg.get_str(453).unwrap_err(),
            MessageError::NotAField { tag: 453 }
        );
    }

    #[test]
    fn test_get_int_non_numeric() {
        let mut msg = FixMessage::new();
        msg.add(58, "hello").unwrap();
        assert!(msg.get_int(58).is_err());
        assert_eq!(msg.get_int(999).unwrap(), None);
    }

    #[test]
    fn test_get_groups() {
        let mut msg = FixMessage::new();
        assert_eq!(msg.get_groups(453), None);

        let mut instance = Group::new();
        instance.push(Field::new(448, "BROKER").into());
        msg.push_fragment(GroupField::new(453, vec![instance]).into());

        let groups = msg.get_groups(453).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].get_str(448), Some("BROKER"));

        // A plain field is not a group.
        msg.add(58, "text").unwrap();
        assert_eq!(msg.get_groups(58), None);
    }

    #[test]
    fn test_with_msg_type() {
        let msg = FixMessage::with_msg_type("D");
        assert_eq!(msg.msg_type(), Some(&MsgType::NewOrderSingle));
    }
}
