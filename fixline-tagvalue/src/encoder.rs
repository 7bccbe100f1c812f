/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX message encoder.
//!
//! Serializes a [`FixMessage`] into a correctly framed byte sequence:
//! required header fields, ordered body fragments, BodyLength framing, and
//! the trailing checksum.
//!
//! BodyLength (tag 9) covers the bytes from immediately after its own
//! delimiter through the byte before `10=`; the checksum covers everything
//! from the start of the BeginString field to the same boundary. Tags 8 and
//! 9 are outside the body length, tags 35/49/56/34 and all body fields are
//! inside. That boundary is wire compatibility itself, do not move it.

use crate::frame::{SOH, checksum, encode_checksum};
use bytes::{BufMut, BytesMut};
use fixline_core::error::EncodeError;
use fixline_core::field::MessageFragment;
use fixline_core::message::FixMessage;
use fixline_core::registry::tags;

/// Serializes a message into a complete FIX frame.
///
/// The header must carry BeginString, MsgType, SenderCompID, and
/// TargetCompID; MsgSeqNum must already have been stamped by the session.
///
/// # Arguments
/// * `msg` - The message to serialize
///
/// # Errors
/// Returns [`EncodeError::MissingRequiredField`] naming the first missing
/// header field.
pub fn encode(msg: &FixMessage) -> Result<BytesMut, EncodeError> {
    let header = msg.header();

    let begin_string = header
        .begin_string
        .as_deref()
        .ok_or(missing(tags::BEGIN_STRING, "BeginString"))?;
    let msg_type = header
        .msg_type
        .as_ref()
        .ok_or(missing(tags::MSG_TYPE, "MsgType"))?;
    let sender = header
        .sender_comp_id
        .as_ref()
        .ok_or(missing(tags::SENDER_COMP_ID, "SenderCompID"))?;
    let target = header
        .target_comp_id
        .as_ref()
        .ok_or(missing(tags::TARGET_COMP_ID, "TargetCompID"))?;
    let seq_num = header
        .msg_seq_num
        .ok_or(missing(tags::MSG_SEQ_NUM, "MsgSeqNum"))?;

    // Body payload: typed header fields first, then body fragments in order.
    let mut payload = BytesMut::with_capacity(256);
    put_str(&mut payload, tags::MSG_TYPE, msg_type.as_str());
    put_str(&mut payload, tags::SENDER_COMP_ID, sender.as_str());
    put_str(&mut payload, tags::TARGET_COMP_ID, target.as_str());
    put_uint(&mut payload, tags::MSG_SEQ_NUM, seq_num.value());
    for fragment in msg.body() {
        put_fragment(&mut payload, fragment);
    }

    // Frame: 8=..|9=<len>|<payload>
    let mut out = BytesMut::with_capacity(payload.len() + 32);
    let mut int_buf = itoa::Buffer::new();
    out.put_slice(b"8=");
    out.put_slice(begin_string.as_bytes());
    out.put_u8(SOH);
    out.put_slice(b"9=");
    out.put_slice(int_buf.format(payload.len()).as_bytes());
    out.put_u8(SOH);
    out.put_slice(&payload);

    let sum = checksum(&out);
    out.put_slice(b"10=");
    out.put_slice(&encode_checksum(sum));
    out.put_u8(SOH);

    Ok(out)
}

const fn missing(tag: u32, name: &'static str) -> EncodeError {
    EncodeError::MissingRequiredField { tag, name }
}

/// Writes a fragment, recursing into repeating groups.
///
/// Groups serialize as the governing count field followed by each
/// instance's fragments in wire order.
fn put_fragment(buf: &mut BytesMut, fragment: &MessageFragment) {
    match fragment {
        MessageFragment::Field(field) => put_str(buf, field.tag(), field.value()),
        MessageFragment::Group(group) => {
            put_uint(buf, group.tag(), group.count() as u64);
            for instance in group.groups() {
                for inner in instance.fragments() {
                    put_fragment(buf, inner);
                }
            }
        }
    }
}

#[inline]
fn put_str(buf: &mut BytesMut, tag: u32, value: &str) {
    put_raw(buf, tag, value.as_bytes());
}

#[inline]
fn put_uint(buf: &mut BytesMut, tag: u32, value: u64) {
    let mut int_buf = itoa::Buffer::new();
    put_raw(buf, tag, int_buf.format(value).as_bytes());
}

#[inline]
fn put_raw(buf: &mut BytesMut, tag: u32, value: &[u8]) {
    let mut tag_buf = itoa::Buffer::new();
    buf.put_slice(tag_buf.format(tag).as_bytes());
    buf.put_u8(b'=');
    buf.put_slice(value);
    buf.put_u8(SOH);
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixline_core::field::{Field, Group, GroupField};

    fn base_message() -> FixMessage {
        let mut msg = FixMessage::with_msg_type("D");
        msg.add(8, "FIX.4.4").unwrap();
        msg.add(49, "SENDER").unwrap();
        msg.add(56, "TARGET").unwrap();
        msg.add(34, "1").unwrap();
        msg
    }

    #[test]
    fn test_encode_frame_layout() {
        let mut msg = base_message();
        msg.add(58, "hello").unwrap();

        let out = encode(&msg).unwrap();
        let text = String::from_utf8_lossy(&out);

        assert!(text.starts_with("8=FIX.4.4\x019="));
        assert!(text.contains("35=D\x0149=SENDER\x0156=TARGET\x0134=1\x0158=hello\x01"));
        assert!(text.ends_with('\x01'));
        assert!(text.contains("\x0110="));
    }

    #[test]
    fn test_encode_body_length_exact() {
        let msg = base_message();
        let out = encode(&msg).unwrap();

        // BodyLength counts from after tag 9's SOH to before "10=".
        let text = String::from_utf8_lossy(&out).into_owned();
        let after_nine = text.find("\x019=").unwrap() + 1;
        let soh = text[after_nine..].find('\x01').unwrap() + after_nine + 1;
        let checksum_at = text.rfind("10=").unwrap();
        let declared: usize = text[after_nine + 2..soh - 1].parse().unwrap();

        assert_eq!(declared, checksum_at - soh);
    }

    #[test]
    fn test_encode_checksum_covers_whole_frame() {
        let msg = base_message();
        let out = encode(&msg).unwrap();

        let checksum_at = out.len() - 7;
        assert_eq!(&out[checksum_at..checksum_at + 3], b"10=");
        let declared = crate::frame::parse_checksum(&out[checksum_at + 3..checksum_at + 6]).unwrap();
        assert_eq!(declared, checksum(&out[..checksum_at]));
    }

    #[test]
    fn test_encode_missing_required_field() {
        let mut msg = FixMessage::with_msg_type("D");
        msg.add(8, "FIX.4.4").unwrap();
        msg.add(56, "TARGET").unwrap();
        msg.add(34, "1").unwrap();

        let err = encode(&msg).unwrap_err();
        assert_eq!(
            err,
            EncodeError::MissingRequiredField {
                tag: 49,
                name: "SenderCompID"
            }
        );
    }

    #[test]
    fn test_encode_missing_seq_num() {
        let mut msg = FixMessage::with_msg_type("0");
        msg.add(8, "FIX.4.4").unwrap();
        msg.add(49, "SENDER").unwrap();
        msg.add(56, "TARGET").unwrap();

        let err = encode(&msg).unwrap_err();
        assert_eq!(
            err,
            EncodeError::MissingRequiredField {
                tag: 34,
                name: "MsgSeqNum"
            }
        );
    }

    #[test]
    fn test_encode_group_count_then_members() {
        let mut msg = base_message();
        let mut first = Group::new();
        first.push(Field::new(448, "BROKER").into());
        first.push(Field::new(452, "1").into());
        let mut second = Group::new();
        second.push(Field::new(448, "CLIENT").into());
        second.push(Field::new(452, "3").into());
        msg.push_fragment(GroupField::new(453, vec![first, second]).into());

        let out = encode(&msg).unwrap();
        let text = String::from_utf8_lossy(&out);

        assert!(text.contains("453=2\x01448=BROKER\x01452=1\x01448=CLIENT\x01452=3\x01"));
    }
}
