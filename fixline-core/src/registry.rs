/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Static field registry mapping tag numbers to field descriptors.
//!
//! This module provides:
//! - [`FieldLocation`]: Which structural slot a field occupies
//! - [`FieldDef`]: Tag, name, slot, and repeating-group membership
//! - [`for_tag`]: Total lookup, every tag resolves to a descriptor
//! - [`tags`]: Named constants for the tags the engine touches directly
//!
//! The registry is read-only and process-wide. Group membership is defined
//! here, not guessed from delimiters: a NumInGroup tag carries the set of
//! tags allowed inside each of its instances.

use serde::{Deserialize, Serialize};

/// Named constants for well-known FIX tags.
pub mod tags {
    /// BeginString (8).
    pub const BEGIN_STRING: u32 = 8;
    /// BodyLength (9).
    pub const BODY_LENGTH: u32 = 9;
    /// CheckSum (10).
    pub const CHECK_SUM: u32 = 10;
    /// MsgSeqNum (34).
    pub const MSG_SEQ_NUM: u32 = 34;
    /// MsgType (35).
    pub const MSG_TYPE: u32 = 35;
    /// RefSeqNum (45).
    pub const REF_SEQ_NUM: u32 = 45;
    /// SenderCompID (49).
    pub const SENDER_COMP_ID: u32 = 49;
    /// TargetCompID (56).
    pub const TARGET_COMP_ID: u32 = 56;
    /// Text (58).
    pub const TEXT: u32 = 58;
    /// NoMDEntries (268).
    pub const NO_MD_ENTRIES: u32 = 268;
    /// RefMsgType (372).
    pub const REF_MSG_TYPE: u32 = 372;
    /// PartyIDSource (447).
    pub const PARTY_ID_SOURCE: u32 = 447;
    /// PartyID (448).
    pub const PARTY_ID: u32 = 448;
    /// PartyRole (452).
    pub const PARTY_ROLE: u32 = 452;
    /// NoPartyIDs (453).
    pub const NO_PARTY_IDS: u32 = 453;
    /// NoPartySubIDs (802).
    pub const NO_PARTY_SUB_IDS: u32 = 802;
}

/// The structural slot a field occupies within a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldLocation {
    /// Standard header record.
    Header,
    /// Standard trailer record.
    Trailer,
    /// Ordered message body.
    Body,
}

/// Descriptor for a single field tag.
///
/// `group_members` is `Some` for NumInGroup tags and lists the tags that may
/// appear inside each group instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field tag number.
    pub tag: u32,
    /// Field name from the FIX dictionary, or "UserDefined" for tags the
    /// registry does not know.
    pub name: &'static str,
    /// Structural slot for this field.
    pub location: FieldLocation,
    /// Member tags of each group instance, for NumInGroup tags.
    pub group_members: Option<&'static [u32]>,
}

impl FieldDef {
    /// Returns true if this tag introduces a repeating group.
    #[inline]
    #[must_use]
    pub const fn is_group_count(&self) -> bool {
        self.group_members.is_some()
    }
}

/// Member tags of the Parties repeating group (NoPartyIDs, 453).
const PARTY_MEMBERS: &[u32] = &[
    tags::PARTY_ID,
    tags::PARTY_ID_SOURCE,
    tags::PARTY_ROLE,
    tags::NO_PARTY_SUB_IDS,
];

/// Member tags of the PartySubIDs nested group (NoPartySubIDs, 802).
const PARTY_SUB_MEMBERS: &[u32] = &[523, 803];

/// Member tags of the MDEntries repeating group (NoMDEntries, 268).
const MD_ENTRY_MEMBERS: &[u32] = &[269, 270, 271, 272, 273];

/// Resolves a tag number to its field descriptor.
///
/// This is a total function: unrecognized tags resolve to a generic body
/// descriptor rather than an error, preserving protocol extensibility.
///
/// # Arguments
/// * `tag` - The field tag number
#[must_use]
pub const fn for_tag(tag: u32) -> FieldDef {
    match tag {
        tags::BEGIN_STRING => known(tag, "BeginString", FieldLocation::Header),
        // BodyLength is framing: the codec always recomputes it, so a
        // hand-added tag 9 rides in the body like any other field.
        tags::BODY_LENGTH => known(tag, "BodyLength", FieldLocation::Body),
        tags::CHECK_SUM => known(tag, "CheckSum", FieldLocation::Trailer),
        tags::MSG_SEQ_NUM => known(tag, "MsgSeqNum", FieldLocation::Header),
        tags::MSG_TYPE => known(tag, "MsgType", FieldLocation::Header),
        tags::REF_SEQ_NUM => known(tag, "RefSeqNum", FieldLocation::Body),
        tags::SENDER_COMP_ID => known(tag, "SenderCompID", FieldLocation::Header),
        tags::TARGET_COMP_ID => known(tag, "TargetCompID", FieldLocation::Header),
        tags::TEXT => known(tag, "Text", FieldLocation::Body),
        tags::REF_MSG_TYPE => known(tag, "RefMsgType", FieldLocation::Body),
        tags::PARTY_ID => known(tag, "PartyID", FieldLocation::Body),
        tags::PARTY_ID_SOURCE => known(tag, "PartyIDSource", FieldLocation::Body),
        tags::PARTY_ROLE => known(tag, "PartyRole", FieldLocation::Body),
        tags::NO_PARTY_IDS => group(tag, "NoPartyIDs", PARTY_MEMBERS),
        tags::NO_PARTY_SUB_IDS => group(tag, "NoPartySubIDs", PARTY_SUB_MEMBERS),
        tags::NO_MD_ENTRIES => group(tag, "NoMDEntries", MD_ENTRY_MEMBERS),
        _ => FieldDef {
            tag,
            name: "UserDefined",
            location: FieldLocation::Body,
            group_members: None,
        },
    }
}

const fn known(tag: u32, name: &'static str, location: FieldLocation) -> FieldDef {
    FieldDef {
        tag,
        name,
        location,
        group_members: None,
    }
}

const fn group(tag: u32, name: &'static str, members: &'static [u32]) -> FieldDef {
    FieldDef {
        tag,
        name,
        location: FieldLocation::Body,
        group_members: Some(members),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_tags() {
        assert_eq!(for_tag(8).location, FieldLocation::Header);
        assert_eq!(for_tag(34).location, FieldLocation::Header);
        assert_eq!(for_tag(35).location, FieldLocation::Header);
        assert_eq!(for_tag(49).location, FieldLocation::Header);
        assert_eq!(for_tag(56).location, FieldLocation::Header);
    }

    #[test]
    fn test_trailer_tag() {
        let def = for_tag(10);
        assert_eq!(def.location, FieldLocation::Trailer);
        assert_eq!(def.name, "CheckSum");
    }

    #[test]
    fn test_unknown_tag_is_body() {
        let def = for_tag(99999);
        assert_eq!(def.location, FieldLocation::Body);
        assert_eq!(def.name, "UserDefined");
        assert_eq!(def.tag, 99999);
        assert!(!def.is_group_count());
    }

    #[test]
    fn test_group_count_tags() {
        let parties = for_tag(453);
        assert!(parties.is_group_count());
        assert!(parties.group_members.unwrap().contains(&448));

        let subs = for_tag(802);
        assert!(subs.is_group_count());
        assert_eq!(subs.group_members, Some(PARTY_SUB_MEMBERS));
    }

    #[test]
    fn test_body_length_rides_in_body() {
        assert_eq!(for_tag(9).location, FieldLocation::Body);
    }
}
