/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Body fragments of a FIX message.
//!
//! This module provides:
//! - [`Field`]: A single tag=value pair, immutable once constructed
//! - [`Group`]: One instance of a repeating group
//! - [`GroupField`]: A NumInGroup tag together with its instances
//! - [`MessageFragment`]: Sum type over everything that can appear in a body
//!
//! Fragment polymorphism is a tagged union with exhaustive matching at the
//! codec boundary, never runtime type inspection.

use std::fmt;

/// A single tag=value field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    tag: u32,
    value: String,
}

impl Field {
    /// Creates a new field.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - The field value
    #[must_use]
    pub fn new(tag: u32, value: impl Into<String>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }

    /// Returns the field tag number.
    #[inline]
    #[must_use]
    pub const fn tag(&self) -> u32 {
        self.tag
    }

    /// Returns the field value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag, self.value)
    }
}

/// One instance of a repeating group: an ordered list of fragments.
///
/// Instances may themselves contain nested groups.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    fragments: Vec<MessageFragment>,
}

impl Group {
    /// Creates an empty group instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fragment to this instance.
    pub fn push(&mut self, fragment: MessageFragment) {
        self.fragments.push(fragment);
    }

    /// Returns the fragments of this instance in insertion order.
    #[inline]
    #[must_use]
    pub fn fragments(&self) -> &[MessageFragment] {
        &self.fragments
    }

    /// Returns the value of the first plain field with the given tag.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    #[must_use]
    pub fn get_str(&self, tag: u32) -> Option<&str> {
        self.fragments.iter().find_map(|f| match f {
            MessageFragment::Field(field) if field.tag() == tag => Some(field.value()),
            _ => None,
        })
    }

    /// Returns the number of fragments in this instance.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns true if this instance holds no fragments.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// A repeating group fragment: the NumInGroup tag and its instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupField {
    tag: u32,
    groups: Vec<Group>,
}

impl GroupField {
    /// Creates a new group fragment.
    ///
    /// # Arguments
    /// * `tag` - The NumInGroup tag governing this group
    /// * `groups` - The group instances in wire order
    #[must_use]
    pub fn new(tag: u32, groups: Vec<Group>) -> Self {
        Self { tag, groups }
    }

    /// Returns the governing NumInGroup tag.
    #[inline]
    #[must_use]
    pub const fn tag(&self) -> u32 {
        self.tag
    }

    /// Returns the group instances.
    #[inline]
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Returns the number of instances.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.groups.len()
    }
}

/// Anything that can appear in a message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageFragment {
    /// A plain tag=value field.
    Field(Field),
    /// A repeating group.
    Group(GroupField),
}

impl MessageFragment {
    /// Returns the tag number of this fragment.
    ///
    /// For groups this is the NumInGroup tag.
    #[must_use]
    pub const fn tag(&self) -> u32 {
        match self {
            Self::Field(field) => field.tag(),
            Self::Group(group) => group.tag(),
        }
    }
}

impl From<Field> for MessageFragment {
    fn from(field: Field) -> Self {
        Self::Field(field)
    }
}

impl From<GroupField> for MessageFragment {
    fn from(group: GroupField) -> Self {
        Self::Group(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_accessors() {
        let field = Field::new(11, "ORDER123");
        assert_eq!(field.tag(), 11);
        assert_eq!(field.value(), "ORDER123");
        assert_eq!(field.to_string(), "11=ORDER123");
    }

    #[test]
    fn test_group_get_str() {
        let mut group = Group::new();
        group.push(Field::new(448, "BROKER").into());
        group.push(Field::new(452, "1").into());

        assert_eq!(group.get_str(448), Some("BROKER"));
        assert_eq!(group.get_str(452), Some("1"));
        assert_eq!(group.get_str(999), None);
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn test_fragment_tag() {
        let field: MessageFragment = Field::new(58, "hello").into();
        assert_eq!(field.tag(), 58);

        let group: MessageFragment = GroupField::new(453, vec![Group::new()]).into();
        assert_eq!(group.tag(), 453);
    }

    #[test]
    fn test_group_field_count() {
        let group = GroupField::new(453, vec![Group::new(), Group::new()]);
        assert_eq!(group.count(), 2);
        assert_eq!(group.tag(), 453);
    }
}
