/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Session configuration.
//!
//! This module provides configuration options for FIX sessions.

use fixline_core::types::CompId;

/// Configuration for a FIX session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Sender CompID (tag 49), the local identity.
    pub sender_comp_id: CompId,
    /// Target CompID (tag 56), the remote identity.
    pub target_comp_id: CompId,
    /// FIX version BeginString (e.g., "FIX.4.4").
    pub begin_string: String,
    /// First outgoing sequence number.
    pub initial_outgoing_seq_num: u64,
    /// First expected incoming sequence number.
    pub initial_incoming_seq_num: u64,
    /// Whether to validate incoming message checksums.
    pub validate_checksum: bool,
}

impl SessionConfig {
    /// Creates a new session configuration with required fields.
    ///
    /// Sequence numbers start at 1 and checksum validation is on.
    ///
    /// # Arguments
    /// * `sender_comp_id` - The sender CompID
    /// * `target_comp_id` - The target CompID
    /// * `begin_string` - The FIX version string
    #[must_use]
    pub fn new(
        sender_comp_id: CompId,
        target_comp_id: CompId,
        begin_string: impl Into<String>,
    ) -> Self {
        Self {
            sender_comp_id,
            target_comp_id,
            begin_string: begin_string.into(),
            initial_outgoing_seq_num: 1,
            initial_incoming_seq_num: 1,
            validate_checksum: true,
        }
    }

    /// Sets the initial sequence numbers.
    ///
    /// # Arguments
    /// * `outgoing` - First outgoing sequence number
    /// * `incoming` - First expected incoming sequence number
    #[must_use]
    pub const fn with_initial_seq_nums(mut self, outgoing: u64, incoming: u64) -> Self {
        self.initial_outgoing_seq_num = outgoing;
        self.initial_incoming_seq_num = incoming;
        self
    }

    /// Sets whether to validate incoming checksums.
    #[must_use]
    pub const fn with_checksum_validation(mut self, validate: bool) -> Self {
        self.validate_checksum = validate;
        self
    }
}

/// Builder for session configuration.
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    sender_comp_id: Option<CompId>,
    target_comp_id: Option<CompId>,
    begin_string: Option<String>,
    initial_outgoing_seq_num: Option<u64>,
    initial_incoming_seq_num: Option<u64>,
    validate_checksum: Option<bool>,
}

impl SessionConfigBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sender CompID.
    #[must_use]
    pub fn sender_comp_id(mut self, id: CompId) -> Self {
        self.sender_comp_id = Some(id);
        self
    }

    /// Sets the target CompID.
    #[must_use]
    pub fn target_comp_id(mut self, id: CompId) -> Self {
        self.target_comp_id = Some(id);
        self
    }

    /// Sets the FIX version.
    #[must_use]
    pub fn begin_string(mut self, version: impl Into<String>) -> Self {
        self.begin_string = Some(version.into());
        self
    }

    /// Sets the first outgoing sequence number.
    #[must_use]
    pub const fn initial_outgoing_seq_num(mut self, seq: u64) -> Self {
        self.initial_outgoing_seq_num = Some(seq);
        self
    }

    /// Sets the first expected incoming sequence number.
    #[must_use]
    pub const fn initial_incoming_seq_num(mut self, seq: u64) -> Self {
        self.initial_incoming_seq_num = Some(seq);
        self
    }

    /// Sets whether to validate incoming checksums.
    #[must_use]
    pub const fn validate_checksum(mut self, validate: bool) -> Self {
        self.validate_checksum = Some(validate);
        self
    }

    /// Builds the configuration.
    ///
    /// # Panics
    /// Panics if required fields are not set.
    #[must_use]
    pub fn build(self) -> SessionConfig {
        let sender = self.sender_comp_id.expect("sender_comp_id is required");
        let target = self.target_comp_id.expect("target_comp_id is required");
        let begin_string = self.begin_string.unwrap_or_else(|| "FIX.4.4".to_string());

        let mut config = SessionConfig::new(sender, target, begin_string);
        if let Some(seq) = self.initial_outgoing_seq_num {
            config.initial_outgoing_seq_num = seq;
        }
        if let Some(seq) = self.initial_incoming_seq_num {
            config.initial_incoming_seq_num = seq;
        }
        if let Some(validate) = self.validate_checksum {
            config.validate_checksum = validate;
        }

        config
    }
}
