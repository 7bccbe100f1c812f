/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Per-connection session state: sequencing and identity.
//!
//! A [`Session`] is owned by exactly one connection's processing lane and is
//! never shared. It tracks the next expected incoming and next outgoing
//! sequence numbers and the comp-id identity pair, and walks the
//! `Unestablished -> Established -> Closed` lifecycle (Closed is terminal).
//!
//! Incoming validation and outgoing stamping are the only mutation points
//! for the counters; the codec never touches them, so a failed encode or
//! decode cannot corrupt sequencing.

use crate::config::SessionConfig;
use fixline_core::error::SessionError;
use fixline_core::message::FixMessage;
use fixline_core::types::{CompId, SeqNum};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, logon handshake not yet complete. No message processing.
    Unestablished,
    /// Handshake complete, messages flow.
    Established,
    /// Torn down. Terminal; no further validation or stamping.
    Closed,
}

/// Result of validating an incoming sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceCheck {
    /// Sequence number matched; the expectation advanced.
    Ok,
    /// Sequence number did not match; the expectation did not advance.
    ///
    /// Advisory: the handler logs it and still forwards the message.
    /// Gap recovery is a collaborator concern.
    Mismatch {
        /// Expected sequence number.
        expected: u64,
        /// Received sequence number.
        received: u64,
    },
}

impl SequenceCheck {
    /// Returns true if the sequence number matched.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Sequencing state machine for one connection.
#[derive(Debug)]
pub struct Session {
    /// Local identity (SenderCompID on outgoing messages).
    sender_comp_id: CompId,
    /// Remote identity (TargetCompID on outgoing messages).
    target_comp_id: CompId,
    /// BeginString stamped onto outgoing messages.
    begin_string: String,
    /// Next expected incoming sequence number.
    next_incoming_seq_num: u64,
    /// Next outgoing sequence number.
    next_outgoing_seq_num: u64,
    state: SessionState,
}

impl Session {
    /// Creates a session from configuration, in the Unestablished state.
    ///
    /// # Arguments
    /// * `config` - Identity and initial sequence numbers
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            sender_comp_id: config.sender_comp_id.clone(),
            target_comp_id: config.target_comp_id.clone(),
            begin_string: config.begin_string.clone(),
            next_incoming_seq_num: config.initial_incoming_seq_num,
            next_outgoing_seq_num: config.initial_outgoing_seq_num,
            state: SessionState::Unestablished,
        }
    }

    /// Marks the session established after the external logon handshake.
    ///
    /// # Errors
    /// Returns [`SessionError::Closed`] if the session was already torn down.
    pub fn establish(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Closed {
            return Err(SessionError::Closed);
        }
        self.state = SessionState::Established;
        Ok(())
    }

    /// Tears the session down. Terminal and idempotent.
    pub fn close(&mut self) {
        self.state = SessionState::Closed;
    }

    /// Returns the current lifecycle state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the local comp id.
    #[inline]
    #[must_use]
    pub fn sender_comp_id(&self) -> &CompId {
        &self.sender_comp_id
    }

    /// Returns the remote comp id.
    #[inline]
    #[must_use]
    pub fn target_comp_id(&self) -> &CompId {
        &self.target_comp_id
    }

    /// Returns the next expected incoming sequence number.
    ///
    /// Read accessor for diagnostics and reject construction.
    #[inline]
    #[must_use]
    pub const fn next_incoming_seq_num(&self) -> u64 {
        self.next_incoming_seq_num
    }

    /// Returns the next outgoing sequence number without allocating it.
    #[inline]
    #[must_use]
    pub const fn next_outgoing_seq_num(&self) -> u64 {
        self.next_outgoing_seq_num
    }

    /// Validates an incoming sequence number.
    ///
    /// Advances the expectation by one iff `received` matches it; a mismatch
    /// is reported without advancing, never silently corrected.
    ///
    /// # Arguments
    /// * `received` - The sequence number carried by the incoming message
    ///
    /// # Errors
    /// [`SessionError::NotEstablished`] or [`SessionError::Closed`] when the
    /// session is not in the Established state.
    pub fn check_incoming_seq_num(&mut self, received: u64) -> Result<SequenceCheck, SessionError> {
        self.ensure_established()?;

        let expected = self.next_incoming_seq_num;
        if received == expected {
            self.next_incoming_seq_num += 1;
            Ok(SequenceCheck::Ok)
        } else {
            Ok(SequenceCheck::Mismatch { expected, received })
        }
    }

    /// Stamps an outgoing message and allocates its sequence number.
    ///
    /// Must be invoked exactly once per message actually handed to the
    /// encoder, in send order: outgoing numbers are gap-free and monotonic.
    /// The identity pair and begin string are filled in when the header
    /// lacks them.
    ///
    /// # Arguments
    /// * `msg` - The message about to be encoded
    ///
    /// # Errors
    /// [`SessionError::NotEstablished`] or [`SessionError::Closed`] when the
    /// session is not in the Established state.
    pub fn prepare_outgoing(&mut self, msg: &mut FixMessage) -> Result<SeqNum, SessionError> {
        self.ensure_established()?;

        let seq = SeqNum::new(self.next_outgoing_seq_num);
        self.next_outgoing_seq_num += 1;

        let header = msg.header_mut();
        header.msg_seq_num = Some(seq);
        if header.begin_string.is_none() {
            header.begin_string = Some(self.begin_string.clone());
        }
        if header.sender_comp_id.is_none() {
            header.sender_comp_id = Some(self.sender_comp_id.clone());
        }
        if header.target_comp_id.is_none() {
            header.target_comp_id = Some(self.target_comp_id.clone());
        }

        Ok(seq)
    }

    const fn ensure_established(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Established => Ok(()),
            SessionState::Unestablished => Err(SessionError::NotEstablished),
            SessionState::Closed => Err(SessionError::Closed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn established_session() -> Session {
        let config = SessionConfig::new(
            CompId::new("LOCAL").unwrap(),
            CompId::new("REMOTE").unwrap(),
            "FIX.4.4",
        );
        let mut session = Session::new(&config);
        session.establish().unwrap();
        session
    }

    #[test]
    fn test_incoming_monotonic() {
        let mut session = established_session();

        assert!(session.check_incoming_seq_num(1).unwrap().is_ok());
        assert_eq!(session.next_incoming_seq_num(), 2);

        // Mismatch reported, expectation unchanged.
        let check = session.check_incoming_seq_num(5).unwrap();
        assert_eq!(
            check,
            SequenceCheck::Mismatch {
                expected: 2,
                received: 5
            }
        );
        assert_eq!(session.next_incoming_seq_num(), 2);
    }

    #[test]
    fn test_outgoing_stamping_gap_free() {
        let mut session = established_session();

        let mut first = FixMessage::with_msg_type("0");
        let mut second = FixMessage::with_msg_type("D");

        assert_eq!(session.prepare_outgoing(&mut first).unwrap().value(), 1);
        assert_eq!(session.prepare_outgoing(&mut second).unwrap().value(), 2);
        assert_eq!(first.msg_seq_num(), Some(SeqNum::new(1)));
        assert_eq!(second.msg_seq_num(), Some(SeqNum::new(2)));
        assert_eq!(session.next_outgoing_seq_num(), 3);
    }

    #[test]
    fn test_prepare_outgoing_fills_identity() {
        let mut session = established_session();
        let mut msg = FixMessage::with_msg_type("0");
        session.prepare_outgoing(&mut msg).unwrap();

        let header = msg.header();
        assert_eq!(header.begin_string.as_deref(), Some("FIX.4.4"));
        assert_eq!(
            header.sender_comp_id.as_ref().map(CompId::as_str),
            Some("LOCAL")
        );
        assert_eq!(
            header.target_comp_id.as_ref().map(CompId::as_str),
            Some("REMOTE")
        );
    }

    #[test]
    fn test_unestablished_refuses_processing() {
        let config = SessionConfig::new(
            CompId::new("LOCAL").unwrap(),
            CompId::new("REMOTE").unwrap(),
            "FIX.4.4",
        );
        let mut session = Session::new(&config);

        assert_eq!(
            session.check_incoming_seq_num(1),
            Err(SessionError::NotEstablished)
        );
        let mut msg = FixMessage::with_msg_type("0");
        assert_eq!(
            session.prepare_outgoing(&mut msg),
            Err(SessionError::NotEstablished)
        );
    }

    #[test]
    fn test_closed_is_terminal() {
        let mut session = established_session();
        session.close();

        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(session.check_incoming_seq_num(1), Err(SessionError::Closed));
        let mut msg = FixMessage::with_msg_type("0");
        assert_eq!(session.prepare_outgoing(&mut msg), Err(SessionError::Closed));
        assert_eq!(session.establish(), Err(SessionError::Closed));
    }

    #[test]
    fn test_initial_seq_nums_from_config() {
        let config = SessionConfig::new(
            CompId::new("LOCAL").unwrap(),
            CompId::new("REMOTE").unwrap(),
            "FIX.4.4",
        )
        .with_initial_seq_nums(100, 200);
        let mut session = Session::new(&config);
        session.establish().unwrap();

        assert_eq!(session.next_outgoing_seq_num(), 100);
        assert_eq!(session.next_incoming_seq_num(), 200);
        assert!(session.check_incoming_seq_num(200).unwrap().is_ok());
    }
}
