/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Per-connection pipeline glue between the codec and the session.
//!
//! Every inbound message passes through [`SessionHandler::on_inbound`] after
//! decode, every outbound message through [`SessionHandler::on_outbound`]
//! before encode. The handler owns the connection's [`Session`] as a plain
//! field; there is no keyed registry and no locking, because one handler
//! belongs to exactly one connection's processing lane.
//!
//! Sequence mismatches are advisory: they are logged with the expected and
//! received numbers and the message is still forwarded. An inbound message
//! with no established session is fatal to the connection.

use crate::session::{SequenceCheck, Session};
use fixline_core::error::{MessageError, SessionError};
use fixline_core::message::FixMessage;
use fixline_core::registry::tags;
use fixline_core::types::{MsgType, SeqNum};
use tracing::{debug, error, info, warn};

/// Session-aware message handler for one connection.
#[derive(Debug, Default)]
pub struct SessionHandler {
    session: Option<Session>,
}

impl SessionHandler {
    /// Creates a handler with no session attached.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a session after the logon handshake completes.
    ///
    /// # Arguments
    /// * `session` - The freshly created session for this connection
    ///
    /// # Errors
    /// Returns [`SessionError::Closed`] if the session was already torn down.
    pub fn on_established(&mut self, mut session: Session) -> Result<(), SessionError> {
        session.establish()?;
        info!(
            sender = session.sender_comp_id().as_str(),
            target = session.target_comp_id().as_str(),
            "session established"
        );
        self.session = Some(session);
        Ok(())
    }

    /// Returns the attached session, if any.
    #[inline]
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Validates an inbound message's sequence number and forwards it.
    ///
    /// A mismatch is logged and the message is forwarded anyway; gap
    /// recovery belongs to a collaborator. A missing session is fatal: the
    /// caller must terminate the connection.
    ///
    /// # Arguments
    /// * `msg` - The freshly decoded message
    ///
    /// # Errors
    /// [`SessionError::NotEstablished`] when no session is attached,
    /// [`SessionError::Closed`] when the session was torn down.
    pub fn on_inbound(&mut self, msg: FixMessage) -> Result<FixMessage, SessionError> {
        let Some(session) = self.session.as_mut() else {
            error!("session not established, dropping inbound message");
            return Err(SessionError::NotEstablished);
        };

        let received = msg.msg_seq_num().map_or(0, SeqNum::value);
        match session.check_incoming_seq_num(received)? {
            SequenceCheck::Ok => {}
            SequenceCheck::Mismatch { expected, received } => {
                warn!(expected, received, "sequence number mismatch");
            }
        }
        Ok(msg)
    }

    /// Stamps an outbound message before it is handed to the encoder.
    ///
    /// # Arguments
    /// * `msg` - The message about to be encoded
    ///
    /// # Errors
    /// [`SessionError::NotEstablished`] when no session is attached,
    /// [`SessionError::Closed`] when the session was torn down.
    pub fn on_outbound(&mut self, msg: &mut FixMessage) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NotEstablished)?;
        let seq = session.prepare_outgoing(msg)?;
        debug!(seq = seq.value(), "stamped outbound message");
        Ok(())
    }

    /// Discards the session on connection termination.
    pub fn on_closed(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
            info!(
                sender = session.sender_comp_id().as_str(),
                target = session.target_comp_id().as_str(),
                "session closed"
            );
        }
    }

    /// Builds a Reject message referencing an inbound message.
    ///
    /// The reject carries RefSeqNum (45) = the original MsgSeqNum and
    /// RefMsgType (372) = the original message type, and goes out through
    /// the normal outbound path like any other message.
    ///
    /// # Arguments
    /// * `original` - The inbound message being rejected
    ///
    /// # Errors
    /// Propagates [`MessageError`] from field assembly.
    pub fn reject_for(original: &FixMessage) -> Result<FixMessage, MessageError> {
        let mut reject = FixMessage::with_msg_type(MsgType::Reject);
        if let Some(seq) = original.msg_seq_num() {
            reject.add_int(tags::REF_SEQ_NUM, seq.value() as i64)?;
        }
        if let Some(msg_type) = original.msg_type() {
            reject.add(tags::REF_MSG_TYPE, msg_type.as_str())?;
        }
        Ok(reject)
    }
}
