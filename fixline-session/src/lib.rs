/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # Fixline Session
//!
//! FIX session layer for the fixline engine.
//!
//! This crate provides:
//! - **Session**: Per-connection sequencing state machine
//!   (`Unestablished -> Established -> Closed`)
//! - **Session handler**: Pipeline glue that validates inbound sequence
//!   numbers, stamps outbound messages, and builds Reject messages
//! - **Configuration**: Identity and initial sequence numbers per session
//!
//! One session belongs to one connection's processing lane. Nothing here
//! locks: isolation across connections comes from ownership, and mismatch
//! handling is advisory (logged and forwarded), matching the engine's
//! scope of detection without gap recovery.

pub mod config;
pub mod handler;
pub mod session;

pub use config::{SessionConfig, SessionConfigBuilder};
pub use handler::SessionHandler;
pub use session::{SequenceCheck, Session, SessionState};
