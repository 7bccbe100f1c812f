/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # Fixline Core
//!
//! Core types, message model, and error definitions for the fixline FIX
//! protocol engine.
//!
//! This crate provides the fundamental building blocks used across all
//! fixline crates:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Field registry**: Total tag-to-descriptor lookup with group membership
//! - **Fragments**: `Field`, `Group`, and the `MessageFragment` sum type
//! - **Message model**: `FixMessage` with header/body/trailer classification
//! - **Core types**: `SeqNum`, `CompId`, `MsgType`

pub mod error;
pub mod field;
pub mod message;
pub mod registry;
pub mod types;

pub use error::{DecodeError, EncodeError, FixError, MessageError, Result, SessionError};
pub use field::{Field, Group, GroupField, MessageFragment};
pub use message::{FixMessage, Header, Trailer};
pub use registry::{FieldDef, FieldLocation, for_tag, tags};
pub use types::{CompId, MsgType, SeqNum};
