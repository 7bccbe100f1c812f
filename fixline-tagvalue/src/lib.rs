/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # Fixline Tag-Value
//!
//! FIX tag=value wire codec for the fixline engine.
//!
//! This crate provides serialization and parsing of FIX messages in the
//! standard tag=value format with SOH (0x01) delimiters:
//!
//! - **Framing**: BodyLength and CheckSum computed over the exact wire
//!   boundaries the protocol mandates
//! - **Encoder**: [`encode`] turns a [`fixline_core::FixMessage`] into a
//!   framed byte sequence
//! - **Decoder**: [`Decoder`] validates framing and checksum and rebuilds
//!   the message model, repeating groups included
//!
//! The codec is pure with respect to session state: sequence validation and
//! stamping happen around it, never inside it, so it stays usable outside a
//! sessioned context.

pub mod decoder;
pub mod encoder;
pub mod frame;

pub use decoder::Decoder;
pub use encoder::encode;
pub use frame::{SOH, checksum};
