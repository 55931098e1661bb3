//! Core types shared by every Herald crate.
//!
//! An [`Event`] comes in, a [`DispatchResponse`] goes out. The
//! [`MessageType`] and [`SenderKind`] enums are the keys of the routing
//! table that connects the two.

pub mod event;
pub mod response;
pub mod types;

pub use event::Event;
pub use response::DispatchResponse;
pub use types::{MessageType, ParseMessageTypeError, SenderKind};
