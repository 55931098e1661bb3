//! Event dispatch for Herald.
//!
//! A [`Dispatcher`] parses the event's message type, looks it up in a
//! [`RoutingTable`], builds the matching sender from the shared
//! [`SenderServices`], prepares and sends the message once, and normalizes
//! the result into a [`DispatchResponse`](herald_core::DispatchResponse).

pub mod dispatcher;
pub mod error;
pub mod routing;
pub mod services;

pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use routing::RoutingTable;
pub use services::SenderServices;
