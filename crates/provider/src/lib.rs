pub mod error;
pub mod sender;
pub mod slot;

pub use error::SenderError;
pub use sender::Sender;
pub use slot::PreparedSlot;
