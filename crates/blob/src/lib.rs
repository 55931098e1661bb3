pub mod error;
pub mod memory;
pub mod store;
pub mod types;

pub use error::BlobError;
pub use memory::MemoryAttachmentStore;
pub use store::{AttachmentStore, validate_upload};
pub use types::{AttachmentLocator, ContentType, guess_content_type};
