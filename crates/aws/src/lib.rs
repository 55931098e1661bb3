//! AWS-backed attachment storage for Herald.
//!
//! [`S3AttachmentStore`] implements
//! [`AttachmentStore`](herald_blob::AttachmentStore) by writing each
//! offloaded attachment to an S3 bucket and returning a console URL for it.
//! The bucket is resolved per upload through the shared
//! [`ConfigResolver`](herald_config::ConfigResolver) unless fixed in
//! [`S3StoreConfig`].

pub mod auth;
pub mod config;
pub mod error;
pub mod s3;

pub use config::{AwsBaseConfig, S3StoreConfig};
pub use error::AwsStoreError;
pub use s3::S3AttachmentStore;
