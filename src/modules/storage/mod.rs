//! Storage module for complaint media
//!
//! [`MediaStore`] is the seam the complaint service uploads through;
//! [`MinIOClient`] implements it against MinIO or any S3-compatible service.

mod media_store;
mod minio_client;

pub use media_store::{MediaStore, MemoryMediaStore};
pub use minio_client::MinIOClient;
