//! Credential file infrastructure
//!
//! Materializes fetched credentials on disk:
//! - Owner-read-only files from the moment of creation
//! - Atomic replace of an existing credential file
//! - Per-path serialization of concurrent installs

pub mod file_writer;

pub use file_writer::write_protected;
