//! Session backend client
//!
//! Fetches per-session Vertex AI credentials from
//! `/api/projects/{project}/agentic-sessions/{session}/vertex/credentials`.

pub mod client;

pub use client::HttpCredentialFetcher;
