//! Post-export verification
//!
//! Re-reads every written artifact, records its SHA-256 checksum and compares
//! it with a fresh in-memory render. Since rendering is deterministic, any
//! difference means the file on disk is stale or was modified.

pub mod checksum;
pub mod report;
pub mod verify;

pub use report::{ArtifactChecksum, VerificationFailure, VerificationReport};
pub use verify::Verifier;
