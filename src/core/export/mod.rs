//! Export orchestration
//!
//! This module provides the batch export logic for Morphex, including:
//! - The export driver walking a document's morph shapes
//! - Retryable artifact writes with operator decisions
//! - Progress events and the export result

pub mod exporter;
pub mod progress;
pub mod summary;
pub mod writer;

pub use exporter::MorphShapeExporter;
pub use progress::{ExportEventListener, ProgressEvent, TracingProgress, MORPH_SHAPE_CATEGORY};
pub use summary::ExportResult;
pub use writer::{
    write_with_retry, AbortRetryIgnoreHandler, Decision, FailedOperation, FixedDecision,
    RetryPolicy, WriteOutcome,
};
