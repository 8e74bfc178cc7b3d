//! Retryable artifact writer
//!
//! One artifact write is a single unit of work: open the target file, run the
//! producer, write the bytes, sync. If any I/O step fails, an
//! [`AbortRetryIgnoreHandler`] decides what happens next. A retry re-runs the
//! whole unit, producer included. Errors from the producer itself (malformed
//! geometry, for instance) are never offered to the handler; the file opened
//! for them is removed so no empty artifact is left behind.

use crate::domain::{MorphexError, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Operator decision after a failed write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Run the whole unit of work again
    Retry,
    /// Stop the batch with an error
    Abort,
    /// Skip this artifact and continue
    Ignore,
}

/// Context handed to the decision handler
#[derive(Debug)]
pub struct FailedOperation<'a> {
    pub path: &'a Path,
    pub error: &'a io::Error,
    /// 1-based attempt that just failed
    pub attempt: u32,
}

/// Decides how to proceed after an artifact write fails
pub trait AbortRetryIgnoreHandler {
    fn handle(&mut self, failure: &FailedOperation<'_>) -> Decision;
}

impl<F> AbortRetryIgnoreHandler for F
where
    F: FnMut(&FailedOperation<'_>) -> Decision,
{
    fn handle(&mut self, failure: &FailedOperation<'_>) -> Decision {
        self(failure)
    }
}

/// Handler that always answers the same way
#[derive(Debug, Clone, Copy)]
pub struct FixedDecision(pub Decision);

impl AbortRetryIgnoreHandler for FixedDecision {
    fn handle(&mut self, _failure: &FailedOperation<'_>) -> Decision {
        self.0
    }
}

/// Retries each artifact up to `max_retries` times, then falls back to
/// `exhausted` (abort or ignore)
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub exhausted: Decision,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, exhausted: Decision) -> Self {
        Self {
            max_retries,
            exhausted,
        }
    }
}

impl AbortRetryIgnoreHandler for RetryPolicy {
    fn handle(&mut self, failure: &FailedOperation<'_>) -> Decision {
        if failure.attempt <= self.max_retries {
            crate::log_retry_attempt!(
                failure.attempt,
                self.max_retries + 1,
                failure.error.to_string()
            );
            Decision::Retry
        } else {
            self.exhausted
        }
    }
}

/// What happened to an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The handler chose to ignore a failure
    Skipped,
}

/// Write `path` with bytes from `producer`, consulting `handler` on I/O failure
///
/// # Examples
///
/// ```
/// use morphex::core::export::writer::{write_with_retry, Decision, FixedDecision, WriteOutcome};
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("1.svg");
/// let outcome = write_with_retry(
///     &path,
///     || Ok(b"<svg/>".to_vec()),
///     &mut FixedDecision(Decision::Abort),
/// )
/// .unwrap();
/// assert_eq!(outcome, WriteOutcome::Written);
/// ```
pub fn write_with_retry<P>(
    path: &Path,
    mut producer: P,
    handler: &mut dyn AbortRetryIgnoreHandler,
) -> Result<WriteOutcome>
where
    P: FnMut() -> Result<Vec<u8>>,
{
    let mut attempt = 1;
    loop {
        let error = match write_once(path, &mut producer)? {
            Ok(()) => return Ok(WriteOutcome::Written),
            Err(error) => error,
        };

        tracing::warn!(
            path = %path.display(),
            attempt,
            error = %error,
            "Artifact write failed"
        );

        let failure = FailedOperation {
            path,
            error: &error,
            attempt,
        };
        match handler.handle(&failure) {
            Decision::Retry => attempt += 1,
            Decision::Abort => return Err(MorphexError::artifact_write(path, &error)),
            Decision::Ignore => {
                tracing::warn!(path = %path.display(), "Skipping artifact after write failure");
                return Ok(WriteOutcome::Skipped);
            }
        }
    }
}

/// One attempt. The outer result carries fatal producer errors, the inner
/// one recoverable I/O failures.
fn write_once<P>(path: &Path, producer: &mut P) -> Result<io::Result<()>>
where
    P: FnMut() -> Result<Vec<u8>>,
{
    let mut file = match File::create(path) {
        Ok(file) => file,
        Err(e) => return Ok(Err(e)),
    };
    let bytes = match producer() {
        Ok(bytes) => bytes,
        Err(e) => {
            drop(file);
            if let Err(remove_error) = fs::remove_file(path) {
                tracing::warn!(
                    path = %path.display(),
                    error = %remove_error,
                    "Failed to remove unfinished artifact"
                );
            }
            return Err(e);
        }
    };
    Ok(file.write_all(&bytes).and_then(|()| file.sync_all()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::EncodingError;
    use tempfile::TempDir;

    #[test]
    fn test_write_succeeds_first_time() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("3.svg");
        let mut calls = 0;

        let outcome = write_with_retry(
            &path,
            || {
                calls += 1;
                Ok(b"<svg/>".to_vec())
            },
            &mut FixedDecision(Decision::Abort),
        )
        .unwrap();

        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(calls, 1);
        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
    }

    #[test]
    fn test_abort_returns_artifact_write_error() {
        let dir = TempDir::new().unwrap();
        // a directory in the way makes File::create fail
        let path = dir.path().join("3.svg");
        fs::create_dir(&path).unwrap();

        let err = write_with_retry(&path, || Ok(vec![]), &mut FixedDecision(Decision::Abort))
            .unwrap_err();
        assert!(matches!(err, MorphexError::ArtifactWrite { .. }));
    }

    #[test]
    fn test_ignore_skips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("3.svg");
        fs::create_dir(&path).unwrap();

        let outcome =
            write_with_retry(&path, || Ok(vec![]), &mut FixedDecision(Decision::Ignore)).unwrap();
        assert_eq!(outcome, WriteOutcome::Skipped);
    }

    #[test]
    fn test_retry_policy_gives_up() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("3.svg");
        fs::create_dir(&path).unwrap();
        let mut attempts = Vec::new();

        let mut handler = |failure: &FailedOperation<'_>| {
            attempts.push(failure.attempt);
            RetryPolicy::new(2, Decision::Ignore).handle(failure)
        };
        let outcome = write_with_retry(&path, || Ok(vec![]), &mut handler).unwrap();

        assert_eq!(outcome, WriteOutcome::Skipped);
        assert_eq!(attempts, vec![1, 2, 3]);
    }

    #[test]
    fn test_producer_errors_bypass_handler() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("3.svg");
        let mut consulted = false;

        let err = write_with_retry(
            &path,
            || Err(EncodingError::UnknownCharacter(7).into()),
            &mut |_: &FailedOperation<'_>| {
                consulted = true;
                Decision::Retry
            },
        )
        .unwrap_err();

        assert!(matches!(err, MorphexError::Encoding(_)));
        assert!(!consulted);
    }

    #[test]
    fn test_producer_error_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("4.svg");
        fs::write(&path, "<svg>previous</svg>").unwrap();

        let err = write_with_retry(
            &path,
            || Err(EncodingError::UnknownCharacter(7).into()),
            &mut FixedDecision(Decision::Retry),
        )
        .unwrap_err();

        assert!(matches!(err, MorphexError::Encoding(_)));
        assert!(!path.exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_retry_reruns_producer() {
        if !Path::new("/dev/full").exists() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("3.svg");
        // opening succeeds, writing fails with ENOSPC
        std::os::unix::fs::symlink("/dev/full", &path).unwrap();
        let mut produced = 0;
        let mut decisions = 0;

        let outcome = write_with_retry(
            &path,
            || {
                produced += 1;
                Ok(b"<svg/>".to_vec())
            },
            &mut |failure: &FailedOperation<'_>| {
                decisions += 1;
                fs::remove_file(failure.path).unwrap();
                Decision::Retry
            },
        )
        .unwrap();

        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(produced, 2);
        assert_eq!(decisions, 1);
        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
    }
}
