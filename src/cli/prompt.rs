//! Interactive abort/retry/ignore prompt
//!
//! Asks the operator how to proceed when an artifact can't be written.

use crate::core::export::{AbortRetryIgnoreHandler, Decision, FailedOperation};
use std::io::{self, BufRead, BufReader, Stderr, Stdin, Write};

/// Terminal-backed [`AbortRetryIgnoreHandler`]
///
/// Reads answers from `input` and writes questions to `output`. End of input
/// or a broken terminal counts as an abort.
pub struct PromptHandler<R, W> {
    input: R,
    output: W,
}

impl PromptHandler<BufReader<Stdin>, Stderr> {
    /// Prompt on stderr, read from stdin
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R: BufRead, W: Write> PromptHandler<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, failure: &FailedOperation<'_>) -> io::Result<Decision> {
        writeln!(
            self.output,
            "⚠️  Failed to write {} (attempt {}): {}",
            failure.path.display(),
            failure.attempt,
            failure.error
        )?;

        loop {
            write!(self.output, "   [a]bort, [r]etry, [i]gnore? ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(Decision::Abort);
            }

            match parse_answer(&line) {
                Some(decision) => return Ok(decision),
                None => writeln!(self.output, "   Please answer a, r or i")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> AbortRetryIgnoreHandler for PromptHandler<R, W> {
    fn handle(&mut self, failure: &FailedOperation<'_>) -> Decision {
        self.ask(failure).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Prompt failed, aborting");
            Decision::Abort
        })
    }
}

fn parse_answer(answer: &str) -> Option<Decision> {
    match answer.trim().to_lowercase().as_str() {
        "a" | "abort" => Some(Decision::Abort),
        "r" | "retry" => Some(Decision::Retry),
        "i" | "ignore" => Some(Decision::Ignore),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn failure_for<'a>(path: &'a Path, error: &'a io::Error) -> FailedOperation<'a> {
        FailedOperation {
            path,
            error,
            attempt: 1,
        }
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("r\n"), Some(Decision::Retry));
        assert_eq!(parse_answer(" Ignore "), Some(Decision::Ignore));
        assert_eq!(parse_answer("A"), Some(Decision::Abort));
        assert_eq!(parse_answer("maybe"), None);
    }

    #[test]
    fn test_prompt_reads_decision() {
        let error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let path = Path::new("out/3.svg");
        let mut output = Vec::new();
        let mut handler = PromptHandler::new("i\n".as_bytes(), &mut output);

        assert_eq!(handler.handle(&failure_for(path, &error)), Decision::Ignore);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("out/3.svg"));
        assert!(text.contains("denied"));
    }

    #[test]
    fn test_prompt_asks_again_on_unknown_answer() {
        let error = io::Error::new(io::ErrorKind::Other, "disk full");
        let path = Path::new("out/3.svg");
        let mut output = Vec::new();
        let mut handler = PromptHandler::new("x\nr\n".as_bytes(), &mut output);

        assert_eq!(handler.handle(&failure_for(path, &error)), Decision::Retry);
        assert!(String::from_utf8(output)
            .unwrap()
            .contains("Please answer a, r or i"));
    }

    #[test]
    fn test_prompt_aborts_on_end_of_input() {
        let error = io::Error::new(io::ErrorKind::Other, "disk full");
        let path = Path::new("out/3.svg");
        let mut handler = PromptHandler::new("".as_bytes(), Vec::new());

        assert_eq!(handler.handle(&failure_for(path, &error)), Decision::Abort);
    }
}
