use crate::outcome::ExecutionOutcome;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Failures inside the sandbox. These never leave [`crate::Sandbox::execute`];
/// they are folded into an [`ExecutionOutcome`] at the boundary.
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("{0}")]
    Compile(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl SandboxError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        SandboxError::Io {
            context: context.into(),
            source,
        }
    }
}

impl From<SandboxError> for ExecutionOutcome {
    fn from(err: SandboxError) -> Self {
        match err {
            SandboxError::Compile(message) => ExecutionOutcome::CompileError { message },
            SandboxError::Timeout(_) => ExecutionOutcome::Timeout,
            other => ExecutionOutcome::UnexpectedError {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(
            ExecutionOutcome::from(SandboxError::Compile("bad".into())),
            ExecutionOutcome::compile_error("bad")
        );
        assert_eq!(
            ExecutionOutcome::from(SandboxError::Timeout(Duration::from_secs(1))),
            ExecutionOutcome::Timeout
        );

        let missing = SandboxError::Spawn {
            program: "javac".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        match ExecutionOutcome::from(missing) {
            ExecutionOutcome::UnexpectedError { message } => {
                assert!(message.contains("javac"), "got: {message}");
            }
            other => panic!("expected UnexpectedError, got {other:?}"),
        }
    }
}
