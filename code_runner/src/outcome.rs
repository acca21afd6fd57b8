/// Classified result of running one submission against one input.
///
/// Produced fresh for every (submission, test case) pair and never persisted
/// on its own; the marker turns it into a per-test result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The program ran to completion. A non-zero exit status still lands here;
    /// whatever it printed is judged on its output.
    Success { stdout: String, stderr: String },
    /// The toolchain refused the source, or the source could not be prepared
    /// for compilation (unsupported extension, no Java class).
    CompileError { message: String },
    /// A compile or run step exceeded the wall-clock limit. Partial output is discarded.
    Timeout,
    /// Infrastructure failure: missing toolchain binary, I/O fault.
    UnexpectedError { message: String },
}

impl ExecutionOutcome {
    pub fn compile_error(message: impl Into<String>) -> Self {
        ExecutionOutcome::CompileError {
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        ExecutionOutcome::UnexpectedError {
            message: message.into(),
        }
    }

    /// True for outcomes that make every later test case pointless.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExecutionOutcome::CompileError { .. } | ExecutionOutcome::UnexpectedError { .. }
        )
    }
}
