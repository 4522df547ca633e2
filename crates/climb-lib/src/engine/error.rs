//! Errors that can occur while running a grammar.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Execution fuel exhausted (too many interpreter steps).
    #[error("runtime execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (rule calls or class entries nested too deeply).
    #[error("runtime recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("no rule named `{0}`")]
    UnknownRule(String),
}

impl From<RuntimeError> for crate::Error {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::ExecFuelExhausted => Self::ExecFuelExhausted,
            RuntimeError::RecursionLimitExceeded => Self::RecursionLimitExceeded,
            RuntimeError::UnknownRule(name) => Self::UnknownRule(name),
        }
    }
}
