//! Error type for style compilation and execution.

use thiserror::Error;

/// Error returned by [`Style::compile`](crate::Style::compile) and
/// [`Style::execute`](crate::Style::execute).
///
/// Compilation errors carry the byte offset of the offending directive in the
/// template. Execution errors name the directive whose call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// The template could not be parsed, or names an unknown function.
    #[error("compile error at byte {offset}: {message}")]
    Compile { offset: usize, message: String },

    /// A directive was called with bad arguments, or an extension failed.
    #[error("error calling {directive}: {message}")]
    Execute { directive: String, message: String },
}

impl StyleError {
    pub(crate) fn compile(offset: usize, message: impl Into<String>) -> Self {
        StyleError::Compile {
            offset,
            message: message.into(),
        }
    }

    /// Returns true for parse-time failures.
    pub fn is_compile(&self) -> bool {
        matches!(self, StyleError::Compile { .. })
    }
}
