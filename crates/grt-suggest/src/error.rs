// error.rs - Error types for suggestion providers.

use thiserror::Error;

/// Errors a suggestion provider can report.
///
/// The mock provider never fails. These exist for real back ends and for
/// provider selection.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// The back end could not produce suggestions.
    #[error("suggestion service unavailable: {0}")]
    Unavailable(String),

    /// Config named a provider this build doesn't know.
    #[error("unknown suggestion provider: {0}")]
    UnknownProvider(String),
}
