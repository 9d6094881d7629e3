use thiserror::Error;

use crate::remote::StoreError;

/// Error when the prompt round-trip to the client fails.
/// Distinct from cancellation, which is a normal response.
#[derive(Error, Debug)]
#[error("Prompt request failed: {0}")]
pub struct PromptError(pub String);

/// Error when the document edit cannot be applied.
#[derive(Error, Debug)]
#[error("Failed to apply document edit: {0}")]
pub struct EditError(pub String);

/// Defines errors that may occur during reconciliation.
///
/// Missing input and key conflicts are not errors; they are terminal
/// [`Outcome`](super::Outcome) values. Only transport-level failures of the
/// injected capabilities end up here.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// Remote store lookup or write failed
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Prompt round-trip failed
    #[error(transparent)]
    Prompt(#[from] PromptError),
    /// Document edit failed
    #[error(transparent)]
    Edit(#[from] EditError),
}
