/// Domain errors raised outside request validation (configuration and
/// rule construction). Rejected requests use
/// [`ValidationFailure`](crate::product::violation::ValidationFailure).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}
