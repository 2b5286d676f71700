pub mod application;
pub mod company;
pub mod job;
pub mod user;

/// Raised when a TEXT column holds a value outside one of the closed enums.
#[derive(Debug, thiserror::Error)]
#[error("unknown variant: {0}")]
pub struct UnknownVariant(pub String);
