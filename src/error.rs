//! Error type for layout planning.

use thiserror::Error;

/// Layout computation error.
///
/// Every rejection is a usage error: malformed crop units, non-positive
/// targets, unknown corners, crops that miss the source. Nothing is
/// retryable, so there is a single variant carrying a static reason.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum LayoutError {
    /// An argument was outside the accepted domain.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: &'static str,
    },
}

impl LayoutError {
    pub(crate) const fn invalid(reason: &'static str) -> Self {
        Self::InvalidArgument { reason }
    }

    /// The static reason attached to this error.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidArgument { reason } => reason,
        }
    }
}
