//! Error type for policy execution.

use std::error::Error;
use std::fmt;

use perc_core::{RoutingError, TransitError};

/// Errors surfaced while applying a dynamics policy.
///
/// Both variants wrap caller-contract violations from the layers below;
/// neither is retryable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DynamicsError {
    /// The movement primitive rejected a move.
    Transit(TransitError),
    /// A routing-table lookup failed.
    Routing(RoutingError),
}

impl fmt::Display for DynamicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transit(e) => write!(f, "transit: {e}"),
            Self::Routing(e) => write!(f, "routing: {e}"),
        }
    }
}

impl Error for DynamicsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transit(e) => Some(e),
            Self::Routing(e) => Some(e),
        }
    }
}

impl From<TransitError> for DynamicsError {
    fn from(e: TransitError) -> Self {
        Self::Transit(e)
    }
}

impl From<RoutingError> for DynamicsError {
    fn from(e: RoutingError) -> Self {
        Self::Routing(e)
    }
}
