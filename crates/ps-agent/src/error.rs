use thiserror::Error;

use ps_core::AgentId;
use ps_route::RouteError;

#[derive(Debug, Error, PartialEq)]
pub enum AgentError {
    /// A physical parameter or initial state value is out of range.
    #[error("configuration error: {param} = {value} is out of range")]
    Configuration { param: &'static str, value: f32 },

    /// A destination refers to geometry that cannot be steered toward.
    #[error(transparent)]
    Reference(#[from] RouteError),

    #[error("agent {0} is already in the store")]
    DuplicateId(AgentId),

    #[error("agent id {0} is the unassigned sentinel")]
    InvalidId(AgentId),
}

pub type AgentResult<T> = Result<T, AgentError>;

/// Diagnostic: the agent had nothing to steer toward this tick and held its
/// position.  Reported, never raised.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
#[error("agent {0} has no target; holding position")]
pub struct NoTargetError(pub AgentId);
