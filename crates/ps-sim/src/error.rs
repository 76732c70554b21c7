use ps_agent::AgentError;
use ps_core::PsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] PsError),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[cfg(feature = "parallel")]
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SimResult<T> = Result<T, SimError>;
