use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("reference error: {kind} {id} has no vertices")]
    EmptyGeometry { kind: &'static str, id: u32 },

    #[error("reference error: explicit goal is not finite")]
    NonFiniteGoal,
}

pub type RouteResult<T> = Result<T, RouteError>;
