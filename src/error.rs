use thiserror::Error;

/// Failure of a single provider call. Chains swallow these and move on.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    #[error("no result found")]
    NotFound,
    #[error("no route found")]
    NoRoute,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

/// The only errors surfaced by route planning.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to calculate route: {0}")]
    RouteFailed(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}
