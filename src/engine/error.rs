use thiserror::Error;

/// Failures surfaced by the engine. Provider errors pass through the
/// resolvers unmodified; nothing in the core retries.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The provider replied with neither content nor a tool invocation.
    #[error("provider returned no content and no tool call")]
    ProviderEmptyResponse,

    /// Tool-call arguments were not well-formed for the invoked schema.
    #[error("failed to parse {tool} arguments: {source}")]
    ProviderArgumentParse {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    /// Health reached 0 after an apply. Fatal to the current resolution,
    /// not to the process; state keeps the mutations made before the check.
    #[error("you died")]
    PlayerDeath,

    /// Manual lookup or set against an unknown state field.
    #[error("path not found: {0}")]
    PathNotFound(String),

    /// Opaque transport failure from the provider call.
    #[error("provider transport error")]
    ProviderTransport(#[from] reqwest::Error),
}
