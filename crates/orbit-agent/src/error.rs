use thiserror::Error;

/// Errors produced while handling an agent invocation.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The invocation named a tool outside the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The argument record did not match the tool's payload shape.
    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArgs {
        tool: String,
        source: serde_json::Error,
    },

    /// The transport behind the model endpoint failed.
    #[error("AI client error: {0}")]
    Client(String),
}
