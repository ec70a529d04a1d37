//! The capability boundary to the generative-AI endpoint.
//!
//! The store core never calls out; embedders implement [`AiClient`] over
//! whatever transport they use and feed the resulting tool calls back
//! through [`crate::dispatch::dispatch_named`]. A reply may land an
//! unbounded time after the triggering event — by then the user may have
//! archived or left the chat — and is applied as an ordinary later
//! operation with no special ordering guarantee.

use serde_json::Value;

use crate::error::AgentError;
use crate::tools::ToolSpec;

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub name: String,
    pub args: Value,
}

/// What the model produced for one prompt: free text, tool calls, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AiReply {
    pub text: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

/// Opaque text-generation capability.
///
/// Implementations own the network transport, credentials and retry
/// policy; the agent layer only consumes replies.
pub trait AiClient {
    /// Generate a reply for a conversational prompt.
    fn generate(&self, prompt: &str) -> Result<AiReply, AgentError>;

    /// Generate with the given tool catalog advertised to the model.
    fn generate_with_tools(&self, prompt: &str, tools: &[ToolSpec]) -> Result<AiReply, AgentError>;
}
