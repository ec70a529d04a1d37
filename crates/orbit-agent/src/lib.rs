//! # orbit-agent
//!
//! The trusted-automation boundary of the Orbit store: a fixed catalog of
//! privileged and ordinary operations the generative-AI endpoint can invoke
//! by name with a loosely-typed argument record.
//!
//! Incoming invocations parse into the strongly-typed [`AgentCommand`] and
//! run through one dispatch function against the store; unknown names and
//! malformed arguments come back as failure outcomes, never as raised
//! faults. The core never initiates calls to the model — the transport
//! behind [`AiClient`] is the embedder's concern.

pub mod client;
pub mod command;
pub mod dispatch;
pub mod tools;

mod error;

pub use client::{AiClient, AiReply, ToolCall};
pub use command::{AgentCommand, PostRequest};
pub use dispatch::{dispatch, dispatch_named, ToolOutcome};
pub use error::AgentError;
pub use tools::{ToolSpec, TOOLS};
