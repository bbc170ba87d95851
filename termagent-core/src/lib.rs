//! # termagent core
//!
//! Building blocks for a terminal agent that turns natural-language commands
//! into structured tool calls.
//!
//! ## Core Concepts
//! - **Schema registry**: the tools the model may choose from, with typed arguments
//! - **Tool commands**: a closed enum of validated tool calls, decoded from model answers
//! - **Backends**: the collaborator that performs (or mocks) each tool action
//! - **Provider**: Trait-based LLM communication (Gemini, OpenAI, Anthropic)

pub mod error;
pub mod schema;
pub mod command;
pub mod backend;
pub mod prompt;
pub mod provider;

pub use error::{Error, ErrorKind, ErrorStatus, Result};
pub use schema::{ArgumentSpec, ArgumentType, SchemaRegistry, ToolSchema, NO_SUITABLE_TOOL};
pub use command::{
    CommandError, CreateDirectoryArgs, ListFilesArgs, ReadFileArgs, ToolCommand, ToolSelection,
};
pub use backend::{BackendError, MockBackend, ToolBackend, ToolOutput};
pub use prompt::{extract_json, CommandPrompt};
pub use provider::{
    AnyProvider, AnthropicProvider, ChatMessage, CompletionRequest, CompletionResponse,
    FinishReason, LlmProvider, OpenAIProvider, ProviderConfig, ProviderError, ProviderType,
    ResponseFormat, Role, ToolDefinition, Usage, UsageTracker,
};
