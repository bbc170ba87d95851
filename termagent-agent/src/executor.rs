//! Execute stage - hand the parsed command to a tool backend

use crate::state::AgentState;
use termagent_core::{CommandError, ToolBackend, ToolCommand};
use tracing::{error, info};

/// Dispatches a [`ToolCommand`] to the matching backend operation
pub struct ToolExecutor<B> {
    backend: B,
}

impl<B: ToolBackend> ToolExecutor<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn execute(&self, state: AgentState) -> AgentState {
        let Some(command) = state.parsed_command.clone() else {
            error!("execute reached without a parsed command");
            return AgentState {
                tool_output: None,
                error: Some(CommandError::NoCommand),
                ..state
            };
        };

        info!(tool = command.name(), path = command.primary_argument(), "executing tool");

        let result = match &command {
            ToolCommand::ListFiles(args) => self.backend.list_files(&args.path),
            ToolCommand::ReadFile(args) => self.backend.read_file(&args.path),
            ToolCommand::CreateDirectory(args) => self.backend.create_directory(&args.path),
        };

        match result {
            Ok(output) => AgentState {
                tool_output: Some(output),
                error: None,
                ..state
            },
            Err(err) => {
                let tool = command.name().to_string();
                error!(%tool, "tool failed: {}", err);
                AgentState {
                    tool_output: None,
                    error: Some(CommandError::Execution { tool, detail: err.to_string() }),
                    ..state
                }
            }
        }
    }
}
