//! Per-command working record

use termagent_core::{CommandError, ToolCommand, ToolOutput};

/// Everything known about one command as it moves through the stages.
///
/// After parsing, exactly one of `parsed_command` and `error` is set.
/// After formatting, only `tool_output` is set and it holds text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentState {
    pub user_command: Option<String>,
    pub parsed_command: Option<ToolCommand>,
    pub tool_output: Option<ToolOutput>,
    pub error: Option<CommandError>,
}

impl AgentState {
    pub fn new(user_command: impl Into<String>) -> Self {
        Self {
            user_command: Some(user_command.into()),
            ..Default::default()
        }
    }

    /// The user-visible error text, if any
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Output text once the state has been formatted
    pub fn output_text(&self) -> Option<&str> {
        match &self.tool_output {
            Some(ToolOutput::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// True when nothing of the finished command is carried forward
    pub fn is_reset(&self) -> bool {
        self.user_command.is_none() && self.parsed_command.is_none() && self.error.is_none()
    }
}
