//! Format stage - reduce the state to one user-facing string

use crate::state::AgentState;
use serde_json::Value;
use termagent_core::ToolOutput;
use tracing::debug;

/// Shown when the tool produced nothing and no error was recorded
pub const NO_OUTPUT: &str = "No output from tool or an earlier error occurred.";

/// Render the outcome and return a fresh state holding only that text.
pub fn format_output(state: AgentState) -> AgentState {
    let text = match (&state.error, &state.tool_output) {
        (Some(err), _) => format!("Error: {}", err),
        (None, Some(output)) if !output.is_empty() => render(output),
        (None, _) => NO_OUTPUT.to_string(),
    };
    debug!(output = %text, "formatted");

    AgentState {
        tool_output: Some(ToolOutput::Text(text)),
        ..Default::default()
    }
}

fn render(output: &ToolOutput) -> String {
    match output {
        ToolOutput::Text(text) => text.clone(),
        ToolOutput::Structured(Value::String(text)) => text.clone(),
        ToolOutput::Structured(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    }
}
