//! Route stage - decide whether a parsed command runs

use crate::state::AgentState;
use std::fmt;
use tracing::debug;

/// Where the state goes after parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Execute,
    Format,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Execute => "execute",
            Route::Format => "format",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error always wins; otherwise a parsed command is executed.
pub fn route(state: &AgentState) -> Route {
    let route = if state.error.is_some() {
        Route::Format
    } else if state.parsed_command.is_some() {
        Route::Execute
    } else {
        Route::Format
    };
    debug!(%route, "routing");
    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use termagent_core::{CommandError, ReadFileArgs, ToolCommand};

    fn command() -> ToolCommand {
        ToolCommand::ReadFile(ReadFileArgs { path: "a".into() })
    }

    #[test]
    fn test_parsed_command_executes() {
        let state = AgentState { parsed_command: Some(command()), ..AgentState::new("cat a") };
        assert_eq!(route(&state), Route::Execute);
    }

    #[test]
    fn test_error_goes_to_format() {
        let state = AgentState {
            error: Some(CommandError::Parse("boom".into())),
            ..AgentState::new("cat a")
        };
        assert_eq!(route(&state), Route::Format);
    }

    #[test]
    fn test_error_wins_over_command() {
        let state = AgentState {
            parsed_command: Some(command()),
            error: Some(CommandError::NoCommand),
            ..Default::default()
        };
        assert_eq!(route(&state), Route::Format);
    }

    #[test]
    fn test_empty_state_goes_to_format() {
        assert_eq!(route(&AgentState::default()), Route::Format);
        assert_eq!(Route::Format.to_string(), "format");
    }
}
