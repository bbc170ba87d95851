//! # termagent agent
//!
//! One user command flows through four stages:
//! 1. **Parse**: the LLM picks a tool and arguments, validated against the schema registry
//! 2. **Route**: a parse failure goes straight to formatting, a command goes to execution
//! 3. **Execute**: the tool backend performs (or mocks) the action
//! 4. **Format**: whatever came out, including errors, becomes one line of text
//!
//! Each stage takes the [`AgentState`] by value and returns the next one.

mod state;
mod parser;
mod router;
mod executor;
mod formatter;
mod agent;

#[cfg(test)]
mod testing;

pub use state::AgentState;
pub use parser::CommandParser;
pub use router::{route, Route};
pub use executor::ToolExecutor;
pub use formatter::{format_output, NO_OUTPUT};
pub use agent::{Agent, AgentConfig, Outcome};
