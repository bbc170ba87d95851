//! Agent implementation - runs one command through parse, route, execute and format

use crate::executor::ToolExecutor;
use crate::formatter::format_output;
use crate::parser::CommandParser;
use crate::router::{route, Route};
use crate::state::AgentState;
use termagent_core::{LlmProvider, MockBackend, SchemaRegistry, ToolBackend, UsageTracker};
use tracing::info;

/// Configuration for the agent
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Model override; the provider's default is used when unset
    pub model: Option<String>,
    /// Sampling temperature for tool selection
    pub temperature: f32,
    pub max_tokens: Option<usize>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.1,
            max_tokens: None,
        }
    }
}

/// Result of one command
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The text to show the user
    pub output: String,
    /// The branch taken after parsing
    pub route: Route,
    /// Final (reset) state
    pub state: AgentState,
}

/// The agent orchestrator - owns the parser and the executor
pub struct Agent<P, B = MockBackend> {
    parser: CommandParser<P>,
    executor: ToolExecutor<B>,
}

impl<P: LlmProvider> Agent<P, MockBackend> {
    /// Create an agent backed by the mock tool backend
    pub fn new(provider: P, config: AgentConfig) -> Self {
        Self::with_backend(provider, MockBackend, config)
    }
}

impl<P: LlmProvider, B: ToolBackend> Agent<P, B> {
    pub fn with_backend(provider: P, backend: B, config: AgentConfig) -> Self {
        Self {
            parser: CommandParser::new(provider, SchemaRegistry::builtin(), config),
            executor: ToolExecutor::new(backend),
        }
    }

    /// Run a single command to completion. Never fails; errors become output text.
    #[tracing::instrument(skip(self))]
    pub async fn run(&mut self, user_command: &str) -> Outcome {
        let state = self.parser.parse(AgentState::new(user_command)).await;

        let route = route(&state);
        let state = match route {
            Route::Execute => self.executor.execute(state),
            Route::Format => state,
        };

        let state = format_output(state);
        let output = state.output_text().unwrap_or_default().to_string();
        info!(%route, "command finished");

        Outcome { output, route, state }
    }

    pub fn parser(&self) -> &CommandParser<P> {
        &self.parser
    }

    pub fn registry(&self) -> &SchemaRegistry {
        self.parser.registry()
    }

    /// Token usage across every command run so far
    pub fn usage(&self) -> &UsageTracker {
        self.parser.usage()
    }

    pub fn provider(&self) -> &P {
        self.parser.provider()
    }
}
