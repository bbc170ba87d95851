//! Parse stage - ask the LLM which tool fits the command

use crate::agent::AgentConfig;
use crate::state::AgentState;
use chrono::Local;
use termagent_core::{
    extract_json, ChatMessage, CommandError, CommandPrompt, CompletionRequest, LlmProvider,
    ResponseFormat, SchemaRegistry, ToolCommand, ToolSelection, UsageTracker,
};
use tracing::{debug, error};

/// Turns raw user text into a validated [`ToolCommand`] via an LLM
pub struct CommandParser<P> {
    provider: P,
    registry: SchemaRegistry,
    config: AgentConfig,
    usage: UsageTracker,
}

impl<P: LlmProvider> CommandParser<P> {
    pub fn new(provider: P, registry: SchemaRegistry, config: AgentConfig) -> Self {
        Self {
            provider,
            registry,
            config,
            usage: UsageTracker::new(),
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn usage(&self) -> &UsageTracker {
        &self.usage
    }

    /// The messages sent to the model for `user_command`
    pub fn messages(&self, user_command: &str) -> Vec<ChatMessage> {
        let prompt = CommandPrompt::new(&self.registry);
        vec![
            ChatMessage::system(prompt.system_prompt()),
            ChatMessage::user(prompt.render(user_command, Local::now().date_naive())),
        ]
    }

    /// Parse stage. Never fails: every problem ends up in `error`.
    pub async fn parse(&mut self, state: AgentState) -> AgentState {
        let user_command = state.user_command.clone().unwrap_or_default();
        debug!(command = %user_command, "parsing user command");

        let parsed = match self.select(&user_command).await {
            Ok(selection) => {
                debug!(tool = %selection.tool_name, arguments = ?selection.arguments, "model selected tool");
                ToolCommand::decode(&selection, &self.registry, &user_command)
            }
            Err(err) => Err(err),
        };

        match parsed {
            Ok(command) => {
                debug!(%command, "command parsed");
                AgentState {
                    parsed_command: Some(command),
                    error: None,
                    ..state
                }
            }
            Err(err) => {
                match &err {
                    CommandError::NoSuitableTool { .. } => debug!(kind = %err.kind(), "{}", err),
                    _ => error!(kind = %err.kind(), "{}", err),
                }
                AgentState {
                    parsed_command: None,
                    error: Some(err),
                    ..state
                }
            }
        }
    }

    async fn select(&mut self, user_command: &str) -> Result<ToolSelection, CommandError> {
        if user_command.trim().is_empty() {
            return Err(CommandError::Parse("empty command".into()));
        }

        let mut request = CompletionRequest::new(self.messages(user_command))
            .with_temperature(self.config.temperature)
            .with_response_format(ResponseFormat::JsonSchema {
                name: "tool_selection".into(),
                schema: self.registry.to_json_schema(),
            });
        if let Some(model) = &self.config.model {
            request = request.with_model(model.clone());
        }
        if let Some(max_tokens) = self.config.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| CommandError::Parse(e.to_string()))?;

        self.usage.track(&response.model, &response.usage);

        let content = response
            .content
            .ok_or_else(|| CommandError::Parse("empty response from model".into()))?;

        serde_json::from_str::<ToolSelection>(extract_json(&content))
            .map_err(|e| CommandError::Parse(format!("malformed tool selection: {}", e)))
    }
}
