//! Test doubles for the provider and backend collaborators

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::Mutex;
use termagent_core::{
    BackendError, CompletionRequest, CompletionResponse, FinishReason, LlmProvider,
    ProviderError, ToolBackend, ToolOutput, Usage,
};

/// Provider that replays canned replies and records requests
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, content: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(content.into()));
        self
    }

    pub fn reply_json(self, value: serde_json::Value) -> Self {
        self.reply(value.to_string())
    }

    pub fn fail(self, err: ProviderError) -> Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn models(&self) -> Vec<String> {
        vec!["scripted-model".into()]
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Other("no scripted reply left".into())))?;

        Ok(CompletionResponse {
            id: "scripted".into(),
            model: "scripted-model".into(),
            content: if reply.is_empty() { None } else { Some(reply) },
            finish_reason: FinishReason::Stop,
            usage: Usage { prompt_tokens: 10, completion_tokens: 5, total_tokens: 15 },
        })
    }
}

/// Backend that records every call, then succeeds or fails with a fixed error
pub struct RecordingBackend {
    calls: RefCell<Vec<(&'static str, String)>>,
    failure: Option<BackendError>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self { calls: RefCell::new(Vec::new()), failure: None }
    }

    pub fn failing(err: BackendError) -> Self {
        Self { calls: RefCell::new(Vec::new()), failure: Some(err) }
    }

    pub fn calls(&self) -> Vec<(&'static str, String)> {
        self.calls.borrow().clone()
    }

    fn record(&self, op: &'static str, path: &str) -> Result<ToolOutput, BackendError> {
        self.calls.borrow_mut().push((op, path.to_string()));
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(ToolOutput::Text(format!("{} {}", op, path))),
        }
    }
}

impl ToolBackend for RecordingBackend {
    fn list_files(&self, path: &str) -> Result<ToolOutput, BackendError> {
        self.record("list_files", path)
    }

    fn read_file(&self, path: &str) -> Result<ToolOutput, BackendError> {
        self.record("read_file", path)
    }

    fn create_directory(&self, path: &str) -> Result<ToolOutput, BackendError> {
        self.record("create_directory", path)
    }
}
