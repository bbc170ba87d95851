//! Tool backends - the collaborator that actually performs tool actions.
//!
//! The pipeline only talks to [`ToolBackend`]; the shipped [`MockBackend`]
//! acknowledges each call without touching the filesystem.

use serde::Serialize;

/// What a backend operation produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Text(String),
    Structured(serde_json::Value),
}

impl ToolOutput {
    pub fn is_empty(&self) -> bool {
        match self {
            ToolOutput::Text(text) => text.is_empty(),
            ToolOutput::Structured(serde_json::Value::String(text)) => text.is_empty(),
            ToolOutput::Structured(value) => value.is_null(),
        }
    }
}

impl From<String> for ToolOutput {
    fn from(text: String) -> Self {
        ToolOutput::Text(text)
    }
}

impl From<serde_json::Value> for ToolOutput {
    fn from(value: serde_json::Value) -> Self {
        ToolOutput::Structured(value)
    }
}

/// A typed failure reported by a backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("Path not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Operation failed on {path}: {reason}")]
    Failed { path: String, reason: String },
}

/// One operation per tool
pub trait ToolBackend {
    fn list_files(&self, path: &str) -> Result<ToolOutput, BackendError>;

    fn read_file(&self, path: &str) -> Result<ToolOutput, BackendError>;

    fn create_directory(&self, path: &str) -> Result<ToolOutput, BackendError>;
}

impl<B: ToolBackend + ?Sized> ToolBackend for &B {
    fn list_files(&self, path: &str) -> Result<ToolOutput, BackendError> {
        (**self).list_files(path)
    }

    fn read_file(&self, path: &str) -> Result<ToolOutput, BackendError> {
        (**self).read_file(path)
    }

    fn create_directory(&self, path: &str) -> Result<ToolOutput, BackendError> {
        (**self).create_directory(path)
    }
}

/// Backend that acknowledges calls without side effects
#[derive(Debug, Clone, Copy, Default)]
pub struct MockBackend;

impl ToolBackend for MockBackend {
    fn list_files(&self, path: &str) -> Result<ToolOutput, BackendError> {
        Ok(format!("Mock success: 'ListFilesTool' called with path '{}'", path).into())
    }

    fn read_file(&self, path: &str) -> Result<ToolOutput, BackendError> {
        Ok(format!("Mock success: 'ReadFileTool' called to read file '{}'", path).into())
    }

    fn create_directory(&self, path: &str) -> Result<ToolOutput, BackendError> {
        Ok(format!("Mock success: 'CreateDirectoryTool' called to create directory '{}'", path).into())
    }
}
