//! Typed tool commands and the validating decoder that produces them.
//!
//! The model answers with a loosely-typed [`ToolSelection`]: a tool name and
//! a string-keyed argument map. [`ToolCommand::decode`] checks that answer
//! against the [`SchemaRegistry`] and turns it into a closed enum whose
//! variants carry typed argument structs, so nothing downstream handles
//! tool names as strings.

use crate::schema::{ArgumentType, SchemaRegistry, ToolSchema, NO_SUITABLE_TOOL};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use termagent_error::ErrorKind;

/// A tool selection as returned by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSelection {
    #[serde(rename = "toolName", alias = "tool_name")]
    pub tool_name: String,
    #[serde(default, alias = "args")]
    pub arguments: Option<Map<String, Value>>,
}

impl ToolSelection {
    pub fn new(tool_name: impl Into<String>, arguments: Value) -> Self {
        let arguments = match arguments {
            Value::Object(map) => Some(map),
            _ => None,
        };
        Self { tool_name: tool_name.into(), arguments }
    }

    pub fn is_no_suitable_tool(&self) -> bool {
        self.tool_name == NO_SUITABLE_TOOL
    }

    fn argument_str(&self, key: &str) -> Option<&str> {
        self.arguments.as_ref()?.get(key)?.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilesArgs {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadFileArgs {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDirectoryArgs {
    pub path: String,
}

/// A validated tool call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "toolName", content = "arguments")]
pub enum ToolCommand {
    #[serde(rename = "ListFilesTool")]
    ListFiles(ListFilesArgs),
    #[serde(rename = "ReadFileTool")]
    ReadFile(ReadFileArgs),
    #[serde(rename = "CreateDirectoryTool")]
    CreateDirectory(CreateDirectoryArgs),
}

impl ToolCommand {
    /// Registry name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            ToolCommand::ListFiles(_) => "ListFilesTool",
            ToolCommand::ReadFile(_) => "ReadFileTool",
            ToolCommand::CreateDirectory(_) => "CreateDirectoryTool",
        }
    }

    /// The argument the tool acts on
    pub fn primary_argument(&self) -> &str {
        match self {
            ToolCommand::ListFiles(args) => &args.path,
            ToolCommand::ReadFile(args) => &args.path,
            ToolCommand::CreateDirectory(args) => &args.path,
        }
    }

    /// Validate a model answer against the registry.
    ///
    /// `user_command` is used for the no-match message when the model did
    /// not echo the original command back.
    pub fn decode(
        selection: &ToolSelection,
        registry: &SchemaRegistry,
        user_command: &str,
    ) -> Result<ToolCommand, CommandError> {
        if selection.is_no_suitable_tool() {
            let original = selection
                .argument_str("originalCommand")
                .or_else(|| selection.argument_str("original_command"))
                .unwrap_or(user_command);
            return Err(CommandError::NoSuitableTool { original: original.to_string() });
        }

        let schema = registry.get(&selection.tool_name).ok_or_else(|| {
            CommandError::UnknownTool { name: selection.tool_name.clone() }
        })?;

        let empty = Map::new();
        let arguments = selection.arguments.as_ref().unwrap_or(&empty);
        let validated = validate_arguments(schema, arguments)?;

        let invalid = |e: serde_json::Error| CommandError::InvalidArguments {
            tool: schema.name.to_string(),
            field: "arguments".to_string(),
            detail: e.to_string(),
        };

        let command = match schema.name {
            "ListFilesTool" => {
                ToolCommand::ListFiles(serde_json::from_value(validated).map_err(invalid)?)
            }
            "ReadFileTool" => {
                ToolCommand::ReadFile(serde_json::from_value(validated).map_err(invalid)?)
            }
            "CreateDirectoryTool" => {
                ToolCommand::CreateDirectory(serde_json::from_value(validated).map_err(invalid)?)
            }
            // Registered in the schema but not constructible as a command
            other => return Err(CommandError::UnknownTool { name: other.to_string() }),
        };

        Ok(command)
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(path={:?})", self.name(), self.primary_argument())
    }
}

/// Check arguments against a schema: reject unknown fields, require
/// required ones, coerce scalars, fill defaults.
fn validate_arguments(schema: &ToolSchema, arguments: &Map<String, Value>) -> Result<Value, CommandError> {
    let invalid = |field: &str, detail: String| CommandError::InvalidArguments {
        tool: schema.name.to_string(),
        field: field.to_string(),
        detail,
    };

    if let Some(unknown) = arguments.keys().find(|k| schema.argument(k).is_none()) {
        return Err(invalid(unknown, "unexpected argument".to_string()));
    }

    let mut validated = Map::new();
    for spec in &schema.arguments {
        let value = match arguments.get(spec.name) {
            None | Some(Value::Null) => None,
            Some(value) => Some(coerce(value, spec.ty).map_err(|detail| invalid(spec.name, detail))?),
        };

        let value = match (value, spec.default) {
            (Some(value), _) => value,
            (None, Some(default)) if !spec.required => {
                coerce(&Value::String(default.to_string()), spec.ty)
                    .map_err(|detail| invalid(spec.name, detail))?
            }
            (None, _) if spec.required => {
                return Err(invalid(spec.name, "field required".to_string()));
            }
            (None, _) => continue,
        };

        validated.insert(spec.name.to_string(), value);
    }

    Ok(Value::Object(validated))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn coerce(value: &Value, ty: ArgumentType) -> Result<Value, String> {
    match (ty, value) {
        (ArgumentType::String, Value::String(_)) => Ok(value.clone()),
        (ArgumentType::String, Value::Number(n)) => Ok(Value::String(n.to_string())),
        (ArgumentType::String, Value::Bool(b)) => Ok(Value::String(b.to_string())),

        (ArgumentType::Integer, Value::Number(n)) if n.is_i64() => Ok(value.clone()),
        (ArgumentType::Integer, Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| format!("expected integer, got '{}'", s)),

        (ArgumentType::Boolean, Value::Bool(_)) => Ok(value.clone()),
        (ArgumentType::Boolean, Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Value::Bool(true)),
            "false" | "no" | "0" => Ok(Value::Bool(false)),
            _ => Err(format!("expected boolean, got '{}'", s)),
        },

        (ty, other) => Err(format!("expected {}, got {}", ty.as_str(), describe(other))),
    }
}

/// A per-command failure, carrying the exact text shown to the user
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("No suitable tool found for command: {original}")]
    NoSuitableTool { original: String },

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Invalid arguments for {tool}: {field}: {detail}")]
    InvalidArguments {
        tool: String,
        field: String,
        detail: String,
    },

    #[error("Error parsing command: {0}")]
    Parse(String),

    #[error("{detail}")]
    Execution { tool: String, detail: String },

    #[error("No command was parsed for execution.")]
    NoCommand,
}

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::NoSuitableTool { .. } => ErrorKind::NoSuitableTool,
            CommandError::UnknownTool { .. } => ErrorKind::ToolNotFound,
            CommandError::InvalidArguments { .. } => ErrorKind::InvalidArgument,
            CommandError::Parse(_) => ErrorKind::ParseFailed,
            CommandError::Execution { .. } => ErrorKind::IoFailed,
            CommandError::NoCommand => ErrorKind::Unexpected,
        }
    }
}
