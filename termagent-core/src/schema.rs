//! # Tool Schema Registry
//!
//! A structured description of the tools the agent can request. The
//! registry is rendered into the parser prompt so the model knows which
//! tools exist, what arguments they take and how users tend to phrase them.
//! It is also the reference the decoder validates model answers against.

use crate::provider::ToolDefinition;
use serde::Serialize;

/// Reserved tool name the model answers with when nothing fits
pub const NO_SUITABLE_TOOL: &str = "NoSuitableToolFound";

/// Type of a single tool argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    String,
    Integer,
    Boolean,
}

impl ArgumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgumentType::String => "string",
            ArgumentType::Integer => "integer",
            ArgumentType::Boolean => "boolean",
        }
    }
}

/// Specification of one argument
#[derive(Debug, Clone, Serialize)]
pub struct ArgumentSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: ArgumentType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    pub description: &'static str,
}

impl ArgumentSpec {
    pub fn required(name: &'static str, ty: ArgumentType, description: &'static str) -> Self {
        Self { name, ty, required: true, default: None, description }
    }

    pub fn optional(
        name: &'static str,
        ty: ArgumentType,
        default: &'static str,
        description: &'static str,
    ) -> Self {
        Self { name, ty, required: false, default: Some(default), description }
    }
}

/// A named, callable action
#[derive(Debug, Clone, Serialize)]
pub struct ToolSchema {
    pub name: &'static str,
    pub description: &'static str,
    /// Ordered argument specifications
    pub arguments: Vec<ArgumentSpec>,
    /// Example user phrasings
    pub examples: Vec<&'static str>,
}

impl ToolSchema {
    pub fn argument(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// JSON schema of this tool's arguments
    pub fn parameters(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        for arg in &self.arguments {
            let mut prop = serde_json::json!({
                "type": arg.ty.as_str(),
                "description": arg.description,
            });
            if let Some(default) = arg.default {
                prop["default"] = serde_json::json!(default);
            }
            properties.insert(arg.name.to_string(), prop);
        }

        let required: Vec<&str> = self
            .arguments
            .iter()
            .filter(|a| a.required)
            .map(|a| a.name)
            .collect();

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }

    pub fn to_tool_definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name, self.description).with_parameters(self.parameters())
    }
}

/// Read-only lookup of tool schemas by name
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    tools: Vec<ToolSchema>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SchemaRegistry {
    /// The filesystem tools the agent ships with
    pub fn builtin() -> Self {
        Self {
            tools: vec![
                ToolSchema {
                    name: "ListFilesTool",
                    description: "Lists files and directories in a specified path.",
                    arguments: vec![ArgumentSpec::optional(
                        "path",
                        ArgumentType::String,
                        ".",
                        "The directory path to list files from. Defaults to the current directory.",
                    )],
                    examples: vec!["list files", "show everything in my_folder", "ls src"],
                },
                ToolSchema {
                    name: "ReadFileTool",
                    description: "Reads the content of a specified file.",
                    arguments: vec![ArgumentSpec::required(
                        "path",
                        ArgumentType::String,
                        "The path to the file to be read.",
                    )],
                    examples: vec![
                        "cat my_document.txt",
                        "show me what's in requirements.txt",
                        "read /etc/hosts",
                    ],
                },
                ToolSchema {
                    name: "CreateDirectoryTool",
                    description: "Creates a new directory at the specified path.",
                    arguments: vec![ArgumentSpec::required(
                        "path",
                        ArgumentType::String,
                        "The full path where the new directory should be created.",
                    )],
                    examples: vec!["mkdir new_project", "create a folder called temp_files"],
                },
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&ToolSchema> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolSchema> {
        self.tools.iter()
    }

    /// Render the numbered catalogue for the parser prompt
    pub fn to_prompt(&self) -> String {
        let mut out = String::new();

        for (i, tool) in self.tools.iter().enumerate() {
            out.push_str(&format!("{}.  **{}**: {}\n", i + 1, tool.name, tool.description));
            for arg in &tool.arguments {
                let requirement = match arg.default {
                    Some(default) if !arg.required => {
                        format!("optional, default: \"{}\"", default)
                    }
                    _ if arg.required => "required".to_string(),
                    _ => "optional".to_string(),
                };
                out.push_str(&format!(
                    "    *   Arguments: `{}` ({}, {}) - {}\n",
                    arg.name,
                    arg.ty.as_str(),
                    requirement,
                    arg.description
                ));
            }
            if !tool.examples.is_empty() {
                let examples: Vec<String> =
                    tool.examples.iter().map(|e| format!("\"{}\"", e)).collect();
                out.push_str(&format!("    *   Example user commands: {}\n", examples.join(", ")));
            }
            out.push('\n');
        }

        out
    }

    /// JSON schema of the `{toolName, arguments}` answer object
    pub fn to_json_schema(&self) -> serde_json::Value {
        let mut names: Vec<&str> = self.names();
        names.push(NO_SUITABLE_TOOL);

        serde_json::json!({
            "type": "object",
            "properties": {
                "toolName": {
                    "type": "string",
                    "enum": names,
                    "description": "The name of the tool to execute, or NoSuitableToolFound."
                },
                "arguments": {
                    "type": "object",
                    "description": "Arguments for the tool, matching its schema.",
                    "additionalProperties": { "type": "string" }
                }
            },
            "required": ["toolName", "arguments"],
            "additionalProperties": false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let registry = SchemaRegistry::builtin();
        assert_eq!(
            registry.names(),
            vec!["ListFilesTool", "ReadFileTool", "CreateDirectoryTool"]
        );
        assert!(registry.get("ReadFileTool").is_some());
        assert!(registry.get("readfiletool").is_none());
        assert!(registry.get(NO_SUITABLE_TOOL).is_none());
    }

    #[test]
    fn test_list_files_path_is_optional() {
        let registry = SchemaRegistry::builtin();
        let path = registry.get("ListFilesTool").unwrap().argument("path").unwrap();
        assert!(!path.required);
        assert_eq!(path.default, Some("."));

        let path = registry.get("CreateDirectoryTool").unwrap().argument("path").unwrap();
        assert!(path.required);
    }

    #[test]
    fn test_prompt_catalogue() {
        let prompt = SchemaRegistry::builtin().to_prompt();
        assert!(prompt.starts_with("1.  **ListFilesTool**"));
        assert!(prompt.contains("optional, default: \".\""));
        assert!(prompt.contains("\"mkdir new_project\""));
        assert!(prompt.contains("3.  **CreateDirectoryTool**"));
    }

    #[test]
    fn test_parameters_schema() {
        let registry = SchemaRegistry::builtin();
        let params = registry.get("ReadFileTool").unwrap().parameters();
        assert_eq!(params["properties"]["path"]["type"], "string");
        assert_eq!(params["required"], serde_json::json!(["path"]));

        let params = registry.get("ListFilesTool").unwrap().parameters();
        assert_eq!(params["required"], serde_json::json!([]));
        assert_eq!(params["properties"]["path"]["default"], ".");
    }

    #[test]
    fn test_answer_schema_includes_sentinel() {
        let schema = SchemaRegistry::builtin().to_json_schema();
        let names = schema["properties"]["toolName"]["enum"].as_array().unwrap();
        assert_eq!(names.len(), 4);
        assert_eq!(names[3], NO_SUITABLE_TOOL);
    }
}
