//! Prompt rendering for the command parser.

use crate::schema::{SchemaRegistry, NO_SUITABLE_TOOL};
use chrono::NaiveDate;

/// Builds the parser prompts from the tool catalogue
#[derive(Debug, Clone)]
pub struct CommandPrompt<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> CommandPrompt<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    pub fn system_prompt(&self) -> &'static str {
        "You are an expert at understanding natural language commands and translating them \
         into structured tool calls. You always answer with a single JSON object and nothing else."
    }

    /// Render the instruction for one user command
    pub fn render(&self, user_command: &str, today: NaiveDate) -> String {
        let mut out = String::new();

        out.push_str(
            "Your goal is to identify the appropriate tool and extract its arguments from the user's command.\n",
        );
        out.push_str(&format!("The current date is {}.\n\n", today.format("%B %d, %Y")));

        out.push_str("Available Tools:\n");
        out.push_str(&self.registry.to_prompt());

        out.push_str(
            "You must determine which tool is most appropriate for the user's command and extract \
             the arguments for that tool.\n\
             If the user's command is ambiguous or does not map to any available tool, you should \
             indicate that no suitable tool was found.\n\n",
        );

        out.push_str(&format!("User Command: \"{}\"\n\n", user_command));

        out.push_str(
            "Respond with a JSON object with exactly two fields: `toolName` (string) and \
             `arguments` (object whose values match the chosen tool's arguments).\n",
        );
        out.push_str(&format!(
            "If no tool is suitable, respond with:\n`{}`\n\n",
            serde_json::json!({
                "toolName": NO_SUITABLE_TOOL,
                "arguments": { "originalCommand": user_command }
            })
        ));

        for (command, tool, path) in [
            ("list files in /tmp", "ListFilesTool", "/tmp"),
            ("cat /boot/config.txt", "ReadFileTool", "/boot/config.txt"),
            ("make a new directory called 'my photos'", "CreateDirectoryTool", "my photos"),
        ] {
            let example = serde_json::json!({ "toolName": tool, "arguments": { "path": path } });
            out.push_str(&format!(
                "Example for \"{}\":\n```json\n{}\n```\n\n",
                command,
                serde_json::to_string_pretty(&example).unwrap_or_default()
            ));
        }

        out
    }
}

/// Pull the JSON payload out of a model reply.
///
/// A reply that already parses as JSON is returned as-is; otherwise the
/// first markdown fence is unwrapped.
pub fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();
    if serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
        return trimmed;
    }

    if content.contains("```json") {
        content
            .split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .map(|s| s.trim())
            .unwrap_or(content)
    } else if content.contains("```") {
        content
            .split("```")
            .nth(1)
            .map(|s| s.trim())
            .unwrap_or(content)
    } else {
        content.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_embeds_date_catalogue_and_command() {
        let registry = SchemaRegistry::builtin();
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let prompt = CommandPrompt::new(&registry).render("ls src", today);

        assert!(prompt.contains("The current date is October 18, 2026."));
        assert!(prompt.contains("**ReadFileTool**"));
        assert!(prompt.contains("User Command: \"ls src\""));
        assert!(prompt.contains(r#""originalCommand":"ls src""#));
        assert!(prompt.contains("Example for \"cat /boot/config.txt\""));
    }

    #[test]
    fn test_extract_json_fenced() {
        let reply = "Sure:\n```json\n{\"toolName\": \"ListFilesTool\"}\n```\nDone.";
        assert_eq!(extract_json(reply), "{\"toolName\": \"ListFilesTool\"}");

        let reply = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json(reply), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_json_plain() {
        assert_eq!(extract_json("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_json_keeps_backticks_inside_strings() {
        let reply = r#"{"toolName":"ReadFileTool","arguments":{"path":"notes```.md"}}"#;
        assert_eq!(extract_json(reply), reply);

        let padded = format!("\n  {}  \n", reply);
        assert_eq!(extract_json(&padded), reply);
    }
}
