//! Interactive read-eval-print loop

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use termagent_agent::Agent;
use termagent_core::{LlmProvider, ToolBackend};
use tracing::debug;

pub const BANNER: &str = "Terminal Agent started. Type 'exit' or 'quit' to end.";
const PROMPT: &str = "You: ";

/// What a line typed at the prompt asks for
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Exit,
    Blank,
    Command(&'a str),
}

impl<'a> Input<'a> {
    pub fn classify(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            Input::Blank
        } else if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            Input::Exit
        } else {
            Input::Command(line)
        }
    }
}

/// The line printed for one answer; quiet mode drops the speaker prefix
pub fn reply_line(output: &str, quiet: bool) -> String {
    if quiet {
        output.to_string()
    } else {
        format!("Agent: {}", output)
    }
}

/// Run commands until exit, quit or end of input
pub async fn run<P: LlmProvider, B: ToolBackend>(
    agent: &mut Agent<P, B>,
    quiet: bool,
) -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;

    if !quiet {
        println!("{}", BANNER);
    }

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => match Input::classify(&line) {
                Input::Blank => continue,
                Input::Exit => {
                    if !quiet {
                        println!("Exiting agent...");
                    }
                    break;
                }
                Input::Command(command) => {
                    let _ = rl.add_history_entry(command);
                    let outcome = agent.run(command).await;
                    println!("{}", reply_line(&outcome.output, quiet));
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                debug!("end of input");
                break;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(())
}
