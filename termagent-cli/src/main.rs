//! # termagent CLI
//!
//! Turns natural-language commands into tool calls.
//!
//! Usage:
//!   termagent                     interactive session
//!   termagent run <COMMAND>...    one command
//!   termagent tools [--json]      show the tool catalogue
//!   termagent prompt <COMMAND>... show the prompt the model would get
//!
//! Examples:
//!   termagent run list files in /tmp
//!   termagent -p anthropic run "make a folder called my photos"

mod repl;
mod settings;

use chrono::Local;
use clap::{Parser, Subcommand};
use settings::Settings;
use std::process::ExitCode;
use termagent_agent::Agent;
use termagent_core::{AnyProvider, CommandPrompt, LlmProvider, SchemaRegistry};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "termagent")]
#[command(author, version, about = "termagent - natural-language commands for your terminal")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// LLM provider: gemini, openai or anthropic
    #[arg(short, long, global = true)]
    provider: Option<String>,

    /// Model name (defaults to the provider's default)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Override the provider endpoint
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Sampling temperature for tool selection
    #[arg(long, global = true)]
    temperature: Option<f32>,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - print bare answers, no banner or "Agent:" prefix
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single command
    Run {
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },
    /// Show the available tools
    Tools {
        /// Print each tool's JSON schema
        #[arg(long)]
        json: bool,
    },
    /// Print the prompt sent to the model, without calling it
    Prompt {
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn show_tools(json: bool) {
    let registry = SchemaRegistry::builtin();
    if !json {
        println!("{}", registry.to_prompt());
        return;
    }

    for schema in registry.iter() {
        let definition = schema.to_tool_definition();
        match serde_json::to_string_pretty(&definition) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}

fn show_prompt(command: &str) {
    let registry = SchemaRegistry::builtin();
    let prompt = CommandPrompt::new(&registry);
    println!("[SYSTEM]\n{}\n", prompt.system_prompt());
    println!("[USER]\n{}", prompt.render(command, Local::now().date_naive()));
}

fn build_agent(cli: &Cli) -> termagent_core::Result<Agent<AnyProvider>> {
    let settings = Settings::load(cli, |name| std::env::var(name).ok())?;
    let provider = AnyProvider::from_config(settings.provider)?;
    Ok(Agent::new(provider, settings.agent))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Some(Commands::Tools { json }) => {
            show_tools(*json);
            return ExitCode::SUCCESS;
        }
        Some(Commands::Prompt { command }) => {
            show_prompt(&command.join(" "));
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    let mut agent = match build_agent(&cli) {
        Ok(agent) => agent,
        Err(err) => {
            debug!("{:?}", err);
            eprintln!("Error: {}", err.message());
            return ExitCode::FAILURE;
        }
    };
    info!(provider = agent.provider().name(), "agent ready");

    match &cli.command {
        Some(Commands::Run { command }) => {
            let outcome = agent.run(&command.join(" ")).await;
            println!("{}", repl::reply_line(&outcome.output, cli.quiet));
        }
        _ => {
            if let Err(err) = repl::run(&mut agent, cli.quiet).await {
                eprintln!("Error: {}", err);
                return ExitCode::FAILURE;
            }
        }
    }

    let usage = agent.usage();
    if usage.total_calls > 0 {
        info!(
            calls = usage.total_calls,
            tokens = usage.total_tokens(),
            "token usage"
        );
    }

    ExitCode::SUCCESS
}
