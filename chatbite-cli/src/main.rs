use anyhow::{Context, Result};
use chatbite_core::config::{GROQ_KEY_VARS, resolve_api_key};
use chatbite_core::openai::{ChatRequest, GROQ_BASE_URL, Message, chat_completion};
use clap::Parser;
use std::io::{BufRead, Write};
use tracing::debug;

/// System instruction for the command-line recipe bot
const SYSTEM_PROMPT: &str = "This chatbot provides clear, step-by-step recipes based only on \
the ingredients you enter. It won't respond to anything unrelated to food ingredients or \
cooking instructions.";

const DEFAULT_MODEL: &str = "llama3-70b-8192";

#[derive(Parser)]
#[command(name = "chatbite")]
#[command(about = "Recipe chatbot REPL against an OpenAI-compatible provider", long_about = None)]
struct Cli {
    /// Model identifier
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, default_value = GROQ_BASE_URL)]
    base_url: String,

    /// Override the built-in system instruction
    #[arg(long)]
    system: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    // Load .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let api_key = resolve_api_key(GROQ_KEY_VARS).with_context(|| {
        format!(
            "{} is not set. Provide a Groq API key in your environment.",
            GROQ_KEY_VARS.join(" / ")
        )
    })?;

    let system = cli.system.as_deref().unwrap_or(SYSTEM_PROMPT);
    debug!(model = %cli.model, base_url = %cli.base_url, "starting REPL");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        print!("What you want to ask me? ");
        stdout.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        // EOF ends the session the same way "quit" does
        if stdin.lock().read_line(&mut line).context("Failed to read input")? == 0 {
            println!("Bot: GoodBye");
            break;
        }

        let user_input = line.trim();
        if user_input.is_empty() {
            continue;
        }
        if user_input == "quit" {
            println!("Bot: GoodBye");
            break;
        }

        let request = ChatRequest::new(&cli.model)
            .message(Message::system(system))
            .message(Message::user(user_input));

        // A failed call reports and keeps the session alive
        match chat_completion(&cli.base_url, &request, &api_key).await {
            Ok(reply) => println!("Bot: {reply}"),
            Err(err) => eprintln!("Bot: (something went wrong: {err})"),
        }
    }

    Ok(())
}
