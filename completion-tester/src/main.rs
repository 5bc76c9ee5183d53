use std::io::{IsTerminal, Read};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use completion_tester::catalog::{catalog, descriptor_for};
use completion_tester::config::{Config, LogFormat};
use completion_tester::llm::{CompletionProvider, RequestConfig};
use completion_tester::presenter::present;

#[derive(Parser)]
#[command(name = "completion-tester")]
#[command(about = "Send a prompt to an OpenAI chat model and inspect the response")]
struct Args {
    /// Prompt text; read from stdin when omitted
    prompt: Option<String>,

    /// Model identifier (see --list-models)
    #[arg(short, long)]
    model: Option<String>,

    /// Sampling temperature, 0.0 to 2.0 (ignored by reasoning models)
    #[arg(short, long)]
    temperature: Option<f32>,

    /// Nucleus sampling threshold, 0.0 to 1.0 (ignored by reasoning models)
    #[arg(long)]
    top_p: Option<f32>,

    /// Maximum number of output tokens, 1 to 100000
    #[arg(long)]
    max_tokens: Option<u32>,

    /// OpenAI API key; falls back to OPENAI_API_KEY
    #[arg(long)]
    api_key: Option<String>,

    /// Also print the full response JSON
    #[arg(long)]
    raw: bool,

    /// Print the display model as JSON instead of text
    #[arg(long)]
    json: bool,

    /// List the model catalog and exit
    #[arg(long)]
    list_models: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    init_tracing(LogFormat::from_env());

    let config = Config::from_env();
    tracing::debug!(?config, "Configuration loaded");

    if args.list_models {
        print_catalog();
        return Ok(ExitCode::SUCCESS);
    }

    let model = args.model.unwrap_or(config.defaults.model);
    let descriptor = descriptor_for(&model);

    if let Some(notice) = descriptor.family.parameter_notice() {
        eprintln!("Note: {notice}");
    }

    let credential = args
        .api_key
        .or(config.api.api_key)
        .unwrap_or_default();

    // Without a credential the submission fails before the prompt is looked at.
    let prompt = match args.prompt {
        Some(prompt) => prompt,
        None if credential.trim().is_empty() => String::new(),
        None => read_prompt_from_stdin()?,
    };

    let mut request = RequestConfig::new(descriptor.id.clone(), credential, prompt);
    request.temperature = args.temperature.unwrap_or(config.defaults.temperature);
    request.top_p = args.top_p.unwrap_or(config.defaults.top_p);
    request.max_output_tokens = args
        .max_tokens
        .unwrap_or(config.defaults.max_output_tokens);

    tracing::debug!(base_url = %config.api.base_url, "Using completion endpoint");
    let provider = CompletionProvider::openai(config.api.base_url);

    tracing::info!("Generating response with {}...", descriptor.display_name);
    let result = provider.submit(&request, &descriptor).await;
    let exit_code = match &result {
        Ok(_) => ExitCode::SUCCESS,
        Err(reason) if reason.is_precondition() => ExitCode::from(2),
        Err(_) => ExitCode::FAILURE,
    };
    let display = present(result);

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&display).context("Failed to encode display model")?;
        println!("{rendered}");
    } else if let Some(message) = display.error_message() {
        eprintln!("{message}");
    } else {
        print!("{}", display.render(args.raw));
    }

    Ok(exit_code)
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "completion_tester=info".into());

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn print_catalog() {
    for model in catalog() {
        println!(
            "{:<10} {:<10} [{}]",
            model.id,
            model.display_name,
            model.family.as_str()
        );
        println!("    {}", model.description);
    }
}

fn read_prompt_from_stdin() -> anyhow::Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!("Enter your prompt (finish with Ctrl-D):");
    }

    let mut prompt = String::new();
    stdin
        .read_to_string(&mut prompt)
        .context("Failed to read prompt from stdin")?;
    Ok(prompt)
}
