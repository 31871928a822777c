//! # topic_news
//!
//! Type a topic, get the latest news on it searched and summarized by a
//! generative-AI provider: one card per article with its title, a short
//! summary and a link to the original story.
//!
//! ## Usage
//!
//! ```sh
//! # Interactive prompt: one topic per line, `:q` or Ctrl-D to quit
//! GEMINI_API_KEY=... topic_news
//!
//! # One search and exit
//! topic_news --topic "inteligência artificial" --format markdown
//! ```
//!
//! ## Architecture
//!
//! 1. **Controller** ([`controller`]): validates the topic and drives the
//!    `Idle → Loading → Success | Empty | Error` page state
//! 2. **Provider** ([`providers`]): one call to the external service per
//!    search, reply mapped to articles ([`api`])
//! 3. **Output** ([`outputs`]): the page rendered after every transition
//!
//! Logs go to stderr (`RUST_LOG` to tune); the page goes to stdout.

use clap::Parser;
use std::error::Error;
use std::io::{IsTerminal, Write};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod api;
mod cli;
mod controller;
mod models;
mod outputs;
mod providers;
mod utils;

use api::SummarizationProvider;
use cli::{Cli, ProviderKind};
use controller::Controller;
use outputs::{text, OutputFormat, TOPIC_PLACEHOLDER};
use providers::{AwfulJadeProvider, GeminiProvider, Provider};

/// Lines that end the interactive prompt.
const QUIT_COMMANDS: [&str; 3] = [":q", ":quit", ":sair"];

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("topic_news starting up");

    let args = Cli::parse();
    debug!(provider = ?args.provider, format = ?args.format, one_shot = args.topic.is_some(), "Parsed CLI arguments");

    let provider = match args.provider {
        ProviderKind::Gemini => Provider::Gemini(
            GeminiProvider::new(args.resolved_api_key())
                .model(args.model.clone())
                .base_url(args.base_url.clone()),
        ),
        ProviderKind::AwfulJade => Provider::AwfulJade(
            AwfulJadeProvider::load(args.config.as_deref(), &args.template).await?,
        ),
    };
    info!(provider = provider.name(), "Provider ready");

    let hyperlinks = !args.no_hyperlinks && std::io::stdout().is_terminal();
    let mut controller = Controller::new(provider);

    match args.topic.as_deref() {
        Some(topic) => one_shot(&mut controller, topic, args.format, hyperlinks).await,
        None => {
            interactive(&mut controller, args.format, hyperlinks).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Run a single search, print the page and map the outcome to an exit code.
#[instrument(level = "info", skip_all)]
async fn one_shot<P: SummarizationProvider>(
    controller: &mut Controller<P>,
    topic: &str,
    format: OutputFormat,
    hyperlinks: bool,
) -> Result<ExitCode, Box<dyn Error>> {
    controller.submit(topic).await;
    if format == OutputFormat::Text {
        println!("{}", text::render_page(&controller.page(), hyperlinks));
    } else {
        print_page(controller, format, hyperlinks)?;
    }

    Ok(if controller.page().is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Read topics from stdin until EOF or a quit command.
///
/// The next line is only read once the current search has resolved, so at
/// most one request is ever in flight.
#[instrument(level = "info", skip_all)]
async fn interactive<P: SummarizationProvider>(
    controller: &mut Controller<P>,
    format: OutputFormat,
    hyperlinks: bool,
) -> Result<(), Box<dyn Error>> {
    if format == OutputFormat::Text {
        println!("{}", text::render_header());
        print_page(controller, format, hyperlinks)?;
        println!("({TOPIC_PLACEHOLDER})");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("tema> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        if QUIT_COMMANDS.contains(&line.trim()) {
            break;
        }

        match controller.begin(&line) {
            Err(_) => {}
            Ok(ticket) => {
                if format == OutputFormat::Text {
                    print_page(controller, format, hyperlinks)?;
                }
                let outcome = controller
                    .provider()
                    .fetch_and_summarize_news(ticket.topic())
                    .await;
                controller.resolve(&ticket, outcome);
                info!(
                    topic = %ticket.topic(),
                    generation = ticket.generation(),
                    state = controller.state().label(),
                    "Search resolved"
                );
            }
        }
        print_page(controller, format, hyperlinks)?;
    }

    info!("topic_news shutting down");
    Ok(())
}

fn print_page<P: SummarizationProvider>(
    controller: &Controller<P>,
    format: OutputFormat,
    hyperlinks: bool,
) -> Result<(), Box<dyn Error>> {
    let page = controller.page();
    let rendered = match format {
        OutputFormat::Text => text::render_with(&page, hyperlinks),
        other => outputs::render(&page, other)?,
    };
    println!("{rendered}");
    Ok(())
}
