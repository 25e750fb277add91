#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use std::{
    env,
    io::{self, BufRead, Write},
};

use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use ragdoll::SearchResult;
use tracing::debug;
use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::{
    gateway::Gateway,
    session::{ChatSession, APOLOGY},
    state::{Feature, Outcome},
};

mod gateway;
mod session;
mod state;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search a target partition and list the ranked source documents.
    Query {
        query: String,
        #[arg(long, value_enum, default_value = "HoloMeet_Pro")]
        target: Target,
    },
    /// Answer a question from documents retrieved out of a target partition.
    Ask {
        query: String,
        #[arg(long, value_enum, default_value = "HoloMeet_Pro")]
        target: Target,
    },
    /// Hold a streaming chat conversation.
    Chat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Target {
    #[value(name = "HoloMeet_Pro")]
    HoloMeetPro,
    #[value(name = "NeuroNote_X")]
    NeuroNoteX,
}

impl Target {
    const fn as_str(self) -> &'static str {
        match self {
            Self::HoloMeetPro => "HoloMeet_Pro",
            Self::NeuroNoteX => "NeuroNote_X",
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "cli=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let gateway = Gateway::new(
        env::var("RAGDOLL_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string()),
    );

    match cli.command {
        Commands::Query { query, target } => run_query(&gateway, &query, target).await,
        Commands::Ask { query, target } => run_ask(&gateway, &query, target).await,
        Commands::Chat => run_chat(&gateway).await,
    }
}

async fn run_query(gateway: &Gateway, input: &str, target: Target) {
    let mut feature = Feature::new();
    let Some(query) = feature.submit(input) else {
        return;
    };

    match gateway.search(&query, target.as_str()).await {
        Ok(result) => feature.succeed(result),
        Err(err) => {
            debug!("query request failed: {err:#}");
            feature.fail("Failed to process query");
        }
    }

    match feature.outcome() {
        Some(Outcome::Success(result)) => render_search(result),
        Some(Outcome::Error(message)) => println!("Error: {message}"),
        None => {}
    }
}

async fn run_ask(gateway: &Gateway, input: &str, target: Target) {
    let mut feature = Feature::new();
    let Some(query) = feature.submit(input) else {
        return;
    };

    match gateway.answer(&query, target.as_str()).await {
        Ok(text) => feature.succeed(text),
        Err(err) => {
            debug!("answer request failed: {err:#}");
            feature.fail("Failed to process OpenAI query");
        }
    }

    match feature.outcome() {
        Some(Outcome::Success(text)) => {
            println!("Response:");
            println!("{text}");
        }
        Some(Outcome::Error(message)) => println!("Error: {message}"),
        None => {}
    }
}

fn render_search(result: &SearchResult) {
    if let Some(response) = &result.response {
        println!("Response:");
        println!("{response}");
    }

    if !result.data.is_empty() {
        println!();
        println!("Sources ({} documents):", result.data.len());

        for source in &result.data {
            println!("- {} (Score: {:.1}%)", source.filename, source.score * 100.0);
            println!("  File ID: {}", source.file_id);

            for block in &source.content {
                println!("  {}", block.text);
            }
        }
    }

    println!();
    println!("Search Query: \"{}\"", result.search_query);
    if result.has_more {
        println!("More results available...");
    }
}

async fn run_chat(gateway: &Gateway) {
    let mut session = ChatSession::new();
    let stdin = io::stdin();

    println!("Ragdoll chat. Ctrl-D ends the session.");
    prompt();

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };

        if let Some(query) = session.submit(&line) {
            let history = session.history().to_vec();

            print!("Assistant: ");
            flush();

            let outcome = gateway
                .chat(&query, &history, |fragment| {
                    session.push_fragment(fragment);
                    print!("{fragment}");
                    flush();
                })
                .await;

            match outcome {
                Ok(()) if !session.draft().is_empty() => {
                    session.finish();
                    println!();
                }
                // An empty stream that closes is the gateway's failure
                // signal; partial streamed text is never kept either way.
                Ok(()) => {
                    session.abort();
                    println!("{APOLOGY}");
                }
                Err(err) => {
                    debug!("chat request failed: {err:#}");
                    if !session.draft().is_empty() {
                        println!();
                    }
                    session.abort();
                    println!("{APOLOGY}");
                }
            }
        }

        prompt();
    }
}

fn prompt() {
    print!("> ");
    flush();
}

fn flush() {
    let _ = io::stdout().flush();
}
