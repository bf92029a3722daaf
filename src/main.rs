// Copyright 2026 Pitchbot Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{Parser, Subcommand};

use pitchbot::config::Config;
use pitchbot::extraction::PageDataExtractor;
use pitchbot::fetch::HttpFetcher;
use pitchbot::rest;

#[derive(Parser)]
#[command(
    name = "pitchbot",
    about = "Pitchbot — sales-page chat responder",
    version,
    after_help = "Run 'pitchbot <command> --help' for details on each command."
)]
struct Cli {
    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (chat widget + API)
    Serve {
        /// Listen port (overrides the PORT environment variable)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Extract a product record from a single sales page and print it
    Extract {
        /// URL of the sales page
        url: String,
        /// Output format (pretty, json)
        #[arg(long, default_value = "pretty")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "pitchbot=debug" } else { "pitchbot=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.parse().expect("directive is valid")),
        )
        .init();

    let mut config = Config::from_env();

    match cli.command {
        None | Some(Commands::Serve { port: None }) => rest::serve(&config).await,
        Some(Commands::Serve { port: Some(port) }) => {
            config.port = port;
            rest::serve(&config).await
        }
        Some(Commands::Extract { url, format }) => run_extract(&config, &url, &format).await,
    }
}

/// One-shot extraction for debugging rule behavior against a live page.
async fn run_extract(config: &Config, url: &str, format: &str) -> Result<()> {
    let fetcher = std::sync::Arc::new(HttpFetcher::new(config.fetch_timeout_ms));
    let extraction = PageDataExtractor::new(fetcher).extract(url).await;

    let defaulted = extraction.is_defaulted();
    let record = extraction.into_record();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("Título:      {}", record.title);
    println!("Descrição:   {}", record.description);
    println!("Preço:       {}", record.price);
    println!("Benefícios:");
    for benefit in &record.benefits {
        println!("  - {benefit}");
    }
    println!("Depoimentos:");
    for testimonial in &record.testimonials {
        println!("  - {testimonial}");
    }
    println!("CTA:         {}", record.cta);
    if defaulted {
        println!("(página inacessível — registro padrão)");
    }
    Ok(())
}
