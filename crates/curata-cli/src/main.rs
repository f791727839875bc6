//! Curata CLI - snippet curation pipeline.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            input,
            output,
            config,
            embedder,
            llm,
            model,
            search_url,
            no_enhance,
            json,
        } => commands::run::run(
            commands::run::RunOptions {
                input,
                output,
                config,
                embedder,
                llm,
                model,
                search_url,
                no_enhance,
                json,
            },
            cli.verbose,
        ),

        Commands::Inspect {
            text,
            title,
            config,
            json,
        } => commands::inspect::run(text, title, config, json, cli.verbose),

        Commands::Report { file, json } => commands::report::run(file, json, cli.verbose),

        Commands::Config { config } => commands::config::run(config, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
