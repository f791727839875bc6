//! Run command - curate an NDJSON file of candidates.

use std::path::PathBuf;

use colored::Colorize;
use curata::llm::LlmConfig;
use curata::{
    AnthropicProvider, HashedEmbedder, MockProvider, OllamaEmbedder, OllamaProvider, Pipeline,
    SearxngProvider,
};

use crate::cli::{EmbedderChoice, LlmProviderChoice};

use super::report::print_summary;

pub struct RunOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub embedder: EmbedderChoice,
    pub llm: LlmProviderChoice,
    pub model: Option<String>,
    pub search_url: Option<String>,
    pub no_enhance: bool,
    pub json: bool,
}

fn build_pipeline(opts: &RunOptions) -> Result<Pipeline, Box<dyn std::error::Error>> {
    let mut config = super::load_config(opts.config.as_deref())?;
    if opts.no_enhance {
        config.enhance.enabled = false;
    }

    let mut pipeline = Pipeline::new(config)?;

    pipeline = match opts.embedder {
        EmbedderChoice::None => pipeline,
        EmbedderChoice::Local => pipeline.with_embedder(HashedEmbedder::default()),
        EmbedderChoice::Ollama => pipeline.with_embedder(OllamaEmbedder::new()?),
    };

    pipeline = match opts.llm {
        LlmProviderChoice::None => pipeline,
        LlmProviderChoice::Mock => pipeline.with_llm(MockProvider::new()),
        LlmProviderChoice::Ollama => match &opts.model {
            Some(m) => pipeline.with_llm(OllamaProvider::with_model(m.clone())?),
            None => pipeline.with_llm(OllamaProvider::new()?),
        },
        LlmProviderChoice::Anthropic => match &opts.model {
            Some(m) => {
                let api_key = std::env::var("ANTHROPIC_API_KEY")
                    .map_err(|_| "ANTHROPIC_API_KEY environment variable not set")?;
                let llm_config = LlmConfig {
                    model: m.clone(),
                    ..LlmConfig::default()
                };
                pipeline.with_llm(AnthropicProvider::with_config(api_key, llm_config)?)
            }
            None => pipeline.with_llm(AnthropicProvider::from_env()?),
        },
    };

    if let Some(url) = &opts.search_url {
        pipeline = pipeline.with_search(SearxngProvider::new(url.clone())?);
    }

    Ok(pipeline)
}

pub fn run(opts: RunOptions, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !opts.input.exists() {
        return Err(format!("File not found: {}", opts.input.display()).into());
    }

    let pipeline = build_pipeline(&opts)?;

    if !opts.json {
        println!(
            "{} {}",
            "Curating".cyan().bold(),
            opts.input.display().to_string().white()
        );
    }

    let output = pipeline.run_file(&opts.input)?;
    Pipeline::write_outputs(&output, &opts.output)?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&output.report)?);
        return Ok(());
    }

    println!();
    print_summary(&output.report, verbose);

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        opts.output.display().to_string().white()
    );
    if !output.needs_review.is_empty() {
        println!(
            "{} items need review in {}",
            output.needs_review.len().to_string().yellow().bold(),
            opts.output
                .join(curata::pipeline::NEEDS_REVIEW_FILE)
                .display()
                .to_string()
                .cyan()
        );
    }

    Ok(())
}
