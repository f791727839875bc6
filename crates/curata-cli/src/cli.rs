//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Curata: curate harvested snippets into a ranked, deduplicated corpus
#[derive(Parser)]
#[command(name = "curata")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline over an NDJSON file of candidates
    Run {
        /// Path to the candidate records (one JSON object per line)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory for approved/review/rejected/duplicates/discarded files
        #[arg(short, long, default_value = "curated")]
        output: PathBuf,

        /// Pipeline configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Embedding backend for semantic deduplication
        #[arg(long, default_value = "none")]
        embedder: EmbedderChoice,

        /// LLM provider for enhancement
        #[arg(long, default_value = "none")]
        llm: LlmProviderChoice,

        /// Model to use (provider-specific, e.g., "llama3.2")
        #[arg(long)]
        model: Option<String>,

        /// SearXNG base URL for web-search enhancement
        #[arg(long)]
        search_url: Option<String>,

        /// Skip the enhancement stage
        #[arg(long)]
        no_enhance: bool,

        /// Print the report as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Classify and score a single snippet
    Inspect {
        /// Snippet text (reads stdin when omitted)
        #[arg(value_name = "TEXT")]
        text: Option<String>,

        /// Title for the snippet
        #[arg(long)]
        title: Option<String>,

        /// Pipeline configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a saved pipeline report
    Report {
        /// Path to report.json
        #[arg(value_name = "REPORT_JSON")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Pipeline configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Embedding backend choice for semantic dedup
#[derive(Clone, Debug, Default, PartialEq)]
pub enum EmbedderChoice {
    /// Exact dedup only
    #[default]
    None,
    /// Local hashed term-frequency vectors
    Local,
    /// Ollama embedding model (requires Ollama running)
    Ollama,
}

impl std::str::FromStr for EmbedderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "off" => Ok(EmbedderChoice::None),
            "local" | "hashed" => Ok(EmbedderChoice::Local),
            "ollama" => Ok(EmbedderChoice::Ollama),
            _ => Err(format!("Unknown embedder: {}. Use: none, local, or ollama.", s)),
        }
    }
}

impl std::fmt::Display for EmbedderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbedderChoice::None => write!(f, "none"),
            EmbedderChoice::Local => write!(f, "local"),
            EmbedderChoice::Ollama => write!(f, "ollama"),
        }
    }
}

/// LLM provider choice for enhancement
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LlmProviderChoice {
    /// No LLM
    #[default]
    None,
    /// Anthropic Claude API (requires ANTHROPIC_API_KEY)
    Anthropic,
    /// Ollama local models (requires Ollama running)
    Ollama,
    /// Mock provider for testing
    Mock,
}

impl std::str::FromStr for LlmProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(LlmProviderChoice::None),
            "anthropic" | "claude" => Ok(LlmProviderChoice::Anthropic),
            "ollama" | "local" => Ok(LlmProviderChoice::Ollama),
            "mock" | "test" => Ok(LlmProviderChoice::Mock),
            _ => Err(format!(
                "Unknown provider: {}. Use: none, anthropic, ollama, or mock.",
                s
            )),
        }
    }
}

impl std::fmt::Display for LlmProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderChoice::None => write!(f, "none"),
            LlmProviderChoice::Anthropic => write!(f, "anthropic"),
            LlmProviderChoice::Ollama => write!(f, "ollama"),
            LlmProviderChoice::Mock => write!(f, "mock"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from([
            "curata", "run", "items.jsonl", "--embedder", "local", "--llm", "mock", "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Run {
                input,
                output,
                embedder,
                llm,
                ..
            } => {
                assert_eq!(input, PathBuf::from("items.jsonl"));
                assert_eq!(output, PathBuf::from("curated"));
                assert_eq!(embedder, EmbedderChoice::Local);
                assert_eq!(llm, LlmProviderChoice::Mock);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_unknown_choice_is_rejected() {
        assert!("gpt".parse::<LlmProviderChoice>().is_err());
        assert!("bert".parse::<EmbedderChoice>().is_err());
    }
}
