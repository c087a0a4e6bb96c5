//! Docsift - persona-driven document insight extraction
//!
//! Reads a directory of PDF documents plus a persona/job
//! configuration, ranks section titles and refined subsections by
//! relevance to the persona, and writes a JSON artifact.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod config;
mod pipeline;

#[derive(Debug, Parser)]
#[command(name = "docsift", version, about = "Persona-driven document insight extraction")]
pub struct Cli {
    /// Directory containing the input PDF documents
    #[arg(long, default_value = "input")]
    pub input: PathBuf,

    /// Path of the output JSON artifact
    #[arg(long, default_value = "output/result.json")]
    pub output: PathBuf,

    /// Persona and job-to-be-done configuration file (JSON).
    /// Falls back to a generic research persona when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory containing the embedding model files
    /// (tokenizer.json, config.json, model.safetensors).
    /// Downloaded from the Hugging Face Hub when omitted.
    #[arg(long)]
    pub model_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docsift=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    pipeline::run(&cli)
}
