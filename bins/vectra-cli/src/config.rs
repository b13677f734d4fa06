use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vectra_codec::CodecOptions;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "vectra-cli", about = "Encode and inspect vector-search wire payloads")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode a JSON array of columns into length-delimited FieldData
    Encode(EncodeArgs),
    /// Print length-delimited FieldData as JSON columns
    Decode(DecodeArgs),
    /// Encode query vectors into a serialized placeholder group
    Query(QueryArgs),
}

#[derive(Args, Clone, Debug)]
pub struct CodecArgs {
    /// Path to a TOML file with codec options
    #[arg(long, env = "VECTRA_CODEC_CONFIG")]
    pub config: Option<PathBuf>,
}

impl CodecArgs {
    pub fn options(&self) -> Result<CodecOptions, CliError> {
        let Some(path) = &self.config else {
            return Ok(CodecOptions::default());
        };
        let options = CodecOptions::load(path)?;
        tracing::info!(config = %path.display(), "loaded codec options");
        Ok(options)
    }
}

#[derive(Args, Clone, Debug)]
pub struct EncodeArgs {
    /// JSON file holding an array of columns
    #[arg(long)]
    pub input: PathBuf,
    #[arg(long)]
    pub output: PathBuf,
    #[command(flatten)]
    pub codec: CodecArgs,
}

#[derive(Args, Clone, Debug)]
pub struct DecodeArgs {
    #[arg(long)]
    pub input: PathBuf,
    /// Write JSON here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub codec: CodecArgs,
}

#[derive(Args, Clone, Debug)]
pub struct QueryArgs {
    /// JSON file holding an array of tagged query vectors
    #[arg(long)]
    pub input: PathBuf,
    #[arg(long)]
    pub output: PathBuf,
    #[command(flatten)]
    pub codec: CodecArgs,
}
