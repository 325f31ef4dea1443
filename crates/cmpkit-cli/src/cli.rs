use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use cmpkit_types::PathStyle;

#[derive(Parser)]
#[command(
    name = "cmpkit",
    about = "Line diffs, JSON tree diffs and string similarity",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with engine options
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum PathStyleArg {
    Dot,
    Bracket,
}

impl From<PathStyleArg> for PathStyle {
    fn from(arg: PathStyleArg) -> Self {
        match arg {
            PathStyleArg::Dot => PathStyle::Dot,
            PathStyleArg::Bracket => PathStyle::Bracket,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Score how similar two strings are (0 to 1)
    Similarity(SimilarityArgs),
    /// Diff two text files line by line
    Lines(LinesArgs),
    /// Diff two JSON files structurally
    Tree(TreeArgs),
    /// Run a JSON request; reads stdin when no file is given
    Request(RequestArgs),
}

#[derive(Args)]
pub struct SimilarityArgs {
    pub a: String,
    pub b: String,
    /// Also print the edit distance
    #[arg(long)]
    pub distance: bool,
}

#[derive(Args)]
pub struct LinesArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Unchanged lines shown around each change
    #[arg(short = 'U', long)]
    pub context: Option<usize>,
}

#[derive(Args)]
pub struct TreeArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    #[arg(long)]
    pub path_style: Option<PathStyleArg>,
}

#[derive(Args)]
pub struct RequestArgs {
    pub file: Option<PathBuf>,
}
