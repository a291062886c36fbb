use crate::config::Config;
use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "commitpulse")]
#[command(about = "Commit timeline, contributor activity and AI commit message rewrites for GitHub repositories")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct SourceArgs {
    #[arg(help = "GitHub repository (URL or owner/repo)")]
    pub repo: String,

    #[arg(long, help = "Read commits from a saved GitHub API JSON response instead of the network")]
    pub input: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub struct OutputArgs {
    #[arg(long, help = "Output as JSON", conflicts_with = "ndjson")]
    pub json: bool,

    #[arg(long, help = "Output as NDJSON")]
    pub ndjson: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Daily commit series and contributor breakdown for a time window
    Activity {
        #[clap(flatten)]
        source: SourceArgs,

        #[clap(flatten)]
        output: OutputArgs,

        #[arg(long, short, help = "Time window: week, month, year or all")]
        window: Option<String>,

        #[arg(long, help = "Reference time (RFC3339 or YYYY-MM-DD), defaults to now")]
        now: Option<String>,

        #[arg(long, help = "Number of contributors to show")]
        top: Option<usize>,

        #[arg(long = "interactive", alias = "tui", alias = "ui", help = "Enable interactive terminal UI")]
        interactive: bool,
    },
    /// List fetched commits
    Commits {
        #[clap(flatten)]
        source: SourceArgs,

        #[clap(flatten)]
        output: OutputArgs,

        #[arg(long, help = "Only commits by this GitHub login")]
        author: Option<String>,
    },
    /// Ask the AI service to rewrite a commit message from its diff
    Rewrite {
        #[clap(flatten)]
        source: SourceArgs,

        #[arg(help = "Commit SHA")]
        sha: String,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a default config file
    Init {
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
    /// Print the effective configuration with secrets masked
    Show,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let config_path = self.config;
        let load = || Config::load(config_path.as_deref()).context("Failed to load config");

        match self.command {
            Commands::Activity { source, output, window, now, top, interactive } => {
                let opts = crate::activity::exec::ActivityOptions {
                    window,
                    now,
                    top,
                    interactive,
                };
                crate::activity::exec(&load()?, source, output, opts)
            }
            Commands::Commits { source, output, author } => {
                crate::commits::exec(&load()?, source, output, author)
            }
            Commands::Rewrite { source, sha, json } => {
                crate::rewrite::exec(&load()?, source, sha, json)
            }
            Commands::Config { action } => crate::config_cmd::exec(config_path.as_deref(), action),
        }
    }
}
