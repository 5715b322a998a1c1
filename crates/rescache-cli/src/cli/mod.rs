//! CLI for the rescache resource resolver.

mod commands;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rescache_core::config;
use rescache_core::Service;

use commands::{run_browse, run_completions, run_normalize, run_resolve, run_services};

/// Top-level CLI for rescache.
#[derive(Debug, Parser)]
#[command(name = "rescache")]
#[command(about = "rescache: canonical URLs and shared resource handles for HTTP services", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Which service to resolve against.
#[derive(Debug, Clone, Default, Args)]
pub struct Target {
    /// Base URL to use directly.
    #[arg(long, conflicts_with = "service", value_name = "URL")]
    pub base: Option<String>,

    /// Named service from config.toml.
    #[arg(long, value_name = "NAME")]
    pub service: Option<String>,
}

impl Target {
    /// Builds the service: `--base`, then `--service`, then the configured default.
    pub fn build(&self) -> Result<Service> {
        if let Some(base) = &self.base {
            return Service::new(base).with_context(|| format!("base {base:?}"));
        }
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        match &self.service {
            Some(name) => cfg.build_service(name),
            None => {
                let entry = cfg
                    .default_service()
                    .context("no --base or --service given and no default_service configured")?;
                cfg.build_service(&entry.name)
            }
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the normalized form of a base URL.
    Normalize {
        /// Raw base URL.
        base: String,
        /// Emit JSON instead of plain text.
        #[arg(long)]
        json: bool,
    },

    /// Resolve paths below a service base.
    Resolve {
        #[command(flatten)]
        target: Target,
        /// Emit JSON instead of plain text.
        #[arg(long)]
        json: bool,
        /// Paths to resolve; a leading slash is ignored.
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Start at a path and follow relative expressions (e.g. `child`, `../sibling`).
    Browse {
        #[command(flatten)]
        target: Target,
        /// Emit JSON instead of plain text.
        #[arg(long)]
        json: bool,
        /// Starting path below the base.
        start: String,
        /// Expressions applied in order from the current resource.
        #[arg(allow_hyphen_values = true)]
        exprs: Vec<String>,
    },

    /// List configured services and their normalized bases.
    Services,

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Normalize { base, json } => run_normalize(&base, json)?,
            CliCommand::Resolve {
                target,
                json,
                paths,
            } => run_resolve(&target.build()?, &paths, json)?,
            CliCommand::Browse {
                target,
                json,
                start,
                exprs,
            } => run_browse(&target.build()?, &start, &exprs, json)?,
            CliCommand::Services => run_services(&config::load_or_init()?)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
