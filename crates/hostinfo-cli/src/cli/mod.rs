//! CLI for hostinfo.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use hostinfo_core::config;

use commands::{run_completions, run_extract, run_inspect, run_manpage, run_resolve};

/// Top-level CLI for hostinfo.
#[derive(Debug, Parser)]
#[command(name = "hostinfo")]
#[command(about = "hostinfo: find the media behind a page element and who hosts it", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Pick an element on a page and report where its media is hosted.
    Inspect {
        /// HTML file path or http(s) URL of the page.
        page: String,
        /// Click target: CSS selector, `>>` to step into frames. Prompts on stdin if omitted.
        #[arg(long, value_name = "PATH")]
        click: Option<String>,
    },

    /// Print the media source URL of an element without any network lookups.
    Extract {
        /// HTML file path or http(s) URL of the page.
        page: String,
        /// Click target: CSS selector, `>>` to step into frames.
        #[arg(long, value_name = "PATH")]
        click: String,
    },

    /// Resolve the host of a media URL to IPv4, owner and location.
    Resolve {
        /// Absolute URL of the asset.
        url: String,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page (roff).
    Manpage,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell, Cli::command()),
            CliCommand::Manpage => return run_manpage(Cli::command()),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Inspect { page, click } => run_inspect(&cfg, &page, click.as_deref()).await?,
            CliCommand::Extract { page, click } => run_extract(&cfg, &page, &click).await?,
            CliCommand::Resolve { url } => run_resolve(&cfg, &url).await?,
            CliCommand::Completions { .. } | CliCommand::Manpage => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
