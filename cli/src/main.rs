use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use azimuth_catalog::{Catalog, SystemClock};
use azimuth_cli::{HistoryFile, LauncherConfig, commands, logging};
use azimuth_resolver::{Finder, FrecencyHistory};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "azimuth", version, about = "Find and launch applications, files and bookmarks")]
struct Cli {
    /// Config file (default: <config dir>/azimuth/config.toml)
    #[arg(long, short, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank the catalog against a query
    Find {
        /// Free text; punctuation is ignored
        query: String,

        /// Show at most this many results
        #[arg(long, short)]
        limit: Option<usize>,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,

        /// Launch the best match
        #[arg(long)]
        launch: bool,

        /// Arguments passed when launching
        #[arg(long, default_value = "")]
        args: String,
    },

    /// Print the whole catalog grouped by provider
    List,

    /// Log catalog changes until Ctrl-C
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = LauncherConfig::load(cli.config.as_deref())?;
    logging::init(&config.log_level, cli.verbose)?;

    let catalog = Arc::new(Catalog::from_config(&config.catalog, Arc::new(SystemClock)));
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Find {
            query,
            limit,
            json,
            launch,
            args,
        } => {
            let history_file = config
                .history_path
                .clone()
                .or_else(HistoryFile::default_path)
                .map(HistoryFile::new);
            let history = Arc::new(
                history_file
                    .as_ref()
                    .map_or_else(FrecencyHistory::new, HistoryFile::load),
            );
            let finder = Finder::new(catalog, config.resolver, history);
            let matches = commands::find(&finder, &query, limit, json, &mut stdout)?;
            if launch {
                let best = matches
                    .first()
                    .with_context(|| format!("nothing matches '{query}'"))?;
                finder
                    .launch(&best.launchable, &args)
                    .with_context(|| format!("failed to launch {}", best.launchable))?;
                if let Some(file) = &history_file {
                    file.save(finder.history())?;
                }
            }
        }
        Command::List => {
            commands::list(&catalog, &mut stdout)?;
        }
        Command::Watch => {
            drop(stdout);
            commands::watch(catalog).await?;
        }
    }

    Ok(())
}
