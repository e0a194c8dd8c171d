//! # CLI Argument Definitions
//!
//! Global flags override the matching configuration values; see [`Cli`].

use anymod::HandlerSet;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "anymod")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Resolve logical names to loaded units")]
pub struct Cli {
    /// Configuration file; `ANYMOD__SECTION__KEY` variables override its values
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to search, in order (repeatable)
    #[arg(short = 'I', long = "search-path", global = true, value_name = "DIR")]
    pub search_paths: Vec<PathBuf>,

    /// Reference handlers to install (e.g. 'ini,json' or 'all')
    #[arg(long, global = true, value_name = "LIST", value_parser = parse_handlers)]
    pub handlers: Option<HandlerSet>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a logical name and describe the loaded unit
    Resolve {
        /// Dotted unit name (e.g. 'settings' or 'pkg.settings')
        name: String,
    },
    /// Print the merged extension table in lookup order
    Bindings,
}

fn parse_handlers(raw: &str) -> Result<HandlerSet, String> {
    raw.split(',').filter(|name| !name.trim().is_empty()).try_fold(
        HandlerSet::empty(),
        |set, name| {
            let flag = HandlerSet::from(name);
            if flag.is_empty() { Err(format!("unknown handler '{}'", name.trim())) } else { Ok(set | flag) }
        },
    )
}
