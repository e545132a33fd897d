// src/cli/args.rs
use crate::domain::query::RecordKindFilter;
use crate::domain::search::SUGGESTION_LIMIT;
use crate::domain::sort::SortKey;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bmtree", author, version, about, long_about = None)]
/// Browse and search Chrome-style bookmark exports in the terminal
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Bookmark JSON file or http(s) URL, overrides config and BMTREE_SOURCE
    #[arg(short, long, value_name = "PATH|URL")]
    pub source: Option<String>,

    /// Print the default configuration as TOML and exit
    #[arg(long = "generate-config")]
    pub generate_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the contents of a folder (default: top level)
    Ls {
        /// Folder id, "0" is the top level
        #[arg(default_value = "0")]
        folder_id: String,

        #[arg(long = "sort", help = "sort by name, date or type")]
        sort: Option<SortKey>,

        #[arg(long = "desc", help = "reverse order within folders and links")]
        desc: bool,

        #[arg(long = "json", help = "output as json")]
        is_json: bool,
    },
    /// Show one record with its path and details
    Show {
        id: String,

        #[arg(long = "json", help = "output as json")]
        is_json: bool,
    },
    /// Print the folder path of a record
    Path {
        id: String,

        #[arg(long = "any-root", help = "stop at either root sentinel (\"0\" or \"1\")")]
        any_root: bool,
    },
    /// Search names and urls (case-insensitive substring)
    Search {
        query: String,

        #[arg(short = 't', long = "type", help = "only folders or only links")]
        kind: Option<RecordKindFilter>,

        #[arg(long = "tags", help = "match any, comma separated list")]
        tags: Option<String>,

        #[arg(long = "since", help = "added on or after (YYYY-MM-DD or RFC 3339)")]
        since: Option<String>,

        #[arg(long = "until", help = "added on or before (YYYY-MM-DD or RFC 3339)")]
        until: Option<String>,

        #[arg(short = 'l', long = "limit", help = "limit number of results")]
        limit: Option<usize>,

        #[arg(long = "json", help = "output as json")]
        is_json: bool,
    },
    /// Suggest completions for a partial query
    Suggest {
        query: String,

        #[arg(short = 'l', long = "limit", default_value_t = SUGGESTION_LIMIT)]
        limit: usize,
    },
    /// Show collection statistics
    Stats {
        #[arg(long = "computed", help = "ignore stats shipped with the payload")]
        computed: bool,

        #[arg(long = "json", help = "output as json")]
        is_json: bool,
    },
    /// Print the folder hierarchy
    Tree {
        /// Start folder, "0" is the top level
        #[arg(default_value = "0")]
        id: String,

        #[arg(long = "max-depth", help = "number of levels to print")]
        max_depth: Option<usize>,
    },
    /// Open a link in the default browser
    Open { id: String },
    /// Show source, reachability and snapshot details
    Info,
    /// Interactive folder browser
    Browse,
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for (bash, zsh, fish)
        shell: String,
    },
}
