//! CLI argument definitions for the storefront listing tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use shop_model::{FilterKey, FilterUpdate, GridMode};

#[derive(Parser)]
#[command(
    name = "storefront",
    version,
    about = "Storefront listing tool - inspect filter queries, pagination and grid layout",
    long_about = "Inspect the state behind a storefront product listing.\n\n\
                  Parses and rewrites listing query parameters, renders pagination\n\
                  windows and resolves the product grid layout for a viewport width."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: settings.toml in the user config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of tables.
    #[arg(long = "json", global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply filter changes to a listing query and show the result.
    Filters(FiltersArgs),

    /// Render the pagination bar for a page.
    Pages(PagesArgs),

    /// Show or change the product grid layout.
    #[command(subcommand)]
    Layout(LayoutCommand),
}

#[derive(Args)]
pub struct FiltersArgs {
    /// Current query parameter (repeatable), e.g. --query page=3.
    #[arg(long = "query", value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub query: Vec<(String, String)>,

    /// Filter change applied atomically (repeatable), e.g. --set min_price=500.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<FilterUpdate>,

    /// Reset one filter to its default (repeatable).
    #[arg(long = "clear", value_name = "KEY")]
    pub clear: Vec<FilterKey>,

    /// Search keystrokes typed in order; only the last one is applied after
    /// the debounce period.
    #[arg(long = "type", value_name = "TEXT")]
    pub keystrokes: Vec<String>,

    /// Move to a page without resetting filters.
    #[arg(long = "page", value_name = "N")]
    pub page: Option<u32>,

    /// Reset every filter to its default.
    #[arg(long = "reset")]
    pub reset: bool,
}

#[derive(Args)]
pub struct PagesArgs {
    /// Current page (1-based).
    #[arg(long = "current", value_name = "N", default_value_t = 1)]
    pub current: u32,

    /// Total number of pages.
    #[arg(long = "total", value_name = "N", conflicts_with = "items")]
    pub total: Option<u32>,

    /// Total number of products (page count is derived from the page size).
    #[arg(long = "items", value_name = "N")]
    pub items: Option<u64>,

    /// Products per page (12, 24 or 48).
    #[arg(long = "page-size", value_name = "N", default_value_t = shop_model::DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Whether the data source reports more results (with --total; derived
    /// from --items otherwise).
    #[arg(long = "has-more", requires = "total")]
    pub has_more: bool,

    /// Request navigation to this page.
    #[arg(long = "goto", value_name = "N")]
    pub goto: Option<u32>,

    /// Page buttons shown before collapsing (default from settings).
    #[arg(long = "max-visible", value_name = "N")]
    pub max_visible: Option<u32>,
}

#[derive(Subcommand)]
pub enum LayoutCommand {
    /// Show the grid layout for a viewport width.
    Show(LayoutArgs),

    /// Persist a new grid density and show the resulting layout.
    Set {
        /// compact (3) or wide (5).
        #[arg(value_name = "MODE")]
        mode: String,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(Args)]
pub struct LayoutArgs {
    /// Viewport width in CSS pixels.
    #[arg(long = "width", value_name = "PX", default_value_t = 1280)]
    pub width: u32,

    /// Preferences file (overrides settings).
    #[arg(long = "preferences", value_name = "PATH")]
    pub preferences: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

/// Modes accepted by `layout set`, for help text and validation messages.
pub fn mode_choices() -> String {
    GridMode::ALL
        .iter()
        .map(|mode| format!("{} ({})", mode.label().to_lowercase(), mode.stored_value()))
        .collect::<Vec<_>>()
        .join(", ")
}
