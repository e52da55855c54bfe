use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::packing::{BinAlgo, Heuristic};

#[derive(Parser, Debug)]
#[command(name = "boxpack")]
#[command(version, about = "Storage box floor organizer", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Organize every layout request and write a .layout.json per request
    Pack(CommonArgs),
    /// Check whether one item of a request can still be added to the others
    Check(CheckArgs),
    /// Write a .boxpack preferences file
    Init(InitArgs),
    /// List the available placement heuristics
    Heuristics {
        /// Only show the heuristics offered in the auto-organize menu
        #[arg(long)]
        menu: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Layout request files or directories
    #[arg(required_unless_present = "config")]
    pub input: Vec<PathBuf>,

    /// Load settings from a .boxpack config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory for layout files [default: .]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Placement heuristic [default: bottom-left]
    #[arg(long, value_enum)]
    pub heuristic: Option<Heuristic>,

    /// Bin selection algorithm [default: first-fit]
    #[arg(long, value_enum)]
    pub algorithm: Option<BinAlgo>,

    /// Allow turning items 90 degrees
    #[arg(long)]
    pub rotate: bool,

    /// Keep the request's item order instead of sorting by area
    #[arg(long)]
    pub no_sort: bool,

    /// Try every heuristic and keep the best layout
    #[arg(long)]
    pub best: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Id of the item being added; the request's other items are already placed
    #[arg(long, value_name = "ID")]
    pub candidate: String,

    /// Do not write the resulting layout when the candidate fits
    #[arg(long)]
    pub no_autosort: bool,
}

impl CheckArgs {
    /// Whether an accepted candidate gets its layout written.
    /// `--no-autosort` overrides the saved preference.
    pub fn autosort(&self, preference: bool) -> bool {
        !self.no_autosort && preference
    }
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Path of the .boxpack file to write
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Layout request files, directories or glob patterns to record
    #[arg(short, long = "input", value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// Output directory to record
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Placement heuristic to record
    #[arg(long, value_enum, default_value_t = Heuristic::default())]
    pub heuristic: Heuristic,

    /// Bin selection algorithm to record
    #[arg(long, value_enum, default_value_t = BinAlgo::default())]
    pub algorithm: BinAlgo,

    /// Record rotation as allowed
    #[arg(long)]
    pub rotate: bool,

    /// Record unsorted packing
    #[arg(long)]
    pub no_sort: bool,

    /// Record the heuristic search as enabled
    #[arg(long)]
    pub best: bool,

    /// Record autosort as disabled
    #[arg(long)]
    pub no_autosort: bool,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
