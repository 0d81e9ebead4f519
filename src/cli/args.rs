//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::Format;

/// Convert indentation shorthand into BEMJSON, HTML and SCSS/CSS skeletons
#[derive(Parser, Debug)]
#[command(name = "bemtools")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding the local .bemtools.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert the input to another format
    Convert {
        /// Source format (detected when omitted)
        #[arg(short, long, value_parser = parse_format)]
        from: Option<Format>,

        /// Target format (the source's default target when omitted)
        #[arg(short, long, value_parser = parse_format)]
        to: Option<Format>,

        /// Input file (default: stdin)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Print the expanded node tree of shorthand input
    Tree {
        /// Input file (default: stdin)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
    },

    /// Print the detected format of the input
    Detect {
        /// Input file (default: stdin)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
    },

    /// List supported conversions
    Formats,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings as TOML
    Show,
    /// Show config file locations
    Path,
}

fn parse_format(value: &str) -> Result<Format, String> {
    value.parse::<Format>().map_err(|e| e.to_string())
}
