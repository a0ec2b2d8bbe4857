use clap::{Parser, Subcommand};
use imaginarium_core::ConfigOverrides;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "imaginarium")]
#[command(about = "Single-user catalog of imaginary items", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding items.csv, items.json and logs/
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Starts the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data_dir: self.data_dir.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add an item, or update the item with the same id
    Add {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        category: String,

        #[arg(long)]
        description: String,
    },

    /// Delete an item by id
    Delete { id: String },

    /// List all items
    List,

    /// Find items whose name or category contains a token
    Search { token: String },

    /// Show items grouped by category
    Tree,

    /// Export the catalog as JSON
    Export {
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Interactive console menu
    Menu,
}
