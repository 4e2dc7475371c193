use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "centime")]
#[command(about = "Centime CLI for database management and monthly budget rollups")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database using migrations
    InitDb,
    /// Print a project's monthly totals as JSON
    Totals {
        /// Project id
        #[arg(short, long)]
        project: i32,
        /// Month offset relative to the current month (0 = this month)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
    },
    /// Print one level of a project's category tree with totals as JSON
    Tree {
        /// Project id
        #[arg(short, long)]
        project: i32,
        /// Category id to root the tree at; omit for the project root
        #[arg(short, long)]
        category: Option<i32>,
        /// Month offset relative to the current month (0 = this month)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
    },
}

impl Cli {
    pub async fn run(self, config: &AppConfig) -> Result<()> {
        match self.command {
            Commands::InitDb => commands::init_database(&config.database_url).await,
            Commands::Totals { project, offset } => {
                commands::show_totals(config, project, offset).await
            }
            Commands::Tree {
                project,
                category,
                offset,
            } => commands::show_tree(config, project, category, offset).await,
        }
    }
}
