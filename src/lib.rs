pub mod commands;
pub mod config;
pub mod date;
pub mod persistence;
pub mod render;
pub mod store;
pub mod task;

use clap::{Parser, Subcommand};

/// CLI shared between main and tests
#[derive(Parser, Debug)]
#[command(name = "dstodo", version, about = "A plain-text todo list with due dates")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Add a task to the pending list
    #[command(alias = "a")]
    Add {
        text: String,
        /// Due date expression, or "prioritize" to set the priority flag
        when: Option<String>,
    },
    /// Add a task with the priority flag set
    #[command(aliases = ["priorize", "prio", "pri", "p"])]
    Prioritize { text: String },
    /// Print pending tasks, then done tasks
    #[command(aliases = ["ls", "ll", "l"])]
    List {
        /// Show only tasks due on this date (prioritized tasks always pass)
        filter: Option<String>,
    },
    /// Blank out a pending task by its index
    #[command(aliases = ["rm", "delete"])]
    Remove { index: usize },
    /// Move a pending task to the done list
    #[command(alias = "do")]
    Done { index: usize },
}
