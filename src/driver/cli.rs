//! CLI Argument Parsing
//!
//! CLIの引数解析

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};

use crate::adapter::config::DEFAULT_CONFIG_PATH;

/// 開講セッションの受講登録を管理するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "coursereg")]
#[command(about = "Manage course sessions and student enrollment", long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Open a new session
    Open {
        #[arg(long)]
        title: String,

        /// Start date-time (RFC 3339)
        #[arg(long)]
        start: DateTime<Utc>,

        /// End date-time (RFC 3339)
        #[arg(long)]
        end: DateTime<Utc>,

        /// Maximum number of students
        #[arg(long, allow_negative_numbers = true)]
        capacity: i64,

        #[arg(long, default_value = "")]
        contents: String,

        /// Path to a cover image file
        #[arg(long)]
        cover_image: Option<String>,
    },

    /// Start or end recruiting
    Recruit { id: u64, phase: Phase },

    /// Start or end the course itself
    Progress { id: u64, phase: Phase },

    /// Enroll a user into a session
    Enroll {
        id: u64,

        #[arg(long)]
        user: u64,
    },

    /// Show a session and its roster
    Show { id: u64 },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    End,
}
