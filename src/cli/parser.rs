use clap::{Parser, Subcommand};

/// Command-line interface definition for rTimeclock
/// CLI application to clock in/out and track daily work time against a goal
#[derive(Parser)]
#[command(
    name = "rtimeclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple time clock CLI: clock in and out, take breaks, and track your daily goal",
    long_about = None
)]
pub struct Cli {
    /// Override the state file path (useful for tests or a custom location)
    #[arg(global = true, long = "store")]
    pub store: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the state file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Show the current state, worked time and time left
    Status {
        #[arg(long, short, help = "Refresh the display every second until interrupted")]
        watch: bool,
    },

    /// Clock in and start a work session
    In,

    /// Clock out and record the session
    Out {
        #[arg(long, short, help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Start a break
    Break,

    /// End the current break
    Resume,

    /// Set the daily goal in hours (only while clocked out)
    Goal {
        /// Goal in hours, e.g. 8 or 7.5; prompts when omitted
        hours: Option<String>,
    },

    /// Show the Monday-Sunday summary of a week
    Week {
        #[arg(long, value_name = "YYYY-MM-DD", help = "Any day of the week to show (default: today)")]
        date: Option<String>,
    },

    /// List recorded days
    List {
        #[arg(
            long,
            short,
            help = "Filter by year/month/day, a custom range A:B, or 'all' (default: current month)"
        )]
        period: Option<String>,
    },
}
