mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskdeck", about = "Ordered to-do list for the terminal", version)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a taskdeck workspace in the current directory
    Init,

    /// Add a task to the end of the list
    Add {
        /// Task text (at most 150 characters)
        text: String,

        /// Priority (low, medium, high)
        #[arg(short, long, default_value = "medium")]
        priority: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// List tasks in order
    List {
        /// Which tasks to show (all, active, completed)
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Only show tasks whose text contains this (case-insensitive)
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Mark a task done, or undone again
    Toggle {
        /// Task ID (full or prefix, minimum 4 chars)
        id: String,
    },

    /// Delete a task
    Rm {
        /// Task ID (full or prefix, minimum 4 chars)
        id: String,
    },

    /// Replace a task's text
    Edit {
        /// Task ID (full or prefix, minimum 4 chars)
        id: String,

        /// New text; blank text leaves the task unchanged
        text: String,
    },

    /// Move a task so it sits just before another
    Move {
        /// Task to move
        id: String,

        /// Task it should precede
        #[arg(long)]
        before: String,
    },

    /// Delete every completed task
    ClearCompleted,

    /// Show total, active, and completed counts
    Stats,

    /// Write the whole list as JSON
    Backup {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Replace the whole list from a JSON backup
    Restore {
        /// Backup file, or "-" for stdin
        path: String,
    },

    /// Show or change the display theme
    Theme {
        /// light, dark, or toggle
        value: Option<String>,
    },
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("TASKDECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Add {
            text,
            priority,
            due,
        } => commands::task::add(text, priority, due, cli.json),
        Commands::List { filter, search } => commands::list::run(filter, search, cli.json),
        Commands::Toggle { id } => commands::task::toggle(id),
        Commands::Rm { id } => commands::task::remove(id),
        Commands::Edit { id, text } => commands::edit::run(id, text),
        Commands::Move { id, before } => commands::reorder::run(id, before),
        Commands::ClearCompleted => commands::task::clear_completed(),
        Commands::Stats => commands::list::stats(cli.json),
        Commands::Backup { output } => commands::backup::backup(output),
        Commands::Restore { path } => commands::backup::restore(path),
        Commands::Theme { value } => commands::theme::run(value, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
