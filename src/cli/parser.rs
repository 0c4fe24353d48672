use clap::{Parser, Subcommand};

/// Command-line interface definition for TimeFlow
/// CLI application to track named time windows with SQLite
#[derive(Parser)]
#[command(
    name = "timeflow",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track named time windows: progress bars, days left, and widget-style surfaces over SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override widget preferences path
    #[arg(global = true, long = "prefs")]
    pub prefs: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Add a new TimeFlow
    Add {
        /// Display title (must not be blank)
        title: String,

        /// Window start (YYYY-MM-DD or 'YYYY-MM-DD HH:MM', UTC)
        #[arg(long = "from")]
        from: String,

        /// Window end (YYYY-MM-DD or 'YYYY-MM-DD HH:MM', UTC)
        #[arg(long = "to")]
        to: String,

        /// Display color (#RRGGBB or #AARRGGBB)
        #[arg(long = "color")]
        color: Option<String>,
    },

    /// List all TimeFlows with their progress
    List {
        /// Evaluate progress at this instant instead of now
        #[arg(long = "at", help = "Reference instant (YYYY-MM-DD or 'YYYY-MM-DD HH:MM')")]
        at: Option<String>,
    },

    /// Edit an existing TimeFlow
    Edit {
        /// Id of the TimeFlow to edit
        id: i64,

        #[arg(long = "title")]
        title: Option<String>,

        #[arg(long = "from")]
        from: Option<String>,

        #[arg(long = "to")]
        to: Option<String>,

        #[arg(long = "color")]
        color: Option<String>,
    },

    /// Delete a TimeFlow by id (cascades widget bindings)
    Del {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long = "yes")]
        yes: bool,
    },

    /// Manage widget instances and render their surfaces
    Widget {
        #[command(subcommand)]
        action: WidgetCmd,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum WidgetCmd {
    /// Bind a widget instance to a TimeFlow (upsert)
    Bind { widget_id: i64, item_id: i64 },

    /// Remove a widget instance's binding
    Unbind { widget_id: i64 },

    /// Render one widget instance
    Show {
        widget_id: i64,

        #[arg(long = "at")]
        at: Option<String>,
    },

    /// Render the stacked aggregate widget (top-5 soonest to expire)
    Stacked {
        #[arg(long = "at")]
        at: Option<String>,
    },

    /// Refresh widget instances (all, or an explicit id list)
    Refresh {
        /// Comma-separated widget instance ids
        #[arg(long = "ids")]
        ids: Option<String>,

        #[arg(long = "at")]
        at: Option<String>,
    },
}
