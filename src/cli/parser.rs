use clap::{ArgAction, Parser, Subcommand};

/// Command-line interface definition for rtracker
/// CLI client for a retainer time-tracking service
#[derive(Parser, Debug)]
#[command(
    name = "rtracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "Start/stop the work timer and follow worked hours against the contracted quota",
    long_about = None
)]
pub struct Cli {
    /// Override the API base URL (e.g. http://localhost:8080/api)
    #[arg(global = true, long = "api-url", env = "RTRACKER_API_URL")]
    pub api_url: Option<String>,

    /// Use this configuration file instead of ~/.rtracker/rtracker.conf
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override where the cached credential is stored (useful for tests)
    #[arg(global = true, long = "credentials", value_name = "FILE")]
    pub credentials: Option<String>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the default configuration file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

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

    /// Log in and cache the credential
    Login {
        #[arg(short = 'u', long = "username")]
        username: String,

        /// Read from $RTRACKER_PASSWORD, or prompted when omitted
        #[arg(
            short = 'p',
            long = "password",
            env = "RTRACKER_PASSWORD",
            hide_env_values = true
        )]
        password: Option<String>,
    },

    /// Forget the cached credential
    Logout,

    /// Show who the cached credential belongs to
    Whoami,

    /// Start the work timer (admin)
    Start {
        /// What you are working on
        #[arg(trailing_var_arg = true, num_args = 0..)]
        description: Vec<String>,
    },

    /// Stop the running timer (admin)
    Stop,

    /// Admin panel: running clock, totals, recent sessions
    Status {
        #[arg(long, short = 'w', help = "Keep the clock ticking until Ctrl-C")]
        watch: bool,
    },

    /// Client view: online status, progress against contracted hours, history
    Dashboard {
        #[arg(long, short = 'w', help = "Refresh periodically until Ctrl-C")]
        watch: bool,
    },

    /// Session history grouped by day
    History,
}
