use std::path::PathBuf;

use clap::Parser;

pub const HISTORY_FILE: &str = ".jason_scout_history";

/// jason-scout - Interactive path explorer for JSON documents
#[derive(Parser, Debug)]
#[command(name = "jason-scout")]
#[command(version, about = "Interactive path explorer for JSON documents")]
pub struct Args {
    /// Path to the JSON file to browse (stdin is read when omitted)
    pub json_file: Option<PathBuf>,

    /// Directory for saved search results (defaults to the file's directory)
    #[arg(long, env = "JASON_SCOUT_STORE_DIR")]
    pub store_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Line editor history file
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Run a command and exit; may be repeated
    #[arg(short = 'c', long = "command")]
    pub commands: Vec<String>,
}

/// Settings the session runs with, resolved from `Args` and the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub json_file: Option<PathBuf>,
    pub store_dir: Option<PathBuf>,
    pub color: bool,
    pub log_level: String,
    pub history_file: PathBuf,
    pub commands: Vec<String>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let history_file = args.history.unwrap_or_else(default_history_file);
        Self {
            json_file: args.json_file,
            store_dir: args.store_dir,
            color: !args.no_color,
            log_level: args.log_level,
            history_file,
            commands: args.commands,
        }
    }
}

impl Config {
    pub fn interactive(&self) -> bool {
        self.commands.is_empty()
    }
}

fn default_history_file() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(HISTORY_FILE))
        .unwrap_or_else(|| PathBuf::from(HISTORY_FILE))
}

/// Install the global subscriber; `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
