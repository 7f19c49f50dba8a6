use std::path::{Path, PathBuf};

mod name;
mod terminal;
mod tree;
mod validate;

use clap::ArgAction;
use name::Name;
use subgroups::Config;
use tree::Tree;
use validate::Validate;

/// Configuration file picked up from the working directory.
const DEFAULT_CONFIG: &str = "sgv.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a configuration file (defaults to `sgv.toml` if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = load_config(self.config.as_deref())?;

        self.command
            .unwrap_or_else(|| Command::Validate(Validate::default()))
            .run(&config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Loads the configuration.
///
/// An explicitly requested file must load. The default file is optional and
/// falls back to the default configuration if it is missing or invalid.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return Config::load(path).map_err(anyhow::Error::msg);
    }

    let path = Path::new(DEFAULT_CONFIG);
    if !path.exists() {
        return Ok(Config::default());
    }

    Ok(Config::load(path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    }))
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Validate the subgroup hierarchies in manifest files (default)
    Validate(Validate),

    /// Check whether strings are legal subgroup names
    Name(Name),

    /// Show the subgroup hierarchy of each PodGroup in a manifest
    Tree(Tree),
}

impl Command {
    fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Validate(command) => command.run(config)?,
            Self::Name(command) => command.run(),
            Self::Tree(command) => command.run()?,
        }
        Ok(())
    }
}
