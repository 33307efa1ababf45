//! `ShareCode` CLI - share source files to code-sharing services
//!
//! Provides commands for publishing a file (or a line range of it), opening
//! previously shared content, listing services and editing service settings.

mod terminal;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use sharecode_core::{
    AppSettings, BuiltinCatalog, ConfigKey, ConfigManager, EnglishLabels, Host, Labels,
    OpenOutcome, Picker, ServiceConfiguration, ServiceDescriptor, ServiceKind, ShareCode,
    ShareOutcome, TomlSettingsStore,
};
use tracing_subscriber::EnvFilter;

use terminal::{
    ConsoleNotifier, ConsoleViewer, FileTextSource, LineRange, PresetPicker, SystemBrowser,
    TerminalPicker,
};

/// `ShareCode` command-line interface
#[derive(Parser)]
#[command(name = "sharecode")]
#[command(author, version, about = "Share code to Pastebin, GitHub Gist or GitLab")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration directory (defaults to ~/.config/sharecode)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Publish a file
    #[command(about = "Publish a file or part of it to a sharing service")]
    Share {
        /// File to publish
        file: PathBuf,

        /// Language identifier (inferred from the extension by default)
        #[arg(short, long)]
        language: Option<String>,

        /// Publish only these lines (1-based, inclusive)
        #[arg(short = 'L', long, value_name = "START:END")]
        lines: Option<LineRange>,

        /// Service to use instead of asking (pastebin, github, gitlab)
        #[arg(short, long)]
        service: Option<ServiceKind>,

        /// Use the anonymous variant of --service
        #[arg(short, long, requires = "service")]
        anonymous: bool,
    },

    /// Open previously shared content
    #[command(about = "Retrieve and show something shared earlier")]
    Open {
        /// Service to use instead of asking (pastebin, github, gitlab)
        #[arg(short, long)]
        service: Option<ServiceKind>,
    },

    /// List services
    #[command(about = "List services in the order they are offered")]
    Services {
        /// Include anonymous variants
        #[arg(short, long)]
        all: bool,
    },

    /// Manage service settings
    #[command(subcommand, about = "Read or change service settings")]
    Config(ConfigCommands),
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show a setting
    #[command(about = "Show one setting of a service")]
    Get {
        /// Service (pastebin, github, gitlab)
        service: ServiceKind,

        /// Key (username, authtoken, baseurl)
        key: String,

        /// Print tokens instead of masking them
        #[arg(long)]
        reveal: bool,
    },

    /// Change a setting
    #[command(about = "Change one setting of a service")]
    Set {
        /// Service (pastebin, github, gitlab)
        service: ServiceKind,

        /// Key (username, authtoken, baseurl)
        key: String,

        /// New value
        value: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = load_context(cli.config_dir.as_deref()).and_then(|context| {
        init_logging(cli.verbose, &context.settings);
        match cli.command {
            Commands::Share {
                file,
                language,
                lines,
                service,
                anonymous,
            } => cmd_share(&context, &file, language, lines, service, anonymous),
            Commands::Open { service } => cmd_open(&context, service),
            Commands::Services { all } => cmd_services(&context, all),
            Commands::Config(subcmd) => cmd_config(&context, subcmd),
        }
    });

    if let Err(e) = result {
        if !e.is_reported() {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}

/// Installs the stderr subscriber
///
/// `RUST_LOG` wins over `--verbose`, which wins over `[logging] level`.
fn init_logging(verbose: bool, settings: &AppSettings) {
    let fallback = if verbose {
        "debug"
    } else {
        settings.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loaded settings shared by all commands
struct Context {
    settings: AppSettings,
    store: Arc<TomlSettingsStore>,
}

fn load_context(config_dir: Option<&Path>) -> Result<Context, CliError> {
    let manager = match config_dir {
        Some(dir) => ConfigManager::with_config_dir(dir.to_path_buf()),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}")))?,
    };
    let store = TomlSettingsStore::open(manager)
        .map_err(|e| CliError::Config(format!("Failed to load settings: {e}")))?;
    Ok(Context {
        settings: store.settings(),
        store: Arc::new(store),
    })
}

fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Config(format!("Failed to create async runtime: {e}")))
}

fn share_code(context: &Context, picker: Arc<dyn Picker>) -> ShareCode {
    let labels: Arc<dyn Labels> = Arc::new(EnglishLabels);
    let host = Host {
        picker,
        notifier: Arc::new(ConsoleNotifier),
        browser: Arc::new(SystemBrowser),
        viewer: Arc::new(ConsoleViewer),
        labels: Arc::clone(&labels),
    };
    let catalog = BuiltinCatalog::new(
        context.store.clone(),
        ConfigManager::staging_root(&context.settings),
        labels,
    );
    ShareCode::new(host, Arc::new(catalog), context.store.clone())
}

/// Picker answering the service choice from `--service`, if given
fn service_picker(service: Option<ServiceKind>, anonymous: bool) -> Result<Arc<dyn Picker>, CliError> {
    let Some(kind) = service else {
        return Ok(Arc::new(TerminalPicker));
    };
    if anonymous && !kind.supports_anonymous() {
        return Err(CliError::Input(format!("{kind} has no anonymous mode")));
    }
    let label = EnglishLabels.t(kind.label_key(anonymous));
    Ok(Arc::new(PresetPicker::new(label)))
}

/// Share command handler
fn cmd_share(
    context: &Context,
    file: &Path,
    language: Option<String>,
    lines: Option<LineRange>,
    service: Option<ServiceKind>,
    anonymous: bool,
) -> Result<(), CliError> {
    let source =
        FileTextSource::load(file, lines, language).map_err(|e| CliError::Input(e.to_string()))?;
    let share = share_code(context, service_picker(service, anonymous)?);

    match runtime()?.block_on(share.share(&source)) {
        ShareOutcome::Published { .. } => Ok(()),
        ShareOutcome::Cancelled => {
            eprintln!("Cancelled");
            Ok(())
        }
        ShareOutcome::Failed { service, error } => Err(CliError::Failed(format!("{service}: {error}"))),
    }
}

/// Open command handler
fn cmd_open(context: &Context, service: Option<ServiceKind>) -> Result<(), CliError> {
    let share = share_code(context, service_picker(service, false)?);

    match runtime()?.block_on(share.open()) {
        OpenOutcome::Opened { path: None, .. } | OpenOutcome::Cancelled => {
            eprintln!("Cancelled");
            Ok(())
        }
        OpenOutcome::Opened { path: Some(_), .. } => Ok(()),
        OpenOutcome::Failed { service, error } => Err(CliError::Failed(format!("{service}: {error}"))),
    }
}

/// Services command handler
fn cmd_services(context: &Context, all: bool) -> Result<(), CliError> {
    let share = share_code(context, Arc::new(TerminalPicker));
    print!("{}", format_services(&share.candidates(all)));
    Ok(())
}

/// Formats candidates as a table, in offer order
fn format_services(candidates: &[ServiceDescriptor]) -> String {
    let width = candidates
        .iter()
        .map(|d| d.label.len())
        .max()
        .unwrap_or(0)
        .max("SERVICE".len());

    let mut output = format!("{:<width$}  {:<8}  STATUS\n", "SERVICE", "SCOPE");
    for descriptor in candidates {
        let status = if descriptor.service.is_not_configured() {
            "not configured"
        } else {
            "ready"
        };
        let _ = writeln!(
            output,
            "{:<width$}  {:<8}  {status}",
            descriptor.label,
            descriptor.kind.scope()
        );
    }
    output
}

/// Config command handler
fn cmd_config(context: &Context, subcmd: ConfigCommands) -> Result<(), CliError> {
    match subcmd {
        ConfigCommands::Get {
            service,
            key,
            reveal,
        } => {
            let config = ServiceConfiguration::new(service.scope(), context.store.clone());
            let value = config
                .get_named(&key)
                .map_err(|e| CliError::Input(e.to_string()))?;
            match value {
                None => println!("(unset)"),
                Some(_) if !reveal && key == ConfigKey::AuthToken.as_str() => println!("<redacted>"),
                Some(value) => println!("{value}"),
            }
            Ok(())
        }
        ConfigCommands::Set {
            service,
            key,
            value,
        } => {
            let config = ServiceConfiguration::new(service.scope(), context.store.clone());
            let pending = config
                .set_named(&key, value)
                .map_err(|e| CliError::Input(e.to_string()))?;
            runtime()?
                .block_on(pending)
                .map_err(|e| CliError::Config(format!("Failed to save setting: {e}")))?;
            println!("Set {}.{key}", config.scope());
            Ok(())
        }
    }
}

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, input or IO errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Service failure - the chosen service could not upload or open
    pub const SERVICE_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    Input(String),

    /// Service failure, already shown to the user by the notifier
    #[error("Service failed: {0}")]
    Failed(String),
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Failed(_) => exit_codes::SERVICE_FAILURE,
            Self::Config(_) | Self::Input(_) => exit_codes::GENERAL_ERROR,
        }
    }

    /// Returns true if the user has already been told about this error
    #[must_use]
    pub const fn is_reported(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
