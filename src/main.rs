//! Entry point for the i18n bundle command line tool.

use std::error::Error as _;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use i18n_bundler::config::{
    BundlerSettings,
    ConfigError,
    ConfigManager,
    FragmentMatcher,
    MatcherError,
};
use i18n_bundler::{
    BundleError,
    CombineOptions,
    FillOptions,
    SplitOptions,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{
    InitError,
    RollingFileAppender,
    Rotation,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{
    EnvFilter,
    Layer,
    fmt,
};

/// Combine, fill and split per-component i18n JSON fragments
#[derive(Parser, Debug)]
#[command(name = "i18n-bundler", version)]
struct Cli {
    /// Project base directory. Relative directories are resolved against it
    #[arg(long, global = true, default_value = ".")]
    project_dir: PathBuf,

    /// Configuration file (default: <project-dir>/.i18n-bundler.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write a debug log to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Operation to run
    #[command(subcommand)]
    command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
enum Command {
    /// Combine all fragments into one <language>.json per language
    Combine {
        /// Root of the fragment tree
        #[arg(long)]
        source_dir: Option<PathBuf>,
        /// Directory the combined files are written to
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Subdirectory of the output directory
        #[arg(long)]
        path_prefix: Option<String>,
        /// Indent the combined files
        #[arg(long)]
        pretty: bool,
    },

    /// Add keys missing from the target language as "<target>:<source text>"
    Fill {
        /// Language whose keys are copied, e.g. de
        #[arg(long)]
        source_language: String,
        /// Language that receives the placeholders, e.g. en
        #[arg(long)]
        target_language: String,
        /// Root of the fragment tree
        #[arg(long)]
        source_dir: Option<PathBuf>,
        /// Write fragments as single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Write the values of a combined file back into the fragments
    Split {
        /// Combined file, relative to the working directory
        #[arg(long)]
        file: PathBuf,
        /// Language block the values are written to
        #[arg(long)]
        language: String,
        /// Root of the fragment tree
        #[arg(long)]
        source_dir: Option<PathBuf>,
        /// Write fragments as single-line JSON
        #[arg(long)]
        compact: bool,
    },
}

/// Anything that makes the process exit with a failure status
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Exclude patterns could not be compiled
    #[error(transparent)]
    Matcher(#[from] MatcherError),

    /// The operation itself failed
    #[error(transparent)]
    Bundle(#[from] BundleError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_file.as_deref());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            let mut source = error.source();
            while let Some(cause) = source {
                tracing::error!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

/// Console logging on stderr, plus an optional debug log file.
///
/// The returned guard flushes the file writer when dropped.
fn init_tracing(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let (file_appender, appender_error) = match log_file.map(build_file_appender).transpose() {
        Ok(appender) => (appender, None),
        Err(error) => (None, Some(error)),
    };
    let (file_layer, guard) = file_appender.map_or((None, None), |appender| {
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(EnvFilter::new("debug"));
        (Some(layer), Some(guard))
    });

    tracing_subscriber::registry().with(console_layer).with(file_layer).init();

    if let Some(error) = appender_error {
        tracing::warn!("Log file disabled: {error}");
    }
    guard
}

/// Appender writing to exactly `path`, never rotated.
fn build_file_appender(path: &Path) -> Result<RollingFileAppender, InitError> {
    let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .map_or_else(|| "i18n-bundler.log".to_string(), |name| name.to_string_lossy().into_owned());

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
}

/// Resolves settings from the config file and arguments, then runs the command.
fn run(cli: Cli) -> Result<(), CliError> {
    let mut manager = ConfigManager::new();
    manager.load_settings(cli.project_dir, cli.config.as_deref())?;
    let mut settings = manager.get_settings().clone();

    match cli.command {
        Command::Combine { source_dir, output_dir, path_prefix, pretty } => {
            override_source_dir(&mut settings, source_dir);
            if let Some(dir) = output_dir {
                settings.output_dir = dir;
            }
            if path_prefix.is_some() {
                settings.path_prefix = path_prefix;
            }
            settings.combine.pretty |= pretty;
            manager.update_settings(settings)?;

            let settings = manager.get_settings();
            let options = CombineOptions {
                source_dir: manager.source_dir(),
                output_dir: manager.output_dir(),
                path_prefix: settings.path_prefix.clone(),
                pretty: settings.combine.pretty,
                matcher: FragmentMatcher::new(settings)?,
            };
            let report = i18n_bundler::combine(&options)?;
            tracing::info!(
                languages = ?report.languages,
                fragments = report.fragments,
                files = report.files_written.len(),
                "Combine finished"
            );
        }
        Command::Fill { source_language, target_language, source_dir, compact } => {
            override_source_dir(&mut settings, source_dir);
            settings.fill.pretty &= !compact;
            manager.update_settings(settings)?;

            let settings = manager.get_settings();
            let options = FillOptions {
                source_dir: manager.source_dir(),
                source_language,
                target_language,
                pretty: settings.fill.pretty,
                matcher: FragmentMatcher::new(settings)?,
            };
            let report = i18n_bundler::fill(&options)?;
            tracing::info!(
                fragments = report.fragments,
                changed = report.fragments_changed,
                keys_added = report.keys_added,
                "Fill finished"
            );
        }
        Command::Split { file, language, source_dir, compact } => {
            override_source_dir(&mut settings, source_dir);
            settings.split.pretty &= !compact;
            manager.update_settings(settings)?;

            let settings = manager.get_settings();
            let options = SplitOptions {
                source_dir: manager.source_dir(),
                combined_file: file,
                language,
                pretty: settings.split.pretty,
                matcher: FragmentMatcher::new(settings)?,
            };
            let report = i18n_bundler::split(&options)?;
            tracing::info!(
                fragments = report.fragments,
                keys_written = report.keys_written,
                "Split finished"
            );
        }
    }

    Ok(())
}

/// Applies `--source-dir` when given.
fn override_source_dir(settings: &mut BundlerSettings, source_dir: Option<PathBuf>) {
    if let Some(dir) = source_dir {
        settings.source_dir = dir;
    }
}
