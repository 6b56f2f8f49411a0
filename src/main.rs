// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use gnome_l10n::app_config::{self, Config};
use gnome_l10n::language_utils;
use gnome_l10n::stats::{Dataset, FilterCriteria, FilterMode, SortKey, Summary};
use gnome_l10n::Controller;

/// CLI Wrapper for SortKey to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSortKey {
    PctAsc,
    PctDesc,
    NameAsc,
    NameDesc,
    UntransDesc,
    FuzzyDesc,
    TotalDesc,
    State,
}

impl From<CliSortKey> for SortKey {
    fn from(cli_key: CliSortKey) -> Self {
        match cli_key {
            CliSortKey::PctAsc => SortKey::PercentAsc,
            CliSortKey::PctDesc => SortKey::PercentDesc,
            CliSortKey::NameAsc => SortKey::NameAsc,
            CliSortKey::NameDesc => SortKey::NameDesc,
            CliSortKey::UntransDesc => SortKey::UntranslatedDesc,
            CliSortKey::FuzzyDesc => SortKey::FuzzyDesc,
            CliSortKey::TotalDesc => SortKey::TotalDesc,
            CliSortKey::State => SortKey::State,
        }
    }
}

/// CLI Wrapper for FilterMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliFilterMode {
    All,
    Incomplete,
    Complete,
    Fuzzy,
    Translated,
}

impl From<CliFilterMode> for FilterMode {
    fn from(cli_mode: CliFilterMode) -> Self {
        match cli_mode {
            CliFilterMode::All => FilterMode::All,
            CliFilterMode::Incomplete => FilterMode::Incomplete,
            CliFilterMode::Complete => FilterMode::Complete,
            CliFilterMode::Fuzzy => FilterMode::HasFuzzy,
            CliFilterMode::Translated => FilterMode::StateTranslated,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Which statistics to load and in what order
#[derive(Args, Debug)]
struct LoadArgs {
    /// Release to load (e.g. 'gnome-49'); defaults to the configured release
    #[arg(short, long)]
    release: Option<String>,

    /// Language code (e.g. 'sv', 'pt_BR'); defaults to the configured language
    #[arg(short, long)]
    language: Option<String>,

    /// Sort order
    #[arg(short, long, value_enum)]
    sort: Option<CliSortKey>,

    /// Ignore cached statistics and load them again
    #[arg(long)]
    refresh: bool,
}

/// How to narrow down the module list
#[derive(Args, Debug)]
struct FilterArgs {
    /// Only modules whose name contains this text
    #[arg(short, long, default_value = "")]
    query: String,

    /// Minimum completeness in percent
    #[arg(short, long, default_value_t = 0.0)]
    min: f64,

    /// Quick filter
    #[arg(long, value_enum)]
    mode: Option<CliFilterMode>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List GNOME releases
    Releases,

    /// List the languages offered by default
    Languages,

    /// Show module translation statistics
    Stats {
        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export all loaded module statistics as CSV (filters do not apply)
    Export {
        #[command(flatten)]
        load: LoadArgs,

        /// Output file or directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Generate shell completions for gnome-l10n
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// GNOME L10n - translation statistics for l10n.gnome.org
#[derive(Parser, Debug)]
#[command(name = "gnome-l10n")]
#[command(version)]
#[command(about = "Translation statistics viewer for l10n.gnome.org")]
#[command(long_about = "Shows how far GNOME modules are translated into a language, using the l10n.gnome.org API.

EXAMPLES:
    gnome-l10n releases                          # List GNOME releases
    gnome-l10n stats -l sv                       # Swedish statistics for the default release
    gnome-l10n stats -r gnome-48 -l de -s pct-desc
    gnome-l10n stats -q gnome -m 50 --mode fuzzy # Filter by name, completeness and state
    gnome-l10n export -l sv -o stats.csv         # Export to CSV
    gnome-l10n completions bash > gnome-l10n.bash

CONFIGURATION:
    Settings are stored in $XDG_CONFIG_HOME/gnome-l10n/settings.json by default.
    If the file doesn't exist, a default one is created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        log::set_max_level(level_filter(&level.clone().into()));
    }

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "gnome-l10n", &mut std::io::stdout());
        return Ok(());
    }

    let config_path = cli.config_path.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    }
    config.validate()?;

    if cli.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    match cli.command {
        Commands::Releases => run_releases(config).await,
        Commands::Languages => {
            for (code, name) in language_utils::KNOWN_LANGUAGES {
                let marker = if code == config.default_language { "*" } else { " " };
                println!("{} {:<8} {}", marker, code, name);
            }

            // The configured language may be outside the list, e.g. "en_GB"
            let name = language_utils::get_language_name(&config.default_language)?;
            println!();
            println!("Default language: {} ({})", name, config.default_language);
            Ok(())
        }
        Commands::Stats { load: args, filter } => {
            let (controller, dataset) = load(config, &args).await?;
            let view = controller.view(
                &dataset,
                &criteria(&filter, controller.config()),
                sort_key(&args, controller.config()),
            );
            print_dataset(&dataset, &view);
            Ok(())
        }
        Commands::Export { load: args, output } => {
            let (controller, dataset) = load(config, &args).await?;
            let key = sort_key(&args, controller.config());
            let path = controller.export(&dataset, key, &output)?;
            info!("Exported to {}", path.display());
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

async fn run_releases(config: Config) -> Result<()> {
    let controller = Controller::with_config(config)?;
    for release in controller.list_releases().await? {
        println!("{}", release.display_name());
    }
    Ok(())
}

fn criteria(filter: &FilterArgs, config: &Config) -> FilterCriteria {
    let mode = filter.mode.clone().map(FilterMode::from).unwrap_or(config.filter_mode);
    FilterCriteria::new(filter.query.clone())
        .min_completeness(filter.min)
        .mode(mode)
}

fn sort_key(args: &LoadArgs, config: &Config) -> SortKey {
    args.sort.clone().map(SortKey::from).unwrap_or(config.sort)
}

/// Build a controller with a progress bar and load the requested dataset
async fn load(config: Config, args: &LoadArgs) -> Result<(Controller, Dataset)> {
    let release = args.release.clone().unwrap_or_else(|| config.default_release.clone());
    let language = args.language.clone().unwrap_or_else(|| config.default_language.clone());

    let progress_bar = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} modules {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style);
    progress_bar.set_message(format!("{} / {}", release, language));

    let pb = progress_bar.clone();
    let controller = Controller::with_progress(
        config,
        Arc::new(move |done, total| {
            pb.set_length(total as u64);
            pb.set_position(done as u64);
        }),
    )?;

    let dataset = controller.load_stats(&release, &language, args.refresh).await;
    progress_bar.finish_and_clear();

    Ok((controller, dataset?))
}

fn text_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round().clamp(0.0, width as f64) as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn print_dataset(dataset: &Dataset, view: &Dataset) {
    for (module, stat) in view.rows() {
        println!(
            "{:<28} {:<24} {} {:>5.1}%  ✓ {:<5} ~ {:<5} ✗ {:<5} ({}) {}",
            module.name,
            format!("{} / {}", module.branch, module.domain),
            text_bar(stat.percent(), 20),
            stat.percent(),
            stat.translated,
            stat.fuzzy,
            stat.untranslated,
            stat.total(),
            stat.state
        );
    }

    let summary = Summary::of(dataset);
    println!();
    println!(
        "{} modules, {} complete, {} fuzzy, {} untranslated: {:.1}% ({}/{})",
        summary.modules,
        summary.complete_modules,
        summary.fuzzy,
        summary.untranslated,
        summary.percent(),
        summary.translated,
        summary.total()
    );
    println!("{} modules shown, {} total", view.len(), dataset.len());
}
