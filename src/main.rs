//! pairset - dataset pairing utility
//!
//! CLI entry point

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::Mutex;

use pairset::{
    exit_codes,
    // CLI
    Cli, Commands, PairArgs, RenameArgs,
    // Config
    CliOverrides, Config,
    // Pairing
    PairDirs, PairOptions, PairPipeline,
    // Progress tracking
    OutputMode, PairingStage, ProgressCallback, ProgressTracker,
};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pair(args) => run_pair(&args),
        Commands::Rename(args) => run_rename(&args),
        Commands::Info => run_info(),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

// ============ Progress Callback Implementation ============

/// CLI progress: an indicatif bar in normal mode, textual per-pair
/// progress through the tracker in verbose modes.
struct CliProgress {
    tracker: Mutex<ProgressTracker>,
    bar: ProgressBar,
    mode: OutputMode,
}

impl CliProgress {
    fn new(verbose: u8, quiet: bool) -> Self {
        let mode = if quiet {
            OutputMode::Quiet
        } else {
            OutputMode::from_verbosity(verbose)
        };

        let bar = if mode == OutputMode::Normal {
            let bar = ProgressBar::new(0);
            bar.set_style(
                ProgressStyle::with_template("    {msg} [{bar:40}] {pos}/{len}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        Self {
            tracker: Mutex::new(ProgressTracker::new(mode)),
            bar,
            mode,
        }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
        if let Ok(mut tracker) = self.tracker.lock() {
            tracker.complete();
        }
    }
}

impl ProgressCallback for CliProgress {
    fn on_stage_start(&self, stage: PairingStage) {
        self.bar.set_message(stage.name());
        if let Ok(mut tracker) = self.tracker.lock() {
            tracker.set_stage(stage);
        }
    }

    fn on_stage_complete(&self, stage: PairingStage, message: &str) {
        if self.mode.should_show(OutputMode::Normal) {
            self.bar.suspend(|| println!("    {}: {}", stage.name(), message));
        }
    }

    fn on_step_progress(&self, current: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current as u64);
        if let Ok(mut tracker) = self.tracker.lock() {
            tracker.update_pair(current, total);
        }
    }

    fn on_debug(&self, message: &str) {
        if self.mode.should_show(OutputMode::VeryVerbose) {
            println!("    [DEBUG] {}", message);
        }
    }
}

// ============ Pair Command ============

fn run_pair(args: &PairArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(args.verbose, args.quiet);

    // Validate source directories up front
    for dir in [&args.clean_src, &args.noisy_src] {
        if !dir.exists() {
            eprintln!("Error: Source directory does not exist: {}", dir.display());
            std::process::exit(exit_codes::INPUT_NOT_FOUND);
        }
    }

    // Load config file if specified, otherwise use default
    let file_config = match &args.config {
        Some(config_path) => match Config::load_from_path(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                Config::default()
            }
        },
        None => Config::load().unwrap_or_default(),
    };

    // Merge config file with CLI arguments (CLI takes precedence)
    let cli_overrides = create_cli_overrides(args);
    let options = file_config.merge_with_cli(&cli_overrides);
    let pipeline = PairPipeline::new(options);

    let dirs = PairDirs {
        clean_src: args.clean_src.clone(),
        noisy_src: args.noisy_src.clone(),
        clean_out: args.clean_out.clone(),
        noisy_out: args.noisy_out.clone(),
    };

    if args.dry_run {
        print_execution_plan(args, &dirs, pipeline.options())?;
        return Ok(());
    }

    let progress = CliProgress::new(args.verbose, args.quiet);
    let report = pipeline.run_with_progress(&dirs, &progress)?;
    progress.finish();

    if !args.quiet {
        ProgressTracker::print_summary(&report);
        println!(
            "{} image pairs created, originals consumed ({:.2}s)",
            report.pairs, report.elapsed_seconds
        );
    }

    Ok(())
}

// ============ Helper Functions ============

/// Create CLI overrides from PairArgs
///
/// Only override config file values when the CLI explicitly sets one, so
/// config files can provide defaults without clap defaults clobbering
/// them.
fn create_cli_overrides(args: &PairArgs) -> CliOverrides {
    let mut overrides = CliOverrides::new();

    overrides.collision = args.collision;

    // Sorting: override only if --no-sort was used
    if !args.effective_sort() {
        overrides.sort_entries = Some(false);
    }

    // Journal: override only if explicitly enabled
    if args.journal {
        overrides.journal = Some(true);
    }

    overrides
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        tracing::Level::ERROR
    } else {
        match verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// Print execution plan for dry-run mode
fn print_execution_plan(
    args: &PairArgs,
    dirs: &PairDirs,
    options: &PairOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let clean_count = pairset::list_image_files(&dirs.clean_src, false)?.len();
    let noisy_count = pairset::list_image_files(&dirs.noisy_src, false)?.len();

    println!("=== Dry Run - Execution Plan ===");
    println!();
    println!("Clean source:  {}", dirs.clean_src.display());
    println!("Noisy source:  {}", dirs.noisy_src.display());
    println!("Clean output:  {}", dirs.clean_out.display());
    println!("Noisy output:  {}", dirs.noisy_out.display());
    println!();
    println!("Images found:");
    println!("  Clean: {}", clean_count);
    println!("  Noisy: {}", noisy_count);
    println!();
    println!("Pipeline Stages:");
    println!("  1. Catalog clean images by identifier");
    println!("  2. Match noisy images against the catalog");
    println!("  3. Materialize pairs as {{index}}.jpg, consuming sources");
    println!("  4. Remove drained source directories");
    println!();
    println!("Options:");
    println!("  Collision policy: {:?}", options.collision);
    println!("  Sort entries: {}", if options.sort_entries { "YES" } else { "NO" });
    println!("  Journal: {}", if options.journal { "YES" } else { "NO" });
    println!("  Verbose: {}", args.verbose);

    Ok(())
}

// ============ Rename Command ============

fn run_rename(args: &RenameArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(1, false);

    if !args.directory.exists() {
        eprintln!(
            "Error: Directory does not exist: {}",
            args.directory.display()
        );
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let report = pairset::prefix_numbered_files(&args.directory, &args.prefix, args.dry_run)?;

    for rename in &report.renamed {
        println!(
            "{}'{}' -> '{}'",
            if args.dry_run { "[dry-run] " } else { "" },
            rename.from.display(),
            rename.to.display()
        );
        std::io::stdout().flush().ok();
    }
    println!(
        "{} file(s) renamed, {} entr{} skipped",
        report.renamed.len(),
        report.skipped,
        if report.skipped == 1 { "y" } else { "ies" }
    );

    Ok(())
}

// ============ Info Command ============

fn run_info() -> Result<(), Box<dyn std::error::Error>> {
    println!("pairset v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("System Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  Arch: {}", std::env::consts::ARCH);

    println!();
    println!("Config File Locations:");
    println!("  Local: ./{}", pairset::config::LOCAL_CONFIG_FILE);
    if let Some(config_dir) = dirs::config_dir() {
        println!(
            "  User:  {}",
            config_dir.join(pairset::config::USER_CONFIG_SUBPATH).display()
        );
    }

    println!();
    println!("Image extensions considered: {}", pairset::IMAGE_EXTENSIONS.join(", "));
    println!("Output naming: {{index}}.{}", pairset::OUTPUT_EXTENSION);

    Ok(())
}
