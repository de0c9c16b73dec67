//! pathops - file and directory operations with a level-limited tree scanner.
//!
//! Usage:
//!   pathops file create PATH              Create or touch a file
//!   pathops file copy SRC DST             Copy a file
//!   pathops file move SRC DST             Copy a file, then delete the source
//!   pathops file delete PATH              Delete a file
//!   pathops dir create PATH               Create a directory and its ancestors
//!   pathops dir copy SRC DST              Copy a directory's contents into DST
//!   pathops dir move SRC DST              Move SRC to DST/<name of SRC>
//!   pathops dir delete PATH [--strict]    Delete a directory tree
//!   pathops scan [PATH] [-l LEVELS]       List files, dirs and links

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use pathops_core::{DepthMode, ScanConfig, ScanResult};
use pathops_ops::{
    FileOperation, LoggingHooks, NoHooks, OperationHooks, OperationReport, PathOperations,
};

#[derive(Parser)]
#[command(
    name = "pathops",
    version,
    about = "File and directory operations with a level-limited tree scanner",
    long_about = "pathops creates, copies, moves and deletes files and directories, \
                  and lists a directory tree breadth-first up to a chosen depth.\n\n\
                  Moves are always a full copy followed by deleting the source."
)]
struct Cli {
    /// Log each operation (-v) or every step (-vv). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Single-file operations
    File {
        #[command(subcommand)]
        action: FileAction,
    },

    /// Directory operations
    Dir {
        #[command(subcommand)]
        action: DirAction,
    },

    /// Scan a directory tree breadth-first
    Scan {
        /// Directory to scan (defaults to the configured root, or ".")
        path: Option<PathBuf>,

        /// Number of levels to descend (1 = immediate children only)
        #[arg(short, long)]
        levels: Option<u32>,

        /// Measure depth by counting path segments instead of hops
        #[arg(long)]
        segments: bool,

        /// Warn about unreadable directories instead of failing
        #[arg(long)]
        skip_unreadable: bool,

        /// Report counts without listing paths
        #[arg(long)]
        counts_only: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Load the scan configuration from a JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum FileAction {
    /// Create an empty file, or update the modification time of an existing one
    Create { path: PathBuf },
    /// Copy a file, overwriting the destination
    Copy { source: PathBuf, destination: PathBuf },
    /// Copy a file, then delete the source
    Move { source: PathBuf, destination: PathBuf },
    /// Delete a file
    Delete { path: PathBuf },
}

#[derive(Subcommand)]
enum DirAction {
    /// Create a directory and any missing ancestors
    Create {
        path: PathBuf,
        /// Accepted for compatibility; ancestors are still created
        #[arg(long)]
        no_recursive: bool,
    },
    /// Copy a directory's contents into a destination directory
    Copy {
        source: PathBuf,
        destination: PathBuf,
        /// Create subdirectories without copying their contents
        #[arg(long)]
        no_recursive: bool,
    },
    /// Move a directory beneath a destination directory
    Move { source: PathBuf, destination: PathBuf },
    /// Delete a directory tree
    Delete {
        path: PathBuf,
        /// Fail if the directory does not exist
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let hooks: Box<dyn OperationHooks> = if cli.verbose > 0 {
        Box::new(LoggingHooks)
    } else {
        Box::new(NoHooks)
    };

    match cli.command {
        Command::Scan {
            path,
            levels,
            segments,
            skip_unreadable,
            counts_only,
            format,
            config,
        } => {
            let mut config = match config {
                Some(file) => load_config(&file)?,
                None => ScanConfig::new(path.clone().unwrap_or_else(|| PathBuf::from("."))),
            };
            if segments {
                config.depth_mode = DepthMode::PathSegments;
            }
            config.skip_unreadable |= skip_unreadable;
            config.extended &= !counts_only;

            let mut ops = PathOperations::with_config(config).with_hooks(hooks);
            let operation = FileOperation::scan_directory(path, levels);
            let report = run(&mut ops, &operation)?;
            if let OperationReport::Scan(result) = report {
                print_scan(&result, format)?;
            }
        }
        Command::File { action } => {
            let operation = match action {
                FileAction::Create { path } => FileOperation::create_file(path),
                FileAction::Copy {
                    source,
                    destination,
                } => FileOperation::copy_file(source, destination),
                FileAction::Move {
                    source,
                    destination,
                } => FileOperation::move_file(source, destination),
                FileAction::Delete { path } => FileOperation::delete_file(path),
            };
            let mut ops = PathOperations::new().with_hooks(hooks);
            let report = run(&mut ops, &operation)?;
            print_report(&operation, &report);
        }
        Command::Dir { action } => {
            let operation = match action {
                DirAction::Create { path, no_recursive } => {
                    FileOperation::create_directory(path, !no_recursive)
                }
                DirAction::Copy {
                    source,
                    destination,
                    no_recursive,
                } => FileOperation::copy_directory(source, destination, !no_recursive),
                DirAction::Move {
                    source,
                    destination,
                } => FileOperation::move_directory(source, destination),
                DirAction::Delete { path, strict } => FileOperation::delete_directory(path, strict),
            };
            let mut ops = PathOperations::new().with_hooks(hooks);
            let report = run(&mut ops, &operation)?;
            print_report(&operation, &report);
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(file: &Path) -> Result<ScanConfig> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read config {}", file.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {}", file.display()))
}

fn run<H: OperationHooks>(
    ops: &mut PathOperations<H>,
    operation: &FileOperation,
) -> Result<OperationReport> {
    ops.execute(operation)
        .with_context(|| format!("{operation} failed"))
}

/// Print the outcome of a file or directory operation.
fn print_report(operation: &FileOperation, report: &OperationReport) {
    match report {
        OperationReport::Done | OperationReport::Scan(_) => println!("{operation}"),
        OperationReport::File { bytes } => {
            println!("{operation} ({})", format_size(*bytes));
        }
        OperationReport::Tree(summary) => {
            let line = summary.summary(operation.operation_type());
            if summary.bytes > 0 {
                println!("{line} ({})", format_size(summary.bytes));
            } else {
                println!("{line}");
            }
        }
    }
}

/// Print a scan result.
fn print_scan(result: &ScanResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!(
                "{} files, {} directories, {} links",
                result.file_count, result.dir_count, result.link_count
            );

            if result.entries.is_some() {
                print_section("Directories", result.dirs());
                print_section("Files", result.files());
                print_section("Links", result.links());
            }

            if !result.warnings.is_empty() {
                println!();
                println!("{} unreadable directories skipped:", result.warnings.len());
                for warning in &result.warnings {
                    println!("  {}: {}", warning.path.display(), warning.message);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
    }

    Ok(())
}

fn print_section(title: &str, paths: &[PathBuf]) {
    if paths.is_empty() {
        return;
    }
    println!();
    println!("{title}:");
    for path in paths {
        println!("  {}", path.display());
    }
}

/// Format bytes as human-readable size.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
