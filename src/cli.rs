//! Command-line interface definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::pair::CollisionPolicy;

/// Couple clean/noisy image datasets into densely indexed pairs
#[derive(Debug, Parser)]
#[command(name = "pairset", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Pair clean and noisy images and materialize them under sequential names
    Pair(PairArgs),
    /// Prefix sequentially numbered files (12.jpg -> image12.jpg)
    Rename(RenameArgs),
    /// Show version, platform and config file locations
    Info,
}

/// Arguments for the pair command
#[derive(Debug, Args)]
pub struct PairArgs {
    /// Directory holding the clean (ground-truth) images
    pub clean_src: PathBuf,

    /// Directory holding the noisy (degraded) images
    pub noisy_src: PathBuf,

    /// Output directory for indexed clean images
    pub clean_out: PathBuf,

    /// Output directory for indexed noisy images
    pub noisy_out: PathBuf,

    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// What to do when two clean files share an identifier
    #[arg(long, value_enum)]
    pub collision: Option<CollisionPolicy>,

    /// Keep raw directory enumeration order instead of sorting by filename
    #[arg(long)]
    pub no_sort: bool,

    /// Keep a resume journal so an interrupted run continues its numbering
    #[arg(long)]
    pub journal: bool,

    /// Print the execution plan without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Increase output verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl PairArgs {
    /// Sorting is on unless --no-sort was given
    pub fn effective_sort(&self) -> bool {
        !self.no_sort
    }
}

/// Arguments for the rename command
#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Directory holding numbered files to prefix
    pub directory: PathBuf,

    /// Prefix placed before the number
    #[arg(long, default_value = "image")]
    pub prefix: String,

    /// List planned renames without performing them
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_asserts() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pair_command() {
        let cli = Cli::parse_from([
            "pairset", "pair", "clean", "noisy", "clean_out", "noisy_out",
        ]);
        let Commands::Pair(args) = cli.command else {
            panic!("expected pair subcommand");
        };
        assert_eq!(args.clean_src, PathBuf::from("clean"));
        assert_eq!(args.noisy_out, PathBuf::from("noisy_out"));
        assert!(args.effective_sort());
        assert!(!args.journal);
        assert!(!args.dry_run);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_parse_pair_flags() {
        let cli = Cli::parse_from([
            "pairset",
            "pair",
            "clean",
            "noisy",
            "clean_out",
            "noisy_out",
            "--no-sort",
            "--collision",
            "reject",
            "--journal",
            "-vv",
        ]);
        let Commands::Pair(args) = cli.command else {
            panic!("expected pair subcommand");
        };
        assert!(!args.effective_sort());
        assert_eq!(args.collision, Some(CollisionPolicy::Reject));
        assert!(args.journal);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from([
            "pairset", "pair", "a", "b", "c", "d", "--quiet", "--verbose",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rename_command() {
        let cli = Cli::parse_from(["pairset", "rename", "target", "--prefix", "img"]);
        let Commands::Rename(args) = cli.command else {
            panic!("expected rename subcommand");
        };
        assert_eq!(args.directory, PathBuf::from("target"));
        assert_eq!(args.prefix, "img");
        assert!(!args.dry_run);
    }

    #[test]
    fn test_rename_default_prefix() {
        let cli = Cli::parse_from(["pairset", "rename", "target"]);
        let Commands::Rename(args) = cli.command else {
            panic!("expected rename subcommand");
        };
        assert_eq!(args.prefix, "image");
    }
}
