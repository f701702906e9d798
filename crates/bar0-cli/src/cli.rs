//! Command-line arguments.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};

const LONG_ABOUT: &str = "Decodes and validates the 64-byte NVMe controller register block (BAR0).

Input is either raw binary or a hex dump such as the output of `xxd` or `hexdump -C`.
Lines carrying an address prefix (\"00000000: ff ff 03 3c ...\") have the prefix removed.
When no file is given the block is read from standard input.";

const AFTER_HELP: &str = "Examples:
  cat nvme_dump.txt | nvme-bar0
  nvme-bar0 nvme_registers.bin
  nvme-bar0 --json nvme_dump.txt
  nvme-bar0 -f hexdump.txt";

/// Parsed command line of the `nvme-bar0` binary.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "nvme-bar0",
    version,
    about = "NVMe BAR0 register block decoder and validator",
    long_about = LONG_ABOUT,
    after_help = AFTER_HELP,
    disable_version_flag = true
)]
pub struct Cli {
    /// Input file, binary or hex dump.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Input file, binary or hex dump. Takes precedence over the positional FILE.
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print the report as JSON instead of a table.
    #[arg(short = 'j', long = "json")]
    pub json: bool,

    /// Log decoder and validator activity to stderr.
    #[arg(long = "verbose")]
    pub verbose: bool,

    /// Print version information.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,
}

impl Cli {
    /// Path to read, or `None` for standard input.
    #[must_use]
    pub fn input_path(&self) -> Option<&Path> {
        self.file.as_deref().or(self.input.as_deref())
    }
}
