use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// File loose difference charts ("sabun") into the song folders of a
/// beatoraja or LR2 library.
#[derive(Debug, Parser)]
#[command(name = "sabun", version, about)]
pub struct Cli {
    /// Song database of the organized library (beatoraja `songdata.db` or an
    /// LR2 song database).
    pub catalog: PathBuf,
    /// Directory to search for loose charts.
    #[arg(default_value = ".")]
    pub scan_root: PathBuf,
    /// Move OK charts without asking.
    #[arg(short, long)]
    pub yes: bool,
    /// Configuration file to use instead of the default location.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// More diagnostics on stderr; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
impl Cli {
    /// Log filter used when `RUST_LOG` isn't set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
