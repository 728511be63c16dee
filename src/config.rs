use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments. Each option can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "rusty-reach", version, about)]
pub struct Args {
    /// Directory holding the unzipped export
    #[arg(short, long, env = "RUSTY_REACH_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Number of entries in the "top" rankings (companies, job titles)
    #[arg(long, env = "RUSTY_REACH_TOP", default_value_t = 5)]
    pub top: usize,

    /// Skip the consent prompt before the first analysis
    #[arg(long)]
    pub assume_consent: bool,

    /// Print the commentary of every analysis and exit, without a window
    #[arg(long)]
    pub summary: bool,

    /// With --summary, print JSON instead of text
    #[arg(long, requires = "summary")]
    pub json: bool,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub top_n: usize,
    pub assume_consent: bool,
    pub summary: bool,
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_dir: PathBuf::from("./data"),
            top_n: 5,
            assume_consent: false,
            summary: false,
            json: false,
        }
    }
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Settings {
            data_dir: args.data_dir,
            // A zero-length ranking would hide every top entry.
            top_n: args.top.max(1),
            assume_consent: args.assume_consent,
            summary: args.summary,
            json: args.json,
        }
    }
}
