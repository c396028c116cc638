/// Command-line arguments, parsed with clap derive macros.
use clap::{Parser, ValueEnum};
use recent_core::scanner::MATCH_CHANNEL_CAPACITY;
use recent_core::{CutoffRequest, ScanOptions, DEFAULT_TIME_FORMAT};
use std::path::PathBuf;

/// Find files modified recently
#[derive(Parser, Debug, Clone)]
#[command(
    name = "recent",
    version,
    about = "Find files modified recently",
    long_about = "Walks one or more directory trees in parallel and prints, in sorted order, \
                  every file modified after a cutoff.\n\n\
                  The cutoff is now by default, an absolute time with --time, or a duration \
                  before now with --duration. When both are given --time wins.",
    after_help = "EXAMPLES:\n    \
        recent -d 24h ~/src\n    \
        recent -t '2024-01-01 00:00:00' /var/log /etc\n    \
        recent -t 2024-06-01 -f %Y-%m-%d -q -v .\n    \
        recent -d 90m --json . > recent.json"
)]
pub struct Args {
    /// Find files modified within DURATION (e.g. 24h, 1h30m, 1.5h, 300ms)
    #[arg(short = 'd', long, value_name = "DURATION")]
    pub duration: Option<String>,

    /// Time format for --time (strftime syntax; %z accepted, UTC otherwise)
    #[arg(short = 'f', long, default_value = DEFAULT_TIME_FORMAT, value_name = "FORMAT")]
    pub format: String,

    /// Find files modified since TIME
    #[arg(short = 't', long, value_name = "TIME")]
    pub time: Option<String>,

    /// Do not print filenames
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Print summary statistics to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print a JSON report (cutoff, elapsed, totals, paths) instead of plain paths
    #[arg(long)]
    pub json: bool,

    /// Count and match directories as well as files
    #[arg(long)]
    pub dirs: bool,

    /// Number of worker threads
    #[arg(
        short = 'j',
        long,
        default_value_t = num_cpus::get(),
        value_parser = parse_positive,
        value_name = "NUM"
    )]
    pub threads: usize,

    /// Matching paths buffered between walkers and the collector
    #[arg(
        long,
        default_value_t = MATCH_CHANNEL_CAPACITY,
        value_parser = parse_positive,
        value_name = "NUM"
    )]
    pub channel_capacity: usize,

    /// Diagnostic log level (written to stderr)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, value_name = "LEVEL")]
    pub log_level: LogLevel,

    /// Directories (or files) to scan
    #[arg(value_name = "ROOT")]
    pub roots: Vec<PathBuf>,
}

impl Args {
    /// The cutoff the user asked for.
    pub fn cutoff_request(&self) -> CutoffRequest {
        CutoffRequest {
            instant: self.time.clone().filter(|s| !s.is_empty()),
            format: self.format.clone(),
            duration: self.duration.clone().filter(|s| !s.is_empty()),
        }
    }

    /// Scanner configuration for these arguments.
    ///
    /// Quiet mode skips path collection entirely, JSON output included.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            include_dirs: self.dirs,
            collect_paths: !self.quiet,
            threads: self.threads,
            channel_capacity: self.channel_capacity,
        }
    }
}

/// Verbosity of diagnostic logging.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
