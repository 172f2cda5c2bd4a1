//! Command-line options and environment overrides.
//!
//! Without a subcommand the interactive maze menu starts:
//!
//! ```text
//! $ maze-runner --maze levels/spiral.txt --max-paths 5
//! ```
//!
//! The course exercises read numbers from standard input:
//!
//! ```text
//! $ printf '1 2 3 1 2\n-1\n' | maze-runner increasing-run
//! The length of the longest strictly increasing run is: 3
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::dfs::DEFAULT_MAX_PATHS;
use crate::render::Theme;

pub const DEFAULT_MAZE_FILE: &str = "maze.txt";
pub const DEFAULT_LOG_FILE: &str = "maze-runner.log";

/// Console maze game: manual play, random paths, and the shortest path.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Maze file to load [env: MAZE_FILE] [default: maze.txt]
    #[arg(short, long)]
    pub maze: Option<PathBuf>,

    /// Maximum number of random paths shown in one round [env: MAZE_MAX_PATHS]
    #[arg(short = 'p', long)]
    pub max_paths: Option<usize>,

    /// Seed for the random path search
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Disable colors (also honors NO_COLOR)
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Draw two-column cells with block glyphs
    #[arg(short, long, default_value_t = false)]
    pub wide: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,

    /// Where log messages go while the menu owns the terminal
    /// [default: maze-runner.log when --debug or RUST_LOG is set]
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Exercise>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exercise {
    /// Longest strictly increasing run of numbers, terminated by -1
    IncreasingRun,
    /// Average and second largest of numbers, terminated by 0
    Stats,
}

impl Args {
    /// Log destination for the interactive menu. `None` means stderr, which
    /// is only safe for the exercises or when nothing will be logged.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.resolve_log_file(|key| std::env::var(key).ok())
    }

    fn resolve_log_file(&self, env: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
        if self.command.is_some() {
            return None;
        }
        let logging = self.debug || env("RUST_LOG").is_some_and(|v| !v.is_empty());
        self.log_file
            .clone()
            .or_else(|| logging.then(|| PathBuf::from(DEFAULT_LOG_FILE)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub maze_file: PathBuf,
    pub max_paths: usize,
    pub seed: Option<u64>,
    pub theme: Theme,
}

impl Settings {
    pub fn from_args(args: &Args) -> Settings {
        Settings::resolve(args, |key| std::env::var(key).ok())
    }

    fn resolve(args: &Args, env: impl Fn(&str) -> Option<String>) -> Settings {
        let maze_file = args
            .maze
            .clone()
            .or_else(|| env("MAZE_FILE").filter(|v| !v.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MAZE_FILE));
        let max_paths = args
            .max_paths
            .or_else(|| env("MAZE_MAX_PATHS").and_then(|v| v.parse::<usize>().ok()))
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_MAX_PATHS);
        let no_color_env = env("NO_COLOR").is_some_and(|v| !v.is_empty());
        Settings {
            maze_file,
            max_paths,
            seed: args.seed,
            theme: Theme {
                color: !(args.no_color || no_color_env),
                wide: args.wide,
            },
        }
    }
}
