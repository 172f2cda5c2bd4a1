mod app;
mod bfs;
mod config;
mod dfs;
mod exercises;
mod grid;
mod input;
mod render;
mod session;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::{info, LevelFilter};
use std::fs::File;
use std::io::{self, Stdout};

use crate::app::App;
use crate::config::{Args, Settings};
use crate::input::TerminalInput;
use crate::render::Renderer;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    // stderr shares the terminal with the alternate screen.
    if let Some(path) = args.log_file() {
        let file = File::create(&path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        logger.target(env_logger::Target::Pipe(Box::new(file)));
    }
    logger.init();

    if let Some(exercise) = args.command {
        let stdin = io::stdin();
        return exercises::run(exercise, stdin.lock(), &mut io::stdout())
            .context("failed to run the exercise");
    }

    let settings = Settings::from_args(&args);
    info!("Settings: {settings:?}");
    let renderer = Renderer::new(io::stdout(), settings.theme);
    let mut app = App::new(settings, renderer, TerminalInput)
        .context("failed to load the maze, program terminated")?;
    info!(
        "Loaded {}x{} maze",
        app.grid().rows(),
        app.grid().cols()
    );

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = app.run();

    restore_terminal(&mut stdout)?;
    if result.is_ok() {
        println!("Goodbye!");
    }
    result
}

fn restore_terminal(stdout: &mut Stdout) -> io::Result<()> {
    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()
}
