use anyhow::Context;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;

use crate::bfs::shortest_path;
use crate::config::Settings;
use crate::dfs::PathEnumerator;
use crate::grid::{Grid, LoadError};
use crate::input::{Command, CommandSource};
use crate::render::{Mark, Overlay, Renderer, Tone};
use crate::session::{Outcome, Session};

pub struct App<W: Write, I: CommandSource> {
    settings: Settings,
    grid: Grid,
    renderer: Renderer<W>,
    input: I,
    rng: StdRng,
}

impl<W: Write, I: CommandSource> App<W, I> {
    pub fn new(settings: Settings, renderer: Renderer<W>, input: I) -> Result<Self, LoadError> {
        let grid = Grid::load(&settings.maze_file)?;
        Ok(Self::with_grid(settings, grid, renderer, input))
    }

    pub fn with_grid(settings: Settings, grid: Grid, renderer: Renderer<W>, input: I) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            settings,
            grid,
            renderer,
            input,
            rng,
        }
    }

    /// Reads the maze file again so every mode starts from a pristine grid.
    pub fn reload(&mut self) -> Result<(), LoadError> {
        self.grid = Grid::load(&self.settings.maze_file)?;
        debug!("Maze reloaded from {:?}", self.settings.maze_file);
        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut notice: Option<&str> = None;
        loop {
            self.show_menu(notice.take())?;
            match self.input.next_command()? {
                Command::Select(1) => self.play_manual()?,
                Command::Select(2) => self.show_paths()?,
                Command::Select(3) => self.show_shortest()?,
                Command::Select(4) | Command::Quit => return Ok(()),
                other => {
                    debug!("Invalid menu choice {other:?}");
                    notice = Some("Invalid option!");
                    continue;
                }
            }

            self.renderer.blank();
            self.renderer.line(Tone::Prompt, "1 - Return to menu")?;
            self.renderer.line(Tone::Prompt, "2 - Exit program")?;
            self.renderer.line(Tone::Prompt, "Your choice: ")?;
            if self.input.next_command()? != Command::Select(1) {
                return Ok(());
            }

            self.reload().context("failed to reload the maze")?;
        }
    }

    fn show_menu(&mut self, notice: Option<&str>) -> anyhow::Result<()> {
        self.renderer.clear()?;
        self.renderer.line(Tone::Prompt, "=== Maze Game Menu ===")?;
        self.renderer.line(Tone::Prompt, "1 - Play manually (WASD)")?;
        self.renderer.line(
            Tone::Prompt,
            &format!(
                "2 - Show some possible solutions (up to {} paths)",
                self.settings.max_paths
            ),
        )?;
        self.renderer.line(Tone::Prompt, "3 - Show shortest path (BFS)")?;
        self.renderer.line(Tone::Prompt, "4 - Exit")?;
        if let Some(text) = notice {
            self.renderer.line(Tone::Error, text)?;
        }
        self.renderer.line(Tone::Prompt, "Your choice: ")?;
        Ok(())
    }

    pub fn play_manual(&mut self) -> anyhow::Result<()> {
        info!("Manual play started");
        let mut session = Session::new(&self.grid);
        let mut status: Option<&str> = None;
        loop {
            self.renderer
                .draw(&self.grid, &Overlay::player(session.player()))?;
            if let Some(text) = status.take() {
                self.renderer.line(Tone::Error, text)?;
            }
            if session.is_finished() {
                let text = format!(
                    "Congratulations! You reached the exit in {} moves!",
                    session.moves()
                );
                self.renderer.line(Tone::Success, &text)?;
                return Ok(());
            }
            self.renderer
                .line(Tone::Plain, "Move (w a s d) or q to quit: ")?;

            match session.apply(self.input.next_command()?) {
                Outcome::Quit => {
                    self.renderer.line(Tone::Error, "You quit the game.")?;
                    return Ok(());
                }
                Outcome::InvalidMove => {
                    status = Some("Invalid movement! Cannot go through walls or out of bounds.")
                }
                Outcome::InvalidCommand => {
                    status = Some("Invalid movement! Use w, a, s, d or q to quit.")
                }
                Outcome::Moved | Outcome::ReachedExit => {}
            }
        }
    }

    pub fn show_paths(&mut self) -> anyhow::Result<()> {
        info!("Searching up to {} random paths", self.settings.max_paths);
        self.renderer.clear()?;
        self.renderer
            .line(Tone::Info, "Searching for possible paths...")?;

        let mut paths = PathEnumerator::new(&self.grid, &mut self.rng, self.settings.max_paths);
        loop {
            let Some(path) = paths.next() else {
                let text = match (paths.exhausted(), paths.found()) {
                    (true, 0) => "No path from start to exit.",
                    (true, _) => "No more paths found.",
                    (false, _) => "Maximum number of paths reached.",
                };
                self.renderer.line(Tone::Error, text)?;
                return Ok(());
            };

            self.renderer
                .draw(&self.grid, &Overlay::path(&path, Mark::Explored))?;
            let header = format!(
                "--- Possible Path #{} (length: {} steps) ---",
                paths.found(),
                path.steps()
            );
            self.renderer.line(Tone::Info, &header)?;

            if paths.limit_reached() {
                self.renderer
                    .line(Tone::Plain, "Maximum number of paths reached.")?;
                return Ok(());
            }

            self.renderer
                .line(Tone::Prompt, "Do you want to see another path? (y/n): ")?;
            if self.input.next_command()? != Command::Yes {
                return Ok(());
            }
        }
    }

    pub fn show_shortest(&mut self) -> anyhow::Result<()> {
        match shortest_path(&self.grid) {
            Ok(path) => {
                info!("Shortest path has {} steps", path.steps());
                self.renderer
                    .draw(&self.grid, &Overlay::path(&path, Mark::Shortest))?;
                let text = format!("Shortest path (length: {} steps):", path.steps());
                self.renderer.line(Tone::Info, &text)?;
            }
            Err(err) => {
                info!("Shortest path search failed: {err}");
                self.renderer.draw(&self.grid, &Overlay::default())?;
                self.renderer.line(Tone::Error, &format!("No path found: {err}."))?;
            }
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.renderer.into_inner()
    }
}
