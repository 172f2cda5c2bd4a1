use log::debug;

use crate::grid::{Grid, Pos};
use crate::input::Command;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Moved,
    ReachedExit,
    InvalidMove,
    InvalidCommand,
    Quit,
}

/// Manual play state: the player walks the grid one cell per command.
pub struct Session<'a> {
    grid: &'a Grid,
    player: Pos,
    moves: usize,
}

impl<'a> Session<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            player: grid.start(),
            moves: 0,
        }
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn is_finished(&self) -> bool {
        self.player == self.grid.exit()
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::Quit => Outcome::Quit,
            Command::Move(dir) => match self.grid.step(self.player, dir) {
                Some(next) if self.grid.is_passable(next) => {
                    self.player = next;
                    self.moves += 1;
                    if self.is_finished() {
                        debug!("Exit reached after {} moves", self.moves);
                        Outcome::ReachedExit
                    } else {
                        Outcome::Moved
                    }
                }
                _ => Outcome::InvalidMove,
            },
            _ => Outcome::InvalidCommand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{fixture, Dir};

    #[test]
    fn test_starts_on_start() {
        let g = fixture("#S#\n#.E\n");
        let session = Session::new(&g);
        assert_eq!(session.player(), Pos::new(0, 1));
        assert!(!session.is_finished());
    }

    #[test]
    fn test_walls_and_edges_reject_moves() {
        let g = fixture("#S#\n#.E\n");
        let mut session = Session::new(&g);
        assert_eq!(session.apply(Command::Move(Dir::Left)), Outcome::InvalidMove);
        assert_eq!(session.apply(Command::Move(Dir::Up)), Outcome::InvalidMove);
        assert_eq!(session.player(), Pos::new(0, 1));
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn test_walk_to_exit() {
        let g = fixture("#S#\n#.E\n");
        let mut session = Session::new(&g);
        assert_eq!(session.apply(Command::Move(Dir::Down)), Outcome::Moved);
        assert_eq!(session.apply(Command::Move(Dir::Right)), Outcome::ReachedExit);
        assert!(session.is_finished());
        assert_eq!(session.moves(), 2);
    }

    #[test]
    fn test_quit_and_unknown() {
        let g = fixture("S.E\n");
        let mut session = Session::new(&g);
        assert_eq!(session.apply(Command::Yes), Outcome::InvalidCommand);
        assert_eq!(session.apply(Command::Select(2)), Outcome::InvalidCommand);
        assert_eq!(session.apply(Command::Quit), Outcome::Quit);
        assert_eq!(session.player(), Pos::new(0, 0));
    }
}
