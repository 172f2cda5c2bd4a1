use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
#[cfg(test)]
use std::collections::VecDeque;
use std::io;

use crate::grid::Dir;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Dir),
    Quit,
    Yes,
    No,
    Select(u8),
    Unknown,
}

impl Command {
    pub fn from_char(ch: char) -> Command {
        match ch.to_ascii_lowercase() {
            'w' | 'k' => Command::Move(Dir::Up),
            's' | 'j' => Command::Move(Dir::Down),
            'a' | 'h' => Command::Move(Dir::Left),
            'd' | 'l' => Command::Move(Dir::Right),
            'q' => Command::Quit,
            'y' => Command::Yes,
            'n' => Command::No,
            c => match c.to_digit(10) {
                Some(d) => Command::Select(d as u8),
                None => Command::Unknown,
            },
        }
    }

    pub fn from_key(code: KeyCode) -> Command {
        match code {
            KeyCode::Up => Command::Move(Dir::Up),
            KeyCode::Down => Command::Move(Dir::Down),
            KeyCode::Left => Command::Move(Dir::Left),
            KeyCode::Right => Command::Move(Dir::Right),
            KeyCode::Esc => Command::Quit,
            KeyCode::Char(c) => Command::from_char(c),
            _ => Command::Unknown,
        }
    }
}

pub trait CommandSource {
    fn next_command(&mut self) -> io::Result<Command>;
}

/// Blocking key reader. Expects the terminal to already be in raw mode.
pub struct TerminalInput;

impl CommandSource for TerminalInput {
    fn next_command(&mut self) -> io::Result<Command> {
        loop {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                if kind == KeyEventKind::Press {
                    return Ok(Command::from_key(code));
                }
            }
        }
    }
}

/// Replays a fixed list of commands, then keeps answering `Quit`.
#[cfg(test)]
pub struct ScriptedInput {
    commands: VecDeque<Command>,
}

#[cfg(test)]
impl ScriptedInput {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }

    pub fn from_keys(keys: &str) -> Self {
        Self::new(keys.chars().map(Command::from_char))
    }

    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}

#[cfg(test)]
impl CommandSource for ScriptedInput {
    fn next_command(&mut self) -> io::Result<Command> {
        Ok(self.commands.pop_front().unwrap_or(Command::Quit))
    }
}
