use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use std::collections::HashSet;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

use crate::grid::{Grid, Path, Pos, EXIT, START, WALL};

const WIDE_CELL_W: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub color: bool,
    pub wide: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    Explored,
    Shortest,
}

/// Display-only decorations drawn on top of the grid. The grid itself is never touched.
#[derive(Default)]
pub struct Overlay {
    player: Option<Pos>,
    marked: HashSet<Pos>,
    mark: Option<Mark>,
}

impl Overlay {
    pub fn player(pos: Pos) -> Self {
        Self {
            player: Some(pos),
            ..Self::default()
        }
    }

    pub fn path(path: &Path, mark: Mark) -> Self {
        Self {
            player: None,
            marked: path.cells().iter().copied().collect(),
            mark: Some(mark),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Info,
    Success,
    Error,
    Prompt,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Tone::Plain => Color::Reset,
            Tone::Info => Color::Yellow,
            Tone::Success => Color::Green,
            Tone::Error => Color::Red,
            Tone::Prompt => Color::Cyan,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Glyph {
    Player,
    Wall,
    Start,
    Exit,
    Explored,
    Shortest,
    Open(char),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

fn cell_for(grid: &Grid, overlay: &Overlay, pos: Pos) -> Cell {
    if overlay.player == Some(pos) {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Red,
        };
    }
    let ch = grid.get(pos).unwrap_or(' ');
    match ch {
        START => Cell {
            glyph: Glyph::Start,
            color: Color::Blue,
        },
        EXIT => Cell {
            glyph: Glyph::Exit,
            color: Color::Blue,
        },
        WALL => Cell {
            glyph: Glyph::Wall,
            color: Color::Yellow,
        },
        _ if overlay.marked.contains(&pos) => match overlay.mark {
            Some(Mark::Shortest) => Cell {
                glyph: Glyph::Shortest,
                color: Color::Green,
            },
            _ => Cell {
                glyph: Glyph::Explored,
                color: Color::Red,
            },
        },
        other => Cell {
            glyph: Glyph::Open(other),
            color: Color::Reset,
        },
    }
}

fn glyph_text(glyph: Glyph, wide: bool) -> String {
    let text = match (glyph, wide) {
        (Glyph::Player, false) => "^",
        (Glyph::Player, true) => "😃",
        (Glyph::Wall, false) => "#",
        (Glyph::Wall, true) => "██",
        (Glyph::Start, _) => "S",
        (Glyph::Exit, _) => "E",
        (Glyph::Explored, _) => "^",
        (Glyph::Shortest, false) => "b",
        (Glyph::Shortest, true) => "●",
        (Glyph::Open(ch), _) => return ch.to_string(),
    };
    text.to_string()
}

/// Frame drawer over any writer. Lines are addressed explicitly so the output
/// is correct in raw mode as well.
pub struct Renderer<W: Write> {
    out: W,
    theme: Theme,
    line: u16,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self {
            out,
            theme,
            line: 0,
        }
    }

    pub fn clear(&mut self) -> io::Result<()> {
        self.out.queue(Clear(ClearType::All))?;
        self.out.queue(MoveTo(0, 0))?;
        self.line = 0;
        Ok(())
    }

    pub fn draw(&mut self, grid: &Grid, overlay: &Overlay) -> io::Result<()> {
        self.clear()?;
        for row in 0..grid.rows() {
            self.out.queue(MoveTo(0, self.line))?;
            for col in 0..grid.cols() {
                let cell = cell_for(grid, overlay, Pos::new(row, col));
                self.draw_cell(cell)?;
            }
            self.line += 1;
        }
        self.line += 1;
        self.out.flush()
    }

    fn draw_cell(&mut self, cell: Cell) -> io::Result<()> {
        let text = glyph_text(cell.glyph, self.theme.wide);
        if self.theme.color && cell.color != Color::Reset {
            self.out.queue(SetForegroundColor(cell.color))?;
            self.out.queue(Print(&text))?;
            self.out.queue(ResetColor)?;
        } else {
            self.out.queue(Print(&text))?;
        }
        if self.theme.wide {
            let w = UnicodeWidthStr::width(text.as_str());
            for _ in w..WIDE_CELL_W {
                self.out.queue(Print(' '))?;
            }
        }
        Ok(())
    }

    pub fn line(&mut self, tone: Tone, text: &str) -> io::Result<()> {
        self.write_at_line(tone, text)?;
        self.line += 1;
        self.out.flush()
    }

    fn write_at_line(&mut self, tone: Tone, text: &str) -> io::Result<()> {
        self.out.queue(MoveTo(0, self.line))?;
        if self.theme.color && tone != Tone::Plain {
            self.out.queue(SetForegroundColor(tone.color()))?;
            self.out.queue(Print(text))?;
            self.out.queue(ResetColor)?;
        } else {
            self.out.queue(Print(text))?;
        }
        Ok(())
    }

    pub fn blank(&mut self) {
        self.line += 1;
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
