use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Stdout, Write};
use unicode_width::UnicodeWidthStr;

use maze_runner::{Grid, LevelParams, MazeObserver, Player, PlayerColor, Pos, Session, Side};

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player(PlayerColor),
    Exit,
    Wall,
    Empty,
}

/// Screen-side state the session pushes into through `MazeObserver`.
#[derive(Default)]
pub struct ScreenEvents {
    pub needs_full: bool,
    pub message: String,
    pub next_disabled: bool,
}

impl MazeObserver for ScreenEvents {
    fn on_generated(&mut self, _grid: &Grid, _params: &LevelParams) {
        self.needs_full = true;
    }

    fn on_level_complete(&mut self, level: u32, is_final: bool) {
        if is_final {
            self.message = "Congratulations! You have completed all levels!".to_string();
            self.next_disabled = true;
        } else {
            self.message = format!("Congratulations, you completed level {level}!");
        }
    }
}

pub struct Renderer {
    last: Vec<Glyph>,
    last_hud: String,
    last_message: String,
    width: usize,
    height: usize,
    origin_x: u16,
    origin_y: u16,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            last: Vec::new(),
            last_hud: String::new(),
            last_message: String::new(),
            width: 0,
            height: 0,
            origin_x: 0,
            origin_y: 1,
        }
    }
}

/// Cells sit on odd tile coordinates, walls between them on even ones.
fn tile_size(grid: &Grid) -> (usize, usize) {
    (grid.cols() * 2 + 1, grid.rows() * 2 + 1)
}

/// Terminal columns and rows the maze needs, including the HUD and message
/// lines. `None` when that does not fit in a terminal coordinate at all.
fn needed_size(width: usize, height: usize) -> Option<(u16, u16)> {
    let w = width.checked_mul(CELL_W)?;
    let h = height.checked_add(3)?;
    Some((u16::try_from(w).ok()?, u16::try_from(h).ok()?))
}

fn screen_offset(origin: u16, delta: usize) -> u16 {
    u16::try_from(delta)
        .ok()
        .and_then(|d| origin.checked_add(d))
        .unwrap_or(u16::MAX)
}

fn glyph_at(grid: &Grid, player: &Player, exit: Pos, tx: usize, ty: usize) -> Glyph {
    let (cx, cy) = (tx / 2, ty / 2);
    match (tx % 2, ty % 2) {
        (1, 1) => {
            let pos = Pos::new(cx, cy);
            if pos == player.pos {
                Glyph::Player(player.color)
            } else if pos == exit {
                Glyph::Exit
            } else {
                Glyph::Empty
            }
        }
        // vertical wall left of cell (cx, cy)
        (0, 1) => {
            let open = cx < grid.cols() && !grid.has_wall(Pos::new(cx, cy), Side::Left);
            if open {
                Glyph::Empty
            } else {
                Glyph::Wall
            }
        }
        // horizontal wall above cell (cx, cy)
        (1, 0) => {
            let open = cy < grid.rows() && !grid.has_wall(Pos::new(cx, cy), Side::Top);
            if open {
                Glyph::Empty
            } else {
                Glyph::Wall
            }
        }
        _ => Glyph::Wall,
    }
}

pub fn render(
    stdout: &mut Stdout,
    session: &mut Session<ScreenEvents>,
    renderer: &mut Renderer,
) -> io::Result<()> {
    let (width, height) = tile_size(session.grid());
    let (term_w, term_h) = terminal::size()?;
    let fits = needed_size(width, height).filter(|&(w, h)| term_w >= w && term_h >= h);
    let Some((needed_w, needed_h)) = fits else {
        stdout.queue(MoveTo(0, 0))?;
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            width.saturating_mul(CELL_W),
            height.saturating_add(3),
            term_w,
            term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        session.observer_mut().needs_full = true;
        return Ok(());
    };

    let mut needs_full = std::mem::take(&mut session.observer_mut().needs_full);
    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        needs_full = true;
    }
    if width != renderer.width || height != renderer.height {
        renderer.width = width;
        renderer.height = height;
        renderer.last = vec![Glyph::Empty; width * height];
        needs_full = true;
    }
    if needs_full {
        stdout.queue(Clear(ClearType::All))?;
    }

    let params = session.params();
    let controls = if session.observer().next_disabled {
        "(q to quit)"
    } else {
        "(arrows/hjkl move, n next level, q quit)"
    };
    let hud = format!(
        "Level: {}/{}  Maze: {}x{}  {}",
        params.level,
        session.max_level(),
        params.dims.cols(),
        params.dims.rows(),
        controls
    );
    if needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    let grid = session.grid();
    let player = session.player();
    let exit = session.exit();
    for ty in 0..height {
        for tx in 0..width {
            let glyph = glyph_at(grid, player, exit, tx, ty);
            let idx = ty * width + tx;
            if needs_full || glyph != renderer.last[idx] {
                renderer.last[idx] = glyph;
                draw_tile(stdout, renderer, tx, ty, glyph)?;
            }
        }
    }

    let message = &session.observer().message;
    if needs_full || *message != renderer.last_message {
        let y_pos = screen_offset(renderer.origin_y, height + 1);
        stdout.queue(MoveTo(renderer.origin_x, y_pos))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(SetForegroundColor(Color::Green))?;
        stdout.queue(Print(message))?;
        stdout.queue(ResetColor)?;
        renderer.last_message = message.clone();
    }

    stdout.flush()?;
    Ok(())
}

fn player_color(color: PlayerColor) -> Color {
    match color {
        PlayerColor::Red => Color::Red,
        PlayerColor::Blue => Color::Blue,
        PlayerColor::Green => Color::Green,
    }
}

fn draw_tile(
    stdout: &mut Stdout,
    renderer: &Renderer,
    x: usize,
    y: usize,
    glyph: Glyph,
) -> io::Result<()> {
    let (text, color) = match glyph {
        Glyph::Player(c) => ("●", player_color(c)),
        Glyph::Exit => ("▼", Color::Red),
        Glyph::Wall => ("██", Color::Blue),
        Glyph::Empty => ("  ", Color::Reset),
    };
    let x_pos = screen_offset(renderer.origin_x, x * CELL_W);
    let y_pos = screen_offset(renderer.origin_y, y);
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}
