mod render;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::info;
use std::io::{self, Stdout};
use std::time::Duration;

use maze_runner::{Dir, MazeConfig, Session};
use render::{Renderer, ScreenEvents};

const POLL_MS: u64 = 100;

enum Input {
    Move(Dir),
    NextLevel,
    Quit,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let config = MazeConfig::from_env();
    let mut session = Session::new(config, ScreenEvents::default())
        .context("invalid maze configuration")?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("enabling raw mode")?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &mut session);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode().context("restoring terminal")?;
    result
}

fn run(stdout: &mut Stdout, session: &mut Session<ScreenEvents>) -> Result<()> {
    let mut renderer = Renderer::new();
    render::render(stdout, session, &mut renderer)?;

    loop {
        if !event::poll(Duration::from_millis(POLL_MS))? {
            continue;
        }
        let input = match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => read_key(key.code),
            Event::Resize(_, _) => {
                session.observer_mut().needs_full = true;
                None
            }
            _ => None,
        };

        match input {
            Some(Input::Quit) => {
                info!("quit at level {}", session.level());
                return Ok(());
            }
            Some(Input::Move(dir)) => {
                session.attempt_move(dir);
            }
            Some(Input::NextLevel) => {
                if session.advance_level() {
                    session.observer_mut().message.clear();
                }
            }
            None => {}
        }
        render::render(stdout, session, &mut renderer)?;
    }
}

fn read_key(code: KeyCode) -> Option<Input> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Input::Move(Dir::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Input::Move(Dir::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Input::Move(Dir::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Input::Move(Dir::Right)),
        KeyCode::Char('n') => Some(Input::NextLevel),
        _ => None,
    }
}
