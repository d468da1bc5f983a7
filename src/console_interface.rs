use crate::core::{Direction, Grid, Tile, Vec2};
use crate::engine::{EngineState, RenderSnapshot, Renderer, format_clock};
use crate::level::{LevelDescriptor, LevelFormatError};
use crate::models::GameRenderState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::Duration;

/// Reads a level drawn with the classic glyphs: `#` wall, ` ` floor, `.` goal, `$` crate,
/// `*` crate on goal, `@` player, `+` player on goal. Short rows are padded with floor.
pub fn parse_visual_level(s: &str) -> Result<LevelDescriptor, LevelFormatError> {
    let lines: Vec<&str> = s.lines().filter(|line| !line.trim().is_empty()).collect();
    let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    let mut player = None;
    let mut codes = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let mut row = Vec::new();
        for (j, ch) in line.chars().enumerate() {
            let code = match ch {
                '#' => 'w',
                ' ' => 'g',
                '.' => '*',
                '$' => 'c',
                '*' => 'C',
                '@' => {
                    player = Some(Vec2::new(i as i32, j as i32));
                    'g'
                }
                '+' => {
                    player = Some(Vec2::new(i as i32, j as i32));
                    '*'
                }
                code => return Err(LevelFormatError::UnknownTile { row: i, col: j, code }),
            };
            row.push(code);
        }
        row.resize(width, 'g');
        codes.push(row);
    }

    let player = player.unwrap_or(Vec2::new(-1, -1));
    LevelDescriptor::new(codes.len() as i32, width as i32, player, codes)
}

fn glyph(tile: Tile, is_goal: bool, has_player: bool) -> char {
    match tile {
        Tile::Wall => '#',
        Tile::Ground => match (is_goal, has_player) {
            (true, true) => '+',
            (true, false) => '.',
            (false, true) => '@',
            (false, false) => ' ',
        },
        Tile::Crate => '$',
        Tile::CrateOnGoal => '*',
    }
}

/// Logical view of the grid: the player at its committed cell, crates where the grid holds them.
pub fn render_game_to_string(grid: &Grid, player: Vec2) -> String {
    let mut result = String::new();
    for i in 0..grid.rows() {
        for j in 0..grid.cols() {
            let pos = Vec2::new(i, j);
            let tile = grid.tile_at(pos).unwrap_or(Tile::Wall);
            result.push(glyph(tile, grid.is_goal_at(pos), pos == player));
        }
        result.push('\n');
    }
    result
}

/// Visual view of a frame: sprites drawn at the cell nearest their pixel position.
pub fn render_snapshot_to_string(snapshot: &RenderSnapshot<'_>, tile_size: u32) -> String {
    let tile = tile_size.max(1) as f64;
    let nearest = |x: f64, y: f64| Vec2::new((y / tile).round() as i32, (x / tile).round() as i32);
    let player = nearest(snapshot.player_pixel.x, snapshot.player_pixel.y);
    let sprite = snapshot.moving_crate.map(|c| (c.cell, nearest(c.pixel.x, c.pixel.y)));

    let grid = snapshot.grid;
    let mut result = String::new();
    for i in 0..grid.rows() {
        for j in 0..grid.cols() {
            let pos = Vec2::new(i, j);
            let is_goal = grid.is_goal_at(pos);
            let mut tile = grid.tile_at(pos).unwrap_or(Tile::Wall);
            if let Some((destination, drawn_at)) = sprite {
                if pos == destination && pos != drawn_at {
                    tile = Tile::Ground;
                } else if pos == drawn_at {
                    tile = Tile::crate_for(is_goal);
                }
            }
            result.push(glyph(tile, is_goal, pos == player));
        }
        result.push('\n');
    }
    result
}

pub type ConsoleTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub fn setup_terminal() -> Result<ConsoleTerminal, Box<dyn std::error::Error>> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

/// Runs `body`, then `restore` whether or not the body failed. The body's error is the one reported.
pub fn restore_after<T>(
    body: impl FnOnce() -> Result<T, Box<dyn std::error::Error>>,
    restore: impl FnOnce() -> Result<(), Box<dyn std::error::Error>>,
) -> Result<T, Box<dyn std::error::Error>> {
    let result = body();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

/// Draws engine frames into the terminal.
pub struct TerminalRenderer {
    terminal: ConsoleTerminal,
    tile_size: u32,
    pub status: GameRenderState,
}

impl TerminalRenderer {
    pub fn new(terminal: ConsoleTerminal, tile_size: u32, status: GameRenderState) -> TerminalRenderer {
        TerminalRenderer { terminal, tile_size, status }
    }
}

impl Renderer for TerminalRenderer {
    type Error = io::Error;

    fn draw(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<(), Self::Error> {
        let game_text = render_snapshot_to_string(snapshot, self.tile_size);
        let status = &self.status;

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(LayoutDirection::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(3), Constraint::Length(3)])
                .split(f.area());

            let title = format!("Sokoban - Level {} / {}", status.level, status.level_count);
            let game_paragraph = Paragraph::new(game_text)
                .block(Block::default().borders(Borders::ALL).title(title))
                .style(Style::default().fg(Color::White))
                .alignment(Alignment::Center);
            f.render_widget(game_paragraph, chunks[0]);

            let status_line = format!(
                "Time {} | Moves {} | Pushes {} | {:?}",
                format_clock(snapshot.elapsed_seconds),
                snapshot.stats.moves,
                snapshot.stats.pushes,
                snapshot.state,
            );
            let status_paragraph = Paragraph::new(status_line)
                .block(Block::default().borders(Borders::ALL).title("Status"))
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
            f.render_widget(status_paragraph, chunks[1]);

            let instructions = if status.won {
                "You've won! Press any key to quit.".to_string()
            } else if snapshot.state == EngineState::Won {
                "Solved!".to_string()
            } else {
                "Controls: WASD or Arrow keys to move, R to restart, Q to quit".to_string()
            };
            let instructions = match &status.last_outcome {
                Some(outcome) if !status.won => format!("{} | Last: {:?}", instructions, outcome),
                _ => instructions,
            };
            let instruction_paragraph = Paragraph::new(instructions)
                .block(Block::default().borders(Borders::ALL).title("Instructions"))
                .style(Style::default().fg(Color::Cyan))
                .alignment(Alignment::Center);
            f.render_widget(instruction_paragraph, chunks[2]);
        })?;
        Ok(())
    }
}

pub enum ConsoleInput {
    Move(Direction),
    Restart,
    Quit,
    Timeout,
    Unknown,
}

pub fn handle_input(timeout: Duration) -> Result<ConsoleInput, Box<dyn std::error::Error>> {
    if event::poll(timeout)? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ConsoleInput::Quit,
                KeyCode::Char('r') | KeyCode::Char('R') => ConsoleInput::Restart,
                KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => ConsoleInput::Move(Direction::Up),
                KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => ConsoleInput::Move(Direction::Down),
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => ConsoleInput::Move(Direction::Left),
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => ConsoleInput::Move(Direction::Right),
                _ => ConsoleInput::Unknown,
            });
        }
    }
    Ok(ConsoleInput::Timeout)
}
