use serde::{Deserialize, Serialize};

use crate::core::{BoundedGrid, Grid, GridBounds, Player, Tile, Vec2};
use crate::level::errors::LevelFormatError;

pub const START_MARKER: &str = "+++";
pub const END_MARKER: &str = "---";

/// A decoded level: dimensions, player start and the tile code matrix.
///
/// Only constructed through validation, so every descriptor describes a loadable level.
/// The engine copies it into its own grid and never keeps a reference to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLevelDescriptor")]
pub struct LevelDescriptor {
    rows: i32,
    cols: i32,
    player: Vec2,
    codes: Vec<Vec<char>>,
}

/// Unchecked wire form; deserialization goes through `LevelDescriptor::new`.
#[derive(Deserialize)]
struct RawLevelDescriptor {
    rows: i32,
    cols: i32,
    player: Vec2,
    codes: Vec<Vec<char>>,
}

impl TryFrom<RawLevelDescriptor> for LevelDescriptor {
    type Error = LevelFormatError;

    fn try_from(raw: RawLevelDescriptor) -> Result<Self, Self::Error> {
        LevelDescriptor::new(raw.rows, raw.cols, raw.player, raw.codes)
    }
}

/// Tile code table of the level text format.
///
/// `w` wall, `g` ground, `c` crate, `*` empty goal, `C` crate resting on a goal.
pub fn decode_tile(code: char) -> Option<(Tile, bool)> {
    match code {
        'w' => Some((Tile::Wall, false)),
        'g' => Some((Tile::Ground, false)),
        'c' => Some((Tile::Crate, false)),
        '*' => Some((Tile::Ground, true)),
        'C' => Some((Tile::CrateOnGoal, true)),
        _ => None,
    }
}

/// Inverse of `decode_tile`. Pairs no level code produces, a plain crate on a goal or a
/// goal crate off one, have no code.
pub fn encode_tile(tile: Tile, is_goal: bool) -> Option<char> {
    match (tile, is_goal) {
        (Tile::Wall, false) => Some('w'),
        (Tile::Ground, false) => Some('g'),
        (Tile::Ground, true) => Some('*'),
        (Tile::Crate, false) => Some('c'),
        (Tile::CrateOnGoal, true) => Some('C'),
        (Tile::Wall, true) | (Tile::Crate, true) | (Tile::CrateOnGoal, false) => None,
    }
}

impl LevelDescriptor {
    pub fn new(rows: i32, cols: i32, player: Vec2, codes: Vec<Vec<char>>) -> Result<LevelDescriptor, LevelFormatError> {
        if rows <= 0 || cols <= 0 {
            return Err(LevelFormatError::ZeroDimensions);
        }
        if codes.len() != rows as usize {
            return Err(LevelFormatError::RowCountMismatch {
                expected: rows as usize,
                found: codes.len(),
            });
        }
        for (row, line) in codes.iter().enumerate() {
            if line.len() != cols as usize {
                return Err(LevelFormatError::RowLengthMismatch {
                    row,
                    expected: cols as usize,
                    found: line.len(),
                });
            }
            if let Some((col, &code)) = line.iter().enumerate().find(|(_, c)| decode_tile(**c).is_none()) {
                return Err(LevelFormatError::UnknownTile { row, col, code });
            }
        }

        let bounds = GridBounds::new(rows, cols);
        if !bounds.contains(&player) {
            return Err(LevelFormatError::PlayerOutOfBounds {
                row: player.i,
                col: player.j,
                rows,
                cols,
            });
        }
        let start_code = codes[player.i as usize][player.j as usize];
        if decode_tile(start_code).is_some_and(|(tile, _)| !tile.is_walkable()) {
            return Err(LevelFormatError::PlayerOnBlockedTile { row: player.i, col: player.j });
        }

        Ok(LevelDescriptor { rows, cols, player, codes })
    }

    /// Parses one `+++` ... `---` block.
    pub fn parse(block: &str) -> Result<LevelDescriptor, LevelFormatError> {
        let mut lines = block.trim().lines().map(|line| line.trim_end());

        if lines.next() != Some(START_MARKER) {
            return Err(LevelFormatError::MissingStartMarker);
        }

        let dimensions = lines.next().unwrap_or_default();
        let (cols, rows) = parse_pair(dimensions, 'x')
            .ok_or_else(|| LevelFormatError::BadDimensions(dimensions.to_string()))?;

        let player_line = lines.next().unwrap_or_default();
        let (player_row, player_col) = parse_pair(player_line, ',')
            .ok_or_else(|| LevelFormatError::BadPlayerPosition(player_line.to_string()))?;

        let mut codes = Vec::new();
        let mut terminated = false;
        for line in lines {
            if line == END_MARKER {
                terminated = true;
                break;
            }
            codes.push(line.chars().collect::<Vec<char>>());
        }
        if !terminated {
            return Err(LevelFormatError::MissingEndMarker);
        }

        LevelDescriptor::new(rows, cols, Vec2::new(player_row, player_col), codes)
    }

    /// Reads a descriptor back out of a live grid, e.g. to check a freshly loaded level.
    ///
    /// Fails on a cell whose tile disagrees with its goal marking, since no code would
    /// reload it as the same state.
    pub fn from_grid(grid: &Grid, player: Vec2) -> Result<LevelDescriptor, LevelFormatError> {
        let mut codes = Vec::with_capacity(grid.rows().max(0) as usize);
        for i in 0..grid.rows() {
            let mut row = Vec::with_capacity(grid.cols().max(0) as usize);
            for j in 0..grid.cols() {
                let pos = Vec2::new(i, j);
                let tile = grid.tile_at(pos).unwrap_or(Tile::Wall);
                let is_goal = grid.is_goal_at(pos);
                let code = encode_tile(tile, is_goal).ok_or(LevelFormatError::InconsistentTile {
                    row: i,
                    col: j,
                    tile,
                    is_goal,
                })?;
                row.push(code);
            }
            codes.push(row);
        }
        LevelDescriptor::new(grid.rows(), grid.cols(), player, codes)
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn player(&self) -> Vec2 {
        self.player
    }

    pub fn code_at(&self, pos: Vec2) -> Option<char> {
        if !GridBounds::new(self.rows, self.cols).contains(&pos) {
            return None;
        }
        Some(self.codes[pos.i as usize][pos.j as usize])
    }

    pub fn build_grid(&self) -> Grid {
        let bounds = GridBounds::new(self.rows, self.cols);
        let mut tiles = BoundedGrid::new(bounds, Tile::Ground);
        let mut goals = BoundedGrid::new(bounds, false);
        for pos in bounds.cells() {
            let (tile, is_goal) = self
                .code_at(pos)
                .and_then(decode_tile)
                .unwrap_or((Tile::Wall, false));
            if let Some(cell) = tiles.get_mut(&pos) {
                *cell = tile;
            }
            if let Some(cell) = goals.get_mut(&pos) {
                *cell = is_goal;
            }
        }
        Grid::from_layers(tiles, goals)
    }

    pub fn build_player(&self, tile_size: u32) -> Player {
        Player::new(self.player, tile_size)
    }

    pub fn map_rows(&self) -> Vec<String> {
        self.codes.iter().map(|row| row.iter().collect()).collect()
    }

    pub fn to_text(&self) -> String {
        let mut text = String::new();
        text.push_str(START_MARKER);
        text.push('\n');
        text.push_str(&format!("{}x{}\n", self.cols, self.rows));
        text.push_str(&format!("{},{}\n", self.player.i, self.player.j));
        for row in &self.codes {
            text.extend(row.iter());
            text.push('\n');
        }
        text.push_str(END_MARKER);
        text
    }
}

fn parse_pair(line: &str, separator: char) -> Option<(i32, i32)> {
    let (first, second) = line.trim().split_once(separator)?;
    Some((first.trim().parse().ok()?, second.trim().parse().ok()?))
}
