use std::path::PathBuf;

use crate::core::Tile;

/// Why a single level block could not be turned into a level. Fatal to that level.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelFormatError {
    #[error("level block must start with `+++`")]
    MissingStartMarker,
    #[error("level block must end with `---`")]
    MissingEndMarker,
    #[error("malformed dimensions header `{0}`, expected `<COLS>x<ROWS>`")]
    BadDimensions(String),
    #[error("level dimensions must be at least 1x1")]
    ZeroDimensions,
    #[error("malformed player header `{0}`, expected `<row>,<col>`")]
    BadPlayerPosition(String),
    #[error("expected {expected} map rows, found {found}")]
    RowCountMismatch { expected: usize, found: usize },
    #[error("map row {row} has {found} tiles, expected {expected}")]
    RowLengthMismatch { row: usize, expected: usize, found: usize },
    #[error("unrecognized tile code `{code}` at ({row},{col})")]
    UnknownTile { row: usize, col: usize, code: char },
    #[error("player position ({row},{col}) lies outside the {rows}x{cols} grid")]
    PlayerOutOfBounds { row: i32, col: i32, rows: i32, cols: i32 },
    #[error("player cannot start on the wall or crate at ({row},{col})")]
    PlayerOnBlockedTile { row: i32, col: i32 },
    #[error("{tile:?} at ({row},{col}) does not match its goal marking ({is_goal})")]
    InconsistentTile { row: i32, col: i32, tile: Tile, is_goal: bool },
}

#[derive(thiserror::Error, Debug)]
pub enum LevelLoadError {
    #[error("failed to read level file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("level {index} is malformed")]
    Format {
        index: usize,
        #[source]
        source: LevelFormatError,
    },
    #[error("no levels available")]
    NoLevels,
}
