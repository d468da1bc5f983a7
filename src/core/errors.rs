/// A cell access outside the grid. Only reachable through a resolver bug.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cell ({row},{col}) lies outside the {rows}x{cols} grid")]
pub struct OutOfBounds {
    pub row: i32,
    pub col: i32,
    pub rows: i32,
    pub cols: i32,
}
