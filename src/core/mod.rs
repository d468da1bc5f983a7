mod bounded_grid;
mod errors;
mod grid;
mod models;
mod update;
mod victory;

pub use bounded_grid::{BoundedGrid, GridBounds};
pub use errors::OutOfBounds;
pub use grid::Grid;
pub use models::{CratePush, Direction, MoveOutcome, MoveTransition, PixelPos, Player, RejectReason, Tile, Vec2};
pub use update::attempt_move;
pub use victory::{count_crates_on_goals, is_victory};
