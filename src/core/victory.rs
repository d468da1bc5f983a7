use crate::core::grid::Grid;
use crate::core::models::Tile;

/// True iff every goal cell holds a crate. A level without goals is trivially won.
pub fn is_victory(grid: &Grid) -> bool {
    grid.goal_cells()
        .all(|pos| grid.tile_at(pos) == Ok(Tile::CrateOnGoal))
}

pub fn count_crates_on_goals(grid: &Grid) -> usize {
    grid.goal_cells()
        .filter(|&pos| grid.tile_at(pos) == Ok(Tile::CrateOnGoal))
        .count()
}
