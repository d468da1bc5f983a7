use crate::core::bounded_grid::{BoundedGrid, GridBounds};
use crate::core::errors::OutOfBounds;
use crate::core::models::{Tile, Vec2};

/// Tile layer plus the goal mask of one level.
///
/// The goal mask is fixed once the grid is built; only tiles change afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    tiles: BoundedGrid<Tile>,
    goals: BoundedGrid<bool>,
}

impl Grid {
    /// Layers must share the same bounds.
    pub(crate) fn from_layers(tiles: BoundedGrid<Tile>, goals: BoundedGrid<bool>) -> Grid {
        debug_assert_eq!(tiles.size(), goals.size(), "tile and goal layers differ in size");
        Grid { tiles, goals }
    }

    pub fn bounds(&self) -> GridBounds {
        self.tiles.size()
    }

    pub fn rows(&self) -> i32 {
        self.bounds().rows
    }

    pub fn cols(&self) -> i32 {
        self.bounds().cols
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        self.tiles.contains(pos)
    }

    pub fn tile_at(&self, pos: Vec2) -> Result<Tile, OutOfBounds> {
        let bounds = self.bounds();
        self.tiles.get(&pos).copied().ok_or_else(|| bounds.out_of_bounds(pos))
    }

    /// Cells off the grid are never goals.
    pub fn is_goal_at(&self, pos: Vec2) -> bool {
        self.goals.get(&pos).copied().unwrap_or(false)
    }

    /// No semantic validation: callers keep the grid consistent.
    pub fn set_tile(&mut self, pos: Vec2, tile: Tile) -> Result<(), OutOfBounds> {
        let bounds = self.bounds();
        let cell = self.tiles.get_mut(&pos).ok_or_else(|| bounds.out_of_bounds(pos))?;
        *cell = tile;
        Ok(())
    }

    pub fn cells(&self) -> impl Iterator<Item = (Vec2, Tile)> + '_ {
        self.bounds().cells().zip(self.tiles.iter().copied())
    }

    pub fn goal_cells(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.bounds()
            .cells()
            .zip(self.goals.iter().copied())
            .filter_map(|(pos, is_goal)| is_goal.then_some(pos))
    }

    pub fn crate_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_crate()).count()
    }

    pub fn goal_count(&self) -> usize {
        self.goals.iter().filter(|&&is_goal| is_goal).count()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn corridor() -> Grid {
        let bounds = GridBounds::new(1, 4);
        let mut tiles = BoundedGrid::new(bounds, Tile::Ground);
        let mut goals = BoundedGrid::new(bounds, false);
        *tiles.get_mut(&Vec2::new(0, 0)).unwrap() = Tile::Wall;
        *tiles.get_mut(&Vec2::new(0, 2)).unwrap() = Tile::Crate;
        *goals.get_mut(&Vec2::new(0, 3)).unwrap() = true;
        Grid::from_layers(tiles, goals)
    }

    #[test]
    fn tile_at_outside_grid_is_out_of_bounds() {
        let grid = corridor();
        let err = grid.tile_at(Vec2::new(0, 4)).unwrap_err();
        assert_eq!(err, OutOfBounds { row: 0, col: 4, rows: 1, cols: 4 });
        assert!(grid.tile_at(Vec2::new(-1, 0)).is_err());
    }

    #[test]
    fn set_tile_outside_grid_leaves_grid_untouched() {
        let mut grid = corridor();
        let before = grid.clone();
        assert!(grid.set_tile(Vec2::new(1, 1), Tile::Crate).is_err());
        assert_eq!(before, grid);
    }

    #[test]
    fn goal_mask_is_independent_of_tile() {
        let mut grid = corridor();
        grid.set_tile(Vec2::new(0, 3), Tile::CrateOnGoal).unwrap();
        assert!(grid.is_goal_at(Vec2::new(0, 3)));
        grid.set_tile(Vec2::new(0, 3), Tile::Ground).unwrap();
        assert!(grid.is_goal_at(Vec2::new(0, 3)));
        assert!(!grid.is_goal_at(Vec2::new(0, 9)));
        assert_eq!(vec![Vec2::new(0, 3)], grid.goal_cells().collect::<Vec<_>>());
    }

    #[test]
    fn counts_crates() {
        let grid = corridor();
        assert_eq!(1, grid.crate_count());
        assert_eq!(1, grid.goal_count());
        assert_eq!(4, grid.cells().count());
    }
}
