use serde::{Deserialize, Serialize};

/// What currently occupies one grid cell. Goal-ness lives in the grid's goal mask,
/// not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Ground,
    Crate,
    CrateOnGoal,
}

impl Tile {
    pub fn is_crate(&self) -> bool {
        matches!(self, Tile::Crate | Tile::CrateOnGoal)
    }

    pub fn is_walkable(&self) -> bool {
        *self == Tile::Ground
    }

    /// The crate tile to place on a cell with the given goal marking.
    pub fn crate_for(is_goal: bool) -> Tile {
        if is_goal { Tile::CrateOnGoal } else { Tile::Crate }
    }
}

/// Grid coordinate or displacement. `i` is the row, `j` the column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Vec2 {
    pub i: i32,
    pub j: i32,
}

impl Vec2 {
    pub const fn new(i: i32, j: i32) -> Vec2 {
        Vec2 { i, j }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 { i: self.i + rhs.i, j: self.j + rhs.j }
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.i, self.j)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn delta(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2 { i: -1, j: 0 },
            Direction::Down => Vec2 { i: 1, j: 0 },
            Direction::Left => Vec2 { i: 0, j: -1 },
            Direction::Right => Vec2 { i: 0, j: 1 },
        }
    }

    pub fn from_char(c: char) -> Option<Direction> {
        match c.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Continuous rendering position in pixels. Only the animation layer writes it.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPos {
    pub x: f64,
    pub y: f64,
}

impl PixelPos {
    /// Tile-aligned pixel position of a cell.
    pub fn of_cell(cell: Vec2, tile_size: u32) -> PixelPos {
        PixelPos {
            x: cell.j as f64 * tile_size as f64,
            y: cell.i as f64 * tile_size as f64,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Authoritative logical position, committed when a move is accepted.
    pub position: Vec2,
    pub facing: Direction,
    /// May lag behind `position` while a move is animating.
    pub pixel: PixelPos,
}

impl Player {
    pub fn new(position: Vec2, tile_size: u32) -> Player {
        Player {
            position,
            facing: Direction::Down,
            pixel: PixelPos::of_cell(position, tile_size),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CratePush {
    pub from: Vec2,
    pub to: Vec2,
}

/// Record of one accepted move, handed to the animation sequencer and then dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTransition {
    pub direction: Direction,
    pub delta: Vec2,
    pub player_from: Vec2,
    pub player_to: Vec2,
    pub push: Option<CratePush>,
    pub victory: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// An animation or the input cooldown is still running.
    Busy,
    /// The level is already solved.
    Won,
    /// Target cell is a wall or lies off the grid.
    Blocked,
    /// The crate in the way cannot move: wall, crate, or grid edge behind it.
    CrateBlocked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Rejected(RejectReason),
    PlayerMoved(MoveTransition),
    CratePushed(MoveTransition),
    VictoryReached(MoveTransition),
}

impl MoveOutcome {
    pub fn transition(&self) -> Option<&MoveTransition> {
        match self {
            MoveOutcome::Rejected(_) => None,
            MoveOutcome::PlayerMoved(t) | MoveOutcome::CratePushed(t) | MoveOutcome::VictoryReached(t) => Some(t),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.transition().is_some()
    }
}
