use serde::Serialize;

use crate::core::{Direction, Grid, PixelPos, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EngineState {
    /// Accepts input once the cooldown has run out.
    Idle,
    Animating,
    /// Terminal: the level is solved.
    Won,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MoveStats {
    pub moves: u32,
    pub pushes: u32,
}

/// A crate drawn between cells while its slide animates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CrateSprite {
    /// Destination cell; the grid already holds the crate there.
    pub cell: Vec2,
    pub pixel: PixelPos,
}

/// Read-only view handed to a renderer once per delivered frame.
#[derive(Clone, Copy, Debug)]
pub struct RenderSnapshot<'a> {
    pub grid: &'a Grid,
    pub player_cell: Vec2,
    pub player_pixel: PixelPos,
    pub facing: Direction,
    pub moving_crate: Option<CrateSprite>,
    pub state: EngineState,
    pub elapsed_seconds: u64,
    pub stats: MoveStats,
}

pub trait Renderer {
    type Error;

    fn draw(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<(), Self::Error>;
}

/// Discards every frame.
pub struct NullRenderer;

impl Renderer for NullRenderer {
    type Error = std::convert::Infallible;

    fn draw(&mut self, _snapshot: &RenderSnapshot<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}
