use crate::core::MoveOutcome;

/// Shell-side state shown around the board.
#[derive(Clone, Debug, Default)]
pub struct GameRenderState {
    pub level: usize,
    pub level_count: usize,
    pub won: bool,
    pub last_outcome: Option<MoveOutcome>,
}
