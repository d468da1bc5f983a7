mod clock;
mod game;
mod render;

pub use clock::{ElapsedClock, format_clock};
pub use game::{GameEngine, TickReport};
pub use render::{CrateSprite, EngineState, MoveStats, NullRenderer, RenderSnapshot, Renderer};
