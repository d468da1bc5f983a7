mod easing;
mod sequencer;
mod tween;

pub use easing::{ease_in_out_quad, lerp};
pub use sequencer::{AnimationFrame, AnimationSequencer, AnimationTimings, SequencerPhase};
pub use tween::{FrameTiming, Tween};
