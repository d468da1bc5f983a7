use std::convert::Infallible;
use std::time::Duration;

pub use dissimilar::diff as __diff;

use crate::animation::AnimationTimings;
use crate::console_interface::{parse_visual_level, render_game_to_string};
use crate::core::{Direction, MoveOutcome, PixelPos};
use crate::engine::{CrateSprite, EngineState, GameEngine, RenderSnapshot, Renderer, TickReport};

#[macro_export]
macro_rules! assert_eq_text {
    ($left:expr, $right:expr) => {
        $crate::assert_eq_text!($left, $right,)
    };
    ($left:expr, $right:expr, $($tt:tt)*) => {{
        let left = $left;
        let right = $right;
        if left != right {
            if left.trim() == right.trim() {
                std::eprintln!("Left:\n{:?}\n\nRight:\n{:?}\n\nWhitespace difference\n", left, right);
            } else {
                let diff = $crate::test::test_util::__diff(left, right);
                std::eprintln!("Left:\n{}\n\nRight:\n{}\n\nDiff:\n{}\n", left, right, $crate::test::test_util::format_diff(diff));
            }
            std::eprintln!($($tt)*);
            panic!("text differs");
        }
    }};
}

pub fn format_diff(chunks: Vec<dissimilar::Chunk>) -> String {
    let mut buf = String::new();
    for chunk in chunks {
        let formatted = match chunk {
            dissimilar::Chunk::Equal(text) => text.into(),
            dissimilar::Chunk::Delete(text) => format!("\x1b[41m{}\x1b[0m", text),
            dissimilar::Chunk::Insert(text) => format!("\x1b[42m{}\x1b[0m", text),
        };
        buf.push_str(&formatted);
    }
    buf
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordedFrame {
    pub player_pixel: PixelPos,
    pub moving_crate: Option<CrateSprite>,
    pub state: EngineState,
}

/// Keeps every snapshot it is handed.
#[derive(Default)]
pub struct RecordingRenderer {
    pub frames: Vec<RecordedFrame>,
}

impl Renderer for RecordingRenderer {
    type Error = Infallible;

    fn draw(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<(), Self::Error> {
        self.frames.push(RecordedFrame {
            player_pixel: snapshot.player_pixel,
            moving_crate: snapshot.moving_crate,
            state: snapshot.state,
        });
        Ok(())
    }
}

/// Fails every draw, counting the attempts.
#[derive(Default)]
pub struct FailingRenderer {
    pub attempts: usize,
}

impl Renderer for FailingRenderer {
    type Error = String;

    fn draw(&mut self, _snapshot: &RenderSnapshot<'_>) -> Result<(), Self::Error> {
        self.attempts += 1;
        Err(format!("draw {} failed", self.attempts))
    }
}

pub struct GameTestState {
    pub engine: GameEngine,
    pub renderer: RecordingRenderer,
}

impl GameTestState {
    pub fn new(level: &str) -> Self {
        Self::with_timings(level, AnimationTimings::default())
    }

    pub fn with_timings(level: &str, timings: AnimationTimings) -> Self {
        let descriptor = parse_visual_level(level).unwrap();
        Self {
            engine: GameEngine::with_timings(&descriptor, timings),
            renderer: RecordingRenderer::default(),
        }
    }

    pub fn game_to_string(&self) -> String {
        render_game_to_string(self.engine.grid(), self.engine.player().position)
            .trim_matches('\n')
            .into()
    }

    /// Applies a move that must be accepted and plays it out.
    pub fn assert_move(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = self.engine.attempt_move(direction);
        assert!(
            outcome.is_accepted(),
            "Expected {:?} to be accepted, got {:?}, in map\n{}",
            direction,
            outcome,
            self.game_to_string()
        );
        self.settle();
        outcome
    }

    pub fn assert_moves(&mut self, directions: &[Direction]) {
        for &dir in directions {
            self.assert_move(dir);
        }
    }

    /// Applies a move and, if it was accepted, plays it out.
    pub fn try_move(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = self.engine.attempt_move(direction);
        if outcome.is_accepted() {
            self.settle();
        }
        outcome
    }

    pub fn settle(&mut self) -> TickReport {
        self.engine.settle(&mut self.renderer).unwrap()
    }

    pub fn tick(&mut self, millis: u64) -> TickReport {
        self.engine.tick(ms(millis), &mut self.renderer).unwrap()
    }

    pub fn assert_matches(&self, expected: &str) {
        let actual = self.game_to_string();
        assert_eq_text!(expected.trim_matches('\n'), actual.as_str().trim_matches('\n'));
    }
}

pub fn assert_symbols_match(expected: &str, actual: &str) {
    assert_eq_text!(expected.trim_matches('\n'), actual.trim_matches('\n'));
}
