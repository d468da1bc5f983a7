use std::time::Duration;

use tracing::trace;

use crate::animation::tween::{FrameTiming, Tween};
use crate::core::{MoveTransition, PixelPos, Vec2};

/// Timing parameters shared by every animation of a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationTimings {
    pub tile_size: u32,
    pub movement: FrameTiming,
    pub push: FrameTiming,
    pub cooldown: Duration,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        AnimationTimings {
            tile_size: 64,
            movement: FrameTiming::new(8, Duration::from_millis(25)),
            push: FrameTiming::new(8, Duration::from_millis(50)),
            cooldown: Duration::from_millis(100),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SequencerPhase {
    Idle,
    AnimatingMove,
    AnimatingPush,
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    /// Input is blocked until `cooldown` runs out.
    Idle { cooldown: Duration },
    /// Crate slides first; the player's move is chained after it.
    AnimatingPush { crate_cell: Vec2, crate_tween: Tween, player_tween: Tween },
    AnimatingMove { player_tween: Tween },
    Won,
}

/// One interpolated visual update, delivered at its scheduled offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationFrame {
    /// `cell` is the crate's destination, where the grid already holds it.
    Crate { cell: Vec2, pixel: PixelPos, frame: u32, frames: u32 },
    Player { pixel: PixelPos, frame: u32, frames: u32 },
}

impl AnimationFrame {
    pub fn is_final(&self) -> bool {
        match self {
            AnimationFrame::Crate { frame, frames, .. } | AnimationFrame::Player { frame, frames, .. } => {
                frame >= frames
            }
        }
    }
}

/// Turns committed moves into timed frame sequences and gates input while they play.
///
/// Only rendering positions come out of here; the grid was settled before `begin`.
#[derive(Clone, Debug)]
pub struct AnimationSequencer {
    timings: AnimationTimings,
    phase: Phase,
    elapsed: Duration,
    frame: u32,
    win_on_finish: bool,
}

impl AnimationSequencer {
    pub fn new(timings: AnimationTimings) -> AnimationSequencer {
        AnimationSequencer {
            timings,
            phase: Phase::Idle { cooldown: Duration::ZERO },
            elapsed: Duration::ZERO,
            frame: 0,
            win_on_finish: false,
        }
    }

    pub fn timings(&self) -> &AnimationTimings {
        &self.timings
    }

    pub fn phase(&self) -> SequencerPhase {
        match self.phase {
            Phase::Idle { .. } => SequencerPhase::Idle,
            Phase::AnimatingPush { .. } => SequencerPhase::AnimatingPush,
            Phase::AnimatingMove { .. } => SequencerPhase::AnimatingMove,
            Phase::Won => SequencerPhase::Won,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::AnimatingMove { .. } | Phase::AnimatingPush { .. })
    }

    pub fn cooldown_remaining(&self) -> Duration {
        match self.phase {
            Phase::Idle { cooldown } => cooldown,
            _ => Duration::ZERO,
        }
    }

    /// Idle with the cooldown fully elapsed.
    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, Phase::Idle { cooldown } if cooldown.is_zero())
    }

    /// Schedules the frames of an accepted move. Ignored unless the sequencer accepts input.
    pub fn begin(&mut self, transition: &MoveTransition) -> bool {
        if !self.accepts_input() {
            return false;
        }

        let tile = self.timings.tile_size;
        let player_tween = Tween::new(
            PixelPos::of_cell(transition.player_from, tile),
            PixelPos::of_cell(transition.player_to, tile),
            self.timings.movement,
        );
        self.phase = match transition.push {
            Some(push) => Phase::AnimatingPush {
                crate_cell: push.to,
                crate_tween: Tween::new(
                    PixelPos::of_cell(push.from, tile),
                    PixelPos::of_cell(push.to, tile),
                    self.timings.push,
                ),
                player_tween,
            },
            None => Phase::AnimatingMove { player_tween },
        };
        self.elapsed = Duration::ZERO;
        self.frame = 0;
        self.win_on_finish = transition.victory;
        true
    }

    /// Enters the terminal state without animating, e.g. for a level that loads already solved.
    pub fn finish_won(&mut self) {
        self.phase = Phase::Won;
        self.elapsed = Duration::ZERO;
        self.frame = 0;
    }

    /// Moves the clock forward by `dt` and returns every frame that fell due, in order.
    ///
    /// Time left over after a timeline ends carries into the next phase or the cooldown.
    pub fn advance(&mut self, dt: Duration) -> Vec<AnimationFrame> {
        let mut frames = Vec::new();
        let mut budget = dt;

        loop {
            let tween = match &mut self.phase {
                Phase::Idle { cooldown } => {
                    *cooldown = cooldown.saturating_sub(budget);
                    return frames;
                }
                Phase::Won => return frames,
                Phase::AnimatingPush { crate_tween, .. } => *crate_tween,
                Phase::AnimatingMove { player_tween } => *player_tween,
            };

            let next_offset = tween.offset_of(self.frame + 1);
            let until_next = next_offset.saturating_sub(self.elapsed);
            if budget < until_next {
                self.elapsed += budget;
                return frames;
            }
            budget -= until_next;
            self.elapsed = next_offset;
            self.frame += 1;

            let frame = self.current_frame(&tween);
            trace!(?frame, "animation frame");
            frames.push(frame);

            if self.frame >= tween.frames() {
                self.complete_phase();
            }
        }
    }

    fn current_frame(&self, tween: &Tween) -> AnimationFrame {
        let pixel = tween.position_at(self.frame);
        match self.phase {
            Phase::AnimatingPush { crate_cell, .. } => AnimationFrame::Crate {
                cell: crate_cell,
                pixel,
                frame: self.frame,
                frames: tween.frames(),
            },
            _ => AnimationFrame::Player {
                pixel,
                frame: self.frame,
                frames: tween.frames(),
            },
        }
    }

    fn complete_phase(&mut self) {
        self.phase = match self.phase {
            Phase::AnimatingPush { player_tween, .. } => Phase::AnimatingMove { player_tween },
            Phase::AnimatingMove { .. } if self.win_on_finish => Phase::Won,
            Phase::AnimatingMove { .. } => Phase::Idle { cooldown: self.timings.cooldown },
            other => other,
        };
        self.elapsed = Duration::ZERO;
        self.frame = 0;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::{CratePush, Direction};

    fn step_right(push: bool, victory: bool) -> MoveTransition {
        MoveTransition {
            direction: Direction::Right,
            delta: Direction::Right.delta(),
            player_from: Vec2::new(0, 0),
            player_to: Vec2::new(0, 1),
            push: push.then_some(CratePush { from: Vec2::new(0, 1), to: Vec2::new(0, 2) }),
            victory,
        }
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn plain_move_plays_eight_player_frames_then_cools_down() {
        let mut sequencer = AnimationSequencer::new(AnimationTimings::default());
        assert!(sequencer.begin(&step_right(false, false)));
        assert_eq!(SequencerPhase::AnimatingMove, sequencer.phase());

        let frames = sequencer.advance(ms(200));
        assert_eq!(8, frames.len());
        assert!(frames.iter().all(|f| matches!(f, AnimationFrame::Player { .. })));
        assert_eq!(
            AnimationFrame::Player { pixel: PixelPos { x: 64.0, y: 0.0 }, frame: 8, frames: 8 },
            frames[7]
        );
        assert!(frames[7].is_final());

        assert_eq!(SequencerPhase::Idle, sequencer.phase());
        assert!(!sequencer.accepts_input());
        assert_eq!(ms(100), sequencer.cooldown_remaining());

        sequencer.advance(ms(99));
        assert!(!sequencer.accepts_input());
        sequencer.advance(ms(1));
        assert!(sequencer.accepts_input());
    }

    #[test]
    fn frames_are_delivered_only_when_due() {
        let mut sequencer = AnimationSequencer::new(AnimationTimings::default());
        sequencer.begin(&step_right(false, false));

        assert!(sequencer.advance(ms(24)).is_empty());
        assert_eq!(1, sequencer.advance(ms(1)).len());
        assert_eq!(2, sequencer.advance(ms(60)).len());
        assert_eq!(SequencerPhase::AnimatingMove, sequencer.phase());
    }

    #[test]
    fn push_slides_crate_before_player() {
        let mut sequencer = AnimationSequencer::new(AnimationTimings::default());
        sequencer.begin(&step_right(true, false));
        assert_eq!(SequencerPhase::AnimatingPush, sequencer.phase());

        let crate_frames = sequencer.advance(ms(400));
        assert_eq!(8, crate_frames.len());
        assert!(crate_frames.iter().all(|f| matches!(f, AnimationFrame::Crate { cell, .. } if *cell == Vec2::new(0, 2))));
        assert_eq!(SequencerPhase::AnimatingMove, sequencer.phase());

        let player_frames = sequencer.advance(ms(200));
        assert_eq!(8, player_frames.len());
        assert!(player_frames.iter().all(|f| matches!(f, AnimationFrame::Player { .. })));
        assert_eq!(SequencerPhase::Idle, sequencer.phase());
    }

    #[test]
    fn leftover_time_carries_into_the_chained_move() {
        let mut sequencer = AnimationSequencer::new(AnimationTimings::default());
        sequencer.begin(&step_right(true, false));

        let frames = sequencer.advance(ms(400 + 200 + 100));
        assert_eq!(16, frames.len());
        assert!(sequencer.accepts_input());
    }

    #[test]
    fn begin_is_refused_while_busy() {
        let mut sequencer = AnimationSequencer::new(AnimationTimings::default());
        assert!(sequencer.begin(&step_right(false, false)));
        assert!(!sequencer.begin(&step_right(false, false)));
        sequencer.advance(ms(250));
        assert!(!sequencer.begin(&step_right(false, false)));
    }

    #[test]
    fn winning_move_ends_in_won() {
        let mut sequencer = AnimationSequencer::new(AnimationTimings::default());
        sequencer.begin(&step_right(true, true));
        sequencer.advance(ms(10_000));
        assert_eq!(SequencerPhase::Won, sequencer.phase());
        assert!(!sequencer.accepts_input());
        assert!(sequencer.advance(ms(1_000)).is_empty());
        assert!(!sequencer.begin(&step_right(false, false)));
    }
}
