use std::time::Duration;

use tracing::{debug, info, warn};

use crate::animation::{AnimationFrame, AnimationSequencer, AnimationTimings, SequencerPhase};
use crate::config::EngineSettings;
use crate::core::{self, Direction, Grid, MoveOutcome, PixelPos, Player, RejectReason, is_victory};
use crate::engine::clock::ElapsedClock;
use crate::engine::render::{CrateSprite, EngineState, MoveStats, RenderSnapshot, Renderer};
use crate::level::{LevelDescriptor, LevelFormatError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Animation frames delivered during the tick.
    pub frames: u32,
    /// Set on exactly one tick per level: the one that finished the winning animation.
    pub victory: bool,
}

impl TickReport {
    fn merge(&mut self, other: TickReport) {
        self.frames += other.frames;
        self.victory |= other.victory;
    }
}

/// Owns one level's grid and player, resolves input and drives its animations.
///
/// The grid is always logically up to date; only the rendered positions lag while
/// frames are pending.
#[derive(Clone, Debug)]
pub struct GameEngine {
    grid: Grid,
    player: Player,
    sequencer: AnimationSequencer,
    moving_crate: Option<CrateSprite>,
    won: bool,
    victory_signalled: bool,
    clock: ElapsedClock,
    stats: MoveStats,
}

impl GameEngine {
    pub fn new(level: &LevelDescriptor, settings: &EngineSettings) -> GameEngine {
        GameEngine::with_timings(level, settings.timings())
    }

    pub fn with_timings(level: &LevelDescriptor, timings: AnimationTimings) -> GameEngine {
        let grid = level.build_grid();
        let player = level.build_player(timings.tile_size);
        let mut engine = GameEngine {
            grid,
            player,
            sequencer: AnimationSequencer::new(timings),
            moving_crate: None,
            won: false,
            victory_signalled: false,
            clock: ElapsedClock::default(),
            stats: MoveStats::default(),
        };

        info!(
            rows = engine.grid.rows(),
            cols = engine.grid.cols(),
            crates = engine.grid.crate_count(),
            goals = engine.grid.goal_count(),
            "level loaded"
        );
        if engine.grid.goal_count() == 0 {
            warn!("level has no goals and counts as solved");
        }
        if is_victory(&engine.grid) {
            engine.enter_won();
            engine.sequencer.finish_won();
        }
        engine
    }

    /// Parses a `+++` ... `---` block and starts it.
    pub fn load(block: &str, settings: &EngineSettings) -> Result<GameEngine, LevelFormatError> {
        let level = LevelDescriptor::parse(block)?;
        Ok(GameEngine::new(&level, settings))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn stats(&self) -> MoveStats {
        self.stats
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn timings(&self) -> &AnimationTimings {
        self.sequencer.timings()
    }

    pub fn sequencer_phase(&self) -> SequencerPhase {
        self.sequencer.phase()
    }

    pub fn is_victory(&self) -> bool {
        is_victory(&self.grid)
    }

    pub fn state(&self) -> EngineState {
        if self.won {
            EngineState::Won
        } else if self.sequencer.is_animating() {
            EngineState::Animating
        } else {
            EngineState::Idle
        }
    }

    pub fn accepts_input(&self) -> bool {
        !self.won && self.sequencer.accepts_input()
    }

    /// Reads the current grid back as a level descriptor.
    pub fn to_descriptor(&self) -> Result<LevelDescriptor, LevelFormatError> {
        LevelDescriptor::from_grid(&self.grid, self.player.position)
    }

    /// Applies one directional intent. Input that arrives while busy is dropped, never queued.
    pub fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.won {
            return MoveOutcome::Rejected(RejectReason::Won);
        }
        if !self.sequencer.accepts_input() {
            debug!(?direction, "input dropped while busy");
            return MoveOutcome::Rejected(RejectReason::Busy);
        }

        let outcome = core::attempt_move(&mut self.grid, &mut self.player, direction);
        if let Some(transition) = outcome.transition() {
            self.stats.moves += 1;
            if let Some(push) = transition.push {
                self.stats.pushes += 1;
                self.moving_crate = Some(CrateSprite {
                    cell: push.to,
                    pixel: PixelPos::of_cell(push.from, self.timings().tile_size),
                });
            }
            self.sequencer.begin(transition);
            if transition.victory {
                self.enter_won();
            }
        }
        outcome
    }

    /// Advances animations by `dt`, drawing once per delivered frame, or once if none fell due.
    ///
    /// If the renderer fails, the remaining frames are still applied so the visual state
    /// stays in step with the clock; the first error is returned afterwards.
    pub fn tick<R: Renderer>(&mut self, dt: Duration, renderer: &mut R) -> Result<TickReport, R::Error> {
        self.clock.advance(dt);

        let frames = self.sequencer.advance(dt);
        let mut report = TickReport::default();
        let mut failure = None;
        for frame in &frames {
            self.apply_frame(frame);
            report.frames += 1;
            if failure.is_none() {
                failure = renderer.draw(&self.snapshot()).err();
            }
        }
        if frames.is_empty() {
            renderer.draw(&self.snapshot())?;
        }
        if let Some(err) = failure {
            return Err(err);
        }

        if self.sequencer.phase() == SequencerPhase::Won && !self.victory_signalled {
            self.victory_signalled = true;
            report.victory = true;
            info!(
                moves = self.stats.moves,
                pushes = self.stats.pushes,
                seconds = self.clock.whole_seconds(),
                "victory"
            );
        }
        Ok(report)
    }

    /// Ticks until the pending animation and cooldown are over, or the level is won.
    pub fn settle<R: Renderer>(&mut self, renderer: &mut R) -> Result<TickReport, R::Error> {
        let timings = *self.timings();
        let step = timings
            .movement
            .frame_duration
            .min(timings.push.frame_duration)
            .max(Duration::from_millis(1));

        let mut report = self.tick(Duration::ZERO, renderer)?;
        while self.sequencer.is_animating() || !self.sequencer.cooldown_remaining().is_zero() {
            report.merge(self.tick(step, renderer)?);
        }
        Ok(report)
    }

    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            grid: &self.grid,
            player_cell: self.player.position,
            player_pixel: self.player.pixel,
            facing: self.player.facing,
            moving_crate: self.moving_crate,
            state: self.state(),
            elapsed_seconds: self.clock.whole_seconds(),
            stats: self.stats,
        }
    }

    fn apply_frame(&mut self, frame: &AnimationFrame) {
        match *frame {
            AnimationFrame::Crate { cell, pixel, .. } => {
                self.moving_crate = (!frame.is_final()).then_some(CrateSprite { cell, pixel });
            }
            AnimationFrame::Player { pixel, .. } => {
                self.player.pixel = if frame.is_final() {
                    PixelPos::of_cell(self.player.position, self.timings().tile_size)
                } else {
                    pixel
                };
            }
        }
    }

    fn enter_won(&mut self) {
        self.won = true;
        self.clock.stop();
        info!("level solved");
    }
}
