use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::easing::{ease_in_out_quad, lerp};
use crate::core::PixelPos;

/// Frame count and per-frame spacing of one animation timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFrameTiming")]
pub struct FrameTiming {
    pub frames: u32,
    pub frame_duration: Duration,
}

#[derive(Deserialize)]
struct RawFrameTiming {
    frames: u32,
    frame_duration: Duration,
}

impl From<RawFrameTiming> for FrameTiming {
    fn from(raw: RawFrameTiming) -> Self {
        FrameTiming::new(raw.frames, raw.frame_duration)
    }
}

impl FrameTiming {
    pub fn new(frames: u32, frame_duration: Duration) -> FrameTiming {
        FrameTiming {
            frames: frames.max(1),
            frame_duration,
        }
    }

    pub fn total(&self) -> Duration {
        self.frame_duration * self.frames
    }
}

/// Eased movement between two pixel positions, sampled at fixed frame offsets.
///
/// Frame `k` (1-based) falls due at `k * frame_duration` and shows progress `k / frames`.
/// The last frame lands exactly on `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: PixelPos,
    pub to: PixelPos,
    pub timing: FrameTiming,
}

impl Tween {
    pub fn new(from: PixelPos, to: PixelPos, timing: FrameTiming) -> Tween {
        Tween { from, to, timing }
    }

    pub fn frames(&self) -> u32 {
        self.timing.frames
    }

    pub fn offset_of(&self, frame: u32) -> Duration {
        self.timing.frame_duration * frame
    }

    pub fn position_at(&self, frame: u32) -> PixelPos {
        if frame >= self.timing.frames {
            return self.to;
        }
        let progress = frame as f64 / self.timing.frames as f64;
        lerp(self.from, self.to, ease_in_out_quad(progress))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tween() -> Tween {
        Tween::new(
            PixelPos { x: 0.0, y: 0.0 },
            PixelPos { x: 64.0, y: 0.0 },
            FrameTiming::new(8, Duration::from_millis(25)),
        )
    }

    #[test]
    fn frames_follow_the_eased_curve() {
        let t = tween();
        assert_eq!(PixelPos { x: 0.0, y: 0.0 }, t.position_at(0));
        assert_eq!(PixelPos { x: 8.0, y: 0.0 }, t.position_at(2));
        assert_eq!(PixelPos { x: 32.0, y: 0.0 }, t.position_at(4));
        assert_eq!(PixelPos { x: 56.0, y: 0.0 }, t.position_at(6));
        assert_eq!(PixelPos { x: 64.0, y: 0.0 }, t.position_at(8));
    }

    #[test]
    fn offsets_are_evenly_spaced() {
        let t = tween();
        assert_eq!(Duration::from_millis(25), t.offset_of(1));
        assert_eq!(Duration::from_millis(200), t.offset_of(8));
        assert_eq!(Duration::from_millis(200), t.timing.total());
    }

    #[test]
    fn zero_frames_are_raised_to_one() {
        assert_eq!(1, FrameTiming::new(0, Duration::from_millis(10)).frames);
    }

    #[test]
    fn deserialized_timing_is_clamped_too() {
        let json = r#"{"frames":0,"frame_duration":{"secs":0,"nanos":10000000}}"#;
        let timing: FrameTiming = serde_json::from_str(json).unwrap();
        assert_eq!(FrameTiming::new(1, Duration::from_millis(10)), timing);
    }
}
