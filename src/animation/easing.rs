use crate::core::PixelPos;

/// Quadratic ease-in/ease-out over `p` in [0,1]. Inputs outside that range are clamped.
pub fn ease_in_out_quad(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    if p < 0.5 {
        2.0 * p * p
    } else {
        1.0 - (-2.0 * p + 2.0).powi(2) / 2.0
    }
}

pub fn lerp(from: PixelPos, to: PixelPos, t: f64) -> PixelPos {
    PixelPos {
        x: from.x + (to.x - from.x) * t,
        y: from.y + (to.y - from.y) * t,
    }
}
