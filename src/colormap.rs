//! Level-to-color mapping for map markers.
//!
//! Levels in percent are normalized against a fixed [0, 100] domain and run
//! through a three-stop red → yellow → green ramp. The anchors are the end
//! and midpoint colors of the RdYlGn diverging scheme.

use serde::Serialize;

/// RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex form for marker fills, e.g. `#a50026`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Lower and upper bound of the level domain.
pub const LEVEL_DOMAIN: (f64, f64) = (0.0, 100.0);

/// Empty tank.
pub const RED: Rgb = Rgb::new(165, 0, 38);
/// Half full.
pub const YELLOW: Rgb = Rgb::new(255, 255, 191);
/// Full tank.
pub const GREEN: Rgb = Rgb::new(0, 104, 55);

const STOPS: [(f64, Rgb); 3] = [(0.0, RED), (0.5, YELLOW), (1.0, GREEN)];

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

/// Normalize a level into [0, 1], clamping values outside the domain.
pub fn normalize(level: f64) -> f64 {
    let (lo, hi) = LEVEL_DOMAIN;
    ((level - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Marker color for a level in percent.
///
/// Absent levels have no color; callers skip those sensors entirely.
pub fn color(level: f64) -> Rgb {
    let t = normalize(level);
    if t.is_nan() {
        return STOPS[0].1;
    }

    for pair in STOPS.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let ratio = (t - t0) / (t1 - t0);
            return Rgb::new(
                lerp(c0.r, c1.r, ratio),
                lerp(c0.g, c1.g, ratio),
                lerp(c0.b, c1.b, ratio),
            );
        }
    }
    STOPS[STOPS.len() - 1].1
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_anchor_colors() {
        // ---
        assert_eq!(color(0.0), RED);
        assert_eq!(color(50.0), YELLOW);
        assert_eq!(color(100.0), GREEN);
        assert_eq!(color(0.0).to_hex(), "#a50026");
        assert_eq!(color(50.0).to_hex(), "#ffffbf");
        assert_eq!(color(100.0).to_hex(), "#006837");
    }

    #[test]
    fn test_out_of_domain_is_clamped() {
        // ---
        assert_eq!(color(-20.0), RED);
        assert_eq!(color(250.0), GREEN);
        assert_eq!(normalize(-1.0), 0.0);
        assert_eq!(normalize(101.0), 1.0);
    }

    #[test]
    fn test_color_is_deterministic() {
        // ---
        for level in [0.0, 12.5, 33.3, 50.0, 77.7, 100.0] {
            assert_eq!(color(level), color(level));
        }
    }

    #[test]
    fn test_midpoints_interpolate() {
        // ---
        // Quarter way: halfway between red and yellow in every channel
        let quarter = color(25.0);
        assert_eq!(quarter, Rgb::new(210, 128, 115));

        let three_quarters = color(75.0);
        assert_eq!(three_quarters, Rgb::new(128, 180, 123));
    }

    #[test]
    fn test_channels_are_monotonic_between_anchors() {
        // ---
        // (level range, per-channel direction: +1 rising, -1 falling)
        let segments = [((0, 50), [1, 1, 1]), ((50, 100), [-1, -1, -1])];

        for ((start, end), direction) in segments {
            let mut previous = color(start as f64);
            for step in (start * 10 + 1)..=(end * 10) {
                let current = color(step as f64 / 10.0);
                let deltas = [
                    current.r as i32 - previous.r as i32,
                    current.g as i32 - previous.g as i32,
                    current.b as i32 - previous.b as i32,
                ];
                for (delta, dir) in deltas.iter().zip(direction) {
                    assert!(delta * dir >= 0, "channel reversed at level {}", step);
                }
                previous = current;
            }
        }
    }

    #[test]
    fn test_hex_formatting() {
        // ---
        assert_eq!(Rgb::new(0, 0, 0).to_hex(), "#000000");
        assert_eq!(Rgb::new(255, 16, 1).to_hex(), "#ff1001");
    }
}
