pub use emath::{Vec2, vec2};

/// Position of a node the layout has not placed yet.
pub const UNPLACED: Vec2 = vec2(f32::NAN, f32::NAN);

/// Unit vector used when two points coincide and no direction exists.
/// Spreads pairs around the circle by golden-ratio steps so stacked nodes
/// separate instead of moving in lockstep.
pub fn fallback_direction(a: usize, b: usize) -> Vec2 {
    let angle = ((a as f32) * 0.618_034 + (b as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_direction_is_unit_length() {
        for (a, b) in [(0, 1), (3, 7), (12, 2)] {
            assert!((fallback_direction(a, b).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_unplaced_is_not_finite() {
        assert!(!UNPLACED.is_finite());
    }
}
