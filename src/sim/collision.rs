//! Collision tests
//!
//! Everything in the game is an axis-aligned box except the ultimate
//! beam, which is a trapezoid tested by interpolating its cross-section
//! at the target's x.

use glam::Vec2;

use super::state::UltimateLaser;

/// Axis-aligned rectangle, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, w: f32, h: f32) -> Self {
        Self { x: pos.x, y: pos.y, w, h }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Two boxes overlap iff each starts before the other ends on both axes.
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Does the beam cover `target` at the target's x position?
///
/// The beam's top edge and height are linearly interpolated between its
/// narrow and wide ends, with the interpolation parameter clamped to
/// [0, 1], then a plain vertical overlap test is applied.
pub fn beam_hits_rect(beam: &UltimateLaser, target: &Rect) -> bool {
    // Horizontal span first
    if target.x + target.w <= beam.start_x || target.x >= beam.end_x {
        return false;
    }

    let span = beam.end_x - beam.start_x;
    let t = if span > 0.0 {
        ((target.x - beam.start_x) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let top = beam.start_y + (beam.end_y - beam.start_y) * t;
    let height = beam.start_height + (beam.end_height - beam.start_height) * t;
    let bottom = top + height;

    target.y < bottom && target.y + target.h > top
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beam() -> UltimateLaser {
        // Narrow end 24px tall centered at y=100, widening to 200px at x=400
        UltimateLaser {
            start_x: 50.0,
            end_x: 400.0,
            start_y: 88.0,
            start_height: 24.0,
            end_y: 0.0,
            end_height: 200.0,
            started_at_ms: 0.0,
            duration_ms: 1000.0,
        }
    }

    #[test]
    fn overlap_detects_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(aabb_overlap(&a, &b));
        assert!(aabb_overlap(&b, &a));
    }

    #[test]
    fn overlap_rejects_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(!aabb_overlap(&a, &b));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        // Strict inequalities: a box ending exactly where another starts misses
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!aabb_overlap(&a, &b));
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!aabb_overlap(&a, &c));
    }

    #[test]
    fn beam_hits_at_narrow_end() {
        let b = beam();
        // Inside the 24px-tall slice just right of start_x
        assert!(beam_hits_rect(&b, &Rect::new(55.0, 90.0, 30.0, 30.0)));
        // Well above the narrow slice
        assert!(!beam_hits_rect(&b, &Rect::new(55.0, 10.0, 30.0, 30.0)));
    }

    #[test]
    fn beam_widens_toward_far_end() {
        let b = beam();
        // y=20 misses the narrow end but is inside the cone at x=380
        assert!(!beam_hits_rect(&b, &Rect::new(55.0, 20.0, 30.0, 30.0)));
        assert!(beam_hits_rect(&b, &Rect::new(350.0, 20.0, 30.0, 30.0)));
    }

    #[test]
    fn beam_ignores_targets_outside_span() {
        let b = beam();
        // Entirely left of the emitter
        assert!(!beam_hits_rect(&b, &Rect::new(0.0, 90.0, 20.0, 20.0)));
        // Starting at the far edge
        assert!(!beam_hits_rect(&b, &Rect::new(400.0, 90.0, 20.0, 20.0)));
    }

    #[test]
    fn beam_clamps_interpolation_for_straddling_targets() {
        let b = beam();
        // Target starts left of the beam but overlaps its span; t clamps to 0
        // so the narrow-end cross-section applies.
        assert!(beam_hits_rect(&b, &Rect::new(40.0, 90.0, 30.0, 20.0)));
        assert!(!beam_hits_rect(&b, &Rect::new(40.0, 10.0, 30.0, 20.0)));
    }
}
