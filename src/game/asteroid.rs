//! A single falling word entity.
//!
//! Asteroids are plain data: the render loop advances them, the typing state
//! machine mutates their typed progress, and the stateless renderer reads them.
//! Nothing here touches the DOM, so the simulation is testable on the host.

use crate::game::rng::SeededRng;

/// Vertical start offset above the visible area.
pub const SPAWN_Y_OFFSET: f64 = 50.0;
/// How far below the viewport an asteroid may drift before it counts as escaped.
pub const ESCAPE_MARGIN: f64 = 50.0;

pub const MIN_FALL_SPEED: f64 = 0.5;
pub const MAX_FALL_SPEED: f64 = 2.0;
pub const MIN_SIZE: f64 = 90.0;
pub const MAX_SIZE: f64 = 150.0;
pub const MAX_ROTATION_SPEED: f64 = 0.05;

#[derive(Clone, Debug)]
pub struct Asteroid {
    /// Lowercase, non-empty word the player must type.
    pub word: String,
    pub x: f64,
    /// y grows downward; spawns above the visible area.
    pub y: f64,
    /// Constant for the asteroid's lifetime, in pixels per tick.
    pub fall_speed: f64,
    /// Rendering radius and label placement only; there is no hitbox.
    pub size: f64,
    pub rotation: f64,
    pub rotation_speed: f64,
    /// Leading characters of `word` already confirmed by the player.
    pub typed_count: usize,
    pub is_targeted: bool,
}

impl Asteroid {
    /// Spawn with randomized kinematics inside `[0, bounds_width - size]`.
    pub fn spawn(word: String, bounds_width: f64, rng: &mut SeededRng) -> Self {
        let size = rng.next_range(MIN_SIZE, MAX_SIZE);
        Self {
            word,
            x: rng.next_f64() * (bounds_width - size).max(0.0),
            y: -SPAWN_Y_OFFSET,
            fall_speed: rng.next_range(MIN_FALL_SPEED, MAX_FALL_SPEED),
            size,
            rotation: 0.0,
            rotation_speed: rng.next_range(-MAX_ROTATION_SPEED, MAX_ROTATION_SPEED),
            typed_count: 0,
            is_targeted: false,
        }
    }

    /// One simulation tick of linear fall plus cosmetic spin.
    pub fn advance(&mut self) {
        self.y += self.fall_speed;
        self.rotation += self.rotation_speed;
    }

    pub fn is_escaped(&self, viewport_height: f64) -> bool {
        self.y > viewport_height + ESCAPE_MARGIN
    }

    pub fn is_word_complete(&self) -> bool {
        self.typed_count >= self.word.chars().count()
    }

    /// Next character the player has to type, `None` once the word is complete.
    pub fn expected_char(&self) -> Option<char> {
        self.word.chars().nth(self.typed_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_parameters_stay_in_documented_ranges() {
        let mut rng = SeededRng::new(99);
        for _ in 0..500 {
            let a = Asteroid::spawn("meteor".into(), 1280.0, &mut rng);
            assert!((MIN_FALL_SPEED..MAX_FALL_SPEED).contains(&a.fall_speed));
            assert!((MIN_SIZE..MAX_SIZE).contains(&a.size));
            assert!(a.rotation_speed.abs() < MAX_ROTATION_SPEED);
            assert!(a.x >= 0.0 && a.x <= 1280.0 - a.size);
            assert_eq!(a.y, -SPAWN_Y_OFFSET);
            assert_eq!(a.typed_count, 0);
            assert!(!a.is_targeted);
        }
    }

    #[test]
    fn spawn_in_narrow_bounds_clamps_to_origin() {
        let mut rng = SeededRng::new(5);
        let a = Asteroid::spawn("tiny".into(), 10.0, &mut rng);
        assert_eq!(a.x, 0.0);
    }

    #[test]
    fn advance_applies_fall_and_spin() {
        let mut rng = SeededRng::new(1);
        let mut a = Asteroid::spawn("orbit".into(), 800.0, &mut rng);
        let (y0, r0) = (a.y, a.rotation);
        a.advance();
        assert_eq!(a.y, y0 + a.fall_speed);
        assert_eq!(a.rotation, r0 + a.rotation_speed);
    }

    #[test]
    fn escape_requires_margin_below_viewport() {
        let mut rng = SeededRng::new(2);
        let mut a = Asteroid::spawn("drift".into(), 800.0, &mut rng);
        a.y = 600.0;
        assert!(!a.is_escaped(600.0));
        a.y = 600.0 + ESCAPE_MARGIN + 1.0;
        assert!(a.is_escaped(600.0));
    }

    #[test]
    fn expected_char_walks_the_word() {
        let mut rng = SeededRng::new(3);
        let mut a = Asteroid::spawn("cat".into(), 800.0, &mut rng);
        assert_eq!(a.expected_char(), Some('c'));
        a.typed_count = 2;
        assert_eq!(a.expected_char(), Some('t'));
        a.typed_count = 3;
        assert_eq!(a.expected_char(), None);
        assert!(a.is_word_complete());
    }
}
