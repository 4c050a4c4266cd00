//! The player-controlled bird
//!
//! Eight-way movement in fixed steps, a facing direction that rotates the
//! sprite, and a temporary invulnerability window after each kill.

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;

use super::collision::check_arena_bounds;
use super::rect::Rect;
use super::surfaces::{Slot, SpriteCollection};
use super::tick::TickInput;
use crate::error::ConfigError;
use crate::renderer::ImageHandle;

/// One of the eight facing directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

/// (delta sign, direction, angle in degrees, vertical flip)
const DIRECTION_TABLE: [((i32, i32), Direction, f32, bool); 8] = [
    ((0, -1), Direction::Up, 90.0, false),
    ((1, -1), Direction::UpRight, 45.0, false),
    ((1, 0), Direction::Right, 0.0, false),
    ((1, 1), Direction::DownRight, -45.0, false),
    ((0, 1), Direction::Down, -90.0, false),
    ((-1, 1), Direction::DownLeft, -135.0, true),
    ((-1, 0), Direction::Left, -180.0, true),
    ((-1, -1), Direction::UpLeft, -225.0, true),
];

impl Direction {
    /// Direction of a nonzero displacement (only the signs matter)
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        let key = (dx.signum(), dy.signum());
        DIRECTION_TABLE
            .iter()
            .find(|(delta, ..)| *delta == key)
            .map(|&(_, dir, ..)| dir)
    }

    fn entry(self) -> &'static ((i32, i32), Direction, f32, bool) {
        // Table order matches the enum's declaration order
        &DIRECTION_TABLE[self as usize]
    }

    /// Sprite rotation in degrees (counter-clockwise, 0 = facing right)
    pub fn angle(self) -> f32 {
        self.entry().2
    }

    /// Whether the sprite is mirrored vertically before rotating
    pub fn flip(self) -> bool {
        self.entry().3
    }

    /// Unit vector in screen space (y grows downward)
    pub fn heading(self) -> Vec2 {
        let (dx, dy) = self.entry().0;
        let v = Vec2::new(dx as f32, dy as f32);
        if dx != 0 && dy != 0 {
            v * FRAC_1_SQRT_2
        } else {
            v
        }
    }
}

/// The player's sprite set
#[derive(Debug, Clone)]
pub struct PlayerSprites {
    /// Unrotated base, facing right
    pub normal: ImageHandle,
    pub cheering: ImageHandle,
    pub defeated: ImageHandle,
}

#[derive(Debug, Clone)]
pub struct Player {
    sprite: SpriteCollection,
    sprites: PlayerSprites,
    facing: Direction,
    /// Negative while invulnerable, steps toward zero each tick
    invulnerable: i32,
    step: i32,
}

const BODY: Slot<usize> = Slot::Index(0);

impl Player {
    /// Player centered at `center`, facing up
    pub fn new(sprites: PlayerSprites, center: (i32, i32), step: i32) -> Result<Self, ConfigError> {
        let mut sprite = SpriteCollection::new(vec![sprites.normal.clone()], &[Vec2::ZERO])?;
        let size = (sprites.normal.width() as i32, sprites.normal.height() as i32);
        sprite.override_positions(&[Rect::from_center(center.0, center.1, size.0, size.1)])?;
        let mut player = Self {
            sprite,
            sprites,
            facing: Direction::default(),
            invulnerable: 0,
            step,
        };
        player.face(player.facing)?;
        Ok(player)
    }

    /// Bounding rect (hitbox)
    pub fn rect(&self) -> Rect {
        self.sprite.rect(&BODY).unwrap_or_default()
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable < 0
    }

    /// Show the cheering sprite and ignore hits for `ticks` ticks
    pub fn set_invulnerable(&mut self, ticks: u32) -> Result<(), ConfigError> {
        self.invulnerable = crate::countdown_start(ticks);
        if self.is_invulnerable() {
            self.sprite.set_image(&BODY, self.sprites.cheering.clone())?;
        }
        Ok(())
    }

    pub fn show_defeated(&mut self) -> Result<(), ConfigError> {
        self.sprite.set_image(&BODY, self.sprites.defeated.clone())
    }

    /// One tick: move, then count down invulnerability
    pub fn update(&mut self, input: &TickInput) -> Result<(), ConfigError> {
        self.step_move(input, self.is_invulnerable())?;
        if self.invulnerable < 0 {
            self.invulnerable += 1;
            if self.invulnerable == 0 {
                self.face(self.facing)?;
            }
        }
        Ok(())
    }

    /// Sum the held direction keys and move; an out-of-arena result is undone
    /// entirely. Returns whether the player moved.
    pub fn step_move(
        &mut self,
        input: &TickInput,
        suppress_angle: bool,
    ) -> Result<bool, ConfigError> {
        let keys = [
            (input.up, (0, -1)),
            (input.down, (0, 1)),
            (input.left, (-1, 0)),
            (input.right, (1, 0)),
        ];
        let (dx, dy) = keys
            .iter()
            .filter(|(held, _)| *held)
            .fold((0, 0), |(x, y), (_, (kx, ky))| (x + kx * self.step, y + ky * self.step));
        if (dx, dy) == (0, 0) {
            return Ok(false);
        }

        let moved = self.rect().translate(dx, dy);
        if !check_arena_bounds(&moved).inside() {
            return Ok(false);
        }
        self.sprite.override_positions(&[moved])?;

        if !suppress_angle {
            if let Some(dir) = Direction::from_delta(dx, dy) {
                self.face(dir)?;
            }
        }
        Ok(true)
    }

    /// Sprite render pair, refreshed
    pub fn snapshot(&mut self) -> Result<(&ImageHandle, Rect), ConfigError> {
        self.sprite.snapshot_for_render(&BODY)
    }

    fn face(&mut self, dir: Direction) -> Result<(), ConfigError> {
        self.facing = dir;
        let base = self.sprites.normal.flipped(false, dir.flip());
        self.sprite.set_image(&BODY, base.rotozoom(dir.angle(), 1.0).shared())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Image;

    fn sprites() -> PlayerSprites {
        PlayerSprites {
            normal: Image::asset("bird", 25, 25).rotozoom(0.0, 2.0).flipped(true, false).shared(),
            cheering: Image::asset("cheer", 50, 50).shared(),
            defeated: Image::asset("dead", 50, 50).shared(),
        }
    }

    fn player_at(x: i32, y: i32) -> Player {
        let mut p = Player::new(sprites(), (0, 0), 5).unwrap();
        p.sprite.override_positions(&[Rect::new(x, y, 50, 50)]).unwrap();
        p
    }

    fn input(up: bool, down: bool, left: bool, right: bool) -> TickInput {
        TickInput {
            up,
            down,
            left,
            right,
            ..Default::default()
        }
    }

    #[test]
    fn test_direction_table_round_trip() {
        for &(delta, dir, angle, flip) in &DIRECTION_TABLE {
            assert_eq!(Direction::from_delta(delta.0 * 5, delta.1 * 5), Some(dir));
            assert_eq!(dir.angle(), angle);
            assert_eq!(dir.flip(), flip);
        }
        assert_eq!(Direction::from_delta(0, 0), None);
    }

    #[test]
    fn test_headings_are_unit_and_exact() {
        assert_eq!(Direction::Up.heading(), Vec2::new(0.0, -1.0));
        assert_eq!(Direction::Left.heading(), Vec2::new(-1.0, 0.0));
        assert!((Direction::UpLeft.heading().length() - 1.0).abs() < 1e-6);
        assert!(Direction::UpLeft.heading().x < 0.0 && Direction::UpLeft.heading().y < 0.0);
    }

    #[test]
    fn test_starts_facing_up_centered() {
        let p = Player::new(sprites(), (506, 266), 5).unwrap();
        assert_eq!(p.facing(), Direction::Up);
        assert_eq!(p.rect().center(), (506, 266));
        assert_eq!(p.sprite.get(&BODY).unwrap().image().angle, 90.0);
    }

    #[test]
    fn test_diagonal_move_combines_keys() {
        let mut p = player_at(400, 250);
        assert!(p.step_move(&input(false, true, true, false), false).unwrap());
        assert_eq!(p.rect(), Rect::new(395, 255, 50, 50));
        assert_eq!(p.facing(), Direction::DownLeft);
        let img = p.sprite.get(&BODY).unwrap().image().clone();
        assert!(img.flip_y);
        assert_eq!(img.angle, -135.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut p = player_at(400, 250);
        assert!(!p.step_move(&input(true, true, false, false), false).unwrap());
        assert_eq!(p.rect(), Rect::new(400, 250, 50, 50));
    }

    #[test]
    fn test_move_out_of_arena_reverts_fully() {
        // 3px from the right edge: a 5px step would overshoot, no clamping
        let mut p = player_at(847, 300);
        assert!(!p.step_move(&input(true, false, false, true), false).unwrap());
        assert_eq!(p.rect(), Rect::new(847, 300, 50, 50));
        assert_eq!(p.facing(), Direction::Up);

        let mut p = player_at(0, 0);
        assert!(!p.step_move(&input(true, false, false, false), false).unwrap());
        assert_eq!(p.rect(), Rect::new(0, 0, 50, 50));
    }

    #[test]
    fn test_suppressed_angle_still_moves() {
        let mut p = player_at(400, 250);
        assert!(p.step_move(&input(false, false, false, true), true).unwrap());
        assert_eq!(p.rect().x, 405);
        assert_eq!(p.facing(), Direction::Up);
    }

    #[test]
    fn test_huge_invulnerability_saturates() {
        let mut p = player_at(400, 250);
        p.set_invulnerable(u32::MAX).unwrap();
        assert_eq!(p.invulnerable, -i32::MAX);
        p.update(&TickInput::default()).unwrap();
        assert!(p.is_invulnerable());
    }

    #[test]
    fn test_invulnerability_counts_down_and_restores_sprite() {
        let mut p = player_at(400, 250);
        p.set_invulnerable(3).unwrap();
        assert!(p.is_invulnerable());
        assert_eq!(
            p.sprite.get(&BODY).unwrap().image().source,
            Image::asset("cheer", 50, 50).source
        );

        // Facing frozen while invulnerable
        p.update(&input(false, false, false, true)).unwrap();
        p.update(&input(false, false, false, true)).unwrap();
        assert!(p.is_invulnerable());
        assert_eq!(p.facing(), Direction::Up);
        p.update(&TickInput::default()).unwrap();
        assert!(!p.is_invulnerable());
        assert_eq!(p.sprite.get(&BODY).unwrap().image().angle, 90.0);

        p.update(&input(false, false, false, true)).unwrap();
        assert_eq!(p.facing(), Direction::Right);
    }
}
