use serde::{Deserialize, Serialize};

use waterline_core::geom::Rect;
use waterline_core::input::{Action, InputSource};

use crate::collision::CollisionResult;
use crate::config::SessionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

/// Player kinematic state in world (level) coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
    pub velocity_y: f32,
    pub facing: Facing,
}

impl PlayerState {
    pub fn visual_box(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Screen-draw x for the current scroll offset.
    pub fn render_x(&self, scroll_x: f32) -> f32 {
        self.x - scroll_x
    }

    pub fn render_y(&self) -> f32 {
        self.y
    }
}

/// Jump key bookkeeping. A new impulse fires at most once per discrete
/// press-and-hold: edge-triggered, not level-triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpState {
    pub held: bool,
    pub impulse_consumed: bool,
    pub held_last_tick: bool,
}

/// Integrates player motion against the per-tick collision scan. All
/// quantities are re-derived from the fresh scan each tick; nothing is
/// delta-encoded across frames.
#[derive(Debug, Clone)]
pub struct PlayerController {
    pub state: PlayerState,
    jump: JumpState,
    config: SessionConfig,
}

impl PlayerController {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            state: PlayerState {
                width: config.player.width,
                height: config.player.height,
                x: config.player.spawn_x,
                y: config.player.spawn_y,
                velocity_y: 0.0,
                facing: Facing::Right,
            },
            jump: JumpState::default(),
            config: config.clone(),
        }
    }

    pub fn jump_state(&self) -> JumpState {
        self.jump
    }

    /// Gap between the player's bottom edge and the nearest floor seen
    /// this tick. With no floor in the scan the sentinel puts the floor
    /// at the bottom of the screen plus one player height, so the gap
    /// stays positive until the player has fully left the screen.
    pub fn distance_from_floor(&self, contact: &CollisionResult) -> f32 {
        let screen_h = self.config.screen_height;
        let nearest_floor = match contact.top_y {
            Some(top_y) => screen_h - top_y,
            None => -self.state.height,
        };
        screen_h - nearest_floor - (self.state.y + self.state.height)
    }

    /// One fixed physics step. `contact` is the collision scan taken
    /// against this tick's pre-move collision box.
    pub fn tick(
        &mut self,
        input: &dyn InputSource,
        contact: &CollisionResult,
        level_pixel_width: f32,
        dt: f32,
    ) {
        let dx = self.config.physics.move_speed * dt;

        // 1. Horizontal input, blocked by walls and the level bounds.
        if input.is_held(Action::MoveRight) {
            self.state.facing = Facing::Right;
            let limit = level_pixel_width - self.config.bounds.right_inset;
            if !contact.right && self.state.x + dx <= limit {
                self.state.x += dx;
            }
        } else if input.is_held(Action::MoveLeft) {
            self.state.facing = Facing::Left;
            if !contact.left && self.state.x - dx >= -self.config.bounds.left_tolerance {
                self.state.x -= dx;
            }
        }

        // 2. Jump: impulse only on a key-down edge seen while grounded,
        // once per hold.
        let distance = self.distance_from_floor(contact);
        self.jump.held = input.is_held(Action::Jump);
        if self.jump.held {
            if !self.jump.impulse_consumed && !self.jump.held_last_tick && distance <= 0.0 {
                self.state.velocity_y = -self.config.physics.jump_speed;
                self.jump.impulse_consumed = true;
            }
        } else {
            self.jump.impulse_consumed = false;
        }
        self.jump.held_last_tick = self.jump.held;

        // 3. Gravity while airborne; otherwise rest exactly on the
        // floor. A fresh upward impulse must survive, so only downward
        // (or zero) velocity is settled here.
        if distance > 0.0 {
            self.state.velocity_y += self.config.physics.gravity * dt;
        } else if self.state.velocity_y >= 0.0 {
            self.state.velocity_y = 0.0;
            self.state.y += distance;
        }

        // 4. Reconcile velocity with this tick's contacts.
        if self.state.velocity_y > 0.0 && contact.top {
            self.state.velocity_y = 0.0;
        }
        if self.state.velocity_y < 0.0
            && (self.state.y <= self.config.physics.ceiling_y || contact.bottom)
        {
            self.state.velocity_y = 0.0;
        }

        // 5. Apply.
        self.state.y += self.state.velocity_y * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::resolve;
    use crate::level::{LevelTemplate, TILE_SOLID, TileLevel};
    use waterline_core::test_helpers::ScriptedInput;

    const DT: f32 = 1.0 / 60.0;

    /// 15 rows x 30 cols (480 x 960 px), solid bottom row, plus extras.
    fn level_with(extras: &[(usize, usize)]) -> TileLevel {
        let mut rows = vec![vec![0u8; 30]; 15];
        for col in 0..30 {
            rows[14][col] = TILE_SOLID;
        }
        for &(r, c) in extras {
            rows[r][c] = TILE_SOLID;
        }
        LevelTemplate::from_rows(&rows).unwrap().instantiate()
    }

    fn controller() -> PlayerController {
        PlayerController::new(&SessionConfig::default())
    }

    /// One session-ordered step: scan with the pre-move box, then tick.
    fn step(pc: &mut PlayerController, input: &ScriptedInput, level: &TileLevel) {
        let hitbox = pc.config.physics.margin.collision_box(pc.state.visual_box());
        let contact = resolve(hitbox, level);
        pc.tick(input, &contact, level.pixel_width(), DT);
    }

    #[test]
    fn at_rest_on_floor_stays_put() {
        let level = level_with(&[]);
        let mut pc = controller();
        let input = ScriptedInput::new();
        let resting_y = pc.state.y;
        for _ in 0..20 {
            step(&mut pc, &input, &level);
            assert_eq!(pc.state.velocity_y, 0.0);
            assert_eq!(pc.state.y, resting_y);
        }
    }

    #[test]
    fn falling_player_lands_exactly_on_the_floor() {
        let level = level_with(&[]);
        let mut pc = controller();
        pc.state.y = 100.0;
        let input = ScriptedInput::new();
        for _ in 0..300 {
            step(&mut pc, &input, &level);
        }
        // Floor row top is 448; standing height is 448 - 59.
        assert_eq!(pc.state.y, 389.0);
        assert_eq!(pc.state.velocity_y, 0.0);
    }

    #[test]
    fn jump_impulse_fires_exactly_once_per_hold() {
        let level = level_with(&[]);
        let mut pc = controller();
        let input = ScriptedInput::holding(&[Action::Jump]);

        let jump_speed = pc.config.physics.jump_speed;
        let mut impulses = 0;
        for _ in 0..30 {
            step(&mut pc, &input, &level);
            if pc.state.velocity_y == -jump_speed {
                impulses += 1;
            }
        }
        assert_eq!(impulses, 1, "held jump must produce a single impulse");
    }

    #[test]
    fn releasing_jump_rearms_the_impulse() {
        let level = level_with(&[]);
        let mut pc = controller();
        let mut input = ScriptedInput::holding(&[Action::Jump]);

        step(&mut pc, &input, &level);
        assert!(pc.jump_state().impulse_consumed);

        // Ride the jump out back to the floor with the key released.
        input.release(Action::Jump);
        for _ in 0..300 {
            step(&mut pc, &input, &level);
        }
        assert_eq!(pc.state.y, 389.0, "player should be grounded again");
        assert!(!pc.jump_state().impulse_consumed);

        input.press(Action::Jump);
        step(&mut pc, &input, &level);
        assert!(
            pc.state.velocity_y < 0.0,
            "fresh press while grounded must jump again"
        );
    }

    #[test]
    fn holding_jump_while_landing_does_not_bounce() {
        let level = level_with(&[]);
        let mut pc = controller();
        pc.state.y = 200.0; // airborne, key already held
        let input = ScriptedInput::holding(&[Action::Jump]);
        for _ in 0..300 {
            step(&mut pc, &input, &level);
        }
        assert_eq!(
            pc.state.y, 389.0,
            "key was down before landing; without a fresh press edge no impulse fires"
        );
    }

    #[test]
    fn left_clamp_is_stable_at_the_boundary() {
        let level = level_with(&[]);
        let mut pc = controller();
        pc.state.x = 0.0;
        let input = ScriptedInput::holding(&[Action::MoveLeft]);

        let tolerance = pc.config.bounds.left_tolerance;
        let mut positions = Vec::new();
        for _ in 0..20 {
            step(&mut pc, &input, &level);
            positions.push(pc.state.x);
            assert!(pc.state.x >= -tolerance);
            assert_eq!(pc.state.velocity_y, 0.0);
        }
        // Once blocked, the position must not oscillate.
        let settled = *positions.last().unwrap();
        assert!(positions.iter().rev().take(10).all(|&x| x == settled));
    }

    #[test]
    fn right_bound_respects_the_hitbox_inset() {
        let level = level_with(&[]);
        let mut pc = controller();
        let limit = level.pixel_width() - pc.config.bounds.right_inset;
        pc.state.x = limit - 10.0;
        let input = ScriptedInput::holding(&[Action::MoveRight]);
        for _ in 0..20 {
            step(&mut pc, &input, &level);
            assert!(pc.state.x <= limit);
        }
    }

    #[test]
    fn wall_blocks_horizontal_movement() {
        // Wall column at col 8 (x 256..288), two tiles tall on the floor.
        let level = level_with(&[(13, 8), (12, 8)]);
        let mut pc = controller();
        pc.state.x = 20.0; // approach the wall from well clear of it
        let input = ScriptedInput::holding(&[Action::MoveRight]);
        for _ in 0..120 {
            step(&mut pc, &input, &level);
        }
        // Collision box right edge = x + width + widen overhang; the
        // wall face at 256 must stop it (up to one step of penetration).
        let hitbox = pc.config.physics.margin.collision_box(pc.state.visual_box());
        assert!(hitbox.right() <= 256.0 + pc.config.physics.move_speed * DT + 1e-3);
        let settled = pc.state.x;
        for _ in 0..10 {
            step(&mut pc, &input, &level);
        }
        assert_eq!(pc.state.x, settled, "blocked position must be stable");
    }

    #[test]
    fn head_bump_zeroes_upward_velocity() {
        // Ceiling tile a couple of tiles above the spawn column.
        let level = level_with(&[(9, 5)]);
        let mut pc = controller();
        let input = ScriptedInput::holding(&[Action::Jump]);

        let mut bumped = false;
        for _ in 0..60 {
            step(&mut pc, &input, &level);
            if pc.state.velocity_y == 0.0 && pc.state.y < 380.0 {
                bumped = true;
                break;
            }
        }
        assert!(bumped, "rising player should stop at the ceiling tile");
    }

    #[test]
    fn world_ceiling_stops_upward_motion() {
        let level = level_with(&[]);
        let mut pc = controller();
        pc.state.y = 10.0;
        pc.state.velocity_y = -840.0;
        let input = ScriptedInput::new();
        for _ in 0..60 {
            step(&mut pc, &input, &level);
            assert!(pc.state.y > -20.0, "ceiling bound must cap upward travel");
        }
    }

    #[test]
    fn facing_follows_input() {
        let level = level_with(&[]);
        let mut pc = controller();
        assert_eq!(pc.state.facing, Facing::Right);

        let left = ScriptedInput::holding(&[Action::MoveLeft]);
        step(&mut pc, &left, &level);
        assert_eq!(pc.state.facing, Facing::Left);

        let right = ScriptedInput::holding(&[Action::MoveRight]);
        step(&mut pc, &right, &level);
        assert_eq!(pc.state.facing, Facing::Right);
    }

    #[test]
    fn render_coordinates_subtract_scroll() {
        let pc = controller();
        assert_eq!(pc.state.render_x(40.0), pc.state.x - 40.0);
        assert_eq!(pc.state.render_y(), pc.state.y);
    }
}
