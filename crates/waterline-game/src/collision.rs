use serde::{Deserialize, Serialize};

use waterline_core::geom::Rect;

use crate::level::{TILE_SIZE, TILE_SOLID, TileLevel};

/// Minimum intersection width for a floor or ceiling contact. Narrower
/// overlaps are glancing corner touches and set no flag.
pub const MIN_SUPPORT_WIDTH: f32 = 4.0;

/// Directional contact between an actor box and the tile grid,
/// recomputed from scratch every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionResult {
    /// Actor overlaps a tile from above: the tile is a floor.
    pub top: bool,
    /// Actor overlaps a tile from below (head bump).
    pub bottom: bool,
    /// Wall on the actor's left, blocking leftward movement.
    pub left: bool,
    /// Wall on the actor's right, blocking rightward movement.
    pub right: bool,
    /// World y of the supporting floor tile's top edge. When several
    /// tiles qualify in one tick, the highest edge wins.
    pub top_y: Option<f32>,
}

/// Offset applied to the visual sprite box to produce the collision
/// box. The widening makes edge landings forgiving; the shift biases it
/// toward the sprite's leading edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitboxMargin {
    pub widen: f32,
    pub shift_x: f32,
}

impl Default for HitboxMargin {
    fn default() -> Self {
        Self {
            widen: 50.0,
            shift_x: 25.0,
        }
    }
}

impl HitboxMargin {
    pub fn collision_box(&self, visual: Rect) -> Rect {
        Rect::new(
            visual.x + self.shift_x - self.widen / 2.0,
            visual.y,
            visual.w + self.widen,
            visual.h,
        )
    }
}

/// Resolve directional contact between `actor` and the solid tiles of
/// `level`. Only the cells the box can touch are scanned, in row-major
/// order; tiles outside the box cannot overlap it, so the flags equal
/// those of a whole-grid pass.
pub fn resolve(actor: Rect, level: &TileLevel) -> CollisionResult {
    let mut result = CollisionResult::default();

    let first_col = ((actor.x / TILE_SIZE).floor() as i64 - 1).max(0);
    let last_col = ((actor.right() / TILE_SIZE).floor() as i64 + 1).min(level.cols() as i64 - 1);
    let first_row = ((actor.y / TILE_SIZE).floor() as i64 - 1).max(0);
    let last_row = ((actor.bottom() / TILE_SIZE).floor() as i64 + 1).min(level.rows() as i64 - 1);

    for row in first_row..=last_row {
        for col in first_col..=last_col {
            if level.cell(row as usize, col as usize) != TILE_SOLID {
                continue;
            }
            let tile = TileLevel::tile_box(row as usize, col as usize);
            let Some(hit) = actor.intersection(&tile) else {
                continue;
            };

            if hit.h > hit.w {
                // Vertical-dominant overlap: a wall. Which side it
                // blocks follows from the relative centers.
                if actor.center_x() < tile.center_x() {
                    result.right = true;
                } else {
                    result.left = true;
                }
            } else if hit.w > hit.h && hit.w > MIN_SUPPORT_WIDTH {
                if actor.center_y() < tile.center_y() {
                    result.top = true;
                    result.top_y = Some(result.top_y.map_or(tile.y, |y| y.min(tile.y)));
                } else {
                    result.bottom = true;
                }
            }
        }
    }

    result
}
