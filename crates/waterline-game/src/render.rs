use waterline_core::geom::Rect;
use waterline_core::surface::{DrawSurface, LayerDef, SpriteId};

use crate::error::SessionError;
use crate::level::{TILE_COLLECTIBLE, TILE_SIZE, TILE_SOLID, TileLevel};
use crate::player::{Facing, PlayerState};

/// Sky backdrop behind the parallax layers.
const SKY_COLOR: [u8; 4] = [146, 205, 235, 255];

/// Draws one complete frame: parallax background, the visible slice of
/// the tile grid, then the player. The whole scene is resubmitted every
/// tick; nothing is retained between frames.
#[derive(Debug, Clone)]
pub struct RenderPass {
    layers: Vec<LayerDef>,
    screen_w: f32,
    screen_h: f32,
}

impl RenderPass {
    /// Layer definitions are validated up front; a degenerate layer
    /// aborts construction instead of failing every frame.
    pub fn new(layers: Vec<LayerDef>, screen_w: f32, screen_h: f32) -> Result<Self, SessionError> {
        for (index, layer) in layers.iter().enumerate() {
            if layer.tile_width <= 0.0 || layer.height <= 0.0 {
                return Err(SessionError::DegenerateLayer { index });
            }
        }
        Ok(Self {
            layers,
            screen_w,
            screen_h,
        })
    }

    pub fn draw(
        &self,
        surface: &mut dyn DrawSurface,
        level: &TileLevel,
        player: &PlayerState,
        scroll_x: f32,
    ) {
        surface.clear();
        surface.fill_rect(
            Rect::new(0.0, 0.0, self.screen_w, self.screen_h),
            SKY_COLOR,
        );
        self.draw_layers(surface, scroll_x);
        self.draw_tiles(surface, level, scroll_x);
        surface.draw_sprite(
            SpriteId::Player,
            None,
            Rect::new(
                player.render_x(scroll_x),
                player.render_y(),
                player.width,
                player.height,
            ),
            player.facing == Facing::Left,
        );
    }

    fn draw_layers(&self, surface: &mut dyn DrawSurface, scroll_x: f32) {
        for (depth, layer) in self.layers.iter().enumerate() {
            // Each layer back samples at half the rate of the one in
            // front of it, wrapped to the layer's own tiling width.
            let factor = 2f32.powi(depth as i32 + 1);
            let offset = (scroll_x / factor) % layer.tile_width;
            let src = Rect::new(offset, 0.0, self.screen_w, layer.height);
            let dst = Rect::new(0.0, self.screen_h - layer.height, self.screen_w, layer.height);
            surface.draw_sprite(layer.sprite, Some(src), dst, false);
        }
    }

    fn draw_tiles(&self, surface: &mut dyn DrawSurface, level: &TileLevel, scroll_x: f32) {
        let first_col = (scroll_x / TILE_SIZE).floor().max(0.0) as usize;
        let last_col = (((scroll_x + self.screen_w) / TILE_SIZE).ceil() as usize).min(level.cols());
        for row in 0..level.rows() {
            for col in first_col..last_col {
                let sprite = match level.cell(row, col) {
                    TILE_SOLID => SpriteId::Tile,
                    TILE_COLLECTIBLE => SpriteId::Collectible,
                    _ => continue,
                };
                let dst = Rect::new(
                    col as f32 * TILE_SIZE - scroll_x,
                    row as f32 * TILE_SIZE,
                    TILE_SIZE,
                    TILE_SIZE,
                );
                surface.draw_sprite(sprite, None, dst, false);
            }
        }
    }
}
