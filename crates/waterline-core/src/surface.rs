use serde::{Deserialize, Serialize};

use crate::geom::Rect;

/// Identifies an image resource on the draw surface. The surface owns
/// the actual pixel data; the core only names what to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Tile,
    Collectible,
    Player,
    /// Parallax background layer, indexed back to front.
    Layer(u8),
}

/// Opaque render target. All coordinates are logical units; the surface
/// is responsible for any physical pixel scaling.
pub trait DrawSurface {
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: [u8; 4]);

    /// Draw `sprite` into `dst`, sampling from `src` when given
    /// (otherwise the whole image), mirrored horizontally when `flip_x`.
    fn draw_sprite(&mut self, sprite: SpriteId, src: Option<Rect>, dst: Rect, flip_x: bool);
}

/// A single parallax background layer. Layers are stored back to front;
/// the renderer derives each layer's scroll factor from its index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerDef {
    pub sprite: SpriteId,
    /// Width in logical units after which the layer image repeats.
    pub tile_width: f32,
    pub height: f32,
}
