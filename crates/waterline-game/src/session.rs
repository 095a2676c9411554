use serde::{Deserialize, Serialize};

use waterline_core::geom::Rect;
use waterline_core::input::InputSource;
use waterline_core::notice::NoticeSurface;
use waterline_core::surface::{DrawSurface, LayerDef};
use waterline_core::timer::OneShotTimer;

use crate::camera;
use crate::collision;
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::level::{LevelSet, TILE_COLLECTIBLE, TILE_SIZE, TileLevel};
use crate::player::{PlayerController, PlayerState};
use crate::render::RenderPass;

/// Session-wide counters and flags, reset together on level restart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionCounters {
    pub collected: u32,
    /// Fixed at level load; the win threshold.
    pub total: u32,
    pub scroll_x: f32,
    pub started: bool,
    pub over: bool,
    pub won: bool,
}

/// Owns the whole game state and runs the fixed-step frame. One
/// instance per play-through; `reset` rebuilds it in place from the
/// level template, so nothing lives at module scope.
pub struct GameSession {
    config: SessionConfig,
    levels: LevelSet,
    level_index: usize,
    level: TileLevel,
    player: PlayerController,
    counters: SessionCounters,
    render: RenderPass,
    reset_timer: OneShotTimer,
}

impl GameSession {
    pub fn new(
        levels: LevelSet,
        layers: Vec<LayerDef>,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let render = RenderPass::new(layers, config.screen_width, config.screen_height)?;
        let level = levels.first().instantiate();
        let total = level.count_collectibles();
        let player = PlayerController::new(&config);
        Ok(Self {
            levels,
            level_index: 0,
            level,
            player,
            counters: SessionCounters {
                total,
                ..SessionCounters::default()
            },
            render,
            reset_timer: OneShotTimer::idle(),
            config,
        })
    }

    pub fn counters(&self) -> &SessionCounters {
        &self.counters
    }

    pub fn player(&self) -> &PlayerState {
        &self.player.state
    }

    pub fn level(&self) -> &TileLevel {
        &self.level
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn reset_pending(&self) -> bool {
        self.reset_timer.is_armed()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// One fixed frame: draw with the current state, then resolve
    /// collisions, apply input and physics, sweep pickups, and check
    /// the end conditions. Input is polled exactly once, in the player
    /// step.
    pub fn tick(
        &mut self,
        surface: &mut dyn DrawSurface,
        input: &dyn InputSource,
        notice: &mut dyn NoticeSurface,
        dt: f32,
    ) {
        // A pending reset fires only here, never inside a frame.
        if self.reset_timer.tick(dt) {
            self.reset(notice);
        }
        self.counters.started = true;

        self.counters.scroll_x = camera::compute_scroll(
            self.player.state.x,
            self.player.state.width,
            self.config.screen_width,
            self.level.pixel_width(),
        );
        self.render
            .draw(surface, &self.level, &self.player.state, self.counters.scroll_x);

        let hitbox = self
            .config
            .physics
            .margin
            .collision_box(self.player.state.visual_box());
        let contact = collision::resolve(hitbox, &self.level);
        self.player.tick(input, &contact, self.level.pixel_width(), dt);

        let hitbox = self
            .config
            .physics
            .margin
            .collision_box(self.player.state.visual_box());
        self.sweep_collectibles(hitbox, notice);
        self.check_endings(notice);
    }

    /// Rebuild the session on the current level: fresh grid from the
    /// template, player at spawn, counters and jump flags cleared.
    pub fn reset(&mut self, notice: &mut dyn NoticeSurface) {
        self.load_level(self.level_index);
        notice.hide();
        tracing::info!(level = self.level_index, "session reset");
    }

    fn load_level(&mut self, index: usize) {
        let Some(template) = self.levels.template(index) else {
            return;
        };
        let level = template.instantiate();
        let total = level.count_collectibles();
        self.level_index = index;
        self.level = level;
        self.counters = SessionCounters {
            total,
            ..SessionCounters::default()
        };
        self.player = PlayerController::new(&self.config);
        self.reset_timer.cancel();
    }

    /// Zero every collectible cell the actor box overlaps; each cell
    /// counts once because it is cleared on first touch. Completing the
    /// set shows the notice and schedules the delayed reset.
    fn sweep_collectibles(&mut self, actor: Rect, notice: &mut dyn NoticeSurface) {
        let first_col = ((actor.x / TILE_SIZE).floor() as i64).max(0);
        let last_col = ((actor.right() / TILE_SIZE).floor() as i64).min(self.level.cols() as i64 - 1);
        let first_row = ((actor.y / TILE_SIZE).floor() as i64).max(0);
        let last_row = ((actor.bottom() / TILE_SIZE).floor() as i64).min(self.level.rows() as i64 - 1);

        for row in first_row..=last_row {
            for col in first_col..=last_col {
                let (row, col) = (row as usize, col as usize);
                if self.level.cell(row, col) == TILE_COLLECTIBLE
                    && actor.overlaps(&TileLevel::tile_box(row, col))
                {
                    self.level.clear_cell(row, col);
                    self.counters.collected += 1;
                    tracing::debug!(row, col, collected = self.counters.collected, "pickup");
                }
            }
        }

        if self.counters.total > 0
            && self.counters.collected >= self.counters.total
            && !self.reset_timer.is_armed()
        {
            tracing::info!(
                level = self.level_index,
                total = self.counters.total,
                "level complete"
            );
            notice.show("Level complete!");
            self.reset_timer.start(self.config.reset_delay_secs);
        }
    }

    fn check_endings(&mut self, notice: &mut dyn NoticeSurface) {
        if self.counters.over {
            return;
        }
        if self.player.state.y >= self.config.screen_height {
            self.counters.over = true;
            tracing::info!(level = self.level_index, "player fell below the screen");
            return;
        }
        let exit_x = self.level.pixel_width() - self.config.bounds.exit_margin;
        if self.player.state.x >= exit_x {
            if self.level_index + 1 < self.levels.len() {
                tracing::info!(from = self.level_index, "level exit reached");
                self.load_level(self.level_index + 1);
                notice.hide();
            } else {
                self.counters.over = true;
                self.counters.won = true;
                tracing::info!("final level exit reached");
            }
        }
    }
}
